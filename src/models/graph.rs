//! Location/edge graph: construction, queries, and updates.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::{Location, LocationId, TimeWindow};
use crate::distance::{GraphSnapshot, Matrix, UNREACHABLE};
use crate::error::GraphError;

/// One direction of a symmetric connection between two locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Destination of this direction.
    pub to: LocationId,
    /// Travel distance (cost). Never negative.
    pub distance: i64,
    /// Travel duration. Never negative.
    pub travel_time: i64,
}

/// An undirected graph of time-windowed locations.
///
/// Locations live in an arena addressed by [`LocationId`]; each location owns
/// its outgoing edges keyed by destination. Connecting `a` and `b` always
/// stores both directions with identical values.
///
/// Mutations validate every invariant before touching state, so a rejected
/// call leaves the graph exactly as it was. Lookups report absence with
/// `None` rather than an error.
///
/// # Examples
///
/// ```
/// use u_tsptw::models::Graph;
///
/// let mut graph = Graph::new();
/// let a = graph.add_location("A", 0, 20).unwrap();
/// let b = graph.add_location("B", 2, 15).unwrap();
/// graph.connect("A", "B", 5, 3).unwrap();
///
/// assert_eq!(graph.len(), 2);
/// assert_eq!(graph.distance(a, b), Some(5));
/// assert_eq!(graph.travel_time(b, a), Some(3));
/// assert!(graph.connect("B", "A", 1, 1).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Graph {
    locations: Vec<Location>,
    names: HashMap<String, LocationId>,
    adjacency: Vec<BTreeMap<LocationId, Edge>>,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    // ---- construction ----

    /// Adds a location with the visiting window `[earliest, latest]`.
    pub fn add_location(
        &mut self,
        name: &str,
        earliest: i64,
        latest: i64,
    ) -> Result<LocationId, GraphError> {
        if self.names.contains_key(name) {
            return Err(GraphError::DuplicateKey(name.to_string()));
        }
        let window = TimeWindow::new(earliest, latest)
            .ok_or(GraphError::InvalidRange { earliest, latest })?;

        let id = LocationId(self.locations.len());
        self.locations.push(Location::new(name.to_string(), window));
        self.names.insert(name.to_string(), id);
        self.adjacency.push(BTreeMap::new());
        Ok(id)
    }

    /// Connects two locations with a symmetric edge.
    pub fn connect(
        &mut self,
        a: &str,
        b: &str,
        distance: i64,
        travel_time: i64,
    ) -> Result<(), GraphError> {
        if a == b {
            return Err(GraphError::SelfLoop(a.to_string()));
        }
        let from = self.resolve(a)?;
        let to = self.resolve(b)?;
        check_values(distance, travel_time)?;
        if self.edge(from, to).is_some() {
            return Err(GraphError::DuplicateEdge {
                from: a.to_string(),
                to: b.to_string(),
            });
        }
        self.insert_pair(from, to, distance, travel_time);
        Ok(())
    }

    /// Removes every location and edge. Previously issued ids become invalid.
    pub fn clear(&mut self) {
        self.locations.clear();
        self.names.clear();
        self.adjacency.clear();
    }

    // ---- queries ----

    /// Number of locations.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Returns `true` if the graph has no locations.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(BTreeMap::len).sum::<usize>() / 2
    }

    /// All location ids in enumeration order.
    pub fn ids(&self) -> impl Iterator<Item = LocationId> + '_ {
        (0..self.locations.len()).map(LocationId)
    }

    /// All locations with their ids, in enumeration order.
    pub fn locations(&self) -> impl Iterator<Item = (LocationId, &Location)> + '_ {
        self.locations
            .iter()
            .enumerate()
            .map(|(i, loc)| (LocationId(i), loc))
    }

    /// Returns `true` if `id` refers to a location of this graph.
    pub fn contains(&self, id: LocationId) -> bool {
        id.0 < self.locations.len()
    }

    /// Location by id.
    pub fn location(&self, id: LocationId) -> Option<&Location> {
        self.locations.get(id.0)
    }

    /// Name of a location.
    pub fn name(&self, id: LocationId) -> Option<&str> {
        self.location(id).map(Location::name)
    }

    /// Id of the location with this name.
    pub fn id_of(&self, name: &str) -> Option<LocationId> {
        self.names.get(name).copied()
    }

    /// Visiting window of a location.
    pub fn time_window(&self, id: LocationId) -> Option<TimeWindow> {
        self.location(id).map(Location::time_window)
    }

    /// Edge from `from` to `to`.
    pub fn edge(&self, from: LocationId, to: LocationId) -> Option<&Edge> {
        self.adjacency.get(from.0)?.get(&to)
    }

    /// Travel distance between two locations.
    pub fn distance(&self, from: LocationId, to: LocationId) -> Option<i64> {
        self.edge(from, to).map(|e| e.distance)
    }

    /// Travel time between two locations.
    pub fn travel_time(&self, from: LocationId, to: LocationId) -> Option<i64> {
        self.edge(from, to).map(|e| e.travel_time)
    }

    /// Outgoing edges of a location, ordered by destination id.
    ///
    /// Empty for an unknown id.
    pub fn neighbors(&self, id: LocationId) -> impl Iterator<Item = &Edge> + '_ {
        self.adjacency.get(id.0).into_iter().flat_map(BTreeMap::values)
    }

    /// Names of the given locations, skipping ids the graph does not know.
    pub fn names_of(&self, path: &[LocationId]) -> Vec<&str> {
        path.iter().filter_map(|&id| self.name(id)).collect()
    }

    // ---- updates ----

    /// Renames a location. Renaming to the current name is a no-op.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<(), GraphError> {
        let id = self.resolve(old)?;
        if old == new {
            return Ok(());
        }
        if self.names.contains_key(new) {
            return Err(GraphError::DuplicateKey(new.to_string()));
        }
        self.names.remove(old);
        self.names.insert(new.to_string(), id);
        self.locations[id.0].set_name(new.to_string());
        Ok(())
    }

    /// Replaces the visiting window of a location.
    pub fn update_time_window(
        &mut self,
        name: &str,
        earliest: i64,
        latest: i64,
    ) -> Result<(), GraphError> {
        let id = self.resolve(name)?;
        let window = TimeWindow::new(earliest, latest)
            .ok_or(GraphError::InvalidRange { earliest, latest })?;
        self.locations[id.0].set_time_window(window);
        Ok(())
    }

    /// Replaces distance and travel time of an existing edge, both directions.
    pub fn update_edge(
        &mut self,
        a: &str,
        b: &str,
        distance: i64,
        travel_time: i64,
    ) -> Result<(), GraphError> {
        let from = self.resolve(a)?;
        let to = self.resolve(b)?;
        check_values(distance, travel_time)?;
        if self.edge(from, to).is_none() {
            return Err(GraphError::MissingEdge {
                from: a.to_string(),
                to: b.to_string(),
            });
        }
        self.insert_pair(from, to, distance, travel_time);
        Ok(())
    }

    /// Moves the edge `from <-> old_to` so that it connects `from <-> new_to`.
    ///
    /// Rejects a self-loop, negative values, unknown names, a missing
    /// `from <-> old_to` edge, and an existing `from <-> new_to` edge.
    /// When `new_to == old_to` this is a plain value update.
    pub fn rewire_edge(
        &mut self,
        from: &str,
        old_to: &str,
        new_to: &str,
        distance: i64,
        travel_time: i64,
    ) -> Result<(), GraphError> {
        if from == new_to {
            return Err(GraphError::SelfLoop(from.to_string()));
        }
        check_values(distance, travel_time)?;
        let source = self.resolve(from)?;
        let old = self.resolve(old_to)?;
        let new = self.resolve(new_to)?;
        if self.edge(source, old).is_none() {
            return Err(GraphError::MissingEdge {
                from: from.to_string(),
                to: old_to.to_string(),
            });
        }
        if old != new && self.edge(source, new).is_some() {
            return Err(GraphError::DuplicateEdge {
                from: from.to_string(),
                to: new_to.to_string(),
            });
        }

        self.adjacency[source.0].remove(&old);
        self.adjacency[old.0].remove(&source);
        self.insert_pair(source, new, distance, travel_time);
        Ok(())
    }

    // ---- snapshots ----

    /// Dense `n x n` distance matrix over the id enumeration order.
    ///
    /// Missing edges (including the diagonal) hold [`UNREACHABLE`](crate::distance::UNREACHABLE).
    pub fn to_adjacency_matrix(&self) -> Matrix {
        self.edge_matrix(|e| e.distance)
    }

    /// Dense `n x n` travel time matrix over the id enumeration order.
    pub fn to_travel_time_matrix(&self) -> Matrix {
        self.edge_matrix(|e| e.travel_time)
    }

    /// Dense `n x 2n` window matrix: row `i` repeats `[earliest_i, latest_i]`
    /// in every column pair.
    pub fn to_time_window_matrix(&self) -> Matrix {
        let n = self.len();
        let mut m = Matrix::new(n, 2 * n, 0);
        for (i, loc) in self.locations.iter().enumerate() {
            let tw = loc.time_window();
            for j in 0..n {
                m.set(i, 2 * j, tw.earliest());
                m.set(i, 2 * j + 1, tw.latest());
            }
        }
        m
    }

    /// All matrices plus the window list, captured at one enumeration point.
    pub fn snapshot(&self) -> GraphSnapshot {
        let windows = self.locations.iter().map(Location::time_window).collect();
        GraphSnapshot::new(
            self.to_adjacency_matrix(),
            self.to_travel_time_matrix(),
            windows,
        )
    }

    // ---- helpers ----

    fn resolve(&self, name: &str) -> Result<LocationId, GraphError> {
        self.id_of(name)
            .ok_or_else(|| GraphError::UnknownLocation(name.to_string()))
    }

    fn insert_pair(&mut self, a: LocationId, b: LocationId, distance: i64, travel_time: i64) {
        self.adjacency[a.0].insert(
            b,
            Edge {
                to: b,
                distance,
                travel_time,
            },
        );
        self.adjacency[b.0].insert(
            a,
            Edge {
                to: a,
                distance,
                travel_time,
            },
        );
    }

    fn edge_matrix(&self, value: impl Fn(&Edge) -> i64) -> Matrix {
        let n = self.len();
        let mut m = Matrix::unreachable(n);
        for (i, edges) in self.adjacency.iter().enumerate() {
            for edge in edges.values() {
                m.set(i, edge.to.0, value(edge));
            }
        }
        m
    }
}

/// Both values must lie in `0..UNREACHABLE`; the sentinel means "no edge" in
/// matrix exports.
fn check_values(distance: i64, travel_time: i64) -> Result<(), GraphError> {
    let valid = 0..UNREACHABLE;
    if !valid.contains(&distance) || !valid.contains(&travel_time) {
        return Err(GraphError::InvalidValue {
            distance,
            travel_time,
        });
    }
    Ok(())
}
