//! Location, identifier, and time window types.

use serde::{Deserialize, Serialize};

/// Dense, stable index of a location inside a [`Graph`](super::Graph).
///
/// Ids are handed out in insertion order and stay valid until the graph is
/// cleared. The id order is the enumeration order used by matrix snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LocationId(pub(crate) usize);

impl LocationId {
    /// Position of this location in the graph's enumeration order.
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for LocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The closed interval `[earliest, latest]` in which a location may be visited.
///
/// Arriving after `latest` is infeasible. Arriving before `earliest` is
/// allowed: the traveller waits until `earliest` before moving on.
///
/// # Examples
///
/// ```
/// use u_tsptw::models::TimeWindow;
///
/// let tw = TimeWindow::new(5, 10).unwrap();
/// assert!(tw.contains(7));
/// assert!(!tw.is_violated(10));
/// assert!(tw.is_violated(11));
/// assert_eq!(tw.departure(2), Some(5));
/// assert_eq!(tw.departure(12), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    earliest: i64,
    latest: i64,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// Returns `None` if `earliest > latest`.
    pub fn new(earliest: i64, latest: i64) -> Option<Self> {
        if earliest > latest {
            return None;
        }
        Some(Self { earliest, latest })
    }

    /// Earliest time at which service may begin.
    pub fn earliest(&self) -> i64 {
        self.earliest
    }

    /// Latest allowable arrival time.
    pub fn latest(&self) -> i64 {
        self.latest
    }

    /// Returns `true` if the given time falls within this window.
    pub fn contains(&self, time: i64) -> bool {
        time >= self.earliest && time <= self.latest
    }

    /// Returns `true` if arriving at the given time misses this window.
    pub fn is_violated(&self, arrival: i64) -> bool {
        arrival > self.latest
    }

    /// Time spent waiting when arriving at `arrival`.
    pub fn waiting_time(&self, arrival: i64) -> i64 {
        (self.earliest - arrival).max(0)
    }

    /// Effective departure time after arriving at `arrival`.
    ///
    /// Early arrivals wait until `earliest`; late arrivals yield `None`.
    pub fn departure(&self, arrival: i64) -> Option<i64> {
        if self.is_violated(arrival) {
            None
        } else {
            Some(arrival.max(self.earliest))
        }
    }
}

/// A named stop with its visiting time window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    name: String,
    time_window: TimeWindow,
}

impl Location {
    pub(crate) fn new(name: String, time_window: TimeWindow) -> Self {
        Self { name, time_window }
    }

    /// Unique name of this location.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Visiting window of this location.
    pub fn time_window(&self) -> TimeWindow {
        self.time_window
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn set_time_window(&mut self, time_window: TimeWindow) {
        self.time_window = time_window;
    }
}
