//! Solver configuration and scaling ceilings.

use crate::error::SolveError;

/// Hard ceiling for the bitmask search.
///
/// Its tables hold `2^n * n` states of 17 bytes each: about 360 MB at 20
/// locations and 1.6 GB at 22.
pub const DP_HARD_LIMIT: usize = 22;

/// Configuration shared by the solvers.
///
/// The exact strategies are exponential. Brute force costs `O((n-1)! * n)`
/// and is practical up to about 11 locations; the bitmask search costs
/// `O(2^n * n^2)` time and `O(2^n * n)` memory and is practical up to about
/// 20. Both refuse larger instances with
/// [`SolveError::TooManyLocations`] instead of running unbounded.
///
/// # Examples
///
/// ```
/// use u_tsptw::SolverConfig;
///
/// let config = SolverConfig::default()
///     .with_max_brute_force_locations(9)
///     .with_max_dp_locations(16)
///     .with_divide_base_case(2);
/// assert_eq!(config.max_dp_locations, 16);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    /// Largest instance (start included) brute force accepts.
    pub max_brute_force_locations: usize,

    /// Largest instance (start included) the bitmask search accepts.
    ///
    /// Clamped to [`DP_HARD_LIMIT`].
    pub max_dp_locations: usize,

    /// Divide & conquer solves candidate sets of at most this size by
    /// brute force instead of splitting further. At least 1.
    pub divide_base_case: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_brute_force_locations: 11,
            max_dp_locations: 20,
            divide_base_case: 3,
        }
    }
}

impl SolverConfig {
    /// Sets the largest instance brute force accepts.
    pub fn with_max_brute_force_locations(mut self, n: usize) -> Self {
        self.max_brute_force_locations = n;
        self
    }

    /// Sets the largest instance the bitmask search accepts, clamped to
    /// [`DP_HARD_LIMIT`]. Memory grows as `2^n * n * 17` bytes.
    pub fn with_max_dp_locations(mut self, n: usize) -> Self {
        self.max_dp_locations = n.min(DP_HARD_LIMIT);
        self
    }

    /// Sets the divide & conquer base-case size (at least 1).
    pub fn with_divide_base_case(mut self, n: usize) -> Self {
        self.divide_base_case = n.max(1);
        self
    }

    pub(crate) fn check_brute_force(&self, count: usize) -> Result<(), SolveError> {
        check_limit("brute force", count, self.max_brute_force_locations)
    }

    pub(crate) fn check_dp(&self, count: usize) -> Result<(), SolveError> {
        check_limit(
            "dynamic programming",
            count,
            self.max_dp_locations.min(DP_HARD_LIMIT),
        )
    }
}

fn check_limit(strategy: &'static str, count: usize, limit: usize) -> Result<(), SolveError> {
    if count > limit {
        return Err(SolveError::TooManyLocations {
            strategy,
            count,
            limit,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = SolverConfig::default();
        assert_eq!(c.max_brute_force_locations, 11);
        assert_eq!(c.max_dp_locations, 20);
        assert_eq!(c.divide_base_case, 3);
    }

    #[test]
    fn test_builders_clamp() {
        let c = SolverConfig::default()
            .with_max_dp_locations(64)
            .with_divide_base_case(0);
        assert_eq!(c.max_dp_locations, DP_HARD_LIMIT);
        assert_eq!(c.divide_base_case, 1);
        // 2^25 * 25 states no longer fit
        let c = SolverConfig::default().with_max_dp_locations(25);
        assert_eq!(c.max_dp_locations, 22);
        assert!(c.check_dp(23).is_err());
    }

    #[test]
    fn test_limits() {
        let c = SolverConfig::default().with_max_brute_force_locations(4);
        assert!(c.check_brute_force(4).is_ok());
        assert_eq!(
            c.check_brute_force(5),
            Err(SolveError::TooManyLocations {
                strategy: "brute force",
                count: 5,
                limit: 4
            })
        );
        assert!(c.check_dp(20).is_ok());
        assert!(c.check_dp(21).is_err());
    }
}
