// config.rs - Engine limits and per-pattern configuration.

/// Default maximum recursion depth of the matcher.
pub const MAX_DEPTH: usize = 200;

/// Default maximum number of captures a single match can open.
pub const MAX_CAPTURES: usize = 32;

/// Limits applied to every match attempt of a pattern.
///
/// Both limits are run-time values: a larger `max_captures` lets the capture
/// table spill to the heap, and a larger `max_depth` allows deeper native
/// recursion, so raise it only as far as the thread's stack permits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchConfig {
    /// Recursion budget of one match attempt.
    pub max_depth: usize,
    /// Capacity of the capture table.
    pub max_captures: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            max_depth: MAX_DEPTH,
            max_captures: MAX_CAPTURES,
        }
    }
}
