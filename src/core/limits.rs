/*!
 * System Limits and Constants
 *
 * Centralized location for simulator-wide defaults and thresholds.
 * Everything here can be overridden at runtime through `ManagerConfig`.
 */

// =============================================================================
// MEMORY LIMITS
// =============================================================================

/// Default size of the simulated address space (capacity units)
pub const DEFAULT_MEMORY_POOL: usize = 1000;

/// Free blocks smaller than this are counted as fragmented
/// Tunable: the value is a policy choice, not derived from any allocator behavior
pub const DEFAULT_FRAGMENT_THRESHOLD: usize = 50;

// =============================================================================
// PRESSURE / FRAGMENTATION LEVELS (percentages)
// =============================================================================

/// Utilization at which memory pressure is reported as medium
pub const PRESSURE_MEDIUM_PCT: f64 = 60.0;

/// Utilization at which memory pressure is reported as high
pub const PRESSURE_HIGH_PCT: f64 = 80.0;

/// Utilization at which memory pressure is reported as critical
pub const PRESSURE_CRITICAL_PCT: f64 = 95.0;

/// Fragmentation below this is considered low
pub const FRAGMENTATION_LOW_PCT: f64 = 20.0;

/// Fragmentation below this (and above the low mark) is moderate
pub const FRAGMENTATION_MODERATE_PCT: f64 = 50.0;

// =============================================================================
// ENVIRONMENT OVERRIDES
// =============================================================================

/// Overrides the simulated region size
pub const ENV_TOTAL_SIZE: &str = "MEMSIM_TOTAL_SIZE";

/// Overrides the small-block fragmentation threshold
pub const ENV_FRAGMENT_THRESHOLD: &str = "MEMSIM_FRAGMENT_THRESHOLD";

/// Default placement policy for the shell session
pub const ENV_POLICY: &str = "MEMSIM_POLICY";

/// Enables JSON-formatted trace output
pub const ENV_TRACE_JSON: &str = "MEMSIM_TRACE_JSON";
