/*!
 * Core Types
 * Common types used across the simulator
 */

/// Process ID type
pub type Pid = u32;

/// Offset of a block from the start of the simulated region
pub type Offset = usize;

/// Size type for memory operations (capacity units)
pub type Size = usize;
