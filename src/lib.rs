/*!
 * memsim
 * Dynamic memory allocation simulator exposed as a library
 *
 * A fixed-size address space is carved into blocks by first-fit, best-fit
 * or worst-fit placement, split on allocation, and coalesced on release.
 */

pub mod core;
pub mod memory;
pub mod monitoring;
pub mod shell;

// Re-exports
pub use crate::core::types::{Offset, Pid, Size};
pub use memory::{
    Allocator, FragmentationLevel, ManagerConfig, MemoryBlock, MemoryError, MemoryInfo,
    MemoryManager, MemoryPressure, MemoryResult, MemorySnapshot, MemoryStats, PlacementPolicy,
    ProcessAllocation, SharedMemoryManager, Simulator,
};
pub use monitoring::init_tracing;
pub use shell::{Command, Shell, ShellError, ShellOutput};
