/*!
 * Memory Traits
 * Allocation and inspection interfaces used by callers of the simulator
 */

use super::placement::PlacementPolicy;
use super::types::*;
use crate::core::types::{Pid, Size};

/// Mutating side of the simulator
pub trait Allocator {
    /// Allocate `size` units for `pid`; `Ok(false)` if nothing fits
    fn allocate(&mut self, pid: Pid, size: Size, policy: PlacementPolicy) -> MemoryResult<bool>;

    /// Release the block held by `pid`; `false` if `pid` is not active
    fn deallocate(&mut self, pid: Pid) -> bool;

    /// Return to a single free block
    fn reset(&mut self);
}

/// Read-only views of the simulator
pub trait MemoryInfo {
    /// Block list in address order
    fn blocks(&self) -> Vec<MemoryBlock>;

    /// Get overall memory statistics
    fn stats(&self) -> MemoryStats;

    /// Active processes with their sizes
    fn active_processes(&self) -> Vec<ProcessAllocation>;

    /// Get memory info as (total, allocated, free)
    fn info(&self) -> (Size, Size, Size);

    /// All three views at once
    fn snapshot(&self) -> MemorySnapshot {
        MemorySnapshot {
            blocks: self.blocks(),
            stats: self.stats(),
            processes: self.active_processes(),
        }
    }

    /// Get memory pressure level
    fn pressure(&self) -> MemoryPressure {
        self.stats().memory_pressure()
    }

    fn fragmentation_level(&self) -> FragmentationLevel {
        self.stats().fragmentation_level()
    }
}

/// Full simulator interface combining allocation and inspection
pub trait Simulator: Allocator + MemoryInfo {}

impl<T> Simulator for T where T: Allocator + MemoryInfo {}
