/*!
 * Memory Allocator Implementation
 * Allocation and deallocation logic
 */

use super::super::placement::PlacementPolicy;
use super::super::types::{MemoryBlock, MemoryError, MemoryPressure, MemoryResult};
use super::MemoryManager;
use crate::core::types::{Offset, Pid, Size};
use tracing::{debug, error, info, warn};

impl MemoryManager {
    /// Allocate `size` units to `pid` using `policy`
    ///
    /// Returns `Ok(false)` when no single free block is large enough, even if
    /// the total free space would be.
    pub fn allocate(&mut self, pid: Pid, size: Size, policy: PlacementPolicy) -> MemoryResult<bool> {
        if size == 0 {
            return Err(MemoryError::InvalidSize { requested: size });
        }
        if pid == 0 {
            return Err(MemoryError::InvalidProcessId(pid));
        }
        if self.processes.contains_key(&pid) {
            return Err(MemoryError::DuplicateProcess(pid));
        }

        let Some(index) = policy.select(&self.blocks, size) else {
            debug!(
                pid,
                size,
                %policy,
                free = self.total_size - self.used,
                "No contiguous free block large enough"
            );
            return Ok(false);
        };

        let offset = self.split_and_assign(index, pid, size);
        self.processes.insert(pid, size);
        self.used += size;

        if let Some(level) = self.check_memory_pressure() {
            warn!(
                pid,
                size,
                offset,
                %policy,
                used = self.used,
                total = self.total_size,
                "Memory pressure {}", level
            );
        } else {
            info!(pid, size, offset, %policy, "Allocated block");
        }

        debug_assert!(self.check_invariants().is_ok());
        Ok(true)
    }

    /// Release the block owned by `pid` and merge it with free neighbours
    ///
    /// Returns `false` for an unknown or already released pid.
    pub fn deallocate(&mut self, pid: Pid) -> bool {
        let Some(&size) = self.processes.get(&pid) else {
            warn!(pid, "Attempted to deallocate unknown or already freed process");
            return false;
        };

        let Some(index) = self.block_index_of(pid) else {
            error!(pid, size, "Process record has no owning block");
            return false;
        };

        let offset = self.blocks[index].start_offset;
        self.blocks[index].release();
        self.processes.remove(&pid);
        self.used -= size;

        let merged = self.coalesce_free_blocks();
        info!(pid, size, offset, merged, "Deallocated block");

        debug_assert!(self.check_invariants().is_ok());
        true
    }

    /// Hand the front `size` units of free block `index` to `pid`
    ///
    /// Any remainder becomes a new free block right after it; nothing else moves.
    fn split_and_assign(&mut self, index: usize, pid: Pid, size: Size) -> Offset {
        let block = &mut self.blocks[index];
        let offset = block.start_offset;

        if block.size == size {
            block.assign(pid);
            return offset;
        }

        let remainder = MemoryBlock::free(offset + size, block.size - size);
        block.size = size;
        block.assign(pid);
        debug!(
            pid,
            offset,
            size,
            remainder = remainder.size,
            "Split block"
        );
        self.blocks.insert(index + 1, remainder);
        offset
    }

    pub(super) fn block_index_of(&self, pid: Pid) -> Option<usize> {
        self.blocks
            .iter()
            .position(|block| block.allocated && block.owner_pid == Some(pid))
    }

    /// Pressure level once it rises above `Low`
    fn check_memory_pressure(&self) -> Option<MemoryPressure> {
        match self.stats().memory_pressure() {
            MemoryPressure::Low => None,
            level => Some(level),
        }
    }
}
