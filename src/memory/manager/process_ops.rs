/*!
 * Process Memory Operations
 * Coalescing, reset, and read-only snapshots
 */

use super::super::types::{MemoryBlock, MemorySnapshot, MemoryStats, ProcessAllocation};
use super::MemoryManager;
use crate::core::types::{Pid, Size};
use tracing::{debug, info};

impl MemoryManager {
    /// Merge every run of adjacent free blocks into one block
    ///
    /// Position `i` is re-checked after a merge since the grown block may
    /// also touch the next free block. Returns the number of merges.
    pub(super) fn coalesce_free_blocks(&mut self) -> usize {
        let mut i = 0;
        let mut coalesced_count = 0;

        while i + 1 < self.blocks.len() {
            if self.blocks[i].is_free() && self.blocks[i + 1].is_free() {
                let next = self.blocks.remove(i + 1);
                self.blocks[i].size += next.size;
                coalesced_count += 1;
            } else {
                i += 1;
            }
        }

        if coalesced_count > 0 {
            debug!(
                merged = coalesced_count,
                blocks = self.blocks.len(),
                "Coalesced adjacent free blocks"
            );
        }

        coalesced_count
    }

    /// Drop every allocation and return to one free block spanning the region
    pub fn reset(&mut self) {
        let released = self.processes.len();
        self.blocks.clear();
        self.blocks.push(MemoryBlock::free(0, self.total_size));
        self.processes.clear();
        self.used = 0;
        info!(released, total_size = self.total_size, "Memory reset");
    }

    /// Copy of the block list in address order
    pub fn blocks(&self) -> Vec<MemoryBlock> {
        self.blocks.clone()
    }

    /// Get memory info as (total, allocated, free)
    pub fn info(&self) -> (Size, Size, Size) {
        (self.total_size, self.used, self.total_size - self.used)
    }

    /// Get detailed memory statistics
    pub fn stats(&self) -> MemoryStats {
        let mut allocated_total = 0;
        let mut free_total = 0;
        let mut allocated_blocks = 0;
        let mut free_blocks = 0;
        let mut fragmented_blocks = 0;
        let mut fragmented_space = 0;
        let mut largest_free_block = 0;

        for block in &self.blocks {
            if block.allocated {
                allocated_total += block.size;
                allocated_blocks += 1;
                continue;
            }

            free_total += block.size;
            free_blocks += 1;
            largest_free_block = largest_free_block.max(block.size);
            if block.size < self.fragment_threshold {
                fragmented_blocks += 1;
                fragmented_space += block.size;
            }
        }

        let fragmentation_pct = if free_total > 0 {
            fragmented_space as f64 * 100.0 / free_total as f64
        } else {
            0.0
        };
        let average_free_block_size = if free_blocks > 0 {
            free_total as f64 / free_blocks as f64
        } else {
            0.0
        };

        MemoryStats {
            total_size: self.total_size,
            allocated_total,
            free_total,
            utilization_pct: allocated_total as f64 * 100.0 / self.total_size as f64,
            fragmentation_pct,
            free_block_count: free_blocks,
            allocated_block_count: allocated_blocks,
            active_process_count: self.processes.len(),
            fragmented_block_count: fragmented_blocks,
            largest_free_block,
            average_free_block_size,
        }
    }

    /// Active processes in ascending pid order
    pub fn active_processes(&self) -> Vec<ProcessAllocation> {
        let mut processes: Vec<_> = self
            .processes
            .iter()
            .map(|(&pid, &size)| ProcessAllocation { pid, size })
            .collect();
        processes.sort_unstable_by_key(|p| p.pid);
        processes
    }

    /// Size held by `pid`, if active
    pub fn process_size(&self, pid: Pid) -> Option<Size> {
        self.processes.get(&pid).copied()
    }

    /// Copy of the block owned by `pid`, if active
    pub fn block_of(&self, pid: Pid) -> Option<MemoryBlock> {
        self.block_index_of(pid).map(|index| self.blocks[index].clone())
    }

    /// Blocks, stats and processes taken together
    pub fn snapshot(&self) -> MemorySnapshot {
        MemorySnapshot {
            blocks: self.blocks(),
            stats: self.stats(),
            processes: self.active_processes(),
        }
    }
}
