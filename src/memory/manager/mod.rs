/*!
 * Memory Management
 *
 * Simulated allocator over a single fixed-size address space.
 *
 * ## Model
 *
 * - **Block list**: address-ordered `Vec<MemoryBlock>` that always partitions
 *   `[0, total_size)` with no gaps or overlaps
 * - **Process records**: pid -> allocated size, one block per active pid
 *
 * ## Features
 *
 * - **Pluggable placement**: first-fit, best-fit or worst-fit per request
 * - **Block splitting**: a larger free block is split into an allocated
 *   prefix and a free remainder
 * - **Coalescing**: adjacent free blocks are merged after every deallocation
 * - **Fragmentation metrics**: free space held in blocks below a tunable
 *   threshold is reported as fragmented
 *
 * All mutations either complete or leave the manager untouched. Snapshots are
 * copies, so callers can never corrupt the block list.
 */

mod allocator;
mod invariants;
mod process_ops;
mod shared;

pub use shared::SharedMemoryManager;

use super::config::ManagerConfig;
use super::traits::{Allocator, MemoryInfo};
use super::placement::PlacementPolicy;
use super::types::{MemoryBlock, MemoryResult, MemorySnapshot, MemoryStats, ProcessAllocation};
use crate::core::types::{Pid, Size};
use ahash::RandomState;
use std::collections::HashMap;
use tracing::info;

/// Memory manager
#[derive(Debug, Clone)]
pub struct MemoryManager {
    pub(super) blocks: Vec<MemoryBlock>,
    pub(super) processes: HashMap<Pid, Size, RandomState>,
    pub(super) total_size: Size,
    pub(super) used: Size,
    pub(super) fragment_threshold: Size,
}

impl MemoryManager {
    /// Create a manager for `total_size` units with the default fragment threshold
    pub fn new(total_size: Size) -> MemoryResult<Self> {
        Self::with_config(ManagerConfig::new(total_size))
    }

    pub fn with_config(config: ManagerConfig) -> MemoryResult<Self> {
        config.validate()?;
        Ok(Self::build(&config))
    }

    fn build(config: &ManagerConfig) -> Self {
        info!(
            total_size = config.total_size,
            fragment_threshold = config.fragment_threshold,
            "Memory manager initialized"
        );
        Self {
            blocks: vec![MemoryBlock::free(0, config.total_size)],
            processes: HashMap::with_hasher(RandomState::new()),
            total_size: config.total_size,
            used: 0,
            fragment_threshold: config.fragment_threshold,
        }
    }

    pub fn total_size(&self) -> Size {
        self.total_size
    }

    pub fn fragment_threshold(&self) -> Size {
        self.fragment_threshold
    }

    /// Current configuration, suitable for building an identical empty manager
    pub fn config(&self) -> ManagerConfig {
        ManagerConfig::new(self.total_size).with_fragment_threshold(self.fragment_threshold)
    }
}

impl Default for MemoryManager {
    fn default() -> Self {
        Self::build(&ManagerConfig::default())
    }
}

// Implement trait interfaces
impl Allocator for MemoryManager {
    fn allocate(&mut self, pid: Pid, size: Size, policy: PlacementPolicy) -> MemoryResult<bool> {
        MemoryManager::allocate(self, pid, size, policy)
    }

    fn deallocate(&mut self, pid: Pid) -> bool {
        MemoryManager::deallocate(self, pid)
    }

    fn reset(&mut self) {
        MemoryManager::reset(self)
    }
}

impl MemoryInfo for MemoryManager {
    fn blocks(&self) -> Vec<MemoryBlock> {
        MemoryManager::blocks(self)
    }

    fn stats(&self) -> MemoryStats {
        MemoryManager::stats(self)
    }

    fn active_processes(&self) -> Vec<ProcessAllocation> {
        MemoryManager::active_processes(self)
    }

    fn info(&self) -> (Size, Size, Size) {
        MemoryManager::info(self)
    }

    fn snapshot(&self) -> MemorySnapshot {
        MemoryManager::snapshot(self)
    }
}
