/*!
 * Shared Memory Manager
 * Thread-safe handle around a single `MemoryManager`
 */

use super::super::placement::PlacementPolicy;
use super::super::traits::{Allocator, MemoryInfo};
use super::super::types::{
    MemoryBlock, MemoryResult, MemorySnapshot, MemoryStats, ProcessAllocation,
};
use super::MemoryManager;
use crate::core::types::{Pid, Size};
use parking_lot::Mutex;
use std::sync::Arc;

/// Cloneable handle that serializes every operation on one manager
///
/// # Consistency
/// - One exclusive lock per public call, held for the whole call, so a split
///   or merge is never observed half done
/// - Clones share the same manager
#[derive(Debug, Clone)]
pub struct SharedMemoryManager {
    inner: Arc<Mutex<MemoryManager>>,
}

impl SharedMemoryManager {
    pub fn new(manager: MemoryManager) -> Self {
        Self {
            inner: Arc::new(Mutex::new(manager)),
        }
    }

    pub fn allocate(&self, pid: Pid, size: Size, policy: PlacementPolicy) -> MemoryResult<bool> {
        self.inner.lock().allocate(pid, size, policy)
    }

    pub fn deallocate(&self, pid: Pid) -> bool {
        self.inner.lock().deallocate(pid)
    }

    pub fn reset(&self) {
        self.inner.lock().reset()
    }

    pub fn blocks(&self) -> Vec<MemoryBlock> {
        self.inner.lock().blocks()
    }

    pub fn stats(&self) -> MemoryStats {
        self.inner.lock().stats()
    }

    pub fn active_processes(&self) -> Vec<ProcessAllocation> {
        self.inner.lock().active_processes()
    }

    pub fn info(&self) -> (Size, Size, Size) {
        self.inner.lock().info()
    }

    /// Consistent view of blocks, stats and processes under one lock
    pub fn snapshot(&self) -> MemorySnapshot {
        self.inner.lock().snapshot()
    }

    /// Run several operations as one unit
    pub fn with_lock<R>(&self, f: impl FnOnce(&mut MemoryManager) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl From<MemoryManager> for SharedMemoryManager {
    fn from(manager: MemoryManager) -> Self {
        Self::new(manager)
    }
}

impl Allocator for SharedMemoryManager {
    fn allocate(&mut self, pid: Pid, size: Size, policy: PlacementPolicy) -> MemoryResult<bool> {
        SharedMemoryManager::allocate(self, pid, size, policy)
    }

    fn deallocate(&mut self, pid: Pid) -> bool {
        SharedMemoryManager::deallocate(self, pid)
    }

    fn reset(&mut self) {
        SharedMemoryManager::reset(self)
    }
}

impl MemoryInfo for SharedMemoryManager {
    fn blocks(&self) -> Vec<MemoryBlock> {
        SharedMemoryManager::blocks(self)
    }

    fn stats(&self) -> MemoryStats {
        SharedMemoryManager::stats(self)
    }

    fn active_processes(&self) -> Vec<ProcessAllocation> {
        SharedMemoryManager::active_processes(self)
    }

    fn info(&self) -> (Size, Size, Size) {
        SharedMemoryManager::info(self)
    }

    fn snapshot(&self) -> MemorySnapshot {
        SharedMemoryManager::snapshot(self)
    }
}
