/*!
 * Memory Types
 * Common types for the allocation simulator
 */

use crate::core::limits::{
    FRAGMENTATION_LOW_PCT, FRAGMENTATION_MODERATE_PCT, PRESSURE_CRITICAL_PCT, PRESSURE_HIGH_PCT,
    PRESSURE_MEDIUM_PCT,
};
use crate::core::types::{Offset, Pid, Size};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Memory operation result
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Memory errors
///
/// Only caller mistakes end up here. "No block large enough" and "unknown
/// process on free" are ordinary outcomes and are reported as `false`.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum MemoryError {
    #[error("Invalid size: {requested} (sizes must be positive)")]
    #[diagnostic(
        code(memory::invalid_size),
        help("Request at least one capacity unit.")
    )]
    InvalidSize { requested: Size },

    #[error("Invalid process id: {0} (process ids must be positive)")]
    #[diagnostic(code(memory::invalid_pid))]
    InvalidProcessId(Pid),

    #[error("Process {0} already exists")]
    #[diagnostic(
        code(memory::duplicate_process),
        help("Deallocate the process first or pick another id.")
    )]
    DuplicateProcess(Pid),

    #[error("Unknown allocation algorithm: {0}")]
    #[diagnostic(
        code(memory::unknown_policy),
        help("Valid policies: first-fit, best-fit, worst-fit.")
    )]
    UnknownPolicy(String),

    #[error("Block list invariant violated: {0}")]
    #[diagnostic(code(memory::invariant_violation))]
    InvariantViolation(String),
}

/// One contiguous run of the simulated address space
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryBlock {
    pub start_offset: Offset,
    pub size: Size,
    pub allocated: bool,
    pub owner_pid: Option<Pid>,
}

impl MemoryBlock {
    /// Free block covering `[start_offset, start_offset + size)`
    pub fn free(start_offset: Offset, size: Size) -> Self {
        Self {
            start_offset,
            size,
            allocated: false,
            owner_pid: None,
        }
    }

    /// Allocated block owned by `pid`
    pub fn owned(start_offset: Offset, size: Size, pid: Pid) -> Self {
        Self {
            start_offset,
            size,
            allocated: true,
            owner_pid: Some(pid),
        }
    }

    /// One past the last unit covered by this block
    pub fn end_offset(&self) -> Offset {
        self.start_offset + self.size
    }

    pub fn is_allocated(&self) -> bool {
        self.allocated
    }

    pub fn is_free(&self) -> bool {
        !self.allocated
    }

    /// Whether a placement policy may pick this block for `size` units
    pub fn fits(&self, size: Size) -> bool {
        !self.allocated && self.size >= size
    }

    pub(crate) fn assign(&mut self, pid: Pid) {
        self.allocated = true;
        self.owner_pid = Some(pid);
    }

    pub(crate) fn release(&mut self) {
        self.allocated = false;
        self.owner_pid = None;
    }
}

/// Active process and the size it holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessAllocation {
    pub pid: Pid,
    pub size: Size,
}

/// Memory statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryStats {
    pub total_size: Size,
    pub allocated_total: Size,
    pub free_total: Size,
    pub utilization_pct: f64,
    pub fragmentation_pct: f64,
    pub free_block_count: usize,
    pub allocated_block_count: usize,
    pub active_process_count: usize,
    /// Free blocks below the fragment threshold
    pub fragmented_block_count: usize,
    pub largest_free_block: Size,
    pub average_free_block_size: f64,
}

impl MemoryStats {
    pub fn memory_pressure(&self) -> MemoryPressure {
        if self.utilization_pct >= PRESSURE_CRITICAL_PCT {
            MemoryPressure::Critical
        } else if self.utilization_pct >= PRESSURE_HIGH_PCT {
            MemoryPressure::High
        } else if self.utilization_pct >= PRESSURE_MEDIUM_PCT {
            MemoryPressure::Medium
        } else {
            MemoryPressure::Low
        }
    }

    pub fn fragmentation_level(&self) -> FragmentationLevel {
        if self.fragmentation_pct < FRAGMENTATION_LOW_PCT {
            FragmentationLevel::Low
        } else if self.fragmentation_pct < FRAGMENTATION_MODERATE_PCT {
            FragmentationLevel::Moderate
        } else {
            FragmentationLevel::High
        }
    }
}

/// Blocks, statistics and processes captured at the same instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemorySnapshot {
    pub blocks: Vec<MemoryBlock>,
    pub stats: MemoryStats,
    pub processes: Vec<ProcessAllocation>,
}

/// Memory pressure levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemoryPressure {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for MemoryPressure {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            MemoryPressure::Low => write!(f, "LOW"),
            MemoryPressure::Medium => write!(f, "MEDIUM"),
            MemoryPressure::High => write!(f, "HIGH"),
            MemoryPressure::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Coarse rating of external fragmentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FragmentationLevel {
    Low,
    Moderate,
    High,
}

impl std::fmt::Display for FragmentationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            FragmentationLevel::Low => write!(f, "LOW"),
            FragmentationLevel::Moderate => write!(f, "MODERATE"),
            FragmentationLevel::High => write!(f, "HIGH"),
        }
    }
}
