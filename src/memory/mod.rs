/*!
 * Memory Module
 * Placement strategies and the simulated memory manager
 */

pub mod config;
pub mod manager;
pub mod placement;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use config::ManagerConfig;
pub use manager::{MemoryManager, SharedMemoryManager};
pub use placement::{best_fit, first_fit, worst_fit, AlgorithmInfo, PlacementPolicy};
pub use traits::{Allocator, MemoryInfo, Simulator};
pub use types::*;
