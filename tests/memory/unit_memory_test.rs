/*!
 * Memory Manager Tests
 * Allocation, splitting, coalescing, and failure handling
 */

use memsim::memory::{Allocator, MemoryInfo};
use memsim::{MemoryBlock, MemoryError, MemoryManager, PlacementPolicy};
use pretty_assertions::assert_eq;

fn fragmented_manager() -> MemoryManager {
    // Build [free 30][P2 20][free 100][P4 10][free 40] in a 200-unit region
    let mut mem_mgr = MemoryManager::new(200).unwrap();
    for (pid, size) in [(1, 30), (2, 20), (3, 100), (4, 10)] {
        assert!(mem_mgr.allocate(pid, size, PlacementPolicy::FirstFit).unwrap());
    }
    assert!(mem_mgr.deallocate(1));
    assert!(mem_mgr.deallocate(3));
    mem_mgr
}

#[test]
fn test_memory_manager_initialization() {
    let mem_mgr = MemoryManager::new(1000).unwrap();
    let (total, used, available) = mem_mgr.info();

    assert_eq!(total, 1000);
    assert_eq!(used, 0);
    assert_eq!(available, total);
    assert_eq!(mem_mgr.blocks(), vec![MemoryBlock::free(0, 1000)]);
}

#[test]
fn test_zero_sized_region_rejected() {
    assert_eq!(
        MemoryManager::new(0).unwrap_err(),
        MemoryError::InvalidSize { requested: 0 }
    );
}

#[test]
fn test_split_correctness() {
    let mut mem_mgr = MemoryManager::new(100).unwrap();
    assert!(mem_mgr.allocate(1, 20, PlacementPolicy::FirstFit).unwrap());

    let blocks = mem_mgr.blocks();
    assert_eq!(blocks.len(), 2);
    assert_eq!((blocks[0].start_offset, blocks[0].size, blocks[0].allocated), (0, 20, true));
    assert_eq!((blocks[1].start_offset, blocks[1].size, blocks[1].allocated), (20, 80, false));
    assert_eq!(blocks[0].owner_pid, Some(1));
    assert_eq!(blocks[1].owner_pid, None);
}

#[test]
fn test_coalesce_correctness() {
    let mut mem_mgr = MemoryManager::new(100).unwrap();
    mem_mgr.allocate(1, 20, PlacementPolicy::FirstFit).unwrap();
    mem_mgr.allocate(2, 30, PlacementPolicy::FirstFit).unwrap();

    assert!(mem_mgr.deallocate(2));
    assert_eq!(
        mem_mgr.blocks(),
        vec![MemoryBlock::owned(0, 20, 1), MemoryBlock::free(20, 80)]
    );
}

#[test]
fn test_coalesce_both_neighbours() {
    let mut mem_mgr = fragmented_manager();
    // Freeing P2 joins [free 30] and [free 100]
    assert!(mem_mgr.deallocate(2));
    assert_eq!(
        mem_mgr.blocks(),
        vec![
            MemoryBlock::free(0, 150),
            MemoryBlock::owned(150, 10, 4),
            MemoryBlock::free(160, 40),
        ]
    );

    assert!(mem_mgr.deallocate(4));
    assert_eq!(mem_mgr.blocks(), vec![MemoryBlock::free(0, 200)]);
}

#[test]
fn test_policies_pick_different_holes() {
    // Holes: 30 @0, 100 @50, 40 @160
    let cases = [
        (PlacementPolicy::FirstFit, 0),
        (PlacementPolicy::BestFit, 0),
        (PlacementPolicy::WorstFit, 50),
    ];
    for (policy, expected_offset) in cases {
        let mut mem_mgr = fragmented_manager();
        assert!(mem_mgr.allocate(9, 25, policy).unwrap());
        assert_eq!(
            mem_mgr.block_of(9).map(|b| b.start_offset),
            Some(expected_offset),
            "{policy}"
        );
    }

    // 35 skips the 30-unit hole; best fit now prefers the 40-unit hole
    let mut mem_mgr = fragmented_manager();
    assert!(mem_mgr.allocate(9, 35, PlacementPolicy::BestFit).unwrap());
    assert_eq!(mem_mgr.block_of(9).map(|b| b.start_offset), Some(160));

    let mut mem_mgr = fragmented_manager();
    assert!(mem_mgr.allocate(9, 35, PlacementPolicy::FirstFit).unwrap());
    assert_eq!(mem_mgr.block_of(9).map(|b| b.start_offset), Some(50));
}

#[test]
fn test_allocation_impossible_mutates_nothing() {
    for policy in PlacementPolicy::ALL {
        let mut mem_mgr = fragmented_manager();
        let before = mem_mgr.snapshot();

        // 170 free units in total, but no single hole holds 101
        assert_eq!(mem_mgr.allocate(9, 101, policy), Ok(false));
        assert_eq!(mem_mgr.snapshot(), before);
    }
}

#[test]
fn test_duplicate_process_for_every_policy() {
    for policy in PlacementPolicy::ALL {
        let mut mem_mgr = MemoryManager::new(100).unwrap();
        mem_mgr.allocate(7, 10, policy).unwrap();
        let before = mem_mgr.blocks();

        assert_eq!(
            mem_mgr.allocate(7, 10, policy),
            Err(MemoryError::DuplicateProcess(7))
        );
        assert_eq!(mem_mgr.blocks(), before);
    }
}

#[test]
fn test_invalid_size_for_every_policy() {
    for policy in PlacementPolicy::ALL {
        let mut mem_mgr = MemoryManager::new(100).unwrap();
        assert_eq!(
            mem_mgr.allocate(1, 0, policy),
            Err(MemoryError::InvalidSize { requested: 0 })
        );
        assert!(mem_mgr.active_processes().is_empty());
    }
}

#[test]
fn test_unknown_process_deallocation() {
    let mut mem_mgr = fragmented_manager();
    let before = mem_mgr.snapshot();

    assert!(!mem_mgr.deallocate(42));
    assert!(!mem_mgr.deallocate(1)); // already freed
    assert_eq!(mem_mgr.snapshot(), before);
}

#[test]
fn test_pid_reusable_after_deallocation() {
    let mut mem_mgr = MemoryManager::new(100).unwrap();
    mem_mgr.allocate(1, 60, PlacementPolicy::FirstFit).unwrap();
    mem_mgr.deallocate(1);
    assert!(mem_mgr.allocate(1, 80, PlacementPolicy::WorstFit).unwrap());
    assert_eq!(mem_mgr.process_size(1), Some(80));
}

#[test]
fn test_reset_is_idempotent() {
    let mut mem_mgr = fragmented_manager();
    mem_mgr.reset();
    let once = mem_mgr.snapshot();
    mem_mgr.reset();

    assert_eq!(mem_mgr.snapshot(), once);
    assert_eq!(once.blocks, vec![MemoryBlock::free(0, 200)]);
    assert!(once.processes.is_empty());
    assert_eq!(once.stats.active_process_count, 0);
}

#[test]
fn test_trait_objects_drive_manager() {
    fn fill(allocator: &mut dyn Allocator) {
        allocator.allocate(1, 50, PlacementPolicy::BestFit).unwrap();
        allocator.allocate(2, 50, PlacementPolicy::BestFit).unwrap();
    }

    let mut mem_mgr = MemoryManager::new(100).unwrap();
    fill(&mut mem_mgr);

    let info: &dyn MemoryInfo = &mem_mgr;
    assert_eq!(info.info(), (100, 100, 0));
    assert_eq!(info.pressure(), memsim::MemoryPressure::Critical);
}
