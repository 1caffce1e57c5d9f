/*!
 * Shared Memory Manager Tests
 * Concurrent callers serialized through one lock
 */

use memsim::{MemoryManager, PlacementPolicy, SharedMemoryManager};
use std::thread;

#[test]
fn test_concurrent_allocations_keep_invariants() {
    let shared = SharedMemoryManager::new(MemoryManager::new(10_000).unwrap());

    let handles: Vec<_> = (0..8u32)
        .map(|t| {
            let shared = shared.clone();
            thread::spawn(move || {
                for i in 0..50u32 {
                    let pid = t * 1000 + i + 1;
                    let policy = PlacementPolicy::ALL[(i % 3) as usize];
                    if shared.allocate(pid, 10 + (i as usize % 7), policy).unwrap() && i % 2 == 0 {
                        assert!(shared.deallocate(pid));
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker panicked");
    }

    shared.with_lock(|mm| assert!(mm.check_invariants().is_ok()));

    let snapshot = shared.snapshot();
    // Odd iterations keep their block: 25 per thread
    assert_eq!(snapshot.processes.len(), 8 * 25);
    assert_eq!(snapshot.stats.active_process_count, 8 * 25);
    assert_eq!(
        snapshot.stats.allocated_total + snapshot.stats.free_total,
        10_000
    );
}

#[test]
fn test_clones_share_state() {
    let a = SharedMemoryManager::from(MemoryManager::new(100).unwrap());
    let b = a.clone();

    assert!(a.allocate(1, 40, PlacementPolicy::BestFit).unwrap());
    assert_eq!(b.info(), (100, 40, 60));
    assert!(b.deallocate(1));
    assert_eq!(a.blocks().len(), 1);

    a.allocate(2, 10, PlacementPolicy::FirstFit).unwrap();
    b.reset();
    assert!(a.active_processes().is_empty());
    assert_eq!(a.stats().free_total, 100);
}
