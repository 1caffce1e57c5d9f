/*!
 * Block List Property Tests
 * Random operation sequences must preserve partition, conservation,
 * and the no-adjacent-free rule after every step
 */

use memsim::{MemoryManager, PlacementPolicy};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Allocate { pid: u32, size: usize, policy: PlacementPolicy },
    Deallocate { pid: u32 },
    Reset,
}

fn policy() -> impl Strategy<Value = PlacementPolicy> {
    prop_oneof![
        Just(PlacementPolicy::FirstFit),
        Just(PlacementPolicy::BestFit),
        Just(PlacementPolicy::WorstFit),
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (1u32..16, 1usize..300, policy())
            .prop_map(|(pid, size, policy)| Op::Allocate { pid, size, policy }),
        4 => (1u32..16).prop_map(|pid| Op::Deallocate { pid }),
        1 => Just(Op::Reset),
    ]
}

fn assert_partition(mem_mgr: &MemoryManager) {
    let blocks = mem_mgr.blocks();
    assert_eq!(blocks[0].start_offset, 0);
    for pair in blocks.windows(2) {
        assert_eq!(pair[0].start_offset + pair[0].size, pair[1].start_offset);
    }
    let last = blocks.last().unwrap();
    assert_eq!(last.start_offset + last.size, mem_mgr.total_size());

    let total: usize = blocks.iter().map(|b| b.size).sum();
    assert_eq!(total, mem_mgr.total_size());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_operations_preserve_invariants(
        total in 1usize..2000,
        ops in prop::collection::vec(op(), 1..60),
    ) {
        let mut mem_mgr = MemoryManager::new(total).unwrap();

        for op in ops {
            match op {
                Op::Allocate { pid, size, policy } => {
                    let before = mem_mgr.snapshot();
                    let was_active = mem_mgr.process_size(pid).is_some();
                    match mem_mgr.allocate(pid, size, policy) {
                        Ok(true) => {
                            prop_assert!(!was_active);
                            prop_assert_eq!(mem_mgr.process_size(pid), Some(size));
                        }
                        Ok(false) => {
                            prop_assert!(!was_active);
                            prop_assert!(before.blocks.iter().all(|b| !b.fits(size)));
                            prop_assert_eq!(mem_mgr.snapshot(), before);
                        }
                        Err(_) => {
                            prop_assert!(was_active);
                            prop_assert_eq!(mem_mgr.snapshot(), before);
                        }
                    }
                }
                Op::Deallocate { pid } => {
                    let was_active = mem_mgr.process_size(pid).is_some();
                    prop_assert_eq!(mem_mgr.deallocate(pid), was_active);
                    let blocks = mem_mgr.blocks();
                    prop_assert!(blocks.windows(2).all(|p| p[0].allocated || p[1].allocated));
                }
                Op::Reset => {
                    mem_mgr.reset();
                    prop_assert_eq!(mem_mgr.blocks().len(), 1);
                    prop_assert!(mem_mgr.active_processes().is_empty());
                }
            }

            assert_partition(&mem_mgr);
            prop_assert!(mem_mgr.check_invariants().is_ok());

            let stats = mem_mgr.stats();
            prop_assert_eq!(stats.allocated_total + stats.free_total, total);
            prop_assert_eq!(stats.active_process_count, mem_mgr.active_processes().len());
        }
    }

    #[test]
    fn prop_policies_agree_on_feasibility(
        sizes in prop::collection::vec(1usize..100, 1..20),
        request in 1usize..200,
    ) {
        // Same layout, same request: every policy either finds a hole or none does
        let mut mem_mgr = MemoryManager::new(sizes.iter().sum::<usize>() + 200).unwrap();
        for (i, size) in sizes.iter().enumerate() {
            mem_mgr.allocate(i as u32 + 1, *size, PlacementPolicy::FirstFit).unwrap();
        }
        for pid in (1..=sizes.len() as u32).step_by(2) {
            mem_mgr.deallocate(pid);
        }

        let outcomes: Vec<bool> = PlacementPolicy::ALL
            .iter()
            .map(|&policy| {
                let mut candidate = mem_mgr.clone();
                candidate.allocate(999, request, policy).unwrap()
            })
            .collect();
        prop_assert!(outcomes.iter().all(|&o| o == outcomes[0]));
    }
}
