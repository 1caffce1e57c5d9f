/*!
 * Block List Invariants
 */

use super::super::types::{MemoryError, MemoryResult};
use super::MemoryManager;
use std::collections::HashSet;

impl MemoryManager {
    /// Verify the block list and process records agree with each other
    ///
    /// Checks that blocks partition `[0, total_size)`, that no two neighbours
    /// are free, that owners are present exactly on allocated blocks, and that
    /// every process record matches exactly one block of the recorded size.
    pub fn check_invariants(&self) -> MemoryResult<()> {
        let violation = |msg: String| Err(MemoryError::InvariantViolation(msg));

        let Some(first) = self.blocks.first() else {
            return violation("block list is empty".into());
        };
        if first.start_offset != 0 {
            return violation(format!("first block starts at {}", first.start_offset));
        }

        let mut owners = HashSet::with_capacity(self.processes.len());
        let mut used = 0;

        for (index, block) in self.blocks.iter().enumerate() {
            if block.size == 0 {
                return violation(format!("block {index} is empty"));
            }
            if block.allocated != block.owner_pid.is_some() {
                return violation(format!("block {index} owner does not match allocated flag"));
            }

            if let Some(pid) = block.owner_pid {
                if !owners.insert(pid) {
                    return violation(format!("pid {pid} owns more than one block"));
                }
                match self.processes.get(&pid) {
                    Some(&size) if size == block.size => {}
                    Some(&size) => {
                        return violation(format!(
                            "pid {pid} recorded with {size} units but block {index} holds {}",
                            block.size
                        ))
                    }
                    None => return violation(format!("block {index} owned by unknown pid {pid}")),
                }
                used += block.size;
            }

            if let Some(next) = self.blocks.get(index + 1) {
                if block.end_offset() != next.start_offset {
                    return violation(format!(
                        "block {index} ends at {} but block {} starts at {}",
                        block.end_offset(),
                        index + 1,
                        next.start_offset
                    ));
                }
                if block.is_free() && next.is_free() {
                    return violation(format!("blocks {index} and {} are both free", index + 1));
                }
            }
        }

        // Last block exists since the list is non-empty
        let end = self.blocks[self.blocks.len() - 1].end_offset();
        if end != self.total_size {
            return violation(format!("blocks end at {end}, region is {}", self.total_size));
        }
        if owners.len() != self.processes.len() {
            return violation(format!(
                "{} process records but {} owned blocks",
                self.processes.len(),
                owners.len()
            ));
        }
        if used != self.used {
            return violation(format!("used counter {} but blocks hold {used}", self.used));
        }

        Ok(())
    }
}
