/*!
 * Placement Strategies
 * First-fit, best-fit and worst-fit block selection
 *
 * Each strategy is a pure scan over the address-ordered block list. It
 * returns the index of a free block with at least `size` units, or `None`
 * when no such block exists. Ties go to the lowest index.
 */

use super::types::{MemoryBlock, MemoryError};
use crate::core::types::Size;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// First free block large enough, in address order
pub fn first_fit(blocks: &[MemoryBlock], size: Size) -> Option<usize> {
    blocks.iter().position(|block| block.fits(size))
}

/// Smallest free block large enough
pub fn best_fit(blocks: &[MemoryBlock], size: Size) -> Option<usize> {
    let mut best: Option<(usize, Size)> = None;

    for (index, block) in blocks.iter().enumerate() {
        if !block.fits(size) {
            continue;
        }
        // Strict comparison keeps the earliest of equal sizes
        match best {
            Some((_, best_size)) if block.size >= best_size => {}
            _ => best = Some((index, block.size)),
        }
    }

    best.map(|(index, _)| index)
}

/// Largest free block large enough
pub fn worst_fit(blocks: &[MemoryBlock], size: Size) -> Option<usize> {
    let mut worst: Option<(usize, Size)> = None;

    for (index, block) in blocks.iter().enumerate() {
        if !block.fits(size) {
            continue;
        }
        match worst {
            Some((_, worst_size)) if block.size <= worst_size => {}
            _ => worst = Some((index, block.size)),
        }
    }

    worst.map(|(index, _)| index)
}

/// Placement policy selected by the caller on each allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementPolicy {
    #[default]
    FirstFit,
    BestFit,
    WorstFit,
}

impl PlacementPolicy {
    pub const ALL: [PlacementPolicy; 3] = [
        PlacementPolicy::FirstFit,
        PlacementPolicy::BestFit,
        PlacementPolicy::WorstFit,
    ];

    /// Pick a block index for `size` units under this policy
    #[inline]
    pub fn select(self, blocks: &[MemoryBlock], size: Size) -> Option<usize> {
        match self {
            PlacementPolicy::FirstFit => first_fit(blocks, size),
            PlacementPolicy::BestFit => best_fit(blocks, size),
            PlacementPolicy::WorstFit => worst_fit(blocks, size),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PlacementPolicy::FirstFit => "First Fit",
            PlacementPolicy::BestFit => "Best Fit",
            PlacementPolicy::WorstFit => "Worst Fit",
        }
    }

    /// Descriptive characteristics of the policy
    pub fn info(self) -> AlgorithmInfo {
        match self {
            PlacementPolicy::FirstFit => AlgorithmInfo {
                policy: self,
                time_complexity: "O(n)",
                space_complexity: "O(1)",
                advantages: &[
                    "Fastest allocation time",
                    "Simple implementation",
                    "Good for systems with frequent allocations",
                ],
                disadvantages: &[
                    "Can lead to fragmentation at the beginning of memory",
                    "May not utilize memory optimally",
                ],
                best_use_case: "Real-time systems requiring fast allocation",
            },
            PlacementPolicy::BestFit => AlgorithmInfo {
                policy: self,
                time_complexity: "O(n)",
                space_complexity: "O(1)",
                advantages: &[
                    "Minimizes wasted space",
                    "Better memory utilization",
                    "Leaves larger blocks for future large allocations",
                ],
                disadvantages: &[
                    "Can create many small unusable blocks",
                    "Slower than First Fit",
                    "May increase external fragmentation",
                ],
                best_use_case: "Systems with varied allocation sizes and memory constraints",
            },
            PlacementPolicy::WorstFit => AlgorithmInfo {
                policy: self,
                time_complexity: "O(n)",
                space_complexity: "O(1)",
                advantages: &[
                    "Leaves large remaining blocks",
                    "Reduces small fragment creation",
                    "Good for systems with similar-sized allocations",
                ],
                disadvantages: &[
                    "May waste memory for small allocations",
                    "Always scans the whole block list",
                    "Can lead to poor memory utilization",
                ],
                best_use_case: "Systems with predictable, similar-sized memory requests",
            },
        }
    }
}

impl fmt::Display for PlacementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlacementPolicy {
    type Err = MemoryError;

    /// Accepts "First Fit", "first-fit", "first_fit", "firstfit" and so on
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "firstfit" | "first" => Ok(PlacementPolicy::FirstFit),
            "bestfit" | "best" => Ok(PlacementPolicy::BestFit),
            "worstfit" | "worst" => Ok(PlacementPolicy::WorstFit),
            _ => Err(MemoryError::UnknownPolicy(s.trim().to_string())),
        }
    }
}

/// Static description of a placement policy
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlgorithmInfo {
    pub policy: PlacementPolicy,
    pub time_complexity: &'static str,
    pub space_complexity: &'static str,
    pub advantages: &'static [&'static str],
    pub disadvantages: &'static [&'static str],
    pub best_use_case: &'static str,
}
