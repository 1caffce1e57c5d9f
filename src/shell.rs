/*!
 * Command Shell
 * Line-oriented commands driven against any simulator
 *
 * Each line parses into a `Command`, runs against a `Simulator`, and yields
 * a serializable `ShellOutput` that the binary prints as JSON
 */

use crate::core::types::{Pid, Size};
use crate::memory::{
    AlgorithmInfo, FragmentationLevel, MemoryBlock, MemoryError, MemoryPressure, MemorySnapshot,
    MemoryStats, PlacementPolicy, ProcessAllocation, Simulator,
};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Help text, one entry per command
pub const HELP: &[&str] = &[
    "alloc <pid> <size> [policy]  allocate size units to pid",
    "free <pid>                   release the block held by pid",
    "policy <name>                set the default policy (first-fit, best-fit, worst-fit)",
    "reset                        release everything",
    "blocks                       print the block list",
    "stats                        print memory statistics",
    "procs                        print active processes",
    "snapshot                     print blocks, stats and processes together",
    "info [policy]                describe one or all placement policies",
    "help                         show this text",
    "quit                         leave the shell",
];

/// Errors produced while parsing or running a command
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShellError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("missing argument <{0}>")]
    MissingArgument(&'static str),

    #[error("invalid {name}: {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("unexpected argument: {0}")]
    UnexpectedArgument(String),

    #[error(transparent)]
    Memory(#[from] MemoryError),
}

/// A parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Allocate {
        pid: Pid,
        size: Size,
        policy: Option<PlacementPolicy>,
    },
    Deallocate {
        pid: Pid,
    },
    SetPolicy(PlacementPolicy),
    Reset,
    Blocks,
    Stats,
    Processes,
    Snapshot,
    Info(Option<PlacementPolicy>),
    Help,
    Quit,
}

impl Command {
    /// Parse a line into a command
    ///
    /// Blank lines and `#` comments yield `Ok(None)`
    pub fn parse(line: &str) -> Result<Option<Self>, ShellError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let mut args = line.split_whitespace();
        let Some(name) = args.next() else {
            return Ok(None);
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "alloc" | "allocate" => {
                let pid = number(args.next(), "pid")?;
                let size = number(args.next(), "size")?;
                // Remaining words form the policy name, so "Best Fit" works too
                let rest: Vec<&str> = args.by_ref().collect();
                let policy = if rest.is_empty() {
                    None
                } else {
                    Some(rest.join(" ").parse()?)
                };
                Command::Allocate { pid, size, policy }
            }
            "free" | "dealloc" | "deallocate" => Command::Deallocate {
                pid: number(args.next(), "pid")?,
            },
            "policy" => {
                let rest: Vec<&str> = args.by_ref().collect();
                if rest.is_empty() {
                    return Err(ShellError::MissingArgument("policy"));
                }
                Command::SetPolicy(rest.join(" ").parse()?)
            }
            "info" => {
                let rest: Vec<&str> = args.by_ref().collect();
                if rest.is_empty() {
                    Command::Info(None)
                } else {
                    Command::Info(Some(rest.join(" ").parse()?))
                }
            }
            "reset" => Command::Reset,
            "blocks" => Command::Blocks,
            "stats" => Command::Stats,
            "procs" | "processes" => Command::Processes,
            "snapshot" => Command::Snapshot,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(ShellError::UnknownCommand(other.to_string())),
        };

        if let Some(extra) = args.next() {
            return Err(ShellError::UnexpectedArgument(extra.to_string()));
        }

        Ok(Some(command))
    }
}

fn number<T: std::str::FromStr>(arg: Option<&str>, name: &'static str) -> Result<T, ShellError> {
    let value = arg.ok_or(ShellError::MissingArgument(name))?;
    value.parse().map_err(|_| ShellError::InvalidNumber {
        name,
        value: value.to_string(),
    })
}

/// Result of a command, serialized by the binary
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShellOutput {
    Allocated {
        pid: Pid,
        size: Size,
        policy: PlacementPolicy,
        success: bool,
        block: Option<MemoryBlock>,
    },
    Deallocated {
        pid: Pid,
        success: bool,
    },
    Policy {
        policy: PlacementPolicy,
    },
    Reset,
    Blocks {
        blocks: Vec<MemoryBlock>,
    },
    Stats {
        stats: MemoryStats,
        pressure: MemoryPressure,
        fragmentation: FragmentationLevel,
    },
    Processes {
        processes: Vec<ProcessAllocation>,
    },
    Snapshot(MemorySnapshot),
    Info {
        algorithms: Vec<AlgorithmInfo>,
    },
    Help {
        commands: &'static [&'static str],
    },
    Quit,
}

/// Shell session: a simulator plus the policy used when a command names none
pub struct Shell<S: Simulator> {
    simulator: S,
    policy: PlacementPolicy,
}

impl<S: Simulator> Shell<S> {
    pub fn new(simulator: S, policy: PlacementPolicy) -> Self {
        Self { simulator, policy }
    }

    pub fn policy(&self) -> PlacementPolicy {
        self.policy
    }

    pub fn simulator(&self) -> &S {
        &self.simulator
    }

    /// Parse and run one line, skipping blanks and comments
    pub fn run_line(&mut self, line: &str) -> Result<Option<ShellOutput>, ShellError> {
        match Command::parse(line)? {
            Some(command) => self.execute(command).map(Some),
            None => Ok(None),
        }
    }

    pub fn execute(&mut self, command: Command) -> Result<ShellOutput, ShellError> {
        debug!(?command, "Executing shell command");

        let output = match command {
            Command::Allocate { pid, size, policy } => {
                let policy = policy.unwrap_or(self.policy);
                let success = self.simulator.allocate(pid, size, policy)?;
                let block = if success {
                    self.simulator
                        .blocks()
                        .into_iter()
                        .find(|block| block.owner_pid == Some(pid))
                } else {
                    None
                };
                ShellOutput::Allocated {
                    pid,
                    size,
                    policy,
                    success,
                    block,
                }
            }
            Command::Deallocate { pid } => ShellOutput::Deallocated {
                pid,
                success: self.simulator.deallocate(pid),
            },
            Command::SetPolicy(policy) => {
                self.policy = policy;
                ShellOutput::Policy { policy }
            }
            Command::Reset => {
                self.simulator.reset();
                ShellOutput::Reset
            }
            Command::Blocks => ShellOutput::Blocks {
                blocks: self.simulator.blocks(),
            },
            Command::Stats => {
                let stats = self.simulator.stats();
                ShellOutput::Stats {
                    pressure: stats.memory_pressure(),
                    fragmentation: stats.fragmentation_level(),
                    stats,
                }
            }
            Command::Processes => ShellOutput::Processes {
                processes: self.simulator.active_processes(),
            },
            Command::Snapshot => ShellOutput::Snapshot(self.simulator.snapshot()),
            Command::Info(policy) => ShellOutput::Info {
                algorithms: match policy {
                    Some(policy) => vec![policy.info()],
                    None => PlacementPolicy::ALL.iter().map(|p| p.info()).collect(),
                },
            },
            Command::Help => ShellOutput::Help { commands: HELP },
            Command::Quit => ShellOutput::Quit,
        };

        Ok(output)
    }
}
