/*!
 * memsim - Command Shell Entry Point
 *
 * Reads commands from stdin, runs them against a simulated memory region,
 * and prints one JSON document per command on stdout.
 */

use anyhow::{Context, Result};
use memsim::core::limits::ENV_POLICY;
use memsim::{init_tracing, ManagerConfig, MemoryManager, PlacementPolicy, Shell, ShellOutput};
use std::io::{self, BufRead, Write};
use tracing::{info, warn};

fn main() -> Result<()> {
    init_tracing().context("Failed to initialize tracing")?;

    let config = ManagerConfig::from_env();
    let policy = match std::env::var(ENV_POLICY) {
        Ok(name) => name
            .parse::<PlacementPolicy>()
            .with_context(|| format!("Invalid {ENV_POLICY}"))?,
        Err(_) => PlacementPolicy::default(),
    };

    let manager = MemoryManager::with_config(config).context("Invalid memory configuration")?;
    info!(
        total_size = manager.total_size(),
        fragment_threshold = manager.fragment_threshold(),
        %policy,
        "Simulator ready"
    );

    let mut shell = Shell::new(manager, policy);
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read command")?;

        match shell.run_line(&line) {
            Ok(Some(ShellOutput::Quit)) => break,
            Ok(Some(output)) => {
                let json = serde_json::to_string(&output).context("Failed to encode output")?;
                writeln!(stdout, "{json}")?;
            }
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, line = %line, "Command failed");
                writeln!(stdout, "{}", serde_json::json!({ "error": e.to_string() }))?;
            }
        }
        stdout.flush()?;
    }

    let stats = shell.simulator().stats();
    info!(
        active_processes = stats.active_process_count,
        utilization_pct = stats.utilization_pct,
        "Simulator shutting down"
    );
    Ok(())
}
