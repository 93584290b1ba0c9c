//! Solve entry point that hides config loading and console wiring.

use loadout_config::SolverConfig;
use loadout_core::{Configuration, ConfigurationId, InventoryItem, ProcurementForest, Result};
use loadout_solver::{SolveOutcome, Solver};
use tracing::debug;

/// Config file picked up from the working directory.
pub const CONFIG_FILE: &str = "loadout.toml";

/// Runs a full solve with the configuration found in [`CONFIG_FILE`].
///
/// A missing or invalid file falls back to the default configuration. With the
/// `console` feature enabled the colored console is installed on first use.
pub fn run_solve(
    configurations: &mut [Configuration],
    forest: &mut ProcurementForest,
    solvable: &[ConfigurationId],
    inventory: &[InventoryItem],
) -> Result<SolveOutcome> {
    #[cfg(feature = "console")]
    loadout_console::init();

    let config = match SolverConfig::load(CONFIG_FILE) {
        Ok(config) => config,
        Err(err) => {
            debug!(file = CONFIG_FILE, error = %err, "using default solver config");
            SolverConfig::default()
        }
    };

    Solver::new(config).run(configurations, forest, solvable, inventory)
}
