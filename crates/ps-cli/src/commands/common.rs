//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use ps_core::{Config, ExecutionPlan};
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::cli::GlobalArgs;

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that RAII destructors run and cleanup happens properly.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Control flow only; never shown to the user.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Project directory from the global arguments
pub(crate) fn project_root(global: &GlobalArgs) -> PathBuf {
    PathBuf::from(&global.project_dir)
}

/// Load the config named by `--config`, or discover one in the project directory.
pub(crate) fn load_config(global: &GlobalArgs) -> Result<Config> {
    match &global.config {
        Some(path) => Config::load(Path::new(path))
            .with_context(|| format!("Failed to load config from {}", path)),
        None => {
            let root = project_root(global);
            Config::discover(&root)
                .with_context(|| format!("Failed to load config in {}", root.display()))
        }
    }
}

/// Read showplan XML from a file, or from stdin when the path is `-`.
pub(crate) fn read_source(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut xml = String::new();
        std::io::stdin()
            .read_to_string(&mut xml)
            .context("Failed to read plan from stdin")?;
        return Ok(xml);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Read and parse one plan file
pub(crate) fn load_plan(path: &Path) -> Result<ExecutionPlan> {
    let xml = read_source(path)?;
    let plan = ps_parser::parse_plan_str(&xml)
        .with_context(|| format!("Failed to parse plan in {}", path.display()))?;
    log::debug!(
        "Parsed {} ({} operators)",
        path.display(),
        plan.node_count()
    );
    Ok(plan)
}

/// Resolve a worker count where 0 means one per available CPU.
pub(crate) fn worker_count(requested: usize) -> usize {
    if requested > 0 {
        return requested;
    }
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
