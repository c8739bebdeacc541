//! Dataset command implementation
//!
//! Parses and renders every record of a split on a pool of blocking
//! workers. Each plan gets its own environment, so records never share
//! state; results are written back in input order.

use anyhow::{Context, Result};
use ps_core::{load_split, DatasetRecord, Split};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::cli::{DatasetArgs, GlobalArgs};
use crate::commands::common::{load_config, project_root, worker_count, ExitCode};

/// One rendered dataset record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct RenderedRecord {
    pub db_id: String,
    pub query: String,
    pub question: String,
    pub plan: String,
}

/// A record that could not be parsed or rendered
#[derive(Debug, Clone)]
pub(crate) struct RecordFailure {
    pub index: usize,
    pub db_id: String,
    pub message: String,
}

/// Per-split result, rendered records in input order
#[derive(Debug, Default)]
pub(crate) struct SplitSummary {
    pub rendered: Vec<RenderedRecord>,
    pub failures: Vec<RecordFailure>,
    pub skipped: usize,
}

enum Outcome {
    Rendered(RenderedRecord),
    Failed(RecordFailure),
    Skipped,
}

/// Execute the dataset command
pub async fn execute(args: &DatasetArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let root = project_root(global);
    let dataset_dir = config.dataset_dir_absolute(&root);
    let output_dir = config.output_dir_absolute(&root);
    let workers = worker_count(args.workers.unwrap_or(config.workers));

    // All selected splits render before any file is written; a --fail-fast
    // stop leaves no output behind.
    let mut summaries = Vec::new();
    for split in args.split.splits() {
        let records = load_split(&dataset_dir, split)
            .with_context(|| format!("Failed to load {} split", split))?;
        println!(
            "Rendering {} {} plans [{} workers]",
            records.len(),
            split,
            workers
        );

        let summary = render_split(records, workers, args.fail_fast).await?;
        for failure in &summary.failures {
            log::warn!(
                "{} record {} ({}): {}",
                split,
                failure.index,
                failure.db_id,
                failure.message
            );
        }

        if args.fail_fast {
            if let Some(first) = summary.failures.first() {
                println!("  ✗ record {} ({}) - {}", first.index, first.db_id, first.message);
                println!("\n  Stopping due to --fail-fast");
                return Err(ExitCode(1).into());
            }
        }
        summaries.push((split, summary));
    }

    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let mut total_failures = 0;
    for (split, summary) in &summaries {
        let path = output_dir.join(output_file_name(*split));
        write_rendered(&path, &summary.rendered)?;
        println!(
            "  ✓ {}: {} rendered, {} failed -> {}",
            split,
            summary.rendered.len(),
            summary.failures.len(),
            path.display()
        );
        print_failure_breakdown(&summary.failures);
        total_failures += summary.failures.len();
    }

    if total_failures > 0 {
        println!(
            "\n{} plans could not be rendered (run with --verbose or RUST_LOG=warn for details)",
            total_failures
        );
    }
    Ok(())
}

/// Render all records of a split with at most `workers` plans in flight
pub(crate) async fn render_split(
    records: Vec<DatasetRecord>,
    workers: usize,
    fail_fast: bool,
) -> Result<SplitSummary> {
    let semaphore = Arc::new(Semaphore::new(workers.max(1)));
    let stopped = Arc::new(AtomicBool::new(false));
    let total = records.len();
    let mut tasks = JoinSet::new();

    for (index, record) in records.into_iter().enumerate() {
        if stopped.load(Ordering::SeqCst) {
            break;
        }
        let permit = Arc::clone(&semaphore).acquire_owned().await?;
        let stopped = Arc::clone(&stopped);

        tasks.spawn_blocking(move || {
            let _permit = permit;
            if stopped.load(Ordering::SeqCst) {
                return (index, Outcome::Skipped);
            }
            let db_id = record.db_id.clone();
            match render_record(record) {
                Ok(rendered) => (index, Outcome::Rendered(rendered)),
                Err(err) => {
                    if fail_fast {
                        stopped.store(true, Ordering::SeqCst);
                    }
                    let failure = RecordFailure {
                        index,
                        db_id,
                        message: format!("{:#}", err),
                    };
                    (index, Outcome::Failed(failure))
                }
            }
        });
    }

    let mut outcomes = Vec::with_capacity(total);
    while let Some(joined) = tasks.join_next().await {
        outcomes.push(joined.context("Render worker panicked")?);
    }
    outcomes.sort_by_key(|(index, _)| *index);

    let mut summary = SplitSummary::default();
    for (_, outcome) in outcomes {
        match outcome {
            Outcome::Rendered(rendered) => summary.rendered.push(rendered),
            Outcome::Failed(failure) => summary.failures.push(failure),
            Outcome::Skipped => {}
        }
    }
    summary.skipped = total - summary.rendered.len() - summary.failures.len();
    Ok(summary)
}

/// Parse and render one record with a fresh environment
pub(crate) fn render_record(record: DatasetRecord) -> Result<RenderedRecord> {
    let plan = ps_parser::parse_plan_str(&record.ep).context("Failed to parse plan")?;
    let plan_text = ps_text::plan_to_text(&plan).context("Failed to render plan")?;
    Ok(RenderedRecord {
        db_id: record.db_id,
        query: record.query,
        question: record.question,
        plan: plan_text,
    })
}

fn write_rendered(path: &Path, rendered: &[RenderedRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(rendered)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

/// Error code of a failure message (`[P006]`), or `other`
pub(crate) fn failure_code(message: &str) -> &str {
    message
        .find('[')
        .and_then(|start| {
            let rest = &message[start + 1..];
            rest.find(']').map(|end| &rest[..end])
        })
        .unwrap_or("other")
}

fn print_failure_breakdown(failures: &[RecordFailure]) {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for failure in failures {
        *counts.entry(failure_code(&failure.message)).or_default() += 1;
    }
    for (code, count) in counts {
        println!("    {:>6}  {}", count, code);
    }
}

/// Name of the rendered split file
pub(crate) fn output_file_name(split: Split) -> String {
    format!("{}_plans.json", split)
}

#[cfg(test)]
#[path = "dataset_test.rs"]
mod tests;
