//! Search command implementation

use anyhow::{Context, Result};
use ps_core::{load_split, DatasetRecord, OperatorKind};

use crate::cli::{GlobalArgs, SearchArgs};
use crate::commands::common::{load_config, project_root};

/// Operator counts for one split
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct SearchCounts {
    /// Occurrences of the operator across all plans
    pub occurrences: usize,
    /// Plans containing the operator at least once
    pub plans: usize,
    /// Plans that parsed
    pub parsed: usize,
    /// Plans that failed to parse
    pub unparsable: usize,
}

/// Execute the search command
pub async fn execute(args: &SearchArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let dataset_dir = config.dataset_dir_absolute(&project_root(global));

    for split in args.split.splits() {
        let records = load_split(&dataset_dir, split)
            .with_context(|| format!("Failed to load {} split", split))?;
        let counts = count_operator(&records, args.operator);

        println!(
            "{}: {} {} operators in {} of {} plans",
            split, counts.occurrences, args.operator, counts.plans, counts.parsed
        );
        if counts.unparsable > 0 {
            println!("  ({} plans skipped: failed to parse)", counts.unparsable);
        }
    }
    Ok(())
}

/// Count operators of `kind` across the plans of `records`
pub(crate) fn count_operator(records: &[DatasetRecord], kind: OperatorKind) -> SearchCounts {
    let mut counts = SearchCounts::default();
    for record in records {
        match ps_parser::parse_plan_str(&record.ep) {
            Ok(plan) => {
                counts.parsed += 1;
                let found = plan.find(kind).len();
                counts.occurrences += found;
                if found > 0 {
                    counts.plans += 1;
                }
            }
            Err(err) => {
                log::debug!("Skipping plan for '{}': {}", record.question, err);
                counts.unparsable += 1;
            }
        }
    }
    counts
}

#[cfg(test)]
#[path = "search_test.rs"]
mod tests;
