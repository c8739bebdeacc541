//! Graph command implementation

use anyhow::{Context, Result};
use ps_graph::{to_dot, PlanGraph};

use crate::cli::{GlobalArgs, GraphArgs};
use crate::commands::common::{load_config, load_plan};

/// Execute the graph command
pub async fn execute(args: &GraphArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let plan = load_plan(&args.file)?;

    let name = args.name.clone().unwrap_or_else(|| {
        args.file
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .filter(|stem| stem != "-")
            .unwrap_or_else(|| "plan".to_string())
    });

    let graph = PlanGraph::build(&plan);
    log::debug!(
        "Built graph '{}' with {} nodes and {} edges",
        name,
        graph.node_count(),
        graph.edge_count()
    );
    let dot = to_dot(&graph, &name, &config.graph);

    match &args.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            std::fs::write(path, dot)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => print!("{}", dot),
    }
    Ok(())
}
