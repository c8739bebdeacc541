//! Text command implementation

use anyhow::{Context, Result};

use crate::cli::{GlobalArgs, TextArgs, TextOutput};
use crate::commands::common::load_plan;

/// Execute the text command
pub async fn execute(args: &TextArgs, _global: &GlobalArgs) -> Result<()> {
    let plan = load_plan(&args.file)?;
    let instructions = ps_text::plan_to_instructions(&plan)
        .with_context(|| format!("Failed to render plan in {}", args.file.display()))?;

    match args.output {
        TextOutput::Text => {
            for (i, instruction) in instructions.iter().enumerate() {
                println!("{}. {}", i + 1, instruction);
            }
        }
        TextOutput::Json => {
            println!("{}", serde_json::to_string_pretty(&instructions)?);
        }
    }
    Ok(())
}
