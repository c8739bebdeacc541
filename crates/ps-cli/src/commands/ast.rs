//! Ast command implementation

use anyhow::Result;

use crate::cli::{AstArgs, GlobalArgs};
use crate::commands::common::load_plan;

/// Execute the ast command
pub async fn execute(args: &AstArgs, _global: &GlobalArgs) -> Result<()> {
    let plan = load_plan(&args.file)?;
    let json = if args.compact {
        serde_json::to_string(&plan)?
    } else {
        serde_json::to_string_pretty(&plan)?
    };
    println!("{}", json);
    Ok(())
}
