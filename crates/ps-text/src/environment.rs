//! Rendering environment: instruction list and placeholder symbol table

use ps_core::ColumnReference;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

static PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();

/// Whether `name` is an optimizer-generated placeholder such as `Expr1001`
/// or `Union1004`
pub fn is_placeholder(name: &str) -> bool {
    PLACEHOLDER_RE
        .get_or_init(|| Regex::new(r"^(Expr|Union)\d+$").expect("valid regex"))
        .is_match(name)
}

/// Mutable state of one rendering pass.
///
/// Holds the instructions emitted so far (their count is the step counter)
/// and the text each placeholder stands for. Create one per plan.
#[derive(Debug, Default)]
pub struct Environment {
    symbols: HashMap<String, String>,
    instructions: Vec<String>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an instruction and return its step number (1-based)
    pub fn emit(&mut self, instruction: String) -> usize {
        self.instructions.push(instruction);
        self.step_count()
    }

    /// Number of instructions emitted so far
    pub fn step_count(&self) -> usize {
        self.instructions.len()
    }

    pub fn into_instructions(self) -> Vec<String> {
        self.instructions
    }

    /// Append `, returning <columns>` to the last instruction, before its
    /// final period.
    pub fn append_returning(&mut self, columns: &[String]) {
        let Some(last) = self.instructions.last_mut() else {
            return;
        };
        if last.ends_with('.') {
            last.pop();
        }
        last.push_str(", returning ");
        last.push_str(&columns.join(", "));
        last.push('.');
    }

    /// Record the text a placeholder stands for
    pub fn register(&mut self, name: impl Into<String>, text: impl Into<String>) {
        let name = name.into();
        let text = text.into();
        log::debug!("Registered {name} = {text}");
        self.symbols.insert(name, text);
    }

    /// Raw lookup without chain resolution
    pub fn get(&self, name: &str) -> Option<&str> {
        self.symbols.get(name).map(String::as_str)
    }

    /// Resolve a name through the symbol table.
    ///
    /// Substitution repeats while the current value is a registered
    /// placeholder; anything else is returned unchanged.
    pub fn resolve(&self, name: &str) -> String {
        let mut current = name;
        let mut seen = HashSet::new();
        while is_placeholder(current) {
            let Some(next) = self.get(current) else {
                break;
            };
            if !seen.insert(current) {
                log::warn!("Placeholder cycle through {current}; leaving it unresolved");
                break;
            }
            current = next;
        }
        current.to_string()
    }

    /// Display name of a column: its resolved name, without table
    pub fn column_name(&self, column: &ColumnReference) -> String {
        self.resolve(&column.column)
    }
}

#[cfg(test)]
#[path = "environment_test.rs"]
mod tests;
