// Run configuration, built by the CLI from its argument surface.

use regex::Regex;

/// Options controlling one generation or reconciliation run.
#[derive(Debug)]
pub struct GenConfig {
    /// Pattern a command name must match (unanchored search).
    pub name_pattern: Regex,
    /// When set, a command matches only if it has a class field matching this.
    pub class_pattern: Option<Regex>,
    /// When set, only commands from extensions whose name matches are selected.
    pub extension_pattern: Option<Regex>,
    /// Emit `REGISTER_` calls for missing/selected commands.
    pub generate_register_calls: bool,
    /// Prefix generated code lines with `//`.
    pub commented_out: bool,
    /// Fold x/y(/z) parameter runs into vector types.
    pub vectorize_params: bool,
}
