// scmgen-codegen: reads a script command catalog, generates C++ handler
// stubs, doc blocks and registration calls, or reconciles them into an
// existing source file.

pub mod catalog;
pub mod classify;
pub mod config;
pub mod error;
pub mod filter;
pub mod generate;
pub mod naming;
pub mod reconcile;
pub mod schema;
pub mod type_map;
pub mod writer;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::catalog::Catalog;
use crate::config::GenConfig;
use crate::type_map::TypeMapper;

/// Run one generation pass. With `input` set, reconcile that file in place
/// (writing to `output`); otherwise generate a fresh stub file at `output`
/// plus a registration file next to it.
///
/// An empty selection is a user-facing condition, not an error: it is logged
/// and no file is touched.
pub fn run(
    catalog: &Catalog,
    config: &GenConfig,
    input: Option<&Path>,
    output: &Path,
) -> Result<()> {
    let selected = filter::commands_by_criteria(catalog, config);
    if selected.is_empty() {
        log::error!("No commands matched the given criteria");
        return Ok(());
    }

    let mapper = TypeMapper::new(catalog, config.vectorize_params);

    match input {
        Some(input) => {
            let source = fs::read_to_string(input)
                .with_context(|| format!("failed to read `{}`", input.display()))?;
            let updated = reconcile::update_existing(catalog, &mapper, config, &selected, &source)?;
            fs::write(output, updated)
                .with_context(|| format!("failed to write `{}`", output.display()))?;
            log::info!("Added missing docs and stubs to `{}`", input.display());
        }
        None => {
            let generated = generate::generate_new(&selected, &mapper, config);
            fs::write(output, &generated.stubs)
                .with_context(|| format!("failed to write `{}`", output.display()))?;
            let handlers = generate::handlers_path(output);
            fs::write(&handlers, &generated.registrations)
                .with_context(|| format!("failed to write `{}`", handlers.display()))?;
            log::info!(
                "Processed {} commands to `{}`",
                selected.len(),
                output.display()
            );
        }
    }

    Ok(())
}
