// Reconciliation engine: patch missing docs, stubs and registration calls
// into an existing source file without disturbing present content.

use std::collections::{HashMap, HashSet};

use crate::catalog::Catalog;
use crate::classify::{self, LineClassifier, LineMatch, RegistrationMatch};
use crate::config::GenConfig;
use crate::error::GenError;
use crate::naming;
use crate::schema::Command;
use crate::type_map::TypeMapper;
use crate::writer::{self, CodeWriter};

/// Substring locating the registration function definition line.
pub const REGISTER_FUNCTION_MARKER: &str = "RegisterHandlers()";
/// Substring locating the start of the registration call block.
pub const REGISTER_BLOCK_BEGIN_MARKER: &str = "REGISTER_COMMAND_HANDLER_BEGIN";

/// Rewrite `source`, adding whatever the selected commands are still missing:
/// doc blocks for existing handlers, stubs for absent ones, registration
/// calls for unregistered ones. The whole result is built in memory; on error
/// nothing has been emitted.
pub fn update_existing(
    catalog: &Catalog,
    mapper: &TypeMapper,
    config: &GenConfig,
    selected: &[&Command],
    source: &str,
) -> Result<String, GenError> {
    let lines: Vec<&str> = source.lines().collect();

    // Both structural markers must exist before anything else happens.
    let register_fn_idx = lines
        .iter()
        .position(|line| line.contains(REGISTER_FUNCTION_MARKER))
        .ok_or(GenError::MarkerNotFound(REGISTER_FUNCTION_MARKER))?;
    let block_begin_idx = lines
        .iter()
        .position(|line| line.contains(REGISTER_BLOCK_BEGIN_MARKER))
        .ok_or(GenError::MarkerNotFound(REGISTER_BLOCK_BEGIN_MARKER))?;
    // The begin marker lives inside the registration function; an inverted
    // order would duplicate the lines between the two markers on rewrite.
    if block_begin_idx < register_fn_idx {
        return Err(GenError::MarkerOutOfOrder(
            REGISTER_BLOCK_BEGIN_MARKER,
            REGISTER_FUNCTION_MARKER,
        ));
    }

    // Every registration call already present, active or commented out, over
    // the whole file - a command registered below the insertion point must
    // not be registered again.
    let mut registered: HashMap<String, RegistrationMatch> = HashMap::new();
    for line in &lines {
        if let Some(m) = classify::match_registration(line) {
            log::debug!(
                "found existing `{}` call for `{}`{}",
                m.macro_name,
                m.command_name,
                if m.commented_out { " (commented out)" } else { "" }
            );
            registered.insert(m.command_name.clone(), m);
        }
    }

    let commands_by_name = catalog.commands_by_name();
    let commands_by_handler = catalog.commands_by_handler();

    // Selected commands with no registration call yet, in selection order.
    let missing: Vec<&Command> = selected
        .iter()
        .copied()
        .filter(|cmd| !registered.contains_key(&cmd.name))
        .collect();

    // Handler names worth recognizing in function signatures: those named by
    // existing registration calls plus those derived for the selection.
    let registered_names: HashSet<String> = registered.keys().cloned().collect();
    let mut handler_names: HashSet<String> = registered
        .values()
        .filter_map(|m| m.handler.clone())
        .collect();
    for cmd in selected {
        if !cmd.attrs.is_nop {
            handler_names.insert(naming::handler_name(&cmd.name));
        }
    }

    let classifier = LineClassifier::new(&registered_names, &handler_names);

    let mut docs_seen: HashSet<String> = HashSet::new();
    let mut handlers_found: HashSet<String> = HashSet::new();
    let mut w = CodeWriter::new(mapper, config.commented_out);

    // Pass over everything above the registration function: convert legacy
    // doc comments, insert docs above known handlers, copy the rest through.
    for line in &lines[..register_fn_idx] {
        let trimmed = line.trim();

        // New-style annotations count as docs no matter what else the line is.
        if let Some(name) = classify::doc_annotation(trimmed) {
            docs_seen.insert(name.to_string());
        }

        match classifier.classify(trimmed) {
            LineMatch::LegacyDoc { command_name, description } => {
                match commands_by_name.get(command_name.as_str()) {
                    Some(cmd) => {
                        handlers_found.insert(cmd.name.clone());
                        if !docs_seen.contains(&cmd.name) {
                            if let Some(desc) = &description {
                                log::debug!(
                                    "Dropping legacy doc text `{desc}` of `{command_name}` in favor of the generated block"
                                );
                            }
                            w.docs(cmd);
                            docs_seen.insert(cmd.name.clone());
                            // The legacy comment is replaced by the doc block.
                            continue;
                        }
                    }
                    None => log::warn!(
                        "Command `{command_name}` found in docs comment but not in definitions, skipping doc generation for it"
                    ),
                }
            }
            LineMatch::HandlerSignature { handler_name } => {
                match commands_by_handler.get(&handler_name.to_lowercase()) {
                    Some(cmd) => {
                        handlers_found.insert(cmd.name.clone());
                        if !docs_seen.contains(&cmd.name) {
                            w.docs(cmd);
                            docs_seen.insert(cmd.name.clone());
                        }
                    }
                    None => log::warn!(
                        "Handler `{handler_name}` found, but has no corresponding register handler call - skipping docs generation"
                    ),
                }
            }
            LineMatch::Plain => {}
        }

        w.raw_line(line);
    }

    log::info!("Added missing docs to {} handlers", docs_seen.len());

    // Stubs for commands that are truly absent, not merely unregistered.
    for cmd in &missing {
        if handlers_found.contains(&cmd.name) {
            continue;
        }
        w.docs(cmd);
        w.handler_stub(cmd);
        w.blank_line();
    }

    // The registration function itself, up to and including the begin marker.
    for line in &lines[register_fn_idx..=block_begin_idx] {
        w.raw_line(line);
    }

    // Missing registration calls, grouped regular / no-op / unsupported.
    if config.generate_register_calls && !missing.is_empty() {
        let mut groups = writer::grouped_registration_lines(&missing);
        for group in groups.iter_mut() {
            if group.is_empty() {
                continue;
            }
            group.sort_unstable();
            w.blank_line();
            for line in group.iter() {
                w.code_line(line, 1);
            }
        }
        log::info!("Added missing handlers for {} commands", missing.len());
    }

    // Rest of the file, verbatim.
    for line in &lines[block_begin_idx + 1..] {
        w.raw_line(line);
    }

    Ok(w.into_string())
}
