// Catalog: flattened command lookups over the fetched definitions.

use std::collections::{HashMap, HashSet};

use crate::naming;
use crate::schema::{Command, Definitions, Extension};

/// Read-only command catalog for one run: the extension list from the
/// definitions file plus the bare enum type names from the enum list.
pub struct Catalog {
    pub extensions: Vec<Extension>,
    pub enums: HashSet<String>,
}

impl Catalog {
    pub fn new(definitions: Definitions, enums: HashSet<String>) -> Self {
        Catalog {
            extensions: definitions.extensions,
            enums,
        }
    }

    /// All commands across all extensions, in catalog order.
    pub fn all_commands(&self) -> impl Iterator<Item = &Command> {
        self.extensions.iter().flat_map(|ext| ext.commands.iter())
    }

    /// Command lookup by name. Names are unique across the catalog.
    pub fn commands_by_name(&self) -> HashMap<&str, &Command> {
        self.all_commands()
            .map(|cmd| (cmd.name.as_str(), cmd))
            .collect()
    }

    /// Reverse lookup from lowercased derived handler name to command,
    /// excluding no-op commands (they have no handler).
    ///
    /// Handler-name derivation is not guaranteed collision-free; a collision
    /// silently shadows the earlier command, so warn when one is detected.
    pub fn commands_by_handler(&self) -> HashMap<String, &Command> {
        let mut by_handler: HashMap<String, &Command> = HashMap::new();
        for cmd in self.all_commands() {
            if cmd.attrs.is_nop {
                continue;
            }
            let key = naming::handler_name(&cmd.name).to_lowercase();
            if let Some(previous) = by_handler.insert(key, cmd) {
                log::warn!(
                    "Handler name `{}` is derived from both `{}` and `{}` - the latter shadows the former",
                    naming::handler_name(&cmd.name),
                    previous.name,
                    cmd.name
                );
            }
        }
        by_handler
    }
}
