// Criteria filter: select catalog commands by extension/name/class patterns.

use crate::catalog::Catalog;
use crate::config::GenConfig;
use crate::schema::Command;

/// Select the commands matching the configured criteria, preserving catalog
/// order, flattened across extensions.
///
/// A command without a class field never matches a non-empty class pattern.
pub fn commands_by_criteria<'a>(catalog: &'a Catalog, config: &GenConfig) -> Vec<&'a Command> {
    catalog
        .extensions
        .iter()
        .filter(|ext| {
            config
                .extension_pattern
                .as_ref()
                .is_none_or(|re| re.is_match(&ext.name))
        })
        .flat_map(|ext| ext.commands.iter())
        .filter(|cmd| config.name_pattern.is_match(&cmd.name))
        .filter(|cmd| match &config.class_pattern {
            None => true,
            Some(re) => cmd
                .class_name
                .as_deref()
                .is_some_and(|class| re.is_match(class)),
        })
        .collect()
}
