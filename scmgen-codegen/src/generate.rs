// Fresh-file mode: emit stubs and registration calls for the selection.

use std::path::{Path, PathBuf};

use crate::config::GenConfig;
use crate::schema::Command;
use crate::type_map::TypeMapper;
use crate::writer::{self, CodeWriter};

/// The two generated files: handler stubs and registration calls.
pub struct GeneratedOutput {
    pub stubs: String,
    pub registrations: String,
}

/// Generate stub and registration text for the selected commands, in catalog
/// order. No-op commands get no stub (there is no meaningful body for them)
/// but still get a registration line.
pub fn generate_new(
    selected: &[&Command],
    mapper: &TypeMapper,
    config: &GenConfig,
) -> GeneratedOutput {
    let mut stubs = CodeWriter::new(mapper, config.commented_out);
    for cmd in selected {
        if cmd.attrs.is_nop {
            log::warn!(
                "No stub will be generated for command {} (opcode {}) since it is marked as a no-op",
                cmd.name,
                cmd.id
            );
            continue;
        }
        stubs.docs(cmd);
        stubs.handler_stub(cmd);
        stubs.blank_line();
    }

    let mut registrations = CodeWriter::new(mapper, config.commented_out);
    if config.generate_register_calls {
        let groups = writer::grouped_registration_lines(selected);
        for line in groups.iter().flatten() {
            registrations.code_line(line, 1);
            registrations.blank_line();
        }
    }

    GeneratedOutput {
        stubs: stubs.into_string(),
        registrations: registrations.into_string(),
    }
}

/// Path of the registration file: the stub output path with `.handlers`
/// inserted before the extension (`output.cpp` -> `output.handlers.cpp`).
pub fn handlers_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let name = match output.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}.handlers.{ext}"),
        None => format!("{stem}.handlers"),
    };
    output.with_file_name(name)
}
