// Text emission: doc blocks, handler stubs, registration lines.

use crate::naming;
use crate::schema::Command;
use crate::type_map::TypeMapper;

/// Which registration macro a command gets. Unsupported takes priority over
/// no-op when a command is flagged as both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationKind {
    Regular,
    Nop,
    Unsupported,
}

pub fn registration_kind(command: &Command) -> RegistrationKind {
    if command.attrs.is_unsupported {
        RegistrationKind::Unsupported
    } else if command.attrs.is_nop {
        RegistrationKind::Nop
    } else {
        RegistrationKind::Regular
    }
}

/// Format one registration macro call. Only the regular form takes the
/// handler name; all forms carry the `COMMAND_` token so a later
/// reconciliation run re-recognizes the line.
pub fn registration_line(command: &Command) -> String {
    match registration_kind(command) {
        RegistrationKind::Regular => format!(
            "REGISTER_COMMAND_HANDLER(COMMAND_{}, {});",
            command.name,
            naming::handler_name(&command.name)
        ),
        RegistrationKind::Nop => format!("REGISTER_COMMAND_NOP(COMMAND_{});", command.name),
        RegistrationKind::Unsupported => format!(
            "REGISTER_UNSUPPORTED_COMMAND_HANDLER(COMMAND_{});",
            command.name
        ),
    }
}

/// Registration lines split into emission groups, in the fixed output order:
/// regular first, then no-op, then unsupported. Input order is preserved
/// within each group.
pub fn grouped_registration_lines(commands: &[&Command]) -> [Vec<String>; 3] {
    let mut groups: [Vec<String>; 3] = Default::default();
    for command in commands {
        let index = match registration_kind(command) {
            RegistrationKind::Regular => 0,
            RegistrationKind::Nop => 1,
            RegistrationKind::Unsupported => 2,
        };
        groups[index].push(registration_line(command));
    }
    groups
}

/// Accumulates generated source text for one output file.
pub struct CodeWriter<'a> {
    buf: String,
    commented_out: bool,
    mapper: &'a TypeMapper,
}

impl<'a> CodeWriter<'a> {
    pub fn new(mapper: &'a TypeMapper, commented_out: bool) -> Self {
        CodeWriter {
            buf: String::new(),
            commented_out,
            mapper,
        }
    }

    /// One line of code: 4-space indent units, `//` prefix in commented-out
    /// mode. Doc blocks do not go through here and are never commented out.
    pub fn code_line(&mut self, line: &str, indent_level: usize) {
        for _ in 0..indent_level {
            self.buf.push_str("    ");
        }
        if self.commented_out {
            self.buf.push_str("//");
        }
        self.buf.push_str(line);
        self.buf.push('\n');
    }

    /// Copy a pre-existing source line through verbatim.
    pub fn raw_line(&mut self, line: &str) {
        self.buf.push_str(line);
        self.buf.push('\n');
    }

    pub fn blank_line(&mut self) {
        self.buf.push('\n');
    }

    /// Doxygen-like doc block for a command: opcode, command name,
    /// class/member info, static marker, brief description and
    /// parameter/return information.
    pub fn docs(&mut self, command: &Command) {
        self.buf.push_str("/*\n");
        self.doc_line(&format!("@opcode {}", command.id));
        self.doc_line(&format!("@command {}", command.name));

        if let Some(class) = &command.class_name {
            self.doc_line(&format!("@class {class}"));
            if let Some(member) = &command.member {
                self.doc_line(&format!("@method {member}"));
            }
        }

        if command.attrs.is_static {
            self.doc_line("@static");
        }

        if let Some(desc) = &command.short_desc {
            self.doc_separator();
            self.doc_line(&format!("@brief {desc}"));
        }

        let input_params = self.mapper.transform_inputs(command, false);
        if !input_params.is_empty() {
            self.doc_separator();
            for param in &input_params {
                self.doc_line(&format!("@param {{{}}} {}", param.param_type, param.name));
            }
        }

        let output_params = self.mapper.transform_outputs(&command.output, false);
        if !output_params.is_empty() {
            self.doc_separator();
            let returns = output_params
                .iter()
                .map(|param| format!("{{{}}} {}", param.param_type, param.name))
                .collect::<Vec<_>>()
                .join(", ");
            self.doc_line(&format!("@returns {returns}"));
        }

        self.buf.push_str(" */\n");
    }

    /// Handler function stub: one-line signature, a "not implemented" body,
    /// closing brace.
    pub fn handler_stub(&mut self, command: &Command) {
        let params = self
            .mapper
            .transform_inputs(command, true)
            .iter()
            .map(|param| format!("{} {}", param.param_type, param.name))
            .collect::<Vec<_>>()
            .join(", ");
        let signature = format!(
            "{} {}({}) {{",
            naming::handler_return_type(command),
            naming::handler_name(&command.name),
            params
        );
        self.code_line(&signature, 0);
        self.code_line("NOTSA_UNREACHABLE(\"Not implemented\");", 1);
        self.code_line("}", 0);
    }

    pub fn into_string(self) -> String {
        self.buf
    }

    fn doc_line(&mut self, text: &str) {
        self.buf.push_str(" * ");
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    fn doc_separator(&mut self) {
        self.buf.push_str(" * \n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use crate::catalog::Catalog;
    use crate::schema::{CommandAttrs, Extension, Param};

    fn param(name: &str, param_type: &str) -> Param {
        Param {
            name: name.into(),
            param_type: param_type.into(),
        }
    }

    fn command(name: &str) -> Command {
        Command {
            id: "0000".into(),
            name: name.into(),
            num_params: 0,
            short_desc: None,
            input: vec![],
            output: vec![],
            class_name: None,
            member: None,
            operator: None,
            attrs: CommandAttrs::default(),
        }
    }

    fn catalog(commands: Vec<Command>) -> Catalog {
        Catalog {
            extensions: vec![Extension {
                name: "default".into(),
                commands,
            }],
            enums: HashSet::new(),
        }
    }

    #[test]
    fn test_doc_block_shape() {
        let mut cmd = command("GET_CHAR_COORDINATES");
        cmd.id = "00AA".into();
        cmd.class_name = Some("Char".into());
        cmd.member = Some("GetCoordinates".into());
        cmd.short_desc = Some("Returns the character's coordinates".into());
        cmd.attrs.is_static = true;
        cmd.input = vec![param("handle", "Char")];
        cmd.output = vec![
            param("x", "float"),
            param("y", "float"),
            param("z", "float"),
        ];

        let cat = catalog(vec![cmd.clone()]);
        let mapper = TypeMapper::new(&cat, true);
        let mut w = CodeWriter::new(&mapper, false);
        w.docs(&cmd);

        let expected = "/*\n\
                        \x20* @opcode 00AA\n\
                        \x20* @command GET_CHAR_COORDINATES\n\
                        \x20* @class Char\n\
                        \x20* @method GetCoordinates\n\
                        \x20* @static\n\
                        \x20* \n\
                        \x20* @brief Returns the character's coordinates\n\
                        \x20* \n\
                        \x20* @param {Char} char_\n\
                        \x20* \n\
                        \x20* @returns {Vector} \n\
                        \x20*/\n";
        assert_eq!(w.into_string(), expected);
    }

    #[test]
    fn test_handler_stub() {
        let mut cmd = command("SET_TIME_OF_DAY");
        cmd.input = vec![param("hours", "int"), param("minutes", "int")];

        let cat = catalog(vec![cmd.clone()]);
        let mapper = TypeMapper::new(&cat, true);
        let mut w = CodeWriter::new(&mapper, false);
        w.handler_stub(&cmd);

        assert_eq!(
            w.into_string(),
            "void SetTimeOfDay(int32 hours, int32 minutes) {\n    NOTSA_UNREACHABLE(\"Not implemented\");\n}\n"
        );
    }

    #[test]
    fn test_commented_out_mode() {
        let cmd = command("WAIT");
        let cat = catalog(vec![cmd.clone()]);
        let mapper = TypeMapper::new(&cat, true);
        let mut w = CodeWriter::new(&mapper, true);
        w.code_line(&registration_line(&cmd), 1);
        assert_eq!(
            w.into_string(),
            "    //REGISTER_COMMAND_HANDLER(COMMAND_WAIT, Wait);\n"
        );
    }

    #[test]
    fn test_registration_line_forms() {
        let regular = command("WAIT");
        assert_eq!(
            registration_line(&regular),
            "REGISTER_COMMAND_HANDLER(COMMAND_WAIT, Wait);"
        );

        let mut nop = command("SET_DEBUG");
        nop.attrs.is_nop = true;
        assert_eq!(
            registration_line(&nop),
            "REGISTER_COMMAND_NOP(COMMAND_SET_DEBUG);"
        );

        let mut unsupported = command("OLD_ONE");
        unsupported.attrs.is_unsupported = true;
        assert_eq!(
            registration_line(&unsupported),
            "REGISTER_UNSUPPORTED_COMMAND_HANDLER(COMMAND_OLD_ONE);"
        );

        // Unsupported wins over no-op when both are set.
        let mut both = command("BOTH");
        both.attrs.is_nop = true;
        both.attrs.is_unsupported = true;
        assert_eq!(registration_kind(&both), RegistrationKind::Unsupported);
    }

    #[test]
    fn test_grouped_registration_lines() {
        let regular = command("WAIT");
        let mut nop = command("SET_DEBUG");
        nop.attrs.is_nop = true;
        let mut unsupported = command("OLD_ONE");
        unsupported.attrs.is_unsupported = true;

        let groups = grouped_registration_lines(&[&unsupported, &nop, &regular]);
        assert_eq!(groups[0], vec!["REGISTER_COMMAND_HANDLER(COMMAND_WAIT, Wait);"]);
        assert_eq!(groups[1], vec!["REGISTER_COMMAND_NOP(COMMAND_SET_DEBUG);"]);
        assert_eq!(
            groups[2],
            vec!["REGISTER_UNSUPPORTED_COMMAND_HANDLER(COMMAND_OLD_ONE);"]
        );
    }
}
