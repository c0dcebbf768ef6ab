// JSON schema types matching the script command definitions catalog.

#![allow(dead_code)] // Schema fields are deserialized from JSON; some reserved for future codegen use.

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Top-level file wrapper
// ---------------------------------------------------------------------------

#[derive(Deserialize, Clone)]
pub struct Definitions {
    pub meta: Meta,
    pub extensions: Vec<Extension>,
}

#[derive(Deserialize, Clone)]
pub struct Meta {
    /// Catalog version string.
    pub version: String,
    /// Epoch milliseconds of the last catalog update.
    pub last_update: i64,
    pub url: Option<String>,
}

#[derive(Deserialize, Clone)]
pub struct Extension {
    pub name: String,
    #[serde(default)]
    pub commands: Vec<Command>,
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

#[derive(Deserialize, Clone, Debug)]
pub struct Command {
    /// Command ID (opcode) in hex form, without the 0x prefix.
    pub id: String,
    /// Command enum name (e.g. `FOO_BAR`), without the `COMMAND_` prefix.
    pub name: String,
    #[serde(default)]
    pub num_params: u32,
    pub short_desc: Option<String>,
    #[serde(default)]
    pub input: Vec<Param>,
    #[serde(default)]
    pub output: Vec<Param>,
    /// Present when the command is a class member.
    #[serde(rename = "class")]
    pub class_name: Option<String>,
    pub member: Option<String>,
    /// Present when the command is an operator.
    pub operator: Option<String>,
    #[serde(default)]
    pub attrs: CommandAttrs,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Param {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: String,
}

/// Command attribute flags; absent in JSON means false.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct CommandAttrs {
    #[serde(default)]
    pub is_branch: bool,
    #[serde(default)]
    pub is_condition: bool,
    #[serde(default)]
    pub is_constructor: bool,
    #[serde(default)]
    pub is_destructor: bool,
    #[serde(default)]
    pub is_nop: bool,
    #[serde(default)]
    pub is_overload: bool,
    #[serde(default)]
    pub is_segment: bool,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_unsupported: bool,
    #[serde(default)]
    pub is_positional: bool,
}
