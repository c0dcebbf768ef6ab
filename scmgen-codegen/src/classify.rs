// Line classification: recover registration/doc/handler state from C++ source.
//
// Matching is deliberately line-local and permissive; this is not a C++
// parser. Each classifier only recognizes the narrow source shapes the
// generator itself emits.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Registration macro call found on a line, active or commented out.
#[derive(Debug, Clone)]
pub struct RegistrationMatch {
    /// Command name without the `COMMAND_` prefix.
    pub command_name: String,
    /// Handler name, for macro forms that take one.
    pub handler: Option<String>,
    pub macro_name: String,
    pub commented_out: bool,
}

/// Classification of one trimmed source line, first-match-wins:
/// legacy doc comment, then handler function signature.
#[derive(Debug, Clone)]
pub enum LineMatch {
    /// Old-style single-line doc comment naming a registered command.
    LegacyDoc {
        command_name: String,
        description: Option<String>,
    },
    /// Definition line of a known handler function.
    HandlerSignature { handler_name: String },
    Plain,
}

static REGISTRATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(?P<comment>//)?\s*(?P<macro>REGISTER_COMMAND_HANDLER|REGISTER_UNSUPPORTED_COMMAND_HANDLER|REGISTER_COMMAND_NOP|REGISTER_COMMAND_UNIMPLEMENTED)\s*\(\s*COMMAND_(?P<command_name>[A-Za-z0-9_]+)\s*(?:,\s*(?P<handler>[A-Za-z0-9_]+))?\s*\)\s*;",
    )
    .expect("registration regex")
});

static DOC_ANNOTATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@command\s+(?P<command>[A-Za-z0-9_]+)").expect("doc annotation regex")
});

/// Match a registration macro call, optionally commented out.
pub fn match_registration(line: &str) -> Option<RegistrationMatch> {
    let caps = REGISTRATION_RE.captures(line)?;
    Some(RegistrationMatch {
        command_name: caps["command_name"].to_string(),
        handler: caps.name("handler").map(|m| m.as_str().to_string()),
        macro_name: caps["macro"].to_string(),
        commented_out: caps.name("comment").is_some(),
    })
}

/// Find a new-style `@command NAME` doc annotation anywhere in a line.
pub fn doc_annotation(line: &str) -> Option<&str> {
    DOC_ANNOTATION_RE
        .captures(line)
        .and_then(|caps| caps.name("command"))
        .map(|m| m.as_str())
}

/// Per-run classifier for legacy doc comments and handler signatures.
/// The patterns are built from the names seen in the file and catalog, so an
/// empty name set disables the corresponding pattern instead of producing an
/// empty (match-anything) alternation.
pub struct LineClassifier {
    legacy_doc_re: Option<Regex>,
    handler_fn_re: Option<Regex>,
}

impl LineClassifier {
    pub fn new(registered_commands: &HashSet<String>, handler_names: &HashSet<String>) -> Self {
        // Names come out of [A-Za-z0-9_]+ captures and handler-name
        // derivation, so they are safe to splice into a pattern unescaped.
        let legacy_doc_re = alternation(registered_commands).map(|alt| {
            Regex::new(&format!(
                r"^//+\s*(?:COMMAND_)?(?P<command_name>{alt})(?:\s*-\s*(?P<description>.*))?$"
            ))
            .expect("legacy doc regex")
        });
        let handler_fn_re = alternation(handler_names).map(|alt| {
            Regex::new(&format!(
                r"(?i)^(?P<return_type>[A-Za-z0-9_:]+)\s+(?P<handler_name>{alt})\s*\((?P<params>[^)]*)\)\s*\{{"
            ))
            .expect("handler signature regex")
        });
        LineClassifier {
            legacy_doc_re,
            handler_fn_re,
        }
    }

    /// Classify one trimmed line.
    pub fn classify(&self, line: &str) -> LineMatch {
        if let Some(re) = &self.legacy_doc_re {
            if let Some(caps) = re.captures(line) {
                return LineMatch::LegacyDoc {
                    command_name: caps["command_name"].to_string(),
                    description: caps.name("description").map(|m| m.as_str().to_string()),
                };
            }
        }
        if let Some(re) = &self.handler_fn_re {
            if let Some(caps) = re.captures(line) {
                return LineMatch::HandlerSignature {
                    handler_name: caps["handler_name"].to_string(),
                };
            }
        }
        LineMatch::Plain
    }
}

fn alternation(names: &HashSet<String>) -> Option<String> {
    if names.is_empty() {
        return None;
    }
    let mut sorted: Vec<&str> = names.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    Some(sorted.join("|"))
}
