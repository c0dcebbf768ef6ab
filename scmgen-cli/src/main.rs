// scmgen: generate C++ function stubs for script commands, or patch missing
// docs/stubs/registrations into an existing source file.

mod fetch;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use regex::Regex;

use scmgen_codegen::catalog::Catalog;
use scmgen_codegen::config::GenConfig;

#[derive(Parser, Debug)]
#[command(name = "scmgen", about = "Generate function stubs for script commands")]
struct Cli {
    /// Link containing script command definitions in JSON format.
    #[arg(
        long,
        short = 'd',
        default_value = "https://library.sannybuilder.com/assets/sa/sa.json"
    )]
    definitions: String,

    /// Link containing enum definitions.
    #[arg(
        long,
        default_value = "https://library.sannybuilder.com/assets/sa/enums.txt"
    )]
    enum_definitions: String,

    /// Add missing docs and stubs to an existing file instead of generating a new one.
    #[arg(long, short = 'i')]
    input: Option<PathBuf>,

    /// Output file for the generated stubs, or the file to update with missing docs and stubs.
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Regex pattern to match script commands.
    #[arg(long, short = 'n', default_value = ".")]
    name: String,

    /// Regex pattern to match class names.
    #[arg(long, short = 'k')]
    klass: Option<String>,

    /// Regex pattern to match extension names (from the definitions file).
    #[arg(long, short = 'e', default_value = "default")]
    extension: String,

    /// Generate `REGISTER_` calls for the commands.
    #[arg(long)]
    generate_register_calls: bool,

    /// Comment out the generated code.
    #[arg(long)]
    commented_out: bool,

    /// Transform groups of x, y, (z) parameters into vector types
    /// (CVector2D/CVector in handlers, Vector2D/Vector in docs).
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    vectorize_params: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let definitions = fetch::fetch_definitions(&cli.definitions)?;
    let enums = fetch::fetch_enum_names(&cli.enum_definitions)?;
    let catalog = Catalog::new(definitions, enums);

    let config = GenConfig {
        name_pattern: Regex::new(&cli.name).context("invalid --name pattern")?,
        class_pattern: cli
            .klass
            .as_deref()
            .map(Regex::new)
            .transpose()
            .context("invalid --klass pattern")?,
        extension_pattern: if cli.extension.is_empty() {
            None
        } else {
            Some(Regex::new(&cli.extension).context("invalid --extension pattern")?)
        },
        generate_register_calls: cli.generate_register_calls,
        commented_out: cli.commented_out,
        vectorize_params: cli.vectorize_params,
    };

    let output = match cli.output {
        Some(output) => output,
        None => {
            let fallback = cli
                .input
                .clone()
                .unwrap_or_else(|| PathBuf::from("output.cpp"));
            log::warn!("No output file specified, using `{}`", fallback.display());
            fallback
        }
    };

    scmgen_codegen::run(&catalog, &config, cli.input.as_deref(), &output)
}
