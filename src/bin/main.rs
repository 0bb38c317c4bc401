//! Renders a template file against a JSON data file.
//!
//! Usage:
//!   loom <template> <data.json> [-o output] [--copy-text]
//!
//! Errors are printed to stderr; exit code 0 on success, 1 on failure.

use std::fs;
use std::io::Write;
use std::process::ExitCode;

use clap::Parser as ClapParser;

use loom_template::{render_ex, Format, MapContext, NoEscape, Options};

/// Render a Mustache-family template against JSON data.
#[derive(Debug, ClapParser)]
#[command(name = "loom", version, about)]
struct Cli {
    /// Path to the template source.
    template: String,

    /// Path to the JSON data file.
    data: String,

    /// Write output here instead of stdout.
    #[arg(short, long)]
    output: Option<String>,

    /// Force the owned-source compile path.
    #[arg(long)]
    copy_text: bool,

    /// `name=path` partial to make available via `{{>name}}` (repeatable).
    #[arg(long = "partial", value_name = "NAME=PATH")]
    partials: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("loom: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let source = fs::read_to_string(&cli.template).map_err(|e| format!("cannot read {}: {e}", cli.template))?;
    let format = Format::compile_with(&source, Options { copy_text: cli.copy_text })
        .map_err(|e| format!("{}: {e}", cli.template))?;

    let data_text = fs::read_to_string(&cli.data).map_err(|e| format!("cannot read {}: {e}", cli.data))?;
    let data: serde_json::Value = serde_json::from_str(&data_text).map_err(|e| format!("{}: {e}", cli.data))?;

    let mut context = MapContext::new();
    for spec in &cli.partials {
        let (name, path) = spec.split_once('=').ok_or_else(|| format!("invalid --partial {spec:?}, expected NAME=PATH"))?;
        let partial_source = fs::read_to_string(path).map_err(|e| format!("cannot read {path}: {e}"))?;
        let partial_format = Format::compile(&partial_source).map_err(|e| format!("{path}: {e}"))?;
        context.insert(name, partial_format);
    }

    let mut rendered = Vec::new();
    render_ex(&mut rendered, &format, &data, &context, &NoEscape, &loom_template::NoUnresolved)
        .map_err(|e| format!("render failed: {e}"))?;

    match &cli.output {
        Some(path) => fs::write(path, rendered).map_err(|e| format!("cannot write {path}: {e}")),
        None => std::io::stdout().write_all(&rendered).map_err(|e| format!("stdout: {e}")),
    }
}
