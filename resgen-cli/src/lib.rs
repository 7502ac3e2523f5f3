//! # resgen CLI
//!
//! Loads structure definitions from files or directories and writes one Rust
//! module per compiled schema, plus a `mod.rs` that re-exports them.

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use resgen_codegen::{GeneratedUnit, Generator, GeneratorOptions, render_module_index};
use resgen_schema::SchemaRegistry;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Compiles structure definitions into Rust types with validators.
#[derive(Parser, Debug)]
#[command(name = "resgen", version, about)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate Rust modules.
    Generate(GenerateArgs),
    /// List the loaded definitions.
    List(ListArgs),
}

/// Arguments of `generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Definition files or directories of `.xml` files.
    #[arg(short, long = "input", required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// Output directory.
    #[arg(short, long)]
    pub out: PathBuf,

    /// Only generate these schemas.
    #[arg(long)]
    pub only: Vec<String>,

    /// Also generate logical models.
    #[arg(long)]
    pub include_logical: bool,

    /// Where unparseable output is written.
    #[arg(long)]
    pub diagnostic_path: Option<PathBuf>,

    /// Skip pretty-printing.
    #[arg(long)]
    pub no_format: bool,
}

/// Arguments of `list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Definition files or directories of `.xml` files.
    #[arg(short, long = "input", required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,
}

/// Default log filter for a verbosity count.
#[must_use]
pub fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Runs a parsed command line.
///
/// # Errors
/// Returns an error if loading, generation or writing fails.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate(args) => {
            let written = generate(&args)?;
            println!("wrote {written} modules to {}", args.out.display());
        }
        Commands::List(args) => {
            let registry = load_registry(&args.inputs)?;
            print!("{}", list(&registry));
        }
    }
    Ok(())
}

/// Loads every input into one registry.
///
/// Directories contribute their `.xml` files in name order.
///
/// # Errors
/// Returns an error if an input cannot be read or loaded.
pub fn load_registry(inputs: &[PathBuf]) -> anyhow::Result<SchemaRegistry> {
    let mut registry = SchemaRegistry::new();
    for path in expand_inputs(inputs)? {
        let xml = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let count = registry
            .load_xml(&xml)
            .with_context(|| format!("failed to load {}", path.display()))?;
        debug!(path = %path.display(), count, "loaded definitions");
    }
    info!(schemas = registry.len(), "registry loaded");
    Ok(registry)
}

fn expand_inputs(inputs: &[PathBuf]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let mut entries = Vec::new();
            for entry in fs::read_dir(input)
                .with_context(|| format!("failed to read directory {}", input.display()))?
            {
                let path = entry?.path();
                if path.extension().is_some_and(|ext| ext == "xml") {
                    entries.push(path);
                }
            }
            entries.sort();
            files.extend(entries);
        } else {
            files.push(input.clone());
        }
    }
    Ok(files)
}

/// Generates the requested units and writes them with a module index.
///
/// Returns the number of units written.
///
/// # Errors
/// Returns an error if loading, generation or writing fails.
pub fn generate(args: &GenerateArgs) -> anyhow::Result<usize> {
    let registry = load_registry(&args.inputs)?;

    let mut options = GeneratorOptions::new()
        .with_format(!args.no_format)
        .with_include_logical(args.include_logical);
    if let Some(path) = &args.diagnostic_path {
        options = options.with_diagnostic_path(path);
    }
    let generator = Generator::with_options(&registry, options);

    let units = if args.only.is_empty() {
        generator.generate_all()?
    } else {
        let mut units = args
            .only
            .iter()
            .map(|name| generator.generate_schema(name))
            .collect::<Result<Vec<_>, _>>()?;
        units.sort_by(|a, b| a.module_name.cmp(&b.module_name));
        units.dedup_by(|a, b| a.module_name == b.module_name);
        units
    };
    if units.is_empty() {
        bail!("no schemas to generate");
    }

    write_units(&units, &args.out)?;
    Ok(units.len())
}

/// Writes each unit to `<module>.rs` and the index to `mod.rs`.
///
/// # Errors
/// Returns an error if the directory or a file cannot be written.
pub fn write_units(units: &[GeneratedUnit], out: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(out).with_context(|| format!("failed to create {}", out.display()))?;
    for unit in units {
        let path = out.join(unit.file_name());
        fs::write(&path, &unit.source)
            .with_context(|| format!("failed to write {}", path.display()))?;
        debug!(path = %path.display(), "wrote unit");
    }
    let index = out.join("mod.rs");
    fs::write(&index, render_module_index(units))
        .with_context(|| format!("failed to write {}", index.display()))?;
    Ok(())
}

/// One line per loaded schema: name, kind, derivation and type name.
#[must_use]
pub fn list(registry: &SchemaRegistry) -> String {
    let mut schemas: Vec<_> = registry.iter().collect();
    schemas.sort_by(|a, b| a.name.cmp(&b.name));
    schemas
        .into_iter()
        .map(|s| {
            format!(
                "{}\t{:?}\t{:?}\t{}\n",
                s.name,
                s.kind,
                s.derivation,
                s.type_name()
            )
        })
        .collect()
}
