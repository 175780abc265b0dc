//! Command-line front end.
//!
//! Parses one or more Avro declarations into a shared store, validates it
//! and writes the generated module to a file or stdout.

use anyhow::{Context, Result};
use clap::Parser;
use recordgen_codegen::{Generator, GeneratorConfig};
use recordgen_schema::{SchemaId, SchemaStore, parse_schema_str, validate_store};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Generate pyschema source from Avro record declarations.
#[derive(Debug, Parser)]
#[command(name = "recordgen", version, about)]
pub struct Cli {
    /// Avro `.avsc` files, in declaration order (`-` reads stdin).
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Write the generated module here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// TOML file with generator settings; flags take precedence.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Spaces per indentation level.
    #[arg(long, conflicts_with = "tabs")]
    pub indent: Option<usize>,

    /// Indent with tabs.
    #[arg(long)]
    pub tabs: bool,

    /// Omit the import header.
    #[arg(long)]
    pub no_header: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Returns the default log filter for the requested verbosity.
    #[must_use]
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }

    /// Builds the generator configuration from the config file and flags.
    ///
    /// # Errors
    /// Returns an error if the config file cannot be read or parsed.
    pub fn generator_config(&self) -> Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                toml::from_str(&text)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => GeneratorConfig::default(),
        };

        if let Some(width) = self.indent {
            config = config.with_indent_width(width);
        }
        if self.tabs {
            config = config.with_tabs();
        }
        if self.no_header {
            config = config.with_header(false);
        }
        Ok(config)
    }
}

/// Parses every input into one store, returning the top-level records.
///
/// # Errors
/// Returns an error naming the input that failed to read or parse.
pub fn load_store(inputs: &[PathBuf]) -> Result<(SchemaStore, Vec<SchemaId>)> {
    let mut store = SchemaStore::new();
    let mut roots = Vec::with_capacity(inputs.len());

    for input in inputs {
        let json = read_input(input)?;
        let root = parse_schema_str(&json, &mut store)
            .with_context(|| format!("parsing {}", input.display()))?;
        tracing::debug!("Loaded {} as {}", input.display(), root);
        roots.push(root);
    }

    Ok((store, roots))
}

fn read_input(input: &Path) -> Result<String> {
    if input.as_os_str() == "-" {
        let mut json = String::new();
        std::io::stdin()
            .read_to_string(&mut json)
            .context("reading stdin")?;
        Ok(json)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))
    }
}

/// Runs the command and returns the generated source.
///
/// # Errors
/// Returns an error if loading, validation or generation fails.
pub fn generate(cli: &Cli) -> Result<String> {
    let config = cli.generator_config()?;
    let (store, roots) = load_store(&cli.inputs)?;
    validate_store(&store).context("validating schemas")?;

    let source = Generator::with_config(&store, config)
        .render(&roots)
        .context("generating source")?;
    Ok(source)
}

/// Runs the command, writing the output where requested.
///
/// # Errors
/// Returns an error if generation or writing fails.
pub fn run(cli: &Cli) -> Result<()> {
    let source = generate(cli)?;
    match &cli.output {
        Some(path) => {
            std::fs::write(path, &source)
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::info!("Wrote {} bytes to {}", source.len(), path.display());
        }
        None => print!("{}", source),
    }
    Ok(())
}
