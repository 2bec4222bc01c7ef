//! CLI for building and inspecting media kit documents.
//!
//! Usage:
//!   mediakit new --template hero-centered --template bio-with-image --output kit.json
//!   mediakit import --input kit.json [--output kit.automerge] [--validate] [--stats]
//!   mediakit export --input kit.automerge [--output kit.json]
//!   mediakit outline --input kit.automerge [--ids]
//!   mediakit templates [--catalog templates.json]

mod files;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use files::Format;
use mediakit_editor::{
    ComponentRegistry, EditorConfig, EditorSession, OutlineRenderer, StaticCatalog,
    TemplateCatalog,
};

#[derive(Parser, Debug)]
#[command(
    name = "mediakit",
    about = "Build, convert and inspect media kit documents",
    version
)]
struct Cli {
    /// Undo levels kept while building a document
    #[arg(
        long,
        global = true,
        env = "MEDIAKIT_HISTORY_LIMIT",
        default_value_t = mediakit_editor::DEFAULT_HISTORY_LIMIT,
        value_parser = parse_history_limit
    )]
    history_limit: usize,

    /// JSON template catalog to use instead of the built-in one
    #[arg(long, global = true, env = "MEDIAKIT_CATALOG")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a document from templates
    New {
        /// Template IDs, inserted in order
        #[arg(short, long = "template", required = true)]
        templates: Vec<String>,

        /// Flat JSON object of profile fields used to fill components
        #[arg(short, long)]
        profile: Option<PathBuf>,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Output encoding (defaults to the output file's extension)
        #[arg(short, long, value_enum)]
        format: Option<Format>,
    },

    /// Convert a JSON document to Automerge binary
    Import {
        /// Input JSON file path
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (defaults to input path with .automerge extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Validate output by hydrating it back and comparing with the input
        #[arg(long, default_value = "false")]
        validate: bool,

        /// Print statistics about the conversion
        #[arg(long, default_value = "false")]
        stats: bool,
    },

    /// Convert an Automerge document to JSON
    Export {
        /// Input Automerge file path
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (defaults to input path with .json extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a document's section/column/component outline
    Outline {
        /// Input file (.json or Automerge)
        #[arg(short, long)]
        input: PathBuf,

        /// Include entity IDs
        #[arg(long, default_value = "false")]
        ids: bool,
    },

    /// List available templates
    Templates,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let catalog = load_catalog(cli.catalog.as_ref())?;
    let config = EditorConfig::new().with_history_limit(cli.history_limit);

    match cli.command {
        Command::New {
            templates,
            profile,
            output,
            format,
        } => run_new(&catalog, config, &templates, profile, output, format),
        Command::Import {
            input,
            output,
            validate,
            stats,
        } => run_import(input, output, validate, stats),
        Command::Export { input, output } => run_export(input, output),
        Command::Outline { input, ids } => run_outline(input, ids),
        Command::Templates => {
            run_templates(&catalog);
            Ok(())
        }
    }
}

fn parse_history_limit(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("history limit must be at least 1".to_string()),
        Ok(limit) => Ok(limit),
        Err(e) => Err(e.to_string()),
    }
}

fn load_catalog(path: Option<&PathBuf>) -> Result<StaticCatalog> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path).context("Failed to read catalog file")?;
            StaticCatalog::from_json(&json).context("Failed to parse catalog JSON")
        }
        None => Ok(StaticCatalog::builtin()),
    }
}

fn run_new(
    catalog: &StaticCatalog,
    config: EditorConfig,
    templates: &[String],
    profile: Option<PathBuf>,
    output: PathBuf,
    format: Option<Format>,
) -> Result<()> {
    let first = &templates[0];
    let template = catalog
        .get(first)
        .with_context(|| format!("Unknown template: {first}"))?;

    // The first template seeds the document so it is never empty.
    let mut document = mediakit_editor::Document::new();
    template
        .apply_to(&mut document, None, &Default::default())
        .with_context(|| format!("Failed to apply template {first}"))?;
    let mut session = EditorSession::with_config(document, config);

    for id in &templates[1..] {
        session
            .insert_template(catalog, id, None)
            .with_context(|| format!("Failed to insert template {id}"))?;
    }

    if let Some(path) = profile {
        let data = files::read_profile(&path)?;
        let registry = ComponentRegistry::with_builtin_types();
        let changed = session
            .populate_from(&data, &registry)
            .context("Failed to populate components")?;
        info!(changed, "populated components from profile");
    }

    let document = session.into_document();
    document.validate().context("Built document is invalid")?;

    let format = format.unwrap_or_else(|| Format::from_path(&output));
    let written = files::write_document(&output, &document, format)?;
    println!(
        "Created {} ({} sections, {} components, {} bytes)",
        output.display(),
        document.len(),
        document.component_count(),
        written
    );
    Ok(())
}

fn run_import(input: PathBuf, output: Option<PathBuf>, validate: bool, stats: bool) -> Result<()> {
    let document = files::read_document(&input)?;
    let input_len = std::fs::metadata(&input)
        .context("Failed to stat input file")?
        .len();

    let output = output.unwrap_or_else(|| files::with_extension(&input, Format::Automerge));
    let written = files::write_document(&output, &document, Format::Automerge)?;

    if validate {
        let bytes = std::fs::read(&output).context("Failed to read binary for validation")?;
        let loaded = files::parse_document(&bytes, Format::Automerge)
            .context("Validation failed: binary does not load")?;
        if loaded != document {
            anyhow::bail!("Validation failed: hydrated document differs from input");
        }
        println!("✓ Validation passed!");
    }

    if stats {
        println!();
        println!("Conversion statistics:");
        println!("  Input JSON:    {:>10} bytes", input_len);
        println!("  Output binary: {:>10} bytes", written);
        println!(
            "  Compression:   {:>10.2}x",
            input_len as f64 / written.max(1) as f64
        );
        println!();
        println!("  Sections:   {}", document.len());
        println!("  Components: {}", document.component_count());
    }

    println!();
    println!("Successfully converted {} → {}", input.display(), output.display());
    Ok(())
}

fn run_export(input: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let document = files::read_document(&input)?;
    let output = output.unwrap_or_else(|| files::with_extension(&input, Format::Json));
    files::write_document(&output, &document, Format::Json)?;
    println!("Successfully exported {} → {}", input.display(), output.display());
    Ok(())
}

fn run_outline(input: PathBuf, ids: bool) -> Result<()> {
    let document = files::read_document(&input)?;
    let registry = ComponentRegistry::with_builtin_types();
    print!("{}", OutlineRenderer::new(&registry).with_ids(ids).render(&document));
    Ok(())
}

fn run_templates(catalog: &StaticCatalog) {
    for template in catalog.templates() {
        let premium = if template.premium { " (premium)" } else { "" };
        println!(
            "{:<18} {:<10} {:<14} {}{}",
            template.id, template.kind, template.layout, template.name, premium
        );
    }
}
