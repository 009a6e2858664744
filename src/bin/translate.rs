//! Model Translator CLI
//!
//! Translates building-energy model JSON documents into simulation input
//! decks, singly or over a whole directory.

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use atrium_energy::sim::idf::{self, DeckFormat, DeckOptions};
use atrium_energy::{schema, EnergyModel, TranslatorConfig};

#[derive(Parser)]
#[command(name = "atrium-translate")]
#[command(about = "Translate model documents into simulation input decks")]
struct Cli {
    /// Model JSON file, or a directory of model files
    input: PathBuf,

    /// Output deck file (single input) or directory (directory input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Deck layout: pretty or compact (overrides config)
    #[arg(long)]
    format: Option<String>,

    /// Path to a config file
    #[arg(long)]
    config: Option<String>,

    /// Validate only; write nothing
    #[arg(long)]
    check: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = TranslatorConfig::load_from(cli.config.as_deref())?;
    if let Some(dir) = config.schemas_dir() {
        schema::use_schema_dir(&dir)
            .with_context(|| format!("loading schema set from {}", dir.display()))?;
    }

    let mut options = config.deck_options();
    if let Some(format) = &cli.format {
        options.format = parse_format(format)?;
    }
    let store = schema::store()?;
    options.note = Some(format!(
        "Schema set {} ({})",
        store.version(),
        &store.fingerprint()[..12]
    ));

    let inputs = collect_inputs(&cli.input)?;
    if inputs.is_empty() {
        anyhow::bail!("no .json documents under {}", cli.input.display());
    }

    let output_dir = if cli.input.is_dir() {
        Some(cli.output.clone().unwrap_or_else(|| cli.input.clone()))
    } else {
        None
    };

    let mut failures = 0usize;
    for path in &inputs {
        let outcome = if cli.check {
            check_document(path)
        } else {
            let output = deck_path(path, &cli.input, &cli.output, output_dir.as_deref());
            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent)?;
            }
            translate_document(path, &output, &config, &options)
        };
        match outcome {
            Ok(true) => {}
            Ok(false) => failures += 1,
            Err(e) => {
                println!("❌ {} - {}", path.display(), e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        println!();
        println!("❌ {} of {} documents failed", failures, inputs.len());
        std::process::exit(1);
    }
    Ok(())
}

/// Validate without translating.
fn check_document(path: &Path) -> anyhow::Result<bool> {
    let model = EnergyModel::read_from_disk(path)?;
    let issues = model.validation_errors()?;
    if issues.is_empty() {
        println!("✅ {} - valid", path.display());
        return Ok(true);
    }
    println!("❌ {} - {} validation issues", path.display(), issues.len());
    for issue in &issues {
        println!("   └─ {}", issue);
    }
    Ok(false)
}

/// Translate one document to a deck file.
///
/// Validation issues are reported first; translation proceeds over them
/// unless the config says otherwise. Collected translation errors leave the
/// deck written but mark the document failed.
fn translate_document(
    path: &Path,
    output: &Path,
    config: &TranslatorConfig,
    options: &DeckOptions,
) -> anyhow::Result<bool> {
    let mut model = EnergyModel::read_from_disk(path)?;

    let issues = model.validation_errors()?;
    if !issues.is_empty() {
        println!("⚠️  {} - {} validation issues", path.display(), issues.len());
        for issue in &issues {
            println!("   └─ {}", issue);
        }
        if config.translate.fail_on_invalid {
            return Ok(false);
        }
    }

    let sim_model = model.to_sim_model()?;

    let mut options = options.clone();
    if config.translate.annotate_sources {
        options.note = Some(match &options.note {
            Some(note) => format!("{note}; source {}", path.display()),
            None => format!("Source {}", path.display()),
        });
    }
    idf::write_deck_to(output, &sim_model, &options)?;

    println!(
        "✅ {} -> {} ({} objects)",
        path.display(),
        output.display(),
        sim_model.object_count()
    );
    for warning in model.warnings() {
        println!("   ⚠️  {}", warning);
    }
    for error in model.errors() {
        println!("   └─ {}", error);
    }
    Ok(model.errors().is_empty())
}

fn parse_format(format: &str) -> anyhow::Result<DeckFormat> {
    match format {
        "pretty" => Ok(DeckFormat::Pretty),
        "compact" => Ok(DeckFormat::Compact),
        other => anyhow::bail!("unknown format '{}' (expected pretty or compact)", other),
    }
}

fn collect_inputs(input: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.is_dir() {
        anyhow::bail!("{} is neither a file nor a directory", input.display());
    }

    let mut inputs = Vec::new();
    for entry in WalkDir::new(input).sort_by_file_name() {
        let entry = entry.with_context(|| format!("reading {}", input.display()))?;
        if entry.file_type().is_file()
            && entry.path().extension().map_or(false, |ext| ext == "json")
        {
            inputs.push(entry.into_path());
        }
    }
    Ok(inputs)
}

fn deck_path(
    input: &Path,
    root: &Path,
    output: &Option<PathBuf>,
    output_dir: Option<&Path>,
) -> PathBuf {
    match output_dir {
        // Directory mode: mirror the input layout under the output dir
        Some(dir) => {
            let relative = input.strip_prefix(root).unwrap_or(input);
            dir.join(relative).with_extension("idf")
        }
        None => output
            .clone()
            .unwrap_or_else(|| input.with_extension("idf")),
    }
}
