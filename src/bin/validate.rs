//! Schema Validator CLI
//!
//! Validates model documents, or any single schema object, against the
//! embedded schema set (or an external one via `--schemas`) and reports
//! the issues.

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use atrium_energy::{schema, EnergyModel, ObjectType};

#[derive(Parser)]
#[command(name = "atrium-validate")]
#[command(about = "Validate model documents against the schema set")]
struct Cli {
    /// JSON document, or a directory of documents
    input: PathBuf,

    /// Emit a JSON report instead of text output
    #[arg(long)]
    json: bool,

    /// Output file for the JSON report
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Validate against a schema directory instead of the embedded set
    #[arg(long)]
    schemas: Option<PathBuf>,
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
    if let Some(dir) = &cli.schemas {
        schema::use_schema_dir(dir)
            .with_context(|| format!("loading schema set from {}", dir.display()))?;
    }
    let store = schema::store()?;
    let inputs = collect_inputs(&cli.input)?;
    if inputs.is_empty() {
        anyhow::bail!("no .json documents under {}", cli.input.display());
    }

    let mut documents = Vec::new();
    let mut invalid = 0usize;

    for path in &inputs {
        match validate_document(path) {
            Ok(issues) if issues.is_empty() => {
                if !cli.json {
                    println!("✅ {} - valid", path.display());
                }
                documents.push(serde_json::json!({
                    "path": path.display().to_string(),
                    "valid": true,
                    "issues": []
                }));
            }
            Ok(issues) => {
                invalid += 1;
                if !cli.json {
                    println!("❌ {} - {} issues", path.display(), issues.len());
                    for issue in &issues {
                        println!("   └─ {}", issue);
                    }
                }
                documents.push(serde_json::json!({
                    "path": path.display().to_string(),
                    "valid": false,
                    "issues": issues
                }));
            }
            Err(e) => {
                invalid += 1;
                if !cli.json {
                    println!("❌ {} - {}", path.display(), e);
                }
                documents.push(serde_json::json!({
                    "path": path.display().to_string(),
                    "valid": false,
                    "error": e.to_string()
                }));
            }
        }
    }

    if cli.json {
        let report = serde_json::json!({
            "generated_at": chrono::Utc::now().to_rfc3339(),
            "schema_set": {
                "version": store.version().to_string(),
                "fingerprint": store.fingerprint()
            },
            "checked": inputs.len(),
            "invalid": invalid,
            "documents": documents
        });
        let report_json = serde_json::to_string_pretty(&report)?;

        if let Some(path) = &cli.output {
            std::fs::write(path, &report_json)?;
            println!("✅ Report written to {:?}", path);
        } else {
            println!("{}", report_json);
        }
    } else {
        println!();
        if invalid == 0 {
            println!("✅ {} documents valid (schema set {})", inputs.len(), store.version());
        } else {
            println!("❌ {} of {} documents invalid", invalid, inputs.len());
        }
    }

    if invalid > 0 {
        std::process::exit(1);
    }
    Ok(())
}

/// Validate one document by its `type` discriminator.
///
/// Model documents get the deep nested walk; any other known type is checked
/// against its own schema only.
fn validate_document(path: &Path) -> anyhow::Result<Vec<String>> {
    let text = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&text)?;
    let type_name = value
        .get("type")
        .and_then(serde_json::Value::as_str)
        .context("document has no 'type' key")?;

    if type_name == "Model" {
        let model = EnergyModel::from_value(value)?;
        return Ok(model.validation_errors()?);
    }

    let object_type = ObjectType::parse(type_name)
        .with_context(|| format!("unknown object type '{}'", type_name))?;
    Ok(schema::store()?.validate(object_type, &value))
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
