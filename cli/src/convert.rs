#![deny(missing_docs)]

//! # Convert Command
//!
//! Reads a collection JSON file and writes the OpenAPI document as JSON or YAML.

use p2o_core::error::{AppError, AppResult};
use p2o_core::{convert_str, ConvertOptions, OpenApiDocument};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Output serialization.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    Json,
    /// YAML.
    Yaml,
}

/// Arguments for the convert command.
#[derive(clap::Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Path to the collection JSON file.
    #[clap(long, env = "P2O_INPUT")]
    pub input: PathBuf,

    /// Output path for the OpenAPI document.
    /// Supports .json and .yaml/.yml extensions.
    /// If not provided, prints to stdout.
    #[clap(long, env = "P2O_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Output format; inferred from the output extension when omitted.
    #[clap(long, value_enum, env = "P2O_FORMAT")]
    pub format: Option<OutputFormat>,

    /// Server URL written to `servers[0]`, overriding the `baseUrl` variable.
    #[clap(long, env = "P2O_SERVER_URL")]
    pub server_url: Option<String>,

    /// API title, overriding the collection name.
    #[clap(long, env = "P2O_TITLE")]
    pub title: Option<String>,

    /// API version, overriding the collection version.
    #[clap(long = "api-version", env = "P2O_API_VERSION")]
    pub api_version: Option<String>,

    /// Report operations that a later item with the same path and method replaced.
    #[clap(long, env = "P2O_STRICT")]
    pub strict: bool,

    /// Fail when any operation is replaced. Implies `--strict`.
    #[clap(long, env = "P2O_DENY_COLLISIONS")]
    pub deny_collisions: bool,
}

impl ConvertArgs {
    fn options(&self) -> ConvertOptions {
        ConvertOptions {
            strict: self.strict || self.deny_collisions,
            server_url: self.server_url.clone(),
            title: self.title.clone(),
            version: self.api_version.clone(),
            ..ConvertOptions::default()
        }
    }

    fn resolved_format(&self) -> OutputFormat {
        if let Some(format) = self.format {
            return format;
        }
        match self
            .output
            .as_deref()
            .and_then(Path::extension)
            .and_then(|e| e.to_str())
        {
            Some("yaml") | Some("yml") => OutputFormat::Yaml,
            _ => OutputFormat::Json,
        }
    }
}

/// Executes the conversion.
///
/// # Arguments
///
/// * `args` - Command arguments.
pub fn execute(args: &ConvertArgs) -> AppResult<()> {
    if !args.input.exists() {
        return Err(AppError::General(format!(
            "Collection file not found: {:?}",
            args.input
        )));
    }

    // 1. Read Collection
    let content = fs::read_to_string(&args.input)
        .map_err(|e| AppError::General(format!("Failed to read collection: {}", e)))?;

    // 2. Convert
    let conversion = convert_str(&content, &args.options())?;

    if !conversion.collisions.is_empty() {
        warn!(
            count = conversion.collisions.len(),
            "operations were replaced by later items"
        );
        if args.deny_collisions {
            let listed: Vec<String> = conversion
                .collisions
                .iter()
                .map(|c| format!("{} {}", c.method.to_uppercase(), c.path))
                .collect();
            return Err(AppError::General(format!(
                "Duplicate operations in collection: {}",
                listed.join(", ")
            )));
        }
    }

    // 3. Serialize
    let output_str = render(&conversion.document, args.resolved_format())?;

    // 4. Write result
    if let Some(out_path) = &args.output {
        if let Some(parent) = out_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    AppError::General(format!("Failed to create output directory: {}", e))
                })?;
            }
        }
        fs::write(out_path, output_str)
            .map_err(|e| AppError::General(format!("Failed to write output file: {}", e)))?;
        info!(
            paths = conversion.document.paths.len(),
            output = %out_path.display(),
            "OpenAPI document written"
        );
    } else {
        println!("{}", output_str);
    }

    Ok(())
}

fn render(document: &OpenApiDocument, format: OutputFormat) -> AppResult<String> {
    match format {
        OutputFormat::Yaml => serde_yaml::to_string(document)
            .map_err(|e| AppError::General(format!("YAML serialization failed: {}", e))),
        OutputFormat::Json => serde_json::to_string_pretty(document)
            .map_err(|e| AppError::General(format!("JSON serialization failed: {}", e))),
    }
}
