mod sink;
mod source;

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use ngsg_angular::{AngularGenerator, AngularOptions};
use ngsg_core::config::{self, CONFIG_FILE_NAME, NgsgConfig, NullBody, OnError};
use ngsg_core::ir::{ApiIr, TypeShape};
use ngsg_core::pipeline::{self, DocumentSource, PipelineOptions, RunStatus};
use ngsg_core::{parse, transform};

use sink::FsSink;
use source::FileOrUrlSource;

#[derive(Parser)]
#[command(
    name = "ngsg",
    about = "Swagger 2.0 to Angular service generator",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Angular models and services from a Swagger document
    Generate(GenerateArgs),

    /// Validate a Swagger document
    Validate {
        /// Path or http(s):// URL of the Swagger document
        #[arg(short, long)]
        source: String,
    },

    /// Print the loaded types and services of a Swagger document
    Inspect {
        /// Path or http(s):// URL of the Swagger document
        #[arg(short, long)]
        source: String,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a new ngsg configuration
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Flags override values from `.ngsg.yaml`.
#[derive(clap::Args, Debug, Default)]
struct GenerateArgs {
    /// Path or http(s):// URL of the Swagger document
    #[arg(short, long)]
    source: Option<String>,

    /// Output directory
    #[arg(short, long)]
    output: Option<String>,

    /// NgModule name, without the `Module` suffix
    #[arg(short, long)]
    module: Option<String>,

    /// Generate a route resolver per method
    #[arg(short, long)]
    resolve: bool,

    /// Keep existing files in the output directory
    #[arg(long)]
    no_clear: bool,

    /// What POST/PUT calls without a body send: emit or omit
    #[arg(long)]
    null_body: Option<NullBody>,

    /// How a failed run is surfaced: report or abort
    #[arg(long)]
    on_error: Option<OnError>,
}

impl GenerateArgs {
    fn apply(self, mut cfg: NgsgConfig) -> NgsgConfig {
        if self.source.is_some() {
            cfg.source = self.source;
        }
        if let Some(output) = self.output {
            cfg.output = output;
        }
        if let Some(module) = self.module {
            cfg.module = module;
        }
        if self.resolve {
            cfg.resolves = true;
        }
        if self.no_clear {
            cfg.clear_output = false;
        }
        if let Some(null_body) = self.null_body {
            cfg.null_body = null_body;
        }
        if let Some(on_error) = self.on_error {
            cfg.on_error = on_error;
        }
        cfg
    }
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => cmd_generate(args).await,

        Commands::Validate { source } => cmd_validate(&source).await.map(|()| ExitCode::SUCCESS),

        Commands::Inspect { source, format } => {
            cmd_inspect(&source, format).await.map(|()| ExitCode::SUCCESS)
        }

        Commands::Init { force } => cmd_init(force).map(|()| ExitCode::SUCCESS),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "ngsg", &mut std::io::stdout());
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<NgsgConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

async fn fetch(location: &str) -> Result<String> {
    let source = FileOrUrlSource::new(location);
    source
        .fetch()
        .await
        .with_context(|| format!("failed to load {}", source.location()))
}

async fn cmd_generate(args: GenerateArgs) -> Result<ExitCode> {
    let cfg = args.apply(try_load_config()?.unwrap_or_default());
    let location = cfg.source.clone().with_context(|| {
        format!("no source document: pass --source or set `source` in {CONFIG_FILE_NAME}")
    })?;

    let source = FileOrUrlSource::new(&location);
    let sink = FsSink::new(&cfg.output);
    let options = PipelineOptions {
        clear_output: cfg.clear_output,
        on_error: cfg.on_error,
    };

    eprintln!("Generating {} -> {}", source.location(), cfg.output);
    let status = pipeline::run(
        &source,
        &sink,
        &AngularGenerator,
        &AngularOptions::from(&cfg),
        options,
    )
    .await
    .with_context(|| format!("failed to generate from {location}"))?;

    match status {
        RunStatus::Completed(summary) => {
            eprintln!(
                "Generated {} files ({} types, {} services) in {}",
                summary.files,
                summary.types,
                summary.services,
                sink.root().display()
            );
            Ok(ExitCode::SUCCESS)
        }
        RunStatus::Failed(err) => {
            eprintln!("Generation failed: {err}");
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn cmd_validate(location: &str) -> Result<()> {
    let content = fetch(location).await?;
    let parsed = parse::from_str(&content).with_context(|| format!("invalid document {location}"))?;

    eprintln!(
        "Valid Swagger {} document: {}",
        parsed.swagger, parsed.info.title
    );
    eprintln!("  Version: {}", parsed.info.version);
    eprintln!("  Paths: {}", parsed.paths.len());
    eprintln!("  Definitions: {}", parsed.definitions.len());

    let ir = transform::transform(&parsed);
    let methods: usize = ir.services.iter().map(|s| s.methods.len()).sum();
    eprintln!("  Types: {}", ir.types.len());
    eprintln!("  Services: {}", ir.services.len());
    eprintln!("  Methods: {methods}");

    eprintln!("Validation successful.");
    Ok(())
}

async fn cmd_inspect(location: &str, format: InspectFormat) -> Result<()> {
    let content = fetch(location).await?;
    let ir = pipeline::load(&content).with_context(|| format!("invalid document {location}"))?;

    let summary = build_inspect_summary(&ir);

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn build_inspect_summary(ir: &ApiIr) -> serde_json::Value {
    let types: Vec<serde_json::Value> = ir
        .types
        .iter()
        .map(|t| {
            let (kind, alias) = match &t.shape {
                TypeShape::Interface => ("interface", None),
                TypeShape::Alias(target) => ("alias", Some(target)),
            };
            serde_json::json!({
                "name": t.name,
                "kind": kind,
                "alias": alias,
                "extends": t.extends,
                "properties": t.properties.iter().map(|p| serde_json::json!({
                    "name": p.name,
                    "type": p.type_expr,
                    "required": p.required,
                })).collect::<Vec<_>>(),
            })
        })
        .collect();

    let services: Vec<serde_json::Value> = ir
        .services
        .iter()
        .map(|s| {
            serde_json::json!({
                "name": s.name,
                "identifier": s.identifier,
                "methods": s.methods.iter().map(|m| serde_json::json!({
                    "name": m.name,
                    "method": m.http_method.as_str(),
                    "url": m.url,
                    "return_type": m.return_type,
                    "form_data": m.is_form_data,
                })).collect::<Vec<_>>(),
            })
        })
        .collect();

    serde_json::json!({
        "info": {
            "title": ir.info.title,
            "version": ir.info.version,
        },
        "types": types,
        "services": services,
    })
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())
        .with_context(|| format!("failed to write {}", config_path.display()))?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
