use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, info};
use std::path::PathBuf;

/// Reactive API Transformer - Generate a future/callback client API from a reflected reactive-streams API
#[derive(Parser, Debug)]
#[command(name = "reactive-api-transformer")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Directory holding the reflected API model (YAML or JSON class descriptors)
    #[arg(value_name = "MODEL_DIR")]
    pub model_dir: PathBuf,

    /// Generator configuration file (YAML or JSON)
    #[arg(short = 'c', long = "config", value_name = "CONFIG")]
    pub config_path: PathBuf,

    /// Output directory for generated sources and graph exports
    #[arg(short = 'o', long = "output", value_name = "OUT_DIR")]
    pub output_dir: PathBuf,

    /// Write the classification report to this file
    #[arg(short = 'r', long = "report", value_name = "FILE")]
    pub report_path: Option<PathBuf>,

    /// Report format (yaml or json)
    #[arg(short = 'f', long = "format", value_enum, default_value = "yaml")]
    pub report_format: OutputFormat,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// YAML format
    Yaml,
    /// JSON format
    Json,
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    if !args.model_dir.exists() {
        anyhow::bail!("Model directory does not exist: {}", args.model_dir.display());
    }
    if !args.model_dir.is_dir() {
        anyhow::bail!("Model path is not a directory: {}", args.model_dir.display());
    }
    if !args.config_path.is_file() {
        anyhow::bail!("Config file does not exist: {}", args.config_path.display());
    }
    if args.output_dir.exists() && !args.output_dir.is_dir() {
        anyhow::bail!("Output path is not a directory: {}", args.output_dir.display());
    }

    info!("Model directory: {}", args.model_dir.display());
    info!("Config: {}", args.config_path.display());
    info!("Output directory: {}", args.output_dir.display());
    if let Some(ref report) = args.report_path {
        info!("Report: {} ({:?})", report.display(), args.report_format);
    }

    Ok(args)
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    use crate::config::GeneratorConfig;
    use crate::context::Classification;
    use crate::generator::Generator;
    use crate::inspector::Inspector;
    use crate::parser::ModelParser;
    use crate::report::build_report;
    use crate::scanner::ModelScanner;
    use crate::writer::{serialize_json, serialize_yaml, write_to_file, OutputWriter};

    info!("Starting API generation...");

    // Step 1: Load configuration
    let config = GeneratorConfig::load(&args.config_path)?;
    info!("Loaded configuration with {} seeds", config.seeds.len());

    // Step 2: Scan the model directory
    info!("Scanning model directory...");
    let scanner = ModelScanner::new(args.model_dir.clone());
    let scan_result = scanner.scan()?;

    info!("Found {} model files", scan_result.model_files.len());
    for warning in &scan_result.warnings {
        log::warn!("{}", warning);
    }
    if scan_result.model_files.is_empty() {
        anyhow::bail!("No model files found in {}", args.model_dir.display());
    }

    // Step 3: Parse the model
    info!("Parsing model files...");
    let model = ModelParser::load_model(&scan_result.model_files)?;
    info!("Loaded {} class descriptors", model.len());

    // Step 4: Build the dependency graph and classify
    info!("Inspecting API surface...");
    let mut inspector = Inspector::new(&model, &config);
    inspector
        .inspect_seeds()
        .context("Failed to inspect the API model")?;
    let surface = inspector.finalize();
    info!(
        "API surface: {} classes, {} reactive, {} isolated",
        surface.graph().vertex_count(),
        surface.classes_labeled(Classification::ReactiveApi).len(),
        surface.isolated().count()
    );

    // Step 5: Emit and write target classes
    info!("Generating target API...");
    let writer = OutputWriter::new(args.output_dir.clone());
    let mut generator = Generator::new(&model, &config, &surface)
        .context("Failed to prepare type mapping")?;
    let summary = generator.run(&writer)?;

    // Step 6: Diagnostic graph exports
    writer.write_graphs(surface.graph(), config.settings_root.as_deref())?;

    // Step 7: Optional classification report
    if let Some(report_path) = &args.report_path {
        let report = build_report(&surface);
        let content = match args.report_format {
            OutputFormat::Yaml => serialize_yaml(&report)?,
            OutputFormat::Json => serialize_json(&report)?,
        };
        write_to_file(&content, report_path)?;
        info!("Wrote classification report to {}", report_path.display());
    }

    info!("Generation complete!");
    info!("Summary:");
    info!("  - Model files: {}", scan_result.model_files.len());
    info!("  - Classes inspected: {}", surface.graph().vertex_count());
    info!("  - Files written: {}", summary.files.len());
    info!("  - Converters: {}", summary.conversions);

    Ok(())
}
