//! Command-line interface for the dotuml utility
//!
//! Reads a fact document written by the extractor, renders the class
//! diagram and stores it as markdown, HTML or a PNG fetched from a
//! rendering service.

use anyhow::{anyhow, Result};
use chrono::{DateTime, Local};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info, span, Level};

use dotuml::core::logging::init_logging;
use dotuml::plugins::class::JsonFactSource;
use dotuml::plugins::orchestrator::Generator;
use dotuml::{DiagramError, GenerateConfig, OutputFormat, DEFAULT_RENDER_HOST};

/// DotUML - Generate Mermaid class diagrams from declared type facts
#[derive(Parser)]
#[command(name = "dotuml")]
#[command(about = "Generate Mermaid class diagrams from declared type facts")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

fn parse_output_format(value: &str) -> std::result::Result<OutputFormat, String> {
    value.parse::<OutputFormat>().map_err(|e| e.to_string())
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a class diagram from a fact document
    Generate {
        /// JSON fact document produced by the extractor
        #[arg(short, long)]
        source: PathBuf,

        /// Output format (markdown|html|image)
        #[arg(short, long, value_parser = parse_output_format, default_value = "markdown")]
        format: OutputFormat,

        /// Output file (use - for stdout); defaults to diagram<timestamp>.<ext>
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Rendering service used for image output
        #[arg(long, default_value = DEFAULT_RENDER_HOST)]
        render_host: String,

        /// Timeout in seconds for the image request
        #[arg(long, default_value_t = 30)]
        timeout: u64,

        /// Do not add placeholder nodes for undeclared base types and interfaces
        #[arg(long)]
        no_referenced_types: bool,
    },

    /// Show supported output formats
    Formats {
        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// Default output path: `diagram{yyyyMMddHHmmss}.{ext}`
pub fn default_output_path(format: OutputFormat, now: DateTime<Local>) -> PathBuf {
    PathBuf::from(format!(
        "diagram{}.{}",
        now.format("%Y%m%d%H%M%S"),
        format.extension()
    ))
}

/// Download the rendered image; no retries
pub fn fetch_image(url: &str, timeout: Duration) -> Result<Vec<u8>> {
    let fetch_span = span!(Level::INFO, "fetch_image", timeout_secs = timeout.as_secs());
    let _enter = fetch_span.enter();

    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| DiagramError::transport_failure(format!("failed to build HTTP client: {}", e)))?;

    let response = client.get(url).send().map_err(|e| {
        error!(error = %e, "Image request failed");
        DiagramError::transport_failure(format!("request failed: {}", e))
    })?;

    let status = response.status();
    if !status.is_success() {
        error!(%status, "Rendering service returned an error");
        return Err(DiagramError::transport_failure(format!("rendering service returned {}", status)).into());
    }

    let bytes = response.bytes().map_err(|e| {
        error!(error = %e, "Failed to read image body");
        DiagramError::transport_failure(format!("failed to read response body: {}", e))
    })?;
    info!(bytes = bytes.len(), "Image downloaded");
    Ok(bytes.to_vec())
}

/// Main CLI application
#[derive(Default)]
pub struct DotumlApp;

impl DotumlApp {
    pub fn new() -> Self {
        Self
    }

    /// Resolve the log level and format for this invocation
    ///
    /// Environment variables take precedence over CLI flags.
    pub fn log_settings<F>(cli: &Cli, env: F) -> (String, String)
    where
        F: Fn(&str) -> Option<String>,
    {
        let level = env("DOTUML_LOG_LEVEL")
            .or_else(|| env("RUST_LOG"))
            .unwrap_or_else(|| cli.log_level.as_str().to_string());
        let format = env("DOTUML_LOG_FORMAT").unwrap_or_else(|| cli.log_format.as_str().to_string());
        (level, format)
    }

    /// Run the application with the given CLI arguments
    pub fn run(&self, cli: Cli) -> Result<()> {
        let (log_level, log_format) = Self::log_settings(&cli, |key| std::env::var(key).ok());
        if let Err(e) = init_logging(Some(&log_level), Some(&log_format)) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("DotUML v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Generate {
                source,
                format,
                output,
                render_host,
                timeout,
                no_referenced_types,
            } => {
                let config = GenerateConfig::default()
                    .with_render_host(render_host)
                    .with_referenced_types(!no_referenced_types);
                self.generate_command(
                    &source,
                    format,
                    output,
                    config,
                    Duration::from_secs(timeout),
                    cli.verbose,
                )
            }
            Commands::Formats { json } => self.formats_command(json, cli.verbose),
        }
    }

    /// Handle the generate command
    fn generate_command(
        &self,
        source: &Path,
        format: OutputFormat,
        output: Option<PathBuf>,
        config: GenerateConfig,
        timeout: Duration,
        verbose: bool,
    ) -> Result<()> {
        let generator = Generator::new(config);
        let generation = generator.generate(&JsonFactSource::new(source), format)?;

        if verbose {
            eprintln!(
                "Rendered {} bytes of diagram text ({} units skipped)",
                generation.diagram.len(),
                generation.report.failure_count()
            );
        }

        let path = output.unwrap_or_else(|| default_output_path(format, Local::now()));
        let content = match format {
            OutputFormat::Image => fetch_image(&generation.artifact, timeout)?,
            OutputFormat::Markdown | OutputFormat::Html => generation.artifact.into_bytes(),
        };
        self.write_output(&path, &content)?;

        if path.to_string_lossy() != "-" {
            info!(path = %path.display(), %format, "Diagram written");
        }
        Ok(())
    }

    /// Handle the formats command
    fn formats_command(&self, json: bool, verbose: bool) -> Result<()> {
        if verbose {
            eprintln!("Listing supported output formats");
        }
        println!("{}", Self::formats_listing(json)?);
        Ok(())
    }

    fn formats_listing(json: bool) -> Result<String> {
        let formats = OutputFormat::all();
        if json {
            let entries: Vec<_> = formats
                .iter()
                .map(|format| {
                    serde_json::json!({
                        "name": format.to_string(),
                        "extension": format.extension(),
                        "description": format.description(),
                    })
                })
                .collect();
            let listing = serde_json::json!({
                "supported_formats": entries,
                "total": formats.len()
            });
            Ok(serde_json::to_string_pretty(&listing)?)
        } else {
            let mut listing = String::from("Supported output formats:\n");
            for format in formats {
                listing.push_str(&format!(
                    "  {:<9} {:<7} - {}\n",
                    format.to_string(),
                    format!("(.{})", format.extension()),
                    format.description()
                ));
            }
            listing.push_str(&format!("\nTotal: {} output formats supported", formats.len()));
            Ok(listing)
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, path: &Path, content: &[u8]) -> Result<()> {
        if path.to_string_lossy() == "-" {
            let mut stdout = io::stdout();
            stdout.write_all(content)?;
            stdout.flush()?;
        } else {
            fs::write(path, content)
                .map_err(|e| anyhow!("Failed to write output file '{}': {}", path.display(), e))?;
        }
        Ok(())
    }
}
