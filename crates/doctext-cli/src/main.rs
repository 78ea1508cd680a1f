#![allow(
    clippy::needless_pass_by_value,    // clap requires owned values
    clippy::cast_precision_loss,       // f64 sufficient for display purposes
    clippy::unnecessary_wraps,         // consistent Result return for CLI handlers
    clippy::fn_params_excessive_bools, // CLI commands have many boolean flags
)]

//! doctext CLI - plain text extraction for PDF and DOCX files
//!
//! `doctext pdf` writes a page-separated dump of a PDF, `doctext docx` lists
//! the body paragraphs of a Word document.

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use config::{Config, CONFIG_TEMPLATE, DEFAULT_DOCX_INPUT, DEFAULT_PDF_INPUT, DEFAULT_PDF_OUTPUT};
use doctext_backend::{BackendOptions, DocumentConverter};
use doctext_core::{
    ConversionResult, InputFormat, JsonOptions, JsonSerializer, ListingOptions,
    PageDumpSerializer, ParagraphListingSerializer, DEFAULT_LISTING_LIMIT,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Format bytes as human-readable size (e.g., "1.5 MB")
fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} bytes")
    }
}

/// Verbosity level for output control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Verbosity {
    /// Suppress all output except errors
    Quiet,
    /// Normal output (default)
    Normal,
    /// Verbose output with extra details
    Verbose,
}

impl Verbosity {
    /// Create from CLI flags
    const fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    /// Check if output should be shown (not quiet)
    const fn should_show_output(self) -> bool {
        !matches!(self, Self::Quiet)
    }

    /// Check if verbose output is requested
    const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Default `env_logger` filter for this verbosity
    const fn log_filter(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "debug",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
enum OutputFormat {
    /// Plain text, one page or paragraph per line (default)
    Text,
    /// JSON document
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "doctext",
    about = "Extract plain text from PDF and DOCX files",
    long_about = "Extract plain text from PDF and DOCX files.\n\
                  \n\
                  `doctext pdf` dumps every page of a PDF into a text file,\n\
                  `doctext docx` lists the paragraphs of a Word document.",
    version
)]
struct Args {
    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Show detailed processing information
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Dump the text of every PDF page into a file
    Pdf {
        /// PDF file (default: from config, else "tmp/QUESTIONNAIRE EXPORT COMPTA NEW.pdf")
        #[arg(value_name = "INPUT")]
        input: Option<PathBuf>,

        /// Dump file (default: from config, else "pdf_dump.txt")
        #[arg(short, long, value_name = "OUTPUT", conflicts_with = "stdout")]
        output: Option<PathBuf>,

        /// Print the dump on stdout instead of writing a file
        #[arg(long)]
        stdout: bool,

        /// Only extract the first N pages
        #[arg(long, value_name = "N")]
        max_pages: Option<usize>,
    },

    /// List the body paragraphs of a Word document
    Docx {
        /// DOCX file (default: from config, else "tmp/QUESTIONNAIRE EXPORT COMPTA NEW.docx")
        #[arg(value_name = "INPUT")]
        input: Option<PathBuf>,

        /// Number of paragraphs considered for the listing (default: 100)
        #[arg(short, long, value_name = "N")]
        limit: Option<usize>,

        /// List every paragraph
        #[arg(long, conflicts_with = "limit")]
        all: bool,
    },

    /// Extract the text of a document as plain text or JSON
    Extract {
        /// Input file (.pdf or .docx)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Output format (default: text, or from config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Input format (auto-detected from the extension otherwise)
        #[arg(long, value_name = "FORMAT")]
        input_format: Option<InputFormat>,

        /// Compact JSON output (no pretty-printing, only affects JSON format)
        #[arg(long)]
        compact: bool,

        /// Only extract the first N pages (PDF only)
        #[arg(long, value_name = "N")]
        max_pages: Option<usize>,
    },

    /// Show document metadata and structure
    Info {
        /// Input file (.pdf or .docx)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Only extract the first N pages (PDF only)
        #[arg(long, value_name = "N")]
        max_pages: Option<usize>,
    },

    /// Manage configuration files
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Show the effective (merged) configuration
    Show {
        /// Output as JSON instead of TOML
        #[arg(long)]
        json: bool,
    },

    /// Create a configuration file with commented defaults
    Init {
        /// Create ~/.doctext.toml instead of ./.doctext.toml
        #[arg(long)]
        global: bool,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show the path(s) to configuration file(s)
    Path,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Extract global verbosity settings
    let verbosity = Verbosity::from_flags(args.quiet, args.verbose);
    init_logging(verbosity);

    // Load configuration files
    let (user_config, project_config) = Config::discover_configs();
    let config = Config::merge(user_config, project_config);

    match args.command {
        Commands::Pdf {
            input,
            output,
            stdout,
            max_pages,
        } => {
            let pdf_config = config.pdf.unwrap_or_default();
            let input = input
                .or(pdf_config.input)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PDF_INPUT));
            let output = output
                .or(pdf_config.output)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PDF_OUTPUT));
            let max_pages = max_pages.or(pdf_config.max_pages);

            pdf_command(&input, &output, stdout, max_pages, verbosity)
        }
        Commands::Docx { input, limit, all } => {
            let docx_config = config.docx.unwrap_or_default();
            let input = input
                .or(docx_config.input)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DOCX_INPUT));
            let limit = if all {
                None
            } else {
                Some(
                    limit
                        .or(docx_config.limit)
                        .unwrap_or(DEFAULT_LISTING_LIMIT),
                )
            };

            docx_command(&input, limit, verbosity)
        }
        Commands::Extract {
            input,
            output,
            format,
            input_format,
            compact,
            max_pages,
        } => {
            // Apply config defaults (CLI args override config)
            let extract_config = config.extract.unwrap_or_default();
            let format = format
                .or_else(|| {
                    extract_config
                        .format
                        .as_deref()
                        .and_then(parse_config_format)
                })
                .unwrap_or(OutputFormat::Text);
            let compact = compact || extract_config.compact.unwrap_or(false);

            extract_command(
                &input,
                output.as_deref(),
                format,
                input_format,
                compact,
                max_pages,
                verbosity,
            )
        }
        Commands::Info {
            input,
            json,
            max_pages,
        } => info_command(&input, json, max_pages, verbosity),
        Commands::Config { action } => config_command(action, verbosity),
    }
}

/// Initialise `env_logger` on stderr; `RUST_LOG` overrides the verbosity flags
fn init_logging(verbosity: Verbosity) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(verbosity.log_filter()))
        .target(env_logger::Target::Stderr)
        .init();
}

/// Parse an output format name coming from a config file
fn parse_config_format(name: &str) -> Option<OutputFormat> {
    match OutputFormat::from_str(name, true) {
        Ok(format) => Some(format),
        Err(_) => {
            eprintln!(
                "{} Unknown output format in config: '{}' (expected text or json)",
                "Warning:".yellow().bold(),
                name
            );
            None
        }
    }
}

fn converter(max_pages: Option<usize>) -> DocumentConverter {
    DocumentConverter::with_options(BackendOptions::default().with_max_pages(max_pages))
}

fn convert(
    input: &Path,
    format: Option<InputFormat>,
    max_pages: Option<usize>,
) -> Result<ConversionResult> {
    let converter = converter(max_pages);
    let result = match format {
        Some(format) => converter.convert_with_format(input, format),
        None => converter.convert(input),
    };
    result.with_context(|| format!("Failed to open {}", input.display()))
}

/// Dump every page of a PDF, separated by `--- Page N ---` headers
fn pdf_command(
    input: &Path,
    output: &Path,
    to_stdout: bool,
    max_pages: Option<usize>,
    verbosity: Verbosity,
) -> Result<()> {
    let result = convert(input, Some(InputFormat::Pdf), max_pages)?;
    let document = &result.document;

    let total_pages = document
        .metadata
        .num_pages
        .unwrap_or_else(|| document.unit_count());
    let dump = PageDumpSerializer::new().serialize_document(document)?;

    if to_stdout {
        // Keep stdout clean for the dump itself
        if verbosity.should_show_output() {
            eprintln!("Pages: {total_pages}");
        }
        print!("{dump}");
        return Ok(());
    }

    if verbosity.should_show_output() {
        println!("Pages: {total_pages}");
    }

    fs::write(output, dump.as_bytes())
        .with_context(|| format!("Failed to write {}", output.display()))?;

    if verbosity.should_show_output() {
        println!("Saved to {}", output.display());
    }
    if verbosity.is_verbose() {
        eprintln!(
            "{} {} page(s) extracted in {:.2?}",
            "Done:".green().bold(),
            document.unit_count(),
            result.latency
        );
    }

    Ok(())
}

/// Absolute path with `..` and symlinks resolved; a missing file keeps its
/// name under its resolved parent directory
fn resolve_path(input: &Path) -> std::io::Result<PathBuf> {
    if let Ok(resolved) = fs::canonicalize(input) {
        return Ok(resolved);
    }

    let absolute = std::path::absolute(input)?;
    let resolved = match (absolute.parent(), absolute.file_name()) {
        (Some(parent), Some(name)) => fs::canonicalize(parent).ok().map(|p| p.join(name)),
        _ => None,
    };
    Ok(resolved.unwrap_or(absolute))
}

/// List the non-blank body paragraphs of a Word document as `i: text`
fn docx_command(input: &Path, limit: Option<usize>, verbosity: Verbosity) -> Result<()> {
    let absolute =
        resolve_path(input).with_context(|| format!("Failed to resolve {}", input.display()))?;

    if verbosity.should_show_output() {
        println!("Using path: {}", absolute.display());
        println!("Exists? {}", absolute.exists());
        println!("Opening doc...");
    }

    let result = convert(&absolute, Some(InputFormat::Docx), None)?;
    let paragraphs = result.document.paragraphs().unwrap_or_default();

    if verbosity.should_show_output() {
        println!("Total paragraphs: {}", paragraphs.len());
    }

    let listing = ParagraphListingSerializer::with_options(ListingOptions::default().with_limit(limit))
        .serialize_paragraphs(paragraphs);
    print!("{listing}");

    if verbosity.is_verbose() {
        eprintln!(
            "{} {} paragraph(s) read in {:.2?}",
            "Done:".green().bold(),
            paragraphs.len(),
            result.latency
        );
    }

    Ok(())
}

fn extract_command(
    input: &Path,
    output: Option<&Path>,
    format: OutputFormat,
    input_format: Option<InputFormat>,
    compact: bool,
    max_pages: Option<usize>,
    verbosity: Verbosity,
) -> Result<()> {
    let result = convert(input, input_format, max_pages)?;

    let rendered = match format {
        OutputFormat::Text => result.document.plain_text(),
        OutputFormat::Json => JsonSerializer::with_options(JsonOptions { pretty: !compact })
            .serialize_document(&result.document)
            .context("Failed to serialize document to JSON")?,
    };

    if let Some(output) = output {
        fs::write(output, rendered.as_bytes())
            .with_context(|| format!("Failed to write {}", output.display()))?;
        if verbosity.should_show_output() {
            eprintln!(
                "{} {} → {}",
                "Extracted:".green().bold(),
                input.display(),
                output.display()
            );
        }
    } else {
        println!("{rendered}");
    }

    Ok(())
}

/// Document information for the `info` command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct DocumentInfo {
    file_name: String,
    file_path: String,
    file_size: u64,
    file_size_human: String,
    format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    paragraph_count: Option<usize>,
    char_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    modified: Option<String>,
}

/// Inspect document metadata and structure
fn info_command(
    input: &Path,
    json_output: bool,
    max_pages: Option<usize>,
    verbosity: Verbosity,
) -> Result<()> {
    let file_size = fs::metadata(input)
        .with_context(|| format!("Failed to read file metadata: {}", input.display()))?
        .len();

    let result = convert(input, None, max_pages)?;
    let document = &result.document;
    let metadata = &document.metadata;

    let info = DocumentInfo {
        file_name: input
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string(),
        file_path: input.display().to_string(),
        file_size,
        file_size_human: format_bytes(file_size),
        format: document.format.to_string(),
        page_count: metadata.num_pages,
        paragraph_count: document.paragraphs().map(<[_]>::len),
        char_count: metadata.num_characters,
        title: metadata.title.clone(),
        author: metadata.author.clone(),
        subject: metadata.subject.clone(),
        created: metadata.created.map(|d| d.to_rfc3339()),
        modified: metadata.modified.map(|d| d.to_rfc3339()),
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        print_info_text(&info);
        if verbosity.is_verbose() {
            println!(
                "  {:<16} {:.2?}",
                "Parse time:".bright_black(),
                result.latency
            );
        }
    }

    Ok(())
}

fn print_info_text(info: &DocumentInfo) {
    println!();
    println!(
        "{}  {}",
        "Document:".cyan().bold(),
        info.file_name.bright_white()
    );
    println!("{}", "─".repeat(50).bright_black());

    println!("  {:<16} {}", "Path:".bright_black(), info.file_path);
    println!(
        "  {:<16} {} ({})",
        "Size:".bright_black(),
        info.file_size_human,
        format!("{} bytes", info.file_size).bright_black()
    );
    println!("  {:<16} {}", "Format:".bright_black(), info.format.cyan());

    if let Some(pages) = info.page_count {
        println!(
            "  {:<16} {}",
            "Pages:".bright_black(),
            pages.to_string().yellow()
        );
    }
    if let Some(paragraphs) = info.paragraph_count {
        println!(
            "  {:<16} {}",
            "Paragraphs:".bright_black(),
            paragraphs.to_string().yellow()
        );
    }
    println!(
        "  {:<16} {}",
        "Characters:".bright_black(),
        info.char_count.to_string().yellow()
    );

    for (label, value) in [
        ("Title:", &info.title),
        ("Author:", &info.author),
        ("Subject:", &info.subject),
        ("Created:", &info.created),
        ("Modified:", &info.modified),
    ] {
        if let Some(value) = value {
            println!("  {:<16} {}", label.bright_black(), value);
        }
    }
    println!();
}

fn config_command(action: ConfigAction, verbosity: Verbosity) -> Result<()> {
    match action {
        ConfigAction::Show { json } => config_show(json),
        ConfigAction::Init { global, force } => config_init(global, force, verbosity),
        ConfigAction::Path => config_path(),
    }
}

fn config_show(json_output: bool) -> Result<()> {
    let (user_config, project_config) = Config::discover_configs();
    let merged = Config::merge(user_config, project_config);

    if json_output {
        let json = serde_json::to_string_pretty(&merged)?;
        println!("{json}");
    } else {
        let toml = toml::to_string_pretty(&merged)?;
        println!("{toml}");
    }

    Ok(())
}

/// Create a new configuration file with commented defaults
fn config_init(global: bool, force: bool, verbosity: Verbosity) -> Result<()> {
    let config_path = if global {
        Config::user_config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?
    } else {
        Config::project_config_path()
    };

    if config_path.exists() && !force {
        eprintln!(
            "{} Configuration file already exists: {}",
            "Error:".red().bold(),
            config_path.display()
        );
        eprintln!("{} Use --force to overwrite", "Hint:".cyan().bold());
        std::process::exit(1);
    }

    fs::write(&config_path, CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

    if verbosity.should_show_output() {
        println!(
            "{} Created configuration file: {}",
            "Success:".green().bold(),
            config_path.display()
        );
    }

    Ok(())
}

fn config_path() -> Result<()> {
    println!("{}", "Configuration file paths:".bold());
    println!();

    let mut paths = Vec::new();
    if let Some(user) = Config::user_config_path() {
        paths.push(("User:", user));
    }
    paths.push(("Project:", Config::project_config_path()));

    for (label, path) in paths {
        let status = if path.exists() {
            "exists".green()
        } else {
            "not found".yellow()
        };
        println!("  {:<9} {} ({})", label.bright_black(), path.display(), status);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(true, false), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
        assert!(!Verbosity::Quiet.should_show_output());
        assert!(Verbosity::Verbose.is_verbose());
        assert_eq!(Verbosity::Normal.log_filter(), "warn");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 bytes");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn test_parse_config_format() {
        assert_eq!(parse_config_format("JSON"), Some(OutputFormat::Json));
        assert_eq!(parse_config_format("text"), Some(OutputFormat::Text));
        assert_eq!(parse_config_format("yaml"), None);
    }

    #[test]
    fn test_docx_defaults() {
        let args = Args::try_parse_from(["doctext", "docx"]).unwrap();
        match args.command {
            Commands::Docx { input, limit, all } => {
                assert!(input.is_none());
                assert!(limit.is_none());
                assert!(!all);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_docx_all_conflicts_with_limit() {
        assert!(Args::try_parse_from(["doctext", "docx", "--all", "--limit", "5"]).is_err());
    }

    #[test]
    fn test_pdf_stdout_conflicts_with_output() {
        assert!(Args::try_parse_from(["doctext", "pdf", "--stdout", "-o", "x.txt"]).is_err());
    }

    #[test]
    fn test_extract_input_format() {
        let args =
            Args::try_parse_from(["doctext", "extract", "upload.bin", "--input-format", "docx"])
                .unwrap();
        match args.command {
            Commands::Extract { input_format, .. } => {
                assert_eq!(input_format, Some(InputFormat::Docx));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_resolve_path_collapses_parent_components() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("form.docx"), b"x").unwrap();
        let root = fs::canonicalize(dir.path()).unwrap();

        let existing = resolve_path(&dir.path().join("sub").join("..").join("form.docx")).unwrap();
        assert_eq!(existing, root.join("form.docx"));

        let missing = resolve_path(&dir.path().join("sub").join("..").join("absent.docx")).unwrap();
        assert_eq!(missing, root.join("absent.docx"));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Args::try_parse_from(["doctext", "-q", "-v", "config", "path"]).is_err());
    }
}
