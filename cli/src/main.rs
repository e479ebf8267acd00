//! pdfsense CLI - PDF outline extraction and persona-driven section ranking

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfsense::render::write_json;
use pdfsense::{
    discover_pdfs, extract_outline, file_stem, AnalysisOptions, AnalysisRequest, Analyzer,
    DirectoryStore, Embedder, Error, HashingEmbedder, JsonFormat,
};

#[derive(Parser)]
#[command(name = "pdfsense")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Recover outlines and persona-relevant sections from PDFs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the title and H1-H3 outline of every PDF in a directory
    Outline {
        /// Directory containing PDF files
        #[arg(value_name = "INPUT_DIR")]
        input: PathBuf,

        /// Directory for the per-document JSON outlines
        #[arg(value_name = "OUTPUT_DIR")]
        output: PathBuf,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Rank the sections of a document set for a persona and task
    Analyze {
        /// Directory containing challenge1b_input.json and the PDFs it names
        #[arg(long, value_name = "DIR")]
        input_dir: PathBuf,

        /// Directory for the report
        #[arg(long, value_name = "DIR")]
        output_dir: PathBuf,

        /// Documents extracted concurrently
        #[arg(long, env = "PDFSENSE_WORKERS", default_value_t = 4)]
        workers: usize,

        /// Number of sections to select
        #[arg(long, default_value_t = 5)]
        top_sections: usize,

        /// Number of sentences kept per section
        #[arg(long, default_value_t = 3)]
        top_sentences: usize,

        /// Embedding backend used to score sections and sentences
        #[arg(long, value_enum, env = "PDFSENSE_EMBEDDER", default_value_t)]
        embedder: EmbedderKind,

        /// Local directory with config.json, tokenizer.json and model.safetensors
        #[arg(long, value_name = "DIR", env = "PDFSENSE_MODEL_DIR")]
        model_dir: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show version information
    Version,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum EmbedderKind {
    /// all-MiniLM-L6-v2 sentence model
    Minilm,
    /// Offline feature hashing (lexical overlap only)
    Hashing,
}

impl Default for EmbedderKind {
    #[cfg(feature = "minilm")]
    fn default() -> Self {
        EmbedderKind::Minilm
    }

    #[cfg(not(feature = "minilm"))]
    fn default() -> Self {
        EmbedderKind::Hashing
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Outline {
            input,
            output,
            compact,
        } => cmd_outline(&input, &output, json_format(compact)),
        Commands::Analyze {
            input_dir,
            output_dir,
            workers,
            top_sections,
            top_sentences,
            embedder,
            model_dir,
            compact,
        } => {
            let options = AnalysisOptions::new()
                .with_workers(workers)
                .with_top_sections(top_sections)
                .with_top_sentences(top_sentences);
            load_embedder(embedder, model_dir.as_deref()).and_then(|embedder| {
                cmd_analyze(
                    &input_dir,
                    &output_dir,
                    embedder.as_ref(),
                    options,
                    json_format(compact),
                )
            })
        }
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb
}

fn cmd_outline(
    input: &Path,
    output: &Path,
    format: JsonFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let written = write_outlines(input, output, format)?;

    if written.is_empty() {
        println!("{}", "No PDFs found".yellow());
        return Ok(());
    }

    println!("\n{}", "Output files:".green().bold());
    for (i, path) in written.iter().enumerate() {
        let branch = if i + 1 == written.len() { "└─" } else { "├─" };
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        println!("  {} {}", branch.dimmed(), name);
    }

    Ok(())
}

/// Write `<stem>.json` for every PDF in `input`, returning the written paths.
fn write_outlines(
    input: &Path,
    output: &Path,
    format: JsonFormat,
) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let pdfs = discover_pdfs(input)?;
    if pdfs.is_empty() {
        return Ok(Vec::new());
    }

    fs::create_dir_all(output)?;

    let pb = progress_bar(pdfs.len());
    let mut written = Vec::with_capacity(pdfs.len());
    for pdf in &pdfs {
        let stem = file_stem(pdf);
        pb.set_message(stem.clone());

        let outline = extract_outline(pdf);
        log::debug!("{}: {} headings", stem, outline.len());

        let path = output.join(format!("{}.json", stem));
        write_json(&path, &outline, format)?;
        written.push(path);
        pb.inc(1);
    }
    pb.finish_with_message("Done!");

    Ok(written)
}

fn load_embedder(
    kind: EmbedderKind,
    model_dir: Option<&Path>,
) -> Result<Box<dyn Embedder>, Box<dyn std::error::Error>> {
    match kind {
        EmbedderKind::Hashing => Ok(Box::new(HashingEmbedder::new())),
        EmbedderKind::Minilm => load_minilm(model_dir),
    }
}

#[cfg(feature = "minilm")]
fn load_minilm(
    model_dir: Option<&Path>,
) -> Result<Box<dyn Embedder>, Box<dyn std::error::Error>> {
    use pdfsense::MiniLmEmbedder;

    println!("{}", "Loading sentence model...".dimmed());
    let embedder = match model_dir {
        Some(dir) => MiniLmEmbedder::from_dir(dir)?,
        None => MiniLmEmbedder::new()?,
    };
    Ok(Box::new(embedder))
}

#[cfg(not(feature = "minilm"))]
fn load_minilm(
    _model_dir: Option<&Path>,
) -> Result<Box<dyn Embedder>, Box<dyn std::error::Error>> {
    Err("pdfsense was built without the `minilm` feature; use --embedder hashing".into())
}

fn cmd_analyze(
    input_dir: &Path,
    output_dir: &Path,
    embedder: &dyn Embedder,
    options: AnalysisOptions,
    format: JsonFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let request = AnalysisRequest::from_dir(input_dir)?;
    let store = DirectoryStore::new(input_dir);

    let pb = progress_bar(request.documents.len());
    pb.set_message("Extracting sections...");
    let result = Analyzer::new(embedder)
        .with_options(options)
        .run_with_progress(&request, &store, |doc| {
            pb.set_message(doc.document.clone());
            pb.inc(1);
        });
    pb.finish_and_clear();

    let report = match result {
        Ok(report) => report,
        Err(Error::NoHeadings) => {
            println!("{}", "No headings found".yellow());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    fs::create_dir_all(output_dir)?;
    let name = request.output_file_name();
    write_json(output_dir.join(&name), &report, format)?;

    println!("{} {}", "Wrote".green(), name);
    for section in &report.extracted_sections {
        println!(
            "  {} {} {} (p. {})",
            format!("{}.", section.importance_rank).dimmed(),
            section.section_title.bold(),
            format!("[{}]", section.document).dimmed(),
            section.page_number
        );
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfsense".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF outline extraction and persona-driven section ranking");
    println!();
    println!("License: MIT");
}
