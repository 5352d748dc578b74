// ABOUTME: CLI for running the deadwood passes over a single page.
// ABOUTME: Reads HTML or hast JSON from a file or stdin, applies the passes, and writes the result.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use deadwood_prune::{
    BuildContext, DestinationSet, Document, PageData, TransformOptions, Transformer,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Remove dead internal links and unwanted sections from a rendered page.
#[derive(Parser, Debug)]
#[command(name = "deadwood")]
#[command(about = "Neutralize dead links and prune sections in a page", long_about = None)]
struct Args {
    /// Page to process. Use "-" to read from stdin.
    input: String,

    /// Input and output are hast JSON instead of HTML
    #[arg(long)]
    hast: bool,

    /// Parse the input as a full HTML document (detected automatically otherwise)
    #[arg(long)]
    document: bool,

    /// JSON page data: {"frontmatter": {...}, "allSlugs": [...]}
    #[arg(long)]
    page: Option<PathBuf>,

    /// Site-wide destination list (JSON array or one per line); overrides allSlugs
    #[arg(long)]
    destinations: Option<PathBuf>,

    /// JSON options: {"deadLinks": {...}, "sections": {...}}
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip the dead-link pass
    #[arg(long)]
    no_links: bool,

    /// Skip the section pass
    #[arg(long)]
    no_sections: bool,

    /// Output file path (default: stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Log pass details to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(io::stderr)
        .init();
}

fn read_input(target: &str) -> Result<String> {
    if target == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        Ok(buf)
    } else {
        fs::read_to_string(target).with_context(|| format!("failed to read {}", target))
    }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Accepts a JSON array or a plain list with one destination per line.
fn parse_destinations(text: &str) -> Result<DestinationSet> {
    let trimmed = text.trim_start();
    if trimmed.starts_with('[') {
        let value: serde_json::Value =
            serde_json::from_str(trimmed).context("destinations file is not valid JSON")?;
        return Ok(DestinationSet::from_value(&value));
    }
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .collect())
}

fn looks_like_document(html: &str) -> bool {
    let head: String = html.trim_start().chars().take(16).collect();
    let head = head.to_ascii_lowercase();
    head.starts_with("<!doctype") || head.starts_with("<html")
}

fn run(args: &Args) -> Result<String> {
    let opts = match &args.config {
        Some(path) => TransformOptions::from_json_str(&read_file(path)?)
            .with_context(|| format!("invalid config {}", path.display()))?,
        None => TransformOptions::default(),
    };

    let page = match &args.page {
        Some(path) => PageData::from_json_str(&read_file(path)?)
            .with_context(|| format!("invalid page data {}", path.display()))?,
        None => PageData::default(),
    };

    let build = match &args.destinations {
        Some(path) => Some(BuildContext::with_destinations(parse_destinations(
            &read_file(path)?,
        )?)),
        None => None,
    };

    let transformer = Transformer::builder()
        .options(opts)
        .dead_links(!args.no_links)
        .sections(!args.no_sections)
        .build()?;

    let input = read_input(&args.input)?;

    if args.hast {
        let mut doc = Document::from_hast_str(&input).context("input is not a hast tree")?;
        transformer.apply(&mut doc, build.as_ref(), &page);
        return Ok(serde_json::to_string_pretty(&doc.to_hast())?);
    }

    let mut doc = if args.document || looks_like_document(&input) {
        debug!("parsing input as a full document");
        Document::parse_document(&input)
    } else {
        Document::parse_fragment(&input)
    };
    transformer.apply(&mut doc, build.as_ref(), &page);
    Ok(doc.to_html())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let output = match run(&args) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("error: {:#}", e);
            return ExitCode::from(1);
        }
    };

    if let Some(path) = &args.output {
        if let Err(e) = fs::write(path, &output) {
            eprintln!("error writing to {:?}: {}", path, e);
            return ExitCode::from(1);
        }
    } else {
        println!("{}", output);
    }

    ExitCode::SUCCESS
}
