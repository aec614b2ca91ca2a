//! Biolink CLI - Parse, validate, and inspect biolink page configurations
//!
//! Usage:
//!   blcli [OPTIONS] <COMMAND> [FILE]
//!
//! Commands:
//!   parse     Parse and display the page structure
//!   validate  Report skipped lines and incomplete links
//!   stats     Show configuration statistics

mod error;

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use biolink_core::{Document, ParseResult, Parser, ParserOptions};
use clap::{Args, Parser as ClapParser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::error::{CliError, Result};

#[derive(ClapParser, Debug)]
#[command(name = "blcli", version, about = "Biolink configuration parser and validator")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Do not treat lines holding only a URL as links
    #[arg(long, global = true)]
    no_bare_urls: bool,

    /// Only accept `## Profile` as the profile header
    #[arg(long, global = true)]
    strict_headers: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse and display the page structure
    Parse(InputArgs),
    /// Report skipped lines and incomplete links; exits 1 on warnings
    Validate(InputArgs),
    /// Show configuration statistics
    Stats(InputArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Configuration file; stdin when omitted or `-`
    file: Option<PathBuf>,

    /// Output in JSON format
    #[arg(short, long)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "biolink_core=warn",
        1 => "biolink_core=debug",
        _ => "biolink_core=trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let options = ParserOptions::default()
        .with_bare_urls(!cli.no_bare_urls)
        .with_profile_alias(!cli.strict_headers);
    let parser = Parser::with_options(options);

    let args = match &cli.command {
        Command::Parse(args) | Command::Validate(args) | Command::Stats(args) => args,
    };
    let input = read_input(args.file.as_deref())?;
    debug!(bytes = input.len(), "read configuration");

    let result = parser.parse_with_diagnostics(&input);

    let outcome = match cli.command {
        Command::Parse(_) => cmd_parse(&result, args.json),
        Command::Validate(_) => cmd_validate(&result, args.json),
        Command::Stats(_) => cmd_stats(&result, &input, args.json),
    };

    outcome.with_context(|| match &args.file {
        Some(path) => format!("while processing {}", path.display()),
        None => "while processing stdin".to_string(),
    })
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => {
            fs::read_to_string(path).map_err(|source| CliError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(CliError::Stdin)?;
            Ok(buffer)
        }
    }
}

// =============================================================================
// Parse Command
// =============================================================================

fn cmd_parse(result: &ParseResult, json: bool) -> Result<()> {
    for warning in result.warnings.iter() {
        eprintln!("warning: {}", warning);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&result.document)?);
    } else {
        print_document_summary(&result.document);
    }

    Ok(())
}

// =============================================================================
// Validate Command
// =============================================================================

fn cmd_validate(result: &ParseResult, json: bool) -> Result<()> {
    if json {
        let warnings: Vec<_> = result.warnings.iter().collect();
        println!(
            "{}",
            serde_json::json!({"valid": result.is_clean(), "warnings": warnings})
        );
    } else if result.is_clean() {
        println!("Valid: no warnings");
    } else {
        eprintln!("Invalid: {} warning(s) found", result.warnings.len());
        for warning in result.warnings.iter() {
            eprintln!("  - [{}] {}", warning.kind.as_str(), warning);
        }
    }

    if result.is_clean() {
        Ok(())
    } else {
        Err(CliError::InvalidConfig(result.warnings.len()))
    }
}

// =============================================================================
// Stats Command
// =============================================================================

#[derive(Debug, Default, serde::Serialize)]
struct DocumentStats {
    profile_fields: usize,
    social_links: usize,
    categories: usize,
    links: usize,
    missing_url: usize,
    missing_icon: usize,
    warnings: usize,
    lines: usize,
}

impl DocumentStats {
    fn from_result(result: &ParseResult, input: &str) -> Self {
        let doc = &result.document;
        let all_links = || {
            doc.social
                .iter()
                .map(|s| &s.link)
                .chain(doc.links().map(|l| &l.link))
        };

        Self {
            profile_fields: doc.profile.len(),
            social_links: doc.social.len(),
            categories: doc.categories.len(),
            links: doc.links().count(),
            missing_url: all_links().filter(|l| !l.has_url()).count(),
            missing_icon: all_links().filter(|l| l.icon.is_empty()).count(),
            warnings: result.warnings.len(),
            lines: input.lines().count(),
        }
    }
}

fn cmd_stats(result: &ParseResult, input: &str, json: bool) -> Result<()> {
    let stats = DocumentStats::from_result(result, input);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Configuration Statistics");
    println!("------------------------");
    println!("Profile fields: {}", stats.profile_fields);
    println!("Social links:   {}", stats.social_links);
    println!("Categories:     {}", stats.categories);
    println!("Links:          {}", stats.links);
    println!();
    println!("Incomplete:");
    println!("  Missing URL:  {}", stats.missing_url);
    println!("  Missing icon: {}", stats.missing_icon);
    println!();
    println!("Lines:          {}", stats.lines);
    println!("Warnings:       {}", stats.warnings);

    Ok(())
}

// =============================================================================
// Text Output
// =============================================================================

fn print_document_summary(doc: &Document) {
    println!("Profile: {} field(s)", doc.profile.len());
    for (key, value) in &doc.profile {
        println!("  {}: {}", key, value);
    }

    println!("Social links: {}", doc.social.len());
    for (i, social) in doc.social.iter().enumerate() {
        println!("  [{}] {}", i + 1, describe_target(&social.link.name, &social.link.url));
    }

    println!("Categories: {}", doc.categories.len());
    for (i, category) in doc.categories.iter().enumerate() {
        println!("  [{}] {} ({} link(s))", i + 1, category.name, category.links.len());
        for item in &category.links {
            println!("      - {}", describe_target(&item.link.name, &item.link.url));
            if !item.description.is_empty() {
                println!("        {}", item.description);
            }
        }
    }
}

fn describe_target(name: &str, url: &str) -> String {
    if url.is_empty() {
        format!("{} (no URL)", name)
    } else {
        format!("{} -> {}", name, url)
    }
}
