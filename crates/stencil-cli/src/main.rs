use clap::{Parser, Subcommand};
use log::{error, info, LevelFilter};
use std::path::Path;
use std::process::ExitCode;

use stencil_lexer::template::{tokenize, unescape_content};
use stencil_lexer::TemplateKind;
use stencil_parser::{Outline, ParseFailure};

#[derive(Parser)]
#[command(name = "stencil")]
#[command(about = "Stencil placeholder template checker")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check template files for syntax errors
    Check {
        /// Template files
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Print the token stream of a template file
    Tokens {
        /// Template file
        path: String,

        /// Show content with `\\` escapes resolved
        #[arg(long)]
        unescape: bool,
    },

    /// List the placeholder and tag keys used by a template file
    Keys {
        /// Template file
        path: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ok = match cli.command {
        Command::Check { paths } => cmd_check(&paths),
        Command::Tokens { path, unescape } => cmd_tokens(&path, unescape),
        Command::Keys { path } => cmd_keys(&path),
    };

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    // RUST_LOG, when set, overrides the flag.
    builder.parse_default_env();
    builder.init();
}

fn read_source(path: &str) -> Option<String> {
    let p = Path::new(path);
    if !p.exists() {
        eprintln!("Error: file not found: {path}");
        return None;
    }
    match std::fs::read_to_string(p) {
        Ok(source) => Some(source),
        Err(e) => {
            eprintln!("Error reading {path}: {e}");
            None
        }
    }
}

fn parse_file(path: &str) -> Option<Vec<stencil_lexer::TemplateToken>> {
    let source = read_source(path)?;

    match stencil_parser::parse(&source) {
        Ok(tokens) => Some(tokens),
        Err(errors) => {
            error!("{path}: {} syntax error(s)", errors.len());
            eprintln!("{path}:\n{}", ParseFailure::from(errors));
            None
        }
    }
}

fn cmd_check(paths: &[String]) -> bool {
    let mut all_ok = true;

    for path in paths {
        match parse_file(path) {
            Some(tokens) => {
                info!("{path}: {} token(s)", tokens.len());
                eprintln!("OK: {path}");
            }
            None => all_ok = false,
        }
    }

    all_ok
}

fn cmd_tokens(path: &str, unescape: bool) -> bool {
    let Some(source) = read_source(path) else {
        return false;
    };

    for mut token in tokenize(&source) {
        if unescape && token.kind == TemplateKind::Content {
            token.text = unescape_content(&token.text);
        }
        println!("{token}");
    }

    true
}

fn cmd_keys(path: &str) -> bool {
    let Some(tokens) = parse_file(path) else {
        return false;
    };

    let outline = Outline::from_tokens(&tokens);
    for key in &outline.placeholders {
        println!("placeholder {key}");
    }
    for key in &outline.tags {
        println!("tag {key}");
    }
    info!("{path}: tag nesting depth {}", outline.max_depth);

    true
}
