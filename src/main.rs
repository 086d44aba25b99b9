//! luadoc — build a codex from LuaDoc-annotated Lua API mockups.
//!
//! Supports two modes:
//!
//! - **stdin mode**: `luadoc < Unit.lua`
//! - **file mode**: `luadoc -o dist/Lua api-mockup/` writes `dist/Lua/Codex.json`

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use luadoc::codex::{Codex, Supplement};
use luadoc::model::Document;
use luadoc::parser::{self, matcher::ReturnShape};
use luadoc::render;
use luadoc::ParseOptions;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Base name of the written codex file.
const CODEX_FILE: &str = "Codex";

#[derive(Parser)]
#[command(
    name = "luadoc",
    about = "Generate a JSON codex from LuaDoc-annotated Lua sources"
)]
struct Cli {
    /// Input files, directories or glob patterns. If omitted, reads from stdin.
    files: Vec<String>,

    /// Output directory (required when files are given)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format: json (default), markdown
    #[arg(short = 'f', long, default_value = "json")]
    format: String,

    /// Supplement JSON merged over the parsed classes
    #[arg(long)]
    globals: Option<PathBuf>,

    /// Leave out the built-in globals table
    #[arg(long)]
    no_globals: bool,

    /// How @return tags are split
    #[arg(long, value_enum, default_value_t = Returns::Named)]
    returns: Returns,

    /// Skip the @param vs. argument cross-check
    #[arg(long)]
    no_validate: bool,

    /// More output (-v info, -vv debug)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only report errors
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    quiet: bool,
}

/// CLI spelling of [`ReturnShape`].
#[derive(Clone, Copy, clap::ValueEnum)]
enum Returns {
    /// `type name description...`
    Named,
    /// `type description...`
    Folded,
}

impl From<Returns> for ReturnShape {
    fn from(returns: Returns) -> Self {
        match returns {
            Returns::Named => ReturnShape::Named,
            Returns::Folded => ReturnShape::Folded,
        }
    }
}

impl Cli {
    fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            return_shape: self.returns.into(),
            validate_signatures: !self.no_validate,
        }
    }

    fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .format_timestamp(None)
        .format_target(false)
        .parse_default_env()
        .init();

    if cli.files.is_empty() {
        return stdin_mode(&cli);
    }

    file_mode(&cli)
}

/// stdin mode: read from stdin, parse as Lua, write the codex to stdout.
fn stdin_mode(cli: &Cli) -> Result<()> {
    let mut bytes = Vec::new();
    io::stdin()
        .read_to_end(&mut bytes)
        .context("failed to read stdin")?;
    let input = String::from_utf8_lossy(&bytes);

    let doc = luadoc::parse_with(&input, &cli.parse_options());
    let codex = Codex::build(doc, load_supplement(cli)?);
    let renderer = render::create_renderer(&cli.format)?;
    print!("{}", renderer.render(&codex)?);
    Ok(())
}

/// file mode: parse every input file, merge, write one codex file.
fn file_mode(cli: &Cli) -> Result<()> {
    let output_dir = cli
        .output
        .as_deref()
        .context("--output is required when files are given")?;

    // Fail on a bad format before doing any work
    let renderer = render::create_renderer(&cli.format)?;
    let supplement = load_supplement(cli)?;
    let options = cli.parse_options();

    let input_files = expand_globs(&cli.files)?;

    let mut parsed: Vec<(String, Document)> = Vec::new();
    for path in &input_files {
        log::info!("Processing file: {}", path.display());
        // Mockups may carry Latin-1 bytes in headers; decode lossily.
        let content = match fs::read(path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                log::warn!("skipping {}: {}", path.display(), e);
                continue;
            }
        };
        match parser::parse_file(path, &content, &options) {
            Ok(doc) => parsed.push((path.to_string_lossy().to_string(), doc)),
            Err(e) => log::warn!("skipping {}: {}", path.display(), e),
        }
    }

    let merged = parser::merge::merge(parsed);
    if !merged.advisories.is_empty() {
        log::info!(
            "{} function(s) with undocumented or undeclared parameters",
            merged.advisories.len()
        );
    }
    let codex = Codex::build(merged, supplement);

    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory: {}", output_dir.display()))?;
    let out_path = output_dir.join(format!("{}.{}", CODEX_FILE, renderer.file_extension()));

    log::info!("Writing codex file: {}", out_path.display());
    fs::write(&out_path, renderer.render(&codex)?)
        .with_context(|| format!("failed to write {}", out_path.display()))?;

    Ok(())
}

/// Built-in globals (unless disabled) overlaid with the --globals file.
fn load_supplement(cli: &Cli) -> Result<Supplement> {
    let mut supplement = if cli.no_globals {
        Supplement::default()
    } else {
        Supplement::builtin()
    };

    if let Some(ref path) = cli.globals {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read globals file: {}", path.display()))?;
        let user = Supplement::from_json(&text)
            .with_context(|| format!("failed to load {}", path.display()))?;
        supplement.extend(user);
    }

    Ok(supplement)
}

/// Expand glob patterns into a list of real file paths.
/// Bare directories are scanned (non-recursively) for `.lua` files.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                if p.is_file() && parser::is_lua_file(&p) {
                    files.push(p);
                }
            }
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            log::warn!("no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    // Sort for deterministic merge order
    files.sort();
    files.dedup();
    Ok(files)
}
