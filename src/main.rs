use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use asmdeps::core::{ReferenceWalker, WalkError};
use asmdeps::formatters::xml::RESULTS_FILE_NAME;
use asmdeps::formatters::{TextTreeFormatter, XmlFormatter};
use asmdeps::loaders::NativeLoader;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "asmdeps",
    version,
    about = "Reports every module a binary module transitively references"
)]
struct Cli {
    /// Path to the target module (prompted for when omitted)
    #[arg(value_name = "TARGET")]
    target: Option<PathBuf>,

    /// Also write the report to Results.xml in the current directory
    #[arg(short = 'o')]
    output: bool,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    run(cli)
}

fn init_logging() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let Cli { target, output } = cli;

    let interactive = target.is_none();
    let target = match target {
        Some(target) => target,
        None => prompt_for_target()?,
    };

    let walker = ReferenceWalker::new(loader_for(&target));

    match walker.walk(&target) {
        Ok(nodes) => {
            if output {
                XmlFormatter::new()
                    .format_to_file(&nodes, Path::new(RESULTS_FILE_NAME))
                    .with_context(|| format!("failed to write {}", RESULTS_FILE_NAME))?;
                info!("Wrote {}", RESULTS_FILE_NAME);
            }
            TextTreeFormatter::new().write_to(&nodes, io::stdout().lock())?;
        }
        Err(WalkError::TargetUnavailable { path, source }) => {
            debug!("Target {} unavailable: {}", path.display(), source);
            println!("Could not load target module.");
        }
    }

    if interactive {
        println!("Press Enter to exit.");
        read_line()?;
    }

    Ok(())
}

/// Native loader that probes the target's own directory first.
fn loader_for(target: &Path) -> NativeLoader {
    let dir = match target.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    NativeLoader::new().with_search_dir(dir)
}

fn prompt_for_target() -> Result<PathBuf> {
    println!("Enter path to target module:");
    let line = read_line()?;
    Ok(PathBuf::from(line.replace(['\r', '\n'], "")))
}

fn read_line() -> Result<String> {
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read from standard input")?;
    Ok(line)
}
