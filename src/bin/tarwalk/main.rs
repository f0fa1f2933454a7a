mod config;
mod error;
mod logger;

use self::config::*;
use self::error::*;
use self::logger::*;

use std::io::BufRead;
use std::io::BufReader;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use regex::Regex;
use tarwalk::Walker;

/// Find text inside files of directories and tarballs.
#[derive(Parser)]
struct Args {
    /// Configuration file.
    #[arg(short = 'c', long = "config", env = "TARWALK_CONFIG")]
    config: Option<PathBuf>,
    /// Search only in files which names match this regular expression.
    #[arg(short = 'p', long = "pattern", value_name = "REGEX")]
    pattern: Option<String>,
    /// Do not descend into tarballs inside tarballs.
    #[arg(long = "no-recurse")]
    no_recurse: bool,
    /// Recognize tarballs and compressed files by their contents.
    #[arg(long = "probe")]
    probe: bool,
    /// Be verbose. Repeat for more output.
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
    /// Text to search for.
    #[clap(value_name = "TEXT")]
    text: String,
    /// Directories, files or `-` for the standard input.
    #[clap(
        trailing_var_arg = true,
        allow_hyphen_values = true,
        required = true,
        value_name = "PATH"
    )]
    paths: Vec<PathBuf>,
}

fn main() -> ExitCode {
    match do_main() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(2)
        }
    }
}

fn do_main() -> Result<ExitCode, Error> {
    let args = Args::parse();
    Logger::init(verbosity_to_level(args.verbose))?;
    let config = match args.config.as_ref() {
        Some(path) => Config::open(path)?,
        None => Config::default(),
    };
    let pattern = args
        .pattern
        .as_deref()
        .or(config.pattern.as_deref())
        .unwrap_or(DEFAULT_PATTERN);
    let pattern = Regex::new(pattern)?;
    let recurse = !args.no_recurse && config.recurse.unwrap_or(true);
    let probe = args.probe || config.probe.unwrap_or(false);
    let text = args.text.as_bytes();
    let mut num_found = 0_usize;
    let mut walker = Walker::builder(|reader, path, archive, _info, _: &()| {
        if contains(reader, text) {
            if archive.is_empty() {
                println!("Found in: {path}");
            } else {
                println!("Found in: {archive}:{path}");
            }
            num_found += 1;
        }
        Ok(())
    })
    .name_matcher(|name| pattern.is_match(name).then_some(()))
    .enable(recurse)
    .probe(probe)
    .build()?;
    for path in args.paths.iter() {
        if path.as_os_str() == "-" {
            let stats = walker.handle_stream(std::io::stdin().lock(), "-")?;
            log::info!("Standard input: {:?}", stats);
            continue;
        }
        match walker.handle_path(path)? {
            Some(stats) => log::info!("{}: {:?}", path.display(), stats),
            None => log::warn!("{} does not exist", path.display()),
        }
    }
    drop(walker);
    Ok(if num_found != 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Reads line by line until the first line containing `text`.
///
/// Read errors count as no match.
fn contains(reader: &mut dyn Read, text: &[u8]) -> bool {
    if text.is_empty() {
        return true;
    }
    let mut reader = BufReader::new(reader);
    let mut line = Vec::new();
    loop {
        line.clear();
        match reader.read_until(b'\n', &mut line) {
            Ok(0) => return false,
            Ok(_) => {
                if line.windows(text.len()).any(|window| window == text) {
                    return true;
                }
            }
            Err(e) => {
                log::debug!("Read error: {e}");
                return false;
            }
        }
    }
}
