//! CLI argument parsing using clap derive

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

/// MapFixer - Extract scripts dumped to the game log and keep the dispatcher switch current
#[derive(Parser, Debug)]
#[command(name = "mapfix")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Echo extracted content and enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Folder, relative to the install root, holding games_mp.log
    #[arg(
        long,
        value_name = "FOLDER",
        visible_alias = "fs-game-folder-name-log",
        env = "MAPFIX_LOG_FOLDER"
    )]
    pub log_folder: Option<String>,

    /// Folder, relative to the install root, receiving extracted files (repeatable)
    #[arg(
        long = "output",
        value_name = "FOLDER",
        visible_alias = "fs-game-folder-name-outputs"
    )]
    pub outputs: Vec<String>,

    /// TOML file with default settings; command-line values win
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Game install root (default: two levels above the working directory)
    #[arg(long, value_name = "DIR")]
    pub install_root: Option<PathBuf>,

    /// Process the whole log once and exit instead of watching it
    #[arg(long)]
    pub once: bool,
}

/// Rewrite the single-dash arguments older launch scripts pass.
///
/// `-verbose`, `-FSGameFolderNameLog=X` and `-FSGameFolderNameOutputs=X`
/// become `--verbose`, `--log-folder=X` and `--output=X`. Everything else
/// passes through untouched.
pub fn normalize_args<I, S>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    args.into_iter()
        .map(|arg| {
            let arg = arg.into();
            match arg.to_str().and_then(rewrite_legacy) {
                Some(modern) => OsString::from(modern),
                None => arg,
            }
        })
        .collect()
}

fn rewrite_legacy(arg: &str) -> Option<String> {
    if arg == "-verbose" {
        return Some("--verbose".to_string());
    }

    let (name, value) = arg.split_once('=')?;
    let modern = match name {
        "-FSGameFolderNameLog" => "--log-folder",
        "-FSGameFolderNameOutputs" => "--output",
        _ => return None,
    };
    Some(format!("{modern}={value}"))
}
