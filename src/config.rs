use crate::board::Board;
use crate::error::Result;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

pub const DEFAULT_LOG_FILE: &str = "logs/sparsechess.log";
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Command line of the `sparsechess` binary.
#[derive(Debug, Parser)]
#[command(
    name = "sparsechess",
    version,
    about = "Two-player chess on stdin/stdout, or a perft count with --perft"
)]
pub struct Cli {
    /// Count move paths to this depth from the start position and exit
    #[arg(long, value_name = "DEPTH")]
    pub perft: Option<u32>,

    /// Start from "<placement> <w|b>" instead of the standard position
    #[arg(long = "fen", value_name = "LAYOUT", value_parser = parse_layout)]
    pub start: Option<Board>,

    /// Log file
    #[arg(long, value_name = "PATH", env = "SPARSECHESS_LOG_FILE", default_value = DEFAULT_LOG_FILE)]
    pub log: PathBuf,

    /// tracing filter; RUST_LOG takes precedence
    #[arg(long, value_name = "FILTER", env = "SPARSECHESS_LOG", default_value = DEFAULT_LOG_FILTER)]
    pub log_filter: String,
}

fn parse_layout(text: &str) -> Result<Board> {
    text.parse()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Play,
    Perft(u32),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    pub start: Board,
    pub log_file: PathBuf,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            mode: Mode::Play,
            start: Board::new(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            mode: cli.perft.map_or(Mode::Play, Mode::Perft),
            start: cli.start.unwrap_or_default(),
            log_file: cli.log,
            log_filter: cli.log_filter,
        }
    }
}

impl Config {
    /// Read the process arguments and environment. Prints help or a usage
    /// error and exits (status 2 on bad arguments) when parsing stops.
    pub fn from_env() -> Self {
        Cli::parse().into()
    }

    /// Like [`Config::from_env`] over explicit arguments, program name first.
    pub fn try_parse_from<I, T>(args: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Cli::try_parse_from(args).map(Config::from)
    }
}
