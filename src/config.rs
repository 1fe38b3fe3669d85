use std::{env, path::PathBuf};

use tracing::debug;

use crate::error::{Error, Result};

/// Upper bound on rows held in memory by the chunked loader.
pub const DEFAULT_CHUNK_ROWS: usize = 1_000_000;

/// Overrides [`DEFAULT_CHUNK_ROWS`] when set to a positive integer.
pub const CHUNK_ROWS_ENV: &str = "TABLEFEED_CHUNK_ROWS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Delimited file to stream.
    pub path: PathBuf,
    /// Explicit field delimiter; sniffed from the file when `None`.
    pub separator: Option<u8>,
    /// Maximum rows per chunk (chunked loader only).
    pub chunk_rows: usize,
}

impl Config {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            separator: None,
            chunk_rows: DEFAULT_CHUNK_ROWS,
        }
    }

    pub fn with_separator(mut self, separator: u8) -> Self {
        self.separator = Some(separator);
        self
    }

    pub fn with_chunk_rows(mut self, chunk_rows: usize) -> Self {
        self.chunk_rows = chunk_rows;
        self
    }
}

/// What the process was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Too few arguments: print this line to stdout and exit successfully.
    Usage(String),
    Run(Config),
}

impl Invocation {
    /// Reads the process arguments plus the chunk size override from the environment.
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        Self::parse(args, env::var(CHUNK_ROWS_ENV).ok())
    }

    pub fn parse<I>(args: I, chunk_rows_var: Option<String>) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let program = args.next().unwrap_or_else(|| "tablefeed".to_string());

        let Some(path) = args.next() else {
            return Ok(Self::Usage(format!(
                "Usage: {} <filename.csv> [<separator>]",
                program
            )));
        };

        let mut config = Config::new(path);
        if let Some(raw) = args.next() {
            config.separator = Some(parse_separator(&raw)?);
        }
        let extra: Vec<String> = args.collect();
        if !extra.is_empty() {
            debug!(?extra, "ignoring extra arguments");
        }

        if let Some(raw) = chunk_rows_var {
            config.chunk_rows = parse_chunk_rows(&raw)?;
        }

        Ok(Self::Run(config))
    }
}

/// Single bytes pass through verbatim; the two-character `\t` escape means tab.
fn parse_separator(raw: &str) -> Result<u8> {
    match raw.as_bytes() {
        [b] => Ok(*b),
        b"\\t" => Ok(b'\t'),
        _ => Err(Error::Config(format!(
            "only single-byte separators are accepted (or \\t for tab), got {:?}",
            raw
        ))),
    }
}

fn parse_chunk_rows(raw: &str) -> Result<usize> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(Error::Config(format!(
            "{} must be a positive integer, got {:?}",
            CHUNK_ROWS_ENV, raw
        ))),
    }
}
