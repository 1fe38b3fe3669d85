// src/load/mod.rs
pub mod chunk;
pub mod header;
pub mod sniff;
pub mod table;

use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};
use tracing::debug;

use crate::{
    config::Config,
    error::{Error, Result},
};

pub use chunk::{Chunk, ChunkReader};
pub use table::{read_table, Table};

/// Row-major grid of text cells, shared by whole tables and chunks.
pub trait Cells {
    fn row_count(&self) -> usize;
    fn column_count(&self) -> usize;
    /// Cell text; empty fields are `""`, never a missing marker.
    fn cell(&self, row: usize, col: usize) -> &str;
}

pub(crate) fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })
}

/// The explicit separator if one was given, else a sniffed one.
pub(crate) fn resolve_delimiter(config: &Config) -> Result<u8> {
    if let Some(sep) = config.separator {
        return Ok(sep);
    }
    let file = open(&config.path)?;
    let delim = sniff::sniff_delimiter(BufReader::new(file))
        .map_err(|source| Error::Open {
            path: config.path.clone(),
            source,
        })?
        .ok_or_else(|| Error::Empty {
            path: config.path.clone(),
        })?;
    debug!(delimiter = %(delim as char).escape_default(), "sniffed delimiter");
    Ok(delim)
}

/// Reads the header record with the `csv` crate and normalizes the names.
pub(crate) fn read_columns<R: Read>(
    rdr: &mut csv::Reader<R>,
    path: &Path,
) -> Result<Vec<String>> {
    let headers = rdr.headers()?;
    if headers.is_empty() {
        return Err(Error::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(header::normalize_headers(headers.iter()))
}

pub(crate) fn csv_reader(file: File, delimiter: u8) -> csv::Reader<File> {
    csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(false)
        .from_reader(file)
}
