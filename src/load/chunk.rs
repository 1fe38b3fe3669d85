// src/load/chunk.rs

use arrow::array::{Array, StringArray};
use arrow::csv::{Reader, ReaderBuilder};
use arrow::datatypes::{DataType, Field, Schema as ArrowSchema};
use arrow::record_batch::RecordBatch;
use std::fs::File;
use std::sync::Arc;
use tracing::{debug, warn};

use super::{csv_reader, open, read_columns, resolve_delimiter, Cells};
use crate::{
    config::Config,
    error::{Error, Result},
};

/// A contiguous run of at most `chunk_rows` data rows.
#[derive(Debug, Clone)]
pub struct Chunk {
    rows: usize,
    columns: Vec<StringArray>,
}

impl Cells for Chunk {
    fn row_count(&self) -> usize {
        self.rows
    }

    fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn cell(&self, row: usize, col: usize) -> &str {
        let array = &self.columns[col];
        // arrow reads empty fields as null
        if array.is_null(row) {
            ""
        } else {
            array.value(row)
        }
    }
}

impl TryFrom<RecordBatch> for Chunk {
    type Error = Error;

    fn try_from(batch: RecordBatch) -> Result<Self> {
        let columns = batch
            .columns()
            .iter()
            .map(|col| {
                col.as_any()
                    .downcast_ref::<StringArray>()
                    .cloned()
                    .ok_or_else(|| {
                        Error::Invariant(format!("expected Utf8 column, got {}", col.data_type()))
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            rows: batch.num_rows(),
            columns,
        })
    }
}

/// Every column is read as nullable Utf8 so no value is reinterpreted.
fn make_read_schema(columns: &[String]) -> Arc<ArrowSchema> {
    let fields: Vec<Field> = columns
        .iter()
        .map(|name| Field::new(name, DataType::Utf8, true))
        .collect();
    Arc::new(ArrowSchema::new(fields))
}

/// Lazily splits a delimited file into [`Chunk`]s of at most `chunk_rows`
/// rows. Only the chunk being consumed is held in memory.
pub struct ChunkReader {
    columns: Vec<String>,
    batches: Reader<File>,
    chunk_index: usize,
}

impl ChunkReader {
    #[tracing::instrument(level = "debug", skip(config), fields(path = %config.path.display()))]
    pub fn open(config: &Config) -> Result<Self> {
        if config.chunk_rows == 0 {
            return Err(Error::Config("chunk size must be positive".into()));
        }
        let delimiter = resolve_delimiter(config)?;

        // header via the csv crate so names match the whole-table loader
        let columns = {
            let mut rdr = csv_reader(open(&config.path)?, delimiter);
            read_columns(&mut rdr, &config.path)?
        };
        debug!(columns = columns.len(), chunk_rows = config.chunk_rows, "read header");

        let batches = ReaderBuilder::new(make_read_schema(&columns))
            .with_header(true)
            .with_delimiter(delimiter)
            .with_batch_size(config.chunk_rows)
            .build(open(&config.path)?)?;

        Ok(Self {
            columns,
            batches,
            chunk_index: 0,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

impl Iterator for ChunkReader {
    type Item = Result<Chunk>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.batches.next()? {
                Ok(batch) if batch.num_rows() == 0 => continue,
                Ok(batch) => {
                    debug!(chunk = self.chunk_index, rows = batch.num_rows(), "read chunk");
                    self.chunk_index += 1;
                    return Some(Chunk::try_from(batch));
                }
                Err(e) => {
                    warn!(chunk = self.chunk_index, "chunk parse failed");
                    return Some(Err(e.into()));
                }
            }
        }
    }
}
