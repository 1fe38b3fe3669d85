use std::{
    fmt::Display,
    io::{BufRead, Write},
};
use tracing::{debug, trace};

use crate::{
    error::{Error, Result},
    load::{Cells, Chunk},
};

/// Printed once after the last chunk.
pub const END_SENTINEL: i64 = -1;

/// Lock-step producer side of the protocol: one value per line out, one
/// discarded line in per acknowledgment.
pub struct Handshake<R, W> {
    input: R,
    output: W,
    line: Vec<u8>,
}

impl<R: BufRead, W: Write> Handshake<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            line: Vec::new(),
        }
    }

    /// Write `value` on its own line and flush before anyone waits on it.
    pub fn emit<T: Display>(&mut self, value: T) -> Result<()> {
        writeln!(self.output, "{}", value)?;
        self.output.flush()?;
        Ok(())
    }

    /// Block until the consumer sends a line. Its content is ignored.
    pub fn ack(&mut self) -> Result<()> {
        self.line.clear();
        if self.input.read_until(b'\n', &mut self.line)? == 0 {
            return Err(Error::ConsumerClosed);
        }
        trace!("ack");
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EmitStats {
    pub rows: usize,
    /// Always 0 for a whole table.
    pub chunks: usize,
    /// Cell values written, excluding counts and column names.
    pub values: usize,
}

/// Stream a whole table: dimensions, column names, then cells row-major.
pub fn emit_table<R, W, T>(
    hs: &mut Handshake<R, W>,
    table: &T,
    columns: &[String],
) -> Result<EmitStats>
where
    R: BufRead,
    W: Write,
    T: Cells,
{
    hs.ack()?;
    hs.emit(table.row_count())?;
    hs.emit(table.column_count())?;
    hs.ack()?;

    for name in columns {
        hs.emit(name)?;
        hs.ack()?;
    }

    let mut stats = EmitStats {
        rows: table.row_count(),
        ..EmitStats::default()
    };
    for row in 0..table.row_count() {
        for col in 0..table.column_count() {
            hs.emit(table.cell(row, col))?;
            hs.ack()?;
            stats.values += 1;
        }
    }
    Ok(stats)
}

/// Stream a chunk sequence: header once, then each chunk prefixed by its row
/// count, then [`END_SENTINEL`]. The header is sent even when there are no
/// chunks at all.
pub fn emit_chunks<R, W, I>(
    hs: &mut Handshake<R, W>,
    columns: &[String],
    chunks: I,
) -> Result<EmitStats>
where
    R: BufRead,
    W: Write,
    I: IntoIterator<Item = Result<Chunk>>,
{
    hs.ack()?;
    hs.emit(columns.len())?;
    for name in columns {
        hs.ack()?;
        hs.emit(name)?;
    }

    let mut stats = EmitStats::default();
    for chunk in chunks {
        let chunk = chunk?;
        emit_chunk_rows(hs, &chunk, &mut stats)?;
        debug!(chunk = stats.chunks, rows = chunk.row_count(), "emitted chunk");
        stats.chunks += 1;
    }

    hs.ack()?;
    hs.emit(END_SENTINEL)?;
    Ok(stats)
}

fn emit_chunk_rows<R, W, T>(
    hs: &mut Handshake<R, W>,
    chunk: &T,
    stats: &mut EmitStats,
) -> Result<()>
where
    R: BufRead,
    W: Write,
    T: Cells,
{
    hs.ack()?;
    hs.emit(chunk.row_count())?;
    for row in 0..chunk.row_count() {
        for col in 0..chunk.column_count() {
            hs.ack()?;
            hs.emit(chunk.cell(row, col))?;
            stats.values += 1;
        }
    }
    stats.rows += chunk.row_count();
    Ok(())
}
