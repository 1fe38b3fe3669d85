use anyhow::{Context, Result};
use std::{env, io, time::Instant};
use tablefeed::{
    config::Invocation,
    emit::{emit_chunks, Handshake},
    load::ChunkReader,
};
use tracing::info;

fn main() -> Result<()> {
    tablefeed::init_tracing();

    let config = match Invocation::from_args(env::args())? {
        Invocation::Usage(usage) => {
            println!("{}", usage);
            return Ok(());
        }
        Invocation::Run(config) => config,
    };

    // header and first parser setup fail here, before anything is printed
    let start = Instant::now();
    let reader = ChunkReader::open(&config)
        .with_context(|| format!("opening {}", config.path.display()))?;
    let columns = reader.columns().to_vec();
    info!(columns = columns.len(), chunk_rows = config.chunk_rows, "reader ready");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut hs = Handshake::new(stdin.lock(), stdout.lock());
    let stats = emit_chunks(&mut hs, &columns, reader)
        .with_context(|| format!("streaming {}", config.path.display()))?;

    info!(
        rows = stats.rows,
        chunks = stats.chunks,
        elapsed = ?start.elapsed(),
        "all done"
    );
    Ok(())
}
