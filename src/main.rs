use anyhow::{Context, Result};
use std::{env, io, time::Instant};
use tablefeed::{
    config::Invocation,
    emit::{emit_table, Handshake},
    load::read_table,
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

    // load everything before the first line goes out
    let start = Instant::now();
    let table = read_table(&config)
        .with_context(|| format!("loading {}", config.path.display()))?;
    info!(elapsed = ?start.elapsed(), "table ready");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut hs = Handshake::new(stdin.lock(), stdout.lock());
    let stats = emit_table(&mut hs, &table, &table.columns).context("streaming table")?;

    info!(rows = stats.rows, values = stats.values, elapsed = ?start.elapsed(), "all done");
    Ok(())
}
