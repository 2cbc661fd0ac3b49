use std::path::Path;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use medea_compile::compile_symbols;
use medea_io::{load_raw_tables, write_symbols};
use medea_scenarios::load_config_from_path;
use rayon::ThreadPoolBuilder;
use tracing::{debug, info};

pub fn handle(config: &Path, out: Option<&Path>, threads: &str) -> Result<()> {
    let workers = zone_workers(threads)?;
    if let Err(e) = ThreadPoolBuilder::new().num_threads(workers).build_global() {
        debug!("keeping the existing zone worker pool: {e}");
    }
    let start = Instant::now();

    let scenario = load_config_from_path(config)?;
    let out_dir = out
        .map(Path::to_path_buf)
        .unwrap_or_else(|| scenario.root_dir.join("data").join("processed"));
    info!(
        "Compiling {} for {} into {}",
        config.display(),
        scenario.year,
        out_dir.display()
    );

    let tables = load_raw_tables(&scenario)?;
    let symbols = compile_symbols(&tables, &scenario).context("compiling symbols")?;
    write_symbols(&symbols, &out_dir)?;

    println!(
        "Compiled {} sets and {} parameters into {} in {:.2?}",
        symbols.sets.len(),
        symbols.parameters.len(),
        out_dir.display(),
        start.elapsed()
    );
    Ok(())
}

/// Worker count for the per-zone stages; `auto` means one per core.
fn zone_workers(threads: &str) -> Result<usize> {
    if threads.eq_ignore_ascii_case("auto") {
        return Ok(num_cpus::get());
    }
    let count: usize = threads
        .trim()
        .parse()
        .with_context(|| format!("--threads expects a count or \"auto\", got {threads:?}"))?;
    if count == 0 {
        bail!("--threads must be at least 1");
    }
    Ok(count)
}
