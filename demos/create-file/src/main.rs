use std::fs;
use std::path::Path;

use anyhow::Context;
use tracing::error;
use tracing_subscriber::EnvFilter;

const VERSION: i64 = 20200613113048;
const DATA_DIR: &str = "tmp/create_file";
const MARKER: &str = "tmp/create_file/migration.ok";

fn up() -> anyhow::Result<()> {
    fs::write(MARKER, "ok\n").with_context(|| format!("writing {MARKER}"))
}

fn down() -> anyhow::Result<()> {
    fs::remove_file(MARKER).with_context(|| format!("removing {MARKER}"))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Both the marker and the ledger live under the data directory.
    if let Err(e) = fs::create_dir_all(Path::new(DATA_DIR)) {
        error!("failed to create {DATA_DIR}: {e}");
        std::process::exit(1);
    }

    let mut up_action = || up();
    let mut down_action = || down();
    if let Err(e) = waymark::run(VERSION, &mut up_action, &mut down_action) {
        error!("migration failed: {e}");
        std::process::exit(1);
    }
}
