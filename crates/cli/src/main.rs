use std::io;

use anyhow::Context;
use clap::Parser;

use stockroom_cli::{Args, Shell};
use stockroom_inventory::Inventory;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    stockroom_observability::init(&args.log_config());

    let mut inventory = Inventory::new();
    if let Some(path) = &args.load {
        inventory
            .load_from_file(path)
            .with_context(|| format!("failed to load catalog from {}", path.display()))?;
        tracing::info!(path = %path.display(), count = inventory.len(), "startup catalog loaded");
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    Shell::new(inventory, stdin.lock(), stdout.lock())
        .run()
        .context("terminal I/O failed")?;

    Ok(())
}
