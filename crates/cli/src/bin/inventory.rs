//! Inventory book: electronic and perishable items, written to disk after every change.

use std::io;

use anyhow::Context;

use shopkeep_cli::{Console, inventory_book, menu, settings};
use shopkeep_inventory::Item;
use shopkeep_store::CollectionStore;

fn main() -> anyhow::Result<()> {
    shopkeep_observability::init();

    let config = settings::inventory_config(|key| std::env::var(key).ok())
        .context("invalid inventory store configuration")?;
    tracing::info!(?config, "starting inventory book");

    let book = inventory_book();
    let mut console = Console::new(io::stdin().lock(), io::stdout().lock());

    let mut store = match CollectionStore::<Item>::open(config.clone()) {
        Ok((store, report)) => {
            menu::report_load(&mut console, book.plural, &report)?;
            store
        }
        Err(err) => {
            // The first change will overwrite the unreadable file.
            tracing::error!("failed to read inventory file: {err}");
            console.say(format!("Error: {err}. Starting with an empty inventory."))?;
            CollectionStore::with_config(config)
        }
    };

    menu::run(&book, &mut store, &mut console).context("console I/O failed")
}
