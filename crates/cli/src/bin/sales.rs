//! Sales book: online and in-store sales, saved and loaded on request.

use std::io;

use anyhow::Context;

use shopkeep_cli::{Console, menu, sales_book, settings};
use shopkeep_sales::Sale;
use shopkeep_store::CollectionStore;

fn main() -> anyhow::Result<()> {
    shopkeep_observability::init();

    let config = settings::sales_config(|key| std::env::var(key).ok())
        .context("invalid sales store configuration")?;
    tracing::info!(?config, "starting sales book");

    let book = sales_book();
    let mut console = Console::new(io::stdin().lock(), io::stdout().lock());

    let mut store = match CollectionStore::<Sale>::open(config.clone()) {
        Ok((store, report)) => {
            if config.path.is_some() {
                menu::report_load(&mut console, book.plural, &report)?;
            }
            store
        }
        Err(err) => {
            tracing::error!("failed to open sales file: {err}");
            console.say(format!("Error: {err}. Starting with an empty book."))?;
            CollectionStore::with_config(config)
        }
    };

    menu::run(&book, &mut store, &mut console).context("console I/O failed")
}
