//! `shopkeep-cli`: interactive menus for the sales and inventory books.
//!
//! The menus only collect raw answers, hand them to the record and store
//! crates, and print what comes back. The binaries wire stdin/stdout and the
//! environment into [`menu::run`].

pub mod books;
pub mod menu;
pub mod prompt;
pub mod settings;

pub use books::{Book, inventory_book, sales_book};
pub use prompt::Console;
