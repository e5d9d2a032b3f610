//! Sales book records.
//!
//! A sale is a timestamped list of products sold to a customer, either
//! online (through a platform) or in store (at a branch).

pub mod sale;

pub use sale::{LOCAL_SALE, ONLINE_SALE, Sale, SaleChannel};
