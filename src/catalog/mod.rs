//! Keyed catalogs.
//!
//! An `ItemReader<T>` loads a whole catalog as a map from string key to
//! item. The contract is a round trip: every item a reader returns is
//! stored under its own key, `read_all()[item_key(x)] == x`.
//!
//! Card definitions are the main catalog; they can be read from JSON
//! (`JsonCardReader`) or from a bincode blob (`BincodeCardReader`).

mod reader;

pub use reader::{check_round_trip, BincodeCardReader, CatalogError, ItemReader, JsonCardReader};
