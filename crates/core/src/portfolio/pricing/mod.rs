pub mod entry_pricer;
pub mod pricing_model;

pub use entry_pricer::{EntryPricer, EntryPricerTrait};
pub use pricing_model::{PriceQuote, PriceSource};
