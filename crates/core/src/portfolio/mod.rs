pub mod benchmark;
pub mod history;
pub mod performance;
pub mod pricing;

pub use benchmark::{
    BenchmarkInstrument, BenchmarkService, BenchmarkServiceTrait, PortfolioBenchmarkComparison,
};
pub use history::{HistoryPoint, HistoryService, HistoryServiceTrait};
pub use performance::{
    EntryPerformance, PerformanceService, PerformanceServiceTrait, PortfolioPerformance,
};
pub use pricing::{EntryPricer, EntryPricerTrait, PriceQuote, PriceSource};
