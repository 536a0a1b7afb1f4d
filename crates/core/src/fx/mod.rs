pub mod fx_cache;
pub mod fx_errors;
pub mod fx_model;
pub mod fx_service;
pub mod fx_traits;

pub use fx_cache::RateCache;
pub use fx_errors::FxError;
pub use fx_model::CachedRate;
pub use fx_service::FxService;
pub use fx_traits::FxServiceTrait;
