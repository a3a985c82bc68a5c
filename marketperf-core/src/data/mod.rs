//! Remote data sources: daily prices and monthly macro series.

pub mod fred;
pub mod memory;
pub mod provider;
pub mod yahoo;

pub use fred::FredProvider;
pub use memory::InMemoryProvider;
pub use provider::{DataError, MacroProvider, PriceProvider, SeriesPoint};
pub use yahoo::YahooProvider;
