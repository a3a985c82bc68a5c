//! Per-period series construction.

pub mod align;
pub mod builder;
pub mod store;
pub mod view;

pub use align::reindex_time_interpolated;
pub use builder::{pct_change_from_first, window, SeriesBuilder};
pub use store::InstrumentStore;
pub use view::{PeriodView, ViewOutcome, ViewRow};

use crate::catalog::CatalogError;
use crate::data::DataError;
use crate::inflation::InflationError;
use thiserror::Error;

/// Anything that stops a comparison pass.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Inflation(#[from] InflationError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Data(#[from] DataError),
}
