//! marketperf core: historical market-period comparison.
//!
//! This crate holds everything below the user interface:
//! - Price and macro data providers (Yahoo Finance, FRED, in-memory)
//! - The CPI cache with its monthly freshness rule
//! - CPI deflation of nominal series against a base date
//! - The period and instrument catalog
//! - Per-period series construction and the comparison pass
//! - A front-end agnostic chart model

pub mod catalog;
pub mod chart;
pub mod compare;
pub mod config;
pub mod data;
pub mod inflation;
pub mod series;

pub use catalog::{Catalog, CatalogError, Instrument, Period};
pub use chart::ChartModel;
pub use compare::{Comparison, ComparisonPass, ComparisonRequest, SkippedPair};
pub use config::{AppConfig, ConfigError};
pub use inflation::{IndexTable, InflationCache, InflationError};
pub use series::{BuildError, PeriodView, ViewRow};
