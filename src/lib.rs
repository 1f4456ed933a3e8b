//! Fake business records (accounts, items, invoices, orders, payments and their
//! purchase-side counterparts) written as CSV files for bulk-import testing.
//!
//! Every generator takes a [`context::GenContext`] holding the random source and a
//! frozen timestamp, returns a [`dataset::Dataset`], and leaves writing to [`export`].

pub mod attributes;
pub mod cli;
pub mod config;
pub mod context;
pub mod dataset;
pub mod errors;
pub mod export;
pub mod fanout;
pub mod generators;
pub mod ids;
pub mod import;
pub mod logger;
pub mod settings;
pub mod summary;
pub mod types;

pub use context::GenContext;
pub use dataset::Dataset;
pub use errors::GenError;
pub use types::{EntityKind, Row, Value};
