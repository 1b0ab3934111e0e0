pub mod aggregate;
mod builtin;
pub mod catalog;
pub mod classify;
pub mod engine;
pub mod helpers;
pub mod messages;
pub mod policy;
pub mod types;
pub mod units;

pub use aggregate::aggregate;
pub use catalog::ReferenceCatalog;
pub use classify::{classify_test, classify_value, ClassifyContext};
pub use engine::DefaultLabAnalyzer;
pub use messages::{BannerMessages, ReportMessages};
pub use policy::{MatchPolicy, SeverityPolicy};
pub use types::*;
pub use units::{normalize_unit, Normalized, UnitConversion, UnitConverter};
