//! Product extraction and normalization.
//!
//! Each [`RawContainer`](dealsdb_core::RawContainer) handed over by a
//! [`Collector`] passes through four stages: [`extract`] → [`resolve`] →
//! [`validate`] → [`categorize`]. A container that fails any stage becomes a
//! [`Rejection`] with a typed [`RejectReason`]; the rest of the batch is
//! unaffected.

pub mod categorize;
pub mod error;
pub mod extract;
pub mod parse;
pub mod pipeline;
pub mod resolve;
pub mod sources;
pub mod validate;

pub use categorize::categorize;
pub use error::{
    ExtractionFailure, RejectReason, ResolutionFailure, ScraperError, ValidationFailure,
};
pub use extract::{extract, ExtractedFields, UNKNOWN_BRAND};
pub use pipeline::{BatchOutcome, Pipeline, Rejection, Source};
pub use resolve::{resolve, ResolutionMethod, ResolvedPrice};
pub use sources::{Collector, ShopifyFeed, StaticCollector};
pub use validate::{validate, ValidatedDiscount};
