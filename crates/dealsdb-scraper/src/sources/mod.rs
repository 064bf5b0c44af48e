//! The collector side of the boundary.
//!
//! Fetching pages, driving browsers and retrying are out of scope for this
//! crate; a [`Collector`] is whatever hands the pipeline a batch of
//! [`RawContainer`] values for one [`Source`]. The adapters here only reshape
//! payloads a collector already holds.

pub mod json;
pub mod shopify;

use dealsdb_core::RawContainer;

use crate::error::ScraperError;
use crate::pipeline::Source;

pub use json::{flatten_strings, parse_containers};
pub use shopify::ShopifyFeed;

/// Produces raw containers for one site. Implemented per site and injected
/// into [`crate::Pipeline::run`].
pub trait Collector: Send + Sync {
    fn source(&self) -> &Source;

    /// Returns the containers for one page/site pass.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError`] when the underlying payload cannot be read.
    fn collect(&self) -> Result<Vec<RawContainer>, ScraperError>;
}

/// Containers already in memory, e.g. a captured page being replayed.
#[derive(Debug, Clone)]
pub struct StaticCollector {
    source: Source,
    containers: Vec<RawContainer>,
}

impl StaticCollector {
    #[must_use]
    pub fn new(source: Source, containers: Vec<RawContainer>) -> Self {
        Self { source, containers }
    }

    /// Builds a collector from a JSON array of containers.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Deserialize`] if `json` is not a container array.
    pub fn from_json(source: Source, json: &str) -> Result<Self, ScraperError> {
        let containers = parse_containers(json, &source.id)?;
        Ok(Self::new(source, containers))
    }
}

impl Collector for StaticCollector {
    fn source(&self) -> &Source {
        &self.source
    }

    fn collect(&self) -> Result<Vec<RawContainer>, ScraperError> {
        Ok(self.containers.clone())
    }
}
