//! Pipeline orchestration: extract → resolve → validate → categorize, one
//! container at a time.
//!
//! A failure at any stage only drops that container. Batches always run to
//! the end and report every rejection alongside the products they kept.

use std::collections::BTreeMap;
use std::sync::Arc;

use dealsdb_core::{Category, PipelineConfig, Product, RawContainer};
use rayon::prelude::*;
use serde::Serialize;

use crate::categorize::categorize;
use crate::error::{RejectReason, ScraperError};
use crate::extract::extract;
use crate::resolve::resolve;
use crate::sources::Collector;
use crate::validate::validate;

/// Identity of the site a batch came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    /// Opaque identifier stamped on every product from this source.
    pub id: String,
    /// Category for products whose names match no keyword; collectors
    /// usually know their site's dominant category.
    pub default_category: Category,
}

impl Source {
    #[must_use]
    pub fn new(id: impl Into<String>, default_category: Category) -> Self {
        Self {
            id: id.into(),
            default_category,
        }
    }
}

/// A container that produced no product, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    /// Position of the container in the input batch.
    pub index: usize,
    pub product_url: Option<String>,
    /// First non-blank candidate name, for humans reading diagnostics.
    pub candidate_name: Option<String>,
    #[serde(serialize_with = "serialize_reason")]
    pub reason: RejectReason,
}

impl Rejection {
    fn new(index: usize, container: &RawContainer, reason: RejectReason) -> Self {
        let candidate_name = container
            .candidate_names
            .iter()
            .map(|n| n.trim())
            .find(|n| !n.is_empty())
            .map(str::to_string);
        let product_url = container
            .product_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(str::to_string);
        Self {
            index,
            product_url,
            candidate_name,
            reason,
        }
    }

    /// `product_url` when known, else `#<index>`.
    #[must_use]
    pub fn container_id(&self) -> String {
        self.product_url
            .clone()
            .unwrap_or_else(|| format!("#{}", self.index))
    }
}

fn serialize_reason<S>(reason: &RejectReason, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(reason.code())
}

/// Result of one batch: kept products in input order, plus every rejection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchOutcome {
    pub products: Vec<Product>,
    pub rejections: Vec<Rejection>,
}

impl BatchOutcome {
    /// Total containers seen.
    #[must_use]
    pub fn total(&self) -> usize {
        self.products.len() + self.rejections.len()
    }

    /// Rejection counts keyed by [`RejectReason::code`].
    #[must_use]
    pub fn rejection_counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for rejection in &self.rejections {
            *counts.entry(rejection.reason.code()).or_insert(0) += 1;
        }
        counts
    }

    fn from_results(results: Vec<Result<Product, Rejection>>) -> Self {
        let mut outcome = Self::default();
        for result in results {
            match result {
                Ok(product) => outcome.products.push(product),
                Err(rejection) => outcome.rejections.push(rejection),
            }
        }
        outcome
    }
}

/// The normalization pipeline. Holds only read-only configuration, so one
/// instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: Arc<PipelineConfig>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl Pipeline {
    #[must_use]
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    #[must_use]
    pub fn with_shared_config(config: Arc<PipelineConfig>) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs every stage over one container.
    ///
    /// # Errors
    ///
    /// Returns the [`RejectReason`] of the first stage that gave up.
    pub fn process(
        &self,
        source: &Source,
        container: &RawContainer,
    ) -> Result<Product, RejectReason> {
        let fields = extract(container, &self.config)?;
        let price = resolve(&fields)?;
        let discount = validate(&price, &self.config.bounds)?;
        let category = categorize(
            &fields.name,
            &self.config.lexicon.categories,
            source.default_category,
        );

        Ok(Product {
            name: fields.name,
            brand: fields.brand,
            category,
            original_price: price.original_price,
            sale_price: price.sale_price,
            discount_percent: discount.discount_percent,
            image_url: fields.image_url,
            product_url: fields.product_url,
            source_id: source.id.clone(),
        })
    }

    /// Processes a batch sequentially.
    #[must_use]
    pub fn process_batch(&self, source: &Source, containers: &[RawContainer]) -> BatchOutcome {
        let results = containers
            .iter()
            .enumerate()
            .map(|(index, container)| self.process_indexed(source, index, container))
            .collect();
        summarize(source, results)
    }

    /// Processes a batch on the rayon thread pool. Output is identical to
    /// [`Pipeline::process_batch`], including order.
    #[must_use]
    pub fn process_batch_parallel(
        &self,
        source: &Source,
        containers: &[RawContainer],
    ) -> BatchOutcome {
        let results = containers
            .par_iter()
            .enumerate()
            .map(|(index, container)| self.process_indexed(source, index, container))
            .collect();
        summarize(source, results)
    }

    /// Pulls one batch from `collector` and processes it.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError`] if the collector cannot produce containers.
    /// Individual bad containers are rejections, not errors.
    pub fn run(&self, collector: &dyn Collector) -> Result<BatchOutcome, ScraperError> {
        let containers = collector.collect()?;
        Ok(self.process_batch(collector.source(), &containers))
    }

    fn process_indexed(
        &self,
        source: &Source,
        index: usize,
        container: &RawContainer,
    ) -> Result<Product, Rejection> {
        self.process(source, container).map_err(|reason| {
            let rejection = Rejection::new(index, container, reason);
            tracing::debug!(
                source = %source.id,
                index,
                container = %rejection.container_id(),
                reason = reason.code(),
                "container rejected"
            );
            rejection
        })
    }
}

fn summarize(source: &Source, results: Vec<Result<Product, Rejection>>) -> BatchOutcome {
    let outcome = BatchOutcome::from_results(results);
    tracing::info!(
        source = %source.id,
        kept = outcome.products.len(),
        rejected = outcome.rejections.len(),
        "processed container batch"
    );
    outcome
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
