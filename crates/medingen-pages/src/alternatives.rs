//! Strategy pipeline for alternative medicines.

use medingen_catalog::catalog::RawProduct;
use medingen_catalog::compare::{Alternative, AlternativeReason, AlternativeSet};
use medingen_catalog::Medicine;
use medingen_gateway::Gateway;

/// Default number of alternatives collected across strategies.
pub const DEFAULT_TARGET: usize = 8;

/// Runs retrieval strategies in priority order against the gateway and
/// merges their candidates.
///
/// Strategies run one after another: each skips ids an earlier one already
/// contributed, and the pipeline stops as soon as the target is reached. A
/// strategy whose request fails contributes nothing.
#[derive(Debug, Clone)]
pub struct AlternativeFinder {
    gateway: Gateway,
    strategies: Vec<AlternativeReason>,
    target: Option<usize>,
}

impl AlternativeFinder {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway,
            strategies: AlternativeReason::PRIORITY.to_vec(),
            target: Some(DEFAULT_TARGET),
        }
    }

    /// Every product except the reference, cheapest first.
    pub fn all_products(gateway: Gateway) -> Self {
        Self::new(gateway)
            .with_strategies(vec![AlternativeReason::AllProducts])
            .with_target(None)
    }

    pub fn with_strategies(mut self, strategies: Vec<AlternativeReason>) -> Self {
        self.strategies = strategies;
        self
    }

    /// `None` collects everything the strategies return.
    pub fn with_target(mut self, target: Option<usize>) -> Self {
        self.target = target;
        self
    }

    pub async fn find(&self, reference: &Medicine) -> Vec<Alternative> {
        let mut set = AlternativeSet::new(reference, self.target);

        for reason in &self.strategies {
            if set.is_full() {
                break;
            }
            let Some(query) = reason.query(reference) else {
                tracing::debug!(strategy = %reason, "strategy skipped, reference lacks its key");
                continue;
            };
            let page = match self.gateway.list_products(&query).await {
                Ok(response) => response.into_inner(),
                Err(e) => {
                    tracing::warn!(strategy = %reason, error = %e, "alternative strategy failed");
                    continue;
                }
            };
            let candidates = self.transform(page.products());
            let added = set.extend(*reason, candidates);
            tracing::debug!(strategy = %reason, added, "alternative strategy done");
        }

        set.finish()
    }

    /// Records that fail to transform are dropped.
    fn transform(&self, raws: &[RawProduct]) -> Vec<Medicine> {
        let options = self.gateway.transform_options();
        raws.iter()
            .filter_map(|raw| match Medicine::from_backend(raw, options) {
                Ok(medicine) => Some(medicine),
                Err(e) => {
                    tracing::debug!(error = %e, "skipping malformed alternative");
                    None
                }
            })
            .collect()
    }
}
