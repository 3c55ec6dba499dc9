//! Alternative-medicine ranking.
//!
//! Candidates come from an ordered list of retrieval strategies. Each
//! strategy's results are merged into an [`AlternativeSet`] until a target
//! count is reached; ids already present (including the reference itself)
//! are skipped. Every kept candidate carries the reason it was found and its
//! savings relative to the reference.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::catalog::{savings_percent, Medicine, PriceComparison};
use crate::ids::ProductId;
use crate::search::ProductQuery;

/// Page size for category and generic-name lookups.
pub const STRATEGY_PAGE_SIZE: u32 = 100;
/// Page size for the all-products pool.
pub const ALL_PRODUCTS_PAGE_SIZE: u32 = 1000;

/// Why a candidate was offered. Each reason is also the retrieval
/// strategy that produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlternativeReason {
    SameCategory,
    SameGeneric,
    Similar,
    AllProducts,
}

impl AlternativeReason {
    /// Strategies in priority order.
    pub const PRIORITY: [AlternativeReason; 4] = [
        AlternativeReason::SameCategory,
        AlternativeReason::SameGeneric,
        AlternativeReason::Similar,
        AlternativeReason::AllProducts,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AlternativeReason::SameCategory => "same-category",
            AlternativeReason::SameGeneric => "same-generic",
            AlternativeReason::Similar => "similar",
            AlternativeReason::AllProducts => "all-products",
        }
    }

    /// The listing query for this strategy, or `None` when the reference
    /// lacks the field the strategy keys on.
    pub fn query(&self, reference: &Medicine) -> Option<ProductQuery> {
        match self {
            AlternativeReason::SameCategory => reference
                .category()
                .filter(|c| !c.trim().is_empty())
                .map(|c| {
                    ProductQuery::new()
                        .with_category(c)
                        .with_per_page(STRATEGY_PAGE_SIZE)
                }),
            AlternativeReason::SameGeneric => Some(reference.generic_name())
                .filter(|g| !g.trim().is_empty())
                .map(|g| {
                    ProductQuery::new()
                        .with_generic_name(g)
                        .with_per_page(STRATEGY_PAGE_SIZE)
                }),
            AlternativeReason::Similar => Some(ProductQuery::new().excluding(reference.id())),
            AlternativeReason::AllProducts => {
                Some(ProductQuery::new().with_per_page(ALL_PRODUCTS_PAGE_SIZE))
            }
        }
    }
}

impl std::fmt::Display for AlternativeReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A candidate medicine compared against a reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Alternative {
    #[serde(flatten)]
    medicine: Medicine,
    alternative_reason: AlternativeReason,
    savings_percent: i64,
    price_comparison: PriceComparison,
}

impl Alternative {
    /// Compare `medicine` against the reference price.
    pub fn compare(reference_price: f64, medicine: Medicine, reason: AlternativeReason) -> Self {
        let savings = savings_percent(reference_price, medicine.price());
        Self {
            medicine,
            alternative_reason: reason,
            savings_percent: savings,
            price_comparison: PriceComparison::from_savings(savings),
        }
    }

    /// Same candidate, compared against a different reference.
    pub fn rebase(&self, reference: &Medicine) -> Self {
        Self::compare(
            reference.price(),
            self.medicine.clone(),
            self.alternative_reason,
        )
    }

    pub fn medicine(&self) -> &Medicine {
        &self.medicine
    }

    pub fn into_medicine(self) -> Medicine {
        self.medicine
    }

    pub fn id(&self) -> ProductId {
        self.medicine.id()
    }

    pub fn reason(&self) -> AlternativeReason {
        self.alternative_reason
    }

    pub fn savings_percent(&self) -> i64 {
        self.savings_percent
    }

    pub fn price_comparison(&self) -> PriceComparison {
        self.price_comparison
    }
}

/// Accumulates candidates from successive strategies.
#[derive(Debug, Clone)]
pub struct AlternativeSet {
    reference_price: f64,
    target: Option<usize>,
    items: Vec<Alternative>,
    seen: HashSet<ProductId>,
}

impl AlternativeSet {
    /// `target` of `None` means no limit.
    pub fn new(reference: &Medicine, target: Option<usize>) -> Self {
        let mut seen = HashSet::new();
        seen.insert(reference.id());
        Self {
            reference_price: reference.price(),
            target,
            items: Vec::new(),
            seen,
        }
    }

    /// Add candidates in order, skipping known ids and stopping at the
    /// target. Returns how many were added.
    pub fn extend<I>(&mut self, reason: AlternativeReason, candidates: I) -> usize
    where
        I: IntoIterator<Item = Medicine>,
    {
        let before = self.items.len();
        for medicine in candidates {
            if self.is_full() {
                break;
            }
            if !self.seen.insert(medicine.id()) {
                continue;
            }
            self.items
                .push(Alternative::compare(self.reference_price, medicine, reason));
        }
        self.items.len() - before
    }

    pub fn is_full(&self) -> bool {
        self.target.is_some_and(|target| self.items.len() >= target)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Final ordering: cheapest first when every candidate came from the
    /// all-products pool, otherwise strategy order.
    pub fn finish(self) -> Vec<Alternative> {
        let mut items = self.items;
        let all_products = !items.is_empty()
            && items
                .iter()
                .all(|a| a.alternative_reason == AlternativeReason::AllProducts);
        if all_products {
            items.sort_by(|a, b| a.medicine.price().total_cmp(&b.medicine.price()));
        }
        items
    }
}

/// Rank a pool as all-products alternatives to `reference`.
pub fn rank_alternatives(reference: &Medicine, pool: &[Medicine]) -> Vec<Alternative> {
    let mut set = AlternativeSet::new(reference, None);
    set.extend(AlternativeReason::AllProducts, pool.iter().cloned());
    set.finish()
}

/// Merge already-fetched strategy results in the order given.
pub fn merge_strategies<I>(reference: &Medicine, target: Option<usize>, results: I) -> Vec<Alternative>
where
    I: IntoIterator<Item = (AlternativeReason, Vec<Medicine>)>,
{
    let mut set = AlternativeSet::new(reference, target);
    for (reason, candidates) in results {
        if set.is_full() {
            break;
        }
        set.extend(reason, candidates);
    }
    set.finish()
}
