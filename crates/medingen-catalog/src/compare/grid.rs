//! Side-by-side comparison grid and user-curated selection.

use crate::catalog::Medicine;
use crate::error::CatalogError;
use crate::ids::ProductId;

/// Maximum medicines shown side by side.
pub const COMPARISON_LIMIT: usize = 4;

/// The `limit` highest-rated medicines. Ties keep pool order.
pub fn top_rated(pool: &[Medicine], limit: usize) -> Vec<Medicine> {
    let mut ranked: Vec<&Medicine> = pool.iter().collect();
    // Stable sort: equal ratings stay in pool order
    ranked.sort_by(|a, b| b.rating().total_cmp(&a.rating()));
    ranked.into_iter().take(limit).cloned().collect()
}

/// The default comparison grid for a pool. An empty pool is an error so
/// callers can show a no-data state instead of an empty grid.
pub fn comparison_grid(pool: &[Medicine]) -> Result<Vec<Medicine>, CatalogError> {
    if pool.is_empty() {
        return Err(CatalogError::EmptyPool);
    }
    Ok(top_rated(pool, COMPARISON_LIMIT))
}

/// Medicines the user picked for comparison, in the order picked.
#[derive(Debug, Clone)]
pub struct ComparisonSelection {
    items: Vec<Medicine>,
    capacity: usize,
}

impl Default for ComparisonSelection {
    fn default() -> Self {
        Self::new()
    }
}

impl ComparisonSelection {
    pub fn new() -> Self {
        Self::with_capacity(COMPARISON_LIMIT)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            capacity,
        }
    }

    /// Add a medicine. Duplicates and additions past capacity are rejected.
    pub fn add(&mut self, medicine: Medicine) -> Result<(), CatalogError> {
        if self.contains(medicine.id()) {
            return Err(CatalogError::AlreadySelected(medicine.id()));
        }
        if self.is_full() {
            return Err(CatalogError::SelectionFull(self.capacity));
        }
        self.items.push(medicine);
        Ok(())
    }

    /// Remove by id, returning the removed medicine.
    pub fn remove(&mut self, id: ProductId) -> Option<Medicine> {
        let index = self.items.iter().position(|m| m.id() == id)?;
        Some(self.items.remove(index))
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.items.iter().any(|m| m.id() == id)
    }

    pub fn items(&self) -> &[Medicine] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
