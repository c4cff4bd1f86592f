//! The inventory: product collection + undo history.
//!
//! Every mutation goes through an [`Action`]; the action is pushed onto the
//! history only when it executed successfully, so reverting the top of the
//! history always restores the exact previous membership and quantities
//! (except that an undone removal lands at the end of the list).
//!
//! The inventory is a plain single-owner value. Callers that need to share it
//! across threads should put the whole thing behind one lock, so that
//! executing an action and recording it stay a single step.

use std::path::Path;

use serde::Serialize;

use kiputech_core::{DomainError, DomainResult, ProductId};
use kiputech_products::{CodeSequence, Product, ProductDraft};

use crate::action::{Action, Mutation};
use crate::config::InventoryConfig;
use crate::import::Importer;
use crate::search::{ByCode, ByName, SearchBy, SearchStrategy};
use crate::sort::SortOrder;

/// Outcome of a successful stock decrement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StockChange {
    pub previous: u64,
    pub current: u64,
}

/// Outcome of an import: how many candidates were added vs. skipped as
/// duplicates (same code as a product already present).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub added: usize,
    pub duplicates: usize,
}

#[derive(Debug, Clone)]
pub struct Inventory {
    products: Vec<Product>,
    history: Vec<Action>,
    codes: CodeSequence,
    importer: Importer,
}

impl Inventory {
    pub fn new() -> Self {
        Self::with_config(InventoryConfig::default())
    }

    pub fn with_config(config: InventoryConfig) -> Self {
        Self {
            products: Vec::new(),
            history: Vec::new(),
            codes: config.code_sequence(),
            importer: Importer::new(config.import_delimiter),
        }
    }

    /// Products in insertion order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn codes(&self) -> &CodeSequence {
        &self.codes
    }

    /// Validate a draft and assign it a code from this inventory's sequence.
    ///
    /// The product is not added; pass it to [`Inventory::add`].
    pub fn new_product(&mut self, draft: ProductDraft) -> DomainResult<Product> {
        Product::new(draft, &mut self.codes)
    }

    /// Add a product. Always succeeds and is undoable.
    ///
    /// The product's code is reported to this inventory's sequence, so a
    /// product built elsewhere still pushes later generated codes past it.
    pub fn add(&mut self, product: Product) -> &Product {
        self.codes.observe(product.code().as_str());
        let action = Action::add(product, &mut self.products);
        self.record(action);
        let newest = self.products.len() - 1;
        &self.products[newest]
    }

    /// [`Inventory::new_product`] followed by [`Inventory::add`].
    pub fn create(&mut self, draft: ProductDraft) -> DomainResult<&Product> {
        let product = self.new_product(draft)?;
        Ok(self.add(product))
    }

    /// Run a search strategy over the current products. Pure query.
    pub fn find<S: SearchStrategy>(&self, strategy: &S, value: &str) -> S::Output<'_> {
        strategy.search(&self.products, value)
    }

    pub fn find_by_code(&self, code: &str) -> Option<&Product> {
        self.find(&ByCode, code)
    }

    pub fn find_by_name(&self, fragment: &str) -> Vec<&Product> {
        self.find(&ByName, fragment)
    }

    /// Search with a strategy chosen at runtime.
    pub fn search(&self, by: SearchBy, value: &str) -> Vec<&Product> {
        by.run(&self.products, value)
    }

    /// Look a member up by identity.
    pub fn get(&self, product_id: ProductId) -> DomainResult<&Product> {
        self.products
            .iter()
            .find(|p| p.id_typed() == product_id)
            .ok_or_else(|| DomainError::product_not_found(product_id.to_string()))
    }

    /// Remove a member. Returns the removed product.
    pub fn remove(&mut self, product_id: ProductId) -> DomainResult<Product> {
        let removed = self.get(product_id)?.clone();
        self.apply(Mutation::Remove(product_id))?;
        Ok(removed)
    }

    /// Take `amount` units out of stock.
    ///
    /// Fails with `InvalidInput` for a zero or negative amount and
    /// `InsufficientStock` if the product holds less than `amount`; in both
    /// cases nothing changes and nothing is recorded.
    pub fn decrement_stock(&mut self, product_id: ProductId, amount: i64) -> DomainResult<StockChange> {
        if amount <= 0 {
            return Err(DomainError::invalid_input(format!(
                "amount to decrement must be greater than zero (got {amount})"
            )));
        }
        let amount = amount.unsigned_abs();
        self.apply(Mutation::DecrementStock { product_id, amount })?;
        let current = self.get(product_id)?.quantity();
        Ok(StockChange {
            previous: current + amount,
            current,
        })
    }

    /// A sorted view of the products. Inventory order is left alone.
    pub fn sort_snapshot(&self, order: SortOrder) -> Vec<&Product> {
        order.apply(&self.products)
    }

    /// Import a delimited file, skipping candidates whose code already exists.
    ///
    /// Each added product is its own undoable action; skipped duplicates
    /// leave no trace in the history.
    pub fn import_from(&mut self, path: impl AsRef<Path>) -> DomainResult<ImportSummary> {
        let path = path.as_ref();
        let candidates = self.importer.import(path, &mut self.codes)?;

        let mut summary = ImportSummary::default();
        for candidate in candidates {
            if self.find_by_code(candidate.code().as_str()).is_some() {
                summary.duplicates += 1;
                continue;
            }
            self.add(candidate);
            summary.added += 1;
        }

        tracing::debug!(
            path = %path.display(),
            added = summary.added,
            duplicates = summary.duplicates,
            "import finished"
        );
        Ok(summary)
    }

    /// Most recent recorded action, if any.
    pub fn last_action(&self) -> Option<&Action> {
        self.history.last()
    }

    /// Revert and discard the most recent action. Returns it for display.
    pub fn undo_last(&mut self) -> DomainResult<Action> {
        let action = self.history.pop().ok_or(DomainError::EmptyHistory)?;
        action.revert(&mut self.products);
        tracing::debug!(
            kind = ?action.kind(),
            code = %action.product_code(),
            "action reverted"
        );
        Ok(action)
    }

    /// Execute a mutation and record it. Failed mutations are not recorded.
    fn apply(&mut self, mutation: Mutation) -> DomainResult<()> {
        let action = Action::execute(mutation, &mut self.products)?;
        self.record(action);
        Ok(())
    }

    fn record(&mut self, action: Action) {
        tracing::debug!(
            kind = ?action.kind(),
            code = %action.product_code(),
            "action executed"
        );
        self.history.push(action);
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}
