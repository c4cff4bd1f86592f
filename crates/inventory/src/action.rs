//! Reversible inventory mutations (command records for undo).
//!
//! A [`Mutation`] is a request. Executing it against the product collection
//! yields an [`Action`]: the record of what happened plus the minimal state
//! needed to put things back. Actions are executed once and reverted at most
//! once; the inventory drops an action from its history when reverting it.

use chrono::{DateTime, Utc};
use serde::Serialize;

use kiputech_core::{DomainError, DomainResult, Entity, ProductId};
use kiputech_products::{Product, ProductCode};

/// The three kinds of recorded mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Add,
    Remove,
    DecrementStock,
}

/// A requested mutation, not yet applied.
#[derive(Debug, Clone)]
pub enum Mutation {
    Add(Product),
    Remove(ProductId),
    DecrementStock { product_id: ProductId, amount: u64 },
}

/// Undo state per kind.
#[derive(Debug, Clone, PartialEq)]
enum Memento {
    Added {
        product_id: ProductId,
    },
    Removed {
        product: Product,
    },
    StockDecremented {
        product_id: ProductId,
        amount: u64,
        previous: u64,
    },
}

/// An executed mutation, as kept in the undo history.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    executed_at: DateTime<Utc>,
    product_code: ProductCode,
    product_name: String,
    memento: Memento,
}

impl Action {
    /// Apply `mutation` to `products` and return the record needed to undo it.
    ///
    /// On error nothing has been changed.
    pub fn execute(mutation: Mutation, products: &mut Vec<Product>) -> DomainResult<Self> {
        match mutation {
            Mutation::Add(product) => Ok(Self::add(product, products)),
            Mutation::Remove(product_id) => {
                let index = position(products, product_id)
                    .ok_or_else(|| DomainError::product_not_found(product_id.to_string()))?;
                let product = products.remove(index);
                let action = Self::record(&product, Memento::Removed { product: product.clone() });
                Ok(action)
            }
            Mutation::DecrementStock { product_id, amount } => {
                if amount == 0 {
                    return Err(DomainError::invalid_input(
                        "amount to decrement must be greater than zero",
                    ));
                }
                let index = position(products, product_id)
                    .ok_or_else(|| DomainError::product_not_found(product_id.to_string()))?;
                let product = &mut products[index];

                let previous = product.quantity();
                if previous < amount {
                    return Err(DomainError::insufficient_stock(previous, amount));
                }
                product.set_quantity(previous - amount);

                Ok(Self::record(
                    product,
                    Memento::StockDecremented {
                        product_id,
                        amount,
                        previous,
                    },
                ))
            }
        }
    }

    /// Append `product`. Adding cannot fail.
    pub fn add(product: Product, products: &mut Vec<Product>) -> Self {
        let action = Self::record(
            &product,
            Memento::Added {
                product_id: product.id_typed(),
            },
        );
        products.push(product);
        action
    }

    /// Undo this action. Never fails.
    ///
    /// - Add: the product is removed again (by identity).
    /// - Remove: the product is re-appended at the end, not at its old position.
    /// - DecrementStock: quantity goes back to the recorded pre-decrement value,
    ///   whatever happened to it since.
    ///
    /// A product that is no longer a member makes the revert a no-op.
    pub fn revert(&self, products: &mut Vec<Product>) {
        match &self.memento {
            Memento::Added { product_id } => {
                if let Some(index) = position(products, *product_id) {
                    products.remove(index);
                }
            }
            Memento::Removed { product } => products.push(product.clone()),
            Memento::StockDecremented {
                product_id,
                previous,
                ..
            } => {
                if let Some(index) = position(products, *product_id) {
                    products[index].set_quantity(*previous);
                }
            }
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self.memento {
            Memento::Added { .. } => ActionKind::Add,
            Memento::Removed { .. } => ActionKind::Remove,
            Memento::StockDecremented { .. } => ActionKind::DecrementStock,
        }
    }

    pub fn executed_at(&self) -> DateTime<Utc> {
        self.executed_at
    }

    pub fn product_id(&self) -> ProductId {
        match &self.memento {
            Memento::Added { product_id } => *product_id,
            Memento::Removed { product } => *product.id(),
            Memento::StockDecremented { product_id, .. } => *product_id,
        }
    }

    pub fn product_code(&self) -> &ProductCode {
        &self.product_code
    }

    /// One-line summary for "last action" prompts.
    pub fn description(&self) -> String {
        match &self.memento {
            Memento::Added { .. } => format!("Added: {}", self.product_name),
            Memento::Removed { .. } => format!("Removed: {}", self.product_name),
            Memento::StockDecremented { amount, .. } => {
                format!("Stock decremented: {} (-{amount})", self.product_name)
            }
        }
    }

    /// Pre-decrement quantity for stock actions.
    pub fn previous_quantity(&self) -> Option<u64> {
        match self.memento {
            Memento::StockDecremented { previous, .. } => Some(previous),
            _ => None,
        }
    }

    fn record(product: &Product, memento: Memento) -> Self {
        Self {
            executed_at: Utc::now(),
            product_code: product.code().clone(),
            product_name: product.name().to_string(),
            memento,
        }
    }
}

fn position(products: &[Product], product_id: ProductId) -> Option<usize> {
    products.iter().position(|p| p.id_typed() == product_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiputech_products::{CodeSequence, ProductDraft};

    fn product(seq: &mut CodeSequence, name: &str, quantity: i64) -> Product {
        Product::new(ProductDraft::new(name, "General", quantity, 1.0), seq).unwrap()
    }

    #[test]
    fn add_appends_and_revert_removes_by_identity() {
        let mut seq = CodeSequence::default();
        let mut products = vec![product(&mut seq, "A", 1)];
        let b = product(&mut seq, "B", 1);
        let b_id = b.id_typed();

        let action = Action::execute(Mutation::Add(b), &mut products).unwrap();
        assert_eq!(action.kind(), ActionKind::Add);
        assert_eq!(action.product_id(), b_id);
        assert_eq!(products.len(), 2);
        assert_eq!(products[1].id_typed(), b_id);

        action.revert(&mut products);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name(), "A");
    }

    #[test]
    fn add_revert_leaves_a_same_code_twin_alone() {
        let mut seq = CodeSequence::default();
        let twin = Product::new(ProductDraft::new("Twin", "x", 1, 1.0).with_code("P001"), &mut seq)
            .unwrap();
        let added = Product::new(ProductDraft::new("New", "x", 1, 1.0).with_code("P001"), &mut seq)
            .unwrap();
        let twin_id = twin.id_typed();
        let mut products = vec![twin];

        let action = Action::execute(Mutation::Add(added), &mut products).unwrap();
        action.revert(&mut products);

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id_typed(), twin_id);
    }

    #[test]
    fn remove_then_revert_reappends_at_end() {
        let mut seq = CodeSequence::default();
        let mut products = vec![
            product(&mut seq, "A", 1),
            product(&mut seq, "B", 1),
            product(&mut seq, "C", 1),
        ];
        let a_id = products[0].id_typed();

        let action = Action::execute(Mutation::Remove(a_id), &mut products).unwrap();
        assert_eq!(action.kind(), ActionKind::Remove);
        assert_eq!(products.len(), 2);

        action.revert(&mut products);
        let names: Vec<_> = products.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["B", "C", "A"]);
    }

    #[test]
    fn remove_missing_product_fails_without_change() {
        let mut seq = CodeSequence::default();
        let mut products = vec![product(&mut seq, "A", 1)];
        let err = Action::execute(Mutation::Remove(ProductId::new()), &mut products).unwrap_err();
        assert!(matches!(err, DomainError::ProductNotFound(_)));
        assert_eq!(products.len(), 1);
    }

    #[test]
    fn decrement_records_previous_and_revert_restores_it() {
        let mut seq = CodeSequence::default();
        let mut products = vec![product(&mut seq, "A", 10)];
        let id = products[0].id_typed();

        let action = Action::execute(
            Mutation::DecrementStock {
                product_id: id,
                amount: 4,
            },
            &mut products,
        )
        .unwrap();
        assert_eq!(products[0].quantity(), 6);
        assert_eq!(action.previous_quantity(), Some(10));
        assert_eq!(action.description(), "Stock decremented: A (-4)");

        // Revert ignores whatever happened in between.
        products[0].set_quantity(1);
        action.revert(&mut products);
        assert_eq!(products[0].quantity(), 10);
    }

    #[test]
    fn decrement_beyond_stock_is_rejected_and_leaves_quantity() {
        let mut seq = CodeSequence::default();
        let mut products = vec![product(&mut seq, "A", 3)];
        let id = products[0].id_typed();
        let before = products[0].last_modified_at();

        let err = Action::execute(
            Mutation::DecrementStock {
                product_id: id,
                amount: 5,
            },
            &mut products,
        )
        .unwrap_err();

        assert_eq!(err, DomainError::insufficient_stock(3, 5));
        assert_eq!(products[0].quantity(), 3);
        assert_eq!(products[0].last_modified_at(), before);
    }

    #[test]
    fn decrement_by_zero_is_invalid_input() {
        let mut seq = CodeSequence::default();
        let mut products = vec![product(&mut seq, "A", 3)];
        let id = products[0].id_typed();
        let err = Action::execute(
            Mutation::DecrementStock {
                product_id: id,
                amount: 0,
            },
            &mut products,
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn decrement_to_exactly_zero_is_allowed() {
        let mut seq = CodeSequence::default();
        let mut products = vec![product(&mut seq, "A", 3)];
        let id = products[0].id_typed();
        Action::execute(
            Mutation::DecrementStock {
                product_id: id,
                amount: 3,
            },
            &mut products,
        )
        .unwrap();
        assert_eq!(products[0].quantity(), 0);
    }

    #[test]
    fn descriptions_name_the_product() {
        let mut seq = CodeSequence::default();
        let mut products = Vec::new();
        let p = product(&mut seq, "Stapler", 2);
        let id = p.id_typed();

        let added = Action::execute(Mutation::Add(p), &mut products).unwrap();
        assert_eq!(added.description(), "Added: Stapler");
        assert_eq!(added.product_code().as_str(), "P001");

        let removed = Action::execute(Mutation::Remove(id), &mut products).unwrap();
        assert_eq!(removed.description(), "Removed: Stapler");
    }
}
