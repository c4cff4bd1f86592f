use chrono::{DateTime, Utc};
use serde::Serialize;

use kiputech_core::{DomainError, DomainResult, Entity, ProductId};

use crate::code::{CodeSequence, ProductCode};

/// Caller-supplied fields for a new product, before validation.
///
/// Quantity is signed here so that a negative value can be reported as
/// invalid input instead of being unrepresentable.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub code: Option<String>,
    pub name: String,
    pub category: String,
    pub quantity: i64,
    pub price: f64,
}

impl ProductDraft {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        quantity: i64,
        price: f64,
    ) -> Self {
        Self {
            code: None,
            name: name.into(),
            category: category.into(),
            quantity,
            price,
        }
    }

    /// Use a manual code instead of an auto-generated one.
    ///
    /// A blank code behaves like no code at all.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Build a draft from raw text fields (menu input, import records).
    pub fn parse(name: &str, category: &str, quantity: &str, price: &str) -> DomainResult<Self> {
        let quantity = quantity.trim().parse::<i64>().map_err(|_| {
            DomainError::invalid_input(format!("quantity must be a whole number, got '{quantity}'"))
        })?;
        let price = price
            .trim()
            .parse::<f64>()
            .map_err(|_| DomainError::invalid_input(format!("price must be a number, got '{price}'")))?;
        Ok(Self::new(name, category, quantity, price))
    }
}

/// An inventory line item.
///
/// Fields are private; quantity only changes through [`Product::set_quantity`],
/// which the inventory's actions call. Non-negativity of stock is guaranteed by
/// the type at rest and enforced on decrement by the inventory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    id: ProductId,
    code: ProductCode,
    name: String,
    category: String,
    quantity: u64,
    price: f64,
    created_at: DateTime<Utc>,
    last_modified_at: DateTime<Utc>,
}

impl Product {
    /// Validate a draft and assign it a code.
    ///
    /// Numbers are checked before the sequence is touched, so a rejected draft
    /// never consumes or advances a code.
    pub fn new(draft: ProductDraft, codes: &mut CodeSequence) -> DomainResult<Self> {
        if draft.quantity < 0 {
            return Err(DomainError::invalid_input(format!(
                "quantity cannot be negative (got {})",
                draft.quantity
            )));
        }
        if !draft.price.is_finite() || draft.price < 0.0 {
            return Err(DomainError::invalid_input(format!(
                "price must be a non-negative number (got {})",
                draft.price
            )));
        }
        // Checked above.
        let quantity = draft.quantity.unsigned_abs();
        // `-0.0` passes the sign check; store it as plain zero.
        let price = if draft.price == 0.0 { 0.0 } else { draft.price };

        let code = match draft.code.as_deref().map(str::trim) {
            Some(manual) if !manual.is_empty() => {
                codes.observe(manual);
                ProductCode::new(manual)
            }
            _ => codes.next_code(),
        };

        let now = Utc::now();
        Ok(Self {
            id: ProductId::new(),
            code,
            name: draft.name.trim().to_string(),
            category: draft.category.trim().to_string(),
            quantity,
            price,
            created_at: now,
            last_modified_at: now,
        })
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn code(&self) -> &ProductCode {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_modified_at(&self) -> DateTime<Utc> {
        self.last_modified_at
    }

    /// Overwrite stock and refresh the modification timestamp.
    ///
    /// No validation here: callers (stock actions) own the rules.
    pub fn set_quantity(&mut self, quantity: u64) {
        self.quantity = quantity;
        self.last_modified_at = Utc::now();
    }

    /// Fixed-width summary line for tables.
    pub fn row(&self) -> ProductRow<'_> {
        ProductRow(self)
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Display adapter: `code name category price quantity` in fixed columns.
#[derive(Debug, Clone, Copy)]
pub struct ProductRow<'a>(&'a Product);

impl ProductRow<'_> {
    pub fn header() -> String {
        format!(
            "{:<10} {:<20} {:<15} {:<10} {:<5}",
            "Code", "Name", "Category", "Price", "Stock"
        )
    }
}

impl core::fmt::Display for ProductRow<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let p = self.0;
        write!(
            f,
            "{:<10} {:<20} {:<15} {:<10.2} {:<5}",
            p.code.as_str(),
            p.name,
            p.category,
            p.price,
            p.quantity
        )
    }
}
