//! Search strategies over a product snapshot.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use kiputech_core::DomainError;
use kiputech_products::Product;

/// A lookup algorithm over products in inventory order.
///
/// Each strategy picks its own result shape: an exact lookup yields at most
/// one product, a fuzzy one yields many.
pub trait SearchStrategy {
    type Output<'a>;

    fn search<'a>(&self, products: &'a [Product], value: &str) -> Self::Output<'a>;
}

/// Exact code lookup (trimmed, case-insensitive). First match wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByCode;

impl SearchStrategy for ByCode {
    type Output<'a> = Option<&'a Product>;

    fn search<'a>(&self, products: &'a [Product], value: &str) -> Self::Output<'a> {
        products.iter().find(|p| p.code().matches(value))
    }
}

/// Case-insensitive substring match on the name, in inventory order.
///
/// No match is an empty result, not an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByName;

impl SearchStrategy for ByName {
    type Output<'a> = Vec<&'a Product>;

    fn search<'a>(&self, products: &'a [Product], value: &str) -> Self::Output<'a> {
        let needle = value.to_lowercase();
        products
            .iter()
            .filter(|p| p.name().to_lowercase().contains(&needle))
            .collect()
    }
}

/// Runtime selector for callers that choose the strategy from user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchBy {
    Code,
    Name,
}

impl SearchBy {
    /// Run the selected strategy, flattening its result into a list.
    pub fn run<'a>(self, products: &'a [Product], value: &str) -> Vec<&'a Product> {
        match self {
            SearchBy::Code => ByCode.search(products, value).into_iter().collect(),
            SearchBy::Name => ByName.search(products, value),
        }
    }
}

impl FromStr for SearchBy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "code" => Ok(SearchBy::Code),
            "name" => Ok(SearchBy::Name),
            other => Err(DomainError::invalid_input(format!(
                "unknown search strategy '{other}' (expected 'code' or 'name')"
            ))),
        }
    }
}
