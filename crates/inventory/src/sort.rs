//! Sort orders for inventory snapshots.

use core::cmp::Ordering;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use kiputech_core::DomainError;
use kiputech_products::Product;

/// Stock or price, ascending or descending.
///
/// Sorting is stable: products with equal keys keep their inventory order in
/// both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    StockAsc,
    StockDesc,
    PriceAsc,
    PriceDesc,
}

impl SortOrder {
    pub const ALL: [SortOrder; 4] = [
        SortOrder::StockAsc,
        SortOrder::StockDesc,
        SortOrder::PriceAsc,
        SortOrder::PriceDesc,
    ];

    /// Return a new ordering of `products`; the slice itself is untouched.
    pub fn apply<'a>(self, products: &'a [Product]) -> Vec<&'a Product> {
        let mut sorted: Vec<&Product> = products.iter().collect();
        sorted.sort_by(|a, b| self.compare(a, b));
        sorted
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortOrder::StockAsc => a.quantity().cmp(&b.quantity()),
            SortOrder::StockDesc => b.quantity().cmp(&a.quantity()),
            SortOrder::PriceAsc => a.price().total_cmp(&b.price()),
            SortOrder::PriceDesc => b.price().total_cmp(&a.price()),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::StockAsc => "stock-asc",
            SortOrder::StockDesc => "stock-desc",
            SortOrder::PriceAsc => "price-asc",
            SortOrder::PriceDesc => "price-desc",
        }
    }
}

impl core::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        SortOrder::ALL
            .into_iter()
            .find(|order| order.as_str() == wanted)
            .ok_or_else(|| DomainError::invalid_input(format!("unknown sort order '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiputech_products::{CodeSequence, ProductDraft};

    fn catalog(rows: &[(&str, i64, f64)]) -> Vec<Product> {
        let mut seq = CodeSequence::default();
        rows.iter()
            .map(|(name, qty, price)| {
                Product::new(ProductDraft::new(*name, "x", *qty, *price), &mut seq).unwrap()
            })
            .collect()
    }

    fn names(sorted: Vec<&Product>) -> Vec<&str> {
        sorted.into_iter().map(|p| p.name()).collect()
    }

    #[test]
    fn stock_orders_both_ways() {
        let products = catalog(&[("a", 5, 1.0), ("b", 1, 1.0), ("c", 9, 1.0)]);
        assert_eq!(names(SortOrder::StockAsc.apply(&products)), vec!["b", "a", "c"]);
        assert_eq!(names(SortOrder::StockDesc.apply(&products)), vec!["c", "a", "b"]);
    }

    #[test]
    fn price_orders_both_ways() {
        let products = catalog(&[("a", 1, 2.5), ("b", 1, 0.99), ("c", 1, 10.0)]);
        assert_eq!(names(SortOrder::PriceAsc.apply(&products)), vec!["b", "a", "c"]);
        assert_eq!(names(SortOrder::PriceDesc.apply(&products)), vec!["c", "a", "b"]);
    }

    #[test]
    fn ties_keep_inventory_order_in_both_directions() {
        let products = catalog(&[("a", 2, 1.0), ("b", 1, 1.0), ("c", 2, 1.0), ("d", 1, 1.0)]);
        assert_eq!(names(SortOrder::StockAsc.apply(&products)), vec!["b", "d", "a", "c"]);
        assert_eq!(names(SortOrder::StockDesc.apply(&products)), vec!["a", "c", "b", "d"]);
    }

    #[test]
    fn zero_and_negative_zero_prices_tie() {
        let products = catalog(&[("first", 1, 0.0), ("second", 1, -0.0)]);
        assert_eq!(names(SortOrder::PriceAsc.apply(&products)), vec!["first", "second"]);
        assert_eq!(names(SortOrder::PriceDesc.apply(&products)), vec!["first", "second"]);
    }

    #[test]
    fn sorting_does_not_touch_the_source() {
        let products = catalog(&[("a", 5, 1.0), ("b", 1, 1.0)]);
        let _ = SortOrder::StockAsc.apply(&products);
        assert_eq!(products[0].name(), "a");
    }

    #[test]
    fn parses_from_selector_strings() {
        for order in SortOrder::ALL {
            assert_eq!(order.to_string().parse::<SortOrder>().unwrap(), order);
        }
        assert_eq!(" Price-Desc ".parse::<SortOrder>().unwrap(), SortOrder::PriceDesc);
        assert!("name".parse::<SortOrder>().is_err());
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: output is a permutation, ordered by key, stable on ties.
            #[test]
            fn sort_is_stable_and_ordered(quantities in proptest::collection::vec(0i64..5, 0..30)) {
                let mut seq = CodeSequence::default();
                let products: Vec<Product> = quantities
                    .iter()
                    .enumerate()
                    .map(|(i, q)| Product::new(ProductDraft::new(format!("p{i}"), "x", *q, 1.0), &mut seq).unwrap())
                    .collect();

                let sorted = SortOrder::StockAsc.apply(&products);
                prop_assert_eq!(sorted.len(), products.len());

                let index_of = |p: &Product| products.iter().position(|q| q.id_typed() == p.id_typed()).unwrap();
                for pair in sorted.windows(2) {
                    let (a, b) = (pair[0], pair[1]);
                    prop_assert!(a.quantity() <= b.quantity());
                    if a.quantity() == b.quantity() {
                        prop_assert!(index_of(a) < index_of(b));
                    }
                }
            }
        }
    }
}
