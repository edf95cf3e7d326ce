//! The catalog filter builder.
//!
//! Translates the optional, loosely-typed request parameters into a single
//! MongoDB predicate plus pagination offsets. The predicate always pins
//! `isDeleted: false`; everything else is added only when the corresponding
//! parameter is present.
//!
//! Price bounds use two different comparison mechanisms depending on how many
//! bounds are present: both bounds compile to an `$expr` conjunction of
//! field-relative comparisons, a single bound to a literal one-sided
//! comparison on the `price` field. Downstream behavior is identical for
//! numeric values; the asymmetry is part of the observed contract and is kept.

use mongodb::bson::{doc, oid::ObjectId, Document};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::error::{ProductError, ProductResult};

/// Raw search parameters as they arrive on the query string.
///
/// Every field is optional and independently combinable.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    /// Case-insensitive substring match against the product name
    pub keyword: Option<String>,
    /// Category id (hex string)
    pub category_id: Option<String>,
    /// Supplier id (hex string)
    pub supplier_id: Option<String>,
    /// Lower price bound (inclusive)
    pub price_start: Option<f64>,
    /// Upper price bound (inclusive)
    pub price_end: Option<f64>,
    /// 1-based page number
    pub page: Option<u64>,
    /// Page size; values ≤ 0 fall back to the default of 12
    pub page_size: Option<i64>,
}

/// Pagination offsets computed from `page`/`pageSize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: i64,
    pub skip: u64,
}

impl Pagination {
    /// Default page size when `pageSize` is absent or non-positive.
    pub const DEFAULT_LIMIT: i64 = 12;

    /// `limit = pageSize` when positive, else 12; `skip = limit × (page − 1)`
    /// when a page ≥ 1 is given, else 0. No upper bound is enforced on
    /// `limit`.
    pub fn from_query(page: Option<u64>, page_size: Option<i64>) -> Self {
        let limit = match page_size {
            Some(size) if size > 0 => size,
            _ => Self::DEFAULT_LIMIT,
        };
        let skip = match page {
            Some(page) if page >= 1 => limit as u64 * (page - 1),
            _ => 0,
        };
        Self { limit, skip }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::from_query(None, None)
    }
}

/// Normalized search filter: parsed ids, bounds, and pagination.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    pub keyword: Option<String>,
    pub category_id: Option<ObjectId>,
    pub supplier_id: Option<ObjectId>,
    pub price_start: Option<f64>,
    pub price_end: Option<f64>,
    pub pagination: Pagination,
}

impl SearchFilter {
    /// Parse the raw query parameters. A malformed category/supplier id fails
    /// the whole search (the caller collapses this into its generic failure).
    pub fn from_query(query: ProductQuery) -> ProductResult<Self> {
        let category_id = query
            .category_id
            .as_deref()
            .map(str::parse::<ObjectId>)
            .transpose()
            .map_err(|e| ProductError::Validation(format!("Invalid categoryId: {}", e)))?;
        let supplier_id = query
            .supplier_id
            .as_deref()
            .map(str::parse::<ObjectId>)
            .transpose()
            .map_err(|e| ProductError::Validation(format!("Invalid supplierId: {}", e)))?;

        Ok(Self {
            keyword: query.keyword.filter(|k| !k.is_empty()),
            category_id,
            supplier_id,
            price_start: query.price_start,
            price_end: query.price_end,
            pagination: Pagination::from_query(query.page, query.page_size),
        })
    }

    /// Pagination-only filter (the plain listing path).
    pub fn page_only(page: Option<u64>, page_size: Option<i64>) -> Self {
        Self {
            pagination: Pagination::from_query(page, page_size),
            ..Self::default()
        }
    }

    /// Compile the filter into a MongoDB predicate document.
    pub fn predicate(&self) -> Document {
        let mut condition = doc! { "isDeleted": false };

        if let Some(ref keyword) = self.keyword {
            condition.insert(
                "name",
                doc! { "$regex": fuzzy_pattern(keyword), "$options": "i" },
            );
        }

        if let Some(category_id) = self.category_id {
            condition.insert("categoryId", category_id);
        }
        if let Some(supplier_id) = self.supplier_id {
            condition.insert("supplierId", supplier_id);
        }

        match (self.price_start, self.price_end) {
            (Some(start), Some(end)) => {
                // Both bounds: field-relative expression comparisons
                let compare_start = doc! { "$lte": ["$price", end] };
                let compare_end = doc! { "$gte": ["$price", start] };
                condition.insert("$expr", doc! { "$and": [compare_start, compare_end] });
            }
            (Some(start), None) => {
                // One bound: literal comparison
                condition.insert("price", doc! { "$gte": start });
            }
            (None, Some(end)) => {
                condition.insert("price", doc! { "$lte": end });
            }
            (None, None) => {}
        }

        condition
    }
}

/// Fixed sort order for listing/search results: name ascending, price
/// ascending, discount descending. With a stable sort the secondary keys only
/// matter when names collide.
pub fn sort_spec() -> Document {
    doc! { "name": 1, "price": 1, "discount": -1 }
}

/// Compile a keyword into a case-insensitive substring pattern, escaping
/// regex metacharacters so user input matches literally.
pub fn fuzzy_pattern(keyword: &str) -> String {
    regex::escape(keyword)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::Bson;

    #[test]
    fn test_pagination_defaults() {
        let p = Pagination::from_query(None, None);
        assert_eq!(p.limit, 12);
        assert_eq!(p.skip, 0);
    }

    #[test]
    fn test_pagination_law() {
        // skip = limit × (page − 1)
        let p = Pagination::from_query(Some(3), Some(20));
        assert_eq!(p.limit, 20);
        assert_eq!(p.skip, 40);

        let p = Pagination::from_query(Some(1), Some(20));
        assert_eq!(p.skip, 0);
    }

    #[test]
    fn test_pagination_zero_page_size_falls_back_to_default() {
        let p = Pagination::from_query(Some(2), Some(0));
        assert_eq!(p.limit, 12);
        assert_eq!(p.skip, 12);

        let p = Pagination::from_query(Some(2), Some(-5));
        assert_eq!(p.limit, 12);
    }

    #[test]
    fn test_pagination_page_zero_means_no_skip() {
        let p = Pagination::from_query(Some(0), Some(10));
        assert_eq!(p.skip, 0);
    }

    #[test]
    fn test_pagination_no_upper_bound_on_limit() {
        // Unbounded page size is reproduced as-is
        let p = Pagination::from_query(Some(1), Some(1_000_000));
        assert_eq!(p.limit, 1_000_000);
    }

    #[test]
    fn test_predicate_always_excludes_deleted() {
        let predicate = SearchFilter::default().predicate();
        assert_eq!(predicate.get_bool("isDeleted").unwrap(), false);
        assert_eq!(predicate.len(), 1);
    }

    #[test]
    fn test_predicate_keyword_is_case_insensitive_regex() {
        let filter = SearchFilter {
            keyword: Some("phone".to_string()),
            ..Default::default()
        };
        let predicate = filter.predicate();

        let name = predicate.get_document("name").unwrap();
        assert_eq!(name.get_str("$regex").unwrap(), "phone");
        assert_eq!(name.get_str("$options").unwrap(), "i");
    }

    #[test]
    fn test_predicate_keyword_escapes_metacharacters() {
        let filter = SearchFilter {
            keyword: Some("usb-c (2m)".to_string()),
            ..Default::default()
        };
        let predicate = filter.predicate();

        let pattern = predicate
            .get_document("name")
            .unwrap()
            .get_str("$regex")
            .unwrap();
        assert!(pattern.contains("\\("), "parens escaped: {pattern}");
    }

    #[test]
    fn test_predicate_reference_equality() {
        let category_id = ObjectId::new();
        let supplier_id = ObjectId::new();
        let filter = SearchFilter {
            category_id: Some(category_id),
            supplier_id: Some(supplier_id),
            ..Default::default()
        };
        let predicate = filter.predicate();

        assert_eq!(
            predicate.get_object_id("categoryId").unwrap(),
            category_id
        );
        assert_eq!(
            predicate.get_object_id("supplierId").unwrap(),
            supplier_id
        );
    }

    #[test]
    fn test_predicate_both_bounds_use_expression_comparison() {
        let filter = SearchFilter {
            price_start: Some(20.0),
            price_end: Some(50.0),
            ..Default::default()
        };
        let predicate = filter.predicate();

        // No literal price key when both bounds are present
        assert!(!predicate.contains_key("price"));

        let expr = predicate.get_document("$expr").unwrap();
        let and = expr.get_array("$and").unwrap();
        assert_eq!(and.len(), 2);

        let first = and[0].as_document().unwrap();
        let lte = first.get_array("$lte").unwrap();
        assert_eq!(lte[0], Bson::String("$price".to_string()));
        assert_eq!(lte[1], Bson::Double(50.0));

        let second = and[1].as_document().unwrap();
        let gte = second.get_array("$gte").unwrap();
        assert_eq!(gte[0], Bson::String("$price".to_string()));
        assert_eq!(gte[1], Bson::Double(20.0));
    }

    #[test]
    fn test_predicate_single_bound_uses_literal_comparison() {
        let lower_only = SearchFilter {
            price_start: Some(20.0),
            ..Default::default()
        };
        let predicate = lower_only.predicate();
        assert!(!predicate.contains_key("$expr"));
        let price = predicate.get_document("price").unwrap();
        assert_eq!(price.get_f64("$gte").unwrap(), 20.0);
        assert!(!price.contains_key("$lte"));

        let upper_only = SearchFilter {
            price_end: Some(50.0),
            ..Default::default()
        };
        let predicate = upper_only.predicate();
        let price = predicate.get_document("price").unwrap();
        assert_eq!(price.get_f64("$lte").unwrap(), 50.0);
    }

    #[test]
    fn test_from_query_rejects_malformed_ids() {
        let query = ProductQuery {
            category_id: Some("not-an-id".to_string()),
            ..Default::default()
        };
        assert!(SearchFilter::from_query(query).is_err());

        let query = ProductQuery {
            supplier_id: Some("xyz".to_string()),
            ..Default::default()
        };
        assert!(SearchFilter::from_query(query).is_err());
    }

    #[test]
    fn test_from_query_drops_empty_keyword() {
        let query = ProductQuery {
            keyword: Some(String::new()),
            ..Default::default()
        };
        let filter = SearchFilter::from_query(query).unwrap();
        assert!(filter.keyword.is_none());
    }

    #[test]
    fn test_sort_spec_key_order() {
        let sort = sort_spec();
        let keys: Vec<&str> = sort.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["name", "price", "discount"]);
        assert_eq!(sort.get_i32("name").unwrap(), 1);
        assert_eq!(sort.get_i32("price").unwrap(), 1);
        assert_eq!(sort.get_i32("discount").unwrap(), -1);
    }
}
