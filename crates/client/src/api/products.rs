//! Catalog endpoints: categories and products.

use blossom_core::{Category, Money, Paginated, Product};

use crate::api::{ApiClient, ApiError};

const CATEGORIES_CACHE_KEY: &str = "categories";

/// Filters accepted by the product list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductsFilter {
    /// Category slug.
    pub category: Option<String>,
    /// Free-text search.
    pub search: Option<String>,
    pub min_price: Option<Money>,
    pub max_price: Option<Money>,
    /// Only products currently in stock.
    pub in_stock: bool,
    /// Backend ordering key, e.g. `price` or `-created_at`.
    pub ordering: Option<String>,
    /// Page number; absent means the first page.
    pub page: Option<u32>,
}

impl ProductsFilter {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(min_price) = self.min_price {
            pairs.push(("min_price", min_price.as_minor().to_string()));
        }
        if let Some(max_price) = self.max_price {
            pairs.push(("max_price", max_price.as_minor().to_string()));
        }
        if self.in_stock {
            pairs.push(("in_stock", "true".to_string()));
        }
        if let Some(ordering) = &self.ordering {
            pairs.push(("ordering", ordering.clone()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        pairs
    }

    /// Stable cache key for this filter combination.
    fn cache_key(&self) -> String {
        let pairs = self.query_pairs();
        let mut key = String::from("products");
        for (name, value) in pairs {
            key.push('&');
            key.push_str(name);
            key.push('=');
            key.push_str(&value);
        }
        key
    }
}

impl ApiClient {
    /// List all categories (cached for 5 minutes).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, a non-success status, or
    /// an unexpected response shape.
    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        if let Some(hit) = self.categories_cache().get(CATEGORIES_CACHE_KEY).await {
            return Ok(hit);
        }

        let categories: Vec<Category> = self.get("products/categories/", &[]).await?;
        self.categories_cache()
            .insert(CATEGORIES_CACHE_KEY.to_string(), categories.clone())
            .await;
        Ok(categories)
    }

    /// Fetch one category by slug.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`]; a 404 surfaces as `ApiError::Status`.
    pub async fn category(&self, slug: &str) -> Result<Category, ApiError> {
        self.get(&format!("products/categories/{slug}/"), &[]).await
    }

    /// List products matching a filter (cached for 2 minutes per filter
    /// combination).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, a non-success status, or
    /// an unexpected response shape.
    pub async fn products(&self, filter: &ProductsFilter) -> Result<Paginated<Product>, ApiError> {
        let key = filter.cache_key();
        if let Some(hit) = self.products_cache().get(&key).await {
            return Ok(hit);
        }

        let page: Paginated<Product> = self.get("products/", &filter.query_pairs()).await?;
        self.products_cache().insert(key, page.clone()).await;
        Ok(page)
    }

    /// Fetch one product by slug. Uncached: detail views want current
    /// availability.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`]; a 404 surfaces as `ApiError::Status`.
    pub async fn product(&self, slug: &str) -> Result<Product, ApiError> {
        self.get(&format!("products/{slug}/"), &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_has_no_pairs() {
        assert!(ProductsFilter::default().query_pairs().is_empty());
    }

    #[test]
    fn test_filter_query_pairs() {
        let filter = ProductsFilter {
            category: Some("roses".to_string()),
            search: None,
            min_price: Some(Money::from_minor(100_000)),
            max_price: None,
            in_stock: true,
            ordering: Some("-created_at".to_string()),
            page: Some(2),
        };
        assert_eq!(
            filter.query_pairs(),
            vec![
                ("category", "roses".to_string()),
                ("min_price", "100000".to_string()),
                ("in_stock", "true".to_string()),
                ("ordering", "-created_at".to_string()),
                ("page", "2".to_string()),
            ]
        );
    }

    #[test]
    fn test_cache_key_distinguishes_filters() {
        let all = ProductsFilter::default();
        let page_two = ProductsFilter {
            page: Some(2),
            ..ProductsFilter::default()
        };
        assert_ne!(all.cache_key(), page_two.cache_key());
    }
}
