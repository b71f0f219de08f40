//! Paginated response envelope.

use serde::{Deserialize, Serialize};

/// The backend's pagination envelope: `{count, next, previous, results}`.
///
/// `next`/`previous` are opaque page URLs; the client only checks them for
/// presence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Paginated<T> {
    /// Whether more pages follow this one.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_roundtrip() {
        let json = serde_json::json!({
            "count": 2,
            "next": "https://shop.example/api/v1/products/?page=2",
            "previous": null,
            "results": [1, 2]
        });
        let page: Paginated<i64> = serde_json::from_value(json).expect("deserialize");
        assert_eq!(page.count, 2);
        assert!(page.has_next());
        assert_eq!(page.results, vec![1, 2]);
    }
}
