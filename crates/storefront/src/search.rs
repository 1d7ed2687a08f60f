//! Title search over fetched products.

use mini_store_core::Product;

/// Products whose title contains `query`, ignoring case, in input order.
///
/// An empty query matches every product.
#[must_use]
pub fn filter_by_title<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let needle = query.to_lowercase();
    products
        .iter()
        .filter(|product| product.title.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use mini_store_core::ProductId;

    use super::*;

    fn product(id: i32, title: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: title.to_string(),
            price: "1.00".parse().unwrap(),
            category: "test".to_string(),
            description: String::new(),
            image: String::new(),
            rating: None,
        }
    }

    fn titles(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.title.clone()).collect()
    }

    #[test]
    fn test_case_insensitive_substring() {
        let products = vec![
            product(1, "Fjallraven Backpack"),
            product(2, "Mens Casual T-Shirt"),
            product(3, "Backpack Rain Cover"),
        ];
        assert_eq!(
            titles(&filter_by_title(&products, "backPACK")),
            vec!["Fjallraven Backpack", "Backpack Rain Cover"]
        );
    }

    #[test]
    fn test_empty_query_matches_all() {
        let products = vec![product(1, "A"), product(2, "B")];
        assert_eq!(filter_by_title(&products, "").len(), 2);
    }

    #[test]
    fn test_no_match() {
        let products = vec![product(1, "Mug")];
        assert!(filter_by_title(&products, "laptop").is_empty());
    }
}
