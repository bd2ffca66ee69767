use serde::{Deserialize, Deserializer, Serialize};

/// A product as served by the catalog. Never mutated after it is fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub title: String,
    #[serde(deserialize_with = "non_negative_price")]
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub rate: f64,
    pub count: u32,
}

impl Product {
    pub fn new(id: u64, title: impl Into<String>, price: f64) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            description: String::new(),
            image: String::new(),
            category: None,
            rating: None,
        }
    }

    /// Case-insensitive substring match on the title.
    ///
    /// `needle` must already be lower-cased.
    pub fn title_matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
    }
}

fn non_negative_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let price = f64::deserialize(deserializer)?;
    if price < 0.0 {
        return Err(serde::de::Error::custom(format!(
            "price must not be negative, got {price}"
        )));
    }
    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_catalog_payload() {
        let json = r#"{
            "id": 1,
            "title": "Fjallraven - Foldsack No. 1 Backpack",
            "price": 109.95,
            "description": "Your perfect pack for everyday use",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, 1);
        assert_eq!(product.price, 109.95);
        assert_eq!(product.category.as_deref(), Some("men's clothing"));
        assert_eq!(product.rating.map(|r| r.count), Some(120));
    }

    #[test]
    fn negative_price_is_rejected() {
        let json = r#"{ "id": 4, "title": "Refund", "price": -1.5 }"#;
        let err = serde_json::from_str::<Product>(json).unwrap_err();
        assert!(err.to_string().contains("price must not be negative"), "{err}");
    }

    #[test]
    fn free_product_is_accepted() {
        let json = r#"{ "id": 4, "title": "Sticker", "price": 0 }"#;
        assert_eq!(serde_json::from_str::<Product>(json).unwrap().price, 0.0);
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let json = r#"{ "id": 1, "price": 3.0 }"#;
        assert!(serde_json::from_str::<Product>(json).is_err());
    }
}
