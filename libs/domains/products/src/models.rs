use serde::{Deserialize, Deserializer, Serialize, de};
use std::{fmt, str::FromStr};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Brand linked to a product through the `product_brand` relation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Brand {
    /// Brand identifier, without table prefix
    #[schema(example = "brand_sony")]
    pub id: String,

    #[schema(example = "Sony")]
    pub name: String,
}

/// Product entity as returned to callers
///
/// Identifiers never carry a storage-table prefix and `brands` is always
/// present, empty when the product has no brand relation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    #[schema(example = "prod_98765")]
    pub id: String,

    #[schema(example = "Sony WH-1000XM4 Wireless Headphones")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = 349.99)]
    pub price: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "https://example.com/sony-wh-1000xm4")]
    pub url: Option<String>,

    /// Reference to the product's primary brand
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    #[serde(default)]
    pub brands: Vec<Brand>,
}

/// DTO for creating a new product; the store assigns the identifier
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,

    #[serde(default)]
    #[validate(url)]
    pub url: Option<String>,

    #[serde(default)]
    pub brand: Option<String>,
}

/// DTO for a merge update: only the fields that are present are written
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
pub struct UpdateProduct {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

impl UpdateProduct {
    /// True when no field would be written.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.url.is_none()
            && self.brand.is_none()
    }

    /// Overlay the present fields onto `product`.
    pub fn apply_to(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(description) = self.description {
            product.description = Some(description);
        }
        if let Some(price) = self.price {
            product.price = Some(price);
        }
        if let Some(url) = self.url {
            product.url = Some(url);
        }
        if let Some(brand) = self.brand {
            product.brand = Some(brand);
        }
    }
}

/// Pagination metadata for list responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Number of products in the store
    pub total: u64,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    /// `limit` is set and `offset + limit < total`
    pub has_more: bool,
}

impl Pagination {
    pub fn new(total: u64, limit: Option<u64>, offset: Option<u64>) -> Self {
        let has_more = limit.is_some_and(|limit| offset.unwrap_or(0).saturating_add(limit) < total);

        Self {
            total,
            limit,
            offset,
            has_more,
        }
    }
}

/// A page of products plus its metadata
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPage {
    pub data: Vec<Product>,
    pub pagination: Pagination,
}

/// Query parameters for `GET /products`
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Maximum number of products to return
    #[serde(default, deserialize_with = "empty_as_none")]
    pub limit: Option<u64>,
    /// Number of products to skip
    #[serde(default, deserialize_with = "empty_as_none")]
    pub offset: Option<u64>,
}

/// `?limit=` is treated like an absent `limit`.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match Option::<String>::deserialize(deserializer)?.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

/// Slice `items` to the requested window.
///
/// Without `limit` everything from `offset` on is returned; without either,
/// the input is returned unchanged.
pub fn paginate<T>(items: Vec<T>, limit: Option<u64>, offset: Option<u64>) -> Vec<T> {
    let skip = usize::try_from(offset.unwrap_or(0)).unwrap_or(usize::MAX);
    let take = limit.map_or(usize::MAX, |l| usize::try_from(l).unwrap_or(usize::MAX));

    items.into_iter().skip(skip).take(take).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_has_more() {
        assert!(Pagination::new(5, Some(2), Some(0)).has_more);
        assert!(Pagination::new(5, Some(2), None).has_more);
        assert!(!Pagination::new(5, Some(2), Some(3)).has_more);
        assert!(!Pagination::new(5, None, Some(0)).has_more);
        assert!(!Pagination::new(0, Some(10), None).has_more);
    }

    #[test]
    fn test_pagination_serializes_camel_case() {
        let value = serde_json::to_value(Pagination::new(3, Some(2), None)).unwrap();
        assert_eq!(
            value,
            json!({"total": 3, "limit": 2, "offset": null, "hasMore": true})
        );
    }

    #[test]
    fn test_paginate_windows() {
        let items: Vec<u32> = (0..5).collect();
        assert_eq!(paginate(items.clone(), Some(2), Some(1)), vec![1, 2]);
        assert_eq!(paginate(items.clone(), Some(2), None), vec![0, 1]);
        assert_eq!(paginate(items.clone(), None, None), items);
        assert_eq!(paginate(items.clone(), None, Some(3)), vec![3, 4]);
        assert!(paginate(items.clone(), Some(2), Some(10)).is_empty());
        assert!(paginate(items, Some(0), None).is_empty());
    }

    #[test]
    fn test_paginate_length_is_consistent_with_has_more() {
        let items: Vec<u32> = (0..7).collect();
        for offset in 0..9u64 {
            for limit in 0..9u64 {
                let page = paginate(items.clone(), Some(limit), Some(offset));
                let meta = Pagination::new(items.len() as u64, Some(limit), Some(offset));
                let remaining = (items.len() as u64).saturating_sub(offset);
                assert_eq!(page.len() as u64, limit.min(remaining));
                assert_eq!(meta.has_more, offset + limit < items.len() as u64);
            }
        }
    }

    #[test]
    fn test_page_query_empty_values_are_absent() {
        let query: PageQuery = serde_json::from_value(json!({"limit": "", "offset": "3"})).unwrap();
        assert_eq!(query.limit, None);
        assert_eq!(query.offset, Some(3));

        assert!(serde_json::from_value::<PageQuery>(json!({"limit": "-1"})).is_err());
    }

    #[test]
    fn test_create_product_validation() {
        let valid = CreateProduct {
            name: "Widget".into(),
            price: Some(9.99),
            url: Some("http://x.example".into()),
            ..Default::default()
        };
        assert!(valid.validate().is_ok());

        let empty_name = CreateProduct {
            name: String::new(),
            ..Default::default()
        };
        assert!(empty_name.validate().is_err());

        let negative_price = CreateProduct {
            name: "Widget".into(),
            price: Some(-1.0),
            ..Default::default()
        };
        assert!(negative_price.validate().is_err());

        let bad_url = CreateProduct {
            name: "Widget".into(),
            url: Some("not a url".into()),
            ..Default::default()
        };
        assert!(bad_url.validate().is_err());
    }

    #[test]
    fn test_update_product_apply_keeps_absent_fields() {
        let mut product = Product {
            id: "p1".into(),
            name: "Widget".into(),
            description: Some("Blue".into()),
            price: Some(9.99),
            url: Some("http://x.example".into()),
            brand: None,
            brands: vec![],
        };

        let patch = UpdateProduct {
            price: Some(12.5),
            ..Default::default()
        };
        assert!(!patch.is_empty());
        patch.apply_to(&mut product);

        assert_eq!(product.price, Some(12.5));
        assert_eq!(product.name, "Widget");
        assert_eq!(product.description.as_deref(), Some("Blue"));
        assert_eq!(product.url.as_deref(), Some("http://x.example"));
    }

    #[test]
    fn test_update_product_deserializes_partial_body() {
        let patch: UpdateProduct = serde_json::from_value(json!({"price": 3})).unwrap();
        assert_eq!(patch.price, Some(3.0));
        assert!(patch.name.is_none());
        assert!(UpdateProduct::default().is_empty());
    }
}
