//! Conversion of raw store documents into canonical [`Product`]s.
//!
//! Every function here is total: malformed or missing fields degrade to
//! empty values instead of failing, and array order is preserved.

use mongodb::bson::{Bson, Document};

use crate::models::{Brand, Product};

/// Collection (table) holding products
pub const PRODUCT_TABLE: &str = "product";
/// Collection (table) holding brands
pub const BRAND_TABLE: &str = "brands";
/// Edge collection for `product -> brand` relations
pub const PRODUCT_BRAND_TABLE: &str = "product_brand";

/// Strip a leading `<table>:` qualifier from `raw`.
pub fn strip_table_prefix<'a>(raw: &'a str, table: &str) -> &'a str {
    raw.strip_prefix(table)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(raw)
}

/// Canonical product identifier: `product:abc` becomes `abc`, anything else
/// is returned unchanged.
pub fn clean_identifier(raw: &str) -> String {
    strip_table_prefix(raw, PRODUCT_TABLE).to_string()
}

/// Render a stored identifier as a string without its `table` prefix.
///
/// ObjectIds become their hex form; absent or null values become `""`.
pub fn identifier_from_bson(value: Option<&Bson>, table: &str) -> String {
    match value {
        Some(Bson::String(s)) => strip_table_prefix(s, table).to_string(),
        Some(Bson::ObjectId(oid)) => oid.to_hex(),
        Some(Bson::Int32(n)) => n.to_string(),
        Some(Bson::Int64(n)) => n.to_string(),
        Some(Bson::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn string_field(doc: &Document, key: &str) -> Option<String> {
    match doc.get(key) {
        Some(Bson::String(s)) => Some(s.clone()),
        _ => None,
    }
}

fn number_field(doc: &Document, key: &str) -> Option<f64> {
    match doc.get(key) {
        Some(Bson::Double(n)) => Some(*n),
        Some(Bson::Int32(n)) => Some(f64::from(*n)),
        Some(Bson::Int64(n)) => Some(*n as f64),
        _ => None,
    }
}

/// Map a raw brand entry to a [`Brand`].
///
/// Entries are either full brand documents or bare brand references; the
/// latter yield a brand with an empty name.
pub fn to_canonical_brand(raw: &Bson) -> Option<Brand> {
    match raw {
        Bson::Document(doc) => Some(Brand {
            id: identifier_from_bson(doc.get("_id").or_else(|| doc.get("id")), BRAND_TABLE),
            name: string_field(doc, "name").unwrap_or_default(),
        }),
        Bson::String(_) | Bson::ObjectId(_) => Some(Brand {
            id: identifier_from_bson(Some(raw), BRAND_TABLE),
            name: String::new(),
        }),
        _ => None,
    }
}

/// Map a raw product document (optionally joined with `brands`) to a
/// [`Product`].
pub fn to_canonical_product(raw: &Document) -> Product {
    let brands = match raw.get("brands") {
        Some(Bson::Array(items)) => items.iter().filter_map(to_canonical_brand).collect(),
        _ => Vec::new(),
    };

    let brand = match raw.get("brand") {
        Some(value @ (Bson::String(_) | Bson::ObjectId(_))) => {
            Some(identifier_from_bson(Some(value), BRAND_TABLE))
        }
        _ => None,
    };

    Product {
        id: identifier_from_bson(raw.get("_id").or_else(|| raw.get("id")), PRODUCT_TABLE),
        name: string_field(raw, "name").unwrap_or_default(),
        description: string_field(raw, "description"),
        price: number_field(raw, "price"),
        url: string_field(raw, "url"),
        brand,
        brands,
    }
}
