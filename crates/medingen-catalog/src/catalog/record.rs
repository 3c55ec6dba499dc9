//! Raw records as the backend sends them.
//!
//! The backend owns these shapes and is loose about them: prices arrive as
//! numbers or decimal strings, list fields as arrays or JSON-encoded
//! strings, and almost anything may be missing or mistyped. Every field is
//! optional here and a wrongly typed value reads as absent;
//! [`crate::catalog::Medicine::from_backend`] decides what is required.

use serde::{Deserialize, Serialize};

use crate::catalog::lenient;
use crate::catalog::list_field::ListField;
use crate::catalog::review::Review;
use crate::catalog::FaqEntry;
use crate::ids::SaltId;

/// A product as returned by `/products/` and `/products/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawProduct {
    #[serde(default)]
    pub id: Option<RawValue>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub brand: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub generic_name: Option<String>,
    #[serde(default)]
    pub price: Option<RawValue>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String>,
    #[serde(default)]
    pub dosage: Option<RawValue>,
    #[serde(default)]
    pub pack_size: Option<RawValue>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub prescription_required: Option<bool>,
    #[serde(default)]
    pub side_effects: Option<ListField<String>>,
    #[serde(default)]
    pub uses: Option<ListField<String>>,
    #[serde(default)]
    pub faq_content: Option<ListField<FaqEntry>>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub how_it_works: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub chemical_form: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub avg_rating: Option<RawValue>,
    #[serde(default, alias = "reviews_count", deserialize_with = "lenient::count")]
    pub review_count: Option<u32>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient::items")]
    pub salts: Option<Vec<Salt>>,
    #[serde(default, deserialize_with = "lenient::items")]
    pub reviews: Option<Vec<Review>>,
}

/// A scalar the backend may send as a number or as a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(serde_json::Number),
    Text(String),
    Other(serde_json::Value),
}

impl RawValue {
    /// Numeric reading, parsing strings like `"12.50"`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawValue::Number(n) => n.as_f64(),
            RawValue::Text(s) => s.trim().parse::<f64>().ok(),
            RawValue::Other(_) => None,
        }
        .filter(|v| v.is_finite())
    }

    /// Integer reading; fractional values are rejected.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            RawValue::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
            RawValue::Text(s) => s.trim().parse().ok(),
            RawValue::Other(_) => None,
        }
    }

    /// Display text; numbers are rendered without quotes.
    pub fn as_text(&self) -> Option<String> {
        match self {
            RawValue::Number(n) => Some(n.to_string()),
            RawValue::Text(s) if !s.trim().is_empty() => Some(s.clone()),
            _ => None,
        }
    }

    /// Short description for error messages.
    pub fn describe(&self) -> String {
        match self {
            RawValue::Number(n) => n.to_string(),
            RawValue::Text(s) => format!("{:?}", s),
            RawValue::Other(v) => v.to_string(),
        }
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        serde_json::Number::from_f64(v)
            .map(RawValue::Number)
            .unwrap_or(RawValue::Other(serde_json::Value::Null))
    }
}

impl From<i64> for RawValue {
    fn from(v: i64) -> Self {
        RawValue::Number(v.into())
    }
}

impl From<&str> for RawValue {
    fn from(v: &str) -> Self {
        RawValue::Text(v.to_string())
    }
}

/// Active ingredient attached to a product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Salt {
    #[serde(default, deserialize_with = "lenient::optional")]
    pub id: Option<SaltId>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(
        default,
        alias = "chemical_formula",
        alias = "chemicalFormula",
        deserialize_with = "lenient::text"
    )]
    pub chemical_form: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String>,
    #[serde(default, alias = "product_id", deserialize_with = "lenient::optional")]
    pub product_id: Option<crate::ids::ProductId>,
}

/// `/salts/` payload: `{ "salts": [...] }` or a bare array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SaltList {
    Bare(Vec<Salt>),
    Wrapped {
        #[serde(default, deserialize_with = "lenient::list")]
        salts: Vec<Salt>,
    },
}

impl SaltList {
    pub fn into_salts(self) -> Vec<Salt> {
        match self {
            SaltList::Bare(salts) | SaltList::Wrapped { salts } => salts,
        }
    }
}

/// `/products/` payload: either a paginated envelope or a bare array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawProductPage {
    Bare(Vec<RawProduct>),
    Page(RawPageEnvelope),
}

impl RawProductPage {
    pub fn products(&self) -> &[RawProduct] {
        match self {
            RawProductPage::Bare(products) => products,
            RawProductPage::Page(page) => &page.products,
        }
    }

    pub fn into_products(self) -> Vec<RawProduct> {
        match self {
            RawProductPage::Bare(products) => products,
            RawProductPage::Page(page) => page.products,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.products().is_empty()
    }
}

/// Pagination fields use the backend's snake_case naming. `products` is
/// required so unrelated objects are not read as an empty page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPageEnvelope {
    pub products: Vec<RawProduct>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub total: Option<u64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub pages: Option<u64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub current_page: Option<u64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub per_page: Option<u64>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub has_next: Option<bool>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub has_prev: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_as_string_or_number() {
        let a: RawProduct = serde_json::from_str(r#"{"id":1,"price":"12.50"}"#).unwrap();
        let b: RawProduct = serde_json::from_str(r#"{"id":1,"price":12.5}"#).unwrap();
        assert_eq!(a.price.unwrap().as_f64(), Some(12.5));
        assert_eq!(b.price.unwrap().as_f64(), Some(12.5));
    }

    #[test]
    fn test_unusual_scalar_does_not_break_record() {
        let raw: RawProduct =
            serde_json::from_str(r#"{"id":1,"price":true,"pack_size":15}"#).unwrap();
        assert_eq!(raw.price.unwrap().as_f64(), None);
        assert_eq!(raw.pack_size.unwrap().as_text().as_deref(), Some("15"));
    }

    #[test]
    fn test_null_fields_read_as_absent() {
        let raw: RawProduct =
            serde_json::from_str(r#"{"id":null,"uses":null,"reviews":null}"#).unwrap();
        assert!(raw.id.is_none());
        assert!(raw.uses.is_none());
        assert!(raw.reviews.is_none());
    }

    #[test]
    fn test_mistyped_optional_fields_read_as_absent() {
        let cases = [
            (r#"{"id":1,"prescription_required":1}"#, "prescription_required"),
            (r#"{"id":1,"prescription_required":"maybe"}"#, "prescription_required"),
            (r#"{"id":1,"description":5}"#, "description"),
            (r#"{"id":1,"name":{"en":"Dolo"}}"#, "name"),
            (r#"{"id":1,"review_count":"many"}"#, "review_count"),
            (r#"{"id":1,"review_count":-3}"#, "review_count"),
            (r#"{"id":1,"reviews":[{"rating":null}]}"#, "reviews"),
            (r#"{"id":1,"reviews":"none"}"#, "reviews"),
            (r#"{"id":1,"salts":[{"id":"x","name":3}, 7]}"#, "salts"),
            (r#"{"id":1,"image_url":false,"created_at":[]}"#, "image_url"),
        ];
        for (json, field) in cases {
            let raw: Result<RawProduct, _> = serde_json::from_str(json);
            assert!(raw.is_ok(), "{} should not break the record: {}", field, json);
        }

        let raw: RawProduct = serde_json::from_str(
            r#"{"id":1,"prescription_required":1,"description":5,"review_count":"12","reviews":[{"rating":null},"x"],"salts":[{"id":"x","name":3},7]}"#,
        )
        .unwrap();
        assert_eq!(raw.prescription_required, Some(true));
        assert_eq!(raw.description.as_deref(), Some("5"));
        assert_eq!(raw.review_count, Some(12));
        assert_eq!(raw.reviews.map(|r| r.len()), Some(1));
        let salts = raw.salts.unwrap();
        assert_eq!(salts.len(), 1);
        assert_eq!(salts[0].id, None);
        assert_eq!(salts[0].name.as_deref(), Some("3"));
    }

    #[test]
    fn test_page_with_mistyped_record_still_decodes() {
        let page: RawProductPage = serde_json::from_str(
            r#"{"products":[{"id":1},{"id":2,"prescription_required":1},{"id":3,"reviews":[{"rating":null}]},{"id":4,"description":5}],"total":"4","has_next":0}"#,
        )
        .unwrap();
        assert_eq!(page.products().len(), 4);
        let RawProductPage::Page(envelope) = page else {
            panic!("expected envelope");
        };
        assert_eq!(envelope.total, Some(4));
        assert_eq!(envelope.has_next, Some(false));
    }

    #[test]
    fn test_object_without_products_is_not_a_page() {
        let err = serde_json::from_str::<RawProductPage>(r#"{"error":"Database offline"}"#);
        assert!(err.is_err());
        let empty: RawProductPage = serde_json::from_str(r#"{"products":[]}"#).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_page_envelope_and_bare_array() {
        let page: RawProductPage =
            serde_json::from_str(r#"{"products":[{"id":1}],"total":1,"has_next":false}"#).unwrap();
        assert!(matches!(page, RawProductPage::Page(_)));
        assert_eq!(page.products().len(), 1);

        let bare: RawProductPage = serde_json::from_str(r#"[{"id":1},{"id":2}]"#).unwrap();
        assert!(matches!(bare, RawProductPage::Bare(_)));
        assert_eq!(bare.into_products().len(), 2);
    }

    #[test]
    fn test_salt_aliases() {
        let salt: Salt =
            serde_json::from_str(r#"{"id":"4","name":"Paracetamol","chemical_formula":"C8H9NO2","product_id":2}"#)
                .unwrap();
        assert_eq!(salt.chemical_form.as_deref(), Some("C8H9NO2"));
        assert_eq!(salt.product_id.map(|p| p.get()), Some(2));
    }
}
