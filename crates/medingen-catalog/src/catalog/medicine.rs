//! The canonical medicine view model and its backend transforms.

use serde::{Deserialize, Serialize};

use crate::catalog::list_field::{normalize_list, FallbackPolicy};
use crate::catalog::pricing::{discounted_price, DiscountPolicy};
use crate::catalog::record::{RawProduct, RawValue, Salt};
use crate::catalog::review::{Review, MAX_STARS};
use crate::error::CatalogError;
use crate::ids::ProductId;

/// Shown when the backend omits a product name.
pub const DEFAULT_NAME: &str = "Unknown Medicine";
/// Shown when the backend omits the brand.
pub const DEFAULT_MANUFACTURER: &str = "Unknown Manufacturer";

const PLACEHOLDER_USE: &str = "Consult your doctor for uses";
const PLACEHOLDER_SIDE_EFFECT: &str = "No common side effects reported";
const PLACEHOLDER_FAQ_QUESTION: &str = "Is a prescription needed?";
const PLACEHOLDER_FAQ_ANSWER: &str = "Please consult your doctor or pharmacist before use.";

/// A frequently asked question about a medicine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

impl FaqEntry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Knobs for [`Medicine::from_backend`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformOptions {
    pub discount_policy: DiscountPolicy,
    pub list_fallback: FallbackPolicy,
    /// Price used when the backend price is absent or unparsable.
    pub default_price: f64,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            discount_policy: DiscountPolicy::default(),
            list_fallback: FallbackPolicy::Empty,
            default_price: 0.0,
        }
    }
}

impl TransformOptions {
    pub fn with_discount_policy(mut self, policy: DiscountPolicy) -> Self {
        self.discount_policy = policy;
        self
    }

    pub fn with_list_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.list_fallback = fallback;
        self
    }

    pub fn with_default_price(mut self, price: f64) -> Self {
        self.default_price = price;
        self
    }
}

/// A medicine ready for display.
///
/// Built fresh by every transform and never mutated afterwards; the
/// `with_*` methods return new values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    id: ProductId,
    name: String,
    generic_name: String,
    manufacturer: String,
    brand: Option<String>,
    category: Option<String>,
    price: f64,
    discount: u8,
    discounted_price: f64,
    description: String,
    dosage: Option<String>,
    pack_size: Option<String>,
    how_it_works: Option<String>,
    chemical_formula: Option<String>,
    prescription_required: bool,
    prescription_label: &'static str,
    uses: Vec<String>,
    side_effects: Vec<String>,
    faq_content: Vec<FaqEntry>,
    rating: f64,
    review_count: u32,
    image_url: Option<String>,
    created_at: Option<String>,
    salts: Vec<Salt>,
    reviews: Vec<Review>,
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty()).cloned()
}

fn prescription_label(required: bool) -> &'static str {
    if required {
        "Prescription required"
    } else {
        "No prescription required"
    }
}

impl Medicine {
    /// Build a view model from a backend record.
    ///
    /// Only `id` is required. Every optional field falls back to a default
    /// instead of failing; the input is never modified.
    pub fn from_backend(raw: &RawProduct, options: &TransformOptions) -> Result<Self, CatalogError> {
        let id = match &raw.id {
            None => return Err(CatalogError::MissingField("id")),
            Some(value) => value.as_i64().map(ProductId::new).ok_or_else(|| {
                CatalogError::InvalidField {
                    field: "id",
                    value: value.describe(),
                }
            })?,
        };

        let price = match raw.price.as_ref().map(RawValue::as_f64) {
            Some(Some(price)) => price.max(0.0),
            Some(None) => {
                tracing::debug!(product = %id, "unparsable price, using default");
                options.default_price.max(0.0)
            }
            None => options.default_price.max(0.0),
        };
        let discount = options.discount_policy.discount_for(price);

        let name = non_blank(raw.name.as_ref()).unwrap_or_else(|| DEFAULT_NAME.to_string());
        let generic_name = non_blank(raw.generic_name.as_ref()).unwrap_or_else(|| name.clone());
        let brand = non_blank(raw.brand.as_ref());
        let prescription_required = raw.prescription_required.unwrap_or(false);
        let reviews = raw.reviews.clone().unwrap_or_default();

        let placeholder = options.list_fallback == FallbackPolicy::Placeholder;
        let uses = normalize_list("uses", raw.uses.as_ref(), || {
            placeholder_list(placeholder, PLACEHOLDER_USE.to_string())
        });
        let side_effects = normalize_list("side_effects", raw.side_effects.as_ref(), || {
            placeholder_list(placeholder, PLACEHOLDER_SIDE_EFFECT.to_string())
        });
        let faq_content = normalize_list("faq_content", raw.faq_content.as_ref(), || {
            placeholder_list(
                placeholder,
                FaqEntry::new(PLACEHOLDER_FAQ_QUESTION, PLACEHOLDER_FAQ_ANSWER),
            )
        });

        let rating = raw
            .avg_rating
            .as_ref()
            .and_then(RawValue::as_f64)
            .map(|r| r.clamp(0.0, f64::from(MAX_STARS)))
            .unwrap_or(0.0);
        let review_count = raw
            .review_count
            .unwrap_or_else(|| u32::try_from(reviews.len()).unwrap_or(u32::MAX));

        Ok(Self {
            id,
            manufacturer: brand.clone().unwrap_or_else(|| DEFAULT_MANUFACTURER.to_string()),
            brand,
            name,
            generic_name,
            category: non_blank(raw.category.as_ref()),
            price,
            discount,
            discounted_price: discounted_price(price, discount),
            description: raw.description.clone().unwrap_or_default(),
            dosage: raw.dosage.as_ref().and_then(RawValue::as_text),
            pack_size: raw.pack_size.as_ref().and_then(RawValue::as_text),
            how_it_works: non_blank(raw.how_it_works.as_ref()),
            chemical_formula: non_blank(raw.chemical_form.as_ref()),
            prescription_required,
            prescription_label: prescription_label(prescription_required),
            uses,
            side_effects,
            faq_content,
            rating,
            review_count,
            image_url: non_blank(raw.image_url.as_ref()),
            created_at: non_blank(raw.created_at.as_ref()),
            salts: raw.salts.clone().unwrap_or_default(),
            reviews,
        })
    }

    /// Same discount and pricing recomputed under another policy.
    pub fn with_discount_policy(&self, policy: &DiscountPolicy) -> Self {
        let discount = policy.discount_for(self.price);
        Self {
            discount,
            discounted_price: discounted_price(self.price, discount),
            ..self.clone()
        }
    }

    /// The write shape the backend accepts for create/update.
    pub fn to_backend(&self) -> BackendProduct {
        BackendProduct {
            name: self.name.clone(),
            brand: self.brand.clone().unwrap_or_else(|| self.manufacturer.clone()),
            price: self.price,
            chemical_form: self.chemical_formula.clone(),
            image_url: self.image_url.clone(),
            generic_name: self.generic_name.clone(),
            category: self.category.clone(),
            description: self.description.clone(),
            dosage: self.dosage.clone(),
            pack_size: self.pack_size.clone(),
            prescription_required: self.prescription_required,
            uses: self.uses.clone(),
            side_effects: self.side_effects.clone(),
            how_it_works: self.how_it_works.clone(),
            faq_content: self.faq_content.clone(),
        }
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn generic_name(&self) -> &str {
        &self.generic_name
    }

    pub fn manufacturer(&self) -> &str {
        &self.manufacturer
    }

    pub fn brand(&self) -> Option<&str> {
        self.brand.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn discount(&self) -> u8 {
        self.discount
    }

    pub fn discounted_price(&self) -> f64 {
        self.discounted_price
    }

    /// Price shown to the customer.
    pub fn effective_price(&self) -> f64 {
        if self.discount > 0 {
            self.discounted_price
        } else {
            self.price
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn dosage(&self) -> Option<&str> {
        self.dosage.as_deref()
    }

    pub fn pack_size(&self) -> Option<&str> {
        self.pack_size.as_deref()
    }

    pub fn how_it_works(&self) -> Option<&str> {
        self.how_it_works.as_deref()
    }

    pub fn chemical_formula(&self) -> Option<&str> {
        self.chemical_formula.as_deref()
    }

    pub fn prescription_required(&self) -> bool {
        self.prescription_required
    }

    pub fn prescription_label(&self) -> &'static str {
        self.prescription_label
    }

    pub fn uses(&self) -> &[String] {
        &self.uses
    }

    pub fn side_effects(&self) -> &[String] {
        &self.side_effects
    }

    pub fn faq_content(&self) -> &[FaqEntry] {
        &self.faq_content
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn review_count(&self) -> u32 {
        self.review_count
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn created_at(&self) -> Option<&str> {
        self.created_at.as_deref()
    }

    pub fn salts(&self) -> &[Salt] {
        &self.salts
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }
}

fn placeholder_list<T>(placeholder: bool, entry: T) -> Vec<T> {
    if placeholder {
        vec![entry]
    } else {
        Vec::new()
    }
}

/// Transform every record, stopping at the first structurally invalid one.
pub fn transform_batch(
    raws: &[RawProduct],
    options: &TransformOptions,
) -> Result<Vec<Medicine>, CatalogError> {
    raws.iter()
        .map(|raw| Medicine::from_backend(raw, options))
        .collect()
}

/// Product as the backend accepts it on writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendProduct {
    pub name: String,
    pub brand: String,
    pub price: f64,
    pub chemical_form: Option<String>,
    pub image_url: Option<String>,
    pub generic_name: String,
    pub category: Option<String>,
    pub description: String,
    pub dosage: Option<String>,
    pub pack_size: Option<String>,
    pub prescription_required: bool,
    pub uses: Vec<String>,
    pub side_effects: Vec<String>,
    pub how_it_works: Option<String>,
    pub faq_content: Vec<FaqEntry>,
}
