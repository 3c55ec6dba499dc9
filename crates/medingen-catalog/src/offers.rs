//! Promotional offers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ids::OfferId;

/// Category id meaning "no filter".
pub const ALL_CATEGORIES: &str = "all";

/// A coupon-style offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: OfferId,
    pub title: String,
    /// Display label, e.g. "20% OFF" or "Buy 2 Get 1 FREE".
    pub discount: String,
    #[serde(default)]
    pub description: String,
    pub code: String,
    /// Last day the offer can be used.
    pub valid_till: NaiveDate,
    pub category: String,
    #[serde(default)]
    pub min_order: f64,
    /// Cap on the amount saved; `None` or a non-positive value is uncapped.
    #[serde(default)]
    pub max_discount: Option<f64>,
}

impl Offer {
    pub fn is_valid_on(&self, date: NaiveDate) -> bool {
        date <= self.valid_till
    }

    /// `valid_till` as "15 Nov 2025".
    pub fn formatted_valid_till(&self) -> String {
        self.valid_till.format("%-d %b %Y").to_string()
    }

    /// Percent off parsed from the label; `None` for non-percentage offers.
    pub fn percent_off(&self) -> Option<u8> {
        let label = self.discount.trim();
        let (number, _) = label.split_once('%')?;
        number.trim().parse().ok().filter(|p: &u8| *p <= 100)
    }

    /// Amount saved on an order of `order_total`: zero below the minimum
    /// order, capped at `max_discount` when one is set.
    pub fn savings_for(&self, order_total: f64) -> f64 {
        if order_total < self.min_order {
            return 0.0;
        }
        let Some(percent) = self.percent_off() else {
            return 0.0;
        };
        let savings = order_total * f64::from(percent) / 100.0;
        match self.max_discount.filter(|cap| *cap > 0.0) {
            Some(cap) => savings.min(cap),
            None => savings,
        }
    }
}

/// The offer list with its category filter.
#[derive(Debug, Clone, Default)]
pub struct OfferBoard {
    offers: Vec<Offer>,
}

impl OfferBoard {
    pub fn new(offers: Vec<Offer>) -> Self {
        Self { offers }
    }

    /// Offers in `category`; `"all"` returns everything.
    pub fn filter(&self, category: &str) -> Vec<&Offer> {
        self.offers
            .iter()
            .filter(|o| category == ALL_CATEGORIES || o.category == category)
            .collect()
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for offer in &self.offers {
            if !seen.contains(&offer.category.as_str()) {
                seen.push(&offer.category);
            }
        }
        seen
    }

    pub fn active_on(&self, date: NaiveDate) -> Vec<&Offer> {
        self.offers.iter().filter(|o| o.is_valid_on(date)).collect()
    }

    pub fn find_by_code(&self, code: &str) -> Option<&Offer> {
        self.offers
            .iter()
            .find(|o| o.code.eq_ignore_ascii_case(code.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn board() -> OfferBoard {
        let offers: Vec<Offer> = serde_json::from_str(
            r#"[
                {"id":1,"title":"Mega Medicine Sale","discount":"20% OFF","code":"MEDI20",
                 "validTill":"2025-11-15","category":"general","minOrder":500,"maxDiscount":200},
                {"id":2,"title":"Free Home Delivery","discount":"FREE","code":"FREEDEL",
                 "validTill":"2025-12-31","category":"delivery","minOrder":500,"maxDiscount":100},
                {"id":3,"title":"Checkup","discount":"40% OFF","code":"HEALTH40",
                 "validTill":"2025-10-25","category":"general","minOrder":1000,"maxDiscount":800}
            ]"#,
        )
        .unwrap();
        OfferBoard::new(offers)
    }

    #[test]
    fn test_filter_by_category() {
        let b = board();
        assert_eq!(b.filter(ALL_CATEGORIES).len(), 3);
        assert_eq!(b.filter("general").len(), 2);
        assert!(b.filter("vitamins").is_empty());
        assert_eq!(b.categories(), vec!["general", "delivery"]);
    }

    #[test]
    fn test_validity() {
        let b = board();
        assert_eq!(b.active_on(date(2025, 11, 1)).len(), 2);
        assert_eq!(b.active_on(date(2025, 11, 15)).len(), 2);
        assert_eq!(b.active_on(date(2026, 1, 1)).len(), 0);
    }

    #[test]
    fn test_date_format() {
        let b = board();
        assert_eq!(b.filter("general")[0].formatted_valid_till(), "15 Nov 2025");
    }

    #[test]
    fn test_savings() {
        let b = board();
        let sale = b.find_by_code("medi20").unwrap();
        assert_eq!(sale.percent_off(), Some(20));
        assert_eq!(sale.savings_for(400.0), 0.0);
        assert_eq!(sale.savings_for(600.0), 120.0);
        assert_eq!(sale.savings_for(5000.0), 200.0);

        let delivery = b.find_by_code("FREEDEL").unwrap();
        assert_eq!(delivery.percent_off(), None);
    }

    #[test]
    fn test_savings_without_cap() {
        let offer: Offer = serde_json::from_str(
            r#"{"id":4,"title":"Flat","discount":"10% OFF","code":"FLAT10",
                "validTill":"2025-12-01","category":"general"}"#,
        )
        .unwrap();
        assert_eq!(offer.max_discount, None);
        assert_eq!(offer.savings_for(1000.0), 100.0);

        let zero_cap = Offer {
            max_discount: Some(0.0),
            ..offer
        };
        assert_eq!(zero_cap.savings_for(1000.0), 100.0);
    }
}
