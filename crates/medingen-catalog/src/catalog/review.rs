//! Customer reviews and rating helpers.

use serde::{Deserialize, Serialize};

use crate::catalog::lenient;
use crate::ids::{ProductId, ReviewId};

/// Highest star rating.
pub const MAX_STARS: u8 = 5;

/// A customer review.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(default, deserialize_with = "lenient::optional")]
    pub id: Option<ReviewId>,
    #[serde(default, alias = "product_id", deserialize_with = "lenient::optional")]
    pub product_id: Option<ProductId>,
    #[serde(
        default,
        alias = "user_name",
        alias = "username",
        deserialize_with = "lenient::text"
    )]
    pub user_name: Option<String>,
    /// Stars given; unreadable ratings count as 0.
    #[serde(default, deserialize_with = "lenient::number")]
    pub rating: f64,
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(default, alias = "content", deserialize_with = "lenient::text")]
    pub comment: Option<String>,
    #[serde(default, alias = "created_at", deserialize_with = "lenient::text")]
    pub created_at: Option<String>,
}

impl Review {
    /// Author shown under the review text.
    pub fn author(&self) -> &str {
        self.user_name.as_deref().unwrap_or("Anonymous")
    }

    pub fn stars(&self) -> u8 {
        filled_stars(self.rating)
    }
}

/// `/reviews/` payload. Missing `reviews` reads as an empty list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewList {
    #[serde(default, deserialize_with = "lenient::list")]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub pages: Option<u64>,
    #[serde(default)]
    pub current_page: Option<u64>,
}

impl ReviewList {
    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }
}

/// `/reviews/stats/{id}` payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewStats {
    #[serde(default, alias = "avg_rating", deserialize_with = "lenient::number")]
    pub average_rating: f64,
    #[serde(default, alias = "total_reviews", alias = "review_count")]
    pub total: u64,
    /// Review counts keyed by star value, `"1"` through `"5"`.
    #[serde(default, alias = "rating_distribution")]
    pub distribution: std::collections::BTreeMap<String, u64>,
}

impl ReviewStats {
    /// Count of reviews with the given star value.
    pub fn count_for(&self, stars: u8) -> u64 {
        self.distribution
            .get(&stars.to_string())
            .copied()
            .unwrap_or(0)
    }

    /// Share of reviews with the given star value, as a whole percent.
    pub fn percent_for(&self, stars: u8) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let share = self.count_for(stars) as f64 / self.total as f64 * 100.0;
        share.round().clamp(0.0, 100.0) as u8
    }
}

/// Number of filled stars for a rating: rounded, clamped to 0..=5.
pub fn filled_stars(rating: f64) -> u8 {
    if !rating.is_finite() {
        return 0;
    }
    rating.round().clamp(0.0, f64::from(MAX_STARS)) as u8
}

/// Render a rating as filled/empty star flags, left to right.
pub fn star_row(rating: f64) -> [bool; MAX_STARS as usize] {
    let filled = filled_stars(rating);
    let mut row = [false; MAX_STARS as usize];
    for (i, star) in row.iter_mut().enumerate() {
        *star = (i as u8) < filled;
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_field_aliases() {
        let review: Review = serde_json::from_str(
            r#"{"id":3,"product_id":"7","user_name":"asha","rating":4,"comment":"Works","created_at":"2025-01-02"}"#,
        )
        .unwrap();
        assert_eq!(review.product_id, Some(ProductId::new(7)));
        assert_eq!(review.author(), "asha");
        assert_eq!(review.comment.as_deref(), Some("Works"));
        assert_eq!(review.stars(), 4);
    }

    #[test]
    fn test_mistyped_review_fields_read_as_absent() {
        let review: Review = serde_json::from_str(
            r#"{"id":"x","rating":null,"title":7,"comment":["a"],"user_name":false}"#,
        )
        .unwrap();
        assert_eq!(review.id, None);
        assert_eq!(review.rating, 0.0);
        assert_eq!(review.title.as_deref(), Some("7"));
        assert_eq!(review.comment, None);
        assert_eq!(review.author(), "Anonymous");

        let rated: Review = serde_json::from_str(r#"{"rating":"4.5"}"#).unwrap();
        assert_eq!(rated.rating, 4.5);
    }

    #[test]
    fn test_review_list_skips_non_objects() {
        let list: ReviewList =
            serde_json::from_str(r#"{"reviews":[{"rating":5},"oops",{"rating":null}]}"#).unwrap();
        assert_eq!(list.reviews.len(), 2);
    }

    #[test]
    fn test_review_list_missing_reviews() {
        let list: ReviewList = serde_json::from_str(r#"{"total":0}"#).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn test_stats_percentages() {
        let stats: ReviewStats = serde_json::from_str(
            r#"{"avg_rating":4.2,"total_reviews":4,"rating_distribution":{"5":2,"4":1,"1":1}}"#,
        )
        .unwrap();
        assert_eq!(stats.percent_for(5), 50);
        assert_eq!(stats.percent_for(4), 25);
        assert_eq!(stats.percent_for(3), 0);
    }

    #[test]
    fn test_stats_without_reviews() {
        assert_eq!(ReviewStats::default().percent_for(5), 0);
    }

    #[test]
    fn test_filled_stars_clamps() {
        assert_eq!(filled_stars(3.5), 4);
        assert_eq!(filled_stars(3.4), 3);
        assert_eq!(filled_stars(9.0), 5);
        assert_eq!(filled_stars(-1.0), 0);
        assert_eq!(filled_stars(f64::NAN), 0);
    }

    #[test]
    fn test_star_row() {
        assert_eq!(star_row(2.0), [true, true, false, false, false]);
    }
}
