//! Strategy-tagged raw field bags and their collapse into records.

use shelfscout_core::{ListingRecord, ProductRecord};

use crate::normalize::{
    collapse_whitespace, count_from_number, last_token, parse_rating_average,
    parse_rating_count, rating_in_range,
};
use crate::state::RawValue;

/// Which extraction strategy produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateOrigin {
    AppState,
    Dom,
}

impl std::fmt::Display for CandidateOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CandidateOrigin::AppState => write!(f, "app_state"),
            CandidateOrigin::Dom => write!(f, "dom"),
        }
    }
}

/// Raw fields read by one strategy for one unit (listing item or product
/// page), before any normalization.
///
/// Candidates are never persisted; they are either collapsed into exactly one
/// record or dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionCandidate {
    pub origin: CandidateOrigin,
    pub name: RawValue,
    pub price: RawValue,
    pub discount: RawValue,
    pub rating_average: RawValue,
    pub rating_count: RawValue,
    pub description: RawValue,
    /// Already-resolved URL for listing items; empty when unresolvable.
    pub url: String,
}

impl ExtractionCandidate {
    #[must_use]
    pub fn empty(origin: CandidateOrigin) -> Self {
        Self {
            origin,
            name: RawValue::Absent,
            price: RawValue::Absent,
            discount: RawValue::Absent,
            rating_average: RawValue::Absent,
            rating_count: RawValue::Absent,
            description: RawValue::Absent,
            url: String::new(),
        }
    }

    /// Identity test deciding whether a candidate may become a record.
    ///
    /// A non-empty name always qualifies. A bare price only qualifies for
    /// application-state candidates, where a structured price means the probe
    /// found a real product object.
    #[must_use]
    pub fn has_identity(&self) -> bool {
        if !collapse_whitespace(&self.name.to_text()).is_empty() {
            return true;
        }
        self.origin == CandidateOrigin::AppState && self.price.is_present()
    }

    #[must_use]
    pub fn into_listing_record(self) -> ListingRecord {
        let discount = match &self.discount {
            // DOM savings badges read like "SAVE $20"; keep the amount only.
            RawValue::Text(text) if self.origin == CandidateOrigin::Dom => last_token(text),
            other => collapse_whitespace(&other.to_text()),
        };
        ListingRecord {
            name: collapse_whitespace(&self.name.to_text()),
            sale_price: collapse_whitespace(&self.price.to_text()),
            discount,
            rating_average: decode_rating(&self.rating_average),
            rating_count: decode_count(&self.rating_count),
            url: self.url,
        }
    }

    #[must_use]
    pub fn into_product_record(self, source_url: &str) -> ProductRecord {
        ProductRecord {
            title: collapse_whitespace(&self.name.to_text()),
            price: collapse_whitespace(&self.price.to_text()),
            rating_average: decode_rating(&self.rating_average),
            rating_count: decode_count(&self.rating_count),
            description: collapse_whitespace(&self.description.to_text()),
            source_url: source_url.to_owned(),
        }
    }
}

/// Number-or-absent decoder for rating averages.
#[must_use]
pub fn decode_rating(raw: &RawValue) -> Option<f64> {
    match raw {
        RawValue::Absent => None,
        RawValue::Number(n) => n.as_f64().and_then(rating_in_range),
        RawValue::Text(text) => parse_rating_average(text),
    }
}

/// Count decoder: absent or unparseable input is `0`, never negative.
#[must_use]
pub fn decode_count(raw: &RawValue) -> u32 {
    match raw {
        RawValue::Absent => 0,
        RawValue::Number(n) => n.as_f64().map_or(0, count_from_number),
        RawValue::Text(text) => parse_rating_count(text),
    }
}
