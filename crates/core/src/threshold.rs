//! Threshold criteria nested inside a threshold check.
//!
//! A threshold is a single pass/fail numeric criterion. On the wire each
//! one is a flat JSON object whose `type` field selects the variant
//! (`lesser`, `greater`, `range`); the remaining fields are the shared
//! base plus the variant's own comparison values.

use serde::{Deserialize, Serialize};

use crate::types::StatusLevel;

/// Fields shared by every threshold variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdBase {
    /// If true, only alert when all values in the window meet the
    /// criterion.
    #[serde(rename = "allValues", skip_serializing_if = "Option::is_none")]
    pub all_values: Option<bool>,
    /// The status level recorded when the criterion matches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<StatusLevel>,
}

/// Matches values below `value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LesserThreshold {
    #[serde(flatten)]
    pub base: ThresholdBase,
    pub value: f64,
}

/// Matches values above `value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GreaterThreshold {
    #[serde(flatten)]
    pub base: ThresholdBase,
    pub value: f64,
}

/// Matches values inside (`within = true`) or outside the
/// `[min, max]` interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeThreshold {
    #[serde(flatten)]
    pub base: ThresholdBase,
    pub min: f64,
    pub max: f64,
    pub within: bool,
}

/// One concrete threshold criterion.
///
/// Serialization injects the variant's discriminator as the `type`
/// field; it is never supplied by the caller. Decoding goes through
/// [`crate::codec`] so that an unknown discriminator surfaces as
/// [`crate::codec::CodecError::InvalidInput`] rather than a generic
/// parse error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Threshold {
    Lesser(LesserThreshold),
    Greater(GreaterThreshold),
    Range(RangeThreshold),
}

impl Threshold {
    /// The fixed discriminator string for this variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Threshold::Lesser(_) => "lesser",
            Threshold::Greater(_) => "greater",
            Threshold::Range(_) => "range",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_serialized_discriminator() {
        let threshold = Threshold::Greater(GreaterThreshold {
            base: ThresholdBase::default(),
            value: 10.0,
        });
        let json = serde_json::to_value(&threshold).unwrap();
        assert_eq!(json["type"], threshold.kind());
    }

    #[test]
    fn serializes_flat_with_base_fields() {
        let threshold = Threshold::Range(RangeThreshold {
            base: ThresholdBase {
                all_values: Some(true),
                level: Some(StatusLevel::Warn),
            },
            min: 1.0,
            max: 9.0,
            within: false,
        });
        let json = serde_json::to_value(&threshold).unwrap();
        assert_eq!(json["type"], "range");
        assert_eq!(json["allValues"], true);
        assert_eq!(json["level"], "WARN");
        assert_eq!(json["min"], 1.0);
        assert_eq!(json["max"], 9.0);
        assert_eq!(json["within"], false);
    }
}
