//! Polymorphic JSON codec for checks and thresholds.
//!
//! Decode is two-phase: probe only the `type` field of the incoming
//! object, dispatch on the discriminator, then fully deserialize the
//! selected variant. A missing or unrecognized discriminator is a hard
//! [`CodecError::InvalidInput`], never a silent default. Encode derives
//! the `type` field from the variant tag alone; callers cannot supply
//! it.
//!
//! All functions here are pure transforms over byte buffers and
//! in-memory values. No logging, no retries; every failure is terminal
//! for the enclosing call.

use serde::Deserialize;
use serde_json::value::RawValue;

use crate::check::{Check, CheckBaseExt, Checks, CustomCheck, DeadmanCheck, ThresholdCheck};
use crate::threshold::{
    GreaterThreshold, LesserThreshold, RangeThreshold, Threshold, ThresholdBase,
};
use crate::types::Links;

/// Errors produced by the checks codec.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The JSON was well-formed but the `type` discriminator was
    /// missing or not one of the registered variants.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The byte buffer could not be parsed as the expected JSON shape;
    /// the parser error is surfaced unchanged.
    #[error("malformed JSON: {0}")]
    Malformed(#[source] serde_json::Error),

    /// A value could not be serialized; the serializer error is
    /// surfaced unchanged.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),
}

/// First decode phase: only the discriminator field.
#[derive(Deserialize)]
struct TypeProbe {
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// Intermediate decode form for a threshold: the union of all variant
/// fields plus the discriminator. Absent numeric fields default to
/// zero, matching the wire format's omission of zero values.
#[derive(Deserialize)]
struct ThresholdRaw {
    #[serde(flatten)]
    base: ThresholdBase,
    #[serde(rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    value: f64,
    #[serde(default)]
    min: f64,
    #[serde(default)]
    max: f64,
    #[serde(default)]
    within: bool,
}

/// Intermediate decode form for a threshold check, carrying its
/// thresholds as raw records.
#[derive(Deserialize)]
struct ThresholdCheckRaw {
    #[serde(flatten)]
    base: CheckBaseExt,
    #[serde(default)]
    thresholds: Vec<ThresholdRaw>,
}

fn build_threshold(raw: ThresholdRaw) -> Result<Threshold, CodecError> {
    match raw.kind.as_deref() {
        Some("lesser") => Ok(Threshold::Lesser(LesserThreshold {
            base: raw.base,
            value: raw.value,
        })),
        Some("greater") => Ok(Threshold::Greater(GreaterThreshold {
            base: raw.base,
            value: raw.value,
        })),
        Some("range") => Ok(Threshold::Range(RangeThreshold {
            base: raw.base,
            min: raw.min,
            max: raw.max,
            within: raw.within,
        })),
        Some(other) => Err(CodecError::InvalidInput(format!(
            "invalid threshold type {other}"
        ))),
        None => Err(CodecError::InvalidInput(
            "missing threshold type discriminator".into(),
        )),
    }
}

/// Decode a single check from a JSON object.
pub fn decode_check(bytes: &[u8]) -> Result<Check, CodecError> {
    let probe: TypeProbe = serde_json::from_slice(bytes).map_err(CodecError::Malformed)?;
    match probe.kind.as_deref() {
        Some("deadman") => {
            let check: DeadmanCheck =
                serde_json::from_slice(bytes).map_err(CodecError::Malformed)?;
            Ok(Check::Deadman(check))
        }
        Some("threshold") => {
            let raw: ThresholdCheckRaw =
                serde_json::from_slice(bytes).map_err(CodecError::Malformed)?;
            let thresholds = raw
                .thresholds
                .into_iter()
                .map(build_threshold)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Check::Threshold(ThresholdCheck {
                base: raw.base,
                thresholds,
            }))
        }
        Some("custom") => {
            let check: CustomCheck =
                serde_json::from_slice(bytes).map_err(CodecError::Malformed)?;
            Ok(Check::Custom(check))
        }
        Some(other) => Err(CodecError::InvalidInput(format!(
            "invalid check type {other}"
        ))),
        None => Err(CodecError::InvalidInput(
            "missing check type discriminator".into(),
        )),
    }
}

/// Encode a check to a flat JSON object with its `type` discriminator
/// injected.
pub fn encode_check(check: &Check) -> Result<Vec<u8>, CodecError> {
    serde_json::to_vec(check).map_err(CodecError::Serialization)
}

/// Decode a JSON array of checks.
///
/// The array is split into raw per-element fragments first, then each
/// fragment is decoded independently. One bad element fails the whole
/// decode; no partial results are returned.
pub fn decode_check_list(bytes: &[u8]) -> Result<Vec<Check>, CodecError> {
    let fragments: Vec<&RawValue> =
        serde_json::from_slice(bytes).map_err(CodecError::Malformed)?;
    fragments
        .iter()
        .map(|fragment| decode_check(fragment.get().as_bytes()))
        .collect()
}

/// Decode the paged `{"checks": [...], "links": {...}}` envelope
/// returned by `GET /checks`.
pub fn decode_checks(bytes: &[u8]) -> Result<Checks, CodecError> {
    #[derive(Deserialize)]
    struct ChecksRaw<'a> {
        #[serde(borrow, default)]
        checks: Vec<&'a RawValue>,
        links: Option<Links>,
    }

    let raw: ChecksRaw = serde_json::from_slice(bytes).map_err(CodecError::Malformed)?;
    let checks = raw
        .checks
        .iter()
        .map(|fragment| decode_check(fragment.get().as_bytes()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Checks {
        checks,
        links: raw.links,
    })
}

/// Decode a single threshold from a JSON object.
pub fn decode_threshold(bytes: &[u8]) -> Result<Threshold, CodecError> {
    let raw: ThresholdRaw = serde_json::from_slice(bytes).map_err(CodecError::Malformed)?;
    build_threshold(raw)
}

/// Encode a threshold to a flat JSON object with its `type`
/// discriminator injected.
pub fn encode_threshold(threshold: &Threshold) -> Result<Vec<u8>, CodecError> {
    serde_json::to_vec(threshold).map_err(CodecError::Serialization)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::check::CheckBase;
    use crate::query::DashboardQuery;
    use crate::types::{StatusLevel, TaskStatus};

    fn base(name: &str) -> CheckBase {
        CheckBase {
            id: Some("0a1b2c3d4e5f6071".into()),
            name: name.into(),
            org_id: "0000000000000001".into(),
            owner_id: None,
            task_id: Some("0000000000000002".into()),
            query: DashboardQuery {
                text: Some("from(bucket: \"metrics\")".into()),
                edit_mode: None,
                name: None,
            },
            status: TaskStatus::Active,
            description: Some("cpu saturation".into()),
            labels: None,
            links: None,
            created_at: Some("2024-03-01T12:00:00Z".parse().unwrap()),
            updated_at: None,
            latest_completed: None,
            last_run_status: None,
            last_run_error: None,
        }
    }

    fn base_ext(name: &str) -> CheckBaseExt {
        CheckBaseExt {
            base: base(name),
            every: Some("1m".into()),
            offset: Some("10s".into()),
            status_message_template: Some("Check ${r._check_name} is ${r._level}".into()),
            tags: None,
        }
    }

    fn threshold_check() -> Check {
        Check::Threshold(ThresholdCheck {
            base: base_ext("disk"),
            thresholds: vec![
                Threshold::Lesser(LesserThreshold {
                    base: ThresholdBase {
                        all_values: None,
                        level: Some(StatusLevel::Ok),
                    },
                    value: 10.0,
                }),
                Threshold::Greater(GreaterThreshold {
                    base: ThresholdBase {
                        all_values: Some(true),
                        level: Some(StatusLevel::Warn),
                    },
                    value: 80.0,
                }),
                Threshold::Range(RangeThreshold {
                    base: ThresholdBase {
                        all_values: None,
                        level: Some(StatusLevel::Crit),
                    },
                    min: 90.0,
                    max: 100.0,
                    within: true,
                }),
            ],
        })
    }

    #[test]
    fn round_trips_deadman_check() {
        let check = Check::Deadman(DeadmanCheck {
            base: base_ext("heartbeat"),
            level: Some(StatusLevel::Crit),
            report_zero: Some(false),
            stale_time: Some("10m".into()),
            time_since: Some("90s".into()),
        });
        let bytes = encode_check(&check).unwrap();
        assert_eq!(decode_check(&bytes).unwrap(), check);
    }

    #[test]
    fn round_trips_threshold_check() {
        let check = threshold_check();
        let bytes = encode_check(&check).unwrap();
        assert_eq!(decode_check(&bytes).unwrap(), check);
    }

    #[test]
    fn round_trips_custom_check() {
        let check = Check::Custom(CustomCheck { base: base("cpu") });
        let bytes = encode_check(&check).unwrap();
        assert_eq!(decode_check(&bytes).unwrap(), check);
    }

    #[test]
    fn encode_injects_check_discriminator() {
        for check in [
            Check::Custom(CustomCheck { base: base("cpu") }),
            threshold_check(),
        ] {
            let bytes = encode_check(&check).unwrap();
            let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(json["type"], check.kind());
        }
    }

    #[test]
    fn decode_unknown_check_type_is_invalid_input() {
        let err = decode_check(br#"{"type":"bogus"}"#).unwrap_err();
        assert_matches!(err, CodecError::InvalidInput(message) => {
            assert!(message.contains("bogus"), "{message}");
        });
    }

    #[test]
    fn decode_missing_check_type_is_invalid_input() {
        let err = decode_check(br#"{"name":"cpu"}"#).unwrap_err();
        assert_matches!(err, CodecError::InvalidInput(_));
    }

    #[test]
    fn decode_garbage_is_malformed() {
        assert_matches!(
            decode_check(b"not json at all").unwrap_err(),
            CodecError::Malformed(_)
        );
        assert_matches!(
            decode_threshold(b"{truncated").unwrap_err(),
            CodecError::Malformed(_)
        );
    }

    #[test]
    fn decodes_lesser_threshold_example() {
        let threshold = decode_threshold(br#"{"type":"lesser","value":5.0,"level":"CRIT"}"#)
            .unwrap();
        assert_eq!(
            threshold,
            Threshold::Lesser(LesserThreshold {
                base: ThresholdBase {
                    all_values: None,
                    level: Some(StatusLevel::Crit),
                },
                value: 5.0,
            })
        );

        // Re-encoding reproduces the same object, key order aside.
        let bytes = encode_threshold(&threshold).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let expected: serde_json::Value =
            serde_json::from_str(r#"{"type":"lesser","value":5.0,"level":"CRIT"}"#).unwrap();
        assert_eq!(json, expected);
    }

    #[test]
    fn decodes_range_threshold_example() {
        let threshold =
            decode_threshold(br#"{"type":"range","min":1.0,"max":9.0,"within":true}"#).unwrap();
        assert_matches!(&threshold, Threshold::Range(range) => {
            assert_eq!(range.min, 1.0);
            assert_eq!(range.max, 9.0);
            assert!(range.within);
        });

        let bytes = encode_threshold(&threshold).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["type"], "range");
    }

    #[test]
    fn round_trips_every_threshold_variant() {
        let variants = [
            Threshold::Lesser(LesserThreshold {
                base: ThresholdBase::default(),
                value: 1.5,
            }),
            Threshold::Greater(GreaterThreshold {
                base: ThresholdBase {
                    all_values: Some(false),
                    level: Some(StatusLevel::Info),
                },
                value: -3.0,
            }),
            Threshold::Range(RangeThreshold {
                base: ThresholdBase::default(),
                min: 0.0,
                max: 10.0,
                within: false,
            }),
        ];
        for threshold in variants {
            let bytes = encode_threshold(&threshold).unwrap();
            assert_eq!(decode_threshold(&bytes).unwrap(), threshold);
        }
    }

    #[test]
    fn decode_unknown_threshold_type_is_invalid_input() {
        let err = decode_threshold(br#"{"type":"bogus","value":1.0}"#).unwrap_err();
        assert_matches!(err, CodecError::InvalidInput(message) => {
            assert!(message.contains("bogus"), "{message}");
        });
    }

    #[test]
    fn decode_missing_threshold_type_is_invalid_input() {
        let err = decode_threshold(br#"{"value":1.0}"#).unwrap_err();
        assert_matches!(err, CodecError::InvalidInput(_));
    }

    #[test]
    fn absent_threshold_value_defaults_to_zero() {
        let threshold = decode_threshold(br#"{"type":"greater","level":"WARN"}"#).unwrap();
        assert_matches!(threshold, Threshold::Greater(greater) => {
            assert_eq!(greater.value, 0.0);
        });
    }

    #[test]
    fn bad_nested_threshold_fails_check_decode() {
        let mut json = serde_json::to_value(threshold_check()).unwrap();
        json["thresholds"][1]["type"] = "bogus".into();
        let bytes = serde_json::to_vec(&json).unwrap();
        assert_matches!(
            decode_check(&bytes).unwrap_err(),
            CodecError::InvalidInput(message) => {
                assert!(message.contains("bogus"), "{message}");
            }
        );
    }

    #[test]
    fn absent_thresholds_decode_as_empty_list() {
        let mut json = serde_json::to_value(threshold_check()).unwrap();
        json.as_object_mut().unwrap().remove("thresholds");
        let bytes = serde_json::to_vec(&json).unwrap();
        assert_matches!(decode_check(&bytes).unwrap(), Check::Threshold(check) => {
            assert!(check.thresholds.is_empty());
        });
    }

    #[test]
    fn decodes_check_list() {
        let custom = encode_check(&Check::Custom(CustomCheck { base: base("cpu") })).unwrap();
        let deadman = encode_check(&Check::Deadman(DeadmanCheck {
            base: base_ext("heartbeat"),
            level: None,
            report_zero: None,
            stale_time: None,
            time_since: None,
        }))
        .unwrap();
        let list = format!(
            "[{},{}]",
            String::from_utf8(custom).unwrap(),
            String::from_utf8(deadman).unwrap()
        );
        let checks = decode_check_list(list.as_bytes()).unwrap();
        assert_eq!(checks.len(), 2);
        assert_eq!(checks[0].kind(), "custom");
        assert_eq!(checks[1].kind(), "deadman");
    }

    #[test]
    fn one_bad_element_fails_whole_list_decode() {
        let good = encode_check(&Check::Custom(CustomCheck { base: base("cpu") })).unwrap();
        let list = format!(
            r#"[{},{{"type":"bogus"}}]"#,
            String::from_utf8(good).unwrap()
        );
        assert_matches!(
            decode_check_list(list.as_bytes()).unwrap_err(),
            CodecError::InvalidInput(_)
        );
    }

    #[test]
    fn decodes_paged_checks_envelope() {
        let check = encode_check(&Check::Custom(CustomCheck { base: base("cpu") })).unwrap();
        let body = format!(
            r#"{{"checks":[{}],"links":{{"self":"/api/v2/checks?limit=20","next":"/api/v2/checks?offset=20&limit=20"}}}}"#,
            String::from_utf8(check).unwrap()
        );
        let checks = decode_checks(body.as_bytes()).unwrap();
        assert_eq!(checks.checks.len(), 1);
        let links = checks.links.unwrap();
        assert_eq!(links.self_link, "/api/v2/checks?limit=20");
        assert_eq!(links.next.as_deref(), Some("/api/v2/checks?offset=20&limit=20"));
        assert_eq!(links.prev, None);
    }

    #[test]
    fn empty_envelope_decodes_to_no_checks() {
        let checks = decode_checks(br#"{}"#).unwrap();
        assert!(checks.checks.is_empty());
        assert!(checks.links.is_none());
    }
}
