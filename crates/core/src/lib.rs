//! Stratus checks data model and polymorphic JSON codec.
//!
//! This crate holds the wire types for the Stratus `/checks` resource
//! (alerting rule definitions) and the codec that maps them to and from
//! the API's discriminated-union JSON representation:
//!
//! - [`Check`] — closed sum of the check variants (`deadman`,
//!   `threshold`, `custom`), each carrying the shared base fields.
//! - [`Threshold`] — closed sum of the numeric criteria nested inside a
//!   threshold check (`lesser`, `greater`, `range`).
//! - [`codec`] — the two-phase decode (probe the `type` field, then
//!   deserialize the selected variant) and the tag-injecting encode.
//!
//! Everything here is a pure in-memory transform; the HTTP surface
//! lives in `stratus-client`.

pub mod check;
pub mod codec;
pub mod label;
pub mod query;
pub mod threshold;
pub mod types;

pub use check::{
    Check, CheckBase, CheckBaseExt, CheckLinks, CheckPatch, Checks, CustomCheck, DeadmanCheck,
    StatusTag, ThresholdCheck,
};
pub use codec::{
    decode_check, decode_check_list, decode_checks, decode_threshold, encode_check,
    encode_threshold, CodecError,
};
pub use label::{Label, LabelMapping, LabelResponse, Labels, LabelsResponse};
pub use query::{DashboardQuery, FluxResponse, QueryEditMode};
pub use threshold::{GreaterThreshold, LesserThreshold, RangeThreshold, Threshold, ThresholdBase};
pub use types::{LastRunStatus, Links, StatusLevel, TaskStatus, Timestamp};
