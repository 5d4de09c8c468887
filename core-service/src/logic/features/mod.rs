//! Features Module - Clinical Feature Contract
//!
//! Định nghĩa thứ tự 8 features dùng chung cho training và inference.
//!
//! ## Structure
//! - `layout`: Authoritative feature order, version, hash
//! - `vector`: FeatureVector + parsing of raw form input

pub mod layout;
pub mod vector;

pub use layout::{
    layout_hash, validate_layout, LayoutInfo, LayoutMismatchError, FEATURE_COUNT,
    FEATURE_LABELS, FEATURE_LAYOUT, FEATURE_VERSION,
};
pub use vector::FeatureVector;
