//! Model Module - Random Forest & Inference
//!
//! Tách training logic (forest, tree) khỏi serving (inference).
//!
//! ## Structure
//! - `tree`: Weighted CART decision tree
//! - `forest`: Bagged ensemble, class weights, feature importances
//! - `artifact`: On-disk model format (checksummed bincode)
//! - `inference`: `InferenceService`, loaded once and passed around

pub mod tree;
pub mod forest;
pub mod artifact;
pub mod inference;

pub use artifact::{load_artifact, save_artifact, ModelArtifact, ARTIFACT_FORMAT_VERSION};
pub use forest::RandomForest;
pub use inference::{InferenceService, ModelInfo, RiskModel};
