//! Loading model artifacts from an export directory.
//!
//! The training job writes four JSON documents side by side:
//!
//! | File | Contents |
//! |------|----------|
//! | `food_spoilage_model.json` | [`Classifier`] |
//! | `food_spoilage_scaler.json` | [`FeatureScaler`] |
//! | `food_spoilage_encoders.json` | field name → [`CategoryEncoder`] |
//! | `food_spoilage_y_encoder.json` | [`LabelEncoder`] |

use std::collections::HashMap;
use std::path::Path;

use safebyte_core::CATEGORICAL_FIELDS;
use serde::de::DeserializeOwned;
use tracing::info;

use crate::classifier::Classifier;
use crate::encoders::{CategoryEncoder, EncoderSet, LabelEncoder};
use crate::error::ArtifactError;
use crate::pipeline::RiskModel;
use crate::scaler::FeatureScaler;

pub const MODEL_FILE: &str = "food_spoilage_model.json";
pub const SCALER_FILE: &str = "food_spoilage_scaler.json";
pub const ENCODERS_FILE: &str = "food_spoilage_encoders.json";
pub const LABELS_FILE: &str = "food_spoilage_y_encoder.json";

impl RiskModel {
    /// Load all four artifacts from `dir` and check they are mutually consistent.
    pub fn load(dir: &Path) -> Result<Self, ArtifactError> {
        let classifier: Classifier = read_json(&dir.join(MODEL_FILE))?;
        let scaler: FeatureScaler = read_json(&dir.join(SCALER_FILE))?;
        let by_field: HashMap<String, CategoryEncoder> = read_json(&dir.join(ENCODERS_FILE))?;
        let labels: LabelEncoder = read_json(&dir.join(LABELS_FILE))?;

        let encoders = EncoderSet::from_map(by_field, CATEGORICAL_FIELDS)?;
        let model = Self::new(encoders, scaler, classifier, labels)?;

        info!(
            dir = %dir.display(),
            features = model.scaler().n_features(),
            risk_levels = model.risk_levels().len(),
            "loaded risk model"
        );
        Ok(model)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    if !path.exists() {
        return Err(ArtifactError::NotFound(path.to_path_buf()));
    }
    let text = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ArtifactError::Json {
        path: path.to_path_buf(),
        source,
    })
}
