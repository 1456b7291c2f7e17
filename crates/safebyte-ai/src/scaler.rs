//! Fitted feature scaler.

use serde::{Deserialize, Serialize};

use crate::error::{ArtifactError, PipelineError};

/// Normalizes an ordered feature vector.
///
/// `feature_names` is the column order the scaler was fitted on; the
/// pipeline reorders every record into this order before calling
/// [`transform`](Self::transform).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureScaler {
    feature_names: Vec<String>,
    #[serde(flatten)]
    kind: ScalerKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalerKind {
    /// `(x - mean) / scale`
    Standard { mean: Vec<f64>, scale: Vec<f64> },
    /// `x * scale + min`
    MinMax { min: Vec<f64>, scale: Vec<f64> },
}

impl FeatureScaler {
    pub fn new(feature_names: Vec<String>, kind: ScalerKind) -> Result<Self, ArtifactError> {
        let scaler = Self {
            feature_names,
            kind,
        };
        scaler.validate()?;
        Ok(scaler)
    }

    /// Column order expected by [`transform`](Self::transform).
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    /// Check that every parameter vector matches the feature list.
    pub fn validate(&self) -> Result<(), ArtifactError> {
        let n = self.feature_names.len();
        if n == 0 {
            return Err(ArtifactError::Invalid("scaler has no features".into()));
        }
        let (a, b) = match &self.kind {
            ScalerKind::Standard { mean, scale } => (mean.len(), scale.len()),
            ScalerKind::MinMax { min, scale } => (min.len(), scale.len()),
        };
        if a != n || b != n {
            return Err(ArtifactError::Invalid(format!(
                "scaler parameters have lengths {a}/{b}, expected {n}"
            )));
        }
        for (i, name) in self.feature_names.iter().enumerate() {
            if self.feature_names[..i].contains(name) {
                return Err(ArtifactError::Invalid(format!(
                    "scaler lists feature '{name}' twice"
                )));
            }
        }
        Ok(())
    }

    /// Apply the fitted normalization to a vector in [`feature_names`](Self::feature_names) order.
    pub fn transform(&self, x: &[f64]) -> Result<Vec<f64>, PipelineError> {
        if x.len() != self.n_features() {
            return Err(PipelineError::SchemaMismatch(format!(
                "scaler expects {} features, got {}",
                self.n_features(),
                x.len()
            )));
        }

        let out = match &self.kind {
            ScalerKind::Standard { mean, scale } => x
                .iter()
                .zip(mean)
                .zip(scale)
                .map(|((&v, &m), &s)| {
                    // Constant columns are fitted with scale 0; leave them centred only.
                    let s = if s == 0.0 { 1.0 } else { s };
                    (v - m) / s
                })
                .collect(),
            ScalerKind::MinMax { min, scale } => x
                .iter()
                .zip(min)
                .zip(scale)
                .map(|((&v, &lo), &s)| v * s + lo)
                .collect(),
        };
        Ok(out)
    }
}
