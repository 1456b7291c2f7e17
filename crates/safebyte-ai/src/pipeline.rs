//! Risk inference pipeline: encode → reorder → scale → classify → decode.

use safebyte_core::{CATEGORICAL_FIELDS, FeatureRecord, FieldValue, NUMERIC_FIELDS, RiskLabel};
use tracing::debug;

use crate::classifier::Classifier;
use crate::encoders::{EncoderSet, LabelEncoder};
use crate::error::{ArtifactError, PipelineError};
use crate::scaler::FeatureScaler;

/// The four loaded model artifacts, read-only for the life of the process.
///
/// Construct once at startup (usually via [`RiskModel::load`]) and pass by
/// reference to every request.
#[derive(Debug, Clone)]
pub struct RiskModel {
    encoders: EncoderSet,
    scaler: FeatureScaler,
    classifier: Classifier,
    labels: LabelEncoder,
}

impl RiskModel {
    /// Bundle loaded artifacts, checking that they agree on field names and widths.
    pub fn new(
        encoders: EncoderSet,
        scaler: FeatureScaler,
        classifier: Classifier,
        labels: LabelEncoder,
    ) -> Result<Self, ArtifactError> {
        scaler.validate()?;
        classifier.validate()?;

        for name in scaler.feature_names() {
            let known = CATEGORICAL_FIELDS.contains(&name.as_str())
                || NUMERIC_FIELDS.contains(&name.as_str());
            if !known {
                return Err(ArtifactError::Invalid(format!(
                    "scaler expects unknown feature '{name}'"
                )));
            }
            if CATEGORICAL_FIELDS.contains(&name.as_str()) && encoders.get(name).is_none() {
                return Err(ArtifactError::Invalid(format!(
                    "scaler expects feature '{name}' but no encoder was loaded for it"
                )));
            }
        }

        if classifier.n_features() != scaler.n_features() {
            return Err(ArtifactError::Invalid(format!(
                "classifier expects {} features, scaler produces {}",
                classifier.n_features(),
                scaler.n_features()
            )));
        }

        if let Some(code) = classifier
            .classes()
            .iter()
            .find(|&&code| labels.decode(code).is_none())
        {
            return Err(ArtifactError::Invalid(format!(
                "classifier class {code} has no entry in the label encoder"
            )));
        }

        Ok(Self {
            encoders,
            scaler,
            classifier,
            labels,
        })
    }

    pub fn encoders(&self) -> &EncoderSet {
        &self.encoders
    }

    pub fn scaler(&self) -> &FeatureScaler {
        &self.scaler
    }

    /// Closed set of risk levels [`infer`](Self::infer) can return.
    pub fn risk_levels(&self) -> &[String] {
        self.labels.classes()
    }

    /// Fitted vocabulary for a categorical field.
    pub fn vocabulary(&self, field: &str) -> Option<&[String]> {
        self.encoders.get(field).map(|enc| enc.classes())
    }

    /// Predict the risk level for one record.
    pub fn infer(&self, record: &FeatureRecord) -> Result<RiskLabel, PipelineError> {
        record.validate_ranges()?;

        let encoded = encode(&self.encoders, record)?;
        let ordered = reorder(&encoded, self.scaler.feature_names())?;
        let scaled = self.scaler.transform(&ordered)?;
        let code = self.classifier.predict(&scaled)?;
        let label = self
            .labels
            .decode(code)
            .ok_or(PipelineError::UnknownLabel(code))?;

        debug!(food_item = %record.food_item, code, label, "inferred risk level");
        Ok(RiskLabel::new(label))
    }
}

/// Replace every categorical value with its code; day counts pass through.
///
/// Returns `(field, value)` pairs in record order.
pub fn encode(
    encoders: &EncoderSet,
    record: &FeatureRecord,
) -> Result<Vec<(&'static str, f64)>, PipelineError> {
    record
        .fields()
        .into_iter()
        .map(|(name, value)| {
            let v = match value {
                FieldValue::Category(s) => f64::from(encoders.encode(name, s)?),
                FieldValue::Count(n) => f64::from(n),
            };
            Ok((name, v))
        })
        .collect()
}

/// Project encoded fields into `order`.
///
/// Only the field→value mapping matters; the order of `fields` does not.
pub fn reorder<S: AsRef<str>>(
    fields: &[(&str, f64)],
    order: &[S],
) -> Result<Vec<f64>, PipelineError> {
    order
        .iter()
        .map(|name| {
            let name = name.as_ref();
            fields
                .iter()
                .find(|(field, _)| *field == name)
                .map(|(_, v)| *v)
                .ok_or_else(|| {
                    PipelineError::SchemaMismatch(format!("record has no field '{name}'"))
                })
        })
        .collect()
}
