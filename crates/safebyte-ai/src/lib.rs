//! Model artifacts and the risk inference pipeline.

pub mod artifacts;
pub mod batch;
pub mod classifier;
pub mod encoders;
mod error;
pub mod pipeline;
pub mod scaler;

#[cfg(test)]
mod fixtures;

pub use classifier::{Classifier, ClassifierModel, DecisionTree};
pub use encoders::{CategoryEncoder, EncoderSet, LabelEncoder};
pub use error::{ArtifactError, PipelineError};
pub use pipeline::{RiskModel, encode, reorder};
pub use scaler::{FeatureScaler, ScalerKind};
