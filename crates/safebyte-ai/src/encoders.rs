//! Fitted categorical encoders.
//!
//! Each encoder is a fixed vocabulary: the code of a value is its position
//! in `classes`. One encoder exists per categorical input field, plus the
//! label encoder that maps classifier output back to a risk level.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{ArtifactError, PipelineError};

/// Bijection between a fitted vocabulary and integer codes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "EncoderRepr", into = "EncoderRepr")]
pub struct CategoryEncoder {
    classes: Vec<String>,
    codes: HashMap<String, u32>,
}

#[derive(Serialize, Deserialize)]
struct EncoderRepr {
    classes: Vec<String>,
}

impl TryFrom<EncoderRepr> for CategoryEncoder {
    type Error = String;

    fn try_from(repr: EncoderRepr) -> Result<Self, Self::Error> {
        Self::new(repr.classes)
    }
}

impl From<CategoryEncoder> for EncoderRepr {
    fn from(enc: CategoryEncoder) -> Self {
        EncoderRepr {
            classes: enc.classes,
        }
    }
}

impl CategoryEncoder {
    /// Build an encoder from its ordered vocabulary. Duplicates are rejected.
    pub fn new(classes: Vec<String>) -> Result<Self, String> {
        let mut codes = HashMap::with_capacity(classes.len());
        for (code, class) in classes.iter().enumerate() {
            if codes.insert(class.clone(), code as u32).is_some() {
                return Err(format!("duplicate class {class:?}"));
            }
        }
        Ok(Self { classes, codes })
    }

    /// Fitted vocabulary in code order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.codes.contains_key(value)
    }

    pub fn encode(&self, value: &str) -> Option<u32> {
        self.codes.get(value).copied()
    }

    pub fn decode(&self, code: u32) -> Option<&str> {
        self.classes.get(code as usize).map(String::as_str)
    }
}

/// Maps encoded classifier output back to a risk-level string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelEncoder(CategoryEncoder);

impl LabelEncoder {
    pub fn new(classes: Vec<String>) -> Result<Self, String> {
        CategoryEncoder::new(classes).map(Self)
    }

    /// Closed set of risk levels the model can emit.
    pub fn classes(&self) -> &[String] {
        self.0.classes()
    }

    pub fn decode(&self, code: u32) -> Option<&str> {
        self.0.decode(code)
    }
}

/// Ordered `(field, encoder)` pairs, one per categorical input field.
#[derive(Debug, Clone)]
pub struct EncoderSet {
    encoders: Vec<(String, CategoryEncoder)>,
}

impl EncoderSet {
    /// Arrange encoders in `field_order`.
    ///
    /// Every field in `field_order` must have an encoder, and every encoder
    /// must belong to a field in `field_order`.
    pub fn from_map(
        mut by_field: HashMap<String, CategoryEncoder>,
        field_order: &[&str],
    ) -> Result<Self, ArtifactError> {
        let mut encoders = Vec::with_capacity(field_order.len());
        for &field in field_order {
            let enc = by_field
                .remove(field)
                .ok_or_else(|| ArtifactError::Invalid(format!("no encoder for field '{field}'")))?;
            if enc.is_empty() {
                return Err(ArtifactError::Invalid(format!(
                    "encoder for field '{field}' has an empty vocabulary"
                )));
            }
            encoders.push((field.to_string(), enc));
        }

        if let Some(extra) = by_field.keys().next() {
            return Err(ArtifactError::Invalid(format!(
                "encoder for unknown field '{extra}'"
            )));
        }

        Ok(Self { encoders })
    }

    pub fn get(&self, field: &str) -> Option<&CategoryEncoder> {
        self.encoders
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, enc)| enc)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryEncoder)> {
        self.encoders.iter().map(|(name, enc)| (name.as_str(), enc))
    }

    /// Encode `value` for `field`.
    pub fn encode(&self, field: &str, value: &str) -> Result<u32, PipelineError> {
        let enc = self
            .get(field)
            .ok_or_else(|| PipelineError::SchemaMismatch(format!("no encoder for field '{field}'")))?;
        enc.encode(value)
            .ok_or_else(|| PipelineError::UnknownCategory {
                field: field.to_string(),
                value: value.to_string(),
            })
    }
}
