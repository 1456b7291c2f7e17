//! Raw feature record entered for a single food item.
//!
//! Five categorical fields are free strings here; membership in the fitted
//! vocabulary is checked later, when the record is encoded.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const FOOD_ITEM: &str = "food_item";
pub const SPOILAGE_VISUAL_SIGNS: &str = "spoilage_visual_signs";
pub const SPOILAGE_ODOR_SIGNS: &str = "spoilage_odor_signs";
pub const STORAGE_TYPE: &str = "storage_type";
pub const GUIDELINE: &str = "guideline";
pub const OBSERVED_FRIDGE_DAYS: &str = "observed_fridge_days";
pub const OBSERVED_FREEZER_DAYS: &str = "observed_freezer_days";

/// Categorical columns, in the order they appear in a record.
pub const CATEGORICAL_FIELDS: &[&str] = &[
    FOOD_ITEM,
    SPOILAGE_VISUAL_SIGNS,
    SPOILAGE_ODOR_SIGNS,
    STORAGE_TYPE,
    GUIDELINE,
];

/// Numeric columns passed through to the scaler unencoded.
pub const NUMERIC_FIELDS: &[&str] = &[OBSERVED_FRIDGE_DAYS, OBSERVED_FREEZER_DAYS];

pub const MAX_FRIDGE_DAYS: u32 = 60;
pub const MAX_FREEZER_DAYS: u32 = 365;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} = {value} is outside [0, {max}]")]
pub struct RangeError {
    pub field: &'static str,
    pub value: i64,
    pub max: i64,
}

/// One row of user input, before encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub food_item: String,
    pub spoilage_visual_signs: String,
    pub spoilage_odor_signs: String,
    pub storage_type: String,
    pub guideline: String,
    pub observed_fridge_days: u32,
    pub observed_freezer_days: u32,
}

/// A single field value as seen by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Category(&'a str),
    Count(u32),
}

impl FeatureRecord {
    /// All seven fields as `(column name, value)` pairs.
    pub fn fields(&self) -> [(&'static str, FieldValue<'_>); 7] {
        [
            (FOOD_ITEM, FieldValue::Category(&self.food_item)),
            (
                SPOILAGE_VISUAL_SIGNS,
                FieldValue::Category(&self.spoilage_visual_signs),
            ),
            (
                SPOILAGE_ODOR_SIGNS,
                FieldValue::Category(&self.spoilage_odor_signs),
            ),
            (STORAGE_TYPE, FieldValue::Category(&self.storage_type)),
            (GUIDELINE, FieldValue::Category(&self.guideline)),
            (
                OBSERVED_FRIDGE_DAYS,
                FieldValue::Count(self.observed_fridge_days),
            ),
            (
                OBSERVED_FREEZER_DAYS,
                FieldValue::Count(self.observed_freezer_days),
            ),
        ]
    }

    /// Look up a categorical value by column name.
    pub fn category(&self, field: &str) -> Option<&str> {
        match field {
            FOOD_ITEM => Some(&self.food_item),
            SPOILAGE_VISUAL_SIGNS => Some(&self.spoilage_visual_signs),
            SPOILAGE_ODOR_SIGNS => Some(&self.spoilage_odor_signs),
            STORAGE_TYPE => Some(&self.storage_type),
            GUIDELINE => Some(&self.guideline),
            _ => None,
        }
    }

    /// Check both day counts against their input domains.
    pub fn validate_ranges(&self) -> Result<(), RangeError> {
        check_days(OBSERVED_FRIDGE_DAYS, self.observed_fridge_days.into(), MAX_FRIDGE_DAYS)?;
        check_days(
            OBSERVED_FREEZER_DAYS,
            self.observed_freezer_days.into(),
            MAX_FREEZER_DAYS,
        )?;
        Ok(())
    }
}

/// Validate a raw day count, e.g. one read from an Int64 column.
pub fn check_days(field: &'static str, value: i64, max: u32) -> Result<u32, RangeError> {
    let max = i64::from(max);
    if (0..=max).contains(&value) {
        Ok(value as u32)
    } else {
        Err(RangeError { field, value, max })
    }
}
