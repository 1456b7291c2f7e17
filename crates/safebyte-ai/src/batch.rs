//! Batch scoring over Arrow record batches.
//!
//! Input batches carry the seven feature columns by name (see
//! [`safebyte_core::features::feature_record_schema`]); extra columns are
//! ignored and column order does not matter.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Int64Array, LargeStringArray, StringArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use safebyte_core::record::{
    FOOD_ITEM, GUIDELINE, OBSERVED_FREEZER_DAYS, OBSERVED_FRIDGE_DAYS, SPOILAGE_ODOR_SIGNS,
    SPOILAGE_VISUAL_SIGNS, STORAGE_TYPE, check_days,
};
use safebyte_core::{FeatureRecord, MAX_FREEZER_DAYS, MAX_FRIDGE_DAYS, RiskLabel};
use tracing::info;

use crate::error::PipelineError;
use crate::pipeline::RiskModel;

impl RiskModel {
    /// Predict one risk level per row across all batches.
    pub fn infer_batch(&self, batches: &[RecordBatch]) -> Result<Vec<RiskLabel>, PipelineError> {
        let mut labels = Vec::new();
        for batch in batches {
            for record in records_from_batch(batch)? {
                labels.push(self.infer(&record)?);
            }
        }
        info!(rows = labels.len(), "scored batch");
        Ok(labels)
    }
}

/// Convert every row of `batch` into a [`FeatureRecord`].
pub fn records_from_batch(batch: &RecordBatch) -> Result<Vec<FeatureRecord>, PipelineError> {
    let food = column(batch, FOOD_ITEM)?;
    let visual = column(batch, SPOILAGE_VISUAL_SIGNS)?;
    let odor = column(batch, SPOILAGE_ODOR_SIGNS)?;
    let storage = column(batch, STORAGE_TYPE)?;
    let guideline = column(batch, GUIDELINE)?;
    let fridge = int_column(batch, OBSERVED_FRIDGE_DAYS)?;
    let freezer = int_column(batch, OBSERVED_FREEZER_DAYS)?;

    (0..batch.num_rows())
        .map(|row| {
            Ok(FeatureRecord {
                food_item: string_at(food.as_ref(), FOOD_ITEM, row)?,
                spoilage_visual_signs: string_at(visual.as_ref(), SPOILAGE_VISUAL_SIGNS, row)?,
                spoilage_odor_signs: string_at(odor.as_ref(), SPOILAGE_ODOR_SIGNS, row)?,
                storage_type: string_at(storage.as_ref(), STORAGE_TYPE, row)?,
                guideline: string_at(guideline.as_ref(), GUIDELINE, row)?,
                observed_fridge_days: check_days(
                    OBSERVED_FRIDGE_DAYS,
                    int_at(&fridge, OBSERVED_FRIDGE_DAYS, row)?,
                    MAX_FRIDGE_DAYS,
                )?,
                observed_freezer_days: check_days(
                    OBSERVED_FREEZER_DAYS,
                    int_at(&freezer, OBSERVED_FREEZER_DAYS, row)?,
                    MAX_FREEZER_DAYS,
                )?,
            })
        })
        .collect()
}

/// Append a `risk_level` column to `batch`.
pub fn scored_batch(batch: &RecordBatch, labels: &[RiskLabel]) -> Result<RecordBatch, ArrowError> {
    if labels.len() != batch.num_rows() {
        return Err(ArrowError::InvalidArgumentError(format!(
            "{} labels for {} rows",
            labels.len(),
            batch.num_rows()
        )));
    }

    let mut fields: Vec<Field> = batch
        .schema()
        .fields()
        .iter()
        .map(|f| f.as_ref().clone())
        .collect();
    fields.push(Field::new("risk_level", DataType::Utf8, false));

    let mut columns: Vec<ArrayRef> = batch.columns().to_vec();
    columns.push(Arc::new(StringArray::from_iter_values(
        labels.iter().map(RiskLabel::as_str),
    )));

    RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)
}

// ── Arrow extraction helpers ──

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef, PipelineError> {
    batch
        .column_by_name(name)
        .ok_or_else(|| PipelineError::SchemaMismatch(format!("missing '{name}' column")))
}

/// Fetch an integer column, widening any integer type to Int64.
fn int_column(batch: &RecordBatch, name: &str) -> Result<Int64Array, PipelineError> {
    let col = column(batch, name)?;
    if !col.data_type().is_integer() {
        return Err(PipelineError::SchemaMismatch(format!(
            "'{name}' column is {}, expected an integer type",
            col.data_type()
        )));
    }
    let widened = cast(col.as_ref(), &DataType::Int64)
        .map_err(|e| PipelineError::SchemaMismatch(format!("'{name}' column: {e}")))?;
    widened
        .as_any()
        .downcast_ref::<Int64Array>()
        .cloned()
        .ok_or_else(|| PipelineError::SchemaMismatch(format!("'{name}' column is not Int64")))
}

/// Extract a string value (handles Utf8 and LargeUtf8).
fn string_at(col: &dyn Array, name: &str, row: usize) -> Result<String, PipelineError> {
    if col.is_null(row) {
        return Err(PipelineError::SchemaMismatch(format!(
            "null '{name}' at row {row}"
        )));
    }
    col.as_any()
        .downcast_ref::<StringArray>()
        .map(|arr| arr.value(row).to_string())
        .or_else(|| {
            col.as_any()
                .downcast_ref::<LargeStringArray>()
                .map(|arr| arr.value(row).to_string())
        })
        .ok_or_else(|| PipelineError::SchemaMismatch(format!("'{name}' column is not a string")))
}

fn int_at(col: &Int64Array, name: &str, row: usize) -> Result<i64, PipelineError> {
    if col.is_null(row) {
        return Err(PipelineError::SchemaMismatch(format!(
            "null '{name}' at row {row}"
        )));
    }
    Ok(col.value(row))
}
