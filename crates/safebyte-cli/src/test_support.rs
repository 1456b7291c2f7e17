//! Artifact export and feature batches for CLI tests.

use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Int64Array, StringArray};
use arrow::record_batch::RecordBatch;
use safebyte_ai::RiskModel;
use safebyte_core::features;

const MODEL_JSON: &str = r#"{
  "kind": "decision_tree",
  "classes": [0, 1, 2],
  "n_features": 7,
  "tree": {
    "children_left": [1, 2, -1, -1, -1],
    "children_right": [4, 3, -1, -1, -1],
    "feature": [0, 4, -2, -2, -2],
    "threshold": [0.5, 0.5, -2.0, -2.0, -2.0],
    "value": [[6, 7, 5], [1, 7, 5], [0, 7, 1], [1, 0, 4], [5, 0, 0]]
  }
}"#;

const SCALER_JSON: &str = r#"{
  "kind": "standard",
  "feature_names": [
    "observed_fridge_days", "food_item", "storage_type", "spoilage_visual_signs",
    "spoilage_odor_signs", "guideline", "observed_freezer_days"
  ],
  "mean": [5.0, 1.5, 1.0, 1.0, 1.0, 0.5, 30.0],
  "scale": [5.0, 1.0, 1.0, 1.0, 1.0, 0.5, 60.0]
}"#;

const ENCODERS_JSON: &str = r#"{
  "food_item": {"classes": ["Bread", "Chicken", "Eggs", "Milk"]},
  "spoilage_visual_signs": {"classes": ["Discoloration", "Mold", "None"]},
  "spoilage_odor_signs": {"classes": ["None", "Sour", "Strong"]},
  "storage_type": {"classes": ["Freezer", "Fridge", "Pantry"]},
  "guideline": {"classes": ["FDA", "USDA"]}
}"#;

const LABELS_JSON: &str = r#"{"classes": ["High", "Low", "Medium"]}"#;

/// Export a small decision-tree model into `dir` and load it back.
pub fn model(dir: &Path) -> RiskModel {
    use safebyte_ai::artifacts::{ENCODERS_FILE, LABELS_FILE, MODEL_FILE, SCALER_FILE};

    std::fs::write(dir.join(MODEL_FILE), MODEL_JSON).unwrap();
    std::fs::write(dir.join(SCALER_FILE), SCALER_JSON).unwrap();
    std::fs::write(dir.join(ENCODERS_FILE), ENCODERS_JSON).unwrap();
    std::fs::write(dir.join(LABELS_FILE), LABELS_JSON).unwrap();
    RiskModel::load(dir).unwrap()
}

pub fn feature_batch(rows: &[(&str, &str, &str, &str, &str, i64, i64)]) -> RecordBatch {
    let columns: Vec<ArrayRef> = vec![
        text_column(rows.iter().map(|r| r.0)),
        text_column(rows.iter().map(|r| r.1)),
        text_column(rows.iter().map(|r| r.2)),
        text_column(rows.iter().map(|r| r.3)),
        text_column(rows.iter().map(|r| r.4)),
        Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.5))),
        Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.6))),
    ];
    RecordBatch::try_new(Arc::new(features::feature_record_schema()), columns).unwrap()
}

fn text_column<'a>(values: impl Iterator<Item = &'a str>) -> ArrayRef {
    Arc::new(StringArray::from_iter_values(values))
}
