//! Small hand-fitted model shared by the unit tests.
//!
//! Tree: fridge days (scaled) <= 0.5 → odor code (scaled) <= 0.5 → Low,
//! otherwise Medium; more fridge days → High.

use std::collections::HashMap;

use safebyte_core::{CATEGORICAL_FIELDS, FeatureRecord};

use crate::classifier::{Classifier, ClassifierModel, DecisionTree, TREE_LEAF};
use crate::encoders::{CategoryEncoder, EncoderSet, LabelEncoder};
use crate::pipeline::RiskModel;
use crate::scaler::{FeatureScaler, ScalerKind};

pub const FOOD_ITEMS: &[&str] = &["Bread", "Chicken", "Eggs", "Milk"];
pub const VISUAL_SIGNS: &[&str] = &["Discoloration", "Mold", "None"];
pub const ODOR_SIGNS: &[&str] = &["None", "Sour", "Strong"];
pub const STORAGE_TYPES: &[&str] = &["Freezer", "Fridge", "Pantry"];
pub const GUIDELINES: &[&str] = &["FDA", "USDA"];
pub const RISK_LEVELS: &[&str] = &["High", "Low", "Medium"];

/// Scaler order, deliberately different from record order.
pub const SCALER_ORDER: &[&str] = &[
    "observed_fridge_days",
    "food_item",
    "storage_type",
    "spoilage_visual_signs",
    "spoilage_odor_signs",
    "guideline",
    "observed_freezer_days",
];

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

pub fn encoders() -> EncoderSet {
    let vocabularies = [FOOD_ITEMS, VISUAL_SIGNS, ODOR_SIGNS, STORAGE_TYPES, GUIDELINES];
    let map: HashMap<String, CategoryEncoder> = CATEGORICAL_FIELDS
        .iter()
        .zip(vocabularies)
        .map(|(field, vocab)| {
            (
                field.to_string(),
                CategoryEncoder::new(strings(vocab)).unwrap(),
            )
        })
        .collect();
    EncoderSet::from_map(map, CATEGORICAL_FIELDS).unwrap()
}

pub fn scaler() -> FeatureScaler {
    FeatureScaler::new(
        strings(SCALER_ORDER),
        ScalerKind::Standard {
            mean: vec![5.0, 1.5, 1.0, 1.0, 1.0, 0.5, 30.0],
            scale: vec![5.0, 1.0, 1.0, 1.0, 1.0, 0.5, 60.0],
        },
    )
    .unwrap()
}

pub fn tree() -> DecisionTree {
    DecisionTree {
        children_left: vec![1, 2, TREE_LEAF, TREE_LEAF, TREE_LEAF],
        children_right: vec![4, 3, TREE_LEAF, TREE_LEAF, TREE_LEAF],
        // Feature 0 = fridge days, feature 4 = odor signs (scaler order).
        feature: vec![0, 4, -2, -2, -2],
        threshold: vec![0.5, 0.5, -2.0, -2.0, -2.0],
        value: vec![
            vec![6.0, 7.0, 5.0],
            vec![1.0, 7.0, 5.0],
            vec![0.0, 7.0, 1.0],
            vec![1.0, 0.0, 4.0],
            vec![5.0, 0.0, 0.0],
        ],
    }
}

pub fn classifier_with_width(n_features: usize) -> Classifier {
    Classifier::new(
        vec![0, 1, 2],
        n_features,
        ClassifierModel::DecisionTree { tree: tree() },
    )
    .unwrap()
}

pub fn classifier() -> Classifier {
    classifier_with_width(SCALER_ORDER.len())
}

pub fn labels() -> LabelEncoder {
    LabelEncoder::new(strings(RISK_LEVELS)).unwrap()
}

pub fn model() -> RiskModel {
    RiskModel::new(encoders(), scaler(), classifier(), labels()).unwrap()
}

pub fn milk() -> FeatureRecord {
    FeatureRecord {
        food_item: "Milk".into(),
        spoilage_visual_signs: "None".into(),
        spoilage_odor_signs: "None".into(),
        storage_type: "Fridge".into(),
        guideline: "USDA".into(),
        observed_fridge_days: 2,
        observed_freezer_days: 0,
    }
}
