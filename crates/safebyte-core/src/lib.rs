pub mod record;
pub mod risk;
pub mod schema;

pub use record::{
    CATEGORICAL_FIELDS, FeatureRecord, FieldValue, MAX_FREEZER_DAYS, MAX_FRIDGE_DAYS,
    NUMERIC_FIELDS, RangeError,
};
pub use risk::{RiskLabel, RiskTier};
pub use schema::features;
