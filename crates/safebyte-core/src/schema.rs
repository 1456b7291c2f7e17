/// Arrow schema definitions for feature records.
pub mod features {
    use arrow::datatypes::{DataType, Field, Schema};

    use crate::record::{CATEGORICAL_FIELDS, NUMERIC_FIELDS};

    /// Schema for a batch of raw feature records.
    ///
    /// Categorical columns are `Utf8`, day counts are `Int64`. Readers also
    /// accept `LargeUtf8` and the other integer widths.
    pub fn feature_record_schema() -> Schema {
        let categorical = CATEGORICAL_FIELDS
            .iter()
            .map(|name| Field::new(*name, DataType::Utf8, false));
        let numeric = NUMERIC_FIELDS
            .iter()
            .map(|name| Field::new(*name, DataType::Int64, false));
        Schema::new(categorical.chain(numeric).collect::<Vec<_>>())
    }

    /// Schema for scored output: the input columns plus `risk_level`.
    pub fn scored_schema() -> Schema {
        let mut fields: Vec<Field> = feature_record_schema()
            .fields()
            .iter()
            .map(|f| f.as_ref().clone())
            .collect();
        fields.push(Field::new("risk_level", DataType::Utf8, false));
        Schema::new(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::features;

    #[test]
    fn feature_record_schema_has_expected_fields() {
        let schema = features::feature_record_schema();
        assert_eq!(schema.fields().len(), 7);
        assert!(schema.field_with_name("food_item").is_ok());
        assert!(schema.field_with_name("observed_freezer_days").is_ok());
    }

    #[test]
    fn scored_schema_appends_risk_level() {
        let schema = features::scored_schema();
        assert_eq!(schema.fields().len(), 8);
        assert_eq!(schema.field(7).name(), "risk_level");
    }
}
