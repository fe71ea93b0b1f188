//! Property-based tests for the comparator and type inferencer.
//!
//! These verify the order-insensitivity of schema comparison and that
//! inference never panics or misclassifies integer columns.

use proptest::prelude::*;

use tabula::{compare, ColumnSchema, Comparison, StorageType, TableSchema, TypeInferencer};

/// Generate small sets of distinct column names.
fn column_names() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::btree_set("[a-z][a-z0-9_]{0,8}", 1..6)
        .prop_map(|set| set.into_iter().collect())
}

fn schema_from(names: &[String]) -> TableSchema {
    TableSchema::with_columns(
        "t",
        names
            .iter()
            .enumerate()
            .map(|(i, n)| ColumnSchema::new(n.clone(), StorageType::Text, i))
            .collect(),
    )
}

proptest! {
    #[test]
    fn compare_is_order_insensitive(names in column_names(), seed in any::<u64>()) {
        let schema = schema_from(&names);

        // Deterministic shuffle driven by the seed
        let mut shuffled = names.clone();
        let mut state = seed;
        for i in (1..shuffled.len()).rev() {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            shuffled.swap(i, (state % (i as u64 + 1)) as usize);
        }

        prop_assert_eq!(compare(&schema, &shuffled), Comparison::NoConflict);
    }

    #[test]
    fn compare_flags_any_extra_column(names in column_names(), extra in "[A-Z]{3,6}") {
        let schema = schema_from(&names);
        let mut incoming = names.clone();
        incoming.push(extra);

        prop_assert_eq!(compare(&schema, &incoming), Comparison::Conflict);
    }

    #[test]
    fn compare_flags_any_missing_column(names in column_names()) {
        prop_assume!(names.len() > 1);
        let schema = schema_from(&names);
        let incoming = names[1..].to_vec();

        prop_assert_eq!(compare(&schema, &incoming), Comparison::Conflict);
    }

    #[test]
    fn integers_always_infer_integer(values in proptest::collection::vec(any::<i64>(), 1..20)) {
        let rendered: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        let inferred = TypeInferencer::new().infer(rendered.iter().map(|s| s.as_str()));

        prop_assert_eq!(inferred, StorageType::Integer);
    }

    #[test]
    fn inference_never_panics(values in proptest::collection::vec(".{0,20}", 0..20)) {
        let _ = TypeInferencer::new().infer(values.iter().map(|s| s.as_str()));
    }
}
