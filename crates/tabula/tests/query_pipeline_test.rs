//! End-to-end tests for the natural-language query pipeline:
//! schema snapshot -> translator -> response parser -> executor.

use tabula::{
    IngestionEngine, MockClient, ParseStatus, Parser, QueryExecutor, QueryOutcome, ScriptedPolicy,
    Store, Translator,
};

use std::io::Write;
use tempfile::NamedTempFile;

fn seeded_store() -> Store {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(b"id,name,age\n1,Alice,30\n2,Bob,25\n3,Carol,35\n")
        .expect("Failed to write to temp file");

    let store = Store::open_in_memory().unwrap();
    let (table, _) = Parser::new().parse_file(file.path()).unwrap();
    IngestionEngine::new(&store)
        .ingest(&table, "people", &ScriptedPolicy::skip())
        .unwrap();
    store
}

#[test]
fn test_structured_reply_round_trip() {
    let store = seeded_store();
    let client = MockClient::replying(
        "SQL Query\nSELECT name FROM people WHERE age > 28 ORDER BY name;\n\n\
         Explanation\nNames of people older than 28.",
    );

    let tables = store.snapshot().unwrap();
    let raw = Translator::new(&client)
        .translate(&tables, "who is older than 28?")
        .expect("translation failed");

    let parsed = tabula::parse(&raw);
    assert_eq!(parsed.status, ParseStatus::Structured);
    assert_eq!(parsed.explanation, "Names of people older than 28.");

    match QueryExecutor::new(&store).execute(&parsed.sql) {
        QueryOutcome::Rows(set) => {
            assert_eq!(set.columns, vec!["name"]);
            assert_eq!(set.rows.len(), 2);
            assert_eq!(set.rows[0].values, vec!["Alice"]);
            assert_eq!(set.rows[1].values, vec!["Carol"]);
            assert_eq!(set.rows[1].position, 2);
        }
        QueryOutcome::Failed(detail) => panic!("unexpected failure: {}", detail.message),
    }
}

#[test]
fn test_instruction_carries_schema_snapshot() {
    let store = seeded_store();
    let client = MockClient::replying("SELECT 1;");

    let tables = store.snapshot().unwrap();
    Translator::new(&client).translate(&tables, "anything").unwrap();

    let exchanges = client.exchanges();
    assert!(exchanges[0].0.contains("- people (id INTEGER, name TEXT, age INTEGER)"));
    assert!(exchanges[0].0.contains("SQLite"));
}

#[test]
fn test_fenced_reply_survives_via_fallback() {
    let store = seeded_store();
    let parsed = tabula::parse("```sql\nSELECT COUNT(*) FROM people;\n```");

    assert_eq!(parsed.status, ParseStatus::FallbackWholeText);
    match QueryExecutor::new(&store).execute(&parsed.sql) {
        QueryOutcome::Rows(set) => assert_eq!(set.rows[0].values, vec!["3"]),
        QueryOutcome::Failed(detail) => panic!("unexpected failure: {}", detail.message),
    }
}

#[test]
fn test_unreachable_model_degrades_to_none() {
    let store = seeded_store();
    let client = MockClient::failing();

    let tables = store.snapshot().unwrap();
    assert!(Translator::new(&client).translate(&tables, "anything").is_none());

    // The pipeline being down never poisons direct execution
    match QueryExecutor::new(&store).execute("SELECT COUNT(*) FROM people") {
        QueryOutcome::Rows(set) => assert_eq!(set.rows[0].values, vec!["3"]),
        QueryOutcome::Failed(detail) => panic!("unexpected failure: {}", detail.message),
    }
}

#[test]
fn test_model_sql_failure_is_reported_not_raised() {
    let store = seeded_store();
    let client = MockClient::replying("SQL Query\nSELECT nope FROM nowhere;\nExplanation\nBad.");

    let tables = store.snapshot().unwrap();
    let raw = Translator::new(&client).translate(&tables, "broken").unwrap();
    let parsed = tabula::parse(&raw);

    match QueryExecutor::new(&store).execute(&parsed.sql) {
        QueryOutcome::Failed(detail) => assert!(detail.message.contains("nowhere")),
        QueryOutcome::Rows(_) => panic!("expected failure"),
    }

    // Loop stays responsive: a following statement works
    match QueryExecutor::new(&store).execute("SELECT 1") {
        QueryOutcome::Rows(set) => assert_eq!(set.rows[0].values, vec!["1"]),
        QueryOutcome::Failed(detail) => panic!("unexpected failure: {}", detail.message),
    }
}

#[test]
fn test_empty_schema_snapshot_renders_placeholder() {
    let store = Store::open_in_memory().unwrap();
    let client = MockClient::replying("SELECT 1;");

    let tables = store.snapshot().unwrap();
    Translator::new(&client).translate(&tables, "anything").unwrap();

    assert!(client.exchanges()[0].0.contains("No tables available."));
}
