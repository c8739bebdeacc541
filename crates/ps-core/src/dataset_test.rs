use super::*;

#[test]
fn test_split_file_names() {
    assert_eq!(Split::Train.file_name(), "train_spider_with_ep.json");
    assert_eq!(Split::Dev.file_name(), "dev_spider_with_ep.json");
}

#[test]
fn test_split_serde_lowercase() {
    let json = serde_json::to_string(&Split::Dev).unwrap();
    assert_eq!(json, "\"dev\"");
    let split: Split = serde_json::from_str("\"train\"").unwrap();
    assert_eq!(split, Split::Train);
}

#[test]
fn test_load_split_ignores_extra_fields() {
    let dir = tempfile::tempdir().unwrap();
    let json = r#"[
        {
            "db_id": "concert_singer",
            "query": "SELECT count(*) FROM singer",
            "query_toks": ["SELECT", "count", "(", "*", ")", "FROM", "singer"],
            "question": "How many singers do we have?",
            "ep": "<ShowPlanXML/>"
        }
    ]"#;
    std::fs::write(dir.path().join("dev_spider_with_ep.json"), json).unwrap();

    let records = load_split(dir.path(), Split::Dev).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].db_id, "concert_singer");
    assert_eq!(records[0].question, "How many singers do we have?");
    assert_eq!(records[0].ep, "<ShowPlanXML/>");
}

#[test]
fn test_load_missing_split() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_split(dir.path(), Split::Train);
    assert!(matches!(result, Err(CoreError::SplitNotFound { .. })));
}

#[test]
fn test_load_malformed_split() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("train_spider_with_ep.json"), "{\"db_id\": 1}").unwrap();
    let err = load_split(dir.path(), Split::Train).unwrap_err();
    assert!(matches!(err, CoreError::DatasetDecode { .. }));
    assert!(err.to_string().starts_with("[C005]"));
}
