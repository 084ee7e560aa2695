use super::*;

#[test]
fn test_severity_wire_names() {
    let json = serde_json::to_value([Severity::Low, Severity::Medium, Severity::High]).unwrap();
    assert_eq!(json, serde_json::json!(["Low", "Medium", "High"]));
}

#[test]
fn test_voc_ratio_wire_form() {
    assert_eq!(
        serde_json::to_value(VocRatio::NoFeedback).unwrap(),
        serde_json::json!({"kind": "no_feedback"})
    );
}

#[test]
fn test_terminal_serializes_as_label() {
    assert_eq!(
        serde_json::to_value(Terminal::from("T2")).unwrap(),
        serde_json::json!("T2")
    );
    assert_eq!(
        serde_json::to_value(Terminal::from("Overall")).unwrap(),
        serde_json::json!("Overall")
    );
}

#[test]
fn test_heatmap_no_data_is_null() {
    let heatmap = QueueHeatmap {
        zones: vec!["Entry Gate 1".to_string()],
        time_windows: vec!["0600-0800".to_string(), "0800-1000".to_string()],
        values: vec![vec![Cell::Value(96.5), Cell::NoData]],
    };
    let json = serde_json::to_value(&heatmap).unwrap();
    assert_eq!(json["values"], serde_json::json!([[96.5, null]]));
}
