//! Integration tests for the JSON command protocol.

use slope_viewer_lib::command::{execute_json, execute_json_batch};
use slope_viewer_lib::fixtures::*;
use slope_viewer_lib::harness::TestHarness;

#[test]
fn test_batch_load_select_inspect() {
    let mut h = TestHarness::new();
    let mesh = description_json(&quad_with_slopes());
    let batch = format!(
        r#"[
            {{"command": "load_mesh_json", "json": {json}}},
            {{"command": "set_shading_mode", "mode": "face_selection"}},
            {{"command": "pick", "origin": [0.75, 0.25, 5.0], "direction": [0.0, 0.0, -1.0]}},
            {{"command": "toggle_face", "triangle": 1}},
            {{"command": "toggle_face", "triangle": 7}},
            {{"command": "inspect"}}
        ]"#,
        json = serde_json::to_string(&mesh).unwrap()
    );

    let responses = execute_json_batch(&mut h, &batch).unwrap();
    assert_eq!(responses.len(), 6);
    assert!(responses.iter().all(|r| r.success));

    let loaded = responses[0].data.as_ref().unwrap();
    assert_eq!(loaded["vertex_count"], 4);
    assert_eq!(loaded["triangle_count"], 2);

    assert_eq!(responses[1].data.as_ref().unwrap()["interaction_enabled"], true);
    assert_eq!(responses[2].data.as_ref().unwrap()["triangle"], 0);
    assert_eq!(responses[3].data.as_ref().unwrap()["changed"], true);
    assert_eq!(responses[4].data.as_ref().unwrap()["changed"], false);

    let inspect = responses[5].data.as_ref().unwrap();
    assert_eq!(inspect["loaded"], true);
    assert_eq!(inspect["mode"], "face_selection");
    assert_eq!(inspect["selected"], serde_json::json!([0, 1]));
    // pick and one effective toggle; the out-of-range toggle does not count
    assert_eq!(inspect["selection_version"], 2);
    // source quad lies in XZ, so after the swap it stands in the renderer XY plane
    assert_eq!(inspect["bounds"]["max"], serde_json::json!([1.0, 1.0, 0.0]));
}

#[test]
fn test_pick_ignored_outside_face_selection() {
    let mut h = TestHarness::new();
    h.load(&ground_triangle());
    let resp = execute_json(
        &mut h,
        r#"{"command": "pick", "origin": [0.2, 5.0, 0.2], "direction": [0.0, -1.0, 0.0]}"#,
    )
    .unwrap();
    let data = resp.data.unwrap();
    assert!(data["triangle"].is_null());
    assert_eq!(data["selected"], serde_json::json!([]));
}

#[test]
fn test_failed_load_reports_error_and_keeps_mesh() {
    let mut h = TestHarness::new();
    h.load(&quad_with_slopes());

    let resp = execute_json(
        &mut h,
        r#"{"command": "load_mesh", "mesh": {"Vertices": [[0,0,0],[1,0,0],[0,1,0]], "Faces": [[0,1,-2]]}}"#,
    )
    .unwrap();
    assert!(!resp.success);
    assert!(resp.error.unwrap().contains("vertex -2"));
    assert_eq!(h.vertex_count(), 4);
}

#[test]
fn test_clear_and_reset() {
    let mut h = TestHarness::new();
    h.load(&quad_with_slopes());
    h.toggle(0);

    let responses = execute_json_batch(
        &mut h,
        r#"[{"command": "clear_selection"}, {"command": "inspect"}, {"command": "reset"}, {"command": "inspect"}]"#,
    )
    .unwrap();
    assert_eq!(responses[1].data.as_ref().unwrap()["selected"], serde_json::json!([]));
    assert_eq!(responses[3].data.as_ref().unwrap()["loaded"], false);
    assert_eq!(responses[3].data.as_ref().unwrap()["vertex_count"], 0);
}

#[test]
fn test_batch_rejects_unknown_command() {
    let mut h = TestHarness::new();
    assert!(execute_json_batch(&mut h, r#"[{"command": "explode"}]"#).is_err());
}
