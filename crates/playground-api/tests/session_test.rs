//! Integration tests for the Session bounded context.

mod common;

use axum::http::StatusCode;
use playground_api::config::ApiConfig;

#[tokio::test]
async fn test_editable_empty_session_resolves_default_story_after_next_pass() {
    let state = common::test_state();

    // POST /api/v1/sessions with no stories
    let (status, json) = common::post_json(
        common::build_test_app(state.clone()),
        "/api/v1/sessions",
        &serde_json::json!({ "project_name": "demo", "mode": "editable" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["outcome"], "bootstrap_requested");
    assert_eq!(
        json["events"][0]["event_type"],
        "session.default_story_requested"
    );
    let session_id = json["session_id"].as_str().unwrap().to_owned();

    // GET: the default story is in the set but not yet selected
    let (status, json) = common::get_json(
        common::build_test_app(state.clone()),
        &format!("/api/v1/sessions/{session_id}"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["story_ids"], serde_json::json!(["0"]));
    assert_eq!(json["active"]["state"], "unresolved");

    // POST tick: the next pass resolves it
    let (status, json) = common::post_empty(
        common::build_test_app(state.clone()),
        &format!("/api/v1/sessions/{session_id}/tick"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["outcome"], "settled");

    let (_, json) = common::get_json(
        common::build_test_app(state),
        &format!("/api/v1/sessions/{session_id}"),
    )
    .await;
    assert_eq!(json["active"]["state"], "resolved");
    assert_eq!(json["active"]["story_id"], "0");
    assert_eq!(json["bootstrap_in_progress"], false);
}

#[tokio::test]
async fn test_view_only_session_without_stories_is_rejected() {
    let state = common::test_state();

    let (status, json) = common::post_json(
        common::build_test_app(state.clone()),
        "/api/v1/sessions",
        &serde_json::json!({ "mode": "view_only", "build": "built" }),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "no_stories_in_view_only_mode");
    assert!(state.sessions.is_empty().unwrap());
}

#[tokio::test]
async fn test_removed_selection_falls_back_and_explicit_choice_sticks() {
    let state = common::test_state();
    let session_id = common::mount_session(
        &state,
        &serde_json::json!({
            "build": "built",
            "stories": [{ "id": "a", "title": "A" }, { "id": "b", "title": "B" }],
        }),
    )
    .await;
    let base = format!("/api/v1/sessions/{session_id}");

    // Remove the active story "a"
    let (status, _) =
        common::delete_json(common::build_test_app(state.clone()), &format!("{base}/stories/a"))
            .await;
    assert_eq!(status, StatusCode::OK);

    // Until the next pass the stale selection renders as loading
    let (_, json) =
        common::get_json(common::build_test_app(state.clone()), &format!("{base}/render")).await;
    assert_eq!(json["kind"], "loading");

    let (_, _) =
        common::post_empty(common::build_test_app(state.clone()), &format!("{base}/tick")).await;
    let (_, json) =
        common::get_json(common::build_test_app(state.clone()), &format!("{base}/render")).await;
    assert_eq!(json["kind"], "session");
    assert_eq!(json["active_story_id"], "b");

    // Restore "a", then choose "b" explicitly
    let (status, _) = common::post_json(
        common::build_test_app(state.clone()),
        &format!("{base}/stories"),
        &serde_json::json!({ "id": "a", "title": "A" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = common::post_json(
        common::build_test_app(state.clone()),
        &format!("{base}/select"),
        &serde_json::json!({ "story_id": "b" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, _) =
        common::post_empty(common::build_test_app(state.clone()), &format!("{base}/tick")).await;

    let (_, json) = common::get_json(common::build_test_app(state), &base).await;
    assert_eq!(json["story_ids"], serde_json::json!(["b", "a"]));
    assert_eq!(json["active"]["story_id"], "b");
}

#[tokio::test]
async fn test_build_completion_before_resolution_renders_loading() {
    let state = common::test_state();
    let session_id = common::mount_session(&state, &serde_json::json!({ "build": "unbuilt" })).await;
    let base = format!("/api/v1/sessions/{session_id}");

    let (_, json) =
        common::get_json(common::build_test_app(state.clone()), &format!("{base}/render")).await;
    assert_eq!(json["kind"], "not_built");
    assert_eq!(json["height"], "100%");

    let (status, json) = common::put_json(
        common::build_test_app(state.clone()),
        &format!("{base}/build"),
        &serde_json::json!({ "status": "built" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["events"][0]["event_type"],
        "session.build_status_changed"
    );

    let (_, json) =
        common::get_json(common::build_test_app(state.clone()), &format!("{base}/render")).await;
    assert_eq!(json["kind"], "loading");

    let (_, _) =
        common::post_empty(common::build_test_app(state.clone()), &format!("{base}/tick")).await;
    let (_, json) =
        common::get_json(common::build_test_app(state), &format!("{base}/render")).await;
    assert_eq!(json["kind"], "session");
    assert_eq!(json["active_story_id"], "0");
}

#[tokio::test]
async fn test_configured_base_height_and_request_height() {
    let state = common::test_state_with(ApiConfig {
        base_height: "640px".to_owned(),
        ..ApiConfig::default()
    });
    let default_height = common::mount_session(
        &state,
        &serde_json::json!({ "stories": [{ "id": "a", "title": "A" }] }),
    )
    .await;
    let explicit_height = common::mount_session(
        &state,
        &serde_json::json!({
            "height": "200px",
            "minimal": true,
            "stories": [{ "id": "a", "title": "A" }],
        }),
    )
    .await;

    let (_, json) = common::get_json(
        common::build_test_app(state.clone()),
        &format!("/api/v1/sessions/{default_height}/render"),
    )
    .await;
    assert_eq!(json["kind"], "not_built");
    assert_eq!(json["height"], "640px");

    let (_, _) = common::put_json(
        common::build_test_app(state.clone()),
        &format!("/api/v1/sessions/{explicit_height}/build"),
        &serde_json::json!({ "status": "built" }),
    )
    .await;
    let (_, json) = common::get_json(
        common::build_test_app(state),
        &format!("/api/v1/sessions/{explicit_height}/render"),
    )
    .await;
    assert_eq!(json["height"], "200px");
    assert_eq!(json["show_story_menu"], false);
}

#[tokio::test]
async fn test_lagged_membership_events_still_resolve() {
    let state = common::test_state_with(ApiConfig {
        event_buffer: 1,
        ..ApiConfig::default()
    });
    let session_id = common::mount_session(
        &state,
        &serde_json::json!({ "build": "built", "stories": [{ "id": "a", "title": "A" }] }),
    )
    .await;
    let base = format!("/api/v1/sessions/{session_id}");

    for id in ["b", "c", "d"] {
        let (status, _) = common::post_json(
            common::build_test_app(state.clone()),
            &format!("{base}/stories"),
            &serde_json::json!({ "id": id, "title": id }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
    let (status, _) =
        common::delete_json(common::build_test_app(state.clone()), &format!("{base}/stories/a"))
            .await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) =
        common::post_empty(common::build_test_app(state.clone()), &format!("{base}/tick")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["outcome"], "settled");

    let (_, json) = common::get_json(common::build_test_app(state), &base).await;
    assert_eq!(json["active"]["story_id"], "b");
}

#[tokio::test]
async fn test_tear_down_unmounts_stories_and_forgets_session() {
    let state = common::test_state();
    let session_id = common::mount_session(
        &state,
        &serde_json::json!({
            "stories": [
                { "id": "a", "title": "A" },
                { "id": "b", "title": "B" },
                { "id": "c", "title": "C" },
            ],
        }),
    )
    .await;
    let base = format!("/api/v1/sessions/{session_id}");

    let (status, json) = common::delete_json(common::build_test_app(state.clone()), &base).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["unmounted"], 3);

    let (status, json) = common::delete_json(common::build_test_app(state.clone()), &base).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "session_not_found");

    let (status, _) =
        common::post_empty(common::build_test_app(state), &format!("{base}/tick")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
