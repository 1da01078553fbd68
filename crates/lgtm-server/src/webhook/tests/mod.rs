//! Webhook handler tests


use std::collections::BTreeMap;

use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    http::StatusCode,
    test,
    web::Data,
};
use lgtm_cache_interface::MockCacheService;
use lgtm_config::{Config, RepositoryDefaultsConfig};
use lgtm_core::{
    use_cases::{
        comments::{HandleCommentHookInterface, MockHandleCommentHookInterface},
        pulls::{HandlePullRequestHookInterface, MockHandlePullRequestHookInterface},
        push::{HandlePushHookInterface, MockHandlePushHookInterface, PushReport},
        releases::{HandleStatusHookInterface, MockHandleStatusHookInterface, ReleaseReport},
        status::ApprovalReport,
    },
    CoreModule,
};
use lgtm_database_memory::MemoryDb;
use lgtm_ghapi_interface::MockApiService;
use lgtm_models::{Person, RepoConfig};
use pretty_assertions::assert_eq;

use crate::server::{build_actix_app, AppContext};

fn build_context(core_module: CoreModule) -> AppContext {
    AppContext::new_with_adapters(
        Config::from_env_no_version(),
        core_module,
        Box::new(MemoryDb::new()),
        Box::new(MockApiService::new()),
        Box::new(MockCacheService::new()),
    )
}

fn approval_report() -> ApprovalReport {
    ApprovalReport {
        approvers: BTreeMap::new(),
        settings: RepoConfig::from_defaults(&RepositoryDefaultsConfig::default()),
        approved: true,
        approved_by: vec![Person::from_login("alice"), Person::from_login("bob")],
    }
}

async fn send_event(
    core_module: CoreModule,
    event_type: Option<&str>,
    payload: &'static str,
) -> ServiceResponse<impl MessageBody> {
    let app = test::init_service(build_actix_app(Data::new(build_context(core_module)))).await;

    let mut req = test::TestRequest::post()
        .uri("/webhook")
        .insert_header(("Content-Type", "application/json"))
        .set_payload(payload);
    if let Some(event_type) = event_type {
        req = req.insert_header(("X-GitHub-Event", event_type));
    }

    app.call(req.to_request()).await.unwrap()
}

async fn assert_pong(core_module: CoreModule, event_type: Option<&str>, payload: &'static str) {
    let resp = send_event(core_module, event_type, payload).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    assert_eq!(body.to_vec(), b"pong");
}

#[actix_web::test]
async fn unknown_events_get_pong() {
    assert_pong(CoreModule::builder().build(), Some("ping"), "{}").await;
    assert_pong(CoreModule::builder().build(), None, "{}").await;
}

#[actix_web::test]
async fn unclassified_events_get_pong() {
    // Any use case call would fail on the unset mocks.
    assert_pong(
        CoreModule::builder().build(),
        Some("pull_request"),
        fixtures::PULL_REQUEST_LABELED_DATA,
    )
    .await;
    assert_pong(
        CoreModule::builder().build(),
        Some("issue_comment"),
        fixtures::ISSUE_COMMENT_ON_ISSUE_DATA,
    )
    .await;
    assert_pong(
        CoreModule::builder().build(),
        Some("status"),
        fixtures::STATUS_PENDING_DATA,
    )
    .await;
}

#[actix_web::test]
async fn invalid_payload() {
    let resp = send_event(
        CoreModule::builder().build(),
        Some("status"),
        r#"{"sha": 12}"#,
    )
    .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn issue_comment() {
    let mut handle_comment_hook = MockHandleCommentHookInterface::new();
    handle_comment_hook
        .expect_run()
        .once()
        .withf(|_, hook| {
            hook.repo.slug == "owner/name"
                && hook.issue.number == 1
                && hook.issue.author == "carol"
                && hook.comment.author == "alice"
                && hook.comment.body == "LGTM"
        })
        .return_once(|_, _| Ok(approval_report()));
    let core_module = CoreModule::builder()
        .with_component_override::<dyn HandleCommentHookInterface>(Box::new(handle_comment_hook))
        .build();

    let resp = send_event(
        core_module,
        Some("issue_comment"),
        fixtures::ISSUE_COMMENT_CREATED_DATA,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["approved"], true);
    assert_eq!(body["approved_by"][0]["login"], "alice");
    assert_eq!(body["settings"]["team"], "MAINTAINERS");
}

#[actix_web::test]
async fn issue_comment_on_unknown_repository() {
    let resp = send_event(
        CoreModule::builder().build(),
        Some("issue_comment"),
        fixtures::ISSUE_COMMENT_CREATED_DATA,
    )
    .await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn pull_request_opened() {
    let mut handle_pull_request_hook = MockHandlePullRequestHookInterface::new();
    handle_pull_request_hook
        .expect_run()
        .once()
        .withf(|_, hook| hook.number == 1 && hook.author == "carol")
        .return_once(|_, _| Ok(approval_report()));
    let core_module = CoreModule::builder()
        .with_component_override::<dyn HandlePullRequestHookInterface>(Box::new(
            handle_pull_request_hook,
        ))
        .build();

    let resp = send_event(
        core_module,
        Some("pull_request"),
        fixtures::PULL_REQUEST_OPENED_DATA,
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn push() {
    let mut handle_push_hook = MockHandlePushHookInterface::new();
    handle_push_hook
        .expect_run()
        .once()
        .withf(|_, hook| hook.sha == "abcdef")
        .return_once(|_, _| Ok(PushReport::default()));
    let core_module = CoreModule::builder()
        .with_component_override::<dyn HandlePushHookInterface>(Box::new(handle_push_hook))
        .build();

    let resp = send_event(core_module, Some("push"), fixtures::PUSH_DATA).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    assert_eq!(body.to_vec(), b"{}");
}

#[actix_web::test]
async fn status_success() {
    let mut handle_status_hook = MockHandleStatusHookInterface::new();
    handle_status_hook
        .expect_run()
        .once()
        .withf(|_, hook| hook.repo.slug == "owner/name" && hook.sha == "abcdef")
        .return_once(|_, _| Ok(ReleaseReport::default()));
    let core_module = CoreModule::builder()
        .with_component_override::<dyn HandleStatusHookInterface>(Box::new(handle_status_hook))
        .build();

    let resp = send_event(core_module, Some("status"), fixtures::STATUS_SUCCESS_DATA).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body, serde_json::json!({"merged": {}, "failures": []}));
}
