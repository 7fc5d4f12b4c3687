use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use insanity_meter::clients::{MessageRequest, MessageResponse, ModelClient, ModelError};
use insanity_meter::compare::CompareService;
use insanity_meter::config::ModelSettings;
use insanity_meter::http::{HttpState, router};
use serde_json::Value;
use tower::ServiceExt;

const Y2K_REPLY: &str = r#"Here is the comparison you asked for:
[
  {"event": "Y2K bug panic", "description": "Fear that computers would fail at midnight on 1 January 2000.", "insanityRating": 4},
  {"event": "Tulip mania", "description": "Dutch tulip bulbs traded for the price of houses.", "insanityRating": 6},
  {"event": "The Great Emu War", "description": "Australia's army lost a campaign against emus.", "insanityRating": 7},
  {"event": "Dancing plague of 1518", "description": "Hundreds in Strasbourg danced for days without rest.", "insanityRating": 8}
]
Let me know if you want more."#;

struct FakeModel {
    reply: Mutex<Option<Result<MessageResponse, ModelError>>>,
    prompts: Mutex<Vec<String>>,
}

impl FakeModel {
    fn replying(reply: Result<MessageResponse, ModelError>) -> Arc<Self> {
        Arc::new(Self {
            reply: Mutex::new(Some(reply)),
            prompts: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl ModelClient for FakeModel {
    async fn create_message(
        &self,
        request: &MessageRequest,
    ) -> Result<MessageResponse, ModelError> {
        self.prompts
            .lock()
            .unwrap()
            .push(request.messages[0].content.clone());
        self.reply
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(ModelError::Http("called twice".into())))
    }
}

fn app(model: Arc<FakeModel>) -> axum::Router {
    let service = CompareService::new(model, ModelSettings::default());
    router(HttpState::new(service))
}

async fn post_compare(app: axum::Router, body: &str) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri("/compare")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn y2k_query_returns_four_events_in_model_order() {
    let model = FakeModel::replying(Ok(MessageResponse::from_text(Y2K_REPLY)));
    let (status, body) = post_compare(app(model.clone()), r#"{"query":"Y2K bug panic"}"#).await;

    assert_eq!(status, StatusCode::OK);
    let events = body["events"].as_array().unwrap();
    assert_eq!(events.len(), 4);
    assert_eq!(events[0]["event"], "Y2K bug panic");
    assert_eq!(events[0]["insanityRating"], 4);
    assert_eq!(events[3]["event"], "Dancing plague of 1518");

    let prompts = model.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("\"Y2K bug panic\""));
}

#[tokio::test]
async fn body_without_content_type_is_still_decoded() {
    let model = FakeModel::replying(Ok(MessageResponse::from_text(Y2K_REPLY)));
    let (status, body) = send(
        app(model.clone()),
        Request::builder()
            .method("POST")
            .uri("/compare")
            .body(Body::from(r#"{"query":"Y2K bug panic"}"#))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["events"].as_array().unwrap().len(), 4);
    assert_eq!(model.prompts.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn form_content_type_with_json_body_is_decoded() {
    let model = FakeModel::replying(Ok(MessageResponse::from_text(Y2K_REPLY)));
    let (status, body) = send(
        app(model),
        Request::builder()
            .method("POST")
            .uri("/compare")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(r#"{"query":"Y2K bug panic"}"#))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["events"][0]["insanityRating"], 4);
}

#[tokio::test]
async fn elements_are_passed_through_unvalidated() {
    let reply = r#"[{"event":"Odd","insanityRating":"9","extra":true}]"#;
    let model = FakeModel::replying(Ok(MessageResponse::from_text(reply)));
    let (status, body) = post_compare(app(model), r#"{"query":"Odd"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["events"][0]["insanityRating"], "9");
    assert_eq!(body["events"][0]["extra"], true);
}

#[tokio::test]
async fn remote_failure_is_failed_to_process() {
    let model = FakeModel::replying(Err(ModelError::Api {
        status: 401,
        body: "invalid x-api-key".into(),
    }));
    let (status, body) = post_compare(app(model), r#"{"query":"Tulip mania"}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, serde_json::json!({"error": "Failed to process request"}));
}

#[tokio::test]
async fn reply_without_text_is_failed_to_process() {
    let model = FakeModel::replying(Ok(MessageResponse {
        id: Some("msg_1".into()),
        model: None,
        content: vec![],
        stop_reason: None,
    }));
    let (status, body) = post_compare(app(model), r#"{"query":"x"}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to process request");
}

#[tokio::test]
async fn prose_only_reply_is_failed_to_parse() {
    let model = FakeModel::replying(Ok(MessageResponse::from_text(
        "I cannot rate that event, sorry.",
    )));
    let (status, body) = post_compare(app(model), r#"{"query":"x"}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to parse response");
}

#[tokio::test]
async fn broken_array_is_failed_to_parse() {
    let model = FakeModel::replying(Ok(MessageResponse::from_text(
        r#"[{"event": "Tulip mania", "insanityRating": 6,}]"#,
    )));
    let (status, body) = post_compare(app(model), r#"{"query":"x"}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to parse response");
}

#[tokio::test]
async fn malformed_body_is_rejected_without_calling_the_model() {
    let model = FakeModel::replying(Ok(MessageResponse::from_text("[]")));
    let (status, body) = post_compare(app(model.clone()), r#"{"q": 1"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to process request");
    assert!(model.prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn empty_query_is_still_sent() {
    let model = FakeModel::replying(Ok(MessageResponse::from_text("[]")));
    let (status, body) = post_compare(app(model.clone()), r#"{"query":""}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["events"], serde_json::json!([]));
    assert_eq!(model.prompts.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn health_answers_ok() {
    let model = FakeModel::replying(Ok(MessageResponse::from_text("[]")));
    let response = app(model)
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"ok");
}
