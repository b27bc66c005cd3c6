//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::{auth, security};
use crate::state::AppState;

/// Create the application router.
///
/// `/ask` sits behind the API key check; `/health` is always open.
pub fn create_router(state: Arc<AppState>) -> Router {
    let ask_routes = Router::new()
        .route("/ask", post(handlers::ask::post_ask))
        .route_layer(from_fn_with_state(
            Arc::clone(&state),
            auth::require_api_key,
        ));

    Router::new()
        .merge(ask_routes)
        .route("/health", get(handlers::health::get_health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer())
                .layer(security::csp_layer()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use askdoc_completion::{CompletionError, CompletionService};
    use askdoc_core::{MemorySessionStore, MockCompletion, MockDocuments, RecordOptions};
    use askdoc_notion::DocumentService;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::Services;

    struct Harness {
        router: Router,
        documents: Arc<MockDocuments>,
        completion: Arc<MockCompletion>,
    }

    fn harness(
        completion: MockCompletion,
        documents: MockDocuments,
        api_key: Option<&str>,
    ) -> Harness {
        let completion = Arc::new(completion);
        let documents = Arc::new(documents);
        Harness {
            router: router_over(
                Arc::clone(&completion) as Arc<dyn CompletionService>,
                Arc::clone(&documents) as Arc<dyn DocumentService>,
                api_key,
            ),
            documents,
            completion,
        }
    }

    fn router_over(
        completion: Arc<dyn CompletionService>,
        documents: Arc<dyn DocumentService>,
        api_key: Option<&str>,
    ) -> Router {
        let services = Services {
            completion,
            documents,
            sessions: Arc::new(MemorySessionStore::new()),
            record: RecordOptions::default(),
        };
        let state = AppState::new(services, api_key.map(str::to_owned), "9.9.9".to_owned());
        create_router(Arc::new(state))
    }

    /// Completion that sleeps and tracks how many calls overlap.
    #[derive(Default)]
    struct SlowCompletion {
        active: AtomicUsize,
        max_active: AtomicUsize,
    }

    impl CompletionService for SlowCompletion {
        fn complete(&self, _question: &str) -> Result<String, CompletionError> {
            let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_active.fetch_max(now, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(400));
            self.active.fetch_sub(1, Ordering::SeqCst);
            Ok("done".to_owned())
        }
    }

    fn ask_request(body: &Value, api_key: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/ask")
            .header("content-type", "application/json");
        if let Some(key) = api_key {
            builder = builder.header("x-api-key", key);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let h = harness(MockCompletion::answering("ok"), MockDocuments::new(), Some("k"));
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(h.router, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok", "version": "9.9.9"}));
    }

    #[tokio::test]
    async fn test_ask_records_exchange() {
        let h = harness(
            MockCompletion::answering("# Answer\nSee `docs`."),
            MockDocuments::new(),
            None,
        );

        let (status, body) = send(
            h.router,
            ask_request(&json!({"question": "How?", "session_id": "s1"}), None),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"answer": "# Answer\nSee `docs`.", "document_id": "page-1"})
        );
        assert_eq!(h.documents.titles(), vec!["How?"]);
        assert_eq!(h.documents.kinds(), vec!["callout", "heading_1", "paragraph"]);
        assert_eq!(h.completion.questions(), vec!["How?"]);
    }

    #[tokio::test]
    async fn test_ask_reuses_session_document() {
        let h = harness(MockCompletion::answering("ok"), MockDocuments::new(), None);

        let (_, first) = send(
            h.router.clone(),
            ask_request(&json!({"question": "one"}), None),
        )
        .await;
        let (_, second) = send(
            h.router.clone(),
            ask_request(&json!({"question": "two", "keepgoing": false}), None),
        )
        .await;
        let (_, third) = send(h.router, ask_request(&json!({"question": "three"}), None)).await;

        assert_eq!(first["document_id"], "page-1");
        assert_eq!(second["document_id"], "page-1");
        assert_eq!(third["document_id"], "page-2");
    }

    #[tokio::test]
    async fn test_ask_requires_api_key() {
        let h = harness(MockCompletion::answering("ok"), MockDocuments::new(), Some("secret"));

        let (status, body) = send(
            h.router.clone(),
            ask_request(&json!({"question": "q"}), None),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({"error": "Unauthorized"}));

        let (status, _) = send(
            h.router.clone(),
            ask_request(&json!({"question": "q"}), Some("wrong")),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(h.router, ask_request(&json!({"question": "q"}), Some("secret"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(h.completion.questions(), vec!["q"]);
    }

    #[tokio::test]
    async fn test_empty_question_is_bad_request() {
        let h = harness(MockCompletion::answering("ok"), MockDocuments::new(), None);

        let (status, body) = send(h.router, ask_request(&json!({"question": "  "}), None)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "question is empty"}));
        assert!(h.documents.titles().is_empty());
    }

    #[tokio::test]
    async fn test_missing_question_is_bad_request() {
        let h = harness(MockCompletion::answering("ok"), MockDocuments::new(), None);

        let (status, body) = send(h.router, ask_request(&json!({"session_id": "s"}), None)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("question"));
    }

    #[tokio::test]
    async fn test_completion_failure_is_bad_gateway() {
        let h = harness(MockCompletion::failing(503), MockDocuments::new(), None);

        let (status, body) = send(h.router, ask_request(&json!({"question": "q"}), None)).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["error"].as_str().unwrap().contains("503"));
    }

    #[tokio::test]
    async fn test_append_failure_still_answers() {
        let h = harness(
            MockCompletion::answering("fine"),
            MockDocuments::new().failing_appends(),
            None,
        );

        let (status, body) = send(h.router, ask_request(&json!({"question": "q"}), None)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["answer"], "fine");
    }

    #[tokio::test]
    async fn test_security_headers() {
        let h = harness(MockCompletion::answering("ok"), MockDocuments::new(), None);
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = h.router.oneshot(request).await.unwrap();

        assert_eq!(response.headers()["x-content-type-options"], "nosniff");
        assert_eq!(response.headers()["x-frame-options"], "DENY");
    }

    #[tokio::test]
    async fn test_dropped_request_keeps_questions_serialized() {
        let completion = Arc::new(SlowCompletion::default());
        let documents = Arc::new(MockDocuments::new());
        let router = router_over(
            Arc::clone(&completion) as Arc<dyn CompletionService>,
            Arc::clone(&documents) as Arc<dyn DocumentService>,
            None,
        );

        let first = tokio::spawn(
            router
                .clone()
                .oneshot(ask_request(&json!({"question": "one", "session_id": "s"}), None)),
        );
        tokio::time::sleep(Duration::from_millis(100)).await;
        first.abort();

        let (status, body) = send(
            router,
            ask_request(&json!({"question": "two", "session_id": "s"}), None),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["answer"], "done");
        assert_eq!(completion.max_active.load(Ordering::SeqCst), 1);
        assert_eq!(
            documents.kinds(),
            vec!["callout", "paragraph", "callout", "paragraph"]
        );
    }
}
