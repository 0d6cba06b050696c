//! HTTP routes for the management API.
//!
//! | Method | Path                       | Operation |
//! |--------|----------------------------|-----------|
//! | GET    | `/`                        | liveness  |
//! | GET    | `/health`                  | health    |
//! | GET    | `/subscriptions`           | list      |
//! | POST   | `/subscriptions[/]`        | create (server-generated id) |
//! | POST   | `/subscriptions/:sub_id`   | upsert (client-chosen id)    |
//! | PUT    | `/subscriptions/:sub_id`   | upsert    |
//! | DELETE | `/subscriptions/:sub_id`   | delete    |

use crate::domain::config::ApiConfig;
use crate::domain::error::ApiError;
use crate::domain::subscription::{Subscription, SubscriptionList, SubscriptionRequest};
use crate::facade::{SubscriptionFacade, UpsertOutcome};
use crate::middleware::TracingLayer;
use crate::store::SubscriptionStore;
use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub facade: SubscriptionFacade,
    pub store: Arc<SubscriptionStore>,
}

impl AppState {
    pub fn new(store: Arc<SubscriptionStore>) -> Self {
        Self {
            facade: SubscriptionFacade::new(Arc::clone(&store)),
            store,
        }
    }
}

/// Build the management router, mounted under `config.base_path`.
pub fn build_router(state: AppState, config: &ApiConfig) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(TracingLayer::new())
        .layer(TimeoutLayer::new(config.request_timeout));

    let routes = Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route(
            "/subscriptions",
            get(list_subscriptions).post(create_subscription),
        )
        .route("/subscriptions/", post(create_subscription))
        .route(
            "/subscriptions/:sub_id",
            post(upsert_subscription)
                .put(upsert_subscription)
                .delete(delete_subscription),
        )
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(middleware)
        .with_state(state);

    if config.base_path.is_empty() {
        routes
    } else {
        Router::new().nest(&config.base_path, routes)
    }
}

async fn root() -> &'static str {
    "Hello World!"
}

async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "subscriptions": state.store.len(),
        "entities": state.store.entity_count(),
        "version": crate::VERSION,
    }))
}

async fn list_subscriptions(State(state): State<AppState>) -> Json<SubscriptionList> {
    Json(state.facade.list())
}

async fn create_subscription(
    State(state): State<AppState>,
    body: Result<Json<SubscriptionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Subscription>), ApiError> {
    let Json(request) = body?;
    let sub = state.facade.create(&request)?;
    Ok((StatusCode::CREATED, Json(sub)))
}

async fn upsert_subscription(
    State(state): State<AppState>,
    Path(sub_id): Path<String>,
    body: Result<Json<SubscriptionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Subscription>), ApiError> {
    let Json(request) = body?;
    Ok(match state.facade.upsert(&sub_id, &request)? {
        UpsertOutcome::Created(sub) => (StatusCode::CREATED, Json(sub)),
        UpsertOutcome::Updated(sub) => (StatusCode::OK, Json(sub)),
    })
}

async fn delete_subscription(
    State(state): State<AppState>,
    Path(sub_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.facade.delete(&sub_id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app_with(config: &ApiConfig) -> (Arc<SubscriptionStore>, Router) {
        let store = Arc::new(SubscriptionStore::new());
        let router = build_router(AppState::new(Arc::clone(&store)), config);
        (store, router)
    }

    fn app() -> (Arc<SubscriptionStore>, Router) {
        app_with(&ApiConfig::default())
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(v) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_create_with_empty_entity_is_rejected() {
        let (store, app) = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/subscriptions",
            Some(json!({"entityId": "", "callbackURI": "http://x"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "MISSING_FIELD");
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_create_generates_id() {
        let (store, app) = app();
        for path in ["/subscriptions", "/subscriptions/"] {
            let (status, body) = send(
                &app,
                Method::POST,
                path,
                Some(json!({"entityId": "ue-1", "callbackURI": "http://cb"})),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
            let sub_id = body["subId"].as_str().unwrap();
            assert!(store.get(sub_id).is_some());
            assert_eq!(body["entityId"], "ue-1");
            assert_eq!(body["callbackURI"], "http://cb");
        }
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_put_lifecycle() {
        let (_, app) = app();
        let req = json!({"entityId": "ue-1", "callbackURI": "http://cb"});

        let (status, body) = send(&app, Method::PUT, "/subscriptions/sub-1", Some(req)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["subId"], "sub-1");

        let (status, body) = send(&app, Method::GET, "/subscriptions", None).await;
        assert_eq!(status, StatusCode::OK);
        let ids: Vec<_> = body["subscriptions"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["subId"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["sub-1".to_string()]);

        let (status, body) = send(
            &app,
            Method::PUT,
            "/subscriptions/sub-1",
            Some(json!({"entityId": "ue-1", "callbackURI": "http://cb/v2"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["callbackURI"], "http://cb/v2");

        let (status, body) = send(&app, Method::DELETE, "/subscriptions/sub-1", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (status, body) = send(&app, Method::DELETE, "/subscriptions/sub-1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_post_with_path_id_upserts() {
        let (store, app) = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/subscriptions/sub-001",
            Some(json!({
                "ueId": "imsi-208930000000001",
                "notifyUri": "http://127.0.0.1:9099/rmm-notify"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["subId"], "sub-001");
        assert_eq!(
            store.find_by_entity("imsi-208930000000001")[0].callback_uri,
            "http://127.0.0.1:9099/rmm-notify"
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let (store, app) = app();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/subscriptions")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let config = ApiConfig {
            max_body_bytes: 32,
            ..ApiConfig::default()
        };
        let (store, app) = app_with(&config);
        let (status, _) = send(
            &app,
            Method::POST,
            "/subscriptions",
            Some(json!({
                "entityId": "ue-1",
                "callbackURI": format!("http://cb/{}", "x".repeat(64))
            })),
        )
        .await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_base_path_nesting() {
        let config = ApiConfig {
            base_path: "/namf-rmm/v1".into(),
            ..ApiConfig::default()
        };
        let (_, app) = app_with(&config);

        let (status, body) = send(&app, Method::GET, "/namf-rmm/v1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::String("Hello World!".into()));

        let (status, body) = send(&app, Method::GET, "/namf-rmm/v1/subscriptions", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"subscriptions": []}));

        let (status, _) = send(&app, Method::GET, "/subscriptions", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health_reports_counts() {
        let (store, app) = app();
        store.create("ue-1", "http://a");
        store.create("ue-1", "http://b");
        store.create("ue-2", "http://c");

        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["subscriptions"], 3);
        assert_eq!(body["entities"], 2);
    }
}
