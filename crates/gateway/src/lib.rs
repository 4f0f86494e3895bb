//! HTTP API gateway for Driver's Friend.
//!
//! Endpoints:
//!
//! - `POST /api/chat`: Resolve one chat turn
//! - `POST /api/search`: Keyword search over the knowledge store
//! - `GET  /api/categories`: Categories available in a language
//! - `GET  /api/regulations/{category}`: All regulations of one category
//! - `GET  /api/suggestions/popular`: Frequently asked questions
//! - `GET  /api/history/{user_id}`: Recent conversation entries
//! - `GET  /health`: Liveness
//!
//! Built on Axum. Every handler is a thin adapter over [`ResolutionPipeline`].

use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    extract::{Path, Query, State},
    http::{Method, StatusCode, header},
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use driversfriend_core::language::Language;
use driversfriend_core::message::ConversationMessage;
use driversfriend_core::regulation::Regulation;
use driversfriend_core::resolution::{ChatRequest, ResolutionResult, SearchOutcome};
use driversfriend_resolver::ResolutionPipeline;
use driversfriend_resolver::composer::{self, DEFAULT_POPULAR_LIMIT};

const DEFAULT_SEARCH_LIMIT: usize = 10;
const DEFAULT_HISTORY_LIMIT: usize = 10;
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Shared state for all routes.
pub struct GatewayState {
    pub pipeline: Arc<ResolutionPipeline>,
}

pub type SharedState = Arc<GatewayState>;

/// Build the Axum router with all gateway routes.
pub fn build_router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/chat", post(chat_handler))
        .route("/api/search", post(search_handler))
        .route("/api/categories", get(categories_handler))
        .route("/api/regulations/{category}", get(regulations_handler))
        .route("/api/suggestions/popular", get(popular_handler))
        .route("/api/history/{user_id}", get(history_handler))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the gateway HTTP server.
pub async fn start(config: driversfriend_config::AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let pipeline = driversfriend_resolver::build_from_config(&config).await?;

    let state = Arc::new(GatewayState {
        pipeline: Arc::new(pipeline),
    });
    let app = build_router(state);

    info!(addr = %addr, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Wire types ---

fn default_language() -> String {
    "en-US".into()
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Deserialize)]
struct SearchRequest {
    query: String,
    #[serde(default = "default_language")]
    language: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    limit: Option<usize>,
}

#[derive(Deserialize)]
struct LanguageQuery {
    #[serde(default = "default_language")]
    language: String,
}

#[derive(Deserialize)]
struct PopularQuery {
    #[serde(default = "default_language")]
    language: String,
    #[serde(default)]
    limit: Option<usize>,
}

#[derive(Deserialize)]
struct HistoryQuery {
    #[serde(default)]
    limit: Option<usize>,
}

#[derive(Serialize)]
struct CategoriesResponse {
    language: String,
    categories: Vec<String>,
}

#[derive(Serialize)]
struct RegulationsResponse {
    category: String,
    language: String,
    regulations: Vec<Regulation>,
}

#[derive(Serialize)]
struct SuggestionsResponse {
    suggestions: Vec<String>,
}

#[derive(Serialize)]
struct HistoryResponse {
    user_id: String,
    messages: Vec<ConversationMessage>,
}

// --- Handlers ---

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ResolutionResult>, ApiError> {
    info!(
        message_len = payload.message.len(),
        language = %payload.language,
        "Chat request"
    );
    state
        .pipeline
        .handle(&payload)
        .await
        .map(Json)
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))
}

async fn search_handler(
    State(state): State<SharedState>,
    Json(payload): Json<SearchRequest>,
) -> Result<Json<SearchOutcome>, ApiError> {
    if payload.query.trim().is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "Query must not be empty"));
    }
    let limit = payload.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
    state
        .pipeline
        .search(&payload.query, &payload.language, payload.category.as_deref(), limit)
        .await
        .map(Json)
        .map_err(|e| {
            warn!(error = %e, "Search failed");
            api_error(StatusCode::SERVICE_UNAVAILABLE, e.to_string())
        })
}

async fn categories_handler(
    State(state): State<SharedState>,
    Query(query): Query<LanguageQuery>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let categories = state
        .pipeline
        .store()
        .list_categories(&query.language)
        .await
        .map_err(|e| {
            warn!(error = %e, "Listing categories failed");
            api_error(StatusCode::SERVICE_UNAVAILABLE, e.to_string())
        })?;
    Ok(Json(CategoriesResponse {
        language: query.language,
        categories,
    }))
}

async fn regulations_handler(
    State(state): State<SharedState>,
    Path(category): Path<String>,
    Query(query): Query<LanguageQuery>,
) -> Result<Json<RegulationsResponse>, ApiError> {
    let regulations = state
        .pipeline
        .store()
        .by_category_and_language(&category, &query.language)
        .await
        .map_err(|e| {
            warn!(category = %category, error = %e, "Category lookup failed");
            api_error(StatusCode::SERVICE_UNAVAILABLE, e.to_string())
        })?;
    if regulations.is_empty() {
        return Err(api_error(
            StatusCode::NOT_FOUND,
            format!("No regulations found for category '{category}'"),
        ));
    }
    Ok(Json(RegulationsResponse {
        category,
        language: query.language,
        regulations,
    }))
}

async fn popular_handler(Query(query): Query<PopularQuery>) -> Json<SuggestionsResponse> {
    let language = Language::from_tag(&query.language);
    let limit = query.limit.unwrap_or(DEFAULT_POPULAR_LIMIT);
    Json(SuggestionsResponse {
        suggestions: composer::popular_questions(language, limit),
    })
}

async fn history_handler(
    State(state): State<SharedState>,
    Path(user_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    let messages = match state.pipeline.memory() {
        Some(memory) => memory.recent(&user_id, limit).await.map_err(|e| {
            warn!(user = %user_id, error = %e, "History lookup failed");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?,
        None => Vec::new(),
    };
    Ok(Json(HistoryResponse { user_id, messages }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use driversfriend_memory::{ConversationMemory, InMemoryConversationStore};
    use driversfriend_resolver::StaticKnowledgeTable;
    use driversfriend_store::{InMemoryStore, UnavailableStore};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn regulation(category: &str, language: &str, keywords: &[&str], content: &str) -> Regulation {
        Regulation {
            category: category.into(),
            country: "germany".into(),
            content: content.into(),
            languages: vec![language.into()],
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            source: "StVO".into(),
            fine_amount: None,
            last_updated: chrono::Utc::now(),
        }
    }

    fn test_state() -> SharedState {
        let store = InMemoryStore::with_regulations(vec![
            regulation(
                "speed_limit",
                "en-US",
                &["speed", "limit"],
                "In built-up areas the limit is 50 km/h.",
            ),
            regulation(
                "speed_limit",
                "de",
                &["geschwindigkeit"],
                "Innerorts gilt 50 km/h.",
            ),
            regulation("parking", "en-US", &["parking"], "Park on the right."),
        ]);
        let pipeline = ResolutionPipeline::new(Arc::new(store), StaticKnowledgeTable::builtin())
            .with_memory(ConversationMemory::new(Arc::new(InMemoryConversationStore::new())));
        Arc::new(GatewayState {
            pipeline: Arc::new(pipeline),
        })
    }

    fn offline_state() -> SharedState {
        let pipeline = ResolutionPipeline::new(
            Arc::new(UnavailableStore::default()),
            StaticKnowledgeTable::builtin(),
        );
        Arc::new(GatewayState {
            pipeline: Arc::new(pipeline),
        })
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn health_endpoint() {
        let app = build_router(test_state());
        let response = app.oneshot(get_req("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert!(json["version"].is_string());
    }

    #[tokio::test]
    async fn chat_search_tier_response_shape() {
        let app = build_router(test_state());
        let req = post_json(
            "/api/chat",
            serde_json::json!({"message": "What is the speed limit?", "language": "en-US"}),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["intent"], "search");
        assert!((json["confidence"].as_f64().unwrap() - 0.9).abs() < 1e-6);
        assert_eq!(json["search_results"].as_array().unwrap().len(), 1);
        assert!(json["suggestions"].is_array());
        assert!(json.get("source").is_none());
    }

    #[tokio::test]
    async fn chat_offline_answer_when_store_down() {
        let app = build_router(offline_state());
        let req = post_json(
            "/api/chat",
            serde_json::json!({"message": "Wo darf ich parken?", "language": "de"}),
        );
        let json = body_json(app.oneshot(req).await.unwrap()).await;
        assert!(
            json["response"]
                .as_str()
                .unwrap()
                .starts_with("[Offline-Wissensdatenbank] Parkvorschriften")
        );
        assert_eq!(json["intent"], "parking_regulations");
    }

    #[tokio::test]
    async fn chat_rejects_empty_message() {
        let app = build_router(test_state());
        let req = post_json("/api/chat", serde_json::json!({"message": "   "}));
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("empty"));
    }

    #[tokio::test]
    async fn search_endpoint_filters_category() {
        let app = build_router(test_state());
        let req = post_json(
            "/api/search",
            serde_json::json!({"query": "speed parking", "category": "parking"}),
        );
        let json = body_json(app.oneshot(req).await.unwrap()).await;
        assert_eq!(json["total_results"], 1);
        assert_eq!(json["results"][0]["category"], "parking");
        assert_eq!(json["matched_keywords"], serde_json::json!(["speed", "parking"]));
    }

    #[tokio::test]
    async fn search_endpoint_unavailable_store() {
        let app = build_router(offline_state());
        let req = post_json("/api/search", serde_json::json!({"query": "speed"}));
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn categories_by_language() {
        let app = build_router(test_state());
        let json = body_json(app.oneshot(get_req("/api/categories?language=en-US")).await.unwrap()).await;
        assert_eq!(json["categories"], serde_json::json!(["parking", "speed_limit"]));

        let app = build_router(test_state());
        let json = body_json(app.oneshot(get_req("/api/categories?language=de")).await.unwrap()).await;
        assert_eq!(json["categories"], serde_json::json!(["speed_limit"]));
    }

    #[tokio::test]
    async fn regulations_by_category_or_404() {
        let app = build_router(test_state());
        let response = app
            .oneshot(get_req("/api/regulations/speed_limit?language=de"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["regulations"][0]["content"], "Innerorts gilt 50 km/h.");

        let app = build_router(test_state());
        let response = app.oneshot(get_req("/api/regulations/tolls")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn popular_suggestions_default_and_limit() {
        let app = build_router(test_state());
        let json = body_json(app.oneshot(get_req("/api/suggestions/popular")).await.unwrap()).await;
        assert_eq!(json["suggestions"].as_array().unwrap().len(), 5);

        let app = build_router(test_state());
        let json = body_json(
            app.oneshot(get_req("/api/suggestions/popular?language=de&limit=2"))
                .await
                .unwrap(),
        )
        .await;
        let suggestions = json["suggestions"].as_array().unwrap();
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[1], "Muss ich meinen Führerschein mitführen?");
    }

    #[tokio::test]
    async fn history_reflects_chat_turns() {
        let state = test_state();
        let req = post_json(
            "/api/chat",
            serde_json::json!({"message": "hello", "language": "en-US", "user_id": "u7"}),
        );
        build_router(state.clone()).oneshot(req).await.unwrap();

        let json = body_json(
            build_router(state.clone())
                .oneshot(get_req("/api/history/u7?limit=1"))
                .await
                .unwrap(),
        )
        .await;
        let messages = json["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0]["sender"], "assistant");

        let json = body_json(build_router(state).oneshot(get_req("/api/history/u7")).await.unwrap()).await;
        assert_eq!(json["messages"].as_array().unwrap().len(), 2);
    }
}
