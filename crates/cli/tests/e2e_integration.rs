//! End-to-end integration tests for the Driver's Friend resolution pipeline.
//!
//! These tests wire real stores, real retrievers (over a canned fetcher),
//! real conversation memory and the gateway together and drive them from
//! the outside.

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use driversfriend_config::{AppConfig, RetrieverConfig};
use driversfriend_core::error::RetrievalError;
use driversfriend_core::resolution::ChatRequest;
use driversfriend_core::store::KnowledgeStore;
use driversfriend_gateway::{GatewayState, build_router};
use driversfriend_memory::{ConversationMemory, InMemoryConversationStore, SqliteConversationStore};
use driversfriend_resolver::{ResolutionPipeline, StaticKnowledgeTable};
use driversfriend_retriever::{DocumentFetcher, build_with_fetcher};
use driversfriend_store::{SqliteStore, UnavailableStore, load_seed_file};
use http_body_util::BodyExt;
use tower::ServiceExt;

// ── Canned document source ──────────────────────────────────────────────

const CITY_PAGE: &str = r#"
<html>
  <head><script>var speed = 1;</script></head>
  <body>
    <nav class="main-menu"><a href="/">Speed limits</a> <a href="/parking">Parking</a></nav>
    <main>
      <h1>City driving in Germany</h1>
      <p>Germany has many traffic rules. In built-up areas the speed limit is 50 km/h.
         Outside built-up areas it is 100 km/h.</p>
      <p>Trams always have priority at junctions without signs or lights.</p>
    </main>
    <footer><p>Copyright routetogermany.com, all rights reserved.</p></footer>
  </body>
</html>
"#;

/// Serves one page for every URL and records what was requested.
struct CannedFetcher {
    html: String,
    requested: Mutex<Vec<String>>,
}

impl CannedFetcher {
    fn new(html: &str) -> Arc<Self> {
        Arc::new(Self {
            html: html.to_string(),
            requested: Mutex::new(Vec::new()),
        })
    }

    fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl DocumentFetcher for CannedFetcher {
    async fn fetch(&self, url: &str) -> Result<String, RetrievalError> {
        self.requested.lock().unwrap().push(url.to_string());
        Ok(self.html.clone())
    }
}

struct DownFetcher;

#[async_trait::async_trait]
impl DocumentFetcher for DownFetcher {
    async fn fetch(&self, url: &str) -> Result<String, RetrievalError> {
        Err(RetrievalError::HttpStatus {
            url: url.to_string(),
            status: 503,
        })
    }
}

fn offline_pipeline() -> ResolutionPipeline {
    ResolutionPipeline::new(
        Arc::new(UnavailableStore::default()),
        StaticKnowledgeTable::builtin(),
    )
}

fn in_memory() -> ConversationMemory {
    ConversationMemory::new(Arc::new(InMemoryConversationStore::new()))
}

const SEED: &str = r#"[
  {
    "category": "alcohol_limit",
    "country": "germany",
    "content": "The blood alcohol limit for drivers is 0.5 per mille; novice drivers must stay at 0.0.",
    "languages": ["en-US"],
    "keywords": ["alcohol", "drink", "drunk"],
    "source": "StVG §24a",
    "fine_amount": 500.0
  },
  {
    "category": "speed_limit",
    "country": "germany",
    "content": "Inside built-up areas the speed limit is 50 km/h unless signed otherwise.",
    "languages": ["en-US"],
    "keywords": ["speed", "limit"],
    "source": "StVO §3"
  },
  {
    "category": "speed_limit",
    "country": "germany",
    "content": "Innerorts gilt eine Höchstgeschwindigkeit von 50 km/h.",
    "languages": ["de"],
    "keywords": ["geschwindigkeit", "tempo"],
    "source": "StVO §3"
  }
]"#;

async fn seeded_sqlite(dir: &tempfile::TempDir) -> Arc<SqliteStore> {
    let seed_path = dir.path().join("seed.json");
    std::fs::write(&seed_path, SEED).unwrap();
    let regulations = load_seed_file(&seed_path).await.unwrap();

    let db_path = dir.path().join("regulations.db");
    let store = SqliteStore::new(db_path.to_str().unwrap()).await.unwrap();
    assert_eq!(store.insert_many(regulations).await.unwrap(), 3);
    Arc::new(store)
}

// ── E2E: offline fallback ───────────────────────────────────────────────

#[tokio::test]
async fn e2e_offline_highway_question() {
    // Store down, no live sources: only the static table can answer.
    let memory = in_memory();
    let pipeline = offline_pipeline().with_memory(memory.clone());

    let result = pipeline
        .handle(&ChatRequest::new("What is the speed limit on highways?", "en-US").with_user("u1"))
        .await
        .expect("pipeline never fails on valid input");

    let expected = StaticKnowledgeTable::builtin()
        .lookup("What is the speed limit on highways?", "en-US")
        .unwrap();
    assert_eq!(
        result.response,
        format!("[Offline Knowledge Base] {}", expected.entry.response)
    );
    assert_eq!(result.intent_name(), "speed_limit");
    assert!((result.confidence() - 0.8).abs() < 1e-6);
    assert_eq!(result.suggestions.as_ref().unwrap().len(), 3);

    let history = memory.history("u1").await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].content, "What is the speed limit on highways?");
    assert_eq!(history[1].content, result.response);
}

#[tokio::test]
async fn e2e_offline_german_answer() {
    let result = offline_pipeline()
        .handle(&ChatRequest::new("Wie hoch ist die Promillegrenze für Alkohol?", "de-DE"))
        .await
        .unwrap();
    assert!(result.response.starts_with("[Offline-Wissensdatenbank] Alkoholgrenzwerte"));
    assert_eq!(result.intent_name(), "alcohol_limit");
}

#[tokio::test]
async fn e2e_unanswerable_question_is_not_found() {
    let result = offline_pipeline()
        .handle(&ChatRequest::new("xyzzy", "en-US"))
        .await
        .unwrap();
    assert_eq!(result.intent_name(), "unknown");
    assert!((result.confidence() - 0.3).abs() < 1e-6);
    assert!(result.response.contains("'xyzzy'"));
    assert!(result.suggestions.is_none());
}

// ── E2E: seeded store ───────────────────────────────────────────────────

#[tokio::test]
async fn e2e_seeded_sqlite_search_tier() {
    let dir = tempfile::tempdir().unwrap();
    let store = seeded_sqlite(&dir).await;
    let pipeline = ResolutionPipeline::new(store, StaticKnowledgeTable::builtin());

    let result = pipeline
        .handle(&ChatRequest::new("What is the alcohol limit for drivers?", "en-US"))
        .await
        .unwrap();

    assert_eq!(result.intent_name(), "search");
    let results = result.search_results.as_ref().unwrap();
    // "limit" also hits the speed record
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].category, "alcohol_limit");
    assert_eq!(results[0].fine_amount, Some(500.0));
    assert!(result.response.contains("1. The blood alcohol limit for drivers is 0.5 per mille"));
    assert!(result.response.contains("2. Inside built-up areas"));
}

#[tokio::test]
async fn e2e_seeded_sqlite_offline_tier_uses_store_first() {
    let dir = tempfile::tempdir().unwrap();
    let store = seeded_sqlite(&dir).await;
    let pipeline = ResolutionPipeline::new(store, StaticKnowledgeTable::builtin());

    // Conversational in form, so it goes straight to the offline tier
    let result = pipeline.handle(&ChatRequest::new("tempo", "de")).await.unwrap();
    assert_eq!(result.response, "Innerorts gilt eine Höchstgeschwindigkeit von 50 km/h.");
    assert_eq!(result.intent_name(), "speed_limit");
    assert_eq!(
        result.suggestions.unwrap()[0],
        "Wie hoch ist die Geschwindigkeitsbegrenzung auf Autobahnen?"
    );
}

// ── E2E: live retrieval ─────────────────────────────────────────────────

#[tokio::test]
async fn e2e_web_tier_extracts_direct_answer() {
    let fetcher = CannedFetcher::new(CITY_PAGE);
    let retrievers = build_with_fetcher(&RetrieverConfig::default(), fetcher.clone());
    let pipeline = offline_pipeline().with_retrievers(retrievers);

    let result = pipeline.handle(&ChatRequest::new("speed limit", "en-US")).await.unwrap();

    assert_eq!(result.intent_name(), "web_search");
    assert!((result.confidence() - 0.85).abs() < 1e-6);
    assert!(result.response.starts_with(
        "According to routetogermany.com: In built-up areas the speed limit is 50 km/h.\n\n"
    ));
    assert!(
        result
            .response
            .ends_with("\nSource: https://routetogermany.com/drivingingermany/city-driving")
    );
    assert!(!result.response.contains("Copyright"));
    assert_eq!(result.source.as_deref(), Some("routetogermany.com"));
    assert_eq!(
        fetcher.requested(),
        vec!["https://routetogermany.com/drivingingermany/city-driving"]
    );
}

#[tokio::test]
async fn e2e_irrelevant_page_falls_through_to_offline() {
    let fetcher = CannedFetcher::new(CITY_PAGE);
    let pipeline = offline_pipeline()
        .with_retrievers(build_with_fetcher(&RetrieverConfig::default(), fetcher));

    let result = pipeline.handle(&ChatRequest::new("bye", "en-US")).await.unwrap();
    assert_eq!(result.intent_name(), "farewell");
    assert!(result.source.is_none());
}

#[tokio::test]
async fn e2e_source_outage_falls_through_to_offline() {
    let pipeline = offline_pipeline()
        .with_retrievers(build_with_fetcher(&RetrieverConfig::default(), Arc::new(DownFetcher)));

    let result = pipeline.handle(&ChatRequest::new("Where can I park?", "en-US")).await.unwrap();
    assert_eq!(result.intent_name(), "parking_regulations");
    assert!(result.response.starts_with("[Offline Knowledge Base] "));
}

// ── E2E: conversation memory ────────────────────────────────────────────

#[tokio::test]
async fn e2e_farewell_mentions_topics_from_persistent_memory() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("memory.db");
    let db = db.to_str().unwrap();

    {
        let memory = ConversationMemory::new(Arc::new(SqliteConversationStore::new(db, 20).await.unwrap()));
        let pipeline = offline_pipeline().with_memory(memory);
        pipeline
            .handle(&ChatRequest::new("Can I drink a beer before driving?", "en-US").with_user("driver"))
            .await
            .unwrap();
        pipeline
            .handle(&ChatRequest::new("Where can I park?", "en-US").with_user("driver"))
            .await
            .unwrap();
    }

    // Reopen: the topics survive a restart
    let memory = ConversationMemory::new(Arc::new(SqliteConversationStore::new(db, 20).await.unwrap()));
    let pipeline = offline_pipeline().with_memory(memory.clone());
    let result = pipeline
        .handle(&ChatRequest::new("thanks", "en-US").with_user("driver"))
        .await
        .unwrap();

    assert_eq!(result.intent_name(), "farewell");
    assert!(result.response.ends_with(
        "I hope the information about alcohol limits, parking was helpful. 🚗"
    ));
    assert_eq!(memory.history("driver").await.unwrap().len(), 6);
}

#[tokio::test]
async fn e2e_memory_cap_holds_across_many_turns() {
    let memory = ConversationMemory::new(Arc::new(InMemoryConversationStore::with_capacity(20)));
    let pipeline = offline_pipeline().with_memory(memory.clone());

    for i in 0..15 {
        pipeline
            .handle(&ChatRequest::new(format!("speed limit {i}"), "en-US").with_user("busy"))
            .await
            .unwrap();
    }

    let history = memory.history("busy").await.unwrap();
    assert_eq!(history.len(), 20);
    // 30 appended, the oldest 10 evicted
    assert_eq!(history[0].content, "speed limit 5");
}

#[tokio::test]
async fn e2e_concurrent_users_are_isolated() {
    let memory = in_memory();
    let pipeline = Arc::new(offline_pipeline().with_memory(memory.clone()));

    let mut handles = Vec::new();
    for user in 0..8 {
        let pipeline = pipeline.clone();
        handles.push(tokio::spawn(async move {
            for _ in 0..3 {
                pipeline
                    .handle(&ChatRequest::new("hello", "en-US").with_user(format!("user-{user}")))
                    .await
                    .unwrap();
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    for user in 0..8 {
        assert_eq!(memory.history(&format!("user-{user}")).await.unwrap().len(), 6);
    }
}

// ── E2E: configuration and HTTP ─────────────────────────────────────────

#[tokio::test]
async fn e2e_config_built_pipeline_over_http() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = AppConfig::default();
    config.store.backend = "sqlite".into();
    config.store.path = dir.path().join("store/regulations.db").to_string_lossy().to_string();
    config.memory.backend = "memory".into();
    config.retriever.enabled = false;
    config.validate().unwrap();

    let pipeline = driversfriend_resolver::build_from_config(&config).await.unwrap();
    let seed_path = dir.path().join("seed.json");
    std::fs::write(&seed_path, SEED).unwrap();
    pipeline
        .store()
        .insert_many(load_seed_file(&seed_path).await.unwrap())
        .await
        .unwrap();

    let state = Arc::new(GatewayState {
        pipeline: Arc::new(pipeline),
    });

    let req = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::json!({
                "message": "Tell me about drunk driving",
                "language": "en-US",
                "user_id": "web"
            })
            .to_string(),
        ))
        .unwrap();
    let response = build_router(state.clone()).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["intent"], "search");
    assert_eq!(json["search_results"][0]["category"], "alcohol_limit");

    let req = Request::builder()
        .uri("/api/categories?language=en-US")
        .body(Body::empty())
        .unwrap();
    let response = build_router(state.clone()).oneshot(req).await.unwrap();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["categories"], serde_json::json!(["alcohol_limit", "speed_limit"]));

    let req = Request::builder()
        .uri("/api/history/web")
        .body(Body::empty())
        .unwrap();
    let response = build_router(state).oneshot(req).await.unwrap();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["messages"].as_array().unwrap().len(), 2);
    assert_eq!(json["messages"][0]["sender"], "user");
}
