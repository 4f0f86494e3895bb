//! The Resolution Pipeline: tiered fallback over every knowledge source.
//!
//! ```text
//! CLASSIFY -> (lookup?) SEARCH -> WEB -> OFFLINE -> NOT_FOUND
//! ```
//!
//! Tiers run sequentially and the first one that produces an answer wins.
//! Every external call is bounded by a timeout. A failing tier is logged at
//! its boundary and treated as "no answer"; the pipeline itself only fails on
//! invalid input.

use crate::classifier::{QueryKind, classify};
use crate::composer::{self, MAX_SEARCH_RESULTS};
use crate::offline::StaticKnowledgeTable;
use driversfriend_core::error::{RetrievalError, StoreError, ValidationError};
use driversfriend_core::language::Language;
use driversfriend_core::message::ConversationMessage;
use driversfriend_core::regulation::Regulation;
use driversfriend_core::resolution::{ChatRequest, Intent, ResolutionResult, SearchOutcome};
use driversfriend_core::retrieval::{ContentRetriever, PassageBundle};
use driversfriend_core::store::KnowledgeStore;
use driversfriend_core::text::{extract_keywords, tokenize};
use driversfriend_memory::ConversationMemory;
use futures::future::join_all;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Budget for a single store query or document fetch.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// A secondary source replaces the current pick only when its textual
/// relevance is higher by more than this.
pub const SOURCE_PREFERENCE_MARGIN: f32 = 0.2;

/// Added to a bundle's relevance when it contains the whole query verbatim.
pub const EXACT_PHRASE_BONUS: f32 = 0.3;

const OFFLINE_CONFIDENCE: f32 = 0.8;
const WEB_INTENT: &str = "web_search";

pub struct ResolutionPipeline {
    store: Arc<dyn KnowledgeStore>,
    retrievers: Vec<Arc<dyn ContentRetriever>>,
    table: StaticKnowledgeTable,
    memory: Option<ConversationMemory>,
    store_timeout: Duration,
    retrieval_timeout: Duration,
}

impl ResolutionPipeline {
    pub fn new(store: Arc<dyn KnowledgeStore>, table: StaticKnowledgeTable) -> Self {
        Self {
            store,
            retrievers: Vec::new(),
            table,
            memory: None,
            store_timeout: DEFAULT_TIMEOUT,
            retrieval_timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sources in priority order; the first is the primary source.
    pub fn with_retrievers(mut self, retrievers: Vec<Arc<dyn ContentRetriever>>) -> Self {
        self.retrievers = retrievers;
        self
    }

    pub fn with_memory(mut self, memory: ConversationMemory) -> Self {
        self.memory = Some(memory);
        self
    }

    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }

    pub fn with_retrieval_timeout(mut self, timeout: Duration) -> Self {
        self.retrieval_timeout = timeout;
        self
    }

    pub fn store(&self) -> &Arc<dyn KnowledgeStore> {
        &self.store
    }

    pub fn memory(&self) -> Option<&ConversationMemory> {
        self.memory.as_ref()
    }

    /// Resolve one chat turn.
    ///
    /// The only error is a rejected request; every source failure degrades
    /// to a lower tier and ultimately to the not-found answer.
    pub async fn handle(&self, request: &ChatRequest) -> Result<ResolutionResult, ValidationError> {
        request.validate()?;
        let started = Instant::now();
        let message = request.message.trim();
        let language = Language::from_tag(&request.language);
        let user_id = request
            .user_id
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty());

        if let Some(user) = user_id {
            self.remember(user, ConversationMessage::user(message)).await;
        }

        let mut result = self.resolve(message, &request.language, language).await;

        if let Some(user) = user_id {
            if let Some(memory) = &self.memory {
                match memory.recent_topics(user).await {
                    Ok(topics) => {
                        result.response = composer::augment_farewell(
                            &result.response,
                            result.intent_name(),
                            &topics,
                            language,
                        );
                    }
                    Err(e) => warn!(user, error = %e, "Could not read recent topics"),
                }
            }
            let outbound = ConversationMessage::assistant(result.response.clone())
                .with_search_results(result.search_results.clone().unwrap_or_default());
            self.remember(user, outbound).await;
        }

        info!(
            intent = %result.intent_name(),
            confidence = result.confidence(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Request resolved"
        );
        Ok(result)
    }

    /// Keyword search over the store, used by the search tier and exposed as
    /// a service of its own.
    pub async fn search(
        &self,
        query: &str,
        language_tag: &str,
        category: Option<&str>,
        limit: usize,
    ) -> Result<SearchOutcome, StoreError> {
        let keywords = extract_keywords(query);
        let mut results = if keywords.is_empty() {
            Vec::new()
        } else {
            self.store_search(&keywords, language_tag).await?
        };
        if let Some(category) = category {
            results.retain(|r| r.category == category);
        }
        results.truncate(limit);

        Ok(SearchOutcome {
            total_results: results.len(),
            results,
            query: query.to_string(),
            matched_keywords: keywords,
        })
    }

    async fn resolve(&self, message: &str, language_tag: &str, language: Language) -> ResolutionResult {
        let kind = classify(message);
        debug!(?kind, "Classified message");

        if kind == QueryKind::Lookup
            && let Some(result) = self.search_tier(message, language_tag, language).await
        {
            return result;
        }
        if let Some(result) = self.web_tier(message, language_tag, language).await {
            return result;
        }
        if let Some(result) = self.offline_tier(message, language_tag, language).await {
            return result;
        }

        debug!(tier = "not_found", "No tier produced an answer");
        ResolutionResult::new(composer::not_found(message, language), Intent::unknown())
    }

    async fn search_tier(&self, message: &str, language_tag: &str, language: Language) -> Option<ResolutionResult> {
        let outcome = match self.search(message, language_tag, None, MAX_SEARCH_RESULTS).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(tier = "search", store = self.store.name(), error = %e, "Tier failed, falling through");
                return None;
            }
        };
        if outcome.total_results == 0 {
            return None;
        }

        debug!(tier = "search", results = outcome.total_results, "Tier answered");
        let response = composer::format_search_results(&outcome.results, language);
        let suggestions = composer::follow_up_questions(&outcome.results, language);
        let mut result = ResolutionResult::new(response, Intent::search()).with_suggestions(suggestions);
        result.search_results = Some(outcome.results);
        Some(result)
    }

    async fn web_tier(&self, message: &str, language_tag: &str, language: Language) -> Option<ResolutionResult> {
        if self.retrievers.is_empty() {
            return None;
        }

        let calls = self.retrievers.iter().map(|retriever| async move {
            let outcome = match tokio::time::timeout(
                self.retrieval_timeout,
                retriever.retrieve(message, language_tag),
            )
            .await
            {
                Ok(outcome) => outcome,
                Err(_) => Err(RetrievalError::Timeout {
                    url: retriever.name().to_string(),
                    timeout_secs: self.retrieval_timeout.as_secs(),
                }),
            };
            (retriever.name(), outcome)
        });

        let mut bundles = Vec::new();
        for (source, outcome) in join_all(calls).await {
            match outcome {
                Ok(Some(bundle)) => bundles.push(bundle),
                Ok(None) => debug!(tier = "web", source, "Source had no relevant passage"),
                Err(e) => warn!(tier = "web", source, error = %e, "Source failed"),
            }
        }

        let best = select_bundle(bundles, message)?;
        debug!(tier = "web", source = %best.source_name, "Tier answered");

        let response = composer::web_attribution(&best, language);
        let suggestions = composer::related_questions(&best.topic, language);
        let mut result = ResolutionResult::new(response, Intent::new(WEB_INTENT, best.confidence))
            .with_suggestions(suggestions);
        result.source = Some(best.source_name);
        result.url = Some(best.url);
        result.passages = Some(best.passages);
        Some(result)
    }

    async fn offline_tier(&self, message: &str, language_tag: &str, language: Language) -> Option<ResolutionResult> {
        let keywords = extract_keywords(message);
        if !keywords.is_empty() {
            match self.store_search(&keywords, language_tag).await {
                Ok(results) => {
                    if let Some(first) = results.into_iter().next() {
                        debug!(tier = "offline", category = %first.category, "Store answered");
                        let suggestions = composer::related_questions(&first.category, language);
                        return Some(
                            ResolutionResult::new(
                                first.content,
                                Intent::new(first.category, OFFLINE_CONFIDENCE),
                            )
                            .with_suggestions(suggestions),
                        );
                    }
                }
                Err(e) => {
                    warn!(tier = "offline", store = self.store.name(), error = %e, "Store failed, using static table");
                }
            }
        }

        let hit = self.table.lookup(message, language_tag)?;
        debug!(tier = "offline", topic = %hit.entry.topic, score = hit.score, "Static table answered");
        let suggestions = composer::related_questions(&hit.entry.intent, language);
        Some(
            ResolutionResult::new(
                composer::mark_offline(&hit.entry.response, language),
                Intent::new(hit.entry.intent, OFFLINE_CONFIDENCE),
            )
            .with_suggestions(suggestions),
        )
    }

    async fn store_search(&self, keywords: &[String], language_tag: &str) -> Result<Vec<Regulation>, StoreError> {
        match tokio::time::timeout(self.store_timeout, self.store.search(keywords, language_tag)).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout {
                timeout_secs: self.store_timeout.as_secs(),
            }),
        }
    }

    async fn remember(&self, user_id: &str, message: ConversationMessage) {
        if let Some(memory) = &self.memory
            && let Err(e) = memory.record(user_id, message).await
        {
            warn!(user = user_id, error = %e, "Could not record conversation message");
        }
    }
}

/// Fraction of query words present in `text`, plus a bonus for the exact phrase.
pub fn text_relevance(query: &str, text: &str) -> f32 {
    let words = tokenize(query);
    if words.is_empty() {
        return 0.0;
    }
    let lower = text.to_lowercase();
    let present = words.iter().filter(|w| lower.contains(w.as_str())).count();
    let mut relevance = present as f32 / words.len() as f32;

    let phrase = query.trim().to_lowercase();
    if !phrase.is_empty() && lower.contains(&phrase) {
        relevance += EXACT_PHRASE_BONUS;
    }
    relevance
}

/// Pick one bundle out of several sources, given in priority order.
///
/// The primary source is kept unless another is more relevant by more than
/// [`SOURCE_PREFERENCE_MARGIN`].
pub fn select_bundle(bundles: Vec<PassageBundle>, query: &str) -> Option<PassageBundle> {
    let mut iter = bundles.into_iter();
    let mut best = iter.next()?;
    let mut best_relevance = text_relevance(query, &best.summary);
    for candidate in iter {
        let relevance = text_relevance(query, &candidate.summary);
        if relevance > best_relevance + SOURCE_PREFERENCE_MARGIN {
            debug!(
                preferred = %candidate.source_name,
                over = %best.source_name,
                relevance,
                best_relevance,
                "Secondary source is more relevant"
            );
            best = candidate;
            best_relevance = relevance;
        }
    }
    Some(best)
}
