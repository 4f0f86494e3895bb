//! Response Composer: localized wording, source attribution and follow-up
//! suggestions.

use driversfriend_core::language::Language;
use driversfriend_core::regulation::Regulation;
use driversfriend_core::retrieval::PassageBundle;
use driversfriend_memory::ConversationTopic;

/// Results shown by the structured search tier.
pub const MAX_SEARCH_RESULTS: usize = 3;

/// Follow-up questions derived from search results.
pub const MAX_FOLLOW_UPS: usize = 3;

/// Default number of popular questions.
pub const DEFAULT_POPULAR_LIMIT: usize = 5;

const FAREWELL_INTENT: &str = "farewell";
const CAR: &str = "🚗";

pub fn offline_marker(language: Language) -> &'static str {
    language.pick("[Offline Knowledge Base] ", "[Offline-Wissensdatenbank] ")
}

/// Prefix a static-table answer with the offline marker.
pub fn mark_offline(response: &str, language: Language) -> String {
    format!("{}{response}", offline_marker(language))
}

/// Numbered list of up to three store results.
pub fn format_search_results(results: &[Regulation], language: Language) -> String {
    let header = language.pick(
        "Here's what I found about your question:",
        "Folgendes habe ich zu Ihrer Frage gefunden:",
    );
    let source = language.pick("Source: Our Database", "Quelle: Unsere Datenbank");

    let mut out = format!("{header}\n\n");
    for (i, regulation) in results.iter().take(MAX_SEARCH_RESULTS).enumerate() {
        out.push_str(&format!("{}. {}\n   {source}\n\n", i + 1, regulation.content));
    }
    out.trim_end().to_string()
}

/// Attribute a retrieved answer to its source.
pub fn web_attribution(bundle: &PassageBundle, language: Language) -> String {
    match language {
        Language::English => format!(
            "According to {}: {}\nSource: {}",
            bundle.source_name, bundle.summary, bundle.url
        ),
        Language::German => format!(
            "Laut {}: {}\nQuelle: {}",
            bundle.source_name, bundle.summary, bundle.url
        ),
    }
}

pub fn not_found(message: &str, language: Language) -> String {
    match language {
        Language::English => format!(
            "I couldn't find any information about '{message}'. Try rephrasing your question or asking about specific driving rules."
        ),
        Language::German => format!(
            "Ich konnte leider keine Informationen zu '{message}' finden. Versuchen Sie, Ihre Frage anders zu formulieren oder nach spezifischen Verkehrsregeln zu fragen."
        ),
    }
}

fn owned(questions: &[&str]) -> Vec<String> {
    questions.iter().map(|q| q.to_string()).collect()
}

/// Related questions for an intent or category. Unknown intents get none.
pub fn related_questions(intent: &str, language: Language) -> Vec<String> {
    let (english, german): (&[&str], &[&str]) = match intent {
        "speed_limit" | "autobahn" => (
            &[
                "What's the speed limit on highways?",
                "What happens if I exceed the speed limit?",
                "Are there different speed limits for trucks?",
            ],
            &[
                "Wie hoch ist die Geschwindigkeitsbegrenzung auf Autobahnen?",
                "Was passiert, wenn ich die Geschwindigkeitsbegrenzung überschreite?",
                "Gibt es unterschiedliche Geschwindigkeitsbegrenzungen für LKWs?",
            ],
        ),
        "alcohol_limit" => (
            &[
                "What are the penalties for drunk driving?",
                "Is the alcohol limit different for new drivers?",
                "How long should I wait after drinking before driving?",
            ],
            &[
                "Welche Strafen gibt es für Trunkenheit am Steuer?",
                "Ist die Alkoholgrenze für Fahranfänger anders?",
                "Wie lange sollte ich nach dem Trinken warten, bevor ich fahre?",
            ],
        ),
        "parking" | "parking_regulations" => (
            &[
                "How far from an intersection must I park?",
                "Do I need a parking disc?",
                "What is the fine for parking in a no-parking zone?",
            ],
            &[
                "Wie weit von einer Kreuzung entfernt muss ich parken?",
                "Brauche ich eine Parkscheibe?",
                "Wie hoch ist das Bußgeld für Falschparken?",
            ],
        ),
        "right_of_way" => (
            &[
                "Who has priority at an unmarked intersection?",
                "Do trams always have right of way?",
                "How do roundabouts work?",
            ],
            &[
                "Wer hat Vorfahrt an einer Kreuzung ohne Schilder?",
                "Haben Straßenbahnen immer Vorrang?",
                "Wie funktionieren Kreisverkehre?",
            ],
        ),
        "safety_requirements" | "safety" => (
            &[
                "Do passengers in the back need seatbelts?",
                "Which child seat does my child need?",
                "Can I use my phone with a hands-free kit?",
            ],
            &[
                "Müssen sich Mitfahrer hinten anschnallen?",
                "Welchen Kindersitz braucht mein Kind?",
                "Darf ich mit Freisprechanlage telefonieren?",
            ],
        ),
        _ => return Vec::new(),
    };
    owned(language.pick(english, german))
}

/// Follow-ups derived from the categories of search results, deduplicated.
pub fn follow_up_questions(results: &[Regulation], language: Language) -> Vec<String> {
    let mut questions: Vec<String> = Vec::new();
    for regulation in results {
        let candidates: &[&str] = match (regulation.category.as_str(), language) {
            ("speed_limit", Language::English) => &[
                "What happens if I exceed the speed limit?",
                "Are there different speed limits at night?",
            ],
            ("speed_limit", Language::German) => &[
                "Was passiert, wenn ich die Geschwindigkeitsbegrenzung überschreite?",
                "Gelten nachts andere Geschwindigkeitsbegrenzungen?",
            ],
            ("alcohol_limit", Language::English) => &[
                "What are the penalties for drunk driving?",
                "How long should I wait after drinking before driving?",
            ],
            ("alcohol_limit", Language::German) => &[
                "Welche Strafen gibt es für Trunkenheit am Steuer?",
                "Wie lange sollte ich nach dem Trinken warten, bevor ich fahre?",
            ],
            _ => &[],
        };
        for q in candidates {
            if !questions.iter().any(|existing| existing == q) {
                questions.push(q.to_string());
            }
        }
    }
    questions.truncate(MAX_FOLLOW_UPS);
    questions
}

/// Frequently asked questions, at most `limit`.
pub fn popular_questions(language: Language, limit: usize) -> Vec<String> {
    let questions: &[&str] = language.pick(
        &[
            "What is the speed limit on highways?",
            "Do I need to carry my driving license?",
            "What's the alcohol limit for drivers?",
            "When should I use headlights?",
            "How do traffic circles work?",
        ],
        &[
            "Wie hoch ist die Geschwindigkeitsbegrenzung auf Autobahnen?",
            "Muss ich meinen Führerschein mitführen?",
            "Wie hoch ist die Alkoholgrenze für Fahrer?",
            "Wann sollte ich die Scheinwerfer einschalten?",
            "Wie funktionieren Verkehrskreisel?",
        ],
    );
    questions.iter().take(limit).map(|q| q.to_string()).collect()
}

/// The localized sentence referencing recent topics.
pub fn contextual_note(topics: &[ConversationTopic], language: Language) -> Option<String> {
    if topics.is_empty() {
        return None;
    }
    let names = topics
        .iter()
        .map(|t| t.label(language))
        .collect::<Vec<_>>()
        .join(", ");
    Some(match language {
        Language::English => format!(" I hope the information about {names} was helpful."),
        Language::German => format!(" Ich hoffe, die Informationen zu {names} waren hilfreich."),
    })
}

/// Reference recent topics in a farewell answer.
///
/// Any other intent is returned unchanged. The note goes before the trailing
/// car emoji when there is one, otherwise at the end. Call at most once per
/// response.
pub fn augment_farewell(
    response: &str,
    intent: &str,
    topics: &[ConversationTopic],
    language: Language,
) -> String {
    if intent != FAREWELL_INTENT {
        return response.to_string();
    }
    let Some(note) = contextual_note(topics, language) else {
        return response.to_string();
    };
    match response.rfind(CAR) {
        Some(idx) => {
            let (head, tail) = response.split_at(idx);
            format!("{}{note} {tail}", head.trim_end())
        }
        None => format!("{response}{note}"),
    }
}
