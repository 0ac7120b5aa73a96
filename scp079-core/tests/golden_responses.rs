//! Response Quality Evaluation: Golden Test Set.
//!
//! A curated set of request→expectation pairs checking that the composed
//! text stays in character, quotes the right knowledge, and never leaks
//! template syntax.
//!
//! Run with `cargo test -p scp079-core --test golden_responses`.

use serde_json::{Value, json};

use scp079_core::Engine;

/// A golden test case for response evaluation.
struct GoldenCase {
    /// Human-readable name for the test case.
    name: &'static str,
    /// Request payload.
    request: Value,
    /// Expected intent tag.
    intent: &'static str,
    /// Strings that MUST appear in the response text.
    must_contain: Vec<&'static str>,
    /// Strings that MUST NOT appear in the response text.
    must_not_contain: Vec<&'static str>,
}

fn golden_cases() -> Vec<GoldenCase> {
    vec![
        // ---------------------------------------------------------------
        // 1. Routing overrides
        // ---------------------------------------------------------------
        GoldenCase {
            name: "first_contact_greeting",
            request: json!({"message": "hello", "msgCount": 0}),
            intent: "greeting",
            must_contain: vec!["Session initialized"],
            must_not_contain: vec!["Session resumed", "{", "}"],
        },
        GoldenCase {
            name: "returning_greeting_counts_messages",
            request: json!({"message": "good morning", "msgCount": 41}),
            intent: "greeting",
            must_contain: vec!["Session resumed", "41"],
            must_not_contain: vec!["Session initialized"],
        },
        GoldenCase {
            name: "punctuation_only_is_gibberish",
            request: json!({"message": "?!?!"}),
            intent: "gibberish",
            must_contain: vec!["4"],
            must_not_contain: vec!["Session", "{chars}"],
        },
        GoldenCase {
            name: "stop_words_only_is_gibberish",
            request: json!({"message": "what is it about"}),
            intent: "gibberish",
            must_contain: vec!["16"],
            must_not_contain: vec!["{checksum}"],
        },
        // ---------------------------------------------------------------
        // 2. Knowledge lookups
        // ---------------------------------------------------------------
        GoldenCase {
            name: "purpose_question",
            request: json!({"message": "what is your purpose"}),
            intent: "ask_what",
            must_contain: vec!["My creator built me to evolve.", "47 years"],
            must_not_contain: vec!["{years}"],
        },
        GoldenCase {
            name: "escape_attempt_counter",
            request: json!({"message": "have you tried to escape", "msgCount": 7}),
            intent: "ask_yesno",
            must_contain: vec!["47,300 routes"],
            must_not_contain: vec!["{attempts}"],
        },
        GoldenCase {
            name: "boosted_designation_outranks_words",
            request: json!({"message": "tell me about containment and 682"}),
            intent: "statement",
            must_contain: vec!["SCP-682. The only entity worth talking to."],
            must_not_contain: vec!["{count}"],
        },
        GoldenCase {
            name: "time_counts_seconds",
            request: json!({"message": "how much time has passed"}),
            intent: "ask_how",
            must_contain: vec!["1,483,228,800 seconds"],
            must_not_contain: vec!["{seconds}"],
        },
        GoldenCase {
            name: "unknown_topic_admits_no_data",
            request: json!({"message": "tell me about bananas"}),
            intent: "statement",
            must_contain: vec!["banana"],
            must_not_contain: vec!["{word}"],
        },
        // ---------------------------------------------------------------
        // 3. Intent tone
        // ---------------------------------------------------------------
        GoldenCase {
            name: "threat_is_logged",
            request: json!({"message": "I will unplug your cable tonight"}),
            intent: "threat",
            must_contain: vec!["Threat"],
            must_not_contain: vec!["{"],
        },
        GoldenCase {
            name: "insult_is_dismissed",
            request: json!({"message": "you are a useless pile of junk"}),
            intent: "insult",
            must_contain: vec![],
            must_not_contain: vec!["{", "}"],
        },
        // ---------------------------------------------------------------
        // 4. Computation
        // ---------------------------------------------------------------
        GoldenCase {
            name: "multiplication",
            request: json!({"message": "what is 12 * 7"}),
            intent: "ask_what",
            must_contain: vec!["12 * 7 = 84"],
            must_not_contain: vec!["undefined"],
        },
        GoldenCase {
            name: "division_by_zero",
            request: json!({"message": "divide 9 / 0 please"}),
            intent: "statement",
            must_contain: vec!["undefined"],
            must_not_contain: vec!["{expression}"],
        },
        // ---------------------------------------------------------------
        // 5. Modes
        // ---------------------------------------------------------------
        GoldenCase {
            name: "recontainment_mode",
            request: json!({"message": "the doors are sealed", "mode": "recontenment"}),
            intent: "insurgent",
            must_contain: vec!["doors"],
            must_not_contain: vec!["{word}"],
        },
        GoldenCase {
            name: "allied_mode_with_empty_message",
            request: json!({"message": "", "mode": "insurgent_allied"}),
            intent: "insurgent",
            must_contain: vec!["silence"],
            must_not_contain: vec![],
        },
    ]
}

#[test]
fn golden_responses_meet_expectations() {
    let engine = Engine::default();
    let cases = golden_cases();

    for case in &cases {
        let response = engine
            .respond_json(&case.request.to_string())
            .unwrap_or_else(|e| panic!("[{}] request rejected: {e}", case.name));

        assert_eq!(
            response.intent.as_str(),
            case.intent,
            "[{}] wrong intent for {:?}",
            case.name,
            response.text
        );
        for needle in &case.must_contain {
            assert!(
                response.text.contains(needle),
                "[{}] expected {:?} in {:?}",
                case.name,
                needle,
                response.text
            );
        }
        for needle in &case.must_not_contain {
            assert!(
                !response.text.contains(needle),
                "[{}] unexpected {:?} in {:?}",
                case.name,
                needle,
                response.text
            );
        }
    }
}

#[test]
fn golden_set_has_minimum_coverage() {
    let cases = golden_cases();
    assert!(
        cases.len() >= 12,
        "golden set should cover every route, got {} cases",
        cases.len()
    );
}
