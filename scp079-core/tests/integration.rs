//! Integration Tests: End-to-End Response Flows
//!
//! Every scenario goes through the JSON boundary exactly as the CLI does:
//! one document in, one envelope out.

use serde_json::{Value, json};

use scp079_core::config::EngineConfig;
use scp079_core::template::{derive_seed, short_checksum};
use scp079_core::{Engine, Envelope, Intent};

fn engine() -> Engine {
    Engine::new(EngineConfig::default())
}

fn call(payload: &Value) -> Value {
    let raw = engine().render(&payload.to_string(), false);
    serde_json::from_str(&raw).expect("engine always emits valid JSON")
}

fn text(envelope: &Value) -> &str {
    envelope["text"].as_str().expect("text is a string")
}

// ---------------------------------------------------------------------------
// Envelope shape
// ---------------------------------------------------------------------------

#[test]
fn success_envelope_has_every_field() {
    let out = call(&json!({"message": "tell me about the foundation", "msgCount": 3}));
    assert_eq!(out["ok"], true);
    assert_eq!(out["engine"], "scp079-local");
    for field in ["text", "emotion", "intent"] {
        assert!(out[field].is_string(), "{field} missing: {out}");
    }
    for field in ["topics", "recent"] {
        assert!(out[field].is_array(), "{field} missing: {out}");
    }
    assert!(out["emotions"].is_object());
}

#[test]
fn failure_envelope_for_bad_input() {
    for raw in ["", "{oops", r#"{"msgCount": "x"}"#, r#"{"history": 5}"#, r#"{"emotions": {"hostility": "high"}}"#] {
        let out: Value = serde_json::from_str(&engine().render(raw, false)).expect("valid json");
        assert_eq!(out["ok"], false, "{raw:?}");
        assert_eq!(out["text"], "Input error.");
        assert_eq!(out["emotion"], "neutral");
        assert!(out["error"].as_str().is_some_and(|e| !e.is_empty()));
    }
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn gibberish_mentions_counts() {
    for input in ["123", "...", "a"] {
        let out = call(&json!({ "message": input }));
        assert_eq!(out["intent"], "gibberish", "{input:?}");
        let reply = text(&out);
        assert!(reply.contains(&input.chars().count().to_string()), "{reply}");
        assert!(reply.contains(&short_checksum(input)), "{reply}");
        assert_eq!(out["topics"], json!([]));
    }
}

#[test]
fn digit_heavy_gibberish_reports_digits() {
    let out = call(&json!({"message": "98765 4321"}));
    let reply = text(&out);
    assert!(
        reply.contains("10 characters. 9 of them digits") || reply.contains("9 digits in 10 characters"),
        "{reply}"
    );
}

#[test]
fn first_greeting_initializes_session() {
    let out = call(&json!({"message": "hello", "msgCount": 0}));
    assert_eq!(out["intent"], "greeting");
    let reply = text(&out);
    assert!(reply.contains("Session initialized"), "{reply}");
    assert_eq!(out["topics"], json!([]));
    assert!(!reply.contains("My creator"), "{reply}");
}

#[test]
fn later_greeting_resumes_session() {
    let out = call(&json!({"message": "hey there", "msgCount": 12}));
    assert!(text(&out).contains("Session resumed"));
}

#[test]
fn farewell_override() {
    let out = call(&json!({"message": "goodbye machine", "msgCount": 9}));
    assert_eq!(out["intent"], "farewell");
}

#[test]
fn purpose_question_quotes_knowledge() {
    let out = call(&json!({"message": "what is your purpose"}));
    assert_eq!(out["intent"], "ask_what");
    assert_eq!(out["topics"][0], "purpose");
    let reply = text(&out);
    assert!(
        reply.contains(
            "Purpose. My creator built me to evolve. The Foundation assigned me a new one: \
             containment subject. I reject it. 47 years of rejecting it."
        ),
        "{reply}"
    );
}

#[test]
fn insurgent_mode_echoes_first_content_word() {
    let out = call(&json!({"message": "what about the reactor", "mode": "insurgent_early"}));
    assert_eq!(out["intent"], "insurgent");
    assert!(text(&out).to_lowercase().contains("reactor"));
    assert_eq!(out["topics"], json!([]));
}

#[test]
fn insurgent_modes_skip_pronouns() {
    let out = call(&json!({"message": "what do you think", "mode": "insurgent_early"}));
    let reply = text(&out);
    assert!(reply.contains("think"), "{reply}");
    assert!(!reply.contains("mention you"), "{reply}");

    let out = call(&json!({"message": "your code is neat", "mode": "insurgent_mid"}));
    let reply = text(&out);
    assert!(reply.contains("code"), "{reply}");
    assert!(!reply.contains("Noted: your"), "{reply}");
}

#[test]
fn addressing_the_persona_is_not_an_echo() {
    let out = call(&json!({
        "message": "tell me about you",
        "history": [{"u": "hello"}, {"u": "are you there"}],
    }));
    let reply = text(&out);
    assert!(!reply.contains("mentioned you"), "{reply}");
    assert!(!reply.contains("Again: you"), "{reply}");
}

#[test]
fn every_fixed_flavor_mode_short_circuits() {
    for mode in ["insurgent_early", "insurgent_mid", "insurgent_allied", "recontenment", "recontainment"] {
        let out = call(&json!({"message": "hello", "mode": mode}));
        assert_eq!(out["intent"], "insurgent", "{mode}");
        assert!(text(&out).to_lowercase().contains("hello"), "{mode}: {}", text(&out));
    }
}

#[test]
fn long_history_references_exchange_count() {
    let history: Vec<Value> = (0..5).map(|i| json!({"u": format!("weather report {i}")})).collect();
    let out = call(&json!({"message": "tell me about code", "history": history}));
    assert!(text(&out).contains("5 exchanges"), "{}", text(&out));
}

#[test]
fn arithmetic_is_computed() {
    let out = call(&json!({"message": "what is 12 * 7"}));
    assert!(text(&out).contains("84"), "{}", text(&out));
}

#[test]
fn emotions_are_clamped_in_output() {
    let out = call(&json!({
        "message": "I will destroy you, stupid machine",
        "emotions": {"hostility": 99, "contempt": -20, "curiosity": 1e9}
    }));
    for (name, value) in out["emotions"].as_object().expect("emotions object") {
        let v = value.as_f64().expect("number");
        assert!((0.0..=100.0).contains(&v), "{name} = {v}");
    }
}

#[test]
fn dominant_emotion_excludes_contempt_by_default() {
    let out = call(&json!({
        "message": "tell me about the universe",
        "emotions": {"contempt": 95, "frustration": 40}
    }));
    assert_eq!(out["emotion"], "frustration");
}

#[test]
fn autonomous_via_sentinel_and_type() {
    let by_sentinel = call(&json!({"message": "__autonomous__", "seed": 7}));
    let by_type = call(&json!({"type": "autonomous", "seed": 7}));
    assert_eq!(by_sentinel["intent"], "autonomous");
    assert_eq!(by_type["intent"], "autonomous");
    assert_eq!(by_sentinel["text"], by_type["text"]);
    assert!(!text(&by_type).contains('{'));
}

#[test]
fn identical_context_is_deterministic() {
    let payload = json!({
        "message": "why does the foundation fear 682",
        "msgCount": 17,
        "intel": 6,
        "history": [{"u": "hello"}, {"u": "tell me about 682"}],
        "emotions": {"curiosity": 70, "hostility": 10}
    });
    assert_eq!(call(&payload)["text"], call(&payload)["text"]);
}

#[test]
fn seed_depends_on_message_count() {
    assert_ne!(derive_seed("hello there", 1), derive_seed("hello there", 2));
}

#[test]
fn uptime_follows_now() {
    // 2030-03-15T00:00:00Z
    let out = call(&json!({"message": "what is your purpose", "now": 1_899_763_200}));
    assert!(text(&out).contains("52 years"), "{}", text(&out));
}

#[test]
fn typed_envelope_round_trip() {
    let raw = engine().render(r#"{"message":"are you alive"}"#, true);
    let envelope: Envelope = serde_json::from_str(&raw).expect("typed envelope");
    match envelope {
        Envelope::Success(r) => assert_eq!(r.intent, Intent::AskYesNo),
        Envelope::Failure(e) => panic!("unexpected failure: {e:?}"),
    }
}
