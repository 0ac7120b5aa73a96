//! Request/response boundary.
//!
//! [`Engine::handle_json`] never fails: malformed JSON, wrong field types
//! and every other [`EngineError`] become the failure envelope. Absent or
//! null fields are defaulted, never treated as errors.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::autonomous;
use crate::compose::{self, Composition};
use crate::config::EngineConfig;
use crate::emotion::{EmotionState, NEUTRAL};
use crate::error::{EngineError, Result};
use crate::recent::RecentSet;
use crate::types::{Context, HistoryTurn, Intent, Mode};

/// Message value that requests an autonomous thought.
pub const AUTONOMOUS_SENTINEL: &str = "__autonomous__";

/// `text` of every failure envelope.
pub const ERROR_TEXT: &str = "Input error.";

/// Emitted if serialising an envelope ever fails.
const LAST_RESORT: &str = r#"{"ok":false,"error":"serialization failed","engine":"scp079-local","text":"Input error.","emotion":"neutral"}"#;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// One request as read from JSON. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Request {
    /// The user's message.
    pub message: Option<String>,
    /// Emotion scores, nominally in `[0, 100]`.
    pub emotions: Option<BTreeMap<String, f64>>,
    /// Messages processed so far. Negative values count as zero.
    pub msg_count: Option<i64>,
    /// Conversation mode.
    pub mode: Option<String>,
    /// Prior turns, oldest first.
    pub history: Option<Vec<HistoryTurn>>,
    /// Capability scalar.
    pub intel: Option<f64>,
    /// `"autonomous"` selects the autonomous path.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Anti-repeat fingerprints from the previous response.
    pub recent: Option<Vec<String>>,
    /// "As of" time in unix seconds for uptime figures.
    pub now: Option<i64>,
    /// Seed for autonomous thoughts.
    pub seed: Option<u64>,
}

impl Request {
    /// A request carrying only a message.
    #[must_use]
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            message: Some(text.into()),
            ..Self::default()
        }
    }

    /// Whether this request asks for an autonomous thought.
    #[must_use]
    pub fn is_autonomous(&self) -> bool {
        self.message.as_deref() == Some(AUTONOMOUS_SENTINEL)
            || self
                .kind
                .as_deref()
                .is_some_and(|k| k.eq_ignore_ascii_case("autonomous"))
    }

    /// Normalise into a [`Context`], applying defaults and clamps.
    #[must_use]
    pub fn to_context(&self, config: &EngineConfig) -> Context {
        let message = match self.message.as_deref() {
            Some(AUTONOMOUS_SENTINEL) | None => String::new(),
            Some(text) => text.to_string(),
        };
        let emotions = self.emotions.as_ref().map_or_else(EmotionState::baseline, |scores| {
            EmotionState::from_scores(scores.iter().map(|(k, &v)| (k.clone(), v)))
        });
        let mode = match self.mode.as_deref() {
            None => Mode::Normal,
            Some(raw) => Mode::parse(raw).unwrap_or_else(|| {
                warn!(mode = raw, "unknown mode, using normal");
                Mode::Normal
            }),
        };
        #[allow(clippy::cast_possible_truncation)]
        let intel = match self.intel {
            Some(v) if v.is_finite() => v as f32,
            Some(v) => {
                warn!(intel = v, "non-finite intel, using default");
                config.composer.default_intel
            }
            None => config.composer.default_intel,
        };
        Context {
            message,
            emotions,
            msg_count: self.msg_count.map_or(0, |n| u64::try_from(n).unwrap_or(0)),
            mode,
            history: self.history.clone().unwrap_or_default(),
            intel,
            now: self.now,
            seed: self.seed,
        }
    }
}

/// Successful response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Always `true`.
    pub ok: bool,
    /// The in-character reply.
    pub text: String,
    /// Engine identifier.
    pub engine: String,
    /// Dominant emotion after this call.
    pub emotion: String,
    /// Full emotion state after this call.
    pub emotions: EmotionState,
    /// Intent or routing tag.
    pub intent: Intent,
    /// Matched knowledge keys, strongest first.
    pub topics: Vec<String>,
    /// Anti-repeat fingerprints to send with the next request.
    pub recent: Vec<String>,
}

/// Failure envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always `false`.
    pub ok: bool,
    /// What went wrong.
    pub error: String,
    /// Engine identifier.
    pub engine: String,
    /// Always [`ERROR_TEXT`].
    pub text: String,
    /// Always `"neutral"`.
    pub emotion: String,
}

/// Either envelope, serialised without a tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Envelope {
    /// A composed response.
    Success(Response),
    /// An in-band error.
    Failure(ErrorResponse),
}

impl Envelope {
    /// Whether this is the success shape.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Response text of either shape.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Success(r) => &r.text,
            Self::Failure(e) => &e.text,
        }
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Stateless response engine. Safe to share; every call is independent.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Engine with the given configuration.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Produce a response for a parsed request.
    #[must_use]
    pub fn respond(&self, request: &Request) -> Response {
        let ctx = request.to_context(&self.config);
        let recent = RecentSet::from_entries(
            request.recent.clone().unwrap_or_default(),
            self.config.general.recent_capacity,
        );
        let composition = if request.is_autonomous() {
            debug!("autonomous request");
            autonomous::think(&ctx, &self.config, recent)
        } else {
            compose::compose(&ctx, &self.config, recent)
        };
        self.envelope(composition)
    }

    /// Parse `raw` and respond.
    ///
    /// # Errors
    /// Returns `EngineError::InvalidInput` if `raw` is not a JSON object of
    /// the request shape.
    pub fn respond_json(&self, raw: &str) -> Result<Response> {
        let request: Request = serde_json::from_str(raw)?;
        Ok(self.respond(&request))
    }

    /// Parse and respond, reporting any failure in-band.
    #[must_use]
    pub fn handle_json(&self, raw: &str) -> Envelope {
        match self.respond_json(raw) {
            Ok(response) => Envelope::Success(response),
            Err(err) => {
                warn!(error = %err, "request rejected");
                Envelope::Failure(self.error_response(&err))
            }
        }
    }

    /// Handle `raw` and serialise the envelope. Always returns one JSON
    /// document.
    #[must_use]
    pub fn render(&self, raw: &str, pretty: bool) -> String {
        self.render_envelope(&self.handle_json(raw), pretty)
    }

    /// Serialise an envelope, falling back to a fixed failure document.
    #[must_use]
    pub fn render_envelope(&self, envelope: &Envelope, pretty: bool) -> String {
        let rendered = if pretty {
            serde_json::to_string_pretty(envelope)
        } else {
            serde_json::to_string(envelope)
        };
        rendered.unwrap_or_else(|err| {
            warn!(error = %err, "envelope serialization failed");
            LAST_RESORT.to_string()
        })
    }

    /// Failure envelope for `err`.
    #[must_use]
    pub fn error_response(&self, err: &EngineError) -> ErrorResponse {
        ErrorResponse {
            ok: false,
            error: err.to_string(),
            engine: self.config.general.engine_name.clone(),
            text: ERROR_TEXT.to_string(),
            emotion: NEUTRAL.to_string(),
        }
    }

    fn envelope(&self, composition: Composition) -> Response {
        let emotion = composition
            .emotions
            .dominant(&self.config.emotion.dominant_exclude)
            .to_string();
        Response {
            ok: true,
            text: composition.text,
            engine: self.config.general.engine_name.clone(),
            emotion,
            emotions: composition.emotions,
            intent: composition.intent,
            topics: composition.topics.iter().map(|t| t.key.to_string()).collect(),
            recent: composition.recent.into_vec(),
        }
    }
}
