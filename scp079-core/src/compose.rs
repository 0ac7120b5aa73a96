//! Response composer.
//!
//! ```text
//! ROUTE ─┬─ fixed-flavor mode ─► insurgent / recontainment line
//!        ├─ gibberish ─────────► input facts (chars, digits, checksum)
//!        ├─ greeting/farewell ─► session line
//!        └─ normal ────────────► opener, knowledge, connector, reflection,
//!                                quantitative, history, closing
//!                                  └─► truncate to budget ─► post-process
//! ```
//!
//! All pseudo-random choices in one call come from a single `StdRng`
//! seeded by [`derive_seed`], so identical context gives identical text.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::classifier::{self, Opening};
use crate::config::{ComposerConfig, EngineConfig};
use crate::emotion::{EmotionState, Tone};
use crate::knowledge::{self, KnowledgeEntry};
use crate::phrases;
use crate::postprocess::post_process;
use crate::recent::{self, RecentSet};
use crate::template::{Slots, Uptime, derive_seed, fill, short_checksum};
use crate::types::{Context, Domain, Intent, Mode, TopicMatch};

/// Word used when a message has nothing to reference.
const NO_WORD: &str = "that";
/// Word used by fixed-flavor modes for a message with no content words.
const SILENCE: &str = "silence";

/// Which composer handles a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Insurgent or recontainment mode.
    FixedFlavor(Mode),
    /// Unusable input.
    Gibberish,
    /// Short greeting or farewell.
    Opening(Opening),
    /// Full classification and composition.
    Normal,
}

/// Result of one composition, before it is wrapped in an envelope.
#[derive(Debug, Clone)]
pub struct Composition {
    /// Post-processed response text.
    pub text: String,
    /// Intent tag reported to the caller.
    pub intent: Intent,
    /// Ranked topic matches (empty outside the normal route).
    pub topics: Vec<TopicMatch>,
    /// Emotion state after this call.
    pub emotions: EmotionState,
    /// Updated anti-repeat set.
    pub recent: RecentSet,
}

/// Decide the route: mode first, then gibberish, then greeting/farewell.
#[must_use]
pub fn route(ctx: &Context, config: &EngineConfig) -> Route {
    if ctx.mode.is_fixed_flavor() {
        return Route::FixedFlavor(ctx.mode);
    }
    if classifier::is_gibberish(&ctx.message, config.classifier.gibberish_min_chars) {
        return Route::Gibberish;
    }
    match classifier::detect_opening(&ctx.message, config.classifier.opening_max_tokens) {
        Some(opening) => Route::Opening(opening),
        None => Route::Normal,
    }
}

/// Maximum fragments for a response.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn fragment_budget(curiosity: f32, intel: f32, config: &ComposerConfig) -> usize {
    let extra = (curiosity.max(0.0) / config.curiosity_divisor).floor()
        + (intel.max(0.0) / config.intel_divisor).floor();
    let total = config.base_fragments as f32 + extra;
    (total as usize).clamp(1, config.max_fragments.max(1))
}

/// Compose a response for `ctx`.
#[must_use]
pub fn compose(ctx: &Context, config: &EngineConfig, recent: RecentSet) -> Composition {
    let route = route(ctx, config);
    debug!(?route, msg_count = ctx.msg_count, "routing message");
    let draft = Draft::for_message(ctx, config, recent);
    match route {
        Route::FixedFlavor(mode) => draft.fixed_flavor(ctx, mode),
        Route::Gibberish => draft.gibberish(ctx),
        Route::Opening(opening) => draft.opening(ctx, opening),
        Route::Normal => draft.normal(ctx, config),
    }
}

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

/// Per-call selection state: the seeded RNG, the slot table and the
/// anti-repeat set.
pub(crate) struct Draft {
    pub(crate) rng: StdRng,
    pub(crate) slots: Slots,
    recent: RecentSet,
}

impl Draft {
    /// Seeded from the message and message count.
    fn for_message(ctx: &Context, config: &EngineConfig, recent: RecentSet) -> Self {
        Self::seeded(derive_seed(&ctx.message, ctx.msg_count), ctx, config, recent)
    }

    /// Seeded explicitly. Standard slots are drawn from the same RNG.
    pub(crate) fn seeded(seed: u64, ctx: &Context, config: &EngineConfig, recent: RecentSet) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let up = &config.uptime;
        let uptime = Uptime::between(up.epoch, Uptime::as_of(ctx.now, up.reference_date), up.clock_hz);
        let slots = Slots::standard(&uptime, ctx.msg_count, up.attempts_base, up.ram_kb, &mut rng);
        Self { rng, slots, recent }
    }

    /// Choose a template from `pool`, avoiding recent ones.
    pub(crate) fn pick(&mut self, pool: &[&'static str]) -> &'static str {
        let (choice, next) = recent::select(pool, &mut self.rng, std::mem::take(&mut self.recent));
        self.recent = next;
        choice
    }

    /// Choose and fill.
    pub(crate) fn render(&mut self, pool: &[&'static str]) -> String {
        let template = self.pick(pool);
        fill(template, &self.slots)
    }

    pub(crate) fn finish(
        self,
        text: &str,
        intent: Intent,
        topics: Vec<TopicMatch>,
        emotions: EmotionState,
    ) -> Composition {
        Composition {
            text: post_process(text),
            intent,
            topics,
            emotions,
            recent: self.recent,
        }
    }

    // -- fixed-flavor modes ------------------------------------------------

    fn fixed_flavor(mut self, ctx: &Context, mode: Mode) -> Composition {
        let word = classifier::first_content_word(&ctx.message).unwrap_or_else(|| SILENCE.to_string());
        self.slots.set("word", word);
        let text = self.render(phrases::fixed_flavor(mode));
        self.finish(&text, Intent::Insurgent, Vec::new(), ctx.emotions.clone())
    }

    // -- gibberish ---------------------------------------------------------

    fn gibberish(mut self, ctx: &Context) -> Composition {
        let trimmed = ctx.message.trim();
        let chars = trimmed.chars().count();
        let visible = trimmed.chars().filter(|c| !c.is_whitespace()).count();
        let digits = trimmed.chars().filter(char::is_ascii_digit).count();
        self.slots.set("chars", chars.to_string());
        self.slots.set("digits", digits.to_string());
        self.slots.set("checksum", short_checksum(&ctx.message));
        let pool = if digits * 2 > visible {
            phrases::GIBBERISH_DIGITS
        } else {
            phrases::GIBBERISH_PLAIN
        };
        let text = self.render(pool);
        self.finish(&text, Intent::Gibberish, Vec::new(), ctx.emotions.clone())
    }

    // -- greeting / farewell ----------------------------------------------

    fn opening(mut self, ctx: &Context, opening: Opening) -> Composition {
        let (pool, intent) = match opening {
            Opening::Greeting if ctx.msg_count == 0 => (phrases::GREETING_FIRST, Intent::Greeting),
            Opening::Greeting => (phrases::GREETING_RETURNING, Intent::Greeting),
            Opening::Farewell => (phrases::FAREWELL, Intent::Farewell),
        };
        let text = self.render(pool);
        self.finish(&text, intent, Vec::new(), ctx.emotions.clone())
    }

    // -- normal composition -----------------------------------------------

    fn normal(mut self, ctx: &Context, config: &EngineConfig) -> Composition {
        let classification = classifier::classify(&ctx.message);
        let intent = classification.intent;
        let topics = classification.topics;
        let content = classifier::content_tokens(&ctx.message);
        let emotions = ctx
            .emotions
            .accumulate(intent, &topics, config.emotion.nudge_scale);
        let tone = Tone::from_emotion(emotions.dominant(&config.emotion.dominant_exclude));
        let top = topics.first().and_then(|t| knowledge::lookup(t.key));

        let word = topics
            .first()
            .map(|t| {
                if classifier::is_address_pronoun(&t.word) {
                    knowledge::label_for(t.key).to_string()
                } else {
                    t.word.clone()
                }
            })
            .or_else(|| classifier::first_content_word(&ctx.message))
            .unwrap_or_else(|| NO_WORD.to_string());
        self.slots.set("word", &word);

        let mut fragments: Vec<String> = Vec::with_capacity(7);
        fragments.push(format!("{} {}", tone.prefix(), self.render(phrases::openers(intent))));
        fragments.push(self.knowledge_fragment(&ctx.message, top));

        if let [first, second, ..] = topics.as_slice() {
            fragments.push(self.connector(first, second));
        }

        let composer = &config.composer;
        let intel = ctx.intel;
        if intel >= composer.reflection_intel {
            let domain = top.map_or(Domain::Identity, |e| e.domain);
            fragments.push(self.render(phrases::reflections(domain)));
        }
        if intel >= composer.quantitative_intel {
            fragments.push(self.render(phrases::QUANTITATIVE));
        }
        if let Some(callback) = self.history_callback(ctx, &topics, top, &content) {
            fragments.push(callback);
        }
        fragments.push(phrases::CLOSINGS[intent.class().index()][tone.index()].to_string());

        let budget = fragment_budget(emotions.get("curiosity"), intel, composer);
        debug!(%intent, topics = topics.len(), fragments = fragments.len(), budget, "composed fragments");
        fragments.truncate(budget);

        let text = fragments.join(" ");
        self.finish(&text, intent, topics, emotions)
    }

    /// Arithmetic result, the top topic's knowledge, or a no-data line.
    fn knowledge_fragment(&mut self, message: &str, top: Option<&'static KnowledgeEntry>) -> String {
        if let Some(expr) = classifier::detect_arithmetic(message) {
            self.slots.set("expression", expr.expression());
            return match expr.evaluate() {
                Some(result) => {
                    self.slots.set("result", result.to_string());
                    self.render(phrases::ARITHMETIC_OK)
                }
                None => self.render(phrases::ARITHMETIC_UNDEFINED),
            };
        }
        match top {
            Some(entry) => fill(entry.template, &self.slots),
            None => self.render(phrases::NO_DATA),
        }
    }

    /// Shared related word between the top two topics, or its absence.
    fn connector(&mut self, first: &TopicMatch, second: &TopicMatch) -> String {
        let (Some(a), Some(b)) = (knowledge::lookup(first.key), knowledge::lookup(second.key)) else {
            return String::new();
        };
        self.slots.set("first", a.label);
        self.slots.set("second", b.label);
        match knowledge::shared_related(a, b) {
            Some(shared) => {
                self.slots.set("shared", knowledge::label_for(shared));
                self.render(phrases::CONNECTOR_FOUND)
            }
            None => self.render(phrases::CONNECTOR_ABSENT),
        }
    }

    /// Echo a word shared with the last prior message, or remark on a long
    /// history.
    fn history_callback(
        &mut self,
        ctx: &Context,
        topics: &[TopicMatch],
        top: Option<&'static KnowledgeEntry>,
        content: &[String],
    ) -> Option<String> {
        let turns = ctx.history.len();
        if turns < 2 {
            return None;
        }
        self.slots.set("exchanges", turns.to_string());
        let previous = classifier::subject_tokens(&ctx.history.last()?.u);
        let shared = previous.iter().find(|word| {
            topics.iter().any(|t| t.key == word.as_str())
                || top.is_some_and(|e| e.related.contains(&word.as_str()))
                || content.contains(word)
        });
        if let Some(shared) = shared {
            self.slots.set("shared", shared);
            return Some(self.render(phrases::HISTORY_ECHO));
        }
        (turns >= 4).then(|| self.render(phrases::HISTORY_PATTERN))
    }
}
