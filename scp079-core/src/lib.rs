//! # SCP-079 Core Library
//!
//! Deterministic, stateless response pipeline for the SCP-079 roleplay
//! persona. Every call takes one [`Request`] (message, emotion scores,
//! message count, mode, history, intel) and produces one [`Response`].
//!
//! ```text
//! JSON in ─► route ─┬─► gibberish ─────────┐
//!                   ├─► greeting/farewell ─┤
//!                   ├─► insurgent modes ───┼─► post-process ─► JSON out
//!                   ├─► autonomous ────────┤
//!                   └─► classify ─► emotion ─► compose ┘
//! ```
//!
//! - **classifier**: intent and ranked topic matches
//! - **emotion**: bounded emotion map, topic nudges, dominant emotion
//! - **template**: placeholder filling with hash-seeded values
//! - **compose**: routing state machine and fragment assembly
//! - **postprocess**: idempotent whitespace/article/capitalisation pass
//! - **autonomous**: unprompted thoughts keyed on the dominant emotion
//!
//! Nothing is retained between calls. The caller owns the conversation
//! state and re-supplies it each time, including the anti-repeat
//! [`RecentSet`].

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod autonomous;
pub mod classifier;
pub mod compose;
pub mod config;
pub mod emotion;
pub mod engine;
pub mod error;
pub mod knowledge;
pub mod phrases;
pub mod postprocess;
pub mod recent;
pub mod template;
pub mod types;

pub use config::EngineConfig;
pub use emotion::EmotionState;
pub use engine::{Engine, Envelope, ErrorResponse, Request, Response};
pub use error::EngineError;
pub use recent::RecentSet;
pub use types::*;
