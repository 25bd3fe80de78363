//! # Fact Harness
//!
//! An AI-powered fact generation pipeline for research and debate prep.
//!
//! Given a topic, Fact Harness asks Gemini for a list of research
//! questions, gathers a web-search-augmented answer for each from
//! Perplexity, distills the answers into structured `{title, content,
//! citation}` facts with a second pass through Gemini, and writes the
//! facts to a topic-named text file. A read-only stats command summarizes
//! previous runs.
//!
//! ## Pipeline
//!
//! ```text
//! ┌───────┐   ┌───────────┐   ┌────────────┐   ┌───────────┐   ┌───────────┐
//! │ Topic │──▶│ Questions │──▶│  Answers   │──▶│   Facts   │──▶│ Fact File │
//! │       │   │ (Gemini)  │   │(Perplexity)│   │ (Gemini)  │   │  (.txt)   │
//! └───────┘   └───────────┘   └────────────┘   └───────────┘   └───────────┘
//! ```
//!
//! Control flow is strictly sequential; each stage is a single
//! request/response step fronted by a trait so it can be mocked in tests.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration and environment credentials |
//! | [`error`] | Error taxonomy |
//! | [`models`] | Core data types |
//! | [`gemini`] | Gemini HTTP client |
//! | [`perplexity`] | Perplexity HTTP client |
//! | [`questions`] | Question generation stage |
//! | [`answers`] | Answer gathering stage |
//! | [`extract`] | Fact extraction stage |
//! | [`writer`] | Fact file serialization and parsing |
//! | [`stats`] | Statistics over previous runs |
//! | [`pipeline`] | Sequential run orchestration |
//! | [`menu`] | Interactive menu |

pub mod answers;
pub mod config;
pub mod error;
pub mod extract;
pub mod gemini;
pub mod menu;
pub mod models;
pub mod perplexity;
pub mod pipeline;
pub mod questions;
pub mod stats;
pub mod writer;
