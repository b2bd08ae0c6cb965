//! # Cadence
//!
//! A library for analyzing keystroke performance logs.
//!
//! The input is one player's chronologically ordered log of keystroke
//! events, as recorded by a typing trainer: one row per key press, carrying
//! the key, the key pressed immediately before it (absent at session
//! starts), and the instantaneous speed and accuracy of the press.
//!
//! From that single stream the library derives four independent views:
//!
#![doc = simple_mermaid::mermaid!("../docs/pipeline.mmd")]
//!
//! - [`keys::key_stats`] - presses, mean speed and mean accuracy per key
//! - [`digraph::digraph_stats`] - the same per key-to-key transition, with
//!   ranked views and a dense [`TransitionMatrix`]
//! - [`trigram::trigram_stats`] - mean speed per three-key sequence
//! - [`series::key_speed_series`] - one key's speed history as a trailing
//!   rolling mean
//!
//! Every view is a pure function of the immutable [`EventLog`]: nothing is
//! cached, persisted or mutated between calls.

pub mod digraph;
pub mod error;
pub mod event;
pub mod keys;
pub mod sequence;
pub mod series;
pub mod trigram;

pub use digraph::{DigraphStat, TransitionMatrix};
pub use error::AnalysisError;
pub use event::{EventLog, KeystrokeEvent};
pub use keys::KeyStat;
pub use sequence::{Digraph, Trigram};
pub use series::SeriesPoint;
pub use trigram::TrigramStat;
