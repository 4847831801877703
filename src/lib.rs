//! trieviz: render frequency-annotated tries as Graphviz diagrams
//!
//! A trie exported as JSON (node ids, tokens, counts, end markers, plus the
//! number of unique sequences and an anomaly threshold) is walked into a
//! diagram. Terminal nodes whose share of all unique sequences falls at or
//! below the threshold are highlighted.
//!
//! Layers:
//! - [`domain`]: trie model, styling rules, diagram walk, DOT serialization
//! - [`application`]: loading and rendering services
//! - [`infrastructure`]: filesystem and process boundaries, service wiring
//! - [`cli`]: argument parsing and command dispatch

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
