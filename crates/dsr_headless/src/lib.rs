//! Headless game runner for scripted play, AI clients and CI verification.
//!
//! This crate drives the rules engine without graphics. It can be
//! controlled via JSON commands on stdin, with outcomes on stdout:
//!
//! - **AI testing**: An agent can play full games over a pipe
//! - **CI verification**: Scripted sessions check rules end to end
//! - **Scenario checks**: Hand-written starting positions are validated
//!
//! # Protocol
//!
//! Communication uses JSON lines (one JSON object per line):
//!
//! - **stdin**: Commands from controller (select, move, attack, end_turn, etc.)
//! - **stdout**: One response per command (JSON)
//! - **stderr**: Logs (human-readable)
//!
//! See [`protocol`] module for the full command/response specification.
//!
//! # Example
//!
//! ```bash
//! # Run interactively
//! echo '{"cmd":"render"}' | cargo run -p dsr_headless
//!
//! # Run a scenario
//! cargo run -p dsr_headless -- run --scenario scenarios/duel.ron
//!
//! # Check a scenario file
//! cargo run -p dsr_headless -- validate --scenario scenarios/duel.ron
//! ```

pub mod ascii_visualizer;
pub mod protocol;
pub mod runner;
pub mod scenario;

pub use ascii_visualizer::{render_ascii, render_board, AsciiConfig};
pub use protocol::{Command, Response};
pub use runner::{HeadlessConfig, HeadlessRunner};
pub use scenario::{Scenario, ScenarioError};
