//! Domino Café - match runner library
//!
//! Hosts the [`domino_match`] session core behind real timers and a
//! terminal front end.
//!
//! # Architecture
//!
//! - **Runner**: tokio task owning one session; clock and automated-turn timers
//! - **Screen**: stateless ratatui rendering of a session snapshot
//! - **Play**: interactive terminal match
//! - **Simulate**: headless match with an autopilot human
//! - **Config**: TOML settings and CLI overrides
//!
//! # Example
//!
//! ```no_run
//! use domino_cafe::{AppConfig, simulate};
//! use domino_match::{MatchMode, MatchSession};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = AppConfig::default().with_seed(Some(7));
//! let session = MatchSession::new(config.match_config(MatchMode::OneOnOne));
//! let report = simulate(session, config.pacing(50)).await?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod play;
mod runner;
mod screen;
mod simulate;

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError};

// Crate-level exports - Runner
pub use runner::{Command, MatchHandle, MatchRunner, Pacing, RunOutcome, SessionUpdate};

// Crate-level exports - Front ends
pub use play::play;
pub use screen::{KEY_HELP, command_for_key, draw_match, draw_report};
pub use simulate::simulate;
