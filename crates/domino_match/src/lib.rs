//! Domino match core - pure session logic
//!
//! This crate holds the match state machine used by the Domino Café
//! gameplay screens: a one-second [`Clock`], a round-robin
//! [`TurnSequencer`], a mocked [`MoveResolver`], and the [`MatchSession`]
//! that composes them.
//!
//! The crate performs no I/O, never reads the wall clock, and draws all
//! randomness from an injected source. The caller owns the timers and feeds
//! transitions in.
//!
//! # Example
//!
//! ```
//! use domino_match::{MatchConfig, MatchMode, MatchSession, Phase};
//!
//! let config = MatchConfig::new(MatchMode::OneOnOne).with_seed(Some(7));
//! let mut session = MatchSession::new(config);
//!
//! session.select_tile(1).unwrap();
//! session.confirm_tile(1).unwrap();
//!
//! assert_eq!(session.current_actor_index(), 1);
//! assert_eq!(session.phase(), Phase::InProgress);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod actor;
mod clock;
mod error;
mod event;
mod mode;
mod report;
mod resolver;
mod rewards;
mod sequencer;
mod session;
mod tile;

pub use actor::{Actor, ActorId, ActorKind, STARTING_TILES};
pub use clock::{Clock, ClockState, ClockTick};
pub use error::TransitionError;
pub use event::{EndReason, MatchEnded, MatchEvent};
pub use mode::MatchMode;
pub use report::{MatchReport, format_clock};
pub use resolver::{MoveOutcome, MoveResolver};
pub use rewards::{Rewards, calculate_rewards};
pub use sequencer::{TurnNumber, TurnSequencer};
pub use session::{
    DEFAULT_ACTOR_NAMES, HUMAN_INDEX, MatchConfig, MatchSession, MatchSnapshot, Phase,
};
pub use tile::{DominoTile, Hand, TileId};
