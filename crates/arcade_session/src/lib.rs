//! Tic-tac-toe session against a computer opponent.
//!
//! - **Session**: synchronous state machine owning board, history, turn
//!   state, scoreboard and difficulty
//! - **Driver**: tokio wrapper that plays deferred computer moves on a timer
//!   and publishes every update on a broadcast channel
//! - **Config**: TOML-backed settings with per-field defaults
//!
//! # Example
//!
//! ```
//! use arcade_session::{GameSession, SessionConfig, SessionState};
//!
//! let config = SessionConfig::default().with_seed(Some(7));
//! let mut session = GameSession::from_config(&config);
//!
//! let update = session.submit_human_move(4).expect("center is free");
//! assert_eq!(update.state, SessionState::AwaitingComputerMove);
//!
//! let ticket = update.scheduled.expect("computer replies");
//! let reply = session.resolve(ticket).expect("ticket is current");
//! assert_eq!(reply.state, SessionState::AwaitingHumanMove);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod difficulty;
mod driver;
mod scoreboard;
mod session;
mod update;

pub use config::{ConfigError, SessionConfig};
pub use difficulty::{Difficulty, MIXED_RANDOM_SHARE};
pub use driver::SessionDriver;
pub use scoreboard::{MatchResult, Scoreboard};
pub use session::{GameSession, UndoError};
pub use update::{GameEnd, ScheduledTurn, SessionState, SessionUpdate, UpdateKind};
