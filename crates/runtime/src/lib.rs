//! Session orchestration for the turn-based simulation.
//!
//! This crate wraps a [`delve_core::GameState`] in a [`Session`] that plays
//! the gameboard role: it holds the player's command queue, asks a
//! [`delve_core::DecisionPolicy`] for everyone else, keeps the player's
//! message log and persists snapshots through `delve-content`.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the session and its step loop
//! - [`policy`] provides NPC decision policies
//! - [`message`] keeps the bounded player message log
//! - [`config`] and [`error`] hold the session-wide configuration and errors
pub mod config;
pub mod error;
pub mod message;
pub mod policy;
pub mod session;

pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use message::{MessageEntry, MessageLog};
pub use policy::{IdlePolicy, RandomPolicy};
pub use session::{Poll, Session};
