//! timeboard - Task Lifecycle and Time Accounting Library
//!
//! This library provides the core functionality for the timeboard CLI,
//! a task board where work moves through a fixed lifecycle while accruing
//! elapsed time against an estimate.
//!
//! # Core Concepts
//!
//! - **Tasks**: units of trackable work with a forward-only lifecycle
//!   (`New -> Started -> Review -> Completed`)
//! - **Time accounting**: elapsed seconds against a creation-time estimate,
//!   frozen at completion
//! - **Audit log**: immutable, attributed entries for every tracked field
//!   change, distinct from user-authored notes
//! - **Reports**: per-filter KPIs (count, average completion time, on-time
//!   percentage) over a snapshot
//!
//! # Module Organization
//!
//! - `cli`: command-line interface using clap
//! - `config`: configuration loading from `timeboard.toml`
//! - `error`: error types and result aliases
//! - `board`: mutation/query entry points wiring the components together
//! - `repository`: in-memory task collection, the single source of truth
//! - `lifecycle`: status transition rules and their side effects
//! - `audit`: diff-based audit log generation
//! - `timeclock`: HH:MM:SS handling and on-time evaluation
//! - `report`: read-side aggregation and archive filtering
//! - `events`: mutation event output for external integrations
//! - `actor`: current-user resolution
//! - `user`: user reference data
//! - `storage`: the durable board blob
//! - `lock`: file locking and atomic writes for concurrency safety

pub mod actor;
pub mod audit;
pub mod board;
pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod lifecycle;
pub mod lock;
pub mod output;
pub mod report;
pub mod repository;
pub mod storage;
pub mod task;
pub mod timeclock;
pub mod user;

pub use error::{Error, Result};
