//! Adaptive Large Neighbourhood Search (ALNS).
//!
//! ALNS iteratively destroys and repairs a solution using a portfolio of
//! operators whose selection adapts to past performance. This crate
//! provides the orchestration loop and the pluggable strategies around it:
//!
//! - **Operator selection** ([`select`]): uniform, roulette wheel with
//!   decaying scores, and segment-based roulette wheel.
//! - **Acceptance** ([`accept`]): hill climbing, simulated annealing,
//!   record-to-record travel, great deluge, late acceptance.
//! - **Stopping** ([`stop`]): iteration and runtime budgets, stall
//!   detection, and any-of composition.
//!
//! The solution representation is supplied by the caller through the
//! [`State`] trait. All randomness flows from the generator owned by
//! [`Alns`], so a run is reproducible from its seed.
//!
//! # Architecture
//!
//! The search is single-threaded and synchronous. Strategies take
//! `&mut dyn RngCore` so they can be boxed and composed; independent
//! searches need independent [`Alns`] instances.
//!
//! # References
//!
//! Ropke & Pisinger (2006), "An Adaptive Large Neighborhood Search Heuristic
//! for the Pickup and Delivery Problem with Time Windows"

pub mod accept;
pub mod error;
pub mod result;
pub mod select;
pub mod stop;

mod runner;
mod types;

pub use error::{AlnsError, BoxError, OperatorKind};
pub use result::{AlnsResult, OutcomeCounts, Statistics};
pub use runner::Alns;
pub use types::{OperatorFn, OperatorPair, Outcome, OutcomeCallback, State};
