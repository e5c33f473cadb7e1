//! Reusable observers for the Flock framework.
//!
//! This crate provides [`Observer`] implementations and capability traits that
//! work with any solver whose events and actions implement them.
//!
//! # Observers
//!
//! - [`CancelToken`]: stops a run from another thread or from inside the
//!   objective
//! - [`History`]: records the best objective per generation
//! - [`TracingObserver`]: logs progress through `tracing`
//!
//! # Modules
//!
//! - [`traits`]: capability traits for cross-solver observers
//!   ([`HasGeneration`], [`HasObjective`], [`CanStopEarly`])
//!
//! [`Observer`]: flock_core::Observer
//! [`HasGeneration`]: traits::HasGeneration
//! [`HasObjective`]: traits::HasObjective
//! [`CanStopEarly`]: traits::CanStopEarly

pub mod traits;

mod cancel;
mod history;
mod log;

pub use cancel::CancelToken;
pub use history::{Entry, History};
pub use log::TracingObserver;
