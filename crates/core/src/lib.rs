//! Core traits and types for the Flock framework.
//!
//! This crate defines the shared abstractions that the swarm solver and its
//! observers build on:
//!
//! - [`Objective`]: a scalar fitness function over a parameter vector
//! - [`Direction`]: whether the objective is minimized or maximized
//! - [`Observer`]: receives solver events and optionally returns control actions

mod direction;
mod objective;
mod observer;

pub use direction::Direction;
pub use objective::{FnObjective, Infeasible, Objective};
pub use observer::Observer;
