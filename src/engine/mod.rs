//! Effect registry and dispatcher.
//!
//! The `Engine` is the composition point of the effect system. It owns a
//! run's picks and every tracker that effects read or write, and it is the
//! only thing gameplay code talks to while a moment is running:
//!
//! 1. `pick_effect` grants a copy: modifiers fold in, trigger bindings are
//!    added in pick order, synergy tiers are checked
//! 2. `emit` raises an event: the give-and-go detector updates, then every
//!    bound callback whose condition holds runs and counts as a proc
//! 3. `modified_stat` reads the result
//!
//! ## Determinism
//!
//! The engine never reads a clock. Every time-dependent call takes the
//! caller's `GameTime`, and chance rolls come from a seeded `GameRng`, so
//! replaying the same seed, picks and (event, time) log reproduces the
//! same run.
//!
//! ## Scopes
//!
//! - `begin_moment` clears moment-scoped state (procs, buffs, pending
//!   give-and-go, slow motion)
//! - `fresh_run` builds a brand-new engine for the next run

mod dispatcher;
mod simulation;

pub use dispatcher::{Binding, BindingId, BindingRegistry};
pub use simulation::Engine;
