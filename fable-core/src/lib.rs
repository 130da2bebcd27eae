//! Action resolution for narrated interactive fiction.
//!
//! A [`Resolver`] takes an action identifier and a JSON payload, checks the
//! payload against the action's contract, and returns a structured outcome
//! whose shape is fixed and whose values come from the balance tables and
//! an injected [`RandomSource`].

pub mod config;
pub mod engine;
pub mod handlers;
pub mod random;

pub use config::EngineConfig;
pub use engine::{ActionInfo, ResolveError, Resolver};
pub use random::{
    calculate_damage, random_in_range, success_check, uniform, weighted_random, EntropySource,
    RandomError, RandomSource, SeededSource,
};

pub use contracts::{ActionId, Domain, DomainTables, Outcome};
