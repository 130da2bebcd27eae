// src/handlers/mod.rs

pub mod crisis;       // repairs, rations, distress calls
pub mod negotiation;  // market data, counter offers, tradeoffs
pub mod survival;     // loot, combat, fortification

pub use crisis::{attempt_emergency_contact, ration_resources, repair_system};
pub use negotiation::{present_counter_offer, propose_comp_tradeoffs, research_market_data};
pub use survival::{combat_zombies, fortify_location, search_location};
