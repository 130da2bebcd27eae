use serde::{Deserialize, Serialize};

use crate::api::{
    ActionId, Justification, Location, Priority, RationLevel, StationSystem, Strategy,
    SystemStatus, Thoroughness, Tone,
};

/// Constraint attached to one declared parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// String drawn from a closed label set.
    OneOf(&'static [&'static str]),
    /// Integer inside a closed range.
    Range { min: i64, max: i64 },
    /// Non-empty free text. Only used for keys of open-text tables.
    Text { max_len: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub constraint: Constraint,
}

const fn one_of(name: &'static str, labels: &'static [&'static str]) -> ParamSpec {
    ParamSpec { name, constraint: Constraint::OneOf(labels) }
}

const fn range(name: &'static str, min: i64, max: i64) -> ParamSpec {
    ParamSpec { name, constraint: Constraint::Range { min, max } }
}

const fn text(name: &'static str) -> ParamSpec {
    ParamSpec { name, constraint: Constraint::Text { max_len: 120 } }
}

/// Upper bound accepted for any salary-like figure.
pub const MAX_SALARY: i64 = 10_000_000;

/// Counts bind into `u32` fields; the contract only caps them at that width.
const MAX_COUNT: i64 = u32::MAX as i64;

const SEARCH_LOCATION: &[ParamSpec] = &[
    one_of("location", Location::LABELS),
    one_of("thoroughness", Thoroughness::LABELS),
];

const COMBAT_ZOMBIES: &[ParamSpec] = &[
    one_of("strategy", Strategy::LABELS),
    range("ammoToUse", 0, MAX_COUNT),
    range("zombieCount", 1, MAX_COUNT),
];

const FORTIFY_LOCATION: &[ParamSpec] = &[range("materialsToUse", 1, 20)];

const RESEARCH_MARKET_DATA: &[ParamSpec] = &[
    text("jobTitle"),
    range("yearsExperience", 0, MAX_COUNT),
    text("location"),
];

const PRESENT_COUNTER_OFFER: &[ParamSpec] = &[
    range("offeredSalary", 0, MAX_SALARY),
    one_of("justification", Justification::LABELS),
    one_of("tone", Tone::LABELS),
    range("currentOffer", 0, MAX_SALARY),
    range("maxBudget", 0, MAX_SALARY),
];

const PROPOSE_COMP_TRADEOFFS: &[ParamSpec] = &[
    range("currentOffer", 0, MAX_SALARY),
    range("targetSalary", 0, MAX_SALARY),
    range("maxBudget", 0, MAX_SALARY),
    one_of("priority", Priority::LABELS),
];

const REPAIR_SYSTEM: &[ParamSpec] = &[
    one_of("system", StationSystem::LABELS),
    range("powerAllocated", 0, 50),
];

const RATION_RESOURCES: &[ParamSpec] = &[one_of("rationLevel", RationLevel::LABELS)];

const ATTEMPT_EMERGENCY_CONTACT: &[ParamSpec] = &[
    range("powerToUse", 5, 20),
    one_of("communicationsStatus", SystemStatus::LABELS),
];

impl ActionId {
    /// Declared input contract for this action.
    pub fn contract(&self) -> &'static [ParamSpec] {
        match self {
            ActionId::SearchLocation => SEARCH_LOCATION,
            ActionId::CombatZombies => COMBAT_ZOMBIES,
            ActionId::FortifyLocation => FORTIFY_LOCATION,
            ActionId::ResearchMarketData => RESEARCH_MARKET_DATA,
            ActionId::PresentCounterOffer => PRESENT_COUNTER_OFFER,
            ActionId::ProposeCompTradeoffs => PROPOSE_COMP_TRADEOFFS,
            ActionId::RepairSystem => REPAIR_SYSTEM,
            ActionId::RationResources => RATION_RESOURCES,
            ActionId::AttemptEmergencyContact => ATTEMPT_EMERGENCY_CONTACT,
        }
    }
}

// ----------------- typed parameters -----------------
//
// Field names mirror the contract entries above; binding only ever happens
// after the contract has accepted the payload.

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SearchParams {
    pub location: Location,
    pub thoroughness: Thoroughness,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CombatParams {
    pub strategy: Strategy,
    pub ammo_to_use: u32,
    pub zombie_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FortifyParams {
    pub materials_to_use: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MarketDataParams {
    pub job_title: String,
    pub years_experience: u32,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CounterOfferParams {
    /// What the player asks for.
    pub offered_salary: i64,
    pub justification: Justification,
    pub tone: Tone,
    pub current_offer: i64,
    pub max_budget: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TradeoffParams {
    pub current_offer: i64,
    pub target_salary: i64,
    pub max_budget: i64,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RepairParams {
    pub system: StationSystem,
    pub power_allocated: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RationParams {
    pub ration_level: RationLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ContactParams {
    pub power_to_use: u32,
    pub communications_status: SystemStatus,
}
