use serde::{Deserialize, Serialize};

use crate::api::{ActionId, Confidence, ItemType, SystemStatus, TradeoffKind};

/// A looted stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoundItem {
    pub item_type: ItemType,
    /// 1..=6 depending on thoroughness.
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutcome {
    pub items: Vec<FoundItem>,
    pub zombies_attracted: bool,
    /// Zero unless `zombies_attracted`.
    pub zombie_count: u32,
    pub health_cost: u32,
    /// Hours.
    pub time_spent: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatOutcome {
    pub zombies_killed: u32,
    pub health_lost: u32,
    pub ammo_used: u32,
    pub success: bool,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FortifyOutcome {
    /// 0..=100.
    pub fortification_level: u32,
    pub materials_used: u32,
    pub time_spent: u32,
    /// Percent, never above `fortification_level`.
    pub zombie_attack_reduction: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketDataOutcome {
    pub average_salary: i64,
    pub low_range: i64,
    pub high_range: i64,
    pub p25: i64,
    pub p75: i64,
    pub confidence_level: Confidence,
    pub data_points: u32,
    pub sources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterOfferOutcome {
    /// Always within `[currentOffer, max(currentOffer, maxBudget)]`.
    pub new_offer: i64,
    pub relationship_change: i32,
    pub leverage_used: bool,
    pub recruiter_response: String,
    pub offer_accepted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: TradeoffKind,
    pub description: String,
    pub estimated_value: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeoffOutcome {
    pub gap: i64,
    pub suggestions: Vec<Suggestion>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepairOutcome {
    pub repair_success: bool,
    pub system_status: SystemStatus,
    pub power_consumed: u32,
    pub time_spent: u32,
    pub morale_impact: i32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RationOutcome {
    /// Percent reductions in daily consumption.
    pub oxygen_reduction: u32,
    pub power_reduction: u32,
    pub food_reduction: u32,
    pub morale_impact: i32,
    pub days_extended: u32,
    pub crew_response: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactOutcome {
    pub contact_established: bool,
    /// Implies `contact_established`.
    pub response_received: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_arrival_days: Option<u32>,
    pub power_used: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responder: Option<String>,
    pub message: String,
}

/// Result of resolving one action, tagged with the action identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Outcome {
    SearchLocation(SearchOutcome),
    CombatZombies(CombatOutcome),
    FortifyLocation(FortifyOutcome),
    ResearchMarketData(MarketDataOutcome),
    PresentCounterOffer(CounterOfferOutcome),
    ProposeCompTradeoffs(TradeoffOutcome),
    RepairSystem(RepairOutcome),
    RationResources(RationOutcome),
    AttemptEmergencyContact(ContactOutcome),
}

impl Outcome {
    /// Return the action this outcome answers.
    pub fn action(&self) -> ActionId {
        match self {
            Outcome::SearchLocation(_) => ActionId::SearchLocation,
            Outcome::CombatZombies(_) => ActionId::CombatZombies,
            Outcome::FortifyLocation(_) => ActionId::FortifyLocation,
            Outcome::ResearchMarketData(_) => ActionId::ResearchMarketData,
            Outcome::PresentCounterOffer(_) => ActionId::PresentCounterOffer,
            Outcome::ProposeCompTradeoffs(_) => ActionId::ProposeCompTradeoffs,
            Outcome::RepairSystem(_) => ActionId::RepairSystem,
            Outcome::RationResources(_) => ActionId::RationResources,
            Outcome::AttemptEmergencyContact(_) => ActionId::AttemptEmergencyContact,
        }
    }
}
