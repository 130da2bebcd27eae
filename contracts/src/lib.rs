// Public modules so fable-core can use them
pub mod api;
pub mod assets;
pub mod catalog;
pub mod evaluator;
pub mod normalize;
pub mod outcome;
pub mod tables;
pub mod types;

pub use api::{
    ActionId, Confidence, Domain, ItemType, Justification, Location, Priority, RationLevel,
    StationSystem, Strategy, SystemStatus, Thoroughness, Tone, TradeoffKind,
};
pub use assets::{default_table_text, read_verified_or_embedded, write_default_tables, TableOrigin};
pub use catalog::{Scenario, ScenarioCatalog};
pub use evaluator::{bind_params, evaluate_params, validate_params, ContractViolation, EvaluationResult};
pub use normalize::for_lookup as normalize_for_lookup;
pub use outcome::{
    CombatOutcome, ContactOutcome, CounterOfferOutcome, FortifyOutcome, FoundItem,
    MarketDataOutcome, Outcome, RationOutcome, RepairOutcome, SearchOutcome, Suggestion,
    TradeoffOutcome,
};
pub use tables::{DomainTables, TableError};
pub use types::{
    CombatParams, Constraint, ContactParams, CounterOfferParams, FortifyParams, MarketDataParams,
    ParamSpec, RationParams, RepairParams, SearchParams, TradeoffParams,
};

/// --- Pure Rust API for fable-core ---
pub fn evaluate_params_json(action_id: &str, params_json: &str) -> Result<EvaluationResult, String> {
    let action = ActionId::from_label(action_id).ok_or_else(|| format!("unknown action `{action_id}`"))?;
    let params: serde_json::Value = serde_json::from_str(params_json).map_err(|e| e.to_string())?;
    Ok(evaluate_params(action, &params))
}
