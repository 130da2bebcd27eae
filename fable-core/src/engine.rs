//! engine.rs
//! Resolution façade: action id + payload in, bounded outcome out.

use once_cell::sync::OnceCell;
use serde_json::Value;
use thiserror::Error;

use contracts::tables::{DomainTables, TableError};
use contracts::{bind_params, ActionId, ContractViolation, Domain, Outcome, ParamSpec};

use crate::handlers;
use crate::random::{RandomError, RandomSource};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    #[error("unknown action `{0}`")]
    UnknownAction(String),
    #[error("invalid params for {action}: `{field}` {reason}")]
    InvalidParams { action: ActionId, field: String, reason: String },
    /// A handler or table broke a primitive's contract. A defect, not bad input.
    #[error("{action} handler defect: {source}")]
    Defect {
        action: ActionId,
        #[source]
        source: RandomError,
    },
}

impl ResolveError {
    fn invalid(action: ActionId, violation: ContractViolation) -> Self {
        ResolveError::InvalidParams { action, field: violation.field, reason: violation.reason }
    }

    /// The offending field for `InvalidParams`.
    pub fn field(&self) -> Option<&str> {
        match self {
            ResolveError::InvalidParams { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Catalog entry describing one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionInfo {
    pub id: ActionId,
    pub domain: Domain,
    pub contract: &'static [ParamSpec],
}

impl From<ActionId> for ActionInfo {
    fn from(id: ActionId) -> Self {
        Self { id, domain: id.domain(), contract: id.contract() }
    }
}

/// Stateless resolver over one immutable set of balance tables.
///
/// Safe to share across threads; each call brings its own randomness source.
#[derive(Debug, Clone)]
pub struct Resolver {
    tables: DomainTables,
}

impl Resolver {
    pub fn new(tables: DomainTables) -> Self {
        tracing::info!(fingerprint = tables.fingerprint(), "resolver ready");
        Self { tables }
    }

    /// Resolver over the tables compiled into the contracts crate.
    pub fn embedded() -> Result<Self, TableError> {
        Ok(Self::new(DomainTables::embedded()?))
    }

    /// Process-wide resolver over the embedded tables, parsed on first use.
    pub fn shared() -> Result<&'static Resolver, TableError> {
        static SHARED: OnceCell<Resolver> = OnceCell::new();
        SHARED.get_or_try_init(Self::embedded)
    }

    pub fn tables(&self) -> &DomainTables {
        &self.tables
    }

    /// All resolvable actions, in declaration order.
    pub fn actions(&self) -> impl Iterator<Item = ActionInfo> {
        ActionId::ALL.iter().copied().map(ActionInfo::from)
    }

    pub fn describe(&self, action_id: &str) -> Option<ActionInfo> {
        ActionId::from_label(action_id).map(ActionInfo::from)
    }

    /// Resolve by wire identifier.
    pub fn resolve(
        &self,
        action_id: &str,
        params: &Value,
        rng: &mut dyn RandomSource,
    ) -> Result<Outcome, ResolveError> {
        let Some(action) = ActionId::from_label(action_id) else {
            tracing::warn!(action_id, "rejected unknown action");
            return Err(ResolveError::UnknownAction(action_id.to_string()));
        };
        self.resolve_action(action, params, rng)
    }

    /// Resolve a known action. The payload is validated before any draw.
    pub fn resolve_action(
        &self,
        action: ActionId,
        params: &Value,
        rng: &mut dyn RandomSource,
    ) -> Result<Outcome, ResolveError> {
        tracing::debug!(action = %action, domain = %action.domain(), "resolving");
        let outcome = self.dispatch(action, params, rng);
        match &outcome {
            Err(ResolveError::InvalidParams { field, reason, .. }) => {
                tracing::warn!(action = %action, field = %field, reason = %reason, "rejected params");
            }
            Err(ResolveError::Defect { source, .. }) => {
                tracing::error!(action = %action, error = %source, "handler broke a primitive contract");
            }
            _ => {}
        }
        outcome
    }

    fn dispatch(
        &self,
        action: ActionId,
        params: &Value,
        rng: &mut dyn RandomSource,
    ) -> Result<Outcome, ResolveError> {
        let t = &self.tables;
        let bind_err = |v: ContractViolation| ResolveError::invalid(action, v);
        let defect = |source: RandomError| ResolveError::Defect { action, source };

        let outcome = match action {
            ActionId::SearchLocation => {
                let p = bind_params(action, params).map_err(bind_err)?;
                Outcome::SearchLocation(handlers::search_location(&t.survival, &p, rng).map_err(defect)?)
            }
            ActionId::CombatZombies => {
                let p = bind_params(action, params).map_err(bind_err)?;
                Outcome::CombatZombies(handlers::combat_zombies(&t.survival, &p, rng).map_err(defect)?)
            }
            ActionId::FortifyLocation => {
                let p = bind_params(action, params).map_err(bind_err)?;
                Outcome::FortifyLocation(handlers::fortify_location(&t.survival, &p, rng).map_err(defect)?)
            }
            ActionId::ResearchMarketData => {
                let p = bind_params(action, params).map_err(bind_err)?;
                Outcome::ResearchMarketData(
                    handlers::research_market_data(&t.negotiation, &p, rng).map_err(defect)?,
                )
            }
            ActionId::PresentCounterOffer => {
                let p = bind_params(action, params).map_err(bind_err)?;
                Outcome::PresentCounterOffer(
                    handlers::present_counter_offer(&t.negotiation, &p, rng).map_err(defect)?,
                )
            }
            ActionId::ProposeCompTradeoffs => {
                let p = bind_params(action, params).map_err(bind_err)?;
                Outcome::ProposeCompTradeoffs(
                    handlers::propose_comp_tradeoffs(&t.negotiation, &p, rng).map_err(defect)?,
                )
            }
            ActionId::RepairSystem => {
                let p = bind_params(action, params).map_err(bind_err)?;
                Outcome::RepairSystem(handlers::repair_system(&t.crisis, &p, rng).map_err(defect)?)
            }
            ActionId::RationResources => {
                let p = bind_params(action, params).map_err(bind_err)?;
                Outcome::RationResources(handlers::ration_resources(&t.crisis, &p))
            }
            ActionId::AttemptEmergencyContact => {
                let p = bind_params(action, params).map_err(bind_err)?;
                Outcome::AttemptEmergencyContact(
                    handlers::attempt_emergency_contact(&t.crisis, &p, rng).map_err(defect)?,
                )
            }
        };
        Ok(outcome)
    }
}
