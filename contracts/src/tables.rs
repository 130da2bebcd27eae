//! Balance tables for the three scenario domains.
//!
//! Tables are plain data parsed from TOML (embedded copies live in `assets/`).
//! Enumerated keys are struct fields, so a table file that forgets a location,
//! a strategy or a system fails to parse instead of failing mid-resolution.
//! Only the open-text maps (job titles, cities) carry a default.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::api::{
    Confidence, ItemType, Justification, Location, Priority, RationLevel, StationSystem,
    Strategy, SystemStatus, Thoroughness, Tone, TradeoffKind,
};
use crate::assets::{
    CRISIS_TOML, CRISIS_TOML_NAME, NEGOTIATION_TOML, NEGOTIATION_TOML_NAME, SURVIVAL_TOML,
    SURVIVAL_TOML_NAME,
};
use crate::normalize::for_lookup;
use crate::types::MAX_SALARY;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to parse {file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid table entry {path}: {reason}")]
    Invalid { path: String, reason: String },
}

fn invalid(path: impl Into<String>, reason: impl Into<String>) -> TableError {
    TableError::Invalid { path: path.into(), reason: reason.into() }
}

/// Inclusive integer range, written `[min, max]` in table files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds(pub i64, pub i64);

impl Bounds {
    pub fn min(&self) -> i64 {
        self.0
    }

    pub fn max(&self) -> i64 {
        self.1
    }

    fn check(&self, path: &str) -> Result<(), TableError> {
        if self.0 > self.1 {
            return Err(invalid(path, format!("range [{}, {}] is reversed", self.0, self.1)));
        }
        Ok(())
    }

    /// Ordered, and both ends inside `[lo, hi]`: the width of the outcome field it feeds.
    fn check_within(&self, path: &str, lo: i64, hi: i64) -> Result<(), TableError> {
        self.check(path)?;
        if self.0 < lo || self.1 > hi {
            return Err(invalid(
                path,
                format!("range [{}, {}] must lie within [{lo}, {hi}]", self.0, self.1),
            ));
        }
        Ok(())
    }
}

const U32_MAX: i64 = u32::MAX as i64;
const I32_MIN: i64 = i32::MIN as i64;
const I32_MAX: i64 = i32::MAX as i64;

/// Half-open float range `[min, max)`, written `[min, max]` in table files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloatBounds(pub f64, pub f64);

impl FloatBounds {
    pub fn min(&self) -> f64 {
        self.0
    }

    pub fn max(&self) -> f64 {
        self.1
    }
}

fn check_probability(value: f64, path: &str) -> Result<(), TableError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(invalid(path, format!("probability {value} is outside [0, 1]")));
    }
    Ok(())
}

// ============================================================================
// Survival
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttractionTable {
    pub base_chance: f64,
    pub thorough_multiplier: f64,
    pub max_chance: f64,
    pub horde_size: Bounds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchProfile {
    pub quantity: Bounds,
    pub health_cost: Bounds,
    pub time_spent: Bounds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchProfiles {
    pub quick: SearchProfile,
    pub thorough: SearchProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootEntry {
    pub item: ItemType,
    pub probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootTable {
    pub gas_station: Vec<LootEntry>,
    pub pharmacy: Vec<LootEntry>,
    pub grocery_store: Vec<LootEntry>,
    pub police_station: Vec<LootEntry>,
    pub hardware_store: Vec<LootEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyProfile {
    pub accuracy: f64,
    pub kill_jitter: Bounds,
    pub damage_per_zombie: i64,
    pub damage_variance: i64,
    pub damage_chance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatTable {
    /// Most health a single fight can cost.
    pub max_health_lost: u32,
    pub aggressive: StrategyProfile,
    pub defensive: StrategyProfile,
    pub stealth: StrategyProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FortifyTable {
    pub points_per_material: u32,
    pub efficiency: FloatBounds,
    pub max_level: u32,
    pub attack_reduction_ratio: f64,
    pub materials_per_hour: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurvivalTables {
    pub attraction: AttractionTable,
    pub search: SearchProfiles,
    pub loot: LootTable,
    pub combat: CombatTable,
    pub fortify: FortifyTable,
}

impl SurvivalTables {
    pub fn loot(&self, location: Location) -> &[LootEntry] {
        match location {
            Location::GasStation => &self.loot.gas_station,
            Location::Pharmacy => &self.loot.pharmacy,
            Location::GroceryStore => &self.loot.grocery_store,
            Location::PoliceStation => &self.loot.police_station,
            Location::HardwareStore => &self.loot.hardware_store,
        }
    }

    pub fn search(&self, thoroughness: Thoroughness) -> &SearchProfile {
        match thoroughness {
            Thoroughness::Quick => &self.search.quick,
            Thoroughness::Thorough => &self.search.thorough,
        }
    }

    pub fn strategy(&self, strategy: Strategy) -> &StrategyProfile {
        match strategy {
            Strategy::Aggressive => &self.combat.aggressive,
            Strategy::Defensive => &self.combat.defensive,
            Strategy::Stealth => &self.combat.stealth,
        }
    }

    /// Chance that a search of the given depth draws a horde, already capped.
    pub fn attraction_chance(&self, thoroughness: Thoroughness) -> f64 {
        let a = &self.attraction;
        let multiplier = match thoroughness {
            Thoroughness::Quick => 1.0,
            Thoroughness::Thorough => a.thorough_multiplier,
        };
        (a.base_chance * multiplier).min(a.max_chance)
    }

    pub fn validate(&self) -> Result<(), TableError> {
        let a = &self.attraction;
        check_probability(a.base_chance, "survival.attraction.base_chance")?;
        check_probability(a.max_chance, "survival.attraction.max_chance")?;
        if a.thorough_multiplier < 0.0 {
            return Err(invalid("survival.attraction.thorough_multiplier", "must not be negative"));
        }
        a.horde_size.check_within("survival.attraction.horde_size", 1, U32_MAX)?;

        for t in Thoroughness::ALL {
            let p = self.search(*t);
            let base = format!("survival.search.{t}");
            p.quantity.check_within(&format!("{base}.quantity"), 1, U32_MAX)?;
            p.health_cost.check_within(&format!("{base}.health_cost"), 0, U32_MAX)?;
            p.time_spent.check_within(&format!("{base}.time_spent"), 0, U32_MAX)?;
        }

        for loc in Location::ALL {
            for entry in self.loot(*loc) {
                check_probability(entry.probability, &format!("survival.loot.{loc}.{}", entry.item))?;
            }
        }

        for s in Strategy::ALL {
            let p = self.strategy(*s);
            let base = format!("survival.combat.{s}");
            check_probability(p.accuracy, &format!("{base}.accuracy"))?;
            check_probability(p.damage_chance, &format!("{base}.damage_chance"))?;
            p.kill_jitter.check(&format!("{base}.kill_jitter"))?;
            if p.damage_per_zombie < 0 {
                return Err(invalid(base, "damage_per_zombie must not be negative"));
            }
        }

        if self.combat.max_health_lost > 100 {
            return Err(invalid("survival.combat.max_health_lost", "health is a percentage, at most 100"));
        }

        let f = &self.fortify;
        if f.efficiency.min() < 0.0 || f.efficiency.min() > f.efficiency.max() {
            return Err(invalid("survival.fortify.efficiency", "range must be ordered and non-negative"));
        }
        check_probability(f.attack_reduction_ratio, "survival.fortify.attack_reduction_ratio")?;
        if f.materials_per_hour == 0 {
            return Err(invalid("survival.fortify.materials_per_hour", "must be positive"));
        }
        Ok(())
    }
}

// ============================================================================
// Negotiation
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerConfidence<T> {
    pub high: T,
    pub medium: T,
    pub low: T,
}

impl<T> PerConfidence<T> {
    pub fn get(&self, confidence: Confidence) -> &T {
        match confidence {
            Confidence::High => &self.high,
            Confidence::Medium => &self.medium,
            Confidence::Low => &self.low,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketTable {
    pub default_base_salary: i64,
    pub default_location_multiplier: f64,
    pub experience_step: f64,
    pub range_spread: f64,
    pub percentile_spread: f64,
    pub base_salaries: BTreeMap<String, i64>,
    pub location_multipliers: BTreeMap<String, f64>,
    pub data_points: PerConfidence<Bounds>,
    pub sources: PerConfidence<Vec<String>>,
}

/// A table hit, or the documented default when the key is unknown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lookup<T> {
    pub value: T,
    pub recognized: bool,
}

impl MarketTable {
    /// Base salary for a free-text job title.
    pub fn base_salary(&self, job_title: &str) -> Lookup<i64> {
        match self.base_salaries.get(&for_lookup(job_title)) {
            Some(v) => Lookup { value: *v, recognized: true },
            None => Lookup { value: self.default_base_salary, recognized: false },
        }
    }

    /// Cost-of-market multiplier for a free-text city.
    pub fn location_multiplier(&self, location: &str) -> Lookup<f64> {
        match self.location_multipliers.get(&for_lookup(location)) {
            Some(v) => Lookup { value: *v, recognized: true },
            None => Lookup { value: self.default_location_multiplier, recognized: false },
        }
    }

    pub fn experience_multiplier(&self, years: u32) -> f64 {
        1.0 + f64::from(years) * self.experience_step
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JustificationTable {
    pub market_research: Bounds,
    pub competing_offer: Bounds,
    pub experience: Bounds,
    pub unique_skills: Bounds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToneTable {
    pub collaborative: i32,
    pub confident: i32,
    pub firm: i32,
    pub aggressive: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterOfferTable {
    pub acceptance_ratio: f64,
    pub response_thresholds: [i64; 3],
    pub responses: [String; 4],
}

impl CounterOfferTable {
    /// Recruiter line for a given raise over the current offer.
    pub fn response_for(&self, increase: i64) -> &str {
        let bucket = self
            .response_thresholds
            .iter()
            .position(|t| increase < *t)
            .unwrap_or(self.response_thresholds.len());
        &self.responses[bucket]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeoffSpec {
    pub description: String,
    pub value: Bounds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeoffKinds {
    pub signing_bonus: TradeoffSpec,
    pub equity: TradeoffSpec,
    pub extra_pto: TradeoffSpec,
    pub remote_flexibility: TradeoffSpec,
    pub professional_development: TradeoffSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityTable {
    pub cash: [TradeoffKind; 3],
    pub equity: [TradeoffKind; 3],
    pub work_life_balance: [TradeoffKind; 3],
    pub growth: [TradeoffKind; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeoffTable {
    pub kinds: TradeoffKinds,
    pub priorities: PriorityTable,
}

impl TradeoffTable {
    pub fn spec(&self, kind: TradeoffKind) -> &TradeoffSpec {
        match kind {
            TradeoffKind::SigningBonus => &self.kinds.signing_bonus,
            TradeoffKind::Equity => &self.kinds.equity,
            TradeoffKind::ExtraPto => &self.kinds.extra_pto,
            TradeoffKind::RemoteFlexibility => &self.kinds.remote_flexibility,
            TradeoffKind::ProfessionalDevelopment => &self.kinds.professional_development,
        }
    }

    pub fn for_priority(&self, priority: Priority) -> &[TradeoffKind; 3] {
        match priority {
            Priority::Cash => &self.priorities.cash,
            Priority::Equity => &self.priorities.equity,
            Priority::WorkLifeBalance => &self.priorities.work_life_balance,
            Priority::Growth => &self.priorities.growth,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NegotiationTables {
    pub market: MarketTable,
    pub justifications: JustificationTable,
    pub tones: ToneTable,
    pub counter_offer: CounterOfferTable,
    pub tradeoffs: TradeoffTable,
}

impl NegotiationTables {
    pub fn increase_range(&self, justification: Justification) -> Bounds {
        let j = &self.justifications;
        match justification {
            Justification::MarketResearch => j.market_research,
            Justification::CompetingOffer => j.competing_offer,
            Justification::Experience => j.experience,
            Justification::UniqueSkills => j.unique_skills,
        }
    }

    pub fn relationship_delta(&self, tone: Tone) -> i32 {
        let t = &self.tones;
        match tone {
            Tone::Collaborative => t.collaborative,
            Tone::Confident => t.confident,
            Tone::Firm => t.firm,
            Tone::Aggressive => t.aggressive,
        }
    }

    pub fn validate(&self) -> Result<(), TableError> {
        let m = &self.market;
        if m.default_base_salary <= 0 || m.base_salaries.values().any(|v| *v <= 0) {
            return Err(invalid("negotiation.market.base_salaries", "salaries must be positive"));
        }
        if m.default_location_multiplier <= 0.0 || m.location_multipliers.values().any(|v| *v <= 0.0) {
            return Err(invalid("negotiation.market.location_multipliers", "multipliers must be positive"));
        }
        for key in m.base_salaries.keys().chain(m.location_multipliers.keys()) {
            if *key != for_lookup(key) {
                return Err(invalid(
                    format!("negotiation.market.{key}"),
                    "keys must already be in normalized form",
                ));
            }
        }
        for c in Confidence::ALL {
            m.data_points
                .get(*c)
                .check_within(&format!("negotiation.market.data_points.{c}"), 0, U32_MAX)?;
        }
        for j in Justification::ALL {
            let r = self.increase_range(*j);
            r.check(&format!("negotiation.justifications.{j}"))?;
            if r.min() < 0 {
                return Err(invalid(format!("negotiation.justifications.{j}"), "increase must not be negative"));
            }
        }
        let thresholds = &self.counter_offer.response_thresholds;
        if thresholds.windows(2).any(|w| w[0] > w[1]) {
            return Err(invalid("negotiation.counter_offer.response_thresholds", "must be ascending"));
        }
        for k in TradeoffKind::ALL {
            let spec = self.tradeoffs.spec(*k);
            spec.value
                .check_within(&format!("negotiation.tradeoffs.kinds.{k}.value"), 0, MAX_SALARY)?;
        }
        Ok(())
    }
}

// ============================================================================
// Crisis
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerStatus<T> {
    pub online: T,
    pub degraded: T,
    pub offline: T,
}

impl<T> PerStatus<T> {
    pub fn get(&self, status: SystemStatus) -> &T {
        match status {
            SystemStatus::Online => &self.online,
            SystemStatus::Degraded => &self.degraded,
            SystemStatus::Offline => &self.offline,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequiredPower {
    pub life_support: u32,
    pub communications: u32,
    pub navigation: u32,
    pub propulsion: u32,
    pub reactor_cooling: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairTable {
    pub max_success_chance: f64,
    pub degraded_threshold: f64,
    pub required_power: RequiredPower,
    pub morale: PerStatus<Bounds>,
    pub time_spent: PerStatus<Bounds>,
}

impl RepairTable {
    pub fn required_power(&self, system: StationSystem) -> u32 {
        let r = &self.required_power;
        match system {
            StationSystem::LifeSupport => r.life_support,
            StationSystem::Communications => r.communications,
            StationSystem::Navigation => r.navigation,
            StationSystem::Propulsion => r.propulsion,
            StationSystem::ReactorCooling => r.reactor_cooling,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RationEffect {
    pub oxygen_reduction: u32,
    pub power_reduction: u32,
    pub food_reduction: u32,
    pub morale_delta: i32,
    pub days_extended: u32,
    pub response: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RationTable {
    pub light: RationEffect,
    pub moderate: RationEffect,
    pub severe: RationEffect,
}

impl RationTable {
    pub fn get(&self, level: RationLevel) -> &RationEffect {
        match level {
            RationLevel::Light => &self.light,
            RationLevel::Moderate => &self.moderate,
            RationLevel::Severe => &self.severe,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Responder {
    pub name: String,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommsTable {
    pub min_power: u32,
    pub power_bonus_per_unit: f64,
    pub max_chance: f64,
    pub response_chance: f64,
    pub help_arrival_days: Bounds,
    pub base_chance: PerStatus<f64>,
    pub responders: Vec<Responder>,
}

impl CommsTable {
    /// Contact chance for the given spend and link state, already capped.
    pub fn contact_chance(&self, status: SystemStatus, power: u32) -> f64 {
        let extra = f64::from(power.saturating_sub(self.min_power));
        (self.base_chance.get(status) + extra * self.power_bonus_per_unit).min(self.max_chance)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrisisTables {
    pub repair: RepairTable,
    pub rations: RationTable,
    pub comms: CommsTable,
}

impl CrisisTables {
    pub fn validate(&self) -> Result<(), TableError> {
        let r = &self.repair;
        check_probability(r.max_success_chance, "crisis.repair.max_success_chance")?;
        check_probability(r.degraded_threshold, "crisis.repair.degraded_threshold")?;
        for s in StationSystem::ALL {
            if r.required_power(*s) == 0 {
                return Err(invalid(format!("crisis.repair.required_power.{s}"), "must be positive"));
            }
        }
        for st in SystemStatus::ALL {
            r.morale.get(*st).check_within(&format!("crisis.repair.morale.{st}"), I32_MIN, I32_MAX)?;
            r.time_spent
                .get(*st)
                .check_within(&format!("crisis.repair.time_spent.{st}"), 0, U32_MAX)?;
            check_probability(*self.comms.base_chance.get(*st), &format!("crisis.comms.base_chance.{st}"))?;
        }
        let c = &self.comms;
        check_probability(c.max_chance, "crisis.comms.max_chance")?;
        check_probability(c.response_chance, "crisis.comms.response_chance")?;
        c.help_arrival_days.check_within("crisis.comms.help_arrival_days", 0, U32_MAX)?;
        if c.responders.is_empty() {
            return Err(invalid("crisis.comms.responders", "at least one responder is required"));
        }
        if c.responders.iter().any(|r| r.weight <= 0.0) {
            return Err(invalid("crisis.comms.responders", "weights must be positive"));
        }
        Ok(())
    }
}

// ============================================================================
// Bundle
// ============================================================================

/// All three domain tables plus a fingerprint of the text they were built from.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainTables {
    pub survival: SurvivalTables,
    pub negotiation: NegotiationTables,
    pub crisis: CrisisTables,
    fingerprint: String,
}

fn parse<T: for<'de> Deserialize<'de>>(file: &str, text: &str) -> Result<T, TableError> {
    toml::from_str(text).map_err(|source| TableError::Parse { file: file.to_string(), source })
}

impl DomainTables {
    /// Parse and validate the three table texts.
    pub fn from_sources(survival: &str, negotiation: &str, crisis: &str) -> Result<Self, TableError> {
        let tables = Self {
            survival: parse(SURVIVAL_TOML_NAME, survival)?,
            negotiation: parse(NEGOTIATION_TOML_NAME, negotiation)?,
            crisis: parse(CRISIS_TOML_NAME, crisis)?,
            fingerprint: fingerprint(&[survival, negotiation, crisis]),
        };
        tables.survival.validate()?;
        tables.negotiation.validate()?;
        tables.crisis.validate()?;
        Ok(tables)
    }

    /// Tables compiled into the crate.
    pub fn embedded() -> Result<Self, TableError> {
        Self::from_sources(SURVIVAL_TOML, NEGOTIATION_TOML, CRISIS_TOML)
    }

    /// blake3 hex over the source texts, for logging which balance set is live.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

fn fingerprint(texts: &[&str]) -> String {
    let mut hasher = blake3::Hasher::new();
    for text in texts {
        hasher.update(text.as_bytes());
        hasher.update(&[0]);
    }
    hasher.finalize().to_hex().to_string()
}
