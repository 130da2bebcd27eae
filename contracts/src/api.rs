use serde::{Deserialize, Serialize};
use std::fmt;

/// Declares a closed, string-labelled enumeration.
///
/// The label is the wire spelling used by callers, by the table files and by
/// the input contracts, so all three stay in lockstep.
macro_rules! labeled_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $label)] $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
            /// Wire labels, in declaration order.
            pub const LABELS: &'static [&'static str] = &[$($label),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            pub fn from_label(label: &str) -> Option<Self> {
                match label {
                    $($label => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

labeled_enum! {
    /// Scenario domain an action belongs to.
    pub enum Domain {
        Survival => "survival",
        Negotiation => "negotiation",
        Crisis => "crisis",
    }
}

labeled_enum! {
    /// The nine resolvable player moves.
    pub enum ActionId {
        SearchLocation => "searchLocation",
        CombatZombies => "combatZombies",
        FortifyLocation => "fortifyLocation",
        ResearchMarketData => "researchMarketData",
        PresentCounterOffer => "presentCounterOffer",
        ProposeCompTradeoffs => "proposeCompTradeoffs",
        RepairSystem => "repairSystem",
        RationResources => "rationResources",
        AttemptEmergencyContact => "attemptEmergencyContact",
    }
}

impl ActionId {
    pub fn domain(&self) -> Domain {
        match self {
            ActionId::SearchLocation | ActionId::CombatZombies | ActionId::FortifyLocation => {
                Domain::Survival
            }
            ActionId::ResearchMarketData
            | ActionId::PresentCounterOffer
            | ActionId::ProposeCompTradeoffs => Domain::Negotiation,
            ActionId::RepairSystem
            | ActionId::RationResources
            | ActionId::AttemptEmergencyContact => Domain::Crisis,
        }
    }
}

// ---------------- survival ----------------

labeled_enum! {
    pub enum Location {
        GasStation => "gas_station",
        Pharmacy => "pharmacy",
        GroceryStore => "grocery_store",
        PoliceStation => "police_station",
        HardwareStore => "hardware_store",
    }
}

labeled_enum! {
    pub enum Thoroughness {
        Quick => "quick",
        Thorough => "thorough",
    }
}

labeled_enum! {
    pub enum ItemType {
        Food => "food",
        Water => "water",
        Medicine => "medicine",
        Ammo => "ammo",
        Weapons => "weapons",
        Materials => "materials",
    }
}

labeled_enum! {
    pub enum Strategy {
        Aggressive => "aggressive",
        Defensive => "defensive",
        Stealth => "stealth",
    }
}

// ---------------- negotiation ----------------

labeled_enum! {
    pub enum Justification {
        MarketResearch => "market_research",
        CompetingOffer => "competing_offer",
        Experience => "experience",
        UniqueSkills => "unique_skills",
    }
}

labeled_enum! {
    pub enum Tone {
        Collaborative => "collaborative",
        Confident => "confident",
        Firm => "firm",
        Aggressive => "aggressive",
    }
}

labeled_enum! {
    pub enum Priority {
        Cash => "cash",
        Equity => "equity",
        WorkLifeBalance => "work_life_balance",
        Growth => "growth",
    }
}

labeled_enum! {
    pub enum TradeoffKind {
        SigningBonus => "signing_bonus",
        Equity => "equity",
        ExtraPto => "extra_pto",
        RemoteFlexibility => "remote_flexibility",
        ProfessionalDevelopment => "professional_development",
    }
}

labeled_enum! {
    /// How much the market lookup trusted its own inputs.
    pub enum Confidence {
        High => "high",
        Medium => "medium",
        Low => "low",
    }
}

// ---------------- crisis ----------------

labeled_enum! {
    pub enum StationSystem {
        LifeSupport => "life_support",
        Communications => "communications",
        Navigation => "navigation",
        Propulsion => "propulsion",
        ReactorCooling => "reactor_cooling",
    }
}

labeled_enum! {
    /// Operational state of a station system. Also the comms status input.
    pub enum SystemStatus {
        Online => "online",
        Degraded => "degraded",
        Offline => "offline",
    }
}

labeled_enum! {
    pub enum RationLevel {
        Light => "light",
        Moderate => "moderate",
        Severe => "severe",
    }
}
