//! handlers/crisis.rs
//! Station emergency: repairs, rationing, distress calls.

use contracts::tables::CrisisTables;
use contracts::{
    ContactOutcome, ContactParams, RationOutcome, RationParams, RepairOutcome, RepairParams,
    StationSystem, SystemStatus,
};

use crate::random::{random_in_range, success_check, weighted_random, RandomError, RandomSource};

/// Route power into a failing system.
///
/// A failed repair still leaves the system degraded when at least half the
/// required power went in; below that it stays offline.
pub fn repair_system(
    tables: &CrisisTables,
    params: &RepairParams,
    rng: &mut dyn RandomSource,
) -> Result<RepairOutcome, RandomError> {
    let repair = &tables.repair;
    let required = f64::from(repair.required_power(params.system));
    let allocated = f64::from(params.power_allocated);

    let success_chance = (allocated / required).min(repair.max_success_chance);
    let repair_success = success_check(rng, success_chance);
    let system_status = if repair_success {
        SystemStatus::Online
    } else if allocated >= required * repair.degraded_threshold {
        SystemStatus::Degraded
    } else {
        SystemStatus::Offline
    };

    let time = repair.time_spent.get(system_status);
    let time_spent = random_in_range(rng, time.min(), time.max())?.max(0) as u32;
    let morale = repair.morale.get(system_status);
    let morale_impact = random_in_range(rng, morale.min(), morale.max())? as i32;

    Ok(RepairOutcome {
        repair_success,
        system_status,
        power_consumed: params.power_allocated,
        time_spent,
        morale_impact,
        description: describe_repair(params.system, system_status),
    })
}

fn describe_repair(system: StationSystem, status: SystemStatus) -> String {
    let name = match system {
        StationSystem::LifeSupport => "Life support",
        StationSystem::Communications => "The communications array",
        StationSystem::Navigation => "Navigation",
        StationSystem::Propulsion => "Propulsion",
        StationSystem::ReactorCooling => "Reactor cooling",
    };
    match status {
        SystemStatus::Online => format!("{name} hums back to full operation."),
        SystemStatus::Degraded => format!("{name} sputters on, but only at partial capacity."),
        SystemStatus::Offline => format!("{name} stays dark. There was not enough power to bring it back."),
    }
}

/// Ration policy is a fixed lookup. No draws.
pub fn ration_resources(tables: &CrisisTables, params: &RationParams) -> RationOutcome {
    let effect = tables.rations.get(params.ration_level);
    RationOutcome {
        oxygen_reduction: effect.oxygen_reduction,
        power_reduction: effect.power_reduction,
        food_reduction: effect.food_reduction,
        morale_impact: effect.morale_delta,
        days_extended: effect.days_extended,
        crew_response: effect.response.clone(),
    }
}

/// Spend power on a distress call.
pub fn attempt_emergency_contact(
    tables: &CrisisTables,
    params: &ContactParams,
    rng: &mut dyn RandomSource,
) -> Result<ContactOutcome, RandomError> {
    let comms = &tables.comms;
    let final_chance = comms.contact_chance(params.communications_status, params.power_to_use);

    let contact_established = success_check(rng, final_chance);
    let response_received = contact_established && success_check(rng, comms.response_chance);

    let (help_arrival_days, responder) = if response_received {
        let days = random_in_range(rng, comms.help_arrival_days.min(), comms.help_arrival_days.max())?;
        let weighted: Vec<(&str, f64)> =
            comms.responders.iter().map(|r| (r.name.as_str(), r.weight)).collect();
        let who = weighted_random(rng, &weighted)?;
        (Some(days.max(0) as u32), Some((*who).to_string()))
    } else {
        (None, None)
    };

    let message = match (&responder, help_arrival_days) {
        (Some(who), Some(days)) => {
            format!("{who} acknowledges the distress call. Help will arrive in {days} days.")
        }
        _ if contact_established => {
            "The signal went out, but no reply has come back yet.".to_string()
        }
        _ => "Only static answers. The distress call did not get through.".to_string(),
    };

    Ok(ContactOutcome {
        contact_established,
        response_received,
        help_arrival_days,
        power_used: params.power_to_use,
        responder,
        message,
    })
}
