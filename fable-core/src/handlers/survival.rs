//! handlers/survival.rs
//! Looting, combat and fortification for the zombie-outbreak scenario.

use contracts::tables::SurvivalTables;
use contracts::{
    CombatOutcome, CombatParams, FortifyOutcome, FortifyParams, FoundItem, SearchOutcome,
    SearchParams, Strategy, Thoroughness,
};

use crate::random::{
    calculate_damage, random_in_range, success_check, uniform, RandomError, RandomSource,
};

/// Rounds of ammunition it takes, at most, to put one zombie down.
const AMMO_PER_ZOMBIE: u32 = 3;

/// Roll every item in the location's loot table independently, then check
/// whether the noise drew a horde.
pub fn search_location(
    tables: &SurvivalTables,
    params: &SearchParams,
    rng: &mut dyn RandomSource,
) -> Result<SearchOutcome, RandomError> {
    let profile = tables.search(params.thoroughness);

    let mut items = Vec::new();
    for entry in tables.loot(params.location) {
        if success_check(rng, entry.probability) {
            let quantity = random_in_range(rng, profile.quantity.min(), profile.quantity.max())?;
            items.push(FoundItem { item_type: entry.item, quantity: quantity as u32 });
        }
    }

    let zombies_attracted = success_check(rng, tables.attraction_chance(params.thoroughness));
    let zombie_count = if zombies_attracted {
        let horde = tables.attraction.horde_size;
        random_in_range(rng, horde.min(), horde.max())? as u32
    } else {
        0
    };

    let (health_cost, time_spent) = match params.thoroughness {
        Thoroughness::Quick => (0, 0),
        Thoroughness::Thorough => (
            random_in_range(rng, profile.health_cost.min(), profile.health_cost.max())? as u32,
            random_in_range(rng, profile.time_spent.min(), profile.time_spent.max())? as u32,
        ),
    };

    Ok(SearchOutcome { items, zombies_attracted, zombie_count, health_cost, time_spent })
}

/// Spend ammunition against a group; kills and wounds scale with the strategy.
pub fn combat_zombies(
    tables: &SurvivalTables,
    params: &CombatParams,
    rng: &mut dyn RandomSource,
) -> Result<CombatOutcome, RandomError> {
    let profile = tables.strategy(params.strategy);
    let zombie_count = params.zombie_count;
    let ammo_used = params.ammo_to_use.min(zombie_count.saturating_mul(AMMO_PER_ZOMBIE));

    let base_kills = (f64::from(ammo_used) * profile.accuracy).floor() as i64;
    let jitter = random_in_range(rng, profile.kill_jitter.min(), profile.kill_jitter.max())?;
    let zombies_killed = (base_kills + jitter).clamp(0, i64::from(zombie_count)) as u32;

    let health_lost = if success_check(rng, profile.damage_chance) {
        let base = profile.damage_per_zombie.saturating_mul(i64::from(zombie_count));
        let cap = i64::from(tables.combat.max_health_lost);
        calculate_damage(rng, base, profile.damage_variance)?.min(cap) as u32
    } else {
        0
    };

    let success = zombies_killed >= zombie_count;
    let description = describe_combat(params.strategy, zombies_killed, zombie_count, health_lost);

    Ok(CombatOutcome { zombies_killed, health_lost, ammo_used, success, description })
}

fn describe_combat(strategy: Strategy, killed: u32, count: u32, health_lost: u32) -> String {
    let approach = match strategy {
        Strategy::Aggressive => "You charge in guns blazing",
        Strategy::Defensive => "You hold a defensive line",
        Strategy::Stealth => "You move silently through the shadows",
    };
    let result = if killed >= count {
        format!("and clear all {count} zombies")
    } else if killed == 0 {
        format!("but fail to bring down any of the {count} zombies")
    } else {
        format!("and take down {killed} of {count} zombies")
    };
    if health_lost == 0 {
        format!("{approach} {result}, escaping without a scratch.")
    } else {
        format!("{approach} {result}, losing {health_lost} health.")
    }
}

/// Turn building materials into a fortification level.
pub fn fortify_location(
    tables: &SurvivalTables,
    params: &FortifyParams,
    rng: &mut dyn RandomSource,
) -> Result<FortifyOutcome, RandomError> {
    let f = &tables.fortify;
    let materials = params.materials_to_use;
    let efficiency = uniform(rng, f.efficiency.min(), f.efficiency.max());

    let raw = (f64::from(materials) * f64::from(f.points_per_material) * efficiency).floor();
    let fortification_level = (raw.max(0.0) as u32).min(f.max_level.min(100));
    let zombie_attack_reduction =
        ((f64::from(fortification_level) * f.attack_reduction_ratio).floor() as u32)
            .min(fortification_level);
    let time_spent = materials.div_ceil(f.materials_per_hour);

    Ok(FortifyOutcome {
        fortification_level,
        materials_used: materials,
        time_spent,
        zombie_attack_reduction,
    })
}
