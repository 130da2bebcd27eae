use serde_json::{json, Value};

use contracts::{ActionId, Domain, Outcome};
use fable_core::{RandomSource, ResolveError, Resolver, SeededSource};

/// Counts draws so tests can prove rejected calls never touch the source.
struct Counting {
    inner: SeededSource,
    draws: usize,
}

impl RandomSource for Counting {
    fn next_f64(&mut self) -> f64 {
        self.draws += 1;
        self.inner.next_f64()
    }
}

fn resolver() -> Resolver {
    Resolver::embedded().expect("embedded tables")
}

fn valid_payloads() -> Vec<(&'static str, Value)> {
    vec![
        ("searchLocation", json!({"location": "police_station", "thoroughness": "thorough"})),
        ("combatZombies", json!({"strategy": "defensive", "ammoToUse": 12, "zombieCount": 5})),
        ("fortifyLocation", json!({"materialsToUse": 7})),
        (
            "researchMarketData",
            json!({"jobTitle": "Data Scientist", "yearsExperience": 3, "location": "Austin"}),
        ),
        (
            "presentCounterOffer",
            json!({
                "offeredSalary": 140000,
                "justification": "unique_skills",
                "tone": "collaborative",
                "currentOffer": 125000,
                "maxBudget": 135000
            }),
        ),
        (
            "proposeCompTradeoffs",
            json!({"currentOffer": 90000, "targetSalary": 120000, "maxBudget": 100000, "priority": "growth"}),
        ),
        ("repairSystem", json!({"system": "reactor_cooling", "powerAllocated": 20})),
        ("rationResources", json!({"rationLevel": "moderate"})),
        ("attemptEmergencyContact", json!({"powerToUse": 12, "communicationsStatus": "degraded"})),
    ]
}

#[test]
fn catalog_lists_every_action() {
    let r = resolver();
    let actions: Vec<_> = r.actions().collect();
    assert_eq!(actions.len(), 9);
    assert_eq!(actions.iter().filter(|a| a.domain == Domain::Survival).count(), 3);
    assert_eq!(actions.iter().filter(|a| a.domain == Domain::Negotiation).count(), 3);
    assert_eq!(actions.iter().filter(|a| a.domain == Domain::Crisis).count(), 3);

    let info = r.describe("repairSystem").expect("known action");
    assert_eq!(info.id, ActionId::RepairSystem);
    let names: Vec<&str> = info.contract.iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["system", "powerAllocated"]);
    assert!(r.describe("castFireball").is_none());
}

#[test]
fn every_action_resolves_to_its_own_outcome() {
    let r = resolver();
    let mut rng = SeededSource::new(51);
    for (id, params) in valid_payloads() {
        let outcome = r.resolve(id, &params, &mut rng).expect(id);
        assert_eq!(outcome.action().as_str(), id);
    }
}

#[test]
fn unknown_action_is_rejected() {
    let r = resolver();
    let err = r
        .resolve("castFireball", &json!({}), &mut SeededSource::new(52))
        .expect_err("unknown action");
    assert_eq!(err, ResolveError::UnknownAction("castFireball".into()));
    assert_eq!(err.field(), None);
}

#[test]
fn invalid_params_name_the_field_and_skip_the_draws() {
    let r = resolver();
    let cases = [
        ("searchLocation", json!({"location": "mall", "thoroughness": "quick"}), "location"),
        ("searchLocation", json!({"location": "pharmacy"}), "thoroughness"),
        ("combatZombies", json!({"strategy": "stealth", "ammoToUse": -1, "zombieCount": 3}), "ammoToUse"),
        ("combatZombies", json!({"strategy": "stealth", "ammoToUse": 5_000_000_000_i64, "zombieCount": 3}), "ammoToUse"),
        ("combatZombies", json!({"strategy": "stealth", "ammoToUse": 5, "zombieCount": 0}), "zombieCount"),
        ("fortifyLocation", json!({"materialsToUse": 21}), "materialsToUse"),
        ("fortifyLocation", json!({"materialsToUse": 2.5}), "materialsToUse"),
        ("researchMarketData", json!({"jobTitle": "  ", "yearsExperience": 1, "location": "Boston"}), "jobTitle"),
        ("repairSystem", json!({"system": "shields", "powerAllocated": 10}), "system"),
        ("rationResources", json!({"rationLevel": "moderate", "extra": true}), "extra"),
        ("attemptEmergencyContact", json!({"powerToUse": 4, "communicationsStatus": "online"}), "powerToUse"),
        ("rationResources", json!(["moderate"]), "params"),
    ];
    for (id, params, field) in cases {
        let mut rng = Counting { inner: SeededSource::new(53), draws: 0 };
        let err = r.resolve(id, &params, &mut rng).expect_err(id);
        assert!(matches!(err, ResolveError::InvalidParams { .. }), "{id}: {err}");
        assert_eq!(err.field(), Some(field), "{id}: {err}");
        assert_eq!(rng.draws, 0, "{id} drew before validating");
    }
}

#[test]
fn large_counts_resolve_with_capped_ammo() {
    let r = resolver();
    let mut rng = SeededSource::new(58);
    let cases = [(1_500_u32, 5_u32), (2_000, 150), (u32::MAX, u32::MAX)];
    for (ammo, count) in cases {
        let params = json!({"strategy": "aggressive", "ammoToUse": ammo, "zombieCount": count});
        let outcome = r.resolve("combatZombies", &params, &mut rng).expect("combat");
        let Outcome::CombatZombies(c) = &outcome else {
            panic!("expected a combat outcome, got {outcome:?}");
        };
        assert_eq!(c.ammo_used, ammo.min(count.saturating_mul(3)));
        assert!(c.zombies_killed <= count);
        assert!(c.health_lost <= 100);
    }

    let params = json!({"jobTitle": "Data Analyst", "yearsExperience": 75, "location": "Denver"});
    let outcome = r.resolve("researchMarketData", &params, &mut rng).expect("market data");
    assert_eq!(outcome.action(), ActionId::ResearchMarketData);
}

#[test]
fn same_seed_same_outcome() {
    let r = resolver();
    for (id, params) in valid_payloads() {
        let a = r.resolve(id, &params, &mut SeededSource::new(54)).expect(id);
        let b = r.resolve(id, &params, &mut SeededSource::new(54)).expect(id);
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).expect("serialize"),
            serde_json::to_string(&b).expect("serialize")
        );
    }
}

#[test]
fn outcomes_serialize_tagged_and_camel_cased() {
    let r = resolver();
    let outcome = r
        .resolve(
            "searchLocation",
            &json!({"location": "grocery_store", "thoroughness": "thorough"}),
            &mut SeededSource::new(55),
        )
        .expect("search");
    let v = serde_json::to_value(&outcome).expect("serialize");
    assert_eq!(v["action"], "searchLocation");
    for key in ["items", "zombiesAttracted", "zombieCount", "healthCost", "timeSpent"] {
        assert!(v.get(key).is_some(), "missing {key} in {v}");
    }

    let ration = r
        .resolve("rationResources", &json!({"rationLevel": "light"}), &mut SeededSource::new(56))
        .expect("ration");
    let v = serde_json::to_value(&ration).expect("serialize");
    assert_eq!(v["crewResponse"].as_str().map(|s| !s.is_empty()), Some(true));
    assert_eq!(v["daysExtended"], 1);

    let back: Outcome = serde_json::from_value(v).expect("deserialize");
    assert_eq!(back, ration);
}

#[test]
fn unanswered_contact_omits_eta_and_responder() {
    let r = resolver();
    let mut rng = SeededSource::new(57);
    let params = json!({"powerToUse": 5, "communicationsStatus": "offline"});
    let miss = (0..200)
        .map(|_| r.resolve("attemptEmergencyContact", &params, &mut rng).expect("contact"))
        .find(|o| matches!(o, Outcome::AttemptEmergencyContact(c) if !c.response_received))
        .expect("at least one unanswered call");
    let v = serde_json::to_value(&miss).expect("serialize");
    assert!(v.get("helpArrivalDays").is_none());
    assert!(v.get("responder").is_none());
    assert_eq!(v["powerUsed"], 5);
}

#[test]
fn shared_resolver_matches_embedded() {
    let shared = Resolver::shared().expect("embedded tables");
    assert_eq!(shared.tables().fingerprint(), resolver().tables().fingerprint());
    assert!(std::ptr::eq(shared, Resolver::shared().expect("embedded tables")));
}

#[test]
fn resolver_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Resolver>();

    let r = std::sync::Arc::new(resolver());
    let handles: Vec<_> = (0..4u64)
        .map(|seed| {
            let r = r.clone();
            std::thread::spawn(move || {
                let mut rng = SeededSource::new(seed);
                r.resolve("fortifyLocation", &json!({"materialsToUse": 5}), &mut rng)
            })
        })
        .collect();
    for h in handles {
        let outcome = h.join().expect("thread").expect("fortify");
        assert_eq!(outcome.action(), ActionId::FortifyLocation);
    }
}
