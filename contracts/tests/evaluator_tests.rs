use contracts::evaluator::{bind_params, evaluate_params, validate_params};
use contracts::{ActionId, CombatParams, MarketDataParams, Strategy};
use serde_json::json;

#[test]
fn test_valid_search_passes() {
    let result = evaluate_params(
        ActionId::SearchLocation,
        &json!({"location": "pharmacy", "thoroughness": "thorough"}),
    );
    assert!(result.passed);
    assert!(result.violations.is_empty());
}

#[test]
fn test_unknown_enum_value_names_field() {
    let err = validate_params(
        ActionId::SearchLocation,
        &json!({"location": "mall", "thoroughness": "quick"}),
    )
    .expect_err("mall is not a location");
    assert_eq!(err.field, "location");
    assert!(err.reason.contains("pharmacy"));
    assert!(err.reason.contains("\"mall\""));
}

#[test]
fn test_enum_labels_are_case_sensitive() {
    let err = validate_params(ActionId::RationResources, &json!({"rationLevel": "Severe"}))
        .expect_err("labels are exact");
    assert_eq!(err.field, "rationLevel");
}

#[test]
fn test_out_of_range_is_rejected_not_clamped() {
    let err = validate_params(ActionId::FortifyLocation, &json!({"materialsToUse": 21}))
        .expect_err("21 is above the cap");
    assert_eq!(err.field, "materialsToUse");
    assert_eq!(err.reason, "must be in [1, 20], got 21");

    let err = validate_params(ActionId::FortifyLocation, &json!({"materialsToUse": 0}))
        .expect_err("0 is below the floor");
    assert_eq!(err.field, "materialsToUse");
}

#[test]
fn test_fractional_numbers_are_rejected() {
    let err = validate_params(
        ActionId::AttemptEmergencyContact,
        &json!({"powerToUse": 7.5, "communicationsStatus": "online"}),
    )
    .expect_err("fractional power");
    assert_eq!(err.field, "powerToUse");
}

#[test]
fn test_missing_field_is_reported() {
    let err = validate_params(
        ActionId::CombatZombies,
        &json!({"strategy": "stealth", "ammoToUse": 3}),
    )
    .expect_err("zombieCount missing");
    assert_eq!(err.field, "zombieCount");
    assert_eq!(err.reason, "is required");
}

#[test]
fn test_undeclared_field_is_reported() {
    let err = validate_params(
        ActionId::RepairSystem,
        &json!({"system": "navigation", "powerAllocated": 10, "crew": 3}),
    )
    .expect_err("crew is not declared");
    assert_eq!(err.field, "crew");
}

#[test]
fn test_non_object_payload() {
    let err = validate_params(ActionId::RationResources, &json!(["light"])).expect_err("array");
    assert_eq!(err.field, "params");
}

#[test]
fn test_all_violations_collected_in_declared_order() {
    let result = evaluate_params(
        ActionId::PresentCounterOffer,
        &json!({
            "offeredSalary": -1,
            "justification": "vibes",
            "tone": "confident",
            "currentOffer": 100000,
            "extra": true
        }),
    );
    assert!(!result.passed);
    let fields: Vec<&str> = result.violations.iter().map(|v| v.field.as_str()).collect();
    assert_eq!(fields, vec!["offeredSalary", "justification", "maxBudget", "extra"]);
    assert_eq!(result.primary_violation().map(|v| v.field.as_str()), Some("offeredSalary"));
}

#[test]
fn test_blank_free_text_is_rejected() {
    let err = validate_params(
        ActionId::ResearchMarketData,
        &json!({"jobTitle": "   ", "yearsExperience": 3, "location": "Austin"}),
    )
    .expect_err("blank title");
    assert_eq!(err.field, "jobTitle");
}

#[test]
fn test_bind_produces_typed_params() {
    let params: CombatParams = bind_params(
        ActionId::CombatZombies,
        &json!({"strategy": "defensive", "ammoToUse": 9, "zombieCount": 4}),
    )
    .expect("valid combat payload");
    assert_eq!(params.strategy, Strategy::Defensive);
    assert_eq!(params.ammo_to_use, 9);
    assert_eq!(params.zombie_count, 4);

    let market: MarketDataParams = bind_params(
        ActionId::ResearchMarketData,
        &json!({"jobTitle": "Data Scientist", "yearsExperience": 0, "location": "Mars"}),
    )
    .expect("free text is accepted as-is");
    assert_eq!(market.job_title, "Data Scientist");
    assert_eq!(market.location, "Mars");
}

#[test]
fn test_every_action_has_a_contract() {
    for action in ActionId::ALL {
        assert!(!action.contract().is_empty(), "{action} has no contract");
    }
}

#[test]
fn test_json_entrypoint() {
    let result = contracts::evaluate_params_json("rationResources", r#"{"rationLevel":"light"}"#)
        .expect("known action");
    assert!(result.passed);
    assert!(contracts::evaluate_params_json("teleport", "{}").is_err());
}
