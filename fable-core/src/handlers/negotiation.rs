//! handlers/negotiation.rs
//! Salary negotiation: market research, counter offers, compensation tradeoffs.

use contracts::tables::NegotiationTables;
use contracts::{
    Confidence, CounterOfferOutcome, CounterOfferParams, Justification, MarketDataOutcome,
    MarketDataParams, Suggestion, TradeoffOutcome, TradeoffParams,
};

use crate::random::{random_in_range, RandomError, RandomSource};

/// Salary band for a role, scaled by experience and city.
///
/// Title and city are open text: unknown values fall back to the table
/// defaults and lower the reported confidence instead of failing.
pub fn research_market_data(
    tables: &NegotiationTables,
    params: &MarketDataParams,
    rng: &mut dyn RandomSource,
) -> Result<MarketDataOutcome, RandomError> {
    let market = &tables.market;
    let base = market.base_salary(&params.job_title);
    let city = market.location_multiplier(&params.location);

    let average = base.value as f64 * market.experience_multiplier(params.years_experience) * city.value;
    let scaled = |factor: f64| (average * factor).round() as i64;

    let confidence_level = match (base.recognized, city.recognized) {
        (true, true) => Confidence::High,
        (true, false) => Confidence::Medium,
        _ => Confidence::Low,
    };
    let span = market.data_points.get(confidence_level);
    let data_points = random_in_range(rng, span.min(), span.max())?.max(0) as u32;

    Ok(MarketDataOutcome {
        average_salary: average.round() as i64,
        low_range: scaled(1.0 - market.range_spread),
        high_range: scaled(1.0 + market.range_spread),
        p25: scaled(1.0 - market.percentile_spread),
        p75: scaled(1.0 + market.percentile_spread),
        confidence_level,
        data_points,
        sources: market.sources.get(confidence_level).clone(),
    })
}

/// Recruiter's answer to a counter offer.
///
/// The new offer never drops below the current offer and never exceeds
/// `max(currentOffer, maxBudget)`.
pub fn present_counter_offer(
    tables: &NegotiationTables,
    params: &CounterOfferParams,
    rng: &mut dyn RandomSource,
) -> Result<CounterOfferOutcome, RandomError> {
    let range = tables.increase_range(params.justification);
    let target_increase = random_in_range(rng, range.min(), range.max())?;

    let current = params.current_offer;
    let ideal_offer = current.saturating_add(target_increase);
    let bounded_max = current.max(params.max_budget);

    // An ask below the current offer is treated as asking for nothing more.
    let ask = params.offered_salary.max(current);
    let requested_increase = ask - current;
    let proposed = if requested_increase * 2 < target_increase {
        // Underselling: the recruiter meets the player halfway.
        ask + (ideal_offer - ask) / 2
    } else {
        ask.min(ideal_offer)
    };
    let new_offer = proposed.clamp(current, bounded_max);

    let increase = new_offer - current;
    let counter = &tables.counter_offer;
    let offer_accepted = new_offer as f64 >= params.offered_salary as f64 * counter.acceptance_ratio;

    Ok(CounterOfferOutcome {
        new_offer,
        relationship_change: tables.relationship_delta(params.tone),
        leverage_used: params.justification == Justification::CompetingOffer,
        recruiter_response: counter.response_for(increase).to_string(),
        offer_accepted,
    })
}

/// Non-salary levers that can close the gap between budget and target.
pub fn propose_comp_tradeoffs(
    tables: &NegotiationTables,
    params: &TradeoffParams,
    rng: &mut dyn RandomSource,
) -> Result<TradeoffOutcome, RandomError> {
    let achievable = params.current_offer.max(params.max_budget).min(params.target_salary);
    let gap = (params.target_salary - achievable).max(0);

    let mut suggestions = Vec::with_capacity(3);
    for kind in tables.tradeoffs.for_priority(params.priority) {
        let spec = tables.tradeoffs.spec(*kind);
        let estimated_value = random_in_range(rng, spec.value.min(), spec.value.max())?;
        suggestions.push(Suggestion {
            kind: *kind,
            description: spec.description.clone(),
            estimated_value,
        });
    }

    let message = if gap == 0 {
        "Your target fits within the budget. These extras can sweeten the package further."
            .to_string()
    } else {
        format!(
            "The budget falls ${gap} short of your target. These tradeoffs can help close the gap."
        )
    };

    Ok(TradeoffOutcome { gap, suggestions, message })
}
