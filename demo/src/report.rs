//! Text reports over day-ahead price results.

use energidata_sdk::{PriceArea, PriceQueryResult, PriceRecord};
use rust_decimal::Decimal;

fn money(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}

fn hour(record: &PriceRecord) -> String {
    record.time_dk().format("%Y-%m-%d %H:%M").to_string()
}

/// Lines for the first `count` records.
pub fn latest_prices(result: &PriceQueryResult, count: usize) -> Vec<String> {
    result
        .records()
        .iter()
        .take(count)
        .map(|r| {
            format!(
                "  {} | {} DKK/MWh | {} EUR/MWh",
                hour(r),
                money(r.day_ahead_price_dkk()),
                money(r.day_ahead_price_eur())
            )
        })
        .collect()
}

/// Average DKK price of two areas and their difference.
///
/// Returns `None` unless both areas have records.
pub fn area_comparison(
    result: &PriceQueryResult,
    first: &PriceArea,
    second: &PriceArea,
) -> Option<Vec<String>> {
    let first_avg = result.average_price_dkk(first)?;
    let second_avg = result.average_price_dkk(second)?;
    let diff = (first_avg - second_avg).abs();

    Some(vec![
        format!("{} average: {} DKK/MWh", first, money(first_avg)),
        format!("{} average: {} DKK/MWh", second, money(second_avg)),
        format!("Difference: {} DKK/MWh", money(diff)),
    ])
}

/// Cheapest hour, most expensive hour and the spread between them.
///
/// Returns `None` for an empty result.
pub fn peak_hours(result: &PriceQueryResult) -> Option<Vec<String>> {
    let cheapest = result.cheapest()?;
    let expensive = result.most_expensive()?;
    let spread = result.spread_dkk()?;

    Some(vec![
        format!(
            "Cheapest hour: {} - {} DKK/MWh",
            hour(cheapest),
            money(cheapest.day_ahead_price_dkk())
        ),
        format!(
            "Most expensive hour: {} - {} DKK/MWh",
            hour(expensive),
            money(expensive.day_ahead_price_dkk())
        ),
        format!("Price spread: {} DKK/MWh", money(spread)),
    ])
}
