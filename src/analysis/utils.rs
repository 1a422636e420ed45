//! Statistical helpers shared by the analysis stages
//! Every helper returns None instead of dividing by zero or overflowing

use crate::analysis::types::{SummaryStatistics, ValueRange, ValueStatistics};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};

/// Currency amounts and derived means are reported to the penny
pub const CURRENCY_DP: u32 = 2;

/// Sum that reports overflow as None
pub fn checked_sum(values: &[Decimal]) -> Option<Decimal> {
    values
        .iter()
        .try_fold(Decimal::ZERO, |total, v| total.checked_add(*v))
}

pub fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    checked_sum(values)?.checked_div(Decimal::from(values.len()))
}

/// Median, interpolated between the two middle values for even counts
pub fn median(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort();

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        sorted[mid - 1]
            .checked_add(sorted[mid])?
            .checked_div(Decimal::from(2))
    } else {
        Some(sorted[mid])
    }
}

/// Sample standard deviation; a single value has no spread
pub fn sample_std_dev(values: &[Decimal]) -> Option<Decimal> {
    let avg = mean(values)?;
    if values.len() < 2 {
        return Some(Decimal::ZERO);
    }

    let squares = values.iter().try_fold(Decimal::ZERO, |total, v| {
        let diff = v.checked_sub(avg)?;
        total.checked_add(diff.checked_mul(diff)?)
    })?;
    let variance = squares.checked_div(Decimal::from(values.len() - 1))?;
    variance.sqrt()
}

pub fn value_range<T: Copy + Ord>(values: &[T]) -> Option<ValueRange<T>> {
    let min = values.iter().min()?;
    let max = values.iter().max()?;
    Some(ValueRange {
        min: *min,
        max: *max,
    })
}

/// Min, max, median and mean of a sample
pub fn summarize(values: &[Decimal]) -> Option<SummaryStatistics> {
    let range = value_range(values)?;
    Some(SummaryStatistics {
        min: range.min,
        max: range.max,
        median: round_currency(median(values)?),
        mean: round_currency(mean(values)?),
    })
}

/// Summary plus sample standard deviation
pub fn describe(values: &[Decimal]) -> Option<ValueStatistics> {
    Some(ValueStatistics {
        mean: round_currency(mean(values)?),
        median: round_currency(median(values)?),
        std_dev: round_currency(sample_std_dev(values)?),
        range: value_range(values)?,
    })
}

pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CURRENCY_DP, RoundingStrategy::MidpointNearestEven)
}

/// `numerator / denominator` rounded half-to-even at `dp` places
pub fn ratio(numerator: u64, denominator: usize, dp: u32) -> Option<Decimal> {
    if denominator == 0 {
        return None;
    }
    let value = Decimal::from(numerator) / Decimal::from(denominator);
    Some(value.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven))
}

/// Share of `count` in `total` as a fraction, 0 for an empty total
pub fn share(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64
}

/// Render an amount as whole pounds with thousands separators
pub fn format_currency(amount: Decimal) -> String {
    let whole = amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
        .to_i128()
        .unwrap_or_default();

    let digits = whole.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if whole < 0 {
        format!("-£{}", grouped)
    } else {
        format!("£{}", grouped)
    }
}
