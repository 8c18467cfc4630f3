//! Unchecked 32-bit price × quantity evaluation.

use serde::Serialize;

pub const DEFAULT_PRICE: i32 = i32::MAX;
pub const DEFAULT_QUANTITY: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OverflowReport {
    pub price: i32,
    pub quantity: i32,
    pub total: i32,
    pub overflowed: bool,
}

/// Multiply with two's-complement wraparound and flag suspicious results.
///
/// The flag is a heuristic, not a real overflow detector: it only fires when
/// the product went negative, or when two positive operands produced a total
/// smaller than the price. Wraps that land on a large positive value slip by.
pub fn evaluate(price: Option<i32>, quantity: Option<i32>) -> OverflowReport {
    let price = price.unwrap_or(DEFAULT_PRICE);
    let quantity = quantity.unwrap_or(DEFAULT_QUANTITY);

    let total = price.wrapping_mul(quantity);
    let overflowed = total < 0 || (price > 0 && quantity > 0 && total < price);

    OverflowReport {
        price,
        quantity,
        total,
        overflowed,
    }
}
