//! Overlap detection between a candidate trip and existing orders.

use crate::domain::UserId;

use super::{DateRange, TravelOrder, TravelOrderId};

/// Orders of `owner` that block booking `candidate`.
///
/// An order blocks when it is `requested` or `approved` and its dates overlap
/// the candidate range. `exclude` drops one order from the scan, typically the
/// order being re-evaluated.
pub fn find_conflicts<'a, I>(
    owner: &UserId,
    candidate: &DateRange,
    exclude: Option<TravelOrderId>,
    orders: I,
) -> Vec<TravelOrder>
where
    I: IntoIterator<Item = &'a TravelOrder>,
{
    orders
        .into_iter()
        .filter(|order| Some(order.id()) != exclude)
        .filter(|order| order.conflicts_with(owner, candidate))
        .cloned()
        .collect()
}
