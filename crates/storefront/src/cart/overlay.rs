//! Optimistic cart overlay.
//!
//! A pure merge of pending, unconfirmed cart actions over the last
//! authoritative snapshot. The result is display-only: the platform's
//! response remains the source of truth, and once an action confirms (or
//! fails) its envelope is no longer pending, so the overlay converges back
//! to the authoritative cart on the next render.
//!
//! Placeholder line IDs derive from the merchandise ID, so they are stable
//! across renders and a later remove can target an unconfirmed line.

use driftline_core::Money;
use rust_decimal::Decimal;

use crate::shopify::types::{Cart, CartLine};

use super::{CartAction, OptimisticLineDisplay};

/// Prefix marking a line ID the platform has not issued.
pub const OPTIMISTIC_ID_PREFIX: &str = "optimistic:";

/// The placeholder ID for an unconfirmed line. Duplicate adds merge by
/// merchandise, so one merchandise ID maps to at most one placeholder.
#[must_use]
pub fn optimistic_line_id(merchandise_id: &str) -> String {
    format!("{OPTIMISTIC_ID_PREFIX}{merchandise_id}")
}

/// The merged cart produced by [`apply`].
#[derive(Debug, Clone, PartialEq)]
pub struct OptimisticCart {
    pub lines: Vec<OptimisticLine>,
    pub total_quantity: i64,
    /// Best-effort subtotal. `None` when any line's unit price is unknown;
    /// exact totals are the platform's to compute.
    pub estimated_subtotal: Option<Money>,
}

impl OptimisticCart {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// One rendered line: either an authoritative line (possibly with pending
/// changes applied) or a placeholder for a line the platform has not
/// confirmed yet.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimisticLine {
    pub id: String,
    pub merchandise_id: String,
    pub quantity: i64,
    /// Whether the displayed state is ahead of the snapshot.
    pub is_optimistic: bool,
    /// Authoritative line data, absent for placeholder lines.
    pub line: Option<CartLine>,
    /// Display payload carried in the add envelope, for placeholder lines.
    pub display: Option<OptimisticLineDisplay>,
}

impl OptimisticLine {
    /// Unit price when known: the authoritative per-quantity cost, or the
    /// display payload's price for placeholder lines.
    #[must_use]
    pub fn unit_price(&self) -> Option<&Money> {
        self.line
            .as_ref()
            .map(|l| &l.cost.amount_per_quantity)
            .or_else(|| self.display.as_ref().map(|d| &d.price))
    }
}

/// Merge pending actions over the last authoritative snapshot, in
/// submission order.
///
/// Quantities floor at zero, and a zero-quantity line is dropped, so
/// "update to 0" and "remove" render identically.
#[must_use]
pub fn apply(snapshot: Option<&Cart>, pending: &[CartAction]) -> OptimisticCart {
    let mut lines: Vec<OptimisticLine> = snapshot
        .map(|cart| cart.lines.iter().map(confirmed_line).collect())
        .unwrap_or_default();

    for action in pending {
        match action {
            CartAction::LinesAdd { lines: added } => {
                for input in added {
                    if let Some(entry) = lines
                        .iter_mut()
                        .find(|l| l.merchandise_id == input.merchandise_id)
                    {
                        entry.quantity += input.quantity.max(0);
                        entry.is_optimistic = true;
                    } else {
                        lines.push(OptimisticLine {
                            id: optimistic_line_id(&input.merchandise_id),
                            merchandise_id: input.merchandise_id.clone(),
                            quantity: input.quantity.max(0),
                            is_optimistic: true,
                            line: None,
                            display: input.display.clone(),
                        });
                    }
                }
            }
            CartAction::LinesUpdate { lines: updates } => {
                for update in updates {
                    // Unknown IDs are skipped: the snapshot may simply not
                    // know the line yet.
                    if let Some(entry) = lines.iter_mut().find(|l| l.id == update.id) {
                        if let Some(quantity) = update.quantity {
                            entry.quantity = quantity.max(0);
                        }
                        if let Some(merchandise_id) = &update.merchandise_id {
                            entry.merchandise_id.clone_from(merchandise_id);
                        }
                        entry.is_optimistic = true;
                    }
                }
            }
            CartAction::LinesRemove { line_ids } => {
                lines.retain(|l| !line_ids.contains(&l.id));
            }
            // Codes and identity do not change lines; their totals lag
            // until the platform confirms.
            CartAction::DiscountCodesUpdate { .. } | CartAction::BuyerIdentityUpdate { .. } => {}
        }

        lines.retain(|l| l.quantity > 0);
    }

    let total_quantity = lines.iter().map(|l| l.quantity).sum();
    let estimated_subtotal = estimate_subtotal(&lines);

    OptimisticCart {
        lines,
        total_quantity,
        estimated_subtotal,
    }
}

fn confirmed_line(line: &CartLine) -> OptimisticLine {
    OptimisticLine {
        id: line.id.clone(),
        merchandise_id: line.merchandise.id.clone(),
        quantity: line.quantity,
        is_optimistic: false,
        line: Some(line.clone()),
        display: None,
    }
}

fn estimate_subtotal(lines: &[OptimisticLine]) -> Option<Money> {
    let mut subtotal: Option<Money> = None;
    for line in lines {
        let amount = line_estimate(line)?;
        subtotal = Some(match subtotal {
            Some(total) => total.plus(&amount),
            None => amount,
        });
    }
    subtotal
}

fn line_estimate(line: &OptimisticLine) -> Option<Money> {
    if !line.is_optimistic
        && let Some(confirmed) = &line.line
    {
        return Some(confirmed.cost.subtotal_amount.clone());
    }
    let unit = line.unit_price()?;
    Some(Money::new(
        unit.amount * Decimal::from(line.quantity),
        unit.currency_code.clone(),
    ))
}
