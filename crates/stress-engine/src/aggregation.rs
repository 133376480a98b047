//! Aggregation of position P&L into summary rows.

use std::collections::BTreeMap;
use stress_core::{AggregationType, Factor};

use crate::results::{AggregatePnl, PositionPnl};

/// Key of the single row produced by [`AggregationType::Total`].
pub const TOTAL_KEY: &str = "total";

/// Key of the [`AggregationType::ByFactor`] row when the scenario has no factor.
pub const PORTFOLIO_KEY: &str = "portfolio";

/// Sums position P&L into aggregate rows.
///
/// - `ByUnderlying`: one row per underlying, sorted by symbol
/// - `ByFactor`: one row keyed by the factor name
/// - `Total`: one row keyed `total`
///
/// Every row has `columns` entries, even when no position contributes.
#[must_use]
pub fn aggregate(
    positions: &[PositionPnl],
    aggregation: AggregationType,
    factor: Option<&Factor>,
    columns: usize,
) -> Vec<AggregatePnl> {
    match aggregation {
        AggregationType::ByUnderlying => {
            let mut rows: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
            for position in positions {
                let row = rows
                    .entry(position.underlying.as_str())
                    .or_insert_with(|| vec![0.0; columns]);
                add_into(row, &position.pnl);
            }
            rows.into_iter()
                .map(|(key, pnl)| AggregatePnl {
                    key: key.to_string(),
                    pnl,
                })
                .collect()
        }
        AggregationType::ByFactor => {
            let key = factor.map_or(PORTFOLIO_KEY, |f| f.name.as_str());
            vec![sum_all(key, positions, columns)]
        }
        AggregationType::Total => vec![sum_all(TOTAL_KEY, positions, columns)],
    }
}

fn sum_all(key: &str, positions: &[PositionPnl], columns: usize) -> AggregatePnl {
    let mut pnl = vec![0.0; columns];
    for position in positions {
        add_into(&mut pnl, &position.pnl);
    }
    AggregatePnl {
        key: key.to_string(),
        pnl,
    }
}

fn add_into(acc: &mut [f64], values: &[f64]) {
    for (a, v) in acc.iter_mut().zip(values) {
        *a += v;
    }
}
