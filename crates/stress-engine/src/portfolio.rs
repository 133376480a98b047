//! Portfolios of equity and option positions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use stress_pricing::{Instrument, InstrumentKind};

use crate::error::{EngineError, EngineResult};

/// A holding of one instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Unique position identifier.
    pub id: String,
    /// The instrument held.
    pub instrument: Instrument,
    /// Signed quantity (negative for short positions).
    pub quantity: f64,
}

impl Position {
    /// Creates a position.
    #[must_use]
    pub fn new(id: impl Into<String>, instrument: impl Into<Instrument>, quantity: f64) -> Self {
        Self {
            id: id.into(),
            instrument: instrument.into(),
            quantity,
        }
    }

    /// Symbol of the underlying (the equity's own symbol for equities).
    #[must_use]
    pub fn underlying(&self) -> &str {
        self.instrument.underlying()
    }

    /// Instrument kind.
    #[must_use]
    pub fn kind(&self) -> InstrumentKind {
        self.instrument.kind()
    }

    /// Scale from one unit of model value to position value.
    #[must_use]
    pub fn notional_scale(&self) -> f64 {
        self.quantity * self.instrument.multiplier()
    }
}

/// A named collection of positions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Portfolio {
    /// Portfolio name.
    #[serde(default)]
    pub name: String,

    /// Valuation date, used to turn option expiry dates into days to expiry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of: Option<NaiveDate>,

    /// Positions in insertion order.
    #[serde(default)]
    pub positions: Vec<Position>,
}

impl Portfolio {
    /// Creates an empty portfolio.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns a builder.
    #[must_use]
    pub fn builder() -> PortfolioBuilder {
        PortfolioBuilder::new()
    }

    /// Checks that position ids are unique and quantities finite.
    ///
    /// # Errors
    ///
    /// Returns the first duplicate id or non-finite quantity found.
    pub fn validate(&self) -> EngineResult<()> {
        let mut seen = HashSet::with_capacity(self.positions.len());
        for position in &self.positions {
            if !position.quantity.is_finite() {
                return Err(EngineError::InvalidQuantity {
                    position_id: position.id.clone(),
                    value: position.quantity,
                });
            }
            if !seen.insert(position.id.as_str()) {
                return Err(EngineError::DuplicatePosition(position.id.clone()));
            }
        }
        Ok(())
    }

    /// Number of positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if the portfolio holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Looks up a position by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Position> {
        self.positions.iter().find(|p| p.id == id)
    }

    /// Distinct underlying symbols, sorted.
    #[must_use]
    pub fn underlyings(&self) -> Vec<&str> {
        self.positions
            .iter()
            .map(Position::underlying)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Iterates over positions.
    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.positions.iter()
    }
}

/// Builder for constructing a [`Portfolio`].
///
/// # Example
///
/// ```rust
/// use stress_engine::prelude::*;
/// use stress_pricing::{Equity, EquityOption, OptionType};
///
/// let portfolio = PortfolioBuilder::new()
///     .name("Tech")
///     .add_position(Position::new("eq1", Equity::new("AAPL", 150.0), 100.0))
///     .add_position(Position::new(
///         "opt1",
///         EquityOption::new("AAPL", OptionType::Call, 155.0, 150.0, 0.3).with_dte(30.0),
///         -5.0,
///     ))
///     .build()
///     .unwrap();
/// assert_eq!(portfolio.underlyings(), ["AAPL"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PortfolioBuilder {
    name: Option<String>,
    as_of: Option<NaiveDate>,
    positions: Vec<Position>,
}

impl PortfolioBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the portfolio name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the valuation date.
    #[must_use]
    pub fn as_of(mut self, date: NaiveDate) -> Self {
        self.as_of = Some(date);
        self
    }

    /// Adds a position.
    #[must_use]
    pub fn add_position(mut self, position: Position) -> Self {
        self.positions.push(position);
        self
    }

    /// Adds multiple positions.
    #[must_use]
    pub fn add_positions(mut self, positions: impl IntoIterator<Item = Position>) -> Self {
        self.positions.extend(positions);
        self
    }

    /// Builds and validates the portfolio.
    ///
    /// # Errors
    ///
    /// Returns an error on duplicate position ids or non-finite quantities.
    pub fn build(self) -> EngineResult<Portfolio> {
        let portfolio = Portfolio {
            name: self.name.unwrap_or_else(|| "portfolio".to_string()),
            as_of: self.as_of,
            positions: self.positions,
        };
        portfolio.validate()?;
        Ok(portfolio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stress_pricing::{Equity, EquityOption, OptionType};

    fn aapl() -> Position {
        Position::new("eq1", Equity::new("AAPL", 150.0), 100.0)
    }

    #[test]
    fn test_builder() {
        let portfolio = PortfolioBuilder::new()
            .name("Test")
            .as_of(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap())
            .add_position(aapl())
            .add_position(Position::new("eq2", Equity::new("MSFT", 400.0), 10.0))
            .build()
            .unwrap();

        assert_eq!(portfolio.name, "Test");
        assert_eq!(portfolio.len(), 2);
        assert_eq!(portfolio.underlyings(), ["AAPL", "MSFT"]);
        assert_eq!(portfolio.get("eq2").unwrap().underlying(), "MSFT");
        assert!(portfolio.get("missing").is_none());
    }

    #[test]
    fn test_rejects_duplicates() {
        let result = PortfolioBuilder::new().add_position(aapl()).add_position(aapl()).build();
        assert_eq!(result, Err(EngineError::DuplicatePosition("eq1".into())));
    }

    #[test]
    fn test_rejects_non_finite_quantity() {
        let result = PortfolioBuilder::new()
            .add_position(Position::new("bad", Equity::new("AAPL", 150.0), f64::NAN))
            .build();
        assert!(matches!(result, Err(EngineError::InvalidQuantity { .. })));
    }

    #[test]
    fn test_notional_scale_uses_multiplier() {
        let opt = Position::new(
            "opt1",
            EquityOption::new("AAPL", OptionType::Put, 140.0, 150.0, 0.25).with_multiplier(100.0),
            -2.0,
        );
        assert_eq!(opt.notional_scale(), -200.0);
        assert_eq!(opt.kind(), InstrumentKind::Option);
    }

    #[test]
    fn test_deserialize() {
        let json = r#"{
            "name": "Demo",
            "as_of": "2025-01-15",
            "positions": [
                {"id": "eq1", "quantity": 100,
                 "instrument": {"type": "equity", "symbol": "AAPL", "price": 150.0}}
            ]
        }"#;
        let portfolio: Portfolio = serde_json::from_str(json).unwrap();
        assert_eq!(portfolio.as_of, NaiveDate::from_ymd_opt(2025, 1, 15));
        assert_eq!(portfolio.positions[0].underlying(), "AAPL");
    }
}
