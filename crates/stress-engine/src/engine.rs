//! Stress test engine.
//!
//! Revalues every position of a [`Portfolio`] at each stress level of a
//! [`StressScenario`] and reports P&L against the unstressed value.

use stress_core::calculators::calculator_for;
use stress_core::types::{IdiosyncraticGrid, ScenarioGrid, Shock, StressPoint};
use stress_core::{Factor, StressScenario};
use stress_pricing::{MarketParams, PricingRouter};
use tracing::{debug, info, warn};

use crate::aggregation::aggregate;
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::parallel::maybe_parallel_map;
use crate::portfolio::{Portfolio, Position};
use crate::results::{PositionPnl, ScenarioResults};

/// Applies `shock` to `params` in place.
///
/// Dimensions the instrument does not carry are left unchanged. Price,
/// volatility and time never go below zero.
pub fn apply_shock(params: &mut MarketParams, shock: &Shock, loading: f64) {
    let Some(base) = params.get(shock.dimension) else {
        return;
    };
    let calculator = calculator_for(shock.dimension, shock.mode);
    let mut value = calculator.stressed_value(base, shock.value, loading);
    if shock.dimension.is_non_negative() {
        value = value.max(0.0);
    }
    params.set(shock.dimension, value);
}

/// Per-column shocks for one position.
enum ColumnShocks<'a> {
    Uniform(&'a [StressPoint]),
    Idiosyncratic {
        grid: &'a IdiosyncraticGrid,
        fractions: &'a [f64],
    },
}

/// Runs stress scenarios against a portfolio.
#[derive(Debug, Clone)]
pub struct StressTestEngine {
    portfolio: Portfolio,
    router: PricingRouter,
    config: EngineConfig,
}

impl StressTestEngine {
    /// Creates an engine with the default configuration.
    #[must_use]
    pub fn new(portfolio: Portfolio, router: PricingRouter) -> Self {
        Self {
            portfolio,
            router,
            config: EngineConfig::default(),
        }
    }

    /// Sets the engine configuration.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// The portfolio under test.
    #[must_use]
    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    /// The pricing router.
    #[must_use]
    pub fn router(&self) -> &PricingRouter {
        &self.router
    }

    /// The engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs one scenario.
    ///
    /// # Errors
    ///
    /// Returns an error if the scenario is invalid or any position fails to
    /// price; the error names the failing position.
    pub fn run_scenario(&self, scenario: &StressScenario) -> EngineResult<ScenarioResults> {
        scenario.validate()?;

        let columns = scenario.columns();
        info!(
            "Running scenario '{}': {} positions x {} stress levels",
            scenario.name,
            self.portfolio.len(),
            columns.len()
        );
        let duplicates = scenario.duplicate_labels();
        if !duplicates.is_empty() {
            warn!(
                "Scenario '{}' has stress levels sharing column labels: {}",
                scenario.name,
                duplicates.join(", ")
            );
        }

        let points;
        let fractions;
        let shocks = match &scenario.grid {
            ScenarioGrid::Uniform { .. } => {
                points = scenario.stress_points();
                ColumnShocks::Uniform(&points)
            }
            ScenarioGrid::Idiosyncratic(grid) => {
                fractions = grid.fractions();
                ColumnShocks::Idiosyncratic {
                    grid,
                    fractions: &fractions,
                }
            }
        };

        let positions = maybe_parallel_map(&self.portfolio.positions, &self.config, |position| {
            self.revalue(position, &shocks, scenario.factor.as_ref())
        })
        .into_iter()
        .collect::<EngineResult<Vec<_>>>()?;

        let aggregates = aggregate(
            &positions,
            scenario.aggregation,
            scenario.factor.as_ref(),
            columns.len(),
        );

        let results = ScenarioResults {
            scenario_name: scenario.name.clone(),
            aggregation: scenario.aggregation,
            columns,
            positions,
            aggregates,
        };

        if let Some((column, pnl)) = results.worst_case() {
            info!(
                "Scenario '{}' complete: worst case {:.2} at {}",
                scenario.name, pnl, column.label
            );
        }
        Ok(results)
    }

    /// Runs several scenarios, returning results in input order.
    ///
    /// # Errors
    ///
    /// Stops at the first scenario that fails.
    pub fn run_scenarios(&self, scenarios: &[StressScenario]) -> EngineResult<Vec<ScenarioResults>> {
        scenarios.iter().map(|s| self.run_scenario(s)).collect()
    }

    fn revalue(
        &self,
        position: &Position,
        shocks: &ColumnShocks<'_>,
        factor: Option<&Factor>,
    ) -> EngineResult<PositionPnl> {
        let pricing_err = |e| EngineError::pricing(&position.id, e);
        let instrument = &position.instrument;
        let underlying = position.underlying();
        let loading = factor.map_or(1.0, |f| f.loading(underlying));
        let scale = position.notional_scale();

        let base_params =
            MarketParams::from_instrument(instrument, self.portfolio.as_of).map_err(pricing_err)?;
        let base_price = self.router.price(instrument, &base_params).map_err(pricing_err)?;

        let stressed = |shocks: &[Shock]| -> EngineResult<f64> {
            let mut params = base_params;
            for shock in shocks {
                apply_shock(&mut params, shock, loading);
            }
            let value = self.router.price(instrument, &params).map_err(pricing_err)?;
            Ok(scale * (value - base_price))
        };

        let pnl = match shocks {
            ColumnShocks::Uniform(points) => points
                .iter()
                .map(|point| stressed(&point.shocks))
                .collect::<EngineResult<Vec<_>>>()?,
            ColumnShocks::Idiosyncratic { grid, fractions } => fractions
                .iter()
                .map(|&fraction| match grid.shock_for(underlying, fraction) {
                    Some(shock) => stressed(std::slice::from_ref(&shock)),
                    None => Ok(0.0),
                })
                .collect::<EngineResult<Vec<_>>>()?,
        };

        debug!(
            "Position {} ({}): base value {:.2}, loading {:.3}",
            position.id,
            instrument.describe(),
            scale * base_price,
            loading
        );

        Ok(PositionPnl {
            position_id: position.id.clone(),
            underlying: underlying.to_string(),
            instrument_type: position.kind(),
            quantity: position.quantity,
            base_value: scale * base_price,
            pnl,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use stress_core::types::{RiskDimension, ShockMode};
    use stress_pricing::{Equity, EquityOption, OptionType};

    #[test]
    fn test_apply_shock_modes() {
        let mut params = MarketParams {
            price: 100.0,
            volatility: Some(0.2),
            time: Some(10.0),
            interest_rate: Some(0.05),
            dividend_yield: Some(0.0),
        };
        apply_shock(&mut params, &Shock::relative(RiskDimension::Price, -0.1), 2.0);
        assert_relative_eq!(params.price, 80.0, epsilon = 1e-12);

        apply_shock(&mut params, &Shock::absolute(RiskDimension::Volatility, 0.05), 1.0);
        assert_relative_eq!(params.volatility.unwrap(), 0.25, epsilon = 1e-12);

        apply_shock(&mut params, &Shock::relative(RiskDimension::Time, 30.0), 2.0);
        assert_eq!(params.time, Some(0.0));
    }

    #[test]
    fn test_apply_shock_floors_price_and_vol() {
        let mut params = MarketParams {
            price: 100.0,
            volatility: Some(0.2),
            ..MarketParams::default()
        };
        apply_shock(&mut params, &Shock::relative(RiskDimension::Price, -1.5), 1.0);
        assert_eq!(params.price, 0.0);
        apply_shock(&mut params, &Shock::absolute(RiskDimension::Volatility, -0.5), 1.0);
        assert_eq!(params.volatility, Some(0.0));
    }

    #[test]
    fn test_apply_shock_skips_missing_dimension() {
        let mut params = MarketParams {
            price: 50.0,
            ..MarketParams::default()
        };
        apply_shock(
            &mut params,
            &Shock {
                dimension: RiskDimension::Volatility,
                value: 0.1,
                mode: ShockMode::Absolute,
            },
            1.0,
        );
        assert_eq!(params.volatility, None);
        assert_eq!(params.price, 50.0);
    }

    #[test]
    fn test_pricing_error_names_position() {
        let portfolio = Portfolio::builder()
            .add_position(Position::new("ok", Equity::new("AAPL", 100.0), 1.0))
            .add_position(Position::new(
                "no-expiry",
                EquityOption::new("AAPL", OptionType::Call, 100.0, 100.0, 0.2),
                1.0,
            ))
            .build()
            .unwrap();
        let engine = StressTestEngine::new(portfolio, PricingRouter::new());
        let scenario =
            stress_core::scenarios::build_price_stress_scenario("s", 1, 1, 0.1, None).unwrap();

        match engine.run_scenario(&scenario) {
            Err(EngineError::Pricing { position_id, .. }) => assert_eq!(position_id, "no-expiry"),
            other => panic!("expected pricing error, got {other:?}"),
        }
    }

    #[test]
    fn test_close_levels_keep_separate_columns() {
        let portfolio = Portfolio::builder()
            .add_position(Position::new("eq", Equity::new("AAPL", 100.0), 100.0))
            .build()
            .unwrap();
        let engine = StressTestEngine::new(portfolio, PricingRouter::new());
        let array = stress_core::RiskArray::custom(
            RiskDimension::Price,
            vec![0.0101, 0.0104],
            ShockMode::Relative,
        )
        .unwrap();
        let scenario = StressScenario::new("close", vec![array]).unwrap();
        assert_eq!(scenario.duplicate_labels(), ["0.010"]);

        let results = engine.run_scenario(&scenario).unwrap();
        assert_eq!(results.labels(), ["0.010", "0.010"]);
        let pnl = &results.position("eq").unwrap().pnl;
        assert_relative_eq!(pnl[0], 101.0, epsilon = 1e-9);
        assert_relative_eq!(pnl[1], 104.0, epsilon = 1e-9);
    }
}
