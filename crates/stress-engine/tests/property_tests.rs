//! Property-based tests for stress runs.

use proptest::prelude::*;
use stress_core::prelude::*;
use stress_engine::prelude::*;
use stress_pricing::{Equity, EquityOption, OptionType, PricingRouter};

fn position_strategy() -> impl Strategy<Value = (usize, f64, f64, bool)> {
    (
        0usize..4,           // underlying index
        10.0..500.0f64,      // spot
        -100.0..100.0f64,    // quantity
        any::<bool>(),       // option or equity
    )
}

const SYMBOLS: [&str; 4] = ["AAPL", "MSFT", "NVDA", "TSLA"];

fn build_portfolio(specs: &[(usize, f64, f64, bool)]) -> Portfolio {
    PortfolioBuilder::new()
        .add_positions(specs.iter().enumerate().map(|(i, &(sym, spot, qty, is_option))| {
            let symbol = SYMBOLS[sym];
            let id = format!("p{i}");
            if is_option {
                let option = EquityOption::new(symbol, OptionType::Call, spot, spot, 0.3)
                    .with_dte(45.0)
                    .with_rate(0.02);
                Position::new(id, option, qty)
            } else {
                Position::new(id, Equity::new(symbol, spot), qty)
            }
        }))
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn aggregates_sum_positions(
        specs in prop::collection::vec(position_strategy(), 0..12),
        step in 0.01..0.2f64,
    ) {
        let engine = StressTestEngine::new(build_portfolio(&specs), PricingRouter::new());
        let scenario = build_price_stress_scenario("s", 2, 2, step, None).unwrap();
        let results = engine.run_scenario(&scenario).unwrap();

        let total = results.total_pnl();
        for col in 0..results.column_count() {
            let by_underlying: f64 = results.aggregates.iter().map(|a| a.pnl[col]).sum();
            prop_assert!((by_underlying - total[col]).abs() <= 1e-6 * (1.0 + total[col].abs()));
        }
        for agg in &results.aggregates {
            prop_assert_eq!(agg.pnl.len(), results.column_count());
        }
    }

    #[test]
    fn zero_shock_gives_zero_pnl(specs in prop::collection::vec(position_strategy(), 1..8)) {
        let engine = StressTestEngine::new(build_portfolio(&specs), PricingRouter::new());
        let scenario = build_price_stress_scenario("s", 1, 1, 0.05, None).unwrap();
        let results = engine.run_scenario(&scenario).unwrap();
        for position in &results.positions {
            prop_assert_eq!(position.pnl[1], 0.0);
        }
    }

    #[test]
    fn parallel_matches_sequential(specs in prop::collection::vec(position_strategy(), 0..20)) {
        let portfolio = build_portfolio(&specs);
        let scenario = build_price_vol_stress_scenario("pv", (1, 1, 0.1), (1, 1, 0.1)).unwrap();

        let sequential = StressTestEngine::new(portfolio.clone(), PricingRouter::new())
            .with_config(EngineConfig::sequential())
            .run_scenario(&scenario)
            .unwrap();
        let parallel = StressTestEngine::new(portfolio, PricingRouter::new())
            .with_config(EngineConfig::new().with_threshold(1))
            .run_scenario(&scenario)
            .unwrap();
        prop_assert_eq!(sequential, parallel);
    }

    #[test]
    fn long_equity_pnl_is_monotone_in_price(
        spot in 1.0..1000.0f64,
        qty in 1.0..1000.0f64,
    ) {
        let portfolio = PortfolioBuilder::new()
            .add_position(Position::new("e", Equity::new("XYZ", spot), qty))
            .build()
            .unwrap();
        let engine = StressTestEngine::new(portfolio, PricingRouter::new());
        let scenario = build_price_stress_scenario("s", 3, 3, 0.05, None).unwrap();
        let pnl = &engine.run_scenario(&scenario).unwrap().positions[0].pnl;
        prop_assert!(pnl.windows(2).all(|w| w[0] < w[1]));
    }
}
