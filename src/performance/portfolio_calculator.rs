//! Portfolio-level aggregation across holdings.
//!
//! Invested capital and market value compose additively, so ROI, net return
//! and CAGR are computed from the summed totals. Time-weighted returns do
//! not compose additively: the portfolio TWRR here is the investment-
//! weighted average of each holding's own TWRR, an approximation chosen so
//! that a holding's reported return never depends on which other holdings
//! happen to exist. A rigorous multi-asset TWRR would chain the interleaved
//! cash flows of every holding; that is deliberately not done here.
//!
//! The money-weighted return works on the merged flows instead: all
//! contributions become one event list, discounted against an equivalent
//! unit price chosen so the merged units value to the portfolio total.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::contributions::{ContributionEvent, Holding, Portfolio};
use crate::performance::irr_calculator::money_weighted_return;
use crate::performance::performance_calculator::{
    annualize_growth, annualized_time_weighted_return, current_value, duration_months,
    time_weighted_return, total_invested, total_units,
};
use crate::performance::performance_model::PortfolioPerformance;

/// Sum of cash invested across active holdings.
pub fn portfolio_invested(portfolio: &Portfolio) -> Decimal {
    portfolio
        .active_holdings()
        .map(|holding| total_invested(&holding.contributions))
        .sum()
}

/// Sum of market values across active holdings, each at its own price.
pub fn portfolio_value(portfolio: &Portfolio) -> Decimal {
    portfolio
        .active_holdings()
        .map(|holding| current_value(&holding.contributions, holding.current_unit_price))
        .sum()
}

/// Signed portfolio gain or loss in currency units.
pub fn portfolio_net_return(portfolio: &Portfolio) -> Decimal {
    portfolio_value(portfolio) - portfolio_invested(portfolio)
}

/// Portfolio ROI from the summed totals, as a percentage.
pub fn portfolio_return_on_investment(portfolio: &Portfolio) -> Decimal {
    let invested = portfolio_invested(portfolio);
    if invested.is_zero() {
        return Decimal::ZERO;
    }
    (portfolio_value(portfolio) - invested) / invested * Decimal::ONE_HUNDRED
}

/// Whole months since the earliest contribution in any active holding.
pub fn portfolio_duration_months(portfolio: &Portfolio, now: NaiveDate) -> i64 {
    duration_months(&merged_events(portfolio), now)
}

/// Portfolio CAGR from the summed totals, as a percentage.
pub fn portfolio_annualized_growth_rate(portfolio: &Portfolio, now: NaiveDate) -> Decimal {
    let invested = portfolio_invested(portfolio);
    if invested.is_zero() {
        return Decimal::ZERO;
    }
    let months = portfolio_duration_months(portfolio, now);
    if months < 1 {
        return Decimal::ZERO;
    }
    annualize_growth(portfolio_value(portfolio) / invested, months)
}

/// Investment-weighted average of per-holding TWRRs, as a percentage.
pub fn portfolio_time_weighted_return(portfolio: &Portfolio) -> Decimal {
    investment_weighted(portfolio, |holding| {
        time_weighted_return(&holding.contributions, holding.current_unit_price)
    })
}

/// Investment-weighted average of per-holding annualized TWRRs.
pub fn portfolio_annualized_time_weighted_return(portfolio: &Portfolio, now: NaiveDate) -> Decimal {
    investment_weighted(portfolio, |holding| {
        annualized_time_weighted_return(&holding.contributions, holding.current_unit_price, now)
    })
}

/// Money-weighted return over the merged contribution flows of all active
/// holdings, as a percentage. `None` when undefined.
pub fn portfolio_money_weighted_return(portfolio: &Portfolio, now: NaiveDate) -> Option<Decimal> {
    let merged = merged_events(portfolio);
    let units = total_units(&merged);
    // Equivalent price: values the merged units at the portfolio total, so
    // the final inflow matches the sum of per-holding valuations.
    let equivalent_price = if units > Decimal::ZERO {
        portfolio_value(portfolio) / units
    } else {
        Decimal::ZERO
    };
    money_weighted_return(&merged, equivalent_price, now)
}

/// All portfolio-level metrics in one pass.
pub fn portfolio_performance(portfolio: &Portfolio, now: NaiveDate) -> PortfolioPerformance {
    PortfolioPerformance {
        total_invested: portfolio_invested(portfolio),
        current_value: portfolio_value(portfolio),
        net_return: portfolio_net_return(portfolio),
        return_on_investment: portfolio_return_on_investment(portfolio),
        duration_months: portfolio_duration_months(portfolio, now),
        annualized_growth_rate: portfolio_annualized_growth_rate(portfolio, now),
        time_weighted_return: portfolio_time_weighted_return(portfolio),
        annualized_time_weighted_return: portfolio_annualized_time_weighted_return(portfolio, now),
        money_weighted_return: portfolio_money_weighted_return(portfolio, now),
    }
}

fn merged_events(portfolio: &Portfolio) -> Vec<ContributionEvent> {
    portfolio
        .active_holdings()
        .flat_map(|holding| holding.contributions.iter().cloned())
        .collect()
}

fn investment_weighted(portfolio: &Portfolio, metric: impl Fn(&Holding) -> Decimal) -> Decimal {
    let mut weighted = Decimal::ZERO;
    let mut invested_total = Decimal::ZERO;
    for holding in portfolio.active_holdings() {
        let invested = total_invested(&holding.contributions);
        weighted += metric(holding) * invested;
        invested_total += invested;
    }
    if invested_total > Decimal::ZERO {
        weighted / invested_total
    } else {
        Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn holding_with(
        id: &str,
        purchases: &[(&str, Decimal, Decimal)],
        current_price: Decimal,
    ) -> Holding {
        let mut holding = Holding::new(id, id, dec!(100), current_price).unwrap();
        for &(day, amount, price) in purchases {
            holding.add_contribution(ContributionEvent::new(date(day), amount, price).unwrap());
        }
        holding
    }

    fn assert_approx(actual: Decimal, expected: Decimal) {
        let tolerance = dec!(0.000000001);
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {} within {} of {}",
            actual,
            tolerance,
            expected
        );
    }

    #[test]
    fn test_totals_compose_additively() {
        let portfolio = Portfolio::new(vec![
            holding_with("a", &[("2023-01-01", dec!(1000), dec!(10))], dec!(11)),
            holding_with("b", &[("2023-03-01", dec!(500), dec!(5))], dec!(6)),
        ]);
        assert_eq!(portfolio_invested(&portfolio), dec!(1500));
        assert_eq!(portfolio_value(&portfolio), dec!(1700));
        assert_eq!(portfolio_net_return(&portfolio), dec!(200));
    }

    #[test]
    fn test_weighted_twrr_uses_invested_weights() {
        // Holding a: 10% TWRR with weight 1000; holding b: 20% with 3000.
        let portfolio = Portfolio::new(vec![
            holding_with("a", &[("2023-01-01", dec!(1000), dec!(10))], dec!(11)),
            holding_with("b", &[("2023-01-01", dec!(3000), dec!(10))], dec!(12)),
        ]);
        assert_approx(portfolio_time_weighted_return(&portfolio), dec!(17.5));
    }

    #[test]
    fn test_archived_holdings_are_excluded() {
        let mut stale = holding_with("old", &[("2020-01-01", dec!(9999), dec!(1))], dec!(2));
        stale.archived = true;
        let portfolio = Portfolio::new(vec![
            stale,
            holding_with("a", &[("2023-01-01", dec!(1000), dec!(10))], dec!(11)),
        ]);
        assert_eq!(portfolio_invested(&portfolio), dec!(1000));
        assert_eq!(portfolio_duration_months(&portfolio, date("2024-01-01")), 12);
    }

    #[test]
    fn test_empty_portfolio_sentinels() {
        let portfolio = Portfolio::default();
        let now = date("2024-01-01");
        assert_eq!(portfolio_return_on_investment(&portfolio), Decimal::ZERO);
        assert_eq!(portfolio_time_weighted_return(&portfolio), Decimal::ZERO);
        assert_eq!(portfolio_annualized_growth_rate(&portfolio, now), Decimal::ZERO);
        assert_eq!(portfolio_money_weighted_return(&portfolio, now), None);
    }

    #[test]
    fn test_single_holding_mwr_matches_holding_level() {
        // With one holding the equivalent price reduces to its own price.
        let holding = holding_with("a", &[("2023-01-01", dec!(1000), dec!(10))], dec!(11));
        let portfolio = Portfolio::new(vec![holding.clone()]);
        let now = date("2024-01-01");

        let direct = money_weighted_return(&holding.contributions, dec!(11), now);
        assert_eq!(portfolio_money_weighted_return(&portfolio, now), direct);
        assert!(direct.is_some());
    }

    #[test]
    fn test_portfolio_performance_is_consistent() {
        let portfolio = Portfolio::new(vec![
            holding_with("a", &[("2023-01-01", dec!(1000), dec!(10))], dec!(11)),
            holding_with("b", &[("2023-06-01", dec!(500), dec!(5))], dec!(4)),
        ]);
        let now = date("2024-01-01");
        let perf = portfolio_performance(&portfolio, now);

        assert_eq!(perf.total_invested, dec!(1500));
        assert_eq!(perf.current_value, dec!(1500));
        assert_eq!(perf.net_return, Decimal::ZERO);
        assert_eq!(perf.return_on_investment, Decimal::ZERO);
        assert_eq!(perf.duration_months, 12);
    }
}
