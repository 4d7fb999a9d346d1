//! 성과 집계기.
//!
//! 거래와 알림 목록을 한 번에 환원하여 [`AnalyticsReport`]를 만듭니다.
//! 입력 순서는 신뢰하지 않으며, 청산일 순으로 안정 정렬한 뒤 계산합니다.
//! 같은 입력에 대해 항상 같은 결과를 반환합니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tracing::debug;
use trader_core::{AlertRecord, AnalyticsConfig, ClosedTrade};

/// 기본 최소 낙폭 깊이 (%).
pub const DEFAULT_MIN_DRAWDOWN_PERCENT: f64 = 1.0;

use crate::performance::{
    best_and_worst_month, monthly_performance, setup_performance, streak_runs,
    ticker_performance, AlertEffectiveness, AnalyticsSummary, MonthlyPerformance,
    SetupPerformance, StreakAnalysis, StreakRun, TickerPerformance,
};
use crate::portfolio::{daily_pnl, DailyPnl, DrawdownPeriod, EquityCurve, EquityPoint};

/// 기간 하나에 대한 전체 분석 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub summary: AnalyticsSummary,
    pub streaks: StreakAnalysis,
    pub alert_effectiveness: AlertEffectiveness,
    /// 월별 성과 (시간 오름차순)
    pub monthly: Vec<MonthlyPerformance>,
    /// 종목별 성과 (총 손익 내림차순)
    pub by_ticker: Vec<TickerPerformance>,
    /// 셋업별 성과 (거래 수 내림차순)
    pub by_setup: Vec<SetupPerformance>,
    /// 거래별 자산 곡선
    pub equity_curve: Vec<EquityPoint>,
    pub daily_pnl: Vec<DailyPnl>,
    /// 낙폭 구간 (큰 순서)
    pub drawdown_periods: Vec<DrawdownPeriod>,
    pub streak_runs: Vec<StreakRun>,
    pub best_month: Option<MonthlyPerformance>,
    pub worst_month: Option<MonthlyPerformance>,
}

impl AnalyticsReport {
    pub fn is_empty(&self) -> bool {
        self.summary.total_trades == 0
    }
}

/// 성과 집계기.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsAggregator {
    starting_equity: Decimal,
    min_drawdown_percent: f64,
}

impl Default for MetricsAggregator {
    fn default() -> Self {
        Self::from_config(&AnalyticsConfig::default())
    }
}

impl MetricsAggregator {
    /// 시작 자본을 지정하여 집계기를 생성합니다.
    pub fn new(starting_equity: Decimal) -> Self {
        Self {
            starting_equity,
            min_drawdown_percent: DEFAULT_MIN_DRAWDOWN_PERCENT,
        }
    }

    pub fn from_config(config: &AnalyticsConfig) -> Self {
        Self::new(config.starting_equity).with_min_drawdown_percent(config.min_drawdown_percent)
    }

    /// 시작 자본을 바꿉니다.
    pub fn with_starting_equity(mut self, starting_equity: Decimal) -> Self {
        self.starting_equity = starting_equity;
        self
    }

    /// 리포트에 남길 낙폭 기간의 최소 깊이(%)를 지정합니다.
    pub fn with_min_drawdown_percent(mut self, min_percent: f64) -> Self {
        self.min_drawdown_percent = min_percent;
        self
    }

    pub fn starting_equity(&self) -> Decimal {
        self.starting_equity
    }

    pub fn min_drawdown_percent(&self) -> f64 {
        self.min_drawdown_percent
    }

    /// 거래와 알림에서 분석 결과를 계산합니다.
    ///
    /// 빈 입력도 허용하며, 이 경우 모든 지표가 문서화된 기본값(0, 빈 목록)입니다.
    pub fn compute(&self, trades: &[ClosedTrade], alerts: &[AlertRecord]) -> AnalyticsReport {
        let trades = order_by_exit(trades);
        let trades = trades.as_ref();

        debug!(
            trades = trades.len(),
            alerts = alerts.len(),
            starting_equity = %self.starting_equity,
            "Computing analytics report"
        );

        let curve = EquityCurve::from_trades(trades, self.starting_equity);
        let summary = AnalyticsSummary::from_parts(trades, &curve, alerts.len());
        let runs = streak_runs(trades);
        let streaks = StreakAnalysis::from_runs(trades, &runs);
        let monthly = monthly_performance(trades);
        let (best_month, worst_month) = best_and_worst_month(&monthly);
        let drawdown_periods = curve.significant_drawdowns(self.min_drawdown_percent);

        AnalyticsReport {
            summary,
            streaks,
            alert_effectiveness: AlertEffectiveness::compute(alerts, trades),
            by_ticker: ticker_performance(trades),
            by_setup: setup_performance(trades),
            daily_pnl: daily_pnl(trades),
            equity_curve: curve.into_points(),
            drawdown_periods,
            streak_runs: runs,
            best_month,
            worst_month,
            monthly,
        }
    }
}

/// 이미 청산일 순이면 빌려 쓰고, 아니면 복사 후 안정 정렬합니다.
fn order_by_exit(trades: &[ClosedTrade]) -> Cow<'_, [ClosedTrade]> {
    if trades.windows(2).all(|w| w[0].exit_date <= w[1].exit_date) {
        Cow::Borrowed(trades)
    } else {
        let mut sorted = trades.to_vec();
        sorted.sort_by_key(|t| t.exit_date);
        Cow::Owned(sorted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use crate::performance::StreakType;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    #[test]
    fn test_compute_orders_input() {
        let trades = vec![
            ClosedTrade::new("B", date(1, 1), date(1, 20), -5.0, dec!(-500)),
            ClosedTrade::new("A", date(1, 1), date(1, 10), 10.0, dec!(1000)),
        ];
        let report = MetricsAggregator::new(dec!(10000)).compute(&trades, &[]);

        assert_eq!(report.equity_curve[0].date, date(1, 10));
        assert_eq!(report.equity_curve[1].equity, dec!(10500));
        assert_eq!(report.streaks.current_streak_type, StreakType::Loss);
    }

    #[test]
    fn test_compute_empty() {
        let report = MetricsAggregator::default().compute(&[], &[]);

        assert!(report.is_empty());
        assert!(report.equity_curve.is_empty());
        assert!(report.monthly.is_empty());
        assert!(report.best_month.is_none());
        assert_eq!(report.summary.max_drawdown_percent, 0.0);
        assert_eq!(report.streaks.current_streak, 0);
    }

    #[test]
    fn test_compute_saturates_extreme_pnl() {
        let trades = vec![
            ClosedTrade::new("A", date(1, 1), date(1, 10), 10.0, Decimal::MAX),
            ClosedTrade::new("B", date(1, 1), date(1, 11), 10.0, Decimal::MAX),
            ClosedTrade::new("C", date(1, 1), date(1, 12), -10.0, Decimal::MIN),
        ];
        let report = MetricsAggregator::default().compute(&trades, &[]);

        assert_eq!(report.summary.total_trades, 3);
        assert_eq!(report.equity_curve[1].equity, Decimal::MAX);
        assert!(report.equity_curve.iter().all(|p| p.drawdown_percent <= 0.0));
        assert!(report.summary.max_drawdown_percent.is_finite());
        assert_eq!(report.daily_pnl.len(), 3);
    }

    #[test]
    fn test_compute_tiny_starting_equity() {
        let trades = vec![ClosedTrade::new("A", date(1, 1), date(1, 10), -5.0, dec!(-500))];
        let report = MetricsAggregator::new(dec!(0.0000000000000000000000000001)).compute(&trades, &[]);

        let point = &report.equity_curve[0];
        assert!(point.drawdown_percent.is_finite());
        assert!(point.drawdown_percent < -100.0);
    }

    #[test]
    fn test_default_starting_equity() {
        assert_eq!(MetricsAggregator::default().starting_equity(), dec!(10000));
        assert_eq!(
            MetricsAggregator::default().min_drawdown_percent(),
            DEFAULT_MIN_DRAWDOWN_PERCENT
        );
    }

    #[test]
    fn test_shallow_drawdowns_filtered() {
        // 10000 → 10500 → 10450 (-0.48%) → 10600 → 9540 (-10%)
        let trades = vec![
            ClosedTrade::new("A", date(2, 1), date(2, 2), 5.0, dec!(500)),
            ClosedTrade::new("A", date(2, 1), date(2, 3), -0.5, dec!(-50)),
            ClosedTrade::new("A", date(2, 1), date(2, 4), 1.5, dec!(150)),
            ClosedTrade::new("A", date(2, 1), date(2, 5), -10.0, dec!(-1060)),
        ];

        let report = MetricsAggregator::default().compute(&trades, &[]);
        assert_eq!(report.drawdown_periods.len(), 1);
        assert_eq!(report.drawdown_periods[0].start_date, date(2, 4));

        let all = MetricsAggregator::default()
            .with_min_drawdown_percent(0.0)
            .compute(&trades, &[]);
        assert_eq!(all.drawdown_periods.len(), 2);
    }
}
