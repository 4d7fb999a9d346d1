//! 자산 곡선 및 낙폭 분석 모듈
//!
//! 청산일 순으로 정렬된 거래의 실현 손익을 시작 자본 위에 누적하여
//! 자산 곡선을 만들고, 각 지점의 고점 대비 낙폭을 계산합니다.
//!
//! # 낙폭 부호 규칙
//!
//! 낙폭 값은 항상 0 이하입니다. 고점에서는 0, 고점 대비 5% 하락이면 -5.0입니다.
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! use trader_analytics::portfolio::EquityCurve;
//! use rust_decimal_macros::dec;
//!
//! let curve = EquityCurve::from_trades(&trades, dec!(10000));
//! println!("최대 낙폭: {:.2}%", curve.max_drawdown_percent());
//!
//! for period in curve.top_drawdowns(3) {
//!     println!("{} ~ {:?}: {:.2}%", period.start_date, period.end_date, period.max_drawdown_percent);
//! }
//! ```

use chrono::NaiveDate;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use trader_core::ClosedTrade;

/// 자산 곡선의 한 지점 (거래 1건 청산 직후).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    /// 청산일
    pub date: NaiveDate,
    /// 총 자산 (시작 자본 + 누적 손익)
    pub equity: Decimal,
    /// 누적 실현 손익
    pub cumulative_pnl: Decimal,
    /// 고점 대비 낙폭 금액 (0 이하)
    pub drawdown: Decimal,
    /// 고점 대비 낙폭 비율 (%, 0 이하)
    pub drawdown_percent: f64,
}

/// Drawdown 기간 정보.
///
/// 고점에서 시작해 최저점을 거쳐 고점을 회복할 때까지의 구간입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawdownPeriod {
    /// 시작일 (고점)
    pub start_date: NaiveDate,
    /// 최저점 날짜
    pub trough_date: NaiveDate,
    /// 회복일 (진행 중이면 None)
    pub end_date: Option<NaiveDate>,
    /// 고점 자산
    pub peak_equity: Decimal,
    /// 최저점 자산
    pub trough_equity: Decimal,
    /// 최대 낙폭 금액 (0 이하)
    pub max_drawdown: Decimal,
    /// 최대 낙폭 비율 (%, 0 이하)
    pub max_drawdown_percent: f64,
    /// 고점부터 회복(또는 마지막 거래)까지 일수
    pub duration_days: i64,
    /// 최저점부터 회복까지 일수
    pub recovery_days: Option<i64>,
}

impl DrawdownPeriod {
    /// 아직 회복하지 못한 구간인지 확인합니다.
    pub fn is_ongoing(&self) -> bool {
        self.end_date.is_none()
    }
}

/// 고점 대비 낙폭 비율을 계산합니다. 고점이 0 이하이면 0을 반환합니다.
///
/// Decimal 범위를 넘는 비율(아주 작은 고점 등)은 f64로 계산합니다.
pub fn drawdown_percent(equity: Decimal, peak: Decimal) -> f64 {
    if peak <= Decimal::ZERO {
        return 0.0;
    }
    let diff = equity.saturating_sub(peak);
    let pct = diff
        .checked_div(peak)
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
        .and_then(|pct| pct.to_f64())
        .unwrap_or_else(|| {
            let peak = peak.to_f64().unwrap_or(f64::MIN_POSITIVE);
            diff.to_f64().unwrap_or(0.0) / peak * 100.0
        });
    if pct.is_finite() {
        pct.min(0.0)
    } else {
        0.0
    }
}

/// 자산 곡선.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquityCurve {
    starting_equity: Decimal,
    peak: Decimal,
    cumulative_pnl: Decimal,
    points: Vec<EquityPoint>,
}

impl EquityCurve {
    /// 빈 자산 곡선을 생성합니다. 시작 자본이 첫 고점이 됩니다.
    pub fn new(starting_equity: Decimal) -> Self {
        Self {
            starting_equity,
            peak: starting_equity,
            cumulative_pnl: Decimal::ZERO,
            points: Vec::new(),
        }
    }

    /// 청산일 순 거래로 자산 곡선을 만듭니다.
    pub fn from_trades(trades: &[ClosedTrade], starting_equity: Decimal) -> Self {
        let mut curve = Self::new(starting_equity);
        for trade in trades {
            curve.add_trade(trade);
        }
        curve
    }

    /// 거래 1건의 실현 손익을 반영합니다.
    ///
    /// 누적 손익과 자산은 Decimal 범위에서 포화됩니다.
    pub fn add_trade(&mut self, trade: &ClosedTrade) {
        self.cumulative_pnl = self.cumulative_pnl.saturating_add(trade.pnl_dollar);
        let equity = self.starting_equity.saturating_add(self.cumulative_pnl);

        if equity > self.peak {
            self.peak = equity;
        }

        let drawdown = equity.saturating_sub(self.peak).min(Decimal::ZERO);
        self.points.push(EquityPoint {
            date: trade.exit_date,
            equity,
            cumulative_pnl: self.cumulative_pnl,
            drawdown,
            drawdown_percent: drawdown_percent(equity, self.peak),
        });
    }

    pub fn starting_equity(&self) -> Decimal {
        self.starting_equity
    }

    pub fn points(&self) -> &[EquityPoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<EquityPoint> {
        self.points
    }

    /// 최종 자산 (거래가 없으면 시작 자본).
    pub fn final_equity(&self) -> Decimal {
        self.starting_equity.saturating_add(self.cumulative_pnl)
    }

    /// 최대 낙폭 비율 (%, 0 이하). 거래가 없으면 0입니다.
    pub fn max_drawdown_percent(&self) -> f64 {
        self.points
            .iter()
            .map(|p| p.drawdown_percent)
            .fold(0.0, f64::min)
    }

    /// 최대 낙폭 금액 (0 이하).
    pub fn max_drawdown(&self) -> Decimal {
        self.points
            .iter()
            .map(|p| p.drawdown)
            .min()
            .unwrap_or(Decimal::ZERO)
            .min(Decimal::ZERO)
    }

    /// Drawdown 기간들을 분석합니다.
    ///
    /// # 반환값
    ///
    /// 낙폭이 큰 순서로 정렬된 기간 목록. 같은 낙폭이면 먼저 시작한 기간이 앞섭니다.
    pub fn analyze_drawdowns(&self) -> Vec<DrawdownPeriod> {
        let Some(first) = self.points.first() else {
            return Vec::new();
        };

        let mut periods = Vec::new();
        let mut peak = self.starting_equity;
        let mut peak_date = first.date;
        let mut in_drawdown = false;
        let mut trough = peak;
        let mut trough_date = peak_date;

        for point in &self.points {
            if point.equity >= peak {
                // 새 고점 또는 회복
                if in_drawdown {
                    periods.push(Self::period(
                        (peak, peak_date),
                        (trough, trough_date),
                        Some(point.date),
                    ));
                    in_drawdown = false;
                }

                peak = point.equity;
                peak_date = point.date;
                trough = peak;
                trough_date = peak_date;
            } else {
                in_drawdown = true;
                if point.equity < trough {
                    trough = point.equity;
                    trough_date = point.date;
                }
            }
        }

        // 현재 진행 중인 Drawdown
        if in_drawdown {
            let last_date = self.points.last().map_or(peak_date, |p| p.date);
            let mut period = Self::period((peak, peak_date), (trough, trough_date), None);
            period.duration_days = (last_date - peak_date).num_days();
            periods.push(period);
        }

        periods.sort_by(|a, b| {
            a.max_drawdown_percent
                .total_cmp(&b.max_drawdown_percent)
                .then(a.start_date.cmp(&b.start_date))
        });

        periods
    }

    /// 최소 깊이보다 깊은 Drawdown 기간만 반환합니다.
    ///
    /// # 매개변수
    ///
    /// * `min_percent` - 최소 낙폭 크기 (%, 양수). 0 이하이면 모든 기간을 반환합니다.
    pub fn significant_drawdowns(&self, min_percent: f64) -> Vec<DrawdownPeriod> {
        let mut periods = self.analyze_drawdowns();
        if min_percent > 0.0 {
            periods.retain(|p| p.max_drawdown_percent < -min_percent);
        }
        periods
    }

    /// 상위 N개 Drawdown 기간을 반환합니다.
    pub fn top_drawdowns(&self, n: usize) -> Vec<DrawdownPeriod> {
        self.analyze_drawdowns().into_iter().take(n).collect()
    }

    fn period(
        (peak, peak_date): (Decimal, NaiveDate),
        (trough, trough_date): (Decimal, NaiveDate),
        end_date: Option<NaiveDate>,
    ) -> DrawdownPeriod {
        DrawdownPeriod {
            start_date: peak_date,
            trough_date,
            end_date,
            peak_equity: peak,
            trough_equity: trough,
            max_drawdown: trough.saturating_sub(peak).min(Decimal::ZERO),
            max_drawdown_percent: drawdown_percent(trough, peak),
            duration_days: end_date.map_or(0, |end| (end - peak_date).num_days()),
            recovery_days: end_date.map(|end| (end - trough_date).num_days()),
        }
    }
}

/// 일별 손익 집계.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPnl {
    pub date: NaiveDate,
    /// 당일 실현 손익
    pub pnl: Decimal,
    /// 당일 청산 거래 수익률 합계 (%)
    pub pnl_percent: f64,
    pub cumulative_pnl: Decimal,
    pub cumulative_pnl_percent: f64,
    /// 당일 청산 거래 수
    pub trade_count: usize,
}

/// 청산일 기준으로 일별 손익을 집계합니다. 날짜 오름차순입니다.
pub fn daily_pnl(trades: &[ClosedTrade]) -> Vec<DailyPnl> {
    let mut by_date: BTreeMap<NaiveDate, (Decimal, f64, usize)> = BTreeMap::new();
    for trade in trades {
        let entry = by_date
            .entry(trade.exit_date)
            .or_insert((Decimal::ZERO, 0.0, 0));
        entry.0 = entry.0.saturating_add(trade.pnl_dollar);
        entry.1 += trade.pnl_percent;
        entry.2 += 1;
    }

    let mut cumulative_pnl = Decimal::ZERO;
    let mut cumulative_pnl_percent = 0.0;
    by_date
        .into_iter()
        .map(|(date, (pnl, pnl_percent, trade_count))| {
            cumulative_pnl = cumulative_pnl.saturating_add(pnl);
            cumulative_pnl_percent += pnl_percent;
            DailyPnl {
                date,
                pnl,
                pnl_percent,
                cumulative_pnl,
                cumulative_pnl_percent,
                trade_count,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn trade(exit_day: u32, pnl_percent: f64, pnl_dollar: Decimal) -> ClosedTrade {
        ClosedTrade::new("TEST", date(1), date(exit_day), pnl_percent, pnl_dollar)
    }

    fn create_test_trades() -> Vec<ClosedTrade> {
        vec![
            trade(2, 10.0, dec!(1000)),  // 11000 (고점)
            trade(3, -5.0, dec!(-550)),  // 10450
            trade(4, -5.0, dec!(-550)),  // 9900  (최저점)
            trade(6, 15.0, dec!(1500)),  // 11400 (회복, 새 고점)
            trade(8, -2.0, dec!(-228)),  // 11172 (진행 중)
        ]
    }

    #[test]
    fn test_equity_curve_points() {
        let curve = EquityCurve::from_trades(&create_test_trades(), dec!(10000));
        let points = curve.points();

        assert_eq!(points.len(), 5);
        assert_eq!(points[0].equity, dec!(11000));
        assert_eq!(points[0].drawdown_percent, 0.0);
        assert_eq!(points[2].equity, dec!(9900));
        assert_eq!(points[2].drawdown, dec!(-1100));
        assert!((points[2].drawdown_percent - (-10.0)).abs() < 1e-9);
        assert_eq!(curve.final_equity(), dec!(11172));
    }

    #[test]
    fn test_max_drawdown() {
        let curve = EquityCurve::from_trades(&create_test_trades(), dec!(10000));
        assert!((curve.max_drawdown_percent() - (-10.0)).abs() < 1e-9);
        assert_eq!(curve.max_drawdown(), dec!(-1100));
    }

    #[test]
    fn test_all_winning_has_no_drawdown() {
        let trades = vec![trade(2, 1.0, dec!(100)), trade(3, 2.0, dec!(200))];
        let curve = EquityCurve::from_trades(&trades, dec!(10000));

        assert_eq!(curve.max_drawdown_percent(), 0.0);
        assert!(curve.points().iter().all(|p| p.drawdown_percent == 0.0));
        assert!(curve.analyze_drawdowns().is_empty());
    }

    #[test]
    fn test_first_trade_loss_measured_from_starting_equity() {
        let trades = vec![trade(2, -5.0, dec!(-500))];
        let curve = EquityCurve::from_trades(&trades, dec!(10000));
        assert!((curve.max_drawdown_percent() - (-5.0)).abs() < 1e-9);
    }

    #[test]
    fn test_empty_curve() {
        let curve = EquityCurve::from_trades(&[], dec!(10000));
        assert!(curve.points().is_empty());
        assert_eq!(curve.max_drawdown_percent(), 0.0);
        assert_eq!(curve.final_equity(), dec!(10000));
        assert!(curve.analyze_drawdowns().is_empty());
    }

    #[test]
    fn test_zero_starting_equity_never_divides() {
        let trades = vec![trade(2, -5.0, dec!(-500)), trade(3, 1.0, dec!(100))];
        let curve = EquityCurve::from_trades(&trades, Decimal::ZERO);
        assert!(curve.points().iter().all(|p| p.drawdown_percent == 0.0));
    }

    #[test]
    fn test_analyze_drawdowns() {
        let curve = EquityCurve::from_trades(&create_test_trades(), dec!(10000));
        let periods = curve.analyze_drawdowns();

        assert_eq!(periods.len(), 2);

        // 가장 큰 낙폭이 먼저
        let worst = &periods[0];
        assert_eq!(worst.start_date, date(2));
        assert_eq!(worst.trough_date, date(4));
        assert_eq!(worst.end_date, Some(date(6)));
        assert_eq!(worst.max_drawdown, dec!(-1100));
        assert_eq!(worst.duration_days, 4);
        assert_eq!(worst.recovery_days, Some(2));

        let ongoing = &periods[1];
        assert!(ongoing.is_ongoing());
        assert_eq!(ongoing.start_date, date(6));
        assert!(ongoing.max_drawdown_percent < 0.0);
        assert_eq!(ongoing.duration_days, 2);

        assert_eq!(curve.top_drawdowns(1).len(), 1);
    }

    #[test]
    fn test_significant_drawdowns_threshold() {
        // 첫 구간 -10%, 진행 중 구간 -2%
        let curve = EquityCurve::from_trades(&create_test_trades(), dec!(10000));

        assert_eq!(curve.significant_drawdowns(0.0).len(), 2);
        assert_eq!(curve.significant_drawdowns(1.0).len(), 2);

        let deep = curve.significant_drawdowns(5.0);
        assert_eq!(deep.len(), 1);
        assert_eq!(deep[0].start_date, date(2));

        assert!(curve.significant_drawdowns(10.0).is_empty());
    }

    #[test]
    fn test_daily_pnl() {
        let trades = vec![
            trade(2, 10.0, dec!(1000)),
            trade(2, -4.0, dec!(-400)),
            trade(5, 2.0, dec!(200)),
        ];
        let daily = daily_pnl(&trades);

        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].date, date(2));
        assert_eq!(daily[0].pnl, dec!(600));
        assert_eq!(daily[0].trade_count, 2);
        assert!((daily[0].pnl_percent - 6.0).abs() < 1e-9);
        assert_eq!(daily[1].cumulative_pnl, dec!(800));
        assert!((daily[1].cumulative_pnl_percent - 8.0).abs() < 1e-9);
    }
}
