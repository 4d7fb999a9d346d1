//! 월별 / 종목별 / 셋업별 성과 분해.
//!
//! 각 그룹은 전체 요약과 같은 승률·평균·보유기간 공식을 독립적으로 다시 적용합니다.

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use trader_core::{ClosedTrade, TradeOutcome};

use super::metrics::{capped_ratio, mean_decimal, AnalyticsSummary};

/// 셋업 라벨이 없는 거래의 그룹 이름.
pub const UNKNOWN_SETUP: &str = "Unknown";

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// 그룹 누적기.
#[derive(Debug, Clone, Default)]
struct GroupStats {
    trades: usize,
    wins: usize,
    losses: usize,
    total_pnl: Decimal,
    total_pnl_percent: f64,
    gross_win_percent: f64,
    gross_loss_percent: f64,
    holding_days: i64,
    largest_win_percent: f64,
    largest_loss_percent: f64,
}

impl GroupStats {
    fn add(&mut self, trade: &ClosedTrade) {
        self.trades += 1;
        match trade.outcome {
            TradeOutcome::Win => {
                self.wins += 1;
                self.gross_win_percent += trade.pnl_percent.max(0.0);
                self.largest_win_percent = self.largest_win_percent.max(trade.pnl_percent);
            }
            TradeOutcome::Loss => {
                self.losses += 1;
                self.gross_loss_percent += trade.pnl_percent.abs();
                self.largest_loss_percent = self.largest_loss_percent.max(trade.pnl_percent.abs());
            }
            TradeOutcome::BreakEven => {}
        }
        self.total_pnl = self.total_pnl.saturating_add(trade.pnl_dollar);
        self.total_pnl_percent += trade.pnl_percent;
        self.holding_days += trade.holding_days();
    }

    fn break_even(&self) -> usize {
        self.trades - self.wins - self.losses
    }

    fn win_rate(&self) -> f64 {
        AnalyticsSummary::calculate_win_rate(self.wins, self.trades)
    }

    fn avg_pnl_percent(&self) -> f64 {
        if self.trades == 0 {
            return 0.0;
        }
        self.total_pnl_percent / self.trades as f64
    }

    fn avg_holding_days(&self) -> f64 {
        if self.trades == 0 {
            return 0.0;
        }
        self.holding_days as f64 / self.trades as f64
    }

    fn profit_factor(&self) -> f64 {
        capped_ratio(self.gross_win_percent, self.gross_loss_percent)
    }
}

/// 월별 성과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPerformance {
    pub year: i32,
    /// 1~12
    pub month: u32,
    pub month_name: String,
    pub total_trades: usize,
    pub wins: usize,
    pub losses: usize,
    pub break_even: usize,
    pub win_rate: f64,
    /// 실현 손익 합계
    pub pnl: Decimal,
    /// 수익률 합계 (%)
    pub pnl_percent: f64,
    pub avg_pnl_percent: f64,
    pub avg_holding_days: f64,
    /// 수익률 합계가 양수인지 여부
    pub is_positive: bool,
}

impl MonthlyPerformance {
    /// 차트 라벨 (예: "2025-03").
    pub fn label(&self) -> String {
        format!("{}-{:02}", self.year, self.month)
    }
}

/// 종목별 성과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerPerformance {
    pub ticker: String,
    pub total_trades: usize,
    pub wins: usize,
    pub losses: usize,
    pub break_even: usize,
    pub win_rate: f64,
    pub total_pnl: Decimal,
    pub total_pnl_percent: f64,
    pub avg_pnl: Decimal,
    pub avg_pnl_percent: f64,
    pub avg_holding_days: f64,
    pub largest_win_percent: f64,
    /// 최대 손실률 크기 (%, 0 이상)
    pub largest_loss_percent: f64,
    pub profit_factor: f64,
}

/// 셋업별 성과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetupPerformance {
    pub setup: String,
    pub total_trades: usize,
    pub wins: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub total_pnl: Decimal,
    pub avg_pnl: Decimal,
    pub avg_pnl_percent: f64,
    pub profit_factor: f64,
}

/// 청산일의 (연, 월)로 묶은 월별 성과. 시간 오름차순입니다.
pub fn monthly_performance(trades: &[ClosedTrade]) -> Vec<MonthlyPerformance> {
    let mut groups: BTreeMap<(i32, u32), GroupStats> = BTreeMap::new();
    for trade in trades {
        groups
            .entry((trade.exit_date.year(), trade.exit_date.month()))
            .or_default()
            .add(trade);
    }

    groups
        .into_iter()
        .map(|((year, month), stats)| MonthlyPerformance {
            year,
            month,
            month_name: MONTH_NAMES[(month as usize).saturating_sub(1) % 12].to_string(),
            total_trades: stats.trades,
            wins: stats.wins,
            losses: stats.losses,
            break_even: stats.break_even(),
            win_rate: stats.win_rate(),
            pnl: stats.total_pnl,
            pnl_percent: stats.total_pnl_percent,
            avg_pnl_percent: stats.avg_pnl_percent(),
            avg_holding_days: stats.avg_holding_days(),
            is_positive: stats.total_pnl_percent > 0.0,
        })
        .collect()
}

/// 종목별 성과. 총 손익 내림차순, 같으면 티커 오름차순입니다.
pub fn ticker_performance(trades: &[ClosedTrade]) -> Vec<TickerPerformance> {
    let mut groups: BTreeMap<&str, GroupStats> = BTreeMap::new();
    for trade in trades {
        groups.entry(trade.ticker.as_str()).or_default().add(trade);
    }

    let mut rows: Vec<TickerPerformance> = groups
        .into_iter()
        .map(|(ticker, stats)| TickerPerformance {
            ticker: ticker.to_string(),
            total_trades: stats.trades,
            wins: stats.wins,
            losses: stats.losses,
            break_even: stats.break_even(),
            win_rate: stats.win_rate(),
            total_pnl: stats.total_pnl,
            total_pnl_percent: stats.total_pnl_percent,
            avg_pnl: mean_decimal(stats.total_pnl, stats.trades),
            avg_pnl_percent: stats.avg_pnl_percent(),
            avg_holding_days: stats.avg_holding_days(),
            largest_win_percent: stats.largest_win_percent,
            largest_loss_percent: stats.largest_loss_percent,
            profit_factor: stats.profit_factor(),
        })
        .collect();

    // BTreeMap 순회로 이미 티커 오름차순 → 안정 정렬로 동률 순서 유지
    rows.sort_by(|a, b| b.total_pnl.cmp(&a.total_pnl));
    rows
}

/// 셋업별 성과. 거래 수 내림차순, 같으면 이름 오름차순입니다.
pub fn setup_performance(trades: &[ClosedTrade]) -> Vec<SetupPerformance> {
    let mut groups: BTreeMap<&str, GroupStats> = BTreeMap::new();
    for trade in trades {
        let setup = trade.setup.as_deref().unwrap_or(UNKNOWN_SETUP);
        groups.entry(setup).or_default().add(trade);
    }

    let mut rows: Vec<SetupPerformance> = groups
        .into_iter()
        .map(|(setup, stats)| SetupPerformance {
            setup: setup.to_string(),
            total_trades: stats.trades,
            wins: stats.wins,
            losses: stats.losses,
            win_rate: stats.win_rate(),
            total_pnl: stats.total_pnl,
            avg_pnl: mean_decimal(stats.total_pnl, stats.trades),
            avg_pnl_percent: stats.avg_pnl_percent(),
            profit_factor: stats.profit_factor(),
        })
        .collect();

    rows.sort_by(|a, b| b.total_trades.cmp(&a.total_trades));
    rows
}

/// 수익률 합계 기준 최고/최저 월.
pub fn best_and_worst_month(
    months: &[MonthlyPerformance],
) -> (Option<MonthlyPerformance>, Option<MonthlyPerformance>) {
    let best = months
        .iter()
        .max_by(|a, b| a.pnl_percent.total_cmp(&b.pnl_percent))
        .cloned();
    let worst = months
        .iter()
        .min_by(|a, b| a.pnl_percent.total_cmp(&b.pnl_percent))
        .cloned();
    (best, worst)
}

/// 종목별 손익을 차트 강도(-1.0 ~ 1.0)로 정규화할 때 쓰는 기준값.
pub fn max_abs_ticker_return(rows: &[TickerPerformance]) -> f64 {
    rows.iter()
        .map(|r| r.total_pnl_percent.abs())
        .filter(|v| v.is_finite())
        .fold(0.0, f64::max)
}
