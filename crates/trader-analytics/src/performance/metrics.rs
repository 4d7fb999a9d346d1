//! 성과 지표 계산 모듈
//!
//! 청산 완료 거래 목록에서 요약 지표를 계산합니다:
//! - 승률 (Win Rate): 수익 거래 비율
//! - 프로핏 팩터 (Profit Factor): 총 수익률 / 총 손실률
//! - 기대값 (Expectancy): 거래당 기대 수익률
//! - 샤프 비율 (Sharpe Ratio): 거래 단위 수익률의 평균 / 표준편차 (연율화하지 않음)
//! - 손익비 (Risk/Reward): 평균 수익률 / 평균 손실률
//! - 최대 낙폭 (Maximum Drawdown): 고점 대비 최대 하락폭 (0 이하)
//!
//! # 0 분모 처리
//!
//! 모든 비율은 유한한 값 또는 문서화된 센티널입니다. 손실이 없고 수익만 있으면
//! [`SATURATED_RATIO`]로 포화되고, 수익이 없으면 0입니다. NaN/Infinity는 나오지 않습니다.
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! use trader_analytics::performance::AnalyticsSummary;
//! use rust_decimal_macros::dec;
//!
//! let summary = AnalyticsSummary::from_trades(&trades, dec!(10000), alerts.len());
//! println!("승률: {:.1}%", summary.win_rate);
//! println!("프로핏 팩터: {}", format_ratio(summary.profit_factor));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use trader_core::{ClosedTrade, TradeOutcome};

use crate::portfolio::EquityCurve;

/// 포화 비율 상한. 이 값 이상은 "99+"로 표시됩니다.
pub const SATURATED_RATIO: f64 = 99.0;

/// 표준편차가 이 값보다 작으면 0으로 간주합니다.
pub const STD_DEV_EPSILON: f64 = 1e-9;

/// 성과 요약.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    // === 거래 통계 ===
    /// 총 거래 수
    pub total_trades: usize,
    /// 수익 거래 수
    pub wins: usize,
    /// 손실 거래 수
    pub losses: usize,
    /// 본전 거래 수
    pub break_even: usize,
    /// 승률 (%, 0~100)
    pub win_rate: f64,

    // === 비율 지표 ===
    /// 프로핏 팩터 (0 이상, 최대 SATURATED_RATIO)
    pub profit_factor: f64,
    /// 거래당 기대 수익률 (%)
    pub expectancy: f64,
    /// 거래 단위 샤프 비율
    pub sharpe_ratio: f64,
    /// 손익비 (0 이상, 최대 SATURATED_RATIO)
    pub risk_reward_ratio: f64,

    // === 최대 낙폭 ===
    /// 최대 낙폭 비율 (%, 0 이하)
    pub max_drawdown_percent: f64,
    /// 최대 낙폭 금액 (0 이하)
    pub max_drawdown: Decimal,

    // === 수익/손실 크기 ===
    /// 평균 수익률 (수익 거래, %)
    pub avg_win_percent: f64,
    /// 평균 손실률 크기 (손실 거래, %, 0 이상)
    pub avg_loss_percent: f64,
    /// 최대 수익률 (%)
    pub largest_win_percent: f64,
    /// 최대 손실률 크기 (%, 0 이상)
    pub largest_loss_percent: f64,

    // === 누적 손익 ===
    /// 총 실현 손익
    pub total_pnl: Decimal,
    /// 수익률 합계 (%)
    pub total_pnl_percent: f64,

    /// 평균 보유 기간 (일)
    pub avg_holding_days: f64,
    /// 기간 내 알림 수
    pub total_alerts: usize,
}

impl Default for AnalyticsSummary {
    fn default() -> Self {
        Self {
            total_trades: 0,
            wins: 0,
            losses: 0,
            break_even: 0,
            win_rate: 0.0,
            profit_factor: 0.0,
            expectancy: 0.0,
            sharpe_ratio: 0.0,
            risk_reward_ratio: 0.0,
            max_drawdown_percent: 0.0,
            max_drawdown: Decimal::ZERO,
            avg_win_percent: 0.0,
            avg_loss_percent: 0.0,
            largest_win_percent: 0.0,
            largest_loss_percent: 0.0,
            total_pnl: Decimal::ZERO,
            total_pnl_percent: 0.0,
            avg_holding_days: 0.0,
            total_alerts: 0,
        }
    }
}

impl AnalyticsSummary {
    /// 청산일 순 거래 목록에서 요약 지표를 계산합니다.
    ///
    /// # 매개변수
    ///
    /// * `trades` - 청산일 순으로 정렬된 거래
    /// * `starting_equity` - 낙폭 계산용 시작 자본
    /// * `total_alerts` - 같은 기간의 알림 수
    pub fn from_trades(
        trades: &[ClosedTrade],
        starting_equity: Decimal,
        total_alerts: usize,
    ) -> Self {
        let curve = EquityCurve::from_trades(trades, starting_equity);
        Self::from_parts(trades, &curve, total_alerts)
    }

    /// 이미 만든 자산 곡선을 재사용하여 요약 지표를 계산합니다.
    pub fn from_parts(trades: &[ClosedTrade], curve: &EquityCurve, total_alerts: usize) -> Self {
        if trades.is_empty() {
            return Self {
                total_alerts,
                ..Default::default()
            };
        }

        let total_trades = trades.len();
        let wins = trades.iter().filter(|t| t.outcome == TradeOutcome::Win).count();
        let losses = trades.iter().filter(|t| t.outcome == TradeOutcome::Loss).count();
        let break_even = total_trades - wins - losses;

        let win_returns: Vec<f64> = trades
            .iter()
            .filter(|t| t.is_win())
            .map(|t| t.pnl_percent)
            .collect();
        // 손실은 크기(양수)로 보관
        let loss_magnitudes: Vec<f64> = trades
            .iter()
            .filter(|t| t.is_loss())
            .map(|t| t.pnl_percent.abs())
            .collect();

        let win_rate = Self::calculate_win_rate(wins, total_trades);
        let avg_win_percent = mean(&win_returns);
        let avg_loss_percent = mean(&loss_magnitudes);

        let gross_win: f64 = win_returns.iter().filter(|p| **p > 0.0).sum();
        let gross_loss: f64 = loss_magnitudes.iter().sum();

        let returns: Vec<f64> = trades.iter().map(|t| t.pnl_percent).collect();
        let holding_days: Vec<f64> = trades.iter().map(|t| t.holding_days() as f64).collect();

        Self {
            total_trades,
            wins,
            losses,
            break_even,
            win_rate,
            profit_factor: Self::calculate_profit_factor(gross_win, gross_loss),
            expectancy: Self::calculate_expectancy(win_rate, avg_win_percent, avg_loss_percent),
            sharpe_ratio: Self::calculate_sharpe_ratio(&returns),
            risk_reward_ratio: capped_ratio(avg_win_percent, avg_loss_percent),
            max_drawdown_percent: curve.max_drawdown_percent(),
            max_drawdown: curve.max_drawdown(),
            avg_win_percent,
            avg_loss_percent,
            largest_win_percent: win_returns.iter().copied().fold(0.0, f64::max),
            largest_loss_percent: loss_magnitudes.iter().copied().fold(0.0, f64::max),
            total_pnl: trades
                .iter()
                .fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.pnl_dollar)),
            total_pnl_percent: returns.iter().sum(),
            avg_holding_days: mean(&holding_days),
            total_alerts,
        }
    }

    /// 승률 (%) = 수익 거래 / 전체 거래 × 100. 거래가 없으면 0.
    pub fn calculate_win_rate(wins: usize, total: usize) -> f64 {
        if total == 0 {
            return 0.0;
        }
        wins as f64 / total as f64 * 100.0
    }

    /// 프로핏 팩터 = 총 수익률 / 총 손실률 크기.
    ///
    /// 손실 합계가 0이고 수익이 있으면 [`SATURATED_RATIO`], 수익이 없으면 0입니다.
    pub fn calculate_profit_factor(gross_win: f64, gross_loss: f64) -> f64 {
        capped_ratio(gross_win, gross_loss)
    }

    /// 기대값 = 승률 × 평균 수익률 − 패율 × 평균 손실률 크기.
    pub fn calculate_expectancy(win_rate: f64, avg_win: f64, avg_loss_magnitude: f64) -> f64 {
        let p_win = win_rate / 100.0;
        p_win * avg_win - (1.0 - p_win) * avg_loss_magnitude
    }

    /// 거래 단위 샤프 비율 = 평균 수익률 / 모표준편차.
    ///
    /// 거래가 2건 미만이거나 표준편차가 0이면 0을 반환합니다.
    pub fn calculate_sharpe_ratio(returns: &[f64]) -> f64 {
        if returns.len() < 2 {
            return 0.0;
        }

        let avg = mean(returns);
        let variance =
            returns.iter().map(|r| (r - avg).powi(2)).sum::<f64>() / returns.len() as f64;
        let std_dev = variance.sqrt();

        if !std_dev.is_finite() || std_dev < STD_DEV_EPSILON {
            return 0.0;
        }

        avg / std_dev
    }

    /// 요약 문자열을 반환합니다.
    pub fn summary(&self) -> String {
        format!(
            "거래: {} (승 {} / 패 {} / 본전 {}) | 승률: {:.1}% | PF: {} | 기대값: {:.2}% | 샤프: {:.2} | MDD: {:.2}% | 총손익: {}",
            self.total_trades,
            self.wins,
            self.losses,
            self.break_even,
            self.win_rate,
            format_ratio(self.profit_factor),
            self.expectancy,
            self.sharpe_ratio,
            self.max_drawdown_percent,
            self.total_pnl.round_dp(2),
        )
    }
}

/// 0 분모를 처리한 비율.
///
/// 분자가 0 이하이면 0, 분모가 0이면 [`SATURATED_RATIO`], 그 외에는 상한으로 제한한 값입니다.
pub fn capped_ratio(numerator: f64, denominator: f64) -> f64 {
    if !numerator.is_finite() || numerator <= 0.0 {
        return 0.0;
    }
    if !denominator.is_finite() || denominator <= 0.0 {
        return SATURATED_RATIO;
    }
    (numerator / denominator).min(SATURATED_RATIO)
}

/// 비율을 표시 문자열로 변환합니다. 포화 값은 "99+"입니다.
pub fn format_ratio(value: f64) -> String {
    if value >= SATURATED_RATIO {
        format!("{}+", SATURATED_RATIO as i64)
    } else {
        format!("{:.2}", value)
    }
}

/// 산술 평균. 빈 슬라이스는 0.
pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Decimal 평균. 빈 경우 0.
pub(crate) fn mean_decimal(total: Decimal, count: usize) -> Decimal {
    if count == 0 {
        return Decimal::ZERO;
    }
    total / Decimal::from(count)
}
