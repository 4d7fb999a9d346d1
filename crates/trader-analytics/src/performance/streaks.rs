//! 연승/연패 분석.
//!
//! 청산일 순으로 거래를 훑으며 수익/손실이 연속된 최대 구간(런)을 찾습니다.
//! 본전 거래는 진행 중인 런을 끝내고 현재 연속 유형을 `None`으로 되돌리며,
//! 최대/평균 계산에는 들어가지 않습니다. 마지막 런도 평균에 포함됩니다.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use trader_core::{ClosedTrade, TradeOutcome};

use super::metrics::mean;

/// 연속 유형.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StreakType {
    Win,
    Loss,
    #[default]
    None,
}

impl From<TradeOutcome> for StreakType {
    fn from(outcome: TradeOutcome) -> Self {
        match outcome {
            TradeOutcome::Win => StreakType::Win,
            TradeOutcome::Loss => StreakType::Loss,
            TradeOutcome::BreakEven => StreakType::None,
        }
    }
}

/// 수익 또는 손실이 연속된 최대 구간.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakRun {
    pub kind: StreakType,
    pub length: u32,
    /// 첫 거래 청산일
    pub start_date: NaiveDate,
    /// 마지막 거래 청산일
    pub end_date: NaiveDate,
}

impl StreakRun {
    fn start(kind: StreakType, date: NaiveDate) -> Self {
        Self {
            kind,
            length: 1,
            start_date: date,
            end_date: date,
        }
    }

    /// 차트용 부호 있는 길이 (연승 +, 연패 −).
    pub fn signed_length(&self) -> f64 {
        match self.kind {
            StreakType::Win => self.length as f64,
            StreakType::Loss => -(self.length as f64),
            StreakType::None => 0.0,
        }
    }
}

/// 연승/연패 분석 결과.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StreakAnalysis {
    /// 가장 최근 거래에서 끝나는 런의 길이
    pub current_streak: u32,
    pub current_streak_type: StreakType,
    pub max_win_streak: u32,
    pub max_loss_streak: u32,
    pub avg_win_streak: f64,
    pub avg_loss_streak: f64,
}

/// 청산일 순 거래에서 연속 구간 목록을 추출합니다.
pub fn streak_runs(trades: &[ClosedTrade]) -> Vec<StreakRun> {
    let mut runs = Vec::new();
    let mut current: Option<StreakRun> = None;

    for trade in trades {
        let kind = StreakType::from(trade.outcome);
        // 본전: 진행 중인 런 종료
        if kind == StreakType::None {
            runs.extend(current.take());
            continue;
        }

        match current.as_mut() {
            Some(run) if run.kind == kind => {
                run.length += 1;
                run.end_date = trade.exit_date;
            }
            _ => {
                runs.extend(current.take());
                current = Some(StreakRun::start(kind, trade.exit_date));
            }
        }
    }
    runs.extend(current);

    runs
}

impl StreakAnalysis {
    /// 청산일 순 거래에서 연승/연패 통계를 계산합니다.
    pub fn from_trades(trades: &[ClosedTrade]) -> Self {
        Self::from_runs(trades, &streak_runs(trades))
    }

    /// 이미 추출한 런을 재사용합니다. `trades`는 런을 만든 같은 거래 목록이어야 합니다.
    pub fn from_runs(trades: &[ClosedTrade], runs: &[StreakRun]) -> Self {
        let lengths = |kind: StreakType| -> Vec<f64> {
            runs.iter()
                .filter(|r| r.kind == kind)
                .map(|r| r.length as f64)
                .collect()
        };
        let max_of = |kind: StreakType| -> u32 {
            runs.iter()
                .filter(|r| r.kind == kind)
                .map(|r| r.length)
                .max()
                .unwrap_or(0)
        };

        // 마지막 거래가 본전이면 현재 연속 없음
        let (current_streak, current_streak_type) = match trades.last() {
            Some(last) if last.outcome != TradeOutcome::BreakEven => runs
                .last()
                .map_or((0, StreakType::None), |r| (r.length, r.kind)),
            _ => (0, StreakType::None),
        };

        Self {
            current_streak,
            current_streak_type,
            max_win_streak: max_of(StreakType::Win),
            max_loss_streak: max_of(StreakType::Loss),
            avg_win_streak: mean(&lengths(StreakType::Win)),
            avg_loss_streak: mean(&lengths(StreakType::Loss)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn trades_from(returns: &[f64]) -> Vec<ClosedTrade> {
        returns
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let day = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
                    + chrono::Duration::days(i as i64);
                ClosedTrade::new("TEST", day, day, *r, dec!(0))
            })
            .collect()
    }

    #[test]
    fn test_streak_runs() {
        let trades = trades_from(&[1.0, 2.0, -1.0, 3.0, 4.0, 5.0]);
        let runs = streak_runs(&trades);

        let shape: Vec<(StreakType, u32)> = runs.iter().map(|r| (r.kind, r.length)).collect();
        assert_eq!(
            shape,
            vec![
                (StreakType::Win, 2),
                (StreakType::Loss, 1),
                (StreakType::Win, 3)
            ]
        );
        assert_eq!(runs[2].start_date, trades[3].exit_date);
        assert_eq!(runs[2].end_date, trades[5].exit_date);
    }

    #[test]
    fn test_streak_analysis_includes_final_run() {
        let analysis = StreakAnalysis::from_trades(&trades_from(&[1.0, 2.0, -1.0, 3.0, 4.0, 5.0]));

        assert_eq!(analysis.current_streak, 3);
        assert_eq!(analysis.current_streak_type, StreakType::Win);
        assert_eq!(analysis.max_win_streak, 3);
        assert_eq!(analysis.max_loss_streak, 1);
        assert_eq!(analysis.avg_win_streak, 2.5);
        assert_eq!(analysis.avg_loss_streak, 1.0);
    }

    #[test]
    fn test_break_even_resets_current() {
        let trades = trades_from(&[1.0, 1.0, 0.0]);
        let analysis = StreakAnalysis::from_trades(&trades);

        assert_eq!(analysis.current_streak, 0);
        assert_eq!(analysis.current_streak_type, StreakType::None);
        assert_eq!(analysis.max_win_streak, 2);
    }

    #[test]
    fn test_break_even_splits_runs() {
        let runs = streak_runs(&trades_from(&[1.0, 0.0, 1.0]));
        assert_eq!(runs.len(), 2);
        assert!(runs.iter().all(|r| r.kind == StreakType::Win && r.length == 1));
    }

    #[test]
    fn test_all_losses() {
        let analysis = StreakAnalysis::from_trades(&trades_from(&[-10.0, -10.0, -10.0, -10.0]));

        assert_eq!(analysis.current_streak, 4);
        assert_eq!(analysis.current_streak_type, StreakType::Loss);
        assert_eq!(analysis.max_loss_streak, 4);
        assert_eq!(analysis.max_win_streak, 0);
        assert_eq!(analysis.avg_win_streak, 0.0);
    }

    #[test]
    fn test_empty() {
        let analysis = StreakAnalysis::from_trades(&[]);
        assert_eq!(analysis, StreakAnalysis::default());
        assert!(streak_runs(&[]).is_empty());
    }

    #[test]
    fn test_signed_length() {
        let runs = streak_runs(&trades_from(&[-1.0, -2.0, 3.0]));
        assert_eq!(runs[0].signed_length(), -2.0);
        assert_eq!(runs[1].signed_length(), 1.0);
    }
}
