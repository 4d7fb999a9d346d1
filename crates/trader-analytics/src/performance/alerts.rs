//! 알림 → 거래 전환 효과 분석.
//!
//! 전환된 알림은 같은 티커에서 알림일 이후(당일 포함) 가장 먼저 진입한 거래와
//! 짝지어 수익 전환율과 평균 전환 소요일을 계산합니다.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use trader_core::{AlertRecord, ClosedTrade};

/// 알림 효과 지표.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AlertEffectiveness {
    pub total_alerts: usize,
    pub alerts_with_trades: usize,
    pub alerts_without_trades: usize,
    /// 전환율 (%) = 거래로 이어진 알림 / 전체 알림 × 100
    pub conversion_rate: f64,
    /// 수익 전환율 (%) = 수익 거래로 이어진 알림 / 전체 알림 × 100
    pub profitable_conversion_rate: f64,
    /// 알림부터 진입까지 평균 일수 (짝지어진 알림 기준)
    pub avg_days_to_trade: f64,
}

impl AlertEffectiveness {
    /// 알림과 거래 목록에서 효과 지표를 계산합니다.
    pub fn compute(alerts: &[AlertRecord], trades: &[ClosedTrade]) -> Self {
        let total_alerts = alerts.len();
        if total_alerts == 0 {
            return Self::default();
        }

        // 티커별 진입일 순 거래
        let mut by_ticker: HashMap<&str, Vec<&ClosedTrade>> = HashMap::new();
        for trade in trades {
            by_ticker.entry(trade.ticker.as_str()).or_default().push(trade);
        }
        for list in by_ticker.values_mut() {
            list.sort_by_key(|t| t.entry_date);
        }

        let mut alerts_with_trades = 0;
        let mut profitable = 0;
        let mut matched_days: Vec<i64> = Vec::new();

        for alert in alerts.iter().filter(|a| a.resulted_in_trade) {
            alerts_with_trades += 1;

            let Some(list) = by_ticker.get(alert.ticker.as_str()) else {
                continue;
            };
            let idx = list.partition_point(|t| t.entry_date < alert.sent_at);
            if let Some(trade) = list.get(idx) {
                matched_days.push((trade.entry_date - alert.sent_at).num_days());
                if trade.is_win() {
                    profitable += 1;
                }
            }
        }

        let avg_days_to_trade = if matched_days.is_empty() {
            0.0
        } else {
            matched_days.iter().sum::<i64>() as f64 / matched_days.len() as f64
        };

        Self {
            total_alerts,
            alerts_with_trades,
            alerts_without_trades: total_alerts - alerts_with_trades,
            conversion_rate: alerts_with_trades as f64 / total_alerts as f64 * 100.0,
            profitable_conversion_rate: profitable as f64 / total_alerts as f64 * 100.0,
            avg_days_to_trade,
        }
    }
}
