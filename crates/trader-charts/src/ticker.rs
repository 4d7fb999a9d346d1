//! 종목별 성과 히트맵과 테이블.
//!
//! 각 종목은 한 칸의 셀이 되며, 강도는 전체 종목 중 최대 절대 수익률로
//! 정규화한 값(-1.0 ~ 1.0)입니다. 같은 순서(총 손익 내림차순)로 테이블 행도 제공합니다.

use serde::{Deserialize, Serialize};
use trader_analytics::{format_ratio, max_abs_ticker_return, TickerPerformance};

use crate::error::{ensure_finite, ChartResult};
use crate::renderer::{ChartKind, ChartRenderer, HoverTargets};
use crate::scale::{ChartBox, ScaleProjector, ValueDomain};

/// 히트맵 셀.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatCell {
    pub index: usize,
    pub ticker: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub center_x: f64,
    /// 총 수익률 (%)
    pub value: f64,
    /// 정규화 강도 (-1.0 ~ 1.0)
    pub intensity: f64,
}

/// 히트맵 기하.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerHeatmapGeometry {
    pub projector: ScaleProjector,
    pub cells: Vec<HeatCell>,
}

impl HoverTargets for TickerHeatmapGeometry {
    fn projector(&self) -> &ScaleProjector {
        &self.projector
    }

    fn anchor(&self, index: usize) -> Option<(f64, f64)> {
        self.cells.get(index).map(|c| (c.center_x, c.y))
    }
}

/// 종목 테이블 행 (표시용 문자열).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerTableRow {
    pub ticker: String,
    pub trades: usize,
    pub win_rate: String,
    pub total_pnl: String,
    pub total_pnl_percent: String,
    pub avg_pnl_percent: String,
    pub avg_holding_days: String,
    pub profit_factor: String,
}

/// 종목별 히트맵.
#[derive(Debug, Clone, PartialEq)]
pub struct TickerHeatmap {
    rows: Vec<TickerPerformance>,
}

/// 최대 절대값으로 정규화한 강도. 기준값이 0이면 0입니다.
pub fn intensity(value: f64, max_abs: f64) -> f64 {
    if max_abs <= 0.0 || !max_abs.is_finite() || !value.is_finite() {
        return 0.0;
    }
    (value / max_abs).clamp(-1.0, 1.0)
}

impl TickerHeatmap {
    pub fn new(rows: &[TickerPerformance]) -> Self {
        Self {
            rows: rows.to_vec(),
        }
    }

    pub fn values(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.total_pnl_percent).collect()
    }

    /// 테이블 행.
    pub fn table_rows(&self) -> Vec<TickerTableRow> {
        self.rows
            .iter()
            .map(|r| TickerTableRow {
                ticker: r.ticker.clone(),
                trades: r.total_trades,
                win_rate: format!("{:.1}%", r.win_rate),
                total_pnl: r.total_pnl.round_dp(2).to_string(),
                total_pnl_percent: format!("{:+.2}%", r.total_pnl_percent),
                avg_pnl_percent: format!("{:+.2}%", r.avg_pnl_percent),
                avg_holding_days: format!("{:.1}", r.avg_holding_days),
                profit_factor: format_ratio(r.profit_factor),
            })
            .collect()
    }
}

impl ChartRenderer for TickerHeatmap {
    type Geometry = TickerHeatmapGeometry;

    fn kind(&self) -> ChartKind {
        ChartKind::TickerHeatmap
    }

    fn len(&self) -> usize {
        self.rows.len()
    }

    fn project(&self, chart: &ChartBox) -> ChartResult<TickerHeatmapGeometry> {
        chart.validate()?;
        let values = self.values();
        ensure_finite(self.kind(), &values)?;

        let max_abs = max_abs_ticker_return(&self.rows);
        let (banded, band) = chart.banded(values.len());
        let projector = ScaleProjector::new(
            banded,
            ValueDomain::new(-max_abs, max_abs),
            values.len(),
        );

        let cells = self
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let center_x = projector.scale_x(index);
                HeatCell {
                    index,
                    ticker: row.ticker.clone(),
                    x: center_x - band / 2.0,
                    y: chart.top(),
                    width: band,
                    height: chart.inner_height(),
                    center_x,
                    value: row.total_pnl_percent,
                    intensity: intensity(row.total_pnl_percent, max_abs),
                }
            })
            .collect();

        Ok(TickerHeatmapGeometry { projector, cells })
    }

    fn tooltip_lines(&self, index: usize) -> Vec<String> {
        let Some(row) = self.rows.get(index) else {
            return Vec::new();
        };
        vec![
            row.ticker.clone(),
            format!("총 수익률: {:+.2}%", row.total_pnl_percent),
            format!("총 손익: {}", row.total_pnl.round_dp(2)),
            format!("거래: {}건, 승률 {:.1}%", row.total_trades, row.win_rate),
            format!("수익 팩터: {}", format_ratio(row.profit_factor)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::Padding;
    use rust_decimal_macros::dec;
    use trader_analytics::SATURATED_RATIO;

    fn row(ticker: &str, total_pnl_percent: f64, profit_factor: f64) -> TickerPerformance {
        TickerPerformance {
            ticker: ticker.to_string(),
            total_trades: 3,
            wins: 2,
            losses: 1,
            break_even: 0,
            win_rate: 66.666,
            total_pnl: dec!(1234.567),
            total_pnl_percent,
            avg_pnl: dec!(411.52),
            avg_pnl_percent: total_pnl_percent / 3.0,
            avg_holding_days: 4.5,
            largest_win_percent: 8.0,
            largest_loss_percent: 2.0,
            profit_factor,
        }
    }

    #[test]
    fn test_intensity_normalized() {
        assert_eq!(intensity(5.0, 10.0), 0.5);
        assert_eq!(intensity(-10.0, 10.0), -1.0);
        assert_eq!(intensity(3.0, 0.0), 0.0);
    }

    #[test]
    fn test_project_cells() {
        let heatmap = TickerHeatmap::new(&[row("AAPL", 12.0, 3.0), row("TSLA", -6.0, 0.5)]);
        let chart = ChartBox::new(300.0, 120.0, Padding::new(10.0, 0.0, 10.0, 100.0));
        let geometry = heatmap.project(&chart).unwrap();

        assert_eq!(geometry.cells.len(), 2);
        assert_eq!(geometry.cells[0].intensity, 1.0);
        assert_eq!(geometry.cells[1].intensity, -0.5);
        assert_eq!(geometry.cells[0].x, 100.0);
        assert_eq!(geometry.cells[0].width, 100.0);
        assert_eq!(geometry.cells[1].center_x, 250.0);
        assert_eq!(geometry.cells[1].height, 100.0);
        assert_eq!(geometry.projector.index_at(260.0), Some(1));
    }

    #[test]
    fn test_all_zero_returns() {
        let heatmap = TickerHeatmap::new(&[row("AAPL", 0.0, 0.0)]);
        let chart = ChartBox::new(300.0, 120.0, Padding::uniform(10.0));
        let geometry = heatmap.project(&chart).unwrap();

        assert_eq!(geometry.cells[0].intensity, 0.0);
    }

    #[test]
    fn test_table_rows() {
        let heatmap = TickerHeatmap::new(&[row("AAPL", 12.0, SATURATED_RATIO)]);
        let rows = heatmap.table_rows();

        assert_eq!(rows[0].ticker, "AAPL");
        assert_eq!(rows[0].win_rate, "66.7%");
        assert_eq!(rows[0].total_pnl, "1234.57");
        assert_eq!(rows[0].total_pnl_percent, "+12.00%");
        assert_eq!(rows[0].profit_factor, "99+");
    }

    #[test]
    fn test_tooltip_lines() {
        let heatmap = TickerHeatmap::new(&[row("AAPL", 12.0, SATURATED_RATIO)]);
        let lines = heatmap.tooltip_lines(0);

        assert_eq!(lines[0], "AAPL");
        assert_eq!(lines[1], "총 수익률: +12.00%");
        assert_eq!(lines[4], "수익 팩터: 99+");
        assert!(heatmap.tooltip_lines(1).is_empty());
    }
}
