//! 성과 대시보드.
//!
//! 하나의 `AnalyticsReport`를 네 개의 차트 뷰에 적재합니다. 한 차트의 투영 에러는
//! 수집만 되고 다른 차트와 요약 지표에는 영향을 주지 않습니다.

use serde::{Deserialize, Serialize};
use tracing::debug;
use trader_analytics::AnalyticsReport;
use trader_core::ChartConfig;

use crate::drawdown::{DrawdownChart, DrawdownGeometry};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{ChartView, ViewConfig, ViewSnapshot};
use crate::monthly::{MonthlyBarChart, MonthlyBarGeometry};
use crate::renderer::ChartKind;
use crate::streak::{StreakChart, StreakGeometry};
use crate::ticker::{TickerHeatmap, TickerHeatmapGeometry, TickerTableRow};

/// 차트 하나의 실패.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartFailure {
    pub kind: ChartKind,
    pub error: ChartError,
}

/// 대시보드 스냅샷.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub drawdown: ViewSnapshot<DrawdownGeometry>,
    pub monthly: ViewSnapshot<MonthlyBarGeometry>,
    pub tickers: ViewSnapshot<TickerHeatmapGeometry>,
    pub ticker_table: Vec<TickerTableRow>,
    pub streaks: ViewSnapshot<StreakGeometry>,
}

/// 네 개의 차트 뷰 묶음.
#[derive(Debug, Clone)]
pub struct ChartsDashboard {
    drawdown: ChartView<DrawdownChart>,
    monthly: ChartView<MonthlyBarChart>,
    tickers: ChartView<TickerHeatmap>,
    streaks: ChartView<StreakChart>,
    signed_default_extent: f64,
}

fn record(kind: ChartKind, result: ChartResult<()>, failures: &mut Vec<ChartFailure>) {
    if let Err(error) = result {
        failures.push(ChartFailure { kind, error });
    }
}

impl ChartsDashboard {
    pub fn new(config: &ChartConfig) -> Self {
        let view = ViewConfig::from_config(config);
        Self {
            drawdown: ChartView::new(ChartKind::Drawdown, view),
            monthly: ChartView::new(ChartKind::MonthlyReturns, view),
            tickers: ChartView::new(ChartKind::TickerHeatmap, view),
            streaks: ChartView::new(ChartKind::Streaks, view),
            signed_default_extent: config.signed_default_extent,
        }
    }

    /// 리포트를 모든 차트에 적재합니다.
    ///
    /// # 반환값
    ///
    /// 투영에 실패한 차트 목록 (나머지 차트는 정상 적재됨)
    pub fn load(&mut self, report: &AnalyticsReport) -> Vec<ChartFailure> {
        let mut failures = Vec::new();

        record(
            ChartKind::Drawdown,
            self.drawdown.load(DrawdownChart::new(&report.equity_curve)),
            &mut failures,
        );
        record(
            ChartKind::MonthlyReturns,
            self.monthly.load(
                MonthlyBarChart::new(&report.monthly).with_default_extent(self.signed_default_extent),
            ),
            &mut failures,
        );
        record(
            ChartKind::TickerHeatmap,
            self.tickers.load(TickerHeatmap::new(&report.by_ticker)),
            &mut failures,
        );
        record(
            ChartKind::Streaks,
            self.streaks
                .load(StreakChart::new(&report.streak_runs, &report.streaks)),
            &mut failures,
        );

        debug!(
            trades = report.summary.total_trades,
            failed = failures.len(),
            "Dashboard loaded"
        );
        failures
    }

    /// 모든 차트의 컨테이너 너비를 바꿉니다.
    pub fn resize(&mut self, width: f64) -> Vec<ChartFailure> {
        let mut failures = Vec::new();
        record(ChartKind::Drawdown, self.drawdown.resize(width), &mut failures);
        record(ChartKind::MonthlyReturns, self.monthly.resize(width), &mut failures);
        record(ChartKind::TickerHeatmap, self.tickers.resize(width), &mut failures);
        record(ChartKind::Streaks, self.streaks.resize(width), &mut failures);
        failures
    }

    pub fn drawdown(&self) -> &ChartView<DrawdownChart> {
        &self.drawdown
    }

    pub fn drawdown_mut(&mut self) -> &mut ChartView<DrawdownChart> {
        &mut self.drawdown
    }

    pub fn monthly(&self) -> &ChartView<MonthlyBarChart> {
        &self.monthly
    }

    pub fn monthly_mut(&mut self) -> &mut ChartView<MonthlyBarChart> {
        &mut self.monthly
    }

    pub fn tickers(&self) -> &ChartView<TickerHeatmap> {
        &self.tickers
    }

    pub fn tickers_mut(&mut self) -> &mut ChartView<TickerHeatmap> {
        &mut self.tickers
    }

    pub fn streaks(&self) -> &ChartView<StreakChart> {
        &self.streaks
    }

    pub fn streaks_mut(&mut self) -> &mut ChartView<StreakChart> {
        &mut self.streaks
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            drawdown: self.drawdown.snapshot(),
            monthly: self.monthly.snapshot(),
            tickers: self.tickers.snapshot(),
            ticker_table: self
                .tickers
                .renderer()
                .map(TickerHeatmap::table_rows)
                .unwrap_or_default(),
            streaks: self.streaks.snapshot(),
        }
    }
}
