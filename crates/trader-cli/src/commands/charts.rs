//! 차트 스냅샷 명령.
//!
//! 리포트를 네 개의 차트에 적재하고 기하/툴팁 상태를 JSON으로 출력합니다.
//! 실패한 차트는 `failures`에 기록되며 나머지 차트와 요약은 그대로 출력됩니다.

use anyhow::Result;
use serde::Serialize;
use tracing::info;
use trader_analytics::AnalyticsSummary;
use trader_charts::{ChartKind, ChartsDashboard, DashboardSnapshot};
use trader_core::{AppConfig, DateRange, Period};

use super::ledger::{open_session, LedgerSource};

/// 차트 명령 설정.
#[derive(Debug, Clone)]
pub struct ChartsCliConfig {
    pub source: LedgerSource,
    /// 컨테이너 너비 (없으면 설정값)
    pub width: Option<f64>,
    /// 모든 차트에 적용할 포인터 X (툴팁 미리보기)
    pub hover_x: Option<f64>,
}

/// 실패한 차트.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedChart {
    pub chart: ChartKind,
    pub message: String,
}

/// 차트 명령 결과.
#[derive(Debug, Clone, Serialize)]
pub struct ChartsOutput {
    pub period: Period,
    pub range: DateRange,
    pub summary: AnalyticsSummary,
    pub failures: Vec<FailedChart>,
    pub dashboard: DashboardSnapshot,
}

/// 대시보드 스냅샷을 만듭니다.
pub fn build_charts(config: &ChartsCliConfig, app: &AppConfig) -> Result<ChartsOutput> {
    let (session, _) = open_session(&config.source, &app.analytics)?;
    let report = session.report();

    let mut dashboard = ChartsDashboard::new(&app.charts);
    if let Some(width) = config.width {
        // 적재 전이므로 너비만 바뀜
        dashboard.resize(width);
    }
    let failures = dashboard.load(report);

    if let Some(x) = config.hover_x {
        dashboard.drawdown_mut().pointer_move(x);
        dashboard.monthly_mut().pointer_move(x);
        dashboard.tickers_mut().pointer_move(x);
        dashboard.streaks_mut().pointer_move(x);
    }

    info!(
        period = %session.period(),
        failed = failures.len(),
        "Chart snapshot built"
    );

    Ok(ChartsOutput {
        period: session.period(),
        range: session.range(),
        summary: report.summary.clone(),
        failures: failures
            .into_iter()
            .map(|f| FailedChart {
                chart: f.kind,
                message: f.error.to_string(),
            })
            .collect(),
        dashboard: dashboard.snapshot(),
    })
}
