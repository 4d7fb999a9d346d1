//! 월별 수익률 막대 차트.

use serde::{Deserialize, Serialize};
use trader_analytics::MonthlyPerformance;

use crate::bars::{signed_bars, Bar};
use crate::error::{ensure_finite, ChartResult};
use crate::renderer::{ChartKind, ChartRenderer, HoverTargets};
use crate::scale::{ChartBox, ScaleProjector, ValueDomain};

/// 시리즈가 비었거나 0일 때의 기본 도메인 (±%).
pub const DEFAULT_MONTHLY_EXTENT: f64 = 10.0;

/// 월별 막대 기하.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBarGeometry {
    pub projector: ScaleProjector,
    pub bars: Vec<Bar>,
    /// 0% 기준선 Y
    pub zero_y: f64,
    /// "YYYY-MM" 축 레이블
    pub labels: Vec<String>,
}

impl HoverTargets for MonthlyBarGeometry {
    fn projector(&self) -> &ScaleProjector {
        &self.projector
    }

    fn anchor(&self, index: usize) -> Option<(f64, f64)> {
        self.bars.get(index).map(Bar::anchor)
    }
}

/// 월별 수익률 막대 차트. 0을 중심으로 대칭인 도메인을 사용합니다.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyBarChart {
    months: Vec<MonthlyPerformance>,
    default_extent: f64,
}

impl MonthlyBarChart {
    pub fn new(months: &[MonthlyPerformance]) -> Self {
        Self {
            months: months.to_vec(),
            default_extent: DEFAULT_MONTHLY_EXTENT,
        }
    }

    pub fn with_default_extent(mut self, extent: f64) -> Self {
        self.default_extent = extent;
        self
    }

    pub fn values(&self) -> Vec<f64> {
        self.months.iter().map(|m| m.pnl_percent).collect()
    }
}

impl ChartRenderer for MonthlyBarChart {
    type Geometry = MonthlyBarGeometry;

    fn kind(&self) -> ChartKind {
        ChartKind::MonthlyReturns
    }

    fn len(&self) -> usize {
        self.months.len()
    }

    fn project(&self, chart: &ChartBox) -> ChartResult<MonthlyBarGeometry> {
        chart.validate()?;
        let values = self.values();
        ensure_finite(self.kind(), &values)?;

        let (banded, band) = chart.banded(values.len());
        let domain = ValueDomain::symmetric(&values, self.default_extent);
        let projector = ScaleProjector::new(banded, domain, values.len());

        Ok(MonthlyBarGeometry {
            bars: signed_bars(&projector, &values, band),
            zero_y: projector.scale_y(0.0),
            labels: self.months.iter().map(MonthlyPerformance::label).collect(),
            projector,
        })
    }

    fn tooltip_lines(&self, index: usize) -> Vec<String> {
        let Some(month) = self.months.get(index) else {
            return Vec::new();
        };
        vec![
            format!("{} {}", month.year, month.month_name),
            format!("수익률: {:+.2}%", month.pnl_percent),
            format!("손익: {}", month.pnl.round_dp(2)),
            format!(
                "거래: {}건 (승 {} / 패 {}, 승률 {:.1}%)",
                month.total_trades, month.wins, month.losses, month.win_rate
            ),
        ]
    }
}
