//! 낙폭 영역 차트.
//!
//! 자산 곡선의 낙폭 비율(≤ 0)을 0 기준선 아래 영역과 선으로 그립니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use trader_analytics::EquityPoint;

use crate::error::{ensure_finite, ChartResult};
use crate::path::{series_paths, SeriesPaths};
use crate::renderer::{ChartKind, ChartRenderer, HoverTargets};
use crate::scale::{ChartBox, ScaleProjector, ValueDomain};

/// 투영된 점.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
}

/// 낙폭 차트 기하.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawdownGeometry {
    pub projector: ScaleProjector,
    pub paths: SeriesPaths,
    /// 0% 기준선 Y
    pub baseline_y: f64,
    pub points: Vec<ChartPoint>,
}

impl HoverTargets for DrawdownGeometry {
    fn projector(&self) -> &ScaleProjector {
        &self.projector
    }

    fn anchor(&self, index: usize) -> Option<(f64, f64)> {
        self.points.get(index).map(|p| (p.x, p.y))
    }
}

/// 낙폭 영역 차트.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawdownChart {
    points: Vec<EquityPoint>,
}

impl DrawdownChart {
    pub fn new(points: &[EquityPoint]) -> Self {
        Self {
            points: points.to_vec(),
        }
    }

    /// 낙폭 비율 시리즈.
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.drawdown_percent).collect()
    }
}

impl ChartRenderer for DrawdownChart {
    type Geometry = DrawdownGeometry;

    fn kind(&self) -> ChartKind {
        ChartKind::Drawdown
    }

    fn len(&self) -> usize {
        self.points.len()
    }

    fn project(&self, chart: &ChartBox) -> ChartResult<DrawdownGeometry> {
        chart.validate()?;
        let values = self.values();
        ensure_finite(self.kind(), &values)?;

        let projector = ScaleProjector::new(*chart, ValueDomain::drawdown(&values), values.len());
        let paths = series_paths(&projector, &values, 0.0)?;
        let points = values
            .iter()
            .enumerate()
            .map(|(i, v)| ChartPoint {
                x: projector.scale_x(i),
                y: projector.scale_y(*v),
            })
            .collect();

        Ok(DrawdownGeometry {
            baseline_y: projector.scale_y(0.0),
            projector,
            paths,
            points,
        })
    }

    fn tooltip_lines(&self, index: usize) -> Vec<String> {
        let Some(point) = self.points.get(index) else {
            return Vec::new();
        };
        vec![
            point.date.format("%Y-%m-%d").to_string(),
            format!("낙폭: {:.2}%", point.drawdown_percent),
            format!("자산: {}", point.equity.round_dp(2)),
            format!("누적 손익: {}", signed_decimal(point.cumulative_pnl)),
        ]
    }
}

fn signed_decimal(value: Decimal) -> String {
    let value = value.round_dp(2);
    if value.is_sign_positive() && !value.is_zero() {
        format!("+{}", value)
    } else {
        value.to_string()
    }
}
