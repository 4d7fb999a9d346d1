//! 차트 렌더러 트레이트.
//!
//! 모든 차트는 같은 계약을 따릅니다: 집계된 시리즈를 받아 주어진 박스에 대한
//! 기하(geometry)를 투영하고, 인덱스별 호버 레이블을 제공합니다.
//! 렌더러는 지표를 다시 계산하지 않습니다.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ChartResult;
use crate::scale::{ChartBox, ScaleProjector};

/// 차트 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// 낙폭 영역 차트
    Drawdown,
    /// 월별 수익률 막대
    MonthlyReturns,
    /// 종목별 히트맵/테이블
    TickerHeatmap,
    /// 연속 승/패 막대
    Streaks,
}

impl ChartKind {
    /// 대시보드 표시 순서.
    pub const ALL: [ChartKind; 4] = [
        ChartKind::Drawdown,
        ChartKind::MonthlyReturns,
        ChartKind::TickerHeatmap,
        ChartKind::Streaks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Drawdown => "drawdown",
            ChartKind::MonthlyReturns => "monthly_returns",
            ChartKind::TickerHeatmap => "ticker_heatmap",
            ChartKind::Streaks => "streaks",
        }
    }

    /// 화면 제목.
    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::Drawdown => "낙폭",
            ChartKind::MonthlyReturns => "월별 수익률",
            ChartKind::TickerHeatmap => "종목별 성과",
            ChartKind::Streaks => "연속 승패",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 호버 대상을 제공하는 투영 결과.
pub trait HoverTargets {
    /// 투영에 사용된 스케일.
    fn projector(&self) -> &ScaleProjector;

    /// 인덱스의 툴팁 앵커 좌표 `(x, y)`.
    fn anchor(&self, index: usize) -> Option<(f64, f64)>;
}

/// 차트 렌더러.
pub trait ChartRenderer {
    /// 투영 결과 타입
    type Geometry: HoverTargets + Clone + fmt::Debug + PartialEq + Serialize;

    /// 차트 종류
    fn kind(&self) -> ChartKind;

    /// 시리즈 길이
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 박스에 맞춰 기하를 투영합니다.
    ///
    /// # 매개변수
    ///
    /// * `chart` - 패딩이 적용된 픽셀 박스
    ///
    /// # 반환값
    ///
    /// 크기가 잘못되었거나 시리즈에 유한하지 않은 값이 있으면 `ChartError`
    fn project(&self, chart: &ChartBox) -> ChartResult<Self::Geometry>;

    /// 인덱스의 툴팁 레이블 (범위 밖이면 빈 목록).
    fn tooltip_lines(&self, index: usize) -> Vec<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_kind_display_matches_serde() {
        for kind in ChartKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind));
        }
        assert_eq!(ChartKind::TickerHeatmap.to_string(), "ticker_heatmap");
    }
}
