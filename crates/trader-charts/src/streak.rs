//! 연속 승/패 차트.
//!
//! 각 연속 구간을 부호 있는 막대(연승 +, 연패 −)로 그리고,
//! 진행 중인 마지막 구간에 현재 연속 표시를 붙입니다.

use serde::{Deserialize, Serialize};
use trader_analytics::{StreakAnalysis, StreakRun, StreakType};

use crate::bars::{signed_bars, Bar};
use crate::error::ChartResult;
use crate::renderer::{ChartKind, ChartRenderer, HoverTargets};
use crate::scale::{ChartBox, ScaleProjector, ValueDomain};

/// 현재 연속 표시.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentStreakMarker {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub kind: StreakType,
    pub length: u32,
}

/// 연속 승패 기하.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreakGeometry {
    pub projector: ScaleProjector,
    pub bars: Vec<Bar>,
    pub zero_y: f64,
    pub current: Option<CurrentStreakMarker>,
}

impl HoverTargets for StreakGeometry {
    fn projector(&self) -> &ScaleProjector {
        &self.projector
    }

    fn anchor(&self, index: usize) -> Option<(f64, f64)> {
        self.bars.get(index).map(Bar::anchor)
    }
}

/// 연속 승패 막대 차트.
#[derive(Debug, Clone, PartialEq)]
pub struct StreakChart {
    runs: Vec<StreakRun>,
    analysis: StreakAnalysis,
}

impl StreakChart {
    pub fn new(runs: &[StreakRun], analysis: &StreakAnalysis) -> Self {
        Self {
            runs: runs.to_vec(),
            analysis: analysis.clone(),
        }
    }

    pub fn values(&self) -> Vec<f64> {
        self.runs.iter().map(StreakRun::signed_length).collect()
    }

    /// 마지막 구간이 현재 진행 중인 연속이면 그 인덱스.
    ///
    /// 마지막 거래가 무승부이면 현재 연속은 0이므로 표시하지 않습니다.
    pub fn current_index(&self) -> Option<usize> {
        if self.analysis.current_streak == 0 {
            return None;
        }
        let last = self.runs.last()?;
        (last.kind == self.analysis.current_streak_type
            && last.length == self.analysis.current_streak)
            .then(|| self.runs.len() - 1)
    }
}

impl ChartRenderer for StreakChart {
    type Geometry = StreakGeometry;

    fn kind(&self) -> ChartKind {
        ChartKind::Streaks
    }

    fn len(&self) -> usize {
        self.runs.len()
    }

    fn project(&self, chart: &ChartBox) -> ChartResult<StreakGeometry> {
        chart.validate()?;
        let values = self.values();

        let (banded, band) = chart.banded(values.len());
        let projector = ScaleProjector::new(banded, ValueDomain::symmetric(&values, 1.0), values.len());
        let bars = signed_bars(&projector, &values, band);

        let current = self.current_index().and_then(|index| {
            let bar = bars.get(index)?;
            let (x, y) = bar.anchor();
            Some(CurrentStreakMarker {
                index,
                x,
                y,
                kind: self.analysis.current_streak_type,
                length: self.analysis.current_streak,
            })
        });

        Ok(StreakGeometry {
            zero_y: projector.scale_y(0.0),
            projector,
            bars,
            current,
        })
    }

    fn tooltip_lines(&self, index: usize) -> Vec<String> {
        let Some(run) = self.runs.get(index) else {
            return Vec::new();
        };
        let label = match run.kind {
            StreakType::Win => "연승",
            StreakType::Loss => "연패",
            StreakType::None => "-",
        };
        let mut lines = vec![
            format!("{} {}회", label, run.length),
            format!(
                "{} ~ {}",
                run.start_date.format("%Y-%m-%d"),
                run.end_date.format("%Y-%m-%d")
            ),
        ];
        if self.current_index() == Some(index) {
            lines.push("진행 중".to_string());
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::Padding;
    use chrono::NaiveDate;

    fn run(kind: StreakType, length: u32, day: u32) -> StreakRun {
        let date = NaiveDate::from_ymd_opt(2025, 6, day).unwrap();
        StreakRun {
            kind,
            length,
            start_date: date,
            end_date: date,
        }
    }

    fn analysis(current_streak: u32, current_streak_type: StreakType) -> StreakAnalysis {
        StreakAnalysis {
            current_streak,
            current_streak_type,
            max_win_streak: 3,
            max_loss_streak: 2,
            avg_win_streak: 3.0,
            avg_loss_streak: 2.0,
        }
    }

    fn chart_box() -> ChartBox {
        ChartBox::new(300.0, 100.0, Padding::uniform(0.0))
    }

    #[test]
    fn test_streak_bars_and_marker() {
        let chart = StreakChart::new(
            &[run(StreakType::Win, 3, 1), run(StreakType::Loss, 2, 5)],
            &analysis(2, StreakType::Loss),
        );
        let geometry = chart.project(&chart_box()).unwrap();

        assert_eq!(geometry.zero_y, 50.0);
        assert!(geometry.bars[0].positive);
        assert_eq!(geometry.bars[0].height, 50.0);
        assert!(!geometry.bars[1].positive);

        let marker = geometry.current.unwrap();
        assert_eq!(marker.index, 1);
        assert_eq!(marker.kind, StreakType::Loss);
        assert_eq!(marker.length, 2);
        assert_eq!(chart.tooltip_lines(1).last().unwrap(), "진행 중");
        assert_eq!(chart.tooltip_lines(0)[0], "연승 3회");
    }

    #[test]
    fn test_no_marker_after_break_even() {
        let chart = StreakChart::new(&[run(StreakType::Win, 3, 1)], &analysis(0, StreakType::None));
        let geometry = chart.project(&chart_box()).unwrap();

        assert!(geometry.current.is_none());
        assert_eq!(chart.tooltip_lines(0).len(), 2);
    }
}
