//! 영역/선 경로 생성.
//!
//! 한 번의 투영으로 영역 경로와 선 경로를 함께 만듭니다.
//! 영역은 기준선을 따라 앞으로, 실제 값을 따라 뒤로 진행한 뒤 `Z`로 닫힙니다.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::error::ChartResult;
use crate::scale::ScaleProjector;

/// 투영된 경로 쌍.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesPaths {
    /// 닫힌 영역 경로
    pub area: String,
    /// 열린 선 경로
    pub line: String,
}

impl SeriesPaths {
    pub fn is_empty(&self) -> bool {
        self.area.is_empty() && self.line.is_empty()
    }
}

fn push_command(path: &mut String, command: char, x: f64, y: f64) -> std::fmt::Result {
    if !path.is_empty() {
        path.push(' ');
    }
    write!(path, "{}{:.2},{:.2}", command, x, y)
}

/// 값 시리즈의 영역/선 경로를 생성합니다.
///
/// # 매개변수
///
/// * `projector` - 공유 스케일
/// * `values` - 세로 값 시리즈
/// * `baseline` - 영역의 기준값 (낙폭 차트는 0)
///
/// # 예시
///
/// ```
/// use trader_charts::{series_paths, ChartBox, Padding, ScaleProjector, ValueDomain};
///
/// let chart = ChartBox::new(100.0, 100.0, Padding::uniform(0.0));
/// let projector = ScaleProjector::new(chart, ValueDomain::new(-10.0, 0.0), 2);
/// let paths = series_paths(&projector, &[0.0, -10.0], 0.0).unwrap();
/// assert_eq!(paths.line, "M0.00,0.00 L100.00,100.00");
/// assert!(paths.area.ends_with('Z'));
/// ```
pub fn series_paths(
    projector: &ScaleProjector,
    values: &[f64],
    baseline: f64,
) -> ChartResult<SeriesPaths> {
    if values.is_empty() {
        return Ok(SeriesPaths::default());
    }

    let base_y = projector.scale_y(baseline);
    let points: Vec<(f64, f64)> = values
        .iter()
        .enumerate()
        .map(|(i, v)| (projector.scale_x(i), projector.scale_y(*v)))
        .collect();

    let mut line = String::new();
    for (i, (x, y)) in points.iter().enumerate() {
        push_command(&mut line, if i == 0 { 'M' } else { 'L' }, *x, *y)?;
    }

    let mut area = String::new();
    for (i, (x, _)) in points.iter().enumerate() {
        push_command(&mut area, if i == 0 { 'M' } else { 'L' }, *x, base_y)?;
    }
    for (x, y) in points.iter().rev() {
        push_command(&mut area, 'L', *x, *y)?;
    }
    area.push_str(" Z");

    Ok(SeriesPaths { area, line })
}
