//! 부호 있는 막대 기하.

use serde::{Deserialize, Serialize};

use crate::scale::ScaleProjector;

/// 밴드 대비 막대 폭 비율.
pub const BAR_WIDTH_RATIO: f64 = 0.7;

/// 0을 기준으로 위(양수) 또는 아래(음수)로 그려지는 막대.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub index: usize,
    /// 막대 왼쪽 X
    pub x: f64,
    /// 막대 위쪽 Y
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub center_x: f64,
    pub value: f64,
    pub positive: bool,
}

impl Bar {
    /// 툴팁 앵커: 값 쪽 끝단의 중앙.
    pub fn anchor(&self) -> (f64, f64) {
        if self.positive {
            (self.center_x, self.y)
        } else {
            (self.center_x, self.y + self.height)
        }
    }
}

/// 값마다 밴드 중앙에 막대를 배치합니다.
///
/// `projector`는 `ChartBox::banded`로 만든 박스를 사용해야 막대가 밴드 중앙에 놓입니다.
pub fn signed_bars(projector: &ScaleProjector, values: &[f64], band: f64) -> Vec<Bar> {
    let zero_y = projector.scale_y(0.0);
    let width = (band * BAR_WIDTH_RATIO).max(0.0);

    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let center_x = projector.scale_x(index);
            let value_y = projector.scale_y(*value);
            Bar {
                index,
                x: center_x - width / 2.0,
                y: value_y.min(zero_y),
                width,
                height: (value_y - zero_y).abs(),
                center_x,
                value: *value,
                positive: *value >= 0.0,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::{ChartBox, Padding, ValueDomain};

    #[test]
    fn test_signed_bars() {
        let (chart, band) = ChartBox::new(200.0, 100.0, Padding::uniform(0.0)).banded(2);
        let projector = ScaleProjector::new(chart, ValueDomain::symmetric(&[5.0, -10.0], 10.0), 2);
        let bars = signed_bars(&projector, &[5.0, -10.0], band);

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].center_x, 50.0);
        assert_eq!(bars[0].width, 70.0);
        assert_eq!(bars[0].y, 25.0);
        assert_eq!(bars[0].height, 25.0);
        assert!(bars[0].positive);
        assert_eq!(bars[0].anchor(), (50.0, 25.0));

        assert_eq!(bars[1].center_x, 150.0);
        assert_eq!(bars[1].y, 50.0);
        assert_eq!(bars[1].height, 50.0);
        assert!(!bars[1].positive);
        assert_eq!(bars[1].anchor(), (150.0, 100.0));
    }
}
