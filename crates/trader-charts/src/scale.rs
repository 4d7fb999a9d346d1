//! 스케일 투영.
//!
//! 시리즈 길이, 패딩이 적용된 픽셀 박스, 값 도메인으로부터 순수 함수
//! `scale_x(index)` / `scale_y(value)`를 제공합니다. 모든 차트가 이 모듈 하나를 공유합니다.
//!
//! - X: 서수 인덱스 기준 균등 간격, `left + inner_width × i / max(len − 1, 1)`
//! - Y: 도메인 최댓값이 위쪽 가장자리, 최솟값이 아래쪽 가장자리
//!
//! 도메인 폭이 0이면 모든 값을 위쪽 가장자리에 놓고, 점이 하나여도 0으로 나누지 않습니다.

use serde::{Deserialize, Serialize};
use trader_core::ChartConfig;

use crate::error::{ChartError, ChartResult};

/// 차트 박스 안쪽 여백 (픽셀).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }
}

impl Default for Padding {
    fn default() -> Self {
        Self::from(&ChartConfig::default())
    }
}

impl From<&ChartConfig> for Padding {
    fn from(config: &ChartConfig) -> Self {
        Self::new(
            config.padding_top,
            config.padding_right,
            config.padding_bottom,
            config.padding_left,
        )
    }
}

/// 패딩이 적용된 픽셀 박스.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartBox {
    pub width: f64,
    pub height: f64,
    pub padding: Padding,
}

impl ChartBox {
    pub fn new(width: f64, height: f64, padding: Padding) -> Self {
        Self {
            width,
            height,
            padding,
        }
    }

    pub fn left(&self) -> f64 {
        self.padding.left
    }

    pub fn right(&self) -> f64 {
        self.width - self.padding.right
    }

    pub fn top(&self) -> f64 {
        self.padding.top
    }

    pub fn bottom(&self) -> f64 {
        self.height - self.padding.bottom
    }

    pub fn inner_width(&self) -> f64 {
        (self.width - self.padding.left - self.padding.right).max(0.0)
    }

    pub fn inner_height(&self) -> f64 {
        (self.height - self.padding.top - self.padding.bottom).max(0.0)
    }

    /// 그리기 영역이 존재하는지 확인합니다.
    pub fn validate(&self) -> ChartResult<()> {
        let finite = [
            self.width,
            self.height,
            self.padding.top,
            self.padding.right,
            self.padding.bottom,
            self.padding.left,
        ]
        .iter()
        .all(|v| v.is_finite());

        if !finite || self.inner_width() <= 0.0 || self.inner_height() <= 0.0 {
            return Err(ChartError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// 좌우 여백을 `amount`만큼 늘린 박스.
    pub fn inset_horizontal(&self, amount: f64) -> Self {
        let mut inset = *self;
        inset.padding.left += amount;
        inset.padding.right += amount;
        inset
    }

    /// 막대/셀 차트용 밴드 박스와 밴드 폭.
    ///
    /// 폭을 `len`개의 밴드로 나누고 좌우를 밴드 절반씩 줄여, `scale_x`가
    /// 각 밴드의 중앙을 가리키게 합니다.
    pub fn banded(&self, len: usize) -> (Self, f64) {
        let band = self.inner_width() / len.max(1) as f64;
        (self.inset_horizontal(band / 2.0), band)
    }
}

/// 값 도메인 `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueDomain {
    pub min: f64,
    pub max: f64,
}

impl ValueDomain {
    /// 도메인을 생성합니다. 유한하지 않은 경계는 0으로 대체하고 순서를 맞춥니다.
    pub fn new(min: f64, max: f64) -> Self {
        let min = if min.is_finite() { min } else { 0.0 };
        let max = if max.is_finite() { max } else { 0.0 };
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// 낙폭 도메인 `[min(시리즈 최솟값, 0), 0]`.
    pub fn drawdown(values: &[f64]) -> Self {
        let min = values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(0.0, f64::min);
        Self::new(min, 0.0)
    }

    /// 0을 중심으로 대칭인 도메인 `±max(|min|, |max|)`.
    ///
    /// 시리즈가 비었거나 모두 0이면 `±default_extent`를 사용합니다.
    pub fn symmetric(values: &[f64], default_extent: f64) -> Self {
        let extent = values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .map(f64::abs)
            .fold(0.0, f64::max);
        let extent = if extent > 0.0 {
            extent
        } else {
            default_extent.abs()
        };
        Self::new(-extent, extent)
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// 스케일 투영기.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleProjector {
    chart: ChartBox,
    domain: ValueDomain,
    len: usize,
}

impl ScaleProjector {
    /// # 매개변수
    ///
    /// * `chart` - 패딩이 적용된 박스
    /// * `domain` - 값 도메인
    /// * `len` - 시리즈 길이
    pub fn new(chart: ChartBox, domain: ValueDomain, len: usize) -> Self {
        Self { chart, domain, len }
    }

    pub fn chart(&self) -> &ChartBox {
        &self.chart
    }

    pub fn domain(&self) -> &ValueDomain {
        &self.domain
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn divisor(&self) -> f64 {
        self.len.saturating_sub(1).max(1) as f64
    }

    /// 인덱스 간 간격 (픽셀).
    pub fn step(&self) -> f64 {
        self.chart.inner_width() / self.divisor()
    }

    /// 서수 인덱스 → X 픽셀.
    pub fn scale_x(&self, index: usize) -> f64 {
        self.chart.left() + self.chart.inner_width() * index as f64 / self.divisor()
    }

    /// 값 → Y 픽셀. 도메인 밖의 값은 가장자리로 고정됩니다.
    pub fn scale_y(&self, value: f64) -> f64 {
        let span = self.domain.span();
        if span <= 0.0 || !span.is_finite() || !value.is_finite() {
            return self.chart.top();
        }
        let value = self.domain.clamp(value);
        self.chart.top() + (self.domain.max - value) / span * self.chart.inner_height()
    }

    /// `scale_x`의 역함수: X 픽셀에 가장 가까운 인덱스.
    pub fn index_at(&self, x: f64) -> Option<usize> {
        if self.len == 0 || !x.is_finite() {
            return None;
        }
        let last = self.len - 1;
        let inner = self.chart.inner_width();
        if last == 0 || inner <= 0.0 {
            return Some(0);
        }
        let position = ((x - self.chart.left()) / inner * last as f64).round();
        Some(position.clamp(0.0, last as f64) as usize)
    }
}
