//! 차트 투영 에러 타입.
//!
//! 차트 에러는 해당 차트 하나에만 적용되며 다른 차트나 요약 지표에는 영향을 주지 않습니다.

use thiserror::Error;

use crate::renderer::ChartKind;

/// 차트 에러.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    /// 패딩을 뺀 그리기 영역이 없거나 크기가 유한하지 않음
    #[error("잘못된 차트 크기: {width}x{height}")]
    InvalidDimensions { width: f64, height: f64 },

    /// 시리즈에 NaN/Infinity 값이 포함됨
    #[error("{chart} 차트의 {index}번째 값이 유한하지 않습니다")]
    NonFiniteValue { chart: ChartKind, index: usize },

    /// 경로 문자열 작성 실패
    #[error("경로 작성 실패")]
    PathFormat,
}

impl From<std::fmt::Error> for ChartError {
    fn from(_: std::fmt::Error) -> Self {
        ChartError::PathFormat
    }
}

/// 차트 작업을 위한 Result 타입.
pub type ChartResult<T> = Result<T, ChartError>;

/// 시리즈의 모든 값이 유한한지 확인합니다.
pub fn ensure_finite(chart: ChartKind, values: &[f64]) -> ChartResult<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(ChartError::NonFiniteValue { chart, index }),
        None => Ok(()),
    }
}
