//! 성과 분석 시스템의 에러 타입.
//!
//! 이 모듈은 원장 적재, 기간 선택, 설정 로드 과정에서 사용되는 에러 타입을 정의합니다.
//! 집계 자체는 빈 입력과 0 분모를 센티널 값으로 처리하므로 에러를 반환하지 않습니다.

use thiserror::Error;

/// 핵심 분석 에러.
#[derive(Debug, Error)]
pub enum TraderError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 잘못된 거래/알림 레코드 (적재 시 건너뜀)
    #[error("잘못된 레코드: {0}")]
    InvalidRecord(String),

    /// 알 수 없는 기간 토큰
    #[error("잘못된 기간: {0}")]
    InvalidPeriod(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),

    /// 입출력 에러
    #[error("입출력 에러: {0}")]
    Io(String),
}

/// 분석 작업을 위한 Result 타입.
pub type TraderResult<T> = Result<T, TraderError>;

impl TraderError {
    /// 레코드 단위 에러인지 확인합니다.
    ///
    /// 레코드 단위 에러는 해당 레코드만 제외하고 적재를 계속합니다.
    pub fn is_record_level(&self) -> bool {
        matches!(self, TraderError::InvalidRecord(_))
    }
}

impl From<serde_json::Error> for TraderError {
    fn from(err: serde_json::Error) -> Self {
        TraderError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for TraderError {
    fn from(err: std::io::Error) -> Self {
        TraderError::Io(err.to_string())
    }
}

impl From<config::ConfigError> for TraderError {
    fn from(err: config::ConfigError) -> Self {
        TraderError::Config(err.to_string())
    }
}
