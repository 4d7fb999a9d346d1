//! 설정 관리.
//!
//! 이 모듈은 분석 엔진, 차트 투영, 로깅 설정을 정의하고 관리합니다.
//! 로드 순서는 기본값 → TOML 파일 → `TRADER__` 접두사 환경 변수입니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 성과 집계 설정
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    /// 차트 투영 설정
    #[serde(default)]
    pub charts: ChartConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 성과 집계 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// 자산 곡선의 시작 자본 (낙폭 계산 기준)
    pub starting_equity: Decimal,
    /// 기본 조회 기간 토큰 (30d, 90d, 180d, 365d, ytd, all)
    pub default_period: String,
    /// 리포트에 포함할 낙폭 기간의 최소 깊이 (%, 양수 크기)
    pub min_drawdown_percent: f64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            starting_equity: Decimal::new(10_000, 0),
            default_period: "all".to_string(),
            min_drawdown_percent: 1.0,
        }
    }
}

/// 차트 투영 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChartConfig {
    /// 컨테이너 폭 (픽셀, 측정 전 초기값)
    pub width: f64,
    /// 차트 높이 (픽셀)
    pub height: f64,
    pub padding_top: f64,
    pub padding_right: f64,
    pub padding_bottom: f64,
    pub padding_left: f64,
    /// 부호 있는 값 도메인의 기본 범위 (±, 빈 시리즈용)
    pub signed_default_extent: f64,
    /// 툴팁 박스 크기
    pub tooltip_width: f64,
    pub tooltip_height: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 300.0,
            padding_top: 20.0,
            padding_right: 20.0,
            padding_bottom: 30.0,
            padding_left: 50.0,
            signed_default_extent: 10.0,
            tooltip_width: 160.0,
            tooltip_height: 64.0,
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // 기본값으로 시작
            .set_default("analytics.starting_equity", "10000")?
            .set_default("analytics.default_period", "all")?
            .set_default("analytics.min_drawdown_percent", 1.0)?
            // 파일에서 로드
            .add_source(config::File::from(path.as_ref()).required(false))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("TRADER")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> Result<Self, config::ConfigError> {
        Self::load(DEFAULT_CONFIG_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.analytics.starting_equity, dec!(10000));
        assert_eq!(config.analytics.default_period, "all");
        assert_eq!(config.analytics.min_drawdown_percent, 1.0);
        assert_eq!(config.charts.signed_default_extent, 10.0);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = AppConfig::load("does/not/exist.toml").unwrap();
        assert_eq!(config.analytics.starting_equity, dec!(10000));
        assert_eq!(config.charts.width, 800.0);
    }

    #[test]
    fn test_load_from_toml_file() {
        let path = std::env::temp_dir().join(format!(
            "trader-core-config-{}.toml",
            std::process::id()
        ));
        {
            let mut file = std::fs::File::create(&path).unwrap();
            writeln!(file, "[analytics]").unwrap();
            writeln!(file, "starting_equity = \"25000\"").unwrap();
            writeln!(file, "default_period = \"ytd\"").unwrap();
            writeln!(file, "min_drawdown_percent = 2.5").unwrap();
            writeln!(file, "[charts]").unwrap();
            writeln!(file, "height = 240.0").unwrap();
        }

        let config = AppConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.analytics.starting_equity, dec!(25000));
        assert_eq!(config.analytics.default_period, "ytd");
        assert_eq!(config.analytics.min_drawdown_percent, 2.5);
        assert_eq!(config.charts.height, 240.0);
        // 지정하지 않은 값은 기본값 유지
        assert_eq!(config.charts.width, 800.0);
    }
}
