//! 원장 파일 적재와 분석 세션 구성.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use tracing::{info, warn};
use trader_analytics::{AnalyticsSession, MetricsAggregator};
use trader_core::{AnalyticsConfig, IngestReport, Period, TradeLedger};

/// 분석 대상 설정.
#[derive(Debug, Clone)]
pub struct LedgerSource {
    /// 원장 JSON 파일 경로
    pub path: PathBuf,
    /// 조회 기간 (없으면 설정의 기본 기간)
    pub period: Option<Period>,
    /// 기간 계산 기준일 (없으면 오늘)
    pub today: Option<NaiveDate>,
    /// 시작 자본 재정의
    pub starting_equity: Option<Decimal>,
}

impl LedgerSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            period: None,
            today: None,
            starting_equity: None,
        }
    }
}

/// YYYY-MM-DD 날짜 파싱.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date: {}. Use YYYY-MM-DD", s))
}

/// 기간 토큰 파싱 (30d, 90d, 180d, 365d, ytd, all).
pub fn parse_period(s: &str) -> Result<Period> {
    s.parse::<Period>()
        .with_context(|| format!("Supported periods: {}", supported_periods()))
}

fn supported_periods() -> String {
    Period::ALL
        .iter()
        .map(Period::token)
        .collect::<Vec<_>>()
        .join(", ")
}

/// 원장 파일을 읽고 검증합니다.
pub fn read_ledger(source: &LedgerSource) -> Result<(TradeLedger, IngestReport)> {
    let json = fs::read_to_string(&source.path)
        .with_context(|| format!("Failed to read ledger: {}", source.path.display()))?;
    let (ledger, report) = TradeLedger::from_json(&json)
        .with_context(|| format!("Failed to parse ledger: {}", source.path.display()))?;

    if !report.is_clean() {
        warn!(
            rejected = report.rejected_count(),
            "Some ledger records were rejected"
        );
    }
    info!(
        trades = report.accepted_trades,
        alerts = report.accepted_alerts,
        "Ledger loaded"
    );
    Ok((ledger, report))
}

/// 원장과 설정으로 분석 세션을 만듭니다.
pub fn open_session(
    source: &LedgerSource,
    config: &AnalyticsConfig,
) -> Result<(AnalyticsSession, IngestReport)> {
    let (ledger, ingest) = read_ledger(source)?;

    let period = match source.period {
        Some(period) => period,
        None => parse_period(&config.default_period)
            .context("Invalid analytics.default_period in configuration")?,
    };
    let today = source.today.unwrap_or_else(|| Local::now().date_naive());
    let aggregator = MetricsAggregator::from_config(config);
    let aggregator = match source.starting_equity {
        Some(equity) => aggregator.with_starting_equity(equity),
        None => aggregator,
    };

    Ok((AnalyticsSession::new(ledger, aggregator, period, today), ingest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    fn write_ledger(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("trader_cli_{}_{}.json", name, std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-11-20").unwrap(),
            NaiveDate::from_ymd_opt(2025, 11, 20).unwrap()
        );
        assert!(parse_date("20/11/2025").is_err());
    }

    #[test]
    fn test_parse_period() {
        assert_eq!(parse_period("ytd").unwrap(), Period::Ytd);
        assert_eq!(parse_period("90D").unwrap(), Period::Days90);

        let err = parse_period("2w").unwrap_err();
        assert!(format!("{:#}", err).contains("30d"));
    }

    #[test]
    fn test_open_session() {
        let path = write_ledger(
            "open_session",
            r#"{
                "trades": [
                    {"ticker": "aapl", "entryDate": "2025-03-01", "exitDate": "2025-03-05", "pnlPercent": 4.0, "pnlDollar": "400"},
                    {"ticker": "", "entryDate": "2025-03-01", "exitDate": "2025-03-05", "pnlPercent": 1.0}
                ],
                "alerts": []
            }"#,
        );
        let source = LedgerSource {
            period: Some(Period::All),
            today: Some(NaiveDate::from_ymd_opt(2025, 11, 20).unwrap()),
            starting_equity: Some(dec!(5000)),
            ..LedgerSource::new(&path)
        };

        let (session, ingest) = open_session(&source, &AnalyticsConfig::default()).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(ingest.accepted_trades, 1);
        assert_eq!(ingest.rejected_count(), 1);
        assert_eq!(session.report().summary.total_trades, 1);
        assert_eq!(session.report().equity_curve[0].equity, dec!(5400));
    }

    #[test]
    fn test_missing_ledger_file() {
        let source = LedgerSource::new("/nonexistent/ledger.json");
        let err = open_session(&source, &AnalyticsConfig::default()).unwrap_err();
        assert!(err.to_string().contains("Failed to read ledger"));
    }
}
