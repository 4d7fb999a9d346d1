//! 성과 리포트 명령.

use std::fmt::Write as _;

use anyhow::Result;
use serde::Serialize;
use trader_analytics::{format_ratio, AnalyticsReport, StreakType};
use trader_core::{AppConfig, DateRange, IngestReport, Period};

use super::ledger::{open_session, LedgerSource};

/// 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(anyhow::anyhow!("Invalid format: {}. Use: text, json", s)),
        }
    }
}

/// 리포트 명령 결과.
#[derive(Debug, Clone, Serialize)]
pub struct ReportOutput {
    pub period: Period,
    pub range: DateRange,
    pub ingest: IngestReport,
    pub report: AnalyticsReport,
}

/// 원장을 읽어 선택한 기간의 리포트를 만듭니다.
pub fn build_report(source: &LedgerSource, config: &AppConfig) -> Result<ReportOutput> {
    let (session, ingest) = open_session(source, &config.analytics)?;
    Ok(ReportOutput {
        period: session.period(),
        range: session.range(),
        ingest,
        report: session.report().clone(),
    })
}

/// 형식에 맞춰 출력 문자열을 만듭니다.
pub fn render(output: &ReportOutput, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(output)?),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(output)?),
    }
}

fn format_range(range: &DateRange) -> String {
    match (range.start, range.end) {
        (Some(start), Some(end)) => format!("{} ~ {}", start, end),
        _ => "전체".to_string(),
    }
}

fn streak_label(kind: StreakType) -> &'static str {
    match kind {
        StreakType::Win => "연승",
        StreakType::Loss => "연패",
        StreakType::None => "없음",
    }
}

/// 사람이 읽는 텍스트 리포트.
pub fn render_text(output: &ReportOutput) -> Result<String, std::fmt::Error> {
    let ReportOutput {
        period,
        range,
        ingest,
        report,
    } = output;
    let s = &report.summary;
    let mut out = String::new();

    writeln!(out, "📊 성과 리포트 ({}, {})", period, format_range(range))?;
    if !ingest.is_clean() {
        writeln!(out, "⚠️  거부된 레코드: {}건", ingest.rejected_count())?;
    }

    if report.is_empty() {
        writeln!(out, "\n선택한 기간에 청산된 거래가 없습니다.")?;
        return Ok(out);
    }

    writeln!(out, "\n=== 요약 ===")?;
    writeln!(
        out,
        "거래 수: {} (승 {} / 패 {} / 무 {})",
        s.total_trades, s.wins, s.losses, s.break_even
    )?;
    writeln!(out, "승률: {:.1}%", s.win_rate)?;
    writeln!(out, "수익 팩터(PF): {}", format_ratio(s.profit_factor))?;
    writeln!(out, "기대값: {:+.2}%", s.expectancy)?;
    writeln!(out, "샤프 비율: {:.2}", s.sharpe_ratio)?;
    writeln!(out, "위험 대비 보상: {}", format_ratio(s.risk_reward_ratio))?;
    writeln!(
        out,
        "최대 낙폭: {:.2}% ({})",
        s.max_drawdown_percent,
        s.max_drawdown.round_dp(2)
    )?;
    writeln!(
        out,
        "총 손익: {} ({:+.2}%)",
        s.total_pnl.round_dp(2),
        s.total_pnl_percent
    )?;
    writeln!(
        out,
        "평균 수익/손실: +{:.2}% / -{:.2}%",
        s.avg_win_percent, s.avg_loss_percent
    )?;
    writeln!(out, "평균 보유일: {:.1}일", s.avg_holding_days)?;

    let streaks = &report.streaks;
    writeln!(out, "\n=== 연속 승패 ===")?;
    writeln!(
        out,
        "현재: {} {}회",
        streak_label(streaks.current_streak_type),
        streaks.current_streak
    )?;
    writeln!(
        out,
        "최대 연승: {}회, 최대 연패: {}회",
        streaks.max_win_streak, streaks.max_loss_streak
    )?;

    let alerts = &report.alert_effectiveness;
    if alerts.total_alerts > 0 {
        writeln!(out, "\n=== 알림 효과 ===")?;
        writeln!(
            out,
            "알림 {}건 중 {}건 거래 전환 ({:.1}%), 수익 전환 {:.1}%",
            alerts.total_alerts,
            alerts.alerts_with_trades,
            alerts.conversion_rate,
            alerts.profitable_conversion_rate
        )?;
    }

    writeln!(out, "\n=== 월별 ===")?;
    for month in &report.monthly {
        writeln!(
            out,
            "{}  {:>+8.2}%  {:>3}건  승률 {:>5.1}%",
            month.label(),
            month.pnl_percent,
            month.total_trades,
            month.win_rate
        )?;
    }

    writeln!(out, "\n=== 종목별 ===")?;
    for row in &report.by_ticker {
        writeln!(
            out,
            "{:<8} {:>+8.2}%  {:>3}건  승률 {:>5.1}%  PF {}",
            row.ticker,
            row.total_pnl_percent,
            row.total_trades,
            row.win_rate,
            format_ratio(row.profit_factor)
        )?;
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use trader_analytics::MetricsAggregator;
    use trader_core::ClosedTrade;

    fn output() -> ReportOutput {
        let date = |m, d| NaiveDate::from_ymd_opt(2025, m, d).unwrap();
        let trades = vec![
            ClosedTrade::new("AAPL", date(6, 1), date(6, 3), 10.0, dec!(1000)),
            ClosedTrade::new("MSFT", date(6, 2), date(6, 4), 20.0, dec!(2000)),
        ];
        ReportOutput {
            period: Period::All,
            range: DateRange::unbounded(),
            ingest: IngestReport::default(),
            report: MetricsAggregator::default().compute(&trades, &[]),
        }
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("text").unwrap(), OutputFormat::Text);
        assert!(OutputFormat::parse("csv").is_err());
    }

    #[test]
    fn test_render_text() {
        let text = render_text(&output()).unwrap();

        assert!(text.contains("성과 리포트 (all, 전체)"));
        assert!(text.contains("승률: 100.0%"));
        assert!(text.contains("수익 팩터(PF): 99+"));
        assert!(text.contains("현재: 연승 2회"));
        assert!(text.contains("2025-06"));
    }

    #[test]
    fn test_render_empty() {
        let mut empty = output();
        empty.report = MetricsAggregator::default().compute(&[], &[]);

        let text = render_text(&empty).unwrap();
        assert!(text.contains("청산된 거래가 없습니다"));
    }

    #[test]
    fn test_render_json() {
        let json = render(&output(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["period"], "all");
        assert_eq!(value["report"]["summary"]["total_trades"], 2);
    }
}
