//! 트레이딩 성과 분석 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 전체 기간 텍스트 리포트
//! trader report --ledger data/ledger.json
//!
//! # 올해 성과를 JSON으로
//! trader report --ledger data/ledger.json --period ytd --format json
//!
//! # 90일 차트 스냅샷 (너비 640px, 기준일 고정)
//! trader charts --ledger data/ledger.json --period 90d --today 2025-11-20 --width 640
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use trader_core::{init_logging, AppConfig, LogConfig, DEFAULT_CONFIG_PATH};

use trader_cli::commands::charts::{build_charts, ChartsCliConfig};
use trader_cli::commands::ledger::{parse_date, parse_period, LedgerSource};
use trader_cli::commands::report::{build_report, render, OutputFormat};

#[derive(Parser)]
#[command(name = "trader")]
#[command(about = "Trading performance CLI - 거래 원장 성과 분석", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 (TOML)
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 기간별 성과 리포트
    Report {
        /// 원장 JSON 파일
        #[arg(short, long)]
        ledger: PathBuf,

        /// 조회 기간 (30d, 90d, 180d, 365d, ytd, all)
        #[arg(short, long)]
        period: Option<String>,

        /// 기간 계산 기준일 (YYYY-MM-DD, 기본: 오늘)
        #[arg(long)]
        today: Option<String>,

        /// 시작 자본 (기본: 설정값)
        #[arg(long)]
        starting_equity: Option<String>,

        /// 출력 형식 (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// 차트 대시보드 스냅샷 (JSON)
    Charts {
        /// 원장 JSON 파일
        #[arg(short, long)]
        ledger: PathBuf,

        /// 조회 기간 (30d, 90d, 180d, 365d, ytd, all)
        #[arg(short, long)]
        period: Option<String>,

        /// 기간 계산 기준일 (YYYY-MM-DD, 기본: 오늘)
        #[arg(long)]
        today: Option<String>,

        /// 차트 컨테이너 너비 (픽셀)
        #[arg(short, long)]
        width: Option<f64>,

        /// 툴팁 미리보기용 포인터 X (픽셀)
        #[arg(long)]
        hover_x: Option<f64>,
    },
}

fn ledger_source(
    ledger: PathBuf,
    period: Option<String>,
    today: Option<String>,
) -> anyhow::Result<LedgerSource> {
    Ok(LedgerSource {
        period: period.as_deref().map(parse_period).transpose()?,
        today: today.as_deref().map(parse_date).transpose()?,
        ..LedgerSource::new(ledger)
    })
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config)
        .with_context(|| format!("Failed to load config: {}", cli.config.display()))?;

    init_logging(LogConfig::from_settings(&config.logging))
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    match cli.command {
        Commands::Report {
            ledger,
            period,
            today,
            starting_equity,
            format,
        } => {
            let format = OutputFormat::parse(&format)?;
            let mut source = ledger_source(ledger, period, today)?;
            source.starting_equity = starting_equity
                .as_deref()
                .map(|s| {
                    s.parse::<rust_decimal::Decimal>()
                        .with_context(|| format!("Invalid starting equity: {}", s))
                })
                .transpose()?;

            match build_report(&source, &config) {
                Ok(output) => {
                    info!(
                        trades = output.report.summary.total_trades,
                        period = %output.period,
                        "Report generated"
                    );
                    println!("{}", render(&output, format)?);
                }
                Err(e) => {
                    error!("Report failed: {:#}", e);
                    return Err(e);
                }
            }
        }

        Commands::Charts {
            ledger,
            period,
            today,
            width,
            hover_x,
        } => {
            let charts_config = ChartsCliConfig {
                source: ledger_source(ledger, period, today)?,
                width,
                hover_x,
            };

            match build_charts(&charts_config, &config) {
                Ok(output) => {
                    for failure in &output.failures {
                        eprintln!("⚠️  {} 차트 실패: {}", failure.chart.title(), failure.message);
                    }
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
                Err(e) => {
                    error!("Chart snapshot failed: {:#}", e);
                    return Err(e);
                }
            }
        }
    }

    Ok(())
}
