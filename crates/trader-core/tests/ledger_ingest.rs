//! 원장 적재 통합 테스트
//!
//! JSON 문서 → 검증 → 기간 필터까지의 흐름을 확인합니다.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use trader_core::{Period, TradeLedger, TradeOutcome};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

const LEDGER_JSON: &str = r#"{
    "trades": [
        {"ticker": "aapl", "entryDate": "2025-10-01", "exitDate": "2025-10-08", "pnlPercent": 10.0, "pnlDollar": 1000},
        {"ticker": "MSFT", "entryDate": "2024-12-01", "exitDate": "2024-12-15", "pnlPercent": -5.0, "pnlDollar": "-500"},
        {"ticker": "NVDA", "entryDate": "2025-09-01", "exitDate": "2025-09-03", "pnlPercent": 20.0, "pnlDollar": 2000, "setup": "breakout"},
        {"ticker": "", "entryDate": "2025-09-01", "exitDate": "2025-09-03", "pnlPercent": 1.0},
        {"ticker": "AMD", "entryDate": "2025-09-05", "pnlPercent": 1.0}
    ],
    "alerts": [
        {"alertId": 1, "ticker": "AAPL", "sentAt": "2025-09-30", "resultedInTrade": true},
        {"alertId": 2, "ticker": "TSLA", "sentAt": "2025-10-02", "resultedInTrade": false},
        {"ticker": "TSLA", "sentAt": "2025-10-03"}
    ]
}"#;

#[test]
fn test_ledger_from_json() {
    let (ledger, report) = TradeLedger::from_json(LEDGER_JSON).unwrap();

    assert_eq!(report.accepted_trades, 3);
    assert_eq!(report.accepted_alerts, 2);
    assert_eq!(report.rejected_count(), 3);

    // 청산일 순 정렬
    let tickers: Vec<&str> = ledger.trades().iter().map(|t| t.ticker.as_str()).collect();
    assert_eq!(tickers, vec!["MSFT", "NVDA", "AAPL"]);

    let msft = &ledger.trades()[0];
    assert_eq!(msft.pnl_dollar, dec!(-500));
    assert_eq!(msft.outcome, TradeOutcome::Loss);
    assert_eq!(ledger.trades()[1].setup.as_deref(), Some("breakout"));
}

#[test]
fn test_ledger_ytd_window_excludes_prior_year() {
    let (ledger, _) = TradeLedger::from_json(LEDGER_JSON).unwrap();

    let range = Period::Ytd.range(date(2025, 11, 20));
    let window = ledger.filtered(&range);

    assert_eq!(window.len(), 2);
    assert!(window.trades().iter().all(|t| t.exit_date >= date(2025, 1, 1)));
    assert!(window.trades().iter().all(|t| t.ticker != "MSFT"));
}

#[test]
fn test_ledger_empty_document() {
    let (ledger, report) = TradeLedger::from_json("{}").unwrap();
    assert!(ledger.is_empty());
    assert!(ledger.alerts().is_empty());
    assert!(report.is_clean());
}

#[test]
fn test_ledger_rejects_invalid_field_values_only() {
    let cases = [
        (
            r#"{"ticker": "MSFT", "entryDate": "2025-01-02", "exitDate": "2025-13-45", "pnlPercent": 1.0}"#,
            "malformed record",
        ),
        (
            r#"{"ticker": "MSFT", "entryDate": "2025-01-02", "exitDate": "2025-01-09", "pnlPercent": "n/a"}"#,
            "malformed record",
        ),
        (
            r#"{"ticker": "MSFT", "entryDate": "2025-01-02", "exitDate": "2025-01-09", "pnlPercent": 1.0, "pnlDollar": "999999999999999999999999"}"#,
            "out of range",
        ),
    ];

    for (bad, reason) in cases {
        let json = format!(
            r#"{{"trades": [
                {{"ticker": "AAPL", "entryDate": "2025-01-02", "exitDate": "2025-01-10", "pnlPercent": 4.0, "pnlDollar": 400}},
                {},
                {{"ticker": "NVDA", "entryDate": "2025-01-03", "exitDate": "2025-01-11", "pnlPercent": -2.0, "pnlDollar": -200}}
            ]}}"#,
            bad
        );
        let (ledger, report) = TradeLedger::from_json(&json).unwrap();

        assert_eq!(ledger.len(), 2, "{}", bad);
        assert_eq!(report.accepted_trades, 2);
        assert_eq!(report.rejected_count(), 1);
        assert_eq!(report.rejected[0].kind, "trade");
        assert_eq!(report.rejected[0].index, 1);
        assert!(
            report.rejected[0].reason.contains(reason),
            "{}",
            report.rejected[0].reason
        );

        let tickers: Vec<&str> = ledger.trades().iter().map(|t| t.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["AAPL", "NVDA"]);
    }
}
