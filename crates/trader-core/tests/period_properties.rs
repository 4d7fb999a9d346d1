//! 기간 필터 및 원장 속성 테스트 (proptest)

use chrono::{Datelike, Duration, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;
use trader_core::{normalize_ticker, ClosedTrade, Period, TradeLedger};

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
}

fn period_strategy() -> impl Strategy<Value = Period> {
    prop::sample::select(Period::ALL.to_vec())
}

proptest! {
    #[test]
    fn prop_range_contains_today(period in period_strategy(), offset in 0i64..1_500) {
        let today = base() + Duration::days(offset);
        let range = period.range(today);

        prop_assert!(range.contains(today));
        prop_assert!(!range.contains(today + Duration::days(1)) || period == Period::All);
    }

    #[test]
    fn prop_ytd_starts_jan_first(offset in 0i64..1_500) {
        let today = base() + Duration::days(offset);
        let range = Period::Ytd.range(today);

        prop_assert_eq!(range.start, NaiveDate::from_ymd_opt(today.year(), 1, 1));
        prop_assert_eq!(range.end, Some(today));
    }

    #[test]
    fn prop_filtered_ledger_is_subset(
        offsets in prop::collection::vec(0i64..1_000, 0..50),
        period in period_strategy(),
    ) {
        let trades: Vec<ClosedTrade> = offsets
            .iter()
            .map(|o| {
                let exit = base() + Duration::days(*o);
                ClosedTrade::new("PROP", exit, exit, 1.0, Decimal::ONE)
            })
            .collect();
        let ledger = TradeLedger::new(trades, vec![]);
        let today = base() + Duration::days(900);
        let range = period.range(today);
        let filtered = ledger.filtered(&range);

        prop_assert!(filtered.len() <= ledger.len());
        prop_assert!(filtered.trades().iter().all(|t| range.contains(t.exit_date)));
        prop_assert!(filtered.trades().windows(2).all(|w| w[0].exit_date <= w[1].exit_date));
    }

    #[test]
    fn prop_normalize_ticker_idempotent(ticker in "[ a-zA-Z0-9.]{0,10}") {
        let once = normalize_ticker(&ticker);
        prop_assert_eq!(normalize_ticker(&once), once.clone());
        prop_assert_eq!(once.trim(), once.as_str());
    }
}
