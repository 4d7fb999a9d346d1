//! 스케일 투영 속성 테스트 (proptest)

use proptest::prelude::*;
use trader_charts::{series_paths, ChartBox, Padding, ScaleProjector, ValueDomain};

fn chart_box() -> impl Strategy<Value = ChartBox> {
    (200.0f64..2_000.0, 100.0f64..800.0, 0.0f64..40.0)
        .prop_map(|(width, height, pad)| ChartBox::new(width, height, Padding::uniform(pad)))
}

proptest! {
    #[test]
    fn prop_scale_x_monotonic(chart in chart_box(), len in 1usize..200) {
        let projector = ScaleProjector::new(chart, ValueDomain::new(-1.0, 1.0), len);

        for i in 1..len {
            prop_assert!(projector.scale_x(i) > projector.scale_x(i - 1));
        }
        prop_assert!(projector.scale_x(0).is_finite());
        prop_assert!((projector.scale_x(len - 1) - chart.right()).abs() < 1e-6 || len == 1);
    }

    #[test]
    fn prop_scale_y_within_box(
        chart in chart_box(),
        values in prop::collection::vec(-100.0f64..0.0, 1..100),
    ) {
        let projector = ScaleProjector::new(chart, ValueDomain::drawdown(&values), values.len());

        for v in &values {
            let y = projector.scale_y(*v);
            prop_assert!(y >= chart.top() - 1e-9 && y <= chart.bottom() + 1e-9);
        }
    }

    #[test]
    fn prop_index_at_inverts_scale_x(chart in chart_box(), len in 1usize..100) {
        let projector = ScaleProjector::new(chart, ValueDomain::new(-1.0, 1.0), len);

        for i in 0..len {
            prop_assert_eq!(projector.index_at(projector.scale_x(i)), Some(i));
        }
    }

    #[test]
    fn prop_paths_closed(values in prop::collection::vec(-50.0f64..0.0, 1..50)) {
        let chart = ChartBox::new(800.0, 300.0, Padding::uniform(20.0));
        let projector = ScaleProjector::new(chart, ValueDomain::drawdown(&values), values.len());
        let paths = series_paths(&projector, &values, 0.0).unwrap();

        prop_assert!(paths.area.ends_with('Z'));
        prop_assert!(paths.line.starts_with('M'));
        prop_assert_eq!(paths.line.matches('L').count(), values.len() - 1);
    }
}
