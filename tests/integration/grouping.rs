#![allow(missing_docs)]

use benchplot::figure::{comparison_figure, per_category_figures};
use benchplot::group::{comparison_pairs, distinct, grid_rows, partition};
use benchplot::label::RunLabel;
use benchplot::model::{BenchRecord, LabeledTable, Table};
use benchplot::stats::describe;
use proptest::prelude::*;

fn arb_record() -> impl Strategy<Value = BenchRecord> {
    (
        prop::sample::select(vec!["Signal", "Memo", "Effect"]),
        prop::sample::select(vec!["a", "b", "c d"]),
        0i64..1_000,
        0.0f64..500.0,
    )
        .prop_map(|(name, options, iterations, milliseconds)| BenchRecord {
            name: name.to_string(),
            options: options.to_string(),
            iterations,
            observer_callback_count: 0,
            milliseconds,
        })
}

fn labeled(file: &str, rows: Vec<BenchRecord>) -> LabeledTable<BenchRecord> {
    LabeledTable {
        label: RunLabel::parse(file).expect("label"),
        table: Table::new(file, rows),
    }
}

proptest! {
    #[test]
    fn every_row_lands_in_exactly_one_partition(rows in prop::collection::vec(arb_record(), 0..64)) {
        let mut covered = 0usize;
        for name in distinct(rows.iter(), |r| r.name.as_str()) {
            for option in distinct(rows.iter(), |r| r.options.as_str()) {
                let part = partition(rows.iter(), name, option);
                prop_assert!(part.iter().all(|r| r.name == name && r.options == option));
                covered += part.len();
            }
        }
        prop_assert_eq!(covered, rows.len());
    }

    #[test]
    fn per_category_series_hold_exactly_the_matching_rows(rows in prop::collection::vec(arb_record(), 1..64)) {
        let table = Table::new("all.csv", rows.clone());
        let figures = per_category_figures(&table);
        let mut plotted = 0usize;
        for figure in &figures {
            for series in &figure.panels[0].series {
                let option = series.label.strip_prefix("Option ").expect("prefix");
                let expected = partition(rows.iter(), &figure.title, option).len();
                prop_assert_eq!(series.points.len(), expected);
                prop_assert!(series.points.windows(2).all(|w| w[0].0 <= w[1].0));
                plotted += series.points.len();
            }
        }
        prop_assert_eq!(plotted, rows.len());
    }

    #[test]
    fn pair_count_is_the_product_of_key_sets(
        left in prop::collection::vec(arb_record(), 0..32),
        right in prop::collection::vec(arb_record(), 0..32),
    ) {
        let all: Vec<&BenchRecord> = left.iter().chain(right.iter()).collect();
        let names = distinct(all.iter().copied(), |r| r.name.as_str()).len();
        let options = distinct(all.iter().copied(), |r| r.options.as_str()).len();
        let runs = [labeled("h-c-i-left.csv", left.clone()), labeled("h-c-i-right.csv", right.clone())];
        let pairs = comparison_pairs(&runs);
        prop_assert_eq!(pairs.len(), names * options);
        let mut sorted = pairs.clone();
        sorted.sort();
        prop_assert_eq!(&sorted, &pairs);

        let figure = comparison_figure(&runs, 2);
        prop_assert_eq!(figure.panels.len(), pairs.len());
        prop_assert_eq!(figure.grid().0, grid_rows(pairs.len(), 2));
    }
}

#[test]
fn category_summary_reflects_filtered_rows() {
    let rows = vec![
        BenchRecord {
            name: "Signal".into(),
            options: "a".into(),
            iterations: 10,
            observer_callback_count: 1,
            milliseconds: 3.0,
        },
        BenchRecord {
            name: "Memo".into(),
            options: "a".into(),
            iterations: 10,
            observer_callback_count: 1,
            milliseconds: 100.0,
        },
    ];
    let table = Table::new("all.csv", rows);
    let summary = describe(table.filter(|r| r.name == "Signal"), "Signal");
    let ms = summary.column("Milliseconds").expect("column");
    assert_eq!(ms.count, 1);
    assert_eq!(ms.mean, 3.0);
    assert!(ms.std.is_nan());
}
