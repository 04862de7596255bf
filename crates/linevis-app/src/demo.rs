//! Demo data generator

use chrono::{Days, NaiveDate};
use linevis_core::{
    CategoricalView, CategoryColumn, CellValue, ColumnSource, DataView, ValueColumn,
};
use rand::Rng;

/// Demo series with their value ranges
const SERIES: [(&str, f64, f64); 5] = [
    ("A", 0.0, 1.0),
    ("B", 0.0, 50_000.0),
    ("C", 10_000.0, 15_000.0),
    ("D", 200.0, 800.0),
    ("E", 500.0, 1_000.0),
];

pub const POINTS_PER_SERIES: usize = 100;

/// Maximum start shift in days, either direction
const MAX_SHIFT_DAYS: i64 = 5;

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default()
}

fn shifted(date: NaiveDate, days: i64) -> NaiveDate {
    let shifted = if days >= 0 {
        date.checked_add_days(Days::new(days as u64))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}

/// Daily points per series with a random start offset. Each series occupies
/// its own block of categories; the other value columns are null there.
pub fn demo_view<R: Rng>(rng: &mut R) -> DataView {
    let total = SERIES.len() * POINTS_PER_SERIES;
    let mut categories = Vec::with_capacity(total);
    let mut columns: Vec<ValueColumn> = SERIES
        .iter()
        .map(|(name, _, _)| ValueColumn {
            source: ColumnSource {
                display_name: "Value".into(),
                group_name: Some(CellValue::Text((*name).into())),
            },
            values: Vec::with_capacity(total),
        })
        .collect();

    for (index, (_, min, max)) in SERIES.iter().enumerate() {
        let start = shifted(start_date(), rng.gen_range(-MAX_SHIFT_DAYS..=MAX_SHIFT_DAYS));

        for day in 0..POINTS_PER_SERIES as i64 {
            let date = shifted(start, day);
            categories.push(Some(CellValue::Text(date.format("%Y-%m-%d").to_string())));

            let value = rng.gen_range(*min..*max);
            for (column_index, column) in columns.iter_mut().enumerate() {
                column.values.push((column_index == index).then_some(CellValue::Number(value)));
            }
        }
    }

    tracing::debug!(categories = categories.len(), series = columns.len(), "Generated demo view");

    DataView {
        categorical: Some(CategoricalView {
            categories: vec![CategoryColumn {
                source: ColumnSource {
                    display_name: "Date".into(),
                    group_name: None,
                },
                values: categories,
            }],
            values: columns,
        }),
        ..DataView::default()
    }
}
