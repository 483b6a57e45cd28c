//! Conversions between polars frames and returns tables or reports.

use std::collections::{BTreeMap, HashMap};

use chrono::Datelike;
use polars::prelude::*;
use riskdecomp_primitives::{AssetId, ContributionReport, Date, ReturnsTable, RollingStatResult};

use crate::UtilsError;

/// Days from 0001-01-01 to 1970-01-01; polars dates count from the latter.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

fn to_epoch_days(date: Date) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

fn from_epoch_days(days: i32) -> Option<Date> {
    Date::from_num_days_from_ce_opt(days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)?)
}

/// Build a polars `Date` column from calendar dates.
///
/// # Errors
/// Returns `PolarsError` if the cast fails.
pub fn date_column(name: &str, dates: &[Date]) -> PolarsResult<Column> {
    let days: Vec<i32> = dates.iter().copied().map(to_epoch_days).collect();
    let series = Series::new(name.into(), days).cast(&DataType::Date)?;
    Ok(series.into())
}

fn read_dates(df: &DataFrame, name: &str) -> Result<Vec<Date>, UtilsError> {
    let column = df.column(name).map_err(|_| UtilsError::MissingColumn(name.to_string()))?;
    let days = column.cast(&DataType::Date)?.cast(&DataType::Int32)?;

    days.i32()?
        .into_iter()
        .enumerate()
        .map(|(row, day)| {
            day.and_then(from_epoch_days)
                .ok_or_else(|| UtilsError::MissingValue { column: name.to_string(), row })
        })
        .collect()
}

fn read_returns(column: &Column) -> Result<Vec<f64>, UtilsError> {
    let name = column.name().to_string();
    let values = column.cast(&DataType::Float64)?;

    values
        .f64()?
        .into_iter()
        .enumerate()
        .map(|(row, value)| match value {
            Some(v) if v.is_finite() => Ok(v),
            _ => Err(UtilsError::MissingValue { column: name.clone(), row }),
        })
        .collect()
}

/// Convert a wide frame into a returns table.
///
/// The frame holds one date column named `date_col` and one numeric column
/// per asset. Rows are sorted by date first; assets keep their column order.
///
/// # Errors
/// - `UtilsError::MissingColumn` if `date_col` is absent
/// - `UtilsError::MissingValue` for null, NaN or non-numeric cells
/// - `UtilsError::Data` for duplicate dates
pub fn returns_table_from_wide(df: &DataFrame, date_col: &str) -> Result<ReturnsTable, UtilsError> {
    if df.column(date_col).is_err() {
        return Err(UtilsError::MissingColumn(date_col.to_string()));
    }
    let sorted = df.clone().lazy().sort([date_col], SortMultipleOptions::default()).collect()?;

    let dates = read_dates(&sorted, date_col)?;
    let columns = sorted
        .get_columns()
        .iter()
        .filter(|c| c.name().as_str() != date_col)
        .map(|c| Ok((AssetId::new(c.name().as_str()), read_returns(c)?)))
        .collect::<Result<Vec<_>, UtilsError>>()?;

    if columns.is_empty() {
        return Err(UtilsError::InvalidParameter(
            "frame has no asset columns besides the date column".to_string(),
        ));
    }

    Ok(ReturnsTable::from_columns(dates, columns)?)
}

/// Convert a long frame with `date | symbol | asset_returns` columns into a
/// returns table.
///
/// Assets appear in the order they are first seen. Every asset must have a
/// return on every date present in the frame.
///
/// # Errors
/// - `UtilsError::MissingColumn` if a required column is absent
/// - `UtilsError::MissingValue` if an asset lacks a return on some date
/// - `UtilsError::InvalidParameter` for a repeated `(date, symbol)` pair
pub fn returns_table_from_long(df: &DataFrame) -> Result<ReturnsTable, UtilsError> {
    for name in ["date", "symbol", "asset_returns"] {
        if df.column(name).is_err() {
            return Err(UtilsError::MissingColumn(name.to_string()));
        }
    }

    let dates = read_dates(df, "date")?;
    let symbols = df.column("symbol")?.cast(&DataType::String)?;
    let returns = df.column("asset_returns")?.cast(&DataType::Float64)?;

    let mut assets: Vec<AssetId> = Vec::new();
    let mut asset_index: HashMap<String, usize> = HashMap::new();
    let mut cells: BTreeMap<Date, HashMap<usize, f64>> = BTreeMap::new();

    for (row, ((date, symbol), value)) in
        dates.iter().zip(symbols.str()?.into_iter()).zip(returns.f64()?.into_iter()).enumerate()
    {
        let symbol =
            symbol.ok_or_else(|| UtilsError::MissingValue { column: "symbol".to_string(), row })?;
        let value = value.filter(|v| v.is_finite()).ok_or_else(|| UtilsError::MissingValue {
            column: "asset_returns".to_string(),
            row,
        })?;

        let j = *asset_index.entry(symbol.to_string()).or_insert_with(|| {
            assets.push(AssetId::new(symbol));
            assets.len() - 1
        });

        if cells.entry(*date).or_default().insert(j, value).is_some() {
            return Err(UtilsError::InvalidParameter(format!(
                "duplicate observation for {symbol} on {date}"
            )));
        }
    }

    let table_dates: Vec<Date> = cells.keys().copied().collect();
    let mut columns: Vec<(AssetId, Vec<f64>)> =
        assets.into_iter().map(|a| (a, Vec::with_capacity(table_dates.len()))).collect();

    for (row, by_asset) in cells.values().enumerate() {
        for (j, (asset, values)) in columns.iter_mut().enumerate() {
            let value = by_asset
                .get(&j)
                .ok_or_else(|| UtilsError::MissingValue { column: asset.to_string(), row })?;
            values.push(*value);
        }
    }

    Ok(ReturnsTable::from_columns(table_dates, columns)?)
}

/// Convert a returns table into a wide frame with a leading `date` column.
///
/// # Errors
/// Returns `PolarsError` if the frame cannot be built.
pub fn returns_table_to_wide(table: &ReturnsTable) -> PolarsResult<DataFrame> {
    let mut columns = Vec::with_capacity(table.n_assets() + 1);
    columns.push(date_column("date", table.dates())?);
    for (asset, values) in table.assets().iter().zip(table.returns().columns()) {
        columns.push(Column::new(asset.as_str().into(), values.to_vec()));
    }
    DataFrame::new(columns)
}

/// Tabulate a contribution report, one row per asset.
///
/// Columns: `asset`, `weight`, `marginal`, `component`, `percentage`.
///
/// # Errors
/// Returns `PolarsError` if the frame cannot be built.
pub fn contribution_frame(report: &ContributionReport) -> PolarsResult<DataFrame> {
    let assets: Vec<&str> = report.iter().map(|c| c.asset.as_str()).collect();
    let weights: Vec<f64> = report.iter().map(|c| c.weight).collect();
    let marginal: Vec<f64> = report.iter().map(|c| c.marginal).collect();
    let component: Vec<f64> = report.iter().map(|c| c.component).collect();
    let percentage: Vec<f64> = report.iter().map(|c| c.percentage).collect();

    DataFrame::new(vec![
        Column::new("asset".into(), assets),
        Column::new("weight".into(), weights),
        Column::new("marginal".into(), marginal),
        Column::new("component".into(), component),
        Column::new("percentage".into(), percentage),
    ])
}

/// Tabulate a rolling result as `date | <statistic>`.
///
/// # Errors
/// Returns `PolarsError` if the frame cannot be built.
pub fn rolling_frame(result: &RollingStatResult) -> PolarsResult<DataFrame> {
    let dates: Vec<Date> = result.points.iter().map(|p| p.date).collect();
    DataFrame::new(vec![
        date_column("date", &dates)?,
        Column::new(result.statistic.as_str().into(), result.values()),
    ])
}

#[cfg(test)]
mod tests {
    use riskdecomp_primitives::{AssetContribution, RollingPoint};

    use super::*;

    fn d(day: u32) -> Date {
        Date::from_ymd_opt(2024, 2, day).unwrap()
    }

    #[test]
    fn epoch_days_round_trip_known_date() {
        assert_eq!(to_epoch_days(Date::from_ymd_opt(1970, 1, 1).unwrap()), 0);
        assert_eq!(to_epoch_days(Date::from_ymd_opt(1970, 1, 11).unwrap()), 10);
        assert_eq!(from_epoch_days(19_723), Date::from_ymd_opt(2024, 1, 1));
    }

    #[test]
    fn wide_frame_sorted_by_date() {
        let df = DataFrame::new(vec![
            date_column("date", &[d(2), d(1), d(3)]).unwrap(),
            Column::new("SPY".into(), &[0.02, 0.01, 0.03]),
            Column::new("TLT".into(), &[-0.01, 0.00, 0.01]),
        ])
        .unwrap();

        let table = returns_table_from_wide(&df, "date").unwrap();
        assert_eq!(table.dates(), &[d(1), d(2), d(3)]);
        assert_eq!(table.assets()[1].as_str(), "TLT");
        assert_eq!(table.returns()[[0, 0]], 0.01);
        assert_eq!(table.returns()[[2, 1]], 0.01);
    }

    #[test]
    fn wide_frame_null_is_missing_value() {
        let df = DataFrame::new(vec![
            date_column("date", &[d(1), d(2)]).unwrap(),
            Column::new("SPY".into(), &[Some(0.01), None]),
        ])
        .unwrap();

        let err = returns_table_from_wide(&df, "date").unwrap_err();
        assert!(matches!(err, UtilsError::MissingValue { ref column, row: 1 } if column == "SPY"));
    }

    #[test]
    fn wide_frame_nan_is_missing_value() {
        let df = DataFrame::new(vec![
            date_column("date", &[d(1), d(2)]).unwrap(),
            Column::new("SPY".into(), &[f64::NAN, 0.01]),
        ])
        .unwrap();

        let err = returns_table_from_wide(&df, "date").unwrap_err();
        assert!(matches!(err, UtilsError::MissingValue { row: 0, .. }));
    }

    #[test]
    fn wide_frame_requires_date_column() {
        let df = df! { "SPY" => &[0.01, 0.02] }.unwrap();
        let err = returns_table_from_wide(&df, "date").unwrap_err();
        assert!(matches!(err, UtilsError::MissingColumn(ref c) if c == "date"));
    }

    #[test]
    fn long_frame_pivots_in_first_seen_order() {
        let df = DataFrame::new(vec![
            date_column("date", &[d(2), d(2), d(1), d(1)]).unwrap(),
            Column::new("symbol".into(), &["TLT", "SPY", "SPY", "TLT"]),
            Column::new("asset_returns".into(), &[0.004, 0.012, -0.003, 0.001]),
        ])
        .unwrap();

        let table = returns_table_from_long(&df).unwrap();
        let assets: Vec<&str> = table.assets().iter().map(AssetId::as_str).collect();
        assert_eq!(assets, vec!["TLT", "SPY"]);
        assert_eq!(table.dates(), &[d(1), d(2)]);
        assert_eq!(table.returns()[[0, 0]], 0.001);
        assert_eq!(table.returns()[[1, 1]], 0.012);
    }

    #[test]
    fn long_frame_gap_is_missing_value() {
        let df = DataFrame::new(vec![
            date_column("date", &[d(1), d(1), d(2)]).unwrap(),
            Column::new("symbol".into(), &["SPY", "TLT", "SPY"]),
            Column::new("asset_returns".into(), &[0.01, 0.02, 0.03]),
        ])
        .unwrap();

        let err = returns_table_from_long(&df).unwrap_err();
        assert!(matches!(err, UtilsError::MissingValue { ref column, row: 1 } if column == "TLT"));
    }

    #[test]
    fn long_frame_duplicate_is_rejected() {
        let df = DataFrame::new(vec![
            date_column("date", &[d(1), d(1)]).unwrap(),
            Column::new("symbol".into(), &["SPY", "SPY"]),
            Column::new("asset_returns".into(), &[0.01, 0.02]),
        ])
        .unwrap();

        assert!(matches!(returns_table_from_long(&df), Err(UtilsError::InvalidParameter(_))));
    }

    #[test]
    fn wide_round_trip_through_table() {
        let table = ReturnsTable::from_columns(
            vec![d(5), d(6)],
            vec![("SPY".into(), vec![0.01, -0.02]), ("GLD".into(), vec![0.00, 0.005])],
        )
        .unwrap();

        let df = returns_table_to_wide(&table).unwrap();
        assert_eq!(df.width(), 3);
        assert_eq!(returns_table_from_wide(&df, "date").unwrap(), table);
    }

    #[test]
    fn contribution_frame_columns() {
        let report = ContributionReport::new(
            0.1,
            vec![
                AssetContribution {
                    asset: "SPY".into(),
                    weight: 0.6,
                    marginal: 0.15,
                    component: 0.09,
                    percentage: 0.9,
                },
                AssetContribution {
                    asset: "TLT".into(),
                    weight: 0.4,
                    marginal: 0.025,
                    component: 0.01,
                    percentage: 0.1,
                },
            ],
        );

        let df = contribution_frame(&report).unwrap();
        assert_eq!(df.height(), 2);
        let names: Vec<&str> = df.get_column_names().into_iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["asset", "weight", "marginal", "component", "percentage"]);
        assert_eq!(df.column("component").unwrap().f64().unwrap().get(0), Some(0.09));
    }

    #[test]
    fn rolling_frame_uses_statistic_name() {
        let result = RollingStatResult {
            asset: "SPY".into(),
            statistic: "std_dev".to_string(),
            window: 2,
            points: vec![
                RollingPoint { date: d(2), value: 0.011 },
                RollingPoint { date: d(3), value: 0.013 },
            ],
        };

        let df = rolling_frame(&result).unwrap();
        assert_eq!(df.column("date").unwrap().dtype(), &DataType::Date);
        assert_eq!(df.column("std_dev").unwrap().f64().unwrap().get(1), Some(0.013));
        assert_eq!(read_dates(&df, "date").unwrap(), vec![d(2), d(3)]);
    }
}
