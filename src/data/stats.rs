use std::str::FromStr;

use super::model::{NumericField, Record};

// ---------------------------------------------------------------------------
// Aggregation over a filtered record slice
// ---------------------------------------------------------------------------

/// Outcome of an aggregation. `NoData` means no records matched; it is a
/// distinct variant rather than `NaN` or `0.0` so callers can render a
/// human message instead of a numeric artifact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AggregateResult {
    Value(f64),
    NoData,
}

impl AggregateResult {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AggregateResult::Value(v) => Some(*v),
            AggregateResult::NoData => None,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, AggregateResult::NoData)
    }
}

/// The statistics offered over a record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statistic {
    Average,
    Total,
    Count,
}

impl Statistic {
    pub fn compute(&self, records: &[Record], field: NumericField) -> AggregateResult {
        match self {
            Statistic::Average => average(records, field),
            Statistic::Total => AggregateResult::Value(total(records, field) as f64),
            Statistic::Count => AggregateResult::Value(count(records) as f64),
        }
    }
}

impl FromStr for Statistic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "average" | "avg" => Ok(Statistic::Average),
            "total" | "sum" => Ok(Statistic::Total),
            "count" => Ok(Statistic::Count),
            other => Err(format!("unknown statistic '{other}'")),
        }
    }
}

/// Mean of the selected field, or `NoData` when `records` is empty.
pub fn average(records: &[Record], field: NumericField) -> AggregateResult {
    if records.is_empty() {
        return AggregateResult::NoData;
    }
    let sum: i64 = records.iter().map(|r| r.numeric(field)).sum();
    AggregateResult::Value(sum as f64 / records.len() as f64)
}

/// Sum of the selected field. Zero is a valid total, so an empty input
/// yields `0` rather than `NoData`.
pub fn total(records: &[Record], field: NumericField) -> i64 {
    records.iter().map(|r| r.numeric(field)).sum()
}

/// Number of records, for callers that present counts alongside the
/// other statistics.
pub fn count(records: &[Record]) -> usize {
    records.len()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::data::model::{Borough, DATE_FORMAT};

    fn rec(day: &str, total_deaths: u32, parks_gmr: i32) -> Record {
        Record {
            date: NaiveDate::parse_from_str(day, DATE_FORMAT).unwrap(),
            borough: Borough::Enfield,
            retail_recreation_gmr: 0,
            grocery_pharmacy_gmr: 0,
            parks_gmr,
            transit_gmr: 0,
            workplaces_gmr: 0,
            residential_gmr: 0,
            new_cases: 0,
            total_cases: 0,
            new_deaths: 0,
            total_deaths,
        }
    }

    #[test]
    fn test_average_of_empty_is_no_data() {
        let result = average(&[], NumericField::Parks);
        assert!(result.is_no_data());
        assert_eq!(result.as_f64(), None);
    }

    #[test]
    fn test_total_of_empty_is_zero() {
        assert_eq!(total(&[], NumericField::TotalDeaths), 0);
    }

    #[test]
    fn test_total_deaths_over_two_enfield_records() {
        let records = vec![rec("2020-01-01", 10, 0), rec("2020-01-02", 20, 0)];
        assert_eq!(total(&records, NumericField::TotalDeaths), 30);
    }

    #[test]
    fn test_average_is_the_mean() {
        let records = vec![
            rec("2020-01-01", 0, 30),
            rec("2020-01-02", 0, -10),
            rec("2020-01-03", 0, 10),
        ];
        assert_eq!(
            average(&records, NumericField::Parks),
            AggregateResult::Value(10.0)
        );
    }

    #[test]
    fn test_average_of_negative_values() {
        let records = vec![rec("2020-01-01", 0, -40), rec("2020-01-02", 0, -20)];
        assert_eq!(
            average(&records, NumericField::Parks),
            AggregateResult::Value(-30.0)
        );
    }

    #[test]
    fn test_statistic_dispatch() {
        let records = vec![rec("2020-01-01", 4, 0), rec("2020-01-02", 6, 0)];
        assert_eq!(
            Statistic::Average.compute(&records, NumericField::TotalDeaths),
            AggregateResult::Value(5.0)
        );
        assert_eq!(
            Statistic::Total.compute(&records, NumericField::TotalDeaths),
            AggregateResult::Value(10.0)
        );
    }

    #[test]
    fn test_count_statistic() {
        let records = vec![rec("2020-01-01", 0, 0), rec("2020-01-02", 0, 0)];
        assert_eq!(
            Statistic::Count.compute(&records, NumericField::Parks),
            AggregateResult::Value(2.0)
        );
        // A count of zero is a valid value, like an empty total.
        assert_eq!(
            Statistic::Count.compute(&[], NumericField::Parks),
            AggregateResult::Value(0.0)
        );
    }

    #[test]
    fn test_total_statistic_of_empty_is_zero_not_no_data() {
        assert_eq!(
            Statistic::Total.compute(&[], NumericField::TotalCases),
            AggregateResult::Value(0.0)
        );
    }

    #[test]
    fn test_count() {
        let records = vec![rec("2020-01-01", 0, 0)];
        assert_eq!(count(&records), 1);
        assert_eq!(count(&[]), 0);
    }

    #[test]
    fn test_statistic_parse() {
        assert_eq!("average".parse::<Statistic>().unwrap(), Statistic::Average);
        assert_eq!("total".parse::<Statistic>().unwrap(), Statistic::Total);
        assert_eq!("count".parse::<Statistic>().unwrap(), Statistic::Count);
        assert!("median".parse::<Statistic>().is_err());
    }
}
