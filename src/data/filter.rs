use std::cmp::Ordering;

use super::model::{Borough, DateRange, Record, SortKey};

// ---------------------------------------------------------------------------
// Pure record-set operations: filter and sort
// ---------------------------------------------------------------------------

/// Records whose date falls inside `range` (both ends inclusive), in their
/// original order. Pure; an empty result is valid.
pub fn by_date_range(records: &[Record], range: DateRange) -> Vec<Record> {
    records
        .iter()
        .filter(|r| range.contains(r.date))
        .copied()
        .collect()
}

/// Records for exactly one borough, in their original order.
pub fn by_borough(records: &[Record], borough: Borough) -> Vec<Record> {
    records
        .iter()
        .filter(|r| r.borough == borough)
        .copied()
        .collect()
}

/// A copy of `records` ordered by the selected key. The sort is stable:
/// records that compare equal (same date across boroughs, same metric value)
/// keep their original relative order.
pub fn sorted_by(records: &[Record], key: SortKey, ascending: bool) -> Vec<Record> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| {
        let ord = compare(a, b, key);
        if ascending {
            ord
        } else {
            ord.reverse()
        }
    });
    sorted
}

fn compare(a: &Record, b: &Record, key: SortKey) -> Ordering {
    match key {
        SortKey::Date => a.date.cmp(&b.date),
        SortKey::Field(field) => a.numeric(field).cmp(&b.numeric(field)),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::data::model::{NumericField, DATE_FORMAT};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    fn rec(day: &str, borough: Borough) -> Record {
        Record {
            date: date(day),
            borough,
            retail_recreation_gmr: 0,
            grocery_pharmacy_gmr: 0,
            parks_gmr: 0,
            transit_gmr: 0,
            workplaces_gmr: 0,
            residential_gmr: 0,
            new_cases: 0,
            total_cases: 0,
            new_deaths: 0,
            total_deaths: 0,
        }
    }

    fn sample() -> Vec<Record> {
        vec![
            rec("2020-03-01", Borough::Enfield),
            rec("2020-03-02", Borough::Camden),
            rec("2020-03-03", Borough::Enfield),
            rec("2020-03-04", Borough::Sutton),
            rec("2020-03-05", Borough::Enfield),
        ]
    }

    #[test]
    fn test_date_range_bounds_are_inclusive() {
        let records = sample();
        let range = DateRange::new(date("2020-03-02"), date("2020-03-04")).unwrap();

        let matched = by_date_range(&records, range);

        assert_eq!(matched.len(), 3);
        assert!(matched.iter().all(|r| range.contains(r.date)));
        assert_eq!(matched[0].date, date("2020-03-02"));
        assert_eq!(matched[2].date, date("2020-03-04"));
    }

    #[test]
    fn test_date_range_filter_is_pure() {
        let records = sample();
        let range = DateRange::new(date("2020-03-01"), date("2020-03-03")).unwrap();

        let first = by_date_range(&records, range);
        let second = by_date_range(&records, range);

        assert_eq!(first, second);
    }

    #[test]
    fn test_full_range_returns_everything_in_order() {
        let records = sample();
        let range = DateRange::new(date("2020-03-01"), date("2020-03-05")).unwrap();

        assert_eq!(by_date_range(&records, range), records);
    }

    #[test]
    fn test_empty_range_result_is_not_an_error() {
        let records = sample();
        let range = DateRange::new(date("2021-01-01"), date("2021-12-31")).unwrap();

        assert!(by_date_range(&records, range).is_empty());
    }

    #[test]
    fn test_borough_filter_excludes_other_boroughs() {
        let records = sample();

        let matched = by_borough(&records, Borough::Enfield);

        assert_eq!(matched.len(), 3);
        assert!(matched.iter().all(|r| r.borough == Borough::Enfield));
    }

    #[test]
    fn test_filters_compose() {
        let records = sample();
        let range = DateRange::new(date("2020-03-02"), date("2020-03-05")).unwrap();

        let matched = by_borough(&by_date_range(&records, range), Borough::Enfield);

        assert_eq!(matched.len(), 2);
        assert_eq!(matched[0].date, date("2020-03-03"));
        assert_eq!(matched[1].date, date("2020-03-05"));
    }

    #[test]
    fn test_sort_by_field_ascending() {
        let mut records = sample();
        records[0].parks_gmr = 40;
        records[1].parks_gmr = -10;
        records[2].parks_gmr = 25;
        records[3].parks_gmr = 0;
        records[4].parks_gmr = -30;

        let sorted = sorted_by(&records, SortKey::Field(NumericField::Parks), true);

        let values: Vec<i32> = sorted.iter().map(|r| r.parks_gmr).collect();
        assert_eq!(values, vec![-30, -10, 0, 25, 40]);
    }

    #[test]
    fn test_descending_reverses_ascending_without_duplicates() {
        let mut records = sample();
        for (i, r) in records.iter_mut().enumerate() {
            r.transit_gmr = (i as i32) * 7 - 12;
        }

        let asc = sorted_by(&records, SortKey::Field(NumericField::Transit), true);
        let desc = sorted_by(&records, SortKey::Field(NumericField::Transit), false);

        let reversed: Vec<Record> = asc.into_iter().rev().collect();
        assert_eq!(desc, reversed);
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        // Same date in every record: sorting by date must not reorder.
        let records = vec![
            rec("2020-03-01", Borough::Camden),
            rec("2020-03-01", Borough::Enfield),
            rec("2020-03-01", Borough::Sutton),
        ];

        let sorted = sorted_by(&records, SortKey::Date, true);

        let boroughs: Vec<Borough> = sorted.iter().map(|r| r.borough).collect();
        assert_eq!(
            boroughs,
            vec![Borough::Camden, Borough::Enfield, Borough::Sutton]
        );
    }

    #[test]
    fn test_sort_by_date() {
        let records = vec![
            rec("2020-03-05", Borough::Camden),
            rec("2020-03-01", Borough::Camden),
            rec("2020-03-03", Borough::Camden),
        ];

        let sorted = sorted_by(&records, SortKey::Date, true);

        let dates: Vec<NaiveDate> = sorted.iter().map(|r| r.date).collect();
        assert_eq!(
            dates,
            vec![date("2020-03-01"), date("2020-03-03"), date("2020-03-05")]
        );
    }
}
