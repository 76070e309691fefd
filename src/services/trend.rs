//! Daily submission counts for the trend chart

use crate::error::Result;
use crate::types::{FeedbackRecord, TrendPoint};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Count records per calendar date, ascending by date
///
/// Dates without submissions are left out. The date is taken from the stored
/// timestamp as-is, with no time-zone conversion.
pub fn aggregate_trend<'a, I>(records: I) -> Result<Vec<TrendPoint>>
where
    I: IntoIterator<Item = &'a FeedbackRecord>,
{
    let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for record in records {
        *per_day.entry(record.date()?).or_default() += 1;
    }

    Ok(per_day
        .into_iter()
        .map(|(date, count)| TrendPoint { date, count })
        .collect())
}
