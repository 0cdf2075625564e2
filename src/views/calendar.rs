//! Calendar screen derivations: week strips, month day grids, day-interval
//! task membership, and the per-day completion series behind the chart.

use chrono::{Datelike, Duration, NaiveDate};

use crate::model::{local_day, Task};

/// Whether `task` occurs on `day`: the day falls within the closed interval
/// `[start_date, end_date]`, in local time.
///
/// Deliberately broader than `TaskStore::tasks_on_date`, which buckets by
/// start date alone. A task spanning three days occurs on all three here but
/// only lands in the first day's store bucket. Both rules are load-bearing
/// for their screens and pinned separately by tests.
pub fn occurs_on(task: &Task, day: NaiveDate) -> bool {
    let start = local_day(task.start_date);
    let end = local_day(task.end_date);
    start <= day && day <= end
}

/// Tasks occurring on `day`, in store order.
pub fn tasks_on_day<'a>(tasks: &'a [Task], day: NaiveDate) -> Vec<&'a Task> {
    tasks.iter().filter(|t| occurs_on(t, day)).collect()
}

/// The Monday-started week containing `day` (the week strip header).
pub fn week_of(day: NaiveDate) -> [NaiveDate; 7] {
    let monday = day - Duration::days(day.weekday().num_days_from_monday() as i64);
    std::array::from_fn(|i| monday + Duration::days(i as i64))
}

/// Every day of `day`'s month, in order.
pub fn month_days(day: NaiveDate) -> Vec<NaiveDate> {
    let mut days = Vec::with_capacity(31);
    let Some(mut cur) = day.with_day(1) else {
        return days;
    };
    while cur.month() == day.month() {
        days.push(cur);
        match cur.succ_opt() {
            Some(next) => cur = next,
            None => break,
        }
    }
    days
}

/// For each day of `day`'s month, the count of tasks occurring that day with
/// a completion percentage of exactly 100 (the completion chart series).
pub fn completed_per_day(tasks: &[Task], day: NaiveDate) -> Vec<(NaiveDate, usize)> {
    month_days(day)
        .into_iter()
        .map(|d| {
            let done = tasks
                .iter()
                .filter(|t| occurs_on(t, d) && t.completion_percentage == 100)
                .count();
            (d, done)
        })
        .collect()
}
