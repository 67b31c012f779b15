pub mod cron;
pub mod field;

pub use crate::schedule::cron::CronSchedule;
pub use crate::schedule::cron::SEARCH_HORIZON_YEARS;
pub use crate::schedule::field::FieldKind;
pub use crate::schedule::field::ScheduleField;

use chrono::{DateTime, Local};
use std::sync::Arc;

use crate::errors::CrontideErrors;

/// The [`Schedule`] trait defines when an action should next fire: given an
/// instant, an implementation reports the earliest instant at or after it
/// that the schedule matches.
///
/// [`CronSchedule`] is the crontab-expression implementation and the reason
/// this crate exists; the trait is the seam for embedding other schedule
/// shapes behind the same query.
///
/// Implementations are pure: `next_after` neither mutates the schedule nor
/// keeps state between calls, so a schedule shared across threads can be
/// queried concurrently without locking.
///
/// # See
/// - [`CronSchedule`]
pub trait Schedule: Send + Sync {
    /// Calculates the earliest matching instant at or after `time` (first
    /// truncated to minute resolution, the schedule grammar has no seconds).
    ///
    /// Not every schedule has a future occurrence; implementations bound
    /// their search and report failure rather than looping forever.
    fn next_after(&self, time: &DateTime<Local>) -> Result<DateTime<Local>, CrontideErrors>;
}

impl<S: Schedule + ?Sized> Schedule for Arc<S> {
    fn next_after(&self, time: &DateTime<Local>) -> Result<DateTime<Local>, CrontideErrors> {
        self.as_ref().next_after(time)
    }
}
