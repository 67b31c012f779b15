//! Crontab schedule parsing and calendar-aware next-occurrence search.
//!
//! The crate has two layers:
//!
//! - [`schedule`] — the core: [`ScheduleField`](schedule::ScheduleField)
//!   expands one crontab field expression into its value set, and
//!   [`CronSchedule`](schedule::CronSchedule) combines the five fields of a
//!   crontab line and answers "when does this fire next" via the
//!   [`Schedule`](schedule::Schedule) trait, handling crontab's
//!   day-of-month/day-of-week disjunction and rollover across minute, hour,
//!   day, month and year boundaries (leap years included).
//! - [`examiner`] — [`CronExaminer`](examiner::CronExaminer) loads a whole
//!   crontab and lists jobs by imminence or filters them by action text.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use crontide_core::schedule::CronSchedule;
//!
//! let job = CronSchedule::parse("*/3 4 5 6 * make coffee").unwrap();
//! let from = NaiveDate::from_ymd_opt(2012, 1, 15)
//!     .unwrap()
//!     .and_hms_opt(0, 0, 0)
//!     .unwrap();
//! let next = job.next_after_naive(from).unwrap();
//! assert_eq!(next, NaiveDate::from_ymd_opt(2012, 6, 5).unwrap().and_hms_opt(4, 0, 0).unwrap());
//! ```

pub mod errors;
pub mod examiner;
pub mod schedule;

pub use crate::errors::CrontideErrors;
pub use crate::examiner::CronExaminer;
pub use crate::schedule::{CronSchedule, Schedule};
