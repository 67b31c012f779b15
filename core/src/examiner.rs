use std::fs;
use std::path::Path;

use chrono::{DateTime, Local};
use tracing::{error, warn};

use crate::schedule::{CronSchedule, Schedule};

/// A schedule paired with its computed next occurrence, as reported by
/// [`CronExaminer::upcoming_jobs_after`].
#[derive(Debug, Clone)]
pub struct UpcomingJob<'a> {
    pub schedule: &'a CronSchedule,
    pub when: DateTime<Local>,
}

/// [`CronExaminer`] inspects a crontab: it loads the schedule lines, keeps
/// the ones that parse, and answers questions like "which jobs fire next"
/// or "which jobs run this command". It defines no output formatting; it
/// hands back schedules and instants and leaves presentation to the caller.
///
/// Loading is deliberately forgiving at the file level: a missing or
/// unreadable crontab is logged and treated as zero jobs, never a crash,
/// while individual lines that cannot form a usable schedule are logged and
/// skipped one by one.
///
/// # Examples
///
/// ```rust
/// use crontide_core::examiner::CronExaminer;
///
/// let examiner = CronExaminer::from_lines([
///     "# nightly maintenance",
///     "0 4 * * * /usr/bin/backup --full",
///     "*/15 * * * * /usr/bin/healthcheck",
/// ]);
/// assert_eq!(examiner.jobs().len(), 2);
///
/// for upcoming in examiner.upcoming_jobs(2) {
///     println!("{} -> {}", upcoming.when, upcoming.schedule.action());
/// }
/// ```
///
/// # See
/// - [`CronSchedule`] — one parsed line
pub struct CronExaminer {
    jobs: Vec<CronSchedule>,
}

impl CronExaminer {
    /// Loads a crontab file. An unreadable file yields an examiner with zero
    /// jobs; the failure is logged, not returned.
    pub fn from_path(path: impl AsRef<Path>) -> CronExaminer {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => Self::from_lines(text.lines()),
            Err(e) => {
                error!(path = %path.display(), "failed to read crontab: {e}");
                CronExaminer { jobs: Vec::new() }
            }
        }
    }

    /// Builds an examiner from raw crontab lines: blank lines and `#`
    /// comments are skipped, every other line is parsed as a schedule.
    /// Lines that fail to parse are logged and skipped.
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> CronExaminer {
        let mut jobs = Vec::new();
        for line in lines {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match CronSchedule::parse(line) {
                Ok(job) => jobs.push(job),
                Err(e) => error!(line, "skipping unusable crontab line: {e}"),
            }
        }
        CronExaminer { jobs }
    }

    /// All parsed schedules, in file order.
    pub fn jobs(&self) -> &[CronSchedule] {
        &self.jobs
    }

    /// Up to `n` jobs sorted by how soon they fire after `from`. A job whose
    /// search finds no occurrence is logged and omitted.
    pub fn upcoming_jobs_after(&self, n: usize, from: &DateTime<Local>) -> Vec<UpcomingJob<'_>> {
        let mut upcoming: Vec<UpcomingJob> = self
            .jobs
            .iter()
            .filter_map(|job| match job.next_after(from) {
                Ok(when) => Some(UpcomingJob { schedule: job, when }),
                Err(e) => {
                    warn!(action = job.action(), "omitting job from listing: {e}");
                    None
                }
            })
            .collect();
        upcoming.sort_by_key(|u| u.when);
        upcoming.truncate(n);
        upcoming
    }

    /// Up to `n` jobs sorted by how soon they fire from now.
    pub fn upcoming_jobs(&self, n: usize) -> Vec<UpcomingJob<'_>> {
        self.upcoming_jobs_after(n, &Local::now())
    }

    /// The single most imminent job after `from`, if any job has one.
    pub fn next_job_after(&self, from: &DateTime<Local>) -> Option<UpcomingJob<'_>> {
        self.upcoming_jobs_after(1, from).into_iter().next()
    }

    pub fn next_job(&self) -> Option<UpcomingJob<'_>> {
        self.next_job_after(&Local::now())
    }

    /// Schedules whose action contains `needle`, in file order.
    pub fn jobs_matching(&self, needle: &str) -> Vec<&CronSchedule> {
        self.jobs
            .iter()
            .filter(|job| job.action().contains(needle))
            .collect()
    }
}
