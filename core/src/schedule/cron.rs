use chrono::{
    DateTime, Datelike, Local, LocalResult, NaiveDate, NaiveDateTime, TimeDelta, TimeZone,
    Timelike, Utc,
};

use crate::errors::CrontideErrors;
use crate::schedule::field::{FieldKind, ScheduleField};
use crate::schedule::Schedule;

/// How far past the start instant the next-occurrence search will look before
/// giving up, in years. Some schedules have no occurrence at all (for example
/// day-of-month 31 restricted to 30-day months); once the candidate instant
/// moves this far out, [`CronSchedule::next_after_naive`] returns
/// [`CrontideErrors::NoOccurrence`] instead of searching forever. The bound is
/// part of the contract: an occurrence further out than this is reported as
/// not found.
pub const SEARCH_HORIZON_YEARS: i32 = 8;

/// Backstop on search passes, generously above what any schedule inside the
/// horizon can need (a pass only repeats after strictly advancing the
/// candidate).
const MAX_PASSES: u32 = 512;

/// [`CronSchedule`] is one line of a crontab: five schedule fields expanded
/// into value sets, the original field literals, and the free-text action the
/// line triggers.
///
/// The line grammar is whitespace-delimited:
/// `<minute> <hour> <day-of-month> <month> <day-of-week> <action...>`, with
/// everything after the fifth field joined back together as the action. Field
/// expressions follow the grammar of
/// [`ScheduleField::parse`](crate::schedule::field::ScheduleField::parse).
///
/// The original literals are kept alongside the expanded sets because crontab
/// day selection depends on whether day-of-month or day-of-week was literally
/// given as `*`: when both are restricted the nearer of the two candidate
/// days wins, when only one is restricted it alone decides, and an explicit
/// `1-31` counts as restricted even though it expands to the same set as `*`.
///
/// # Construction
///
/// Use [`CronSchedule::parse`]. Construction fails loudly when fewer than
/// five fields are present or when any field expands to no values; a parsed
/// schedule therefore always has at least one candidate value per field.
///
/// Once constructed a schedule is immutable. [`Schedule::next_after`] keeps
/// no state across calls, so a schedule can be queried concurrently from
/// multiple threads.
///
/// # Examples
///
/// ```rust
/// use crontide_core::schedule::CronSchedule;
///
/// // Every 5 minutes
/// let job = CronSchedule::parse("*/5 * * * * echo hello").unwrap();
/// assert_eq!(job.action(), "echo hello");
///
/// // 04:00 on June 5th
/// let job = CronSchedule::parse("0 4 5 6 * /usr/bin/backup --full").unwrap();
/// ```
///
/// # See
/// - [`Schedule`] — the trait implemented by this type
/// - [`ScheduleField`] — one expanded field
#[derive(Debug, Clone)]
pub struct CronSchedule {
    minute: ScheduleField,
    hour: ScheduleField,
    dom: ScheduleField,
    month: ScheduleField,
    dow: ScheduleField,
    literals: [String; 5],
    action: String,
}

impl CronSchedule {
    /// Parses one crontab line into a schedule.
    ///
    /// # Errors
    /// - [`CrontideErrors::MissingFields`] when the line has fewer than five
    ///   whitespace-delimited tokens
    /// - [`CrontideErrors::EmptyField`] when a field expression yields no
    ///   valid values (every segment malformed, or a `*/N` step that is not a
    ///   positive integer)
    pub fn parse(line: &str) -> Result<CronSchedule, CrontideErrors> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 5 {
            return Err(CrontideErrors::MissingFields(tokens.len()));
        }

        let literals: [String; 5] = [
            tokens[0].to_owned(),
            tokens[1].to_owned(),
            tokens[2].to_owned(),
            tokens[3].to_owned(),
            tokens[4].to_owned(),
        ];
        let action = tokens[5..].join(" ");

        Ok(CronSchedule {
            minute: Self::parse_field(tokens[0], FieldKind::Minute)?,
            hour: Self::parse_field(tokens[1], FieldKind::Hour)?,
            dom: Self::parse_field(tokens[2], FieldKind::DayOfMonth)?,
            month: Self::parse_field(tokens[3], FieldKind::Month)?,
            dow: Self::parse_field(tokens[4], FieldKind::DayOfWeek)?,
            literals,
            action,
        })
    }

    fn parse_field(text: &str, kind: FieldKind) -> Result<ScheduleField, CrontideErrors> {
        let field = ScheduleField::parse(text, kind);
        if field.is_empty() {
            return Err(CrontideErrors::EmptyField(kind, text.to_owned()));
        }
        Ok(field)
    }

    /// The free-text action the schedule triggers (everything after the
    /// fifth field, joined by single spaces).
    pub fn action(&self) -> &str {
        &self.action
    }

    /// The five field expressions exactly as written, in line order
    /// (minute, hour, day-of-month, month, day-of-week).
    pub fn field_literals(&self) -> [&str; 5] {
        [
            &self.literals[0],
            &self.literals[1],
            &self.literals[2],
            &self.literals[3],
            &self.literals[4],
        ]
    }

    /// The expanded value set for `kind`.
    pub fn field(&self, kind: FieldKind) -> &ScheduleField {
        match kind {
            FieldKind::Minute => &self.minute,
            FieldKind::Hour => &self.hour,
            FieldKind::DayOfMonth => &self.dom,
            FieldKind::Month => &self.month,
            FieldKind::DayOfWeek => &self.dow,
        }
    }

    /// The earliest instant at or after `from` (truncated to minute
    /// resolution) at which every field matches, under the day disjunction
    /// rule described on [`CronSchedule`].
    ///
    /// The search repeatedly advances a candidate instant through four steps
    /// (month, day, hour, minute); whenever a step has to roll over a larger
    /// unit (into the next month, day or hour) the whole pass restarts,
    /// because advancing time can invalidate a field chosen earlier in the
    /// pass. A pass that completes with no rollover is the answer.
    ///
    /// # Errors
    /// [`CrontideErrors::NoOccurrence`] when no match exists within
    /// [`SEARCH_HORIZON_YEARS`] of `from`.
    pub fn next_after_naive(&self, from: NaiveDateTime) -> Result<NaiveDateTime, CrontideErrors> {
        let start = from
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(from);
        let mut t = start;

        let dom_restricted = self.literals[2] != "*";
        let dow_restricted = self.literals[4] != "*";

        for _ in 0..MAX_PASSES {
            if t.year() > start.year() + SEARCH_HORIZON_YEARS {
                return Err(CrontideErrors::NoOccurrence(SEARCH_HORIZON_YEARS, start));
            }

            // Month step: snap to the next valid month this year, or the
            // first valid month of next year. Either snap restarts the pass.
            match self.month.first_at_or_after(t.month()) {
                Some(m) if m == t.month() => {}
                Some(m) => {
                    t = self.earliest_in_month(t.year(), m);
                    continue;
                }
                None => {
                    t = self.earliest_in_month(t.year() + 1, self.month.first());
                    continue;
                }
            }

            // Day step: build the day-of-month and day-of-week candidates
            // independently, then apply the disjunction rule.
            let days_in_month = last_day_of_month(t.year(), t.month());

            let mut dom_candidate = t;
            let mut crossed_month = false;
            match self
                .dom
                .values()
                .iter()
                .copied()
                .find(|&d| d >= t.day() && d <= days_in_month)
            {
                Some(d) if d == t.day() => {}
                Some(d) => {
                    dom_candidate = rebuild(t.year(), t.month(), d, 0, 0);
                }
                None => {
                    // No day left this month: days remaining plus the first
                    // value lands on next month's first valid day.
                    let add = (days_in_month - t.day()) + self.dom.first();
                    dom_candidate = midnight(t.date() + TimeDelta::days(add as i64));
                    crossed_month = true;
                }
            }

            let weekday = t.weekday().num_days_from_monday();
            let mut dow_candidate = t;
            match self.dow.first_at_or_after(weekday) {
                Some(d) if d == weekday => {}
                Some(d) => {
                    dow_candidate = midnight(t.date() + TimeDelta::days((d - weekday) as i64));
                }
                None => {
                    let add = (7 - weekday) + self.dow.first();
                    dow_candidate = midnight(t.date() + TimeDelta::days(add as i64));
                }
            }
            // Even a same-week advance can spill past the end of the month,
            // so the restart condition comes from the candidate itself, not
            // from which branch produced it.
            let crossed_month_via_weekday = dow_candidate.month() != t.month()
                || dow_candidate.year() != t.year();

            if dom_restricted || dow_restricted {
                let (candidate, crossed) = if !dow_restricted {
                    (dom_candidate, crossed_month)
                } else if !dom_restricted {
                    (dow_candidate, crossed_month_via_weekday)
                } else if dom_candidate <= dow_candidate {
                    // Both restricted: the chronologically nearer day wins.
                    (dom_candidate, crossed_month)
                } else {
                    (dow_candidate, crossed_month_via_weekday)
                };
                t = candidate;
                if crossed {
                    // The candidate may sit in a month the month step has
                    // not validated yet.
                    continue;
                }
            }

            // Hour step.
            match self.hour.first_at_or_after(t.hour()) {
                Some(h) if h == t.hour() => {}
                Some(h) => {
                    t = rebuild(t.year(), t.month(), t.day(), h, 0);
                }
                None => {
                    let next_day = t.date() + TimeDelta::days(1);
                    t = rebuild(
                        next_day.year(),
                        next_day.month(),
                        next_day.day(),
                        self.hour.first(),
                        self.minute.first(),
                    );
                    continue;
                }
            }

            // Minute step.
            match self.minute.first_at_or_after(t.minute()) {
                Some(m) => {
                    if m != t.minute() {
                        t = rebuild(t.year(), t.month(), t.day(), t.hour(), m);
                    }
                    return Ok(t);
                }
                None => {
                    t += TimeDelta::hours(1);
                    t = rebuild(t.year(), t.month(), t.day(), t.hour(), self.minute.first());
                    continue;
                }
            }
        }

        Err(CrontideErrors::NoOccurrence(SEARCH_HORIZON_YEARS, start))
    }

    /// Earliest candidate instant inside `month`: the first value of each
    /// smaller field, with the day clamped to the month's true length so a
    /// later pass can detect and roll past an impossible day.
    fn earliest_in_month(&self, year: i32, month: u32) -> NaiveDateTime {
        rebuild(
            year,
            month,
            self.dom.first(),
            self.hour.first(),
            self.minute.first(),
        )
    }
}

impl Schedule for CronSchedule {
    fn next_after(&self, time: &DateTime<Local>) -> Result<DateTime<Local>, CrontideErrors> {
        let next = self.next_after_naive(time.naive_local())?;
        Ok(resolve_local(next))
    }
}

#[inline(always)]
fn last_day_of_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    (NaiveDate::from_ymd_opt(next_year, next_month, 1).unwrap() - TimeDelta::days(1)).day()
}

#[inline]
fn rebuild(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    let day = std::cmp::min(day, last_day_of_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

#[inline]
fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(0, 0, 0).unwrap()
}

/// Resolves a naive local instant to a concrete [`DateTime<Local>`]. An
/// ambiguous wall-clock time (clocks rolled back) takes the earlier instant;
/// a nonexistent one (clocks rolled forward) nudges forward minute by minute
/// until a valid time appears.
fn resolve_local(naive: NaiveDateTime) -> DateTime<Local> {
    match Local.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(dt1, _) => dt1,
        LocalResult::None => {
            let mut candidate = naive;
            for _ in 0..120 {
                candidate += TimeDelta::minutes(1);
                if let LocalResult::Single(dt) = Local.from_local_datetime(&candidate) {
                    return dt;
                }
            }
            Utc.from_utc_datetime(&naive).with_timezone(&Local)
        }
    }
}
