use std::fmt;
use tracing::warn;

/// Identifies one of the five schedule fields of a crontab line and carries
/// its valid value range. Day-of-week numbering starts the week on Monday
/// (`0 = Monday`, `6 = Sunday`), matching [`chrono::Weekday::num_days_from_monday`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Minute,
    Hour,
    DayOfMonth,
    Month,
    DayOfWeek,
}

impl FieldKind {
    /// The field's valid range as `(min, max_exclusive)`.
    pub fn bounds(self) -> (u32, u32) {
        match self {
            FieldKind::Minute => (0, 60),
            FieldKind::Hour => (0, 24),
            FieldKind::DayOfMonth => (1, 32),
            FieldKind::Month => (1, 13),
            FieldKind::DayOfWeek => (0, 7),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FieldKind::Minute => "minute",
            FieldKind::Hour => "hour",
            FieldKind::DayOfMonth => "day-of-month",
            FieldKind::Month => "month",
            FieldKind::DayOfWeek => "day-of-week",
        })
    }
}

/// [`ScheduleField`] is the expanded form of a single crontab field: an
/// ascending, de-duplicated set of the integer values the field admits.
///
/// A field is produced once by [`ScheduleField::parse`] when the schedule is
/// constructed and is immutable afterwards; the next-occurrence search only
/// reads it. Four expression forms are understood, tried in this order:
///
/// - `*` — every value in the field's range
/// - `*/N` — every `N`-th value, striding from the range minimum (so `*/4`
///   over months yields `1, 5, 9`, not `4, 8, 12`)
/// - a comma-separated list of the two forms below
/// - `A-B` (inclusive range) or a bare integer
///
/// A list segment that fails to parse, or whose values fall outside the
/// field's range, is dropped with a warning rather than failing the whole
/// field. A field where *every* segment was dropped parses as empty;
/// [`CronSchedule::parse`](crate::schedule::CronSchedule::parse) rejects such
/// a field, since an empty field can never match.
///
/// # Examples
///
/// ```rust
/// use crontide_core::schedule::field::{FieldKind, ScheduleField};
///
/// let minutes = ScheduleField::parse("*/15", FieldKind::Minute);
/// assert_eq!(minutes.values(), &[0, 15, 30, 45]);
///
/// let days = ScheduleField::parse("3-5,9,22", FieldKind::DayOfMonth);
/// assert_eq!(days.values(), &[3, 4, 5, 9, 22]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleField {
    values: Vec<u32>,
}

impl ScheduleField {
    /// Expands `text` into the set of values it admits for a `kind` field.
    ///
    /// Never fails: malformed segments are logged and dropped, and the
    /// result may be empty when nothing valid remains.
    pub fn parse(text: &str, kind: FieldKind) -> ScheduleField {
        let (min, max) = kind.bounds();
        let mut values: Vec<u32> = Vec::new();

        if text == "*" {
            values.extend(min..max);
        } else if let Some(step) = text.strip_prefix("*/") {
            match step.parse::<u32>() {
                Ok(n) if n > 0 => values.extend((min..max).step_by(n as usize)),
                _ => warn!(field = %kind, expr = %text, "invalid step expression, field left empty"),
            }
        } else {
            for segment in text.split(',') {
                Self::parse_segment(segment.trim(), kind, min, max, &mut values);
            }
        }

        values.sort_unstable();
        values.dedup();
        ScheduleField { values }
    }

    fn parse_segment(segment: &str, kind: FieldKind, min: u32, max: u32, out: &mut Vec<u32>) {
        if let Some((low, high)) = segment.split_once('-') {
            match (low.parse::<u32>(), high.parse::<u32>()) {
                (Ok(a), Ok(b)) if a <= b && a >= min && b < max => out.extend(a..=b),
                _ => warn!(field = %kind, segment = %segment, "dropping malformed range segment"),
            }
        } else {
            match segment.parse::<u32>() {
                Ok(v) if v >= min && v < max => out.push(v),
                _ => warn!(field = %kind, segment = %segment, "dropping malformed segment"),
            }
        }
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Smallest value in the set. Only called on fields that survived
    /// schedule construction, which rejects empty fields.
    pub(crate) fn first(&self) -> u32 {
        self.values[0]
    }

    /// Smallest value in the set that is `>= v`, if any.
    pub fn first_at_or_after(&self, v: u32) -> Option<u32> {
        self.values.iter().copied().find(|&x| x >= v)
    }

    pub fn contains(&self, v: u32) -> bool {
        self.values.binary_search(&v).is_ok()
    }
}
