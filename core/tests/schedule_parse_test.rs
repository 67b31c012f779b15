use crontide_core::errors::CrontideErrors;
use crontide_core::schedule::{CronSchedule, FieldKind};

#[test]
fn line_splits_into_five_fields_and_action() {
    let job = CronSchedule::parse("*/5 4 1,15 * 0 /usr/bin/backup --full /srv/data").unwrap();
    assert_eq!(job.action(), "/usr/bin/backup --full /srv/data");
    assert_eq!(job.field_literals(), ["*/5", "4", "1,15", "*", "0"]);
    assert_eq!(job.field(FieldKind::Minute).values(), &[0, 5, 10, 15, 20, 25, 30, 35, 40, 45, 50, 55]);
    assert_eq!(job.field(FieldKind::Hour).values(), &[4]);
    assert_eq!(job.field(FieldKind::DayOfMonth).values(), &[1, 15]);
    assert_eq!(job.field(FieldKind::DayOfWeek).values(), &[0]);
}

#[test]
fn action_survives_extra_whitespace() {
    let job = CronSchedule::parse("  0  0  *  *  *   echo   hello  ").unwrap();
    // Tokens are re-joined with single spaces.
    assert_eq!(job.action(), "echo hello");
}

#[test]
fn action_may_be_empty() {
    let job = CronSchedule::parse("0 0 * * *").unwrap();
    assert_eq!(job.action(), "");
}

#[test]
fn too_few_fields_is_rejected() {
    let err = CronSchedule::parse("0 0 *").unwrap_err();
    assert!(matches!(err, CrontideErrors::MissingFields(3)));
}

#[test]
fn field_with_no_valid_values_is_rejected() {
    let err = CronSchedule::parse("banana 0 * * * job").unwrap_err();
    assert!(matches!(err, CrontideErrors::EmptyField(FieldKind::Minute, _)));

    let err = CronSchedule::parse("0 0 * */0 * job").unwrap_err();
    assert!(matches!(err, CrontideErrors::EmptyField(FieldKind::Month, _)));
}

#[test]
fn partially_malformed_field_still_constructs() {
    // One bad segment is dropped, the survivors carry the field.
    let job = CronSchedule::parse("1,oops,5 * * * * job").unwrap();
    assert_eq!(job.field(FieldKind::Minute).values(), &[1, 5]);
}
