use crontide_core::schedule::field::{FieldKind, ScheduleField};

#[test]
fn wildcard_expands_to_full_range() {
    let minutes = ScheduleField::parse("*", FieldKind::Minute);
    assert_eq!(minutes.values().len(), 60);
    assert_eq!(minutes.values().first(), Some(&0));
    assert_eq!(minutes.values().last(), Some(&59));

    let months = ScheduleField::parse("*", FieldKind::Month);
    assert_eq!(months.values(), &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
}

#[test]
fn step_strides_from_the_field_minimum() {
    let minutes = ScheduleField::parse("*/20", FieldKind::Minute);
    assert_eq!(minutes.values(), &[0, 20, 40]);

    // 1-based fields stride from 1, not 0: */4 over months is 1, 5, 9.
    let months = ScheduleField::parse("*/4", FieldKind::Month);
    assert_eq!(months.values(), &[1, 5, 9]);

    let days = ScheduleField::parse("*/13", FieldKind::DayOfMonth);
    assert_eq!(days.values(), &[1, 14, 27]);
}

#[test]
fn step_of_one_matches_wildcard() {
    let stepped = ScheduleField::parse("*/1", FieldKind::Hour);
    let wild = ScheduleField::parse("*", FieldKind::Hour);
    assert_eq!(stepped, wild);
}

#[test]
fn zero_or_garbage_step_yields_empty_field() {
    assert!(ScheduleField::parse("*/0", FieldKind::Minute).is_empty());
    assert!(ScheduleField::parse("*/x", FieldKind::Minute).is_empty());
    assert!(ScheduleField::parse("*/-3", FieldKind::Minute).is_empty());
}

#[test]
fn range_is_inclusive_on_both_ends() {
    let hours = ScheduleField::parse("9-12", FieldKind::Hour);
    assert_eq!(hours.values(), &[9, 10, 11, 12]);
}

#[test]
fn list_unions_ranges_and_singletons() {
    let days = ScheduleField::parse("3-5,9-22", FieldKind::DayOfMonth);
    let expected: Vec<u32> = (3..=5).chain(9..=22).collect();
    assert_eq!(days.values(), expected.as_slice());

    let minutes = ScheduleField::parse("30,0,15", FieldKind::Minute);
    assert_eq!(minutes.values(), &[0, 15, 30]);
}

#[test]
fn duplicates_are_collapsed_and_output_sorted() {
    let minutes = ScheduleField::parse("5,1-6,5,2", FieldKind::Minute);
    assert_eq!(minutes.values(), &[1, 2, 3, 4, 5, 6]);
}

#[test]
fn malformed_segments_are_dropped_not_fatal() {
    let minutes = ScheduleField::parse("1,banana,5", FieldKind::Minute);
    assert_eq!(minutes.values(), &[1, 5]);

    // A backwards range is malformed, the rest of the list survives.
    let hours = ScheduleField::parse("12-9,3", FieldKind::Hour);
    assert_eq!(hours.values(), &[3]);
}

#[test]
fn out_of_range_values_are_dropped() {
    let minutes = ScheduleField::parse("59,60,61", FieldKind::Minute);
    assert_eq!(minutes.values(), &[59]);

    // Month 0 does not exist; day-of-week tops out at 6.
    assert!(ScheduleField::parse("0", FieldKind::Month).is_empty());
    assert!(ScheduleField::parse("7", FieldKind::DayOfWeek).is_empty());

    // A range poking past the bound is dropped whole.
    let minutes = ScheduleField::parse("50-70", FieldKind::Minute);
    assert!(minutes.is_empty());
}

#[test]
fn all_invalid_segments_leave_the_field_empty() {
    assert!(ScheduleField::parse("foo,bar", FieldKind::Hour).is_empty());
    assert!(ScheduleField::parse("", FieldKind::Hour).is_empty());
}

#[test]
fn lookup_helpers() {
    let minutes = ScheduleField::parse("*/15", FieldKind::Minute);
    assert!(minutes.contains(45));
    assert!(!minutes.contains(44));
    assert_eq!(minutes.first_at_or_after(16), Some(30));
    assert_eq!(minutes.first_at_or_after(45), Some(45));
    assert_eq!(minutes.first_at_or_after(46), None);
}
