use chrono::NaiveDateTime;
use thiserror::Error;
use crate::schedule::field::FieldKind;

#[derive(Error, Debug)]
pub enum CrontideErrors {
    #[error("`{0}` field parsed from `{1}` has no valid values, the schedule can never match")]
    EmptyField(FieldKind, String),

    #[error("expected 5 schedule fields followed by an action, got {0} tokens")]
    MissingFields(usize),

    #[error("no satisfiable occurrence within {0} years of `{1}`")]
    NoOccurrence(i32, NaiveDateTime),
}
