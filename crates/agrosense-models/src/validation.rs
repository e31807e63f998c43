use std::borrow::Cow;

use agrosense_auth::Role;
use chrono::{DateTime, Datelike, Utc};
use validator::ValidationError;

/// Reading timestamps must fall inside these years (inclusive).
const TIMESTAMP_YEARS: std::ops::RangeInclusive<i32> = 1970..=9999;

pub(crate) fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

pub(crate) fn role_tag(value: &str) -> Result<(), ValidationError> {
    value.parse::<Role>().map(|_| ()).map_err(|e| {
        let mut err = ValidationError::new("role");
        err.message = Some(Cow::from(format!("role is invalid: {}", e)));
        err
    })
}

pub(crate) fn timestamp_in_range(value: &DateTime<Utc>) -> Result<(), ValidationError> {
    if TIMESTAMP_YEARS.contains(&value.year()) {
        Ok(())
    } else {
        Err(ValidationError::new("timestamp_range"))
    }
}
