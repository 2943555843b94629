use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};

use crate::models::{AppointmentError, AppointmentStatus};

pub const BUSINESS_OPEN_HOUR: u32 = 9;
pub const BUSINESS_CLOSE_HOUR: u32 = 18;
/// Two accepted appointments on the same date must be at least this far
/// apart. Exactly 30 minutes is allowed.
pub const CONFLICT_WINDOW_SECONDS: i64 = 1800;

/// The fields of a proposed appointment the validator looks at.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleCandidate {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: AppointmentStatus,
}

impl ScheduleCandidate {
    pub fn scheduled_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}

/// Parse the public form's date and time fields.
pub fn parse_schedule(date: &str, time: &str) -> Result<(NaiveDate, NaiveTime), AppointmentError> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| AppointmentError::MalformedInput)?;

    let time = time.trim();
    let time = NaiveTime::parse_from_str(time, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
        .map_err(|_| AppointmentError::MalformedInput)?;

    Ok((date, time))
}

/// Decide whether a proposed appointment is admissible.
///
/// Pure predicate: callers fetch the accepted appointments sharing the
/// candidate's date (excluding the candidate itself when updating), pass
/// their datetimes in, and own all persistence.
pub fn validate_schedule(
    candidate: &ScheduleCandidate,
    accepted_same_date: &[NaiveDateTime],
    now: NaiveDateTime,
) -> Result<(), AppointmentError> {
    if candidate.date.weekday() == Weekday::Sun {
        return Err(AppointmentError::DayNotAllowed);
    }

    let hour = candidate.time.hour();
    let minute = candidate.time.minute();
    // 18:00 exactly is the last bookable instant.
    if hour < BUSINESS_OPEN_HOUR
        || hour > BUSINESS_CLOSE_HOUR
        || (hour == BUSINESS_CLOSE_HOUR && minute > 0)
    {
        return Err(AppointmentError::OutsideBusinessHours);
    }

    let scheduled_at = candidate.scheduled_at();

    // Rejected appointments may sit in the past; an admin turning down a
    // stale request is not rescheduling it.
    if matches!(
        candidate.status,
        AppointmentStatus::Pending | AppointmentStatus::Accepted
    ) && scheduled_at <= now
    {
        return Err(AppointmentError::PastSchedule);
    }

    if candidate.status == AppointmentStatus::Accepted {
        for other in accepted_same_date {
            let diff = (scheduled_at - *other).num_seconds().abs();
            if diff < CONFLICT_WINDOW_SECONDS {
                return Err(AppointmentError::SchedulingConflict(other.time()));
            }
        }
    }

    Ok(())
}

/// Normalize a phone number to `(DD) DDDDD-DDDD`.
/// Separate from schedule validation; runs once on form intake.
pub fn normalize_phone(raw: &str) -> Result<String, AppointmentError> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() != 11 {
        return Err(AppointmentError::InvalidPhoneFormat);
    }

    Ok(format!(
        "({}) {}-{}",
        &digits[..2],
        &digits[2..7],
        &digits[7..]
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn now() -> NaiveDateTime {
        // A Thursday at noon.
        date(2026, 6, 4).and_time(time(12, 0))
    }

    fn candidate(d: NaiveDate, t: NaiveTime, status: AppointmentStatus) -> ScheduleCandidate {
        ScheduleCandidate {
            date: d,
            time: t,
            status,
        }
    }

    #[test]
    fn sunday_is_rejected_regardless_of_time() {
        let sunday = date(2026, 6, 7);
        for t in [time(9, 0), time(12, 30), time(18, 0)] {
            let result = validate_schedule(
                &candidate(sunday, t, AppointmentStatus::Pending),
                &[],
                now(),
            );
            assert_eq!(result, Err(AppointmentError::DayNotAllowed));
        }
    }

    #[test]
    fn saturday_is_a_working_day() {
        let saturday = date(2026, 6, 6);
        let result = validate_schedule(
            &candidate(saturday, time(10, 0), AppointmentStatus::Pending),
            &[],
            now(),
        );
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn business_hours_boundaries() {
        let d = date(2026, 6, 5);

        for t in [time(8, 59), time(7, 0), time(18, 1), time(19, 0), time(23, 30)] {
            let result =
                validate_schedule(&candidate(d, t, AppointmentStatus::Pending), &[], now());
            assert_eq!(result, Err(AppointmentError::OutsideBusinessHours), "{}", t);
        }

        // 09:00 opens the day and 18:00 exactly is still bookable.
        for t in [time(9, 0), time(18, 0)] {
            let result =
                validate_schedule(&candidate(d, t, AppointmentStatus::Pending), &[], now());
            assert_eq!(result, Ok(()), "{}", t);
        }
    }

    #[test]
    fn past_schedule_rejected_for_pending_and_accepted() {
        let yesterday = date(2026, 6, 3);
        for status in [AppointmentStatus::Pending, AppointmentStatus::Accepted] {
            let result = validate_schedule(&candidate(yesterday, time(10, 0), status), &[], now());
            assert_eq!(result, Err(AppointmentError::PastSchedule));
        }
    }

    #[test]
    fn past_schedule_not_checked_when_rejecting() {
        let yesterday = date(2026, 6, 3);
        let result = validate_schedule(
            &candidate(yesterday, time(10, 0), AppointmentStatus::Rejected),
            &[],
            now(),
        );
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn exact_now_counts_as_past() {
        let result = validate_schedule(
            &candidate(date(2026, 6, 4), time(12, 0), AppointmentStatus::Pending),
            &[],
            now(),
        );
        assert_eq!(result, Err(AppointmentError::PastSchedule));
    }

    #[test]
    fn conflict_window_is_strictly_under_thirty_minutes() {
        let d = date(2026, 6, 5);
        let existing_at_ten = vec![d.and_time(time(10, 0))];

        // 10:29 conflicts with 10:00.
        let result = validate_schedule(
            &candidate(d, time(10, 29), AppointmentStatus::Accepted),
            &existing_at_ten,
            now(),
        );
        assert_matches!(result, Err(AppointmentError::SchedulingConflict(_)));

        // 10:30 exactly does not.
        let result = validate_schedule(
            &candidate(d, time(10, 30), AppointmentStatus::Accepted),
            &existing_at_ten,
            now(),
        );
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn conflict_window_applies_both_directions() {
        let d = date(2026, 6, 5);
        let existing = vec![d.and_time(time(10, 29))];

        let result = validate_schedule(
            &candidate(d, time(10, 0), AppointmentStatus::Accepted),
            &existing,
            now(),
        );
        assert_matches!(result, Err(AppointmentError::SchedulingConflict(_)));
    }

    #[test]
    fn pending_candidates_skip_the_conflict_check() {
        let d = date(2026, 6, 5);
        let existing = vec![d.and_time(time(10, 0))];

        let result = validate_schedule(
            &candidate(d, time(10, 0), AppointmentStatus::Pending),
            &existing,
            now(),
        );
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn parse_schedule_accepts_form_values() {
        let (d, t) = parse_schedule("2026-06-05", "14:30").unwrap();
        assert_eq!(d, date(2026, 6, 5));
        assert_eq!(t, time(14, 30));

        let (_, t) = parse_schedule("2026-06-05", "14:30:00").unwrap();
        assert_eq!(t, time(14, 30));
    }

    #[test]
    fn parse_schedule_rejects_garbage() {
        assert_eq!(
            parse_schedule("05/06/2026", "14:30"),
            Err(AppointmentError::MalformedInput)
        );
        assert_eq!(
            parse_schedule("2026-06-05", "2pm"),
            Err(AppointmentError::MalformedInput)
        );
        assert_eq!(
            parse_schedule("", ""),
            Err(AppointmentError::MalformedInput)
        );
    }

    #[test]
    fn phone_is_normalized_to_brazilian_format() {
        assert_eq!(
            normalize_phone("11999998888").unwrap(),
            "(11) 99999-8888"
        );
        assert_eq!(
            normalize_phone("(11) 99999-8888").unwrap(),
            "(11) 99999-8888"
        );
        assert_eq!(
            normalize_phone("+11 99999 8888 ".trim()),
            Ok("(11) 99999-8888".to_string())
        );
    }

    #[test]
    fn phone_with_wrong_digit_count_is_rejected() {
        assert_eq!(
            normalize_phone("1199998888"),
            Err(AppointmentError::InvalidPhoneFormat)
        );
        assert_eq!(
            normalize_phone("119999988889"),
            Err(AppointmentError::InvalidPhoneFormat)
        );
        assert_eq!(
            normalize_phone("abc"),
            Err(AppointmentError::InvalidPhoneFormat)
        );
    }
}
