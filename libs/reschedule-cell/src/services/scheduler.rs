// libs/reschedule-cell/src/services/scheduler.rs
use chrono::{Days, Local, NaiveDateTime, Weekday};

use shared_models::RescheduleOptions;

use crate::models::RescheduleError;

/// Display format shared by missed times and offered options,
/// e.g. `Monday, January 06, 2025 at 09:00 AM`.
pub const DISPLAY_TIME_FORMAT: &str = "%A, %B %d, %Y at %I:%M %p";

/// Everything after the leading `<weekday>, `.
const DATE_TIME_FORMAT: &str = "%B %d, %Y at %I:%M %p";

struct OfferSlot {
    days_ahead: u64,
    hour: u32,
    minute: u32,
}

const OFFER_SLOTS: [OfferSlot; 2] = [
    OfferSlot { days_ahead: 1, hour: 10, minute: 0 },
    OfferSlot { days_ahead: 2, hour: 14, minute: 30 },
];

/// Parse a display-format timestamp. The weekday has to be a weekday name but
/// is not checked against the date; the date alone decides.
pub fn parse_display_time(raw: &str) -> Result<NaiveDateTime, RescheduleError> {
    let invalid = |reason: String| RescheduleError::InvalidTimeFormat(format!("{:?}: {}", raw, reason));

    let (weekday, date_time) = raw
        .split_once(", ")
        .ok_or_else(|| invalid("missing weekday".to_string()))?;
    weekday
        .parse::<Weekday>()
        .map_err(|_| invalid(format!("unknown weekday {:?}", weekday)))?;

    NaiveDateTime::parse_from_str(date_time, DATE_TIME_FORMAT).map_err(|e| invalid(e.to_string()))
}

pub fn format_display_time(time: NaiveDateTime) -> String {
    time.format(DISPLAY_TIME_FORMAT).to_string()
}

/// The two reschedule times offered for a reference time: the next day at
/// 10:00 and the day after at 14:30.
pub fn offered_times(reference: NaiveDateTime) -> Result<[NaiveDateTime; 2], RescheduleError> {
    let at = |slot: &OfferSlot| {
        reference
            .date()
            .checked_add_days(Days::new(slot.days_ahead))
            .and_then(|date| date.and_hms_opt(slot.hour, slot.minute, 0))
            .ok_or_else(|| RescheduleError::OutOfRange(format!("{} + {} days", reference, slot.days_ahead)))
    };

    Ok([at(&OFFER_SLOTS[0])?, at(&OFFER_SLOTS[1])?])
}

pub fn reschedule_options(reference: NaiveDateTime) -> Result<RescheduleOptions, RescheduleError> {
    let [first, second] = offered_times(reference)?;
    Ok(RescheduleOptions::new(
        format_display_time(first),
        format_display_time(second),
    ))
}

/// Wall-clock reference used when options are regenerated.
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::{Duration, NaiveDate};

    #[test]
    fn test_missed_monday_scenario() {
        let missed = parse_display_time("Monday, January 06, 2025 at 09:00 AM").unwrap();
        let options = reschedule_options(missed).unwrap();

        assert_eq!(options.option1, "Tuesday, January 07, 2025 at 10:00 AM");
        assert_eq!(options.option2, "Wednesday, January 08, 2025 at 02:30 PM");
    }

    #[test]
    fn test_options_cross_month_and_year() {
        let missed = parse_display_time("Tuesday, December 31, 2024 at 11:45 PM").unwrap();
        let options = reschedule_options(missed).unwrap();

        assert_eq!(options.option1, "Wednesday, January 01, 2025 at 10:00 AM");
        assert_eq!(options.option2, "Thursday, January 02, 2025 at 02:30 PM");
    }

    #[test]
    fn test_time_of_day_is_fixed_regardless_of_reference() {
        for (hour, minute) in [(0, 0), (9, 59), (13, 5), (23, 59)] {
            let reference = NaiveDate::from_ymd_opt(2025, 3, 9)
                .unwrap()
                .and_hms_opt(hour, minute, 42)
                .unwrap();
            let [first, second] = offered_times(reference).unwrap();

            assert_eq!(first, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap().and_hms_opt(10, 0, 0).unwrap());
            assert_eq!(second, NaiveDate::from_ymd_opt(2025, 3, 11).unwrap().and_hms_opt(14, 30, 0).unwrap());
        }
    }

    #[test]
    fn test_options_are_later_than_reference() {
        let now = local_now();
        let [first, second] = offered_times(now).unwrap();

        assert!(first > now);
        assert!(second > first);
        assert!(first - now < Duration::days(2));
    }

    #[test]
    fn test_rejects_malformed_times() {
        for raw in [
            "",
            "2025-01-06 09:00",
            "Monday, January 06, 2025 09:00 AM",
            "Monday, January 06, 2025 at 13:00 PM",
            "Monday, Janvier 06, 2025 at 09:00 AM",
            "Monday, January 32, 2025 at 09:00 AM",
            "Someday, January 06, 2025 at 09:00 AM",
            "January 06, 2025 at 09:00 AM",
        ] {
            assert_matches!(parse_display_time(raw), Err(RescheduleError::InvalidTimeFormat(_)), "{:?}", raw);
        }
    }

    #[test]
    fn test_weekday_name_is_not_checked_against_date() {
        let stated = parse_display_time("Friday, January 06, 2025 at 09:00 AM").unwrap();
        let actual = parse_display_time("Monday, January 06, 2025 at 09:00 AM").unwrap();

        assert_eq!(stated, actual);
        assert_eq!(
            reschedule_options(stated).unwrap().option1,
            "Tuesday, January 07, 2025 at 10:00 AM"
        );
    }

    #[test]
    fn test_format_round_trips_display_text() {
        let raw = "Wednesday, January 08, 2025 at 02:30 PM";
        assert_eq!(format_display_time(parse_display_time(raw).unwrap()), raw);
    }

    #[test]
    fn test_out_of_range_reference() {
        let reference = NaiveDateTime::MAX;
        assert_matches!(offered_times(reference), Err(RescheduleError::OutOfRange(_)));
    }
}
