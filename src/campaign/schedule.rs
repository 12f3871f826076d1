use chrono::{DateTime, Days, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Whole days left until `end_date` begins (UTC), rounded up and never
/// negative.
pub fn days_remaining(end_date: NaiveDate, now: DateTime<Utc>) -> i64 {
    let end = Utc.from_utc_datetime(&end_date.and_time(NaiveTime::MIN));
    let millis = (end - now).num_milliseconds();
    if millis <= 0 {
        return 0;
    }

    (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
}

/// Adds calendar days, saturating at the last representable date.
pub fn extend_end_date(end_date: NaiveDate, days: u32) -> NaiveDate {
    end_date
        .checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX)
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct BusinessHours {
    pub start_hour: i32,
    pub end_hour: i32,
    pub timezone: String,
}

impl BusinessHours {
    pub fn tz(&self) -> Option<Tz> {
        self.timezone.parse().ok()
    }

    /// Whether `now` falls inside the window in the configured zone. An
    /// unknown zone is never inside.
    pub fn contains(&self, now: DateTime<Utc>) -> bool {
        let tz = match self.tz() {
            Some(tz) => tz,
            None => return false,
        };

        let hour = now.with_timezone(&tz).hour() as i32;
        hour >= self.start_hour && hour < self.end_hour
    }
}

impl Default for BusinessHours {
    fn default() -> BusinessHours {
        BusinessHours {
            start_hour: 9,
            end_hour: 17,
            timezone: "America/New_York".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn midnight(d: NaiveDate) -> DateTime<Utc> {
        Utc.from_utc_datetime(&d.and_time(NaiveTime::MIN))
    }

    #[test]
    fn no_days_remain_on_or_after_the_end_date() {
        let today = date(2024, 5, 10);
        assert_eq!(days_remaining(today, midnight(today)), 0);
        assert_eq!(days_remaining(date(2024, 5, 9), midnight(today)), 0);
        assert_eq!(days_remaining(date(2023, 1, 1), midnight(today)), 0);
    }

    #[test]
    fn partial_days_round_up() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();
        assert_eq!(days_remaining(date(2024, 5, 11), now), 1);
        assert_eq!(days_remaining(date(2024, 5, 20), now), 10);
        assert_eq!(days_remaining(date(2024, 5, 10), now), 0);
    }

    #[test]
    fn extension_crosses_month_and_year_boundaries() {
        assert_eq!(extend_end_date(date(2024, 1, 20), 30), date(2024, 2, 19));
        assert_eq!(extend_end_date(date(2023, 12, 15), 30), date(2024, 1, 14));
        assert_eq!(extend_end_date(date(2024, 2, 28), 1), date(2024, 2, 29));
        assert_eq!(extend_end_date(date(2023, 2, 28), 1), date(2023, 3, 1));
        assert_eq!(extend_end_date(date(2024, 7, 4), 0), date(2024, 7, 4));
    }

    #[test]
    fn extension_saturates() {
        assert_eq!(extend_end_date(NaiveDate::MAX, 90), NaiveDate::MAX);
    }

    #[test]
    fn business_hours_use_the_configured_zone() {
        let hours = BusinessHours::default();
        // 14:00 UTC is 10:00 in New York during daylight saving time
        let inside = Utc.with_ymd_and_hms(2024, 6, 3, 14, 0, 0).unwrap();
        // 22:00 UTC is 18:00 in New York
        let outside = Utc.with_ymd_and_hms(2024, 6, 3, 22, 0, 0).unwrap();

        assert!(hours.contains(inside));
        assert!(!hours.contains(outside));
    }

    #[test]
    fn unknown_zone_is_never_inside() {
        let hours = BusinessHours {
            timezone: "Mars/Olympus_Mons".into(),
            ..BusinessHours::default()
        };
        assert_eq!(hours.tz(), None);
        assert!(!hours.contains(Utc::now()));
    }
}
