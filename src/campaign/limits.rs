//! Declared ranges for the numeric campaign fields.
//!
//! Text entered through the pages is never clamped against these; the ranges
//! are checked by the `try_set_*` setters and reported by
//! [`CampaignConfig::range_violations`] so callers can warn or refuse.

use std::ops::RangeInclusive;

use serde::Serialize;

use super::{
    AntiSpamSettings, BusinessHours, CampaignConfig, MedicareSettings, NonMedicareCallSettings,
    NonMedicareEmailSettings,
};

pub const ATTEMPTS: RangeInclusive<i32> = 1..=10;
pub const DAILY_CONTACTS: RangeInclusive<i32> = 1..=5;
pub const HOURS_BETWEEN_CONTACTS: RangeInclusive<i32> = 12..=72;
pub const HOUR_OF_DAY: RangeInclusive<i32> = 0..=23;
pub const AUTO_EXTEND_DAYS: RangeInclusive<i32> = 1..=90;

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct RangeViolation {
    pub field: &'static str,
    pub value: i32,
    pub min: i32,
    pub max: i32,
}

pub fn check(field: &'static str, value: i32, range: RangeInclusive<i32>) -> Result<i32, RangeViolation> {
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(RangeViolation {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

fn collect(violations: &mut Vec<RangeViolation>, result: Result<i32, RangeViolation>) {
    if let Err(violation) = result {
        violations.push(violation);
    }
}

impl MedicareSettings {
    pub fn try_set_max_email_attempts(&mut self, value: i32) -> Result<(), RangeViolation> {
        self.max_email_attempts = check("medicare_settings.max_email_attempts", value, ATTEMPTS)?;
        Ok(())
    }

    pub fn range_violations(&self) -> Vec<RangeViolation> {
        let mut violations = vec![];
        collect(
            &mut violations,
            check("medicare_settings.max_email_attempts", self.max_email_attempts, ATTEMPTS),
        );
        violations
    }
}

impl NonMedicareCallSettings {
    pub fn try_set_max_call_attempts(&mut self, value: i32) -> Result<(), RangeViolation> {
        self.max_call_attempts = check("non_medicare_call_settings.max_call_attempts", value, ATTEMPTS)?;
        Ok(())
    }

    pub fn range_violations(&self) -> Vec<RangeViolation> {
        let mut violations = vec![];
        collect(
            &mut violations,
            check(
                "non_medicare_call_settings.max_call_attempts",
                self.max_call_attempts,
                ATTEMPTS,
            ),
        );
        violations
    }
}

impl NonMedicareEmailSettings {
    pub fn try_set_max_email_attempts(&mut self, value: i32) -> Result<(), RangeViolation> {
        self.max_email_attempts = check("non_medicare_email_settings.max_email_attempts", value, ATTEMPTS)?;
        Ok(())
    }

    pub fn range_violations(&self) -> Vec<RangeViolation> {
        let mut violations = vec![];
        collect(
            &mut violations,
            check(
                "non_medicare_email_settings.max_email_attempts",
                self.max_email_attempts,
                ATTEMPTS,
            ),
        );
        violations
    }
}

impl AntiSpamSettings {
    pub fn try_set_max_daily_emails(&mut self, value: i32) -> Result<(), RangeViolation> {
        self.max_daily_emails_per_client = check("max_daily_emails_per_client", value, DAILY_CONTACTS)?;
        Ok(())
    }

    pub fn try_set_max_daily_calls(&mut self, value: i32) -> Result<(), RangeViolation> {
        self.max_daily_calls_per_client = check("max_daily_calls_per_client", value, DAILY_CONTACTS)?;
        Ok(())
    }

    pub fn try_set_min_hours_between_contacts(&mut self, value: i32) -> Result<(), RangeViolation> {
        self.min_hours_between_contacts =
            check("min_hours_between_contacts", value, HOURS_BETWEEN_CONTACTS)?;
        Ok(())
    }

    pub fn range_violations(&self) -> Vec<RangeViolation> {
        let mut violations = vec![];
        collect(
            &mut violations,
            check("max_daily_emails_per_client", self.max_daily_emails_per_client, DAILY_CONTACTS),
        );
        collect(
            &mut violations,
            check("max_daily_calls_per_client", self.max_daily_calls_per_client, DAILY_CONTACTS),
        );
        collect(
            &mut violations,
            check(
                "min_hours_between_contacts",
                self.min_hours_between_contacts,
                HOURS_BETWEEN_CONTACTS,
            ),
        );
        violations
    }
}

impl BusinessHours {
    pub fn try_set_hours(&mut self, start_hour: i32, end_hour: i32) -> Result<(), RangeViolation> {
        let start_hour = check("business_hours.start_hour", start_hour, HOUR_OF_DAY)?;
        let end_hour = check("business_hours.end_hour", end_hour, HOUR_OF_DAY)?;
        self.start_hour = start_hour;
        self.end_hour = end_hour;
        Ok(())
    }

    pub fn range_violations(&self) -> Vec<RangeViolation> {
        let mut violations = vec![];
        collect(&mut violations, check("business_hours.start_hour", self.start_hour, HOUR_OF_DAY));
        collect(&mut violations, check("business_hours.end_hour", self.end_hour, HOUR_OF_DAY));
        violations
    }
}

impl CampaignConfig {
    pub fn try_set_auto_extend_days(&mut self, value: i32) -> Result<(), RangeViolation> {
        self.auto_extend_days = Some(check("auto_extend_days", value, AUTO_EXTEND_DAYS)?);
        Ok(())
    }

    pub fn range_violations(&self) -> Vec<RangeViolation> {
        let mut violations = self.medicare_settings.range_violations();
        violations.extend(self.non_medicare_call_settings.range_violations());
        violations.extend(self.non_medicare_email_settings.range_violations());
        violations.extend(self.anti_spam.range_violations());
        if let Some(business_hours) = &self.business_hours {
            violations.extend(business_hours.range_violations());
        }
        if let Some(auto_extend_days) = self.auto_extend_days {
            collect(&mut violations, check("auto_extend_days", auto_extend_days, AUTO_EXTEND_DAYS));
        }
        violations
    }
}
