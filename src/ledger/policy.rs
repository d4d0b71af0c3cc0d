use chrono::{NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;

use crate::model::attendance::AttendanceRecord;
use crate::model::cohort::Cohort;

/// Pickup cutoff for children; minutes past it are billed as overtime.
static PICKUP_CUTOFF: Lazy<NaiveTime> = Lazy::new(|| NaiveTime::from_hms_opt(18, 0, 0).unwrap());

/// Staff shift starts at 06:00; a clock-in through 06:15:00.000 is on time.
static GRACE_DEADLINE: Lazy<NaiveTime> = Lazy::new(|| NaiveTime::from_hms_opt(6, 15, 0).unwrap());

/// Cohort-specific derived fields, applied at the transition that owns them.
/// The state machine itself is identical for every cohort.
pub trait DerivedFieldPolicy: Send + Sync {
    fn apply_check_in(&self, _record: &mut AttendanceRecord, _now: NaiveDateTime) {}
    fn apply_check_out(&self, _record: &mut AttendanceRecord, _now: NaiveDateTime) {}
}

pub struct NurseryPolicy;

impl DerivedFieldPolicy for NurseryPolicy {
    fn apply_check_out(&self, record: &mut AttendanceRecord, now: NaiveDateTime) {
        let cutoff = now.date().and_time(*PICKUP_CUTOFF);
        record.overtime_minutes = Some(minutes_past(cutoff, now));
    }
}

pub struct StaffPolicy;

impl DerivedFieldPolicy for StaffPolicy {
    fn apply_check_in(&self, record: &mut AttendanceRecord, now: NaiveDateTime) {
        let deadline = now.date().and_time(*GRACE_DEADLINE);
        record.is_late = Some(now > deadline);
    }
}

pub fn for_cohort(cohort: Cohort) -> &'static dyn DerivedFieldPolicy {
    match cohort {
        Cohort::Nursery => &NurseryPolicy,
        Cohort::Staff => &StaffPolicy,
    }
}

/// Whole minutes from `cutoff` to `now`, half-minutes rounding up, floored
/// at zero for anything at or before the cutoff.
fn minutes_past(cutoff: NaiveDateTime, now: NaiveDateTime) -> u32 {
    let ms = (now - cutoff).num_milliseconds();
    if ms <= 0 {
        0
    } else {
        ((ms as f64) / 60_000.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn june1(h: u32, m: u32, s: u32, ms: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_milli_opt(h, m, s, ms)
            .unwrap()
    }

    #[test]
    fn overtime_rounds_half_minutes_up() {
        let mut record = AttendanceRecord::default();
        NurseryPolicy.apply_check_out(&mut record, june1(18, 7, 30, 0));
        assert_eq!(record.overtime_minutes, Some(8));
    }

    #[test]
    fn overtime_is_zero_at_or_before_cutoff() {
        let mut record = AttendanceRecord::default();
        NurseryPolicy.apply_check_out(&mut record, june1(17, 59, 0, 0));
        assert_eq!(record.overtime_minutes, Some(0));

        NurseryPolicy.apply_check_out(&mut record, june1(18, 0, 0, 0));
        assert_eq!(record.overtime_minutes, Some(0));
    }

    #[test]
    fn overtime_counts_the_first_half_minute() {
        let mut record = AttendanceRecord::default();
        NurseryPolicy.apply_check_out(&mut record, june1(18, 0, 30, 0));
        assert_eq!(record.overtime_minutes, Some(1));

        NurseryPolicy.apply_check_out(&mut record, june1(18, 0, 29, 999));
        assert_eq!(record.overtime_minutes, Some(0));
    }

    #[test]
    fn nursery_leaves_lateness_untouched() {
        let mut record = AttendanceRecord::default();
        NurseryPolicy.apply_check_in(&mut record, june1(9, 0, 0, 0));
        assert_eq!(record.is_late, None);
    }

    #[test]
    fn grace_deadline_is_inclusive_to_the_millisecond() {
        let mut record = AttendanceRecord::default();
        StaffPolicy.apply_check_in(&mut record, june1(6, 15, 0, 0));
        assert_eq!(record.is_late, Some(false));

        StaffPolicy.apply_check_in(&mut record, june1(6, 15, 0, 1));
        assert_eq!(record.is_late, Some(true));
    }

    #[test]
    fn staff_leaves_overtime_untouched() {
        let mut record = AttendanceRecord::default();
        StaffPolicy.apply_check_out(&mut record, june1(19, 0, 0, 0));
        assert_eq!(record.overtime_minutes, None);
    }
}
