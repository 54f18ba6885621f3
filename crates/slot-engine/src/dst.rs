//! Resolution of local wall-clock times across DST transitions.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

/// Map a local wall-clock time on `date` in `tz` to an absolute instant.
///
/// - A time that exists once maps to that instant.
/// - A time inside a fall-back fold (it exists twice) maps to the earlier instant.
/// - A time inside a spring-forward gap (it never exists) is shifted forward by
///   the length of the gap, e.g. 02:30 on a US spring-forward day becomes 03:30.
pub fn resolve_local(tz: &Tz, date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
    let naive = date.and_time(time);
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => {
            // Interpret the wall-clock time with the offset in force before the gap.
            let offset_before = naive
                .checked_sub_signed(Duration::hours(24))
                .and_then(|earlier| tz.from_local_datetime(&earlier).earliest())
                .map(|dt| dt.offset().fix().local_minus_utc())
                .unwrap_or(0);
            // Also reached when the instant falls outside chrono's range; clamp there.
            match naive.checked_sub_signed(Duration::seconds(i64::from(offset_before))) {
                Some(utc) => Utc.from_utc_datetime(&utc),
                None if offset_before < 0 => DateTime::<Utc>::MAX_UTC,
                None => DateTime::<Utc>::MIN_UTC,
            }
        }
    }
}

/// Start of the local calendar day `date` in `tz`.
pub fn start_of_day(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    resolve_local(tz, date, NaiveTime::MIN)
}

/// Half-open `[start, end)` bounds of the local calendar day `date` in `tz`.
pub fn day_span(tz: &Tz, date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = start_of_day(tz, date);
    let end = date
        .succ_opt()
        .map(|next| start_of_day(tz, next))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn utc_is_identity() {
        let resolved = resolve_local(&chrono_tz::UTC, date(2026, 3, 16), time(9, 0));
        assert_eq!(resolved, Utc.with_ymd_and_hms(2026, 3, 16, 9, 0, 0).unwrap());
    }

    #[test]
    fn fixed_offset_zone_converts_to_utc() {
        // Berlin is UTC+1 in January.
        let resolved = resolve_local(&chrono_tz::Europe::Berlin, date(2026, 1, 12), time(9, 0));
        assert_eq!(resolved, Utc.with_ymd_and_hms(2026, 1, 12, 8, 0, 0).unwrap());
    }

    #[test]
    fn spring_forward_gap_shifts_forward() {
        // 2026-03-08 02:30 does not exist in New York; clocks jump 02:00 -> 03:00 EDT.
        let resolved = resolve_local(&chrono_tz::America::New_York, date(2026, 3, 8), time(2, 30));
        // 03:30 EDT == 07:30 UTC
        assert_eq!(resolved, Utc.with_ymd_and_hms(2026, 3, 8, 7, 30, 0).unwrap());
    }

    #[test]
    fn fall_back_fold_takes_earliest() {
        // 2026-11-01 01:30 happens twice in New York; the first one is EDT (UTC-4).
        let resolved = resolve_local(&chrono_tz::America::New_York, date(2026, 11, 1), time(1, 30));
        assert_eq!(resolved, Utc.with_ymd_and_hms(2026, 11, 1, 5, 30, 0).unwrap());
    }

    #[test]
    fn last_representable_day_clamps_instead_of_overflowing() {
        // 23:00 New York time on the last date chrono supports is past its UTC range.
        let resolved = resolve_local(&chrono_tz::America::New_York, NaiveDate::MAX, time(23, 0));
        assert_eq!(resolved, DateTime::<Utc>::MAX_UTC);

        let (start, end) = day_span(&chrono_tz::America::New_York, NaiveDate::MAX);
        assert!(start < end);
        assert_eq!(end, DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn first_representable_day_clamps_instead_of_overflowing() {
        // Midnight Tokyo time on the first supported date is before chrono's UTC range.
        let resolved = resolve_local(&chrono_tz::Asia::Tokyo, NaiveDate::MIN, NaiveTime::MIN);
        assert_eq!(
            resolved,
            Utc.from_utc_datetime(&NaiveDate::MIN.and_time(NaiveTime::MIN))
        );
    }

    #[test]
    fn day_span_covers_23_hours_on_spring_forward() {
        let (start, end) = day_span(&chrono_tz::America::New_York, date(2026, 3, 8));
        assert_eq!((end - start).num_hours(), 23);
    }
}
