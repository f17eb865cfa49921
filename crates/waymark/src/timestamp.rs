use chrono::{DateTime, Datelike, Timelike, Utc};

/// Version token for a new migration unit: the current UTC time as
/// `YYYYMMDDHHMMSS`. Timestamp-derived versions are recommended over hand
/// picked numbers to avoid collisions when branches merge.
pub fn version() -> i64 {
    version_at(Utc::now())
}

fn version_at(at: DateTime<Utc>) -> i64 {
    let date = i64::from(at.year()) * 10_000 + i64::from(at.month()) * 100 + i64::from(at.day());
    let time =
        i64::from(at.hour()) * 10_000 + i64::from(at.minute()) * 100 + i64::from(at.second());
    date * 1_000_000 + time
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{version, version_at};

    #[test]
    fn token_packs_date_and_time_digits() {
        let at = Utc.with_ymd_and_hms(2020, 6, 13, 11, 30, 48).unwrap();
        assert_eq!(version_at(at), 20200613113048);
    }

    #[test]
    fn single_digit_fields_are_zero_padded() {
        let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(version_at(at), 20260102030405);
    }

    #[test]
    fn later_times_produce_higher_tokens() {
        let earlier = Utc.with_ymd_and_hms(2026, 8, 5, 23, 59, 59).unwrap();
        let later = Utc.with_ymd_and_hms(2026, 8, 6, 0, 0, 0).unwrap();
        assert!(version_at(later) > version_at(earlier));
    }

    #[test]
    fn current_token_is_fourteen_digits() {
        let token = version();
        assert!(token > 19700101000000);
        assert!(token < 99991231235959);
    }
}
