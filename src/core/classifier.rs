use crate::domain::model::{BanRecord, BanStatus};

/// A ban is expired once its expiration lies strictly before `now`.
/// Permanent bans never expire.
pub fn classify(record: &BanRecord, now: i64) -> BanStatus {
    if !record.is_permanent() && record.expiration < now {
        BanStatus::Expired
    } else {
        BanStatus::Active
    }
}

/// Splits records into `(expired, active)`, keeping input order in each.
pub fn partition(records: Vec<BanRecord>, now: i64) -> (Vec<BanRecord>, Vec<BanRecord>) {
    records
        .into_iter()
        .partition(|record| classify(record, now) == BanStatus::Expired)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::BanFormat;

    fn ban(id: &str, expiration: i64) -> BanRecord {
        BanRecord {
            subject_id: id.to_string(),
            expiration,
            format: BanFormat::Simple,
            original_text: format!("{}:{}", id, expiration),
            line: 0,
        }
    }

    #[test]
    fn test_classify_boundaries() {
        let now = 1000;
        assert_eq!(classify(&ban("a", 999), now), BanStatus::Expired);
        assert_eq!(classify(&ban("a", 1000), now), BanStatus::Active);
        assert_eq!(classify(&ban("a", 1001), now), BanStatus::Active);
        assert_eq!(classify(&ban("a", 0), now), BanStatus::Active);
    }

    #[test]
    fn test_permanent_never_expires() {
        assert_eq!(classify(&ban("a", 0), i64::MAX), BanStatus::Active);
    }

    #[test]
    fn test_partition_preserves_order() {
        let records = vec![ban("a", 10), ban("b", 0), ban("c", 20), ban("d", 5000)];
        let (expired, active) = partition(records, 1000);
        let expired: Vec<&str> = expired.iter().map(|r| r.subject_id.as_str()).collect();
        let active: Vec<&str> = active.iter().map(|r| r.subject_id.as_str()).collect();
        assert_eq!(expired, vec!["a", "c"]);
        assert_eq!(active, vec!["b", "d"]);
    }
}
