//! Overnight stay records

use serde::{Deserialize, Serialize};

use core_kernel::{DateRange, PersonCode, StayId};

/// One booking of the property by one person's party
///
/// The stay spans `period` inclusively; `head_count` is how many people
/// the booking covers. "Stays" (person-nights) for a record are inclusive
/// day count × head count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvernightStay {
    pub id: StayId,
    pub person_code: PersonCode,
    /// Person display name as recorded on the row
    pub person_name: String,
    pub period: DateRange,
    /// Number of occupants, at least 1
    pub head_count: u32,
}

impl OvernightStay {
    /// Person-nights contributed by the part of this stay that overlaps
    /// `window`, or 0 when there is no overlap
    pub fn stays_within(&self, window: &DateRange) -> u64 {
        match self.period.overlap(window) {
            Some(overlap) => overlap.inclusive_days() as u64 * u64::from(self.head_count),
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn range(s: (i32, u32, u32), e: (i32, u32, u32)) -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(s.0, s.1, s.2).unwrap(),
            NaiveDate::from_ymd_opt(e.0, e.1, e.2).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_stays_within_counts_heads() {
        let stay = OvernightStay {
            id: StayId::SEED,
            person_code: PersonCode::new("AL"),
            person_name: "AL - Alice".to_string(),
            period: range((2024, 1, 1), (2024, 1, 5)),
            head_count: 2,
        };

        // 5 inclusive days × 2 heads
        assert_eq!(stay.stays_within(&range((2024, 1, 1), (2024, 1, 10))), 10);
        // Partial overlap: days 3..5
        assert_eq!(stay.stays_within(&range((2024, 1, 3), (2024, 1, 10))), 6);
        // No overlap
        assert_eq!(stay.stays_within(&range((2024, 2, 1), (2024, 2, 10))), 0);
    }
}
