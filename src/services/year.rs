use serde::Serialize;
use std::fmt;
use utoipa::ToSchema;

/// Academic year a document belongs to, derived from its semester
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, ToSchema)]
pub enum YearBucket {
    #[serde(rename = "1st")]
    First,
    #[serde(rename = "2nd")]
    Second,
    #[serde(rename = "3rd")]
    Third,
    #[serde(rename = "4th")]
    Fourth,
    Uncategorized,
}

impl YearBucket {
    /// The four real academic years, in order
    pub const YEARS: [YearBucket; 4] = [Self::First, Self::Second, Self::Third, Self::Fourth];

    /// All report slots, including the catch-all
    pub const ALL: [YearBucket; 5] = [
        Self::First,
        Self::Second,
        Self::Third,
        Self::Fourth,
        Self::Uncategorized,
    ];

    /// Maps semester 1..=8 onto its year. Anything else has no year.
    pub fn from_semester(semester: Option<u8>) -> Option<YearBucket> {
        match semester? {
            1 | 2 => Some(Self::First),
            3 | 4 => Some(Self::Second),
            5 | 6 => Some(Self::Third),
            7 | 8 => Some(Self::Fourth),
            _ => None,
        }
    }

    /// Same as [`from_semester`](Self::from_semester) but routes misses to `Uncategorized`
    pub fn resolve(semester: Option<u8>) -> YearBucket {
        Self::from_semester(semester).unwrap_or(Self::Uncategorized)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::First => "1st",
            Self::Second => "2nd",
            Self::Third => "3rd",
            Self::Fourth => "4th",
            Self::Uncategorized => "Uncategorized",
        }
    }
}

impl fmt::Display for YearBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semester_pairs() {
        for (semesters, year) in [
            ([1, 2], YearBucket::First),
            ([3, 4], YearBucket::Second),
            ([5, 6], YearBucket::Third),
            ([7, 8], YearBucket::Fourth),
        ] {
            for s in semesters {
                assert_eq!(YearBucket::from_semester(Some(s)), Some(year), "semester {s}");
            }
        }
    }

    #[test]
    fn test_out_of_range_has_no_year() {
        assert_eq!(YearBucket::from_semester(None), None);
        assert_eq!(YearBucket::from_semester(Some(0)), None);
        assert_eq!(YearBucket::from_semester(Some(9)), None);
        assert_eq!(YearBucket::from_semester(Some(255)), None);
        assert_eq!(YearBucket::resolve(Some(9)), YearBucket::Uncategorized);
    }

    #[test]
    fn test_labels() {
        assert_eq!(YearBucket::Second.to_string(), "2nd");
        assert_eq!(YearBucket::Uncategorized.as_str(), "Uncategorized");
        assert_eq!(
            serde_json::to_value(YearBucket::Fourth).unwrap(),
            serde_json::json!("4th")
        );
    }
}
