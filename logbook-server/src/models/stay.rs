//! Stay model: a user's period of residence in a city

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::ValidationError;

/// Status of a stay. Stored as lowercase TEXT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StayStatus {
    Planned,
    Current,
    Past,
}

impl StayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Current => "current",
            Self::Past => "past",
        }
    }
}

/// Raised when a row carries a stay status no variant matches.
#[derive(Debug, thiserror::Error)]
#[error("unknown stay status '{0}'")]
pub struct UnknownStatus(String);

impl TryFrom<String> for StayStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "planned" => Ok(Self::Planned),
            "current" => Ok(Self::Current),
            "past" => Ok(Self::Past),
            _ => Err(UnknownStatus(value)),
        }
    }
}

/// Stay record from database
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Stay {
    pub user_id: i32,
    pub city_id: i32,
    #[sqlx(try_from = "String")]
    pub status: StayStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
}

/// Payload for recording a stay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStay {
    pub user_id: i32,
    pub city_id: i32,
    pub status: StayStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
}

impl NewStay {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(ValidationError::InvertedRange { field: "stay" });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn rejects_end_before_start() {
        let start = Utc::now();
        let stay = NewStay {
            user_id: 1,
            city_id: 1,
            status: StayStatus::Planned,
            start_date: start,
            end_date: Some(start - Duration::days(1)),
        };
        assert!(stay.validate().is_err());
    }

    #[test]
    fn accepts_open_ended_stay() {
        let stay = NewStay {
            user_id: 1,
            city_id: 1,
            status: StayStatus::Current,
            start_date: Utc::now(),
            end_date: None,
        };
        assert!(stay.validate().is_ok());
    }

    #[test]
    fn status_round_trips_through_text() {
        for status in [StayStatus::Planned, StayStatus::Current, StayStatus::Past] {
            let parsed = StayStatus::try_from(status.as_str().to_string()).unwrap();
            assert_eq!(parsed, status);
        }
    }
}
