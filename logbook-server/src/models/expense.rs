//! Expense model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::ValidationError;

/// Kind of expense. Stored as lowercase TEXT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseKind {
    Transport,
    Tour,
    Hotel,
    Local,
    Home,
}

impl ExpenseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Tour => "tour",
            Self::Hotel => "hotel",
            Self::Local => "local",
            Self::Home => "home",
        }
    }
}

/// Raised when a row carries an expense kind no variant matches.
#[derive(Debug, thiserror::Error)]
#[error("unknown expense kind '{0}'")]
pub struct UnknownKind(String);

impl TryFrom<String> for ExpenseKind {
    type Error = UnknownKind;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "transport" => Ok(Self::Transport),
            "tour" => Ok(Self::Tour),
            "hotel" => Ok(Self::Hotel),
            "local" => Ok(Self::Local),
            "home" => Ok(Self::Home),
            _ => Err(UnknownKind(value)),
        }
    }
}

/// Expense record from database
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Expense {
    pub id: i64,
    pub name: String,
    pub user_id: i32,
    pub city_id: i32,
    #[sqlx(try_from = "String")]
    pub kind: ExpenseKind,
    pub cost: f64,
    pub date: DateTime<Utc>,
}

/// Payload for creating or fully replacing an expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExpense {
    pub name: String,
    pub user_id: i32,
    pub city_id: i32,
    pub kind: ExpenseKind,
    pub cost: f64,
    pub date: DateTime<Utc>,
}

impl NewExpense {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::Empty { field: "name" });
        }
        if !self.cost.is_finite() || self.cost < 0.0 {
            return Err(ValidationError::OutOfRange {
                field: "cost",
                reason: "must be a non-negative, finite number",
            });
        }
        Ok(())
    }
}

impl From<&Expense> for NewExpense {
    fn from(expense: &Expense) -> Self {
        Self {
            name: expense.name.clone(),
            user_id: expense.user_id,
            city_id: expense.city_id,
            kind: expense.kind,
            cost: expense.cost,
            date: expense.date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(cost: f64) -> NewExpense {
        NewExpense {
            name: "train to Utrecht".into(),
            user_id: 1,
            city_id: 1,
            kind: ExpenseKind::Transport,
            cost,
            date: Utc::now(),
        }
    }

    #[test]
    fn kind_round_trips_through_text() {
        for kind in [
            ExpenseKind::Transport,
            ExpenseKind::Tour,
            ExpenseKind::Hotel,
            ExpenseKind::Local,
            ExpenseKind::Home,
        ] {
            let parsed = ExpenseKind::try_from(kind.as_str().to_string()).unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!(ExpenseKind::try_from("splurge".to_string()).is_err());
    }

    #[test]
    fn rejects_negative_cost() {
        assert!(draft(-1.0).validate().is_err());
    }

    #[test]
    fn rejects_non_finite_cost() {
        assert!(draft(f64::NAN).validate().is_err());
        assert!(draft(f64::INFINITY).validate().is_err());
    }

    #[test]
    fn accepts_zero_cost() {
        assert!(draft(0.0).validate().is_ok());
    }
}
