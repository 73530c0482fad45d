//! City model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::ValidationError;

/// City record from database
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct City {
    pub id: i32,
    pub name: String,
    pub country: String,
}

/// Payload for creating or fully replacing a city
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCity {
    pub name: String,
    pub country: String,
}

impl NewCity {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::Empty { field: "name" });
        }
        if self.country.trim().is_empty() {
            return Err(ValidationError::Empty { field: "country" });
        }
        Ok(())
    }
}

impl From<&City> for NewCity {
    fn from(city: &City) -> Self {
        Self {
            name: city.name.clone(),
            country: city.country.clone(),
        }
    }
}
