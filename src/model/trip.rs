use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::model::{new_id, require_text, timestamp};

/// Stored trip. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Trip {
    pub id: String,
    pub name: String,
    #[serde(with = "timestamp")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /trips`. Unknown fields, including `id` and `created_at`, are ignored.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewTrip {
    pub name: String,
}

impl Trip {
    pub fn new(input: NewTrip) -> Result<Self, AppError> {
        require_text("name", &input.name)?;
        Ok(Trip {
            id: new_id(),
            name: input.name,
            created_at: timestamp::now(),
        })
    }
}
