use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::model::{new_id, require_text, timestamp, Trip};

/// Stored place, bound to the trip it was created under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Place {
    pub id: String,
    pub trip_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "timestamp")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /trips/{id}/places`. The trip comes from the path.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewPlace {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Place {
    /// Takes the owning trip rather than its id so a place can only be built
    /// for a trip that was actually loaded.
    pub fn new(trip: &Trip, input: NewPlace) -> Result<Self, AppError> {
        require_text("name", &input.name)?;
        Ok(Place {
            id: new_id(),
            trip_id: trip.id.clone(),
            name: input.name,
            description: input.description,
            created_at: timestamp::now(),
        })
    }
}
