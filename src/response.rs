//! Response bodies shared by handlers. Entities are returned bare; only
//! deletions answer with a message body.

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct MessageBody {
    pub message: String,
}

pub fn message(text: &str) -> Json<MessageBody> {
    Json(MessageBody {
        message: text.to_string(),
    })
}
