use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, ToSchema)]
pub struct Video {
    pub id: Uuid,
    /// Original file name as sent by the client.
    pub name: String,
    /// Absolute path of the stored file on local disk.
    pub path: String,
    /// Populated by the transcription endpoint; NULL until then.
    pub transcription: Option<String>,
    #[schema(value_type = String, format = Date)]
    pub created_at: OffsetDateTime,
}
