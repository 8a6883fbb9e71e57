use sqlx::FromRow;
use uuid::Uuid;

/// Database model for stored image files
#[derive(Debug, FromRow)]
pub struct File {
    pub id: Uuid,
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}
