use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Category {
    pub pk_id: i32,
    pub id: Uuid,
    pub name: String,
}

/// Category row waiting to be inserted; the store assigns `pk_id`.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub id: Uuid,
    pub name: String,
}
