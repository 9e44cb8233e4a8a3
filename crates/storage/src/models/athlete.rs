use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// Athlete row. `category_id` and `training_center_id` point at the
/// surrogate `pk_id` of the referenced rows, not at their public ids.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Athlete {
    pub pk_id: i32,
    pub id: Uuid,
    pub name: String,
    pub cpf: String,
    pub age: i32,
    pub weight: Decimal,
    pub height: Decimal,
    pub sex: String,
    pub created_at: NaiveDateTime,
    pub category_id: i32,
    pub training_center_id: i32,
}

#[derive(Debug, Clone)]
pub struct NewAthlete {
    pub id: Uuid,
    pub name: String,
    pub cpf: String,
    pub age: i32,
    pub weight: Decimal,
    pub height: Decimal,
    pub sex: String,
    pub created_at: NaiveDateTime,
    pub category_id: i32,
    pub training_center_id: i32,
}

/// Athlete joined with the names of its category and training center
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct AthleteDetail {
    #[sqlx(flatten)]
    pub athlete: Athlete,
    pub category_name: String,
    pub training_center_name: String,
}
