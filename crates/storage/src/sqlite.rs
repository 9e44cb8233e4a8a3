use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::types::Text;
use sqlx::{FromRow, Sqlite, Transaction};
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{Athlete, AthleteDetail, Category, Record, TrainingCenter};
use crate::queries;
use crate::session::{
    AthleteFilter, CategoryFilter, Session, SessionProvider, TrainingCenterFilter,
};

const SCHEMA: &str = include_str!("../sql/sqlite.sql");

/// SQLite pool. Serves the `sqlite:` URLs and the in-process database used
/// when no URL is configured.
pub struct SqliteProvider {
    pool: SqlitePool,
}

fn connect_options(database_url: &str) -> Result<SqliteConnectOptions> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .pragma("case_sensitive_like", "ON");

    Ok(options)
}

impl SqliteProvider {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(connect_options(database_url)?)
            .await?;

        Ok(Self { pool })
    }

    /// Private in-memory database. It lives on a single connection that is
    /// never recycled, so sessions are serialized and the data survives
    /// for as long as the provider does.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(connect_options("sqlite::memory:")?)
            .await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl SessionProvider for SqliteProvider {
    async fn begin(&self) -> Result<Box<dyn Session>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(SqliteSession { tx }))
    }

    async fn ensure_schema(&self) -> Result<()> {
        sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }
}

/// Joined athlete row as SQLite returns it, with decimals read from text
#[derive(FromRow)]
struct AthleteRow {
    pk_id: i32,
    id: Uuid,
    name: String,
    cpf: String,
    age: i32,
    weight: Text<Decimal>,
    height: Text<Decimal>,
    sex: String,
    created_at: NaiveDateTime,
    category_id: i32,
    training_center_id: i32,
    category_name: String,
    training_center_name: String,
}

impl From<AthleteRow> for AthleteDetail {
    fn from(row: AthleteRow) -> Self {
        Self {
            athlete: Athlete {
                pk_id: row.pk_id,
                id: row.id,
                name: row.name,
                cpf: row.cpf,
                age: row.age,
                weight: row.weight.0,
                height: row.height.0,
                sex: row.sex,
                created_at: row.created_at,
                category_id: row.category_id,
                training_center_id: row.training_center_id,
            },
            category_name: row.category_name,
            training_center_name: row.training_center_name,
        }
    }
}

/// Session backed by a single SQLite transaction
pub struct SqliteSession {
    tx: Transaction<'static, Sqlite>,
}

#[async_trait]
impl Session for SqliteSession {
    async fn find_categories(&mut self, filter: CategoryFilter) -> Result<Vec<Category>> {
        let sql = queries::select_categories(&filter);
        let query = sqlx::query_as::<Sqlite, Category>(&sql);
        let query = match filter {
            CategoryFilter::All => query,
            CategoryFilter::ById(id) => query.bind(id),
            CategoryFilter::ByName(name) => query.bind(name),
        };

        Ok(query.fetch_all(&mut *self.tx).await?)
    }

    async fn find_training_centers(
        &mut self,
        filter: TrainingCenterFilter,
    ) -> Result<Vec<TrainingCenter>> {
        let sql = queries::select_training_centers(&filter);
        let query = sqlx::query_as::<Sqlite, TrainingCenter>(&sql);
        let query = match filter {
            TrainingCenterFilter::All => query,
            TrainingCenterFilter::ById(id) => query.bind(id),
            TrainingCenterFilter::ByName(name) => query.bind(name),
        };

        Ok(query.fetch_all(&mut *self.tx).await?)
    }

    async fn find_athletes(&mut self, filter: AthleteFilter) -> Result<Vec<AthleteDetail>> {
        let sql = queries::select_athletes(&filter);
        let query = sqlx::query_as::<Sqlite, AthleteRow>(&sql);
        let query = match filter {
            AthleteFilter::All => query,
            AthleteFilter::ById(id) => query.bind(id),
            AthleteFilter::NameOrCpf { name, cpf } => query.bind(name).bind(cpf),
        };

        let rows = query.fetch_all(&mut *self.tx).await?;
        Ok(rows.into_iter().map(AthleteDetail::from).collect())
    }

    async fn add(&mut self, record: Record) -> Result<()> {
        let query = match record {
            Record::Category(category) => sqlx::query::<Sqlite>(queries::INSERT_CATEGORY)
                .bind(category.id)
                .bind(category.name),
            Record::TrainingCenter(training_center) => {
                sqlx::query::<Sqlite>(queries::INSERT_TRAINING_CENTER)
                    .bind(training_center.id)
                    .bind(training_center.name)
                    .bind(training_center.address)
                    .bind(training_center.owner)
            }
            Record::Athlete(athlete) => sqlx::query::<Sqlite>(queries::INSERT_ATHLETE)
                .bind(athlete.id)
                .bind(athlete.name)
                .bind(athlete.cpf)
                .bind(athlete.age)
                .bind(Text(athlete.weight))
                .bind(Text(athlete.height))
                .bind(athlete.sex)
                .bind(athlete.created_at)
                .bind(athlete.category_id)
                .bind(athlete.training_center_id),
        };

        query
            .execute(&mut *self.tx)
            .await
            .map_err(StorageError::from_write)?;

        Ok(())
    }

    async fn save_athlete(&mut self, athlete: &Athlete) -> Result<()> {
        let result = sqlx::query::<Sqlite>(queries::UPDATE_ATHLETE)
            .bind(athlete.pk_id)
            .bind(&athlete.name)
            .bind(&athlete.cpf)
            .bind(athlete.age)
            .bind(Text(athlete.weight))
            .bind(Text(athlete.height))
            .bind(&athlete.sex)
            .bind(athlete.category_id)
            .bind(athlete.training_center_id)
            .execute(&mut *self.tx)
            .await
            .map_err(StorageError::from_write)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    async fn delete_athlete(&mut self, athlete: &Athlete) -> Result<()> {
        let result = sqlx::query::<Sqlite>(queries::DELETE_ATHLETE)
            .bind(athlete.pk_id)
            .execute(&mut *self.tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    async fn refresh_athlete(&mut self, athlete: &Athlete) -> Result<AthleteDetail> {
        let sql = queries::select_athlete_by_pk();
        let row = sqlx::query_as::<Sqlite, AthleteRow>(&sql)
            .bind(athlete.pk_id)
            .fetch_optional(&mut *self.tx)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(AthleteDetail::from(row))
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        let SqliteSession { tx } = *self;
        tx.commit().await?;
        Ok(())
    }
}
