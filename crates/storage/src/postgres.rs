use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{Postgres, Transaction};

use crate::error::{Result, StorageError};
use crate::models::{Athlete, AthleteDetail, Category, Record, TrainingCenter};
use crate::queries;
use crate::session::{
    AthleteFilter, CategoryFilter, Session, SessionProvider, TrainingCenterFilter,
};

const SCHEMA: &str = include_str!("../sql/postgres.sql");

pub struct PgProvider {
    pool: PgPool,
}

impl PgProvider {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl SessionProvider for PgProvider {
    async fn begin(&self) -> Result<Box<dyn Session>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgSession { tx }))
    }

    async fn ensure_schema(&self) -> Result<()> {
        sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }
}

/// Session backed by a single PostgreSQL transaction
pub struct PgSession {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl Session for PgSession {
    async fn find_categories(&mut self, filter: CategoryFilter) -> Result<Vec<Category>> {
        let sql = queries::select_categories(&filter);
        let query = sqlx::query_as::<Postgres, Category>(&sql);
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
        let query = sqlx::query_as::<Postgres, TrainingCenter>(&sql);
        let query = match filter {
            TrainingCenterFilter::All => query,
            TrainingCenterFilter::ById(id) => query.bind(id),
            TrainingCenterFilter::ByName(name) => query.bind(name),
        };

        Ok(query.fetch_all(&mut *self.tx).await?)
    }

    async fn find_athletes(&mut self, filter: AthleteFilter) -> Result<Vec<AthleteDetail>> {
        let sql = queries::select_athletes(&filter);
        let query = sqlx::query_as::<Postgres, AthleteDetail>(&sql);
        let query = match filter {
            AthleteFilter::All => query,
            AthleteFilter::ById(id) => query.bind(id),
            AthleteFilter::NameOrCpf { name, cpf } => query.bind(name).bind(cpf),
        };

        Ok(query.fetch_all(&mut *self.tx).await?)
    }

    async fn add(&mut self, record: Record) -> Result<()> {
        let query = match record {
            Record::Category(category) => sqlx::query::<Postgres>(queries::INSERT_CATEGORY)
                .bind(category.id)
                .bind(category.name),
            Record::TrainingCenter(training_center) => {
                sqlx::query::<Postgres>(queries::INSERT_TRAINING_CENTER)
                    .bind(training_center.id)
                    .bind(training_center.name)
                    .bind(training_center.address)
                    .bind(training_center.owner)
            }
            Record::Athlete(athlete) => sqlx::query::<Postgres>(queries::INSERT_ATHLETE)
                .bind(athlete.id)
                .bind(athlete.name)
                .bind(athlete.cpf)
                .bind(athlete.age)
                .bind(athlete.weight)
                .bind(athlete.height)
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
        let result = sqlx::query::<Postgres>(queries::UPDATE_ATHLETE)
            .bind(athlete.pk_id)
            .bind(&athlete.name)
            .bind(&athlete.cpf)
            .bind(athlete.age)
            .bind(athlete.weight)
            .bind(athlete.height)
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
        let result = sqlx::query::<Postgres>(queries::DELETE_ATHLETE)
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
        let detail = sqlx::query_as::<Postgres, AthleteDetail>(&sql)
            .bind(athlete.pk_id)
            .fetch_optional(&mut *self.tx)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(detail)
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        let PgSession { tx } = *self;
        tx.commit().await?;
        Ok(())
    }
}
