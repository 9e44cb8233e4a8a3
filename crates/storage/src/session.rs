//! Unit-of-work interface shared by the PostgreSQL and SQLite stores.
//!
//! A [`Session`] is opened per request through a [`SessionProvider`]. Every
//! write staged on it becomes visible to other sessions only after
//! [`Session::commit`]; dropping an uncommitted session discards its work.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Athlete, AthleteDetail, Category, Record, TrainingCenter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    ById(Uuid),
    ByName(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrainingCenterFilter {
    All,
    ById(Uuid),
    ByName(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AthleteFilter {
    All,
    ById(Uuid),
    /// Rows whose name contains `name` or whose cpf equals `cpf`
    NameOrCpf {
        name: Option<String>,
        cpf: Option<String>,
    },
}

#[async_trait]
pub trait Session: Send {
    async fn find_categories(&mut self, filter: CategoryFilter) -> Result<Vec<Category>>;

    async fn find_training_centers(
        &mut self,
        filter: TrainingCenterFilter,
    ) -> Result<Vec<TrainingCenter>>;

    async fn find_athletes(&mut self, filter: AthleteFilter) -> Result<Vec<AthleteDetail>>;

    /// Stage an insert. Unique constraint failures surface as
    /// `StorageError::ConstraintViolation`, either here or on commit.
    async fn add(&mut self, record: Record) -> Result<()>;

    async fn save_athlete(&mut self, athlete: &Athlete) -> Result<()>;

    async fn delete_athlete(&mut self, athlete: &Athlete) -> Result<()>;

    /// Re-read an athlete as seen from inside this session
    async fn refresh_athlete(&mut self, athlete: &Athlete) -> Result<AthleteDetail>;

    async fn commit(self: Box<Self>) -> Result<()>;
}

#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn Session>>;

    /// Create the tables if the backing store needs them
    async fn ensure_schema(&self) -> Result<()> {
        Ok(())
    }
}
