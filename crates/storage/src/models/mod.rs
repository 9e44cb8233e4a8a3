mod athlete;
mod category;
mod training_center;

pub use athlete::{Athlete, AthleteDetail, NewAthlete};
pub use category::{Category, NewCategory};
pub use training_center::{NewTrainingCenter, TrainingCenter};

/// Unique constraints on the natural keys, as named by both schemas
pub const CATEGORY_NAME_KEY: &str = "category_name_key";
pub const TRAINING_CENTER_NAME_KEY: &str = "training_center_name_key";
pub const ATHLETE_CPF_KEY: &str = "athlete_cpf_key";

/// A row staged for insertion within a session
#[derive(Debug, Clone)]
pub enum Record {
    Category(NewCategory),
    TrainingCenter(NewTrainingCenter),
    Athlete(NewAthlete),
}

impl From<NewCategory> for Record {
    fn from(category: NewCategory) -> Self {
        Self::Category(category)
    }
}

impl From<NewTrainingCenter> for Record {
    fn from(training_center: NewTrainingCenter) -> Self {
        Self::TrainingCenter(training_center)
    }
}

impl From<NewAthlete> for Record {
    fn from(athlete: NewAthlete) -> Self {
        Self::Athlete(athlete)
    }
}
