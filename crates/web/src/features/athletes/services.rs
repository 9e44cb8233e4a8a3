use chrono::Utc;
use storage::{
    Database,
    dto::athlete::{
        AthleteListParams, AthleteListResponse, AthleteResponse, AthleteSummary,
        CreateAthleteRequest, UpdateAthleteRequest,
    },
    models::{ATHLETE_CPF_KEY, AthleteDetail, NewAthlete},
    session::{AthleteFilter, CategoryFilter, Session, TrainingCenterFilter},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{ApiResult, WebError};
use crate::features::add_and_commit;

async fn find_athlete(session: &mut dyn Session, id: Uuid) -> ApiResult<AthleteDetail> {
    session
        .find_athletes(AthleteFilter::ById(id))
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| WebError::NotFound(format!("Athlete not found for id: {id}")))
}

/// Register an athlete
///
/// The category and the training center are resolved by name, in that
/// order, before anything is written. The response is built from the
/// request rather than read back from the store.
pub async fn create_athlete(
    db: &Database,
    request: &CreateAthleteRequest,
) -> ApiResult<AthleteResponse> {
    let mut session = db.begin().await?;

    let category_name = &request.category.name;
    let Some(category) = session
        .find_categories(CategoryFilter::ByName(category_name.clone()))
        .await?
        .into_iter()
        .next()
    else {
        warn!(category = %category_name, "Rejected athlete with unknown category");
        return Err(WebError::BadRequest(format!(
            "Category {category_name} not found"
        )));
    };

    let training_center_name = &request.training_center.name;
    let Some(training_center) = session
        .find_training_centers(TrainingCenterFilter::ByName(training_center_name.clone()))
        .await?
        .into_iter()
        .next()
    else {
        warn!(training_center = %training_center_name, "Rejected athlete with unknown training center");
        return Err(WebError::BadRequest(format!(
            "Training center {training_center_name} not found"
        )));
    };

    let response = AthleteResponse::from_request(Uuid::new_v4(), Utc::now().naive_utc(), request);

    let athlete = NewAthlete {
        id: response.id,
        name: request.name.clone(),
        cpf: request.cpf.clone(),
        age: request.age,
        weight: request.weight,
        height: request.height,
        sex: request.sex.clone(),
        created_at: response.created_at,
        category_id: category.pk_id,
        training_center_id: training_center.pk_id,
    };

    add_and_commit(session, athlete.into(), ATHLETE_CPF_KEY, || {
        format!("An athlete already exists with cpf: {}", request.cpf)
    })
    .await?;

    info!(athlete_id = %response.id, cpf = %response.cpf, "Athlete created");

    Ok(response)
}

/// List athletes
///
/// With a `nome` or `cpf` filter, full records matching either one are
/// returned. Without filters only the name, category and training center
/// of every athlete are returned.
pub async fn list_athletes(
    db: &Database,
    params: &AthleteListParams,
) -> ApiResult<AthleteListResponse> {
    let mut session = db.begin().await?;

    let response = if params.has_filter() {
        let filter = AthleteFilter::NameOrCpf {
            name: params.name().map(str::to_owned),
            cpf: params.cpf().map(str::to_owned),
        };
        let athletes = session.find_athletes(filter).await?;
        AthleteListResponse::Filtered(athletes.into_iter().map(AthleteResponse::from).collect())
    } else {
        let athletes = session.find_athletes(AthleteFilter::All).await?;
        AthleteListResponse::Summaries(athletes.into_iter().map(AthleteSummary::from).collect())
    };

    if response.is_empty() {
        return Err(WebError::NotFound(
            "No athletes found for the given filters".to_string(),
        ));
    }

    Ok(response)
}

/// Get athlete by public id
pub async fn get_athlete(db: &Database, id: Uuid) -> ApiResult<AthleteResponse> {
    let mut session = db.begin().await?;
    let athlete = find_athlete(session.as_mut(), id).await?;

    Ok(AthleteResponse::from(athlete))
}

/// Apply a partial update and return the row as re-read after the write
pub async fn update_athlete(
    db: &Database,
    id: Uuid,
    request: &UpdateAthleteRequest,
) -> ApiResult<AthleteResponse> {
    let mut session = db.begin().await?;
    let mut athlete = find_athlete(session.as_mut(), id).await?.athlete;

    request.apply(&mut athlete);
    session.save_athlete(&athlete).await?;
    let refreshed = session.refresh_athlete(&athlete).await?;
    session.commit().await?;

    info!(athlete_id = %id, "Athlete updated");

    Ok(AthleteResponse::from(refreshed))
}

/// Delete an athlete
pub async fn delete_athlete(db: &Database, id: Uuid) -> ApiResult<()> {
    let mut session = db.begin().await?;
    let detail = find_athlete(session.as_mut(), id).await?;

    session.delete_athlete(&detail.athlete).await?;
    session.commit().await?;

    info!(athlete_id = %id, "Athlete deleted");

    Ok(())
}
