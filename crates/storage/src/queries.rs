//! SQL shared by the PostgreSQL and SQLite sessions. Placeholders use the
//! `$N` form, which both drivers bind by position.

use crate::session::{AthleteFilter, CategoryFilter, TrainingCenterFilter};

const CATEGORY_SELECT: &str = "SELECT pk_id, id, name FROM category";

const TRAINING_CENTER_SELECT: &str =
    "SELECT pk_id, id, name, address, owner FROM training_center";

const ATHLETE_SELECT: &str = r#"
    SELECT a.pk_id, a.id, a.name, a.cpf, a.age, a.weight, a.height, a.sex,
           a.created_at, a.category_id, a.training_center_id,
           c.name AS category_name, t.name AS training_center_name
    FROM athlete a
    JOIN category c ON c.pk_id = a.category_id
    JOIN training_center t ON t.pk_id = a.training_center_id
"#;

pub(crate) const INSERT_CATEGORY: &str = "INSERT INTO category (id, name) VALUES ($1, $2)";

pub(crate) const INSERT_TRAINING_CENTER: &str =
    "INSERT INTO training_center (id, name, address, owner) VALUES ($1, $2, $3, $4)";

pub(crate) const INSERT_ATHLETE: &str = r#"
    INSERT INTO athlete (
        id, name, cpf, age, weight, height, sex, created_at,
        category_id, training_center_id
    )
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
"#;

pub(crate) const UPDATE_ATHLETE: &str = r#"
    UPDATE athlete
    SET name = $2,
        cpf = $3,
        age = $4,
        weight = $5,
        height = $6,
        sex = $7,
        category_id = $8,
        training_center_id = $9
    WHERE pk_id = $1
"#;

pub(crate) const DELETE_ATHLETE: &str = "DELETE FROM athlete WHERE pk_id = $1";

pub(crate) fn select_categories(filter: &CategoryFilter) -> String {
    match filter {
        CategoryFilter::All => format!("{CATEGORY_SELECT} ORDER BY pk_id"),
        CategoryFilter::ById(_) => format!("{CATEGORY_SELECT} WHERE id = $1"),
        CategoryFilter::ByName(_) => format!("{CATEGORY_SELECT} WHERE name = $1"),
    }
}

pub(crate) fn select_training_centers(filter: &TrainingCenterFilter) -> String {
    match filter {
        TrainingCenterFilter::All => format!("{TRAINING_CENTER_SELECT} ORDER BY pk_id"),
        TrainingCenterFilter::ById(_) => format!("{TRAINING_CENTER_SELECT} WHERE id = $1"),
        TrainingCenterFilter::ByName(_) => format!("{TRAINING_CENTER_SELECT} WHERE name = $1"),
    }
}

/// The name filter is a LIKE pattern wrapped in `%`, so callers may use
/// their own wildcards. A NULL operand matches nothing.
pub(crate) fn select_athletes(filter: &AthleteFilter) -> String {
    match filter {
        AthleteFilter::All => format!("{ATHLETE_SELECT} ORDER BY a.pk_id"),
        AthleteFilter::ById(_) => format!("{ATHLETE_SELECT} WHERE a.id = $1"),
        AthleteFilter::NameOrCpf { .. } => format!(
            "{ATHLETE_SELECT} WHERE a.name LIKE ('%' || $1 || '%') OR a.cpf = $2 ORDER BY a.pk_id"
        ),
    }
}

pub(crate) fn select_athlete_by_pk() -> String {
    format!("{ATHLETE_SELECT} WHERE a.pk_id = $1")
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn filtered_selects_take_one_parameter() {
        assert!(select_categories(&CategoryFilter::ByName("Scale".into())).ends_with("name = $1"));
        assert!(select_training_centers(&TrainingCenterFilter::ById(Uuid::nil())).ends_with("id = $1"));
        assert!(!select_categories(&CategoryFilter::All).contains('$'));
    }

    #[test]
    fn name_filter_is_a_wrapped_like_pattern() {
        let sql = select_athletes(&AthleteFilter::NameOrCpf {
            name: None,
            cpf: None,
        });
        assert!(sql.contains("LIKE ('%' || $1 || '%')"));
        assert!(!sql.contains("ESCAPE"));
    }
}
