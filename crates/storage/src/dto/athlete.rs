use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::category::CategoryRef;
use super::training_center::TrainingCenterRef;
use crate::models::{Athlete, AthleteDetail};

/// Request payload for registering a new athlete
///
/// The category and training center are referenced by name and must
/// already exist.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateAthleteRequest {
    #[serde(rename = "nome")]
    #[validate(length(
        min = 1,
        max = 50,
        message = "Name must be between 1 and 50 characters"
    ))]
    #[schema(example = "João")]
    pub name: String,

    #[validate(length(
        min = 1,
        max = 11,
        message = "CPF must be between 1 and 11 characters"
    ))]
    #[schema(example = "12345678901")]
    pub cpf: String,

    #[serde(rename = "idade")]
    #[schema(example = 25)]
    pub age: i32,

    #[serde(rename = "peso", with = "rust_decimal::serde::float")]
    #[validate(custom(function = "validate_positive"))]
    #[schema(value_type = f64, example = 75.5)]
    pub weight: Decimal,

    #[serde(rename = "altura", with = "rust_decimal::serde::float")]
    #[validate(custom(function = "validate_positive"))]
    #[schema(value_type = f64, example = 1.70)]
    pub height: Decimal,

    #[serde(rename = "sexo")]
    #[validate(length(equal = 1, message = "Sex must be a single character"))]
    #[schema(example = "M")]
    pub sex: String,

    #[serde(rename = "categoria")]
    #[validate(nested)]
    pub category: CategoryRef,

    #[serde(rename = "centro_treinamento")]
    #[validate(nested)]
    pub training_center: TrainingCenterRef,
}

/// Partial update payload. Only the fields present in the request are
/// applied; everything else keeps its stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateAthleteRequest {
    #[serde(rename = "nome", default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 50))]
    pub name: Option<String>,

    #[serde(rename = "idade", default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,

    #[serde(
        rename = "peso",
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[validate(custom(function = "validate_positive"))]
    #[schema(value_type = Option<f64>)]
    pub weight: Option<Decimal>,

    #[serde(
        rename = "altura",
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[validate(custom(function = "validate_positive"))]
    #[schema(value_type = Option<f64>)]
    pub height: Option<Decimal>,

    #[serde(rename = "sexo", default, skip_serializing_if = "Option::is_none")]
    #[validate(length(equal = 1))]
    pub sex: Option<String>,
}

/// Full athlete representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AthleteResponse {
    pub id: Uuid,
    #[serde(rename = "nome")]
    pub name: String,
    pub cpf: String,
    #[serde(rename = "idade")]
    pub age: i32,
    #[serde(rename = "peso", with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub weight: Decimal,
    #[serde(rename = "altura", with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub height: Decimal,
    #[serde(rename = "sexo")]
    pub sex: String,
    #[serde(rename = "categoria")]
    pub category: CategoryRef,
    #[serde(rename = "centro_treinamento")]
    pub training_center: TrainingCenterRef,
    pub created_at: NaiveDateTime,
}

/// Reduced projection returned when listing athletes without filters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AthleteSummary {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "categoria")]
    pub category: CategoryRef,
    #[serde(rename = "centro_treinamento")]
    pub training_center: TrainingCenterRef,
}

/// Query string accepted by the athlete listing
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AthleteListParams {
    /// Substring of the athlete name
    #[serde(rename = "nome")]
    pub name: Option<String>,
    /// Exact CPF
    pub cpf: Option<String>,
}

/// Listing result; the shape depends on whether a filter was supplied
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum AthleteListResponse {
    Filtered(Vec<AthleteResponse>),
    Summaries(Vec<AthleteSummary>),
}

fn validate_positive(value: &Decimal) -> Result<(), validator::ValidationError> {
    if *value > Decimal::ZERO {
        Ok(())
    } else {
        Err(validator::ValidationError::new("must_be_positive"))
    }
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

impl AthleteListParams {
    pub fn name(&self) -> Option<&str> {
        non_empty(self.name.as_ref())
    }

    pub fn cpf(&self) -> Option<&str> {
        non_empty(self.cpf.as_ref())
    }

    pub fn has_filter(&self) -> bool {
        self.name().is_some() || self.cpf().is_some()
    }
}

impl AthleteListResponse {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Filtered(athletes) => athletes.is_empty(),
            Self::Summaries(summaries) => summaries.is_empty(),
        }
    }
}

impl UpdateAthleteRequest {
    /// Merge the present fields into `athlete`
    pub fn apply(&self, athlete: &mut Athlete) {
        if let Some(name) = &self.name {
            athlete.name = name.clone();
        }
        if let Some(age) = self.age {
            athlete.age = age;
        }
        if let Some(weight) = self.weight {
            athlete.weight = weight;
        }
        if let Some(height) = self.height {
            athlete.height = height;
        }
        if let Some(sex) = &self.sex {
            athlete.sex = sex.clone();
        }
    }
}

impl AthleteResponse {
    /// Build the response for a freshly created athlete from the caller's
    /// payload, without reading the row back.
    pub fn from_request(id: Uuid, created_at: NaiveDateTime, req: &CreateAthleteRequest) -> Self {
        Self {
            id,
            name: req.name.clone(),
            cpf: req.cpf.clone(),
            age: req.age,
            weight: req.weight,
            height: req.height,
            sex: req.sex.clone(),
            category: req.category.clone(),
            training_center: req.training_center.clone(),
            created_at,
        }
    }
}

impl From<AthleteDetail> for AthleteResponse {
    fn from(detail: AthleteDetail) -> Self {
        let athlete = detail.athlete;
        Self {
            id: athlete.id,
            name: athlete.name,
            cpf: athlete.cpf,
            age: athlete.age,
            weight: athlete.weight,
            height: athlete.height,
            sex: athlete.sex,
            category: CategoryRef {
                name: detail.category_name,
            },
            training_center: TrainingCenterRef {
                name: detail.training_center_name,
            },
            created_at: athlete.created_at,
        }
    }
}

impl From<AthleteDetail> for AthleteSummary {
    fn from(detail: AthleteDetail) -> Self {
        Self {
            name: detail.athlete.name,
            category: CategoryRef {
                name: detail.category_name,
            },
            training_center: TrainingCenterRef {
                name: detail.training_center_name,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn athlete() -> Athlete {
        Athlete {
            pk_id: 1,
            id: Uuid::new_v4(),
            name: "João".to_string(),
            cpf: "12345678901".to_string(),
            age: 25,
            weight: Decimal::new(755, 1),
            height: Decimal::new(170, 2),
            sex: "M".to_string(),
            created_at: Utc::now().naive_utc(),
            category_id: 1,
            training_center_id: 2,
        }
    }

    fn create_request() -> CreateAthleteRequest {
        serde_json::from_str(
            r#"{
                "nome": "João",
                "cpf": "12345678901",
                "idade": 25,
                "peso": 75.5,
                "altura": 1.75,
                "sexo": "M",
                "categoria": {"nome": "Scale"},
                "centro_treinamento": {"nome": "CT King"}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn create_request_parses_numeric_measurements() {
        let req = create_request();
        assert_eq!(req.weight, Decimal::new(755, 1));
        assert_eq!(req.height, Decimal::new(175, 2));
        assert_eq!(req.category.name, "Scale");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn non_positive_weight_is_rejected() {
        let mut req = create_request();
        req.weight = Decimal::ZERO;
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("weight"));
    }

    #[test]
    fn sex_must_be_a_single_character() {
        let mut req = create_request();
        req.sex = "MX".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn nested_category_name_is_validated() {
        let mut req = create_request();
        req.category.name = "Way too long".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn update_with_only_age_leaves_other_fields_untouched() {
        let original = athlete();
        let mut updated = original.clone();
        let patch: UpdateAthleteRequest = serde_json::from_str(r#"{"idade": 30}"#).unwrap();

        patch.apply(&mut updated);

        assert_eq!(updated.age, 30);
        assert_eq!(updated.name, original.name);
        assert_eq!(updated.cpf, original.cpf);
        assert_eq!(updated.weight, original.weight);
        assert_eq!(updated.height, original.height);
        assert_eq!(updated.sex, original.sex);
    }

    #[test]
    fn update_ignores_cpf_in_payload() {
        let original = athlete();
        let mut updated = original.clone();
        let patch: UpdateAthleteRequest =
            serde_json::from_str(r#"{"cpf": "99999999999", "peso": 80.25}"#).unwrap();

        patch.apply(&mut updated);

        assert_eq!(updated.cpf, original.cpf);
        assert_eq!(updated.weight, Decimal::new(8025, 2));
    }

    #[test]
    fn update_validates_present_fields_only() {
        let empty = UpdateAthleteRequest::default();
        assert!(empty.validate().is_ok());

        let negative = UpdateAthleteRequest {
            height: Some(Decimal::new(-1, 0)),
            ..Default::default()
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn empty_filters_count_as_absent() {
        let params = AthleteListParams {
            name: Some(String::new()),
            cpf: None,
        };
        assert!(!params.has_filter());

        let params = AthleteListParams {
            name: None,
            cpf: Some("123".to_string()),
        };
        assert!(params.has_filter());
        assert_eq!(params.cpf(), Some("123"));
    }

    #[test]
    fn summary_serializes_only_name_and_references() {
        let summary = AthleteSummary::from(AthleteDetail {
            athlete: athlete(),
            category_name: "Scale".to_string(),
            training_center_name: "CT King".to_string(),
        });
        let json = serde_json::to_value(&summary).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();

        assert_eq!(keys.len(), 3);
        assert_eq!(json["nome"], "João");
        assert_eq!(json["categoria"]["nome"], "Scale");
        assert_eq!(json["centro_treinamento"]["nome"], "CT King");
    }

    #[test]
    fn response_serializes_measurements_as_numbers() {
        let response = AthleteResponse::from_request(
            Uuid::new_v4(),
            Utc::now().naive_utc(),
            &create_request(),
        );
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["peso"], 75.5);
        assert_eq!(json["altura"], 1.75);
        assert_eq!(json["idade"], 25);
    }
}
