//! # Tax Code API
//!
//! - **POST `/api/v1/taxcode:calculate-tax-code`**: compute the tax code of
//!   a person
//! - **POST `/api/v1/taxcode:calculate-person-data`**: decode a tax code
//!
//! Request and response bodies use camelCase property names. Every field of
//! a request is optional at the serde level so that missing properties are
//! reported as validation violations together with the other problems,
//! rather than as a parse failure.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use taxcode_core::{Person, Sex, TaxCode};
use utoipa::ToSchema;

use crate::error::{AppError, FieldViolation};
use crate::extractors::{extract_validated_json, required_text, Validate};
use crate::state::AppState;

pub const CALCULATE_TAX_CODE_PATH: &str = "/api/v1/taxcode:calculate-tax-code";
pub const CALCULATE_PERSON_DATA_PATH: &str = "/api/v1/taxcode:calculate-person-data";

// ---------------------------------------------------------------------------
// Request / Response types
// ---------------------------------------------------------------------------

/// Gender as exchanged over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Unspecified,
    Male,
    Female,
}

impl From<Sex> for Gender {
    fn from(sex: Sex) -> Self {
        match sex {
            Sex::Male => Self::Male,
            Sex::Female => Self::Female,
        }
    }
}

/// Person data to compute a tax code from.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalculateTaxCodeRequest {
    /// `MALE` or `FEMALE`.
    pub gender: Option<Gender>,
    /// Given name.
    pub name: Option<String>,
    /// Family name.
    pub surname: Option<String>,
    /// Birth date (YYYY-MM-DD), strictly in the past.
    pub date_of_birth: Option<NaiveDate>,
    /// Municipality or foreign country of birth.
    pub birth_place: Option<String>,
    /// Province abbreviation, `EE` for foreign countries.
    pub province: Option<String>,
}

impl CalculateTaxCodeRequest {
    /// Validate against an explicit "today".
    pub fn validate_on(&self, today: NaiveDate) -> Result<Person, Vec<FieldViolation>> {
        let mut violations = Vec::new();

        let name = required_text("name", self.name.as_deref(), &mut violations);
        let surname = required_text("surname", self.surname.as_deref(), &mut violations);
        let birth_place = required_text("birthPlace", self.birth_place.as_deref(), &mut violations);
        let province = required_text("province", self.province.as_deref(), &mut violations);

        let birth_date = match self.date_of_birth {
            Some(date) if date < today => Some(date),
            _ => {
                violations.push(FieldViolation::not_in_past("dateOfBirth"));
                None
            }
        };

        let sex = match self.gender {
            Some(Gender::Male) => Some(Sex::Male),
            Some(Gender::Female) => Some(Sex::Female),
            Some(Gender::Unspecified) | None => {
                violations.push(FieldViolation::invalid("gender"));
                None
            }
        };

        match (name, surname, birth_place, province, birth_date, sex) {
            (Some(name), Some(surname), Some(place), Some(province), Some(date), Some(sex))
                if violations.is_empty() =>
            {
                Ok(Person {
                    given_name: name.to_string(),
                    family_name: surname.to_string(),
                    sex,
                    birth_date: date,
                    birth_place: place.to_string(),
                    birth_province: province.to_string(),
                })
            }
            _ => Err(violations),
        }
    }
}

impl Validate for CalculateTaxCodeRequest {
    type Output = Person;

    fn validate(&self) -> Result<Person, Vec<FieldViolation>> {
        self.validate_on(Utc::now().date_naive())
    }
}

/// The computed tax code.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalculateTaxCodeResponse {
    pub tax_code: String,
}

/// A tax code to decode.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalculatePersonDataRequest {
    /// 16-character tax code. Lower case is accepted.
    pub tax_code: Option<String>,
}

impl Validate for CalculatePersonDataRequest {
    type Output = TaxCode;

    fn validate(&self) -> Result<TaxCode, Vec<FieldViolation>> {
        let mut violations = Vec::new();
        let raw = required_text("taxCode", self.tax_code.as_deref(), &mut violations)
            .ok_or(violations)?;
        TaxCode::new(raw).map_err(|_| vec![FieldViolation::invalid("taxCode")])
    }
}

/// Data recovered from a tax code.
///
/// `name` and `surname` are the 3-letter fragments carried by the code.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalculatePersonDataResponse {
    pub gender: Gender,
    pub name: String,
    pub surname: String,
    pub date_of_birth: NaiveDate,
    pub birth_place: String,
    pub province: String,
    pub tax_code: String,
}

impl CalculatePersonDataResponse {
    fn new(person: Person, code: &TaxCode) -> Self {
        Self {
            gender: person.sex.into(),
            name: person.given_name,
            surname: person.family_name,
            date_of_birth: person.birth_date,
            birth_place: person.birth_place.to_uppercase(),
            province: person.birth_province.to_uppercase(),
            tax_code: code.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the tax code router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(CALCULATE_TAX_CODE_PATH, post(calculate_tax_code))
        .route(CALCULATE_PERSON_DATA_PATH, post(calculate_person_data))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/taxcode:calculate-tax-code: Compute a tax code.
#[utoipa::path(
    post,
    path = "/api/v1/taxcode:calculate-tax-code",
    request_body = CalculateTaxCodeRequest,
    responses(
        (status = 200, description = "Tax code computed", body = CalculateTaxCodeResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorBody),
        (status = 404, description = "Unknown birth place", body = crate::error::ErrorBody),
    ),
    tag = "taxcode"
)]
pub async fn calculate_tax_code(
    State(state): State<AppState>,
    body: Result<Json<CalculateTaxCodeRequest>, JsonRejection>,
) -> Result<Json<CalculateTaxCodeResponse>, AppError> {
    let person = extract_validated_json(body)?;
    let code = state.encoder.encode(&person)?;
    tracing::debug!(tax_code = %code, "tax code computed");
    Ok(Json(CalculateTaxCodeResponse {
        tax_code: code.to_string(),
    }))
}

/// POST /api/v1/taxcode:calculate-person-data: Decode a tax code.
#[utoipa::path(
    post,
    path = "/api/v1/taxcode:calculate-person-data",
    request_body = CalculatePersonDataRequest,
    responses(
        (status = 200, description = "Tax code decoded", body = CalculatePersonDataResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorBody),
        (status = 404, description = "Unknown place code", body = crate::error::ErrorBody),
        (status = 422, description = "Code names no valid person", body = crate::error::ErrorBody),
    ),
    tag = "taxcode"
)]
pub async fn calculate_person_data(
    State(state): State<AppState>,
    body: Result<Json<CalculatePersonDataRequest>, JsonRejection>,
) -> Result<Json<CalculatePersonDataResponse>, AppError> {
    let code = extract_validated_json(body)?;
    let person = state.decoder.decode(&code)?;
    Ok(Json(CalculatePersonDataResponse::new(person, &code)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn valid_request() -> CalculateTaxCodeRequest {
        CalculateTaxCodeRequest {
            gender: Some(Gender::Male),
            name: Some("Alessandro".into()),
            surname: Some("Bagnoli".into()),
            date_of_birth: NaiveDate::from_ymd_opt(1993, 9, 19),
            birth_place: Some("Rimini".into()),
            province: Some("RN".into()),
        }
    }

    fn fields(violations: &[FieldViolation]) -> Vec<&str> {
        violations.iter().map(|v| v.field.as_str()).collect()
    }

    #[test]
    fn valid_request_builds_person() {
        let person = valid_request().validate_on(today()).unwrap();
        assert_eq!(person.given_name, "Alessandro");
        assert_eq!(person.family_name, "Bagnoli");
        assert_eq!(person.sex, Sex::Male);
        assert_eq!(person.birth_province, "RN");
    }

    #[test]
    fn empty_request_reports_every_field() {
        let violations = CalculateTaxCodeRequest::default()
            .validate_on(today())
            .unwrap_err();
        assert_eq!(
            fields(&violations),
            ["name", "surname", "birthPlace", "province", "dateOfBirth", "gender"]
        );
    }

    #[test]
    fn blank_strings_are_missing() {
        let req = CalculateTaxCodeRequest {
            surname: Some("  ".into()),
            ..valid_request()
        };
        let violations = req.validate_on(today()).unwrap_err();
        assert_eq!(violations, [FieldViolation::required("surname")]);
    }

    #[test]
    fn birth_date_must_be_before_today() {
        for date in [today(), today().succ_opt().unwrap()] {
            let req = CalculateTaxCodeRequest {
                date_of_birth: Some(date),
                ..valid_request()
            };
            assert_eq!(
                req.validate_on(today()).unwrap_err(),
                [FieldViolation::not_in_past("dateOfBirth")]
            );
        }
    }

    #[test]
    fn unspecified_gender_is_invalid() {
        let req = CalculateTaxCodeRequest {
            gender: Some(Gender::Unspecified),
            ..valid_request()
        };
        assert_eq!(
            req.validate_on(today()).unwrap_err(),
            [FieldViolation::invalid("gender")]
        );
    }

    #[test]
    fn request_uses_camel_case() {
        let req: CalculateTaxCodeRequest = serde_json::from_str(
            r#"{"gender":"FEMALE","name":"F","surname":"F","dateOfBirth":"1993-09-19","birthPlace":"Rimini","province":"RN"}"#,
        )
        .unwrap();
        assert_eq!(req.gender, Some(Gender::Female));
        assert_eq!(req.birth_place.as_deref(), Some("Rimini"));
        assert_eq!(req.date_of_birth, NaiveDate::from_ymd_opt(1993, 9, 19));
    }

    #[test]
    fn person_data_request_validation() {
        let ok = CalculatePersonDataRequest {
            tax_code: Some(" bgnlsn93p19h294l ".into()),
        };
        assert_eq!(ok.validate().unwrap().as_str(), "BGNLSN93P19H294L");

        let missing = CalculatePersonDataRequest::default();
        assert_eq!(
            missing.validate().unwrap_err(),
            [FieldViolation::required("taxCode")]
        );

        let malformed = CalculatePersonDataRequest {
            tax_code: Some("BGNLSN93X19H294L".into()),
        };
        assert_eq!(
            malformed.validate().unwrap_err(),
            [FieldViolation::invalid("taxCode")]
        );
    }

    #[test]
    fn response_upper_cases_place() {
        let code = TaxCode::new("BGNLSN93P19H294L").unwrap();
        let person = Person {
            given_name: "LSN".into(),
            family_name: "BGN".into(),
            sex: Sex::Male,
            birth_date: NaiveDate::from_ymd_opt(1993, 9, 19).unwrap(),
            birth_place: "Rimini".into(),
            birth_province: "rn".into(),
        };
        let json = serde_json::to_value(CalculatePersonDataResponse::new(person, &code)).unwrap();
        assert_eq!(json["birthPlace"], "RIMINI");
        assert_eq!(json["province"], "RN");
        assert_eq!(json["gender"], "MALE");
        assert_eq!(json["dateOfBirth"], "1993-09-19");
        assert_eq!(json["taxCode"], "BGNLSN93P19H294L");
    }
}
