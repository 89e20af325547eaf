//! Named entity recognition handler
//!
//! Author: hephaex@gmail.com

use crate::error::AppError;
use crate::state::AppState;
use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request, State},
    http::header,
    Form, Json,
};
use ner_core::{EntityMap, EntityType};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

/// Top-level key of the response body
pub const NER_TAG_KEY: &str = "ner";

/// Name of the form field carrying the input text
pub const TEXT_FIELD: &str = "text";

/// Form request body, urlencoded or multipart
#[derive(Debug, Deserialize, ToSchema)]
pub struct NerForm {
    /// Text to tag
    #[schema(example = "Patrick lives in Bikini Bottom.")]
    pub text: Option<String>,
}

/// A single detected entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NerEntity {
    /// Entity mention
    #[schema(example = "Patrick")]
    pub name: String,

    /// Entity type tag
    #[serde(rename = "type")]
    #[schema(value_type = String, example = "PERSON")]
    pub entity_type: EntityType,
}

/// Response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NerResponse {
    pub ner: Vec<NerEntity>,
}

impl From<EntityMap> for NerResponse {
    fn from(entities: EntityMap) -> Self {
        Self {
            ner: entities
                .into_iter()
                .map(|(name, entity_type)| NerEntity { name, entity_type })
                .collect(),
        }
    }
}

/// The `text` field of a form body.
///
/// Accepts `application/x-www-form-urlencoded` and `multipart/form-data`. When
/// the field is repeated the first value is used.
#[derive(Debug, Clone, PartialEq)]
pub struct FormText(pub String);

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.trim_start().to_ascii_lowercase().starts_with("multipart/form-data"))
        .unwrap_or(false)
}

fn missing_text() -> AppError {
    AppError::BadRequest(format!("missing form field `{TEXT_FIELD}`"))
}

#[async_trait]
impl<S> FromRequest<S> for FormText
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_multipart(&req) {
            let mut multipart = Multipart::from_request(req, state)
                .await
                .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

            while let Some(field) = multipart
                .next_field()
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?
            {
                if field.name() == Some(TEXT_FIELD) {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.body_text()))?;
                    return Ok(Self(text));
                }
            }

            return Err(missing_text());
        }

        let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        pairs
            .into_iter()
            .find(|(key, _)| key == TEXT_FIELD)
            .map(|(_, value)| Self(value))
            .ok_or_else(missing_text)
    }
}

/// Perform named entity recognition on text passed as form data
#[utoipa::path(
    post,
    path = "/ner",
    tag = "ner",
    request_body(
        content = NerForm,
        content_type = "application/x-www-form-urlencoded",
        description = "Form with a `text` field; multipart/form-data is also accepted"
    ),
    responses(
        (status = 200, description = "Entities detected in the text", body = NerResponse),
        (status = 400, description = "Missing or malformed `text` field", body = crate::error::ApiError),
        (status = 500, description = "Tagger failure", body = crate::error::ApiError)
    )
)]
pub async fn ner_handler(
    State(state): State<Arc<AppState>>,
    FormText(text): FormText,
) -> Result<Json<NerResponse>, AppError> {
    let entities = state.tagger.get_entities(&text)?;
    tracing::debug!(
        chars = text.chars().count(),
        entities = entities.len(),
        "Tagged text"
    );

    Ok(Json(NerResponse::from(entities)))
}
