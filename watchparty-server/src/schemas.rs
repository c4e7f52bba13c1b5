use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize};
use validator::Validate;

use crate::errors::ServerError;

#[derive(Debug, Validate, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnqueueSchema {
    #[serde(default, alias = "mediaRef")]
    #[validate(length(min = 1))]
    pub video_id: String,
}

pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let extracted_json: Json<T> = Json::from_request(req, state)
            .await
            .map_err(|_| ServerError::BadRequest("JSON parse failed".to_string()))?;

        extracted_json
            .0
            .validate()
            .map_err(|_| ServerError::BadRequest("Request body is invalid".to_string()))?;

        Ok(Self(extracted_json.0))
    }
}
