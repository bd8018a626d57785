//! HTTP response handling for errors
//!
//! The task scheduler only looks at the status code, so bodies are plain text.

use super::types::UploaderError;
use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError};

impl ResponseError for UploaderError {
    fn status_code(&self) -> StatusCode {
        match self {
            UploaderError::BadRequest(_) => StatusCode::BAD_REQUEST,
            UploaderError::Remote(err) => {
                StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            UploaderError::Remote(err) => err.reason().to_string(),
            UploaderError::Load(_) => "Error loading items from the warehouse".to_string(),
            UploaderError::Store(_) => "Error recording the batch result".to_string(),
            _ => self.to_string(),
        };

        HttpResponse::build(self.status_code())
            .insert_header(ContentType::plaintext())
            .body(body)
    }
}
