//! Tests for error handling

#[cfg(test)]
mod tests {
    use super::super::types::UploaderError;
    use crate::core::clients::{LoadError, RemoteError, StoreError};
    use actix_web::ResponseError;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;

    // ==================== Helper Function Tests ====================

    #[test]
    fn test_bad_request_helper() {
        let error = UploaderError::bad_request("Invalid JSON");
        assert!(matches!(error, UploaderError::BadRequest(msg) if msg == "Invalid JSON"));
    }

    #[test]
    fn test_config_helper() {
        let error = UploaderError::config("missing url");
        assert_eq!(error.to_string(), "Configuration error: missing url");
    }

    // ==================== Conversion Tests ====================

    #[test]
    fn test_load_error_conversion() {
        let error: UploaderError = LoadError::Parsing("not an array".to_string()).into();
        assert!(matches!(error, UploaderError::Load(_)));
    }

    #[test]
    fn test_store_error_conversion() {
        let error: UploaderError = StoreError::Request("refused".to_string()).into();
        assert!(matches!(error, UploaderError::Store(_)));
    }

    // ==================== Response Tests ====================

    #[test]
    fn test_status_codes() {
        assert_eq!(
            UploaderError::bad_request("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            UploaderError::internal("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            UploaderError::from(StoreError::Request("x".to_string())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            UploaderError::from(RemoteError::api(503, "Service Unavailable")).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            UploaderError::from(RemoteError::timeout("slow")).status_code(),
            StatusCode::REQUEST_TIMEOUT
        );
    }

    #[actix_web::test]
    async fn test_remote_error_body_is_reason() {
        let error = UploaderError::from(RemoteError::api(402, "Payment Required"));
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);
        let body = to_bytes(response.into_body()).await.unwrap();
        assert_eq!(body, "Payment Required");
    }

    #[actix_web::test]
    async fn test_bad_request_body_is_plain_text() {
        let response = UploaderError::bad_request("expected value").error_response();

        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/plain; charset=utf-8"
        );
        let body = to_bytes(response.into_body()).await.unwrap();
        assert_eq!(body, "Bad request: expected value");
    }
}
