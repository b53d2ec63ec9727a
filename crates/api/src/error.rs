use actix_web::{
    http::{header, StatusCode},
    HttpResponse,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KuratorError {
    #[error("Invalid data provided: Error message: `{0}`")]
    BadClientData(String),
    #[error("Unauthorized request. Error message: `{0}`")]
    Unauthorized(String),
    #[error("404 Not found. Error message: `{0}`")]
    NotFound(String),
    #[error("The data store is unavailable, please try again later")]
    StoreUnavailable,
}

impl actix_web::error::ResponseError for KuratorError {
    fn status_code(&self) -> StatusCode {
        match *self {
            Self::BadClientData(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header((header::CONTENT_TYPE, "text/html; charset=utf-8"))
            .body(self.to_string())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn it_maps_errors_to_status_codes() {
        assert_eq!(
            KuratorError::StoreUnavailable.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            KuratorError::BadClientData("negative".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            KuratorError::Unauthorized("no key".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            KuratorError::NotFound("round".into()).error_response().status(),
            StatusCode::NOT_FOUND
        );
    }
}
