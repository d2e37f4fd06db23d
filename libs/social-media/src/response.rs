use crate::SocialMediaError;

pub(crate) type Response<T> = Result<T, SocialMediaError>;

pub(crate) trait IntoResponse<T> {
    fn into_response(self, message: &str) -> Response<T>;
}

impl<T> IntoResponse<T> for Result<T, reqwest::Error> {
    fn into_response(self, message: &str) -> Response<T> {
        self.map_err(|e| SocialMediaError::ReqwestError {
            source: e,
            message: message.to_string(),
        })
    }
}

impl<T> IntoResponse<T> for Result<T, serde_json::Error> {
    fn into_response(self, message: &str) -> Response<T> {
        self.map_err(|e| SocialMediaError::SerdeJsonError {
            source: e,
            message: message.to_string(),
        })
    }
}

impl<T> IntoResponse<T> for Result<T, reqwest::header::InvalidHeaderValue> {
    fn into_response(self, message: &str) -> Response<T> {
        self.map_err(|e| SocialMediaError::InvalidHeaderValue {
            source: e,
            message: message.to_string(),
        })
    }
}
