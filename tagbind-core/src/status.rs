// HTTP Status Codes

/// The subset of HTTP status codes produced by request binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpStatus {
    Ok = 200,
    BadRequest = 400,
    PayloadTooLarge = 413,
    UnsupportedMediaType = 415,
    UnprocessableEntity = 422,
    InternalServerError = 500,
}

impl HttpStatus {
    /// Numeric status code.
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Canonical reason phrase.
    pub fn reason(&self) -> &'static str {
        match self {
            HttpStatus::Ok => "OK",
            HttpStatus::BadRequest => "Bad Request",
            HttpStatus::PayloadTooLarge => "Payload Too Large",
            HttpStatus::UnsupportedMediaType => "Unsupported Media Type",
            HttpStatus::UnprocessableEntity => "Unprocessable Entity",
            HttpStatus::InternalServerError => "Internal Server Error",
        }
    }

    /// Look up a status by numeric code.
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            200 => Some(HttpStatus::Ok),
            400 => Some(HttpStatus::BadRequest),
            413 => Some(HttpStatus::PayloadTooLarge),
            415 => Some(HttpStatus::UnsupportedMediaType),
            422 => Some(HttpStatus::UnprocessableEntity),
            500 => Some(HttpStatus::InternalServerError),
            _ => None,
        }
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.code())
    }
}

impl std::fmt::Display for HttpStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.code(), self.reason())
    }
}
