// Binding pipe: decode a request body and validate it in one step

use crate::errors::{ERR_CONTENT_TYPE, ERR_DESERIALIZATION, ERR_PAYLOAD_TOO_LARGE};
use crate::{BindingConfig, Errors, Field, validate};
use serde::de::DeserializeOwned;
use tagbind_core::{Error, HttpRequest, HttpResponse, HttpStatus};
use tracing::debug;

/// Validation pipe for handlers that take a JSON body.
#[derive(Debug, Clone, Default)]
pub struct BindingPipe {
    config: BindingConfig,
}

impl BindingPipe {
    pub fn new(config: BindingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BindingConfig {
        &self.config
    }

    /// Decode the request body as JSON into `T` and validate it.
    ///
    /// Media type, size and decoding problems come back as a single error
    /// classified [`ERR_CONTENT_TYPE`], [`ERR_PAYLOAD_TOO_LARGE`] or
    /// [`ERR_DESERIALIZATION`]; otherwise the result of [`validate`].
    ///
    /// A key missing from the body is a decoding error unless the field
    /// carries `#[serde(default)]`. Mark fields with it when a missing key
    /// should be reported by their `Required` rule instead.
    pub fn bind_json<T>(&self, req: &HttpRequest) -> Result<T, Errors>
    where
        T: DeserializeOwned + Field,
    {
        if self.config.require_json_content_type && req.content_type() != Some("application/json") {
            debug!(content_type = ?req.content_type(), "rejecting non-JSON body");
            return Err(Errors::single(
                Vec::<String>::new(),
                ERR_CONTENT_TYPE,
                "Unsupported Content-Type",
            ));
        }

        if req.body.len() > self.config.max_body_bytes {
            return Err(Errors::single(
                Vec::<String>::new(),
                ERR_PAYLOAD_TOO_LARGE,
                format!(
                    "Request body exceeds {} bytes",
                    self.config.max_body_bytes
                ),
            ));
        }

        let mut data: T = serde_json::from_slice(&req.body).map_err(|e| {
            Errors::single(Vec::<String>::new(), ERR_DESERIALIZATION, e.to_string())
        })?;

        self.validate_request(req, &mut data)?;
        Ok(data)
    }

    /// Validate already-decoded data, turning a non-empty result into `Err`.
    pub fn validate_request<D>(&self, req: &HttpRequest, data: &mut D) -> Result<(), Errors>
    where
        D: Field + ?Sized,
    {
        let errors = validate(req, data);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Status for a set of errors: 415, 413 and 400 for body problems, the
    /// configured status for rule failures.
    pub fn status_for(&self, errors: &Errors) -> u16 {
        if errors.has(ERR_CONTENT_TYPE) {
            HttpStatus::UnsupportedMediaType.code()
        } else if errors.has(ERR_PAYLOAD_TOO_LARGE) {
            HttpStatus::PayloadTooLarge.code()
        } else if errors.has(ERR_DESERIALIZATION) {
            HttpStatus::BadRequest.code()
        } else {
            self.config.error_status
        }
    }

    /// Transform validation errors to an HTTP response with a JSON array body.
    pub fn error_response(&self, errors: &Errors) -> HttpResponse {
        let status = self.status_for(errors);
        match HttpResponse::new(status).with_json(errors) {
            Ok(response) => response,
            Err(e) => HttpResponse::new(HttpStatus::InternalServerError.code())
                .with_body(e.to_string().into_bytes()),
        }
    }

    /// Framework error for handlers that propagate with `?`.
    pub fn into_error(errors: &Errors) -> Error {
        if errors.has(ERR_CONTENT_TYPE) {
            Error::UnsupportedMediaType(errors.to_string())
        } else if errors.has(ERR_PAYLOAD_TOO_LARGE) {
            Error::PayloadTooLarge(errors.to_string())
        } else if errors.has(ERR_DESERIALIZATION) {
            Error::Deserialization(errors.to_string())
        } else {
            Error::Validation(errors.to_string())
        }
    }
}
