//! Response rendering

use std::borrow::Cow;

use reqwest::StatusCode;

/// A fully read HTTP response
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    /// Raw body bytes, not decoded
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// The body verbatim, or a status message when the body is empty
    pub fn render(&self) -> Cow<'_, [u8]> {
        if self.body.is_empty() {
            Cow::Owned(interpret_status(self.status).into_bytes())
        } else {
            Cow::Borrowed(&self.body)
        }
    }
}

/// Human-readable message for a response that carried no body
pub fn interpret_status(status: StatusCode) -> String {
    let message = match status.as_u16() {
        200 => "Operation completed successfully.",
        201 => "Resource created successfully.",
        202 => "Request accepted, processing in progress.",
        204 => "Operation completed successfully, no content to display.",
        301 => "The resource has been moved permanently to a new URL.",
        302 => "The resource is temporarily located at a different URL.",
        304 => "The resource has not been modified since the last request.",
        400 => "The request was invalid. Please check the input data.",
        401 => "Authorization required or token is invalid.",
        403 => "You do not have permission to access this resource.",
        404 => "The resource could not be found.",
        405 => "The HTTP method used is not allowed for this resource.",
        408 => "The server timed out waiting for the request.",
        409 => "There was a conflict with the request, such as duplicate data.",
        410 => "The resource is no longer available.",
        413 => "The request payload is too large to be processed.",
        415 => "The media type of the request is not supported.",
        429 => "Too many requests have been made in a short period. Please try again later.",
        500 => "The server encountered an error.",
        502 => "The server received an invalid response from an upstream server.",
        503 => "The server is temporarily unavailable. Please try again later.",
        504 => "The server did not receive a timely response from an upstream server.",
        code => {
            return match status.canonical_reason() {
                Some(reason) => format!("[{} {}] Unknown status.", code, reason),
                None => format!("[{}] Unknown status.", code),
            }
        }
    };

    format!("[{}] {}", status.as_u16(), message)
}
