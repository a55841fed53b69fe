use assault_http::HttpTransportErrorKind;

/// Status code recorded for a request that never produced an HTTP response.
pub const SENTINEL_STATUS: u16 = 0;

/// Outcome of a single request attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequestRecord {
    /// HTTP status code, or [`SENTINEL_STATUS`] on transport failure.
    pub status_code: u16,
    /// Seconds from request start until the response (or the error) arrived.
    pub request_time: f64,
    pub transport_error: Option<HttpTransportErrorKind>,
}

impl RequestRecord {
    #[must_use]
    pub fn new(status_code: u16, request_time: f64) -> Self {
        Self {
            status_code,
            request_time,
            transport_error: None,
        }
    }

    #[must_use]
    pub fn failed(kind: HttpTransportErrorKind, request_time: f64) -> Self {
        Self {
            status_code: SENTINEL_STATUS,
            request_time,
            transport_error: Some(kind),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status_code)
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        if self.transport_error.is_some() || self.status_code == SENTINEL_STATUS {
            return Outcome::TransportFailure;
        }

        match self.status_code {
            100..=199 => Outcome::Informational,
            200..=299 => Outcome::Success,
            300..=399 => Outcome::Redirect,
            400..=499 => Outcome::ClientError,
            500..=599 => Outcome::ServerError,
            _ => Outcome::Unknown,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum Outcome {
    Success,
    Informational,
    Redirect,
    ClientError,
    ServerError,
    /// Status outside 100..=599 that still came back as an HTTP response.
    Unknown,
    TransportFailure,
}
