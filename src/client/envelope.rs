//! Response envelopes. The backend wraps every payload in the same
//! `{ success, message, data, errors }` object; failures produced on this side
//! of the wire use the same shape so callers only ever inspect one type.

use super::error::{ClientError, FailureKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Field name → validation messages.
pub type FieldErrors = HashMap<String, Vec<String>>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
    /// How a failed call failed. Never sent over the wire.
    #[serde(skip)]
    pub failure: Option<FailureKind>,
}

impl<T> Envelope<T> {
    #[must_use]
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            errors: None,
            failure: None,
        }
    }

    #[must_use]
    pub fn failed(kind: FailureKind, message: impl Into<String>, errors: Option<FieldErrors>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            errors,
            failure: Some(kind),
        }
    }

    /// `data` of a successful envelope.
    #[must_use]
    pub fn into_data(self) -> Option<T> {
        if self.success { self.data } else { None }
    }

    /// Messages for one form field, empty when there are none.
    #[must_use]
    pub fn field_errors(&self, field: &str) -> &[String] {
        self.errors
            .as_ref()
            .and_then(|errors| errors.get(field))
            .map_or(&[][..], Vec::as_slice)
    }

    /// Envelope for a call that produced no usable response.
    #[must_use]
    pub fn from_error(err: &ClientError) -> Self {
        Self::failed(err.kind(), err.to_string(), err.field_errors().cloned())
    }

}

/// Pagination block attached to list responses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub current_page: u64,
    pub last_page: u64,
    pub per_page: u64,
    pub total: u64,
}

/// [`Envelope`] over a list with optional pagination metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PagedEnvelope<T> {
    #[serde(flatten)]
    pub envelope: Envelope<Vec<T>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
    /// Summary counters the staff applicant list sends next to `meta`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<serde_json::Value>,
}

impl<T> std::ops::Deref for PagedEnvelope<T> {
    type Target = Envelope<Vec<T>>;

    fn deref(&self) -> &Self::Target {
        &self.envelope
    }
}

/// Shapes the client can decode a response into, and build a failure of.
pub trait ResponseEnvelope: serde::de::DeserializeOwned {
    fn from_failure(err: &ClientError) -> Self;

    /// Attaches a failure class to an envelope the backend itself reported as
    /// unsuccessful on a 2xx response.
    fn classify_failure(&mut self);
}

impl<T: serde::de::DeserializeOwned> ResponseEnvelope for Envelope<T> {
    fn from_failure(err: &ClientError) -> Self {
        Self::from_error(err)
    }

    fn classify_failure(&mut self) {
        if self.success || self.failure.is_some() {
            return;
        }
        self.failure = Some(if self.errors.is_some() {
            FailureKind::Validation
        } else {
            FailureKind::Server
        });
    }
}

impl<T: serde::de::DeserializeOwned> ResponseEnvelope for PagedEnvelope<T> {
    fn from_failure(err: &ClientError) -> Self {
        Self {
            envelope: Envelope::from_error(err),
            meta: None,
            statistics: None,
        }
    }

    fn classify_failure(&mut self) {
        self.envelope.classify_failure();
    }
}
