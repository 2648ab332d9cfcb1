// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

//! Single `IntoResponse` impl mapping every error kind to an HTTP status,
//! plus the OGC `exception` JSON body for 4xx/5xx. `Empty` (204) carries no
//! body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use dggs_core::CoreError;
use dggs_mvt::MvtError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Mvt(#[from] MvtError),

    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    fn http_status(&self) -> u16 {
        match self {
            ApiError::Core(e) => e.http_status(),
            ApiError::Mvt(e) => e.http_status(),
            ApiError::BadRequest(_) => 400,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = self.http_status();

        if status_code == 204 {
            tracing::debug!(error = %self, "request produced no data");
            return StatusCode::NO_CONTENT.into_response();
        }

        let status = StatusCode::from_u16(status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(error = %self, status = status_code, "backend failure");
        } else {
            tracing::warn!(error = %self, status = status_code, "request rejected");
        }

        let body = json!({
            "type": "about:blank",
            "title": status.canonical_reason().unwrap_or("Error"),
            "status": status_code,
            "detail": self.to_string(),
        });

        (status, Json(body)).into_response()
    }
}
