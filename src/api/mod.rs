//! # API Module
//!
//! HTTP handlers for the dashboard's web server.
//!
//! ## Endpoints
//!
//! ### Pages
//!
//! - [`home`] - landing page with the project overview and the link that asks
//!   the exporter to refresh the stored data
//! - [`listening_habits`] - top songs and top artists for one sampling window
//! - [`export`] - the de-duplicated track list that becomes a playlist, next
//!   to an embedded player for the latest generated playlist
//!
//! Every page is gated. While a session is logged out and login is required,
//! the page renders the login form in place instead of its content.
//!
//! ### Authentication
//!
//! - [`login_page`] / [`login`] - renders the form and checks submitted
//!   credentials. A successful check redirects back to the page that asked
//!   for it.
//!
//! ### Monitoring
//!
//! - [`health`] - status and version for monitoring systems
//!
//! ## Failures
//!
//! A storage or payload failure aborts the page. [`DashboardError`] converts
//! into a generic failure page, so the server keeps handling other requests.

mod health;
mod login;
mod pages;
pub mod render;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

pub use health::health;
pub use login::{LoginForm, login, login_page, safe_next};
pub use pages::{TermQuery, export, home, listening_habits};

use crate::{error::DashboardError, warning};

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = match self {
            DashboardError::ObjectNotFound(_) => StatusCode::NOT_FOUND,
            DashboardError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        warning!("Request failed: {}", self);
        (status, Html(render::failure_page(status))).into_response()
    }
}
