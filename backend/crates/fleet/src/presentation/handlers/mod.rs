//! HTTP Handlers
//!
//! One module per record type. Successful writes answer with a 303 redirect
//! to the listing page carrying a flash cookie; listing pages consume it.

pub mod cars;
pub mod customers;
pub mod dashboard;
pub mod rentals;
pub mod services;

use std::sync::Arc;

use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{AppendHeaders, IntoResponse, Redirect, Response};
use kernel::id::Id;
use platform::cookie::extract_cookie;
use platform::flash::Flash;
use serde::Serialize;

use crate::application::config::FleetConfig;
use crate::domain::repository::FleetRepository;
use crate::error::{FleetError, FleetResult};
use crate::presentation::view_model::PageView;
use crate::presentation::views::Views;

/// Shared state for fleet handlers
#[derive(Clone)]
pub struct FleetAppState<R>
where
    R: FleetRepository,
{
    pub repo: Arc<R>,
    pub views: Arc<Views>,
    pub config: Arc<FleetConfig>,
}

impl<R> FleetAppState<R>
where
    R: FleetRepository,
{
    /// Render a page with an explicit status (form re-display uses 422)
    pub(crate) fn render<T: Serialize>(
        &self,
        status: StatusCode,
        template: &str,
        page: &PageView<T>,
    ) -> FleetResult<Response> {
        let html = self.views.render(template, page)?;
        Ok((status, html).into_response())
    }

    /// Render a page that shows and clears the pending flash message
    pub(crate) fn render_with_flash<T: Serialize>(
        &self,
        headers: &HeaderMap,
        template: &str,
        page: PageView<T>,
    ) -> FleetResult<Response> {
        let cookie = self.config.flash_cookie();
        let pending = extract_cookie(headers, &cookie.name).is_some_and(|v| !v.is_empty());
        let page = page.with_flash(Flash::from_headers(headers, &cookie.name));

        let html = self.views.render(template, &page)?;
        let clear = pending.then(|| (header::SET_COOKIE, cookie.build_delete_cookie()));

        Ok((AppendHeaders(clear), html).into_response())
    }

    /// 303 to `to`, carrying `flash` to the next page
    pub(crate) fn redirect(&self, to: &str, flash: Flash) -> Response {
        let set_cookie = self.config.flash_cookie().build_set_cookie(&flash.encode());
        ([(header::SET_COOKIE, set_cookie)], Redirect::to(to)).into_response()
    }
}

/// Parse an `{id}` path segment; anything that is not a positive key is a 404
pub(crate) fn parse_id<T>(raw: &str) -> FleetResult<Id<T>> {
    raw.parse().map_err(|_| FleetError::InvalidId(raw.to_string()))
}
