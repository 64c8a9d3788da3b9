//! branchfinder-web
//! ================
//!
//! A single-page web front end for `branchfinder-core`: one search box, the
//! latest result, and a sidebar with the session's search history.
//!
//! Routes
//! ------
//!
//! - `GET /` renders the page for the caller's session
//! - `POST /search` runs a query (form field `query`) and redirects back
//! - `POST /clear` empties the caller's history and redirects back
//!
//! Sessions are keyed by the `bf_session` cookie, created on the first `POST`
//! and kept in memory only. Idle sessions expire after [`app::SESSION_IDLE`]
//! and at most [`app::MAX_SESSIONS`] are kept.

pub mod app;
pub mod page;

pub use app::{router, AppState, SharedGeocoder};
