// crates/branchfinder-web/src/app.rs
use crate::page::{self, Flash, PageContext};
use axum::extract::{Form, State};
use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;
use branchfinder_core::{Finder, Geocoder, History, Session};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

pub type SharedGeocoder = Arc<dyn Geocoder + Send + Sync>;

pub const SESSION_COOKIE: &str = "bf_session";

/// Sessions not seen for this long are dropped.
pub const SESSION_IDLE: Duration = Duration::from_secs(30 * 60);

/// Upper bound on live sessions; the least recently seen one makes room.
pub const MAX_SESSIONS: usize = 10_000;

/// One browser session: its history plus a one-shot message for the next page.
#[derive(Debug)]
pub struct SessionState {
    pub session: Session,
    pub flash: Option<Flash>,
    last_seen: Instant,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            session: Session::default(),
            flash: None,
            last_seen: Instant::now(),
        }
    }
}

type Sessions = HashMap<String, SessionState>;

/// Shared server state. The finder is read-only; sessions are behind a mutex.
///
/// A session is only created by a `POST`. Plain page views from clients
/// without a known cookie render an empty history and store nothing.
#[derive(Clone)]
pub struct AppState {
    finder: Arc<Finder<SharedGeocoder>>,
    dataset_error: Option<Arc<str>>,
    sessions: Arc<Mutex<Sessions>>,
    idle: Duration,
    max_sessions: usize,
}

impl AppState {
    /// `dataset_error` is shown on every page and disables searching.
    pub fn new(finder: Finder<SharedGeocoder>, dataset_error: Option<String>) -> Self {
        Self {
            finder: Arc::new(finder),
            dataset_error: dataset_error.map(Arc::from),
            sessions: Arc::new(Mutex::new(HashMap::new())),
            idle: SESSION_IDLE,
            max_sessions: MAX_SESSIONS,
        }
    }

    /// Overrides the idle timeout and the session cap.
    pub fn with_limits(mut self, idle: Duration, max_sessions: usize) -> Self {
        self.idle = idle;
        self.max_sessions = max_sessions.max(1);
        self
    }

    pub fn finder(&self) -> &Finder<SharedGeocoder> {
        &self.finder
    }

    pub fn session_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, Sessions> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the caller's session id when the cookie names a live session.
    fn known_session(&self, headers: &HeaderMap) -> Option<String> {
        let id = session_id(headers)?;
        let mut sessions = self.lock();
        let state = sessions.get_mut(&id)?;
        if state.last_seen.elapsed() >= self.idle {
            sessions.remove(&id);
            return None;
        }
        state.last_seen = Instant::now();
        Some(id)
    }

    /// Returns the caller's session id, creating a session when the cookie is
    /// missing or unknown. The flag is `true` for a new session.
    fn ensure_session(&self, headers: &HeaderMap) -> (String, bool) {
        if let Some(id) = self.known_session(headers) {
            return (id, false);
        }
        let mut sessions = self.lock();
        self.evict(&mut sessions);
        let id = new_session_id();
        sessions.insert(id.clone(), SessionState::default());
        debug!(sessions = sessions.len(), "new session");
        (id, true)
    }

    /// Drops idle sessions, then the least recently seen ones until there is
    /// room for one more.
    fn evict(&self, sessions: &mut Sessions) {
        let idle = self.idle;
        sessions.retain(|_, s| s.last_seen.elapsed() < idle);
        while sessions.len() >= self.max_sessions {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, s)| s.last_seen)
                .map(|(id, _)| id.clone());
            match oldest {
                Some(id) => {
                    sessions.remove(&id);
                }
                None => break,
            }
        }
    }

    /// Runs `f` on a live session. `None` when it has been evicted meanwhile.
    fn with_session<T>(&self, id: &str, f: impl FnOnce(&mut SessionState) -> T) -> Option<T> {
        self.lock().get_mut(id).map(f)
    }
}

fn new_session_id() -> String {
    format!("{:032x}", rand::random::<u128>())
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/search", post(search))
        .route("/clear", post(clear))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct SearchForm {
    #[serde(default)]
    query: String,
}

async fn index(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let country = state.finder.country_label();
    let branches = state.finder.table().map_or(0, |t| t.len());
    let render = |history: &History, flash: Option<&Flash>| {
        page::render(&PageContext {
            country: &country,
            branches,
            dataset_error: state.dataset_error.as_deref(),
            flash,
            history,
        })
    };

    let html = state
        .known_session(&headers)
        .and_then(|id| {
            state.with_session(&id, |s| {
                let flash = s.flash.take();
                render(&s.session.history, flash.as_ref())
            })
        })
        .unwrap_or_else(|| render(&History::new(), None));

    Html(html).into_response()
}

async fn search(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<SearchForm>,
) -> Response {
    let (id, fresh) = state.ensure_session(&headers);
    let query = form.query.trim().to_string();

    let flash = if state.dataset_error.is_some() {
        Some(Flash::warning("Search is disabled until the dataset is available."))
    } else if query.is_empty() {
        Some(Flash::warning("Please enter a search query."))
    } else {
        let finder = Arc::clone(&state.finder);
        // Matching and geocoding block on HTTP calls.
        match tokio::task::spawn_blocking(move || finder.search(&query)).await {
            Ok(outcome) => {
                info!(session = %id, status = %outcome.status, "search");
                state.with_session(&id, |s| {
                    s.session.history.push(outcome);
                });
                None
            }
            Err(e) => {
                error!(session = %id, error = %e, "search task failed");
                Some(Flash::warning("Search failed, please try again."))
            }
        }
    };

    if let Some(flash) = flash {
        state.with_session(&id, |s| s.flash = Some(flash));
    }
    with_cookie(Redirect::to("/").into_response(), &id, fresh)
}

async fn clear(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (id, fresh) = state.ensure_session(&headers);
    state.with_session(&id, |s| {
        s.session.clear();
        s.flash = Some(Flash::success("History cleared!"));
    });
    with_cookie(Redirect::to("/").into_response(), &id, fresh)
}

fn session_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|kv| kv.trim().split_once('='))
        .find(|(k, _)| *k == SESSION_COOKIE)
        .map(|(_, v)| v.to_string())
}

fn with_cookie(mut resp: Response, id: &str, fresh: bool) -> Response {
    if fresh {
        let cookie = format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax");
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            resp.headers_mut().insert(header::SET_COOKIE, value);
        }
    }
    resp
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use branchfinder_core::{BranchTable, FinderConfig, Place, Result};
    use tower::ServiceExt;

    struct NoPlaces;
    impl Geocoder for NoPlaces {
        fn search(&self, _: &str, _: usize) -> Result<Vec<Place>> {
            Ok(Vec::new())
        }
    }

    const CSV: &str = "BRANCH NAME,BRANCH ADDRESS,STATE,COUNTRY\n\
                       Lagos Main,57 Marina,Lagos,Nigeria\n\
                       Ikeja,Obafemi Awolowo Way,Lagos,Nigeria\n";

    fn state(with_table: bool) -> AppState {
        let table = with_table.then(|| BranchTable::from_reader(CSV.as_bytes(), "nigeria").unwrap());
        let error = (!with_table).then(|| "Dataset not found: missing.csv".to_string());
        let geocoder: SharedGeocoder = Arc::new(NoPlaces);
        AppState::new(Finder::new(table, geocoder, FinderConfig::default()), error)
    }

    async fn body(resp: Response) -> String {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn cookie_of(resp: &Response) -> String {
        let raw = resp.headers()[header::SET_COOKIE].to_str().unwrap();
        raw.split(';').next().unwrap().to_string()
    }

    fn get_page(cookie: &str) -> Request<Body> {
        Request::get("/")
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .unwrap()
    }

    fn post_form(uri: &str, cookie: &str, form: &str) -> Request<Body> {
        Request::post(uri)
            .header(header::COOKIE, cookie)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap()
    }

    fn post_fresh(uri: &str, form: &str) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn first_visit_renders_without_storing_a_session() {
        let st = state(true);
        let app = router(st.clone());
        let resp = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().get(header::SET_COOKIE).is_none());
        assert!(body(resp).await.contains("No searches yet"));
        assert_eq!(st.session_count(), 0);
    }

    #[tokio::test]
    async fn search_is_recorded_for_the_session_then_cleared() {
        let st = state(true);
        let app = router(st.clone());

        let resp = app
            .clone()
            .oneshot(post_fresh("/search", "query=lagos+main"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        let cookie = cookie_of(&resp);
        assert!(cookie.starts_with("bf_session="));

        let page = body(app.clone().oneshot(get_page(&cookie)).await.unwrap()).await;
        assert!(page.contains("Branches found in dataset for: lagos main 57 marina lagos nigeria"));
        assert!(page.contains("Auto-corrected to:"));

        let resp = app
            .clone()
            .oneshot(post_form("/search", &cookie, "query=ikjea"))
            .await
            .unwrap();
        assert!(resp.headers().get(header::SET_COOKIE).is_none());

        app.clone().oneshot(post_form("/clear", &cookie, "")).await.unwrap();
        let page = body(app.oneshot(get_page(&cookie)).await.unwrap()).await;
        assert!(page.contains("History cleared!"));
        assert!(page.contains("No searches yet"));
        assert_eq!(st.session_count(), 1);
    }

    #[tokio::test]
    async fn blank_query_only_warns() {
        let st = state(true);
        let app = router(st.clone());
        let resp = app.clone().oneshot(post_fresh("/search", "query=+++")).await.unwrap();
        let cookie = cookie_of(&resp);

        let page = body(app.oneshot(get_page(&cookie)).await.unwrap()).await;
        assert!(page.contains("Please enter a search query."));
        assert!(page.contains("No searches yet"));
    }

    #[tokio::test]
    async fn missing_dataset_disables_the_form() {
        let app = router(state(false));
        let page = body(
            app.oneshot(Request::get("/").body(Body::empty()).unwrap())
                .await
                .unwrap(),
        )
        .await;
        assert!(page.contains("Dataset not found: missing.csv"));
        assert!(page.contains("disabled"));
    }

    #[tokio::test]
    async fn missing_dataset_refuses_posted_searches() {
        let st = state(false);
        let app = router(st.clone());
        let resp = app
            .clone()
            .oneshot(post_fresh("/search", "query=lagos+main"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        let cookie = cookie_of(&resp);

        let page = body(app.oneshot(get_page(&cookie)).await.unwrap()).await;
        assert!(page.contains("Search is disabled until the dataset is available."));
        assert!(page.contains("No searches yet"));
        let id = cookie.trim_start_matches("bf_session=");
        let entries = st.with_session(id, |s| s.session.history.len());
        assert_eq!(entries, Some(0));
    }

    #[tokio::test]
    async fn cookieless_and_forged_clients_keep_sessions_bounded() {
        let st = state(true).with_limits(SESSION_IDLE, 50);
        let app = router(st.clone());

        for _ in 0..1000 {
            app.clone()
                .oneshot(Request::get("/").body(Body::empty()).unwrap())
                .await
                .unwrap();
        }
        assert_eq!(st.session_count(), 0);

        for _ in 0..1000 {
            let resp = app
                .clone()
                .oneshot(post_form("/search", "bf_session=forged", "query=+++"))
                .await
                .unwrap();
            assert_ne!(cookie_of(&resp), "bf_session=forged");
        }
        assert_eq!(st.session_count(), 50);
    }

    #[tokio::test]
    async fn idle_sessions_are_dropped() {
        let st = state(true).with_limits(Duration::ZERO, 100);
        let app = router(st.clone());

        let resp = app.clone().oneshot(post_fresh("/search", "query=+++")).await.unwrap();
        let stale = cookie_of(&resp);
        app.clone().oneshot(post_fresh("/search", "query=+++")).await.unwrap();
        assert_eq!(st.session_count(), 1);

        // The old cookie no longer maps to anything.
        let resp = app.oneshot(post_form("/search", &stale, "query=+++")).await.unwrap();
        assert_ne!(cookie_of(&resp), stale);
        assert_eq!(st.session_count(), 1);
    }

    #[test]
    fn session_ids_are_random_hex() {
        let a = new_session_id();
        let b = new_session_id();
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn cookie_is_found_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; bf_session=abc123; lang=en"),
        );
        assert_eq!(session_id(&headers).as_deref(), Some("abc123"));
    }
}
