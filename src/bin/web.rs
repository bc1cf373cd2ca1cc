//! Single binary JSON API over the open play engine.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! Session limits: COURTS (default 3), MAX_PLAYERS (default 20), MAX_STREAK (default 2).

use actix_session::{storage::CookieSessionStore, Session, SessionMiddleware};
use actix_web::{
    cookie::Key,
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use pickleball_open_play::{
    add_players, assign_courts, reset_court, submit_all_winners, toggle_auto_fill, CourtNumber,
    OpenPlayConfig, OpenPlayError, OpenPlaySession, PlayFormat, SessionId, Team,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Per-session entry: open play state + last activity time (for auto-cleanup).
struct SessionEntry {
    session: OpenPlaySession,
    last_activity: Instant,
}

/// In-memory state: many open play sessions by ID. Entries are removed after 12h inactivity.
type AppState = Data<RwLock<HashMap<SessionId, SessionEntry>>>;

/// Inactivity threshold: sessions not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

/// Cookie key remembering the last session created by this browser.
const CURRENT_SESSION_KEY: &str = "open_play_id";

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateSessionBody {
    #[serde(default)]
    auto_fill: bool,
    #[serde(default)]
    format: Option<PlayFormat>,
}

#[derive(Deserialize)]
struct AddPlayersBody {
    names: Vec<String>,
}

#[derive(Deserialize)]
struct CourtFormatBody {
    format: PlayFormat,
}

#[derive(Deserialize)]
struct CourtWinner {
    court: CourtNumber,
    team: Team,
}

#[derive(Deserialize)]
struct SubmitWinnersBody {
    results: Vec<CourtWinner>,
}

#[derive(Deserialize)]
struct AutoFillBody {
    enabled: bool,
}

/// Path segment: session id (e.g. /api/sessions/{id})
#[derive(Deserialize)]
struct SessionPath {
    id: SessionId,
}

/// Path segments: session id and player name (e.g. /api/sessions/{id}/players/{name})
#[derive(Deserialize)]
struct SessionPlayerPath {
    id: SessionId,
    name: String,
}

/// Path segments: session id and court number (e.g. /api/sessions/{id}/courts/{number}/reset)
#[derive(Deserialize)]
struct SessionCourtPath {
    id: SessionId,
    number: CourtNumber,
}

/// Run `f` on a session, refreshing its last_activity. 404 if the id is unknown.
fn with_session<F>(state: &AppState, id: SessionId, f: F) -> HttpResponse
where
    F: FnOnce(&mut OpenPlaySession) -> HttpResponse,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            f(&mut entry.session)
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    }
}

fn bad_request(e: OpenPlayError) -> HttpResponse {
    log::warn!("Rejected: {}", e);
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

/// Operation result plus the updated session, so the client can re-render in one round trip.
fn ok_with<T: Serialize>(result: &T, session: &OpenPlaySession) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "result": result, "session": session }))
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "pickleball-open-play",
    })
}

/// Create a new session (returns it with id; the id is also stored in the session cookie).
#[post("/api/sessions")]
async fn api_create_session(
    state: AppState,
    config: Data<OpenPlayConfig>,
    cookie: Session,
    body: Option<Json<CreateSessionBody>>,
) -> HttpResponse {
    let mut config = *config.get_ref();
    if let Some(format) = body.as_ref().and_then(|b| b.format) {
        config.default_format = format;
    }
    let mut session = OpenPlaySession::new(config);
    session.auto_fill = body.as_ref().map(|b| b.auto_fill).unwrap_or(false);
    let id = session.id;
    if let Err(e) = cookie.insert(CURRENT_SESSION_KEY, id) {
        log::warn!("Could not store session cookie: {}", e);
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    log::info!("Created session {}", id);
    let resp = HttpResponse::Ok().json(&session);
    g.insert(
        id,
        SessionEntry {
            session,
            last_activity: Instant::now(),
        },
    );
    resp
}

/// Session remembered in this browser's cookie (404 if none).
#[get("/api/sessions/current")]
async fn api_current_session(state: AppState, cookie: Session) -> HttpResponse {
    match cookie.get::<SessionId>(CURRENT_SESSION_KEY) {
        Ok(Some(id)) => with_session(&state, id, |s| HttpResponse::Ok().json(s)),
        _ => HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    }
}

#[get("/api/sessions/{id}")]
async fn api_get_session(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_session(&state, path.id, |s| HttpResponse::Ok().json(s))
}

/// Add players (one name per entry); they join the back of the queue.
#[post("/api/sessions/{id}/players")]
async fn api_add_players(
    state: AppState,
    path: Path<SessionPath>,
    body: Json<AddPlayersBody>,
) -> HttpResponse {
    with_session(&state, path.id, |s| match add_players(s, &body.names) {
        Ok(summary) => ok_with(&summary, s),
        Err(e) => bad_request(e),
    })
}

/// Remove a waiting player.
#[delete("/api/sessions/{id}/players/{name}")]
async fn api_remove_player(state: AppState, path: Path<SessionPlayerPath>) -> HttpResponse {
    with_session(&state, path.id, |s| match s.remove_player(&path.name) {
        Ok(()) => HttpResponse::Ok().json(s),
        Err(e) => bad_request(e),
    })
}

/// Where a player is: queue position or court.
#[get("/api/sessions/{id}/players/{name}")]
async fn api_locate_player(state: AppState, path: Path<SessionPlayerPath>) -> HttpResponse {
    with_session(&state, path.id, |s| match s.locate(&path.name) {
        Ok(location) => HttpResponse::Ok().json(location),
        Err(e) => bad_request(e),
    })
}

/// Fill empty courts from the queue. Courts that cannot be filled come back as notices.
#[post("/api/sessions/{id}/courts/assign")]
async fn api_assign_courts(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_session(&state, path.id, |s| {
        let summary = assign_courts(s);
        ok_with(&summary, s)
    })
}

/// Switch an empty court between singles and doubles.
#[put("/api/sessions/{id}/courts/{number}/format")]
async fn api_set_court_format(
    state: AppState,
    path: Path<SessionCourtPath>,
    body: Json<CourtFormatBody>,
) -> HttpResponse {
    with_session(&state, path.id, |s| match s.set_court_format(path.number, body.format) {
        Ok(()) => HttpResponse::Ok().json(s),
        Err(e) => bad_request(e),
    })
}

/// Send a court's players back to the queue without recording a game.
#[post("/api/sessions/{id}/courts/{number}/reset")]
async fn api_reset_court(state: AppState, path: Path<SessionCourtPath>) -> HttpResponse {
    with_session(&state, path.id, |s| match reset_court(s, path.number) {
        Ok(returned) => ok_with(&returned, s),
        Err(e) => bad_request(e),
    })
}

/// Submit the winning team for each listed court, all or nothing.
#[post("/api/sessions/{id}/results")]
async fn api_submit_results(
    state: AppState,
    path: Path<SessionPath>,
    body: Json<SubmitWinnersBody>,
) -> HttpResponse {
    let selections: Vec<(CourtNumber, Team)> =
        body.results.iter().map(|r| (r.court, r.team)).collect();
    with_session(&state, path.id, |s| match submit_all_winners(s, &selections) {
        Ok(outcomes) => ok_with(&outcomes, s),
        Err(e) => bad_request(e),
    })
}

#[put("/api/sessions/{id}/auto-fill")]
async fn api_set_auto_fill(
    state: AppState,
    path: Path<SessionPath>,
    body: Json<AutoFillBody>,
) -> HttpResponse {
    with_session(&state, path.id, |s| {
        let summary = toggle_auto_fill(s, body.enabled);
        ok_with(&summary, s)
    })
}

#[get("/api/sessions/{id}/queue")]
async fn api_get_queue(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_session(&state, path.id, |s| HttpResponse::Ok().json(s.get_queue()))
}

#[get("/api/sessions/{id}/courts")]
async fn api_get_courts(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_session(&state, path.id, |s| HttpResponse::Ok().json(s.get_courts()))
}

#[get("/api/sessions/{id}/history")]
async fn api_get_history(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_session(&state, path.id, |s| {
        HttpResponse::Ok().json(s.get_history().collect::<Vec<_>>())
    })
}

/// Game history as a CSV download.
#[get("/api/sessions/{id}/history.csv")]
async fn api_get_history_csv(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_session(&state, path.id, |s| match s.history.to_csv() {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header(("Content-Disposition", "attachment; filename=\"history.csv\""))
            .body(body),
        Err(e) => {
            log::error!("CSV export failed: {}", e);
            HttpResponse::InternalServerError().body("csv error")
        }
    })
}

#[get("/api/sessions/{id}/stats")]
async fn api_get_stats(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_session(&state, path.id, |s| HttpResponse::Ok().json(s.player_stats()))
}

/// Clear players, courts, and history; keeps settings.
#[post("/api/sessions/{id}/reset")]
async fn api_reset_everything(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_session(&state, path.id, |s| {
        s.reset_everything();
        HttpResponse::Ok().json(s)
    })
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Numeric env var, or `default` if unset or unparsable.
fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn config_from_env() -> OpenPlayConfig {
    let defaults = OpenPlayConfig::default();
    OpenPlayConfig {
        courts: env_or("COURTS", defaults.courts),
        max_players: env_or("MAX_PLAYERS", defaults.max_players),
        max_streak: env_or("MAX_STREAK", defaults.max_streak),
        ..defaults
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = env_or("PORT", default_port());
    let bind = (host.as_str(), port);
    let config = config_from_env();
    log::info!(
        "Starting server at http://{}:{} ({} courts, max {} players, max streak {})",
        bind.0,
        bind.1,
        config.courts,
        config.max_players,
        config.max_streak
    );

    let state = Data::new(RwLock::new(HashMap::<SessionId, SessionEntry>::new()));
    let config = Data::new(config);
    let cookie_key = Key::generate();

    // Background task: every 30 minutes, remove sessions inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive session(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .wrap(SessionMiddleware::new(
                CookieSessionStore::default(),
                cookie_key.clone(),
            ))
            .app_data(state.clone())
            .app_data(config.clone())
            .service(api_health)
            .service(api_create_session)
            .service(api_current_session)
            .service(api_get_session)
            .service(api_add_players)
            .service(api_remove_player)
            .service(api_locate_player)
            .service(api_assign_courts)
            .service(api_set_court_format)
            .service(api_reset_court)
            .service(api_submit_results)
            .service(api_set_auto_fill)
            .service(api_get_queue)
            .service(api_get_courts)
            .service(api_get_history)
            .service(api_get_history_csv)
            .service(api_get_stats)
            .service(api_reset_everything)
    })
    .bind(bind)?
    .run()
    .await
}
