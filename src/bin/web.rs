//! Single binary web server: JSON API over in-memory tournaments.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, MAX_PARALLEL_GAMES.

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use tournament_engine::{
    standings_table, EngineConfig, GroupLabel, MatchId, MatchPhase, RandomIds, ServerConfig,
    TeamId, Tournament, TournamentError, TournamentId, TournamentType,
};

/// In-memory state: tournaments by id. The write lock serializes mutations per request.
type Store = RwLock<HashMap<TournamentId, Tournament>>;
type AppState = Data<Store>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    date: NaiveDate,
    #[serde(default)]
    location: String,
    #[serde(default)]
    description: String,
    #[serde(rename = "type", default)]
    kind: TournamentType,
}

#[derive(Deserialize)]
struct AddTeamBody {
    name: String,
    #[serde(default)]
    captain: Option<String>,
    #[serde(default)]
    members: Vec<String>,
}

#[derive(Deserialize)]
struct ScoreBody {
    home_score: u32,
    away_score: u32,
}

#[derive(Deserialize)]
struct PlayoffBody {
    phase: MatchPhase,
}

#[derive(Deserialize)]
struct StandingsQuery {
    group: Option<GroupLabel>,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and team id.
#[derive(Deserialize)]
struct TournamentTeamPath {
    id: TournamentId,
    team_id: TeamId,
}

/// Path segments: tournament id and match id.
#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: MatchId,
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
}

fn bad_request(e: TournamentError) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

/// Run `action` on one tournament under the write lock and answer with the tournament.
fn mutate<F>(state: &Store, id: TournamentId, action: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament) -> Result<(), TournamentError>,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let t = match g.get_mut(&id) {
        Some(t) => t,
        None => return not_found(),
    };
    match action(&mut *t) {
        Ok(()) => HttpResponse::Ok().json(&*t),
        Err(e) => {
            log::debug!("Rejected request for tournament {}: {}", id, e);
            bad_request(e)
        }
    }
}

/// Answer with a view of one tournament under the read lock.
fn read<F>(state: &Store, id: TournamentId, view: F) -> HttpResponse
where
    F: FnOnce(&Tournament) -> HttpResponse,
{
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get(&id) {
        Some(t) => view(t),
        None => not_found(),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tournament-engine",
    })
}

/// Create a new tournament (returns it with id).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let body = body.into_inner();
    if body.name.trim().is_empty() {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "Tournament name must not be empty" }));
    }
    let mut tournament = Tournament::new(body.name.trim(), body.date, body.kind);
    tournament.location = body.location;
    tournament.description = body.description;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    log::info!("Created {:?} tournament {}", tournament.kind, tournament.id);
    let response = HttpResponse::Ok().json(&tournament);
    g.insert(tournament.id, tournament);
    response
}

#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    read(&state, path.id, |t| HttpResponse::Ok().json(t))
}

/// Register a team (no matches yet).
#[post("/api/tournaments/{id}/teams")]
async fn api_add_team(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<AddTeamBody>,
) -> HttpResponse {
    let body = body.into_inner();
    mutate(&state, path.id, |t| {
        t.add_team(body.name, body.captain, body.members).map(|_| ())
    })
}

/// Remove a team (no matches yet).
#[delete("/api/tournaments/{id}/teams/{team_id}")]
async fn api_remove_team(state: AppState, path: Path<TournamentTeamPath>) -> HttpResponse {
    mutate(&state, path.id, |t| t.remove_team(path.team_id))
}

/// Generate the match plan and start the first round.
#[post("/api/tournaments/{id}/matches")]
async fn api_generate_matches(
    state: AppState,
    config: Data<EngineConfig>,
    path: Path<TournamentPath>,
) -> HttpResponse {
    mutate(&state, path.id, |t| {
        t.generate_match_plan(&config, &mut RandomIds)?;
        t.kick_off().map(|_| ())
    })
}

/// Delete all matches and reset team stats.
#[delete("/api/tournaments/{id}/matches")]
async fn api_reset_matches(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    mutate(&state, path.id, |t| {
        t.reset_match_plan();
        Ok(())
    })
}

#[post("/api/tournaments/{id}/matches/{match_id}/start")]
async fn api_start_match(state: AppState, path: Path<TournamentMatchPath>) -> HttpResponse {
    mutate(&state, path.id, |t| t.start_match(path.match_id))
}

#[put("/api/tournaments/{id}/matches/{match_id}/score")]
async fn api_set_score(
    state: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    mutate(&state, path.id, |t| {
        t.record_score(path.match_id, body.home_score, body.away_score)
    })
}

/// Complete the current round and start the next one.
#[post("/api/tournaments/{id}/rounds/end")]
async fn api_end_round(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    mutate(&state, path.id, |t| t.end_round().map(|_| ()))
}

/// Create semifinal or final matches.
#[post("/api/tournaments/{id}/playoffs")]
async fn api_create_playoffs(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<PlayoffBody>,
) -> HttpResponse {
    mutate(&state, path.id, |t| {
        t.create_playoffs(body.phase, &mut RandomIds).map(|_| ())
    })
}

/// League table, optionally for one group (?group=A).
#[get("/api/tournaments/{id}/standings")]
async fn api_standings(
    state: AppState,
    path: Path<TournamentPath>,
    query: Query<StandingsQuery>,
) -> HttpResponse {
    read(&state, path.id, |t| {
        HttpResponse::Ok().json(standings_table(&t.teams, query.group))
    })
}

/// Phase, completion flags, current round and winner.
#[get("/api/tournaments/{id}/phase")]
async fn api_phase(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    read(&state, path.id, |t| {
        HttpResponse::Ok().json(serde_json::json!({
            "phase": t.phase(),
            "status": t.phase_status(),
            "current_round": t.current_round().map(|r| r.round_number),
            "can_end_round": t.current_round().map(|r| r.can_end()).unwrap_or(false),
            "winner": t.winner().map(|team| team.id),
        }))
    })
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    log::info!(
        "Starting server at http://{}:{} ({} parallel game(s) per round)",
        config.host,
        config.port,
        config.engine.max_parallel_games
    );

    let state: AppState = Data::new(RwLock::new(HashMap::new()));
    let engine = Data::new(config.engine);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(engine.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_add_team)
            .service(api_remove_team)
            .service(api_generate_matches)
            .service(api_reset_matches)
            .service(api_start_match)
            .service(api_set_score)
            .service(api_end_round)
            .service(api_create_playoffs)
            .service(api_standings)
            .service(api_phase)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
