//! REST API: tournament administration and group assignment.
//!
//! Successful calls return the tournament as JSON. Failures return `{"error": "..."}` with
//! 404 (unknown tournament), 406 (request refused), 409 (concurrent modification) or
//! 503 (store unavailable).

use crate::logic::{admin, AssignError, AssignmentEngine, Outcome};
use crate::models::{Slot, StreamLink, Team, TournamentError};
use crate::store::TournamentStore;
use actix_web::{
    get, post,
    web::{self, Data, Json, Path},
    HttpResponse, Responder,
};
use serde::Deserialize;
use std::sync::Arc;

/// Shared handler state: the store and the engine that writes through it.
pub struct AppState {
    pub store: Arc<dyn TournamentStore>,
    pub engine: AssignmentEngine,
}

impl AppState {
    pub fn new(store: Arc<dyn TournamentStore>, assign_max_attempts: u32) -> Self {
        let engine = AssignmentEngine::new(store.clone()).with_max_attempts(assign_max_attempts);
        Self { store, engine }
    }
}

type State = Data<AppState>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// Place a team into a group of a round at the requested slot.
#[derive(Deserialize)]
struct AssignBody {
    tournament: String,
    qualifier: String,
    group: Slot,
    team: Team,
}

/// Path segment: tournament title (e.g. /api/tournaments/{title})
#[derive(Deserialize)]
struct TournamentPath {
    title: String,
}

#[derive(Deserialize)]
struct GamePath {
    game_id: String,
}

fn error_body(e: impl ToString) -> serde_json::Value {
    serde_json::json!({ "error": e.to_string() })
}

fn tournament_error(e: TournamentError) -> HttpResponse {
    match e {
        TournamentError::TournamentNotFound(_) => HttpResponse::NotFound().json(error_body(e)),
        TournamentError::ConcurrentModification(_) => HttpResponse::Conflict().json(error_body(e)),
        TournamentError::Store(_) => {
            log::error!("{}", e);
            HttpResponse::ServiceUnavailable().json(error_body(e))
        }
        TournamentError::InvalidTitle
        | TournamentError::InvalidRound(_)
        | TournamentError::DuplicateTournament(_)
        | TournamentError::DuplicateQualifier(_) => HttpResponse::NotAcceptable().json(error_body(e)),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "esports-tournament-web",
    })
}

#[post("/api/tournaments")]
async fn api_create_tournament(state: State, body: Json<admin::NewTournament>) -> HttpResponse {
    match admin::create_tournament(state.store.as_ref(), body.into_inner()).await {
        Ok(t) => HttpResponse::Ok().json(t),
        Err(e) => tournament_error(e),
    }
}

#[get("/api/tournaments")]
async fn api_list_tournaments(state: State) -> HttpResponse {
    match admin::list_tournaments(state.store.as_ref()).await {
        Ok(list) => HttpResponse::Ok().json(list),
        Err(e) => tournament_error(e),
    }
}

#[get("/api/tournaments/{title}")]
async fn api_get_tournament(state: State, path: Path<TournamentPath>) -> HttpResponse {
    match admin::get_tournament(state.store.as_ref(), &path.title).await {
        Ok(t) => HttpResponse::Ok().json(t),
        Err(e) => tournament_error(e),
    }
}

#[get("/api/games/{game_id}/tournaments")]
async fn api_tournaments_by_game(state: State, path: Path<GamePath>) -> HttpResponse {
    match admin::tournaments_by_game(state.store.as_ref(), &path.game_id).await {
        Ok(list) => HttpResponse::Ok().json(list),
        Err(e) => tournament_error(e),
    }
}

/// Add a qualifier round (name must be unique within the tournament).
#[post("/api/tournaments/{title}/rounds")]
async fn api_add_round(state: State, path: Path<TournamentPath>, body: Json<admin::NewRound>) -> HttpResponse {
    match admin::add_round(state.store.as_ref(), &path.title, body.into_inner()).await {
        Ok(t) => HttpResponse::Ok().json(t),
        Err(e) => tournament_error(e),
    }
}

#[post("/api/tournaments/{title}/stream-links")]
async fn api_add_stream_link(state: State, path: Path<TournamentPath>, body: Json<StreamLink>) -> HttpResponse {
    match admin::add_stream_link(state.store.as_ref(), &path.title, body.into_inner()).await {
        Ok(t) => HttpResponse::Ok().json(t),
        Err(e) => tournament_error(e),
    }
}

/// Register a participating team (no group placement).
#[post("/api/tournaments/{title}/teams")]
async fn api_add_team(state: State, path: Path<TournamentPath>, body: Json<Team>) -> HttpResponse {
    match admin::add_team(state.store.as_ref(), &path.title, body.into_inner()).await {
        Ok(t) => HttpResponse::Ok().json(t),
        Err(e) => tournament_error(e),
    }
}

/// Place a team into a group: 200 with the tournament when placed, 406 when rejected.
#[post("/api/groups/assign")]
async fn api_assign_group(state: State, body: Json<AssignBody>) -> HttpResponse {
    let AssignBody {
        tournament,
        qualifier,
        group,
        team,
    } = body.into_inner();
    match state.engine.assign(&tournament, &qualifier, &group, team).await {
        Ok(Outcome::Placed(p)) => HttpResponse::Ok().json(p.tournament),
        Ok(Outcome::Rejected(r)) => HttpResponse::NotAcceptable().json(error_body(r)),
        Err(e @ AssignError::ConcurrentModification { .. }) => HttpResponse::Conflict().json(error_body(e)),
        Err(e @ AssignError::StoreUnavailable(_)) => HttpResponse::ServiceUnavailable().json(error_body(e)),
    }
}

/// Register every API route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(api_health)
        .service(api_create_tournament)
        .service(api_list_tournaments)
        .service(api_get_tournament)
        .service(api_tournaments_by_game)
        .service(api_add_round)
        .service(api_add_stream_link)
        .service(api_add_team)
        .service(api_assign_group);
}
