//! Single binary web server: tournament engine API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_web::{
    get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use esport_tournament_web::{
    CreateTournamentParams, NewTeam, TeamId, TournamentError, TournamentId, TournamentService,
};
use serde::Deserialize;

type Service = Data<TournamentService>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct ResolveMatchBody {
    match_id: String,
    winner_team_id: TeamId,
    #[serde(default)]
    score1: Option<u32>,
    #[serde(default)]
    score2: Option<u32>,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

fn error_response(e: TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TournamentError::TournamentNotFound | TournamentError::MatchNotFound(_) => {
            HttpResponse::NotFound().json(body)
        }
        TournamentError::Store(_) => HttpResponse::InternalServerError().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "esport-tournament-web",
    })
}

/// Create a new tournament (returns it with id; client stores id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(service: Service, body: Json<CreateTournamentParams>) -> HttpResponse {
    match service.create_tournament(body.into_inner()) {
        Ok(t) => HttpResponse::Ok().json(t),
        Err(e) => error_response(e),
    }
}

/// Get a tournament by id (404 if not found).
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(service: Service, path: Path<TournamentPath>) -> HttpResponse {
    match service.get_tournament(path.id) {
        Ok(t) => HttpResponse::Ok().json(t),
        Err(e) => error_response(e),
    }
}

/// Register a team (capacity and duplicate-player checks apply).
#[post("/api/tournaments/{id}/teams")]
async fn api_register_team(
    service: Service,
    path: Path<TournamentPath>,
    body: Json<NewTeam>,
) -> HttpResponse {
    match service.register_team(path.id, body.into_inner()) {
        Ok(t) => HttpResponse::Ok().json(t),
        Err(e) => error_response(e),
    }
}

/// Current bracket (empty list if not generated yet).
#[get("/api/tournaments/{id}/bracket")]
async fn api_get_bracket(service: Service, path: Path<TournamentPath>) -> HttpResponse {
    match service.get_bracket(path.id) {
        Ok(bracket) => HttpResponse::Ok().json(bracket),
        Err(e) => error_response(e),
    }
}

/// Generate the bracket from the current team list (overwrites any existing one).
#[post("/api/tournaments/{id}/bracket/generate")]
async fn api_generate_bracket(service: Service, path: Path<TournamentPath>) -> HttpResponse {
    match service.generate_bracket(path.id) {
        Ok(bracket) => HttpResponse::Ok().json(bracket),
        Err(e) => error_response(e),
    }
}

/// Explicit redraw of the bracket.
#[post("/api/tournaments/{id}/bracket/regenerate")]
async fn api_regenerate_bracket(service: Service, path: Path<TournamentPath>) -> HttpResponse {
    match service.regenerate_bracket(path.id) {
        Ok(bracket) => HttpResponse::Ok().json(bracket),
        Err(e) => error_response(e),
    }
}

/// Record a match winner and propagate it into the next round.
#[put("/api/tournaments/{id}/bracket/resolve")]
async fn api_resolve_match(
    service: Service,
    path: Path<TournamentPath>,
    body: Json<ResolveMatchBody>,
) -> HttpResponse {
    match service.resolve_match(
        path.id,
        &body.match_id,
        body.winner_team_id,
        body.score1,
        body.score2,
    ) {
        Ok(t) => HttpResponse::Ok().json(t),
        Err(e) => error_response(e),
    }
}

/// Start the tournament (Upcoming/Confirmed -> Ongoing, fresh draw).
#[post("/api/tournaments/{id}/start")]
async fn api_start_tournament(service: Service, path: Path<TournamentPath>) -> HttpResponse {
    match service.start_tournament(path.id) {
        Ok(t) => HttpResponse::Ok().json(t),
        Err(e) => error_response(e),
    }
}

/// Close the tournament once the final is resolved (Ongoing -> Finished).
#[post("/api/tournaments/{id}/finish")]
async fn api_finish_tournament(service: Service, path: Path<TournamentPath>) -> HttpResponse {
    match service.finish_tournament(path.id) {
        Ok(t) => HttpResponse::Ok().json(t),
        Err(e) => error_response(e),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let service = Data::new(TournamentService::in_memory());

    HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_register_team)
            .service(api_get_bracket)
            .service(api_generate_bracket)
            .service(api_regenerate_bracket)
            .service(api_resolve_match)
            .service(api_start_tournament)
            .service(api_finish_tournament)
    })
    .bind(bind)?
    .run()
    .await
}
