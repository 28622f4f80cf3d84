//! Tournament administration: create and list tournaments, add rounds, stream links and teams.

use crate::models::{Round, StreamLink, Team, Tournament, TournamentError};
use crate::store::TournamentStore;
use serde::Deserialize;

/// Request to create a tournament.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTournament {
    pub title: String,
    #[serde(default)]
    pub game_id: String,
    pub total_teams: u32,
}

/// Request to add a qualifier round. Rounds always start without groups.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRound {
    pub qualifier_name: String,
    pub number_of_teams_per_group: u32,
}

/// Create a tournament. The title is trimmed and must be unique.
pub async fn create_tournament(
    store: &dyn TournamentStore,
    new: NewTournament,
) -> Result<Tournament, TournamentError> {
    let title = new.title.trim();
    if title.is_empty() {
        return Err(TournamentError::InvalidTitle);
    }
    let tournament = Tournament::new(title, new.game_id.trim(), new.total_teams);
    store.insert_tournament(tournament.clone()).await?;
    log::info!(
        "Created tournament {} (game {}, {} teams)",
        tournament.title,
        tournament.game_id,
        tournament.total_teams
    );
    Ok(tournament)
}

pub async fn get_tournament(
    store: &dyn TournamentStore,
    title: &str,
) -> Result<Tournament, TournamentError> {
    store
        .get_tournament(title)
        .await?
        .map(|s| s.tournament)
        .ok_or_else(|| TournamentError::TournamentNotFound(title.to_string()))
}

pub async fn list_tournaments(store: &dyn TournamentStore) -> Result<Vec<Tournament>, TournamentError> {
    Ok(store.list_tournaments().await?)
}

pub async fn tournaments_by_game(
    store: &dyn TournamentStore,
    game_id: &str,
) -> Result<Vec<Tournament>, TournamentError> {
    Ok(store.tournaments_by_game(game_id).await?)
}

/// Add a qualifier round. Fails on an empty name, a zero group size, or a qualifier name
/// already used in this tournament. Returns the updated tournament.
pub async fn add_round(
    store: &dyn TournamentStore,
    title: &str,
    new: NewRound,
) -> Result<Tournament, TournamentError> {
    let snapshot = store
        .get_tournament(title)
        .await?
        .ok_or_else(|| TournamentError::TournamentNotFound(title.to_string()))?;
    let round = Round::new(new.qualifier_name.trim(), new.number_of_teams_per_group);
    snapshot.tournament.check_new_round(&round)?;

    store.push_round(title, round.clone(), snapshot.version).await?;
    log::info!(
        "Added round {} ({} teams per group) to {}",
        round.qualifier_name,
        round.number_of_teams_per_group,
        title
    );
    let mut tournament = snapshot.tournament;
    tournament.rounds.push(round);
    Ok(tournament)
}

pub async fn add_stream_link(
    store: &dyn TournamentStore,
    title: &str,
    link: StreamLink,
) -> Result<Tournament, TournamentError> {
    store.push_stream_link(title, link).await?;
    get_tournament(store, title).await
}

/// Register a team as participating. Does not place it in any group.
pub async fn add_team(
    store: &dyn TournamentStore,
    title: &str,
    team: Team,
) -> Result<Tournament, TournamentError> {
    store.push_team(title, team).await?;
    get_tournament(store, title).await
}
