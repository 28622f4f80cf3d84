//! In-memory [`TournamentStore`]: a map of title -> versioned document behind an `RwLock`.

use crate::models::{Group, Round, StreamLink, Team, Tournament};
use crate::store::{Snapshot, StoreError, StoreResult, TournamentStore, Version};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: RwLock<HashMap<String, Snapshot>>,
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Unavailable("lock error".to_string())
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with documents (each starts at version 1).
    pub fn with_tournaments(tournaments: impl IntoIterator<Item = Tournament>) -> Self {
        let docs = tournaments
            .into_iter()
            .map(|t| (t.title.clone(), Snapshot { version: 1, tournament: t }))
            .collect();
        Self {
            docs: RwLock::new(docs),
        }
    }

    /// Apply `f` to the document titled `title` and bump its version.
    /// With `expected` set, the write only happens if the stored version matches.
    fn update<F>(&self, title: &str, expected: Option<Version>, f: F) -> StoreResult<()>
    where
        F: FnOnce(&mut Tournament) -> StoreResult<()>,
    {
        let mut g = self.docs.write().map_err(poisoned)?;
        let doc = g
            .get_mut(title)
            .ok_or_else(|| StoreError::TournamentNotFound(title.to_string()))?;
        if let Some(expected) = expected {
            if doc.version != expected {
                return Err(StoreError::VersionConflict {
                    title: title.to_string(),
                    expected,
                    found: doc.version,
                });
            }
        }
        f(&mut doc.tournament)?;
        doc.version += 1;
        Ok(())
    }

    fn collect<P>(&self, pred: P) -> StoreResult<Vec<Tournament>>
    where
        P: Fn(&Tournament) -> bool,
    {
        let g = self.docs.read().map_err(poisoned)?;
        let mut out: Vec<Tournament> = g
            .values()
            .map(|s| &s.tournament)
            .filter(|t| pred(*t))
            .cloned()
            .collect();
        out.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.title.cmp(&b.title)));
        Ok(out)
    }
}

fn round_mut<'a>(t: &'a mut Tournament, qualifier: &str) -> StoreResult<&'a mut Round> {
    let title = t.title.clone();
    t.round_mut(qualifier).ok_or_else(|| StoreError::RoundNotFound {
        title,
        qualifier: qualifier.to_string(),
    })
}

#[async_trait]
impl TournamentStore for MemoryStore {
    async fn insert_tournament(&self, tournament: Tournament) -> StoreResult<()> {
        let mut g = self.docs.write().map_err(poisoned)?;
        if g.contains_key(&tournament.title) {
            return Err(StoreError::DuplicateTournament(tournament.title));
        }
        g.insert(
            tournament.title.clone(),
            Snapshot {
                version: 1,
                tournament,
            },
        );
        Ok(())
    }

    async fn get_tournament(&self, title: &str) -> StoreResult<Option<Snapshot>> {
        let g = self.docs.read().map_err(poisoned)?;
        Ok(g.get(title).cloned())
    }

    async fn list_tournaments(&self) -> StoreResult<Vec<Tournament>> {
        self.collect(|_| true)
    }

    async fn tournaments_by_game(&self, game_id: &str) -> StoreResult<Vec<Tournament>> {
        self.collect(|t| t.game_id == game_id)
    }

    async fn get_tournament_by_title_and_qualifier(
        &self,
        title: &str,
        qualifier: &str,
    ) -> StoreResult<Option<Snapshot>> {
        let g = self.docs.read().map_err(poisoned)?;
        Ok(g
            .get(title)
            .filter(|s| s.tournament.round(qualifier).is_some())
            .cloned())
    }

    async fn replace_groups_of_round(
        &self,
        title: &str,
        qualifier: &str,
        groups: Vec<Group>,
        expected: Version,
    ) -> StoreResult<()> {
        self.update(title, Some(expected), |t| {
            round_mut(t, qualifier)?.groups = groups;
            Ok(())
        })
    }

    async fn append_group_to_round(
        &self,
        title: &str,
        qualifier: &str,
        group: Group,
        expected: Version,
    ) -> StoreResult<()> {
        self.update(title, Some(expected), |t| {
            round_mut(t, qualifier)?.groups.push(group);
            Ok(())
        })
    }

    async fn push_round(&self, title: &str, round: Round, expected: Version) -> StoreResult<()> {
        self.update(title, Some(expected), |t| {
            t.rounds.push(round);
            Ok(())
        })
    }

    async fn push_stream_link(&self, title: &str, link: StreamLink) -> StoreResult<()> {
        self.update(title, None, |t| {
            t.stream_links.push(link);
            Ok(())
        })
    }

    async fn push_team(&self, title: &str, team: Team) -> StoreResult<()> {
        self.update(title, None, |t| {
            t.teams.push(team);
            Ok(())
        })
    }
}
