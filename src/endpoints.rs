//! Typed wrappers for the vsports API endpoints
//!
//! Each method formats the endpoint path, runs it through the dispatcher and
//! decodes the JSON body. Decode failures are returned as
//! `ClientError::Decode`.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;

use crate::client::{EndpointRequest, VsportsClient};
use crate::data::{Event, Media, Person, Squad, Standings, Team, Tournament, Venue};
use crate::error::Result;

/// Date format of the `start_date` / `end_date` parameters
const DATE_FORMAT: &str = "%Y-%m-%d";

impl VsportsClient {
    /// Dispatches `request` and decodes the body as `T`
    async fn get_json<T: DeserializeOwned>(&self, request: &EndpointRequest) -> Result<T> {
        let body = self.dispatch(request).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Dispatches a bare path and decodes the body as `T`
    async fn get_path<T: DeserializeOwned>(&self, path: String, use_cache: bool) -> Result<T> {
        self.get_json(&EndpointRequest::new(path).use_cache(use_cache))
            .await
    }

    /// All tournaments
    pub async fn tournaments(&self, use_cache: bool) -> Result<Vec<Tournament>> {
        self.get_path("tournaments".to_string(), use_cache).await
    }

    /// One tournament by id
    pub async fn tournament(&self, tournament_id: i64, use_cache: bool) -> Result<Tournament> {
        self.get_path(format!("tournaments/{}", tournament_id), use_cache)
            .await
    }

    /// One team by id
    pub async fn team(&self, team_id: i64, use_cache: bool) -> Result<Team> {
        self.get_path(format!("teams/{}", team_id), use_cache).await
    }

    /// Teams taking part in a tournament
    pub async fn teams_by_tournament(
        &self,
        tournament_id: i64,
        use_cache: bool,
    ) -> Result<Vec<Team>> {
        self.get_path(format!("teams/by/tournament/{}", tournament_id), use_cache)
            .await
    }

    /// Events between two dates, inclusive
    pub async fn events_by_date(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        use_cache: bool,
    ) -> Result<Vec<Event>> {
        let request = EndpointRequest::new("events")
            .param("start_date", start_date.format(DATE_FORMAT).to_string())
            .param("end_date", end_date.format(DATE_FORMAT).to_string())
            .use_cache(use_cache);
        self.get_json(&request).await
    }

    /// Events between two dates, inclusive, with full details
    pub async fn events_detailed_by_date(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        use_cache: bool,
    ) -> Result<Vec<Event>> {
        // Inserted in the opposite order to `events_by_date`; the cache key
        // does not depend on it.
        let request = EndpointRequest::new("events/detailed")
            .param("end_date", end_date.format(DATE_FORMAT).to_string())
            .param("start_date", start_date.format(DATE_FORMAT).to_string())
            .use_cache(use_cache);
        self.get_json(&request).await
    }

    /// One event by id
    pub async fn event(&self, event_id: i64, use_cache: bool) -> Result<Event> {
        self.get_path(format!("events/{}", event_id), use_cache).await
    }

    /// One event by id, with full details
    pub async fn event_detailed(&self, event_id: i64, use_cache: bool) -> Result<Event> {
        self.get_path(format!("events/{}/detailed", event_id), use_cache)
            .await
    }

    /// Occurrences of an event
    ///
    /// The endpoint answers with either an array of events or a single
    /// event. An array is tried first; otherwise the body is decoded as one
    /// event and returned as a one-element list.
    pub async fn event_occurrences(&self, event_id: &str, use_cache: bool) -> Result<Vec<Event>> {
        let body = self
            .request(&format!("events/{}/occurrences", event_id), use_cache)
            .await?;

        match serde_json::from_slice::<Vec<Event>>(&body) {
            Ok(events) => Ok(events),
            Err(_) => {
                let event: Event = serde_json::from_slice(&body)?;
                Ok(vec![event])
            }
        }
    }

    /// All media attached to an event's occurrences
    pub async fn event_media(&self, event_id: &str, use_cache: bool) -> Result<Vec<Media>> {
        let event: Event = self
            .get_path(format!("events/{}/occurrences", event_id), use_cache)
            .await?;
        Ok(event.media())
    }

    /// One player, coach or official by id
    pub async fn person(&self, person_id: i64, use_cache: bool) -> Result<Person> {
        self.get_path(format!("person/{}", person_id), use_cache).await
    }

    /// Current squad of a team
    pub async fn squad(&self, team_id: i64, use_cache: bool) -> Result<Squad> {
        self.get_path(format!("squads/{}", team_id), use_cache).await
    }

    /// Current squad of a team, with full details
    pub async fn squad_detailed(&self, team_id: i64, use_cache: bool) -> Result<Squad> {
        self.get_path(format!("squads/{}/detailed", team_id), use_cache)
            .await
    }

    /// Squad a team registered for a tournament
    pub async fn squad_by_tournament(
        &self,
        team_id: i64,
        tournament_id: i64,
        use_cache: bool,
    ) -> Result<Squad> {
        self.get_path(
            format!("squads/{}/by/tournament/{}", team_id, tournament_id),
            use_cache,
        )
        .await
    }

    /// Squad a team registered for a tournament, with full details
    pub async fn squad_detailed_by_tournament(
        &self,
        team_id: i64,
        tournament_id: i64,
        use_cache: bool,
    ) -> Result<Squad> {
        self.get_path(
            format!("squads/{}/by/tournament/{}/detailed", team_id, tournament_id),
            use_cache,
        )
        .await
    }

    /// Standings of a tournament
    pub async fn standings_by_tournament(
        &self,
        tournament_id: i64,
        use_cache: bool,
    ) -> Result<Standings> {
        self.get_path(format!("standings/by/tournament/{}", tournament_id), use_cache)
            .await
    }

    /// Standings of a tournament including matches in progress
    pub async fn standings_by_tournament_live(
        &self,
        tournament_id: i64,
        use_cache: bool,
    ) -> Result<Standings> {
        self.get_path(
            format!("standings/by/tournament/{}/live", tournament_id),
            use_cache,
        )
        .await
    }

    /// One venue by id
    pub async fn venue(&self, venue_id: i64, use_cache: bool) -> Result<Venue> {
        self.get_path(format!("venues/{}", venue_id), use_cache).await
    }

    /// Venues a team plays at
    pub async fn venues_by_team(&self, team_id: i64, use_cache: bool) -> Result<Vec<Venue>> {
        self.get_path(format!("venues/by/team/{}", team_id), use_cache)
            .await
    }
}
