//! Integration tests for the typed endpoint methods

mod common;

use chrono::NaiveDate;
use common::{client_for, CountingStore};
use mockito::{Matcher, Server};
use vsports::data::Id;
use vsports::ClientError;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn test_event_occurrences_returns_array_as_is() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/events/e1/occurrences")
        .with_body(r#"[{"id": 1}, {"id": 2}]"#)
        .create_async()
        .await;
    let client = client_for(&server.url(), CountingStore::new()).await;

    let events = client.event_occurrences("e1", true).await.unwrap();

    let ids: Vec<Option<Id>> = events.into_iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![Some(Id::Number(1)), Some(Id::Number(2))]);
}

#[tokio::test]
async fn test_event_occurrences_wraps_single_object() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/events/e2/occurrences")
        .with_body(r#"{"id": "e2", "occurrence": [{"id": 5}]}"#)
        .create_async()
        .await;
    let client = client_for(&server.url(), CountingStore::new()).await;

    let events = client.event_occurrences("e2", true).await.unwrap();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, Some(Id::Text("e2".to_string())));
    assert_eq!(events[0].occurrence.len(), 1);
}

#[tokio::test]
async fn test_event_occurrences_malformed_body_is_decode_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/events/e3/occurrences")
        .with_body("<html>bad gateway</html>")
        .create_async()
        .await;
    let client = client_for(&server.url(), CountingStore::new()).await;

    let err = client.event_occurrences("e3", false).await.unwrap_err();

    assert!(matches!(err, ClientError::Decode(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_event_media_flattens_occurrence_media() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/events/e4/occurrences")
        .with_body(
            r#"{"id": "e4", "occurrence": [
                {"id": 1, "media": [{"id": 10, "url": "https://cdn/10.jpg"}]},
                {"id": 2, "media": [{"id": 20}]}
            ]}"#,
        )
        .create_async()
        .await;
    let client = client_for(&server.url(), CountingStore::new()).await;

    let media = client.event_media("e4", true).await.unwrap();

    assert_eq!(media.len(), 2);
    assert_eq!(media[0].url.as_deref(), Some("https://cdn/10.jpg"));
    assert_eq!(media[1].id, Some(Id::Number(20)));
}

#[tokio::test]
async fn test_events_by_date_sends_date_params() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/events")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("start_date".into(), "2024-03-01".into()),
            Matcher::UrlEncoded("end_date".into(), "2024-03-07".into()),
        ]))
        .with_body(r#"[{"id": 100, "name": "A vs B"}]"#)
        .expect(1)
        .create_async()
        .await;
    let client = client_for(&server.url(), CountingStore::new()).await;

    let events = client
        .events_by_date(date(2024, 3, 1), date(2024, 3, 7), true)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(events[0].name.as_deref(), Some("A vs B"));
}

#[tokio::test]
async fn test_date_endpoints_share_key_format_regardless_of_insertion_order() {
    let mut server = Server::new_async().await;
    let _events = server
        .mock("GET", "/events")
        .match_query(Matcher::Any)
        .with_body("[]")
        .create_async()
        .await;
    let _detailed = server
        .mock("GET", "/events/detailed")
        .match_query(Matcher::Any)
        .with_body("[]")
        .create_async()
        .await;

    let store = CountingStore::new();
    let client = client_for(&server.url(), store.clone()).await;

    client
        .events_by_date(date(2024, 1, 1), date(2024, 1, 31), true)
        .await
        .unwrap();
    client
        .events_detailed_by_date(date(2024, 1, 1), date(2024, 1, 31), true)
        .await
        .unwrap();

    assert_eq!(
        store.inner.keys(),
        vec![
            "vsports://events/detailed:end_date=2024-01-31&start_date=2024-01-01".to_string(),
            "vsports://events:end_date=2024-01-31&start_date=2024-01-01".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_wrong_shape_is_decode_error_but_body_is_cached() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/tournaments")
        .with_body(r#"{"message": "maintenance"}"#)
        .expect(1)
        .create_async()
        .await;
    let store = CountingStore::new();
    let client = client_for(&server.url(), store.clone()).await;

    let err = client.tournaments(true).await.unwrap_err();
    let again = client.tournaments(true).await.unwrap_err();

    mock.assert_async().await;
    assert!(matches!(err, ClientError::Decode(_)));
    assert!(matches!(again, ClientError::Decode(_)));
    assert_eq!(store.sets(), 1);
}

#[tokio::test]
async fn test_path_templates() {
    let mut server = Server::new_async().await;
    let paths = [
        "/tournaments/3",
        "/teams/8",
        "/teams/by/tournament/3",
        "/events/42",
        "/events/42/detailed",
        "/person/77",
        "/squads/8",
        "/squads/8/detailed",
        "/squads/8/by/tournament/3",
        "/squads/8/by/tournament/3/detailed",
        "/standings/by/tournament/3",
        "/standings/by/tournament/3/live",
        "/venues/5",
        "/venues/by/team/8",
    ];
    let mut mocks = Vec::new();
    for path in paths {
        let body = if path.starts_with("/teams/by") || path.starts_with("/venues/by") {
            "[]"
        } else {
            "{}"
        };
        mocks.push(
            server
                .mock("GET", path)
                .with_body(body)
                .expect(1)
                .create_async()
                .await,
        );
    }
    let client = client_for(&server.url(), CountingStore::new()).await;

    client.tournament(3, false).await.unwrap();
    client.team(8, false).await.unwrap();
    client.teams_by_tournament(3, false).await.unwrap();
    client.event(42, false).await.unwrap();
    client.event_detailed(42, false).await.unwrap();
    client.person(77, false).await.unwrap();
    client.squad(8, false).await.unwrap();
    client.squad_detailed(8, false).await.unwrap();
    client.squad_by_tournament(8, 3, false).await.unwrap();
    client.squad_detailed_by_tournament(8, 3, false).await.unwrap();
    client.standings_by_tournament(3, false).await.unwrap();
    client.standings_by_tournament_live(3, false).await.unwrap();
    client.venue(5, false).await.unwrap();
    client.venues_by_team(8, false).await.unwrap();

    for mock in mocks {
        mock.assert_async().await;
    }
}
