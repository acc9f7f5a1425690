//! End-to-end scenarios over loopback TCP: a real simulator, real client
//! applications, real telnet framing.

use std::time::Duration;

use hlx_client::{Application, ClientError, ClientEvent, StateChange};
use hlx_server::Simulator;

const TIMEOUT: Duration = Duration::from_secs(5);

async fn start_simulator() -> (Simulator, String) {
    let simulator = Simulator::new(None).expect("simulator init");
    let local = simulator.start("telnet://127.0.0.1:0").await.expect("listen");
    (simulator, format!("telnet://{local}"))
}

async fn connected_client(url: &str) -> Application {
    let app = Application::new().expect("client init");
    app.connect(url, TIMEOUT).await.expect("connect");
    app
}

/// Wait for a specific state change on a client's event stream
async fn expect_state_change(
    events: &mut tokio::sync::broadcast::Receiver<ClientEvent>,
    want: &StateChange,
) {
    let deadline = tokio::time::Instant::now() + TIMEOUT;
    loop {
        let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
        let event = tokio::time::timeout(remaining, events.recv())
            .await
            .expect("timed out waiting for state change")
            .expect("event stream closed");
        if let ClientEvent::State(change) = event {
            if change == *want {
                return;
            }
        }
    }
}

#[tokio::test]
async fn test_query_returns_vendor_defaults() {
    let (_simulator, url) = start_simulator().await;
    let app = connected_client(&url).await;

    app.zones().query(1, TIMEOUT).await.unwrap();

    let zone = app.zones().zone(1).unwrap();
    assert_eq!(zone.name(), "Zone 1");
    assert_eq!(zone.volume(), -40);
    assert!(!zone.muted());
    assert_eq!(zone.source(), 1);
    assert_eq!(zone.balance(), 0);
}

#[tokio::test]
async fn test_set_volume_echoes_and_notifies_second_client() {
    let (_simulator, url) = start_simulator().await;
    let observer = connected_client(&url).await;
    observer.zones().query(1, TIMEOUT).await.unwrap();
    let mut observer_events = observer.subscribe();

    let actor = connected_client(&url).await;
    let volume = actor.zones().set_volume(1, -30, TIMEOUT).await.unwrap();
    assert_eq!(volume, -30);
    assert_eq!(actor.zones().zone(1).unwrap().volume(), -30);

    expect_state_change(
        &mut observer_events,
        &StateChange::ZoneVolume { zone: 1, volume: -30 },
    )
    .await;
    assert_eq!(observer.zones().zone(1).unwrap().volume(), -30);
}

#[tokio::test]
async fn test_redundant_set_suppresses_notification() {
    let (_simulator, url) = start_simulator().await;
    let observer = connected_client(&url).await;
    let mut observer_events = observer.subscribe();

    let actor = connected_client(&url).await;

    // -40 is already the default; the head echoes but must not notify.
    let volume = actor.zones().set_volume(1, -40, TIMEOUT).await.unwrap();
    assert_eq!(volume, -40);

    // A subsequent real change must be the next thing the observer sees.
    actor.zones().set_volume(1, -35, TIMEOUT).await.unwrap();
    let deadline = tokio::time::Instant::now() + TIMEOUT;
    loop {
        let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
        let event = tokio::time::timeout(remaining, observer_events.recv())
            .await
            .expect("timed out")
            .expect("closed");
        if let ClientEvent::State(change) = event {
            assert_eq!(change, StateChange::ZoneVolume { zone: 1, volume: -35 });
            break;
        }
    }
}

#[tokio::test]
async fn test_group_volume_fans_out_in_member_order() {
    let (_simulator, url) = start_simulator().await;
    let actor = connected_client(&url).await;
    // Deliberately added out of order; fan-out must still be 3 then 5.
    actor.groups().add_zone(2, 5, TIMEOUT).await.unwrap();
    actor.groups().add_zone(2, 3, TIMEOUT).await.unwrap();

    let observer = connected_client(&url).await;
    let mut observer_events = observer.subscribe();

    actor.groups().set_volume(2, -20, TIMEOUT).await.unwrap();

    // Observer receives one per-zone notification per member, ascending.
    let mut seen = Vec::new();
    while seen.len() < 2 {
        let event = tokio::time::timeout(TIMEOUT, observer_events.recv())
            .await
            .expect("timed out")
            .expect("closed");
        if let ClientEvent::State(StateChange::ZoneVolume { zone, volume }) = event {
            assert_eq!(volume, -20);
            seen.push(zone);
        }
    }
    assert_eq!(seen, vec![3, 5]);

    // Origin converges through its own group echo.
    assert_eq!(actor.zones().zone(3).unwrap().volume(), -20);
    assert_eq!(actor.zones().zone(5).unwrap().volume(), -20);
}

#[tokio::test]
async fn test_malformed_request_gets_error_and_session_survives() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let (_simulator, url) = start_simulator().await;
    let authority = url.trim_start_matches("telnet://").to_string();
    let mut stream = tokio::net::TcpStream::connect(&authority).await.unwrap();

    stream.write_all(b"ZZZ\r\nQVO1\r\n").await.unwrap();

    let mut received = Vec::new();
    let mut buffer = [0u8; 256];
    while received.windows(2).filter(|w| w[0] == b'\r' && w[1] == b'\n').count() < 2 {
        let n = tokio::time::timeout(TIMEOUT, stream.read(&mut buffer))
            .await
            .expect("timed out")
            .unwrap();
        assert!(n > 0, "server closed the connection");
        received.extend_from_slice(&buffer[..n]);
    }
    assert_eq!(&received[..], b"ERROR\r\n(VO1,-40)\r\n");
}

#[tokio::test]
async fn test_out_of_bounds_volume_answers_error() {
    let (_simulator, url) = start_simulator().await;
    let app = connected_client(&url).await;

    let result = app.zones().set_volume(1, 42, TIMEOUT).await;
    assert!(matches!(result, Err(ClientError::BadCommand(_))));

    // The session keeps working.
    let volume = app.zones().set_volume(1, -25, TIMEOUT).await.unwrap();
    assert_eq!(volume, -25);
}

#[tokio::test]
async fn test_save_and_load_round_trip() {
    let backup = std::env::temp_dir().join(format!("hlxsimd-test-{}.json", std::process::id()));
    let _ = std::fs::remove_file(&backup);

    let simulator = Simulator::new(Some(backup.clone())).expect("simulator init");
    let local = simulator.start("telnet://127.0.0.1:0").await.expect("listen");
    let url = format!("telnet://{local}");

    let app = connected_client(&url).await;
    app.zones().set_volume(4, -12, TIMEOUT).await.unwrap();
    app.configuration().save_to_backup(TIMEOUT).await.unwrap();

    // Wreck the live state, then restore.
    app.zones().set_volume(4, -60, TIMEOUT).await.unwrap();
    app.configuration().load_from_backup(TIMEOUT).await.unwrap();

    simulator.with_model(|model| {
        assert_eq!(model.zone(4).unwrap().volume(), -12);
    });

    // The client re-syncs with a fresh query after a load.
    app.zones().query(4, TIMEOUT).await.unwrap();
    assert_eq!(app.zones().zone(4).unwrap().volume(), -12);

    let _ = std::fs::remove_file(&backup);
}

#[tokio::test]
async fn test_refresh_reports_monotone_progress() {
    let (_simulator, url) = start_simulator().await;
    let app = connected_client(&url).await;
    let mut events = app.subscribe();

    app.refresh(TIMEOUT).await.unwrap();

    let mut last = 0u8;
    let mut saw_complete = false;
    let mut did_refresh = 0usize;
    while let Ok(event) = events.try_recv() {
        match event {
            ClientEvent::IsRefreshing { percent } => {
                assert!(percent >= last, "progress went backwards");
                last = percent;
                if percent == 100 {
                    saw_complete = true;
                }
                assert_eq!(did_refresh, 0, "progress reported after completion");
            }
            ClientEvent::DidRefresh => did_refresh += 1,
            _ => {}
        }
    }
    assert!(saw_complete);
    assert_eq!(did_refresh, 1, "completion must be delivered exactly once");
}

#[tokio::test]
async fn test_toggle_mute_answers_absolute_form() {
    let (_simulator, url) = start_simulator().await;
    let app = connected_client(&url).await;

    let muted = app.zones().toggle_muted(6, TIMEOUT).await.unwrap();
    assert!(muted);
    let muted = app.zones().toggle_muted(6, TIMEOUT).await.unwrap();
    assert!(!muted);
}

#[tokio::test]
async fn test_unknown_identifier_answers_error() {
    let (_simulator, url) = start_simulator().await;
    let app = connected_client(&url).await;

    let result = app.zones().set_volume(99, -10, TIMEOUT).await;
    assert!(matches!(result, Err(ClientError::BadCommand(_))));
}
