use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::Message;

use gallery_engine::{ChannelHandle, EngineEvent, Envelope, EventSink, OUTBOUND_EVENT};

#[derive(Default)]
struct TestSink {
    events: Arc<Mutex<Vec<EngineEvent>>>,
}

impl TestSink {
    fn new() -> (Arc<Self>, Arc<Mutex<Vec<EngineEvent>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::new(Self {
            events: events.clone(),
        });
        (sink, events)
    }
}

impl EventSink for TestSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}

async fn wait_for<F>(events: &Arc<Mutex<Vec<EngineEvent>>>, predicate: F)
where
    F: Fn(&EngineEvent) -> bool,
{
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    loop {
        if events.lock().unwrap().iter().any(&predicate) {
            return;
        }
        assert!(
            tokio::time::Instant::now() < deadline,
            "event did not arrive in time"
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

fn envelope(event: &str, data: serde_json::Value) -> String {
    serde_json::to_string(&Envelope {
        event: event.to_string(),
        data,
    })
    .unwrap()
}

/// Stands in for the demo server: greets with `initialise`, then echoes every
/// `main_socket` payload back as `exchange`.
async fn spawn_echo_server() -> std::net::SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut socket = tokio_tungstenite::accept_async(stream).await.unwrap();
        socket
            .send(Message::Text(envelope("initialise", serde_json::Value::Null)))
            .await
            .unwrap();
        while let Some(Ok(Message::Text(text))) = socket.next().await {
            let inbound: Envelope = serde_json::from_str(&text).unwrap();
            if inbound.event == OUTBOUND_EVENT {
                let reply = envelope("exchange", inbound.data);
                if socket.send(Message::Text(reply)).await.is_err() {
                    break;
                }
            }
        }
    });
    addr
}

#[tokio::test]
async fn emit_round_trips_as_exchange() {
    let addr = spawn_echo_server().await;
    let (sink, events) = TestSink::new();

    let handle = ChannelHandle::connect(&format!("ws://{addr}/"), sink)
        .await
        .expect("connect");
    handle.emit(OUTBOUND_EVENT, "ola".to_string());

    wait_for(&events, |event| {
        matches!(
            event,
            EngineEvent::ChannelInbound { event, payload }
                if event == "exchange" && payload == "ola"
        )
    })
    .await;

    // The greeting arrived too, ahead of the echo.
    let seen = events.lock().unwrap().clone();
    assert!(matches!(
        seen.first(),
        Some(EngineEvent::ChannelInbound { event, .. }) if event == "initialise"
    ));

    handle.disconnect();
}

#[tokio::test]
async fn server_close_surfaces_channel_closed() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut socket = tokio_tungstenite::accept_async(stream).await.unwrap();
        socket.close(None).await.unwrap();
    });

    let (sink, events) = TestSink::new();
    let handle = ChannelHandle::connect(&format!("ws://{addr}/"), sink)
        .await
        .expect("connect");

    wait_for(&events, |event| matches!(event, EngineEvent::ChannelClosed)).await;

    // Fire-and-forget: emitting into the closed channel must not panic and
    // must not produce further events.
    handle.emit(OUTBOUND_EVENT, "ola".to_string());
    tokio::time::sleep(Duration::from_millis(50)).await;
    let seen = events.lock().unwrap().clone();
    assert_eq!(
        seen.iter()
            .filter(|event| matches!(event, EngineEvent::ChannelInbound { .. }))
            .count(),
        0
    );
}

#[tokio::test]
async fn connect_fails_cleanly_when_nobody_listens() {
    let (sink, _events) = TestSink::new();
    // Bind-then-drop to get a port with no listener.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = ChannelHandle::connect(&format!("ws://{addr}/"), sink).await;
    assert!(result.is_err());
}
