//! Outstanding-request queue and receive-path demultiplexer
//!
//! The controller answers requests in order and interleaves unsolicited
//! notifications on the same line, so the receive path has to decide per
//! frame: is this the response the oldest outstanding request is waiting
//! for, a notification some route wants, or garbage? At most one request is
//! on the wire at a time; the rest wait in a queue and advance as responses,
//! timeouts, or errors retire the one in flight.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use hlx_codec::registry::ErrorFrame;
use hlx_net::{ConnectionEvent, ConnectionManager};
use hlx_wire::CommandPattern;
use parking_lot::{Mutex, RwLock};
use tokio::sync::{broadcast, oneshot, Notify};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, trace, warn};

use crate::error::{ClientError, Result};

/// Invoked with the capture vector of every notification its pattern matches
pub type NotificationHandler = Box<dyn Fn(&[String]) + Send + Sync>;

struct Route {
    pattern: &'static CommandPattern,
    handler: NotificationHandler,
}

/// A completed request: which completion pattern matched, and its captures
pub type Completion = (usize, Vec<String>);

struct InFlight {
    completions: Vec<&'static CommandPattern>,
    done: oneshot::Sender<Result<Completion>>,
    deadline: Instant,
}

struct Waiting {
    frame: Bytes,
    completions: Vec<&'static CommandPattern>,
    done: oneshot::Sender<Result<Completion>>,
    timeout: Duration,
}

#[derive(Default)]
struct Queue {
    in_flight: Option<InFlight>,
    waiting: VecDeque<Waiting>,
}

struct Shared {
    net: Arc<ConnectionManager>,
    queue: Mutex<Queue>,
    routes: RwLock<Vec<Route>>,
    wake: Notify,
}

/// Serializes requests toward one controller and routes received frames
pub struct CommandManager {
    shared: Arc<Shared>,
    driver: JoinHandle<()>,
}

impl CommandManager {
    /// Attach to a connection manager and start the receive driver
    pub fn new(net: Arc<ConnectionManager>) -> Self {
        let shared = Arc::new(Shared {
            net: Arc::clone(&net),
            queue: Mutex::new(Queue::default()),
            routes: RwLock::new(Vec::new()),
            wake: Notify::new(),
        });

        let events = net.subscribe();
        let driver_shared = Arc::clone(&shared);
        let driver = tokio::spawn(async move {
            drive(driver_shared, events).await;
        });

        Self { shared, driver }
    }

    /// Register a notification route
    ///
    /// Every matching route runs for every frame, responses included, so the
    /// mirror also absorbs the state carried by request echoes.
    pub fn add_route(&self, pattern: &'static CommandPattern, handler: NotificationHandler) {
        self.shared.routes.write().push(Route { pattern, handler });
    }

    /// Send a request and wait for the frame matching `completion`
    ///
    /// Returns the completion frame's capture vector. Fails `Timeout` when
    /// the deadline lapses, `BadCommand` when the controller answers `ERROR`
    /// or something unrecognizable, `Cancelled` on disconnect.
    pub async fn invoke(
        &self,
        frame: Bytes,
        completion: &'static CommandPattern,
        timeout: Duration,
    ) -> Result<Vec<String>> {
        let (_, captures) = self.invoke_any(frame, vec![completion], timeout).await?;
        Ok(captures)
    }

    /// Like [`invoke`](Self::invoke) for requests whose response can take
    /// more than one shape, e.g. a balance step that lands on dead center
    ///
    /// Returns the index of the pattern that matched alongside its captures.
    pub async fn invoke_any(
        &self,
        frame: Bytes,
        completions: Vec<&'static CommandPattern>,
        timeout: Duration,
    ) -> Result<Completion> {
        let (done, rx) = oneshot::channel();
        self.shared.submit(frame, completions, timeout, done);
        rx.await.map_err(|_| ClientError::Cancelled)?
    }

    /// Number of requests queued behind the one in flight
    pub fn backlog(&self) -> usize {
        self.shared.queue.lock().waiting.len()
    }
}

impl Drop for CommandManager {
    fn drop(&mut self) {
        self.driver.abort();
        self.shared.cancel_all();
    }
}

impl Shared {
    fn submit(
        &self,
        frame: Bytes,
        completions: Vec<&'static CommandPattern>,
        timeout: Duration,
        done: oneshot::Sender<Result<Completion>>,
    ) {
        let mut queue = self.queue.lock();
        if queue.in_flight.is_none() {
            match self.net.send(frame) {
                Ok(()) => {
                    queue.in_flight = Some(InFlight {
                        completions,
                        done,
                        deadline: Instant::now() + timeout,
                    });
                    self.wake.notify_one();
                }
                Err(e) => {
                    let _ = done.send(Err(e.into()));
                }
            }
        } else {
            queue.waiting.push_back(Waiting {
                frame,
                completions,
                done,
                timeout,
            });
        }
    }

    /// Per-frame demultiplex: completion, then routes, then `ERROR`, then
    /// the unmatched fallback
    fn handle_frame(&self, frame: &[u8]) {
        trace!(frame = %String::from_utf8_lossy(frame), "frame received");
        let mut matched = false;

        {
            let mut queue = self.queue.lock();
            if let Some(in_flight) = queue.in_flight.take() {
                let completed = in_flight
                    .completions
                    .iter()
                    .enumerate()
                    .find_map(|(index, pattern)| {
                        pattern.captures(frame).map(|captures| (index, captures))
                    });
                match completed {
                    Some(completion) => {
                        let _ = in_flight.done.send(Ok(completion));
                        matched = true;
                        self.dispatch_next(&mut queue);
                    }
                    None => queue.in_flight = Some(in_flight),
                }
            }
        }

        for route in self.routes.read().iter() {
            if let Some(captures) = route.pattern.captures(frame) {
                (route.handler)(&captures);
                matched = true;
            }
        }

        if ErrorFrame::matches(frame) {
            let mut queue = self.queue.lock();
            if let Some(in_flight) = queue.in_flight.take() {
                let _ = in_flight
                    .done
                    .send(Err(ClientError::BadCommand("controller answered ERROR".into())));
                self.dispatch_next(&mut queue);
            } else {
                warn!("unsolicited ERROR frame");
            }
            return;
        }

        if !matched {
            let text = String::from_utf8_lossy(frame).into_owned();
            let mut queue = self.queue.lock();
            if let Some(in_flight) = queue.in_flight.take() {
                let _ = in_flight
                    .done
                    .send(Err(ClientError::BadCommand(format!("unrecognized frame '{text}'"))));
                self.dispatch_next(&mut queue);
            } else {
                debug!(frame = %text, "dropped unrecognized frame");
            }
        }
    }

    fn dispatch_next(&self, queue: &mut Queue) {
        while let Some(next) = queue.waiting.pop_front() {
            match self.net.send(next.frame) {
                Ok(()) => {
                    queue.in_flight = Some(InFlight {
                        completions: next.completions,
                        done: next.done,
                        deadline: Instant::now() + next.timeout,
                    });
                    break;
                }
                Err(e) => {
                    let _ = next.done.send(Err(e.into()));
                }
            }
        }
        self.wake.notify_one();
    }

    fn expire_in_flight(&self) {
        let mut queue = self.queue.lock();
        if let Some(in_flight) = queue.in_flight.take() {
            if Instant::now() >= in_flight.deadline {
                let _ = in_flight.done.send(Err(ClientError::Timeout));
                self.dispatch_next(&mut queue);
            } else {
                queue.in_flight = Some(in_flight);
            }
        }
    }

    fn cancel_all(&self) {
        let mut queue = self.queue.lock();
        if let Some(in_flight) = queue.in_flight.take() {
            let _ = in_flight.done.send(Err(ClientError::Cancelled));
        }
        for waiting in queue.waiting.drain(..) {
            let _ = waiting.done.send(Err(ClientError::Cancelled));
        }
    }
}

async fn drive(shared: Arc<Shared>, mut events: broadcast::Receiver<ConnectionEvent>) {
    loop {
        let deadline = shared.queue.lock().in_flight.as_ref().map(|f| f.deadline);

        tokio::select! {
            event = events.recv() => match event {
                Ok(ConnectionEvent::FrameReceived { frame, .. }) => shared.handle_frame(&frame),
                Ok(ConnectionEvent::DidDisconnect { .. }) => shared.cancel_all(),
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    warn!(missed, "receive driver lagged the event stream");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    shared.cancel_all();
                    break;
                }
            },
            _ = sleep_until_or_forever(deadline) => shared.expire_in_flight(),
            _ = shared.wake.notified() => {}
        }
    }
}

async fn sleep_until_or_forever(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hlx_codec::zone;
    use hlx_net::ConnectionManager;

    /// Loopback controller that answers each received request from a script
    async fn scripted_peer(
        replies: Vec<&'static [u8]>,
    ) -> (Arc<ConnectionManager>, std::net::SocketAddr) {
        let server = Arc::new(ConnectionManager::new());
        let local = server.listen("telnet://127.0.0.1:0").await.unwrap();

        let mut events = server.subscribe();
        let script_server = Arc::clone(&server);
        tokio::spawn(async move {
            let mut replies = replies.into_iter();
            while let Ok(event) = events.recv().await {
                if let ConnectionEvent::FrameReceived { peer, .. } = event {
                    if let Some(reply) = replies.next() {
                        if !reply.is_empty() {
                            let _ = script_server
                                .send_to(peer, hlx_wire::LineFramer::frame(reply));
                        }
                    }
                }
            }
        });

        (server, local)
    }

    async fn connected_manager(local: std::net::SocketAddr) -> (Arc<ConnectionManager>, CommandManager) {
        let net = Arc::new(ConnectionManager::new());
        net.connect(&format!("telnet://{local}"), Duration::from_secs(1))
            .await
            .unwrap();
        let commands = CommandManager::new(Arc::clone(&net));
        (net, commands)
    }

    #[tokio::test]
    async fn test_response_completes_request() {
        let (_server, local) = scripted_peer(vec![b"(VO1,-42)"]).await;
        let (_net, commands) = connected_manager(local).await;

        let captures = commands
            .invoke(
                zone::QueryVolume { zone: 1 }.encode_request(),
                zone::Volume::response_pattern(),
                Duration::from_secs(1),
            )
            .await
            .unwrap();
        assert_eq!(captures, vec!["1".to_string(), "-42".to_string()]);
    }

    #[tokio::test]
    async fn test_requests_complete_in_submission_order() {
        let (_server, local) = scripted_peer(vec![b"(VO1,-30)", b"(VO2,-20)"]).await;
        let (_net, commands) = connected_manager(local).await;

        let first = commands.invoke(
            zone::Volume { zone: 1, level: -30 }.encode_request(),
            zone::Volume::response_pattern(),
            Duration::from_secs(1),
        );
        let second = commands.invoke(
            zone::Volume { zone: 2, level: -20 }.encode_request(),
            zone::Volume::response_pattern(),
            Duration::from_secs(1),
        );

        let (first, second) = tokio::join!(first, second);
        assert_eq!(first.unwrap()[0], "1");
        assert_eq!(second.unwrap()[0], "2");
    }

    #[tokio::test]
    async fn test_error_frame_fails_in_flight_request() {
        let (_server, local) = scripted_peer(vec![b"ERROR"]).await;
        let (_net, commands) = connected_manager(local).await;

        let result = commands
            .invoke(
                zone::Volume { zone: 1, level: 40 }.encode_request(),
                zone::Volume::response_pattern(),
                Duration::from_secs(1),
            )
            .await;
        assert!(matches!(result, Err(ClientError::BadCommand(_))));
    }

    #[tokio::test]
    async fn test_timeout_advances_queue() {
        // First request gets no reply, second gets one.
        let (_server, local) = scripted_peer(vec![b"", b"(VO2,-20)"]).await;
        let (_net, commands) = connected_manager(local).await;

        let first = commands.invoke(
            zone::QueryVolume { zone: 1 }.encode_request(),
            zone::Volume::response_pattern(),
            Duration::from_millis(100),
        );
        let second = commands.invoke(
            zone::Volume { zone: 2, level: -20 }.encode_request(),
            zone::Volume::response_pattern(),
            Duration::from_secs(2),
        );

        let (first, second) = tokio::join!(first, second);
        assert!(matches!(first, Err(ClientError::Timeout)));
        assert_eq!(second.unwrap()[0], "2");
    }

    #[tokio::test]
    async fn test_notification_routes_run_without_a_request() {
        let server = Arc::new(ConnectionManager::new());
        let local = server.listen("telnet://127.0.0.1:0").await.unwrap();
        let (net, commands) = connected_manager(local).await;
        let _ = net;

        let (seen_tx, mut seen_rx) = tokio::sync::mpsc::unbounded_channel();
        commands.add_route(
            zone::Volume::response_pattern(),
            Box::new(move |captures| {
                let _ = seen_tx.send(captures.to_vec());
            }),
        );

        // Wait for the accept, then push an unsolicited notification.
        let mut events = server.subscribe();
        while let Ok(event) = events.recv().await {
            if matches!(event, ConnectionEvent::DidAccept { .. }) {
                break;
            }
        }
        let peer = server.peers()[0];
        server
            .send_to(peer, hlx_wire::LineFramer::frame(b"(VO3,-15)"))
            .unwrap();

        let captures = seen_rx.recv().await.unwrap();
        assert_eq!(captures, vec!["3".to_string(), "-15".to_string()]);
    }
}
