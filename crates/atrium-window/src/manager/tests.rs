use super::*;
use async_trait::async_trait;
use atrium_rpc::{ErrorCode, RpcError, RpcErrorPayload};
use serde_json::{json, Value};
use std::sync::Mutex;
use std::time::Duration;

use crate::state::WindowState;

// -----------------------------------------------------------------------------
// Fakes
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum Op {
    Create(WindowSpec),
    Show,
    Focus,
    Restore,
    LoadUrl(String),
    Devtools,
    Transfer(String),
    Title(String),
    Theme(ThemeSource),
    Destroy,
}

/// Shared record of everything the fake windows were asked to do.
#[derive(Clone, Default)]
struct Journal {
    ops: Arc<Mutex<Vec<(WindowId, Op)>>>,
    ports: Arc<Mutex<Vec<(WindowId, Endpoint)>>>,
}

impl Journal {
    fn record(&self, id: WindowId, op: Op) {
        self.ops.lock().unwrap().push((id, op));
    }

    fn ops_for(&self, id: WindowId) -> Vec<Op> {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .filter(|(w, _)| *w == id)
            .map(|(_, op)| op.clone())
            .collect()
    }

    fn count(&self, pred: impl Fn(&Op) -> bool) -> usize {
        self.ops.lock().unwrap().iter().filter(|(_, op)| pred(op)).count()
    }

    fn take_port(&self, id: WindowId) -> Option<Endpoint> {
        let mut ports = self.ports.lock().unwrap();
        let index = ports.iter().position(|(w, _)| *w == id)?;
        Some(ports.remove(index).1)
    }

    fn port_count(&self) -> usize {
        self.ports.lock().unwrap().len()
    }
}

struct FakeWindow {
    id: WindowId,
    journal: Journal,
    minimized: bool,
    fail_load: bool,
    fail_transfer: bool,
}

impl PlatformWindow for FakeWindow {
    fn show(&mut self) {
        self.journal.record(self.id, Op::Show);
    }

    fn focus(&mut self) {
        self.journal.record(self.id, Op::Focus);
    }

    fn is_minimized(&self) -> bool {
        self.minimized
    }

    fn restore(&mut self) {
        self.minimized = false;
        self.journal.record(self.id, Op::Restore);
    }

    fn load_url(&mut self, url: &str) -> Result<(), WindowError> {
        self.journal.record(self.id, Op::LoadUrl(url.to_owned()));
        if self.fail_load {
            return Err(WindowError::Load {
                url: url.to_owned(),
                reason: "connection refused".into(),
            });
        }
        Ok(())
    }

    fn open_devtools(&mut self) {
        self.journal.record(self.id, Op::Devtools);
    }

    fn transfer_port(&mut self, channel: &str, endpoint: Endpoint) -> Result<(), WindowError> {
        self.journal.record(self.id, Op::Transfer(channel.to_owned()));
        if self.fail_transfer {
            return Err(WindowError::Channel("content gone".into()));
        }
        self.journal.ports.lock().unwrap().push((self.id, endpoint));
        Ok(())
    }

    fn set_title(&mut self, title: &str) {
        self.journal.record(self.id, Op::Title(title.to_owned()));
    }

    fn set_theme(&mut self, theme: ThemeSource) {
        self.journal.record(self.id, Op::Theme(theme));
    }

    fn destroy(&mut self) {
        self.journal.record(self.id, Op::Destroy);
    }
}

#[derive(Default)]
struct FakeBackend {
    journal: Journal,
    fail_create: bool,
    fail_load: bool,
    fail_transfer: bool,
}

impl WindowBackend for FakeBackend {
    type Window = FakeWindow;

    fn create_window(&mut self, spec: &WindowSpec) -> Result<FakeWindow, WindowError> {
        if self.fail_create {
            return Err(WindowError::Create("no display".into()));
        }
        self.journal.record(spec.id, Op::Create(spec.clone()));
        Ok(FakeWindow {
            id: spec.id,
            journal: self.journal.clone(),
            minimized: false,
            fail_load: self.fail_load,
            fail_transfer: self.fail_transfer,
        })
    }
}

struct PingSurface;

#[async_trait]
impl Surface for PingSurface {
    async fn call(&self, method: &str, _params: Vec<Value>) -> Result<Value, RpcErrorPayload> {
        match method {
            "ping" => Ok(json!("pong")),
            "hang" => std::future::pending().await,
            _ => Err(RpcErrorPayload::unknown_method(method)),
        }
    }
}

struct Fixture {
    _dir: tempfile::TempDir,
    store: WindowStateStore,
    manager: WindowManager<FakeWindow>,
    backend: FakeBackend,
}

fn fixture_with(settings: WindowSettings) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let store = WindowStateStore::new(dir.path().join("window-state.json"));
    let manager = WindowManager::new(store.clone(), Arc::new(PingSurface), settings);
    Fixture {
        _dir: dir,
        store,
        manager,
        backend: FakeBackend::default(),
    }
}

fn fixture() -> Fixture {
    fixture_with(WindowSettings::default())
}

fn created_spec(journal: &Journal, id: WindowId) -> WindowSpec {
    journal
        .ops_for(id)
        .into_iter()
        .find_map(|op| match op {
            Op::Create(spec) => Some(spec),
            _ => None,
        })
        .expect("window was never created")
}

async fn within<F: std::future::Future>(fut: F) -> F::Output {
    tokio::time::timeout(Duration::from_secs(2), fut)
        .await
        .expect("timed out")
}

/// Drive a freshly created window through first paint and content load.
fn bring_up(f: &mut Fixture, id: WindowId) {
    f.manager.handle_signal(id, WindowSignal::ReadyToShow).unwrap();
    f.manager.handle_signal(id, WindowSignal::ContentLoaded).unwrap();
}

// -----------------------------------------------------------------------------
// Singleton
// -----------------------------------------------------------------------------

#[tokio::test]
async fn show_window_twice_reuses_the_window() {
    let mut f = fixture();
    let first = f.manager.show_window(&mut f.backend).unwrap();
    let second = f.manager.show_window(&mut f.backend).unwrap();

    assert_eq!(first.id(), second.id());
    assert_eq!(f.backend.journal.count(|op| matches!(op, Op::Create(_))), 1);

    bring_up(&mut f, first.id());
    f.manager.show_window(&mut f.backend).unwrap();
    assert_eq!(f.backend.journal.port_count(), 1);
}

#[tokio::test]
async fn reuse_restores_minimized_then_focuses() {
    let mut f = fixture();
    let handle = f.manager.show_window(&mut f.backend).unwrap();
    bring_up(&mut f, handle.id());
    f.manager.current_window_mut().unwrap().minimized = true;

    f.manager.show_window(&mut f.backend).unwrap();

    let ops = f.backend.journal.ops_for(handle.id());
    let tail = &ops[ops.len() - 3..];
    assert_eq!(tail, &[Op::Restore, Op::Show, Op::Focus]);
}

#[tokio::test]
async fn reuse_before_ready_does_not_show_early() {
    let mut f = fixture();
    let handle = f.manager.show_window(&mut f.backend).unwrap();
    f.manager.show_window(&mut f.backend).unwrap();

    assert_eq!(f.backend.journal.count(|op| *op == Op::Show), 0);
    assert!(!handle.is_visible());
}

#[tokio::test]
async fn close_then_show_creates_fresh_window_and_channel() {
    let mut f = fixture();
    let first = f.manager.show_window(&mut f.backend).unwrap();
    bring_up(&mut f, first.id());
    let first_port = f.backend.journal.take_port(first.id()).unwrap();

    f.manager.close();
    assert!(first.is_destroyed());
    assert!(f.manager.current().is_none());
    assert!(first_port.is_closed());

    let second = f.manager.show_window(&mut f.backend).unwrap();
    assert_ne!(first.id(), second.id());
    bring_up(&mut f, second.id());

    let second_port = f.backend.journal.take_port(second.id()).unwrap();
    assert_ne!(first_port.pair_id(), second_port.pair_id());
    assert!(!second_port.is_closed());
}

#[tokio::test]
async fn close_request_destroys_window() {
    let mut f = fixture();
    let handle = f.manager.show_window(&mut f.backend).unwrap();
    bring_up(&mut f, handle.id());

    f.manager
        .handle_signal(handle.id(), WindowSignal::CloseRequested)
        .unwrap();

    assert!(handle.is_destroyed());
    assert!(f.manager.current().is_none());
    assert_eq!(f.backend.journal.ops_for(handle.id()).last(), Some(&Op::Destroy));
}

// -----------------------------------------------------------------------------
// Geometry
// -----------------------------------------------------------------------------

#[tokio::test]
async fn defaults_without_saved_state() {
    let mut f = fixture();
    let handle = f.manager.show_window(&mut f.backend).unwrap();

    let spec = created_spec(&f.backend.journal, handle.id());
    assert_eq!(spec.bounds, Bounds::sized(1000, 800));
    assert_eq!(spec.min_width, 640);
    assert!(!spec.maximized);
    assert_eq!(handle.bounds(), Bounds::sized(1000, 800));
}

#[tokio::test]
async fn saved_bounds_restored_exactly() {
    let mut f = fixture();
    let saved = Bounds::sized(1200, 900).with_position(100, 50);
    f.store
        .save(
            MAIN_KEY,
            &WindowState {
                bounds: saved,
                maximized: false,
            },
        )
        .unwrap();

    let handle = f.manager.show_window(&mut f.backend).unwrap();
    assert_eq!(created_spec(&f.backend.journal, handle.id()).bounds, saved);
}

#[tokio::test]
async fn saved_maximized_flag_restored() {
    let mut f = fixture();
    f.store
        .save(
            MAIN_KEY,
            &WindowState {
                bounds: Bounds::sized(1000, 800),
                maximized: true,
            },
        )
        .unwrap();

    let handle = f.manager.show_window(&mut f.backend).unwrap();
    assert!(created_spec(&f.backend.journal, handle.id()).maximized);
}

#[tokio::test]
async fn maximized_restore_keeps_saved_size_on_resize() {
    let mut f = fixture();
    let saved = WindowState {
        bounds: Bounds::sized(1200, 900).with_position(100, 50),
        maximized: true,
    };
    f.store.save(MAIN_KEY, &saved).unwrap();

    let handle = f.manager.show_window(&mut f.backend).unwrap();
    f.manager
        .handle_signal(handle.id(), WindowSignal::BoundsChanged(Bounds::sized(2560, 1440)))
        .unwrap();

    assert_eq!(f.store.load(MAIN_KEY), Some(saved));
}

#[tokio::test]
async fn saved_width_below_minimum_is_clamped() {
    let mut f = fixture();
    f.store
        .save(
            MAIN_KEY,
            &WindowState {
                bounds: Bounds::sized(300, 700),
                maximized: false,
            },
        )
        .unwrap();

    let handle = f.manager.show_window(&mut f.backend).unwrap();
    let spec = created_spec(&f.backend.journal, handle.id());
    assert_eq!(spec.bounds.width, 640);
    assert_eq!(spec.bounds.height, 700);
}

#[tokio::test]
async fn corrupt_state_falls_back_to_defaults() {
    let mut f = fixture();
    std::fs::write(f.store.path(), "][").unwrap();

    let handle = f.manager.show_window(&mut f.backend).unwrap();
    assert_eq!(
        created_spec(&f.backend.journal, handle.id()).bounds,
        Bounds::sized(1000, 800)
    );
}

#[tokio::test]
async fn bounds_changes_persist_until_destroyed() {
    let mut f = fixture();
    let handle = f.manager.show_window(&mut f.backend).unwrap();
    let id = handle.id();

    let moved = Bounds::sized(1280, 720).with_position(5, 6);
    f.manager
        .handle_signal(id, WindowSignal::BoundsChanged(moved))
        .unwrap();
    assert_eq!(f.store.load(MAIN_KEY).unwrap().bounds, moved);
    assert_eq!(handle.bounds(), moved);

    f.manager.close();
    f.manager
        .handle_signal(id, WindowSignal::BoundsChanged(Bounds::sized(10, 10)))
        .unwrap();
    handle.emit(&WindowSignal::BoundsChanged(Bounds::sized(20, 20)));
    assert_eq!(f.store.load(MAIN_KEY).unwrap().bounds, moved);
}

#[tokio::test]
async fn reshow_uses_bounds_saved_by_previous_window() {
    let mut f = fixture();
    let first = f.manager.show_window(&mut f.backend).unwrap();
    let moved = Bounds::sized(900, 650).with_position(40, 30);
    f.manager
        .handle_signal(first.id(), WindowSignal::BoundsChanged(moved))
        .unwrap();
    f.manager.close();

    let second = f.manager.show_window(&mut f.backend).unwrap();
    assert_eq!(created_spec(&f.backend.journal, second.id()).bounds, moved);
}

// -----------------------------------------------------------------------------
// Show and handshake
// -----------------------------------------------------------------------------

#[tokio::test]
async fn window_is_created_hidden_and_shown_once_ready() {
    let mut f = fixture();
    let handle = f.manager.show_window(&mut f.backend).unwrap();
    let id = handle.id();

    assert!(!handle.is_visible());
    assert_eq!(
        f.backend.journal.ops_for(id)[1],
        Op::LoadUrl("atrium://localhost/index.html".into())
    );

    f.manager.handle_signal(id, WindowSignal::ReadyToShow).unwrap();
    f.manager.handle_signal(id, WindowSignal::ReadyToShow).unwrap();

    assert!(handle.is_visible());
    assert_eq!(f.backend.journal.count(|op| *op == Op::Show), 1);
    assert_eq!(f.backend.journal.count(|op| *op == Op::Devtools), 0);
}

#[tokio::test]
async fn dev_mode_opens_devtools_on_show() {
    let mut settings = WindowSettings::default();
    settings.devtools_on_show = true;
    settings.content_url = "http://localhost:8080".into();
    let mut f = fixture_with(settings);

    let handle = f.manager.show_window(&mut f.backend).unwrap();
    assert!(created_spec(&f.backend.journal, handle.id()).devtools);
    assert!(f
        .backend
        .journal
        .ops_for(handle.id())
        .contains(&Op::LoadUrl("http://localhost:8080".into())));

    f.manager
        .handle_signal(handle.id(), WindowSignal::ReadyToShow)
        .unwrap();
    assert_eq!(f.backend.journal.count(|op| *op == Op::Devtools), 1);
}

#[tokio::test]
async fn handshake_sent_once_after_content_load() {
    let mut f = fixture();
    let handle = f.manager.show_window(&mut f.backend).unwrap();
    let id = handle.id();
    assert_eq!(f.backend.journal.port_count(), 0);

    f.manager.handle_signal(id, WindowSignal::ContentLoaded).unwrap();
    f.manager.handle_signal(id, WindowSignal::ContentLoaded).unwrap();

    let transfers = f
        .backend
        .journal
        .count(|op| matches!(op, Op::Transfer(c) if c == "main-world-port"));
    assert_eq!(transfers, 1);
    assert_eq!(f.backend.journal.port_count(), 1);
}

#[tokio::test]
async fn transferred_port_reaches_host_surface() {
    let mut f = fixture();
    let handle = f.manager.show_window(&mut f.backend).unwrap();
    bring_up(&mut f, handle.id());

    let port = f.backend.journal.take_port(handle.id()).unwrap();
    let content = atrium_rpc::RpcPeer::connect(port);

    assert_eq!(within(content.call("ping", vec![])).await.unwrap(), json!("pong"));
    let err = within(content.call("nope", vec![])).await.unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::UnknownMethod));
}

#[tokio::test]
async fn destroy_rejects_pending_content_calls() {
    let mut f = fixture();
    let handle = f.manager.show_window(&mut f.backend).unwrap();
    bring_up(&mut f, handle.id());

    let content = Arc::new(atrium_rpc::RpcPeer::connect(
        f.backend.journal.take_port(handle.id()).unwrap(),
    ));
    let caller = Arc::clone(&content);
    let pending = tokio::spawn(async move { caller.call("hang", vec![]).await });
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(content.pending_calls(), 1);

    f.manager
        .handle_signal(handle.id(), WindowSignal::CloseRequested)
        .unwrap();

    assert_eq!(within(pending).await.unwrap(), Err(RpcError::ChannelClosed));
}

#[tokio::test]
async fn failed_handoff_tears_window_down() {
    let mut f = fixture();
    f.backend.fail_transfer = true;
    let handle = f.manager.show_window(&mut f.backend).unwrap();

    let err = f
        .manager
        .handle_signal(handle.id(), WindowSignal::ContentLoaded)
        .unwrap_err();
    assert!(matches!(err, WindowError::Channel(_)));
    assert!(handle.is_destroyed());
    assert!(f.manager.current().is_none());
}

// -----------------------------------------------------------------------------
// Failures and stale events
// -----------------------------------------------------------------------------

#[tokio::test]
async fn create_failure_leaves_no_window() {
    let mut f = fixture();
    f.backend.fail_create = true;

    let err = f.manager.show_window(&mut f.backend).unwrap_err();
    assert!(matches!(err, WindowError::Create(_)));
    assert!(f.manager.current().is_none());

    f.backend.fail_create = false;
    assert!(f.manager.show_window(&mut f.backend).is_ok());
}

#[tokio::test]
async fn load_failure_destroys_window_and_propagates() {
    let mut f = fixture();
    f.backend.fail_load = true;

    let err = f.manager.show_window(&mut f.backend).unwrap_err();
    assert!(matches!(err, WindowError::Load { .. }));
    assert!(f.manager.current().is_none());
    assert_eq!(f.backend.journal.count(|op| *op == Op::Destroy), 1);
    assert_eq!(f.store.load(MAIN_KEY), None);
}

#[tokio::test]
async fn stale_signals_are_ignored() {
    let mut f = fixture();
    let first = f.manager.show_window(&mut f.backend).unwrap();
    f.manager.close();
    let second = f.manager.show_window(&mut f.backend).unwrap();

    f.manager
        .handle_signal(first.id(), WindowSignal::ReadyToShow)
        .unwrap();
    f.manager
        .handle_signal(first.id(), WindowSignal::CloseRequested)
        .unwrap();

    assert!(!second.is_destroyed());
    assert!(!second.is_visible());
    assert_eq!(f.manager.current().map(|h| h.id()), Some(second.id()));
}

#[tokio::test]
async fn signals_reach_handle_subscribers() {
    let mut f = fixture();
    let handle = f.manager.show_window(&mut f.backend).unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let _sub = handle.subscribe(move |s| sink.lock().unwrap().push(s.clone()));

    f.manager
        .handle_signal(handle.id(), WindowSignal::Maximized(true))
        .unwrap();
    f.manager
        .handle_signal(handle.id(), WindowSignal::ReadyToShow)
        .unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![WindowSignal::Maximized(true), WindowSignal::ReadyToShow]
    );
}

#[tokio::test]
async fn lifecycle_events_published() {
    let bus = EventBus::new(8);
    let mut rx = bus.subscribe();
    let dir = tempfile::tempdir().unwrap();
    let store = WindowStateStore::new(dir.path().join("window-state.json"));
    let mut manager: WindowManager<FakeWindow> =
        WindowManager::new(store, Arc::new(PingSurface), WindowSettings::default())
            .with_events(bus);
    let mut backend = FakeBackend::default();

    let handle = manager.show_window(&mut backend).unwrap();
    manager.close();

    assert_eq!(rx.try_recv().unwrap(), HostEvent::WindowCreated(handle.id()));
    assert_eq!(rx.try_recv().unwrap(), HostEvent::WindowDestroyed(handle.id()));
}

// -----------------------------------------------------------------------------
// Chrome
// -----------------------------------------------------------------------------

#[tokio::test]
async fn theme_names_from_content_update_chrome() {
    let mut f = fixture();
    let handle = f.manager.show_window(&mut f.backend).unwrap();

    f.manager.apply_theme("dark");
    f.manager.apply_theme("neon");
    f.manager.apply_theme(" System ");
    f.manager.set_title("Atrium - notes");

    let ops = f.backend.journal.ops_for(handle.id());
    assert!(ops.contains(&Op::Theme(ThemeSource::Dark)));
    assert!(ops.contains(&Op::Theme(ThemeSource::System)));
    assert_eq!(f.backend.journal.count(|op| matches!(op, Op::Theme(_))), 2);
    assert!(ops.contains(&Op::Title("Atrium - notes".into())));
}

#[tokio::test]
async fn chrome_calls_without_window_are_noops() {
    let mut f = fixture();
    f.manager.apply_theme("dark");
    f.manager.set_title("nothing");
    f.manager.close();
    assert_eq!(f.backend.journal.count(|_| true), 0);
}

const MAIN_KEY: &str = crate::state::MAIN_WINDOW_KEY;
