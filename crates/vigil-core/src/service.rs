// ── Mock data service ──
//
// Owns the canonical record set, answers queries after an artificial
// delay, and applies mutations through a single command processor task.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rand::rngs::StdRng;
use tokio::sync::{Mutex, broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::command::{Command, CommandEnvelope, CommandResult};
use crate::config::ServiceConfig;
use crate::dashboard;
use crate::error::CoreError;
use crate::generator::Generator;
use crate::model::*;
use crate::store::DataStore;
use crate::stream::{AlertQuery, EntityStream};

const COMMAND_CHANNEL_SIZE: usize = 64;
const EVENT_CHANNEL_SIZE: usize = 256;

// ── ServiceState ─────────────────────────────────────────────────

/// Lifecycle state observable by consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    /// Seeded, command processor not yet running.
    Idle,
    Running,
    /// Shut down; mutations are rejected from here on.
    Stopped,
}

// ── VmsService ───────────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<ServiceInner>`. Queries read the store
/// directly; mutations are routed through [`execute`](Self::execute) so
/// they are applied one at a time, in the order they were issued.
#[derive(Clone)]
pub struct VmsService {
    inner: Arc<ServiceInner>,
}

struct ServiceInner {
    config: ServiceConfig,
    store: Arc<DataStore>,
    generator: Mutex<Generator<StdRng>>,
    state: watch::Sender<ServiceState>,
    available: watch::Sender<bool>,
    event_tx: broadcast::Sender<CameraEvent>,
    command_tx: mpsc::Sender<CommandEnvelope>,
    command_rx: Mutex<Option<mpsc::Receiver<CommandEnvelope>>>,
    cancel: CancellationToken,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
}

impl VmsService {
    /// Validate the configuration and seed the store. Does NOT start the
    /// command processor; call [`start()`](Self::start) before mutating.
    pub fn new(config: ServiceConfig) -> Result<Self, CoreError> {
        config.validate()?;

        let mut generator = match config.seed {
            Some(seed) => Generator::seeded(seed),
            None => Generator::from_entropy(),
        };
        let cameras = generator.cameras(config.camera_count);
        let alerts = generator.alerts(
            config.alert_count,
            &cameras,
            Utc::now(),
            config.unread_probability,
        );

        let store = Arc::new(DataStore::seeded(cameras, alerts, SystemStatus::default()));
        debug!(
            cameras = store.camera_count(),
            alerts = store.alert_count(),
            seed = ?config.seed,
            "store seeded"
        );

        let (state, _) = watch::channel(ServiceState::Idle);
        let (available, _) = watch::channel(true);
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_SIZE);
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_SIZE);

        Ok(Self {
            inner: Arc::new(ServiceInner {
                config,
                store,
                generator: Mutex::new(generator),
                state,
                available,
                event_tx,
                command_tx,
                command_rx: Mutex::new(Some(command_rx)),
                cancel: CancellationToken::new(),
                task_handles: Mutex::new(Vec::new()),
            }),
        })
    }

    /// Access the service configuration.
    pub fn config(&self) -> &ServiceConfig {
        &self.inner.config
    }

    /// Access the underlying DataStore.
    pub fn store(&self) -> &Arc<DataStore> {
        &self.inner.store
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Spawn the command processor. Calling it again while running is a
    /// no-op; a stopped service cannot be restarted.
    pub async fn start(&self) -> Result<(), CoreError> {
        if *self.inner.state.borrow() == ServiceState::Stopped {
            return Err(CoreError::ServiceStopped);
        }

        let mut handles = self.inner.task_handles.lock().await;
        if let Some(rx) = self.inner.command_rx.lock().await.take() {
            let svc = self.clone();
            handles.push(tokio::spawn(command_processor_task(svc, rx)));
        }

        let _ = self.inner.state.send(ServiceState::Running);
        info!(
            cameras = self.inner.store.camera_count(),
            alerts = self.inner.store.alert_count(),
            "service started"
        );
        Ok(())
    }

    /// Cancel background tasks and wait for them to finish.
    ///
    /// Commands still queued are dropped; their callers get
    /// [`CoreError::ServiceStopped`].
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();

        let mut handles = self.inner.task_handles.lock().await;
        for handle in handles.drain(..) {
            let _ = handle.await;
        }

        let _ = self.inner.state.send(ServiceState::Stopped);
        debug!("service stopped");
    }

    /// Subscribe to lifecycle state changes.
    pub fn state(&self) -> watch::Receiver<ServiceState> {
        self.inner.state.subscribe()
    }

    // ── Availability ─────────────────────────────────────────────

    /// Mark the data source up or down. While down, every query fails
    /// with [`CoreError::DataUnavailable`].
    pub fn set_availability(&self, available: bool) {
        let changed = self.inner.available.send_if_modified(|current| {
            let changed = *current != available;
            *current = available;
            changed
        });
        if changed {
            info!(available, "data availability changed");
        }
    }

    pub fn is_available(&self) -> bool {
        *self.inner.available.borrow()
    }

    // ── Command execution ────────────────────────────────────────

    /// Execute a command against the store.
    ///
    /// Sends the command through the internal channel to the command
    /// processor task and awaits the result. No latency is applied here;
    /// the typed mutation methods add it.
    pub async fn execute(&self, cmd: Command) -> Result<CommandResult, CoreError> {
        if *self.inner.state.borrow() != ServiceState::Running {
            return Err(CoreError::ServiceStopped);
        }

        let (tx, rx) = tokio::sync::oneshot::channel();
        self.inner
            .command_tx
            .send(CommandEnvelope {
                command: cmd,
                response_tx: tx,
            })
            .await
            .map_err(|_| CoreError::ServiceStopped)?;

        rx.await.map_err(|_| CoreError::ServiceStopped)?
    }

    // ── One-shot convenience ─────────────────────────────────────

    /// One-shot: build, start, run closure, shut down.
    pub async fn oneshot<F, Fut, T>(config: ServiceConfig, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(VmsService) -> Fut,
        Fut: std::future::Future<Output = Result<T, CoreError>>,
    {
        let service = VmsService::new(config)?;
        service.start().await?;
        let result = f(service.clone()).await;
        service.shutdown().await;
        result
    }

    // ── Queries ──────────────────────────────────────────────────

    /// Every camera, in generation order.
    pub async fn get_cameras(&self) -> Result<Arc<Vec<Arc<Camera>>>, CoreError> {
        self.gate("cameras", self.inner.config.latency.cameras).await?;
        Ok(self.inner.store.cameras_snapshot())
    }

    /// The fixed location catalog.
    pub async fn get_locations(&self) -> Result<Vec<String>, CoreError> {
        self.gate("locations", self.inner.config.latency.locations).await?;
        Ok(LOCATIONS.iter().map(|l| (*l).to_owned()).collect())
    }

    /// Summary counts, jittered gauges, issues, and recent alerts.
    ///
    /// CPU and memory are re-randomized on each call; the canonical
    /// gauges in the store are left untouched.
    pub async fn get_dashboard_data(&self) -> Result<DashboardData, CoreError> {
        self.gate("dashboard", self.inner.config.latency.dashboard).await?;

        let mut status = self.inner.store.system_status();
        {
            let spread = self.inner.config.jitter_spread;
            let mut generator = self.inner.generator.lock().await;
            status.cpu_load_pct = generator.jitter(status.cpu_load_pct, spread);
            status.memory_usage_pct = generator.jitter(status.memory_usage_pct, spread);
        }

        Ok(dashboard::aggregate(
            &self.inner.store.cameras_snapshot(),
            &self.inner.store.alerts_snapshot(),
            status,
            Utc::now(),
        ))
    }

    /// Alerts matching `query`, unread first then newest first.
    pub async fn get_alerts(&self, query: &AlertQuery) -> Result<Vec<Arc<Alert>>, CoreError> {
        self.gate("alerts", self.inner.config.latency.alerts).await?;
        let results = query.apply(&self.inner.store.alerts_snapshot());
        debug!(count = results.len(), "alert query complete");
        Ok(results)
    }

    // ── Mutations ────────────────────────────────────────────────

    /// Unread -> Read. Alerts in any other status are returned unchanged.
    pub async fn acknowledge_alert(&self, id: AlertId) -> Result<Arc<Alert>, CoreError> {
        tokio::time::sleep(self.inner.config.latency.acknowledge).await;
        expect_alert(self.execute(Command::AcknowledgeAlert { id }).await?)
    }

    /// Every Unread alert -> Read. Returns how many changed.
    pub async fn acknowledge_all(&self) -> Result<usize, CoreError> {
        tokio::time::sleep(self.inner.config.latency.acknowledge_all).await;
        match self.execute(Command::AcknowledgeAllAlerts).await? {
            CommandResult::Count(n) => Ok(n),
            other => Err(unexpected(&other)),
        }
    }

    /// Any status -> Resolved, skipping Read.
    pub async fn resolve_alert(&self, id: AlertId) -> Result<Arc<Alert>, CoreError> {
        tokio::time::sleep(self.inner.config.latency.resolve).await;
        expect_alert(self.execute(Command::ResolveAlert { id }).await?)
    }

    /// Soft delete: the record stays in the store with status Deleted.
    pub async fn delete_alert(&self, id: AlertId) -> Result<Arc<Alert>, CoreError> {
        tokio::time::sleep(self.inner.config.latency.delete).await;
        expect_alert(self.execute(Command::DeleteAlert { id }).await?)
    }

    /// Replace a camera and broadcast [`CameraEvent::Updated`].
    pub async fn update_camera(&self, camera: Camera) -> Result<Arc<Camera>, CoreError> {
        tokio::time::sleep(self.inner.config.latency.camera_update).await;
        expect_camera(self.execute(Command::UpdateCamera(camera)).await?)
    }

    /// Remove a camera and broadcast [`CameraEvent::Deleted`]. Alerts
    /// that reference it are kept.
    pub async fn delete_camera(&self, id: CameraId) -> Result<Arc<Camera>, CoreError> {
        tokio::time::sleep(self.inner.config.latency.camera_update).await;
        expect_camera(self.execute(Command::DeleteCamera { id }).await?)
    }

    // ── State observation ────────────────────────────────────────

    /// Subscribe to camera update/delete notifications.
    pub fn camera_events(&self) -> broadcast::Receiver<CameraEvent> {
        self.inner.event_tx.subscribe()
    }

    pub fn subscribe_cameras(&self) -> EntityStream<Camera> {
        self.inner.store.subscribe_cameras()
    }

    pub fn subscribe_alerts(&self) -> EntityStream<Alert> {
        self.inner.store.subscribe_alerts()
    }

    // ── Internals ────────────────────────────────────────────────

    /// Wait out the operation's latency, then decide whether the data
    /// source answers.
    async fn gate(&self, operation: &'static str, delay: Duration) -> Result<(), CoreError> {
        tokio::time::sleep(delay).await;

        if !self.is_available() {
            warn!(operation, "query failed: data source unavailable");
            return Err(CoreError::unavailable(operation));
        }

        let rate = self.inner.config.failure_rate;
        if rate > 0.0 && self.inner.generator.lock().await.chance(rate) {
            warn!(operation, rate, "query failed: injected failure");
            return Err(CoreError::unavailable(operation));
        }

        debug!(operation, "query resolved");
        Ok(())
    }
}

// ── Background tasks ─────────────────────────────────────────────

/// Process commands from the mpsc channel, one at a time.
async fn command_processor_task(service: VmsService, mut rx: mpsc::Receiver<CommandEnvelope>) {
    let cancel = service.inner.cancel.clone();

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            envelope = rx.recv() => {
                let Some(envelope) = envelope else { break };
                let name = envelope.command.name();
                let result = route_command(&service, envelope.command);
                if let Err(ref e) = result {
                    debug!(command = name, error = %e, "command rejected");
                }
                let _ = envelope.response_tx.send(result);
            }
        }
    }
}

// ── Command routing ──────────────────────────────────────────────

fn route_command(service: &VmsService, cmd: Command) -> Result<CommandResult, CoreError> {
    let store = &service.inner.store;

    match cmd {
        // ── Alert lifecycle ──────────────────────────────────────
        Command::AcknowledgeAlert { id } => {
            let changed = store
                .mark_alert_read(id)
                .ok_or(CoreError::AlertNotFound { id })?;
            if changed {
                info!(%id, "alert acknowledged");
            }
            alert_result(store, id)
        }

        Command::AcknowledgeAllAlerts => {
            let count = store.mark_all_alerts_read();
            info!(count, "all alerts acknowledged");
            Ok(CommandResult::Count(count))
        }

        Command::ResolveAlert { id } => {
            store
                .set_alert_status(id, AlertStatus::Resolved)
                .ok_or(CoreError::AlertNotFound { id })?;
            info!(%id, "alert resolved");
            alert_result(store, id)
        }

        Command::DeleteAlert { id } => {
            store
                .set_alert_status(id, AlertStatus::Deleted)
                .ok_or(CoreError::AlertNotFound { id })?;
            info!(%id, "alert deleted");
            alert_result(store, id)
        }

        // ── Camera operations ────────────────────────────────────
        Command::UpdateCamera(camera) => {
            if camera.name.trim().is_empty() {
                return Err(CoreError::ValidationFailed {
                    message: "camera name must not be empty".into(),
                });
            }

            let id = camera.id.clone();
            if !store.update_camera(camera) {
                return Err(CoreError::CameraNotFound { id });
            }
            let updated = store
                .camera_by_id(&id)
                .ok_or_else(|| CoreError::CameraNotFound { id: id.clone() })?;

            info!(%id, name = %updated.name, "camera updated");
            let _ = service
                .inner
                .event_tx
                .send(CameraEvent::Updated(Arc::clone(&updated)));
            Ok(CommandResult::Camera(updated))
        }

        Command::DeleteCamera { id } => {
            let removed = store
                .remove_camera(&id)
                .ok_or_else(|| CoreError::CameraNotFound { id: id.clone() })?;

            info!(%id, "camera deleted");
            let _ = service
                .inner
                .event_tx
                .send(CameraEvent::Deleted(Arc::clone(&removed)));
            Ok(CommandResult::Camera(removed))
        }
    }
}

// ── Helpers ──────────────────────────────────────────────────────

fn alert_result(store: &DataStore, id: AlertId) -> Result<CommandResult, CoreError> {
    store
        .alert_by_id(id)
        .map(CommandResult::Alert)
        .ok_or(CoreError::AlertNotFound { id })
}

fn expect_alert(result: CommandResult) -> Result<Arc<Alert>, CoreError> {
    match result {
        CommandResult::Alert(alert) => Ok(alert),
        other => Err(unexpected(&other)),
    }
}

fn expect_camera(result: CommandResult) -> Result<Arc<Camera>, CoreError> {
    match result {
        CommandResult::Camera(camera) => Ok(camera),
        other => Err(unexpected(&other)),
    }
}

fn unexpected(result: &CommandResult) -> CoreError {
    CoreError::Internal(format!("unexpected command result: {result:?}"))
}
