//! Digital line instance and event fan-out.
//!
//! A [`DigitalIo`] holds the current state of one claimed line plus two
//! ordered consumer lists: listeners (notification only) and bindings
//! (may report failure). Every state transition pushed by the provider is
//! delivered to all listeners, then all bindings. Each consumer call is
//! isolated: panics and binding errors are logged and collected into the
//! [`DispatchReport`], never propagated.
//!
//! # Concurrency
//!
//! Events are queued per line and delivered in order by one thread at a
//! time, each from a snapshot of the consumer lists; no lock is held while
//! user code runs. Consumer changes take effect immediately: a consumer
//! added during an event first sees the next one, and a removed consumer
//! is skipped even within the current snapshot. `remove_listener`,
//! `unbind` and `shutdown` called from another thread return only after
//! the event in flight has been delivered. Callbacks must not wait on
//! another line's removal that in turn waits on this line.
//!
//! # Lifecycle
//!
//! `Created` → `Active` (first consumer or first state update) →
//! `Shutdown` (terminal).

use core::fmt;
use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::collections::VecDeque;
use std::sync::{
    Arc, Condvar, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak,
};
use std::thread::{self, ThreadId};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use sbc_common::io::config::{DigitalConfig, LineHandle};
use sbc_common::io::state::{DigitalState, DigitalStateChangeEvent};
use sbc_common::provider::{DigitalProvider, LineSink, ProviderError};

// ─── Consumers ──────────────────────────────────────────────────────

/// Error a binding reports for one event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct BindingError(pub String);

impl BindingError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Notified of every state change on the line it is attached to.
pub trait DigitalStateChangeListener: Send + Sync {
    fn on_digital_state_change(&self, event: &DigitalStateChangeEvent);
}

/// Processes every state change on the line it is bound to.
pub trait DigitalBinding: Send + Sync {
    fn process(&self, event: &DigitalStateChangeEvent) -> Result<(), BindingError>;
}

impl<F> DigitalStateChangeListener for F
where
    F: Fn(&DigitalStateChangeEvent) + Send + Sync,
{
    fn on_digital_state_change(&self, event: &DigitalStateChangeEvent) {
        self(event)
    }
}

impl<F> DigitalBinding for F
where
    F: Fn(&DigitalStateChangeEvent) -> Result<(), BindingError> + Send + Sync,
{
    fn process(&self, event: &DigitalStateChangeEvent) -> Result<(), BindingError> {
        self(event)
    }
}

// ─── Dispatch report ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumerKind {
    Listener,
    Binding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The consumer panicked.
    Panic,
    /// The binding returned an error.
    Error,
}

/// One consumer that failed to handle an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumerFailure {
    pub consumer: ConsumerKind,
    /// Position in its list at delivery time.
    pub position: usize,
    pub kind: FailureKind,
    pub message: String,
}

impl fmt::Display for ConsumerFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} #{} {}: {}",
            self.consumer,
            self.position,
            match self.kind {
                FailureKind::Panic => "panicked",
                FailureKind::Error => "failed",
            },
            self.message
        )
    }
}

/// Outcome of delivering one or more events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Successful consumer calls.
    pub delivered: usize,
    pub failures: Vec<ConsumerFailure>,
}

impl DispatchReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn merge(&mut self, other: DispatchReport) {
        self.delivered += other.delivered;
        self.failures.extend(other.failures);
    }
}

// ─── DigitalIo ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Created,
    Active,
    Shutdown,
}

type Listener = Arc<dyn DigitalStateChangeListener>;
type Binding = Arc<dyn DigitalBinding>;

fn same<T: ?Sized>(a: &Arc<T>, b: &Arc<T>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn read<T>(rw: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    rw.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(rw: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    rw.write().unwrap_or_else(PoisonError::into_inner)
}

fn contains<T: ?Sized>(list: &RwLock<Vec<Arc<T>>>, consumer: &Arc<T>) -> bool {
    read(list).iter().any(|c| same(c, consumer))
}

/// Pending events and the thread delivering them.
#[derive(Default)]
struct Fanout {
    queue: VecDeque<DigitalStateChangeEvent>,
    drainer: Option<ThreadId>,
    /// Bumped by every consumer removal.
    generation: u64,
    /// `generation` when the drainer snapshotted the consumer lists.
    snapshot: u64,
}

impl Fanout {
    /// Another thread is delivering from lists taken before `generation`.
    fn delivering_before(&self, generation: u64, me: ThreadId) -> bool {
        matches!(self.drainer, Some(t) if t != me) && self.snapshot < generation
    }
}

/// One claimed digital line.
pub struct DigitalIo {
    config: DigitalConfig,
    provider_id: String,
    provider: Weak<dyn DigitalProvider>,
    state: Mutex<DigitalState>,
    lifecycle: Mutex<Lifecycle>,
    listeners: RwLock<Vec<Listener>>,
    bindings: RwLock<Vec<Binding>>,
    fanout: Mutex<Fanout>,
    /// Notified whenever the drainer takes a new snapshot or stops.
    settled: Condvar,
}

static_assertions::assert_impl_all!(DigitalIo: Send, Sync);

impl DigitalIo {
    pub fn new(config: DigitalConfig, handle: &LineHandle, provider: Weak<dyn DigitalProvider>) -> Self {
        let state = config.initial_state.unwrap_or(handle.initial_state);
        Self {
            config,
            provider_id: handle.provider_id.clone(),
            provider,
            state: Mutex::new(state),
            lifecycle: Mutex::new(Lifecycle::Created),
            listeners: RwLock::new(Vec::new()),
            bindings: RwLock::new(Vec::new()),
            fanout: Mutex::new(Fanout::default()),
            settled: Condvar::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.config.id
    }

    pub fn name(&self) -> &str {
        self.config.display_name()
    }

    pub fn line(&self) -> u8 {
        self.config.line
    }

    pub fn config(&self) -> &DigitalConfig {
        &self.config
    }

    pub fn provider_id(&self) -> &str {
        &self.provider_id
    }

    /// Owning provider, if it is still alive.
    pub fn provider(&self) -> Option<Arc<dyn DigitalProvider>> {
        self.provider.upgrade()
    }

    pub fn state(&self) -> DigitalState {
        *lock(&self.state)
    }

    /// True when the last known state is high. Unchanged by shutdown.
    pub fn is_on(&self) -> bool {
        self.state().is_high()
    }

    pub fn is_off(&self) -> bool {
        self.state().is_low()
    }

    pub fn lifecycle(&self) -> Lifecycle {
        *lock(&self.lifecycle)
    }

    pub fn is_shutdown(&self) -> bool {
        self.lifecycle() == Lifecycle::Shutdown
    }

    pub fn listener_count(&self) -> usize {
        read(&self.listeners).len()
    }

    pub fn binding_count(&self) -> usize {
        read(&self.bindings).len()
    }

    // ─── Consumers ──────────────────────────────────────────────────

    pub fn add_listener(&self, listeners: &[Listener]) -> &Self {
        self.attach_consumers(&self.listeners, listeners, "add_listener");
        self
    }

    /// Returns once no delivery to `listeners` is in progress on another
    /// thread.
    pub fn remove_listener(&self, listeners: &[Listener]) -> &Self {
        self.detach_consumers(&self.listeners, listeners);
        self
    }

    pub fn bind(&self, bindings: &[Binding]) -> &Self {
        self.attach_consumers(&self.bindings, bindings, "bind");
        self
    }

    /// Same completion guarantee as [`remove_listener`](Self::remove_listener).
    pub fn unbind(&self, bindings: &[Binding]) -> &Self {
        self.detach_consumers(&self.bindings, bindings);
        self
    }

    // ─── State ──────────────────────────────────────────────────────

    /// Drive the line through its provider. The resulting transition comes
    /// back through [`LineSink::apply_state`].
    pub fn write(&self, state: DigitalState) -> Result<(), ProviderError> {
        if self.is_shutdown() {
            return Err(ProviderError::Unsupported(format!(
                "line '{}' is shut down",
                self.id()
            )));
        }
        let provider = self.provider().ok_or_else(|| {
            ProviderError::Unsupported(format!("provider '{}' is gone", self.provider_id))
        })?;
        provider.write(self.line(), state)
    }

    /// Flip a high/low line. An uninitialized line is driven high.
    pub fn toggle(&self) -> Result<(), ProviderError> {
        match self.state() {
            DigitalState::Unknown => self.write(DigitalState::High),
            state => self.write(state.inverse()),
        }
    }

    /// Terminal. Applies the configured shutdown state, then drops every
    /// consumer and any undelivered event. Repeated calls do nothing.
    pub fn shutdown(&self) -> &Self {
        if self.is_shutdown() {
            return self;
        }

        if let Some(state) = self.config.shutdown_state {
            if let Err(e) = self.write(state) {
                warn!("Line '{}': shutdown state not applied: {}", self.id(), e);
            }
        }

        {
            let mut lifecycle = lock(&self.lifecycle);
            if *lifecycle == Lifecycle::Shutdown {
                return self;
            }
            *lifecycle = Lifecycle::Shutdown;
        }
        write(&self.listeners).clear();
        write(&self.bindings).clear();
        lock(&self.fanout).queue.clear();
        self.await_in_flight();

        info!("Line '{}' (BCM {}) shut down", self.id(), self.line());
        self
    }

    // ─── Dispatch ───────────────────────────────────────────────────

    /// Deliver `event` to every listener, then every binding.
    ///
    /// Events of one line are delivered in arrival order by one thread at
    /// a time. A call made while another delivery is running (a nested
    /// call from a callback, or a second notifier thread) queues the event
    /// for that delivery and returns an empty report; otherwise the report
    /// covers every event this call delivered.
    pub fn dispatch(&self, event: &DigitalStateChangeEvent) -> DispatchReport {
        if self.is_shutdown() {
            debug!("Line '{}' is shut down, dropping event {}", self.id(), event);
            return DispatchReport::default();
        }
        lock(&self.fanout).queue.push_back(event.clone());
        self.drain()
    }

    fn drain(&self) -> DispatchReport {
        let me = thread::current().id();
        {
            let mut fanout = lock(&self.fanout);
            if fanout.drainer.is_some() {
                return DispatchReport::default();
            }
            fanout.drainer = Some(me);
        }

        let mut report = DispatchReport::default();
        loop {
            let shut = self.is_shutdown();
            let next = {
                let mut fanout = lock(&self.fanout);
                let next = if shut { None } else { fanout.queue.pop_front() };
                match next {
                    Some(_) => fanout.snapshot = fanout.generation,
                    None => {
                        fanout.queue.clear();
                        fanout.drainer = None;
                    }
                }
                next
            };
            self.settled.notify_all();

            let Some(event) = next else { break };
            let delivered = self.deliver(&event);
            for failure in &delivered.failures {
                error!("Line '{}': {} for {}", self.id(), failure, event);
            }
            report.merge(delivered);
        }
        report
    }

    fn deliver(&self, event: &DigitalStateChangeEvent) -> DispatchReport {
        let listeners = read(&self.listeners).clone();
        let bindings = read(&self.bindings).clone();
        let mut report = DispatchReport::default();

        for (position, listener) in listeners.iter().enumerate() {
            if self.is_shutdown() {
                return report;
            }
            if !contains(&self.listeners, listener) {
                continue;
            }
            let outcome = invoke(|| {
                listener.on_digital_state_change(event);
                Ok(())
            });
            record(&mut report, ConsumerKind::Listener, position, outcome);
        }

        for (position, binding) in bindings.iter().enumerate() {
            if self.is_shutdown() {
                return report;
            }
            if !contains(&self.bindings, binding) {
                continue;
            }
            let outcome = invoke(|| binding.process(event));
            record(&mut report, ConsumerKind::Binding, position, outcome);
        }

        report
    }

    // ─── Internals ──────────────────────────────────────────────────

    fn attach_consumers<T: ?Sized>(&self, list: &RwLock<Vec<Arc<T>>>, added: &[Arc<T>], operation: &str) {
        {
            let mut list = write(list);
            if self.is_shutdown() {
                debug!("Line '{}' is shut down, ignoring {}", self.id(), operation);
                return;
            }
            list.extend(added.iter().cloned());
        }
        self.activate();
    }

    fn detach_consumers<T: ?Sized>(&self, list: &RwLock<Vec<Arc<T>>>, removed: &[Arc<T>]) {
        write(list).retain(|c| !removed.iter().any(|r| same(c, r)));
        self.await_in_flight();
    }

    /// Block until no other thread delivers from lists taken before now.
    /// The calling thread's own delivery is never waited for.
    fn await_in_flight(&self) {
        let me = thread::current().id();
        let mut fanout = lock(&self.fanout);
        fanout.generation += 1;
        let generation = fanout.generation;
        let _fanout = self
            .settled
            .wait_while(fanout, |f| f.delivering_before(generation, me))
            .unwrap_or_else(PoisonError::into_inner);
    }

    fn activate(&self) {
        let mut lifecycle = lock(&self.lifecycle);
        if *lifecycle == Lifecycle::Created {
            *lifecycle = Lifecycle::Active;
        }
    }
}

impl LineSink for DigitalIo {
    fn id(&self) -> &str {
        &self.config.id
    }

    fn line(&self) -> u8 {
        self.config.line
    }

    /// Swapping the state and queueing its event happen under one lock, so
    /// concurrent notifiers produce events in the order of the swaps.
    fn apply_state(&self, state: DigitalState) {
        if self.is_shutdown() {
            debug!("Line '{}' is shut down, ignoring {}", self.config.id, state);
            return;
        }

        {
            let mut current = lock(&self.state);
            if *current == state {
                return;
            }
            let previous = std::mem::replace(&mut *current, state);
            let event = DigitalStateChangeEvent::new(&self.config.id, self.config.line, state, previous);
            debug!("{}", event);
            lock(&self.fanout).queue.push_back(event);
        }
        self.activate();
        self.drain();
    }
}

impl fmt::Debug for DigitalIo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DigitalIo")
            .field("id", &self.config.id)
            .field("line", &self.config.line)
            .field("provider", &self.provider_id)
            .field("state", &self.state())
            .field("lifecycle", &self.lifecycle())
            .field("listeners", &self.listener_count())
            .field("bindings", &self.binding_count())
            .finish()
    }
}

fn invoke(call: impl FnOnce() -> Result<(), BindingError>) -> Result<(), (FailureKind, String)> {
    match catch_unwind(AssertUnwindSafe(call)) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err((FailureKind::Error, e.to_string())),
        Err(payload) => Err((FailureKind::Panic, panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

fn record(
    report: &mut DispatchReport,
    consumer: ConsumerKind,
    position: usize,
    outcome: Result<(), (FailureKind, String)>,
) {
    match outcome {
        Ok(()) => report.delivered += 1,
        Err((kind, message)) => report.failures.push(ConsumerFailure {
            consumer,
            position,
            kind,
            message,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sbc_common::io::config::LineHandle;

    fn orphan_line(id: &str) -> Arc<DigitalIo> {
        let handle = LineHandle {
            provider_id: "test".to_string(),
            line: 17,
            initial_state: DigitalState::Low,
        };
        let provider: Weak<dyn DigitalProvider> = Weak::<crate::providers::simulation::SimulationProvider>::new();
        Arc::new(DigitalIo::new(DigitalConfig::new(id, 17), &handle, provider))
    }

    fn explode(_: &DigitalStateChangeEvent) {
        panic!("listener boom");
    }

    fn reject(_: &DigitalStateChangeEvent) -> Result<(), BindingError> {
        Err(BindingError::new("binding boom"))
    }

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<DigitalState>>,
    }

    impl DigitalStateChangeListener for Recorder {
        fn on_digital_state_change(&self, event: &DigitalStateChangeEvent) {
            lock(&self.events).push(event.state);
        }
    }

    impl Recorder {
        fn seen(&self) -> Vec<DigitalState> {
            lock(&self.events).clone()
        }
    }

    #[test]
    fn lifecycle_transitions() {
        let io = orphan_line("led");
        assert_eq!(io.lifecycle(), Lifecycle::Created);
        io.apply_state(DigitalState::High);
        assert_eq!(io.lifecycle(), Lifecycle::Active);
        io.shutdown();
        assert_eq!(io.lifecycle(), Lifecycle::Shutdown);
    }

    #[test]
    fn unchanged_state_is_not_dispatched() {
        let io = orphan_line("led");
        let recorder = Arc::new(Recorder::default());
        let listener: Listener = recorder.clone();
        io.add_listener(&[listener]);

        io.apply_state(DigitalState::Low);
        io.apply_state(DigitalState::High);
        io.apply_state(DigitalState::High);
        assert_eq!(recorder.seen(), vec![DigitalState::High]);
    }

    #[test]
    fn listeners_before_bindings() {
        let io = orphan_line("led");
        let order = Arc::new(Mutex::new(Vec::new()));

        let o = Arc::clone(&order);
        let binding: Binding = Arc::new(move |_: &DigitalStateChangeEvent| -> Result<(), BindingError> {
            lock(&o).push("binding");
            Ok(())
        });
        let o = Arc::clone(&order);
        let listener: Listener = Arc::new(move |_: &DigitalStateChangeEvent| {
            lock(&o).push("listener");
        });

        io.bind(&[binding]);
        io.add_listener(&[listener]);

        let report = io.dispatch(&DigitalStateChangeEvent::new(
            "led",
            17,
            DigitalState::High,
            DigitalState::Low,
        ));
        assert_eq!(report.delivered, 2);
        assert_eq!(*lock(&order), vec!["listener", "binding"]);
    }

    #[test]
    fn failures_are_contained() {
        let io = orphan_line("led");
        let recorder = Arc::new(Recorder::default());

        let panicking: Listener = Arc::new(explode);
        let listener: Listener = recorder.clone();
        let failing: Binding = Arc::new(reject);
        let hits = Arc::new(Mutex::new(0));
        let h = Arc::clone(&hits);
        let counting: Binding = Arc::new(move |_: &DigitalStateChangeEvent| -> Result<(), BindingError> {
            *lock(&h) += 1;
            Ok(())
        });

        io.add_listener(&[panicking, listener]);
        io.bind(&[failing, counting]);

        let report = io.dispatch(&DigitalStateChangeEvent::new(
            "led",
            17,
            DigitalState::High,
            DigitalState::Low,
        ));

        assert_eq!(report.delivered, 2);
        assert_eq!(report.failures.len(), 2);
        assert_eq!(report.failures[0].consumer, ConsumerKind::Listener);
        assert_eq!(report.failures[0].kind, FailureKind::Panic);
        assert_eq!(report.failures[0].message, "listener boom");
        assert_eq!(report.failures[1].consumer, ConsumerKind::Binding);
        assert_eq!(report.failures[1].kind, FailureKind::Error);
        assert_eq!(report.failures[1].position, 0);
        assert_eq!(recorder.seen(), vec![DigitalState::High]);
        assert_eq!(*lock(&hits), 1);
    }

    #[test]
    fn remove_by_identity() {
        let io = orphan_line("led");
        let first = Arc::new(Recorder::default());
        let second = Arc::new(Recorder::default());
        let a: Listener = first.clone();
        let b: Listener = second.clone();

        io.add_listener(&[a.clone(), b]);
        io.remove_listener(&[a]);
        assert_eq!(io.listener_count(), 1);

        io.apply_state(DigitalState::High);
        assert!(first.seen().is_empty());
        assert_eq!(second.seen(), vec![DigitalState::High]);
    }

    #[test]
    fn reentrant_add_misses_current_event() {
        let io = orphan_line("led");
        let late = Arc::new(Recorder::default());
        let late_listener: Listener = late.clone();

        let weak = Arc::downgrade(&io);
        let adder: Listener = Arc::new(move |_: &DigitalStateChangeEvent| {
            if let Some(io) = weak.upgrade() {
                io.add_listener(&[late_listener.clone()]);
            }
        });
        io.add_listener(&[adder]);

        io.apply_state(DigitalState::High);
        // Added during the first event: not delivered that event.
        assert!(late.seen().is_empty());
        assert_eq!(io.listener_count(), 2);

        io.apply_state(DigitalState::Low);
        assert_eq!(late.seen(), vec![DigitalState::Low]);
    }

    #[test]
    fn reentrant_remove_skips_pending_consumer() {
        let io = orphan_line("led");
        let victim = Arc::new(Recorder::default());
        let victim_listener: Listener = victim.clone();

        let weak = Arc::downgrade(&io);
        let target = victim_listener.clone();
        let remover: Listener = Arc::new(move |_: &DigitalStateChangeEvent| {
            if let Some(io) = weak.upgrade() {
                io.remove_listener(&[target.clone()]);
            }
        });
        io.add_listener(&[remover, victim_listener]);

        io.apply_state(DigitalState::High);
        assert!(victim.seen().is_empty());
        assert_eq!(io.listener_count(), 1);
    }

    #[test]
    fn nested_state_change_is_queued() {
        let io = orphan_line("led");
        let recorder = Arc::new(Recorder::default());
        let listener: Listener = recorder.clone();

        let weak = Arc::downgrade(&io);
        let echo: Listener = Arc::new(move |event: &DigitalStateChangeEvent| {
            if event.state.is_high() {
                if let Some(io) = weak.upgrade() {
                    io.apply_state(DigitalState::Low);
                }
            }
        });
        io.add_listener(&[echo, listener]);

        io.apply_state(DigitalState::High);
        assert_eq!(recorder.seen(), vec![DigitalState::High, DigitalState::Low]);
        assert!(io.is_off());
    }

    #[test]
    fn shutdown_is_terminal_and_idempotent() {
        let io = orphan_line("led");
        let recorder = Arc::new(Recorder::default());
        let listener: Listener = recorder.clone();
        io.add_listener(&[listener.clone()]);
        io.apply_state(DigitalState::High);

        io.shutdown();
        assert_eq!(io.listener_count(), 0);
        assert!(io.is_on());

        io.shutdown();
        assert!(io.is_on());
        assert_eq!(io.lifecycle(), Lifecycle::Shutdown);

        io.add_listener(&[listener]);
        assert_eq!(io.listener_count(), 0);
        io.apply_state(DigitalState::Low);
        assert!(io.is_on());
        assert_eq!(recorder.seen(), vec![DigitalState::High]);
    }

    #[test]
    fn shutdown_from_callback() {
        let io = orphan_line("led");
        let weak = Arc::downgrade(&io);
        let stopper: Listener = Arc::new(move |_: &DigitalStateChangeEvent| {
            if let Some(io) = weak.upgrade() {
                io.shutdown();
            }
        });
        let after = Arc::new(Recorder::default());
        let after_listener: Listener = after.clone();
        io.add_listener(&[stopper, after_listener]);

        io.apply_state(DigitalState::High);
        assert!(io.is_shutdown());
        assert!(after.seen().is_empty());
        assert_eq!(io.listener_count(), 0);
    }

    #[test]
    fn write_without_provider_fails() {
        let io = orphan_line("led");
        assert!(matches!(
            io.write(DigitalState::High),
            Err(ProviderError::Unsupported(_))
        ));
    }
}
