//! Mounted machine instance

use std::fmt;
use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use uuid::Uuid;

use super::{Command, Commands, Executor, Machine};

/// Identifier of one mounted machine instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceId(Uuid);

impl InstanceId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

type DoneCallback<O> = Box<dyn FnOnce(O) + Send>;

/// Owner of one machine instance and its pending side effects
///
/// Must be used inside a tokio runtime: requests are spawned as tasks.
pub struct Host<M: Machine> {
    id: InstanceId,
    machine: M,
    executor: Arc<dyn Executor<M>>,
    completions_tx: mpsc::UnboundedSender<M::Event>,
    completions_rx: mpsc::UnboundedReceiver<M::Event>,
    in_flight: usize,
    on_done: Option<DoneCallback<M::Output>>,
    revision: watch::Sender<u64>,
}

impl<M: Machine> Host<M> {
    /// Mount a machine and run its start commands
    ///
    /// # Arguments
    /// * `machine` - Machine in its initial state
    /// * `executor` - Executes the machine's requests
    /// * `on_done` - Completion callback, invoked at most once
    pub fn mount(
        machine: M,
        executor: Arc<dyn Executor<M>>,
        on_done: impl FnOnce(M::Output) + Send + 'static,
    ) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        let (revision, _) = watch::channel(0);

        let mut host = Self {
            id: InstanceId::new(),
            machine,
            executor,
            completions_tx,
            completions_rx,
            in_flight: 0,
            on_done: Some(Box::new(on_done)),
            revision,
        };
        log::debug!("Mounted machine instance {}", host.id);

        let commands = host.machine.start();
        host.run(commands);
        host
    }

    /// Instance id
    pub fn id(&self) -> InstanceId {
        self.id
    }

    /// Current machine state
    pub fn machine(&self) -> &M {
        &self.machine
    }

    /// Whether requests are still pending
    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }

    /// Follow state changes; the value is bumped after every processed event
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Process one event to completion and dispatch its commands
    pub fn send(&mut self, event: M::Event) {
        let commands = self.machine.update(event);
        self.run(commands);
        self.revision.send_modify(|revision| *revision += 1);
    }

    /// Feed every completion that has already arrived into the machine.
    ///
    /// Returns the number of completions processed.
    pub fn pump(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(event) = self.completions_rx.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            self.send(event);
            processed += 1;
        }
        processed
    }

    /// Wait until every pending request (including ones issued while
    /// settling) has completed and been processed.
    pub async fn settle(&mut self) {
        while self.in_flight > 0 {
            let Some(event) = self.completions_rx.recv().await else {
                break;
            };
            self.in_flight -= 1;
            self.send(event);
        }
    }

    /// Unmount the instance; pending completions are discarded
    pub fn unmount(self) {
        if self.in_flight > 0 {
            log::debug!(
                "Unmounting instance {} with {} pending request(s)",
                self.id,
                self.in_flight
            );
        }
    }

    fn run(&mut self, commands: Commands<M>) {
        for command in commands {
            match command {
                Command::Request(request) => self.spawn(request),
                Command::Notify(output) => self.notify(output),
            }
        }
    }

    fn spawn(&mut self, request: M::Request) {
        let executor = Arc::clone(&self.executor);
        let tx = self.completions_tx.clone();
        let id = self.id;

        self.in_flight += 1;
        tokio::spawn(async move {
            let event = executor.execute(request).await;
            if tx.send(event).is_err() {
                log::debug!("Instance {id} is gone, completion dropped");
            }
        });
    }

    fn notify(&mut self, output: M::Output) {
        if let Some(on_done) = self.on_done.take() {
            on_done(output);
        } else {
            log::warn!("Instance {} already finished, outcome ignored", self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;

    /// Counts up to a target, one async tick at a time
    struct Counter {
        value: u32,
        target: u32,
    }

    enum CounterEvent {
        Start,
        Ticked,
    }

    impl Machine for Counter {
        type Event = CounterEvent;
        type Request = ();
        type Output = u32;

        fn update(&mut self, event: CounterEvent) -> Commands<Self> {
            match event {
                CounterEvent::Start => vec![Command::Request(())],
                CounterEvent::Ticked => {
                    self.value += 1;
                    if self.value >= self.target {
                        vec![Command::Notify(self.value), Command::Notify(self.value)]
                    } else {
                        vec![Command::Request(())]
                    }
                }
            }
        }
    }

    struct Ticker;

    #[async_trait]
    impl Executor<Counter> for Ticker {
        async fn execute(&self, _request: ()) -> CounterEvent {
            CounterEvent::Ticked
        }
    }

    #[tokio::test]
    async fn settle_runs_follow_up_requests_and_notifies_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let mut host = Host::mount(Counter { value: 0, target: 3 }, Arc::new(Ticker), move |n| {
            assert_eq!(n, 3);
            seen.fetch_add(1, Ordering::SeqCst);
        });

        host.send(CounterEvent::Start);
        assert!(host.is_busy());
        host.settle().await;

        assert!(!host.is_busy());
        assert_eq!(host.machine().value, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn revision_advances_per_event() {
        let mut host = Host::mount(Counter { value: 0, target: 1 }, Arc::new(Ticker), |_| {});
        let rx = host.subscribe();
        host.send(CounterEvent::Start);
        host.settle().await;
        assert_eq!(*rx.borrow(), 2);
    }

    #[tokio::test]
    async fn unmounted_instance_drops_late_completions() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let mut host = Host::mount(Counter { value: 0, target: 1 }, Arc::new(Ticker), move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        host.send(CounterEvent::Start);
        host.unmount();
        tokio::task::yield_now().await;

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
