//! Machine runtime
//!
//! A [`Machine`] is a pure state machine: `update` consumes one event, mutates
//! the machine's state and describes side effects as [`Command`] values. It
//! never performs I/O.
//!
//! A [`Host`] owns one mounted machine instance:
//! - `Command::Request` values are handed to the host's [`Executor`] on a tokio
//!   task; the executor resolves each request into exactly one completion event
//! - completion events come back through the host's own channel and are fed
//!   into `update` like any user event (`pump` / `settle`)
//! - `Command::Notify` values go to the completion callback, at most once
//! - observers follow state changes through a revision counter (`subscribe`)
//!
//! Dropping the host drops its channel, so completions that arrive after the
//! view unmounted are discarded.

mod host;

use std::convert::Infallible;

use async_trait::async_trait;

pub use host::{Host, InstanceId};

/// Side effect described by a machine transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<R, O> {
    /// Asynchronous request for the executor
    Request(R),
    /// Terminal outcome for the hosting view
    Notify(O),
}

/// Commands produced by one transition of `M`
pub type Commands<M> = Vec<Command<<M as Machine>::Request, <M as Machine>::Output>>;

/// Pure state machine driven by a [`Host`]
pub trait Machine: 'static {
    /// Input events (user gestures and completion events)
    type Event: Send + 'static;
    /// Asynchronous work the machine asks for
    type Request: Send + 'static;
    /// Value handed to the completion callback when the machine finishes
    type Output;

    /// Commands to run when the machine is mounted
    fn start(&mut self) -> Commands<Self> {
        Vec::new()
    }

    /// Process one event to completion
    fn update(&mut self, event: Self::Event) -> Commands<Self>;
}

/// Resolves machine requests into completion events
///
/// Every request must produce exactly one event, failures included.
#[async_trait]
pub trait Executor<M: Machine>: Send + Sync {
    async fn execute(&self, request: M::Request) -> M::Event;
}

/// Executor for machines that never issue requests
pub struct Inert;

#[async_trait]
impl<M> Executor<M> for Inert
where
    M: Machine<Request = Infallible>,
{
    async fn execute(&self, request: Infallible) -> M::Event {
        match request {}
    }
}
