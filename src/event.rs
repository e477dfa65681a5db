//! Domain events and the sinks that receive them.
//!
//! Events are emitted synchronously from inside
//! [`Connector::pump_once`](crate::Connector::pump_once) and the other
//! connector operations, in the order the transport delivered the underlying
//! notifications.
//!
//! Async consumers can use [`event_channel`] to move events onto a tokio
//! channel and read them back as a [`Stream`]:
//!
//! ```rust
//! use futures::StreamExt;
//! use simbridge::{BridgeEvent, EventSink, event_channel};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let (mut sink, mut events) = event_channel();
//! sink.emit(BridgeEvent::Initialized);
//! drop(sink);
//!
//! assert_eq!(events.next().await, Some(BridgeEvent::Initialized));
//! assert_eq!(events.next().await, None);
//! # }
//! ```

use futures::Stream;
use serde::{Deserialize, Serialize};
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::trace;

use crate::types::{ExceptionCode, TelemetryRecord};

/// Event delivered to the downstream consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum BridgeEvent {
    /// The session is open and the position stream has been requested.
    Initialized,
    /// A new aircraft position sample arrived.
    PositionUpdated(TelemetryRecord),
    /// The simulator reported an error; the session stays open.
    EngineError(ExceptionCode),
    /// The session has ended. Always the last event of a session.
    Closed,
}

/// Receiver of domain events.
pub trait EventSink {
    fn emit(&mut self, event: BridgeEvent);
}

impl EventSink for Vec<BridgeEvent> {
    fn emit(&mut self, event: BridgeEvent) {
        self.push(event);
    }
}

impl EventSink for UnboundedSender<BridgeEvent> {
    fn emit(&mut self, event: BridgeEvent) {
        if self.send(event).is_err() {
            trace!("Event receiver dropped, discarding event");
        }
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: BridgeEvent) {
        (**self).emit(event);
    }
}

/// Sink that forwards every event to a closure.
pub struct FnSink<F>(F);

/// Wrap a closure as an [`EventSink`].
pub fn sink_fn<F: FnMut(BridgeEvent)>(f: F) -> FnSink<F> {
    FnSink(f)
}

impl<F: FnMut(BridgeEvent)> EventSink for FnSink<F> {
    fn emit(&mut self, event: BridgeEvent) {
        (self.0)(event);
    }
}

/// Stream of events fed by the sender half of [`event_channel`].
#[derive(Debug)]
pub struct EventStream {
    inner: UnboundedReceiverStream<BridgeEvent>,
}

impl Stream for EventStream {
    type Item = BridgeEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

/// Create a sink/stream pair backed by an unbounded tokio channel.
///
/// The stream ends once the sink (usually owned by a connector) is dropped.
pub fn event_channel() -> (UnboundedSender<BridgeEvent>, EventStream) {
    let (tx, rx) = mpsc::unbounded_channel();
    (tx, EventStream { inner: UnboundedReceiverStream::new(rx) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[test]
    fn vec_sink_records_in_order() {
        let mut sink = Vec::new();
        sink.emit(BridgeEvent::Initialized);
        sink.emit(BridgeEvent::Closed);
        assert_eq!(sink, vec![BridgeEvent::Initialized, BridgeEvent::Closed]);
    }

    #[test]
    fn closure_sink_forwards_events() {
        let mut count = 0;
        {
            let mut sink = sink_fn(|_| count += 1);
            sink.emit(BridgeEvent::Initialized);
            sink.emit(BridgeEvent::EngineError(ExceptionCode(3)));
        }
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn channel_stream_ends_when_sink_dropped() {
        let (mut sink, events) = event_channel();
        sink.emit(BridgeEvent::PositionUpdated(TelemetryRecord::from_f64s([1.0])));
        sink.emit(BridgeEvent::Closed);
        drop(sink);

        let collected: Vec<_> = events.collect().await;
        let expected =
            [BridgeEvent::PositionUpdated(TelemetryRecord::from_f64s([1.0])), BridgeEvent::Closed];
        assert_eq!(collected, expected);
    }

    #[test]
    fn emitting_after_stream_dropped_is_harmless() {
        let (mut sink, events) = event_channel();
        drop(events);
        sink.emit(BridgeEvent::Closed);
    }
}
