use alloc::vec::Vec;

use crate::{Event, EventError};

// -----------------------------------------------------------------------------
// EventEmitter

/// A sink of structural events, usually backed by a text emitter.
pub trait EventEmitter {
    fn emit(&mut self, event: Event) -> Result<(), EventError>;
}

// -----------------------------------------------------------------------------
// EventWriter

/// An [`EventEmitter`] that records every event in order.
///
/// # Examples
///
/// ```
/// use vc_event::{Event, EventEmitter, EventWriter};
///
/// let mut writer = EventWriter::new();
/// writer.emit(Event::scalar("a")).unwrap();
///
/// assert_eq!(writer.events(), &[Event::scalar("a")]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct EventWriter {
    events: Vec<Event>,
}

impl EventWriter {
    /// Creates an empty writer.
    #[inline]
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// The events emitted so far.
    #[inline]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Consumes the writer and returns the recorded events.
    #[inline]
    pub fn into_events(self) -> Vec<Event> {
        self.events
    }
}

impl EventEmitter for EventWriter {
    #[inline]
    fn emit(&mut self, event: Event) -> Result<(), EventError> {
        log::trace!("emit {}", event.kind());
        self.events.push(event);
        Ok(())
    }
}
