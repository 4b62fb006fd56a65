use alloc::collections::VecDeque;
use alloc::string::String;
use alloc::vec::Vec;

use crate::{Event, EventError, EventKind};

// -----------------------------------------------------------------------------
// EventParser

/// A source of structural events, usually backed by a text parser.
///
/// Returning `Ok(None)` means the stream is exhausted.
pub trait EventParser {
    fn next_event(&mut self) -> Result<Option<Event>, EventError>;
}

// -----------------------------------------------------------------------------
// EventStream

/// An in-memory [`EventParser`] that replays a fixed list of events.
///
/// # Examples
///
/// ```
/// use vc_event::{Event, EventParser, EventStream};
///
/// let mut stream: EventStream = [Event::scalar("a"), Event::scalar("b")].into_iter().collect();
///
/// assert_eq!(stream.next_event().unwrap(), Some(Event::scalar("a")));
/// assert_eq!(stream.next_event().unwrap(), Some(Event::scalar("b")));
/// assert_eq!(stream.next_event().unwrap(), None);
/// ```
#[derive(Debug, Default, Clone)]
pub struct EventStream {
    events: VecDeque<Event>,
}

impl EventStream {
    /// Creates an empty stream.
    #[inline]
    pub const fn new() -> Self {
        Self {
            events: VecDeque::new(),
        }
    }

    /// Appends an event to the end of the stream.
    #[inline]
    pub fn push(&mut self, event: Event) {
        self.events.push_back(event);
    }

    /// Number of events not yet consumed.
    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl From<Vec<Event>> for EventStream {
    #[inline]
    fn from(events: Vec<Event>) -> Self {
        Self {
            events: events.into(),
        }
    }
}

impl FromIterator<Event> for EventStream {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}

impl EventParser for EventStream {
    #[inline]
    fn next_event(&mut self) -> Result<Option<Event>, EventError> {
        Ok(self.events.pop_front())
    }
}

// -----------------------------------------------------------------------------
// EventReader

/// A reader with one event of lookahead over an [`EventParser`].
///
/// - [`peek`](Self::peek) and [`check`](Self::check) never consume.
/// - [`expect`](Self::expect) consumes the next event or fails without consuming.
/// - [`accept`](Self::accept) consumes the next event only if it matches.
///
/// # Examples
///
/// ```
/// use vc_event::{Event, EventKind, EventReader, EventStream, SequenceStyle};
///
/// let mut stream = EventStream::from(vec![
///     Event::sequence_start(SequenceStyle::Flow),
///     Event::scalar("1"),
///     Event::SequenceEnd,
/// ]);
/// let mut reader = EventReader::new(&mut stream);
///
/// reader.expect(EventKind::SequenceStart).unwrap();
/// assert_eq!(reader.peek_scalar().unwrap(), Some("1"));
/// assert!(!reader.accept(EventKind::SequenceEnd).unwrap());
/// reader.expect(EventKind::Scalar).unwrap();
/// assert!(reader.accept(EventKind::SequenceEnd).unwrap());
/// assert!(reader.is_exhausted().unwrap());
/// ```
pub struct EventReader<'a> {
    parser: &'a mut dyn EventParser,
    peeked: Option<Event>,
}

impl<'a> EventReader<'a> {
    /// Creates a reader over the given parser.
    #[inline]
    pub fn new(parser: &'a mut dyn EventParser) -> Self {
        Self {
            parser,
            peeked: None,
        }
    }

    fn fill(&mut self) -> Result<(), EventError> {
        if self.peeked.is_none() {
            self.peeked = self.parser.next_event()?;
        }
        Ok(())
    }

    /// Returns the next event without consuming it.
    pub fn peek(&mut self) -> Result<Option<&Event>, EventError> {
        self.fill()?;
        Ok(self.peeked.as_ref())
    }

    /// Returns the kind of the next event without consuming it.
    #[inline]
    pub fn peek_kind(&mut self) -> Result<Option<EventKind>, EventError> {
        Ok(self.peek()?.map(Event::kind))
    }

    /// Returns the text of the next event if it is a scalar, without consuming it.
    #[inline]
    pub fn peek_scalar(&mut self) -> Result<Option<&str>, EventError> {
        Ok(self.peek()?.and_then(Event::as_scalar))
    }

    /// Whether the next event is of the given kind. Never consumes.
    #[inline]
    pub fn check(&mut self, kind: EventKind) -> Result<bool, EventError> {
        Ok(self.peek_kind()? == Some(kind))
    }

    /// Whether the stream has no more events.
    #[inline]
    pub fn is_exhausted(&mut self) -> Result<bool, EventError> {
        Ok(self.peek()?.is_none())
    }

    /// Consumes and returns the next event.
    pub fn next(&mut self) -> Result<Option<Event>, EventError> {
        self.fill()?;
        Ok(self.peeked.take())
    }

    /// Consumes the next event, which must be of the given kind.
    ///
    /// On mismatch the event stays in the reader.
    pub fn expect(&mut self, kind: EventKind) -> Result<Event, EventError> {
        match self.peek_kind()? {
            Some(found) if found == kind => {}
            Some(found) => {
                return Err(EventError::Unexpected {
                    expected: kind,
                    found,
                });
            }
            None => return Err(EventError::UnexpectedEnd { expected: kind }),
        }
        match self.peeked.take() {
            Some(event) => Ok(event),
            None => Err(EventError::UnexpectedEnd { expected: kind }),
        }
    }

    /// Consumes the next event, which must be a scalar, and returns
    /// its anchor and text.
    pub fn expect_scalar(&mut self) -> Result<(Option<String>, String), EventError> {
        match self.expect(EventKind::Scalar)? {
            Event::Scalar { anchor, value } => Ok((anchor, value)),
            other => Err(EventError::Unexpected {
                expected: EventKind::Scalar,
                found: other.kind(),
            }),
        }
    }

    /// Consumes and returns the next event if it is of the given kind.
    pub fn next_if(&mut self, kind: EventKind) -> Result<Option<Event>, EventError> {
        if self.check(kind)? {
            Ok(self.peeked.take())
        } else {
            Ok(None)
        }
    }

    /// Consumes the next event if it is of the given kind.
    #[inline]
    pub fn accept(&mut self, kind: EventKind) -> Result<bool, EventError> {
        Ok(self.next_if(kind)?.is_some())
    }

    /// Consumes one complete node: a scalar, an alias, or a whole
    /// sequence/mapping including everything nested in it.
    pub fn skip_node(&mut self) -> Result<(), EventError> {
        let mut closers: Vec<EventKind> = Vec::new();
        loop {
            let expected = closers.last().copied().unwrap_or(EventKind::Scalar);
            let Some(event) = self.next()? else {
                return Err(EventError::UnexpectedEnd { expected });
            };

            let found = event.kind();
            if event.is_start() {
                closers.push(match found {
                    EventKind::SequenceStart => EventKind::SequenceEnd,
                    _ => EventKind::MappingEnd,
                });
            } else if event.is_end() && closers.pop() != Some(found) {
                return Err(EventError::Unexpected { expected, found });
            }

            if closers.is_empty() {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::{EventReader, EventStream};
    use crate::{Event, EventError, EventKind, MappingStyle, SequenceStyle};

    #[test]
    fn expect_mismatch_keeps_event() {
        let mut stream = EventStream::from(vec![Event::scalar("x")]);
        let mut reader = EventReader::new(&mut stream);

        let err = reader.expect(EventKind::SequenceStart).unwrap_err();
        assert_eq!(
            err,
            EventError::Unexpected {
                expected: EventKind::SequenceStart,
                found: EventKind::Scalar,
            }
        );
        assert_eq!(reader.peek_scalar().unwrap(), Some("x"));
    }

    #[test]
    fn expect_at_end() {
        let mut stream = EventStream::new();
        let mut reader = EventReader::new(&mut stream);

        let err = reader.expect(EventKind::SequenceEnd).unwrap_err();
        assert_eq!(
            err,
            EventError::UnexpectedEnd {
                expected: EventKind::SequenceEnd
            }
        );
    }

    #[test]
    fn expect_scalar_and_next_if() {
        let mut stream = EventStream::from(vec![
            Event::Scalar {
                anchor: Some("a".into()),
                value: "1".into(),
            },
            Event::alias("a"),
        ]);
        let mut reader = EventReader::new(&mut stream);

        assert_eq!(reader.next_if(EventKind::Alias).unwrap(), None);
        let (anchor, value) = reader.expect_scalar().unwrap();
        assert_eq!(anchor.as_deref(), Some("a"));
        assert_eq!(value, "1");
        assert_eq!(
            reader.next_if(EventKind::Alias).unwrap(),
            Some(Event::alias("a"))
        );
        assert!(reader.is_exhausted().unwrap());
    }

    #[test]
    fn skip_nested_node() {
        let mut stream = EventStream::from(vec![
            Event::mapping_start(MappingStyle::Block),
            Event::scalar("k"),
            Event::sequence_start(SequenceStyle::Flow),
            Event::scalar("1"),
            Event::alias("a"),
            Event::SequenceEnd,
            Event::MappingEnd,
            Event::scalar("after"),
        ]);
        let mut reader = EventReader::new(&mut stream);

        reader.skip_node().unwrap();
        assert_eq!(reader.peek_scalar().unwrap(), Some("after"));
        reader.skip_node().unwrap();
        assert!(reader.is_exhausted().unwrap());
    }

    #[test]
    fn skip_unclosed_node() {
        let mut stream = EventStream::from(vec![
            Event::sequence_start(SequenceStyle::Block),
            Event::scalar("1"),
        ]);
        let mut reader = EventReader::new(&mut stream);

        assert_eq!(
            reader.skip_node().unwrap_err(),
            EventError::UnexpectedEnd {
                expected: EventKind::SequenceEnd
            }
        );
    }

    #[test]
    fn skip_mismatched_end() {
        let mut stream = EventStream::from(vec![
            Event::sequence_start(SequenceStyle::Block),
            Event::MappingEnd,
        ]);
        let mut reader = EventReader::new(&mut stream);

        assert_eq!(
            reader.skip_node().unwrap_err(),
            EventError::Unexpected {
                expected: EventKind::SequenceEnd,
                found: EventKind::MappingEnd,
            }
        );
    }
}
