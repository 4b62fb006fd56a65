use alloc::string::String;
use core::fmt;

// -----------------------------------------------------------------------------
// Styles

/// Presentation hint for a sequence.
///
/// The emitter is free to ignore [`Any`](SequenceStyle::Any), which
/// means "no preference".
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceStyle {
    #[default]
    Any,
    /// One item per line, `- item`.
    Block,
    /// Inline, `[a, b, c]`.
    Flow,
}

/// Presentation hint for a mapping.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MappingStyle {
    #[default]
    Any,
    Block,
    Flow,
}

// -----------------------------------------------------------------------------
// EventKind

/// The fieldless discriminant of an [`Event`].
///
/// Used to peek, expect or accept an event without matching its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    SequenceStart,
    SequenceEnd,
    MappingStart,
    MappingEnd,
    Scalar,
    Alias,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SequenceStart => f.pad("SequenceStart"),
            Self::SequenceEnd => f.pad("SequenceEnd"),
            Self::MappingStart => f.pad("MappingStart"),
            Self::MappingEnd => f.pad("MappingEnd"),
            Self::Scalar => f.pad("Scalar"),
            Self::Alias => f.pad("Alias"),
        }
    }
}

// -----------------------------------------------------------------------------
// Event

/// A structural event of the nested text format.
///
/// Nodes that can be referenced later carry an optional `anchor`;
/// an [`Alias`](Event::Alias) refers to such an anchor by name.
///
/// # Examples
///
/// ```
/// use vc_event::{Event, EventKind};
///
/// let event = Event::scalar("42");
/// assert_eq!(event.kind(), EventKind::Scalar);
/// assert_eq!(event.as_scalar(), Some("42"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    SequenceStart {
        anchor: Option<String>,
        style: SequenceStyle,
    },
    SequenceEnd,
    MappingStart {
        anchor: Option<String>,
        style: MappingStyle,
    },
    MappingEnd,
    Scalar {
        anchor: Option<String>,
        value: String,
    },
    Alias {
        name: String,
    },
}

impl Event {
    /// Creates an anchorless scalar event.
    #[inline]
    pub fn scalar(value: impl Into<String>) -> Self {
        Self::Scalar {
            anchor: None,
            value: value.into(),
        }
    }

    /// Creates an alias event.
    #[inline]
    pub fn alias(name: impl Into<String>) -> Self {
        Self::Alias { name: name.into() }
    }

    /// Creates an anchorless sequence start with the given style.
    #[inline]
    pub const fn sequence_start(style: SequenceStyle) -> Self {
        Self::SequenceStart {
            anchor: None,
            style,
        }
    }

    /// Creates an anchorless mapping start with the given style.
    #[inline]
    pub const fn mapping_start(style: MappingStyle) -> Self {
        Self::MappingStart {
            anchor: None,
            style,
        }
    }

    /// Returns the [`EventKind`] of this event.
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::SequenceStart { .. } => EventKind::SequenceStart,
            Self::SequenceEnd => EventKind::SequenceEnd,
            Self::MappingStart { .. } => EventKind::MappingStart,
            Self::MappingEnd => EventKind::MappingEnd,
            Self::Scalar { .. } => EventKind::Scalar,
            Self::Alias { .. } => EventKind::Alias,
        }
    }

    /// Returns the anchor declared by this event, if any.
    pub fn anchor(&self) -> Option<&str> {
        match self {
            Self::SequenceStart { anchor, .. }
            | Self::MappingStart { anchor, .. }
            | Self::Scalar { anchor, .. } => anchor.as_deref(),
            _ => None,
        }
    }

    /// Moves the anchor out of this event.
    pub fn take_anchor(&mut self) -> Option<String> {
        match self {
            Self::SequenceStart { anchor, .. }
            | Self::MappingStart { anchor, .. }
            | Self::Scalar { anchor, .. } => anchor.take(),
            _ => None,
        }
    }

    /// Returns the scalar text if this is a [`Scalar`](Event::Scalar).
    #[inline]
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Returns the alias name if this is an [`Alias`](Event::Alias).
    #[inline]
    pub fn as_alias(&self) -> Option<&str> {
        match self {
            Self::Alias { name } => Some(name),
            _ => None,
        }
    }

    /// Whether this event opens a nested node.
    #[inline]
    pub const fn is_start(&self) -> bool {
        matches!(self, Self::SequenceStart { .. } | Self::MappingStart { .. })
    }

    /// Whether this event closes a nested node.
    #[inline]
    pub const fn is_end(&self) -> bool {
        matches!(self, Self::SequenceEnd | Self::MappingEnd)
    }
}
