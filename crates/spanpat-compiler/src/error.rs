//! Compile errors and their rendering.

use std::fmt::Write;
use std::ops::Range;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    // Unclosed delimiters
    UnclosedGroup,
    UnclosedPin,
    UnclosedProperties,
    UnclosedRepetition,
    UnbalancedParen,
    UnbalancedBracket,

    // Missing pieces
    ExpectedTypeName,
    ExpectedGroupName,
    ExpectedPropertyName,
    ExpectedPropertyValue,
    ExpectedVariantName,

    // Malformed pieces
    UnknownGroupModifier,
    InvalidNumber,
    InvalidBoolean,
    InvalidRepetitionRange,
    UnexpectedToken,

    // Resolution
    UnknownType,
    UnknownProperty,
    UnknownVariant,
    DuplicateGroupName,
    UndefinedGroup,
    ForwardReference,
    GroupWithoutLabel,

    RecursionLimitExceeded,
    TooManyGroups,
    TooManyRegisters,
}

impl ErrorKind {
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnclosedGroup => "missing closing `)`",
            Self::UnclosedPin => "missing closing `]`",
            Self::UnclosedProperties => "missing closing `}` of property list",
            Self::UnclosedRepetition => "missing closing `}` of repetition",
            Self::UnbalancedParen => "unmatched `)`",
            Self::UnbalancedBracket => "unmatched `]`",

            Self::ExpectedTypeName => "expected label type name",
            Self::ExpectedGroupName => "expected group name",
            Self::ExpectedPropertyName => "expected property name",
            Self::ExpectedPropertyValue => "expected property value",
            Self::ExpectedVariantName => "expected variant name",

            Self::UnknownGroupModifier => "unknown group modifier",
            Self::InvalidNumber => "invalid number",
            Self::InvalidBoolean => "invalid boolean",
            Self::InvalidRepetitionRange => "invalid repetition range",
            Self::UnexpectedToken => "unexpected token",

            Self::UnknownType => "unknown label type",
            Self::UnknownProperty => "unknown property",
            Self::UnknownVariant => "unknown variant",
            Self::DuplicateGroupName => "duplicate group name",
            Self::UndefinedGroup => "undefined group",
            Self::ForwardReference => "group referenced before it closes",
            Self::GroupWithoutLabel => "group does not bind a label",

            Self::RecursionLimitExceeded => "pattern nesting is too deep",
            Self::TooManyGroups => "pattern declares more than 65536 groups",
            Self::TooManyRegisters => "pattern needs more than 65536 loop and group registers",
        }
    }

    /// Template for messages with caller detail. `{}` marks the detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::UnknownType => "`{}` is not a known label type".to_string(),
            Self::DuplicateGroupName => "group `{}` is already defined".to_string(),
            Self::UndefinedGroup => "group `{}` is not defined".to_string(),
            Self::ForwardReference => "group `{}` is referenced before it closes".to_string(),
            Self::GroupWithoutLabel => "group `{}` does not bind a label".to_string(),
            Self::InvalidBoolean => "`{}` is not a boolean".to_string(),
            Self::UnexpectedToken => "unexpected {}".to_string(),
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    pub fn message(&self, detail: Option<&str>) -> String {
        match detail {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

/// Fatal compile failure at a byte range of the pattern text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at offset {}", .range.start)]
pub struct CompileError {
    kind: ErrorKind,
    range: Range<usize>,
    message: String,
}

impl CompileError {
    pub fn new(kind: ErrorKind, range: Range<usize>) -> Self {
        Self {
            kind,
            range,
            message: kind.message(None),
        }
    }

    pub fn with_detail(kind: ErrorKind, range: Range<usize>, detail: &str) -> Self {
        Self {
            kind,
            range,
            message: kind.message(Some(detail)),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Byte offset of the offending input.
    pub fn offset(&self) -> usize {
        self.range.start
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Plain source snippet with the error annotated.
    pub fn render(&self, source: &str) -> String {
        self.printer().source(source).render()
    }

    pub fn printer(&self) -> ErrorPrinter<'_, '_> {
        ErrorPrinter::new(self)
    }
}

/// Builder for rendering a [`CompileError`] against its pattern text.
pub struct ErrorPrinter<'e, 's> {
    error: &'e CompileError,
    source: Option<&'s str>,
    path: Option<&'s str>,
    colored: bool,
}

impl<'e, 's> ErrorPrinter<'e, 's> {
    pub fn new(error: &'e CompileError) -> Self {
        Self {
            error,
            source: None,
            path: None,
            colored: false,
        }
    }

    pub fn source(mut self, source: &'s str) -> Self {
        self.source = Some(source);
        self
    }

    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let Some(source) = self.source else {
            return write!(w, "{}", self.error);
        };

        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        let range = adjust_range(self.error.range(), source.len());
        let mut snippet = Snippet::source(source).line_start(1).annotation(
            AnnotationKind::Primary
                .span(range)
                .label(&self.error.message),
        );
        if let Some(p) = self.path {
            snippet = snippet.path(p);
        }

        let report: Vec<Group> = vec![Level::ERROR.primary_title(&self.error.message).element(snippet)];
        write!(w, "{}", renderer.render(&report))
    }
}

/// Widens empty ranges to one character so the caret is visible.
fn adjust_range(range: Range<usize>, limit: usize) -> Range<usize> {
    let start = range.start.min(limit);
    let end = range.end.min(limit);
    if start == end {
        return start..(start + 1).min(limit);
    }
    start..end
}
