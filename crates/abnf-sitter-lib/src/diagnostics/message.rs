use rowan::TextRange;

/// Diagnostic kinds ordered by priority (highest priority first).
///
/// - Unclosed delimiters cause cascading errors downstream
/// - Expected/unexpected token errors are root causes
/// - Unsupported constructs are reported but translation continues around them
/// - Semantic findings assume a complete translation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Cascading
    UnclosedGroup,
    UnclosedOption,

    // Root cause errors
    ExpectedElement,
    ExpectedRule,
    UnexpectedToken,

    // Unsupported constructs: reported, translation continues
    IncrementalAlternative,
    UnsupportedNumericBase,
    OverlongNumericValue,
    MalformedNumericValue,
    InvalidCodepoint,
    ProseValue,
    EmptyLiteral,
    InvalidRepeatBounds,
    EmptyRepetition,
    DuplicateRule,

    // Valid translation, suspicious result
    UndefinedReference,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        if self.is_unsupported_construct() || *self == Self::UndefinedReference {
            Severity::Warning
        } else {
            Severity::Error
        }
    }

    /// Constructs with no translation rule. The element is dropped and the
    /// descriptor stays best-effort.
    pub fn is_unsupported_construct(&self) -> bool {
        matches!(
            self,
            Self::IncrementalAlternative
                | Self::UnsupportedNumericBase
                | Self::OverlongNumericValue
                | Self::MalformedNumericValue
                | Self::InvalidCodepoint
                | Self::ProseValue
                | Self::EmptyLiteral
                | Self::InvalidRepeatBounds
                | Self::EmptyRepetition
                | Self::DuplicateRule
        )
    }

    /// Base message for this diagnostic kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnclosedGroup => "missing closing `)`",
            Self::UnclosedOption => "missing closing `]`",

            Self::ExpectedElement => "expected an element",
            Self::ExpectedRule => "expected a rule definition",
            Self::UnexpectedToken => "unexpected token",

            Self::IncrementalAlternative => "incremental alternatives (`=/`) are not supported",
            Self::UnsupportedNumericBase => "only hexadecimal values are supported",
            Self::OverlongNumericValue => "hex value has more than 4 digits",
            Self::MalformedNumericValue => "malformed numeric value",
            Self::InvalidCodepoint => "value is not a Unicode scalar value",
            Self::ProseValue => "prose values cannot be translated",
            Self::EmptyLiteral => "empty string literal matches nothing",
            Self::InvalidRepeatBounds => "invalid repeat bounds",
            Self::EmptyRepetition => "repetition allows no occurrences",
            Self::DuplicateRule => "rule is already defined",

            Self::UndefinedReference => "undefined rule",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::DuplicateRule => "`{}` is already defined".to_string(),
            Self::UndefinedReference => "`{}` is not defined".to_string(),
            Self::UnclosedGroup | Self::UnclosedOption => {
                format!("{}; {{}}", self.fallback_message())
            }
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) range: TextRange,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub fn new(range: TextRange, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    /// The range shown to the user (underlined in output).
    pub(crate) range: TextRange,
    pub(crate) message: String,
    pub(crate) related: Vec<RelatedInfo>,
}

impl DiagnosticMessage {
    pub(crate) fn with_default_message(kind: DiagnosticKind, range: TextRange) -> Self {
        Self {
            kind,
            range,
            message: kind.fallback_message().to_string(),
            related: Vec::new(),
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}: {}",
            self.severity(),
            u32::from(self.range.start()),
            u32::from(self.range.end()),
            self.message
        )?;
        for related in &self.related {
            write!(
                f,
                " (related: {} at {}..{})",
                related.message,
                u32::from(related.range.start()),
                u32::from(related.range.end())
            )?;
        }
        Ok(())
    }
}
