//! Symbol-table rows as produced by the external Spin parser.
//!
//! Each row is `<tag><TAB><declaration>`, where `tag` is one character.

/// Category of a symbol-table row, keyed by its tag character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Constant,
    Enum,
    Object,
    PrivateMethod,
    PublicMethod,
    Variable,
    DataLabel,
}

impl SymbolKind {
    pub fn from_tag(tag: char) -> Option<Self> {
        match tag {
            'c' => Some(Self::Constant),
            'e' => Some(Self::Enum),
            'o' => Some(Self::Object),
            'p' => Some(Self::PrivateMethod),
            'f' => Some(Self::PublicMethod),
            'v' => Some(Self::Variable),
            'x' => Some(Self::DataLabel),
            _ => None,
        }
    }

    pub fn tag(self) -> char {
        match self {
            Self::Constant => 'c',
            Self::Enum => 'e',
            Self::Object => 'o',
            Self::PrivateMethod => 'p',
            Self::PublicMethod => 'f',
            Self::Variable => 'v',
            Self::DataLabel => 'x',
        }
    }

    /// Kinds whose declaration may list several comma-separated names.
    pub fn is_multi_declaration(self) -> bool {
        matches!(
            self,
            Self::Constant | Self::Enum | Self::Variable | Self::DataLabel
        )
    }
}

/// Borrowed view over one raw symbol-table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSymbol<'a> {
    raw: &'a str,
}

impl<'a> RawSymbol<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self { raw }
    }

    pub fn tag(&self) -> Option<char> {
        self.raw.chars().next()
    }

    pub fn kind(&self) -> Option<SymbolKind> {
        self.tag().and_then(SymbolKind::from_tag)
    }

    /// Text after the first tab; the whole row when the tag field is missing.
    pub fn declaration(&self) -> &'a str {
        match self.raw.find('\t') {
            Some(tab) => &self.raw[tab + 1..],
            None => self.raw,
        }
    }
}

impl<'a> From<&'a str> for RawSymbol<'a> {
    fn from(raw: &'a str) -> Self {
        Self::new(raw)
    }
}
