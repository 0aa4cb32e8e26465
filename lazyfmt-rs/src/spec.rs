//! printf-style format directives.
//!
//! A [`FormatSpec`] is one parsed `%[flags][width][.precision]conv` token.
//! [`FormatSpec::parse`] is a `const fn`, so a literal directive is checked
//! while the crate using it compiles (see [`formatted!`](crate::formatted));
//! the same parser backs [`FromStr`] for directives that only exist at run time.
//!
//! | conv | [`Presentation`] |
//! |------|------------------|
//! | `s` | [`Presentation::Generic`] |
//! | `d` `i` | [`Presentation::Decimal`] |
//! | `u` | [`Presentation::Unsigned`] |
//! | `o` | [`Presentation::Octal`] |
//! | `x` `X` | [`Presentation::LowerHex`] / [`Presentation::UpperHex`] |
//! | `c` | [`Presentation::Char`] |
//! | `f` `F` | [`Presentation::Fixed`] / [`Presentation::FixedUpper`] |
//! | `e` `E` | [`Presentation::LowerExp`] / [`Presentation::UpperExp`] |

use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

use thiserror::Error;

/// Largest width or precision a directive may carry.
pub const MAX_FIELD: usize = u16::MAX as usize;

// ── Errors ────────────────────────────────────────────────────────────────────

/// Error returned when a directive cannot be parsed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SpecError {
    #[error("empty format directive")]
    Empty,
    #[error("format directive must start with `%`")]
    MissingMarker,
    #[error("format directive has no conversion character")]
    MissingConversion,
    #[error("unknown conversion `{conv}` at offset {offset}")]
    UnknownConversion { conv: char, offset: usize },
    #[error("unexpected input after the conversion at offset {offset}")]
    TrailingInput { offset: usize },
    #[error("width or precision at offset {offset} exceeds 65535")]
    FieldTooLarge { offset: usize },
}

// ── Flags ─────────────────────────────────────────────────────────────────────

/// Directive flags packed into a `u8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Flags(u8);

impl Flags {
    /// `-`: pad on the right.
    pub const LEFT: Self  = Self(0x01);
    /// `0`: pad numbers with zeros after the sign.
    pub const ZERO: Self  = Self(0x02);
    /// `+`: always write a sign for signed conversions.
    pub const PLUS: Self  = Self(0x04);
    /// ` `: write a space where a `+` would go.
    pub const SPACE: Self = Self(0x08);
    /// `#`: alternate form (`0x` prefix, leading octal zero, kept decimal point).
    pub const ALT: Self   = Self(0x10);

    pub const EMPTY: Self = Self(0);

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    const fn from_byte(b: u8) -> Option<Self> {
        match b {
            b'-' => Some(Self::LEFT),
            b'0' => Some(Self::ZERO),
            b'+' => Some(Self::PLUS),
            b' ' => Some(Self::SPACE),
            b'#' => Some(Self::ALT),
            _ => None,
        }
    }
}

impl BitOr for Flags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self { self.union(rhs) }
}

impl BitOrAssign for Flags {
    fn bitor_assign(&mut self, rhs: Self) { self.0 |= rhs.0; }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, ch) in [
            (Self::LEFT, "-"),
            (Self::PLUS, "+"),
            (Self::SPACE, " "),
            (Self::ALT, "#"),
            (Self::ZERO, "0"),
        ] {
            if self.contains(flag) {
                f.write_str(ch)?;
            }
        }
        Ok(())
    }
}

// ── Presentation ──────────────────────────────────────────────────────────────

/// The conversion character of a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Presentation {
    /// `s`: the value's natural text.
    Generic,
    /// `d`, `i`: signed decimal.
    Decimal,
    /// `u`: unsigned decimal; negative values wrap.
    Unsigned,
    /// `o`
    Octal,
    /// `x`
    LowerHex,
    /// `X`
    UpperHex,
    /// `c`: a code point as a character.
    Char,
    /// `f`
    Fixed,
    /// `F`: like `f`, with `INF`/`NAN`.
    FixedUpper,
    /// `e`
    LowerExp,
    /// `E`
    UpperExp,
}

impl Presentation {
    pub const fn from_byte(b: u8) -> Option<Self> {
        Some(match b {
            b's' => Self::Generic,
            b'd' | b'i' => Self::Decimal,
            b'u' => Self::Unsigned,
            b'o' => Self::Octal,
            b'x' => Self::LowerHex,
            b'X' => Self::UpperHex,
            b'c' => Self::Char,
            b'f' => Self::Fixed,
            b'F' => Self::FixedUpper,
            b'e' => Self::LowerExp,
            b'E' => Self::UpperExp,
            _ => return None,
        })
    }

    /// The canonical conversion character (`i` serializes as `d`).
    pub const fn as_char(self) -> char {
        match self {
            Self::Generic => 's',
            Self::Decimal => 'd',
            Self::Unsigned => 'u',
            Self::Octal => 'o',
            Self::LowerHex => 'x',
            Self::UpperHex => 'X',
            Self::Char => 'c',
            Self::Fixed => 'f',
            Self::FixedUpper => 'F',
            Self::LowerExp => 'e',
            Self::UpperExp => 'E',
        }
    }

    /// Returns `true` for the conversions that render a number as text.
    pub const fn is_numeric(self) -> bool {
        !matches!(self, Self::Generic | Self::Char)
    }

    pub const fn is_float(self) -> bool {
        matches!(self, Self::Fixed | Self::FixedUpper | Self::LowerExp | Self::UpperExp)
    }
}

// ── FormatSpec ────────────────────────────────────────────────────────────────

/// One parsed format directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormatSpec {
    pub flags: Flags,
    pub width: Option<usize>,
    pub precision: Option<usize>,
    pub presentation: Presentation,
}

impl Default for FormatSpec {
    fn default() -> Self {
        Self::GENERIC
    }
}

impl FormatSpec {
    /// `%s`: every value in its natural form, no padding.
    pub const GENERIC: Self = Self::new(Presentation::Generic);

    pub const fn new(presentation: Presentation) -> Self {
        Self {
            flags: Flags::EMPTY,
            width: None,
            precision: None,
            presentation,
        }
    }

    pub const fn with_flags(self, flags: Flags) -> Self {
        Self { flags: self.flags.union(flags), ..self }
    }

    pub const fn with_width(self, width: usize) -> Self {
        Self { width: Some(width), ..self }
    }

    pub const fn with_precision(self, precision: usize) -> Self {
        Self { precision: Some(precision), ..self }
    }

    #[inline]
    pub const fn has(&self, flag: Flags) -> bool {
        self.flags.contains(flag)
    }

    /// Parse a single directive such as `"%-08.3f"`.
    pub const fn parse(src: &str) -> Result<Self, SpecError> {
        let bytes = src.as_bytes();
        if bytes.is_empty() {
            return Err(SpecError::Empty);
        }
        if bytes[0] != b'%' {
            return Err(SpecError::MissingMarker);
        }

        let mut i = 1;
        let mut flags = Flags::EMPTY;
        while i < bytes.len() {
            match Flags::from_byte(bytes[i]) {
                Some(flag) => {
                    flags = flags.union(flag);
                    i += 1;
                }
                None => break,
            }
        }

        let width = match parse_field(bytes, i) {
            Ok((width, next)) => {
                i = next;
                width
            }
            Err(e) => return Err(e),
        };

        let mut precision = None;
        if i < bytes.len() && bytes[i] == b'.' {
            match parse_field(bytes, i + 1) {
                Ok((Some(p), next)) => {
                    precision = Some(p);
                    i = next;
                }
                // A bare `.` means precision zero.
                Ok((None, next)) => {
                    precision = Some(0);
                    i = next;
                }
                Err(e) => return Err(e),
            }
        }

        if i >= bytes.len() {
            return Err(SpecError::MissingConversion);
        }
        let conv = bytes[i];
        let presentation = match Presentation::from_byte(conv) {
            Some(p) => p,
            None => {
                let conv = if conv.is_ascii() { conv as char } else { char::REPLACEMENT_CHARACTER };
                return Err(SpecError::UnknownConversion { conv, offset: i });
            }
        };
        i += 1;
        if i != bytes.len() {
            return Err(SpecError::TrailingInput { offset: i });
        }

        Ok(Self { flags, width, precision, presentation })
    }

    /// Parse a directive known when the program is built.
    ///
    /// # Panics
    /// Panics if `src` is not a valid directive.  Evaluated in a `const`
    /// item, the panic is reported as a compile error.
    pub const fn from_literal(src: &str) -> Self {
        match Self::parse(src) {
            Ok(spec) => spec,
            Err(SpecError::Empty) => panic!("empty format directive"),
            Err(SpecError::MissingMarker) => panic!("format directive must start with `%`"),
            Err(SpecError::MissingConversion) => panic!("format directive has no conversion character"),
            Err(SpecError::UnknownConversion { .. }) => panic!("unknown conversion in format directive"),
            Err(SpecError::TrailingInput { .. }) => panic!("unexpected input after the conversion character"),
            Err(SpecError::FieldTooLarge { .. }) => panic!("width or precision exceeds 65535"),
        }
    }

    /// The spec a `Display` consumer asked for, e.g. `{:>8.2}`.
    ///
    /// Fill characters and centre alignment have no printf counterpart; the
    /// result always pads with spaces (or zeros for `{:08}`).
    pub fn from_formatter(f: &fmt::Formatter<'_>) -> Self {
        let mut flags = Flags::EMPTY;
        if matches!(f.align(), Some(fmt::Alignment::Left)) {
            flags |= Flags::LEFT;
        }
        if f.sign_aware_zero_pad() {
            flags |= Flags::ZERO;
        }
        if f.sign_plus() {
            flags |= Flags::PLUS;
        }
        if f.alternate() {
            flags |= Flags::ALT;
        }
        Self {
            flags,
            width: f.width(),
            precision: f.precision(),
            presentation: Presentation::Generic,
        }
    }
}

/// Read a run of decimal digits starting at `start`.
const fn parse_field(bytes: &[u8], start: usize) -> Result<(Option<usize>, usize), SpecError> {
    let mut i = start;
    let mut value = 0usize;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        value = value * 10 + (bytes[i] - b'0') as usize;
        if value > MAX_FIELD {
            return Err(SpecError::FieldTooLarge { offset: start });
        }
        i += 1;
    }
    if i == start {
        Ok((None, i))
    } else {
        Ok((Some(value), i))
    }
}

impl FromStr for FormatSpec {
    type Err = SpecError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Serialize back to directive form.
impl fmt::Display for FormatSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}", self.flags)?;
        if let Some(w) = self.width.filter(|&w| w > 0) {
            write!(f, "{w}")?;
        }
        if let Some(p) = self.precision {
            write!(f, ".{p}")?;
        }
        write!(f, "{}", self.presentation.as_char())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
