//! Type coercion switchboard.
//!
//! Converts raw source text into a field's native representation. Every
//! supported field type implements [`Coerce`]; the parse rules live in the
//! free functions of this module so they can be run without assigning
//! anything (see [`Kind::check`]).
//!
//! | Kind | Rule |
//! |------|------|
//! | signed integers | decimal `i64` parse, truncated to the field width |
//! | unsigned integers | decimal `u64` parse, truncated to the field width |
//! | floats | `f64` parse, narrowed for `f32` |
//! | `String` | identity |
//! | `bool` | depends on [`BoolStyle`] |

use std::fmt;

/// The native kind of a bindable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    Str,
    Bool,
    /// A field whose type implements [`crate::Value`].
    Custom,
}

impl Kind {
    /// Short name of the abstract kind, used in error messages.
    pub fn expected(&self) -> &'static str {
        match self {
            Kind::I8 | Kind::I16 | Kind::I32 | Kind::I64 | Kind::Isize => "int",
            Kind::U8 | Kind::U16 | Kind::U32 | Kind::U64 | Kind::Usize => "uint",
            Kind::F32 | Kind::F64 => "float",
            Kind::Str => "string",
            Kind::Bool => "bool",
            Kind::Custom => "custom value",
        }
    }

    /// Whether a field of this kind can be registered as a command-line flag.
    ///
    /// Flags only carry 64-bit integers, floats, strings and booleans.
    pub fn is_flag_supported(&self) -> bool {
        matches!(
            self,
            Kind::I64 | Kind::U64 | Kind::F32 | Kind::F64 | Kind::Str | Kind::Bool
        )
    }

    /// Run the parse rule for this kind without assigning the result.
    ///
    /// Custom kinds always pass: their parsing belongs to the field type.
    pub fn check(&self, raw: &str, booleans: BoolStyle) -> Result<(), CoerceError> {
        match self {
            Kind::I8 | Kind::I16 | Kind::I32 | Kind::I64 | Kind::Isize => {
                parse_signed(raw).map(|_| ())
            }
            Kind::U8 | Kind::U16 | Kind::U32 | Kind::U64 | Kind::Usize => {
                parse_unsigned(raw).map(|_| ())
            }
            Kind::F32 | Kind::F64 => parse_float(raw).map(|_| ()),
            Kind::Bool => parse_bool(raw, booleans).map(|_| ()),
            Kind::Str | Kind::Custom => Ok(()),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::I8 => "i8",
            Kind::I16 => "i16",
            Kind::I32 => "i32",
            Kind::I64 => "i64",
            Kind::Isize => "isize",
            Kind::U8 => "u8",
            Kind::U16 => "u16",
            Kind::U32 => "u32",
            Kind::U64 => "u64",
            Kind::Usize => "usize",
            Kind::F32 => "f32",
            Kind::F64 => "f64",
            Kind::Str => "String",
            Kind::Bool => "bool",
            Kind::Custom => "custom",
        };
        write!(f, "{}", name)
    }
}

/// How boolean text is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoolStyle {
    /// Any non-empty text is `true`, empty text is `false`. Never fails.
    ///
    /// Note that `"0"` and `"false"` are non-empty and therefore `true`.
    #[default]
    Presence,
    /// Exactly `"1"` is `true` and exactly `"0"` is `false`; anything else
    /// is an error.
    Strict,
}

/// A raw value that could not be converted to the requested kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoerceError {
    /// Abstract kind that was expected (`int`, `uint`, `float`, `bool`).
    pub expected: &'static str,
    /// Parser message.
    pub message: String,
}

impl CoerceError {
    fn new(expected: &'static str, message: impl fmt::Display) -> Self {
        Self {
            expected,
            message: message.to_string(),
        }
    }
}

impl fmt::Display for CoerceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected {}: {}", self.expected, self.message)
    }
}

impl std::error::Error for CoerceError {}

/// Parse a signed decimal integer at 64-bit precision.
pub fn parse_signed(raw: &str) -> Result<i64, CoerceError> {
    raw.parse::<i64>().map_err(|e| CoerceError::new("int", e))
}

/// Parse an unsigned decimal integer at 64-bit precision.
pub fn parse_unsigned(raw: &str) -> Result<u64, CoerceError> {
    raw.parse::<u64>().map_err(|e| CoerceError::new("uint", e))
}

/// Parse a floating point number at 64-bit precision.
pub fn parse_float(raw: &str) -> Result<f64, CoerceError> {
    raw.parse::<f64>().map_err(|e| CoerceError::new("float", e))
}

/// Parse boolean text according to `style`.
pub fn parse_bool(raw: &str, style: BoolStyle) -> Result<bool, CoerceError> {
    match style {
        BoolStyle::Presence => Ok(!raw.is_empty()),
        BoolStyle::Strict => match raw {
            "1" => Ok(true),
            "0" => Ok(false),
            _ => Err(CoerceError::new("bool", "should be: 1 or 0")),
        },
    }
}

/// A field type the switchboard knows how to fill.
///
/// Implemented for every primitive the binder supports. The trait is object
/// safe so the engine can hold `&mut dyn Coerce` accessors to each field.
pub trait Coerce {
    /// Kind of this field.
    fn kind(&self) -> Kind;

    /// Parse `raw` and store the result in `self`.
    ///
    /// On error `self` is left unchanged.
    fn coerce(&mut self, raw: &str, booleans: BoolStyle) -> Result<(), CoerceError>;

    /// Reset to the type's zero value.
    fn reset(&mut self);
}

// Narrower widths are not range checked; the 64-bit value is truncated.
macro_rules! impl_coerce_signed {
    ($($t:ty => $kind:ident),*) => {
        $(
            impl Coerce for $t {
                fn kind(&self) -> Kind {
                    Kind::$kind
                }

                fn coerce(&mut self, raw: &str, _booleans: BoolStyle) -> Result<(), CoerceError> {
                    *self = parse_signed(raw)? as $t;
                    Ok(())
                }

                fn reset(&mut self) {
                    *self = 0;
                }
            }
        )*
    };
}

macro_rules! impl_coerce_unsigned {
    ($($t:ty => $kind:ident),*) => {
        $(
            impl Coerce for $t {
                fn kind(&self) -> Kind {
                    Kind::$kind
                }

                fn coerce(&mut self, raw: &str, _booleans: BoolStyle) -> Result<(), CoerceError> {
                    *self = parse_unsigned(raw)? as $t;
                    Ok(())
                }

                fn reset(&mut self) {
                    *self = 0;
                }
            }
        )*
    };
}

impl_coerce_signed!(i8 => I8, i16 => I16, i32 => I32, i64 => I64, isize => Isize);
impl_coerce_unsigned!(u8 => U8, u16 => U16, u32 => U32, u64 => U64, usize => Usize);

impl Coerce for f32 {
    fn kind(&self) -> Kind {
        Kind::F32
    }

    fn coerce(&mut self, raw: &str, _booleans: BoolStyle) -> Result<(), CoerceError> {
        *self = parse_float(raw)? as f32;
        Ok(())
    }

    fn reset(&mut self) {
        *self = 0.0;
    }
}

impl Coerce for f64 {
    fn kind(&self) -> Kind {
        Kind::F64
    }

    fn coerce(&mut self, raw: &str, _booleans: BoolStyle) -> Result<(), CoerceError> {
        *self = parse_float(raw)?;
        Ok(())
    }

    fn reset(&mut self) {
        *self = 0.0;
    }
}

impl Coerce for String {
    fn kind(&self) -> Kind {
        Kind::Str
    }

    fn coerce(&mut self, raw: &str, _booleans: BoolStyle) -> Result<(), CoerceError> {
        raw.clone_into(self);
        Ok(())
    }

    fn reset(&mut self) {
        self.clear();
    }
}

impl Coerce for bool {
    fn kind(&self) -> Kind {
        Kind::Bool
    }

    fn coerce(&mut self, raw: &str, booleans: BoolStyle) -> Result<(), CoerceError> {
        *self = parse_bool(raw, booleans)?;
        Ok(())
    }

    fn reset(&mut self) {
        *self = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_parse() {
        let mut v: i64 = 0;
        v.coerce("-42", BoolStyle::Presence).unwrap();
        assert_eq!(v, -42);

        let mut v: i32 = 7;
        let err = v.coerce("forty", BoolStyle::Presence).unwrap_err();
        assert_eq!(err.expected, "int");
        assert_eq!(v, 7);
    }

    #[test]
    fn test_signed_narrow_width_truncates() {
        let mut v: i8 = 0;
        v.coerce("300", BoolStyle::Presence).unwrap();
        assert_eq!(v, 300_i64 as i8);
    }

    #[test]
    fn test_unsigned_rejects_negative() {
        let mut v: u64 = 0;
        assert!(v.coerce("-1", BoolStyle::Presence).is_err());
        v.coerce("18446744073709551615", BoolStyle::Presence)
            .unwrap();
        assert_eq!(v, u64::MAX);
    }

    #[test]
    fn test_float_parse() {
        let mut v: f64 = 0.0;
        v.coerce("3.25", BoolStyle::Presence).unwrap();
        assert_eq!(v, 3.25);

        let mut v: f32 = 0.0;
        v.coerce("0.5", BoolStyle::Presence).unwrap();
        assert_eq!(v, 0.5);

        assert_eq!(parse_float("abc").unwrap_err().expected, "float");
    }

    #[test]
    fn test_empty_text_fails_numeric() {
        assert!(parse_signed("").is_err());
        assert!(parse_unsigned("").is_err());
        assert!(parse_float("").is_err());
    }

    #[test]
    fn test_string_identity() {
        let mut v = String::from("old");
        v.coerce("  spaced  ", BoolStyle::Strict).unwrap();
        assert_eq!(v, "  spaced  ");
    }

    #[test]
    fn test_bool_presence() {
        assert_eq!(parse_bool("", BoolStyle::Presence), Ok(false));
        assert_eq!(parse_bool("anything", BoolStyle::Presence), Ok(true));
        // "0" is non-empty text
        assert_eq!(parse_bool("0", BoolStyle::Presence), Ok(true));
    }

    #[test]
    fn test_bool_strict() {
        assert_eq!(parse_bool("1", BoolStyle::Strict), Ok(true));
        assert_eq!(parse_bool("0", BoolStyle::Strict), Ok(false));
        assert!(parse_bool("true", BoolStyle::Strict).is_err());
        assert!(parse_bool("", BoolStyle::Strict).is_err());
    }

    #[test]
    fn test_reset() {
        let mut s = String::from("x");
        s.reset();
        assert!(s.is_empty());

        let mut b = true;
        b.reset();
        assert!(!b);

        let mut n: u16 = 9;
        n.reset();
        assert_eq!(n, 0);
    }

    #[test]
    fn test_kind_flag_support() {
        assert!(Kind::I64.is_flag_supported());
        assert!(Kind::F32.is_flag_supported());
        assert!(!Kind::I32.is_flag_supported());
        assert!(!Kind::Custom.is_flag_supported());
    }

    #[test]
    fn test_kind_check() {
        assert!(Kind::U8.check("12", BoolStyle::Presence).is_ok());
        assert!(Kind::U8.check("-12", BoolStyle::Presence).is_err());
        assert!(Kind::Bool.check("yes", BoolStyle::Strict).is_err());
        assert!(Kind::Custom.check("", BoolStyle::Strict).is_ok());
    }
}
