//! PHP `serialize()` writer.
//!
//! Emits the same text PHP's `serialize()` produces for arrays and scalars:
//!
//! | Value | Output |
//! |-------|--------|
//! | `Null` | `N;` |
//! | `Bool` | `b:0;` / `b:1;` |
//! | `Int` | `i:<n>;` |
//! | `Float` | `d:<n>;` |
//! | `String` | `s:<byte length>:"<bytes>";` |
//! | `List` / `Map` | `a:<count>:{<key><value>...}` |
//!
//! String lengths are UTF-8 byte counts, not character counts.

use std::fmt::{self, Write};

use crate::error::Result;
use crate::parser::from_str;
use crate::types::{ArrayKey, PhpValue};

/// Display adapter that renders a value in `serialize()` format.
///
/// Useful with `write!` when the output goes somewhere other than a fresh
/// `String`.
///
/// # Example
///
/// ```rust
/// use php_literal_core::{PhpValue, Serialized};
///
/// let value = PhpValue::List(vec![PhpValue::Int(7)]);
/// assert_eq!(format!("{}", Serialized(&value)), "a:1:{i:0;i:7;}");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Serialized<'v, 'a>(pub &'v PhpValue<'a>);

impl fmt::Display for Serialized<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_serialized(f, self.0)
    }
}

/// Write `value` in `serialize()` format to any [`fmt::Write`] sink.
pub fn write_serialized<W: Write + ?Sized>(out: &mut W, value: &PhpValue<'_>) -> fmt::Result {
    match value {
        PhpValue::Null => out.write_str("N;"),
        PhpValue::Bool(b) => out.write_str(if *b { "b:1;" } else { "b:0;" }),
        PhpValue::Int(i) => write!(out, "i:{};", i),
        PhpValue::Float(f) => {
            out.write_str("d:")?;
            write_float(out, *f)?;
            out.write_char(';')
        }
        PhpValue::String(s) => write_string(out, s),
        PhpValue::List(items) => {
            write!(out, "a:{}:{{", items.len())?;
            for (i, item) in items.iter().enumerate() {
                write!(out, "i:{};", i)?;
                write_serialized(out, item)?;
            }
            out.write_char('}')
        }
        PhpValue::Map(entries) => {
            write!(out, "a:{}:{{", entries.len())?;
            for (key, item) in entries {
                match key {
                    ArrayKey::Int(i) => write!(out, "i:{};", i)?,
                    ArrayKey::String(s) => write_string(out, s)?,
                }
                write_serialized(out, item)?;
            }
            out.write_char('}')
        }
    }
}

#[inline]
fn write_string<W: Write + ?Sized>(out: &mut W, s: &str) -> fmt::Result {
    // str::len is the UTF-8 byte length
    write!(out, "s:{}:\"{}\";", s.len(), s)
}

/// Shortest decimal that reads back as the same `f64`, without exponent.
/// Non-finite values use PHP's spelling.
fn write_float<W: Write + ?Sized>(out: &mut W, f: f64) -> fmt::Result {
    if f.is_nan() {
        out.write_str("NAN")
    } else if f.is_infinite() {
        out.write_str(if f.is_sign_positive() { "INF" } else { "-INF" })
    } else {
        write!(out, "{}", f)
    }
}

/// Serialize a value to PHP `serialize()` format.
///
/// Total over every [`PhpValue`].
///
/// # Example
///
/// ```rust
/// use std::borrow::Cow;
/// use php_literal_core::{serialize, PhpValue};
///
/// let value = PhpValue::String(Cow::Borrowed("café"));
/// assert_eq!(serialize(&value), r#"s:5:"café";"#);
/// ```
pub fn serialize(value: &PhpValue<'_>) -> String {
    Serialized(value).to_string()
}

/// Parse a PHP literal and serialize it in one step.
///
/// # Example
///
/// ```rust
/// use php_literal_core::php_to_serialized;
///
/// let out = php_to_serialized("<?php $a = ['x' => true, 'y' => null]; ?>").unwrap();
/// assert_eq!(out, r#"a:2:{s:1:"x";b:1;s:1:"y";N;}"#);
/// ```
pub fn php_to_serialized(input: &str) -> Result<String> {
    let value = from_str(input)?;
    Ok(serialize(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;

    #[test]
    fn test_scalars() {
        assert_eq!(serialize(&PhpValue::Null), "N;");
        assert_eq!(serialize(&PhpValue::Bool(false)), "b:0;");
        assert_eq!(serialize(&PhpValue::Bool(true)), "b:1;");
        assert_eq!(serialize(&PhpValue::Int(-42)), "i:-42;");
        assert_eq!(serialize(&PhpValue::Int(i64::MIN)), "i:-9223372036854775808;");
    }

    #[test]
    fn test_floats() {
        assert_eq!(serialize(&PhpValue::Float(125.5)), "d:125.5;");
        assert_eq!(serialize(&PhpValue::Float(0.1)), "d:0.1;");
        assert_eq!(serialize(&PhpValue::Float(2.0)), "d:2;");
        assert_eq!(serialize(&PhpValue::Float(-0.0)), "d:-0;");
        assert_eq!(serialize(&PhpValue::Float(f64::NAN)), "d:NAN;");
        assert_eq!(serialize(&PhpValue::Float(f64::INFINITY)), "d:INF;");
        assert_eq!(serialize(&PhpValue::Float(f64::NEG_INFINITY)), "d:-INF;");
    }

    #[test]
    fn test_string_byte_length() {
        let s = |v: &'static str| PhpValue::String(Cow::Borrowed(v));
        assert_eq!(serialize(&s("")), r#"s:0:"";"#);
        assert_eq!(serialize(&s("café")), r#"s:5:"café";"#);
        assert_eq!(serialize(&s("한글")), r#"s:6:"한글";"#);
        assert_eq!(serialize(&s("say \"hi\";")), r#"s:9:"say "hi";";"#);
    }

    #[test]
    fn test_list_uses_positional_keys() {
        let value = PhpValue::List(vec![PhpValue::Int(1), PhpValue::Null]);
        assert_eq!(serialize(&value), "a:2:{i:0;i:1;i:1;N;}");
        assert_eq!(serialize(&PhpValue::List(vec![])), "a:0:{}");
    }

    #[test]
    fn test_map_keys() {
        let value = PhpValue::Map(vec![
            (ArrayKey::Int(5), PhpValue::Bool(true)),
            (ArrayKey::from("k"), PhpValue::Float(1.5)),
        ]);
        assert_eq!(serialize(&value), r#"a:2:{i:5;b:1;s:1:"k";d:1.5;}"#);
    }

    #[test]
    fn test_nested_from_literal() {
        let out =
            php_to_serialized("array('user'=>array('name'=>'Jo','tags'=>array('a','b')))")
                .unwrap();
        assert_eq!(
            out,
            r#"a:1:{s:4:"user";a:2:{s:4:"name";s:2:"Jo";s:4:"tags";a:2:{i:0;s:1:"a";i:1;s:1:"b";}}}"#
        );
    }

    #[test]
    fn test_null_and_bool_from_literal() {
        let out = php_to_serialized("array('a'=>null,'b'=>true,'c'=>false)").unwrap();
        assert_eq!(out, r#"a:3:{s:1:"a";N;s:1:"b";b:1;s:1:"c";b:0;}"#);
    }

    #[test]
    fn test_mixed_keys_from_literal() {
        let out = php_to_serialized("array('x'=>1, 0=>2)").unwrap();
        assert_eq!(out, r#"a:2:{s:1:"x";i:1;i:0;i:2;}"#);
    }

    #[test]
    fn test_parse_error_propagates() {
        assert!(php_to_serialized("array(1,").is_err());
    }

    #[test]
    fn test_write_into_existing_buffer() {
        let mut out = String::from("data=");
        write_serialized(&mut out, &PhpValue::Int(3)).unwrap();
        assert_eq!(out, "data=i:3;");
    }
}
