//! PHP value types.

use std::borrow::Cow;
use std::fmt;

/// A PHP value parsed from a literal expression.
///
/// PHP has a single ordered array type. It is split here into [`PhpValue::List`]
/// (keys `0..n` in order) and [`PhpValue::Map`] (anything else), which is the
/// shape the JSON projection and the serializer both need.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PhpValue<'a> {
    /// PHP null value.
    #[default]
    Null,

    /// PHP boolean value.
    Bool(bool),

    /// PHP integer value.
    Int(i64),

    /// PHP float/double value.
    Float(f64),

    /// PHP string value.
    /// Borrows from the input unless escape sequences had to be decoded.
    String(Cow<'a, str>),

    /// Array whose keys are exactly `0, 1, ..., n-1` in order.
    List(Vec<PhpValue<'a>>),

    /// Any other array, in insertion order. Keys are unique.
    Map(Vec<(ArrayKey<'a>, PhpValue<'a>)>),
}

/// A PHP array key. PHP only allows integers and strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArrayKey<'a> {
    /// Integer key.
    Int(i64),
    /// String key (never a canonical decimal integer once normalized).
    String(Cow<'a, str>),
}

impl<'a> PhpValue<'a> {
    /// Check if the value is null.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, PhpValue::Null)
    }

    /// Check if the value is a boolean.
    #[inline]
    pub fn is_bool(&self) -> bool {
        matches!(self, PhpValue::Bool(_))
    }

    /// Check if the value is an integer.
    #[inline]
    pub fn is_int(&self) -> bool {
        matches!(self, PhpValue::Int(_))
    }

    /// Check if the value is a float.
    #[inline]
    pub fn is_float(&self) -> bool {
        matches!(self, PhpValue::Float(_))
    }

    /// Check if the value is a string.
    #[inline]
    pub fn is_string(&self) -> bool {
        matches!(self, PhpValue::String(_))
    }

    /// Check if the value is an array of either shape.
    #[inline]
    pub fn is_array(&self) -> bool {
        matches!(self, PhpValue::List(_) | PhpValue::Map(_))
    }

    /// Check if the value is a sequential list.
    #[inline]
    pub fn is_list(&self) -> bool {
        matches!(self, PhpValue::List(_))
    }

    /// Check if the value is a keyed map.
    #[inline]
    pub fn is_map(&self) -> bool {
        matches!(self, PhpValue::Map(_))
    }

    /// Get the value as a boolean.
    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PhpValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the value as an integer.
    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            PhpValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the value as a float.
    #[inline]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            PhpValue::Float(f) => Some(*f),
            PhpValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Get the value as a string slice.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PhpValue::String(s) => Some(s.as_ref()),
            _ => None,
        }
    }

    /// Get the elements of a list.
    #[inline]
    pub fn as_list(&self) -> Option<&[PhpValue<'a>]> {
        match self {
            PhpValue::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Get the entries of a map.
    #[inline]
    pub fn as_map(&self) -> Option<&[(ArrayKey<'a>, PhpValue<'a>)]> {
        match self {
            PhpValue::Map(entries) => Some(entries.as_slice()),
            _ => None,
        }
    }

    /// Number of elements if the value is an array.
    pub fn len(&self) -> Option<usize> {
        match self {
            PhpValue::List(items) => Some(items.len()),
            PhpValue::Map(entries) => Some(entries.len()),
            _ => None,
        }
    }

    /// Look up an element by key, the way `$value[$key]` would.
    ///
    /// Lists answer integer keys by position.
    pub fn get(&self, key: &ArrayKey<'_>) -> Option<&PhpValue<'a>> {
        match (self, key) {
            (PhpValue::List(items), ArrayKey::Int(i)) => {
                usize::try_from(*i).ok().and_then(|i| items.get(i))
            }
            (PhpValue::Map(entries), _) => entries
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v),
            _ => None,
        }
    }

    /// Look up a string key. Shorthand for [`PhpValue::get`].
    pub fn get_str(&self, key: &str) -> Option<&PhpValue<'a>> {
        self.get(&ArrayKey::from_string(Cow::Borrowed(key)))
    }

    /// Convert to an owned value that doesn't borrow from the input.
    pub fn into_owned(self) -> PhpValue<'static> {
        match self {
            PhpValue::Null => PhpValue::Null,
            PhpValue::Bool(b) => PhpValue::Bool(b),
            PhpValue::Int(i) => PhpValue::Int(i),
            PhpValue::Float(f) => PhpValue::Float(f),
            PhpValue::String(s) => PhpValue::String(Cow::Owned(s.into_owned())),
            PhpValue::List(items) => {
                PhpValue::List(items.into_iter().map(PhpValue::into_owned).collect())
            }
            PhpValue::Map(entries) => PhpValue::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into_owned(), v.into_owned()))
                    .collect(),
            ),
        }
    }

    /// Get a type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            PhpValue::Null => "null",
            PhpValue::Bool(_) => "boolean",
            PhpValue::Int(_) => "integer",
            PhpValue::Float(_) => "float",
            PhpValue::String(_) => "string",
            PhpValue::List(_) | PhpValue::Map(_) => "array",
        }
    }
}

impl<'a> ArrayKey<'a> {
    /// Build a key from a string, casting canonical decimal integers to
    /// [`ArrayKey::Int`] like PHP does (`"5"` becomes `5`, `"05"` stays a string).
    pub fn from_string(s: Cow<'a, str>) -> Self {
        match canonical_int(&s) {
            Some(i) => ArrayKey::Int(i),
            None => ArrayKey::String(s),
        }
    }

    /// Convert a scalar value to a key using PHP's offset casting rules.
    ///
    /// Returns `None` for arrays, which PHP rejects as an illegal offset type.
    pub fn from_value(value: PhpValue<'a>) -> Option<Self> {
        match value {
            PhpValue::Null => Some(ArrayKey::String(Cow::Borrowed(""))),
            PhpValue::Bool(b) => Some(ArrayKey::Int(i64::from(b))),
            PhpValue::Int(i) => Some(ArrayKey::Int(i)),
            // Saturating cast, NaN becomes 0
            PhpValue::Float(f) => Some(ArrayKey::Int(f.trunc() as i64)),
            PhpValue::String(s) => Some(ArrayKey::from_string(s)),
            PhpValue::List(_) | PhpValue::Map(_) => None,
        }
    }

    /// Convert to an owned key that doesn't borrow from the input.
    pub fn into_owned(self) -> ArrayKey<'static> {
        match self {
            ArrayKey::Int(i) => ArrayKey::Int(i),
            ArrayKey::String(s) => ArrayKey::String(Cow::Owned(s.into_owned())),
        }
    }
}

impl From<i64> for ArrayKey<'_> {
    fn from(i: i64) -> Self {
        ArrayKey::Int(i)
    }
}

impl<'a> From<&'a str> for ArrayKey<'a> {
    fn from(s: &'a str) -> Self {
        ArrayKey::from_string(Cow::Borrowed(s))
    }
}

/// Parse `s` as an integer only if it is PHP's canonical form of one:
/// optional `-`, no leading zeros, no `-0`, in `i64` range.
fn canonical_int(s: &str) -> Option<i64> {
    let digits = s.strip_prefix('-').unwrap_or(s);
    let bytes = digits.as_bytes();
    if bytes.is_empty() || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    if bytes[0] == b'0' && (bytes.len() > 1 || digits.len() != s.len()) {
        return None;
    }
    s.parse().ok()
}

impl fmt::Display for ArrayKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayKey::Int(i) => write!(f, "{}", i),
            ArrayKey::String(s) => write!(f, "\"{}\"", s),
        }
    }
}

impl fmt::Display for PhpValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhpValue::Null => write!(f, "null"),
            PhpValue::Bool(b) => write!(f, "{}", b),
            PhpValue::Int(i) => write!(f, "{}", i),
            PhpValue::Float(fl) => write!(f, "{}", fl),
            PhpValue::String(s) => write!(f, "\"{}\"", s),
            PhpValue::List(items) => {
                write!(f, "[")?;
                for (i, v) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
            PhpValue::Map(entries) => {
                write!(f, "[")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{} => {}", k, v)?;
                }
                write!(f, "]")
            }
        }
    }
}
