//! Recursive-descent parser for PHP value literals.
//!
//! Accepts the value subset of PHP source that people paste into converters:
//! `array(...)` and `[...]` arrays (nested, keyed with `=>` or not), quoted
//! strings, numbers, `true`/`false`/`null`, and bare constants, optionally
//! wrapped in `<?php ... ?>` and a `$var = ...;` assignment.
//!
//! ```text
//! Value    := Array | String | Number | Bool | Null | BareWord
//! Array    := 'array' '(' Elements? ')' | '[' Elements? ']'
//! Elements := Element (',' Element)* ','?
//! Element  := (Value '=>')? Value
//! ```
//!
//! Parsing is a single left-to-right pass over the input with no token
//! pre-pass. Quoted strings are located with `memchr`, and bare words are
//! scanned with bracket-depth and in-string tracking so that commas, `=>` and
//! closers inside nested calls or quotes never end the element early.
//!
//! # Tracing Support
//!
//! Enable the `tracing` feature for parsing instrumentation:
//!
//! ```toml
//! php-literal-core = { version = "0.1", features = ["tracing"] }
//! ```

use std::borrow::Cow;

use memchr::memchr2;

#[cfg(feature = "tracing")]
use tracing::{debug, instrument, trace, warn};

use crate::array::ArrayBuilder;
use crate::error::{ErrorKind, ParseError, Result};
use crate::types::{ArrayKey, PhpValue};

/// Maximum nesting depth to prevent stack overflow.
///
/// Each level costs a few recursive frames, so the default fits a 2 MiB
/// thread stack in debug builds.
const MAX_DEPTH: usize = 512;

/// Parser configuration options.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Maximum nesting depth for arrays.
    pub max_depth: usize,
    /// Whether to strip `<?php`, `?>`, a trailing `;` and a leading
    /// `$var =` before parsing. Surrounding whitespace is always ignored.
    pub strip_wrapper: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH,
            strip_wrapper: true,
        }
    }
}

/// A PHP literal parser over borrowed input.
pub struct Parser<'a> {
    /// Input text.
    input: &'a str,
    /// Input bytes, same buffer as `input`.
    data: &'a [u8],
    /// Current position in the input.
    pos: usize,
    /// End of the region being parsed (exclusive).
    end: usize,
    /// Parser configuration.
    config: ParserConfig,
    /// Current array nesting depth.
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser with default configuration.
    pub fn new(input: &'a str) -> Self {
        Self::with_config(input, ParserConfig::default())
    }

    /// Create a new parser with custom configuration.
    pub fn with_config(input: &'a str, config: ParserConfig) -> Self {
        Self {
            input,
            data: input.as_bytes(),
            pos: 0,
            end: input.len(),
            config,
            depth: 0,
        }
    }

    /// Parse the whole input as one PHP value.
    ///
    /// Error positions are byte offsets into the original input, wrapper
    /// included.
    #[cfg_attr(feature = "tracing", instrument(skip(self), fields(input_len = self.input.len())))]
    pub fn parse(&mut self) -> Result<PhpValue<'a>> {
        #[cfg(feature = "tracing")]
        debug!(input_len = self.input.len(), "Starting PHP literal parse");

        let (start, end) = if self.config.strip_wrapper {
            wrapper_bounds(self.data)
        } else {
            trim_bounds(self.data, 0, self.data.len())
        };

        #[cfg(feature = "tracing")]
        trace!(start, end, "Parse region after preprocessing");

        self.pos = start;
        self.end = end;
        self.depth = 0;

        let result = self.parse_document();

        #[cfg(feature = "tracing")]
        match &result {
            Ok(value) => debug!(value_type = value.type_name(), "Parse completed successfully"),
            Err(e) => warn!(error = %e, "Parse failed"),
        }

        result
    }

    /// Parse the top-level value and reject anything after it.
    fn parse_document(&mut self) -> Result<PhpValue<'a>> {
        if self.pos >= self.end {
            return Err(ParseError::new(ErrorKind::EmptyInput, self.pos));
        }

        let value = self.parse_value()?;

        self.skip_whitespace();
        if self.pos < self.end {
            return Err(self.error_here(ErrorKind::TrailingCharacters));
        }
        Ok(value)
    }

    /// Parse a single value at the current position.
    ///
    /// Recursive; keep per-call spans out of it.
    fn parse_value(&mut self) -> Result<PhpValue<'a>> {
        self.skip_whitespace();
        let byte = self.peek_byte()?;

        match byte {
            b'[' => self.parse_array(b'[', b']'),
            b'\'' | b'"' => self.parse_string(),
            b',' | b')' | b']' => Err(self.error_here(ErrorKind::ExpectedValue(byte as char))),
            _ => match self.array_keyword_paren() {
                Some(paren) => {
                    self.pos = paren;
                    self.parse_array(b'(', b')')
                }
                None => self.parse_bare(),
            },
        }
    }

    /// Parse an array whose opening delimiter is at the current position.
    fn parse_array(&mut self, open: u8, close: u8) -> Result<PhpValue<'a>> {
        let open_pos = self.pos;
        self.expect_byte(open)?;

        self.depth += 1;
        if self.depth > self.config.max_depth {
            return Err(self.depth_exceeded(open_pos));
        }

        let mut builder = ArrayBuilder::new();

        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return Err(self.unclosed_array(open_pos, close)),
                Some(b) if b == close => {
                    self.pos += 1;
                    break;
                }
                Some(_) => {}
            }

            self.parse_element(&mut builder)?;

            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b) if b == close => {
                    self.pos += 1;
                    break;
                }
                Some(b')' | b']') => {
                    return Err(self.error_here(ErrorKind::UnexpectedChar {
                        expected: close as char,
                        found: self.current_char(),
                    }))
                }
                Some(_) => {
                    return Err(self.error_here(ErrorKind::UnexpectedChar {
                        expected: ',',
                        found: self.current_char(),
                    }))
                }
                None => return Err(self.unclosed_array(open_pos, close)),
            }
        }

        self.depth -= 1;

        #[cfg(feature = "tracing")]
        trace_classified(&builder);

        Ok(builder.finish())
    }

    /// Parse `value` or `key => value` into the builder.
    fn parse_element(&mut self, builder: &mut ArrayBuilder<'a>) -> Result<()> {
        let start = self.pos;
        let first = self.parse_value()?;

        self.skip_whitespace();
        if self.starts_with(b"=>") {
            self.pos += 2;
            let type_name = first.type_name();
            let key = ArrayKey::from_value(first).ok_or_else(|| {
                ParseError::new(ErrorKind::InvalidArrayKey(type_name), start)
                    .with_input_preview(self.data, start)
            })?;
            let value = self.parse_value()?;
            builder.insert(key, value);
        } else {
            builder
                .push(first)
                .map_err(|_| ParseError::new(ErrorKind::ArrayIndexOverflow, start))?;
        }

        Ok(())
    }

    /// Parse a quoted string starting at the current position.
    fn parse_string(&mut self) -> Result<PhpValue<'a>> {
        let open = self.pos;
        let quote = self.data[open];
        let close = self.find_closing_quote(open)?;

        let raw = &self.input[open + 1..close];
        self.pos = close + 1;

        Ok(PhpValue::String(unescape(raw, quote)))
    }

    /// Parse an unquoted token: number, boolean, null or bare constant.
    fn parse_bare(&mut self) -> Result<PhpValue<'a>> {
        let start = self.pos;
        let stop = self.scan_bare_token(start)?;
        let token = self.input[start..stop].trim_end();
        self.pos = stop;

        if token.is_empty() {
            return Err(self.error_here(ErrorKind::ExpectedValue(self.current_char())));
        }

        if let Some(offset) = operand_after_literal(token) {
            let at = start + offset;
            return Err(ParseError::new(
                ErrorKind::UnexpectedChar {
                    expected: ',',
                    found: token[offset..].chars().next().unwrap_or('\0'),
                },
                at,
            )
            .with_input_preview(self.data, at));
        }

        Ok(classify_bare(token))
    }

    /// Find where a bare token ends: the first `,`, `=>` or unmatched closer
    /// outside of any nested brackets or quotes.
    fn scan_bare_token(&self, start: usize) -> Result<usize> {
        // Closers still expected, with the position of their opener
        let mut stack: Vec<(usize, u8)> = Vec::new();
        let mut i = start;

        while i < self.end {
            match self.data[i] {
                b'\'' | b'"' => {
                    i = self.find_closing_quote(i)? + 1;
                    continue;
                }
                b'(' => stack.push((i, b')')),
                b'[' => stack.push((i, b']')),
                found @ (b')' | b']') => match stack.pop() {
                    None => break,
                    Some((_, expected)) if expected == found => {}
                    Some((_, expected)) => {
                        return Err(ParseError::new(
                            ErrorKind::UnexpectedChar {
                                expected: expected as char,
                                found: found as char,
                            },
                            i,
                        )
                        .with_input_preview(self.data, i))
                    }
                },
                b',' if stack.is_empty() => break,
                b'=' if stack.is_empty() && self.byte_at(i + 1) == Some(b'>') => break,
                _ => {}
            }
            i += 1;
        }

        if let Some(&(open_pos, close)) = stack.last() {
            return Err(self.unclosed_array(open_pos, close));
        }

        Ok(i)
    }

    /// Return the index of the quote that closes the string opened at `open`.
    ///
    /// A backslash always escapes the following byte, which is enough to skip
    /// `\'` and `\"` in both quoting styles.
    fn find_closing_quote(&self, open: usize) -> Result<usize> {
        let quote = self.data[open];
        let mut i = open + 1;

        while i < self.end {
            match memchr2(quote, b'\\', &self.data[i..self.end]) {
                Some(offset) => {
                    let at = i + offset;
                    if self.data[at] == quote {
                        return Ok(at);
                    }
                    i = at + 2;
                }
                None => break,
            }
        }

        Err(ParseError::new(ErrorKind::UnterminatedString, open)
            .with_input_preview(self.data, open))
    }

    /// If the input at the current position is the `array` keyword followed
    /// by `(`, return the position of the parenthesis.
    fn array_keyword_paren(&self) -> Option<usize> {
        let keyword_end = self.pos + 5;
        if keyword_end > self.end || !self.data[self.pos..keyword_end].eq_ignore_ascii_case(b"array")
        {
            return None;
        }

        let mut i = keyword_end;
        while i < self.end && self.data[i].is_ascii_whitespace() {
            i += 1;
        }
        (self.byte_at(i) == Some(b'(')).then_some(i)
    }

    // Helper methods

    /// Peek at the current byte without consuming it.
    #[inline]
    fn peek(&self) -> Option<u8> {
        self.byte_at(self.pos)
    }

    /// Byte at `i` if it lies inside the parse region.
    #[inline]
    fn byte_at(&self, i: usize) -> Option<u8> {
        if i < self.end {
            Some(self.data[i])
        } else {
            None
        }
    }

    /// Peek at the current byte, failing at the end of input.
    #[inline]
    fn peek_byte(&self) -> Result<u8> {
        self.peek()
            .ok_or_else(|| ParseError::new(ErrorKind::UnexpectedEof, self.pos))
    }

    /// Expect a specific byte, returning an error if it doesn't match.
    #[inline]
    fn expect_byte(&mut self, expected: u8) -> Result<()> {
        let byte = self.peek_byte()?;
        if byte != expected {
            return Err(self.error_here(ErrorKind::UnexpectedChar {
                expected: expected as char,
                found: self.current_char(),
            }));
        }
        self.pos += 1;
        Ok(())
    }

    #[inline]
    fn starts_with(&self, prefix: &[u8]) -> bool {
        self.data[self.pos..self.end].starts_with(prefix)
    }

    #[inline]
    fn skip_whitespace(&mut self) {
        while self.pos < self.end && self.data[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    /// The character at the current position, for error messages.
    fn current_char(&self) -> char {
        self.input
            .get(self.pos..self.end)
            .and_then(|rest| rest.chars().next())
            .unwrap_or('\0')
    }

    #[cold]
    #[inline(never)]
    fn error_here(&self, kind: ErrorKind) -> ParseError {
        ParseError::new(kind, self.pos).with_input_preview(self.data, self.pos)
    }

    #[cold]
    #[inline(never)]
    fn depth_exceeded(&self, open_pos: usize) -> ParseError {
        #[cfg(feature = "tracing")]
        warn!(depth = self.depth, max_depth = self.config.max_depth, "Max depth exceeded");
        ParseError::new(ErrorKind::MaxDepthExceeded(self.config.max_depth), open_pos)
    }

    #[cold]
    #[inline(never)]
    fn unclosed_array(&self, open_pos: usize, close: u8) -> ParseError {
        ParseError::new(ErrorKind::UnclosedArray(close as char), open_pos)
            .with_input_preview(self.data, open_pos)
            .with_context("opened here")
    }
}

#[cfg(feature = "tracing")]
#[inline(never)]
fn trace_classified(builder: &ArrayBuilder<'_>) {
    trace!(
        elements = builder.len(),
        sequential = builder.is_sequential(),
        "Classified array"
    );
}

/// Decode the escape sequences of a quoted string body.
///
/// Double quotes understand `\n \r \t \' \" \\ \$`, single quotes only
/// `\' \\`. Any other backslash is kept as written, as PHP does.
fn unescape(raw: &str, quote: u8) -> Cow<'_, str> {
    if !raw.contains('\\') {
        return Cow::Borrowed(raw);
    }

    let double = quote == b'"';
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('\'') => out.push('\''),
            Some('"') if double => out.push('"'),
            Some('n') if double => out.push('\n'),
            Some('r') if double => out.push('\r'),
            Some('t') if double => out.push('\t'),
            Some('$') if double => out.push('$'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    Cow::Owned(out)
}

/// Turn a trimmed bare token into a number, boolean, null or opaque string.
fn classify_bare(token: &str) -> PhpValue<'_> {
    if let Some(number) = parse_number(token) {
        return number;
    }
    if token.eq_ignore_ascii_case("true") {
        PhpValue::Bool(true)
    } else if token.eq_ignore_ascii_case("false") {
        PhpValue::Bool(false)
    } else if token.eq_ignore_ascii_case("null") {
        PhpValue::Null
    } else {
        PhpValue::String(Cow::Borrowed(token))
    }
}

/// If `token` opens with a complete number, boolean or null followed by
/// whitespace and the start of another value, return that value's offset.
///
/// `1 2` and `true 'x'` are two elements with the comma missing, while
/// `1 + 2` or `PHP_INT_MAX - 1` stay opaque expressions.
fn operand_after_literal(token: &str) -> Option<usize> {
    let word_end = token.find(|c: char| c.is_ascii_whitespace())?;
    let word = &token[..word_end];
    let is_literal = parse_number(word).is_some()
        || ["true", "false", "null"]
            .iter()
            .any(|lit| word.eq_ignore_ascii_case(lit));
    if !is_literal {
        return None;
    }

    let rest = &token[word_end..];
    let offset = word_end + (rest.len() - rest.trim_start().len());
    let next = token[offset..].chars().next()?;
    let starts_value =
        next.is_alphanumeric() || matches!(next, '\'' | '"' | '[' | '_' | '$' | '\\');
    starts_value.then_some(offset)
}

/// Parse `-?digits(.digits)?([eE][+-]?digits)?`.
///
/// Integers that overflow `i64` become floats, as in PHP. Integers with a
/// leading zero are read as octal.
fn parse_number(token: &str) -> Option<PhpValue<'static>> {
    let bytes = token.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut i = usize::from(bytes.first() == Some(&b'-'));
    let int_end = digits_from(i);
    if int_end == i {
        return None;
    }
    i = int_end;

    let mut is_float = false;
    if bytes.get(i) == Some(&b'.') {
        let frac_end = digits_from(i + 1);
        if frac_end == i + 1 {
            return None;
        }
        i = frac_end;
        is_float = true;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp_end = digits_from(i);
        if exp_end == i {
            return None;
        }
        i = exp_end;
        is_float = true;
    }

    if i != bytes.len() {
        return None;
    }

    let digits = &token[usize::from(bytes[0] == b'-')..int_end];
    if !is_float && digits.len() > 1 && digits.starts_with('0') {
        return parse_octal(token, digits);
    }

    if !is_float {
        if let Ok(n) = token.parse::<i64>() {
            return Some(PhpValue::Int(n));
        }
    }
    token.parse::<f64>().ok().map(PhpValue::Float)
}

/// Leading-zero integers are octal, as in PHP. `08` and `09` are not numbers.
fn parse_octal(token: &str, digits: &str) -> Option<PhpValue<'static>> {
    if !digits.bytes().all(|b| (b'0'..=b'7').contains(&b)) {
        return None;
    }
    if let Ok(n) = i64::from_str_radix(token, 8) {
        return Some(PhpValue::Int(n));
    }
    let magnitude = digits
        .bytes()
        .fold(0.0, |acc, b| acc * 8.0 + f64::from(b - b'0'));
    Some(PhpValue::Float(if token.starts_with('-') {
        -magnitude
    } else {
        magnitude
    }))
}

/// Shrink `[start, end)` past ASCII whitespace on both sides.
fn trim_bounds(data: &[u8], mut start: usize, mut end: usize) -> (usize, usize) {
    while start < end && data[start].is_ascii_whitespace() {
        start += 1;
    }
    while end > start && data[end - 1].is_ascii_whitespace() {
        end -= 1;
    }
    (start, end)
}

/// Locate the value expression inside optional `<?php`, `?>`, trailing `;`
/// and `$var =` wrapping.
fn wrapper_bounds(data: &[u8]) -> (usize, usize) {
    let (mut start, mut end) = trim_bounds(data, 0, data.len());

    if end - start >= 5 && data[start..start + 5].eq_ignore_ascii_case(b"<?php") {
        start += 5;
    }
    if end - start >= 2 && &data[end - 2..end] == b"?>" {
        end -= 2;
    }
    (start, end) = trim_bounds(data, start, end);

    if end > start && data[end - 1] == b';' {
        end -= 1;
    }
    if let Some(rhs) = assignment_rhs(data, start, end) {
        start = rhs;
    }

    trim_bounds(data, start, end)
}

/// If `data[start..end]` is `$name = rhs`, return where `rhs` begins.
fn assignment_rhs(data: &[u8], start: usize, end: usize) -> Option<usize> {
    if start >= end || data[start] != b'$' {
        return None;
    }

    let name_start = start + 1;
    let mut i = name_start;
    while i < end && (data[i].is_ascii_alphanumeric() || data[i] == b'_') {
        i += 1;
    }
    if i == name_start {
        return None;
    }

    while i < end && data[i].is_ascii_whitespace() {
        i += 1;
    }
    if i >= end || data[i] != b'=' {
        return None;
    }
    i += 1;

    while i < end && data[i].is_ascii_whitespace() {
        i += 1;
    }
    (i < end).then_some(i)
}

/// Strip the `<?php ... ?>` tags, trailing `;` and `$var =` prefix from PHP
/// source, returning the value expression.
///
/// # Example
///
/// ```rust
/// use php_literal_core::preprocess;
///
/// assert_eq!(preprocess("<?php $data = [1, 2]; ?>"), "[1, 2]");
/// assert_eq!(preprocess("  array()  "), "array()");
/// ```
pub fn preprocess(input: &str) -> &str {
    let (start, end) = wrapper_bounds(input.as_bytes());
    &input[start..end]
}

/// Parse a PHP value literal.
///
/// This is the primary API for turning PHP source into a [`PhpValue`].
///
/// # Example
///
/// ```rust
/// use php_literal_core::{from_str, PhpValue};
///
/// let value = from_str("array('name' => 'Jo', 'tags' => ['a', 'b'])").unwrap();
/// assert_eq!(value.get_str("name").and_then(PhpValue::as_str), Some("Jo"));
/// assert!(value.get_str("tags").unwrap().is_list());
/// ```
#[inline]
pub fn from_str(input: &str) -> Result<PhpValue<'_>> {
    #[cfg(feature = "tracing")]
    trace!(input_len = input.len(), "from_str called");

    let mut parser = Parser::new(input);
    parser.parse()
}

/// Parse a PHP value literal with custom configuration.
///
/// # Example
///
/// ```rust
/// use php_literal_core::{from_str_with_config, ParserConfig};
///
/// let config = ParserConfig {
///     max_depth: 64,
///     strip_wrapper: false,
/// };
/// let value = from_str_with_config("[1, 2, 3]", config).unwrap();
/// assert_eq!(value.len(), Some(3));
/// ```
#[inline]
pub fn from_str_with_config(input: &str, config: ParserConfig) -> Result<PhpValue<'_>> {
    #[cfg(feature = "tracing")]
    trace!(input_len = input.len(), ?config, "from_str_with_config called");

    let mut parser = Parser::with_config(input, config);
    parser.parse()
}

#[cfg(test)]
#[allow(clippy::approx_constant)]
mod tests {
    use super::*;

    fn s(v: &str) -> PhpValue<'_> {
        PhpValue::String(Cow::Borrowed(v))
    }

    fn key(v: &str) -> ArrayKey<'_> {
        ArrayKey::String(Cow::Borrowed(v))
    }

    #[test]
    fn test_list() {
        assert_eq!(
            from_str("array(1,2,3)").unwrap(),
            PhpValue::List(vec![PhpValue::Int(1), PhpValue::Int(2), PhpValue::Int(3)])
        );
        assert_eq!(
            from_str("[1, 2, 3]").unwrap(),
            from_str("array(1,2,3)").unwrap()
        );
    }

    #[test]
    fn test_map_preserves_order() {
        assert_eq!(
            from_str("array('b'=>2,'a'=>1)").unwrap(),
            PhpValue::Map(vec![(key("b"), PhpValue::Int(2)), (key("a"), PhpValue::Int(1))])
        );
    }

    #[test]
    fn test_string_key_decides_map() {
        assert_eq!(
            from_str("array('x'=>1, 0=>2)").unwrap(),
            PhpValue::Map(vec![
                (key("x"), PhpValue::Int(1)),
                (ArrayKey::Int(0), PhpValue::Int(2)),
            ])
        );
    }

    #[test]
    fn test_explicit_sequential_keys_are_list() {
        assert_eq!(
            from_str("[0 => 'a', 1 => 'b', 'c']").unwrap(),
            PhpValue::List(vec![s("a"), s("b"), s("c")])
        );
    }

    #[test]
    fn test_numeric_string_keys_are_cast() {
        assert_eq!(
            from_str("['0' => 'a', \"1\" => 'b']").unwrap(),
            PhpValue::List(vec![s("a"), s("b")])
        );
        assert_eq!(
            from_str("['01' => 'a']").unwrap(),
            PhpValue::Map(vec![(key("01"), s("a"))])
        );
    }

    #[test]
    fn test_scalar_keys_are_cast() {
        assert_eq!(
            from_str("[true => 'a', null => 'b', 2.7 => 'c']").unwrap(),
            PhpValue::Map(vec![
                (ArrayKey::Int(1), s("a")),
                (key(""), s("b")),
                (ArrayKey::Int(2), s("c")),
            ])
        );
    }

    #[test]
    fn test_nested() {
        let value =
            from_str("array('user'=>array('name'=>'Jo','tags'=>array('a','b')))").unwrap();
        let user = value.get_str("user").unwrap();
        assert!(user.is_map());
        assert_eq!(user.get_str("name"), Some(&s("Jo")));
        assert_eq!(
            user.get_str("tags"),
            Some(&PhpValue::List(vec![s("a"), s("b")]))
        );
    }

    #[test]
    fn test_delimiters_inside_strings_are_inert() {
        assert_eq!(
            from_str("array('k'=>'a,b)c')").unwrap(),
            PhpValue::Map(vec![(key("k"), s("a,b)c"))])
        );
        assert_eq!(
            from_str("[\"x => y\", '[', ']']").unwrap(),
            PhpValue::List(vec![s("x => y"), s("["), s("]")])
        );
    }

    #[test]
    fn test_null_and_bool_literals() {
        assert_eq!(
            from_str("array('a'=>null,'b'=>true,'c'=>false)").unwrap(),
            PhpValue::Map(vec![
                (key("a"), PhpValue::Null),
                (key("b"), PhpValue::Bool(true)),
                (key("c"), PhpValue::Bool(false)),
            ])
        );
        assert_eq!(
            from_str("[NULL, True, FALSE]").unwrap(),
            PhpValue::List(vec![PhpValue::Null, PhpValue::Bool(true), PhpValue::Bool(false)])
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(from_str("42").unwrap(), PhpValue::Int(42));
        assert_eq!(from_str("-7").unwrap(), PhpValue::Int(-7));
        assert_eq!(from_str("3.14").unwrap(), PhpValue::Float(3.14));
        assert_eq!(from_str("-0.5").unwrap(), PhpValue::Float(-0.5));
        assert_eq!(from_str("1.0").unwrap(), PhpValue::Float(1.0));
        assert_eq!(from_str("2e3").unwrap(), PhpValue::Float(2000.0));
        assert_eq!(from_str("1.5E-2").unwrap(), PhpValue::Float(0.015));
        assert_eq!(
            from_str("-9223372036854775808").unwrap(),
            PhpValue::Int(i64::MIN)
        );
        assert_eq!(
            from_str("9223372036854775808").unwrap(),
            PhpValue::Float(9_223_372_036_854_775_808.0)
        );
    }

    #[test]
    fn test_leading_zero_is_octal() {
        assert_eq!(from_str("010").unwrap(), PhpValue::Int(8));
        assert_eq!(from_str("-017").unwrap(), PhpValue::Int(-15));
        assert_eq!(from_str("00").unwrap(), PhpValue::Int(0));
        assert_eq!(from_str("0").unwrap(), PhpValue::Int(0));
        assert_eq!(from_str("010.5").unwrap(), PhpValue::Float(10.5));
        assert_eq!(from_str("09").unwrap(), s("09"));
        assert_eq!(
            from_str("[010 => 'a']").unwrap(),
            PhpValue::Map(vec![(ArrayKey::Int(8), s("a"))])
        );
        assert_eq!(
            from_str("01000000000000000000000").unwrap(),
            PhpValue::Float(9_223_372_036_854_775_808.0)
        );
    }

    #[test]
    fn test_malformed_numbers_are_bare_words() {
        assert_eq!(from_str("1.").unwrap(), s("1."));
        assert_eq!(from_str("1e").unwrap(), s("1e"));
        assert_eq!(from_str("- 1").unwrap(), s("- 1"));
        assert_eq!(from_str("0x1A").unwrap(), s("0x1A"));
    }

    #[test]
    fn test_double_quoted_escapes() {
        assert_eq!(
            from_str(r#""a\nb\tc\r\"d\" \'e\' \\ \$x \q""#).unwrap(),
            PhpValue::String(Cow::Owned("a\nb\tc\r\"d\" 'e' \\ $x \\q".to_string()))
        );
    }

    #[test]
    fn test_single_quoted_escapes() {
        assert_eq!(
            from_str(r#"'it\'s \\ \n \"x\"'"#).unwrap(),
            PhpValue::String(Cow::Owned(r#"it's \ \n \"x\""#.to_string()))
        );
    }

    #[test]
    fn test_escaped_backslash_before_closing_quote() {
        assert_eq!(
            from_str(r"['a\\', 'b']").unwrap(),
            PhpValue::List(vec![s("a\\"), s("b")])
        );
    }

    #[test]
    fn test_strings_borrow_when_unescaped() {
        let value = from_str("'plain'").unwrap();
        assert!(matches!(value, PhpValue::String(Cow::Borrowed("plain"))));
    }

    #[test]
    fn test_unicode_strings() {
        assert_eq!(
            from_str("['café' => '한글']").unwrap(),
            PhpValue::Map(vec![(key("café"), s("한글"))])
        );
    }

    #[test]
    fn test_bare_words_are_opaque_strings() {
        assert_eq!(
            from_str("[PHP_INT_MAX, Foo::BAR, strtoupper('a,b'), fn(1, [2, 3])]").unwrap(),
            PhpValue::List(vec![
                s("PHP_INT_MAX"),
                s("Foo::BAR"),
                s("strtoupper('a,b')"),
                s("fn(1, [2, 3])"),
            ])
        );
        assert_eq!(
            from_str("[KEY => VALUE]").unwrap(),
            PhpValue::Map(vec![(key("KEY"), s("VALUE"))])
        );
    }

    #[test]
    fn test_array_keyword_variants() {
        assert_eq!(from_str("array ( 1 )").unwrap(), PhpValue::List(vec![PhpValue::Int(1)]));
        assert_eq!(from_str("ARRAY(1)").unwrap(), PhpValue::List(vec![PhpValue::Int(1)]));
        assert_eq!(from_str("[array_x]").unwrap(), PhpValue::List(vec![s("array_x")]));
        assert_eq!(from_str("[array]").unwrap(), PhpValue::List(vec![s("array")]));
    }

    #[test]
    fn test_empty_arrays() {
        assert_eq!(from_str("array()").unwrap(), PhpValue::List(vec![]));
        assert_eq!(from_str("[ ]").unwrap(), PhpValue::List(vec![]));
    }

    #[test]
    fn test_trailing_comma_and_whitespace() {
        assert_eq!(
            from_str("array(\n    'a',\n    'b',\n)").unwrap(),
            PhpValue::List(vec![s("a"), s("b")])
        );
    }

    #[test]
    fn test_duplicate_keys_keep_first_position() {
        assert_eq!(
            from_str("['a' => 1, 'b' => 2, 'a' => 3]").unwrap(),
            PhpValue::Map(vec![(key("a"), PhpValue::Int(3)), (key("b"), PhpValue::Int(2))])
        );
    }

    #[test]
    fn test_implicit_keys_continue_after_explicit() {
        assert_eq!(
            from_str("[5 => 'a', 'b']").unwrap(),
            PhpValue::Map(vec![(ArrayKey::Int(5), s("a")), (ArrayKey::Int(6), s("b"))])
        );
    }

    #[test]
    fn test_wrapper_stripping() {
        let source = "<?php\n$data = array(\n    'id' => 123,\n);\n?>\n";
        assert_eq!(
            from_str(source).unwrap(),
            PhpValue::Map(vec![(key("id"), PhpValue::Int(123))])
        );
        assert_eq!(from_str("<?PHP [1];").unwrap(), PhpValue::List(vec![PhpValue::Int(1)]));
        assert_eq!(from_str("$x=[];").unwrap(), PhpValue::List(vec![]));
    }

    #[test]
    fn test_preprocess() {
        assert_eq!(preprocess("<?php $config = ['a' => 1]; ?>"), "['a' => 1]");
        assert_eq!(preprocess("$a_1 =\n  [1]"), "[1]");
        assert_eq!(preprocess("[1];"), "[1]");
        // Not an assignment, left alone
        assert_eq!(preprocess("$ = 1"), "$ = 1");
        assert_eq!(preprocess("$a ="), "$a =");
    }

    #[test]
    fn test_without_wrapper_stripping() {
        let config = ParserConfig {
            strip_wrapper: false,
            ..Default::default()
        };
        assert_eq!(
            from_str_with_config("  [1]  ", config.clone()).unwrap(),
            PhpValue::List(vec![PhpValue::Int(1)])
        );
        let err = from_str_with_config("[1];", config).unwrap_err();
        assert_eq!(err.kind, ErrorKind::TrailingCharacters);
        assert_eq!(err.position, 3);
    }

    #[test]
    fn test_error_unclosed_array() {
        let err = from_str("array(1, 2").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnclosedArray(')'));
        assert_eq!(err.position, 5);

        let err = from_str("[1, [2, 3]").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnclosedArray(']'));
        assert_eq!(err.position, 0);
    }

    #[test]
    fn test_error_unclosed_bracket_in_bare_word() {
        let err = from_str("[foo(1, 2]").unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::UnexpectedChar {
                expected: ')',
                found: ']'
            }
        );
        assert_eq!(err.position, 9);
    }

    #[test]
    fn test_error_mismatched_closer() {
        let err = from_str("[1, 2)").unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::UnexpectedChar {
                expected: ']',
                found: ')'
            }
        );
        assert_eq!(err.position, 5);
    }

    #[test]
    fn test_error_unterminated_string() {
        let err = from_str("  [1, 'abc").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnterminatedString);
        assert_eq!(err.position, 6);
        assert!(err.input_preview.is_some());
    }

    #[test]
    fn test_error_missing_separator() {
        let err = from_str("['a' 'b']").unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::UnexpectedChar {
                expected: ',',
                found: '\''
            }
        );
        assert_eq!(err.position, 5);
    }

    #[test]
    fn test_error_missing_separator_after_literal() {
        let err = from_str("[1 2]").unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::UnexpectedChar {
                expected: ',',
                found: '2'
            }
        );
        assert_eq!(err.position, 3);

        let err = from_str("['a' => 1 'b']").unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::UnexpectedChar {
                expected: ',',
                found: '\''
            }
        );
        assert_eq!(err.position, 10);

        let err = from_str("[true false]").unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::UnexpectedChar {
                expected: ',',
                found: 'f'
            }
        );
        assert_eq!(err.position, 6);

        assert!(from_str("[null [1]]").is_err());
        assert!(from_str("[-1.5 array(2)]").is_err());
    }

    #[test]
    fn test_expressions_after_literal_stay_bare_words() {
        assert_eq!(
            from_str("[1 + 2, PHP_INT_MAX - 1]").unwrap(),
            PhpValue::List(vec![s("1 + 2"), s("PHP_INT_MAX - 1")])
        );
    }

    #[test]
    fn test_error_empty_element() {
        let err = from_str("[1,,2]").unwrap_err();
        assert_eq!(err.kind, ErrorKind::ExpectedValue(','));
        assert_eq!(err.position, 3);

        let err = from_str("[=> 1]").unwrap_err();
        assert_eq!(err.kind, ErrorKind::ExpectedValue('='));
    }

    #[test]
    fn test_error_array_key() {
        let err = from_str("[[1] => 2]").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArrayKey("array"));
        assert_eq!(err.position, 1);
    }

    #[test]
    fn test_error_trailing_characters() {
        let err = from_str("[1] [2]").unwrap_err();
        assert_eq!(err.kind, ErrorKind::TrailingCharacters);
        assert_eq!(err.position, 4);
    }

    #[test]
    fn test_error_empty_input() {
        assert_eq!(from_str("").unwrap_err().kind, ErrorKind::EmptyInput);
        assert_eq!(from_str("<?php ?>").unwrap_err().kind, ErrorKind::EmptyInput);
    }

    #[test]
    fn test_error_positions_include_wrapper() {
        let err = from_str("<?php $a = [1, 'x").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnterminatedString);
        assert_eq!(err.position, 15);
    }

    #[test]
    fn test_error_index_overflow() {
        let err = from_str("[9223372036854775807 => 'a', 'b']").unwrap_err();
        assert_eq!(err.kind, ErrorKind::ArrayIndexOverflow);
    }

    #[test]
    fn test_max_depth() {
        let nested = format!("{}1{}", "[".repeat(10), "]".repeat(10));
        let config = ParserConfig {
            max_depth: 5,
            ..Default::default()
        };
        let err = from_str_with_config(&nested, config).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MaxDepthExceeded(5));
        assert!(from_str(&nested).is_ok());
    }

    #[test]
    fn test_default_max_depth_is_reachable() {
        let at_limit = format!("{}1{}", "[".repeat(MAX_DEPTH), "]".repeat(MAX_DEPTH));
        assert!(from_str(&at_limit).is_ok());

        let over = format!("[{}]", at_limit);
        let err = from_str(&over).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MaxDepthExceeded(MAX_DEPTH));
        assert_eq!(err.position, MAX_DEPTH);
    }

    #[test]
    fn test_nested_array_depth() {
        let mut data = String::from("'leaf'");
        for _ in 0..100 {
            data = format!("array('k' => {})", data);
        }
        let result = from_str(&data).unwrap();
        assert!(result.is_map());
    }

    #[test]
    fn test_error_display_is_descriptive() {
        let err = from_str("[1, 2").unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("unclosed array, expected ']' at position 0 (opened here)"));
    }
}
