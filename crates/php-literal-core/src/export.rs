//! PHP literal export.
//!
//! Renders a [`PhpValue`] back as PHP source, the inverse of
//! [`from_str`](crate::from_str). Output is laid out one element per line with
//! four-space indentation:
//!
//! ```text
//! <?php
//!
//! $data = array(
//!     'name' => 'Jo',
//!     'tags' => array(
//!         'a',
//!         'b'
//!     )
//! );
//!
//! ?>
//! ```

use std::fmt::{self, Write};

use crate::types::{ArrayKey, PhpValue};

const INDENT: &str = "    ";

/// Array syntax to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArraySyntax {
    /// `array(...)`
    #[default]
    Long,
    /// `[...]`
    Short,
}

/// Export configuration options.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Array syntax to use.
    pub syntax: ArraySyntax,
    /// Whether to wrap the output in `<?php` and `?>` tags.
    pub include_tags: bool,
    /// Variable to assign the value to, e.g. `$data`. `None` emits the bare
    /// expression.
    pub variable: Option<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            syntax: ArraySyntax::Long,
            include_tags: true,
            variable: Some("$data".to_string()),
        }
    }
}

impl ExportConfig {
    /// Just the expression: no tags, no assignment.
    pub fn expression(syntax: ArraySyntax) -> Self {
        Self {
            syntax,
            include_tags: false,
            variable: None,
        }
    }
}

/// Display adapter that renders a value as PHP source.
pub struct PhpLiteral<'v, 'a, 'c> {
    value: &'v PhpValue<'a>,
    config: &'c ExportConfig,
}

impl<'v, 'a, 'c> PhpLiteral<'v, 'a, 'c> {
    /// Wrap `value` for rendering with `config`.
    pub fn new(value: &'v PhpValue<'a>, config: &'c ExportConfig) -> Self {
        Self { value, config }
    }

    fn write_statement(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.config.variable {
            Some(var) => {
                write!(f, "{} = ", var)?;
                self.write_value(f, self.value, 0)?;
                f.write_char(';')
            }
            None => self.write_value(f, self.value, 0),
        }
    }

    fn write_value(&self, f: &mut fmt::Formatter<'_>, value: &PhpValue<'_>, depth: usize) -> fmt::Result {
        match value {
            PhpValue::Null => f.write_str("null"),
            PhpValue::Bool(b) => f.write_str(if *b { "true" } else { "false" }),
            PhpValue::Int(i) => write!(f, "{}", i),
            PhpValue::Float(x) => write_float(f, *x),
            PhpValue::String(s) => write_quoted(f, s),
            PhpValue::List(items) => {
                self.write_array(f, depth, items.len(), items.iter().map(|v| (None, v)))
            }
            PhpValue::Map(entries) => {
                self.write_array(f, depth, entries.len(), entries.iter().map(|(k, v)| (Some(k), v)))
            }
        }
    }

    fn write_array<'e, 'x: 'e, I>(
        &self,
        f: &mut fmt::Formatter<'_>,
        depth: usize,
        len: usize,
        elements: I,
    ) -> fmt::Result
    where
        I: Iterator<Item = (Option<&'e ArrayKey<'x>>, &'e PhpValue<'x>)>,
    {
        let (open, close) = match self.config.syntax {
            ArraySyntax::Long => ("array(", ")"),
            ArraySyntax::Short => ("[", "]"),
        };

        f.write_str(open)?;
        if len == 0 {
            return f.write_str(close);
        }
        f.write_char('\n')?;

        for (i, (key, value)) in elements.enumerate() {
            if i > 0 {
                f.write_str(",\n")?;
            }
            write_indent(f, depth + 1)?;
            match key {
                Some(ArrayKey::Int(k)) => write!(f, "{} => ", k)?,
                Some(ArrayKey::String(k)) => {
                    write_quoted(f, k)?;
                    f.write_str(" => ")?;
                }
                None => {}
            }
            self.write_value(f, value, depth + 1)?;
        }

        f.write_char('\n')?;
        write_indent(f, depth)?;
        f.write_str(close)
    }
}

impl fmt::Display for PhpLiteral<'_, '_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.config.include_tags {
            f.write_str("<?php\n\n")?;
            self.write_statement(f)?;
            f.write_str("\n\n?>")
        } else {
            self.write_statement(f)
        }
    }
}

fn write_indent(f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_str(INDENT)?;
    }
    Ok(())
}

/// Single quotes unless the string holds a newline, carriage return or tab,
/// which only double quotes can spell.
fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    if s.contains(['\n', '\r', '\t'].as_slice()) {
        f.write_char('"')?;
        for c in s.chars() {
            match c {
                '\\' => f.write_str("\\\\")?,
                '"' => f.write_str("\\\"")?,
                '$' => f.write_str("\\$")?,
                '\n' => f.write_str("\\n")?,
                '\r' => f.write_str("\\r")?,
                '\t' => f.write_str("\\t")?,
                c => f.write_char(c)?,
            }
        }
        f.write_char('"')
    } else {
        f.write_char('\'')?;
        for c in s.chars() {
            match c {
                '\\' => f.write_str("\\\\")?,
                '\'' => f.write_str("\\'")?,
                c => f.write_char(c)?,
            }
        }
        f.write_char('\'')
    }
}

/// Floats always keep a fraction or exponent so they read back as floats.
fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x.is_nan() {
        f.write_str("NAN")
    } else if x.is_infinite() {
        f.write_str(if x.is_sign_positive() { "INF" } else { "-INF" })
    } else {
        // Debug always prints `.0` or an exponent
        write!(f, "{:?}", x)
    }
}

/// Render a value as PHP source.
///
/// # Example
///
/// ```rust
/// use php_literal_core::{from_str, to_php_literal, ArraySyntax, ExportConfig};
///
/// let value = from_str("['a' => 1, 'b' => [true, null]]").unwrap();
/// let config = ExportConfig {
///     syntax: ArraySyntax::Short,
///     include_tags: false,
///     variable: Some("$config".to_string()),
/// };
/// assert_eq!(
///     to_php_literal(&value, &config),
///     "$config = [\n    'a' => 1,\n    'b' => [\n        true,\n        null\n    ]\n];"
/// );
/// ```
pub fn to_php_literal(value: &PhpValue<'_>, config: &ExportConfig) -> String {
    PhpLiteral::new(value, config).to_string()
}
