//! PHP array literal parser and `serialize()` writer.
//!
//! This crate reads the value subset of PHP source (`array(...)`, `[...]`,
//! strings, numbers, booleans, null) into a language-neutral value tree and
//! writes that tree back out as PHP `serialize()` text, JSON, or PHP source.
//!
//! # Features
//!
//! - **One-pass recursive descent** - No token pre-pass, positions in every error
//! - **Zero-copy strings** - Strings without escapes borrow from the input
//! - **PHP array semantics** - Implicit keys, key casting, duplicate keys
//! - **UTF-8 aware** - `s:<len>:` carries the byte length, not the char count
//! - **Lenient input, strict structure** - Accepts `<?php`, `$var = ...;` and
//!   bare constants, rejects unbalanced brackets and quotes
//!
//! # Quick Start
//!
//! ```rust
//! use php_literal_core::{from_str, serialize, PhpValue};
//!
//! let value = from_str("array('name' => 'Alice', 'tags' => ['a', 'b'])").unwrap();
//! assert_eq!(
//!     serialize(&value),
//!     r#"a:2:{s:4:"name";s:5:"Alice";s:4:"tags";a:2:{i:0;s:1:"a";i:1;s:1:"b";}}"#
//! );
//!
//! if let PhpValue::Map(entries) = value {
//!     for (key, val) in entries {
//!         println!("{} => {}", key, val);
//!     }
//! }
//! ```
//!
//! # Pasted PHP Source
//!
//! Opening and closing tags, a trailing semicolon and a variable assignment
//! are stripped before parsing:
//!
//! ```rust
//! use php_literal_core::from_str;
//!
//! let source = "<?php\n$config = [\n    'debug' => false,\n];\n?>";
//! let value = from_str(source).unwrap();
//! assert_eq!(value.get_str("debug").and_then(|v| v.as_bool()), Some(false));
//! ```
//!
//! # Array Shapes
//!
//! | PHP array | Rust value |
//! |-----------|------------|
//! | `['a', 'b']`, `[0 => 'a', 1 => 'b']` | `PhpValue::List` |
//! | `['x' => 1]`, `[1 => 'a']`, `['x' => 1, 0 => 2]` | `PhpValue::Map` |
//!
//! # Supported Types
//!
//! | PHP Type | Rust Type |
//! |----------|-----------|
//! | `null` | `PhpValue::Null` |
//! | `bool` | `PhpValue::Bool(bool)` |
//! | `int` | `PhpValue::Int(i64)` |
//! | `float` | `PhpValue::Float(f64)` |
//! | `string` | `PhpValue::String(Cow<str>)` |
//! | sequential `array` | `PhpValue::List(Vec<PhpValue>)` |
//! | other `array` | `PhpValue::Map(Vec<(ArrayKey, PhpValue)>)` |
//! | constant / bare word | `PhpValue::String` holding the source text |

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![allow(clippy::len_without_is_empty)]

pub mod array;
pub mod error;
pub mod export;
pub mod parser;
pub mod serializer;
pub mod types;

#[cfg(feature = "serde")]
pub mod json;

pub use array::ArrayBuilder;
pub use error::{ErrorKind, ParseError, Result};
pub use export::{to_php_literal, ArraySyntax, ExportConfig, PhpLiteral};
pub use parser::{from_str, from_str_with_config, preprocess, Parser, ParserConfig};
pub use serializer::{php_to_serialized, serialize, write_serialized, Serialized};
pub use types::{ArrayKey, PhpValue};

#[cfg(feature = "serde")]
pub use json::{from_json, php_to_json, to_json};
