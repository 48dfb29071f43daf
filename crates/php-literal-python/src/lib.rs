//! Python bindings for php-literal-core.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use php_literal_core::{
    from_json, from_str_with_config, serialize as serialize_value, to_json, to_php_literal,
    ArrayKey, ArraySyntax, ExportConfig, ParserConfig, PhpValue,
};

pyo3::create_exception!(php_literal, PhpLiteralError, pyo3::exceptions::PyException);

/// Convert a PhpValue to a Python object.
///
/// Lists become `list`, maps become `dict` with `int` or `str` keys in
/// insertion order.
fn php_value_to_python(py: Python<'_>, value: &PhpValue) -> PyResult<PyObject> {
    match value {
        PhpValue::Null => Ok(py.None()),
        PhpValue::Bool(b) => Ok(b.to_object(py)),
        PhpValue::Int(i) => Ok(i.to_object(py)),
        PhpValue::Float(f) => Ok(f.to_object(py)),
        PhpValue::String(s) => Ok(s.as_ref().to_object(py)),
        PhpValue::List(items) => {
            let list = PyList::empty_bound(py);
            for item in items {
                list.append(php_value_to_python(py, item)?)?;
            }
            Ok(list.to_object(py))
        }
        PhpValue::Map(entries) => {
            let dict = PyDict::new_bound(py);
            for (k, v) in entries {
                let key: PyObject = match k {
                    ArrayKey::Int(i) => i.to_object(py),
                    ArrayKey::String(s) => s.as_ref().to_object(py),
                };
                dict.set_item(key, php_value_to_python(py, v)?)?;
            }
            Ok(dict.to_object(py))
        }
    }
}

fn parse(text: &str, strip_wrapper: bool, max_depth: usize) -> PyResult<PhpValue<'_>> {
    let config = ParserConfig {
        max_depth,
        strip_wrapper,
    };
    from_str_with_config(text, config).map_err(|e| PhpLiteralError::new_err(format!("{}", e)))
}

/// Parse a PHP array literal to a Python object.
///
/// Args:
///     text: PHP source holding one value, e.g. `array('a' => 1)` or `[1, 2]`.
///         `<?php`/`?>` tags, a `$var =` assignment and a trailing `;` are
///         accepted.
///     strip_wrapper: Strip tags, assignment and semicolon first (default: True)
///     max_depth: Maximum array nesting depth (default: 512)
///
/// Returns:
///     The parsed Python object (dict, list, str, int, float, bool, or None)
///
/// Raises:
///     PhpLiteralError: If the text is not a valid literal
///
/// Example:
///     >>> from php_literal import loads
///     >>> loads("array('name' => 'Alice', 'tags' => ['a', 'b'])")
///     {'name': 'Alice', 'tags': ['a', 'b']}
///
///     >>> loads("[3 => 'x', 'y']")
///     {3: 'x', 4: 'y'}
#[pyfunction]
#[pyo3(signature = (text, *, strip_wrapper=true, max_depth=512))]
fn loads(py: Python<'_>, text: &str, strip_wrapper: bool, max_depth: usize) -> PyResult<PyObject> {
    let value = parse(text, strip_wrapper, max_depth)?;
    php_value_to_python(py, &value)
}

/// Convert a PHP array literal to PHP `serialize()` format.
///
/// Args:
///     text: PHP source holding one value
///     strip_wrapper: Strip tags, assignment and semicolon first (default: True)
///
/// Returns:
///     The serialized string
///
/// Raises:
///     PhpLiteralError: If the text is not a valid literal
///
/// Example:
///     >>> from php_literal import serialize
///     >>> serialize("array('a' => true, 'b' => null)")
///     'a:2:{s:1:"a";b:1;s:1:"b";N;}'
#[pyfunction]
#[pyo3(signature = (text, *, strip_wrapper=true))]
fn serialize(text: &str, strip_wrapper: bool) -> PyResult<String> {
    let value = parse(text, strip_wrapper, ParserConfig::default().max_depth)?;
    Ok(serialize_value(&value))
}

/// Convert a PHP array literal directly to a JSON string.
///
/// Avoids building intermediate Python objects. Key order is preserved and
/// integer keys are written as strings.
///
/// Args:
///     text: PHP source holding one value
///     pretty: Indent with two spaces (default: False)
///     strip_wrapper: Strip tags, assignment and semicolon first (default: True)
///
/// Raises:
///     PhpLiteralError: If the text is not a valid literal
///
/// Example:
///     >>> from php_literal import to_json
///     >>> to_json("['name' => 'Alice', 5 => [1, 2]]")
///     '{"name":"Alice","5":[1,2]}'
#[pyfunction]
#[pyo3(name = "to_json", signature = (text, *, pretty=false, strip_wrapper=true))]
fn to_json_str(text: &str, pretty: bool, strip_wrapper: bool) -> PyResult<String> {
    let value = parse(text, strip_wrapper, ParserConfig::default().max_depth)?;
    let json = to_json(&value);
    Ok(if pretty {
        format!("{:#}", json)
    } else {
        json.to_string()
    })
}

/// Render a JSON document as PHP source.
///
/// Args:
///     data: JSON text
///     short_syntax: Emit `[...]` instead of `array(...)` (default: False)
///     include_tags: Wrap in `<?php` and `?>` (default: True)
///     variable: Variable to assign to, or None for a bare expression
///         (default: "$data")
///
/// Raises:
///     ValueError: If `data` is not valid JSON
///
/// Example:
///     >>> from php_literal import json_to_php
///     >>> print(json_to_php('{"a": [1, 2]}', short_syntax=True, include_tags=False))
///     $data = [
///         'a' => [
///             1,
///             2
///         ]
///     ];
#[pyfunction]
#[pyo3(signature = (data, *, short_syntax=false, include_tags=true, variable=Some("$data")))]
fn json_to_php(
    data: &str,
    short_syntax: bool,
    include_tags: bool,
    variable: Option<&str>,
) -> PyResult<String> {
    let json: serde_json::Value = serde_json::from_str(data)
        .map_err(|e| PyValueError::new_err(format!("invalid JSON: {}", e)))?;

    let config = ExportConfig {
        syntax: if short_syntax {
            ArraySyntax::Short
        } else {
            ArraySyntax::Long
        },
        include_tags,
        variable: variable.map(str::to_string),
    };
    Ok(to_php_literal(&from_json(&json), &config))
}

/// Strip `<?php`/`?>` tags, a `$var =` assignment and a trailing `;`.
///
/// Example:
///     >>> from php_literal import preprocess
///     >>> preprocess("<?php $data = [1, 2]; ?>")
///     '[1, 2]'
#[pyfunction]
fn preprocess(text: &str) -> String {
    php_literal_core::preprocess(text).to_string()
}

/// Get the version of the library.
#[pyfunction]
fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// PHP literal module for Python.
#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("PhpLiteralError", m.py().get_type_bound::<PhpLiteralError>())?;
    m.add_function(wrap_pyfunction!(loads, m)?)?;
    m.add_function(wrap_pyfunction!(serialize, m)?)?;
    m.add_function(wrap_pyfunction!(to_json_str, m)?)?;
    m.add_function(wrap_pyfunction!(json_to_php, m)?)?;
    m.add_function(wrap_pyfunction!(preprocess, m)?)?;
    m.add_function(wrap_pyfunction!(version, m)?)?;
    Ok(())
}
