//! This module contains the decoder and encoder for request bodies.  Only a
//! flat, single-line, JSON-like object whose keys and values are all strings
//! is understood, for example `{"key1": "value1", "key2": "value2"}`.  There
//! is no support for nesting, arrays, numbers, or escaped characters.

use super::{
    error::Error,
    headers::FieldMap,
};

// Only braces and whitespace: nothing to decode.
fn is_blank_fragment(fragment: &str) -> bool {
    fragment
        .chars()
        .all(|c| c == '{' || c == '}' || c.is_whitespace())
}

fn strip_field_text(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '{' | '}' | '"'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Decode the given body text into its fields.
///
/// `None` is returned if the text is empty or only whitespace.  Otherwise
/// the text is split on `,` into fragments, and each fragment on its first
/// `:` into a key and a value.  Braces and double quotes are removed from
/// both, along with surrounding whitespace.  Text with nothing but braces
/// and whitespace, such as `{}`, decodes to an empty map.
///
/// # Errors
///
/// [`Error::MalformedBodyField`](enum.Error.html#variant.MalformedBodyField)
/// is returned if a fragment holding anything other than braces and
/// whitespace, even just a pair of quotes, has no `:`.
pub fn parse_body(text: &str) -> Result<Option<FieldMap>, Error> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    text.split(',')
        .filter(|fragment| !is_blank_fragment(fragment))
        .map(|fragment| {
            let delimiter = fragment
                .find(':')
                .ok_or_else(|| Error::MalformedBodyField(fragment.into()))?;
            Ok((
                strip_field_text(&fragment[..delimiter]),
                strip_field_text(&fragment[delimiter + 1..]),
            ))
        })
        .collect::<Result<FieldMap, Error>>()
        .map(Some)
}

/// Produce the single-line body text for the given fields.  This is the
/// inverse of [`parse_body`] for keys and values without braces, quotes,
/// commas, colons, or surrounding whitespace.
#[must_use]
pub fn encode_body(body: &FieldMap) -> String {
    let fields = body
        .iter()
        .map(|(key, value)| format!("\"{}\": \"{}\"", key, value))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{{}}}", fields)
}
