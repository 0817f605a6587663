use super::{
    error::Error,
    headers::FieldMap,
};

/// Extract the query parameters from the given request target path.
///
/// `None` is returned if the path has no `?` at all, which is distinct from
/// a `?` followed by nothing (an empty map).  The query is everything after
/// the first `?`, split on `&` into `key=value` pairs.  Each pair is split
/// on its first `=`.  Empty pairs, as in `a=1&&b=2`, are skipped.  Keys and
/// values are kept verbatim; no percent-decoding is done.
///
/// # Errors
///
/// [`Error::MalformedQueryPair`](enum.Error.html#variant.MalformedQueryPair)
/// is returned if a non-empty pair has no `=`.
pub fn extract_query(path: &str) -> Result<Option<FieldMap>, Error> {
    let query = match path.find('?') {
        Some(delimiter) => &path[delimiter + 1..],
        None => return Ok(None),
    };
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let delimiter = pair
                .find('=')
                .ok_or_else(|| Error::MalformedQueryPair(pair.into()))?;
            Ok((&pair[..delimiter], &pair[delimiter + 1..]))
        })
        .collect::<Result<FieldMap, Error>>()
        .map(Some)
}

/// Produce the query string for the given query parameters, without the
/// leading `?`.  This is the inverse of [`extract_query`].
#[must_use]
pub fn encode_query(query: &FieldMap) -> String {
    query
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&")
}
