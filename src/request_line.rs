use super::{
    error::Error,
    headers::FieldMap,
    query::extract_query,
};

/// This holds the pieces of an HTTP request line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RequestLine<'a> {
    /// The request method, such as `GET`.
    pub method: &'a str,

    /// The target path, without any query.
    pub path: &'a str,

    /// The query parameters, if the target had a `?`.
    pub query: Option<FieldMap>,
}

/// Parse the method, target path, and query parameters from the given HTTP
/// request line, such as `GET /api/data/123?someValue=example HTTP/1.1`.
///
/// The line is split on single spaces.  The first piece is the method and
/// the second is the target, which must begin with `/`.  The target is cut
/// at its first `?`, with the rest handed to
/// [`extract_query`](fn.extract_query.html).  The protocol, if any, is not
/// examined.
///
/// # Errors
///
/// [`Error::MalformedRequestLine`](enum.Error.html#variant.MalformedRequestLine)
/// is returned if the method or target is missing, empty, or the target
/// does not begin with `/`.  Errors from
/// [`extract_query`](fn.extract_query.html) are passed through.
pub fn parse_request_line(request_line: &str) -> Result<RequestLine<'_>, Error> {
    // Parse the method.
    let method_delimiter = request_line
        .find(' ')
        .ok_or_else(|| Error::MalformedRequestLine(request_line.into()))?;
    let method = &request_line[..method_delimiter];
    if method.is_empty() {
        return Err(Error::MalformedRequestLine(request_line.into()));
    }

    // Parse the target.
    let request_line_at_target = &request_line[method_delimiter + 1..];
    let target = match request_line_at_target.find(' ') {
        Some(target_delimiter) => &request_line_at_target[..target_delimiter],
        None => request_line_at_target,
    };
    if !target.starts_with('/') {
        return Err(Error::MalformedRequestLine(request_line.into()));
    }

    // Separate the path from the query.
    let path = match target.find('?') {
        Some(query_delimiter) => &target[..query_delimiter],
        None => target,
    };
    let query = extract_query(target)?;
    Ok(RequestLine {
        method,
        path,
        query,
    })
}
