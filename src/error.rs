/// This is the enumeration of all the different kinds of errors which this
/// crate generates.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// The attached text appeared after the body line, where only blank
    /// lines (or nothing at all) were expected.
    #[error("unexpected content after request body")]
    UnexpectedContent(String),

    /// The attached header line is not empty but could not be split into a
    /// name and a value, either because it has no colon or because the name
    /// before the colon is empty.
    #[error("malformed header line")]
    MalformedHeader(String),

    /// The attached fragment of a request body has no colon separating a
    /// key from a value.
    #[error("malformed field in request body")]
    MalformedBodyField(String),

    /// The attached fragment of a query string has no equals sign separating
    /// a key from a value.
    #[error("malformed query parameter")]
    MalformedQueryPair(String),

    /// The method or target could not be parsed from the HTTP request line
    /// attached, or a request line could not be generated from them.  Either
    /// a delimiter is missing, there is extra whitespace, the method is
    /// empty, or the target does not begin with a slash.
    #[error("malformed request line")]
    MalformedRequestLine(String),

    /// The attached text is the beginning of a header line whose length
    /// exceeds the header line limit.
    #[error("header line too long")]
    HeaderLineTooLong(String),

    /// The message is too large to fit within the configured size limit.
    #[error("message exceeds maximum size limit")]
    MessageTooLong,

    /// The attached text is the beginning of the request line, whose length
    /// exceeds the request line limit.
    #[error("request line too long")]
    RequestLineTooLong(String),
}
