use super::{
    body::{
        encode_body,
        parse_body,
    },
    error::Error,
    headers::{
        parse_header,
        FieldMap,
    },
    lines::split_lines,
    query::encode_query,
    request_line::parse_request_line,
    LF,
};

// Cut the given text down to at most the given number of bytes, without
// splitting a character.
fn truncate(
    text: &str,
    limit: usize,
) -> String {
    let mut end = limit.min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text[..end].into()
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum RequestState {
    Body,
    BodySeparator,
    Done,
    Headers,
    RequestLine,
}

/// This is the structured form of a raw HTTP request.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParsedRequest {
    pub method: String,
    pub path: String,
    pub headers: FieldMap,
    pub body: Option<FieldMap>,
    pub query: Option<FieldMap>,
}

impl ParsedRequest {
    /// Produce the raw text form of the request, laid out the way
    /// [`parse_request`] expects it: a leading empty line, the request line,
    /// the headers, and then, if there is a body, an empty line followed by
    /// the body on a single line.
    ///
    /// Parsing the result gives back an equal request, provided no key or
    /// value contains a delimiter.
    ///
    /// # Errors
    ///
    /// [`Error::MalformedRequestLine`](enum.Error.html#variant.MalformedRequestLine)
    /// is returned if the method is empty or contains a space, or the path
    /// does not begin with `/`, since no request line could be parsed back
    /// from them.
    pub fn generate(&self) -> Result<String, Error> {
        if self.method.is_empty()
            || self.method.contains(' ')
            || !self.path.starts_with('/')
        {
            return Err(Error::MalformedRequestLine(format!(
                "{} {}",
                self.method, self.path
            )));
        }
        let mut output = String::new();
        output.push(LF);
        output.push_str(&self.method);
        output.push(' ');
        output.push_str(&self.path);
        if let Some(query) = &self.query {
            output.push('?');
            output.push_str(&encode_query(query));
        }
        output.push_str(" HTTP/1.1");
        output.push(LF);
        for (name, value) in &self.headers {
            output.push_str(name);
            output.push_str(": ");
            output.push_str(value);
            output.push(LF);
        }
        if let Some(body) = &self.body {
            output.push(LF);
            output.push_str(&encode_body(body));
            output.push(LF);
        }
        Ok(output)
    }
}

/// This holds the limits applied while parsing raw requests.  Each limit may
/// be set to `None` to disable it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Parser {
    /// Longest header line accepted, in bytes.
    pub header_line_limit: Option<usize>,

    /// Longest raw request accepted, in bytes.
    pub max_message_size: Option<usize>,

    /// Longest request line accepted, in bytes.
    pub request_line_limit: Option<usize>,
}

impl Parser {
    fn check_header_line(
        &self,
        line: &str,
    ) -> Result<(), Error> {
        match self.header_line_limit {
            Some(limit) if line.len() > limit => {
                Err(Error::HeaderLineTooLong(truncate(line, limit)))
            },
            _ => Ok(()),
        }
    }

    /// Parse the given raw request text into its structured form.
    ///
    /// Empty text gives the default request: no method, no path, no
    /// headers, and neither body nor query.  Otherwise the first non-blank
    /// line is the request line.  Each following line, up to the first
    /// blank one, is a header.  If a line follows that blank line, it holds
    /// the body.  Anything after the body must be blank.
    ///
    /// # Errors
    ///
    /// [`Error::MessageTooLong`](enum.Error.html#variant.MessageTooLong),
    /// [`Error::RequestLineTooLong`](enum.Error.html#variant.RequestLineTooLong),
    /// or
    /// [`Error::HeaderLineTooLong`](enum.Error.html#variant.HeaderLineTooLong)
    /// is returned if a limit is exceeded.
    /// [`Error::UnexpectedContent`](enum.Error.html#variant.UnexpectedContent)
    /// is returned if a non-blank line follows the body.  Any error from
    /// parsing the request line, a header, or the body is passed through.
    pub fn parse(
        &self,
        raw: &str,
    ) -> Result<ParsedRequest, Error> {
        let mut request = ParsedRequest::default();
        if raw.is_empty() {
            return Ok(request);
        }
        if matches!(self.max_message_size, Some(max) if raw.len() > max) {
            return Err(Error::MessageTooLong);
        }
        let lines = split_lines(raw);
        let mut state = RequestState::RequestLine;
        let mut total_consumed = 0;
        loop {
            let lines_remainder = &lines[total_consumed..];
            let (next_state, consumed) = match state {
                RequestState::Done => break,
                RequestState::Body => {
                    Self::parse_lines_for_body(lines_remainder, &mut request)?
                },
                RequestState::BodySeparator => {
                    Self::parse_lines_for_body_separator(lines_remainder)
                },
                RequestState::Headers => {
                    self.parse_lines_for_headers(lines_remainder, &mut request)?
                },
                RequestState::RequestLine => self
                    .parse_lines_for_request_line(
                        lines_remainder,
                        &mut request,
                    )?,
            };
            log::trace!(
                "{:?} -> {:?} after {} line(s)",
                state,
                next_state,
                consumed
            );
            total_consumed += consumed;
            state = next_state;
        }
        log::debug!(
            "parsed {} {} ({} header(s), body: {}, query: {})",
            request.method,
            request.path,
            request.headers.len(),
            request.body.is_some(),
            request.query.is_some()
        );
        Ok(request)
    }

    fn parse_lines_for_body(
        lines: &[&str],
        request: &mut ParsedRequest,
    ) -> Result<(RequestState, usize), Error> {
        let (body_line, rest) = match lines.split_first() {
            Some(split) => split,
            None => return Ok((RequestState::Done, 0)),
        };
        if let Some(extra) = rest.iter().find(|line| !is_blank(line)) {
            return Err(Error::UnexpectedContent((*extra).into()));
        }
        request.body = parse_body(body_line)?;
        Ok((RequestState::Done, lines.len()))
    }

    fn parse_lines_for_body_separator(lines: &[&str]) -> (RequestState, usize) {
        match lines.len() {
            0 => (RequestState::Done, 0),
            1 => (RequestState::Done, 1),
            _ => (RequestState::Body, 1),
        }
    }

    fn parse_lines_for_headers(
        &self,
        lines: &[&str],
        request: &mut ParsedRequest,
    ) -> Result<(RequestState, usize), Error> {
        for (consumed, line) in lines.iter().enumerate() {
            if is_blank(line) {
                return Ok((RequestState::BodySeparator, consumed));
            }
            self.check_header_line(line)?;
            parse_header(line, &mut request.headers)?;
        }
        Ok((RequestState::Done, lines.len()))
    }

    fn parse_lines_for_request_line(
        &self,
        lines: &[&str],
        request: &mut ParsedRequest,
    ) -> Result<(RequestState, usize), Error> {
        let request_line_index = lines
            .iter()
            .position(|line| !is_blank(line))
            .ok_or_else(|| Error::MalformedRequestLine(String::new()))?;
        let request_line = lines[request_line_index];
        match self.request_line_limit {
            Some(limit) if request_line.len() > limit => {
                return Err(Error::RequestLineTooLong(truncate(
                    request_line,
                    limit,
                )));
            },
            _ => (),
        }
        let request_line = parse_request_line(request_line)?;
        request.method = request_line.method.into();
        request.path = request_line.path.into();
        request.query = request_line.query;
        Ok((RequestState::Headers, request_line_index + 1))
    }

    #[must_use]
    pub fn new() -> Self {
        Self {
            header_line_limit: Some(1000),
            max_message_size: Some(10_000_000),
            request_line_limit: Some(1000),
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse the given raw request text using the default limits.  See
/// [`Parser::parse`] for the details.
///
/// # Errors
///
/// The same errors as [`Parser::parse`] are returned.
pub fn parse_request(raw: &str) -> Result<ParsedRequest, Error> {
    Parser::new().parse(raw)
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::samples::{
        RAW_GET_REQUEST,
        RAW_GET_REQUEST_COMPLEX,
        RAW_POST_REQUEST,
    };

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn fields(pairs: &[(&str, &str)]) -> FieldMap {
        pairs.iter().copied().collect()
    }

    #[test]
    fn parse_empty_request() {
        init_logging();
        assert_eq!(Ok(ParsedRequest::default()), parse_request(""));
    }

    #[test]
    fn parse_simple_get_request() {
        init_logging();
        assert_eq!(
            Ok(ParsedRequest {
                method: "GET".into(),
                path: "/".into(),
                headers: fields(&[("Host", "www.example.com")]),
                body: None,
                query: None,
            }),
            parse_request(RAW_GET_REQUEST)
        );
    }

    #[test]
    fn parse_get_request_with_query() {
        init_logging();
        assert_eq!(
            Ok(ParsedRequest {
                method: "GET".into(),
                path: "/api/data/123".into(),
                headers: fields(&[
                    ("Host", "www.example.com"),
                    ("Authorization", "Bearer your_access_token"),
                ]),
                body: None,
                query: Some(fields(&[("someValue", "example")])),
            }),
            parse_request(RAW_GET_REQUEST_COMPLEX)
        );
    }

    #[test]
    fn parse_post_request() {
        init_logging();
        assert_eq!(
            Ok(ParsedRequest {
                method: "POST".into(),
                path: "/api/data".into(),
                headers: fields(&[
                    ("Host", "www.example.com"),
                    ("Content-Type", "application/json"),
                    ("Content-Length", "36"),
                ]),
                body: Some(fields(&[("key1", "value1"), ("key2", "value2")])),
                query: None,
            }),
            parse_request(RAW_POST_REQUEST)
        );
    }

    #[test]
    fn parse_crlf_request_without_leading_blank_line() {
        let raw_request = concat!(
            "POST /form?debug=1 HTTP/1.1\r\n",
            "Host: foo.com\r\n",
            "Content-Type: application/json\r\n",
            "\r\n",
            "{\"say\": \"Hi\", \"to\": \"Mom\"}\r\n",
        );
        assert_eq!(
            Ok(ParsedRequest {
                method: "POST".into(),
                path: "/form".into(),
                headers: fields(&[
                    ("Host", "foo.com"),
                    ("Content-Type", "application/json"),
                ]),
                body: Some(fields(&[("say", "Hi"), ("to", "Mom")])),
                query: Some(fields(&[("debug", "1")])),
            }),
            parse_request(raw_request)
        );
    }

    #[test]
    fn parse_request_without_trailing_newline() {
        let request =
            parse_request("\nGET /hello.txt HTTP/1.1\nHost: foo.com").unwrap();
        assert_eq!("/hello.txt", request.path);
        assert_eq!(fields(&[("Host", "foo.com")]), request.headers);
        assert_eq!(None, request.body);
    }

    #[test]
    fn parse_request_with_no_headers() {
        let request = parse_request("\nGET / HTTP/1.1\n").unwrap();
        assert_eq!("GET", request.method);
        assert!(request.headers.is_empty());
        assert_eq!(None, request.body);
    }

    #[test]
    fn empty_body_line_gives_no_body() {
        let request =
            parse_request("\nGET / HTTP/1.1\nHost: foo.com\n\n\n").unwrap();
        assert_eq!(None, request.body);
    }

    #[test]
    fn blank_lines_after_body_are_ignored() {
        let request = parse_request(
            "\nPOST / HTTP/1.1\nHost: foo.com\n\n{\"a\": \"1\"}\n\n\r\n",
        )
        .unwrap();
        assert_eq!(Some(fields(&[("a", "1")])), request.body);
    }

    #[test]
    fn parse_invalid_multi_line_body() {
        assert_eq!(
            Err(Error::UnexpectedContent(String::from("\"b\": \"2\"}"))),
            parse_request(
                "\nPOST / HTTP/1.1\nHost: foo.com\n\n{\"a\": \"1\",\n\"b\": \"2\"}\n"
            )
        );
    }

    #[test]
    fn parse_invalid_damaged_header() {
        let raw_request = concat!(
            "\n",
            "GET /hello.txt HTTP/1.1\n",
            "User-Agent curl/7.16.3 libcurl/7.16.3 OpenSSL/0.9.7l zlib/1.2.3\n",
            "Host: www.example.com\n",
        );
        assert_eq!(
            Err(Error::MalformedHeader(String::from(
                "User-Agent curl/7.16.3 libcurl/7.16.3 OpenSSL/0.9.7l zlib/1.2.3"
            ))),
            parse_request(raw_request)
        );
    }

    #[test]
    fn parse_invalid_request_no_method() {
        assert_eq!(
            Err(Error::MalformedRequestLine(String::from(" /hello.txt HTTP/1.1"))),
            parse_request("\n /hello.txt HTTP/1.1\nHost: foo.com\n")
        );
    }

    #[test]
    fn parse_invalid_request_only_blank_lines() {
        assert_eq!(
            Err(Error::MalformedRequestLine(String::new())),
            parse_request("\n\r\n  \n")
        );
    }

    #[test]
    fn parse_invalid_query() {
        assert_eq!(
            Err(Error::MalformedQueryPair(String::from("verbose"))),
            parse_request("\nGET /p?verbose HTTP/1.1\nHost: foo.com\n")
        );
    }

    #[test]
    fn parse_invalid_body_field() {
        assert_eq!(
            Err(Error::MalformedBodyField(String::from("{\"orphan\"}"))),
            parse_request("\nPOST / HTTP/1.1\nHost: foo.com\n\n{\"orphan\"}\n")
        );
    }

    #[test]
    fn parse_invalid_message_too_long() {
        let parser = Parser {
            max_message_size: Some(20),
            ..Parser::new()
        };
        assert_eq!(Err(Error::MessageTooLong), parser.parse(RAW_GET_REQUEST));
    }

    #[test]
    fn parse_invalid_request_line_too_long() {
        let parser = Parser {
            request_line_limit: Some(5),
            ..Parser::new()
        };
        assert_eq!(
            Err(Error::RequestLineTooLong(String::from("GET /"))),
            parser.parse(RAW_GET_REQUEST)
        );
    }

    #[test]
    fn parse_invalid_header_line_too_long_cut_on_character() {
        let parser = Parser {
            header_line_limit: Some(9),
            ..Parser::new()
        };
        assert_eq!(
            Err(Error::HeaderLineTooLong(String::from("X-Name: "))),
            parser.parse("\nGET / HTTP/1.1\nX-Name: ééé\n")
        );
    }

    #[test]
    fn default_header_line_limit() {
        let value = "X".repeat(1000);
        let raw_request = format!("\nGET / HTTP/1.1\nX-Poggers: {}\n", value);
        assert!(matches!(
            parse_request(&raw_request),
            Err(Error::HeaderLineTooLong(line)) if line.len() == 1000
        ));
    }

    #[test]
    fn limits_can_be_disabled() {
        let parser = Parser {
            header_line_limit: None,
            max_message_size: None,
            request_line_limit: None,
        };
        let value = "X".repeat(5000);
        let raw_request =
            format!("\nGET /{} HTTP/1.1\nX-Poggers: {}\n", value, value);
        let request = parser.parse(&raw_request).unwrap();
        assert_eq!(Some(value.as_str()), request.headers.get("X-Poggers"));
    }

    #[test]
    fn generate_reproduces_samples() {
        for raw_request in &[
            RAW_GET_REQUEST,
            RAW_GET_REQUEST_COMPLEX,
            RAW_POST_REQUEST,
        ] {
            let request = parse_request(raw_request).unwrap();
            assert_eq!(Ok(String::from(*raw_request)), request.generate());
        }
    }

    #[test]
    fn generate_then_parse_gives_same_request() {
        let request = ParsedRequest {
            method: "PUT".into(),
            path: "/items/42".into(),
            headers: fields(&[
                ("Host", "foo.com"),
                ("Content-Type", "application/json"),
            ]),
            body: Some(fields(&[("name", "widget"), ("color", "blue")])),
            query: Some(fields(&[("dry_run", "true"), ("v", "")])),
        };
        let raw_request = request.generate().unwrap();
        assert_eq!(Ok(request), parse_request(&raw_request));
    }

    #[test]
    fn generate_empty_body_and_query() {
        let request = ParsedRequest {
            method: "POST".into(),
            path: "/".into(),
            headers: FieldMap::new(),
            body: Some(FieldMap::new()),
            query: Some(FieldMap::new()),
        };
        let raw_request = request.generate().unwrap();
        assert_eq!("\nPOST /? HTTP/1.1\n\n{}\n", raw_request);
        assert_eq!(Ok(request), parse_request(&raw_request));
    }

    #[test]
    fn generate_refuses_request_without_request_line() {
        assert_eq!(
            Err(Error::MalformedRequestLine(String::from(" "))),
            ParsedRequest::default().generate()
        );
        let request = ParsedRequest {
            method: "GET".into(),
            path: "relative".into(),
            ..ParsedRequest::default()
        };
        assert_eq!(
            Err(Error::MalformedRequestLine(String::from("GET relative"))),
            request.generate()
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serialize_post_request() {
        let request = parse_request(RAW_POST_REQUEST).unwrap();
        assert_eq!(
            serde_json::json!({
                "method": "POST",
                "path": "/api/data",
                "headers": {
                    "Host": "www.example.com",
                    "Content-Type": "application/json",
                    "Content-Length": "36",
                },
                "body": {
                    "key1": "value1",
                    "key2": "value2",
                },
                "query": null,
            }),
            serde_json::to_value(&request).unwrap()
        );
    }
}
