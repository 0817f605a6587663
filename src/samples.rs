//! Raw request texts in the layout [`parse_request`](../fn.parse_request.html)
//! expects: an empty first line, the request line, the headers, and, if
//! there is a body, an empty line followed by the body on one line.

/// A bare `GET` with a single header.
pub const RAW_GET_REQUEST: &str = "
GET / HTTP/1.1
Host: www.example.com
";

/// A `GET` whose target carries a query, with two headers.
pub const RAW_GET_REQUEST_COMPLEX: &str = "
GET /api/data/123?someValue=example HTTP/1.1
Host: www.example.com
Authorization: Bearer your_access_token
";

/// A `POST` with a JSON body.
pub const RAW_POST_REQUEST: &str = r#"
POST /api/data HTTP/1.1
Host: www.example.com
Content-Type: application/json
Content-Length: 36

{"key1": "value1", "key2": "value2"}
"#;
