#![warn(clippy::pedantic)]
#![allow(clippy::non_ascii_literal)]

mod body;
mod error;
mod headers;
mod lines;
mod query;
mod request;
mod request_line;
pub mod samples;

pub use crate::body::{
    encode_body,
    parse_body,
};
pub use crate::error::Error;
pub use crate::headers::{
    parse_header,
    FieldMap,
};
pub use crate::lines::split_lines;
pub use crate::query::{
    encode_query,
    extract_query,
};
pub use crate::request::{
    parse_request,
    ParsedRequest,
    Parser,
};
pub use crate::request_line::{
    parse_request_line,
    RequestLine,
};

// This is the character which delimits each line of a raw request.  A
// carriage return (CR) immediately before it is tolerated and discarded.
const LF: char = '\n';
