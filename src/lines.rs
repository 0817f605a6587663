use super::LF;

/// Break the given raw request text into its lines, in order.  Lines are
/// delimited by line feeds; a single carriage return at the end of a line is
/// dropped, so CRLF-delimited text splits the same as LF-delimited text.
///
/// Text ending in a line feed yields a final empty line, just as splitting
/// on the delimiter would.
#[must_use]
pub fn split_lines(raw: &str) -> Vec<&str> {
    raw.split(LF)
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn split_lf_delimited() {
        assert_eq!(
            vec!["", "GET / HTTP/1.1", "Host: www.example.com", ""],
            split_lines("\nGET / HTTP/1.1\nHost: www.example.com\n")
        );
    }

    #[test]
    fn split_crlf_delimited() {
        assert_eq!(
            vec!["GET / HTTP/1.1", "Host: www.example.com", "", ""],
            split_lines("GET / HTTP/1.1\r\nHost: www.example.com\r\n\r\n")
        );
    }

    #[test]
    fn lone_carriage_return_inside_line_kept() {
        assert_eq!(vec!["a\rb"], split_lines("a\rb"));
    }

    #[test]
    fn empty_text_is_one_empty_line() {
        assert_eq!(vec![""], split_lines(""));
    }
}
