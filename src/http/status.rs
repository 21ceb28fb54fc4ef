//! HTTP status code vocabulary.
//!
//! Mercury's extension socket carries the reason phrase on the wire, so the
//! phrases here must match the daemon's table character for character.

/// Look up the canonical reason phrase for a status code.
///
/// Total function: codes outside the table map to the literal `"Unknown"`,
/// which the daemon passes through unchanged.
pub fn describe(code: u16) -> &'static str {
    match code {
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        203 => "Non-Authoritative Information",
        204 => "No Content",
        205 => "Reset Content",
        206 => "Partial Content",
        207 => "Multi-Status",
        208 => "Already Reported",
        226 => "IM Used",

        300 => "Multiple Choices",
        301 => "Moved Permanently",
        302 => "Found",
        303 => "See Other",
        304 => "Not Modified",
        307 => "Temporary Redirect",
        308 => "Permanent Redirect",

        400 => "Bad Request",
        401 => "Unauthorized",
        402 => "Payment Required",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        406 => "Not Acceptable",
        407 => "Proxy Authentication Required",
        408 => "Request Timeout",
        409 => "Conflict",
        410 => "Gone",
        411 => "Length Required",
        412 => "Precondition Failed",
        413 => "Content Too Large",
        414 => "URI Too Long",
        415 => "Unsupported Media Type",
        416 => "Range Not Satisfiable",
        417 => "Expectation Failed",
        418 => "I'm a teapot",
        421 => "Misdirected Request",
        422 => "Unprocessable Content",
        423 => "Locked",
        424 => "Failed Dependency",
        426 => "Upgrade Required",
        428 => "Precondition Required",
        429 => "Too Many Requests",
        431 => "Request Header Fields Too Large",
        451 => "Unavailable For Legal Reasons",

        500 => "Internal Server Error",
        501 => "Not Implemented",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        505 => "HTTP Version Not Supported",
        506 => "Variant Also Negotiates",
        507 => "Insufficient Storage",
        508 => "Loop Detected",
        510 => "Not Extended",
        511 => "Network Authentication Required",

        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_codes_have_exact_phrases() {
        assert_eq!(describe(200), "OK");
        assert_eq!(describe(204), "No Content");
        assert_eq!(describe(304), "Not Modified");
        assert_eq!(describe(404), "Not Found");
        assert_eq!(describe(418), "I'm a teapot");
        assert_eq!(describe(451), "Unavailable For Legal Reasons");
        assert_eq!(describe(500), "Internal Server Error");
        assert_eq!(describe(511), "Network Authentication Required");
    }

    #[test]
    fn unknown_codes_map_to_unknown() {
        assert_eq!(describe(0), "Unknown");
        assert_eq!(describe(199), "Unknown");
        assert_eq!(describe(299), "Unknown");
        assert_eq!(describe(420), "Unknown");
        assert_eq!(describe(599), "Unknown");
        assert_eq!(describe(999), "Unknown");
    }
}
