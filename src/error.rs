use html_escape::encode_text;
use std::{fmt, io::Cursor};
use tiny_http::{Header, Response};

/// Errors surfaced to the client as an HTTP status and an HTML error page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HttpError {
    NotFound,
    ListingUnavailable,
    DirectoryListingForbidden,
    UnsupportedMethod(String),
    Internal(String),
}

impl HttpError {
    pub fn status(&self) -> u16 {
        match self {
            Self::NotFound | Self::ListingUnavailable => 404,
            Self::DirectoryListingForbidden => 403,
            Self::UnsupportedMethod(_) => 501,
            Self::Internal(_) => 500,
        }
    }

    fn explanation(&self) -> &'static str {
        match self.status() {
            403 => "Request forbidden -- authorization will not help",
            404 => "Nothing matches the given URI",
            501 => "Server does not support this operation",
            _ => "Server got itself in trouble",
        }
    }

    pub fn into_response(self) -> Response<Cursor<Vec<u8>>> {
        let code = self.status();
        let html = format!(
            r#"<!DOCTYPE HTML>
<html lang="en">
    <head>
        <meta charset="utf-8">
        <title>Error response</title>
    </head>
    <body>
        <h1>Error response</h1>
        <p>Error code: {code}</p>
        <p>Message: {}.</p>
        <p>Error code explanation: {code} - {}.</p>
    </body>
</html>
"#,
            encode_text(&self.to_string()),
            self.explanation(),
        );

        let mut response = Response::from_string(html).with_status_code(code);

        if let Ok(header) = Header::from_bytes("content-type", "text/html;charset=utf-8") {
            response = response.with_header(header);
        }

        response
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => f.write_str("File not found"),
            Self::ListingUnavailable => f.write_str("No permission to list directory"),
            Self::DirectoryListingForbidden => f.write_str("Directory listing not allowed"),
            Self::UnsupportedMethod(method) => write!(f, "Unsupported method ('{method}')"),
            Self::Internal(message) => f.write_str(message),
        }
    }
}

impl std::error::Error for HttpError {}
