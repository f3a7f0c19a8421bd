use crate::{request_path::RequestPath, traits::ResponseHooks};
use anyhow::{Error, Result};
use tiny_http::{Header, ResponseBox};

pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "GET"),
    ("Cache-Control", "no-store, no-cache, must-revalidate"),
];

/// Adds a fixed set of headers to every response and only allows
/// directory listings below `listing_prefix`.
#[derive(Clone, Debug)]
pub struct CorsPolicy {
    headers: Vec<Header>,
    listing_prefix: String,
}

impl CorsPolicy {
    pub fn new<T: Into<String>>(listing_prefix: T) -> Result<Self> {
        Self::with_headers(&CORS_HEADERS, listing_prefix)
    }

    pub fn with_headers<T: Into<String>>(
        headers: &[(&str, &str)],
        listing_prefix: T,
    ) -> Result<Self> {
        let headers = headers
            .iter()
            .map(|(field, value)| {
                Header::from_bytes(*field, *value)
                    .map_err(|_| Error::msg(format!("Could not create header {field}")))
            })
            .collect::<Result<Vec<Header>>>()?;

        Ok(Self {
            headers,
            listing_prefix: listing_prefix.into(),
        })
    }
}

impl ResponseHooks for CorsPolicy {
    fn on_headers(&self, response: &mut ResponseBox) {
        for header in &self.headers {
            response.add_header(header.clone());
        }
    }

    fn on_list_directory(&self, path: &RequestPath) -> bool {
        path.is_within(&self.listing_prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::render;
    use tiny_http::Response;

    #[test]
    fn adds_cors_headers() {
        let policy = CorsPolicy::new("/papers").unwrap();
        let mut response = Response::from_string("hello").boxed();
        policy.on_headers(&mut response);

        let (head, body) = render(response);
        assert!(head.contains("Access-Control-Allow-Origin: *\r\n"));
        assert!(head.contains("Access-Control-Allow-Methods: GET\r\n"));
        assert!(head.contains("Cache-Control: no-store, no-cache, must-revalidate\r\n"));
        assert_eq!(body, "hello");
    }

    #[test]
    fn listing_gate() {
        let policy = CorsPolicy::new("/papers").unwrap();
        assert!(policy.on_list_directory(&RequestPath::parse("/papers/")));
        assert!(policy.on_list_directory(&RequestPath::parse("/papers/2024/")));
        assert!(!policy.on_list_directory(&RequestPath::parse("/secret/")));
        assert!(!policy.on_list_directory(&RequestPath::parse("/papers-evil/")));
    }

    #[test]
    fn rejects_invalid_header() {
        assert!(CorsPolicy::with_headers(&[("X-Bad-Héader", "x")], "/").is_err());
    }
}
