pub mod config;
pub mod cors_file_server;
pub mod error;
pub mod file;
pub mod listing;
pub mod policy;
pub mod request_path;
pub mod traits;

pub use config::Config;
pub use cors_file_server::CorsFileServer;

#[cfg(test)]
mod test_support {
    use std::io::Read;
    use tiny_http::{HTTPVersion, Response};

    /// Writes a response the way it would go over the wire and splits it into
    /// the head (every line `\r\n` terminated) and the body.
    pub fn render<R: Read>(response: Response<R>) -> (String, String) {
        let mut raw = vec![];
        response
            .raw_print(&mut raw, HTTPVersion(1, 1), &[], false, None)
            .unwrap();

        let raw = String::from_utf8(raw).unwrap();
        let (head, body) = raw.split_once("\r\n\r\n").unwrap();

        (format!("{head}\r\n"), body.to_string())
    }
}
