use crate::request_path::RequestPath;
use tiny_http::ResponseBox;

/// The two points where a server can be customised without replacing
/// the request handling itself.
pub trait ResponseHooks {
    /// Called on every response, error pages included, right before it is sent.
    fn on_headers(&self, response: &mut ResponseBox);

    /// Whether a directory without an index file may be listed.
    fn on_list_directory(&self, path: &RequestPath) -> bool;
}
