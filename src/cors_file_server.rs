use crate::{
    config::Config,
    error::HttpError,
    file::File,
    listing::Listing,
    policy::CorsPolicy,
    request_path::RequestPath,
    traits::ResponseHooks,
};
use anyhow::{Result, anyhow};
use std::{
    env::current_dir,
    io::Cursor,
    net::{Ipv4Addr, SocketAddrV4},
    path::{Path, PathBuf},
};
use tiny_http::{Header, Method, Request, Response, ResponseBox, Server};

const INDEX_FILES: [&str; 2] = ["index.html", "index.htm"];

pub struct CorsFileServer<H = CorsPolicy> {
    config: Config,
    root: PathBuf,
    hooks: H,
}

impl CorsFileServer {
    pub fn new(config: Config) -> Result<Self> {
        let hooks = CorsPolicy::new(config.listing_prefix.as_str())?;
        Self::with_hooks(config, hooks)
    }
}

impl<H: ResponseHooks> CorsFileServer<H> {
    pub fn with_hooks(config: Config, hooks: H) -> Result<Self> {
        let root = current_dir()?.join(&config.root);

        Ok(Self {
            config,
            root,
            hooks,
        })
    }

    pub fn start(&self) -> Result<()> {
        let server = Server::http(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, self.config.port))
            .map_err(|error| anyhow!("Could not create server: {error}"))?;

        println!("Serving at http://localhost:{}", self.config.port);

        self.serve(&server);

        Ok(())
    }

    /// Handles requests one at a time until the server is unblocked.
    pub fn serve(&self, server: &Server) {
        for request in server.incoming_requests() {
            if let Err(error) = self.handle(request) {
                log::error!("Error while processing request: {error}");
            }
        }
    }

    fn handle(&self, request: Request) -> Result<()> {
        let response = self.respond(request.method(), request.url(), request.headers());

        log::info!(
            "\"{} {}\" {}",
            request.method(),
            request.url(),
            response.status_code().0
        );

        request.respond(response)?;

        Ok(())
    }

    /// Builds the full response for one request, hook headers included.
    pub fn respond(&self, method: &Method, url: &str, headers: &[Header]) -> ResponseBox {
        let mut response = match self.route(method, url, headers) {
            Ok(response) => response,
            Err(error) => error.into_response().boxed(),
        };

        self.hooks.on_headers(&mut response);

        response
    }

    fn route(
        &self,
        method: &Method,
        url: &str,
        headers: &[Header],
    ) -> Result<ResponseBox, HttpError> {
        if !matches!(method, Method::Get | Method::Head) {
            return Err(HttpError::UnsupportedMethod(method.to_string()));
        }

        let request_path = RequestPath::parse(url);
        let path = request_path.to_fs_path(&self.root);

        if path.is_dir() {
            if !request_path.has_trailing_slash() {
                return redirect(&request_path.redirect_location());
            }

            match find_index(&path) {
                Some(index) => self.serve_file(index, headers),
                None => self.list_directory(&path, &request_path, url),
            }
        } else if request_path.has_trailing_slash() {
            Err(HttpError::NotFound)
        } else {
            self.serve_file(path, headers)
        }
    }

    fn serve_file(&self, path: PathBuf, headers: &[Header]) -> Result<ResponseBox, HttpError> {
        let file = File::new(path).map_err(|_| HttpError::NotFound)?;

        if find_header(headers, "If-None-Match").is_none() {
            if let Some(since) = find_header(headers, "If-Modified-Since") {
                if file.is_not_modified_since(since) {
                    return Ok(Response::empty(304).boxed());
                }
            }
        }

        file.get_response()
            .map(Response::boxed)
            .map_err(|_| HttpError::NotFound)
    }

    fn list_directory(
        &self,
        path: &Path,
        request_path: &RequestPath,
        url: &str,
    ) -> Result<ResponseBox, HttpError> {
        if !self.hooks.on_list_directory(request_path) {
            log::warn!("Directory listing blocked for {}", request_path.normalized());
            return Err(HttpError::DirectoryListingForbidden);
        }

        let listing = Listing::new(path, url).map_err(|_| HttpError::ListingUnavailable)?;
        let response: Response<Cursor<Vec<u8>>> = listing.into();

        Ok(response.boxed())
    }
}

fn find_index(dir: &Path) -> Option<PathBuf> {
    INDEX_FILES
        .iter()
        .map(|index| dir.join(index))
        .find(|index| index.is_file())
}

fn find_header<'a>(headers: &'a [Header], field: &'static str) -> Option<&'a str> {
    headers
        .iter()
        .find(|header| header.field.equiv(field))
        .map(|header| header.value.as_str())
}

fn redirect(location: &str) -> Result<ResponseBox, HttpError> {
    let header = Header::from_bytes("location", location)
        .map_err(|_| HttpError::Internal(format!("Could not redirect to {location}")))?;

    Ok(Response::empty(301).with_header(header).boxed())
}
