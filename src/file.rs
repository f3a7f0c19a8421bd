use anyhow::{Error, Result};
use chrono::{DateTime, Utc};
use mime_guess::{Mime, from_path};
use std::{fs::File as FsFile, path::PathBuf, time::SystemTime};
use tiny_http::{Header, Response};

const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

#[derive(Clone, Debug)]
pub struct File {
    pub path: PathBuf,
    pub mime: Mime,
    pub modified: Option<SystemTime>,
}

impl File {
    pub fn new(path: PathBuf) -> Result<Self> {
        let mime = from_path(&path).first_or_octet_stream();
        let metadata = FsFile::open(&path).and_then(|file| file.metadata())?;

        Ok(Self {
            path,
            mime,
            modified: metadata.modified().ok(),
        })
    }

    pub fn last_modified(&self) -> Option<String> {
        self.modified
            .map(|modified| DateTime::<Utc>::from(modified).format(HTTP_DATE_FORMAT).to_string())
    }

    /// Compares at whole-second precision, the resolution of HTTP dates.
    /// An unparsable date never counts as a match.
    pub fn is_not_modified_since(&self, if_modified_since: &str) -> bool {
        let Some(modified) = self.modified else {
            return false;
        };

        DateTime::parse_from_rfc2822(if_modified_since.trim()).is_ok_and(|since| {
            DateTime::<Utc>::from(modified).timestamp() <= since.timestamp()
        })
    }

    pub fn get_response(&self) -> Result<Response<FsFile>> {
        let fs_file = FsFile::open(&self.path)?;
        let header = Header::from_bytes("content-type", self.mime.essence_str())
            .map_err(|_| Error::msg("Could not create header"))?;
        let mut response = Response::from_file(fs_file).with_header(header);

        if let Some(last_modified) = self.last_modified() {
            let header = Header::from_bytes("last-modified", last_modified)
                .map_err(|_| Error::msg("Could not create header"))?;
            response.add_header(header);
        }

        Ok(response)
    }
}
