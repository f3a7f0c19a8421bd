use std::{
    borrow::Cow,
    ffi::{OsStr, OsString},
    path::{Path, PathBuf},
};

/// A request URL split into its path and query, with the path decoded and
/// normalised so that it can never name anything above the served root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestPath {
    raw_path: String,
    query: Option<String>,
    segments: Vec<OsString>,
}

impl RequestPath {
    pub fn parse(url: &str) -> Self {
        let url = url.split('#').next().unwrap_or_default();
        let (raw_path, query) = match url.split_once('?') {
            Some((path, query)) => (path, Some(query.to_string())),
            None => (url, None),
        };

        let mut segments: Vec<OsString> = vec![];

        for segment in percent_decode_bytes(raw_path).split(|byte| *byte == b'/') {
            match segment {
                b"" | b"." => {}
                b".." => {
                    segments.pop();
                }
                segment => segments.push(os_string(segment)),
            }
        }

        Self {
            raw_path: raw_path.to_string(),
            query,
            segments,
        }
    }

    /// The decoded path with dot segments resolved, always starting with `/`
    /// and never ending with one (except for the root itself).
    pub fn normalized(&self) -> String {
        let segments = self
            .segments
            .iter()
            .map(|segment| segment.to_string_lossy())
            .collect::<Vec<Cow<'_, str>>>();

        format!("/{}", segments.join("/"))
    }

    pub fn has_trailing_slash(&self) -> bool {
        self.raw_path.trim_end().ends_with('/')
    }

    pub fn to_fs_path(&self, root: &Path) -> PathBuf {
        self.segments
            .iter()
            .fold(root.to_path_buf(), |path, segment| path.join(segment))
    }

    /// Where a directory requested without its trailing slash should redirect to.
    pub fn redirect_location(&self) -> String {
        match &self.query {
            Some(query) => format!("{}/?{query}", self.raw_path),
            None => format!("{}/", self.raw_path),
        }
    }

    /// Whole-segment prefix match on the normalised path. `/papers` covers
    /// `/papers` and `/papers/x`, never `/papers-x`.
    pub fn is_within(&self, prefix: &str) -> bool {
        let prefix = prefix.trim_matches('/');

        if prefix.is_empty() {
            return true;
        }

        let prefix = prefix.split('/').collect::<Vec<&str>>();

        self.segments.len() >= prefix.len()
            && self
                .segments
                .iter()
                .zip(&prefix)
                .all(|(a, b)| a.as_os_str() == OsStr::new(b))
    }
}

pub fn percent_decode(input: &str) -> String {
    String::from_utf8_lossy(&percent_decode_bytes(input)).into_owned()
}

pub fn percent_decode_bytes(input: &str) -> Vec<u8> {
    let bytes = input.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut index = 0;

    while index < bytes.len() {
        if bytes[index] == b'%' {
            if let Some(byte) = bytes
                .get(index + 1..index + 3)
                .and_then(|hex| std::str::from_utf8(hex).ok())
                .and_then(|hex| u8::from_str_radix(hex, 16).ok())
            {
                decoded.push(byte);
                index += 3;
                continue;
            }
        }

        decoded.push(bytes[index]);
        index += 1;
    }

    decoded
}

/// Percent-encodes everything except unreserved characters and `/`.
pub fn percent_encode(input: &[u8]) -> String {
    let mut encoded = String::with_capacity(input.len());

    for &byte in input {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'/' => {
                encoded.push(byte as char);
            }
            byte => encoded += &format!("%{byte:02X}"),
        }
    }

    encoded
}

/// The bytes of a file name as the filesystem stores them. Names that are
/// not valid UTF-8 only survive this on unix.
#[cfg(unix)]
pub fn os_bytes(name: &OsStr) -> Cow<'_, [u8]> {
    use std::os::unix::ffi::OsStrExt;
    Cow::Borrowed(name.as_bytes())
}

#[cfg(not(unix))]
pub fn os_bytes(name: &OsStr) -> Cow<'_, [u8]> {
    Cow::Owned(name.to_string_lossy().into_owned().into_bytes())
}

#[cfg(unix)]
fn os_string(bytes: &[u8]) -> OsString {
    use std::os::unix::ffi::OsStringExt;
    OsString::from_vec(bytes.to_vec())
}

#[cfg(not(unix))]
fn os_string(bytes: &[u8]) -> OsString {
    OsString::from(String::from_utf8_lossy(bytes).into_owned())
}
