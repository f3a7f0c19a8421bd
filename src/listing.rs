use crate::request_path::{os_bytes, percent_decode, percent_encode};
use anyhow::Result;
use html_escape::encode_text;
use natord::compare_ignore_case;
use std::{ffi::OsString, fs::read_dir, io::Cursor, path::Path};
use tiny_http::{Header, Response};

pub struct Entry {
    pub name: String,
    pub file_name: OsString,
    pub is_dir: bool,
    pub is_symlink: bool,
}

impl Entry {
    fn display_name(&self) -> String {
        if self.is_symlink {
            format!("{}@", self.name)
        } else if self.is_dir {
            format!("{}/", self.name)
        } else {
            self.name.clone()
        }
    }

    /// Built from the raw file name so that names which are not valid
    /// UTF-8 still link back to the same file.
    fn href(&self) -> String {
        let mut link = os_bytes(&self.file_name).into_owned();

        if self.is_dir {
            link.push(b'/');
        }

        percent_encode(&link)
    }
}

pub struct Listing {
    title: String,
    entries: Vec<Entry>,
}

impl Listing {
    /// Reads `dir` for the page shown at `url`. Entries come back in
    /// case-insensitive natural order.
    pub fn new(dir: &Path, url: &str) -> Result<Self> {
        let mut entries = vec![];

        for entry in read_dir(dir)? {
            let Ok(entry) = entry else { continue };

            let file_name = entry.file_name();

            entries.push(Entry {
                name: file_name.to_string_lossy().into_owned(),
                file_name,
                is_dir: entry.path().is_dir(),
                is_symlink: entry.file_type().is_ok_and(|file_type| file_type.is_symlink()),
            });
        }

        entries.sort_by(|a, b| compare_ignore_case(&a.name, &b.name));

        Ok(Self {
            title: percent_decode(url),
            entries,
        })
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }
}

impl From<Listing> for Response<Cursor<Vec<u8>>> {
    fn from(value: Listing) -> Self {
        let title = encode_text(&value.title);

        let mut entry_elements = String::new();

        for entry in &value.entries {
            entry_elements += &format!(
                "<li><a href=\"{}\">{}</a></li>\n",
                entry.href(),
                encode_text(&entry.display_name()),
            );
        }

        let html = format!(
            r#"<!DOCTYPE HTML>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Directory listing for {title}</title>
</head>
<body>
<h1>Directory listing for {title}</h1>
<hr>
<ul>
{entry_elements}</ul>
<hr>
</body>
</html>
"#
        );

        let mut response = Response::from_string(html);

        if let Ok(header) = Header::from_bytes("content-type", "text/html; charset=utf-8") {
            response = response.with_header(header);
        }

        response
    }
}
