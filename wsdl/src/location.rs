use std::fmt;
use std::path::{Path, PathBuf};

use url::Url;

use crate::error::Error;

/// Where a document lives: a file on disk or a remote URL.
///
/// The `Display` form is absolute enough to key the resolver's seen-set;
/// two joins of the same reference against the same base always render
/// identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Location {
    File(PathBuf),
    Remote(Url),
}

impl Location {
    pub fn parse(raw: &str) -> Result<Self, Error> {
        match Url::parse(raw) {
            Ok(url) => match url.scheme() {
                "http" | "https" => Ok(Location::Remote(url)),
                "file" => url
                    .to_file_path()
                    .map(Location::File)
                    .map_err(|()| Error::InvalidLocation(raw.to_owned())),
                other => Err(Error::UnsupportedScheme(other.to_owned())),
            },
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                Ok(Location::File(PathBuf::from(raw)))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Resolves a (possibly relative) schema reference against this
    /// location. Absolute references stand on their own; relative ones
    /// join against the base URL, or against the parent directory when
    /// the base is a local file.
    pub fn join(&self, reference: &str) -> Result<Self, Error> {
        match Url::parse(reference) {
            Ok(_) => return Location::parse(reference),
            Err(url::ParseError::RelativeUrlWithoutBase) => (),
            Err(err) => return Err(err.into()),
        }

        match self {
            Location::Remote(url) => Ok(Location::Remote(url.join(reference)?)),
            Location::File(path) => {
                let parent = path.parent().unwrap_or_else(|| Path::new(""));
                Ok(Location::File(parent.join(reference)))
            }
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::File(path) => write!(f, "{}", path.display()),
            Location::Remote(url) => write!(f, "{}", url),
        }
    }
}
