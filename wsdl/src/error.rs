use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unable to parse provided URL")]
    UrlParseError(#[from] url::ParseError),

    #[error("unable to interpret {0:?} as a path or URL")]
    InvalidLocation(String),

    #[error("unsupported URL scheme {0}")]
    UnsupportedScheme(String),

    #[error("unable to read file {path}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to get file from server")]
    FetchError(#[from] reqwest::Error),

    #[error("received response code {0}")]
    StatusError(u16),

    #[error("document is not valid UTF-8")]
    EncodingError(#[from] std::str::Utf8Error),

    #[error("error parsing XML input")]
    XmlParseError(#[from] roxmltree::Error),

    #[error("document has no {0} element")]
    MissingElement(&'static str),

    #[error("{element} element is missing required {attribute} attribute")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },
}
