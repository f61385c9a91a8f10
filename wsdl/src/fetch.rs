//! Resolves a [`Location`] to raw bytes, with an optional on-disk cache
//! for remote fetches.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, warn};
use url::Url;

use crate::error::Error;
use crate::location::Location;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Default)]
pub struct Fetcher {
    insecure: bool,
    cache_dir: Option<PathBuf>,
}

impl Fetcher {
    /// `insecure` disables TLS certificate verification for https fetches.
    pub fn new(insecure: bool) -> Self {
        Self {
            insecure,
            cache_dir: None,
        }
    }

    /// Enables the fetch cache rooted at `dir`. Cached responses are keyed
    /// by the absolute URL; the cache layout is not a contract surface.
    pub fn with_cache_dir(mut self, dir: PathBuf) -> Self {
        self.cache_dir = Some(dir);
        self
    }

    pub fn fetch(&self, location: &Location) -> Result<Vec<u8>, Error> {
        match location {
            Location::File(path) => {
                debug!(file = %path.display(), "reading");
                fs::read(path).map_err(|source| Error::FileReadError {
                    path: path.clone(),
                    source,
                })
            }
            Location::Remote(url) => {
                if let Some(data) = self.read_cache(url) {
                    debug!(url = %url, "using cached copy");
                    return Ok(data);
                }

                debug!(url = %url, "downloading");
                let data = self.download(url)?;
                self.write_cache(url, &data);
                Ok(data)
            }
        }
    }

    fn download(&self, url: &Url) -> Result<Vec<u8>, Error> {
        let client = reqwest::blocking::Client::builder()
            .danger_accept_invalid_certs(self.insecure)
            .timeout(FETCH_TIMEOUT)
            .build()?;

        let response = client.get(url.clone()).send()?;
        if !response.status().is_success() {
            return Err(Error::StatusError(response.status().as_u16()));
        }

        Ok(response.bytes()?.to_vec())
    }

    fn cache_path(&self, url: &Url) -> Option<PathBuf> {
        let dir = self.cache_dir.as_ref()?;
        let name: String = url
            .as_str()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        Some(dir.join(name))
    }

    fn read_cache(&self, url: &Url) -> Option<Vec<u8>> {
        fs::read(self.cache_path(url)?).ok()
    }

    fn write_cache(&self, url: &Url, data: &[u8]) {
        let Some(path) = self.cache_path(url) else {
            return;
        };
        let result = path
            .parent()
            .map(fs::create_dir_all)
            .unwrap_or(Ok(()))
            .and_then(|()| fs::write(&path, data));
        if let Err(err) = result {
            // A broken cache never fails the run.
            warn!(path = %path.display(), error = %err, "unable to write fetch cache");
        }
    }
}
