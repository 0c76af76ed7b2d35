//! Blocking downloader for the raw dataset.
//!
//! One GET per call, response body written verbatim to a local file. There is
//! no retry and no integrity check: a truncated body is indistinguishable from
//! a complete one and only shows up later as parse anomalies.
//!
//! Typical usage:
//! ```no_run
//! # use co2_rs::Fetcher;
//! let fetcher = Fetcher::new(None)?;
//! let bytes = fetcher.fetch(co2_rs::config::DEFAULT_DATASET_URL, "owid-co2-data.csv")?;
//! # Ok::<(), co2_rs::Error>(())
//! ```
use crate::error::{Error, Result};
use log::{debug, info};
use reqwest::blocking::{Client as HttpClient, ClientBuilder};
use reqwest::redirect::Policy;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Fetcher {
    http: HttpClient,
}

impl Fetcher {
    /// Build a fetcher. `timeout = None` means the request may block indefinitely.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        Self::from_builder(HttpClient::builder().timeout(timeout))
    }

    /// Build from a caller-configured client builder (e.g. with `.no_proxy()`).
    /// Redirect policy and user agent are applied on top.
    pub fn from_builder(builder: ClientBuilder) -> Result<Self> {
        let http = builder
            .redirect(Policy::limited(5))
            .user_agent(concat!("co2_rs/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Error::HttpClient)?;
        Ok(Self { http })
    }

    /// Download `url` into `dest`, creating or truncating it. Returns the byte count.
    ///
    /// ### Errors
    /// - `DestinationUnwritable` if `dest` cannot be created or written
    /// - `Transport` for connection, DNS, TLS or body-read failures
    /// - `HttpStatus` for a non-success response
    pub fn fetch<P: AsRef<Path>>(&self, url: &str, dest: P) -> Result<u64> {
        let dest = dest.as_ref();
        let unwritable = |source: std::io::Error| Error::DestinationUnwritable {
            path: dest.to_path_buf(),
            source,
        };
        let transport = |source: reqwest::Error| Error::Transport {
            url: url.to_string(),
            source: source.into(),
        };

        let file = File::create(dest).map_err(unwritable)?;
        let mut out = DestWriter::new(BufWriter::new(file));

        debug!("GET {}", url);
        let mut resp = self.http.get(url).send().map_err(transport)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status,
            });
        }

        let bytes = match io::copy(&mut resp, &mut out) {
            Ok(n) => n,
            Err(e) => {
                return Err(match out.error.take() {
                    Some(write_err) => unwritable(write_err),
                    None => Error::Transport {
                        url: url.to_string(),
                        source: e.into(),
                    },
                });
            }
        };
        out.flush().map_err(unwritable)?;
        info!("downloaded {} bytes to {}", bytes, dest.display());
        Ok(bytes)
    }
}

/// Remembers the first error raised by the destination so a failed copy can
/// be told apart from a failed body read.
struct DestWriter<W> {
    inner: W,
    error: Option<io::Error>,
}

impl<W: Write> DestWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, error: None }
    }

    fn tag(&mut self, e: io::Error) -> io::Error {
        let kind = e.kind();
        self.error.get_or_insert(e);
        io::Error::new(kind, "destination write failed")
    }
}

impl<W: Write> Write for DestWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf).map_err(|e| self.tag(e))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
