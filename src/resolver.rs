use anyhow::{bail, Context, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::{StatusCode, Url};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::config::Config;
use crate::input::DirectInput;
use crate::models::Route;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Turns command line sources into local, servable routes
///
/// Remote sources are downloaded once into kept temp files; local sources are
/// only checked for existence. Resolution runs sequentially in argument order.
#[derive(Clone)]
pub struct Resolver {
    client: reqwest::Client,
}

impl Resolver {
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.download_timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Resolve every source into a deduplicated, ordered route list
    ///
    /// Fails when there is nothing to serve, when any source cannot be
    /// resolved, or when two distinct files would share a URL path.
    pub async fn resolve(
        &self,
        sources: &[String],
        direct_input: Option<&DirectInput>,
    ) -> Result<Vec<Route>> {
        if sources.is_empty() && direct_input.is_none() {
            bail!("no file specified");
        }

        let mut seen = HashSet::new();
        let mut url_paths: HashMap<String, String> = HashMap::new();
        let mut routes = Vec::new();

        for source in sources {
            let file_path = self.resolve_source(source).await?;

            if !seen.insert(file_path.clone()) {
                continue;
            }

            let url_path = url_path_for(&file_path);
            if let Some(existing) = url_paths.get(&url_path) {
                bail!(
                    "duplicate route {}: {:?} and {:?} share a file name",
                    url_path,
                    existing,
                    file_path
                );
            }
            url_paths.insert(url_path.clone(), file_path.clone());

            routes.push(Route::new(file_path, url_path));
        }

        Ok(routes)
    }

    async fn resolve_source(&self, source: &str) -> Result<String> {
        if is_remote(source) {
            return self
                .download_json(source)
                .await
                .context("downloading remote file");
        }

        resolve_local(source)
    }

    /// Download a JSON document into a kept temp file and return its path
    ///
    /// The response must carry exactly `application/json` and status 200.
    pub async fn download_json(&self, raw_url: &str) -> Result<String> {
        tracing::info!("downloading: {:?}", raw_url);

        let url = Url::parse(raw_url).context("parse URL")?;
        let host = url.host_str().unwrap_or("remote").to_string();

        let mut response = self.client.get(url).send().await.context("download")?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if content_type != JSON_CONTENT_TYPE {
            bail!("unexpected content type for {:?}: {}", raw_url, content_type);
        }

        if response.status() != StatusCode::OK {
            tracing::warn!("failed to download file from: {:?}", raw_url);
            bail!("download failed: {}", response.status());
        }

        let mut temp_file = tempfile::Builder::new()
            .prefix(&format!("mok-{}.", host))
            .suffix(".json")
            .tempfile()
            .context("create temp file")?;
        tracing::debug!("creating temp file: {:?}", temp_file.path());

        while let Some(chunk) = response.chunk().await.context("save")? {
            temp_file.write_all(&chunk).context("save")?;
        }

        // Downloads outlive the process so the file stays servable
        let (_, path) = temp_file.keep().context("create temp file")?;
        let path = path.to_string_lossy().into_owned();

        tracing::info!("successfully downloaded file {:?} to {:?}", raw_url, path);
        Ok(path)
    }
}

pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Check that a local source exists and is not a directory
pub fn resolve_local(source: &str) -> Result<String> {
    let metadata = fs::metadata(source).context("checking file")?;
    if metadata.is_dir() {
        bail!("argument is a directory: {}", source);
    }

    Ok(source.to_string())
}

/// `/` followed by the final segment of the file path
pub fn url_path_for(file_path: &str) -> String {
    let name = Path::new(file_path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_path.to_string());

    format!("/{}", name)
}
