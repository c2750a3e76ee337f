use std::fs::File;
use std::io::{
    BufWriter,
    Write,
};
use std::path::{
    Path,
    PathBuf,
};

use log::info;

use crate::error::{
    PipelineError,
    Result,
};
use crate::utils::is_remote_source;

/// Environment variable holding the API key sent with authenticated
/// downloads.
pub const API_KEY_ENV: &str = "ORTHOSCAN_API_KEY";

/// Makes a pipeline input available as a local file.
///
/// A local path is returned as-is. An `http(s)://` source is streamed to
/// `dest` (redirects followed, `api-key` header attached when
/// [`API_KEY_ENV`] is set); the caller owns `dest` as a temporary artifact.
/// Returns the path to read the input from.
pub fn fetch_source(
    source: &str,
    dest: &Path,
) -> Result<PathBuf> {
    if !is_remote_source(source) {
        return Ok(PathBuf::from(source));
    }

    info!("downloading {source}");
    let client = reqwest::blocking::Client::builder()
        .build()
        .map_err(|e| PipelineError::Download(e.to_string()))?;

    let mut request = client.get(source);
    if let Ok(key) = std::env::var(API_KEY_ENV) {
        request = request.header("api-key", key);
    }

    let mut response = request
        .send()
        .map_err(|e| PipelineError::Download(format!("{source}: {e}")))?;
    if !response.status().is_success() {
        return Err(PipelineError::Download(format!(
            "{source}: status {}",
            response.status()
        )));
    }

    let mut writer = BufWriter::new(File::create(dest)?);
    response
        .copy_to(&mut writer)
        .map_err(|e| PipelineError::Download(format!("{source}: {e}")))?;
    writer.flush()?;

    Ok(dest.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_source_passes_through() {
        let dest = std::env::temp_dir().join("never-written.fna");
        let path = fetch_source("data/genome.fna", &dest).unwrap();
        assert_eq!(path, PathBuf::from("data/genome.fna"));
        assert!(!dest.exists());
    }
}
