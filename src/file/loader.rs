//! Config file loading functionality.
//!
//! This module provides functions to load device configs from files, stdin
//! or any reader, parsing them into `ConfNode` trees ready for querying.
//! Gzipped input is decompressed transparently.

use crate::document::node::ConfNode;
use anyhow::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Gzip magic bytes.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Loads and parses a config file from the filesystem.
///
/// Files with a `.gz` extension are decompressed before parsing.
///
/// # Examples
///
/// ```no_run
/// use confquill::file::loader::load_conf_file;
///
/// let conf = load_conf_file("router1.cfg").unwrap();
/// for name in &conf.get("interface") {
///     println!("{}", name);
/// }
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - The file path does not exist
/// - The file cannot be read (permissions, etc.)
/// - A `.gz` file is not valid gzip, or the contents are not valid UTF-8
pub fn load_conf_file<P: AsRef<Path>>(path: P) -> Result<ConfNode> {
    let path_ref = path.as_ref();

    let is_gzipped = path_ref
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    debug!(path = %path_ref.display(), gzipped = is_gzipped, "loading config file");

    let content = if is_gzipped {
        read_gzipped_file(path_ref)?
    } else {
        fs::read_to_string(path_ref)
            .with_context(|| format!("Failed to read file {}", path_ref.display()))?
    };

    Ok(ConfNode::parse(&content))
}

/// Loads and parses a config from standard input.
///
/// Reads stdin until EOF. Input starting with the gzip magic bytes is
/// decompressed first.
///
/// # Errors
///
/// This function will return an error if:
/// - Reading from stdin fails
/// - The input is neither valid UTF-8 nor valid gzip
pub fn load_conf_from_stdin() -> Result<ConfNode> {
    let stdin = std::io::stdin();
    let handle = stdin.lock();
    load_conf_from_reader(handle).context("Failed to read config from stdin")
}

/// Loads and parses a config from any reader.
///
/// The reader is consumed completely before parsing starts.
pub fn load_conf_from_reader<R: Read>(mut reader: R) -> Result<ConfNode> {
    let mut buffer = Vec::new();
    reader
        .read_to_end(&mut buffer)
        .context("Failed to read input")?;

    let content = if buffer.starts_with(&GZIP_MAGIC) {
        debug!("input is gzip-compressed");
        decompress_gzip_bytes(&buffer)?
    } else {
        String::from_utf8(buffer).context("Invalid UTF-8 in input")?
    };

    Ok(ConfNode::parse(&content))
}

/// Reads and decompresses a gzipped file.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The file is not valid gzip format (corrupted)
/// - The decompressed content is not valid UTF-8
fn read_gzipped_file<P: AsRef<Path>>(path: P) -> Result<String> {
    use flate2::read::GzDecoder;

    let file = fs::File::open(path).context("Failed to open gzipped file")?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped file - file may be corrupted")?;
    Ok(content)
}

/// Decompresses gzip-encoded bytes to a UTF-8 string.
fn decompress_gzip_bytes(bytes: &[u8]) -> Result<String> {
    use flate2::read::GzDecoder;

    let mut decoder = GzDecoder::new(bytes);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped input")?;
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn gzip(text: &str) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(text.as_bytes()).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_load_from_reader_plain() {
        let conf = load_conf_from_reader("hostname r1\n".as_bytes()).unwrap();
        assert_eq!(conf.get("hostname").word().unwrap(), "r1");
    }

    #[test]
    fn test_load_from_reader_gzipped() {
        let bytes = gzip("hostname r2\n");
        let conf = load_conf_from_reader(bytes.as_slice()).unwrap();
        assert_eq!(conf.get("hostname").word().unwrap(), "r2");
    }

    #[test]
    fn test_load_from_reader_invalid_utf8() {
        let result = load_conf_from_reader(&[0xff, 0xfe, 0x00][..]);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("UTF-8"));
    }

    #[test]
    fn test_read_gzipped_file_corrupted() {
        use tempfile::NamedTempFile;

        let temp_file = NamedTempFile::new().unwrap();
        let gz_path = temp_file.path().with_extension("cfg.gz");
        fs::write(&gz_path, b"not gzip data").unwrap();

        let result = read_gzipped_file(&gz_path);
        assert!(result.is_err());
        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("decompress") || err_msg.contains("corrupted"));
        fs::remove_file(&gz_path).unwrap();
    }
}
