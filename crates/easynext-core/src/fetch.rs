//! Premium template download and extraction
//!
//! Downloaded bytes are untrusted: the archive format is decided by the file
//! signature, never by a claimed content type. Zip archives are recognized by
//! the local-file-header signature; everything else falls through to the tar
//! extractors (gzip-compressed first, then plain).

use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::error::FetchError;
use crate::USER_AGENT;

/// Zip local-file-header signature
pub const ZIP_SIGNATURE: [u8; 4] = [0x50, 0x4b, 0x03, 0x04];

pub fn is_zip(bytes: &[u8]) -> bool {
    bytes.len() >= 4 && bytes[..4] == ZIP_SIGNATURE
}

/// Download `url` into a temporary file
pub async fn fetch_to_temp(
    client: &reqwest::Client,
    url: &str,
) -> Result<NamedTempFile, FetchError> {
    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(FetchError::Status(response.status().as_u16()));
    }
    let bytes = response.bytes().await?;

    let mut file = NamedTempFile::new()?;
    file.write_all(&bytes)?;
    file.flush()?;
    Ok(file)
}

/// Download a template archive and extract it into `target_root`
pub async fn install_remote_template(url: &str, target_root: &Path) -> Result<(), FetchError> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new());
    let archive = fetch_to_temp(&client, url).await?;
    extract_template(archive.path(), target_root)
}

/// Sniff the archive format and extract into `target_root`
pub fn extract_template(archive: &Path, target_root: &Path) -> Result<(), FetchError> {
    let mut header = [0u8; 4];
    let read = {
        let mut file = File::open(archive)?;
        file.read(&mut header)?
    };

    let staging = tempfile::tempdir()?;
    if read == ZIP_SIGNATURE.len() && is_zip(&header) {
        extract_zip(archive, staging.path())?;
    } else {
        extract_tar(archive, staging.path())?;
    }
    relocate(staging.path(), target_root)?;
    Ok(())
}

fn extract_zip(archive: &Path, dest: &Path) -> Result<(), FetchError> {
    let file = File::open(archive)?;
    let mut zip = zip::ZipArchive::new(BufReader::new(file))
        .map_err(|err| FetchError::Archive(err.to_string()))?;

    for i in 0..zip.len() {
        let mut entry = zip
            .by_index(i)
            .map_err(|err| FetchError::Archive(err.to_string()))?;
        let Some(relative) = entry.enclosed_name() else {
            continue;
        };
        let dest_path = dest.join(relative);
        if entry.is_dir() {
            fs::create_dir_all(&dest_path)?;
        } else {
            if let Some(parent) = dest_path.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut out = File::create(&dest_path)?;
            std::io::copy(&mut entry, &mut out)?;
        }
    }
    Ok(())
}

fn extract_tar(archive: &Path, dest: &Path) -> Result<(), FetchError> {
    let gz_attempt = || -> std::io::Result<()> {
        let file = File::open(archive)?;
        let decoder = GzDecoder::new(BufReader::new(file));
        tar::Archive::new(decoder).unpack(dest)
    };
    if gz_attempt().is_ok() {
        return Ok(());
    }

    reset_dir(dest)?;
    let plain_attempt = || -> std::io::Result<()> {
        let file = File::open(archive)?;
        tar::Archive::new(BufReader::new(file)).unpack(dest)
    };
    if plain_attempt().is_ok() {
        return Ok(());
    }

    Err(FetchError::UnsupportedTemplateFormat)
}

fn reset_dir(dir: &Path) -> std::io::Result<()> {
    fs::remove_dir_all(dir)?;
    fs::create_dir_all(dir)
}

/// Move the extracted tree into the target root.
///
/// Hosted archives usually wrap everything in a single top-level directory;
/// that wrapper is stripped. Flat archives are moved as-is.
fn relocate(staging: &Path, target_root: &Path) -> std::io::Result<()> {
    let entries: Vec<_> = fs::read_dir(staging)?.collect::<Result<_, _>>()?;
    let source: PathBuf = if entries.len() == 1
        && entries[0].file_type().map(|t| t.is_dir()).unwrap_or(false)
    {
        entries[0].path()
    } else {
        staging.to_path_buf()
    };

    fs::create_dir_all(target_root)?;
    for entry in fs::read_dir(&source)? {
        let entry = entry?;
        let dest = target_root.join(entry.file_name());
        // the staging dir can sit on another filesystem, where rename fails
        if fs::rename(entry.path(), &dest).is_err() {
            copy_recursive(&entry.path(), &dest)?;
        }
    }
    Ok(())
}

fn copy_recursive(src: &Path, dest: &Path) -> std::io::Result<()> {
    if src.is_dir() {
        fs::create_dir_all(dest)?;
        for entry in fs::read_dir(src)? {
            let entry = entry?;
            copy_recursive(&entry.path(), &dest.join(entry.file_name()))?;
        }
    } else {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(src, dest)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn write_temp(bytes: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        file
    }

    fn build_zip() -> Vec<u8> {
        let mut buffer = Vec::new();
        {
            let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
            let options =
                SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
            zip.start_file("template/package.json", options).unwrap();
            zip.write_all(b"{\"name\":\"premium\"}").unwrap();
            zip.start_file("template/src/app/layout.tsx", options).unwrap();
            zip.write_all(b"export default function RootLayout() {}").unwrap();
            zip.finish().unwrap();
        }
        buffer
    }

    fn build_tar_gz() -> Vec<u8> {
        let mut builder = tar::Builder::new(Vec::new());
        let contents = b"{\"name\":\"premium\"}";
        let mut header = tar::Header::new_gnu();
        header.set_size(contents.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, "template/package.json", &contents[..])
            .unwrap();
        let tar_bytes = builder.into_inner().unwrap();

        let mut encoder =
            flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(&tar_bytes).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn zip_signature_is_recognized() {
        assert!(is_zip(&[0x50, 0x4b, 0x03, 0x04, 0xff]));
        assert!(!is_zip(&[0x50, 0x4b, 0x05, 0x06]));
        assert!(!is_zip(&[0x50, 0x4b]));
        assert!(!is_zip(b"not an archive"));
    }

    #[test]
    fn zip_archives_extract_with_wrapper_stripped() {
        let archive = write_temp(&build_zip());
        let target = tempfile::tempdir().unwrap();

        extract_template(archive.path(), target.path()).unwrap();

        assert!(target.path().join("package.json").exists());
        assert!(target.path().join("src/app/layout.tsx").exists());
        assert!(!target.path().join("template").exists());
    }

    #[test]
    fn non_zip_bytes_fall_through_to_tar() {
        let archive = write_temp(&build_tar_gz());
        let target = tempfile::tempdir().unwrap();

        extract_template(archive.path(), target.path()).unwrap();

        assert!(target.path().join("package.json").exists());
    }

    #[test]
    fn garbage_fails_with_unsupported_format() {
        let archive = write_temp(b"this is neither a zip nor a tar archive, not even close");
        let target = tempfile::tempdir().unwrap();

        let err = extract_template(archive.path(), target.path()).unwrap_err();
        assert!(matches!(err, FetchError::UnsupportedTemplateFormat));
    }
}
