use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::error::FsError;

pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

pub fn sha256_hex_file(path: &Path) -> Result<String, FsError> {
    let mut file = fs::File::open(path).map_err(|err| FsError::from_read_error(path, err))?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher).map_err(|err| FsError::io(path, err))?;
    Ok(hex::encode(hasher.finalize()))
}

pub fn verify_checksums(manifest_file_name: &str, working_dir: &Path) -> Result<(), FsError> {
    let manifest_path = working_dir.join(manifest_file_name);
    let raw = crate::read_to_string(&manifest_path)?;
    let entries = parse_checksum_manifest(&raw, &manifest_path)?;

    let mut failures = Vec::new();
    for entry in entries {
        if !entry_path_stays_inside(&entry.path) {
            return Err(FsError::Integrity {
                detail: format!(
                    "manifest entry '{}' escapes the working folder",
                    entry.path.display()
                ),
            });
        }

        let file_path = working_dir.join(&entry.path);
        match sha256_hex_file(&file_path) {
            Ok(actual) if actual.eq_ignore_ascii_case(&entry.digest) => {}
            Ok(actual) => failures.push(format!(
                "{}: expected {} got {}",
                entry.path.display(),
                entry.digest,
                actual
            )),
            Err(err) => failures.push(format!("{}: {}", entry.path.display(), err)),
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(FsError::Integrity {
            detail: failures.join("; "),
        })
    }
}

struct ChecksumEntry {
    digest: String,
    path: PathBuf,
}

fn parse_checksum_manifest(raw: &str, manifest_path: &Path) -> Result<Vec<ChecksumEntry>, FsError> {
    let mut entries = Vec::new();
    for line in raw.lines().map(str::trim).filter(|line| !line.is_empty()) {
        let Some((digest, name)) = line.split_once(char::is_whitespace) else {
            return Err(FsError::Integrity {
                detail: format!(
                    "malformed manifest line '{line}' in {}",
                    manifest_path.display()
                ),
            });
        };

        let digest = digest.trim();
        if digest.len() != 64 || !digest.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return Err(FsError::Integrity {
                detail: format!(
                    "invalid sha256 digest '{digest}' in {}",
                    manifest_path.display()
                ),
            });
        }

        let name = name.trim_start().trim_start_matches('*');
        if name.is_empty() {
            return Err(FsError::Integrity {
                detail: format!(
                    "manifest line '{line}' names no file in {}",
                    manifest_path.display()
                ),
            });
        }

        entries.push(ChecksumEntry {
            digest: digest.to_string(),
            path: PathBuf::from(name),
        });
    }

    if entries.is_empty() {
        return Err(FsError::Integrity {
            detail: format!("manifest lists no files: {}", manifest_path.display()),
        });
    }

    Ok(entries)
}

fn entry_path_stays_inside(path: &Path) -> bool {
    if path.is_absolute() {
        return false;
    }
    !path
        .components()
        .any(|component| matches!(component, Component::ParentDir))
}
