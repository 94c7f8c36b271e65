use std::fs;
use std::io;
use std::path::Path;

use fieldcam_core::KEEP_FILE_NAME;

mod archive;
mod checksum;
mod error;

pub use archive::extract_archive;
pub use checksum::{sha256_hex, sha256_hex_file, verify_checksums};
pub use error::FsError;

pub fn file_exists(path: &Path) -> Result<(), FsError> {
    if path.exists() {
        Ok(())
    } else {
        Err(FsError::NotFound {
            path: path.to_path_buf(),
        })
    }
}

pub fn file_readable(path: &Path) -> Result<(), FsError> {
    match fs::File::open(path) {
        Ok(_) => Ok(()),
        Err(err) => Err(FsError::from_read_error(path, err)),
    }
}

pub fn empty_folder(path: &Path) -> Result<(), FsError> {
    if !path.exists() {
        return fs::create_dir_all(path).map_err(|err| FsError::io(path, err));
    }

    for entry in fs::read_dir(path).map_err(|err| FsError::io(path, err))? {
        let entry = entry.map_err(|err| FsError::io(path, err))?;
        if entry.file_name().to_str() == Some(KEEP_FILE_NAME) {
            continue;
        }

        let entry_path = entry.path();
        let file_type = entry
            .file_type()
            .map_err(|err| FsError::io(&entry_path, err))?;
        if file_type.is_dir() {
            fs::remove_dir_all(&entry_path).map_err(|err| FsError::io(&entry_path, err))?;
        } else {
            fs::remove_file(&entry_path).map_err(|err| FsError::io(&entry_path, err))?;
        }
    }

    Ok(())
}

pub fn delete_file(path: &Path) -> Result<(), FsError> {
    fs::remove_file(path).map_err(|err| FsError::from_read_error(path, err))
}

pub fn write_file(path: &Path, content: &str) -> Result<(), FsError> {
    fs::write(path, content).map_err(|err| FsError::io(path, err))
}

pub trait FileSystemOps {
    fn file_exists(&self, path: &Path) -> Result<(), FsError>;
    fn file_readable(&self, path: &Path) -> Result<(), FsError>;
    fn empty_folder(&self, path: &Path) -> Result<(), FsError>;
    fn extract_archive(&self, archive_path: &Path, output_dir: &Path) -> Result<(), FsError>;
    fn verify_checksums(&self, manifest_file_name: &str, working_dir: &Path)
        -> Result<(), FsError>;
    fn delete_file(&self, path: &Path) -> Result<(), FsError>;
    fn write_file(&self, path: &Path, content: &str) -> Result<(), FsError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl FileSystemOps for LocalFileSystem {
    fn file_exists(&self, path: &Path) -> Result<(), FsError> {
        file_exists(path)
    }

    fn file_readable(&self, path: &Path) -> Result<(), FsError> {
        file_readable(path)
    }

    fn empty_folder(&self, path: &Path) -> Result<(), FsError> {
        empty_folder(path)
    }

    fn extract_archive(&self, archive_path: &Path, output_dir: &Path) -> Result<(), FsError> {
        extract_archive(archive_path, output_dir)
    }

    fn verify_checksums(
        &self,
        manifest_file_name: &str,
        working_dir: &Path,
    ) -> Result<(), FsError> {
        verify_checksums(manifest_file_name, working_dir)
    }

    fn delete_file(&self, path: &Path) -> Result<(), FsError> {
        delete_file(path)
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<(), FsError> {
        write_file(path, content)
    }
}

pub(crate) fn read_to_string(path: &Path) -> Result<String, FsError> {
    match fs::read_to_string(path) {
        Ok(raw) => Ok(raw),
        Err(err) if err.kind() == io::ErrorKind::InvalidData => Err(FsError::Integrity {
            detail: format!("{} is not valid UTF-8", path.display()),
        }),
        Err(err) => Err(FsError::from_read_error(path, err)),
    }
}
