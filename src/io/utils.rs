//! Utilities for writing output files.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;

#[cfg(feature = "json")]
use serde::Serialize;

/// Output file that is written to a temporary location and only moved to its
/// target path once writing has completed.
#[derive(Debug)]
pub struct AtomicOutputFile {
    target_path: PathBuf,
    temp_file: NamedTempFile,
}

impl AtomicOutputFile {
    /// Creates a temporary file in the directory of the given target path.
    pub fn new<P: AsRef<Path>>(target_path: P) -> io::Result<Self> {
        let target_path = target_path.as_ref().to_path_buf();
        let directory = match target_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !directory.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Output directory {} does not exist", directory.display()),
            ));
        }
        let temp_file = NamedTempFile::new_in(directory)?;
        Ok(Self {
            target_path,
            temp_file,
        })
    }

    /// Returns the path the file will have once persisted.
    pub fn target_path(&self) -> &Path {
        &self.target_path
    }

    /// Returns a writer for the temporary file.
    pub fn file(&mut self) -> &mut fs::File {
        self.temp_file.as_file_mut()
    }

    /// Flushes the temporary file and moves it to the target path,
    /// replacing any existing file.
    pub fn persist(mut self) -> io::Result<()> {
        self.file().flush()?;
        self.temp_file
            .persist(&self.target_path)
            .map(|_| ())
            .map_err(|err| err.error)
    }
}

/// Writes the given text to the given path.
pub fn write_text_file<P: AsRef<Path>>(text: &str, file_path: P) -> io::Result<()> {
    let mut output_file = AtomicOutputFile::new(file_path)?;
    output_file.file().write_all(text.as_bytes())?;
    output_file.persist()
}

/// Serializes the given data into JSON format and saves at the given path.
#[cfg(feature = "json")]
pub fn save_data_as_json<P, T>(file_path: P, data: &T) -> io::Result<()>
where
    P: AsRef<Path>,
    T: Serialize,
{
    let mut output_file = AtomicOutputFile::new(file_path)?;
    {
        let mut writer = io::BufWriter::new(output_file.file());
        serde_json::to_writer(&mut writer, data)?;
        writer.flush()?;
    }
    output_file.persist()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_file_is_only_visible_after_persisting() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");

        let mut output_file = AtomicOutputFile::new(&path).unwrap();
        output_file.file().write_all(b"charge states").unwrap();
        assert!(!path.exists());
        output_file.persist().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "charge states");

        write_text_file("replaced", &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "replaced");
    }

    #[test]
    fn missing_output_directory_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.txt");
        let err = AtomicOutputFile::new(path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
