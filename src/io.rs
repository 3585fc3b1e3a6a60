//! Sequence and alignment files. A sequence file holds the raw symbols, optionally wrapped over
//! several lines; an alignment file holds the two aligned sequences, one per line.

use std::fs;
use std::path::Path;

use log::debug;

use crate::{Error, Result, traceback::Alignment};

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> Error + '_ {
    move |source| Error::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Reads a sequence, dropping all whitespace
pub fn read_sequence(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(io_error(path))?;
    let sequence: Vec<u8> = bytes
        .into_iter()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    debug!("read {} symbols from {}", sequence.len(), path.display());
    Ok(sequence)
}

pub fn write_alignment(path: impl AsRef<Path>, alignment: &Alignment) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error(parent))?;
    }

    let mut contents = Vec::with_capacity(2 * alignment.len() + 2);
    contents.extend_from_slice(&alignment.x_aligned);
    contents.push(b'\n');
    contents.extend_from_slice(&alignment.y_aligned);
    contents.push(b'\n');

    fs::write(path, contents).map_err(io_error(path))?;
    debug!("wrote alignment of length {} to {}", alignment.len(), path.display());
    Ok(())
}

/// Compares two alignment files written by [`write_alignment`]
pub fn verify(expected: impl AsRef<Path>, actual: impl AsRef<Path>) -> Result<bool> {
    let read = |path: &Path| -> Result<Vec<u8>> {
        let contents = fs::read(path).map_err(io_error(path))?;
        if contents.is_empty() {
            return Err(Error::EmptyAlignmentFile(path.to_path_buf()));
        }
        Ok(contents)
    };

    let expected = expected.as_ref();
    let actual = actual.as_ref();
    let same = read(expected)? == read(actual)?;
    if !same {
        debug!("{} differs from {}", actual.display(), expected.display());
    }
    Ok(same)
}

#[cfg(test)]
mod tests {
    use tempdir::TempDir;

    use super::*;

    fn alignment(x: &[u8], y: &[u8]) -> Alignment {
        Alignment {
            x_aligned: x.to_vec(),
            y_aligned: y.to_vec(),
            score: 0.0,
            matches: 0,
            mismatches: 0,
            gaps: 0,
        }
    }

    #[test]
    fn test_read_sequence_strips_whitespace() {
        let dir = TempDir::new("wavealign").unwrap();
        let path = dir.path().join("X.txt");
        fs::write(&path, "GATT\nACA\r\n  \n").unwrap();

        assert_eq!(read_sequence(&path).unwrap(), b"GATTACA");
    }

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new("wavealign").unwrap();
        let err = read_sequence(dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let dir = TempDir::new("wavealign").unwrap();
        let path = dir.path().join("output").join("aligned.txt");

        write_alignment(&path, &alignment(b"ACGT", b"A-GT")).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "ACGT\nA-GT\n");
    }

    #[test]
    fn test_verify() {
        let dir = TempDir::new("wavealign").unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        let c = dir.path().join("c.txt");
        let empty = dir.path().join("empty.txt");

        write_alignment(&a, &alignment(b"ACGT", b"A-GT")).unwrap();
        write_alignment(&b, &alignment(b"ACGT", b"A-GT")).unwrap();
        write_alignment(&c, &alignment(b"ACGT", b"AG-T")).unwrap();
        fs::write(&empty, "").unwrap();

        assert!(verify(&a, &b).unwrap());
        assert!(!verify(&a, &c).unwrap());
        assert!(matches!(
            verify(&a, &empty),
            Err(Error::EmptyAlignmentFile(_))
        ));
    }
}
