//! CLI command implementations.

pub(crate) mod convert;
pub(crate) mod footer;
pub(crate) mod links;

pub(crate) use convert::ConvertArgs;
pub(crate) use footer::FooterArgs;
pub(crate) use links::LinksArgs;

use std::io::{Read, Write};
use std::path::Path;

/// Read a whole input document.
///
/// `None` or `-` reads standard input.
fn read_input(path: Option<&Path>) -> std::io::Result<Vec<u8>> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read(path),
        _ => {
            let mut buf = Vec::new();
            std::io::stdin().lock().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Write a document to `path`, or to standard output when `None`.
fn write_output(path: Option<&Path>, content: &str) -> std::io::Result<()> {
    match path {
        Some(path) => std::fs::write(path, content),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
            stdout.flush()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_input_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("post.txt");
        std::fs::write(&path, "h1. Title").unwrap();

        assert_eq!(read_input(Some(&path)).unwrap(), b"h1. Title");
    }

    #[test]
    fn test_read_input_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_input(Some(&dir.path().join("missing.txt"))).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn test_write_output_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("post.html");
        write_output(Some(&path), "<p>x</p>").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<p>x</p>");
    }
}
