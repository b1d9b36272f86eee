// Input file decoding

use std::io::Read;
use std::path::Path;

use log::warn;

/// Read file and convert to UTF-8 if needed.
///
/// Registry and terminal exports come either as UTF-8 (often with a BOM, which
/// is kept for the CSV loader to strip) or as Windows-1251 from Excel.
pub fn read_file_as_utf8(path: &Path) -> Result<String, String> {
    let mut file = std::fs::File::open(path)
        .map_err(|e| format!("cannot open {}: {e}", path.display()))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;

    Ok(decode_bytes(bytes, path))
}

fn decode_bytes(bytes: Vec<u8>, path: &Path) -> String {
    // Try UTF-8 first; on failure, recover the buffer from the error
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            warn!("{}: not valid UTF-8, decoding as Windows-1251", path.display());
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1251.decode(&bytes);
            decoded.into_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn utf8_passes_through() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("utf8.csv");
        fs::write(&path, "\u{feff}Адрес;Номер\n").unwrap();
        assert_eq!(read_file_as_utf8(&path).unwrap(), "\u{feff}Адрес;Номер\n");
    }

    #[test]
    fn windows_1251_fallback() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cp1251.csv");
        let (encoded, _, _) = encoding_rs::WINDOWS_1251.encode("москва, ул ленина");
        fs::write(&path, &encoded).unwrap();
        assert_eq!(read_file_as_utf8(&path).unwrap(), "москва, ул ленина");
    }

    #[test]
    fn missing_file_names_path() {
        let err = read_file_as_utf8(Path::new("/nonexistent/fns.csv")).unwrap_err();
        assert!(err.contains("/nonexistent/fns.csv"));
    }
}
