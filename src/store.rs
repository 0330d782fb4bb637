use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read (word, score) pairs from a CSV file.
pub fn load(path: &Path) -> Result<Vec<(String, f64)>, StoreError> {
    let file = File::open(path)?;
    read_pairs(file)
}

/// Write (word, score) pairs to a CSV file, overwriting it.
pub fn save(path: &Path, pairs: &[(String, f64)]) -> Result<(), StoreError> {
    let file = File::create(path)?;
    write_pairs(file, pairs)
}

/// Parse headerless `word,score` rows. Words are trimmed and lowercased,
/// a missing or bad score becomes 0.0. Blank lines and rows that aren't
/// valid UTF-8 are skipped.
pub fn read_pairs<R: Read>(r: R) -> Result<Vec<(String, f64)>, StoreError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(r);

    let mut out = Vec::new();
    for result in reader.byte_records() {
        let record = match csv::StringRecord::from_byte_record(result?) {
            Ok(r) => r,
            Err(e) => {
                log::debug!("skipping row: {}", e);
                continue;
            }
        };
        if record.is_empty() {
            continue;
        }

        let word = record.get(0).unwrap_or("").trim().to_lowercase();
        let score = record
            .get(1)
            .and_then(|s| s.trim().parse::<f64>().ok())
            .unwrap_or(0.0);

        out.push((word, score));
    }

    Ok(out)
}

/// Write headerless `word,score` rows.
pub fn write_pairs<W: Write>(w: W, pairs: &[(String, f64)]) -> Result<(), StoreError> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(w);

    for (word, score) in pairs {
        // Debug keeps the decimal point on whole numbers (5.0, not 5).
        let score = format!("{:?}", score);
        writer.write_record([word.as_str(), score.as_str()])?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_normalizes_and_defaults() {
        let data = "Apple,3.5\n  Banana ,\ncherry\n\nDATE,oops\nelder, 2 ,extra\n";
        let pairs = read_pairs(data.as_bytes()).unwrap();

        assert_eq!(
            pairs,
            vec![
                ("apple".to_string(), 3.5),
                ("banana".to_string(), 0.0),
                ("cherry".to_string(), 0.0),
                ("date".to_string(), 0.0),
                ("elder".to_string(), 2.0),
            ]
        );
    }

    #[test]
    fn read_skips_invalid_utf8_row() {
        let data: &[u8] = b"good,1
\xFF\xFEbad,2
also,3
";
        let pairs = read_pairs(data).unwrap();

        assert_eq!(
            pairs,
            vec![("good".to_string(), 1.0), ("also".to_string(), 3.0)]
        );
    }

    #[test]
    fn read_quoted_field() {
        let pairs = read_pairs("\"new york\",1.5\n".as_bytes()).unwrap();
        assert_eq!(pairs, vec![("new york".to_string(), 1.5)]);
    }

    #[test]
    fn write_format() {
        let mut buf = Vec::new();
        write_pairs(
            &mut buf,
            &[("ant".to_string(), 5.0), ("bee".to_string(), -0.25)],
        )
        .unwrap();

        assert_eq!(String::from_utf8(buf).unwrap(), "ant,5.0\nbee,-0.25\n");
    }

    #[test]
    fn write_then_read() {
        let pairs = vec![("a,b".to_string(), 1.0), ("c".to_string(), 2.5)];
        let mut buf = Vec::new();
        write_pairs(&mut buf, &pairs).unwrap();

        assert_eq!(read_pairs(buf.as_slice()).unwrap(), pairs);
    }

    #[test]
    fn load_missing_file() {
        let path = std::env::temp_dir().join("wordtrie-no-such-file.csv");
        assert!(matches!(load(&path), Err(StoreError::Io(_))));
    }

    #[test]
    fn save_and_load_file() {
        let path = std::env::temp_dir().join(format!("wordtrie-store-{}.csv", std::process::id()));
        let pairs = vec![("x".to_string(), 1.0), ("y".to_string(), 0.0)];

        save(&path, &pairs).unwrap();
        assert_eq!(load(&path).unwrap(), pairs);
        std::fs::remove_file(&path).unwrap();
    }
}
