//! Static dataset corpora and helpers that write them to disk.

use std::path::PathBuf;

/// A handful of entries shaped like the production dataset. `end_year` is
/// stored the way the real file stores it: a string, empty when unknown.
pub const DATASET_SMALL: &str = r#"[
  {"end_year": "2020", "intensity": 6, "sector": "Energy", "topic": "gas",
   "insight": "Annual Energy Outlook", "region": "Northern America",
   "pestle": "Industries", "source": "EIA", "swot": "", "country": "United States of America",
   "city": "", "relevance": 2, "likelihood": 3},
  {"end_year": "", "intensity": 6, "sector": "Energy", "topic": "oil",
   "insight": "Middle East oil output", "region": "Western Asia",
   "pestle": "Industries", "source": "sustainabilityof", "swot": "", "country": "Saudi Arabia",
   "city": "", "relevance": 2, "likelihood": 3},
  {"end_year": "2030", "intensity": 2, "sector": "Manufacturing", "topic": "economy",
   "insight": "Factory automation outlook", "region": "Europe",
   "pestle": "Economic", "source": "Reuters", "swot": "", "country": "Germany",
   "city": "Berlin", "relevance": 1, "likelihood": 2},
  {"end_year": 2030, "intensity": 4, "sector": "Energy", "topic": "oil",
   "insight": "North Sea decline", "region": "Europe",
   "pestle": "Economic", "source": "Reuters", "swot": "", "country": "Norway",
   "city": "", "relevance": 3, "likelihood": 3}
]"#;

/// Number of entries in [`DATASET_SMALL`].
pub const DATASET_SMALL_LEN: usize = 4;

/// The single-entry dataset from the end-to-end scenario.
pub const DATASET_SCENARIO: &str = r#"[{"end_year":"2020","topic":"energy","sector":"oil"}]"#;

/// A temporary directory holding one dataset file. The directory is removed
/// when this value is dropped.
pub struct DatasetFile {
    pub dir: tempfile::TempDir,
    pub path: PathBuf,
}

/// Write `bytes` to `jsondata.json` in a fresh temporary directory.
pub fn dataset_file(bytes: impl AsRef<[u8]>) -> DatasetFile {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("jsondata.json");
    std::fs::write(&path, bytes).expect("write dataset");
    DatasetFile { dir, path }
}

/// Parse a JSON array literal into the records it contains.
pub fn records_of(json: &str) -> Vec<insights::Record> {
    let value: serde_json::Value = serde_json::from_str(json).expect("fixture is valid JSON");
    value
        .as_array()
        .expect("fixture is an array")
        .iter()
        .map(|v| v.as_object().cloned().expect("fixture element is an object"))
        .collect()
}
