//! Fact providers

use super::errors::ProviderError;
use matrix_core::facts::validate_fact;
use matrix_core::logging::codes;
use matrix_core::{AvailabilityFact, FactStore, Hosting, ServiceStatus};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Source of availability facts
pub trait FactProvider: Send + Sync {
    /// Human-readable origin, used in log and error messages
    fn source_name(&self) -> String;

    fn load_facts(&self) -> Result<Vec<AvailabilityFact>, ProviderError>;

    /// Load and index the facts, rejecting duplicates
    fn load_store(&self) -> Result<FactStore, ProviderError> {
        let facts = self.load_facts()?;
        let store = FactStore::from_facts(facts)?;

        matrix_core::log_success!(
            codes::success::FACTS_LOADED,
            "Availability facts loaded",
            "source" => self.source_name(),
            "facts" => store.len()
        );
        Ok(store)
    }
}

fn validate_all(facts: &[AvailabilityFact]) -> Result<(), ProviderError> {
    for fact in facts {
        validate_fact(fact)?;
    }
    Ok(())
}

// ============================================================================
// STATIC
// ============================================================================

/// In-memory facts
#[derive(Debug, Clone, Default)]
pub struct StaticFactProvider {
    facts: Vec<AvailabilityFact>,
}

impl StaticFactProvider {
    pub fn new(facts: Vec<AvailabilityFact>) -> Self {
        Self { facts }
    }
}

impl FactProvider for StaticFactProvider {
    fn source_name(&self) -> String {
        "static".to_string()
    }

    fn load_facts(&self) -> Result<Vec<AvailabilityFact>, ProviderError> {
        validate_all(&self.facts)?;
        Ok(self.facts.clone())
    }
}

// ============================================================================
// JSON
// ============================================================================

/// Parse a JSON array of facts
pub fn parse_json_facts(
    content: &str,
    source_name: &str,
) -> Result<Vec<AvailabilityFact>, ProviderError> {
    let facts: Vec<AvailabilityFact> =
        serde_json::from_str(content).map_err(|e| ProviderError::Json {
            source_name: source_name.to_string(),
            reason: e.to_string(),
        })?;
    validate_all(&facts)?;
    Ok(facts)
}

/// JSON file holding an array of facts
#[derive(Debug, Clone)]
pub struct JsonFactProvider {
    path: PathBuf,
}

impl JsonFactProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FactProvider for JsonFactProvider {
    fn source_name(&self) -> String {
        self.path.display().to_string()
    }

    fn load_facts(&self) -> Result<Vec<AvailabilityFact>, ProviderError> {
        let content =
            std::fs::read_to_string(&self.path).map_err(|e| ProviderError::io(&self.path, e))?;
        parse_json_facts(&content, &self.source_name())
    }
}

// ============================================================================
// CSV
// ============================================================================

/// Column positions of a fact sheet; header names are case-insensitive
struct CsvColumns {
    region: usize,
    service: usize,
    language: usize,
    status: usize,
    hosting: Option<usize>,
}

impl CsvColumns {
    fn from_headers(headers: &csv::StringRecord, source_name: &str) -> Result<Self, ProviderError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let require = |name: &str| {
            find(name).ok_or_else(|| ProviderError::MissingColumn {
                source_name: source_name.to_string(),
                column: name.to_string(),
            })
        };

        Ok(Self {
            region: require("Region")?,
            service: require("Service")?,
            language: require("Language")?,
            status: require("Status")?,
            hosting: find("Hosting"),
        })
    }
}

/// Parse a fact sheet with columns `Region,Service,Language,Status[,Hosting]`.
/// Extra columns (such as a lookup key) are ignored; an empty hosting cell
/// means no hosting attribute.
pub fn parse_csv_facts(
    content: &str,
    source_name: &str,
) -> Result<Vec<AvailabilityFact>, ProviderError> {
    let mut reader = csv::Reader::from_reader(content.as_bytes());
    let columns = CsvColumns::from_headers(reader.headers()?, source_name)?;
    let mut facts = Vec::new();

    for result in reader.records() {
        let record = result?;
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let invalid = |reason: String| ProviderError::InvalidRecord {
            source_name: source_name.to_string(),
            line,
            reason,
        };
        let field = |index: usize| record.get(index).unwrap_or("").trim();

        let status: ServiceStatus = field(columns.status).parse().map_err(invalid)?;
        let mut fact = AvailabilityFact::new(
            field(columns.region),
            field(columns.service),
            field(columns.language),
            status,
        );

        if let Some(index) = columns.hosting {
            let raw = field(index);
            if !raw.is_empty() {
                let hosting: Hosting = raw.parse().map_err(invalid)?;
                fact = fact.with_hosting(hosting);
            }
        }

        facts.push(fact);
    }

    validate_all(&facts)?;
    Ok(facts)
}

/// CSV fact sheet
#[derive(Debug, Clone)]
pub struct CsvFactProvider {
    path: PathBuf,
}

impl CsvFactProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FactProvider for CsvFactProvider {
    fn source_name(&self) -> String {
        self.path.display().to_string()
    }

    fn load_facts(&self) -> Result<Vec<AvailabilityFact>, ProviderError> {
        let content =
            std::fs::read_to_string(&self.path).map_err(|e| ProviderError::io(&self.path, e))?;
        parse_csv_facts(&content, &self.source_name())
    }
}

// ============================================================================
// DIRECTORY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FactFormat {
    Json,
    Csv,
}

fn detect_format(path: &Path) -> Option<FactFormat> {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("json") => Some(FactFormat::Json),
        Some("csv") => Some(FactFormat::Csv),
        _ => None,
    }
}

/// Every `.json` and `.csv` file under a directory, in file-name order
#[derive(Debug, Clone)]
pub struct DirectoryFactProvider {
    root: PathBuf,
    recursive: bool,
}

impl DirectoryFactProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            recursive: true,
        }
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Fact files that would be loaded
    pub fn discover(&self) -> Result<Vec<PathBuf>, ProviderError> {
        let mut walker = WalkDir::new(&self.root).sort_by_file_name();
        if !self.recursive {
            walker = walker.max_depth(1);
        }

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| {
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("directory loop detected"));
                ProviderError::io(&self.root, source)
            })?;
            if entry.file_type().is_file() && detect_format(entry.path()).is_some() {
                files.push(entry.into_path());
            }
        }

        if files.is_empty() {
            return Err(ProviderError::NoFactFiles {
                path: self.root.display().to_string(),
            });
        }
        Ok(files)
    }
}

impl FactProvider for DirectoryFactProvider {
    fn source_name(&self) -> String {
        self.root.display().to_string()
    }

    fn load_facts(&self) -> Result<Vec<AvailabilityFact>, ProviderError> {
        let mut facts = Vec::new();

        for path in self.discover()? {
            let loaded = match detect_format(&path) {
                Some(FactFormat::Json) => JsonFactProvider::new(&path).load_facts()?,
                Some(FactFormat::Csv) => CsvFactProvider::new(&path).load_facts()?,
                None => continue,
            };
            matrix_core::log_debug!("Loaded fact file",
                "file" => path.display(),
                "facts" => loaded.len()
            );
            facts.extend(loaded);
        }

        Ok(facts)
    }
}

/// Pick a provider from a path: directories are walked, files are chosen by
/// extension
pub fn fact_provider_for_path(path: &Path) -> Result<Box<dyn FactProvider>, ProviderError> {
    if path.is_dir() {
        return Ok(Box::new(DirectoryFactProvider::new(path)));
    }

    match detect_format(path) {
        Some(FactFormat::Json) => Ok(Box::new(JsonFactProvider::new(path))),
        Some(FactFormat::Csv) => Ok(Box::new(CsvFactProvider::new(path))),
        None => Err(ProviderError::UnsupportedSource {
            path: path.display().to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use matrix_core::FactError;

    const SHEET: &str = "\
Region,Service,Language,Status,Key
USA,ASR,English,Full Support,USA|ASR|English
USA,LLM,English,Limited Support,USA|LLM|English
UAE,ASR,Arabic,Not Supported,UAE|ASR|Arabic
";

    #[test]
    fn test_parse_csv_sheet() {
        let facts = parse_csv_facts(SHEET, "sheet").unwrap();
        assert_eq!(facts.len(), 3);
        assert_eq!(facts[1].status, ServiceStatus::Limited);
        assert_eq!(facts[2].region.as_str(), "UAE");
        assert!(facts.iter().all(|f| f.hosting.is_none()));
    }

    #[test]
    fn test_parse_csv_with_hosting_and_vocabulary_b() {
        let content = "\
region,service,language,status,hosting
Europe,ASR,German,General Availability,Cross-Region
Europe,LLM,German,Limited Availability,
";
        let facts = parse_csv_facts(content, "sheet").unwrap();
        assert_eq!(facts[0].status, ServiceStatus::Full);
        assert_eq!(facts[0].hosting, Some(Hosting::CrossRegion));
        assert_eq!(facts[1].status, ServiceStatus::Limited);
        assert_eq!(facts[1].hosting, None);
    }

    #[test]
    fn test_csv_errors() {
        assert_matches!(
            parse_csv_facts("Region,Service,Language\nUSA,ASR,English\n", "sheet"),
            Err(ProviderError::MissingColumn { column, .. }) if column == "Status"
        );
        assert_matches!(
            parse_csv_facts("Region,Service,Language,Status\nUSA,ASR,English,Maybe\n", "sheet"),
            Err(ProviderError::InvalidRecord { line: 2, .. })
        );
        assert_matches!(
            parse_csv_facts("Region,Service,Language,Status\nUSA,,English,Full\n", "sheet"),
            Err(ProviderError::Fact(FactError::InvalidIdentifier { .. }))
        );
    }

    #[test]
    fn test_parse_json() {
        let content = r#"[
            {"region": "APAC", "service": "ITN", "language": "Hindi", "status": "Full Support", "hosting": "In-Region"},
            {"region": "APAC", "service": "LLM", "language": "Hindi", "status": "Not Supported"}
        ]"#;
        let facts = parse_json_facts(content, "inline").unwrap();
        assert_eq!(facts[0].hosting, Some(Hosting::InRegion));
        assert_eq!(facts[1].status, ServiceStatus::NotSupported);

        assert_matches!(
            parse_json_facts("{not json", "inline"),
            Err(ProviderError::Json { .. })
        );
    }

    #[test]
    fn test_directory_provider() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.csv"), SHEET).unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(
            dir.path().join("nested").join("b.json"),
            r#"[{"region": "Saudi", "service": "ASR", "language": "Arabic", "status": "Full Support"}]"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let provider = DirectoryFactProvider::new(dir.path());
        assert_eq!(provider.discover().unwrap().len(), 2);
        let store = provider.load_store().unwrap();
        assert_eq!(store.len(), 4);

        let shallow = DirectoryFactProvider::new(dir.path()).with_recursive(false);
        assert_eq!(shallow.load_facts().unwrap().len(), 3);
    }

    #[test]
    fn test_duplicates_across_files_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.csv"), SHEET).unwrap();
        std::fs::write(dir.path().join("b.csv"), SHEET).unwrap();

        assert_matches!(
            DirectoryFactProvider::new(dir.path()).load_store(),
            Err(ProviderError::Fact(FactError::DuplicateFact { .. }))
        );
    }

    #[test]
    fn test_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert_matches!(
            DirectoryFactProvider::new(dir.path()).load_facts(),
            Err(ProviderError::NoFactFiles { .. })
        );
    }

    #[test]
    fn test_provider_for_path() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("facts.json");
        std::fs::write(&json, "[]").unwrap();

        assert!(fact_provider_for_path(&json).unwrap().load_facts().unwrap().is_empty());
        assert!(fact_provider_for_path(dir.path()).is_ok());
        assert!(matches!(
            fact_provider_for_path(&dir.path().join("facts.xlsx")),
            Err(ProviderError::UnsupportedSource { .. })
        ));
        assert_matches!(
            JsonFactProvider::new(dir.path().join("missing.json")).load_facts(),
            Err(ProviderError::Io { .. })
        );
    }
}
