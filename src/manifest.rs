use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Metadata for the build manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestMetadata {
    /// Version of the manifest format
    pub version: String,

    /// Timestamp when the bundle was built
    pub generated_at: DateTime<Utc>,

    /// Version of the tool that built the bundle
    pub tool_version: String,

    /// Version written into the stylesheet banner
    pub package_version: String,

    /// Entry stylesheet, relative to the root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,

    /// Whether the output was minified
    pub minified: bool,
}

/// One inlined partial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartialInfo {
    /// Size of the partial as read from disk
    pub bytes: usize,

    /// Importing file, relative to the root; `None` for the entry's direct
    /// imports
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imported_from: Option<String>,

    /// How many times the partial was inlined
    pub times_inlined: usize,
}

/// One `@generate` marker expansion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorInfo {
    pub name: String,
    pub count: usize,
    /// `false` when the marker named an unknown generator
    pub known: bool,
}

/// Complete build manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub metadata: ManifestMetadata,

    /// Inlined partials keyed by path relative to the root, in inline order
    pub partials: IndexMap<String, PartialInfo>,

    /// Generator expansions in source order
    pub generators: Vec<GeneratorInfo>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<ManifestStatistics>,
}

/// Output statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestStatistics {
    /// Bundled CSS size in bytes, banner included
    pub css_size_bytes: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub minified_size_bytes: Option<usize>,

    pub partials_inlined: usize,

    pub rules_generated: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_time_ms: Option<u64>,
}

impl Manifest {
    pub fn new() -> Self {
        Self {
            metadata: ManifestMetadata {
                version: "1.0.0".to_string(),
                generated_at: Utc::now(),
                tool_version: env!("CARGO_PKG_VERSION").to_string(),
                package_version: "0.0.0".to_string(),
                entry: None,
                minified: false,
            },
            partials: IndexMap::new(),
            generators: Vec::new(),
            statistics: None,
        }
    }

    /// Record an inlined partial. Repeat inlines (diamond imports) bump the
    /// counter and keep the first importer.
    pub fn add_partial(&mut self, path: String, bytes: usize, imported_from: Option<String>) {
        let entry = self.partials.entry(path).or_insert_with(|| PartialInfo {
            bytes,
            imported_from,
            times_inlined: 0,
        });
        entry.times_inlined += 1;
    }

    pub fn add_generator(&mut self, generator: GeneratorInfo) {
        self.generators.push(generator);
    }

    pub fn calculate_statistics(
        &mut self,
        css_size: usize,
        minified_size: Option<usize>,
        processing_time_ms: Option<u64>,
    ) {
        let rules_generated = self
            .generators
            .iter()
            .filter(|generator| generator.known)
            .map(|generator| generator.count)
            .sum();

        self.statistics = Some(ManifestStatistics {
            css_size_bytes: css_size,
            minified_size_bytes: minified_size,
            partials_inlined: self.partials.values().map(|p| p.times_inlined).sum(),
            rules_generated,
            processing_time_ms,
        });
    }

    /// Convert manifest to JSON value
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({}))
    }

    /// Convert manifest to pretty JSON string
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Default for Manifest {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder pattern for creating manifests
pub struct ManifestBuilder {
    manifest: Manifest,
    start_time: Option<std::time::Instant>,
}

impl ManifestBuilder {
    pub fn new() -> Self {
        Self {
            manifest: Manifest::new(),
            start_time: Some(std::time::Instant::now()),
        }
    }

    pub fn with_entry(mut self, entry: String) -> Self {
        self.manifest.metadata.entry = Some(entry);
        self
    }

    pub fn with_package_version(mut self, version: String) -> Self {
        self.manifest.metadata.package_version = version;
        self
    }

    pub fn with_minified(mut self, minified: bool) -> Self {
        self.manifest.metadata.minified = minified;
        self
    }

    /// Add partial records as `(path, bytes, importer)`
    pub fn with_partials<I>(mut self, partials: I) -> Self
    where
        I: IntoIterator<Item = (String, usize, Option<String>)>,
    {
        for (path, bytes, imported_from) in partials {
            self.manifest.add_partial(path, bytes, imported_from);
        }
        self
    }

    pub fn with_generators(mut self, generators: Vec<GeneratorInfo>) -> Self {
        for generator in generators {
            self.manifest.add_generator(generator);
        }
        self
    }

    /// Build the final manifest with statistics
    pub fn build(mut self, css_size: usize, minified_size: Option<usize>) -> Manifest {
        let processing_time = self.start_time.map(|t| t.elapsed().as_millis() as u64);
        self.manifest
            .calculate_statistics(css_size, minified_size, processing_time);
        self.manifest
    }
}

impl Default for ManifestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_creation() {
        let manifest = Manifest::new();
        assert_eq!(manifest.metadata.version, "1.0.0");
        assert_eq!(manifest.metadata.tool_version, env!("CARGO_PKG_VERSION"));
        assert!(manifest.partials.is_empty());
        assert!(!manifest.metadata.minified);
    }

    #[test]
    fn test_diamond_partials_are_counted() {
        let mut manifest = Manifest::new();
        manifest.add_partial("src/base.css".to_string(), 120, None);
        manifest.add_partial("src/tokens.css".to_string(), 40, Some("src/base.css".to_string()));
        manifest.add_partial("src/tokens.css".to_string(), 40, Some("src/utils.css".to_string()));

        assert_eq!(manifest.partials.len(), 2);
        let tokens = &manifest.partials["src/tokens.css"];
        assert_eq!(tokens.times_inlined, 2);
        assert_eq!(tokens.imported_from.as_deref(), Some("src/base.css"));
    }

    #[test]
    fn test_manifest_builder() {
        let manifest = ManifestBuilder::new()
            .with_entry("src/index.css".to_string())
            .with_package_version("0.3.0".to_string())
            .with_minified(true)
            .with_partials(vec![("src/a.css".to_string(), 10, None)])
            .with_generators(vec![
                GeneratorInfo { name: "stagger-indices".to_string(), count: 12, known: true },
                GeneratorInfo { name: "mystery".to_string(), count: 3, known: false },
            ])
            .build(2048, Some(1024));

        assert_eq!(manifest.metadata.package_version, "0.3.0");
        assert!(manifest.metadata.minified);

        let stats = manifest.statistics.unwrap();
        assert_eq!(stats.css_size_bytes, 2048);
        assert_eq!(stats.minified_size_bytes, Some(1024));
        assert_eq!(stats.partials_inlined, 1);
        assert_eq!(stats.rules_generated, 12);
    }

    #[test]
    fn test_json_serialization() {
        let manifest = ManifestBuilder::new().build(10, None);
        let json = manifest.to_json();

        assert_eq!(json["metadata"]["version"], "1.0.0");
        assert!(json["metadata"].get("entry").is_none());
        assert!(json["partials"].is_object());
        assert!(json["statistics"].get("minified_size_bytes").is_none());
    }
}
