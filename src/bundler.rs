//! Stylesheet bundling: `@import` inlining, `@generate` expansion, banner and
//! minification.

use crate::errors::{MotionError, Result};
use crate::manifest::GeneratorInfo;
use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, warn};

static IMPORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"@import\s+["'](.+?)["'];?"#).expect("valid import pattern"));

static GENERATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/\*\s*@generate:(\w+[-\w]*):(\d+)\s*\*/").expect("valid generator pattern")
});

/// Version used when `package.json` is missing or has none.
pub const FALLBACK_VERSION: &str = "0.0.0";

/// A partial inlined while bundling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlinedPartial {
    /// Path relative to the root, `/`-separated
    pub path: String,
    pub bytes: usize,
    /// Importing file relative to the root; `None` for imports made by the
    /// entry itself
    pub imported_from: Option<String>,
}

/// Result of [`Inliner::inline`].
#[derive(Debug, Clone, Default)]
pub struct InlineOutcome {
    pub css: String,
    pub partials: Vec<InlinedPartial>,
}

/// Recursive `@import` inliner.
///
/// Tracks the chain of files currently being inlined; a file that shows up
/// in its own chain is a cycle. The same file reached through two different
/// branches is inlined twice.
pub struct Inliner {
    root: PathBuf,
    stack: Vec<PathBuf>,
    partials: Vec<InlinedPartial>,
}

impl Inliner {
    pub fn new(root: &Path) -> Self {
        Self {
            root: absolutize(root),
            stack: Vec::new(),
            partials: Vec::new(),
        }
    }

    /// Inline `entry` and everything it imports.
    pub fn inline(mut self, entry: &Path) -> Result<InlineOutcome> {
        let entry = if entry.is_absolute() {
            normalize(entry)
        } else {
            normalize(&self.root.join(entry))
        };
        let css = self.inline_file(&entry)?;
        Ok(InlineOutcome {
            css,
            partials: self.partials,
        })
    }

    fn inline_file(&mut self, path: &Path) -> Result<String> {
        if self.stack.iter().any(|open| open == path) {
            return Err(MotionError::CircularImport {
                path: path.display().to_string(),
            });
        }

        let css = std::fs::read_to_string(path).map_err(|e| MotionError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        self.stack.push(path.to_path_buf());

        let base = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let importer = (self.stack.len() > 1).then(|| self.relative(path));

        let mut bundled = String::with_capacity(css.len());
        let mut cursor = 0;
        for captures in IMPORT_RE.captures_iter(&css) {
            let (Some(statement), Some(target)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            bundled.push_str(&css[cursor..statement.start()]);

            let resolved = normalize(&base.join(target.as_str()));
            let nested = self.inline_file(&resolved)?;
            let relative = self.relative(&resolved);
            debug!(partial = %relative, "inlined import");

            self.partials.push(InlinedPartial {
                path: relative.clone(),
                bytes: std::fs::metadata(&resolved).map(|m| m.len() as usize).unwrap_or(0),
                imported_from: importer.clone(),
            });
            bundled.push_str(&format!("\n/* --- {} --- */\n{}\n", relative, nested));

            cursor = statement.end();
        }
        bundled.push_str(&css[cursor..]);

        self.stack.pop();
        Ok(bundled.trim_end().to_string())
    }

    fn relative(&self, path: &Path) -> String {
        relative_display(path, &self.root)
    }
}

/// Inline `path` relative to `root` and return the bundled CSS.
pub fn inline_css(path: &Path, root: &Path) -> Result<String> {
    Inliner::new(root).inline(path).map(|outcome| outcome.css)
}

/// Rules for the `stagger-indices` generator.
pub fn stagger_indices(count: usize) -> String {
    (0..count)
        .map(|i| format!(".tm-stagger > *:nth-child({}) {{ --tm-stagger-index: {}; }}", i + 1, i))
        .collect::<Vec<_>>()
        .join("\n  ")
}

fn run_generator(name: &str, count: usize) -> Option<String> {
    match name {
        "stagger-indices" => Some(stagger_indices(count)),
        _ => None,
    }
}

/// Expand every `/* @generate:<name>:<count> */` marker in `css`.
///
/// Unknown generators are replaced by a comment naming them.
pub fn process_generators(css: &str) -> Result<(String, Vec<GeneratorInfo>)> {
    let mut output = String::with_capacity(css.len());
    let mut expansions = Vec::new();
    let mut cursor = 0;

    for captures in GENERATE_RE.captures_iter(css) {
        let (Some(marker), Some(name), Some(count)) = (captures.get(0), captures.get(1), captures.get(2)) else {
            continue;
        };
        let name = name.as_str();
        let count: usize = count.as_str().parse().map_err(|_| {
            MotionError::InvalidInput(format!("generator count out of range in {}", marker.as_str()))
        })?;

        output.push_str(&css[cursor..marker.start()]);
        match run_generator(name, count) {
            Some(rules) => {
                debug!(generator = name, count, "expanded generator");
                output.push_str(&rules);
                expansions.push(GeneratorInfo { name: name.to_string(), count, known: true });
            }
            None => {
                warn!("Unknown generator: {}", name);
                output.push_str(&format!("/* Unknown generator: {} */", name));
                expansions.push(GeneratorInfo { name: name.to_string(), count, known: false });
            }
        }
        cursor = marker.end();
    }
    output.push_str(&css[cursor..]);

    Ok((output, expansions))
}

/// `/* TailMotion v<version> | Generated <timestamp> */`
pub fn banner(version: &str, generated_at: DateTime<Utc>) -> String {
    format!(
        "/* TailMotion v{} | Generated {} */",
        version,
        generated_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    )
}

/// The `version` field of `<root>/package.json`, or [`FALLBACK_VERSION`].
pub fn read_package_version(root: &Path) -> String {
    let manifest = root.join("package.json");
    let version = std::fs::read_to_string(&manifest)
        .ok()
        .and_then(|raw| serde_json::from_str::<serde_json::Value>(&raw).ok())
        .and_then(|json| json.get("version").and_then(|v| v.as_str()).map(str::to_string))
        .filter(|version| !version.is_empty());

    match version {
        Some(version) => version,
        None => {
            debug!(path = %manifest.display(), "no package version, using fallback");
            FALLBACK_VERSION.to_string()
        }
    }
}

/// Final stylesheet text: banner, newline, css, newline.
pub fn assemble(banner: &str, css: &str) -> String {
    format!("{}\n{}\n", banner, css)
}

/// Strip comments and redundant whitespace. A comment at the very start of
/// the input (the banner) is kept.
pub fn minify_css(css: &str) -> String {
    let chars: Vec<char> = css.chars().collect();
    let mut result = String::with_capacity(css.len());
    let mut prev_char = ' ';
    let mut i = 0;

    // Whitespace after these is dropped. Before `:` it may be a descendant
    // combinator (`.card :hover`), so only the other characters absorb it.
    let tight_after = |c: char| matches!(c, '{' | '}' | ';' | ':' | ',' | '>');
    let tight_before = |c: char| matches!(c, '{' | '}' | ';' | ',' | '>');

    while i < chars.len() {
        let ch = chars[i];

        if ch == '/' && chars.get(i + 1) == Some(&'*') {
            let leading = result.is_empty();
            let start = i;
            i += 2;
            while i < chars.len() && !(chars[i] == '*' && chars.get(i + 1) == Some(&'/')) {
                i += 1;
            }
            i = (i + 2).min(chars.len());
            if leading {
                result.extend(&chars[start..i]);
                // Banner ends like a rule
                prev_char = '}';
            }
            continue;
        }

        if ch == '"' || ch == '\'' {
            result.push(ch);
            i += 1;
            while i < chars.len() {
                result.push(chars[i]);
                if chars[i] == '\\' && i + 1 < chars.len() {
                    result.push(chars[i + 1]);
                    i += 2;
                    continue;
                }
                if chars[i] == ch {
                    break;
                }
                i += 1;
            }
            prev_char = ch;
            i += 1;
            continue;
        }

        if ch.is_whitespace() {
            let run_end = chars[i..]
                .iter()
                .position(|c| !c.is_whitespace())
                .map_or(chars.len(), |offset| i + offset);
            let next = chars.get(run_end).copied();
            let keep = !result.is_empty()
                && !prev_char.is_whitespace()
                && !tight_after(prev_char)
                && next.is_some_and(|n| !tight_before(n) && !(n == '/' && prev_char == '/'));
            if keep {
                result.push(' ');
                prev_char = ' ';
            }
            i = run_end;
            continue;
        }

        if ch == '}' && result.ends_with(';') {
            result.pop();
        }
        result.push(ch);
        prev_char = ch;
        i += 1;
    }

    result
}

/// Make `path` absolute against the current directory and normalize it.
fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        let cwd = std::env::current_dir().unwrap_or_default();
        normalize(&cwd.join(path))
    }
}

/// Resolve `.` and `..` lexically.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

fn relative_display(path: &Path, root: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
