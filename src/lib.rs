//! TailMotion: motion utilities for Tailwind CSS.
//!
//! The animation helpers ([`animate_value`], [`create_text_rotator`], the
//! easing table and the class/style builders) are framework-agnostic and run
//! on any [`Scheduler`]. The DOM adapters drive a headless [`Element`] tree.
//! The build side bundles the stylesheet and renders the `tm-*` utilities.

pub mod adapters;
pub mod animate;
pub mod args;
pub mod bundler;
pub mod catalog;
pub mod classes;
pub mod config;
pub mod dom;
pub mod easing;
pub mod errors;
pub mod manifest;
pub mod plugin;
pub mod rotator;
pub mod scheduler;
pub mod style;
pub mod text;

#[cfg(feature = "cli")]
pub mod preview;
#[cfg(feature = "cli")]
pub mod runtime;

pub use adapters::{init_count_reveal_element, init_text_flip_element, FlipVariant, TextFlipOptions};
pub use animate::{animate_value, AnimateValueOptions, CancelHandle};
pub use args::{BuildArgs, Cli, Commands};
pub use classes::{tm, TmModifiers};
pub use config::{BuildConfig, TailmotionConfig};
pub use dom::{replay_animation, Element};
pub use easing::{get_easing, Easing};
pub use errors::{MotionError, Result};
pub use manifest::{Manifest, ManifestBuilder};
pub use plugin::{resolve_tokens, MotionTokens};
pub use rotator::{create_text_rotator, FlipEvent, TextRotator, TextRotatorOptions};
pub use scheduler::{Scheduler, TaskId, VirtualClock};
pub use style::{css_vars, stagger_style, CssValue, StyleMap};
pub use text::{create_count_spans, format_number, CountSpan, CountSpanOptions};

#[cfg(feature = "cli")]
pub use runtime::TokioScheduler;

use crate::args::{ClassArgs, CountRevealArgs, TextFlipArgs, UtilitiesArgs};
use crate::bundler::Inliner;
use crate::catalog::Category;
use chrono::Utc;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Result of a build
#[derive(Debug)]
pub struct BuildResult {
    /// Final stylesheet text, banner included
    pub css_content: String,
    pub manifest: Manifest,
    pub output_path: PathBuf,
    pub manifest_path: Option<PathBuf>,
    pub package_version: String,
    pub duration: Duration,
}

/// Load the configuration file if one was given
pub fn load_config(path: Option<&Path>) -> Result<TailmotionConfig> {
    match path {
        Some(path) => TailmotionConfig::from_file(path),
        None => Ok(TailmotionConfig::default()),
    }
}

fn resolve_in(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Bundle the stylesheet
pub async fn build(args: BuildArgs) -> Result<BuildResult> {
    let start_time = Instant::now();

    args.validate().map_err(MotionError::InvalidInput)?;

    let config = load_config(args.config.as_deref())?;
    let entry = args.entry.clone().unwrap_or(config.build.entry);
    let output = args.output.clone().unwrap_or(config.build.output);
    let manifest_target = args.manifest.clone().or(config.build.manifest);
    let minify = args.minify || config.build.minify;

    let output_path = resolve_in(&args.root, &output);
    let manifest_path = manifest_target.map(|path| resolve_in(&args.root, &path));

    if args.verbose {
        eprintln!("Starting TailMotion build...");
        eprintln!("Root: {}", args.root.display());
        eprintln!("Entry: {}", entry.display());
        eprintln!("Output CSS: {}", output_path.display());
        if let Some(path) = &manifest_path {
            eprintln!("Output manifest: {}", path.display());
        }
    }

    let package_version = config
        .build
        .version
        .clone()
        .unwrap_or_else(|| bundler::read_package_version(&args.root));

    let inlined = Inliner::new(&args.root).inline(&entry)?;
    if args.verbose {
        eprintln!("Inlined {} partials", inlined.partials.len());
    }

    let (css, generators) = bundler::process_generators(&inlined.css)?;
    if args.verbose {
        for generator in &generators {
            eprintln!("  - @generate:{} x{}", generator.name, generator.count);
        }
    }

    let banner = bundler::banner(&package_version, Utc::now());
    let bundled = bundler::assemble(&banner, &css);
    let css_size = bundled.len();

    let css_content = if minify {
        format!("{}\n", bundler::minify_css(&bundled))
    } else {
        bundled
    };
    let minified_size = minify.then_some(css_content.len());

    let manifest = ManifestBuilder::new()
        .with_entry(entry.display().to_string())
        .with_package_version(package_version.clone())
        .with_minified(minify)
        .with_partials(
            inlined
                .partials
                .into_iter()
                .map(|partial| (partial.path, partial.bytes, partial.imported_from)),
        )
        .with_generators(generators)
        .build(css_size, minified_size);

    let result = BuildResult {
        css_content,
        manifest,
        output_path,
        manifest_path,
        package_version,
        duration: start_time.elapsed(),
    };

    if !args.dry_run {
        write_output_files(&result)?;
    }

    if args.verbose {
        eprintln!("\nBuild complete:");
        eprintln!("  - Version: {}", result.package_version);
        eprintln!("  - CSS size: {} bytes", css_size);
        if let Some(size) = minified_size {
            eprintln!("  - Minified size: {} bytes", size);
        }
        eprintln!("  - Total time: {:.2}s", result.duration.as_secs_f64());
    }

    Ok(result)
}

/// Write the build results with atomic writes
fn write_output_files(result: &BuildResult) -> Result<()> {
    write_output(&result.output_path, &result.css_content)?;

    if let Some(path) = &result.manifest_path {
        let manifest_content = result.manifest.to_pretty_json()?;
        write_output(path, &manifest_content)?;
    }

    Ok(())
}

/// Create parent directories and write `content` atomically
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    write_atomic(path, content).map_err(|e| MotionError::OutputError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Write file atomically by writing to temp file then renaming
fn write_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    use std::fs;
    use std::io::Write;

    let mut temp_path = path.as_os_str().to_owned();
    temp_path.push(".tmp");
    let temp_path = PathBuf::from(temp_path);

    let mut file = fs::File::create(&temp_path)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()?;

    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Render the utility stylesheet; writes it when an output path is given.
pub fn utilities(args: &UtilitiesArgs) -> Result<String> {
    let config = load_config(args.config.as_deref())?;
    let css = plugin::render_utilities(&config.resolved_tokens());
    if let Some(output) = &args.output {
        write_output(output, &css)?;
    }
    Ok(css)
}

/// Plain decimal text becomes a number so that `0` is skipped like in JS.
fn modifier_value(raw: &str) -> CssValue {
    let numeric = !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit() || c == '.' || c == '-');
    match raw.parse::<f64>() {
        Ok(n) if numeric => CssValue::Number(n),
        _ => CssValue::from(raw),
    }
}

/// Class string for the `class` command. Unknown animations are allowed but
/// logged.
pub fn class_string(args: &ClassArgs) -> String {
    if catalog::find(&args.animation).is_none() {
        tracing::warn!(animation = %args.animation, "not a shipped animation");
    }

    let mut modifiers = TmModifiers::new();
    modifiers.duration = args.duration.as_deref().map(modifier_value);
    modifiers.delay = args.delay.as_deref().map(modifier_value);
    modifiers.repeat = args.repeat.as_deref().map(modifier_value);
    modifiers.ease = args.ease.as_deref().map(modifier_value);
    tm(&args.animation, &modifiers)
}

/// Catalog listing, one animation per line.
pub fn list_animations(category: Option<Category>) -> String {
    let mut out = String::new();
    for animation in catalog::ANIMATIONS
        .iter()
        .filter(|animation| category.map_or(true, |c| animation.category == c))
    {
        let badge = animation.badge.map(|b| format!("[{}]", b)).unwrap_or_default();
        let _ = writeln!(
            out,
            "{:<18} {:<13} {:>4.1} KB {}",
            animation.name, animation.category, animation.size_kb, badge
        );
    }
    out
}

/// HTML of a count-reveal element built from `text`.
pub fn render_count_reveal(args: &CountRevealArgs) -> String {
    let element = Element::with_text("span", &args.text);
    init_count_reveal_element(&element, CountSpanOptions { stagger: args.stagger });
    element.to_html()
}

/// Snapshots of a text-flip element under a virtual clock, as
/// `(time in ms, html)`: the initial state, then one per flip.
pub fn render_text_flip(args: &TextFlipArgs) -> Result<Vec<(f64, String)>> {
    args.validate().map_err(MotionError::InvalidInput)?;

    let clock = Rc::new(VirtualClock::new());
    let element = Element::new("span");
    let options = TextFlipOptions::new(args.words.iter().cloned())
        .variant(args.variant)
        .duration(args.duration)
        .interval(args.interval);
    let rotator = init_text_flip_element(clock.clone(), &element, options)
        .ok_or_else(|| MotionError::InvalidInput("text flip needs at least two words".to_string()))?;

    let mut frames = vec![(clock.now(), element.to_html())];
    for _ in 0..args.flips {
        clock.advance(args.interval);
        frames.push((clock.now(), element.to_html()));
    }
    rotator.destroy();

    Ok(frames)
}
