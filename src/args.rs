use crate::adapters::FlipVariant;
use crate::catalog::Category;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// TailMotion - motion utilities for Tailwind CSS
#[derive(Parser, Debug)]
#[command(name = "tailmotion")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Whether the invoked subcommand asked for verbose output
    pub fn verbose(&self) -> bool {
        matches!(&self.command, Commands::Build(args) if args.verbose)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Bundle the stylesheet: inline @imports, expand generators, add the banner
    Build(BuildArgs),
    /// Render the tm-duration/delay/ease/repeat utility stylesheet
    Utilities(UtilitiesArgs),
    /// Print the class string for an animation
    Class(ClassArgs),
    /// List the shipped animations
    List(ListArgs),
    /// Run a DOM adapter on a headless element and print the resulting HTML
    #[command(subcommand)]
    Render(RenderCommand),
    /// Play an animator in the terminal
    #[command(subcommand)]
    Preview(PreviewCommand),
}

/// Arguments for the build command
#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    /// Entry stylesheet, relative to the root
    #[arg(
        short = 'e',
        long = "entry",
        value_name = "PATH",
        help = "Entry stylesheet (default: src/index.css)"
    )]
    pub entry: Option<PathBuf>,

    /// Output CSS file path
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Path of the bundled stylesheet (default: tailmotion.css)"
    )]
    pub output: Option<PathBuf>,

    /// Project root
    #[arg(
        short = 'r',
        long = "root",
        value_name = "DIR",
        default_value = ".",
        help = "Directory that holds package.json and the sources"
    )]
    pub root: PathBuf,

    /// Configuration file path
    #[arg(
        short = 'c',
        long = "config",
        value_name = "PATH",
        help = "Path to configuration file (YAML or JSON)"
    )]
    pub config: Option<PathBuf>,

    /// Build manifest path (JSON)
    #[arg(
        short = 'm',
        long = "manifest",
        value_name = "PATH",
        help = "Also write a JSON build manifest to this path"
    )]
    pub manifest: Option<PathBuf>,

    /// Enable CSS minification
    #[arg(
        long = "minify",
        default_value_t = false,
        help = "Enable minification of the output CSS"
    )]
    pub minify: bool,

    /// Dry run (don't write output files)
    #[arg(
        long = "dry-run",
        default_value_t = false,
        help = "Bundle but don't write output files"
    )]
    pub dry_run: bool,

    /// Verbose output
    #[arg(
        short = 'v',
        long = "verbose",
        default_value_t = false,
        help = "Enable verbose output"
    )]
    pub verbose: bool,
}

impl BuildArgs {
    /// Validate that the arguments are consistent
    pub fn validate(&self) -> Result<(), String> {
        if let (Some(entry), Some(output)) = (&self.entry, &self.output) {
            if entry == output {
                return Err("Entry and output paths must be different".to_string());
            }
        }

        if let (Some(manifest), Some(output)) = (&self.manifest, &self.output) {
            if manifest == output {
                return Err("Output CSS and manifest paths must be different".to_string());
            }
        }

        Ok(())
    }
}

/// Arguments for the utilities command
#[derive(Args, Debug, Clone)]
pub struct UtilitiesArgs {
    /// Configuration file with token overrides
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write to a file instead of stdout
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Arguments for the class command
#[derive(Args, Debug, Clone)]
pub struct ClassArgs {
    /// Animation name, e.g. `bounce`
    pub animation: String,

    #[arg(long, value_name = "VALUE")]
    pub duration: Option<String>,

    #[arg(long, value_name = "VALUE")]
    pub delay: Option<String>,

    #[arg(long, value_name = "VALUE")]
    pub repeat: Option<String>,

    #[arg(long, value_name = "VALUE")]
    pub ease: Option<String>,
}

/// Arguments for the list command
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Only show one category
    #[arg(long, value_name = "CATEGORY")]
    pub category: Option<Category>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum RenderCommand {
    /// Split text into staggered character spans
    CountReveal(CountRevealArgs),
    /// Rotate words inside a text-flip container
    TextFlip(TextFlipArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CountRevealArgs {
    pub text: String,

    /// Delay between characters in milliseconds
    #[arg(long, default_value_t = 50.0)]
    pub stagger: f64,
}

#[derive(Args, Debug, Clone)]
pub struct TextFlipArgs {
    /// Words to rotate through (at least two)
    #[arg(required = true, num_args = 2..)]
    pub words: Vec<String>,

    /// flip, morph, rotate or chars
    #[arg(long, default_value = "flip")]
    pub variant: FlipVariant,

    /// Transition length in milliseconds
    #[arg(long, default_value_t = 500.0)]
    pub duration: f64,

    /// Milliseconds between flips
    #[arg(long, default_value_t = 2500.0)]
    pub interval: f64,

    /// Number of flips to simulate after the initial word
    #[arg(long, default_value_t = 2)]
    pub flips: usize,
}

impl TextFlipArgs {
    pub fn validate(&self) -> Result<(), String> {
        if self.words.len() < 2 {
            return Err("At least two words are required".to_string());
        }
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err("Duration must be a non-negative number".to_string());
        }
        if !self.interval.is_finite() || self.interval <= 0.0 {
            return Err("Interval must be greater than zero".to_string());
        }
        Ok(())
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum PreviewCommand {
    /// Count up (or down) to a number
    Count(CountArgs),
    /// Rotate through words
    Flip(FlipArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CountArgs {
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub from: f64,

    #[arg(long, allow_negative_numbers = true)]
    pub to: f64,

    /// Animation length in milliseconds
    #[arg(long, default_value_t = 1500.0)]
    pub duration: f64,

    /// Easing name; unknown names fall back to easeOutExpo
    #[arg(long, default_value = "easeOutExpo")]
    pub easing: String,

    /// Thousands separator
    #[arg(long, default_value = ",")]
    pub separator: String,
}

impl CountArgs {
    pub fn validate(&self) -> Result<(), String> {
        if !self.from.is_finite() || !self.to.is_finite() {
            return Err("Bounds must be finite numbers".to_string());
        }
        if !self.duration.is_finite() {
            return Err("Duration must be a finite number".to_string());
        }
        Ok(())
    }
}

#[derive(Args, Debug, Clone)]
pub struct FlipArgs {
    #[arg(required = true, num_args = 2..)]
    pub words: Vec<String>,

    /// Milliseconds between flips
    #[arg(long, default_value_t = 2500.0)]
    pub interval: f64,

    /// Stop on the last word instead of wrapping
    #[arg(long = "no-loop", default_value_t = false)]
    pub no_loop: bool,

    /// Total flips to show, the initial word included (default: two rounds)
    #[arg(long)]
    pub cycles: Option<usize>,
}

impl FlipArgs {
    pub fn validate(&self) -> Result<(), String> {
        if !self.interval.is_finite() || self.interval <= 0.0 {
            return Err("Interval must be greater than zero".to_string());
        }
        if self.cycles == Some(0) {
            return Err("Cycles must be at least 1".to_string());
        }
        Ok(())
    }

    pub fn cycles(&self) -> usize {
        self.cycles.unwrap_or(self.words.len() * 2)
    }
}
