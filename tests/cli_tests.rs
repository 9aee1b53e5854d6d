use clap::Parser;
use std::path::PathBuf;
use tailmotion::args::{PreviewCommand, RenderCommand};
use tailmotion::catalog::Category;
use tailmotion::{Cli, Commands, FlipVariant};

#[test]
fn test_cli_parse_build_basic() {
    let cli = Cli::parse_from(["tailmotion", "build"]);

    match cli.command {
        Commands::Build(args) => {
            assert_eq!(args.root, PathBuf::from("."));
            assert!(args.entry.is_none());
            assert!(args.output.is_none());
            assert!(args.manifest.is_none());
            assert!(!args.minify);
            assert!(!args.dry_run);
            assert!(!args.verbose);
        }
        other => panic!("Unexpected command: {:?}", other),
    }
}

#[test]
fn test_cli_parse_build_with_flags() {
    let cli = Cli::parse_from([
        "tailmotion",
        "build",
        "-e", "styles/main.css",
        "-o", "dist/motion.css",
        "-r", "packages/core",
        "-c", "tailmotion.yaml",
        "-m", "dist/manifest.json",
        "--minify",
        "--dry-run",
        "--verbose",
    ]);

    match cli.command {
        Commands::Build(args) => {
            assert_eq!(args.entry, Some(PathBuf::from("styles/main.css")));
            assert_eq!(args.output, Some(PathBuf::from("dist/motion.css")));
            assert_eq!(args.root, PathBuf::from("packages/core"));
            assert_eq!(args.config, Some(PathBuf::from("tailmotion.yaml")));
            assert_eq!(args.manifest, Some(PathBuf::from("dist/manifest.json")));
            assert!(args.minify);
            assert!(args.dry_run);
            assert!(args.verbose);
            assert!(args.validate().is_ok());
        }
        other => panic!("Unexpected command: {:?}", other),
    }
}

#[test]
fn test_cli_build_validation() {
    let cli = Cli::parse_from(["tailmotion", "build", "-e", "a.css", "-o", "a.css"]);
    let Commands::Build(args) = cli.command else {
        panic!("Unexpected command");
    };
    let err = args.validate().unwrap_err();
    assert!(err.contains("different"));
}

#[test]
fn test_cli_parse_class() {
    let cli = Cli::parse_from([
        "tailmotion", "class", "bounce", "--duration", "300", "--repeat", "infinite",
    ]);

    match cli.command {
        Commands::Class(args) => {
            assert_eq!(args.animation, "bounce");
            assert_eq!(args.duration.as_deref(), Some("300"));
            assert_eq!(args.repeat.as_deref(), Some("infinite"));
            assert!(args.delay.is_none());
            assert_eq!(tailmotion::class_string(&args), "tm-bounce tm-duration-300 tm-repeat-infinite");
        }
        other => panic!("Unexpected command: {:?}", other),
    }
}

#[test]
fn test_cli_parse_list() {
    let cli = Cli::parse_from(["tailmotion", "list", "--category", "celebrate"]);
    match cli.command {
        Commands::List(args) => assert_eq!(args.category, Some(Category::Celebrate)),
        other => panic!("Unexpected command: {:?}", other),
    }
}

#[test]
fn test_cli_parse_render_commands() {
    let cli = Cli::parse_from(["tailmotion", "render", "count-reveal", "12,480", "--stagger", "80"]);
    match cli.command {
        Commands::Render(RenderCommand::CountReveal(args)) => {
            assert_eq!(args.text, "12,480");
            assert_eq!(args.stagger, 80.0);
        }
        other => panic!("Unexpected command: {:?}", other),
    }

    let cli = Cli::parse_from(["tailmotion", "render", "text-flip", "fast", "tiny", "--variant", "chars"]);
    match cli.command {
        Commands::Render(RenderCommand::TextFlip(args)) => {
            assert_eq!(args.variant, FlipVariant::Chars);
            assert_eq!(args.duration, 500.0);
            assert_eq!(args.interval, 2500.0);
            assert_eq!(args.flips, 2);
        }
        other => panic!("Unexpected command: {:?}", other),
    }
}

#[test]
fn test_cli_parse_preview_commands() {
    let cli = Cli::parse_from([
        "tailmotion", "preview", "count", "--to", "12500", "--easing", "linear", "--separator", ".",
    ]);
    match cli.command {
        Commands::Preview(PreviewCommand::Count(args)) => {
            assert_eq!(args.from, 0.0);
            assert_eq!(args.to, 12500.0);
            assert_eq!(args.duration, 1500.0);
            assert_eq!(args.easing, "linear");
            assert_eq!(args.separator, ".");
        }
        other => panic!("Unexpected command: {:?}", other),
    }

    let cli = Cli::parse_from([
        "tailmotion", "preview", "flip", "one", "two", "--interval", "800", "--cycles", "4",
    ]);
    match cli.command {
        Commands::Preview(PreviewCommand::Flip(args)) => {
            assert_eq!(args.words, ["one", "two"]);
            assert_eq!(args.interval, 800.0);
            assert!(!args.no_loop);
            assert_eq!(args.cycles(), 4);
            assert!(args.validate().is_ok());
        }
        other => panic!("Unexpected command: {:?}", other),
    }
}

#[test]
fn test_cli_rejects_bad_input() {
    assert!(Cli::try_parse_from(["tailmotion"]).is_err());
    assert!(Cli::try_parse_from(["tailmotion", "preview", "count"]).is_err());
    assert!(Cli::try_parse_from(["tailmotion", "preview", "flip", "lonely"]).is_err());
    assert!(Cli::try_parse_from(["tailmotion", "list", "--category", "dance"]).is_err());

    let cli = Cli::parse_from(["tailmotion", "preview", "flip", "a", "b", "--interval", "0"]);
    let Commands::Preview(PreviewCommand::Flip(args)) = cli.command else {
        panic!("Unexpected command");
    };
    assert!(args.validate().is_err());
}
