use anyhow::Context;
use clap::Parser;
use tailmotion::args::{PreviewCommand, RenderCommand};
use tailmotion::preview::{preview_count, preview_flip, CountPreview, FlipPreview};
use tailmotion::{build, get_easing, Cli, Commands};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "tailmotion=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Build(args) => {
            let dry_run = args.dry_run;
            let result = build(args).await?;
            if dry_run {
                print!("{}", result.css_content);
            } else {
                println!("Built {}", result.output_path.display());
                if let Some(path) = &result.manifest_path {
                    println!("  - Manifest: {}", path.display());
                }
            }
        }
        Commands::Utilities(args) => {
            let css = tailmotion::utilities(&args)?;
            match &args.output {
                Some(path) => println!("Wrote {}", path.display()),
                None => print!("{}", css),
            }
        }
        Commands::Class(args) => {
            println!("{}", tailmotion::class_string(&args));
        }
        Commands::List(args) => {
            print!("{}", tailmotion::list_animations(args.category));
        }
        Commands::Render(RenderCommand::CountReveal(args)) => {
            println!("{}", tailmotion::render_count_reveal(&args));
        }
        Commands::Render(RenderCommand::TextFlip(args)) => {
            let frames = tailmotion::render_text_flip(&args).context("rendering text flip")?;
            for (at, html) in frames {
                println!("{:>6}ms  {}", at, html);
            }
        }
        Commands::Preview(PreviewCommand::Count(args)) => {
            args.validate().map_err(anyhow::Error::msg)?;
            let text = preview_count(CountPreview {
                from: args.from,
                to: args.to,
                duration: args.duration,
                easing: get_easing(&args.easing),
                separator: args.separator.clone(),
                hidden: false,
            })
            .await?;
            println!("{}", text);
        }
        Commands::Preview(PreviewCommand::Flip(args)) => {
            args.validate().map_err(anyhow::Error::msg)?;
            let cycles = args.cycles();
            preview_flip(FlipPreview {
                words: args.words,
                interval: args.interval,
                looping: !args.no_loop,
                cycles,
                hidden: false,
            })
            .await?;
        }
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose());

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
    Ok(())
}
