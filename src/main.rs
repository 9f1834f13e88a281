use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mdsite::{Config, SiteConfig};

#[derive(Parser)]
#[command(name = "mdsite")]
#[command(version, about = "Build a static HTML site from markdown")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Configuration file
    #[arg(short, long, global = true, default_value = "mdsite.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Copy static assets and generate every page
    Build(BuildArgs),

    /// Convert one markdown file to an HTML fragment
    Render {
        /// Input Markdown file
        input: PathBuf,

        /// Output HTML file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the title of a markdown file
    Title {
        /// Input Markdown file
        input: PathBuf,
    },
}

/// Overrides for the `[site]` section of the config
#[derive(Args)]
struct BuildArgs {
    /// Directory of markdown pages
    #[arg(long)]
    content: Option<PathBuf>,

    /// Directory of static assets
    #[arg(long = "static")]
    static_dir: Option<PathBuf>,

    /// Page template
    #[arg(long)]
    template: Option<PathBuf>,

    /// Output directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Prefix for root-relative links, e.g. `/my-repo/`
    #[arg(long)]
    basepath: Option<String>,
}

impl BuildArgs {
    fn apply(self, site: &mut SiteConfig) {
        if let Some(content) = self.content {
            site.content = content;
        }
        if let Some(static_dir) = self.static_dir {
            site.static_dir = static_dir;
        }
        if let Some(template) = self.template {
            site.template = template;
        }
        if let Some(output) = self.output {
            site.output = output;
        }
        if let Some(basepath) = self.basepath {
            site.basepath = basepath;
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Build(args) => {
            let mut config = Config::load(&cli.config)?;
            args.apply(&mut config.site);

            let summary = mdsite::site::build(&config.site)?;
            println!(
                "Copied {} static files and generated {} pages into {}",
                summary.assets,
                summary.pages,
                config.site.output.display()
            );
        }
        Command::Render { input, output } => {
            let markdown = read_markdown(&input)?;
            let html = mdsite::markdown_to_html(&markdown)
                .with_context(|| format!("failed to convert {}", input.display()))?;

            match output {
                Some(output) => {
                    fs::write(&output, html)
                        .with_context(|| format!("failed to write {}", output.display()))?;
                    println!("Created {}", output.display());
                }
                None => println!("{html}"),
            }
        }
        Command::Title { input } => {
            let markdown = read_markdown(&input)?;
            let title = mdsite::extract_title(&markdown)
                .with_context(|| format!("failed to read title of {}", input.display()))?;
            println!("{title}");
        }
    }
    Ok(())
}

fn read_markdown(input: &Path) -> Result<String> {
    fs::read_to_string(input).with_context(|| format!("failed to read {}", input.display()))
}
