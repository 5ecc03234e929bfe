use clap::{Parser, Subcommand};
use microblog::types::BuildEvent;
use microblog::{config, output, pipeline};
use std::path::PathBuf;
use std::sync::mpsc::{self, Sender};
use std::thread;

#[derive(Parser)]
#[command(name = "microblog")]
#[command(about = "Static site generator for a markdown microblog")]
#[command(long_about = "\
Static site generator for a markdown microblog

Write drafts as markdown, build, and get a plain HTML site. Drafts are
promoted into timestamped articles, every article becomes a page, and an
index page links them all.

Site structure:

  site/
  ├── config.toml                        # Optional, see 'microblog gen-config'
  ├── draft/                             # Work in progress
  │   └── hello.md                       # Promoted on the next build
  ├── article/                           # Published sources, never modified
  │   └── 20240305-142201--hello.md      # UTC modification time + original name
  └── publish/                           # Generated, safe to delete
      ├── 20240305-142201--hello.html
      └── index.html

Article title: first heading in the document, else the filename without .md.")]
#[command(version)]
struct Cli {
    /// Site root containing the draft, article and publish directories
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Promote drafts, compile articles and write the index (default)
    Build,
    /// Promote drafts into the articles directory without compiling
    Promote,
    /// Show what a build would do without writing anything
    Check {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Build) {
        Command::Build => {
            let site_config = config::load_config(&cli.root)?;
            let summary = with_printer(|tx| pipeline::run(&cli.root, &site_config, Some(tx)))??;
            output::print_summary(&summary);
        }
        Command::Promote => {
            let site_config = config::load_config(&cli.root)?;
            let count = with_printer(|tx| pipeline::promote(&cli.root, &site_config, Some(tx)))??;
            println!("Promoted {count} draft(s)");
        }
        Command::Check { json } => {
            let site_config = config::load_config(&cli.root)?;
            let report = with_printer(|tx| pipeline::check(&cli.root, &site_config, Some(tx)))??;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                output::print_check_report(&report);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Run `stage` while a background thread prints its events as they arrive.
fn with_printer<T>(
    stage: impl FnOnce(&Sender<BuildEvent>) -> T,
) -> Result<T, Box<dyn std::error::Error>> {
    let (tx, rx) = mpsc::channel();
    let printer = thread::spawn(move || {
        for event in rx {
            output::print_event(&event);
        }
    });
    let result = stage(&tx);
    drop(tx);
    printer
        .join()
        .map_err(|_| "output printer thread panicked")?;
    Ok(result)
}
