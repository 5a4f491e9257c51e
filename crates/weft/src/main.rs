use std::process::ExitCode;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};
use weft_errors::Renderer;
use weft_template::TemplateError;

#[derive(Parser)]
enum Options {
    /// Render a brace template to stdout.
    Run {
        path: Utf8PathBuf,
        /// Give up if parsing takes more than this many routine steps.
        #[arg(long)]
        max_steps: Option<usize>,
    },
    /// Print the parse tree of a brace template.
    Tree { path: Utf8PathBuf },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("WEFT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter)
        .init();
}

fn read(path: &Utf8Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read `{path}`"))
}

fn main() -> anyhow::Result<ExitCode> {
    init_tracing();

    match Options::parse() {
        Options::Run { path, max_steps } => {
            let text = read(&path)?;
            let input = text.chars().collect::<Vec<_>>();

            let mut tree = weft_template::tree(&input);
            match max_steps {
                Some(limit) => {
                    let steps = tree
                        .parse_bounded(limit)
                        .with_context(|| format!("failed to parse `{path}`"))?;
                    debug!(steps, "parsed");
                }
                None => tree.parse(),
            }

            match weft_template::process(&tree) {
                Ok(rendered) => {
                    print!("{rendered}");
                    Ok(ExitCode::SUCCESS)
                }
                Err(err) => {
                    report(&err, &path, &text);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Options::Tree { path } => {
            let text = read(&path)?;
            let input = text.chars().collect::<Vec<_>>();

            let mut tree = weft_template::tree(&input);
            tree.parse();
            print!("{}", tree.debug_dump());

            Ok(ExitCode::SUCCESS)
        }
    }
}

fn report(err: &TemplateError, path: &Utf8Path, text: &str) {
    let renderer = Renderer::styled();
    let diagnostic = err.diagnostic(text);
    eprintln!("{}", renderer.render(diagnostic.to_message(path.as_str(), text)));
}
