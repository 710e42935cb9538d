use std::path::Path;

use quire::engine::{html, FsFetch};
use quire::error::Result;
use quire::markdown::SyntaxHighlight;
use quire::{Browser, Builder, Settings};

use crate::flags::{Generate, Quill, QuillCmd, Show};

mod flags;
mod logging;

fn generate(project: &Path, cmd: &Generate) -> Result<()> {
    let start = std::time::Instant::now();
    let builder = Builder::discover(project)?;
    let manifest = builder.generate()?;
    tracing::info!(
        documents = manifest.documents().count(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "generation complete"
    );

    if cmd.watch {
        builder.watch()?;
    }

    Ok(())
}

fn show(project: &Path, cmd: &Show) -> Result<()> {
    SyntaxHighlight::warm_up();
    let settings = Settings::discover(project)?;
    let mut browser = Browser::open(FsFetch::new(project), &settings)?;
    browser.navigate(cmd.doc.as_deref());
    if let Some(query) = &cmd.query {
        browser.search(query);
    }

    print!("{}", html::shell(&browser));
    Ok(())
}

pub fn main() {
    let flags = Quill::from_env_or_exit();
    logging::init();

    let project = flags.project();
    let result = match &flags.subcommand {
        QuillCmd::Generate(cmd) => generate(&project, cmd),
        QuillCmd::Show(cmd) => show(&project, cmd),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
