//! `tales story` and `tales read` handlers.

use std::io::{self, IsTerminal, Write};

use anyhow::{Result, bail};
use tales_core::config::Config;
use tales_core::session::{FileSessionStore, FontMode, SessionController};
use tales_core::story::{self, Segment};

use crate::modes;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Opens the interactive session view.
pub async fn run(config: &Config) -> Result<()> {
    modes::run_session(config, FileSessionStore::default_location()).await
}

/// Prints the story laid out for `mode`. Needs a stored session.
pub fn read(mode: FontMode) -> Result<()> {
    let mut controller = SessionController::initialize(FileSessionStore::default_location());
    if !controller.is_authenticated() {
        bail!("Not logged in. Run `tales login --phone <PHONE>` first.");
    }
    controller.set_mode(mode);

    let styled = io::stdout().is_terminal();
    let mut out = io::stdout().lock();
    write_story(&mut out, controller.mode(), styled)?;
    Ok(())
}

fn write_story(out: &mut impl Write, mode: FontMode, styled: bool) -> io::Result<()> {
    writeln!(out, "{}", story::HEADER)?;
    writeln!(out)?;
    writeln!(out, "{}", story::TITLE)?;
    writeln!(out)?;
    for line in story::layout(story::BODY, mode) {
        for segment in &line {
            write_segment(out, segment, styled)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_segment(out: &mut impl Write, segment: &Segment<'_>, styled: bool) -> io::Result<()> {
    if segment.emphasis && styled {
        write!(out, "{BOLD}{}{RESET}", segment.text)
    } else {
        write!(out, "{}", segment.text)
    }
}
