mod alarm;
mod audio;
mod clock;
mod countdown;
mod diagnostics;
mod i18n;
mod ui;

use anyhow::{Result, bail};
use clap::Parser;

use crate::clock::select_source;
use crate::i18n::Language;

#[derive(Parser, Debug)]
#[command(
    name = "dualchrono",
    version,
    about = "Dual-panel countdown timer and alarm clock with bilingual display"
)]
struct Cli {
    /// Display language for all labels.
    #[arg(long, value_enum, default_value_t = Language::Zh)]
    lang: Language,

    /// Countdown re-evaluation cadence in milliseconds (1..=1000).
    #[arg(long, default_value_t = 50)]
    tick_ms: u64,

    /// Visual-only completion cue, never open an audio device.
    #[arg(long)]
    mute: bool,

    /// Run the clock pacing benchmark and exit.
    #[arg(long)]
    diagnostics: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    if cli.tick_ms == 0 || cli.tick_ms > 1000 {
        bail!("--tick-ms must be between 1 and 1000");
    }

    let source = select_source();

    if cli.diagnostics {
        diagnostics::run_diagnostics(source.as_ref(), cli.tick_ms)?;
        return Ok(());
    }

    ui::app::run_gui(source, cli.lang, cli.tick_ms, cli.mute)
}
