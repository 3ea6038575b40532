use clap::{ArgAction, Parser};
use tracing::Level;

use ordkit::demo::{DemoOptions, Section};

#[derive(Parser, Debug)]
#[command(name = "ordkit")]
#[command(about = "Walk through insertion-ordered maps and sets on the console")]
#[command(version)]
#[command(after_help = "EXAMPLES:
    ordkit                              Print the whole walkthrough
    ordkit --section sets --annotate    Print one section with captions
    ordkit --record \"{ a: 1, b: 'x' }\"  Pass a record through a map and back")]
pub struct Cli {
    /// Run only this section
    #[arg(long, short = 's', value_enum)]
    pub section: Option<Section>,

    /// Print a `// caption` line before each step
    #[arg(long, short = 'a')]
    pub annotate: bool,

    /// Convert this record literal to a map and back instead of running the walkthrough
    #[arg(long, conflicts_with = "section")]
    pub record: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn demo_options(&self) -> DemoOptions {
        DemoOptions {
            only: self.section,
            annotate: self.annotate,
        }
    }

    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}
