use std::io;

use clap::Parser;
use tokio::sync::mpsc;

use mealprep::config::Config;
use mealprep::kitchen::{print_until_ready, JoinStrategy, Kitchen, EVENT_BUFFER};
use mealprep::{mlog, mlog_error, Error, Result};

/// Mealprep - boil water and chop vegetables at the same time
#[derive(Parser, Debug)]
#[command(name = "mealprep")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    MEALPREP_DEBUG=1     Enable debug logging (alternative to --debug)")]
pub struct Cli {
    /// Enable debug logging (writes to ~/.mealprep/mealprep.log)
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// How to wait for the chores before announcing the meal
    #[arg(long, value_enum)]
    pub join: Option<JoinStrategy>,

    /// Length of one time unit in milliseconds
    #[arg(long, value_name = "MS")]
    pub unit_ms: Option<u64>,

    /// How many time units boiling water takes
    #[arg(long, value_name = "N")]
    pub boil_units: Option<u32>,

    /// How many time units chopping vegetables takes
    #[arg(long, value_name = "N")]
    pub chop_units: Option<u32>,
}

impl Cli {
    /// Flags given on the command line win over the config file.
    fn apply(&self, config: &mut Config) {
        if let Some(join) = self.join {
            config.join = join;
        }
        if let Some(ms) = self.unit_ms {
            config.time_unit_ms = ms;
        }
        if let Some(n) = self.boil_units {
            config.boil_units = n;
        }
        if let Some(n) = self.chop_units {
            config.chop_units = n;
        }
    }
}

/// Render a failed run for stderr using the error's message.
fn failure_message(err: &Error) -> String {
    format!("Error: {}", err)
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{}", failure_message(&e));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    mealprep::log::init_with_debug(cli.debug);
    if mealprep::log::is_debug() {
        mlog!("mealprep starting (debug mode enabled)");
    } else {
        mlog!("mealprep starting");
    }

    let mut config = Config::load()?;
    cli.apply(&mut config);
    config.validate()?;

    let rt = tokio::runtime::Runtime::new()?;
    let result = rt.block_on(async {
        let (event_tx, event_rx) = mpsc::channel(EVENT_BUFFER);
        let printer = tokio::spawn(print_until_ready(event_rx, io::stdout()));

        let kitchen = Kitchen::from_config(&config, event_tx);
        let report = kitchen.prepare_meal().await;
        // The printer finishes at the announcement, or once every chore
        // has dropped its sender.
        drop(kitchen);
        printer
            .await
            .map_err(|e| Error::TaskJoin(e.to_string()))??;
        report
    });

    if let Err(e) = &result {
        mlog_error!("Meal preparation failed: {}", e);
    }
    // Dropping the runtime abandons chores a fixed-sleep kitchen left behind.
    drop(rt);
    result.map(|_| ())
}
