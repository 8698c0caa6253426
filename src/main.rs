mod app;
mod args;
mod draw;
mod state;

use crate::app::App;
use crate::args::{Command, parse_args};
use log::{LevelFilter, error};

fn main() -> anyhow::Result<()> {
    let command = match parse_args(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{e}\n\n{}", usage_text());
            std::process::exit(2);
        }
    };

    match command {
        Command::Help => {
            println!("{}", usage_text());
            return Ok(());
        }
        Command::Version => {
            println!("mmpredict {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Command::Predict(_) | Command::Bracket(_) => {}
    }

    better_panic::install();

    let mut app = App::new();
    setup_logger(app.settings.log_level);

    let result = match &command {
        Command::Predict(args) => app.run_predict(args),
        Command::Bracket(args) => app.run_bracket(args),
        Command::Help | Command::Version => Ok(String::new()),
    };

    match result {
        Ok(output) => {
            println!("{output}");
            Ok(())
        }
        Err(e) => {
            error!("{e:#}");
            Err(e)
        }
    }
}

fn setup_logger(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}

fn usage_text() -> &'static str {
    "mmpredict - NCAA tournament matchup and bracket predictor

Usage:
  mmpredict predict <TEAM1> <TEAM2> [--site home|away|neutral] [--year YY]
  mmpredict bracket [--samples | --teams FILE] [--year YY] [--pick ROUND:INDEX=TEAM]... [--json]
  mmpredict --help
  mmpredict --version

Picks are applied in order after the bracket is auto-filled, e.g.
  --pick round1:0=Baylor --pick round3:2=Kansas

Environment:
  MMPREDICT_STATS_JSON   Path to a KenPom-style stats table (default: bundled 2025 data)
  MMPREDICT_SEED_BONUS   1/true to add a seed bonus to team scores
  MMPREDICT_RANDOMNESS   1/true to add upset jitter to close matchups
  MMPREDICT_RNG_SEED     Seed for reproducible jitter
  MMPREDICT_LOG          Log level: off, error, warn (default), info, debug, trace"
}
