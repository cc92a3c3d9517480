//! A scripted table demonstration.
//!
//! Seats a handful of players at one table, lets the lifecycle timers
//! run in real time, and answers every turn with a call until the
//! requested number of hands has gone to showdown.

use std::time::Duration;

use anyhow::{Error, bail};
use log::warn;
use pico_args::Arguments;

use holdem_table::{MAX_SEATS, PlayerId, Round, TableActor, TableConfig};

const HELP: &str = "\
Run a scripted hold'em table demonstration

USAGE:
  table_cli [OPTIONS]

OPTIONS:
  --name NAME           Table name  [default: main]
  --players N           Players to seat, 2 to 8  [default: 2]
  --hands N             Hands to play before closing  [default: 1]
  --delay-ms MS         Lifecycle timer delay in milliseconds  [default: 250]

FLAGS:
  --verbose             Print the full JSON snapshot on every change
  -h, --help            Print help information
";

const NAMES: [&str; MAX_SEATS] = [
    "alice", "bob", "carol", "dave", "erin", "frank", "grace", "heidi",
];

struct Args {
    name: String,
    players: usize,
    hands: usize,
    delay: Duration,
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::builder().format_target(false).init();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        name: pargs
            .value_from_str("--name")
            .unwrap_or_else(|_| "main".to_string()),
        players: pargs.value_from_str("--players").unwrap_or(2),
        hands: pargs.value_from_str("--hands").unwrap_or(1),
        delay: Duration::from_millis(pargs.value_from_str("--delay-ms").unwrap_or(250)),
        verbose: pargs.contains("--verbose"),
    };

    if !(2..=MAX_SEATS).contains(&args.players) {
        bail!("--players must be between 2 and {MAX_SEATS}");
    }

    run(args).await
}

async fn run(args: Args) -> Result<(), Error> {
    let config = TableConfig {
        name: args.name,
        queue_delay: args.delay,
        intermission_delay: args.delay,
        showdown_delay: args.delay,
        end_delay: args.delay,
        ..TableConfig::default()
    };
    config.validate().map_err(Error::msg)?;

    let (actor, handle) = TableActor::new(config);
    let table = tokio::spawn(actor.run());

    for seat_idx in 0..args.players {
        let name = NAMES[seat_idx];
        let reply = handle
            .join(seat_idx, PlayerId::new(name), name)
            .await
            .map_err(Error::msg)?;
        if let Some(rejection) = reply.rejection() {
            bail!("{name} could not take seat {seat_idx}: {rejection}");
        }
        println!("{name} takes seat {seat_idx}");
    }

    let mut snapshots = handle.watch();
    let mut hands_played = 0;
    let mut at_showdown = false;

    while hands_played < args.hands {
        let snapshot = snapshots.borrow_and_update().clone();

        if args.verbose {
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }

        let reached_showdown = snapshot.round == Some(Round::Showdown);
        if reached_showdown && !at_showdown {
            hands_played += 1;
            let status = snapshot.status.as_deref().unwrap_or("");
            println!(
                "hand {hands_played}: board [{}], pot ${} to seats {:?} ({status})",
                join_cards(&snapshot.community),
                snapshot.pot,
                snapshot.winners,
            );
        }
        at_showdown = reached_showdown;

        // Turns only exist in betting rounds, so answering here never
        // races a lifecycle timer.
        if let Some(seat_idx) = snapshot.turn
            && let Some(seat) = snapshot.seat(seat_idx)
        {
            let reply = handle
                .call(seat_idx, seat.id.clone())
                .await
                .map_err(Error::msg)?;
            if let Some(rejection) = reply.rejection() {
                // Folding is always affordable, so the turn moves on.
                warn!("{} cannot call: {rejection}, folding", seat.name);
                handle
                    .fold(seat_idx, seat.id.clone())
                    .await
                    .map_err(Error::msg)?;
            }
        } else {
            snapshots
                .changed()
                .await
                .map_err(|_| Error::msg("table is closed"))?;
        }
    }

    let snapshot = handle.snapshot().await.map_err(Error::msg)?;
    println!("final stacks:");
    for seat in snapshot.seats.iter().flatten() {
        println!("  {}: ${}", seat.name, seat.money);
    }

    handle.close().await.map_err(Error::msg)?;
    table.await?;

    Ok(())
}

fn join_cards(cards: &[holdem_table::Card]) -> String {
    cards
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
