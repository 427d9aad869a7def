use anyhow::{anyhow, bail, Context};
use chipmult_core::{
    Card, Event, EventBus, GameConfig, JokerDef, RunError, RunState, ScoreBreakdown, Scorer,
    ScoreTables,
};
use chipmult_data::{find_joker, load_game_config, load_jokers};
use clap::{Parser, Subcommand};
use log::{error, warn};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

const DEFAULT_RUN_SEED: u64 = 0xC0FFEE;

#[derive(Debug, Parser)]
#[command(name = "chipmult", about = "Poker hand chips x mult scorer")]
struct Cli {
    /// Directory holding hands.json, ranks.json and jokers.json.
    #[arg(long, global = true)]
    assets: Option<PathBuf>,
    /// Log scoring steps.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score an explicit selection such as `AS KS QS JS TS`.
    Score {
        cards: Vec<String>,
        /// Joker ids to register, in order.
        #[arg(long = "joker", short)]
        jokers: Vec<String>,
    },
    /// Deal a seeded hand and play selections typed on stdin.
    Play {
        #[arg(long, default_value_t = DEFAULT_RUN_SEED)]
        seed: u64,
        #[arg(long = "joker", short)]
        jokers: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    let level = if cli.verbose {
        log::LevelFilter::Trace
    } else {
        log::LevelFilter::Warn
    };
    env_logger::builder()
        .filter_level(level)
        .parse_default_env()
        .format_target(false)
        .format_timestamp(None)
        .init();

    if let Err(err) = run(cli) {
        error!("{err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let (config, jokers) = load_assets(cli.assets.as_deref())?;
    match cli.command {
        Command::Score { cards, jokers: ids } => {
            let played = parse_cards(&cards)?;
            let mut scorer = Scorer::new(ScoreTables::from_config(&config));
            for joker in pick_jokers(&jokers, &ids)? {
                scorer.register(joker);
            }
            let breakdown = scorer.play(&played)?;
            print_breakdown(&played, &breakdown);
            Ok(())
        }
        Command::Play { seed, jokers: ids } => {
            let mut run = RunState::new(config, seed);
            for joker in pick_jokers(&jokers, &ids)? {
                run.register_ability(joker);
            }
            play_loop(&mut run)
        }
    }
}

fn load_assets(dir: Option<&Path>) -> anyhow::Result<(GameConfig, Vec<JokerDef>)> {
    match dir {
        Some(dir) => Ok((load_game_config(dir)?, load_jokers(dir)?)),
        None => {
            let dir = PathBuf::from("assets");
            if dir.is_dir() {
                Ok((load_game_config(&dir)?, load_jokers(&dir)?))
            } else {
                warn!("no assets directory found, using built-in tables");
                Ok((GameConfig::default(), Vec::new()))
            }
        }
    }
}

fn pick_jokers(jokers: &[JokerDef], ids: &[String]) -> anyhow::Result<Vec<JokerDef>> {
    ids.iter()
        .map(|id| {
            find_joker(jokers, id)
                .cloned()
                .ok_or_else(|| anyhow!("unknown joker {id}"))
        })
        .collect()
}

fn parse_cards(specs: &[String]) -> anyhow::Result<Vec<Card>> {
    specs
        .iter()
        .map(|spec| {
            spec.parse::<Card>()
                .with_context(|| format!("bad card {spec:?}"))
        })
        .collect()
}

fn print_breakdown(played: &[Card], breakdown: &ScoreBreakdown) {
    let shown: Vec<String> = played.iter().map(|card| card.to_string()).collect();
    println!("{}  [{}]", breakdown.hand.display_name(), shown.join(" "));
    println!(
        "  base      {:>6} chips x {} mult",
        breakdown.base.chips, breakdown.base.mult
    );
    for step in &breakdown.trace {
        println!(
            "  {:<24} {:>6} chips x {} mult",
            step.source, step.after.chips, step.after.mult
        );
    }
    println!("  score     {}", breakdown.score);
}

fn print_hand(run: &RunState) {
    let shown: Vec<String> = run
        .hand
        .cards()
        .iter()
        .enumerate()
        .map(|(idx, card)| format!("{idx}:{card}"))
        .collect();
    println!(
        "hand {}   deck {}   score {}",
        shown.join(" "),
        run.deck.len(),
        run.score
    );
}

fn parse_indices(args: &[&str]) -> anyhow::Result<Vec<usize>> {
    if args.is_empty() {
        bail!("play needs card indices, e.g. `play 0 2 3`");
    }
    args.iter()
        .map(|arg| {
            arg.parse::<usize>()
                .with_context(|| format!("bad index {arg:?}"))
        })
        .collect()
}

fn play_loop(run: &mut RunState) -> anyhow::Result<()> {
    let mut events = EventBus::default();
    run.deal(&mut events)?;
    events.drain().for_each(drop);
    print_hand(run);

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts.as_slice() {
            [] => continue,
            ["q" | "quit" | "exit"] => break,
            ["h" | "hand"] => print_hand(run),
            ["p" | "play", rest @ ..] => {
                let indices = match parse_indices(rest) {
                    Ok(indices) => indices,
                    Err(err) => {
                        println!("{err}");
                        continue;
                    }
                };
                let played: Vec<Card> = indices
                    .iter()
                    .filter_map(|&idx| run.hand.cards().get(idx).copied())
                    .collect();
                match run.play(&indices, &mut events) {
                    Ok(breakdown) => print_breakdown(&played, &breakdown),
                    Err(err) => {
                        println!("{err}");
                        continue;
                    }
                }
                match run.deal(&mut events) {
                    Ok(_) => {}
                    Err(RunError::DeckEmpty) if !run.hand.is_empty() => {}
                    Err(RunError::DeckEmpty) => {
                        println!("deck exhausted, final score {}", run.score);
                        break;
                    }
                    Err(err) => return Err(err.into()),
                }
                for event in events.drain() {
                    if let Event::DeckExhausted = event {
                        println!("deck is empty");
                    }
                }
                print_hand(run);
            }
            _ => println!("commands: play <idx>..., hand, quit"),
        }
    }
    Ok(())
}
