use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use clap::Parser;
use serde_json::json;
use settlers_engine::game::players::Player;
use settlers_engine::game::{Game, GameConfig};
use settlers_engine::players::{BasePlayer, RandomPlayer};
use settlers_engine::types::Color;

#[derive(Debug, Parser, Clone)]
#[command(name = "settlers-sim")]
#[command(about = "Play random-agent games and print per-game statistics as JSON")]
struct Args {
    /// Seed of the first game; game N uses seed + N
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of seats, 2 to 4
    #[arg(long, default_value_t = 4)]
    players: usize,

    /// Number of games to play
    #[arg(short = 'n', long, default_value_t = 1)]
    games: u32,

    /// JSON file overriding rule parameters
    #[arg(long)]
    config: Option<String>,

    /// Stop a game after this many commands
    #[arg(long, default_value_t = 20_000)]
    max_commands: usize,

    /// Number of worker threads
    #[arg(long, default_value_t = 1)]
    workers: usize,

    /// Skip the summary on stderr
    #[arg(long)]
    quiet: bool,
}

#[derive(Debug, Default)]
struct Summary {
    games: u32,
    wins: BTreeMap<String, u32>,
    unfinished: u32,
    total_rounds: u64,
    total_commands: u64,
    total_duration: Duration,
}

impl Summary {
    fn record(&mut self, game: &Game, duration: Duration) {
        self.games += 1;
        self.total_duration += duration;
        self.total_rounds += game.state.round_number() as u64;
        self.total_commands += game.log().len() as u64;
        match game.winner() {
            Some(winner) => *self.wins.entry(winner).or_insert(0) += 1,
            None => self.unfinished += 1,
        }
    }

    fn merge(&mut self, other: Summary) {
        self.games += other.games;
        self.unfinished += other.unfinished;
        self.total_rounds += other.total_rounds;
        self.total_commands += other.total_commands;
        self.total_duration += other.total_duration;
        for (player, wins) in other.wins {
            *self.wins.entry(player).or_insert(0) += wins;
        }
    }

    fn average(&self, total: u64) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        total as f64 / self.games as f64
    }
}

fn seating(count: usize) -> Vec<Player> {
    Color::ORDERED
        .iter()
        .take(count)
        .enumerate()
        .map(|(idx, color)| Player::new((idx + 1).to_string(), *color))
        .collect()
}

fn run_game(args: &Args, base: &GameConfig, game_idx: u64) -> Option<(Game, Duration)> {
    let config = GameConfig {
        seed: base.seed + game_idx,
        ..base.clone()
    };
    let start = Instant::now();
    let mut game = match Game::new(config.clone(), seating(args.players)) {
        Ok(game) => game,
        Err(err) => {
            log::error!("cannot start game {game_idx}: {err}");
            return None;
        }
    };
    let mut agents: Vec<Box<dyn BasePlayer>> = (0..args.players as u64)
        .map(|seat| Box::new(RandomPlayer::new(config.seed * 31 + seat)) as Box<dyn BasePlayer>)
        .collect();
    game.play(&mut agents, args.max_commands);
    let duration = start.elapsed();

    let points: BTreeMap<&str, u32> = game
        .seating()
        .iter()
        .filter_map(|player| {
            let points = game.state.points(&player.id).ok()?;
            Some((player.id.as_str(), points))
        })
        .collect();
    let report = json!({
        "id": game.id,
        "seed": config.seed,
        "winner": game.winner(),
        "phase": game.state.phase_label(),
        "rounds": game.state.round_number(),
        "commands": game.log().len(),
        "points": points,
        "statistics": game.state.statistics(),
    });
    println!("{report}");
    Some((game, duration))
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if !(2..=4).contains(&args.players) {
        eprintln!("Error: --players must be between 2 and 4");
        std::process::exit(1);
    }
    let config = match &args.config {
        Some(path) => GameConfig::from_json_file(path).unwrap_or_else(|err| {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }),
        None => GameConfig {
            seed: args.seed,
            ..GameConfig::default()
        },
    };

    let mut summary = Summary::default();
    if args.workers > 1 {
        run_parallel(&args, &config, &mut summary);
    } else {
        for game_idx in 0..args.games as u64 {
            if let Some((game, duration)) = run_game(&args, &config, game_idx) {
                summary.record(&game, duration);
            }
        }
    }

    if !args.quiet {
        print_summary(&summary);
    }
}

fn run_parallel(args: &Args, config: &GameConfig, summary: &mut Summary) {
    use std::thread;

    let workers = args.workers;
    let games = args.games as usize;
    let per_worker = games / workers;
    let remainder = games % workers;

    let handles: Vec<_> = (0..workers)
        .map(|worker_id| {
            let args = args.clone();
            let config = config.clone();
            let count = per_worker + usize::from(worker_id < remainder);
            let start_idx = worker_id * per_worker + worker_id.min(remainder);
            thread::spawn(move || {
                let mut local = Summary::default();
                for game_idx in start_idx..start_idx + count {
                    if let Some((game, duration)) = run_game(&args, &config, game_idx as u64) {
                        local.record(&game, duration);
                    }
                }
                local
            })
        })
        .collect();

    for handle in handles {
        match handle.join() {
            Ok(local) => summary.merge(local),
            Err(_) => log::error!("simulation worker panicked"),
        }
    }
}

fn print_summary(summary: &Summary) {
    eprintln!("{}", "=".repeat(60));
    eprintln!("SIMULATION SUMMARY");
    eprintln!("{}", "=".repeat(60));
    eprintln!("{:<10} {:<10} {:<10}", "Player", "Wins", "Win Rate");
    for (player, wins) in &summary.wins {
        let rate = *wins as f64 / summary.games.max(1) as f64 * 100.0;
        eprintln!("{player:<10} {wins:<10} {rate:<9.1}%");
    }
    eprintln!("\n  Total Games: {}", summary.games);
    eprintln!("  Unfinished: {}", summary.unfinished);
    eprintln!("  Avg Rounds: {:.2}", summary.average(summary.total_rounds));
    eprintln!("  Avg Commands: {:.2}", summary.average(summary.total_commands));
    if summary.games > 0 {
        eprintln!("  Avg Duration: {:.2?}", summary.total_duration / summary.games);
    }
}
