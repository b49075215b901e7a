use anyhow::Context;
use blindrun_core::{
    BlindKind, BlindOutcome, Event, EventBus, Phase, PlayOutcome, RngState, RoundStatus,
    RunError, RunState,
};
use blindrun_data::load_game_config_or_default;
use log::debug;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Debug, Clone)]
struct CliOptions {
    seed: Option<u64>,
    assets: PathBuf,
}

fn parse_cli_options(args: &[String]) -> CliOptions {
    let mut options = CliOptions {
        seed: None,
        assets: PathBuf::from("assets"),
    };
    let mut args = args.iter();
    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--seed" => options.seed = args.next().and_then(|value| value.parse().ok()),
            "--assets" => {
                if let Some(dir) = args.next() {
                    options.assets = PathBuf::from(dir);
                }
            }
            other => debug!("ignoring argument {other}"),
        }
    }
    options
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_cli_options(&args);
    let config = load_game_config_or_default(&options.assets)
        .with_context(|| format!("load config from {}", options.assets.display()))?;
    let rng = match options.seed {
        Some(seed) => RngState::from_seed(seed),
        None => RngState::from_entropy(),
    };
    debug!("run seed {}", rng.seed());
    let mut run = RunState::new(config, Box::new(rng))?;
    let mut events = EventBus::default();

    print_blinds(&run);
    print_help();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{}", prompt_text(&run));
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            continue;
        };
        let args: Vec<&str> = parts.collect();
        match command {
            "q" | "quit" | "exit" => break,
            "?" | "h" | "help" => print_help(),
            "b" | "blinds" => print_blinds(&run),
            "hand" => print_hand(&run),
            "state" | "status" => print_state(&run),
            "json" => println!("{}", serde_json::to_string_pretty(&run.snapshot())?),
            "blind" | "select" => match parse_blind(&run, &args) {
                Ok(kind) => {
                    report(run.select_blind(kind, &mut events));
                    if run.phase() == Phase::Playing {
                        print_hand(&run);
                    }
                }
                Err(err) => println!("error: {err}"),
            },
            "s" | "sel" => match parse_indices(&args, run.hand().len()) {
                Ok(indices) => {
                    for idx in indices {
                        report(run.toggle_select(idx));
                    }
                    print_hand(&run);
                }
                Err(err) => println!("error: {err}"),
            },
            "d" | "discard" => {
                report(run.discard(&mut events));
                print_hand(&run);
            }
            "p" | "play" => {
                if let Some(outcome) = report(run.play(&mut events)) {
                    print_play(&outcome);
                }
                if run.phase() == Phase::Playing {
                    print_hand(&run);
                }
            }
            "n" | "next" => {
                report(run.start_new_round_after_result(&mut events));
                if run.phase() == Phase::SelectingBlind {
                    print_blinds(&run);
                }
            }
            other => println!("unknown command '{other}', try 'help'"),
        }
        drain_events(&mut events);
        if run.phase() == Phase::RoundResult {
            print_result(&run);
        }
    }
    Ok(())
}

fn report<T>(result: Result<T, RunError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            println!("error: {err}");
            None
        }
    }
}

fn print_help() {
    println!("commands:");
    println!("  blinds                 list blinds");
    println!("  blind <small|big|boss|n> choose an unlocked blind");
    println!("  sel <i[,j|a-b]...>     toggle card selection");
    println!("  play | p               play the selected cards");
    println!("  discard | d            discard the selected cards");
    println!("  hand | state | json    show the round");
    println!("  next | n               back to blind selection");
    println!("  quit                   leave");
}

fn prompt_text(run: &RunState) -> String {
    match run.phase() {
        Phase::SelectingBlind => "blind> ".to_string(),
        Phase::Playing => format!(
            "[{}/{} | plays {} | discards {}]> ",
            run.score(),
            run.current_blind().map(|b| b.requirement).unwrap_or(0),
            run.plays_left(),
            run.discards_left()
        ),
        Phase::RoundResult => "result> ".to_string(),
    }
}

fn print_blinds(run: &RunState) {
    println!("== Blinds ==");
    for (idx, blind) in run.blinds().iter().enumerate() {
        let lock = if run.is_unlocked(blind.kind) {
            ""
        } else {
            " (locked)"
        };
        println!(
            "{:>3}  {:<12} {:>6}{}",
            idx, blind.display_name, blind.requirement, lock
        );
    }
}

fn print_hand(run: &RunState) {
    println!("== Hand == ({} cards, {} in deck)", run.hand().len(), run.deck_remaining());
    for (idx, slot) in run.hand().iter().enumerate() {
        let mark = if slot.selected { "*" } else { " " };
        println!("{:>4} {} {}", idx, mark, slot.card);
    }
    let hand = run
        .selected_hand()
        .map(|kind| kind.name())
        .unwrap_or("—");
    println!("selected: {hand}");
}

fn print_state(run: &RunState) {
    println!("phase: {:?}", run.phase());
    if let Some(blind) = run.current_blind() {
        println!("blind: {} (target {})", blind.display_name, blind.requirement);
    }
    println!(
        "score: {}  plays: {}  discards: {}  deck: {}",
        run.score(),
        run.plays_left(),
        run.discards_left(),
        run.deck_remaining()
    );
    println!("round: {:?}", run.round_status());
}

fn print_play(outcome: &PlayOutcome) {
    let cards: Vec<String> = outcome.played.iter().map(ToString::to_string).collect();
    let breakdown = &outcome.breakdown;
    println!(
        "{} [{}]: ({} + {}) x {} = {}",
        breakdown.hand.name(),
        cards.join(" "),
        breakdown.base.chips,
        breakdown.card_chips,
        breakdown.total.mult,
        breakdown.points()
    );
    if outcome.status == RoundStatus::Exhausted {
        println!("round over: out of plays or cards");
    }
}

fn print_result(run: &RunState) {
    let Some(result) = run.last_result() else {
        return;
    };
    let title = match result.outcome {
        BlindOutcome::Cleared => "Blind cleared!",
        BlindOutcome::Failed => "Defeat",
    };
    println!("{title} {} points (target {}). 'next' to continue.", result.score, result.target);
}

fn drain_events(events: &mut EventBus) {
    for event in events.drain() {
        debug!("event: {}", format_event(&event));
        if let Event::BlindUnlocked { blind } = event {
            println!("unlocked: {}", blind.id());
        }
    }
}

fn format_event(event: &Event) -> String {
    match event {
        Event::BlindStarted {
            blind,
            target,
            plays,
            discards,
        } => format!("blind {} started, target {target}, {plays} plays, {discards} discards", blind.id()),
        Event::HandDealt { count, deck_left } => format!("dealt {count}, {deck_left} left"),
        Event::CardsDiscarded {
            count,
            discards_left,
        } => format!("discarded {count}, {discards_left} discards left"),
        Event::HandScored {
            hand,
            total,
            score,
            ..
        } => format!("{} scored {total}, round score {score}", hand.name()),
        Event::BlindCleared {
            blind,
            score,
            target,
        } => format!("blind {} cleared {score}/{target}", blind.id()),
        Event::BlindFailed {
            blind,
            score,
            target,
        } => format!("blind {} failed {score}/{target}", blind.id()),
        Event::BlindUnlocked { blind } => format!("blind {} unlocked", blind.id()),
        Event::ReturnedToBlindSelect => "back to blind selection".to_string(),
    }
}

fn parse_blind(run: &RunState, args: &[&str]) -> Result<BlindKind, String> {
    let arg = args.first().ok_or_else(|| "missing blind".to_string())?;
    if let Some(kind) = BlindKind::from_id(arg) {
        return Ok(kind);
    }
    let idx = arg
        .parse::<usize>()
        .map_err(|_| format!("unknown blind '{arg}'"))?;
    run.blinds()
        .get(idx)
        .map(|rule| rule.kind)
        .ok_or_else(|| format!("no blind at index {idx}"))
}

/// Parses `0,2 4-6` style selections against a hand of `hand_len` cards.
fn parse_indices(args: &[&str], hand_len: usize) -> Result<Vec<usize>, String> {
    let parse = |raw: &str| -> Result<usize, String> {
        let idx = raw
            .trim()
            .parse::<usize>()
            .map_err(|_| format!("invalid index '{raw}'"))?;
        if idx >= hand_len {
            return Err(format!("index {idx} out of range (hand has {hand_len})"));
        }
        Ok(idx)
    };
    let mut indices = Vec::new();
    for part in args.iter().flat_map(|arg| arg.split(',')) {
        if part.trim().is_empty() {
            continue;
        }
        match part.split_once('-') {
            Some((lo, hi)) => {
                let (lo, hi) = (parse(lo)?, parse(hi)?);
                if lo > hi {
                    return Err(format!("range {lo}-{hi} runs backwards"));
                }
                indices.extend(lo..=hi);
            }
            None => indices.push(parse(part)?),
        }
    }
    if indices.is_empty() {
        return Err("missing indices".to_string());
    }
    Ok(indices)
}
