//! Terminal duel runner
//!
//! Thin interactive driver around duel-core: builds both characters from
//! command-line identifiers, then reads one action per turn from stdin.
//! All I/O lives here; the engine only ever sees validated input.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::Parser;

use duel_core::{Action, Battle, BattleRng, Character, build_character};

#[derive(Parser)]
#[command(name = "duel", about = "Turn-based race/class duels")]
struct Args {
    /// Race of player 1 (elf, human, troll)
    #[arg(long, default_value = "human")]
    race1: String,

    /// Class of player 1 (warrior, paladin, mage, archer, warlock)
    #[arg(long, default_value = "warrior")]
    class1: String,

    /// Level of player 1 (1-5)
    #[arg(long, default_value_t = 1)]
    level1: u8,

    /// Race of player 2
    #[arg(long, default_value = "human")]
    race2: String,

    /// Class of player 2
    #[arg(long, default_value = "warrior")]
    class2: String,

    /// Level of player 2 (1-5)
    #[arg(long, default_value_t = 1)]
    level2: u8,

    /// Seed for deterministic replay; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Print both character sheets before the battle
    #[arg(long)]
    sheets: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let char1 = match build_character(&args.race1, &args.class1, args.level1) {
        Ok(character) => character,
        Err(err) => {
            eprintln!("player 1: {err}");
            return ExitCode::from(2);
        }
    };
    let char2 = match build_character(&args.race2, &args.class2, args.level2) {
        Ok(character) => character,
        Err(err) => {
            eprintln!("player 2: {err}");
            return ExitCode::from(2);
        }
    };

    if args.sheets {
        for character in [&char1, &char2] {
            println!("{}\n", character.sheet());
        }
    }

    let rng = match args.seed {
        Some(seed) => BattleRng::new(seed),
        None => BattleRng::from_entropy(),
    };
    println!("seed: {}", rng.seed());

    match run_battle(Battle::new(char1, char2, rng)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("io error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_battle(mut battle: Battle) -> io::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock().lines();

    while battle.winner().is_none() {
        println!("{}", battle.status_report());
        prompt(battle.current_character(), &battle)?;

        let Some(line) = input.next() else {
            break;
        };
        let action = match line?.trim() {
            "a" => Action::Attack,
            "b" => Action::Block,
            "o" => Action::SkillOffensive,
            "d" => Action::SkillDefensive,
            "q" => break,
            other => {
                println!("unrecognized input '{other}'");
                continue;
            }
        };

        for line in battle.execute_action(action) {
            println!("{line}");
        }
    }

    println!("{}", battle.full_log());
    Ok(())
}

fn prompt(current: &Character, battle: &Battle) -> io::Result<()> {
    print!(
        "{} [{}] - (a)ttack, (b)lock, (o)ffensive skill, (d)efensive skill, (q)uit: ",
        battle.current_player, current
    );
    io::stdout().flush()
}
