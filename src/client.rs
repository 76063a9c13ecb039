use crate::check::run_correctness;
use crate::config::SkipListConfig;
use crate::errors::Result;
use crate::skip_list::SkipList;
use log::info;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::io::{self, BufRead, Write};

const COMMANDS: &str = "Commands: insert <int>, remove <int>, contains <int>, clear, print, \
                        fill <n>, check <n>, quit, exit";

/// Interactive session on stdin/stdout.
pub fn start(config: &SkipListConfig) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(config, stdin.lock(), stdout.lock())
}

/// Reads commands line by line from `input` until EOF or `quit`, printing
/// every layer of the list after each mutation.
pub fn run<R: BufRead, W: Write>(config: &SkipListConfig, input: R, mut out: W) -> Result<()> {
    let mut list: SkipList<i64> = SkipList::from_config(config)?;
    let mut rng = match config.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    info!(
        "Starting session with promotion probability {}",
        list.probability()
    );

    let mut lines = input.lines();
    loop {
        // Prompt
        write!(out, "> ")?;
        out.flush()?;

        // If we hit EOF (Ctrl+D), just exit
        let Some(line) = lines.next() else {
            writeln!(out, "Exiting...")?;
            break;
        };
        let line = line?;

        // Split into tokens (by whitespace)
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }

        let command = tokens[0].to_lowercase();
        match command.as_str() {
            "quit" | "exit" | "q" => {
                writeln!(out, "Goodbye!")?;
                break;
            }

            "insert" | "i" => {
                let Some(value) = argument(&tokens, &mut out, "insert <int>")? else {
                    continue;
                };
                writeln!(out, "Insert({})", value)?;
                list.insert(value);
                list.print(&mut out, true)?;
            }

            "remove" | "r" => {
                let Some(value) = argument(&tokens, &mut out, "remove <int>")? else {
                    continue;
                };
                writeln!(out, "Remove({}) => {}", value, verdict(list.remove(&value)))?;
                list.print(&mut out, true)?;
            }

            "contains" | "c" => {
                let Some(value) = argument(&tokens, &mut out, "contains <int>")? else {
                    continue;
                };
                writeln!(out, "Contains({}) => {}", value, verdict(list.contains(&value)))?;
            }

            "clear" | "x" => {
                list.clear();
                list.print(&mut out, true)?;
            }

            "print" | "p" => list.print(&mut out, true)?,

            "fill" => {
                let Some(n) = argument(&tokens, &mut out, "fill <n>")? else {
                    continue;
                };
                list.clear();
                for value in spread(n.max(0) as usize, &mut rng) {
                    writeln!(out, "Insert({})", value)?;
                    list.insert(value);
                    list.print(&mut out, true)?;
                }
            }

            "check" => {
                let Some(n) = argument(&tokens, &mut out, "check <n>")? else {
                    continue;
                };
                match run_correctness(n.max(0) as u64, config) {
                    Ok(report) => {
                        for phase in &report.phases {
                            writeln!(out, " - {}: passed", phase)?;
                        }
                        writeln!(
                            out,
                            "Correctness test passed! ({} operations on {})",
                            report.operations,
                            report.containers.join(", ")
                        )?;
                    }
                    Err(e) => writeln!(out, "Fail! {}", e)?,
                }
            }

            // Unknown command
            _ => {
                writeln!(out, "Unknown command: {}", command)?;
                writeln!(out, "{}", COMMANDS)?;
            }
        }
    }

    Ok(())
}

/// Parses the integer after the command, printing usage when it is missing
/// or malformed.
fn argument<W: Write>(tokens: &[&str], out: &mut W, usage: &str) -> io::Result<Option<i64>> {
    match tokens.get(1).map(|t| t.parse::<i64>()) {
        Some(Ok(value)) => Ok(Some(value)),
        _ => {
            writeln!(out, "Usage: {}", usage)?;
            Ok(None)
        }
    }
}

fn verdict(outcome: bool) -> &'static str {
    if outcome {
        "True"
    } else {
        "False"
    }
}

/// `n` strictly increasing values starting at 1 with gaps of 1 to 11, in
/// shuffled order.
fn spread<R: Rng>(n: usize, rng: &mut R) -> Vec<i64> {
    let mut values = Vec::with_capacity(n);
    let mut next = 1;
    for _ in 0..n {
        values.push(next);
        next += rng.gen_range(1..=11);
    }
    values.shuffle(rng);
    values
}
