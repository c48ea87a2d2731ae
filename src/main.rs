use crate::clock::{Clock, FixedClock, SystemClock};
use crate::commands::{Console, Prompt};
use crate::store::JsonStore;
use crate::time::UtcInstant;
use clap::Parser;
use log::{error, info};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Context, Editor, Helper, Highlighter, Hinter, Validator};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

mod aircraft;
mod airport;
mod clock;
mod commands;
mod flight;
mod form;
mod store;
mod time;
mod timeline;
mod wall_clock;

const PAGE_LINES: usize = 40;

#[derive(Parser)]
struct Args {
    /// Path to the JSON data file
    #[arg(short, long, value_name = "FILE", default_value = "data/default.json")]
    data: PathBuf,
    /// Width of the timeline canvas in characters
    #[arg(long, default_value_t = 72)]
    columns: usize,
    /// Pin "now" to a fixed instant, e.g. 2024-03-15T12:00:00Z
    #[arg(long, value_name = "ISO8601")]
    at: Option<UtcInstant>,
    /// Disable ANSI colours
    #[arg(long)]
    no_color: bool,
    /// Refresh interval of `watch` in milliseconds
    #[arg(long, default_value_t = 1000)]
    tick_ms: u64,
}

#[derive(Helper, Hinter, Highlighter, Validator)]
pub struct CompleteHelper {
    pub commands: Vec<String>,
}

impl Completer for CompleteHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, _pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let candidates = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: format!("{cmd} "),
            })
            .collect();
        Ok((0, candidates))
    }
}

struct Terminal<'a> {
    rl: &'a mut Editor<CompleteHelper, DefaultHistory>,
}

impl Prompt for Terminal<'_> {
    fn ask(&mut self, prompt: &str, initial: &str) -> rustyline::Result<String> {
        self.rl.readline_with_initial(prompt, (initial, ""))
    }

    fn say(&mut self, line: &str) {
        println!("{line}");
    }

    fn page(&mut self, text: String) {
        if text.lines().count() <= PAGE_LINES {
            println!("{text}");
        } else if let Err(e) = paginate(&text) {
            error!("pager failed: {e}");
            println!("{text}");
        }
    }

    fn clear(&mut self) {
        print!("\x1B[2J\x1B[H");
    }
}

fn paginate(content: &str) -> std::io::Result<()> {
    let mut pager = Command::new("less")
        .arg("-R")
        .stdin(Stdio::piped())
        .spawn()
        // Fallback to 'more' if 'less' isn't available
        .or_else(|_| Command::new("more").stdin(Stdio::piped()).spawn())?;

    if let Some(mut stdin) = pager.stdin.take() {
        if let Err(e) = stdin.write_all(content.as_bytes()) {
            // Broken pipe is common if the user quits the pager early
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                return Err(e);
            }
        }
    }

    // Wait for the user to close the pager before returning to the prompt
    pager.wait()?;
    Ok(())
}

fn print_help() {
    println!("\nAvailable Commands:");
    println!("  ls [status]         - List flights, optionally filtered by status (scheduled, in_flight, completed, delayed, cancelled)");
    println!("  aircraft            - List active aircraft");
    println!("  gantt               - Draw today's UTC timeline");
    println!("  watch [ticks]       - Redraw the timeline every tick (default 10 ticks)");
    println!("  now                 - Show the current UTC and local time");
    println!("  add                 - Add a flight route");
    println!("  edit <flight>       - Edit a flight route by flight number or id");
    println!("  rm <flight>         - Delete a flight route by flight number or id");
    println!("  airports <query>    - Search airports by code, name or city");
    println!("  help / ?            - Show this help menu");
    println!("  exit / quit         - Exit\n");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    if args.no_color {
        colored::control::set_override(false);
    }
    let clock: Box<dyn Clock> = match args.at {
        Some(instant) => {
            info!("clock pinned at {instant}");
            Box::new(FixedClock::new(instant))
        }
        None => Box::new(SystemClock),
    };

    let store = JsonStore::load_from_file(&args.data)?;
    println!("Flight board online. Loaded routes from {}", args.data.display());

    let mut console = Console {
        store,
        clock,
        columns: args.columns,
        colorize: !args.no_color,
        tick_ms: args.tick_ms,
    };

    let config = rustyline::Config::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();

    let helper = CompleteHelper {
        commands: ["ls", "aircraft", "gantt", "watch", "now", "add", "edit", "rm", "airports", "help", "exit"]
            .iter()
            .map(|c| c.to_string())
            .collect(),
    };

    let mut rl = Editor::with_config(config)?;
    rl.set_helper(Some(helper));

    loop {
        let readline = rl.readline(">> ");
        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                rl.add_history_entry(trimmed)?;

                let parts: Vec<&str> = trimmed.split_whitespace().collect();
                let mut io = Terminal { rl: &mut rl };
                let result = match parts[0] {
                    "ls" => console.list(&mut io, parts.get(1).copied()),
                    "aircraft" => console.aircraft(&mut io),
                    "gantt" => console.gantt(&mut io),
                    "watch" => {
                        let ticks = parts.get(1).and_then(|t| t.parse().ok()).unwrap_or(10);
                        console.watch(&mut io, ticks)
                    }
                    "now" => {
                        console.now(&mut io);
                        Ok(())
                    }
                    "add" => console.add(&mut io),
                    "edit" => match parts.get(1) {
                        Some(flight) => console.edit(&mut io, flight),
                        None => {
                            println!("Usage: edit <flight_number>");
                            Ok(())
                        }
                    },
                    "rm" => match parts.get(1) {
                        Some(flight) => console.remove(&mut io, flight),
                        None => {
                            println!("Usage: rm <flight_number>");
                            Ok(())
                        }
                    },
                    "airports" => {
                        console.airports(&mut io, &parts[1..].join(" "));
                        Ok(())
                    }
                    "help" | "?" => {
                        print_help();
                        Ok(())
                    }
                    "exit" | "quit" => break,
                    _ => {
                        println!("Unknown command: {}", parts[0]);
                        Ok(())
                    }
                };
                if let Err(err) = result {
                    println!("Error: {err}");
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}
