//! Adrift terminal front end.
//!
//! Reads one command per line from stdin (or a script file), feeds it to the
//! session and prints the resulting events.
//!
//! Usage:
//!   cargo run -p adrift-cli
//!   cargo run -p adrift-cli -- --scenario my_station.json
//!   cargo run -p adrift-cli -- --script walkthrough.txt --verbose

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use adrift_logic::command::Command;
use adrift_logic::prelude::*;
use anyhow::{Context, Result};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "adrift", about = "Escape the derelict station before the air runs out")]
struct Args {
    /// Scenario JSON file (defaults to the bundled station)
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Read commands from this file instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let spec = load_scenario(args.scenario.as_deref())?;
    let mut session = spec
        .start_session()
        .with_context(|| format!("scenario '{}' is not playable", spec.name))?;

    let input: Box<dyn BufRead> = match &args.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open script {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    let stdout = io::stdout();
    run(&mut session, input, &mut stdout.lock())?;

    if let Some(ending) = session.ending() {
        log::info!("finished with {:?}", ending);
    }
    Ok(())
}

fn load_scenario(path: Option<&Path>) -> Result<ScenarioSpec> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read scenario {}", path.display()))?;
            ScenarioSpec::from_json(&json)
                .with_context(|| format!("failed to parse scenario {}", path.display()))
        }
        None => ScenarioSpec::station().context("bundled scenario is broken"),
    }
}

/// Drive the session until it ends or the input runs dry.
///
/// The oxygen gate runs before the prompt, so the player learns about the
/// air before typing. End of input counts as quitting.
fn run<R: BufRead, W: Write>(
    session: &mut GameSession,
    mut input: R,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "You wake up alone on a drifting research station.")?;
    writeln!(out, "Find the star tracker and repair your ship in the hangar.")?;
    writeln!(out, "Type 'help' to see the commands.")?;

    let mut line = String::new();
    while session.is_playing() {
        writeln!(out)?;
        let events = session.check_oxygen();
        print_events(out, &events)?;
        if !session.is_playing() {
            break;
        }

        if let Some(view) = session.room_view() {
            write!(out, "{}", render_room(&view))?;
        }
        write!(out, "> ")?;
        out.flush()?;
        line.clear();
        let events = if input.read_line(&mut line)? == 0 {
            session.execute(Command::Quit)
        } else {
            session.handle_input(&line)
        };
        print_events(out, &events)?;
    }
    Ok(())
}

fn print_events<W: Write>(out: &mut W, events: &[GameEvent]) -> io::Result<()> {
    for event in events {
        match event {
            e if e.is_warning() => writeln!(out, "! {}", e)?,
            e => writeln!(out, "{}", e)?,
        }
    }
    Ok(())
}

fn render_room(view: &RoomView) -> String {
    let mut text = format!("--- {} ---\n{}\n", view.name, view.description);
    if !view.open_doors.is_empty() {
        let doors: Vec<String> = view
            .open_doors
            .iter()
            .map(|(direction, to)| format!("{} ({})", direction, to))
            .collect();
        text.push_str(&format!("Doors: {}\n", doors.join(", ")));
    }
    if !view.locked_doors.is_empty() {
        text.push_str(&format!("Locked doors: {}\n", view.locked_doors.join(", ")));
    }
    if !view.tools.is_empty() {
        text.push_str(&format!("Tools: {}\n", view.tools.join(", ")));
    }
    if !view.objects.is_empty() {
        text.push_str(&format!("Objects: {}\n", view.objects.join(", ")));
    }
    text.push_str(&format!("Oxygen: {:.1}\n", view.oxygen));
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station() -> GameSession {
        ScenarioSpec::station().unwrap().start_session().unwrap()
    }

    fn run_script(script: &str) -> (GameSession, String) {
        let mut session = station();
        let mut out = Vec::new();
        run(&mut session, script.as_bytes(), &mut out).unwrap();
        (session, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_render_hangar() {
        let view = station().room_view().unwrap();
        let text = render_room(&view);
        assert!(text.starts_with("--- Hangar ---\n"));
        assert!(text.contains("Doors: north (Storage Bay)\n"));
        assert!(text.contains("Tools: cylinder-1\n"));
        assert!(text.contains("Objects: ship\n"));
        assert!(text.ends_with("Oxygen: 1.5\n"));
        assert!(!text.contains("Locked doors"));
    }

    #[test]
    fn test_end_of_input_quits() {
        let (session, output) = run_script("");
        assert_eq!(session.ending(), Some(Ending::Quit));
        assert!(output.contains("Game over."));
    }

    #[test]
    fn test_help_prints_command_list() {
        let (_, output) = run_script("help\nquit\n");
        assert!(output.contains("use <key> <direction>"));
    }

    #[test]
    fn test_suffocation_before_prompt() {
        let (session, output) = run_script("go north\ngo west\nhelp\n");
        assert_eq!(session.ending(), Some(Ending::Suffocated));
        assert!(output.contains("There is no oxygen left in this room!"));
        // the gate ended the game before the third command was read
        assert!(!output.contains("use <key> <direction>"));
    }

    #[test]
    fn test_warnings_are_marked() {
        let (_, output) = run_script("go east\nquit\n");
        assert!(output.contains("! There is no door to the east."));
    }
}
