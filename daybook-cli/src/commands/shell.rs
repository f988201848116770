use std::io::{BufRead, IsTerminal, Write};

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::shell::{Outcome, Session};

const PROMPT: &str = "daybook> ";

/// Read commands from stdin until EOF or `quit`. Errors are reported and the
/// session carries on.
pub fn run(mut session: Session) -> Result<()> {
    let stdin = std::io::stdin();
    let interactive = stdin.is_terminal();

    if interactive {
        println!(
            "{}",
            "Events live in memory only and are gone when you quit. Type `help` for commands."
                .dimmed()
        );
        prompt()?;
    }

    for line in stdin.lock().lines() {
        let line = line?;

        match session.execute(&line) {
            Ok(Outcome::Print(text)) => println!("{}", text),
            Ok(Outcome::Nothing) => {}
            Ok(Outcome::Quit) => break,
            Err(e) => eprintln!("{}", e.to_string().red()),
        }

        if interactive {
            prompt()?;
        }
    }

    let left = session.store().len();
    if interactive && left > 0 {
        println!("{}", format!("Discarding {} event(s)", left).dimmed());
    }

    Ok(())
}

fn prompt() -> Result<()> {
    print!("{}", PROMPT.bold());
    std::io::stdout().flush()?;
    Ok(())
}
