use std::path::Path;

use anyhow::{Context, Result};

use crate::shell::{Outcome, Session};

/// Execute a file of shell commands, stopping at the first failing line.
pub fn run(mut session: Session, script: &Path) -> Result<()> {
    for line in execute_script(&mut session, script)? {
        println!("{}", line);
    }
    Ok(())
}

/// Run `script` against `session` and collect everything it printed.
pub fn execute_script(session: &mut Session, script: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(script)
        .with_context(|| format!("Failed to read {}", script.display()))?;

    let mut output = Vec::new();

    for (n, line) in content.lines().enumerate() {
        let outcome = session
            .execute(line)
            .with_context(|| format!("{}:{}: {}", script.display(), n + 1, line.trim()))?;

        match outcome {
            Outcome::Print(text) => output.push(text),
            Outcome::Nothing => {}
            Outcome::Quit => break,
        }
    }

    Ok(output)
}
