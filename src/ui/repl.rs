//! Line-at-a-time terminal loop
//!
//! Strictly sequential: each utterance is fully handled before the next
//! line is read.

use std::io::{BufRead, Write};

use crate::core::error::Result;
use crate::session::Session;

const BANNER: &str = r"
 _   _  _____  _   _  ___
| \ | ||  _  || | | |/   |
|  \| || | | || | | |/ /| |
| . ` || | | || | | / /_| |
| |\  |\ \_/ /\ \_/ \___  |
\_| \_/ \___/  \___/    |_/

  Neural Omni Virtual Assistant
  Type 'help' for commands | 'bye' to exit
";

const EXIT_PHRASES: [&str; 4] = ["quit", "exit", "bye", "goodbye"];

pub fn is_exit_phrase(line: &str) -> bool {
    EXIT_PHRASES
        .iter()
        .any(|phrase| line.trim().eq_ignore_ascii_case(phrase))
}

/// Run the loop until an exit phrase or end of input
pub fn run_repl<R: BufRead, W: Write>(session: &Session, mut input: R, mut output: W) -> Result<()> {
    let name = session.bot_name();
    writeln!(output, "{}", BANNER)?;

    let mut line = String::new();
    loop {
        write!(output, "You: ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            break;
        }

        let utterance = line.trim();
        if utterance.is_empty() {
            continue;
        }
        if is_exit_phrase(utterance) {
            break;
        }

        let result = session.handle(utterance);
        writeln!(output, "{}: {}\n", name, result.text)?;
    }

    writeln!(output, "{}: Goodbye!", name)?;
    Ok(())
}
