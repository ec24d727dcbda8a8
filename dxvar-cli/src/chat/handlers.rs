use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::debug;

use dxvar_core::session::Session;

use crate::render::print_outcome;
use crate::setup::{build_clients, load_config, load_gene_disease_table, spinner};

const HELP: &str = "\
Enter a variant as chr6:160585140-T>G, 6,160585140,T,G,hg38 or rs41272114.
When an rsID maps to several alleles, answer with the number of the one to use.
Anything else is a question about the current variant.

  /reset  start over with an empty session
  /help   show this message
  /quit   leave";

enum Command<'a> {
    Quit,
    Reset,
    Help,
    Input(&'a str),
}

fn read_command(line: &str) -> Command<'_> {
    match line.trim() {
        "/quit" | "/exit" => Command::Quit,
        "/reset" => Command::Reset,
        "/help" => Command::Help,
        text => Command::Input(text),
    }
}

pub fn run_chat(matches: &ArgMatches) -> Result<()> {
    let config = load_config(matches)?;
    let table = load_gene_disease_table(matches, &config)?;
    let clients = build_clients(config, true)?;
    let services = clients.services(&table);

    if !clients.has_assistant() {
        println!("No assistant configured (set GROQ_API_KEY); explanations and questions are unavailable.");
    }
    println!("{}", HELP);

    let mut session = Session::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("\n> ");
        stdout.flush().context("Failed to write prompt")?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).context("Failed to read input")? == 0 {
            break;
        }

        match read_command(&line) {
            Command::Quit => break,
            Command::Reset => {
                session.reset();
                println!("Session cleared.");
            }
            Command::Help => println!("{}", HELP),
            Command::Input(text) => {
                debug!("Chat input: {:?}", text);
                let pb = spinner("Working");
                let outcome = session.submit(text, &services);
                pb.finish_and_clear();
                print_outcome(&outcome);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_command() {
        assert!(matches!(read_command("/quit\n"), Command::Quit));
        assert!(matches!(read_command(" /reset "), Command::Reset));
        assert!(matches!(read_command("/help"), Command::Help));
        assert!(matches!(read_command("rs1234\n"), Command::Input("rs1234")));
    }
}
