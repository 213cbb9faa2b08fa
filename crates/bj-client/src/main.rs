//! LAN Blackjack player entry point.
//!
//! Loop forever: wait for a dealer's offer broadcast, ask how many rounds
//! to play, connect, play them from the terminal, print the tally, then go
//! back to listening. Ctrl-C simply kills the process; the dealer handles
//! a vanished client as a failed session.

use std::io::BufRead;
use std::path::PathBuf;
use std::sync::{atomic::AtomicBool, Arc};

use tracing::warn;
use tracing_subscriber::EnvFilter;

use bj_client::config::load_config;
use bj_client::discovery::wait_for_offer;
use bj_client::net::connect_and_request;
use bj_client::prompt::StdinDecisions;
use bj_client::session::run_session;
use bj_core::protocol::messages::Request;

fn main() -> anyhow::Result<()> {
    // Optional first argument: path to the config file.
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = load_config(config_path.as_deref())?;

    // Keep tracing quiet by default; the table rendering is the real UI.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.client.log_level)),
        )
        .init();

    println!("Playing as \"{}\".", config.client.team_name);
    let running = Arc::new(AtomicBool::new(true));

    loop {
        println!("Waiting for a dealer to announce itself...");
        let (offer, dealer_addr) = wait_for_offer(config.network.offer_port, &running)?;
        println!(
            "Found dealer \"{}\" at {}.",
            offer.server_name,
            dealer_addr.ip()
        );

        let rounds = prompt_rounds();
        let request = Request {
            rounds,
            team_name: config.client.team_name.clone(),
        };

        let mut stream = match connect_and_request(dealer_addr.ip(), offer.tcp_port, &request) {
            Ok(stream) => stream,
            Err(e) => {
                warn!("could not reach dealer: {e}");
                continue;
            }
        };

        match run_session(&mut stream, rounds, &mut StdinDecisions) {
            Ok(stats) => {
                println!(
                    "\nSession over: {} round(s), {} won, {} lost, {} tied ({:.0}% win rate).",
                    stats.rounds_played,
                    stats.wins,
                    stats.losses,
                    stats.ties,
                    stats.win_rate() * 100.0,
                );
            }
            Err(e) => {
                warn!("session ended early: {e}");
                println!("Connection to the dealer was lost.");
            }
        }
    }
}

/// Asks for a round count between 1 and 255, re-prompting until valid.
fn prompt_rounds() -> u8 {
    let stdin = std::io::stdin();
    let mut line = String::new();
    loop {
        print!("How many rounds? [1-255] ");
        let _ = std::io::Write::flush(&mut std::io::stdout());

        line.clear();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => {
                println!("(no input, playing 1 round)");
                return 1;
            }
            Ok(_) => {}
            Err(_) => return 1,
        }
        match line.trim().parse::<u8>() {
            Ok(n) if n >= 1 => return n,
            _ => println!("Please enter a number between 1 and 255."),
        }
    }
}
