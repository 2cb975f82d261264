//! Interactive terminal session.

use std::io::{BufRead, Write as _};
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::agent::AgentLoop;
use crate::config::Config;
use crate::providers::ClaudeClient;
use crate::tools::ToolRegistry;
use crate::ui::{self, BLUE, BOLD, DIM, GREEN, RED, RESET};

/// Initialize tracing to stderr, quiet by default.
///
/// `RUST_LOG` overrides the filter; diagnostics go to stderr so they never
/// interleave with the conversation on stdout.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Entry point: resolve configuration, then read-eval-print until quit.
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    // Startup failure exits non-zero so it is distinguishable from a quit
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            println!("{RED}Error: {e}{RESET}");
            std::process::exit(1);
        }
    };

    let cwd = std::env::current_dir()?;
    println!(
        "{BOLD}minicode{RESET} | {DIM}{} ({}) | {}{RESET}\n",
        config.model,
        config.backend,
        cwd.display()
    );

    let client = Arc::new(ClaudeClient::new(config)?);
    let mut agent = AgentLoop::new(client, ToolRegistry::new());

    let stdin = std::io::stdin();
    let mut line = String::new();
    loop {
        println!("{}", ui::separator());
        print!("{BOLD}{BLUE}❯{RESET} ");
        std::io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();

        if input.is_empty() {
            continue;
        }
        match input {
            "/q" | "exit" => break,
            "/c" => {
                agent.clear();
                println!("{GREEN}⏺ Cleared conversation{RESET}");
                continue;
            }
            _ => {}
        }

        // Per-turn failures are reported and the session continues
        if let Err(e) = agent.run_turn(input).await {
            println!("{RED}⏺ Error: {e}{RESET}");
            continue;
        }
        println!();
    }

    Ok(())
}
