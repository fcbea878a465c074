use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use mockdrive::{Config, Simulator, DEMO_OWNER};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load_with_env("mockdrive.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load mockdrive.toml: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    // Initialize logging
    if let Err(e) = mockdrive::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        mockdrive::logging::init_console_only(&config.logging.level);
    }

    info!("MockDrive - file sharing backend simulator");

    let simulator = match Simulator::with_demo_data(config) {
        Ok(simulator) => simulator,
        Err(e) => {
            eprintln!("Failed to start simulator: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_shell(&simulator).await {
        eprintln!("Shell session ended with error: {e}");
        std::process::exit(1);
    }
}

/// Interactive shell session against the simulator on stdin/stdout.
///
/// `exit`/`quit` and `clear` are terminal concerns handled here; every
/// other line goes through the simulated shell.
async fn run_shell(simulator: &Simulator) -> std::io::Result<()> {
    println!("MockDrive simulated shell. Type 'help' for commands, 'exit' to leave.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut cwd = String::from("/");

    prompt(&cwd)?;
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "exit" | "quit" => break,
            "clear" => print!("\x1b[2J\x1b[H"),
            _ => {
                let outcome = simulator.shell.execute(&line, &cwd).await;
                if let Some(output) = outcome.output {
                    println!("{output}");
                }
                if let Some(error) = outcome.error {
                    println!("{error}");
                }
                if let Some(new_path) = outcome.new_path {
                    cwd = new_path;
                }
            }
        }
        prompt(&cwd)?;
    }

    Ok(())
}

fn prompt(cwd: &str) -> std::io::Result<()> {
    print!("{DEMO_OWNER}@mockdrive:{cwd}$ ");
    std::io::stdout().flush()
}
