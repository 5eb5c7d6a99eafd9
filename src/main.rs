use clap::Parser;
use colored::*;
use httpsh::config::ShellConfig;
use httpsh::shell;
use httpsh::shell::commands::output::render;
use log::{debug, info};
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;

/// Browse an autoindex HTTP server like a Unix shell
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Base URL of the directory-listing server (e.g. https://files.example.org/)
    origin: String,

    /// Name shown in the prompt (defaults to the origin's host)
    #[arg(long)]
    hostname: Option<String>,

    /// Do not load or save ~/.httpsh_history
    #[arg(long)]
    no_history: bool,

    /// Print request statistics on exit
    #[arg(long)]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let config = match ShellConfig::new(&args.origin, args.hostname) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            std::process::exit(2);
        }
    };

    // Print welcome message
    println!("{}", "=".repeat(60).cyan());
    println!("{}", "  httpsh - The autoindex shell".bold().cyan());
    println!("{}", format!("  Browsing {}", config.origin).cyan());
    println!("{}", "=".repeat(60).cyan());
    println!();
    println!("Type 'help' for available commands or 'exit' to quit");
    println!();

    let mut state = match shell::ShellState::new(&config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{} Failed to initialize HTTP client: {:#}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };

    // Create readline editor with tab completion
    let completer = shell::ShellCompleter::new(state.completion_cache().clone());
    let mut rl: Editor<shell::ShellCompleter, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(completer));

    // Load history if available
    let history_file = if args.no_history {
        None
    } else {
        dirs::home_dir().map(|mut p| {
            p.push(".httpsh_history");
            p
        })
    };

    if let Some(path) = &history_file {
        let _ = rl.load_history(path);
    }

    // REPL loop
    loop {
        let prompt = state.prompt();

        match rl.readline(&prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.as_str());
                }

                match state.execute(&line).await {
                    Ok(output) => render(&output)?,
                    Err(e) => eprintln!("{}", e.to_string().red()),
                }

                if state.should_exit() {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl-C
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl-D
                println!("exit");
                break;
            }
            Err(err) => {
                eprintln!("{} {:?}", "Error:".red().bold(), err);
                break;
            }
        }
    }

    // Save history
    if let Some(path) = &history_file {
        let _ = rl.save_history(path);
    }

    let metrics = state.service().metrics();
    for request in metrics.requests() {
        let status = request
            .status
            .map_or_else(|| "failed".to_string(), |s| s.to_string());
        debug!(
            "{} {} ({} bytes, {:.2?})",
            status, request.url, request.bytes, request.duration
        );
    }
    info!("{}", metrics.summary());

    if args.stats {
        println!();
        println!("{}", "Session statistics".bold());
        println!("  {}", metrics.summary());
        println!(
            "  {} directories cached for completion",
            state.completion_cache().cached_directories()
        );
    }

    println!("Goodbye!");
    Ok(())
}
