mod services;

use std::env;
use std::path::PathBuf;

use crate::services::config::{self, BotConfig};
use crate::services::languages;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_help() {
    println!("felix-run {} - Discord code runner (Piston API)", VERSION);
    println!();
    println!("USAGE:");
    println!("    felix-run [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help              Print help information");
    println!("    -v, --version           Print version information");
    println!("    --config <PATH>         Config file (default: ~/.felix/config.json)");
    println!("    --token <TOKEN>         Discord bot token (overrides config)");
    println!("    --api-key <KEY>         Piston API key (overrides config)");
    println!("    --prefix <PREFIX>       Command prefix, repeatable (overrides config)");
    println!("    --languages             List supported languages and exit");
}

fn print_version() {
    println!("felix-run {}", VERSION);
}

fn print_languages() {
    for group in languages::grouped_by_initial() {
        println!("{group}");
    }
}

/// Command-line overrides applied on top of the config file
#[derive(Default)]
struct CliOptions {
    config_path: Option<PathBuf>,
    token: Option<String>,
    api_key: Option<String>,
    prefixes: Vec<String>,
}

impl CliOptions {
    fn apply(self, config: &mut BotConfig) {
        if self.token.is_some() {
            config.discord_token = self.token;
        }
        if self.api_key.is_some() {
            config.api_key = self.api_key;
        }
        if !self.prefixes.is_empty() {
            config.prefixes = self.prefixes;
        }
    }
}

fn handle_server(config: BotConfig) {
    let Some(token) = config.discord_token.clone() else {
        eprintln!("Error: no Discord token configured");
        eprintln!("Use --token <TOKEN> or set \"discord_token\" in the config file");
        return;
    };
    let Some(api_key) = config.api_key.clone() else {
        eprintln!("Error: no Piston API key configured");
        eprintln!("Use --api-key <KEY> or set \"api_key\" in the config file");
        return;
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to create Tokio runtime: {e}");
            return;
        }
    };

    let title = format!("  felix-run v{}  |  Discord Bot Server  ", VERSION);
    let width = title.chars().count();
    println!();
    println!("  ┌{}┐", "─".repeat(width));
    println!("  │{}│", title);
    println!("  └{}┘", "─".repeat(width));
    println!();
    println!("  ▸ Status : Connecting...");
    println!();

    rt.block_on(services::discord::run_bot(&token, &api_key, &config));
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut options = CliOptions::default();

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1).cloned();
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                return;
            }
            "-v" | "--version" => {
                print_version();
                return;
            }
            "--languages" => {
                print_languages();
                return;
            }
            flag @ ("--config" | "--token" | "--api-key" | "--prefix") => {
                let Some(value) = value else {
                    eprintln!("Error: {flag} requires a value");
                    eprintln!("Use --help for usage information");
                    return;
                };
                match flag {
                    "--config" => options.config_path = Some(PathBuf::from(value)),
                    "--token" => options.token = Some(value),
                    "--api-key" => options.api_key = Some(value),
                    _ => options.prefixes.push(value),
                }
                i += 2;
            }
            arg => {
                eprintln!("Unknown option: {}", arg);
                eprintln!("Use --help for usage information");
                return;
            }
        }
    }

    let mut config = match config::load_config(options.config_path.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            return;
        }
    };
    options.apply(&mut config);

    handle_server(config);
}
