// File: ./src/cli.rs
//! Shared command-line interface logic, like printing help.

pub fn print_help() {
    println!(
        "Aceday v{} - Personal task tracker with AI-assisted day planning",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    aceday [--root <path>] [COMMAND]");
    println!();
    println!("COMMANDS:");
    println!("    list                  Show all tasks grouped by day (default)");
    println!("    add <title> [opts]    Add a task");
    println!("    done <id-prefix>      Toggle a task's completion");
    println!("    rm <id-prefix>        Delete a task");
    println!("    recommend             Ask the advisor for a schedule and stage it");
    println!("    accept                Apply the staged schedule advice to your tasks");
    println!();
    println!("ADD OPTIONS:");
    println!("    --desc <text>             Description");
    println!("    --due <date>              Due date: YYYY-MM-DD or \"YYYY-MM-DD HH:MM\"");
    println!("    --importance <level>      low | medium | high (default: medium)");
    println!("    --hours <n>               Estimated hours, > 0 (default: 1)");
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config and data.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("EXAMPLES:");
    println!("    aceday add \"Write report\" --due 2026-08-14 --importance high --hours 3");
    println!("    aceday recommend");
    println!("    aceday accept");
    println!();
    println!("CONFIGURATION:");
    println!("    Set api_key (or the ANTHROPIC_API_KEY environment variable), and");
    println!("    optionally api_url, model, max_tokens and schedule_zone");
    println!("    (\"local\" or \"utc\") in config.toml under the config directory.");
}
