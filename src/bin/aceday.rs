use aceday::advisor::AdvisorClient;
use aceday::cli;
use aceday::config::Config;
use aceday::context::{AppContext, StandardContext};
use aceday::model::{Importance, Task};
use aceday::recommend::{ScheduleResolver, parse_recommendations, reconcile};
use aceday::storage::LocalStorage;
use aceday::store::TaskStore;
use anyhow::{Result, bail};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use simplelog::{LevelFilter, WriteLogger};
use std::env;
use std::path::PathBuf;
use strum::IntoEnumIterator;

#[tokio::main]
async fn main() -> Result<()> {
    let mut args: Vec<String> = env::args().skip(1).collect();

    if args
        .iter()
        .any(|a| a == "--help" || a == "-h" || a == "help")
    {
        cli::print_help();
        return Ok(());
    }

    let root = take_root_flag(&mut args)?;
    let ctx = StandardContext::new(root);
    init_logging(&ctx);

    let command = args.first().cloned().unwrap_or_else(|| "list".to_string());
    let rest: Vec<String> = args.into_iter().skip(1).collect();

    match command.as_str() {
        "list" => cmd_list(&ctx),
        "add" => cmd_add(&ctx, &rest),
        "done" => cmd_done(&ctx, &rest),
        "rm" => cmd_rm(&ctx, &rest),
        "recommend" => cmd_recommend(&ctx).await,
        "accept" => cmd_accept(&ctx),
        other => bail!("Unknown command '{}'. Try 'aceday --help'.", other),
    }
}

/// Removes `--root <path>` (or `-r <path>`) from the argument list.
fn take_root_flag(args: &mut Vec<String>) -> Result<Option<PathBuf>> {
    if let Some(idx) = args.iter().position(|a| a == "--root" || a == "-r") {
        if idx + 1 >= args.len() {
            bail!("--root requires a path argument");
        }
        let path = PathBuf::from(args.remove(idx + 1));
        args.remove(idx);
        return Ok(Some(path));
    }
    Ok(None)
}

fn init_logging(ctx: &dyn AppContext) {
    if let Ok(path) = ctx.get_log_file_path()
        && let Ok(file) = std::fs::File::create(&path)
    {
        let _ = WriteLogger::init(LevelFilter::Info, simplelog::Config::default(), file);
    }
}

fn load_store(ctx: &dyn AppContext) -> Result<TaskStore> {
    Ok(TaskStore::from_tasks(LocalStorage::load(ctx)?))
}

fn cmd_list(ctx: &dyn AppContext) -> Result<()> {
    let store = load_store(ctx)?;
    if store.is_empty() {
        println!("No tasks yet. Add one with 'aceday add <title>'.");
        return Ok(());
    }

    for (day, tasks) in store.grouped_by_day() {
        println!("{}", day.format("%A, %b %-d, %Y"));
        for task in tasks {
            let when = match task.work_date {
                Some(d) => d.with_timezone(&Local).format("%H:%M").to_string(),
                None => "--:--".to_string(),
            };
            println!(
                "  {} {} {:<8} {} [{}] (~{}h)",
                task.checkbox_symbol(),
                when,
                task.short_id(),
                task.title,
                task.importance,
                task.estimated_hours,
            );
            if let Some(due) = task.due {
                println!(
                    "            due {}",
                    due.with_timezone(&Local).format("%b %-d, %Y %H:%M")
                );
            }
        }
        println!();
    }
    Ok(())
}

fn cmd_add(ctx: &dyn AppContext, args: &[String]) -> Result<()> {
    let mut title_words: Vec<&str> = Vec::new();
    let mut description: Option<String> = None;
    let mut due: Option<DateTime<Utc>> = None;
    let mut importance = Importance::default();
    let mut hours = 1.0_f64;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--desc" => {
                let value = iter.next().ok_or_else(|| anyhow::anyhow!("--desc requires a value"))?;
                description = Some(value.clone());
            }
            "--due" => {
                let value = iter.next().ok_or_else(|| anyhow::anyhow!("--due requires a value"))?;
                due = Some(parse_due(value)?);
            }
            "--importance" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--importance requires a value"))?;
                importance = Importance::parse(value).ok_or_else(|| {
                    let options = Importance::iter()
                        .map(|i| i.to_string().to_lowercase())
                        .collect::<Vec<_>>()
                        .join(" | ");
                    anyhow::anyhow!("Unknown importance '{}' (expected {})", value, options)
                })?;
            }
            "--hours" => {
                let value = iter.next().ok_or_else(|| anyhow::anyhow!("--hours requires a value"))?;
                hours = value
                    .parse::<f64>()
                    .map_err(|_| anyhow::anyhow!("Invalid hours '{}'", value))?;
                if hours <= 0.0 {
                    bail!("Estimated hours must be greater than zero");
                }
            }
            word => title_words.push(word),
        }
    }

    let title = title_words.join(" ");
    if title.trim().is_empty() {
        bail!("A task needs a title");
    }

    let mut task = Task::new(title.trim());
    task.description = description;
    task.due = due;
    task.importance = importance;
    task.estimated_hours = hours;

    let mut store = load_store(ctx)?;
    store.add(task);
    LocalStorage::save(ctx, store.tasks())?;
    println!("Added.");
    Ok(())
}

/// "YYYY-MM-DD HH:MM" or bare "YYYY-MM-DD" (treated as end of that day),
/// interpreted in the local zone.
fn parse_due(value: &str) -> Result<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M").or_else(|_| {
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(|d| d.and_hms_opt(23, 59, 0).expect("fixed time is valid"))
    });
    let naive = naive.map_err(|_| {
        anyhow::anyhow!("Invalid date '{}': use YYYY-MM-DD or \"YYYY-MM-DD HH:MM\"", value)
    })?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| anyhow::anyhow!("'{}' does not exist in the local zone", value))
}

fn cmd_done(ctx: &dyn AppContext, args: &[String]) -> Result<()> {
    let prefix = args.first().ok_or_else(|| anyhow::anyhow!("Usage: aceday done <id-prefix>"))?;
    let mut store = load_store(ctx)?;
    let id = match store.find_by_prefix(prefix) {
        Some(task) => task.id,
        None => bail!("No single task matches id prefix '{}'", prefix),
    };
    if let Some(task) = store.toggle_completed(&id) {
        println!("{} {}", task.checkbox_symbol(), task.title);
    }
    LocalStorage::save(ctx, store.tasks())?;
    Ok(())
}

fn cmd_rm(ctx: &dyn AppContext, args: &[String]) -> Result<()> {
    let prefix = args.first().ok_or_else(|| anyhow::anyhow!("Usage: aceday rm <id-prefix>"))?;
    let mut store = load_store(ctx)?;
    let id = match store.find_by_prefix(prefix) {
        Some(task) => task.id,
        None => bail!("No single task matches id prefix '{}'", prefix),
    };
    if let Some(task) = store.remove(&id) {
        println!("Removed '{}'.", task.title);
    }
    LocalStorage::save(ctx, store.tasks())?;
    Ok(())
}

async fn cmd_recommend(ctx: &dyn AppContext) -> Result<()> {
    let mut config = Config::load_or_default(ctx)?;
    if config.api_key.is_empty()
        && let Ok(key) = env::var("ANTHROPIC_API_KEY")
    {
        config.api_key = key;
    }
    if config.api_key.is_empty() {
        bail!(
            "No API key configured. Set api_key in {} or export ANTHROPIC_API_KEY.",
            Config::get_path_string(ctx)?
        );
    }

    let store = load_store(ctx)?;
    if store.pending().next().is_none() {
        println!("No pending tasks to schedule.");
        return Ok(());
    }

    let client = AdvisorClient::from_config(&config);
    let advice = client
        .fetch_advice(store.tasks())
        .await
        .map_err(|e| anyhow::anyhow!("Recommendation service unavailable: {}", e))?;

    LocalStorage::stage_advice(ctx, &advice)?;
    println!("{}", advice);
    println!();
    println!("Run 'aceday accept' to apply this schedule.");
    Ok(())
}

fn cmd_accept(ctx: &dyn AppContext) -> Result<()> {
    let config = Config::load_or_default(ctx)?;
    let Some(advice) = LocalStorage::load_advice(ctx)? else {
        bail!("No staged advice. Run 'aceday recommend' first.");
    };

    let mut store = load_store(ctx)?;
    let matches = parse_recommendations(&advice);
    let resolver = ScheduleResolver::new(config.schedule_zone);
    let outcome = reconcile(store.tasks(), &matches, &resolver);

    for skipped in &outcome.skipped {
        eprintln!("skipped: {} ({})", skipped.line.title, skipped.reason);
    }
    let (applied, skipped) = (outcome.applied, outcome.skipped.len());

    store.replace_all(outcome.tasks);
    LocalStorage::save(ctx, store.tasks())?;
    LocalStorage::clear_advice(ctx)?;
    println!("Applied {} scheduled task(s); {} line(s) skipped.", applied, skipped);
    Ok(())
}
