use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use vigil_core::*;

#[derive(Parser)]
#[command(name = "vigil")]
#[command(about = "Devotional sequencing companion", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Run as of this date (YYYY-MM-DD) instead of the local calendar day
    #[arg(long, global = true)]
    date: Option<NaiveDate>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show today's devotion group and saint of the day (default)
    Today,

    /// Work through a devotional session
    Pray {
        /// Start with a specific group instead of the daily selection
        #[arg(long)]
        group: Option<String>,

        /// Ignore any saved session and start fresh
        #[arg(long)]
        fresh: bool,

        /// Don't save a snapshot when quitting mid-session
        #[arg(long)]
        no_save: bool,

        /// Auto-complete (for testing) - run the session to completion
        #[arg(long)]
        auto_complete: bool,
    },

    /// List recently completed devotions
    History {
        /// How many days back to look
        #[arg(long, default_value_t = 7)]
        days: i64,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    vigil_core::logging::init();

    let cli = Cli::parse();

    // Determine data directory and session date
    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let date = cli.date.unwrap_or_else(|| chrono::Local::now().date_naive());

    match cli.command {
        Some(Commands::Today) | None => cmd_today(date, &config),
        Some(Commands::Pray {
            group,
            fresh,
            no_save,
            auto_complete,
        }) => cmd_pray(data_dir, date, group, fresh, no_save, auto_complete, &config),
        Some(Commands::History { days }) => cmd_history(data_dir, days),
    }
}

fn load_catalog(config: &Config) -> Result<Catalog> {
    let catalog = build_catalog(config.devotion.repeat_target);
    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::InvalidCatalog("Invalid catalog".into()));
    }
    Ok(catalog)
}

fn cmd_today(date: NaiveDate, config: &Config) -> Result<()> {
    let catalog = load_catalog(config)?;

    let key = select_active_group(date, &catalog.groups)?;
    let group = catalog
        .group(key)
        .ok_or_else(|| Error::UnknownGroup(key.to_string()))?;
    let saint = saint_of_the_day(date, &catalog)?;

    println!("\n{} — {}", date.format("%A, %B %e %Y"), group.name);
    println!();
    for (i, item) in group.items.iter().enumerate() {
        println!("  {}. {}", i + 1, item.title);
    }
    println!();
    println!("Saint of the day: {} (feast: {})", saint.name, saint.feast);
    println!("  {}", saint.biography);
    println!();

    Ok(())
}

fn cmd_pray(
    data_dir: PathBuf,
    date: NaiveDate,
    group: Option<String>,
    fresh: bool,
    no_save: bool,
    auto_complete: bool,
    config: &Config,
) -> Result<()> {
    std::fs::create_dir_all(&data_dir)?;
    let snapshot_path = data_dir.join("session.json");
    let journal_path = data_dir.join("journal.jsonl");

    let catalog = load_catalog(config)?;

    // Resume a saved session when one exists and still fits the catalog;
    // otherwise start fresh from the daily selection.
    let mut session = None;
    if !fresh {
        if let Some(snapshot) = SessionSnapshot::load(&snapshot_path)? {
            match DevotionSession::resume(&catalog, snapshot) {
                Ok(s) => {
                    println!("Resuming saved session.");
                    session = Some(s);
                }
                Err(e) => {
                    tracing::warn!("Saved session no longer valid ({}), starting fresh", e);
                }
            }
        }
    }
    let mut session = match session {
        Some(s) => s,
        None => DevotionSession::start(&catalog, date)?,
    };

    // A resumed session may be days old; re-derive unless the user chose.
    session.refresh_for_date(date)?;

    if let Some(ref key) = group {
        session.select_group(key)?;
    }

    if auto_complete {
        while !session.is_complete() {
            session.advance();
        }
    }

    // Session loop
    loop {
        if session.is_complete() {
            let view = session.view();
            println!("\n✓ Devotion complete: {}", view.group_name);

            let mut journal = JsonlJournal::new(&journal_path);
            journal.append(&CompletedDevotion {
                id: uuid::Uuid::new_v4(),
                group_id: view.group_id.to_string(),
                items_completed: view.item_count,
                completed_on: date,
                recorded_at: Utc::now(),
            })?;
            SessionSnapshot::clear(&snapshot_path)?;
            break;
        }

        display_session(&session.view());

        match prompt_user_action()? {
            UserAction::Advance => {
                session.advance();
            }
            UserAction::Jump(index) => {
                // 1-based on the prompt, 0-based in the engine.
                if index == 0 {
                    eprintln!("Items are numbered from 1.");
                    continue;
                }
                if let Err(e) = session.jump_to(index - 1) {
                    eprintln!("{}", e);
                }
            }
            UserAction::SelectGroup(key) => {
                if let Err(e) = session.select_group(&key) {
                    eprintln!("{}", e);
                }
            }
            UserAction::Quit => {
                if no_save {
                    println!("\nLeaving session without saving.");
                } else {
                    session.snapshot().save(&snapshot_path)?;
                    println!("\nSession saved. Run `vigil pray` to pick up where you left off.");
                }
                return Ok(());
            }
        }
    }

    Ok(())
}

fn cmd_history(data_dir: PathBuf, days: i64) -> Result<()> {
    let journal_path = data_dir.join("journal.jsonl");
    let entries = journal::read_recent_entries(&journal_path, days)?;

    if entries.is_empty() {
        println!("No completed devotions in the last {} days.", days);
        return Ok(());
    }

    println!("\nCompleted devotions (last {} days):", days);
    for entry in &entries {
        println!(
            "  {}  {} ({} items)",
            entry.completed_on, entry.group_id, entry.items_completed
        );
    }
    println!();

    Ok(())
}

fn display_session(view: &SessionView<'_>) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {}", view.group_name.to_uppercase());
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!(
        "  {} of {}: {}",
        view.item_index + 1,
        view.item_count,
        view.item.title
    );
    println!("  {}", view.item.meditation);

    if let (Some(reps), Some(target)) = (view.repetitions, view.repetition_target) {
        println!();
        println!("  → Repetitions: {}/{}", reps, target);
    }

    if let Some(ref media) = view.item.media_ref {
        println!();
        println!("  ℹ Image: {}", media);
    }

    println!();
}

enum UserAction {
    Advance,
    Jump(usize),
    SelectGroup(String),
    Quit,
}

fn prompt_user_action() -> Result<UserAction> {
    println!("─────────────────────────────────────────");
    println!("Press Enter to advance");
    println!("  'j N' + Enter to jump to item N");
    println!("  'g KEY' + Enter to switch group");
    println!("  'q' + Enter to quit");
    print!("> ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim();

    let action = if input.is_empty() {
        UserAction::Advance
    } else if input.eq_ignore_ascii_case("q") {
        UserAction::Quit
    } else if let Some(rest) = input.strip_prefix("j ") {
        match rest.trim().parse::<usize>() {
            Ok(n) => UserAction::Jump(n),
            Err(_) => {
                eprintln!("Could not parse item number '{}'", rest.trim());
                UserAction::Advance
            }
        }
    } else if let Some(rest) = input.strip_prefix("g ") {
        UserAction::SelectGroup(rest.trim().to_string())
    } else {
        UserAction::Advance
    };

    Ok(action)
}
