use std::io::{self, BufRead, Write as _};

use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use macrolog::overlay::DEFAULT_SERVING;
use macrolog::{Config, Diary, DiaryError, FoodRecord, LogEntry, OverlayState};

#[derive(Parser)]
#[command(name = "macrolog")]
#[command(version)]
#[command(about = "Terminal food diary with USDA FoodData Central search", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the food database
    Search {
        /// Free-text query, e.g. "egg" or "chicken breast"
        query: String,
    },
    /// Search, pick a result and add it to the log
    Add {
        query: String,

        /// Result number to pick without prompting
        #[arg(long, value_name = "N")]
        pick: Option<usize>,

        /// Serving size in grams
        #[arg(long, value_name = "GRAMS")]
        serving: Option<f64>,
    },
    /// Show the day's log and macro totals
    List,
    /// Change the serving size of a logged entry
    Edit {
        /// Entry number as shown by `list`
        index: usize,

        /// New serving size in grams
        #[arg(long, value_name = "GRAMS")]
        serving: Option<f64>,
    },
    /// Remove a logged entry
    Delete {
        /// Entry number as shown by `list`
        index: usize,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("macrolog=warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load();
    let mut diary = Diary::open(&config);

    match cli.command {
        Commands::Search { query } => {
            let results = diary.search(&query).await?;
            if results.is_empty() {
                println!("No results found.");
            } else {
                print_results(results);
            }
        }
        Commands::Add {
            query,
            pick,
            serving,
        } => add(&mut diary, &query, pick, serving).await?,
        Commands::List => print_log(&diary),
        Commands::Edit { index, serving } => edit(&mut diary, index, serving)?,
        Commands::Delete { index } => {
            let removed = diary
                .delete(zero_based(index)?)
                .map_err(|e| entry_error(index, e))?;
            println!("Removed {} ({} g).", removed.name, removed.serving_size);
            print_totals(&diary);
        }
    }

    Ok(())
}

async fn add(
    diary: &mut Diary,
    query: &str,
    pick: Option<usize>,
    serving: Option<f64>,
) -> Result<()> {
    let results = diary.search(query).await?;
    if results.is_empty() {
        println!("No results found.");
        return Ok(());
    }
    let count = results.len();
    print_results(results);

    let choice = match pick {
        Some(n) => n,
        None => match prompt_pick(count)? {
            Some(n) => n,
            None => {
                diary.cancel();
                println!("Cancelled.");
                return Ok(());
            }
        },
    };

    let food = diary.select(zero_based(choice)?).map_err(|e| match e {
        DiaryError::IndexOutOfRange { len, .. } => {
            anyhow!("no result {choice} (the search returned {len})")
        }
        e => e.into(),
    })?;
    print_selection(food);

    commit_serving(diary, serving, DEFAULT_SERVING, "Logged")
}

fn edit(diary: &mut Diary, index: usize, serving: Option<f64>) -> Result<()> {
    diary
        .edit(zero_based(index)?)
        .map_err(|e| entry_error(index, e))?;

    let serving_default = match diary.overlay() {
        OverlayState::Selected {
            food,
            serving_default,
            ..
        } => {
            print_selection(food);
            *serving_default
        }
        _ => bail!("no entry selected"),
    };

    commit_serving(diary, serving, serving_default, "Updated")
}

/// Read a serving size and commit the pending selection.
///
/// Interactive mode re-prompts on invalid input, matching the overlay's
/// stay-open-and-correct behavior; an explicit `--serving` flag fails fast.
fn commit_serving(
    diary: &mut Diary,
    serving: Option<f64>,
    default: f64,
    verb: &str,
) -> Result<()> {
    if let Some(grams) = serving {
        let entry = diary.commit(&grams.to_string())?;
        print_committed(&entry, verb);
        return Ok(());
    }

    loop {
        let input = prompt(&format!("Serving size in grams [{default}]: "))?;
        let input = if input.is_empty() {
            default.to_string()
        } else {
            input
        };
        match diary.commit(&input) {
            Ok(entry) => {
                print_committed(&entry, verb);
                return Ok(());
            }
            Err(DiaryError::InvalidServingSize { input }) => {
                println!("Invalid serving size {input:?}; enter a number greater than zero.");
            }
            Err(e) => return Err(e.into()),
        }
    }
}

fn prompt_pick(count: usize) -> Result<Option<usize>> {
    loop {
        let input = prompt(&format!("Pick a food [1-{count}], blank to cancel: "))?;
        if input.is_empty() {
            return Ok(None);
        }
        match input.parse::<usize>() {
            Ok(n) if (1..=count).contains(&n) => return Ok(Some(n)),
            _ => println!("Enter a number between 1 and {count}."),
        }
    }
}

fn prompt(text: &str) -> Result<String> {
    print!("{text}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Convert a 1-based entry number from the CLI to a 0-based index.
fn zero_based(shown: usize) -> Result<usize> {
    if shown == 0 {
        bail!("entry numbers start at 1");
    }
    Ok(shown - 1)
}

fn entry_error(shown: usize, e: DiaryError) -> anyhow::Error {
    match e {
        DiaryError::IndexOutOfRange { len, .. } => {
            anyhow!("no entry {shown} (the log has {len} entries)")
        }
        e => e.into(),
    }
}

fn print_results(results: &[FoodRecord]) {
    for (i, food) in results.iter().enumerate() {
        println!("{:>3}. {} - {} kcal per 100 g", i + 1, food.name, food.calories);
    }
}

fn print_selection(food: &FoodRecord) {
    println!();
    println!("{}", food.name);
    println!("  Calories: {} kcal", food.calories);
    println!("  Protein:  {} g", food.protein);
    println!("  Carbs:    {} g", food.carbs);
    println!("  Fat:      {} g", food.fat);
}

fn print_committed(entry: &LogEntry, verb: &str) {
    println!(
        "{verb} {} ({} g, {:.1} kcal).",
        entry.name, entry.serving_size, entry.calories
    );
}

fn print_log(diary: &Diary) {
    let entries = diary.log().entries();
    if entries.is_empty() {
        println!("The log is empty.");
    } else {
        println!("{:>3}  {:<44} {:>9} {:>10}", "#", "Food", "Serving", "Calories");
        for (i, entry) in entries.iter().enumerate() {
            println!(
                "{:>3}  {:<44} {:>7} g {:>10.1}",
                i + 1,
                entry.name,
                entry.serving_size,
                entry.calories
            );
        }
    }
    print_totals(diary);
}

fn print_totals(diary: &Diary) {
    let totals = diary.totals();
    println!();
    println!(
        "Totals: {:.1} kcal, {:.1} g protein, {:.1} g carbs, {:.1} g fat",
        totals.calories, totals.protein, totals.carbs, totals.fat
    );
}
