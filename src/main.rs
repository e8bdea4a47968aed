//! Disease Prediction - Main Entry Point
//!
//! Loads every model and schema up front, then serves prediction requests
//! one at a time from the terminal (or once, from `--task` and `--set`).

use anyhow::Result;
use clap::Parser;
use disease_prediction::{
    catalogue::Catalogue,
    config::{AppConfig, LoggingConfig},
    input::{ConsoleSink, MapValueProvider, TerminalProvider},
    prediction::PredictionAdapter,
    types::{PredictionReport, PredictionResult},
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Disease prediction from pre-trained classifiers
#[derive(Parser, Debug)]
#[command(name = "disease-prediction", version, about)]
struct Args {
    /// Path to the configuration file
    #[arg(long, default_value = "config/config.toml")]
    config: PathBuf,

    /// Run a single prediction for this task id and exit
    #[arg(long)]
    task: Option<String>,

    /// Field value for `--task`, as NAME=VALUE (repeatable)
    #[arg(long = "set", value_name = "NAME=VALUE", requires = "task")]
    set: Vec<String>,

    /// Print results as JSON reports
    #[arg(long)]
    json: bool,

    /// List tasks and their fields, then exit
    #[arg(long)]
    list: bool,
}

fn init_logging(logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("disease_prediction={}", logging.level).parse()?);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    match logging.format.as_str() {
        "json" => builder.json().init(),
        _ => builder.init(),
    }
    Ok(())
}

fn print_result(result: &PredictionResult, json: bool) -> Result<()> {
    if json {
        let report = PredictionReport::new(result);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Result: {}", result.verdict);
    }
    Ok(())
}

fn print_tasks(catalogue: &Catalogue) {
    for task in catalogue.registry().list_tasks() {
        let fields = catalogue.schema(&task.id).unwrap_or_default();
        let arity = catalogue.model(&task.id).map(|m| m.input_arity()).unwrap_or(0);
        println!(
            "{} ({}): {} fields, model expects {}",
            task.display_name,
            task.id,
            fields.len(),
            arity
        );
        for field in fields {
            println!(
                "  {:>2}. {:<28} {:<10} {}",
                field.position,
                field.name,
                field.kind,
                field.prompt()
            );
        }
    }
}

/// Menu loop: pick a task, fill its fields, show the verdict, repeat.
fn run_interactive<R: BufRead, W: Write>(
    adapter: &PredictionAdapter<'_>,
    terminal: &mut TerminalProvider<R, W>,
    json: bool,
) -> Result<()> {
    let tasks = adapter.catalogue().registry().list_tasks();
    let mut sink = ConsoleSink;

    loop {
        terminal.say("\nDisease Prediction")?;
        for (index, task) in tasks.iter().enumerate() {
            terminal.say(&format!("  {}. {}", index + 1, task.display_name))?;
        }

        let Some(choice) = terminal.ask("Select a task (number or name, q to quit): ")? else {
            break;
        };
        if choice.is_empty() {
            continue;
        }
        if choice.eq_ignore_ascii_case("q") || choice.eq_ignore_ascii_case("quit") {
            break;
        }

        let task_id = match choice.parse::<usize>() {
            Ok(n) if (1..=tasks.len()).contains(&n) => tasks[n - 1].id.clone(),
            _ => choice,
        };

        if let Ok(task) = adapter.catalogue().registry().resolve(&task_id) {
            terminal.say(&format!("\n{} Prediction", task.display_name))?;
        }

        if let Some(result) = adapter.submit(&task_id, &mut *terminal, &mut sink) {
            print_result(&result, json)?;
        }
    }

    terminal.say("Stay Healthy!")?;
    Ok(())
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let config = AppConfig::load_from_path(&args.config)?;
    init_logging(&config.logging)?;

    info!("Starting Disease Prediction");

    // Fatal on any missing model, dataset or unreadable schema
    let catalogue = Catalogue::load(&config)?;
    info!(
        tasks = catalogue.registry().len(),
        "All models and schemas loaded"
    );

    if args.list {
        print_tasks(&catalogue);
        return Ok(ExitCode::SUCCESS);
    }

    let adapter = PredictionAdapter::new(&catalogue);
    let mut terminal = TerminalProvider::new(io::stdin().lock(), io::stdout());

    let Some(task_id) = args.task.as_deref() else {
        run_interactive(&adapter, &mut terminal, args.json)?;
        return Ok(ExitCode::SUCCESS);
    };

    let mut sink = ConsoleSink;
    let outcome = if args.set.is_empty() {
        adapter.submit(task_id, &mut terminal, &mut sink)
    } else {
        let mut provider = MapValueProvider::from_assignments(&args.set)?;
        adapter.submit(task_id, &mut provider, &mut sink)
    };

    match outcome {
        Some(result) => {
            print_result(&result, args.json)?;
            Ok(ExitCode::SUCCESS)
        }
        None => Ok(ExitCode::FAILURE),
    }
}
