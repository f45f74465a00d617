use clap::{Parser, Subcommand};
use ward_index::IndexError;
use ward_record::PatientId;
use ward_registry::Registry;
use ward_sort::SortKey;

mod render;
mod session;

use render::OutputMode;
use session::MenuSession;

#[derive(Debug, Parser)]
#[command(
    name = "ward",
    version,
    about = "Hospital patient registry indexed by a binary search tree and an AVL tree",
    long_about = "ward keeps admitted patients in two search trees keyed by patient id:\n\
        a plain binary search tree and a self-balancing AVL tree. Every admission and\n\
        discharge is applied to both, and the trees can be inspected side by side.\n\n\
        EXAMPLES:\n\
        \n  ward                         Start the interactive menu with sample patients\n\
        \n  ward --empty menu            Start the menu with an empty registry\n\
        \n  ward tree                    Print both trees level by level\n\
        \n  ward --format json stats     Registry statistics as JSON\n\
        \n  ward sort date               Patients ordered by admission date",
    after_help = "Set RUST_LOG to override the log level chosen by -v."
)]
struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Start without the five sample patients
    #[arg(long, global = true)]
    empty: bool,

    /// Output format for listings and statistics
    #[arg(long, value_enum, default_value_t = OutputMode::Text, global = true)]
    format: OutputMode,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every admitted patient in id order
    List,
    /// Look up one patient by id
    Search {
        #[arg(value_name = "ID")]
        id: PatientId,
    },
    /// List patients grouped by triage priority
    Priority,
    /// Print both index trees level by level
    Tree,
    /// Show registry statistics
    Stats,
    /// List patients sorted by priority or admission date
    Sort {
        #[arg(value_name = "KEY")]
        key: SortKey,
    },
    /// Discharge a patient and print the discharged record
    Discharge {
        #[arg(value_name = "ID")]
        id: PatientId,
    },
    #[command(
        about = "Start the interactive menu (default)",
        long_about = "Start the interactive menu.\n\n\
            Commands: admit, search, discharge, list, priority, age, condition,\n\
            sort, tree, stats, history, help, quit. Type 'help' inside the menu\n\
            for argument formats."
    )]
    Menu,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}

fn print_lines(lines: Vec<String>) {
    for l in lines {
        println!("{l}");
    }
}

fn run_menu(registry: Registry, mode: OutputMode) -> i32 {
    use rustyline::error::ReadlineError;
    use rustyline::Editor;
    let mut rl = match Editor::<(), rustyline::history::DefaultHistory>::new() {
        Ok(e) => e,
        Err(e) => {
            eprintln!("error: failed to initialize menu: {e}");
            return 2;
        }
    };

    let mut session = MenuSession::new(registry, mode);
    println!("Hospital Patient Management System. Type 'help' for commands.");
    loop {
        match rl.readline(session.prompt()) {
            Ok(line) => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    let _ = rl.add_history_entry(trimmed);
                }
                let (out, exit) = session.handle_line(&line);
                print_lines(out);
                if exit {
                    return 0;
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => return 0,
            Err(e) => {
                eprintln!("error: menu failed: {e}");
                return 2;
            }
        }
    }
}

/// Run a one-shot subcommand against `registry`, printing its output.
fn run_command(registry: &mut Registry, cmd: Command, mode: OutputMode) -> i32 {
    match cmd {
        Command::List => print_lines(render::patient_list(&registry.patients(), mode)),
        Command::Search { id } => match registry.search(id) {
            Some(p) => print_lines(render::patient(p, mode)),
            None => {
                eprintln!("error: {}", IndexError::NotFound(id));
                return 1;
            }
        },
        Command::Priority => print_lines(render::priority_groups(registry, mode)),
        Command::Tree => print_lines(render::trees(registry, mode)),
        Command::Stats => print_lines(render::statistics(&registry.statistics(), mode)),
        Command::Sort { key } => print_lines(render::patient_list(&registry.sorted(key), mode)),
        Command::Discharge { id } => match registry.discharge(id) {
            Ok(p) => {
                print_lines(render::patient(&p, mode));
                if mode == OutputMode::Text {
                    println!("Remaining patients: {}", registry.len());
                }
            }
            Err(e) => {
                eprintln!("error: {e}");
                return 1;
            }
        },
        Command::Menu => return run_menu(std::mem::take(registry), mode),
    }
    0
}

fn run_cli() -> i32 {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut registry = if cli.empty {
        Registry::new()
    } else {
        Registry::with_sample_data()
    };

    let cmd = cli.command.unwrap_or(Command::Menu);
    let rc = run_command(&mut registry, cmd, cli.format);
    if cli.verbose > 0 {
        eprintln!("note: ward exited with code {rc}");
    }
    rc
}

fn main() {
    std::process::exit(run_cli());
}
