//! Terminal host for the Taskpad core.
//!
//! # Responsibility
//! - Map subcommands onto `TodoController` operations over a SQLite store.
//! - Print notices, reminders and the rendered list to stdout.

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use log::info;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use taskpad_core::{
    default_log_level, init_logging, now_epoch_ms, parse_local_datetime, Category,
    FilterCriterion, HostCapabilities, Notifier, NotifyError, SqliteKeyValueStore,
    TaskpadConfig, TodoController,
};

const DB_FILE_NAME: &str = "taskpad.sqlite3";
const CONFIG_FILE_NAME: &str = "config.json";

/// Terminal stand-in for desktop notifications.
struct StdoutNotifier;

impl Notifier for StdoutNotifier {
    fn notify(&self, title: &str, body: &str) -> Result<(), NotifyError> {
        println!("🔔 {title}: {body}");
        Ok(())
    }
}

type CliController = TodoController<SqliteKeyValueStore, StdoutNotifier>;

fn main() -> ExitCode {
    let matches = cli().get_matches();
    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn cli() -> Command {
    Command::new("taskpad")
        .version(taskpad_core::core_version())
        .about("Categorized to-do list with due-date reminders")
        .subcommand_required(true)
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Directory holding taskpad.sqlite3, config.json and logs/"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .help("trace|debug|info|warn|error"),
        )
        .subcommand(
            Command::new("add")
                .about("Add a task")
                .arg(Arg::new("content").required(true).num_args(1..))
                .arg(
                    Arg::new("category")
                        .long("category")
                        .short('c')
                        .help("personal|work|urgent"),
                )
                .arg(
                    Arg::new("due")
                        .long("due")
                        .short('d')
                        .help("Local due date-time, YYYY-MM-DDTHH:MM"),
                ),
        )
        .subcommand(
            Command::new("list").about("Show tasks").arg(
                Arg::new("filter")
                    .long("filter")
                    .short('f')
                    .default_value("all")
                    .help("all|personal|work|urgent|completed"),
            ),
        )
        .subcommand(
            Command::new("toggle")
                .about("Flip completion of a task")
                .arg(Arg::new("id").required(true)),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete a task")
                .arg(Arg::new("id").required(true)),
        )
        .subcommand(Command::new("theme").about("Toggle dark mode"))
        .subcommand(
            Command::new("tick")
                .about("Run one reminder scan")
                .arg(
                    Arg::new("no-notify")
                        .long("no-notify")
                        .action(ArgAction::SetTrue)
                        .help("Treat notification permission as denied"),
                ),
        )
        .subcommand(
            Command::new("export").about("Write a JSON backup").arg(
                Arg::new("out")
                    .long("out")
                    .short('o')
                    .value_parser(value_parser!(PathBuf))
                    .help("Target file (default: ./todo-backup-YYYY-MM-DD.json)"),
            ),
        )
        .subcommand(
            Command::new("import")
                .about("Replace all tasks with a JSON backup")
                .arg(
                    Arg::new("file")
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                ),
        )
        .subcommand(Command::new("version").about("Print the core version"))
}

fn run(matches: &ArgMatches) -> Result<(), String> {
    if let Some(("version", _)) = matches.subcommand() {
        println!("taskpad_core version={}", taskpad_core::core_version());
        return Ok(());
    }

    let data_dir = resolve_data_dir(matches.get_one::<PathBuf>("data-dir"))?;
    std::fs::create_dir_all(&data_dir)
        .map_err(|err| format!("failed to create `{}`: {err}", data_dir.display()))?;
    let level = matches
        .get_one::<String>("log-level")
        .map(String::as_str)
        .unwrap_or_else(|| default_log_level());
    init_logging(level, &data_dir.join("logs").to_string_lossy())
        .map_err(|err| err.to_string())?;

    let config = TaskpadConfig::load_or_default(data_dir.join(CONFIG_FILE_NAME))
        .map_err(|err| err.to_string())?;
    let notifications = !matches!(
        matches.subcommand(),
        Some(("tick", args)) if args.get_flag("no-notify")
    );
    let kv = SqliteKeyValueStore::open(data_dir.join(DB_FILE_NAME))
        .map_err(|err| format!("failed to open storage: {err}"))?;
    let mut controller = TodoController::new(
        config,
        kv,
        StdoutNotifier,
        HostCapabilities::new(notifications, false),
    );
    let now = now_epoch_ms();

    let result = match matches.subcommand() {
        Some(("add", args)) => add(&mut controller, args, now),
        Some(("list", args)) => list(&mut controller, args, now),
        Some(("toggle", args)) => {
            let id = required(args, "id")?;
            if controller.toggle_complete(id, now) {
                Ok(())
            } else {
                Err(format!("no task with id `{id}`"))
            }
        }
        Some(("delete", args)) => {
            let id = required(args, "id")?;
            if controller.delete_task(id) {
                Ok(())
            } else {
                Err(format!("no task with id `{id}`"))
            }
        }
        Some(("theme", _)) => {
            controller.toggle_dark_mode();
            println!("theme={}", controller.theme().as_str());
            Ok(())
        }
        Some(("tick", _)) => {
            tick(&mut controller, now);
            Ok(())
        }
        Some(("export", args)) => export(&mut controller, args.get_one::<PathBuf>("out"), now),
        Some(("import", args)) => {
            let path = args
                .get_one::<PathBuf>("file")
                .ok_or_else(|| "missing import file".to_string())?;
            import(&mut controller, path)
        }
        Some((other, _)) => Err(format!("unknown command `{other}`")),
        None => Err("no command given".to_string()),
    };

    print_notices(&mut controller);
    result
}

fn add(controller: &mut CliController, args: &ArgMatches, now: i64) -> Result<(), String> {
    let content = args
        .get_many::<String>("content")
        .map(|words| words.cloned().collect::<Vec<_>>().join(" "))
        .unwrap_or_default();
    let category = match args.get_one::<String>("category") {
        Some(raw) => {
            Some(Category::parse(raw).ok_or_else(|| format!("unknown category `{raw}`"))?)
        }
        None => None,
    };
    let due_date = match args.get_one::<String>("due") {
        Some(raw) => {
            Some(parse_local_datetime(raw).ok_or_else(|| format!("invalid due date `{raw}`"))?)
        }
        None => None,
    };

    match controller.add_task(&content, category, due_date, now) {
        Some(task_id) => {
            println!("{task_id}");
            Ok(())
        }
        None => Err("task not added".to_string()),
    }
}

fn list(controller: &mut CliController, args: &ArgMatches, now: i64) -> Result<(), String> {
    let raw = args
        .get_one::<String>("filter")
        .map(String::as_str)
        .unwrap_or("all");
    let criterion = FilterCriterion::parse(raw).ok_or_else(|| format!("unknown filter `{raw}`"))?;
    controller.set_filter(criterion);

    let view = controller.render(now);
    println!("{} · filter={} · theme={}", view.stats_text, view.filter, view.theme.as_str());
    if view.is_empty {
        println!("  No tasks yet. Add one above!");
    }
    for item in &view.items {
        let mark = if item.completed { "x" } else { " " };
        let due = item
            .due
            .as_ref()
            .map(|due| format!("  [{}]", due.text))
            .unwrap_or_default();
        println!(
            "  [{mark}] {} {}  {}{due}",
            item.category_icon, item.content, item.id
        );
    }
    Ok(())
}

fn tick(controller: &mut CliController, now: i64) {
    controller.start(now);
    let reminders = controller.poll(now);
    controller.stop();
    info!("event=cli_tick module=cli status=ok fired={}", reminders.len());
    match controller.modal().message() {
        Some(message) => println!("⏰ {message}"),
        None => println!("no reminders due"),
    }
}

fn export(
    controller: &mut CliController,
    out: Option<&PathBuf>,
    now: i64,
) -> Result<(), String> {
    let file = controller.export(now).map_err(|err| err.to_string())?;
    let target = out
        .cloned()
        .unwrap_or_else(|| PathBuf::from(&file.file_name));
    std::fs::write(&target, file.json)
        .map_err(|err| format!("failed to write `{}`: {err}", target.display()))?;
    println!("{}", target.display());
    Ok(())
}

fn import(controller: &mut CliController, path: &Path) -> Result<(), String> {
    let text = std::fs::read_to_string(path)
        .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
    let count = controller.import_json(&text).map_err(|err| err.to_string())?;
    println!("imported={count}");
    Ok(())
}

fn print_notices(controller: &mut CliController) {
    for notice in controller.drain_notices() {
        println!("[{}] {}", notice.level.as_str(), notice.message);
    }
}

fn required<'a>(args: &'a ArgMatches, name: &str) -> Result<&'a str, String> {
    args.get_one::<String>(name)
        .map(String::as_str)
        .ok_or_else(|| format!("missing `{name}`"))
}

fn resolve_data_dir(flag: Option<&PathBuf>) -> Result<PathBuf, String> {
    let raw = match flag {
        Some(path) => path.clone(),
        None => match std::env::var("TASKPAD_DATA_DIR") {
            Ok(value) if !value.trim().is_empty() => PathBuf::from(value.trim()),
            _ => PathBuf::from(".taskpad"),
        },
    };
    if raw.is_absolute() {
        return Ok(raw);
    }
    let cwd = std::env::current_dir()
        .map_err(|err| format!("failed to resolve working directory: {err}"))?;
    Ok(cwd.join(raw))
}
