//! CLI entry point for failgrade.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, logging setup,
//! and exit codes. All business logic lives in the `failgrade-app` crate.

mod host;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use failgrade_app::{
    CheckInput, StringsOutput, check_new_attempt, decision_exit_code, delete_settings,
    describe_quiz, export_backup, format_strings, import_backup, load_settings, run_strings,
    save_settings,
};
use failgrade_settings::{Overrides, ResolvedConfig};
use failgrade_store::SqliteSettingsStore;
use failgrade_types::{CourseId, QuizId, UserId};
use tracing_subscriber::EnvFilter;

use crate::host::InlineHost;

/// Env var that overrides the configured log filter.
const LOG_ENV: &str = "FAILGRADE_LOG";

#[derive(Parser, Debug)]
#[command(
    name = "failgrade",
    version,
    about = "Block further quiz attempts once a learner has passed"
)]
struct Cli {
    /// Path to failgrade config TOML. A missing file means defaults.
    #[arg(long, default_value = "failgrade.toml")]
    config: Utf8PathBuf,

    /// Override the settings database path.
    #[arg(long)]
    database: Option<String>,

    /// Override the table prefix.
    #[arg(long)]
    table_prefix: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage per-quiz settings.
    Settings {
        #[command(subcommand)]
        cmd: SettingsCommand,
    },

    /// Decide whether a learner may start another attempt.
    ///
    /// Grades are given inline. Exit code 0 = allowed, 2 = denied.
    Check {
        #[arg(long)]
        quiz_id: i64,
        #[arg(long, default_value = "0")]
        course_id: i64,
        #[arg(long)]
        user_id: i64,
        /// Number of previous attempts.
        #[arg(long)]
        attempts: u32,
        /// Aggregated grade; omit for an ungraded learner.
        #[arg(long)]
        grade: Option<f64>,
        /// Pass grade of the quiz grade item.
        #[arg(long)]
        pass_grade: Option<f64>,
        /// Treat the quiz as having no grade item.
        #[arg(long)]
        no_grade_item: bool,
    },

    /// Print the descriptions shown on the quiz view page.
    Describe {
        #[arg(long)]
        quiz_id: i64,
    },

    /// Print what personal data each active rule stores.
    Privacy,

    /// Print user-facing strings (all, or one key).
    Strings { key: Option<String> },

    /// Export or import a quiz's settings backup.
    Backup {
        #[command(subcommand)]
        cmd: BackupCommand,
    },
}

#[derive(Subcommand, Debug)]
enum SettingsCommand {
    /// Save the submitted form value.
    Save {
        #[arg(long)]
        quiz_id: i64,
        #[arg(long, action = clap::ArgAction::Set)]
        enabled: bool,
    },
    /// Delete a quiz's settings (quiz deleted).
    Delete {
        #[arg(long)]
        quiz_id: i64,
    },
    /// Print the flag for each quiz as JSON.
    Show {
        #[arg(long = "quiz-id", required = true, num_args = 1..)]
        quiz_ids: Vec<i64>,
    },
    /// Print the settings form fields and the settings-join SQL as JSON.
    Form,
}

#[derive(Subcommand, Debug)]
enum BackupCommand {
    /// Write the quiz's settings as backup XML.
    Export {
        #[arg(long)]
        quiz_id: i64,
        /// Where to write the XML (stdout if not given).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },
    /// Restore a backup onto a newly created quiz.
    Import {
        #[arg(long, short)]
        input: Utf8PathBuf,
        /// Id of the restored quiz.
        #[arg(long)]
        quiz_id: i64,
    },
}

fn main() {
    let cli = Cli::parse();

    let code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("failgrade error: {err:#}");
            1
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    let resolved = load_config(&cli)?;
    init_logging(&resolved.log_filter);
    tracing::debug!(
        database = %resolved.database,
        rules = ?resolved.registry.ids(),
        "config resolved"
    );

    match cli.cmd {
        Commands::Settings { cmd } => cmd_settings(&resolved, cmd),
        Commands::Check {
            quiz_id,
            course_id,
            user_id,
            attempts,
            grade,
            pass_grade,
            no_grade_item,
        } => {
            let host = InlineHost {
                attempts,
                grade,
                pass_grade,
                graded: !no_grade_item,
            };
            cmd_check(
                &resolved,
                QuizId(quiz_id),
                CourseId(course_id),
                UserId(user_id),
                &host,
            )
        }
        Commands::Describe { quiz_id } => cmd_describe(&resolved, QuizId(quiz_id)),
        Commands::Privacy => {
            for (id, text) in resolved.registry.privacy_declarations() {
                println!("{id}: {text}");
            }
            Ok(0)
        }
        Commands::Strings { key } => Ok(cmd_strings(key.as_deref())),
        Commands::Backup { cmd } => cmd_backup(&resolved, cmd),
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<ResolvedConfig> {
    // Missing file is allowed (defaults apply).
    let text = std::fs::read_to_string(&cli.config).unwrap_or_default();
    let cfg = if text.trim().is_empty() {
        failgrade_settings::FailgradeConfigV1::default()
    } else {
        failgrade_settings::parse_config_toml(&text)
            .with_context(|| format!("parse config: {}", cli.config))?
    };
    let overrides = Overrides {
        database: cli.database.clone(),
        table_prefix: cli.table_prefix.clone(),
    };
    failgrade_settings::resolve_config(cfg, overrides).context("resolve config")
}

fn init_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn open_store(resolved: &ResolvedConfig) -> anyhow::Result<SqliteSettingsStore> {
    if let Some(parent) = resolved.database.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    SqliteSettingsStore::open(&resolved.database, &resolved.table_prefix)
        .with_context(|| format!("open settings database: {}", resolved.database))
}

fn cmd_settings(resolved: &ResolvedConfig, cmd: SettingsCommand) -> anyhow::Result<i32> {
    match cmd {
        SettingsCommand::Save { quiz_id, enabled } => {
            let mut store = open_store(resolved)?;
            save_settings(&mut store, QuizId(quiz_id), enabled)?;
        }
        SettingsCommand::Delete { quiz_id } => {
            let mut store = open_store(resolved)?;
            delete_settings(&mut store, QuizId(quiz_id))?;
        }
        SettingsCommand::Show { quiz_ids } => {
            let store = open_store(resolved)?;
            let ids: Vec<QuizId> = quiz_ids.into_iter().map(QuizId).collect();
            let flags = load_settings(&store, &ids)?;
            let json: serde_json::Map<String, serde_json::Value> = flags
                .into_iter()
                .map(|(quiz, enabled)| (quiz.to_string(), serde_json::Value::Bool(enabled)))
                .collect();
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        SettingsCommand::Form => {
            let sql = failgrade_settings::settings_sql();
            let json = serde_json::json!({
                "fields": failgrade_settings::settings_form_fields(),
                "settings_sql": {
                    "fields": sql.fields,
                    "joins": sql.joins,
                    "params": sql.params,
                },
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }
    Ok(0)
}

fn cmd_check(
    resolved: &ResolvedConfig,
    quiz_id: QuizId,
    course_id: CourseId,
    user_id: UserId,
    host: &InlineHost,
) -> anyhow::Result<i32> {
    let store = open_store(resolved)?;
    let output = check_new_attempt(CheckInput {
        registry: &resolved.registry,
        store: &store,
        grades: host,
        attempts: host,
        quiz_id,
        course_id,
        user_id,
    })?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(decision_exit_code(&output.decision))
}

fn cmd_describe(resolved: &ResolvedConfig, quiz_id: QuizId) -> anyhow::Result<i32> {
    let store = open_store(resolved)?;
    for line in describe_quiz(&resolved.registry, &store, quiz_id, CourseId::default())? {
        println!("{line}");
    }
    Ok(0)
}

fn cmd_strings(key: Option<&str>) -> i32 {
    let output = run_strings(key);
    let text = format_strings(&output);
    match output {
        StringsOutput::NotFound { .. } => {
            eprint!("{text}");
            1
        }
        _ => {
            print!("{text}");
            0
        }
    }
}

fn cmd_backup(resolved: &ResolvedConfig, cmd: BackupCommand) -> anyhow::Result<i32> {
    match cmd {
        BackupCommand::Export { quiz_id, output } => {
            let store = open_store(resolved)?;
            let xml = export_backup(&store, QuizId(quiz_id))?;
            match output {
                Some(path) => write_text_file(&path, &xml).context("write backup")?,
                None => println!("{xml}"),
            }
        }
        BackupCommand::Import { input, quiz_id } => {
            let xml = std::fs::read_to_string(&input)
                .with_context(|| format!("read backup: {input}"))?;
            let mut store = open_store(resolved)?;
            match import_backup(&mut store, &xml, QuizId(quiz_id))? {
                Some(r) => eprintln!(
                    "failgrade: restored quiz {} as {} (enabled={})",
                    r.old_id, r.new_id, r.enabled
                ),
                None => eprintln!("failgrade: backup has no settings; nothing restored"),
            }
        }
    }
    Ok(0)
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    std::fs::write(path, text).with_context(|| format!("write text: {path}"))?;
    Ok(())
}
