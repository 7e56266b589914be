//! YAWL Privileges CLI
//!
//! Inspection tool for the task privileges declared in a YAWL specification.
//! Reads the specification XML, optionally resolves participants and roles
//! against a JSON directory file, and prints or checks the result.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dotenv::dotenv;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use yawl_privileges::{
    DecodeMode, InMemoryDirectory, ParticipantId, PrivilegeCodec, PrivilegeError, PrivilegeKind,
    PrivilegeRegistry, PrivilegeTable, Settings,
};

#[derive(Parser)]
#[command(name = "yawl-privileges")]
#[command(about = "Inspect and check the task privileges of a YAWL specification")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON participant directory used to resolve participants and expand roles
    #[arg(long, global = true)]
    directory: Option<PathBuf>,

    /// Settings file (defaults to ./yawl-privileges.toml if present)
    #[arg(long, global = true, env = "YAWL_PRIVILEGES_CONFIG")]
    config: Option<PathBuf>,

    /// Drop participants the directory cannot resolve
    #[arg(long, global = true)]
    strict: bool,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every task's privileges
    Show {
        /// Specification XML file
        spec: PathBuf,
    },

    /// Check one privilege; exits with status 1 when denied
    Check {
        /// Specification XML file
        spec: PathBuf,

        /// Task id
        #[arg(long)]
        task: String,

        /// Privilege name, e.g. canSkip
        #[arg(long)]
        privilege: String,

        /// Participant id
        #[arg(long)]
        participant: String,
    },

    /// List every privilege a participant holds
    Participant {
        /// Specification XML file
        spec: PathBuf,

        /// Participant id
        participant: String,
    },

    /// Re-emit a task's privileges as canonical XML
    Encode {
        /// Specification XML file
        spec: PathBuf,

        /// Task id
        #[arg(long)]
        task: String,
    },

    /// List the privilege kinds
    Kinds,
}

fn main() -> Result<ExitCode> {
    // .env is optional
    dotenv().ok();

    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref()).context("failed to load settings")?;

    // Initialize logging; RUST_LOG wins over the configured level
    let log_level = if cli.verbose { "debug" } else { settings.logging.level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let directory_path = cli.directory.clone().or_else(|| settings.directory_path.clone());
    let directory = directory_path
        .as_deref()
        .map(|path| {
            InMemoryDirectory::load(path)
                .with_context(|| format!("failed to load directory {}", path.display()))
        })
        .transpose()?;

    let mode = if cli.strict { DecodeMode::Strict } else { settings.decode_mode() };
    let mut codec = PrivilegeCodec::new().with_mode(mode);
    if let Some(directory) = &directory {
        codec = codec.with_directory(directory);
    }

    let json = cli.json || settings.output.json;

    match cli.command {
        Commands::Show { spec } => {
            let table = load_table(&codec, &spec)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&table)?);
            } else {
                print_table(&table);
            }
        }

        Commands::Check {
            spec,
            task,
            privilege,
            participant,
        } => {
            let kind: PrivilegeKind = privilege.parse()?;
            let participant = ParticipantId::from(participant);
            let table = load_table(&codec, &spec)?;

            let allowed = match table.check(&task, kind, &participant) {
                Ok(()) => true,
                Err(PrivilegeError::Denied { .. }) => false,
                Err(e) => return Err(e.into()),
            };

            if json {
                let decision = serde_json::json!({
                    "task": task,
                    "privilege": kind,
                    "participant": participant,
                    "allowed": allowed,
                });
                println!("{}", serde_json::to_string_pretty(&decision)?);
            } else if allowed {
                println!("{} {} may {} on task {}", "ALLOWED".green().bold(), participant, kind, task);
            } else {
                println!("{} {} may not {} on task {}", "DENIED".red().bold(), participant, kind, task);
            }

            if !allowed {
                return Ok(ExitCode::from(1));
            }
        }

        Commands::Participant { spec, participant } => {
            let table = load_table(&codec, &spec)?;
            let evaluation = table.evaluate_participant(&ParticipantId::from(participant));

            if json {
                println!("{}", serde_json::to_string_pretty(&evaluation)?);
            } else {
                println!(
                    "{} holds {} of {} privileges across {} tasks",
                    evaluation.participant.as_str().bold(),
                    evaluation.allowed_count,
                    evaluation.allowed_count + evaluation.denied_count,
                    evaluation.tasks.len()
                );
                for task in evaluation.privileged_tasks() {
                    let kinds: Vec<&str> = task.allowed.iter().map(|kind| kind.name()).collect();
                    println!("  {:<24} {}", task.task_id, kinds.join(", ").green());
                }
            }
        }

        Commands::Encode { spec, task } => {
            let table = load_table(&codec, &spec)?;
            match table.encode_task(&task) {
                Some(xml) => println!("{}", xml?),
                None => bail!("task {} has no privileges block", task),
            }
        }

        Commands::Kinds => {
            for kind in PrivilegeKind::ALL {
                if json {
                    println!("{}", serde_json::to_string(&kind)?);
                } else {
                    println!("{:<24} {}", kind.name().bold(), kind.description());
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn load_table(codec: &PrivilegeCodec<'_>, spec: &Path) -> Result<PrivilegeTable> {
    let xml = std::fs::read_to_string(spec)
        .with_context(|| format!("failed to read specification {}", spec.display()))?;
    let table = codec
        .decode_specification(&xml)
        .with_context(|| format!("failed to parse specification {}", spec.display()))?;

    info!(spec = %spec.display(), tasks = table.len(), mode = ?codec.mode(), "loaded privileges");
    Ok(table)
}

fn print_table(table: &PrivilegeTable) {
    if table.is_empty() {
        println!("no task privileges found");
        return;
    }

    for registry in table.iter() {
        println!("{}", registry.owner_task_id().bold());
        print_registry(registry);
    }
}

fn print_registry(registry: &PrivilegeRegistry) {
    let declared = registry.declared_kinds();
    if declared.is_empty() {
        println!("  {}", "(no privileges)".dimmed());
        return;
    }

    for kind in declared {
        let participants: Vec<&str> = registry.participants(kind).map(|id| id.as_str()).collect();
        let roles: Vec<&str> = registry.roles(kind).map(|id| id.as_str()).collect();
        debug!(task = registry.owner_task_id(), privilege = %kind, "printing privilege");

        let mode = if registry.is_allow_all(kind) {
            "everyone except".yellow()
        } else {
            "only".cyan()
        };
        print!("  {:<24} {} [{}]", kind, mode, participants.join(", "));
        if !roles.is_empty() {
            print!(" roles [{}]", roles.join(", "));
        }
        println!();
    }
}
