use std::error::Error;

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use engine::{
    Engine, ExportFormat, NewService, PlanningBoard, PlanningStatus, QuickEditRequest,
    QuickEditTarget, calendar,
};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "servir_admin")]
#[command(about = "Admin utilities for Servir (bootstrap services, members and plannings)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite:./servir.db?mode=rwc")]
    database_url: String,

    /// Identity recorded as creator of members and plannings.
    #[arg(long, env = "SERVIR_ADMIN_ID")]
    admin: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(subcommand)]
    Profile(ProfileCommand),
    #[command(subcommand)]
    Service(ServiceCommand),
    #[command(subcommand)]
    Member(MemberCommand),
    #[command(subcommand)]
    Planning(PlanningCommand),
}

#[derive(Subcommand, Debug)]
enum ProfileCommand {
    Create(ProfileCreateArgs),
    /// Accent-insensitive search; lists everyone without a term.
    Search { term: Option<String> },
}

#[derive(Args, Debug)]
struct ProfileCreateArgs {
    #[arg(long)]
    full_name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    role: Option<String>,
}

#[derive(Subcommand, Debug)]
enum ServiceCommand {
    Create(ServiceCreateArgs),
    List {
        /// Include inactive services.
        #[arg(long)]
        all: bool,
    },
    Activate { id: Uuid },
    Deactivate { id: Uuid },
}

#[derive(Args, Debug)]
struct ServiceCreateArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    display_name: String,
    #[arg(long)]
    emoji: Option<String>,
    #[arg(long)]
    description: Option<String>,
}

#[derive(Subcommand, Debug)]
enum MemberCommand {
    Add {
        #[arg(long)]
        service: Uuid,
        #[arg(long)]
        user: Uuid,
        #[arg(long)]
        notes: Option<String>,
    },
    Remove { id: Uuid },
    List {
        #[arg(long)]
        service: Uuid,
    },
}

#[derive(Subcommand, Debug)]
enum PlanningCommand {
    /// Prints the weekly member × date grid.
    Board {
        #[arg(long)]
        service: Uuid,
        /// Any date of the week, defaults to today.
        #[arg(long, value_parser = parse_date)]
        anchor: Option<NaiveDate>,
    },
    /// Creates or updates the planning of a member on a date.
    Set(PlanningSetArgs),
    Delete { id: Uuid },
    Export {
        #[arg(long)]
        service: Uuid,
        #[arg(long, default_value = "csv", value_parser = parse_format)]
        format: ExportFormat,
    },
}

#[derive(Args, Debug)]
struct PlanningSetArgs {
    #[arg(long)]
    service: Uuid,
    /// Membership id.
    #[arg(long)]
    member: Uuid,
    #[arg(long, value_parser = parse_date)]
    date: NaiveDate,
    #[arg(long)]
    task: String,
    #[arg(long, default_value = "planned", value_parser = parse_status)]
    status: PlanningStatus,
    #[arg(long)]
    notes: Option<String>,
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    calendar::parse_date(raw).map_err(|err| err.to_string())
}

fn parse_status(raw: &str) -> Result<PlanningStatus, String> {
    PlanningStatus::try_from(raw).map_err(|err| err.to_string())
}

fn parse_format(raw: &str) -> Result<ExportFormat, String> {
    ExportFormat::try_from(raw).map_err(|err| err.to_string())
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

fn print_board(board: &PlanningBoard) {
    const WIDTH: usize = 14;

    let mut header = format!("{:<20}", "");
    for date in &board.axis {
        header.push_str(&format!("{:<WIDTH$}", calendar::format_date(*date)));
    }
    println!("{}", header.trim_end());

    for (index, member) in board.members.iter().enumerate() {
        let mut line = format!("{:<20}", member.display_name());
        for cell in board.row(index) {
            let text = match cell {
                Some(view) => format!("{} ({})", view.planning.task, view.planning.status.label()),
                None => "·".to_string(),
            };
            let text: String = text.chars().take(WIDTH - 1).collect();
            line.push_str(&format!("{text:<WIDTH$}"));
        }
        println!("{}", line.trim_end());
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;
    let engine = Engine::builder().database(db).build().await?;
    let admin = cli.admin.as_deref();

    match cli.command {
        Command::Profile(ProfileCommand::Create(args)) => {
            let profile = engine
                .create_profile(
                    args.full_name.as_deref(),
                    args.email.as_deref(),
                    args.role.as_deref(),
                )
                .await?;
            println!("created profile: {} ({})", profile.display_name(), profile.id);
        }
        Command::Profile(ProfileCommand::Search { term }) => {
            let profiles = engine
                .search_profiles(term.as_deref().unwrap_or_default())
                .await?;
            for profile in profiles {
                println!(
                    "{}  {}  {}",
                    profile.id,
                    profile.display_name(),
                    profile.email.as_deref().unwrap_or("-")
                );
            }
        }
        Command::Service(ServiceCommand::Create(args)) => {
            let service = engine
                .create_service(NewService {
                    name: args.name,
                    display_name: args.display_name,
                    emoji: args.emoji,
                    description: args.description,
                })
                .await?;
            println!("created service: {} ({})", service.name, service.id);
        }
        Command::Service(ServiceCommand::List { all }) => {
            for service in engine.list_services(!all).await? {
                println!(
                    "{}  {} {}{}",
                    service.id,
                    service.emoji.as_deref().unwrap_or(" "),
                    service.display_name,
                    if service.is_active { "" } else { " (inactive)" }
                );
            }
        }
        Command::Service(ServiceCommand::Activate { id }) => {
            engine.set_service_active(id, true).await?;
            println!("activated service: {id}");
        }
        Command::Service(ServiceCommand::Deactivate { id }) => {
            engine.set_service_active(id, false).await?;
            println!("deactivated service: {id}");
        }
        Command::Member(MemberCommand::Add {
            service,
            user,
            notes,
        }) => {
            let member = engine
                .add_member(service, user, notes.as_deref(), admin)
                .await?;
            println!("added member: {}", member.id);
        }
        Command::Member(MemberCommand::Remove { id }) => {
            engine.remove_member(id).await?;
            println!("removed member: {id}");
        }
        Command::Member(MemberCommand::List { service }) => {
            for member in engine.list_active_members(service).await? {
                println!("{}  {}", member.member.id, member.display_name());
            }
        }
        Command::Planning(PlanningCommand::Board { service, anchor }) => {
            let anchor = anchor.unwrap_or_else(|| Local::now().date_naive());
            let board = engine.planning_board(service, anchor).await?;
            print_board(&board);
        }
        Command::Planning(PlanningCommand::Set(args)) => {
            let saved = engine
                .save_planning(
                    args.service,
                    QuickEditRequest {
                        target: QuickEditTarget::Cell {
                            date: args.date,
                            member_id: args.member,
                        },
                        task: args.task,
                        status: args.status,
                        notes: args.notes,
                    },
                    admin,
                    args.date,
                )
                .await?;
            println!("saved planning: {}", saved.planning.id);
            print_board(&saved.board);
        }
        Command::Planning(PlanningCommand::Delete { id }) => {
            let planning = engine.delete_planning(id).await?;
            println!(
                "deleted planning: {} on {}",
                planning.task,
                calendar::format_date(planning.date)
            );
        }
        Command::Planning(PlanningCommand::Export { service, format }) => {
            print!("{}", engine.export_plannings(service, format).await?);
        }
    }

    Ok(())
}
