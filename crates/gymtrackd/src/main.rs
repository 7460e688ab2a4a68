//! gymtrackd - The gymtrack attendance service
//!
//! This is the main entry point for the gymtrack service.
//! It wires together all the components:
//! - Configuration loading
//! - Store initialization
//! - Session ledger and its background sweep
//! - One-shot front-desk and report commands

mod output;

use anyhow::{Context, Result, bail};
use chrono::{Datelike, NaiveDate};
use clap::{Parser, Subcommand};
use gymtrack_api::SessionEndReason;
use gymtrack_config::{Config, load_config_or_default};
use gymtrack_core::{
    CoreEvent, Directory, LedgerService, SessionLedger, daily_export, daily_report,
    member_export, member_report, monthly_export, monthly_report,
};
use gymtrack_store::{AuditEvent, AuditEventType, AuditLog, Repositories, SqliteStore, Store};
use gymtrack_util::{
    BranchId, DATABASE_FILENAME, MemberId, RoomId, SessionId, SystemClock, default_config_path,
    format_clock_time, format_minutes, format_time_since,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal::unix::{SignalKind, signal};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// gymtrackd - Gym attendance tracking service
#[derive(Parser, Debug)]
#[command(name = "gymtrackd")]
#[command(about = "Gym attendance tracking: check-in, auto checkout and reports", long_about = None)]
struct Args {
    /// Configuration file path (default: ~/.config/gymtrack/config.toml)
    #[arg(short, long, default_value_os_t = default_config_path())]
    config: PathBuf,

    /// Data directory override (or set GYMTRACK_DATA_DIR env var)
    #[arg(short, long, env = "GYMTRACK_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the service: sweep stale sessions until SIGINT/SIGTERM
    Run,

    /// Replace members, branches and rooms from a JSON snapshot
    Import {
        /// File with `members`, `branches` and `rooms` arrays
        file: PathBuf,
    },

    /// Check a member in by phone or member id
    CheckIn { lookup: String },

    /// Close an open session
    CheckOut { session_id: SessionId },

    /// Close stale sessions now
    Sweep,

    /// Show a member's membership standing
    Status { lookup: String },

    /// List members currently inside
    Inside {
        #[arg(long)]
        branch: Option<String>,
        #[arg(long)]
        room: Option<String>,
    },

    /// Most recent check-ins, newest first
    Recent {
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Recent audit log entries
    Audit {
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// Attendance reports
    Report {
        #[command(subcommand)]
        kind: ReportKind,

        /// Print export rows as CSV
        #[arg(long, global = true, conflicts_with = "json")]
        csv: bool,

        /// Print the report as JSON
        #[arg(long, global = true)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
enum ReportKind {
    /// One day (UTC), default today
    Daily { date: Option<NaiveDate> },

    /// One month as YYYY-MM, default this month
    Monthly {
        #[arg(value_parser = parse_month)]
        month: Option<(i32, u32)>,
    },

    /// One member's history
    Member { member_id: String },
}

fn parse_month(s: &str) -> Result<(i32, u32), String> {
    let (year, month) = s
        .trim()
        .split_once('-')
        .ok_or_else(|| format!("expected YYYY-MM, got {s:?}"))?;
    let year: i32 = year.parse().map_err(|_| format!("invalid year in {s:?}"))?;
    let month: u32 = month.parse().map_err(|_| format!("invalid month in {s:?}"))?;
    if !(1..=12).contains(&month) {
        return Err(format!("month out of range in {s:?}"));
    }
    Ok((year, month))
}

/// Opened store plus a running ledger service
struct App {
    service: LedgerService,
    store: Arc<SqliteStore>,
    repos: Repositories,
}

impl App {
    async fn open(args: &Args) -> Result<Self> {
        // Load configuration
        let config: Config = load_config_or_default(&args.config)
            .with_context(|| format!("Failed to load config from {:?}", args.config))?;

        info!(
            config_path = %args.config.display(),
            auto_checkout_minutes = config.attendance.auto_checkout_minutes,
            "Configuration loaded"
        );

        let data_dir = args
            .data_dir
            .clone()
            .unwrap_or_else(|| config.service.data_dir.clone());

        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory {:?}", data_dir))?;

        // Initialize store
        let db_path = data_dir.join(DATABASE_FILENAME);
        let store = Arc::new(
            SqliteStore::open(&db_path)
                .with_context(|| format!("Failed to open database {:?}", db_path))?,
        );

        info!(db_path = %db_path.display(), "Store initialized");

        let repos = Repositories::from_store(store.clone());
        let ledger = SessionLedger::load(repos.clone(), config.attendance.clone())
            .context("Failed to load attendance sessions")?;
        let service = LedgerService::start(ledger, Arc::new(SystemClock)).await;

        Ok(Self {
            service,
            store,
            repos,
        })
    }

    async fn run(self) -> Result<()> {
        self.store
            .append_audit(AuditEvent::new(AuditEventType::ServiceStarted))?;

        let mut events = self.service.subscribe();

        // Set up signal handlers
        let mut sigterm =
            signal(SignalKind::terminate()).context("Failed to create SIGTERM handler")?;
        let mut sigint =
            signal(SignalKind::interrupt()).context("Failed to create SIGINT handler")?;

        info!(healthy = self.store.is_healthy(), "Service running");

        loop {
            tokio::select! {
                _ = sigterm.recv() => {
                    info!("Received SIGTERM, shutting down gracefully");
                    break;
                }
                _ = sigint.recv() => {
                    info!("Received SIGINT, shutting down gracefully");
                    break;
                }
                event = events.recv() => match event {
                    Ok(event) => print_event(&event),
                    Err(RecvError::Lagged(skipped)) => warn!(skipped, "Event feed lagged"),
                    Err(RecvError::Closed) => break,
                },
            }
        }

        info!("Shutting down gymtrackd");
        self.service.shutdown().await;

        if let Err(e) = self
            .store
            .append_audit(AuditEvent::new(AuditEventType::ServiceStopped))
        {
            warn!(error = %e, "Failed to log service shutdown");
        }

        info!("Shutdown complete");
        Ok(())
    }

    async fn execute(self, command: Command) -> Result<()> {
        let result = self.dispatch(command).await;
        self.service.shutdown().await;
        result
    }

    async fn dispatch(&self, command: Command) -> Result<()> {
        match command {
            Command::Run => bail!("`run` is not a one-shot command"),

            Command::Import { file } => {
                let content = std::fs::read_to_string(&file)
                    .with_context(|| format!("Failed to read {:?}", file))?;
                let directory: Directory = serde_json::from_str(&content)
                    .with_context(|| format!("Invalid directory snapshot in {:?}", file))?;
                directory.import(&self.repos)?;
                println!(
                    "Imported {} members, {} branches, {} rooms",
                    directory.members.len(),
                    directory.branches.len(),
                    directory.rooms.len()
                );
            }

            Command::CheckIn { lookup } => {
                let checkin = self.service.check_in(&lookup).await?;
                let directory = self.service.directory().await?;
                let name = directory
                    .member_name(&checkin.session.member_id)
                    .unwrap_or("Unknown");
                println!(
                    "Checked in {} at {} (session {}, membership {})",
                    name,
                    format_clock_time(&checkin.session.checkin_time),
                    checkin.session.id,
                    checkin.membership
                );
                if let Some(warning) = checkin.capacity_warning {
                    println!(
                        "Warning: room {} is at capacity ({} inside, capacity {})",
                        directory.room_name(&warning.room_id).unwrap_or(warning.room_id.as_str()),
                        warning.occupancy,
                        warning.capacity
                    );
                }
            }

            Command::CheckOut { session_id } => {
                let closed = self.service.check_out(&session_id).await?;
                println!(
                    "Checked out session {} after {}",
                    closed.id,
                    format_minutes(u64::from(closed.duration.unwrap_or_default()))
                );
            }

            Command::Sweep => {
                let closed = self.service.sweep_now().await?;
                println!("Closed {closed} stale session(s)");
            }

            Command::Status { lookup } => {
                let standing = self.service.standing(&lookup).await?;
                println!("{} ({})", standing.member.full_name, standing.member.id);
                println!(
                    "Membership: {} ({}, ends {})",
                    standing.status, standing.member.membership_plan, standing.member.end_date
                );
                println!("Days until expiry: {}", standing.days_until_expiry);
                match &standing.open_session {
                    Some(session) => println!(
                        "Inside for {} (session {})",
                        format_time_since(session.checkin_time, self.service.now()),
                        session.id
                    ),
                    None => println!("Not checked in"),
                }
            }

            Command::Inside { branch, room } => {
                let branch = branch.map(BranchId::new);
                let room = room.map(RoomId::new);
                let report = self.service.occupancy(branch.as_ref(), room.as_ref()).await;
                let directory = self.service.directory().await?;
                let now = self.service.now();

                for session in &report.open {
                    println!(
                        "{}  {:<24} {:<16} in for {}",
                        session.id,
                        directory.member_name(&session.member_id).unwrap_or("Unknown"),
                        directory.room_name(&session.room_id).unwrap_or("N/A"),
                        format_time_since(session.checkin_time, now)
                    );
                }
                for count in &report.per_room {
                    let capacity = directory
                        .room(&count.room_id)
                        .map(|r| r.capacity.to_string())
                        .unwrap_or_else(|| "?".into());
                    println!(
                        "{}: {}/{}",
                        directory.room_name(&count.room_id).unwrap_or(count.room_id.as_str()),
                        count.count,
                        capacity
                    );
                }
                println!("{} inside", report.open.len());
            }

            Command::Recent { limit } => {
                let directory = self.service.directory().await?;
                for session in self.service.recent_checkins(limit).await {
                    let state = match session.duration {
                        Some(minutes) => format_minutes(u64::from(minutes)),
                        None => "inside".to_string(),
                    };
                    println!(
                        "{} {:<24} {}",
                        session.checkin_time.format("%Y-%m-%d %H:%M"),
                        directory.member_name(&session.member_id).unwrap_or("Unknown"),
                        state
                    );
                }
            }

            Command::Audit { limit } => {
                for event in self.store.recent_audits(limit)? {
                    println!(
                        "{} {}",
                        event.timestamp.to_rfc3339(),
                        serde_json::to_string(&event.event)?
                    );
                }
            }

            Command::Report { kind, csv, json } => {
                self.report(kind, csv, json).await?;
            }
        }

        Ok(())
    }

    async fn report(&self, kind: ReportKind, csv: bool, json: bool) -> Result<()> {
        let sessions = self.service.sessions().await;
        let directory = self.service.directory().await?;
        let today = self.service.now().date_naive();

        let (table, json_value) = match kind {
            ReportKind::Daily { date } => {
                let report = daily_report(&sessions, date.unwrap_or(today));
                eprintln!(
                    "{}: {} sessions, {} members, {} total, {} average",
                    report.date,
                    report.total_sessions,
                    report.unique_members,
                    format_minutes(report.total_minutes),
                    format_minutes(report.average_minutes)
                );
                (daily_export(&report, &directory), serde_json::to_value(&report)?)
            }
            ReportKind::Monthly { month } => {
                let (year, month) = month.unwrap_or((today.year(), today.month()));
                let report = monthly_report(&sessions, year, month);
                eprintln!(
                    "{year:04}-{month:02}: {} sessions, {} members, {} total, {:.1} sessions per member",
                    report.total_sessions,
                    report.unique_members,
                    format_minutes(report.total_minutes),
                    report.average_sessions_per_member
                );
                (monthly_export(&report, &directory), serde_json::to_value(&report)?)
            }
            ReportKind::Member { member_id } => {
                let member_id = MemberId::new(member_id);
                if directory.member(&member_id).is_none() {
                    bail!("No member with id {member_id}");
                }
                let report = member_report(&sessions, &member_id);
                eprintln!(
                    "{}: {} visits, {} total, {} average, frequency {}",
                    member_id,
                    report.total_visits,
                    format_minutes(report.total_minutes),
                    format_minutes(report.average_minutes),
                    report.frequency.as_str()
                );
                (member_export(&report, &directory), serde_json::to_value(&report)?)
            }
        };

        if json {
            output::write_stdout(&format!("{}\n", serde_json::to_string_pretty(&json_value)?))?;
        } else if csv {
            info!(filename = %table.filename, rows = table.rows.len(), "Exporting report");
            output::write_stdout(&output::to_csv(&table))?;
        } else {
            output::write_stdout(&output::to_text(&table))?;
        }

        Ok(())
    }
}

fn print_event(event: &CoreEvent) {
    match event {
        CoreEvent::CheckedIn {
            member_id,
            room_id,
            capacity_warning,
            ..
        } => {
            let note = if capacity_warning.is_some() { " (over capacity)" } else { "" };
            println!("IN   {member_id} -> {room_id}{note}");
        }
        CoreEvent::CheckinDenied { lookup, reason } => {
            println!("DENY {lookup}: {reason}");
        }
        CoreEvent::SessionEnded {
            member_id,
            reason,
            duration_minutes,
            ..
        } => {
            let how = match reason {
                SessionEndReason::CheckedOut => "",
                SessionEndReason::AutoTimeout => " (auto)",
            };
            let spent = format_minutes(u64::from(*duration_minutes));
            println!("OUT  {member_id} after {spent}{how}");
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "gymtrackd starting");
    if gymtrack_util::is_mock_time_active() {
        warn!(now = %gymtrack_util::now(), "Mock time is active");
    }

    let app = App::open(&args).await?;
    match args.command {
        Command::Run => app.run().await,
        command => app.execute(command).await,
    }
}
