//! Command-line console for students and administrators.

use std::path::PathBuf;

use attendance_client::{AttendanceBackend, ClientConfig, HttpBackend};
use attendance_core::{
    clock::{Clock, SystemClock},
    errors::AttendanceError,
    labels::{
        display_overall_status, display_status, leave_status_label, leave_type_label,
        slot_label, truncate_reason, UNNAMED_MEMBER,
    },
    models::{
        attendance::{
            validate_auth_number, AttendanceRecord, AutoCheckInRequest, CheckInRequest,
            ExportFormat,
        },
        auth::SessionUser,
        leave::{sort_newest_first, CreateLeaveRequest, EvidenceFile, LeaveType},
        slot::Slot,
    },
    resolver::{current_slot, StatusResolver},
};
use attendance_store::LocalStore;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Result, WrapErr};
use dotenv::dotenv;
use tracing::{debug, warn, Level};
use tracing_subscriber::FmtSubscriber;

const DEFAULT_STORE_PATH: &str = ".attendctl.json";

#[derive(Parser, Debug)]
#[command(name = "attendctl")]
#[command(version)]
#[command(about = "Check in and review attendance from the terminal", long_about = None)]
struct Cli {
    /// Local state file (defaults to ATTENDANCE_STORE_PATH, then .attendctl.json)
    #[arg(long, value_name = "PATH")]
    store: Option<PathBuf>,

    /// Log backend calls
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the quick check-in slot open right now
    Slot,

    /// Sign in and remember the session
    Login {
        login_id: String,
        #[arg(short, long)]
        password: String,
    },

    /// Sign out and forget the session
    Logout,

    /// Check in with the four-digit number shown in class
    CheckIn {
        number: String,
        /// Check in to this slot instead of letting the backend pick one
        #[arg(long, value_name = "SLOT")]
        slot: Option<Slot>,
    },

    /// Show your resolved attendance for a day
    Status {
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,
    },

    /// Show every enrolled member's resolved attendance (admin)
    Board {
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,
        #[arg(long, value_name = "ID")]
        course: Option<i64>,
    },

    /// Submit, list or cancel leave requests
    Leave {
        #[command(subcommand)]
        action: LeaveAction,
    },

    /// List notices
    Notices {
        #[arg(long, default_value = "0")]
        page: u32,
    },

    /// Download the attendance sheet for a day (admin)
    Export {
        #[arg(long, value_name = "csv|excel")]
        format: ExportFormat,
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,
        /// Output file (defaults to the name the backend suggests)
        #[arg(short, long, value_name = "PATH")]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum LeaveAction {
    /// Submit a new leave request
    Request {
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: NaiveDate,
        #[arg(long = "type", value_name = "TYPE")]
        leave_type: LeaveType,
        #[arg(long)]
        reason: String,
        /// JPEG, PNG or PDF attached as evidence
        #[arg(long, value_name = "PATH")]
        evidence: Option<PathBuf>,
    },
    /// List your leave requests, newest first
    List,
    /// Withdraw a pending leave request
    Cancel { id: i64 },
}

struct Console {
    backend: HttpBackend,
    resolver: StatusResolver,
    clock: SystemClock,
    store: LocalStore,
    course_id: i64,
}

impl Console {
    fn user(&self) -> Result<SessionUser> {
        self.store
            .current_user()
            .cloned()
            .ok_or_else(|| eyre!("Not signed in; run `attendctl login` first"))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv().ok();

    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let api_config = attendance_api::config::ApiConfig::from_env()?;
    let client_config = ClientConfig::from_env()?;

    let store_path = cli
        .store
        .or_else(|| api_config.store_path.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH));
    let store = LocalStore::open(&store_path).await?;

    let backend = HttpBackend::new(&client_config)?;
    if let Some(token) = store.access_token() {
        backend.set_access_token(Some(token.to_string()));
    }
    debug!("Using backend at {}", backend.base_url());

    let mut console = Console {
        backend,
        resolver: StatusResolver::new(api_config.deadlines),
        clock: SystemClock::new(api_config.timezone),
        store,
        course_id: client_config.course_id,
    };

    run(&mut console, cli.command).await
}

async fn run(console: &mut Console, command: Command) -> Result<()> {
    match command {
        Command::Slot => show_slot(console),
        Command::Login { login_id, password } => login(console, &login_id, &password).await,
        Command::Logout => logout(console).await,
        Command::CheckIn { number, slot } => check_in(console, &number, slot).await,
        Command::Status { date } => status(console, date).await,
        Command::Board { date, course } => board(console, date, course).await,
        Command::Leave { action } => leave(console, action).await,
        Command::Notices { page } => notices(console, page).await,
        Command::Export { format, date, out } => export(console, format, date, out).await,
    }
}

fn show_slot(console: &Console) -> Result<()> {
    let now = console.clock.time();
    match current_slot(now) {
        Some(slot) => println!("{} {} ({})", now.format("%H:%M"), slot_label(slot), slot),
        None => println!("{} no quick check-in open", now.format("%H:%M")),
    }
    Ok(())
}

async fn login(console: &mut Console, login_id: &str, password: &str) -> Result<()> {
    let response = console.backend.login(login_id, password).await?;
    console
        .backend
        .set_access_token(Some(response.access_token.clone()));

    let session = console.store.save_session(login_id, response);
    println!("Signed in as {} ({})", session.user.name, session.user.login_id);
    console.store.flush().await
}

async fn logout(console: &mut Console) -> Result<()> {
    if console.store.is_authenticated() {
        if let Err(e) = console.backend.logout().await {
            warn!("Backend logout failed: {}", e);
        }
    }
    console.backend.set_access_token(None);
    console.store.clear_session();
    console.store.flush().await?;
    println!("Signed out");
    Ok(())
}

async fn check_in(console: &Console, number: &str, slot: Option<Slot>) -> Result<()> {
    validate_auth_number(number)?;
    let user = console.user()?;

    let result = match slot {
        Some(slot) => {
            console
                .backend
                .check_in(&CheckInRequest {
                    member_id: user.member_id,
                    course_id: console.course_id,
                    slot,
                    input_number: number.to_string(),
                })
                .await?
        }
        None => {
            console
                .backend
                .check_in_auto(&AutoCheckInRequest {
                    member_id: user.member_id,
                    course_id: console.course_id,
                    input_number: number.to_string(),
                })
                .await?
        }
    };

    if !result.success {
        return Err(eyre!("Check-in rejected: {}", result.message));
    }
    match result.check_time {
        Some(time) => println!("Checked in at {}", time),
        None => println!("Checked in"),
    }
    Ok(())
}

async fn status(console: &Console, date: Option<NaiveDate>) -> Result<()> {
    let user = console.user()?;
    let at = console.clock.now();
    let date = date.unwrap_or(at.date());

    let record = match console
        .backend
        .my_attendance(user.member_id, console.course_id, date)
        .await
    {
        Ok(record) => record,
        Err(AttendanceError::NotFound(_)) => AttendanceRecord::default(),
        Err(e) => return Err(e.into()),
    };
    let resolved = console.resolver.resolve_record(&record, date, at);

    println!("{} on {}", user.name, date);
    for slot in Slot::ALL {
        println!(
            "  {:<4} {:<4} {}",
            slot_label(slot),
            display_status(resolved.slot(slot)),
            record.check_time(slot).unwrap_or("")
        );
    }
    println!("  종합 {}", display_overall_status(resolved.overall.as_ref()));
    Ok(())
}

async fn board(console: &Console, date: Option<NaiveDate>, course: Option<i64>) -> Result<()> {
    let at = console.clock.now();
    let date = date.unwrap_or(at.date());
    let course_id = course.unwrap_or(console.course_id);

    let enrollments = console.backend.enrollments(course_id).await?;
    let records = console.backend.attendances(date, course_id).await?;

    println!("Course {} on {}", course_id, date);
    for enrollment in &enrollments {
        let Some(member_id) = enrollment.member_id() else {
            continue;
        };
        let record = records
            .iter()
            .find(|r| r.member_id == Some(member_id))
            .cloned()
            .unwrap_or_default();
        let resolved = console.resolver.resolve_record(&record, date, at);

        println!(
            "  {:<12} {:<4} {:<4} {:<4} | {}",
            enrollment.member_name().unwrap_or(UNNAMED_MEMBER),
            display_status(resolved.morning.as_ref()),
            display_status(resolved.lunch.as_ref()),
            display_status(resolved.dinner.as_ref()),
            display_status(resolved.overall.as_ref()),
        );
    }
    Ok(())
}

async fn leave(console: &Console, action: LeaveAction) -> Result<()> {
    let user = console.user()?;

    match action {
        LeaveAction::Request {
            date,
            leave_type,
            reason,
            evidence,
        } => {
            let request = CreateLeaveRequest {
                leave_date: date,
                leave_type,
                reason,
            };
            request.validate()?;

            let evidence = match evidence {
                Some(path) => Some(read_evidence(path).await?),
                None => None,
            };

            let created = console
                .backend
                .create_leave_request(&user.login_id, &request, evidence)
                .await?;
            println!("Submitted leave request {}", created.id);
        }
        LeaveAction::List => {
            let mut requests = console.backend.my_leave_requests(&user.login_id).await?;
            sort_newest_first(&mut requests);
            for request in &requests {
                println!(
                    "  #{:<5} {} {:<6} {:<6} {}",
                    request.id,
                    request
                        .start_date
                        .map(|d| d.to_string())
                        .unwrap_or_default(),
                    leave_type_label(request.leave_type),
                    leave_status_label(request.status),
                    truncate_reason(&request.reason, 30),
                );
            }
        }
        LeaveAction::Cancel { id } => {
            console
                .backend
                .cancel_leave_request(id, &user.login_id)
                .await?;
            println!("Cancelled leave request {}", id);
        }
    }
    Ok(())
}

async fn read_evidence(path: PathBuf) -> Result<EvidenceFile> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| eyre!("{} is not a file", path.display()))?;
    let content_type = EvidenceFile::content_type_for(&file_name)
        .ok_or_else(|| eyre!("Only JPEG, PNG or PDF files can be attached"))?;
    let bytes = tokio::fs::read(&path)
        .await
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;

    let file = EvidenceFile {
        file_name,
        content_type: content_type.to_string(),
        bytes,
    };
    file.validate()?;
    Ok(file)
}

async fn notices(console: &Console, page: u32) -> Result<()> {
    let listing = console.backend.notices(page, 10).await?;
    for notice in &listing.content {
        let date = notice
            .created_at
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        let popup = if notice.is_popup { "*" } else { " " };
        println!("  {}#{:<5} {} {}", popup, notice.id, date, notice.title);
    }
    println!(
        "Page {} of {}",
        listing.number + 1,
        listing.total_pages.max(1)
    );
    Ok(())
}

async fn export(
    console: &Console,
    format: ExportFormat,
    date: Option<NaiveDate>,
    out: Option<PathBuf>,
) -> Result<()> {
    let date = date.unwrap_or(console.clock.today());
    let file = console
        .backend
        .export_attendance(format, date, console.course_id)
        .await?;

    let out = out.unwrap_or_else(|| PathBuf::from(&file.file_name));
    tokio::fs::write(&out, &file.bytes)
        .await
        .wrap_err_with(|| format!("Failed to write {}", out.display()))?;
    println!("Saved {} ({} bytes)", out.display(), file.bytes.len());
    Ok(())
}
