use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use uuid::Uuid;

use studydesk::config::{self, AppConfig};
use studydesk::core::alerts::{Alerts, TerminalAlerts};
use studydesk::core::clock;
use studydesk::core::display;
use studydesk::core::forms::{AssignmentForm, CourseForm};
use studydesk::core::stats::DashboardStats;
use studydesk::core::timer::CompletedSession;
use studydesk::logging::{LogConfig, LogFormat, init_logging};
use studydesk::{
    Color, Planner, PlannerDb, PlannerError, PomodoroTimer, Priority, Status, TimerEvent,
};

#[derive(Parser)]
#[command(name = "studydesk")]
#[command(about = "Plan courses, assignments and focused study sessions")]
struct Cli {
    /// Planner database file
    #[arg(long, value_name = "FILE", global = true)]
    data_file: Option<PathBuf>,

    /// Config file (defaults to the platform config directory)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    log_format: LogFormat,

    /// Append logs to this file instead of stderr
    #[arg(long, value_name = "FILE", global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(flatten)]
    Planner(PlannerCommand),

    /// Inspect or create the config file
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Open the desktop dashboard
    #[cfg(feature = "gui")]
    Gui,
}

#[derive(Subcommand)]
enum PlannerCommand {
    /// Manage courses
    #[command(subcommand)]
    Course(CourseCommand),

    /// Manage assignments
    #[command(subcommand)]
    Assignment(AssignmentCommand),

    /// Log study time by hand
    #[command(subcommand)]
    Session(SessionCommand),

    /// Run the pomodoro timer in the terminal
    Timer(TimerArgs),

    /// Show the next seven days by priority
    Matrix,

    /// Show dashboard statistics
    Stats,

    /// Delete all courses, assignments and study sessions
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum CourseCommand {
    /// Add a course
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        code: String,
        /// Palette name (blue, green, purple, red, yellow, pink, indigo, teal) or #rrggbb
        #[arg(long, default_value = "blue")]
        color: Color,
    },
    /// Change a course's name, code or color
    Edit {
        /// Course id or unique id prefix
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        code: Option<String>,
        #[arg(long)]
        color: Option<Color>,
    },
    /// List courses
    List,
    /// Show a course and its assignments
    Show {
        id: String,
    },
    /// Mark a course completed; all of its assignments become done
    Complete {
        id: String,
    },
}

#[derive(Subcommand)]
enum AssignmentCommand {
    /// Add an assignment
    Add {
        #[arg(long)]
        title: String,
        /// Course id or unique id prefix
        #[arg(long)]
        course: String,
        /// Due date, YYYY-MM-DD
        #[arg(long)]
        due: String,
        #[arg(long, default_value = "medium")]
        priority: Priority,
        #[arg(long, default_value_t = 1.0)]
        hours: f64,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Edit an assignment
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        course: Option<String>,
        #[arg(long)]
        due: Option<String>,
        #[arg(long)]
        priority: Option<Priority>,
        #[arg(long)]
        hours: Option<f64>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Change an assignment's status (not_started, in_progress, done)
    Status {
        id: String,
        status: Status,
    },
    /// Show assignment details
    Show {
        id: String,
    },
    /// List open assignments, earliest due first
    List {
        /// Include done assignments
        #[arg(long)]
        all: bool,
    },
}

#[derive(Subcommand)]
enum SessionCommand {
    /// Record a finished study session
    Log {
        /// Assignment id or prefix; omit for a general session
        #[arg(long)]
        assignment: Option<String>,
        #[arg(long)]
        minutes: u32,
    },
}

#[derive(clap::Args)]
struct TimerArgs {
    /// Assignment credited with completed focus intervals
    #[arg(long)]
    assignment: Option<String>,
    /// Focus minutes (overrides config)
    #[arg(long)]
    focus: Option<u32>,
    /// Short break minutes (overrides config)
    #[arg(long)]
    short: Option<u32>,
    /// Long break minutes (overrides config)
    #[arg(long)]
    long: Option<u32>,
    /// Stop after this many focus intervals
    #[arg(long, default_value_t = 1)]
    cycles: u32,
    /// Print a notification when an interval ends
    #[arg(long)]
    notify: bool,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective configuration
    Show,
    /// Write a default config file if none exists
    Init,
}

fn main() -> anyhow::Result<()> {
    clock::init_local_offset();
    let cli = Cli::parse();

    let log_config = LogConfig::from_verbosity(cli.verbose)
        .with_format(cli.log_format)
        .with_log_file(cli.log_file.clone());
    init_logging(&log_config).context("Failed to initialize logging")?;

    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let config = AppConfig::load_or_default(&config_path)?;
    let data_file = cli.data_file.clone().unwrap_or_else(|| config.data_file_path());

    match cli.command {
        Command::Config(command) => run_config(command, &config_path, &config, &data_file),
        #[cfg(feature = "gui")]
        Command::Gui => studydesk::gui::run(data_file, config, config_path),
        Command::Planner(command) => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(run_planner(command, &data_file, &config))
        }
    }
}

async fn run_planner(command: PlannerCommand, data_file: &Path, config: &AppConfig) -> anyhow::Result<()> {
    let db = PlannerDb::open(data_file).await?;
    let mut planner = Planner::load(db.clone()).await?;

    let result = match command {
        PlannerCommand::Course(command) => run_course(command, &mut planner),
        PlannerCommand::Assignment(command) => run_assignment(command, &mut planner),
        PlannerCommand::Session(command) => run_session(command, &mut planner),
        PlannerCommand::Timer(args) => run_timer(args, &mut planner, config).await,
        PlannerCommand::Matrix => {
            print_matrix(&planner);
            Ok(())
        }
        PlannerCommand::Stats => {
            print_stats(&planner.stats(clock::local_now()));
            Ok(())
        }
        PlannerCommand::Reset { yes } => run_reset(yes, &mut planner),
    };

    // Whatever was applied before a failure still gets written.
    planner.save().await?;
    db.close().await?;
    result
}

fn run_course(command: CourseCommand, planner: &mut Planner<PlannerDb>) -> anyhow::Result<()> {
    match command {
        CourseCommand::Add { name, code, color } => {
            let form = CourseForm { name, code, color };
            let course = planner.add_course(form.validate()?)?;
            println!("Added course {} ({})", course.name, short_id(course.id));
        }
        CourseCommand::Edit { id, name, code, color } => {
            let id = resolve_course(planner, &id)?;
            let mut form = CourseForm::from_course(planner.course(id).context("course vanished")?);
            if let Some(name) = name {
                form.name = name;
            }
            if let Some(code) = code {
                form.code = code;
            }
            if let Some(color) = color {
                form.color = color;
            }
            let course = planner.update_course(id, form.validate_update()?)?;
            println!("Updated course {}", course.name);
        }
        CourseCommand::List => {
            let mut table = new_table(["ID", "Code", "Name", "Color", "Hours", "State"]);
            for course in planner.courses() {
                table.add_row([
                    short_id(course.id),
                    course.code.clone(),
                    course.name.clone(),
                    course.color.to_string(),
                    planner.course_hours(course.id).to_string(),
                    if course.is_completed { "completed" } else { "active" }.to_string(),
                ]);
            }
            println!("{table}");
        }
        CourseCommand::Show { id } => {
            let id = resolve_course(planner, &id)?;
            let course = planner.course(id).context("course vanished")?;
            println!("{} ({}){}", course.name, course.code, if course.is_completed { " - completed" } else { "" });
            let today = clock::today();
            let mut table = new_table(["ID", "Title", "Due", "Priority", "Status", "Hours"]);
            for assignment in planner.course_assignments(id) {
                table.add_row([
                    short_id(assignment.id),
                    assignment.title.clone(),
                    display::relative_due_label(assignment.due_date.date(), today),
                    assignment.priority.to_string(),
                    assignment.status.to_string(),
                    assignment.estimated_hours.to_string(),
                ]);
            }
            println!("{table}");
        }
        CourseCommand::Complete { id } => {
            let id = resolve_course(planner, &id)?;
            let completion = planner.complete_course(id)?;
            println!("{}", completion.message());
        }
    }
    Ok(())
}

fn run_assignment(command: AssignmentCommand, planner: &mut Planner<PlannerDb>) -> anyhow::Result<()> {
    match command {
        AssignmentCommand::Add { title, course, due, priority, hours, description } => {
            let form = AssignmentForm {
                title,
                course_id: Some(resolve_course(planner, &course)?),
                description,
                due_date: due,
                priority,
                estimated_hours: hours,
            };
            let assignment = planner.add_assignment(form.validate(planner.courses())?)?;
            println!("Added assignment {} ({})", assignment.title, short_id(assignment.id));
        }
        AssignmentCommand::Edit { id, title, course, due, priority, hours, description } => {
            let id = resolve_assignment(planner, &id)?;
            let mut form = AssignmentForm::from_assignment(
                planner.assignment(id).context("assignment vanished")?,
            );
            if let Some(title) = title {
                form.title = title;
            }
            if let Some(course) = course {
                form.course_id = Some(resolve_course(planner, &course)?);
            }
            if let Some(due) = due {
                form.due_date = due;
            }
            if let Some(priority) = priority {
                form.priority = priority;
            }
            if let Some(hours) = hours {
                form.estimated_hours = hours;
            }
            if let Some(description) = description {
                form.description = description;
            }
            let update = form.validate_update(planner.courses())?;
            let assignment = planner.update_assignment(id, update)?;
            println!("Updated assignment {}", assignment.title);
        }
        AssignmentCommand::Status { id, status } => {
            let id = resolve_assignment(planner, &id)?;
            planner.set_assignment_status(id, status)?;
            println!("Status set to {}", status);
        }
        AssignmentCommand::Show { id } => {
            let id = resolve_assignment(planner, &id)?;
            let assignment = planner.assignment(id).context("assignment vanished")?;
            let due = assignment.due_date.date();
            println!("{}", assignment.title);
            println!("  Course:    {}", display::course_name(planner.courses(), assignment.course_id));
            println!(
                "  Due:       {} ({})",
                display::long_date(due),
                display::relative_due_label(due, clock::today())
            );
            println!("  Priority:  {}", assignment.priority);
            println!("  Status:    {}", assignment.status);
            println!("  Estimate:  {} hours", assignment.estimated_hours);
            let description = display::plain_text(&assignment.description);
            if !description.is_empty() {
                println!();
                println!("{description}");
            }
        }
        AssignmentCommand::List { all } => {
            let today = clock::today();
            let mut assignments: Vec<_> = planner
                .assignments()
                .iter()
                .filter(|a| all || !a.is_done())
                .collect();
            assignments.sort_by_key(|a| a.due_date);
            let mut table = new_table(["ID", "Title", "Course", "Due", "Priority", "Status"]);
            for assignment in assignments {
                table.add_row([
                    short_id(assignment.id),
                    assignment.title.clone(),
                    display::course_name(planner.courses(), assignment.course_id).to_string(),
                    display::relative_due_label(assignment.due_date.date(), today),
                    assignment.priority.to_string(),
                    assignment.status.to_string(),
                ]);
            }
            println!("{table}");
        }
    }
    Ok(())
}

fn run_session(command: SessionCommand, planner: &mut Planner<PlannerDb>) -> anyhow::Result<()> {
    match command {
        SessionCommand::Log { assignment, minutes } => {
            let assignment_id = assignment
                .map(|prefix| resolve_assignment(planner, &prefix))
                .transpose()?;
            let session = planner.record_session(
                CompletedSession { assignment_id, minutes },
                clock::now(),
            )?;
            println!("Logged {} minutes", session.minutes);
        }
    }
    Ok(())
}

async fn run_timer(args: TimerArgs, planner: &mut Planner<PlannerDb>, config: &AppConfig) -> anyhow::Result<()> {
    let mut durations = config.timer;
    if let Some(focus) = args.focus {
        durations.focus_minutes = focus;
    }
    if let Some(short) = args.short {
        durations.short_break_minutes = short;
    }
    if let Some(long) = args.long {
        durations.long_break_minutes = long;
    }

    let mut timer = PomodoroTimer::new(durations)?;
    if let Some(prefix) = &args.assignment {
        let id = resolve_assignment(planner, prefix)?;
        timer.select_assignment(Some(id));
    }
    let mut alerts = Alerts::new(TerminalAlerts);
    if args.notify || config.notifications {
        alerts.request_permission();
    }

    let mut interval = tokio::time::interval(Duration::from_secs(1));
    interval.tick().await;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut focus_completed = 0;
    let mut started_at = clock::now();
    timer.start();
    println!("{} started ({}), Ctrl-C to stop", timer.mode(), timer.display());

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = &mut ctrl_c => {
                timer.pause();
                println!("\nStopped with {} left in {}", timer.display(), timer.mode());
                break;
            }
        }

        let Some(event) = timer.tick() else {
            print!("\r{} {}  ", timer.mode(), timer.display());
            io::stdout().flush().ok();
            continue;
        };

        println!();
        alerts.on_timer_event(&event);
        let TimerEvent::Completed { finished, next, session } = event;
        if let Some(session) = session {
            let session = planner.record_session(session, started_at)?;
            planner.save().await?;
            focus_completed += 1;
            println!("{} finished, logged {} minutes", finished, session.minutes);
        } else {
            println!("{} finished", finished);
        }
        if focus_completed >= args.cycles {
            break;
        }

        timer.start();
        started_at = clock::now();
        println!("{} started ({})", next, timer.display());
    }
    Ok(())
}

fn run_reset(yes: bool, planner: &mut Planner<PlannerDb>) -> anyhow::Result<()> {
    let confirmed = yes || {
        println!(
            "This action cannot be undone. All of your courses, assignments, and study session data will be permanently deleted."
        );
        print!("Type 'yes' to confirm: ");
        io::stdout().flush()?;
        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        answer.trim().eq_ignore_ascii_case("yes")
    };

    match planner.reset(confirmed) {
        Ok(()) => println!("Planner has been reset successfully."),
        Err(PlannerError::ResetNotConfirmed) => println!("Reset cancelled."),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn run_config(command: ConfigCommand, path: &Path, config: &AppConfig, data_file: &Path) -> anyhow::Result<()> {
    match command {
        ConfigCommand::Show => {
            println!("# config file: {}", path.display());
            println!("# data file:   {}", data_file.display());
            println!("{}", toml::to_string_pretty(config)?);
        }
        ConfigCommand::Init => {
            if path.exists() {
                println!("Config already exists at {}", path.display());
            } else {
                AppConfig::default().save_to_file(path)?;
                println!("Wrote {}", path.display());
            }
        }
    }
    Ok(())
}

fn print_matrix(planner: &Planner<PlannerDb>) {
    let matrix = planner.weekly_matrix(clock::today());
    let mut header = vec![String::new()];
    header.extend(matrix.days().iter().map(|d| display::short_day(*d)));
    let mut table = new_table(header);
    for priority in Priority::ALL {
        let mut row = vec![priority.to_string()];
        for day in 0..matrix.days().len() {
            let titles: Vec<&str> = matrix
                .bucket(day, priority)
                .iter()
                .map(|a| a.title.as_str())
                .collect();
            row.push(titles.join("\n"));
        }
        table.add_row(row);
    }
    println!("{table}");
}

fn print_stats(stats: &DashboardStats) {
    println!("Total Hours Completed: {} hrs", stats.hours_completed);
    if let Some(milestone) = stats.milestone() {
        println!("  {}", milestone.subtitle);
    }
    println!("Study Hours Remaining: {} hrs", stats.remaining_study_hours);
    println!("Due This Week:         {}", stats.due_this_week);
    println!("Overdue:               {}", stats.overdue);
}

fn new_table<I, T>(header: I) -> Table
where
    I: IntoIterator<Item = T>,
    T: Into<comfy_table::Cell>,
{
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn short_id(id: Uuid) -> String {
    id.to_string().chars().take(8).collect()
}

fn resolve_by_prefix(ids: impl Iterator<Item = Uuid>, prefix: &str, kind: &str) -> anyhow::Result<Uuid> {
    let prefix = prefix.trim().to_ascii_lowercase();
    if prefix.is_empty() {
        anyhow::bail!("{} id must not be empty", kind);
    }
    let matches: Vec<Uuid> = ids.filter(|id| id.to_string().starts_with(&prefix)).collect();
    match matches.as_slice() {
        [id] => Ok(*id),
        [] => anyhow::bail!("no {} matches {:?}", kind, prefix),
        _ => anyhow::bail!("{:?} matches {} {}s, use a longer prefix", prefix, matches.len(), kind),
    }
}

fn resolve_course(planner: &Planner<PlannerDb>, prefix: &str) -> anyhow::Result<Uuid> {
    resolve_by_prefix(planner.courses().iter().map(|c| c.id), prefix, "course")
}

fn resolve_assignment(planner: &Planner<PlannerDb>, prefix: &str) -> anyhow::Result<Uuid> {
    resolve_by_prefix(planner.assignments().iter().map(|a| a.id), prefix, "assignment")
}
