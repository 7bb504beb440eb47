//! CLI commands for gymdb.

mod handlers;
mod output;

use crate::core::{ClassType, EquipmentType};
use crate::db::{DbPath, DEFAULT_DB_FILE};
use crate::error::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gymdb")]
#[command(about = "XYZ Gym database: schema, fixtures and records")]
#[command(version)]
pub struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = "GYMDB_DATABASE", default_value = DEFAULT_DB_FILE)]
    pub db: PathBuf,

    /// Print listings as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the schema in a new database
    Init {
        /// Load the seed fixtures after creating the schema
        #[arg(long)]
        seed: bool,
    },

    /// Drop every table and recreate an empty schema
    Reset {
        /// Load the seed fixtures after recreating the schema
        #[arg(long)]
        seed: bool,
    },

    /// Load the seed fixtures into an empty schema
    Seed,

    /// Print the schema as an SQL script
    Schema {
        /// Append the fixture INSERT statements
        #[arg(long)]
        with_fixtures: bool,
    },

    /// Show row counts and foreign key problems
    Stats,

    /// Manage members
    #[command(subcommand)]
    Member(MemberCommand),

    /// Manage classes and attendance
    #[command(subcommand)]
    Class(ClassCommand),

    /// Manage equipment
    #[command(subcommand)]
    Equipment(EquipmentCommand),

    /// Membership plans
    #[command(subcommand)]
    Plan(ListCommand),

    /// Payments
    #[command(subcommand)]
    Payment(PaymentCommand),

    /// Instructors
    #[command(subcommand)]
    Instructor(ListCommand),

    /// Gym facilities
    #[command(subcommand)]
    Gym(ListCommand),

    /// Attendance records
    #[command(subcommand)]
    Attendance(ListCommand),
}

#[derive(Subcommand)]
pub enum ListCommand {
    /// List all records
    List,
}

#[derive(Args)]
pub struct MemberArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub age: i64,
    /// Membership start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: NaiveDate,
    /// Membership end date (YYYY-MM-DD)
    #[arg(long)]
    pub end: NaiveDate,
}

#[derive(Args)]
pub struct MemberChanges {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub age: Option<i64>,
    #[arg(long)]
    pub start: Option<NaiveDate>,
    #[arg(long)]
    pub end: Option<NaiveDate>,
}

#[derive(Subcommand)]
pub enum MemberCommand {
    /// Add a member, optionally with their first payment
    Add {
        #[command(flatten)]
        member: MemberArgs,
        /// Plan paid for
        #[arg(long, requires = "amount")]
        plan: Option<i64>,
        /// Amount paid
        #[arg(long, requires = "paid_on")]
        amount: Option<f64>,
        /// Payment date (YYYY-MM-DD)
        #[arg(long, requires = "plan")]
        paid_on: Option<NaiveDate>,
    },

    /// Update fields of a member
    Update {
        id: i64,
        #[command(flatten)]
        changes: MemberChanges,
    },

    /// Delete a member with their payments and attendance
    Delete { id: i64 },

    /// Show member details
    Show { id: i64 },

    /// List members
    List,

    /// List members with the plans they paid for
    Plans,
}

#[derive(Args)]
pub struct ClassArgs {
    #[arg(long)]
    pub name: String,
    /// Yoga, Zumba, HIIT or Weights
    #[arg(long = "type")]
    pub class_type: ClassType,
    /// Length in minutes
    #[arg(long)]
    pub duration: i64,
    #[arg(long)]
    pub capacity: i64,
    #[arg(long)]
    pub instructor: i64,
    #[arg(long)]
    pub gym: i64,
}

#[derive(Args)]
pub struct ClassChanges {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long = "type")]
    pub class_type: Option<ClassType>,
    #[arg(long)]
    pub duration: Option<i64>,
    #[arg(long)]
    pub capacity: Option<i64>,
    #[arg(long)]
    pub instructor: Option<i64>,
    #[arg(long)]
    pub gym: Option<i64>,
}

#[derive(Subcommand)]
pub enum ClassCommand {
    /// Add a class
    Add(ClassArgs),

    /// Update fields of a class
    Update {
        id: i64,
        #[command(flatten)]
        changes: ClassChanges,
    },

    /// Delete a class
    Delete {
        id: i64,
        /// Move attendance records to this class before deleting
        #[arg(long)]
        move_to: Option<i64>,
    },

    /// Show class details
    Show { id: i64 },

    /// List classes
    List {
        /// Include attendance counts
        #[arg(long)]
        attendance: bool,
    },

    /// List members who attended a class
    Roster { id: i64 },

    /// Record that a member attended a class
    Attend {
        class_id: i64,
        member_id: i64,
        /// Attendance date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[derive(Args)]
pub struct EquipmentArgs {
    #[arg(long)]
    pub name: String,
    /// Cardio, Strength, Flexibility or Recovery
    #[arg(long = "type")]
    pub equipment_type: EquipmentType,
    #[arg(long)]
    pub quantity: i64,
    #[arg(long)]
    pub gym: i64,
}

#[derive(Args)]
pub struct EquipmentChanges {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long = "type")]
    pub equipment_type: Option<EquipmentType>,
    #[arg(long)]
    pub quantity: Option<i64>,
    #[arg(long)]
    pub gym: Option<i64>,
}

#[derive(Subcommand)]
pub enum EquipmentCommand {
    /// Add equipment
    Add(EquipmentArgs),

    /// Update fields of a piece of equipment
    Update {
        id: i64,
        #[command(flatten)]
        changes: EquipmentChanges,
    },

    /// Delete equipment
    Delete { id: i64 },

    /// List equipment
    List,
}

#[derive(Subcommand)]
pub enum PaymentCommand {
    /// Record a payment
    Add {
        #[arg(long)]
        member: i64,
        #[arg(long)]
        plan: i64,
        #[arg(long)]
        amount: f64,
        /// Payment date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
    },

    /// List payments
    List,
}

/// Settings shared by every command.
pub struct Context {
    pub db: DbPath,
    pub json: bool,
}

/// Parse the command line and run the selected command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    dispatch(cli)
}

/// Run an already parsed command line.
pub fn dispatch(cli: Cli) -> Result<()> {
    let ctx = Context {
        db: DbPath::new(&cli.db),
        json: cli.json,
    };

    match cli.command {
        Commands::Init { seed } => handlers::handle_init(&ctx, seed),
        Commands::Reset { seed } => handlers::handle_reset(&ctx, seed),
        Commands::Seed => handlers::handle_seed(&ctx),
        Commands::Schema { with_fixtures } => handlers::handle_schema(with_fixtures),
        Commands::Stats => handlers::handle_stats(&ctx),
        Commands::Member(cmd) => handlers::handle_member(&ctx, cmd),
        Commands::Class(cmd) => handlers::handle_class(&ctx, cmd),
        Commands::Equipment(cmd) => handlers::handle_equipment(&ctx, cmd),
        Commands::Plan(ListCommand::List) => handlers::handle_plans(&ctx),
        Commands::Payment(cmd) => handlers::handle_payment(&ctx, cmd),
        Commands::Instructor(ListCommand::List) => handlers::handle_instructors(&ctx),
        Commands::Gym(ListCommand::List) => handlers::handle_gyms(&ctx),
        Commands::Attendance(ListCommand::List) => handlers::handle_attendance(&ctx),
    }
}
