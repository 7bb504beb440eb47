//! Command handlers. Each one opens the database, runs one operation and
//! prints the result.

use super::output::{self, emit, Stats, TableCount};
use super::{
    ClassArgs, ClassChanges, ClassCommand, Context, EquipmentArgs, EquipmentChanges,
    EquipmentCommand, MemberArgs, MemberChanges, MemberCommand, PaymentCommand,
};
use crate::core::{GymRepository, NewClass, NewEquipment, NewMember, NewPayment, PaymentDetails};
use crate::db::{script, Connection, Fixtures, Schema};
use crate::error::{format_ids, Error, Result};
use chrono::{Local, NaiveDate};
use tracing::debug;

fn open_repo(ctx: &Context) -> Result<GymRepository> {
    debug!(path = %ctx.db.as_path().display(), "opening database");
    GymRepository::open(&ctx.db)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Print the known plan ids alongside a missing-plan error.
fn with_plan_hint<T>(repo: &GymRepository, result: Result<T>) -> Result<T> {
    if let Err(Error::PlanNotFound(_)) = &result {
        if let Ok(ids) = repo.plan_ids() {
            if !ids.is_empty() {
                eprintln!("Available plans: {}", format_ids(&ids));
            }
        }
    }
    result
}

fn load_fixtures(conn: &mut Connection) -> Result<()> {
    let rows = Fixtures::load(conn)?;
    println!("  - Loaded {rows} seed rows");
    Ok(())
}

/// Handle the init command
pub fn handle_init(ctx: &Context, seed: bool) -> Result<()> {
    let mut conn = Connection::open_path(&ctx.db)?;
    Schema::init(&mut conn)?;

    println!("Initialized gym database at {}", ctx.db.as_path().display());
    println!("  - Created {} tables", Schema::TABLES.len());
    if seed {
        load_fixtures(&mut conn)?;
    }
    Ok(())
}

/// Handle the reset command
pub fn handle_reset(ctx: &Context, seed: bool) -> Result<()> {
    let mut conn = Connection::open_path(&ctx.db)?;
    Schema::reset(&mut conn)?;

    println!("Reset gym database at {}", ctx.db.as_path().display());
    if seed {
        load_fixtures(&mut conn)?;
    }
    Ok(())
}

/// Handle the seed command
pub fn handle_seed(ctx: &Context) -> Result<()> {
    let mut conn = open_repo(ctx)?.into_inner();
    let rows = Fixtures::load(&mut conn)?;
    println!("Loaded {rows} seed rows");
    Ok(())
}

/// Handle the schema command
pub fn handle_schema(with_fixtures: bool) -> Result<()> {
    print!("{}", script::render(with_fixtures));
    Ok(())
}

/// Handle the stats command
pub fn handle_stats(ctx: &Context) -> Result<()> {
    let repo = open_repo(ctx)?;
    let tables = Schema::row_counts(repo.conn())?
        .into_iter()
        .map(|(table, rows)| TableCount { table, rows })
        .collect();
    let violations = Schema::foreign_key_violations(repo.conn())?;
    let stats = Stats {
        tables,
        foreign_key_violations: &violations,
    };
    emit(ctx.json, &stats, output::format_stats)
}

impl From<MemberArgs> for NewMember {
    fn from(args: MemberArgs) -> Self {
        Self {
            name: args.name,
            email: args.email,
            phone: args.phone,
            address: args.address,
            age: args.age,
            membership_start: args.start,
            membership_end: args.end,
        }
    }
}

impl MemberChanges {
    fn apply(self, current: crate::core::Member) -> NewMember {
        NewMember {
            name: self.name.unwrap_or(current.name),
            email: self.email.unwrap_or(current.email),
            phone: self.phone.or(current.phone),
            address: self.address.or(current.address),
            age: self.age.unwrap_or(current.age),
            membership_start: self.start.unwrap_or(current.membership_start),
            membership_end: self.end.unwrap_or(current.membership_end),
        }
    }
}

/// Handle the member subcommands
pub fn handle_member(ctx: &Context, cmd: MemberCommand) -> Result<()> {
    let mut repo = open_repo(ctx)?;

    match cmd {
        MemberCommand::Add {
            member,
            plan,
            amount,
            paid_on,
        } => {
            let new = NewMember::from(member);
            match (plan, amount, paid_on) {
                (Some(plan_id), Some(amount_paid), Some(payment_date)) => {
                    let details = PaymentDetails {
                        plan_id,
                        amount_paid,
                        payment_date,
                    };
                    let result = repo.register_member(&new, details);
                    let (member, payment) = with_plan_hint(&repo, result)?;
                    emit(ctx.json, &(&member, &payment), |(m, p)| {
                        println!("Added member #{}: {}", m.id, m.name);
                        println!(
                            "  Payment #{}: plan #{}, {:.2} on {}",
                            p.id, p.plan_id, p.amount_paid, p.payment_date
                        );
                    })
                }
                _ => {
                    let member = repo.add_member(&new)?;
                    emit(ctx.json, &member, |m| {
                        println!("Added member #{}: {}", m.id, m.name);
                    })
                }
            }
        }
        MemberCommand::Update { id, changes } => {
            let current = repo.get_member(id)?;
            let member = repo.update_member(id, &changes.apply(current))?;
            emit(ctx.json, &member, |m| {
                println!("Updated member #{}: {}", m.id, m.name);
            })
        }
        MemberCommand::Delete { id } => {
            let member = repo.get_member(id)?;
            repo.delete_member(id)?;
            println!("Deleted member #{}: {}", member.id, member.name);
            Ok(())
        }
        MemberCommand::Show { id } => {
            let member = repo.get_member(id)?;
            let active = member.is_active_on(today());
            emit(ctx.json, &member, |m| output::format_member(m, active))
        }
        MemberCommand::List => {
            let members = repo.list_members()?;
            emit(ctx.json, members.as_slice(), output::format_members)
        }
        MemberCommand::Plans => {
            let rows = repo.members_with_plans()?;
            emit(ctx.json, rows.as_slice(), output::format_member_plans)
        }
    }
}

impl From<ClassArgs> for NewClass {
    fn from(args: ClassArgs) -> Self {
        Self {
            name: args.name,
            class_type: args.class_type,
            duration: args.duration,
            capacity: args.capacity,
            instructor_id: args.instructor,
            gym_id: args.gym,
        }
    }
}

impl ClassChanges {
    fn apply(self, current: crate::core::Class) -> NewClass {
        NewClass {
            name: self.name.unwrap_or(current.name),
            class_type: self.class_type.unwrap_or(current.class_type),
            duration: self.duration.unwrap_or(current.duration),
            capacity: self.capacity.unwrap_or(current.capacity),
            instructor_id: self.instructor.unwrap_or(current.instructor_id),
            gym_id: self.gym.unwrap_or(current.gym_id),
        }
    }
}

/// Handle the class subcommands
pub fn handle_class(ctx: &Context, cmd: ClassCommand) -> Result<()> {
    let mut repo = open_repo(ctx)?;

    match cmd {
        ClassCommand::Add(args) => {
            let class = repo.add_class(&NewClass::from(args))?;
            emit(ctx.json, &class, |c| {
                println!("Added class #{}: {} ({})", c.id, c.name, c.class_type);
            })
        }
        ClassCommand::Update { id, changes } => {
            let current = repo.get_class(id)?;
            let class = repo.update_class(id, &changes.apply(current))?;
            emit(ctx.json, &class, |c| {
                println!("Updated class #{}: {} ({})", c.id, c.name, c.class_type);
            })
        }
        ClassCommand::Delete { id, move_to } => {
            let class = repo.get_class(id)?;
            match move_to {
                Some(to) => {
                    let moved = repo.delete_class_moving_attendees(id, to)?;
                    println!("Moved {moved} attendance record(s) to class #{to}");
                }
                None => repo.delete_class(id)?,
            }
            println!("Deleted class #{}: {}", class.id, class.name);
            Ok(())
        }
        ClassCommand::Show { id } => {
            let class = repo.get_class(id)?;
            let attendees = repo.class_attendee_count(id)?;
            emit(ctx.json, &class, |c| output::format_class(c, attendees))
        }
        ClassCommand::List { attendance: true } => {
            let rows = repo.classes_with_attendance()?;
            emit(ctx.json, rows.as_slice(), output::format_class_attendance)
        }
        ClassCommand::List { attendance: false } => {
            let classes = repo.list_classes()?;
            emit(ctx.json, classes.as_slice(), output::format_classes)
        }
        ClassCommand::Roster { id } => {
            let rows = repo.class_roster(id)?;
            emit(ctx.json, rows.as_slice(), |r| output::format_roster(id, r))
        }
        ClassCommand::Attend {
            class_id,
            member_id,
            date,
        } => {
            let date = date.unwrap_or_else(today);
            let attendance = repo.record_attendance(member_id, class_id, date)?;
            emit(ctx.json, &attendance, |a| {
                println!(
                    "Recorded member #{} in class #{} on {}",
                    a.member_id, a.class_id, a.date
                );
            })
        }
    }
}

impl From<EquipmentArgs> for NewEquipment {
    fn from(args: EquipmentArgs) -> Self {
        Self {
            name: args.name,
            equipment_type: args.equipment_type,
            quantity: args.quantity,
            gym_id: args.gym,
        }
    }
}

impl EquipmentChanges {
    fn apply(self, current: crate::core::Equipment) -> NewEquipment {
        NewEquipment {
            name: self.name.unwrap_or(current.name),
            equipment_type: self.equipment_type.unwrap_or(current.equipment_type),
            quantity: self.quantity.unwrap_or(current.quantity),
            gym_id: self.gym.unwrap_or(current.gym_id),
        }
    }
}

/// Handle the equipment subcommands
pub fn handle_equipment(ctx: &Context, cmd: EquipmentCommand) -> Result<()> {
    let mut repo = open_repo(ctx)?;

    match cmd {
        EquipmentCommand::Add(args) => {
            let item = repo.add_equipment(&NewEquipment::from(args))?;
            emit(ctx.json, &item, |e| {
                println!("Added equipment #{}: {} x{}", e.id, e.name, e.quantity);
            })
        }
        EquipmentCommand::Update { id, changes } => {
            let current = repo.get_equipment(id)?;
            let item = repo.update_equipment(id, &changes.apply(current))?;
            emit(ctx.json, &item, |e| {
                println!("Updated equipment #{}: {} x{}", e.id, e.name, e.quantity);
            })
        }
        EquipmentCommand::Delete { id } => {
            let item = repo.get_equipment(id)?;
            repo.delete_equipment(id)?;
            println!("Deleted equipment #{}: {}", item.id, item.name);
            Ok(())
        }
        EquipmentCommand::List => {
            let items = repo.list_equipment()?;
            emit(ctx.json, items.as_slice(), output::format_equipment)
        }
    }
}

/// Handle the payment subcommands
pub fn handle_payment(ctx: &Context, cmd: PaymentCommand) -> Result<()> {
    let mut repo = open_repo(ctx)?;

    match cmd {
        PaymentCommand::Add {
            member,
            plan,
            amount,
            date,
        } => {
            let new = NewPayment {
                member_id: member,
                plan_id: plan,
                amount_paid: amount,
                payment_date: date,
            };
            let result = repo.add_payment(&new);
            let payment = with_plan_hint(&repo, result)?;
            emit(ctx.json, &payment, |p| {
                println!(
                    "Recorded payment #{}: member #{}, plan #{}, {:.2}",
                    p.id, p.member_id, p.plan_id, p.amount_paid
                );
            })
        }
        PaymentCommand::List => {
            let payments = repo.list_payments()?;
            emit(ctx.json, payments.as_slice(), output::format_payments)
        }
    }
}

/// Handle the plan list command
pub fn handle_plans(ctx: &Context) -> Result<()> {
    let plans = open_repo(ctx)?.list_plans()?;
    emit(ctx.json, plans.as_slice(), output::format_plans)
}

/// Handle the instructor list command
pub fn handle_instructors(ctx: &Context) -> Result<()> {
    let instructors = open_repo(ctx)?.list_instructors()?;
    emit(ctx.json, instructors.as_slice(), output::format_instructors)
}

/// Handle the gym list command
pub fn handle_gyms(ctx: &Context) -> Result<()> {
    let gyms = open_repo(ctx)?.list_gyms()?;
    emit(ctx.json, gyms.as_slice(), output::format_gyms)
}

/// Handle the attendance list command
pub fn handle_attendance(ctx: &Context) -> Result<()> {
    let rows = open_repo(ctx)?.list_attendance()?;
    emit(ctx.json, rows.as_slice(), output::format_attendance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ClassType, EquipmentType, Member};
    use crate::db::DbPath;
    use tempfile::TempDir;

    fn seeded_context(dir: &TempDir) -> Context {
        let ctx = Context {
            db: DbPath::new(dir.path().join("gym.sqlite")),
            json: false,
        };
        handle_init(&ctx, true).unwrap();
        ctx
    }

    #[test]
    fn test_init_twice_fails() {
        let dir = TempDir::new().unwrap();
        let ctx = seeded_context(&dir);
        assert!(matches!(
            handle_init(&ctx, false),
            Err(Error::AlreadyInitialized)
        ));
    }

    #[test]
    fn test_commands_need_initialized_database() {
        let dir = TempDir::new().unwrap();
        let ctx = Context {
            db: DbPath::new(dir.path().join("missing.sqlite")),
            json: false,
        };
        assert!(matches!(handle_stats(&ctx), Err(Error::NotInitialized)));
        assert!(!ctx.db.exists());
    }

    #[test]
    fn test_seed_after_seed_fails() {
        let dir = TempDir::new().unwrap();
        let ctx = seeded_context(&dir);
        assert!(matches!(handle_seed(&ctx), Err(Error::NotEmpty("Member"))));

        handle_reset(&ctx, false).unwrap();
        handle_seed(&ctx).unwrap();
        let repo = GymRepository::open(&ctx.db).unwrap();
        assert_eq!(repo.list_members().unwrap().len(), 5);
    }

    #[test]
    fn test_member_changes_keep_unset_fields() {
        let current = Member {
            id: 1,
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            phone: Some("555-0100".to_string()),
            address: None,
            age: 30,
            membership_start: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            membership_end: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
        };
        let changes = MemberChanges {
            name: None,
            email: Some("ann@gym.test".to_string()),
            phone: None,
            address: None,
            age: Some(31),
            start: None,
            end: None,
        };

        let updated = changes.apply(current.clone());
        assert_eq!(updated.name, current.name);
        assert_eq!(updated.email, "ann@gym.test");
        assert_eq!(updated.phone, current.phone);
        assert_eq!(updated.age, 31);
        assert_eq!(updated.membership_end, current.membership_end);
    }

    #[test]
    fn test_class_and_equipment_updates() {
        let dir = TempDir::new().unwrap();
        let ctx = seeded_context(&dir);

        handle_class(
            &ctx,
            ClassCommand::Update {
                id: 1,
                changes: ClassChanges {
                    name: None,
                    class_type: Some(ClassType::Hiit),
                    duration: None,
                    capacity: Some(40),
                    instructor: None,
                    gym: None,
                },
            },
        )
        .unwrap();
        handle_equipment(
            &ctx,
            EquipmentCommand::Update {
                id: 1,
                changes: EquipmentChanges {
                    name: None,
                    equipment_type: Some(EquipmentType::Recovery),
                    quantity: None,
                    gym: None,
                },
            },
        )
        .unwrap();

        let repo = GymRepository::open(&ctx.db).unwrap();
        let class = repo.get_class(1).unwrap();
        assert_eq!(class.class_type, ClassType::Hiit);
        assert_eq!(class.capacity, 40);
        let item = repo.get_equipment(1).unwrap();
        assert_eq!(item.equipment_type, EquipmentType::Recovery);
    }

    #[test]
    fn test_delete_class_with_attendees_is_refused() {
        let dir = TempDir::new().unwrap();
        let ctx = seeded_context(&dir);
        let result = handle_class(&ctx, ClassCommand::Delete { id: 1, move_to: None });
        assert!(matches!(
            result,
            Err(Error::ClassHasAttendees { id: 1, count: 2 })
        ));
    }

    #[test]
    fn test_delete_class_with_move() {
        let dir = TempDir::new().unwrap();
        let ctx = seeded_context(&dir);
        let before = GymRepository::open(&ctx.db)
            .unwrap()
            .list_attendance()
            .unwrap()
            .len();

        handle_class(
            &ctx,
            ClassCommand::Delete {
                id: 1,
                move_to: Some(2),
            },
        )
        .unwrap();

        let repo = GymRepository::open(&ctx.db).unwrap();
        assert!(!repo.class_exists(1).unwrap());
        let after = repo.list_attendance().unwrap();
        assert!(after.iter().all(|a| a.class_id != 1));
        assert_eq!(after.len(), before);
        assert_eq!(repo.class_attendee_count(2).unwrap(), 3);
    }

    #[test]
    fn test_payment_with_unknown_plan() {
        let dir = TempDir::new().unwrap();
        let ctx = seeded_context(&dir);
        let result = handle_payment(
            &ctx,
            PaymentCommand::Add {
                member: 1,
                plan: 99,
                amount: 10.0,
                date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            },
        );
        assert!(matches!(result, Err(Error::PlanNotFound(99))));
    }
}
