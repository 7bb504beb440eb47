//! Output formatting for the CLI.

use crate::core::{
    Attendance, Class, ClassAttendance, Equipment, GymFacility, Instructor, Member, MemberPlan,
    MembershipPlan, Payment, RosterEntry,
};
use crate::db::ForeignKeyViolation;
use crate::error::Result;
use serde::Serialize;

/// Print `rows` as pretty JSON when `json` is set, otherwise through `render`.
pub fn emit<T: Serialize + ?Sized>(json: bool, rows: &T, render: impl FnOnce(&T)) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(rows)?);
    } else {
        render(rows);
    }
    Ok(())
}

fn opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

fn print_empty(what: &str) {
    println!("No {what} found");
}

pub fn format_member(member: &Member, active: bool) {
    println!("[#{}] {}", member.id, member.name);
    println!("Email:      {}", member.email);
    println!("Phone:      {}", opt(&member.phone));
    println!("Address:    {}", opt(&member.address));
    println!("Age:        {}", member.age);
    println!(
        "Membership: {} to {} ({})",
        member.membership_start,
        member.membership_end,
        if active { "active" } else { "inactive" }
    );
}

pub fn format_members(members: &[Member]) {
    if members.is_empty() {
        return print_empty("members");
    }
    for m in members {
        println!(
            "[{:>3}] {:<20} {:<28} age {:<3} {} to {}",
            m.id, m.name, m.email, m.age, m.membership_start, m.membership_end
        );
    }
}

pub fn format_member_plans(rows: &[MemberPlan]) {
    if rows.is_empty() {
        return print_empty("paid memberships");
    }
    for r in rows {
        println!(
            "[{:>3}] {:<20} {:<28} age {:<3} plan #{} {}",
            r.member_id, r.name, r.email, r.age, r.plan_id, r.plan_type
        );
    }
}

pub fn format_class(class: &Class, attendees: i64) {
    println!("[#{}] {} ({})", class.id, class.name, class.class_type);
    println!("Duration:   {} min", class.duration);
    println!("Capacity:   {}", class.capacity);
    println!("Instructor: #{}", class.instructor_id);
    println!("Gym:        #{}", class.gym_id);
    println!("Attendance: {attendees} record(s)");
}

pub fn format_classes(classes: &[Class]) {
    if classes.is_empty() {
        return print_empty("classes");
    }
    for c in classes {
        println!(
            "[{:>3}] {:<20} {:<8} {:>3} min  cap {:<3} instructor #{} gym #{}",
            c.id, c.name, c.class_type, c.duration, c.capacity, c.instructor_id, c.gym_id
        );
    }
}

pub fn format_class_attendance(rows: &[ClassAttendance]) {
    if rows.is_empty() {
        return print_empty("classes");
    }
    for c in rows {
        println!(
            "[{:>3}] {:<20} {:<8} {:>3} min  cap {:<3} attendees {}",
            c.id, c.name, c.class_type, c.duration, c.capacity, c.attendees
        );
    }
}

pub fn format_roster(class_id: i64, rows: &[RosterEntry]) {
    if rows.is_empty() {
        println!("No attendance recorded for class #{class_id}");
        return;
    }
    for r in rows {
        println!("{}  [{:>3}] {:<20} {}", r.date, r.member_id, r.name, r.email);
    }
}

pub fn format_equipment(items: &[Equipment]) {
    if items.is_empty() {
        return print_empty("equipment");
    }
    for e in items {
        println!(
            "[{:>3}] {:<20} {:<12} qty {:<4} gym #{}",
            e.id, e.name, e.equipment_type, e.quantity, e.gym_id
        );
    }
}

pub fn format_plans(plans: &[MembershipPlan]) {
    if plans.is_empty() {
        return print_empty("membership plans");
    }
    for p in plans {
        println!("[{:>3}] {:<8} {:>10.2}", p.id, p.plan_type, p.cost);
    }
}

pub fn format_payments(payments: &[Payment]) {
    if payments.is_empty() {
        return print_empty("payments");
    }
    for p in payments {
        println!(
            "[{:>3}] {}  member #{:<4} plan #{:<4} {:>10.2}",
            p.id, p.payment_date, p.member_id, p.plan_id, p.amount_paid
        );
    }
}

pub fn format_instructors(instructors: &[Instructor]) {
    if instructors.is_empty() {
        return print_empty("instructors");
    }
    for i in instructors {
        println!(
            "[{:>3}] {:<20} {:<12} {:<14} {}",
            i.id,
            i.name,
            opt(&i.specialty),
            opt(&i.phone),
            opt(&i.email)
        );
    }
}

pub fn format_gyms(gyms: &[GymFacility]) {
    if gyms.is_empty() {
        return print_empty("gym facilities");
    }
    for g in gyms {
        println!(
            "[{:>3}] {:<24} {:<14} manager {}",
            g.id,
            g.location,
            opt(&g.phone),
            opt(&g.manager)
        );
    }
}

pub fn format_attendance(rows: &[Attendance]) {
    if rows.is_empty() {
        return print_empty("attendance records");
    }
    for a in rows {
        println!("{}  member #{:<4} class #{}", a.date, a.member_id, a.class_id);
    }
}

#[derive(Serialize)]
pub struct Stats<'a> {
    pub tables: Vec<TableCount>,
    pub foreign_key_violations: &'a [ForeignKeyViolation],
}

#[derive(Serialize)]
pub struct TableCount {
    pub table: &'static str,
    pub rows: i64,
}

pub fn format_stats(stats: &Stats<'_>) {
    for t in &stats.tables {
        println!("{:<16} {:>6}", t.table, t.rows);
    }
    if stats.foreign_key_violations.is_empty() {
        println!();
        println!("Foreign keys: OK");
        return;
    }
    println!();
    println!("Foreign key violations:");
    for v in stats.foreign_key_violations {
        match v.rowid {
            Some(rowid) => println!("  {} row {} -> {}", v.table, rowid, v.parent),
            None => println!("  {} -> {}", v.table, v.parent),
        }
    }
}
