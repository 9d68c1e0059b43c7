use std::io::{self, Write};

use chrono::{Datelike, NaiveDate};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::calendar::{agenda, month_grid, summary};
use crate::due::{parse_date, parse_time};
use crate::error::AppError;
use crate::models::{
    AssignmentStatus, Currency, Frequency, HabitFrequency, ItemDraft, ItemFrequency, ItemPatch,
    Mood, Priority, TaskDraft, TaskPatch, TransactionKind,
};
use crate::notes::mood_advice;
use crate::organizer::Organizer;
use crate::settings::SettingsPatch;
use crate::tasks::{TaskFilter, Toggle};

/// Time given to a task added without one.
pub const DEFAULT_TIME: &str = "12:00";

fn not_found(what: &str, id: u64) -> AppError {
    AppError::NotFound(format!("{what} {id}"))
}

fn table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
                .collect::<Vec<_>>(),
        );
    table
}

fn priority_color(p: Priority) -> Color {
    match p {
        Priority::Low => Color::Green,
        Priority::Medium => Color::Yellow,
        Priority::High => Color::Red,
    }
}

fn require(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidInput(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Rejects NaN, infinities and negative amounts before they reach a slot.
fn non_negative(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::InvalidInput(format!("invalid {field} {value}")));
    }
    Ok(())
}

/// Parses a day given on the command line; `None` means today.
fn day_arg(org: &Organizer, day: Option<String>) -> Result<NaiveDate, AppError> {
    match day {
        None => Ok(org.today()),
        Some(s) => parse_date(&s)
            .ok_or_else(|| AppError::InvalidInput(format!("invalid date '{s}', use YYYY-MM-DD"))),
    }
}

// --- tasks ---

/// Adds a new task. Date defaults to today and time to noon; both are stored
/// as given even when they do not parse.
pub fn cmd_task_add(
    org: &mut Organizer,
    title: String,
    date: Option<String>,
    time: Option<String>,
    priority: Priority,
    frequency: Frequency,
) -> Result<(), AppError> {
    require(&title, "title")?;
    let date = date.unwrap_or_else(|| org.today().format("%Y-%m-%d").to_string());
    let time = time.unwrap_or_else(|| DEFAULT_TIME.to_string());
    let draft = TaskDraft { title, date, time, priority, frequency };
    if parse_date(&draft.date).is_none() || parse_time(&draft.time).is_none() {
        eprintln!(
            "warning: '{} {}' is not a valid date and time; the task has no due time",
            draft.date, draft.time
        );
    }
    let id = org.add_task(draft)?;
    println!("Task added (id = {id})");
    Ok(())
}

/// Lists tasks sorted by due time, undated tasks last.
pub fn cmd_task_list(org: &Organizer, filter: TaskFilter) {
    let tasks = org.tasks().list(filter);
    if tasks.is_empty() {
        println!("No tasks found. Take a breather!");
        return;
    }

    let mut table = table(&["ID", "Title", "Date", "Time", "Priority", "Repeat", "Status"]);
    for t in tasks {
        let date = match parse_date(&t.date) {
            Some(d) => d.format("%b %-d").to_string(),
            None if t.date.is_empty() => "No Date".to_string(),
            None => t.date.clone(),
        };
        let (status, status_color) = match (t.completed, t.is_on_time) {
            (false, _) => ("Pending", Color::Yellow),
            (true, true) => ("Done, on time", Color::Green),
            (true, false) => ("Done, late", Color::DarkYellow),
        };
        let repeat = match t.frequency {
            Frequency::Once => "",
            Frequency::Daily => "daily",
        };
        table.add_row(vec![
            Cell::new(t.id),
            Cell::new(&t.title),
            Cell::new(date),
            Cell::new(&t.time),
            Cell::new(format!("{:?}", t.priority).to_lowercase()).fg(priority_color(t.priority)),
            Cell::new(repeat),
            Cell::new(status).fg(status_color),
        ]);
    }
    println!("{table}");
}

/// Toggles completion. Completing a daily task schedules tomorrow's occurrence.
pub fn cmd_task_toggle(org: &mut Organizer, id: u64) -> Result<(), AppError> {
    match org.toggle_task_completion(id)? {
        None => return Err(not_found("task", id)),
        Some(Toggle::Reopened) => println!("Task {id} reopened."),
        Some(Toggle::Completed { on_time, successor }) => {
            if on_time {
                println!("Task {id} completed. On-time!");
            } else {
                println!("Task {id} completed.");
            }
            if let Some(next) = successor.and_then(|s| org.tasks().get(s)) {
                println!("Next occurrence scheduled for {} (id = {})", next.date, next.id);
            }
        }
    }
    Ok(())
}

pub fn cmd_task_edit(org: &mut Organizer, id: u64, patch: TaskPatch) -> Result<(), AppError> {
    if let Some(title) = &patch.title {
        require(title, "title")?;
    }
    if patch.is_empty() {
        return Err(AppError::InvalidInput("nothing to change".into()));
    }
    if !org.update_task(id, &patch)? {
        return Err(not_found("task", id));
    }
    println!("Task {id} updated.");
    Ok(())
}

pub fn cmd_task_remove(org: &mut Organizer, id: u64) -> Result<(), AppError> {
    if !org.delete_task(id)? {
        return Err(not_found("task", id));
    }
    println!("Task {id} removed.");
    Ok(())
}

// --- dashboard and calendar ---

pub fn cmd_today(org: &Organizer) {
    let s = summary(org.today(), org.tasks(), org.habits(), org.finance());
    println!("{}", s.today.format("%A, %B %-d"));
    println!(
        "Tasks today: {}/{} done | On-time streak: {} | Habits: {}/{} (best streak {}) | Balance: {:.2}",
        s.completed_today,
        s.todays_tasks.len(),
        s.on_time,
        s.habits_done,
        s.habits_total,
        s.best_streak,
        s.balance,
    );
    if s.todays_tasks.is_empty() {
        println!("No tasks scheduled for today.");
        return;
    }
    let mut table = table(&["ID", "Time", "Title", "Status"]);
    for t in s.todays_tasks {
        table.add_row(vec![
            Cell::new(t.id),
            Cell::new(&t.time),
            Cell::new(&t.title),
            if t.completed {
                Cell::new("Done").fg(Color::Green)
            } else {
                Cell::new("Pending").fg(Color::Yellow)
            },
        ]);
    }
    println!("{table}");
}

/// Prints a month grid, Sunday first. `month` is `YYYY-MM`; default is the
/// current month.
pub fn cmd_calendar(org: &Organizer, month: Option<String>) -> Result<(), AppError> {
    let today = org.today();
    let (year, mon) = match month {
        None => (today.year(), today.month()),
        Some(m) => parse_date(&format!("{m}-01"))
            .map(|d| (d.year(), d.month()))
            .ok_or_else(|| AppError::InvalidInput(format!("invalid month '{m}', use YYYY-MM")))?,
    };
    let days = month_grid(year, mon)
        .ok_or_else(|| AppError::InvalidInput(format!("invalid month {year}-{mon:02}")))?;

    let mut table = table(&["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]);
    for week in days.chunks(7) {
        let row: Vec<Cell> = week
            .iter()
            .map(|day| {
                let a = agenda(*day, org.tasks(), org.student());
                let mut lines = vec![day.day().to_string()];
                for t in &a.tasks {
                    let mark = if t.completed { "✓ " } else { "" };
                    lines.push(format!("{mark}{} {}", t.time, t.title));
                }
                for asg in &a.assignments {
                    lines.push(format!("A: {}", asg.title));
                }
                for e in &a.exams {
                    lines.push(format!("E: {} exam", e.subject));
                }
                let cell = Cell::new(lines.join("\n"));
                if *day == today {
                    cell.add_attribute(Attribute::Bold).fg(Color::Cyan)
                } else if day.month() != mon {
                    cell.fg(Color::DarkGrey)
                } else {
                    cell
                }
            })
            .collect();
        table.add_row(row);
    }
    println!("{}", NaiveDate::from_ymd_opt(year, mon, 1).map(|d| d.format("%B %Y").to_string()).unwrap_or_default());
    println!("{table}");
    Ok(())
}

/// Everything scheduled on one day.
pub fn cmd_agenda(org: &Organizer, day: Option<String>) -> Result<(), AppError> {
    let day = day_arg(org, day)?;
    let a = agenda(day, org.tasks(), org.student());
    println!("{}", day.format("%A, %B %-d %Y"));
    if a.is_empty() {
        println!("Nothing scheduled.");
        return Ok(());
    }
    let mut table = table(&["Kind", "ID", "When", "What"]);
    for t in &a.tasks {
        table.add_row(vec![Cell::new("task"), Cell::new(t.id), Cell::new(&t.time), Cell::new(&t.title)]);
    }
    for asg in &a.assignments {
        table.add_row(vec![
            Cell::new("assignment"),
            Cell::new(asg.id),
            Cell::new(&asg.due),
            Cell::new(format!("{}: {}", asg.subject, asg.title)),
        ]);
    }
    for e in &a.exams {
        table.add_row(vec![
            Cell::new("exam"),
            Cell::new(e.id),
            Cell::new(&e.date),
            Cell::new(format!("{} exam", e.subject)),
        ]);
    }
    println!("{table}");
    Ok(())
}

// --- habits and goals ---

pub fn cmd_habit_add(org: &mut Organizer, title: String, frequency: HabitFrequency) -> Result<(), AppError> {
    require(&title, "habit name")?;
    let id = org.add_habit(title, frequency)?;
    println!("Habit added (id = {id})");
    Ok(())
}

pub fn cmd_habit_list(org: &Organizer) {
    let habits = org.habits();
    if habits.all().is_empty() {
        println!("No habits yet. Start small!");
        return;
    }
    let today = org.today();
    println!(
        "Today: {:.0}% | Best streak: {} | Total active: {}",
        habits.completion_rate(today),
        habits.best_streak(),
        habits.all().len()
    );
    let mut table = table(&["ID", "Habit", "Frequency", "Streak", "Today"]);
    for h in habits.all() {
        let done = h.done_on(today);
        table.add_row(vec![
            Cell::new(h.id),
            Cell::new(&h.title),
            Cell::new(format!("{:?}", h.frequency)),
            Cell::new(format!("{} day streak", h.streak)).fg(if h.streak > 3 { Color::DarkYellow } else { Color::Reset }),
            if done { Cell::new("✓").fg(Color::Green) } else { Cell::new("") },
        ]);
    }
    println!("{table}");
}

pub fn cmd_habit_toggle(org: &mut Organizer, id: u64) -> Result<(), AppError> {
    match org.toggle_habit(id)? {
        None => Err(not_found("habit", id)),
        Some(done) => {
            let streak = org.habits().get(id).map(|h| h.streak).unwrap_or(0);
            if done {
                println!("Habit {id} done for today. {streak} day streak!");
            } else {
                println!("Habit {id} unchecked. {streak} day streak.");
            }
            Ok(())
        }
    }
}

pub fn cmd_habit_remove(org: &mut Organizer, id: u64) -> Result<(), AppError> {
    if !org.delete_habit(id)? {
        return Err(not_found("habit", id));
    }
    println!("Habit {id} removed.");
    Ok(())
}

pub fn cmd_goal_add(org: &mut Organizer, title: String, target: Option<String>) -> Result<(), AppError> {
    require(&title, "goal title")?;
    let id = org.add_goal(title, target.unwrap_or_default())?;
    println!("Goal added (id = {id})");
    Ok(())
}

pub fn cmd_goal_list(org: &Organizer) {
    let goals = org.goals().all();
    if goals.is_empty() {
        println!("No goals yet.");
        return;
    }
    let mut table = table(&["ID", "Goal", "Target", "Progress"]);
    for g in goals {
        let filled = (g.progress.min(100) as usize) / 10;
        let bar = format!("{}{} {}%", "█".repeat(filled), "░".repeat(10 - filled), g.progress);
        table.add_row(vec![Cell::new(g.id), Cell::new(&g.title), Cell::new(&g.target), Cell::new(bar)]);
    }
    println!("{table}");
}

pub fn cmd_goal_progress(org: &mut Organizer, id: u64, progress: u8) -> Result<(), AppError> {
    if !org.set_goal_progress(id, progress)? {
        return Err(not_found("goal", id));
    }
    println!("Goal {id} at {}%.", progress.min(100));
    Ok(())
}

pub fn cmd_goal_remove(org: &mut Organizer, id: u64) -> Result<(), AppError> {
    if !org.delete_goal(id)? {
        return Err(not_found("goal", id));
    }
    println!("Goal {id} removed.");
    Ok(())
}

// --- finance ---

pub fn cmd_finance_add(
    org: &mut Organizer,
    amount: f64,
    description: String,
    kind: TransactionKind,
) -> Result<(), AppError> {
    non_negative(amount, "amount")?;
    if amount == 0.0 {
        return Err(AppError::InvalidInput("amount must be greater than zero".into()));
    }
    require(&description, "description")?;
    let id = org.add_transaction(amount, description, kind)?;
    println!("Transaction added (id = {id}). Balance: {:.2}", org.finance().balance());
    Ok(())
}

pub fn cmd_finance_list(org: &Organizer) {
    let ledger = org.finance();
    println!(
        "Balance: {:.2} | Income: {:.2} | Expenses: {:.2}",
        ledger.balance(),
        ledger.total(TransactionKind::Income),
        ledger.total(TransactionKind::Expense)
    );
    if ledger.transactions().is_empty() {
        println!("No transactions yet.");
        return;
    }
    let mut table = table(&["ID", "Date", "Description", "Amount"]);
    for t in ledger.transactions() {
        let (sign, color) = match t.kind {
            TransactionKind::Income => ("+", Color::Green),
            TransactionKind::Expense => ("-", Color::Red),
        };
        table.add_row(vec![
            Cell::new(t.id),
            Cell::new(t.date.format("%Y-%m-%d")),
            Cell::new(&t.description),
            Cell::new(format!("{sign}{:.2}", t.amount)).fg(color),
        ]);
    }
    println!("{table}");
}

pub fn cmd_finance_remove(org: &mut Organizer, id: u64) -> Result<(), AppError> {
    if !org.delete_transaction(id)? {
        return Err(not_found("transaction", id));
    }
    println!("Transaction {id} removed.");
    Ok(())
}

// --- shopping ---

pub fn cmd_shop_add(org: &mut Organizer, draft: ItemDraft) -> Result<(), AppError> {
    require(&draft.name, "item name")?;
    non_negative(draft.cost, "cost")?;
    let id = org.add_shopping_item(draft)?;
    println!("Item added (id = {id})");
    if org.shopping().is_over_budget() {
        eprintln!("warning: the list now exceeds the budget");
    }
    Ok(())
}

pub fn cmd_shop_edit(org: &mut Organizer, id: u64, patch: ItemPatch) -> Result<(), AppError> {
    if let Some(name) = &patch.name {
        require(name, "item name")?;
    }
    if let Some(cost) = patch.cost {
        non_negative(cost, "cost")?;
    }
    if !org.update_shopping_item(id, &patch)? {
        return Err(not_found("item", id));
    }
    println!("Item {id} updated.");
    Ok(())
}

pub fn cmd_shop_list(org: &Organizer) {
    let list = org.shopping();
    let budget = list.budget();
    let sym = budget.currency.symbol();
    let total = list.budget_total();

    print!("Planned: {sym}{total:.2}");
    if budget.amount > 0.0 {
        if list.is_over_budget() {
            print!(" | Exceeds budget by {sym}{:.2}", total - budget.amount);
        } else {
            print!(" | {sym}{:.2} remaining of {sym}{:.2}", list.remaining(), budget.amount);
        }
    }
    println!();
    for (currency, spent) in list.totals() {
        if currency != budget.currency {
            println!("Also spending: {}{spent:.2}", currency.symbol());
        }
    }

    if list.items().is_empty() {
        println!("Your list is empty. Start planning!");
    } else {
        let mut table = table(&["ID", "Item", "Cost", "Note", "Kind"]);
        for i in list.items() {
            let cost = Cell::new(format!("{}{:.2}", i.currency.symbol(), i.cost));
            table.add_row(vec![
                Cell::new(i.id),
                Cell::new(&i.name),
                if list.item_over_budget(i) { cost.fg(Color::Red) } else { cost },
                Cell::new(&i.note),
                Cell::new(match i.frequency {
                    ItemFrequency::OneTime => "one-time",
                    ItemFrequency::Frequent => "frequent",
                }),
            ]);
        }
        println!("{table}");
    }

    let recs = list.visible_recommendations();
    if !recs.is_empty() {
        println!("Frequently bought:");
        let mut table = table(&["ID", "Item", "Last cost"]);
        for r in recs {
            table.add_row(vec![
                Cell::new(r.id),
                Cell::new(&r.name),
                Cell::new(format!("{}{:.2}", r.currency.symbol(), r.cost)),
            ]);
        }
        println!("{table}");
    }
}

pub fn cmd_shop_buy(org: &mut Organizer, id: u64) -> Result<(), AppError> {
    if !org.mark_item_purchased(id)? {
        return Err(not_found("item", id));
    }
    println!("Item {id} purchased.");
    Ok(())
}

pub fn cmd_shop_remove(org: &mut Organizer, id: u64) -> Result<(), AppError> {
    if !org.delete_shopping_item(id)? {
        return Err(not_found("item", id));
    }
    println!("Item {id} removed.");
    Ok(())
}

pub fn cmd_shop_restore(org: &mut Organizer, id: u64) -> Result<(), AppError> {
    match org.restore_recommendation(id)? {
        Some(new_id) => {
            println!("Added back to the list (id = {new_id})");
            Ok(())
        }
        None => Err(not_found("recommendation", id)),
    }
}

pub fn cmd_shop_forget(org: &mut Organizer, id: u64) -> Result<(), AppError> {
    if !org.forget_recommendation(id)? {
        return Err(not_found("recommendation", id));
    }
    println!("Recommendation {id} forgotten.");
    Ok(())
}

pub fn cmd_shop_budget(org: &mut Organizer, amount: f64, currency: Option<Currency>) -> Result<(), AppError> {
    non_negative(amount, "budget")?;
    let currency = currency.unwrap_or(org.shopping().budget().currency);
    org.set_shopping_budget(amount, currency)?;
    println!("Budget set to {}{amount:.2}", currency.symbol());
    Ok(())
}

// --- notes and wellness ---

pub fn cmd_note_add(org: &mut Organizer, title: String, content: String) -> Result<(), AppError> {
    match org.add_note(title, content)? {
        Some(id) => {
            println!("Note added (id = {id})");
            Ok(())
        }
        None => Err(AppError::InvalidInput("a note needs a title or some content".into())),
    }
}

pub fn cmd_note_list(org: &Organizer, search: Option<String>) {
    let notes = org.notes().search(search.as_deref().unwrap_or(""));
    if notes.is_empty() {
        println!("No notes found.");
        return;
    }
    let mut table = table(&["ID", "Date", "Title", "Content"]);
    for n in notes {
        table.add_row(vec![
            Cell::new(n.id),
            Cell::new(n.date.format("%Y-%m-%d")),
            Cell::new(&n.title).add_attribute(Attribute::Bold),
            Cell::new(&n.content),
        ]);
    }
    println!("{table}");
}

pub fn cmd_note_remove(org: &mut Organizer, id: u64) -> Result<(), AppError> {
    if !org.delete_note(id)? {
        return Err(not_found("note", id));
    }
    println!("Note {id} removed.");
    Ok(())
}

pub fn cmd_journal_add(org: &mut Organizer, text: String) -> Result<(), AppError> {
    match org.add_journal_entry(text)? {
        Some(id) => {
            println!("Entry saved (id = {id})");
            Ok(())
        }
        None => Err(AppError::InvalidInput("journal entry is empty".into())),
    }
}

pub fn cmd_journal_list(org: &Organizer) {
    let entries = org.notes().journal();
    if entries.is_empty() {
        println!("No journal entries yet. What are you grateful for today?");
        return;
    }
    let mut table = table(&["ID", "Date", "Entry"]);
    for n in entries {
        table.add_row(vec![Cell::new(n.id), Cell::new(n.date.format("%Y-%m-%d %H:%M")), Cell::new(&n.content)]);
    }
    println!("{table}");
}

pub fn cmd_mood(mood: Mood) {
    println!("{}", mood_advice(mood));
}

// --- student ---

pub fn cmd_class_add(
    org: &mut Organizer,
    subject: String,
    location: String,
    days: String,
    time: String,
) -> Result<(), AppError> {
    require(&subject, "subject")?;
    let id = org.add_class(subject, location, days, time)?;
    println!("Class added (id = {id})");
    Ok(())
}

pub fn cmd_assignment_add(org: &mut Organizer, subject: String, title: String, due: String) -> Result<(), AppError> {
    require(&subject, "subject")?;
    require(&due, "due date")?;
    let id = org.add_assignment(subject, title, due)?;
    println!("Assignment added (id = {id})");
    Ok(())
}

pub fn cmd_exam_add(org: &mut Organizer, subject: String, date: String, notes: String) -> Result<(), AppError> {
    require(&subject, "subject")?;
    require(&date, "exam date")?;
    let id = org.add_exam(subject, date, notes)?;
    println!("Exam added (id = {id})");
    Ok(())
}

pub fn cmd_class_list(org: &Organizer) {
    let classes = org.student().classes();
    if classes.is_empty() {
        println!("No classes added yet.");
        return;
    }
    let mut table = table(&["ID", "Subject", "When", "Where"]);
    for c in classes {
        table.add_row(vec![
            Cell::new(c.id),
            Cell::new(&c.subject),
            Cell::new(format!("{} @ {}", c.days, c.time)),
            Cell::new(&c.location),
        ]);
    }
    println!("{table}");
}

pub fn cmd_assignment_list(org: &Organizer) {
    let assignments = org.student().assignments();
    if assignments.is_empty() {
        println!("No assignments added yet.");
        return;
    }
    let mut table = table(&["ID", "Subject", "Title", "Due", "Status"]);
    for a in assignments {
        let status = match a.status {
            AssignmentStatus::Pending => Cell::new("pending").fg(Color::Yellow),
            AssignmentStatus::Done => Cell::new("done").fg(Color::Green),
        };
        table.add_row(vec![
            Cell::new(a.id),
            Cell::new(&a.subject),
            Cell::new(&a.title),
            Cell::new(a.due.replace('T', " ")),
            status,
        ]);
    }
    println!("{table}");
}

pub fn cmd_exam_list(org: &Organizer) {
    let exams = org.student().exams();
    if exams.is_empty() {
        println!("No exams added yet.");
        return;
    }
    let mut table = table(&["ID", "Subject", "Date", "Notes"]);
    for e in exams {
        table.add_row(vec![
            Cell::new(e.id),
            Cell::new(&e.subject),
            Cell::new(e.date.replace('T', " ")),
            Cell::new(&e.notes),
        ]);
    }
    println!("{table}");
}

pub fn cmd_assignment_toggle(org: &mut Organizer, id: u64) -> Result<(), AppError> {
    match org.toggle_assignment(id)? {
        Some(AssignmentStatus::Done) => println!("Assignment {id} done."),
        Some(AssignmentStatus::Pending) => println!("Assignment {id} pending again."),
        None => return Err(not_found("assignment", id)),
    }
    Ok(())
}

pub fn cmd_class_remove(org: &mut Organizer, id: u64) -> Result<(), AppError> {
    if !org.delete_class(id)? {
        return Err(not_found("class", id));
    }
    println!("Class {id} removed.");
    Ok(())
}

pub fn cmd_assignment_remove(org: &mut Organizer, id: u64) -> Result<(), AppError> {
    if !org.delete_assignment(id)? {
        return Err(not_found("assignment", id));
    }
    println!("Assignment {id} removed.");
    Ok(())
}

pub fn cmd_exam_remove(org: &mut Organizer, id: u64) -> Result<(), AppError> {
    if !org.delete_exam(id)? {
        return Err(not_found("exam", id));
    }
    println!("Exam {id} removed.");
    Ok(())
}

// --- settings ---

pub fn cmd_settings_show(org: &Organizer) {
    let s = org.settings();
    let c = &s.custom_colors;
    let mut table = table(&["Setting", "Value"]);
    table.add_row(vec!["theme".to_string(), format!("{:?}", s.theme).to_lowercase()]);
    table.add_row(vec!["accent".to_string(), s.accent().to_string()]);
    table.add_row(vec!["text color".to_string(), c.text.clone()]);
    table.add_row(vec!["background".to_string(), c.background.clone()]);
    table.add_row(vec!["card".to_string(), c.card.clone()]);
    table.add_row(vec!["font size".to_string(), format!("{:?}", s.font_size).to_lowercase()]);
    table.add_row(vec!["animations".to_string(), if s.animations_enabled { "on" } else { "off" }.to_string()]);
    println!("{table}");
}

pub fn cmd_settings_set(org: &mut Organizer, patch: SettingsPatch) -> Result<(), AppError> {
    if let Some((_, value)) = &patch.color {
        if crate::settings::parse_hex_color(value).is_none() {
            return Err(AppError::InvalidInput(format!("invalid color '{value}', use #rrggbb")));
        }
    }
    org.update_settings(&patch)?;
    println!("Settings updated.");
    Ok(())
}

pub fn cmd_settings_reset_colors(org: &mut Organizer) -> Result<(), AppError> {
    org.reset_colors()?;
    println!("Colors reset.");
    Ok(())
}

/// Deletes every collection.
pub fn cmd_reset(org: &mut Organizer, force: bool) -> Result<(), AppError> {
    if !force {
        print!("Are you sure you want to delete all data? This cannot be undone. [y/N] ");
        io::stdout().flush()?;
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        if input.trim().to_lowercase() != "y" {
            println!("Aborted.");
            return Ok(());
        }
    }
    org.reset()?;
    println!("All data deleted.");
    Ok(())
}
