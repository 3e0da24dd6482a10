use chrono::NaiveDateTime;
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};
use tasklane_core::{Task, TaskDto};

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Pri")]
    priority: String,
    #[tabled(rename = "Sev")]
    severity: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Title")]
    title: String,
}

impl TaskRow {
    fn new(task: &TaskDto, now: NaiveDateTime) -> Self {
        let id_str = task.id.to_string();
        let mut due = match &task.time {
            Some(time) => format!("{} {}", task.due_date, time),
            None => task.due_date.clone(),
        };
        if task.is_overdue(now) {
            due.push_str(" (overdue)");
        }

        Self {
            id: id_str[..8].to_string(),
            status: task.status.clone(),
            priority: task.priority.clone(),
            severity: task.severity.clone(),
            due,
            title: task.title.clone(),
        }
    }
}

pub fn print_table(tasks: &[TaskDto], now: NaiveDateTime) {
    if tasks.is_empty() {
        println!("No tasks yet! Add one with: tasklane add <title> due:YYYY-MM-DD");
        return;
    }

    let rows: Vec<TaskRow> = tasks.iter().map(|t| TaskRow::new(t, now)).collect();
    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));

    println!("{}", table);
}

pub fn print_detail(task: &Task) {
    println!("  ID:          {}", task.id);
    println!("  Title:       {}", task.title);
    println!("  Status:      {}", task.status);
    println!("  Priority:    {}", task.priority);
    println!("  Severity:    {}", task.severity);
    match &task.time {
        Some(time) => println!("  Due:         {} {}", task.due_date, time),
        None => println!("  Due:         {}", task.due_date),
    }
    if let Some(desc) = &task.description {
        println!("  Description: {}", desc);
    }
}
