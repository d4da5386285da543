//! Plain-text rendering for list and show output.
//!
//! Tables are sized by character count, so the layout holds for ASCII and
//! most Latin text; wide glyphs may misalign.

use projman_core::{Project, Task, User};
use std::io::{self, Write};

pub const UNASSIGNED: &str = "Unassigned";
pub const NO_PROJECT: &str = "No Project";

/// Titled text table with a header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    title: String,
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(title: impl Into<String>, headers: &[&'static str]) -> Self {
        Self {
            title: title.into(),
            headers: headers.to_vec(),
            rows: Vec::new(),
        }
    }

    /// Appends one row. Missing cells render empty; extra cells are dropped.
    /// Line breaks inside a cell are flattened to spaces.
    pub fn add_row(&mut self, cells: Vec<String>) {
        self.rows
            .push(cells.into_iter().map(|cell| single_line(&cell)).collect());
    }

    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        let widths = self.column_widths();
        let border = border_line(&widths);

        writeln!(out, "{}", self.title)?;
        writeln!(out, "{border}")?;
        let header: Vec<String> = self.headers.iter().map(|h| h.to_string()).collect();
        writeln!(out, "{}", row_line(&header, &widths))?;
        writeln!(out, "{border}")?;
        for row in &self.rows {
            writeln!(out, "{}", row_line(row, &widths))?;
        }
        writeln!(out, "{border}")
    }

    fn column_widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(index, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(index))
                    .map(|cell| cell.chars().count())
                    .fold(header.chars().count(), usize::max)
            })
            .collect()
    }
}

fn single_line(value: &str) -> String {
    value.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

fn border_line(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.push_str(&"-".repeat(width + 2));
        line.push('+');
    }
    line
}

fn row_line(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::from("|");
    for (index, width) in widths.iter().enumerate() {
        let cell = cells.get(index).map(String::as_str).unwrap_or("");
        let padding = width.saturating_sub(cell.chars().count());
        line.push(' ');
        line.push_str(cell);
        line.push_str(&" ".repeat(padding + 1));
        line.push('|');
    }
    line
}

pub fn users_table<'a>(title: &str, users: impl IntoIterator<Item = &'a User>) -> Table {
    let mut table = Table::new(title, &["ID", "Name", "Email"]);
    for user in users {
        table.add_row(vec![
            user.id().to_string(),
            user.name.clone(),
            user.email.clone(),
        ]);
    }
    table
}

pub fn projects_table<'a>(title: &str, projects: impl IntoIterator<Item = &'a Project>) -> Table {
    let mut table = Table::new(title, &["ID", "Title", "Description", "Due Date"]);
    for project in projects {
        table.add_row(vec![
            project.id().to_string(),
            project.title.clone(),
            project.description.clone(),
            project.due_date.to_string(),
        ]);
    }
    table
}

pub fn tasks_table<'a>(title: &str, tasks: impl IntoIterator<Item = &'a Task>) -> Table {
    let mut table = Table::new(title, &["ID", "Title", "Status", "Assigned To", "Project"]);
    for task in tasks {
        table.add_row(vec![
            task.id().to_string(),
            task.title.clone(),
            task.status.to_string(),
            task.assigned_to()
                .map(|id| id.to_string())
                .unwrap_or_else(|| UNASSIGNED.to_string()),
            task.project_id()
                .map(|id| id.to_string())
                .unwrap_or_else(|| NO_PROJECT.to_string()),
        ]);
    }
    table
}

/// Renders `table`, or `empty_message` when it has no rows.
pub fn render_or_empty(out: &mut impl Write, table: &Table, empty_message: &str) -> io::Result<()> {
    if table.rows.is_empty() {
        writeln!(out, "{empty_message}")
    } else {
        table.render(out)
    }
}
