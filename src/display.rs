use colored::Colorize;

use crate::form::{FormMode, FormSession};
use crate::models::{ApartmentRecord, ApartmentStatus};

const HEADERS: [&str; 5] = ["ID", "Name", "Location", "Rent", "Status"];

pub fn format_rent(rent: f64) -> String {
    format!("${rent}")
}

fn colored_status(status: ApartmentStatus, width: usize) -> String {
    let padded = format!("{:<width$}", status.as_str());
    match status {
        ApartmentStatus::Available => padded.green().to_string(),
        ApartmentStatus::Occupied => padded.red().to_string(),
    }
}

pub fn render_table(records: &[ApartmentRecord]) -> String {
    let rows: Vec<[String; 4]> = records
        .iter()
        .map(|r| {
            [
                r.id.to_string(),
                r.name.clone(),
                r.location.clone(),
                format_rent(r.rent),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }
    widths[4] = widths[4].max("Available".len());

    let mut out = String::new();
    let header: Vec<String> = HEADERS
        .iter()
        .zip(widths.iter())
        .map(|(h, &w)| format!("{h:<w$}"))
        .collect();
    out.push_str(&header.join("  ").bold().to_string());
    out.push('\n');

    if records.is_empty() {
        out.push_str("(no apartments)\n");
        return out;
    }

    for (row, record) in rows.iter().zip(records) {
        let mut cells: Vec<String> = row
            .iter()
            .zip(widths.iter())
            .map(|(cell, &w)| format!("{cell:<w$}"))
            .collect();
        cells.push(colored_status(record.status, widths[4]));
        out.push_str(cells.join("  ").trim_end());
        out.push('\n');
    }
    out
}

pub fn render_form(session: &FormSession) -> String {
    let fields = session.fields();
    let action = match session.mode() {
        FormMode::Create => "Add".to_string(),
        FormMode::Edit(id) => format!("Update (apartment {id})"),
    };

    format!(
        "name: {}\nlocation: {}\nrent: {}\nstatus: {}\n[{}]",
        fields.name, fields.location, fields.rent, fields.status, action
    )
}
