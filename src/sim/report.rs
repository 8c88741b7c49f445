//! Plain-text report for one schedule: title banner, Gantt bar and the
//! result table with averages in its footer.

use std::io::{self, Write};

use comfy_table::{Cell, CellAlignment, Table, presets::ASCII_FULL};

use super::driver::Schedule;
use crate::core::TimeSlice;

const GANTT_CELL: usize = 8;

const HEADER: [&str; 8] = [
    "ID",
    "Priority",
    "Burst",
    "Arrival",
    "Wait",
    "Turnaround",
    "Exit",
    "Response",
];

pub fn render<W: Write>(w: &mut W, schedule: &Schedule) -> io::Result<()> {
    write_title(w, &schedule.title)?;
    write_gantt(w, &schedule.gantt)?;
    write_table(w, schedule)
}

pub fn write_title<W: Write>(w: &mut W, title: &str) -> io::Result<()> {
    let rule = "-".repeat(title.len() * 2);
    writeln!(w, "{rule}")?;
    writeln!(w, "{} {title}", " ".repeat(title.len() / 2))?;
    writeln!(w, "{rule}")
}

pub fn write_gantt<W: Write>(w: &mut W, gantt: &[TimeSlice]) -> io::Result<()> {
    writeln!(w, "Gantt schedule")?;

    write!(w, "|")?;
    for slice in gantt {
        let pid = slice.pid.to_string();
        let padding = " ".repeat(GANTT_CELL.saturating_sub(pid.len()) / 2);
        write!(w, "{padding}{pid}{padding}|")?;
    }
    writeln!(w)?;

    for slice in gantt {
        write!(w, "{}\t", slice.start)?;
    }
    if let Some(last) = gantt.last() {
        write!(w, "{}", last.stop)?;
    }
    write!(w, "\n\n")
}

pub fn write_table<W: Write>(w: &mut W, schedule: &Schedule) -> io::Result<()> {
    writeln!(w, "Schedule table")?;

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_header(HEADER.map(|name| Cell::new(name).set_alignment(CellAlignment::Center)));
    for column in table.column_iter_mut() {
        column.set_cell_alignment(CellAlignment::Right);
    }

    for row in &schedule.rows {
        table.add_row([
            row.id.to_string(),
            row.priority.to_string(),
            row.burst.to_string(),
            row.arrival.to_string(),
            row.wait.to_string(),
            row.turnaround.to_string(),
            row.completion.to_string(),
            row.response.to_string(),
        ]);
    }

    let averages = &schedule.averages;
    table.add_row([
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        format!("Average\n{:.2}", averages.wait),
        format!("Average\n{:.2}", averages.turnaround),
        format!("Throughput\n{:.2}/t", averages.throughput),
        format!("Average\n{:.2}", averages.response),
    ]);

    writeln!(w, "{table}")
}
