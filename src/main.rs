use anyhow::{Context, Result};
use env_logger::Builder;
use sched_replay::{
    SimError, simulate_all,
    sim::{load, report},
};
use std::io::{self, Write};

fn main() -> Result<()> {
    Builder::from_default_env()
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();

    let args: Vec<String> = std::env::args().collect();
    let path = match args.as_slice() {
        [_, path] => path,
        _ => {
            let program = args.first().map_or("sched_replay", String::as_str);
            return Err(SimError::InvalidArguments {
                usage: format!("{program} <processes.csv>"),
            }
            .into());
        }
    };

    let processes = load::load_file(path).context("loading process list")?;

    // Schedule everything before printing anything
    let schedules = simulate_all(&processes).context("scheduling")?;

    let mut out = io::stdout().lock();
    for schedule in &schedules {
        report::render(&mut out, schedule).context("writing report")?;
    }
    out.flush()?;

    Ok(())
}
