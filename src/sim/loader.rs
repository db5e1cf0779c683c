use log::warn;
use std::{fs, io, path::Path};

use super::process::Process;

// One `id arrival burst` per line; malformed lines are skipped
pub fn parse_processes(input: &str) -> Vec<Process> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(n, line)| {
            let parsed = parse_line(line);
            if parsed.is_none() {
                warn!("skipping malformed process line {}: {line:?}", n + 1);
            }
            parsed
        })
        .collect()
}

pub fn load_processes(path: impl AsRef<Path>) -> io::Result<Vec<Process>> {
    let text = fs::read_to_string(path)?;
    Ok(parse_processes(&text))
}

fn parse_line(line: &str) -> Option<Process> {
    let mut fields = line.split_whitespace().map(str::parse::<i64>);
    let id = fields.next()?.ok()?;
    let arrival = fields.next()?.ok()?;
    let burst = fields.next()?.ok()?;
    Process::from_signed(id, arrival, burst)
}
