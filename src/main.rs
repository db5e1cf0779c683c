use anyhow::{Context, Result, bail};
use clap::Parser;
use rand::prelude::*;
use std::path::PathBuf;
use std::str::FromStr;

use cpu_sched_sim::{
    Algorithm, Process, Sim, SimOutcome,
    scheduler::{DEFAULT_MLFQ_Q1, DEFAULT_MLFQ_Q2, DEFAULT_QUANTUM},
    sim::load_processes,
};

#[derive(Debug, Clone, Copy, PartialEq)]
enum PolicyArg {
    All,
    One(Algorithm),
}

impl FromStr for PolicyArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(PolicyArg::All);
        }
        s.parse().map(PolicyArg::One)
    }
}

/// Simulate CPU scheduling policies over a fixed process set
#[derive(Parser, Debug)]
#[command(name = "cpu-sched-sim", long_about = None)]
struct Args {
    /// Scheduling policy: fcfs, sjf, srtf, rr, mlfq or all
    #[arg(short, long, default_value = "all")]
    policy: PolicyArg,

    /// Round-robin time quantum
    #[arg(short, long, default_value_t = DEFAULT_QUANTUM)]
    quantum: u64,

    /// MLFQ level 1 time slice
    #[arg(long, default_value_t = DEFAULT_MLFQ_Q1)]
    q1: u64,

    /// MLFQ level 2 time slice
    #[arg(long, default_value_t = DEFAULT_MLFQ_Q2)]
    q2: u64,

    /// Process file, one `id arrival burst` per line
    #[arg(short, long, conflicts_with = "random")]
    file: Option<PathBuf>,

    /// Generate a random workload over this many ticks instead of reading a file
    #[arg(short, long)]
    random: Option<u64>,

    /// Seed for the random workload
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Per-tick arrival probability for the random workload
    #[arg(long, default_value_t = 0.3)]
    p_arrival: f64,

    /// Probability that a random job is short
    #[arg(long, default_value_t = 0.3)]
    p_short: f64,
}

impl Args {
    fn algorithms(&self) -> Vec<Algorithm> {
        match self.policy {
            PolicyArg::All => Algorithm::all(self.quantum, self.q1, self.q2).to_vec(),
            PolicyArg::One(Algorithm::RoundRobin { .. }) => vec![Algorithm::RoundRobin {
                quantum: self.quantum,
            }],
            PolicyArg::One(Algorithm::Mlfq { .. }) => vec![Algorithm::Mlfq {
                q1: self.q1,
                q2: self.q2,
            }],
            PolicyArg::One(algorithm) => vec![algorithm],
        }
    }

    fn processes(&self) -> Result<Vec<Process>> {
        if let Some(ticks) = self.random {
            return Ok(bernoulli_processes(ticks, self.p_arrival, self.p_short, 2, 6, self.seed));
        }

        let path = self.file.clone().unwrap_or_else(|| PathBuf::from("processes.txt"));
        let processes = load_processes(&path)
            .with_context(|| format!("failed to read process file {}", path.display()))?;
        if processes.is_empty() {
            bail!("{} contains no valid processes", path.display());
        }
        Ok(processes)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut sim = Sim::new(args.processes()?);
    print_processes(&sim);

    for outcome in sim.run_all(&args.algorithms())? {
        print_outcome(&outcome);
    }

    Ok(())
}

fn bernoulli_processes(
    ticks: u64,
    p_arrival: f64,
    p_short: f64,
    short_ticks: u64,
    long_ticks: u64,
    seed: u64,
) -> Vec<Process> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut processes = Vec::new();

    for t in 0..ticks {
        if rng.random::<f64>() < p_arrival {
            let burst_time = if rng.random::<f64>() < p_short {
                short_ticks
            } else {
                long_ticks
            };

            processes.push(Process {
                id: processes.len() as i64 + 1,
                arrival_time: t,
                burst_time,
            });
        }
    }

    processes
}

fn print_processes(sim: &Sim) {
    println!("ID\tAT\tBT");
    for r in sim.records() {
        println!("{}\t{}\t{}", r.id, r.arrival, r.burst);
    }
}

fn print_outcome(outcome: &SimOutcome) {
    println!("\n[{} Results]", outcome.algorithm);
    println!("Process\tAT\tBT\tCT\tTAT\tWT");
    for r in &outcome.records {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            r.id, r.arrival, r.burst, r.completion, r.turnaround, r.waiting
        );
    }

    let timeline: Vec<String> = outcome
        .timeline
        .iter()
        .map(|s| format!("{}[{},{})", s.owner, s.start, s.end))
        .collect();
    println!("Timeline: {}", timeline.join(" "));

    let summary = &outcome.summary;
    println!("\nAverage Waiting Time: {:.2}", summary.averages.waiting);
    println!("Average Turnaround Time: {:.2}", summary.averages.turnaround);
    println!(
        "Makespan: {} ticks ({} idle, {:.1}% utilization), longest wait {}",
        summary.makespan,
        summary.idle_ticks,
        summary.utilization * 100.0,
        summary.max_waiting
    );
}
