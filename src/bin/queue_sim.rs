//! 多队列 supermarket 模型仿真
//!
//! 运行一次 power-of-d 分派仿真并打印平均逗留时间、截止时间统计与队列长度分布。

use clap::Parser;
use std::process::ExitCode;
use supermarket_sim::queueing::{
    DelayDistribution, Discipline, DistributionKind, QueueConfig, QueueSim, ReportError, theory,
};

#[derive(Debug, Parser)]
#[command(
    name = "queue-sim",
    about = "Supermarket model: n servers, each arrival joins the shortest of d sampled queues"
)]
struct Args {
    /// Per-server arrival rate
    #[arg(long, default_value_t = 0.7)]
    lambd: f64,
    /// Service rate
    #[arg(long, default_value_t = 1.0)]
    mu: f64,
    /// Maximum simulated time
    #[arg(long, default_value_t = 1_000_000.0)]
    max_t: f64,
    /// Number of servers
    #[arg(long, default_value_t = 1)]
    n: usize,
    /// Number of queues sampled per arrival
    #[arg(long, default_value_t = 1)]
    d: usize,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Scheduling discipline: fifo, sjf or edf
    #[arg(long, default_value = "fifo")]
    discipline: Discipline,
    /// Give every job a deadline and count misses
    #[arg(long)]
    deadline_mode: bool,
    /// deadline = arrival + service * slack_margin
    #[arg(long, default_value_t = 1.0)]
    slack_margin: f64,
    /// Delay distribution: exp or weibull
    #[arg(long, default_value = "exp")]
    distribution: DistributionKind,
    /// Weibull shape parameter
    #[arg(long, default_value_t = 1.0)]
    shape: f64,
    /// Print the run report as JSON instead of text
    #[arg(long)]
    json: bool,
    /// Print tail fractions for queue lengths 1..=N
    #[arg(long, default_value_t = 0)]
    tail_len: usize,
    /// Log at info level (RUST_LOG overrides)
    #[arg(long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // 初始化 tracing
    let default_level = if args.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let cfg = QueueConfig {
        lambda: args.lambd,
        mu: args.mu,
        max_time: args.max_t,
        servers: args.n,
        choices: args.d,
        discipline: args.discipline,
        deadline_mode: args.deadline_mode,
        slack_margin: args.slack_margin,
        distribution: DelayDistribution::from_kind(args.distribution, args.shape),
        seed: args.seed,
    };

    let mut sim = match QueueSim::new(cfg) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };
    sim.run();
    let report = sim.report();

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("error: failed to encode report: {e}");
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    let stats = sim.stats();
    match stats.mean_time_in_system() {
        Ok(w) => println!("Average time spent in the system: {w}"),
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    }
    if args.d == 1 {
        if let Some(w) = theory::mm1_time_in_system(args.lambd, args.mu) {
            println!("Theoretical expectation for random server choice (d=1): {w}");
        }
    }

    let cfg = &report.config;
    if cfg.deadline_mode {
        println!("Deadline mode with slack margin={}", cfg.slack_margin);
        println!(
            "Deadline misses / Total jobs: {} / {}",
            stats.deadline_misses,
            stats.completed()
        );
        match stats.miss_rate() {
            Ok(rate) => println!("Deadline miss rate: {:.2}%", rate * 100.0),
            Err(ReportError::NoCompletions) => println!("Deadline miss rate: n/a"),
            Err(e) => eprintln!("error: {e}"),
        }
    }

    if args.tail_len > 0 {
        match stats.tail_fractions(args.tail_len) {
            Ok(fracs) => {
                for (i, frac) in fracs.iter().enumerate() {
                    let len = i + 1;
                    let expected = theory::supermarket_tail(args.lambd / args.mu, args.d, len as u32);
                    println!("queue_len>={len}: measured={frac:.6} theoretical={expected:.6}");
                }
            }
            Err(e) => eprintln!("error: {e}"),
        }
    }

    ExitCode::SUCCESS
}
