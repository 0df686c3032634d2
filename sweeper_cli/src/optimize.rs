use std::{
    fs::File,
    io::{BufReader, BufWriter},
    panic,
    path::PathBuf,
    thread,
    time::Duration,
};

use anyhow::{Context, bail};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use sweeper_optimizer::{
    json::types::JsonSchedule,
    parsers::{
        DEFAULT_DATETIME_FORMAT, TimestampFormats, csv_parser::CsvParser,
        json_parser::parse_json_file,
    },
    problem::scheduling_problem::SchedulingProblem,
    solver::{
        solver::Solver,
        solver_params::{
            AcceptorStrategy, ConstructionHeuristic, NeighborhoodMode, SolverParams, Termination,
            Threads,
        },
    },
};
use tracing::{info, warn};

use crate::{parsers, table};

#[derive(Args)]
pub struct OptimizeArgs {
    /// Vehicles csv export
    #[arg(long, requires = "work_orders")]
    vehicles: Option<PathBuf>,

    /// Work orders csv export
    #[arg(long, requires = "vehicles")]
    work_orders: Option<PathBuf>,

    /// JSON problem, instead of the csv pair
    #[arg(short, long, conflicts_with_all = ["vehicles", "work_orders"])]
    input: Option<PathBuf>,

    /// Write the best schedule as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Solver parameters as JSON. Flags below override its values
    #[arg(long)]
    params: Option<PathBuf>,

    /// Time budget for the search (e.g., "30s", "5m", "PT1H30M")
    #[arg(short, long, value_parser = parsers::parse_duration)]
    timeout: Option<jiff::SignedDuration>,

    #[arg(long, short = 'n')]
    iterations: Option<usize>,

    /// Number of independent search threads, 0 for one per core
    #[arg(long)]
    threads: Option<usize>,

    #[arg(long)]
    seed: Option<u64>,

    /// hill-climbing, simulated-annealing or tabu
    #[arg(long, value_parser = parsers::parse_acceptor)]
    acceptor: Option<AcceptorStrategy>,

    /// Moves evaluated per iteration, 0 to evaluate the whole neighborhood
    #[arg(long)]
    sample_size: Option<usize>,

    /// none or greedy
    #[arg(long, value_parser = parsers::parse_construction)]
    construction: Option<ConstructionHeuristic>,

    /// strptime format of the input timestamps
    #[arg(long, default_value = DEFAULT_DATETIME_FORMAT)]
    datetime_format: String,
}

pub fn run(args: OptimizeArgs) -> anyhow::Result<()> {
    let problem = load_problem(&args)?;
    let params = solver_params(&args)?;

    info!(
        vehicles = problem.vehicles().len(),
        work_orders = problem.work_orders().len(),
        "Loaded problem"
    );

    let budget = params.terminations.iter().find_map(|termination| match termination {
        Termination::Duration(duration) => Some(*duration),
        _ => None,
    });

    let solver = Solver::new(problem, params)?;

    let bar = match budget {
        Some(budget) => {
            let bar = ProgressBar::new(budget.as_secs().max(1) as u64);
            bar.set_style(ProgressStyle::default_bar().template("[{bar:40}] ({elapsed}/{len}s)")?);
            bar
        }
        None => ProgressBar::hidden(),
    };

    let result = with_progress(&bar, || solver.solve());
    bar.finish_and_clear();

    let Some(best) = result.best else {
        warn!("No solution found");
        return Ok(());
    };

    info!(
        score = %best.score,
        feasible = best.is_feasible(),
        termination = ?result.termination,
        iterations = result.statistics.iterations,
        "Finished"
    );

    let schedule = JsonSchedule::from_solution(&best);
    println!("{}", table::schedule_table(&schedule));
    println!("{}", table::analysis_table(&schedule));

    if let Some(output) = &args.output {
        let writer = BufWriter::new(File::create(output)?);
        serde_json::to_writer_pretty(writer, &schedule)?;
        info!("Schedule written to {:?}", output);
    }

    Ok(())
}

/// Runs `work` on a scoped thread and ticks `bar` until it returns or panics.
fn with_progress<T, F>(bar: &ProgressBar, work: F) -> T
where
    T: Send,
    F: FnOnce() -> T + Send,
{
    thread::scope(|s| {
        let handle = s.spawn(work);
        while !handle.is_finished() {
            bar.set_position(bar.elapsed().as_secs());
            thread::sleep(Duration::from_millis(200));
        }

        handle.join().unwrap_or_else(|payload| panic::resume_unwind(payload))
    })
}

fn load_problem(args: &OptimizeArgs) -> anyhow::Result<SchedulingProblem> {
    let formats = TimestampFormats {
        datetime: args.datetime_format.clone(),
        ..TimestampFormats::default()
    };

    match (&args.input, &args.vehicles, &args.work_orders) {
        (Some(input), _, _) => parse_json_file(input, &formats)
            .with_context(|| format!("Failed to load {input:?}")),
        (None, Some(vehicles), Some(work_orders)) => CsvParser::new(formats)
            .parse(vehicles, work_orders)
            .context("Failed to load csv input"),
        _ => bail!("Either --input or both --vehicles and --work-orders are required"),
    }
}

fn solver_params(args: &OptimizeArgs) -> anyhow::Result<SolverParams> {
    let mut params = match &args.params {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("Failed to open {path:?}"))?;
            serde_json::from_reader(BufReader::new(file))?
        }
        None => SolverParams::default(),
    };

    let mut terminations = Vec::new();
    if let Some(timeout) = args.timeout {
        terminations.push(Termination::Duration(timeout));
    }
    if let Some(iterations) = args.iterations {
        terminations.push(Termination::Iterations(iterations));
    }
    if !terminations.is_empty() {
        params.terminations = terminations;
    }

    if let Some(threads) = args.threads {
        params.search_threads = match threads {
            0 => Threads::Auto,
            1 => Threads::Single,
            n => Threads::Multi(n),
        };
    }

    if let Some(seed) = args.seed {
        params.seed = seed;
    }

    if let Some(acceptor) = args.acceptor {
        params.acceptor = acceptor;
    }

    if let Some(sample_size) = args.sample_size {
        params.neighborhood = match sample_size {
            0 => NeighborhoodMode::Exhaustive,
            sample_size => NeighborhoodMode::Sampled { sample_size },
        };
    }

    if let Some(construction) = args.construction {
        params.construction_heuristic = construction;
    }

    Ok(params)
}
