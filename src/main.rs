use std::io::{self, Write};

use anyhow::{Context, Result};
use avl_interval_tree::{Interval, IntervalTree};
use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::EnvFilter;

/// The intervals inserted when none are given on the command line.
const EXAMPLE_INTERVALS: [(i64, i64); 10] = [
    (0, 3),
    (6, 10),
    (5, 8),
    (19, 20),
    (17, 19),
    (26, 26),
    (8, 9),
    (16, 21),
    (25, 30),
    (15, 23),
];

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Build an AVL interval tree, print its traversals and run overlap queries against it"
)]
struct Args {
    /// An interval to insert, formatted as LOW,HIGH. May be repeated.
    ///
    /// Defaults to a built-in set of ten example intervals.
    #[arg(long = "interval", value_name = "LOW,HIGH", value_parser = parse_interval, allow_hyphen_values = true)]
    intervals: Vec<Interval<i64>>,

    /// The interval to find an overlap for.
    #[arg(long, value_name = "LOW,HIGH", default_value = "4,9", value_parser = parse_interval, allow_hyphen_values = true)]
    query: Interval<i64>,

    /// Print every stored interval overlapping the query, not just one.
    #[arg(long)]
    collect: bool,

    /// Report whether an exact interval is stored. May be repeated.
    #[arg(long = "search", value_name = "LOW,HIGH", value_parser = parse_interval, allow_hyphen_values = true)]
    searches: Vec<Interval<i64>>,

    /// Remove an interval after querying, then print the level-order traversal
    /// again. May be repeated.
    #[arg(long = "remove", value_name = "LOW,HIGH", value_parser = parse_interval, allow_hyphen_values = true)]
    removals: Vec<Interval<i64>>,

    /// The default log level, overridden by RUST_LOG.
    #[arg(long, env = "LOG_LEVEL", default_value_t = Level::WARN)]
    log_level: Level,
}

fn parse_interval(s: &str) -> Result<Interval<i64>> {
    let (low, high) = s
        .split_once(',')
        .with_context(|| format!("expected LOW,HIGH, got {s:?}"))?;

    let low = low
        .trim()
        .parse()
        .with_context(|| format!("invalid lower bound {low:?}"))?;
    let high = high
        .trim()
        .parse()
        .with_context(|| format!("invalid upper bound {high:?}"))?;

    Ok(Interval::new(low, high)?)
}

fn init_logging(level: Level) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env()?;

    // Logs go to stderr, leaving stdout for the report.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    Ok(())
}

fn build_tree(intervals: Vec<Interval<i64>>) -> Result<IntervalTree<i64>> {
    let intervals = if intervals.is_empty() {
        EXAMPLE_INTERVALS
            .into_iter()
            .map(|(low, high)| Interval::new(low, high))
            .collect::<Result<Vec<_>, _>>()?
    } else {
        intervals
    };

    let mut t = IntervalTree::new();
    for v in intervals {
        if !t.insert(v) {
            warn!(interval = %v, "ignoring interval with duplicate lower bound");
        }
    }

    info!(n_intervals = t.len(), height = ?t.height(), "built interval tree");
    Ok(t)
}

fn write_traversals<W: Write>(out: &mut W, t: &IntervalTree<i64>) -> io::Result<()> {
    writeln!(out, "In-order:")?;
    for (v, max_high) in t.iter_with_max_high() {
        writeln!(out, "{v} - {max_high}")?;
    }

    write_level_order(out, t)
}

fn write_level_order<W: Write>(out: &mut W, t: &IntervalTree<i64>) -> io::Result<()> {
    writeln!(out, "Level-order:")?;
    for (v, max_high) in t.iter_level_order_with_max_high() {
        writeln!(out, "{v} - {max_high}")?;
    }
    Ok(())
}

fn write_report<W: Write>(out: &mut W, t: &mut IntervalTree<i64>, args: &Args) -> io::Result<()> {
    write_traversals(out, t)?;

    if args.collect {
        writeln!(out, "\n{} overlaps:", args.query)?;
        for v in t.iter_overlaps(&args.query) {
            writeln!(out, "{v}")?;
        }
        writeln!(out)?;
    }

    match t.find_overlap(&args.query) {
        Some(v) => writeln!(out, "{} overlapped {v}", args.query)?,
        None => writeln!(out, "{} overlapped nothing", args.query)?,
    }

    for v in &args.searches {
        writeln!(out, "search {v}: {}", t.contains(v))?;
    }

    if !args.removals.is_empty() {
        for v in &args.removals {
            if t.remove(v).is_none() {
                warn!(interval = %v, "interval to remove not found");
            }
        }
        write_level_order(out, t)?;
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_level)?;

    let mut t = build_tree(args.intervals.clone())?;

    let mut out = io::stdout().lock();
    write_report(&mut out, &mut t, &args).context("failed to write report")?;
    out.flush()?;

    Ok(())
}
