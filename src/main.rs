//! Command-line report driver.
//!
//! `analyze` prints the closure dimensions, a decoded witness, and the
//! product `p * q` for manual verification; `search` runs the SAT matching
//! search; `bound` prints the bilinear rank bound.

use clap::{Args, Parser, Subcommand};
use quadclose::sat::search;
use quadclose::{quadratic_rank_bound, ClosureAnalysis, Error, Poly};

#[derive(Parser)]
#[command(name = "quadclose", version, about = "Multiplicative closure analysis of GF(2) polynomials")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Closure analysis for a fixed polynomial p.
    Analyze(AnalyzeArgs),
    /// SAT search for (p, q) pairs under a forced matching.
    Search(SearchArgs),
    /// Bilinear rank upper bound for a fixed quadratic p.
    Bound(BoundArgs),
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Number of boolean variables.
    #[arg(long)]
    n: u32,
    /// Quadratic term of p as "i,j"; repeat for each term.
    #[arg(long = "pair", value_parser = parse_pair, required = true)]
    pairs: Vec<(u32, u32)>,
    /// Emit the report as JSON instead of text.
    #[arg(long)]
    json: bool,
    /// Also print the bilinear rank bound.
    #[arg(long)]
    bound: bool,
}

#[derive(Args)]
struct SearchArgs {
    /// Number of boolean variables.
    #[arg(long)]
    n: u32,
    /// Matching size k: forces pairs (4i, 4i+1) into p and (4i+2, 4i+3) into q.
    #[arg(long, default_value_t = 1)]
    matching: u32,
    /// Enumerate up to this many solutions instead of stopping at one.
    #[arg(long)]
    limit: Option<usize>,
    /// Print each solution as an n-by-n pair grid.
    #[arg(long)]
    grid: bool,
}

#[derive(Args)]
struct BoundArgs {
    /// Number of boolean variables.
    #[arg(long)]
    n: u32,
    /// Quadratic term of p as "i,j"; repeat for each term.
    #[arg(long = "pair", value_parser = parse_pair, required = true)]
    pairs: Vec<(u32, u32)>,
}

fn parse_pair(s: &str) -> Result<(u32, u32), String> {
    let (i, j) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"i,j\", got {:?}", s))?;
    let i: u32 = i.trim().parse().map_err(|e| format!("bad index {:?}: {}", i, e))?;
    let j: u32 = j.trim().parse().map_err(|e| format!("bad index {:?}: {}", j, e))?;
    if i == j {
        return Err(format!("pair indices must differ, got ({}, {})", i, j));
    }
    Ok((i.min(j), i.max(j)))
}

fn run_analyze(args: &AnalyzeArgs) -> Result<(), Error> {
    let p = Poly::from_pairs(&args.pairs)?;
    let report = ClosureAnalysis::analyze(args.n, &p)?.report();
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).expect("report serializes")
        );
    } else {
        println!("n        = {}", report.n);
        println!("p        = {}", report.p);
        println!("dim_qs   = {}", report.dim_qs);
        println!("dim_prod = {}", report.dim_prod);
        match (&report.witness, &report.product) {
            (Some(q), Some(product)) => {
                println!("q        = {}", q);
                println!("p*q      = {}", product);
            }
            _ => println!("q        = (closure subspace is zero-dimensional)"),
        }
    }
    if args.bound {
        println!("rank bound = {}", quadratic_rank_bound(args.n, &p)?);
    }
    Ok(())
}

fn print_grid(n: u32, p: &[(u32, u32)], q: &[(u32, u32)]) {
    for i in 0..n {
        let mut line = String::with_capacity(n as usize);
        for j in 0..n {
            let in_p = p.contains(&(i, j));
            let in_q = q.contains(&(i, j));
            line.push(match (in_p, in_q) {
                (true, true) => 'B',
                (true, false) => 'P',
                (false, true) => 'Q',
                (false, false) => '.',
            });
        }
        println!("{}", line);
    }
    println!();
}

fn run_search(args: &SearchArgs) -> Result<(), Error> {
    let show = |index: usize, p: &[(u32, u32)], q: &[(u32, u32)]| {
        println!("solution {}", index);
        println!("  p pairs = {:?}", p);
        println!("  q pairs = {:?}", q);
        if args.grid {
            print_grid(args.n, p, q);
        }
    };
    match args.limit {
        None => {
            let (p, q) = search::solve_one(args.n, args.matching)?;
            show(0, &p, &q);
        }
        Some(limit) => {
            for (index, solution) in search::enumerate(args.n, args.matching)?
                .take(limit)
                .enumerate()
            {
                let (p, q) = solution?;
                show(index, &p, &q);
            }
        }
    }
    Ok(())
}

fn run_bound(args: &BoundArgs) -> Result<(), Error> {
    let p = Poly::from_pairs(&args.pairs)?;
    println!("rank bound = {}", quadratic_rank_bound(args.n, &p)?);
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let result = match &cli.command {
        Command::Analyze(args) => run_analyze(args),
        Command::Search(args) => run_search(args),
        Command::Bound(args) => run_bound(args),
    };
    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
