use anyhow::{Context, Result};
use clap::{arg, value_parser, ArgAction, ArgGroup, ArgMatches, Command};
use mkp_metaheur::problem;
use mkp_metaheur::solver::{Heuristic, Improvement, SolveConfig, Solver};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("mkp")
        .about("Heuristic solver for the 0/1 multidimensional knapsack problem")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            arg!(<INSTANCE> "Path to the instance file")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            arg!(<HEURISTIC> "Heuristic producing the initial solution")
                .value_parser(Heuristic::ALL.map(Heuristic::name)),
        )
        .arg(arg!(--fi "Polish with first-improvement local search").action(ArgAction::SetTrue))
        .arg(arg!(--bi "Polish with best-improvement local search").action(ArgAction::SetTrue))
        .arg(arg!(--vnd "Polish with variable neighborhood descent").action(ArgAction::SetTrue))
        .group(ArgGroup::new("improvement").args(["fi", "bi", "vnd"]).multiple(false))
        .arg(
            arg!(--"max-time" <SECONDS> "Time budget in seconds; zero or negative means unbounded")
                .value_parser(value_parser!(f64))
                .allow_negative_numbers(true),
        )
        .arg(arg!(--seed <SEED> "Random seed").value_parser(value_parser!(u64)))
        .arg(arg!(--terse "Print only value, feasibility and time").action(ArgAction::SetTrue))
}

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Converts `--max-time` seconds to a millisecond budget.
fn time_limit_ms(seconds: Option<f64>) -> Option<u64> {
    match seconds {
        Some(s) if s > 0.0 => Some(((s * 1000.0).round() as u64).max(1)),
        _ => None,
    }
}

fn solve_config(matches: &ArgMatches) -> Result<SolveConfig> {
    let heuristic: Heuristic = matches
        .get_one::<String>("HEURISTIC")
        .context("missing heuristic")?
        .parse()
        .map_err(anyhow::Error::msg)?;

    let improvement = if matches.get_flag("fi") {
        Improvement::FirstImprovement
    } else if matches.get_flag("bi") {
        Improvement::BestImprovement
    } else if matches.get_flag("vnd") {
        Improvement::Vnd
    } else {
        Improvement::None
    };

    let mut config = SolveConfig::new(heuristic).with_improvement(improvement);
    config.time_limit_ms = time_limit_ms(matches.get_one::<f64>("max-time").copied());
    config.seed = matches.get_one::<u64>("seed").copied();
    Ok(config)
}

fn run(matches: &ArgMatches) -> Result<()> {
    let config = solve_config(matches)?;
    let path = matches
        .get_one::<PathBuf>("INSTANCE")
        .context("missing instance path")?;
    let problem = problem::from_path(path)
        .with_context(|| format!("failed to load instance {}", path.display()))?;
    let terse = matches.get_flag("terse");

    if !terse {
        println!("{problem}");
    }

    let outcome = Solver::solve(&problem, &config);

    println!("Solution value: {}", outcome.solution.value());
    if outcome.feasible {
        println!("Solution is feasible.");
    } else {
        println!("Solution is infeasible.");
    }
    println!(
        "Execution time in seconds: {:.6}",
        outcome.elapsed.as_secs_f64()
    );
    if !terse {
        print!("{}", outcome.solution);
    }
    Ok(())
}

fn main() {
    let matches = match cli().try_get_matches() {
        Ok(matches) => matches,
        Err(e) => {
            let _ = e.print();
            std::process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };

    enable_tracing();

    if let Err(e) = run(&matches) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> std::result::Result<ArgMatches, clap::Error> {
        cli().try_get_matches_from(std::iter::once("mkp").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_is_well_formed() {
        cli().debug_assert();
    }

    #[test]
    fn test_time_limit_conversion() {
        assert_eq!(time_limit_ms(None), None);
        assert_eq!(time_limit_ms(Some(0.0)), None);
        assert_eq!(time_limit_ms(Some(-3.0)), None);
        assert_eq!(time_limit_ms(Some(1.5)), Some(1500));
        assert_eq!(time_limit_ms(Some(0.0001)), Some(1));
    }

    #[test]
    fn test_parses_full_command() {
        let m = parse(&["inst.txt", "sa", "--vnd", "--max-time", "2.5", "--seed", "9", "--terse"]).unwrap();
        let config = solve_config(&m).unwrap();
        assert_eq!(config.heuristic, Heuristic::Annealing);
        assert_eq!(config.improvement, Improvement::Vnd);
        assert_eq!(config.time_limit_ms, Some(2500));
        assert_eq!(config.seed, Some(9));
        assert!(m.get_flag("terse"));
    }

    #[test]
    fn test_negative_max_time_is_unbounded() {
        let m = parse(&["inst.txt", "greedy", "--max-time", "-1"]).unwrap();
        assert_eq!(solve_config(&m).unwrap().time_limit_ms, None);
    }

    #[test]
    fn test_rejects_conflicting_improvements() {
        assert!(parse(&["inst.txt", "greedy", "--fi", "--bi"]).is_err());
    }

    #[test]
    fn test_rejects_unknown_heuristic() {
        assert!(parse(&["inst.txt", "tabu"]).is_err());
        assert!(parse(&["inst.txt"]).is_err());
    }
}
