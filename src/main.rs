use std::path::{Path as FsPath, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use maze_solver::term::TermView;
use maze_solver::{solve, verify, Grid, Path};
use rayon::prelude::*;

const EXTENSION: &str = "maze";

#[derive(Parser)]
#[command(name = "maze-solver")]
#[command(about = "Find and check paths through '-'/'@' mazes")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a maze and print the path, start first
    Solve {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Animate the search in the terminal
        #[arg(long)]
        visualize: bool,

        /// Milliseconds each explored path stays on screen
        #[arg(long, default_value = "30")]
        delay: u64,
    },
    /// Check a path file against a maze
    Verify {
        #[arg(value_name = "MAZE")]
        maze: PathBuf,

        #[arg(value_name = "PATH_FILE")]
        path: PathBuf,
    },
    /// Solve every maze in the given directories and compare with expectations
    Check {
        /// Directory of mazes that must have a solution
        #[arg(long)]
        solvable: Vec<PathBuf>,

        /// Directory of mazes that must not have a solution
        #[arg(long)]
        unsolvable: Vec<PathBuf>,
    },
}

fn load_grid(path: &FsPath) -> Result<Grid> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read the maze {}", path.display()))?;
    data.parse::<Grid>()
        .with_context(|| format!("Failed to parse the maze {}", path.display()))
}

fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match Cli::parse().command {
        Command::Solve {
            file,
            visualize,
            delay,
        } => {
            let grid = load_grid(&file)?;
            if visualize {
                run_visual(&grid, Duration::from_millis(delay))
            } else {
                run_plain(&grid)
            }
        }
        Command::Verify { maze, path } => {
            let grid = load_grid(&maze)?;
            let data = std::fs::read_to_string(&path).context("Failed to read the path")?;
            let path = data.parse::<Path>().context("Failed to parse the path")?;
            Ok(if verify::check(&grid, &path) {
                eprintln!("Solution is correct");
                ExitCode::SUCCESS
            } else {
                eprintln!("Solution is not correct");
                ExitCode::FAILURE
            })
        }
        Command::Check {
            solvable,
            unsolvable,
        } => run_check(&solvable, &unsolvable),
    }
}

fn run_plain(grid: &Grid) -> Result<ExitCode> {
    eprintln!("Maze:");
    eprint!("{grid}");

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner} Explored {pos} paths")?);
    let solution = solve::bfs(grid, &mut |_: solve::Trail<'_>| pb.inc(1));
    pb.finish_and_clear();

    let Some(solution) = solution else {
        eprintln!("Couldn't find solution to maze.");
        return Ok(ExitCode::FAILURE);
    };
    let correct = verify::check(grid, &solution);
    eprintln!("Solution:");
    eprint!("{}", grid.overlay(&solution));
    println!("{solution}");
    if correct {
        eprintln!("Solution is correct");
    } else {
        eprintln!("Solution is not correct");
    }
    Ok(ExitCode::SUCCESS)
}

fn run_visual(grid: &Grid, delay: Duration) -> Result<ExitCode> {
    let mut view = TermView::new(Term::stderr(), grid, delay);
    view.show_grid()?;
    let solution = solve::bfs(grid, &mut view);
    let message = match &solution {
        Some(solution) => {
            view.show_path(solution, true)?;
            format!("Found a path of {} moves. Press any key.", solution.moves())
        }
        None => "Couldn't find solution to maze. Press any key.".to_owned(),
    };
    view.finish(&message)?;
    view.wait_for_key()?;
    Ok(if solution.is_some() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Outcome of one maze in a `check` run.
struct Report {
    name: String,
    result: Result<String, String>,
}

fn check_one(path: &FsPath, solvable: bool) -> Report {
    let name = path.display().to_string();
    let result = load_grid(path)
        .map_err(|err| format!("{err:#}"))
        .and_then(|grid| classify(&grid, solve::solve(&grid).as_ref(), solvable));
    Report { name, result }
}

/// Judges a solver's answer for a maze expected to be `solvable` or not.
fn classify(grid: &Grid, solution: Option<&Path>, solvable: bool) -> Result<String, String> {
    match (solution, solvable) {
        (Some(solution), true) if verify::check(grid, solution) => {
            Ok(format!("correctly solved in {} moves", solution.moves()))
        }
        (Some(_), true) => Err("incorrect solution".to_owned()),
        (Some(_), false) => Err("unsolvable, but solution found".to_owned()),
        (None, true) => Err("solution not found".to_owned()),
        (None, false) => Ok("as expected, solution not found".to_owned()),
    }
}

fn list_mazes(dir: &FsPath) -> Result<Vec<PathBuf>> {
    let mut files = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to list {}", dir.display()))?
        .map(|ent| ent.map(|ent| ent.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    files.retain(|path| path.extension().map_or(false, |ext| ext == EXTENSION));
    files.sort();
    Ok(files)
}

fn run_check(solvable: &[PathBuf], unsolvable: &[PathBuf]) -> Result<ExitCode> {
    let mut jobs = Vec::new();
    for (dirs, expect) in [(solvable, true), (unsolvable, false)] {
        for dir in dirs {
            jobs.extend(list_mazes(dir)?.into_iter().map(|file| (file, expect)));
        }
    }

    let pb = ProgressBar::new(jobs.len() as u64);
    let reports = jobs
        .par_iter()
        .map(|(file, expect)| {
            let report = check_one(file, *expect);
            pb.inc(1);
            report
        })
        .collect::<Vec<_>>();
    pb.finish_and_clear();

    let mut failed_cnt = 0;
    for Report { name, result } in &reports {
        match result {
            Ok(msg) => eprintln!("{name}: \x1B[32mOK\x1B[0m ({msg})"),
            Err(msg) => {
                eprintln!("{name}: \x1B[31mFAILED\x1B[0m ({msg})");
                failed_cnt += 1;
            }
        }
    }
    eprintln!(
        "PASS = {}, FAIL = {failed_cnt}",
        reports.len() - failed_cnt
    );
    Ok(if failed_cnt == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(text: &str) -> Grid {
        text.parse().unwrap()
    }

    #[test]
    fn classify_every_outcome() {
        let open = grid("2 2\n--\n--\n");
        let walled = grid("2 2\n-@\n@-\n");
        let found = solve::solve(&open).unwrap();
        let bogus: Path = "[<0,0>,<1,1>]".parse().unwrap();

        assert_eq!(
            classify(&open, Some(&found), true),
            Ok("correctly solved in 2 moves".to_owned())
        );
        assert_eq!(
            classify(&open, Some(&bogus), true),
            Err("incorrect solution".to_owned())
        );
        assert_eq!(
            classify(&open, Some(&found), false),
            Err("unsolvable, but solution found".to_owned())
        );
        assert_eq!(
            classify(&open, None, true),
            Err("solution not found".to_owned())
        );
        assert_eq!(
            classify(&walled, None, false),
            Ok("as expected, solution not found".to_owned())
        );
    }

    #[test]
    fn check_sample_mazes() {
        let root = FsPath::new(env!("CARGO_MANIFEST_DIR")).join("mazes");
        for (dir, solvable) in [("solvable", true), ("unsolvable", false)] {
            let files = list_mazes(&root.join(dir)).unwrap();
            assert!(!files.is_empty(), "no mazes in {dir}");
            for file in files {
                let Report { name, result } = check_one(&file, solvable);
                assert!(result.is_ok(), "{name}: {result:?}");
            }
        }

        let missing = check_one(&root.join("no-such.maze"), true);
        assert!(missing.result.is_err());
    }
}
