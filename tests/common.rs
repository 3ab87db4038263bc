use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use maze_solver::Grid;

/// Splits a case file into the maze and the recorded output.
const SEPARATOR: &str = "================\n";
const CASE_DIR: &str = "tests";
const CASE_EXT: &str = "maze";

/// A golden case: a maze file, optionally followed by `SEPARATOR` and the expected output.
struct Case {
    name: String,
    path: PathBuf,
}

impl Case {
    fn collect(subdir: &str) -> Vec<Case> {
        let dir = Path::new(CASE_DIR).join(subdir);
        let mut cases = std::fs::read_dir(&dir)
            .unwrap_or_else(|err| panic!("cannot list {}: {err}", dir.display()))
            .map(|ent| ent.unwrap().path())
            .filter(|path| path.extension().map_or(false, |ext| ext == CASE_EXT))
            .map(|path| Case {
                name: path.file_stem().unwrap().to_string_lossy().into_owned(),
                path,
            })
            .collect::<Vec<_>>();
        cases.sort_by(|a, b| a.name.cmp(&b.name));
        cases
    }

    /// Loads the maze and renders the whole file as it should read with `output` recorded.
    fn render(&self, content: &str, f: &mut impl FnMut(&Grid) -> Result<String>) -> Result<String> {
        let maze = content
            .split_once(SEPARATOR)
            .map_or(content, |(maze, _)| maze);
        let grid = maze.trim().parse::<Grid>().context("Invalid maze")?;
        let output = f(&grid)?;
        Ok(format!("{grid}\n{SEPARATOR}{output}"))
    }
}

/// Solves every `*.maze` case under `tests/{subdir}` with `f` and compares the rendered file
/// with what is on disk. `UPDATE_EXPECT=1` rewrites stale cases instead of failing them.
pub fn run_tests(subdir: &str, mut f: impl FnMut(&Grid) -> Result<String>) {
    let cases = Case::collect(subdir);
    assert!(!cases.is_empty(), "no .{CASE_EXT} cases under {CASE_DIR}/{subdir}");
    let update = std::env::var("UPDATE_EXPECT").map_or(false, |v| v == "1");

    let mut failed = Vec::new();
    for case in &cases {
        let content = std::fs::read_to_string(&case.path).unwrap();
        match case.render(&content, &mut f) {
            Ok(got) if got == content => eprintln!("{}: \x1B[32mOK\x1B[0m", case.name),
            Ok(got) if update => {
                std::fs::write(&case.path, got).unwrap();
                eprintln!("{}: \x1B[33mUpdated\x1B[0m", case.name);
            }
            Ok(got) => {
                let expected = content.split_once(SEPARATOR).map_or("", |(_, out)| out);
                let got = got.split_once(SEPARATOR).map_or("", |(_, out)| out);
                eprintln!(
                    "{}: \x1B[31mFAILED\x1B[0m\n--- expected\n{expected}--- got\n{got}",
                    case.name
                );
                failed.push(&case.name);
            }
            Err(err) => {
                eprintln!("{}: \x1B[31mFAILED\x1B[0m\n{err:?}", case.name);
                failed.push(&case.name);
            }
        }
    }

    eprintln!("PASS = {}, FAIL = {}", cases.len() - failed.len(), failed.len());
    if !failed.is_empty() {
        eprintln!("failed: {failed:?}");
        std::process::exit(1);
    }
}
