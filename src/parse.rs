use std::str::FromStr;

use anyhow::{bail, ensure, Context, Result};

use crate::{Cell, Grid, Location, Path};

impl FromStr for Grid {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s.lines().map(|line| line.strip_suffix('\r').unwrap_or(line));

        let header = lines.next().context("Missing maze dimensions")?;
        let mut dims = header.split_whitespace();
        let mut parse_dim = |what: &str| -> Result<usize> {
            let dim = dims
                .next()
                .with_context(|| format!("Missing number of {what}"))?;
            dim.parse::<usize>()
                .with_context(|| format!("Invalid number of {what}: {dim:?}"))
        };
        let rows = parse_dim("rows")?;
        let cols = parse_dim("columns")?;
        if let Some(extra) = dims.next() {
            bail!("Unexpected token {extra:?} after maze dimensions");
        }
        ensure!(
            rows > 0 && cols > 0,
            "Invalid maze dimensions {rows}x{cols}"
        );
        Grid::checked_len(rows, cols)
            .with_context(|| format!("Invalid maze dimensions {rows}x{cols}"))?;

        // Storage grows with the rows actually present, never with the header.
        let mut cells = Vec::new();
        for row in 0..rows {
            let line = lines
                .next()
                .with_context(|| format!("Missing row {row}, expecting {rows} rows"))?;
            ensure!(
                line.chars().count() == cols,
                "Width mismatch on row {row}, expecting width {cols}",
            );
            for (col, ch) in line.chars().enumerate() {
                cells.push(match ch {
                    '-' => Cell::Open,
                    '@' => Cell::Wall,
                    _ => bail!("Invalid cell {ch:?} at row {row}, column {col}"),
                });
            }
        }

        if let Some(extra) = lines.find(|line| !line.trim().is_empty()) {
            bail!("Unexpected line after the last row: {extra:?}");
        }
        Ok(Grid::from_cells(rows, cols, |loc| {
            cells[loc.row * cols + loc.col]
        })?)
    }
}

impl FromStr for Location {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s
            .trim()
            .strip_prefix('<')
            .and_then(|s| s.strip_suffix('>'))
            .with_context(|| format!("Location must look like <row,col>: {s:?}"))?;
        let (row, col) = inner
            .split_once(',')
            .with_context(|| format!("Missing column in {s:?}"))?;
        Ok(Location {
            row: row.trim().parse().context("Invalid row")?,
            col: col.trim().parse().context("Invalid column")?,
        })
    }
}

impl FromStr for Path {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s
            .trim()
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .context("Path must be enclosed in brackets")?
            .trim();

        let mut path = Path::new();
        let mut rest = inner;
        while !rest.is_empty() {
            // Commas also separate row and column, so split on the closing bracket.
            let end = rest.find('>').context("Unterminated location")?;
            let (token, tail) = rest.split_at(end + 1);
            path.push(token.parse()?);
            rest = tail.trim_start();
            if let Some(tail) = rest.strip_prefix(',') {
                rest = tail.trim_start();
                ensure!(!rest.is_empty(), "Trailing comma in path");
            } else {
                ensure!(rest.is_empty(), "Expected ',' between locations, found {rest:?}");
            }
        }
        Ok(path)
    }
}
