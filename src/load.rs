use std::io::{self, BufRead, Lines};

use derive_more::Display;
use derive_new::new;
use log::debug;

use crate::{Coordinate, Grid, MAX_CELL_COST};

/// A validated grid with both endpoints in bounds and not walls.
#[derive(new)]
pub struct Query {
    pub grid: Grid,
    pub start: Coordinate,
    pub end: Coordinate,
}

#[derive(Debug, Display)]
pub enum LoadError {
    #[display(fmt = "Failed to read input: {}", _0)]
    Io(io::Error),
    #[display(fmt = "Grid dimensions not specified")]
    MissingDimensions,
    #[display(fmt = "Grid dimensions must be two values: rows cols")]
    MalformedDimensions,
    #[display(fmt = "Grid dimensions must be positive integers")]
    InvalidDimensions,
    #[display(fmt = "Not enough grid rows: expected {}, found {}", expected, found)]
    MissingRows { expected: usize, found: usize },
    #[display(
        fmt = "Wrong number of columns in grid row {}: expected {}, found {}",
        row,
        expected,
        found
    )]
    WrongColumnCount {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[display(fmt = "Invalid cell value at ({},{}): expected an integer from 0 to 9", row, col)]
    InvalidCell { row: usize, col: usize },
    #[display(fmt = "Start and end points not specified")]
    MissingEndpoints,
    #[display(fmt = "Start and end points must be four values: startRow startCol endRow endCol")]
    MalformedEndpoints,
    #[display(fmt = "Start and end coordinates must be integers")]
    InvalidEndpoints,
    #[display(fmt = "Start or end point is outside the grid")]
    EndpointOutOfBounds,
    #[display(fmt = "Start point cannot be a wall")]
    StartIsWall,
    #[display(fmt = "End point cannot be a wall")]
    EndIsWall,
}

impl From<io::Error> for LoadError {
    fn from(e: io::Error) -> Self {
        LoadError::Io(e)
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            _ => None,
        }
    }
}

/**
 * Reads `rows cols`, then `rows` lines of `cols` cell costs, then
 * `startRow startCol endRow endCol`. Anything after that is ignored.
 */
pub fn parse_input<R: BufRead>(reader: R) -> Result<Query, LoadError> {
    let mut lines = reader.lines();

    let dimensions = next_line(&mut lines)?.ok_or(LoadError::MissingDimensions)?;
    let (rows, cols) = parse_dimensions(&dimensions)?;
    debug!("grid {}x{}", rows, cols);

    let mut cells = Vec::new();
    for row in 0..rows {
        let line = next_line(&mut lines)?.ok_or(LoadError::MissingRows {
            expected: rows,
            found: row,
        })?;
        cells.push(parse_row(&line, row, cols)?);
    }
    let grid = Grid::new(cells);

    let endpoints = next_line(&mut lines)?.ok_or(LoadError::MissingEndpoints)?;
    let (start, end) = parse_endpoints(&endpoints)?;

    if !grid.in_bounds(&start) || !grid.in_bounds(&end) {
        return Err(LoadError::EndpointOutOfBounds);
    }

    if grid.is_wall(&start) {
        return Err(LoadError::StartIsWall);
    }

    if grid.is_wall(&end) {
        return Err(LoadError::EndIsWall);
    }

    debug!("start:{} end:{}", start, end);
    Ok(Query::new(grid, start, end))
}

fn next_line<B: BufRead>(lines: &mut Lines<B>) -> Result<Option<String>, LoadError> {
    Ok(lines.next().transpose()?)
}

fn parse_dimensions(line: &str) -> Result<(usize, usize), LoadError> {
    let tokens = line.split_whitespace().collect::<Vec<_>>();
    if tokens.len() != 2 {
        return Err(LoadError::MalformedDimensions);
    }

    let positive = |token: &str| token.parse::<usize>().ok().filter(|&n| n > 0);
    match (positive(tokens[0]), positive(tokens[1])) {
        (Some(rows), Some(cols)) => Ok((rows, cols)),
        _ => Err(LoadError::InvalidDimensions),
    }
}

fn parse_row(line: &str, row: usize, cols: usize) -> Result<Vec<u8>, LoadError> {
    let tokens = line.split_whitespace().collect::<Vec<_>>();
    if tokens.len() != cols {
        return Err(LoadError::WrongColumnCount {
            row,
            expected: cols,
            found: tokens.len(),
        });
    }

    tokens
        .iter()
        .enumerate()
        .map(|(col, token)| {
            token
                .parse::<u8>()
                .ok()
                .filter(|&cost| cost <= MAX_CELL_COST)
                .ok_or(LoadError::InvalidCell { row, col })
        })
        .collect()
}

fn parse_endpoints(line: &str) -> Result<(Coordinate, Coordinate), LoadError> {
    let tokens = line.split_whitespace().collect::<Vec<_>>();
    if tokens.len() != 4 {
        return Err(LoadError::MalformedEndpoints);
    }

    let values = tokens
        .iter()
        .map(|token| token.parse::<i32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| LoadError::InvalidEndpoints)?;

    Ok((
        Coordinate::new(values[0], values[1]),
        Coordinate::new(values[2], values[3]),
    ))
}
