use std::{
    cmp::Ordering,
    collections::{BinaryHeap, HashMap},
    fmt::{Display, Formatter},
    io::{self, BufRead, Write},
};

use derive_more::{Display, From};
use derive_new::new;
use log::{debug, info};

pub mod config;
mod load;

pub use load::{parse_input, LoadError, Query};

/// Accumulated cost of a walk through the grid.
pub type Cost = u64;

pub const WALL: u8 = 0;
pub const MAX_CELL_COST: u8 = 9;

#[derive(Debug, Display)]
pub enum FindPathError {
    #[display(fmt = "No path found")]
    Unreachable,
}

impl std::error::Error for FindPathError {}

/// Everything that can stop a single run of the program.
#[derive(Debug, Display, From)]
pub enum Error {
    #[display(fmt = "{}", _0)]
    Load(LoadError),
    #[display(fmt = "{}", _0)]
    FindPath(FindPathError),
    #[display(fmt = "Failed to write path: {}", _0)]
    Io(io::Error),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Load(e) => Some(e),
            Error::FindPath(e) => Some(e),
            Error::Io(e) => Some(e),
        }
    }
}

/// Reads a query from `input`, solves it and writes the path to `output`.
///
/// Nothing is written unless a complete path was found.
pub fn run<R: BufRead, W: Write>(input: R, output: &mut W) -> Result<(), Error> {
    let query = parse_input(input)?;

    let search = query.grid.dijkstra(&query.start, &query.end);
    let path = search.reconstruct_path(&query.start, &query.end)?;

    info!(
        "path from {} to {}: {} cells, cost {}",
        query.start,
        query.end,
        path.len(),
        search.cost_to(&query.end).unwrap_or_default()
    );

    write_path(output, &path)?;
    output.flush()?;
    Ok(())
}

/// Immutable weighted grid. A cell cost is charged when the cell is entered;
/// a cost of [`WALL`] means the cell can never be entered.
pub struct Grid {
    cells: Vec<Vec<u8>>,
}

impl Grid {
    pub fn new(cells: Vec<Vec<u8>>) -> Self {
        Self { cells }
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    pub fn in_bounds(&self, point: &Coordinate) -> bool {
        self.rc_in_bounds(point.row, point.col)
    }

    /// Cost of entering `point`. Callers must check [`Grid::in_bounds`] first.
    pub fn cost(&self, point: &Coordinate) -> u8 {
        self.cells[point.row as usize][point.col as usize]
    }

    pub fn is_wall(&self, point: &Coordinate) -> bool {
        self.cost(point) == WALL
    }

    /// Upper bound on any finite path cost in this grid.
    pub fn max_path_cost(&self) -> Cost {
        (self.rows() as Cost) * (self.cols() as Cost) * Cost::from(MAX_CELL_COST)
    }

    /**
     * Returns the cheapest path from start to end, both inclusive.
     * Start and end must be in bounds and not walls.
     * Err if end cannot be reached from start.
     */
    pub fn find_path(
        &self,
        start: &Coordinate,
        end: &Coordinate,
    ) -> Result<Vec<Coordinate>, FindPathError> {
        self.dijkstra(start, end).reconstruct_path(start, end)
    }

    /**
     * Runs Dijkstra from start, stopping once end is settled.
     *
     * Equal-cost frontier entries pop in insertion order and neighbors are
     * visited right, down, left, up, so the reported path is deterministic.
     */
    pub fn dijkstra(&self, start: &Coordinate, end: &Coordinate) -> Search {
        debug_assert!(self.in_bounds(start) && self.in_bounds(end));

        let mut search = Search::new(self.rows(), self.cols(), self.max_path_cost() + 1);
        search.set_cost(start, 0);

        let mut frontier = Frontier::default();
        frontier.insert(*start, 0);

        while let Some(curr) = frontier.pop_min() {
            debug!("curr:{} cost:{}", curr.point, curr.cost);

            //A cheaper entry for this point was queued after this one.
            if curr.cost > search.settled(&curr.point) {
                debug!("stale entry");
                continue;
            }

            //Costs are non-negative, so the first fresh pop of end is its minimum.
            if curr.point == *end {
                debug!("reached end");
                break;
            }

            for dir in DIRECTIONS {
                let adj = Coordinate::new(curr.point.row + dir.drow, curr.point.col + dir.dcol);

                if !self.in_bounds(&adj) || self.is_wall(&adj) {
                    continue;
                }

                let candidate = curr.cost + Cost::from(self.cost(&adj));
                if candidate < search.settled(&adj) {
                    debug!("relax {} to {}", adj, candidate);
                    search.relax(adj, curr.point, candidate);
                    frontier.insert(adj, candidate);
                }
            }
        }

        search
    }

    fn rc_in_bounds(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows() && (col as usize) < self.cols()
    }
}

/// Settled costs and predecessors produced by [`Grid::dijkstra`].
pub struct Search {
    costs: Vec<Vec<Cost>>,
    predecessors: HashMap<Coordinate, Coordinate>,
    infinity: Cost,
}

impl Search {
    fn new(rows: usize, cols: usize, infinity: Cost) -> Self {
        Self {
            costs: vec![vec![infinity; cols]; rows],
            predecessors: HashMap::new(),
            infinity,
        }
    }

    /// Best known cost to `point`, or `None` if it was never reached.
    pub fn cost_to(&self, point: &Coordinate) -> Option<Cost> {
        let row = usize::try_from(point.row).ok()?;
        let col = usize::try_from(point.col).ok()?;
        let cost = *self.costs.get(row)?.get(col)?;
        (cost < self.infinity).then_some(cost)
    }

    pub fn predecessor(&self, point: &Coordinate) -> Option<&Coordinate> {
        self.predecessors.get(point)
    }

    /**
     * Walks predecessors back from end to start.
     * Returns the path from start to end, both inclusive.
     */
    pub fn reconstruct_path(
        &self,
        start: &Coordinate,
        end: &Coordinate,
    ) -> Result<Vec<Coordinate>, FindPathError> {
        if self.cost_to(end).is_none() {
            debug!("no path found");
            return Err(FindPathError::Unreachable);
        }

        let mut path = vec![*end];
        let mut curr = *end;
        while curr != *start {
            let prev = self
                .predecessors
                .get(&curr)
                .ok_or(FindPathError::Unreachable)?;
            path.push(*prev);
            curr = *prev;
        }

        path.reverse();
        Ok(path)
    }

    fn settled(&self, point: &Coordinate) -> Cost {
        self.costs[point.row as usize][point.col as usize]
    }

    fn set_cost(&mut self, point: &Coordinate, cost: Cost) {
        self.costs[point.row as usize][point.col as usize] = cost;
    }

    fn relax(&mut self, point: Coordinate, from: Coordinate, cost: Cost) {
        self.set_cost(&point, cost);
        self.predecessors.insert(point, from);
    }
}

/// Min-priority queue of discovered points. Ties pop in insertion order.
/// Several entries for the same point may be queued at once.
#[derive(Default)]
pub struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    inserted: u64,
}

impl Frontier {
    pub fn insert(&mut self, point: Coordinate, cost: Cost) {
        self.heap.push(FrontierEntry::new(point, cost, self.inserted));
        self.inserted += 1;
    }

    pub fn pop_min(&mut self) -> Option<FrontierEntry> {
        self.heap.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

#[derive(Debug, PartialEq, Eq, new)]
pub struct FrontierEntry {
    pub point: Coordinate,
    pub cost: Cost,
    seq: u64,
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    //reversed so the max-heap pops the cheapest, oldest entry first
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost
            .cmp(&other.cost)
            .then(self.seq.cmp(&other.seq))
            .reverse()
    }
}

/// Writes one `row col` line per point followed by a `.` line.
pub fn write_path<W: Write>(out: &mut W, path: &[Coordinate]) -> io::Result<()> {
    for point in path {
        writeln!(out, "{} {}", point.row, point.col)?;
    }
    writeln!(out, ".")
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, new)]
pub struct Coordinate {
    pub row: i32,
    pub col: i32,
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

#[derive(Debug)]
struct Direction {
    drow: i32,
    dcol: i32,
}

impl Direction {
    const fn new(drow: i32, dcol: i32) -> Self {
        Self { drow, dcol }
    }
}

const RIGHT: Direction = Direction::new(0, 1);
const DOWN: Direction = Direction::new(1, 0);
const LEFT: Direction = Direction::new(0, -1);
const UP: Direction = Direction::new(-1, 0);
const DIRECTIONS: [Direction; 4] = [RIGHT, DOWN, LEFT, UP];
