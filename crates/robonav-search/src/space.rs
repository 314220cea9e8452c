use robonav_core::{Grid, Point};

/// Sentinel parent index meaning "no parent".
pub(crate) const NO_PARENT: usize = usize::MAX;

// ---------------------------------------------------------------------------
// Internal per-cell search record
// ---------------------------------------------------------------------------

/// Which tree of a bidirectional search discovered a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum Side {
    #[default]
    Forward,
    Backward,
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) g: i32,
    pub(crate) h: i32,
    pub(crate) parent: usize,
    pub(crate) generation: u32,
    pub(crate) closed: bool,
    pub(crate) side: Side,
}

impl Node {
    #[inline]
    pub(crate) fn f(&self) -> i32 {
        self.g + self.h
    }
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0,
            h: 0,
            parent: NO_PARENT,
            generation: 0,
            closed: false,
            side: Side::Forward,
        }
    }
}

// ---------------------------------------------------------------------------
// Public view of a node
// ---------------------------------------------------------------------------

/// Search annotations of one grid position, as left by the last run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub pos: Point,
    /// Path cost from the run's origin.
    pub g: i32,
    /// Heuristic estimate to the run's target.
    pub h: i32,
    /// Predecessor on the best path found so far.
    pub parent: Option<Point>,
}

impl Cell {
    /// Priority used by the informed searches.
    #[inline]
    pub fn f(&self) -> i32 {
        self.g + self.h
    }
}

// ---------------------------------------------------------------------------
// SearchSpace
// ---------------------------------------------------------------------------

/// Per-run search annotations for every cell of a grid.
///
/// The grid itself stays immutable; costs, heuristics and parent links live
/// here, indexed like the grid. [`reset`](SearchSpace::reset) invalidates all
/// of them at once by bumping a generation counter, so one `SearchSpace` can
/// be reused across many runs without reallocating.
pub struct SearchSpace {
    pub(crate) width: i32,
    pub(crate) height: i32,
    pub(crate) nodes: Vec<Node>,
    pub(crate) generation: u32,
    // shared scratch buffer for neighbor queries
    pub(crate) nbuf: Vec<Point>,
}

impl SearchSpace {
    /// Create an arena sized for `grid`.
    pub fn new(grid: &Grid) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            nodes: vec![Node::default(); grid.len()],
            // nodes start at generation 0, which no run ever uses
            generation: 1,
            nbuf: Vec::with_capacity(8),
        }
    }

    /// Resize for `grid` if its dimensions differ from the current ones.
    pub fn fit(&mut self, grid: &Grid) {
        if self.width == grid.width() && self.height == grid.height() {
            return;
        }
        self.width = grid.width();
        self.height = grid.height();
        self.nodes.clear();
        self.nodes.resize(grid.len(), Node::default());
        self.generation = 1;
    }

    /// Forget every annotation from previous runs.
    pub fn reset(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped: old stamps could collide with new ones.
            for n in self.nodes.iter_mut() {
                *n = Node::default();
            }
            self.generation = 1;
        }
    }

    /// Annotations of `p` from the current run, or `None` if the run never
    /// touched it.
    pub fn cell(&self, p: Point) -> Option<Cell> {
        let i = self.idx(p)?;
        let n = self.node(i)?;
        Some(Cell {
            pos: p,
            g: n.g,
            h: n.h,
            parent: (n.parent != NO_PARENT).then(|| self.point(n.parent)),
        })
    }

    // -----------------------------------------------------------------------
    // Node helpers
    // -----------------------------------------------------------------------

    /// The node at `i`, if it belongs to the current run.
    #[inline]
    pub(crate) fn node(&self, i: usize) -> Option<&Node> {
        let n = &self.nodes[i];
        (n.generation == self.generation).then_some(n)
    }

    #[inline]
    pub(crate) fn is_seen(&self, i: usize) -> bool {
        self.nodes[i].generation == self.generation
    }

    #[inline]
    pub(crate) fn is_closed(&self, i: usize) -> bool {
        self.node(i).is_some_and(|n| n.closed)
    }

    /// The node at `i`, freshly initialised if the current run has not
    /// touched it yet.
    #[inline]
    pub(crate) fn touch(&mut self, i: usize) -> &mut Node {
        let cur = self.generation;
        let n = &mut self.nodes[i];
        if n.generation != cur {
            *n = Node {
                generation: cur,
                ..Node::default()
            };
        }
        n
    }

    #[inline]
    pub(crate) fn parent(&self, i: usize) -> Option<usize> {
        self.node(i)
            .map(|n| n.parent)
            .filter(|&p| p != NO_PARENT)
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if p.x < 0 || p.y < 0 || p.x >= self.width || p.y >= self.height {
            return None;
        }
        Some((p.y * self.width + p.x) as usize)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        let w = self.width as usize;
        Point::new((idx % w) as i32, (idx / w) as i32)
    }
}
