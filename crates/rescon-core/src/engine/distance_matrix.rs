/// The state of one residue pair after contact extraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PairDistance {
    /// At least one of the residues has no usable anchor.
    Unknown,
    /// The anchors are farther apart than the pruning bound.
    Pruned,
    /// Passed the pruning pass; awaiting full evaluation.
    Candidate,
    /// Minimum inter-atomic distance between the two residues.
    Evaluated(f64),
}

impl PairDistance {
    pub fn evaluated(&self) -> Option<f64> {
        match *self {
            PairDistance::Evaluated(d) => Some(d),
            _ => None,
        }
    }
}

/// Upper-triangular store of pairwise residue distances.
///
/// Only pairs `i < j` are stored; lookups are symmetric and the diagonal is
/// never represented. Indices are 0-based residue positions.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    size: usize,
    entries: Vec<PairDistance>,
}

impl DistanceMatrix {
    /// Creates a matrix for `size` residues with every pair [`PairDistance::Unknown`].
    pub fn new(size: usize) -> Self {
        let pair_count = size * size.saturating_sub(1) / 2;
        Self {
            size,
            entries: vec![PairDistance::Unknown; pair_count],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn pair_count(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    fn index(&self, i: usize, j: usize) -> Option<usize> {
        let (i, j) = if i < j { (i, j) } else { (j, i) };
        if i == j || j >= self.size {
            return None;
        }
        Some(i * (2 * self.size - i - 1) / 2 + (j - i - 1))
    }

    pub fn get(&self, i: usize, j: usize) -> Option<PairDistance> {
        self.index(i, j).map(|idx| self.entries[idx])
    }

    /// Stores `value` for the pair; returns `false` for a diagonal or
    /// out-of-range pair.
    pub fn set(&mut self, i: usize, j: usize, value: PairDistance) -> bool {
        match self.index(i, j) {
            Some(idx) => {
                self.entries[idx] = value;
                true
            }
            None => false,
        }
    }

    /// Iterates over `(i, j, value)` for every stored pair, `i < j`, in row order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize, PairDistance)> + '_ {
        let n = self.size;
        (0..n)
            .flat_map(move |i| (i + 1..n).map(move |j| (i, j)))
            .zip(self.entries.iter().copied())
            .map(|((i, j), value)| (i, j, value))
    }

    pub fn count(&self, predicate: impl Fn(&PairDistance) -> bool) -> usize {
        self.entries.iter().filter(|e| predicate(e)).count()
    }
}
