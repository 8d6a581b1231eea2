/// The graph of locked preferences, as an adjacency matrix over candidate indices.
///
/// `is_locked(a, b)` means that the edge `a -> b` has been committed: `a` is
/// preferred over `b` in the final result. The locking procedure never adds an
/// edge that closes a cycle, so this graph stays acyclic.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct LockedGraph {
    edges: Vec<Vec<bool>>,
}

impl LockedGraph {
    pub fn new(num_candidates: usize) -> LockedGraph {
        LockedGraph {
            edges: vec![vec![false; num_candidates]; num_candidates],
        }
    }

    pub fn num_candidates(&self) -> usize {
        self.edges.len()
    }

    pub fn is_locked(&self, from: usize, to: usize) -> bool {
        self.edges[from][to]
    }

    pub(crate) fn lock(&mut self, from: usize, to: usize) {
        self.edges[from][to] = true;
    }

    /// All the locked edges, ordered by source then destination.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut res: Vec<(usize, usize)> = Vec::new();
        for (from, row) in self.edges.iter().enumerate() {
            for (to, &locked) in row.iter().enumerate() {
                if locked {
                    res.push((from, to));
                }
            }
        }
        res
    }

    /// Depth-first search for a path of locked edges from `start` to `target`.
    ///
    /// A node is trivially reachable from itself.
    pub fn has_path(&self, start: usize, target: usize) -> bool {
        let mut visited: Vec<bool> = vec![false; self.edges.len()];
        let mut stack: Vec<usize> = vec![start];
        while let Some(node) = stack.pop() {
            if node == target {
                return true;
            }
            if visited[node] {
                continue;
            }
            visited[node] = true;
            for (next, &locked) in self.edges[node].iter().enumerate() {
                if locked && !visited[next] {
                    stack.push(next);
                }
            }
        }
        false
    }

    /// The candidates with no incoming locked edge, in index order.
    pub fn sources(&self) -> Vec<usize> {
        let n = self.edges.len();
        (0..n)
            .filter(|&cid| (0..n).all(|other| !self.edges[other][cid]))
            .collect()
    }

    /// Full check of the graph: true if no locked edge lies on a cycle.
    pub fn is_acyclic(&self) -> bool {
        self.edges()
            .iter()
            .all(|&(from, to)| !self.has_path(to, from))
    }
}
