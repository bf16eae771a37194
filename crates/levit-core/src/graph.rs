use std::collections::{BTreeMap, BTreeSet};

/// Directed dependency graph over feature ids.
///
/// Edges come from each feature's normalized `depends_on` list, restricted to
/// ids that are themselves known features — references to decisions or
/// external artifacts are existence-checked elsewhere and do not enter the
/// feature graph. Pure data, no I/O.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    edges: BTreeMap<String, Vec<String>>,
}

impl DependencyGraph {
    /// Build the graph from `(feature id, declared depends_on)` pairs,
    /// keeping only edges whose target is a known feature id.
    pub fn build<'a, I>(dependencies: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a [String])> + Clone,
    {
        let known: BTreeSet<&str> = dependencies.clone().into_iter().map(|(id, _)| id).collect();
        let mut edges = BTreeMap::new();
        for (id, deps) in dependencies {
            let kept: Vec<String> = deps
                .iter()
                .filter(|d| known.contains(d.as_str()))
                .cloned()
                .collect();
            edges.insert(id.to_string(), kept);
        }
        Self { edges }
    }

    pub fn node_count(&self) -> usize {
        self.edges.len()
    }

    /// Find all cycles via depth-first search with an explicit recursion
    /// stack. Each cycle is the path subsequence from the first occurrence of
    /// the revisited node through the current node, with the revisited node
    /// appended again to make the closure explicit (`A -> B -> C -> A`).
    /// A self-dependency is a length-1 cycle and is detected the same way.
    pub fn detect_cycles(&self) -> Vec<Vec<String>> {
        let mut visited = BTreeSet::new();
        let mut cycles = Vec::new();

        for node in self.edges.keys() {
            if !visited.contains(node.as_str()) {
                let mut stack = BTreeSet::new();
                let mut path = Vec::new();
                self.dfs(node, &mut visited, &mut stack, &mut path, &mut cycles);
            }
        }

        cycles
    }

    fn dfs(
        &self,
        node: &str,
        visited: &mut BTreeSet<String>,
        stack: &mut BTreeSet<String>,
        path: &mut Vec<String>,
        cycles: &mut Vec<Vec<String>>,
    ) {
        visited.insert(node.to_string());
        stack.insert(node.to_string());
        path.push(node.to_string());

        if let Some(deps) = self.edges.get(node) {
            for dep in deps {
                if stack.contains(dep) {
                    let start = path.iter().position(|n| n == dep).unwrap_or(0);
                    let mut cycle: Vec<String> = path[start..].to_vec();
                    cycle.push(dep.clone());
                    cycles.push(cycle);
                } else if !visited.contains(dep) {
                    self.dfs(dep, visited, stack, path, cycles);
                }
            }
        }

        stack.remove(node);
        path.pop();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
