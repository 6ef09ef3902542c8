//! Planar diagrams of knots and links, stored as PD codes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A link diagram given by its planar-diagram code.
///
/// Each crossing `[a, b, c, d]` lists the four arc labels counter-clockwise
/// starting from the incoming under-strand, so `a → c` is the under-strand
/// and `b`/`d` lie on the over-strand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkDiagram {
    pub name: String,
    pub pd: Vec<[u32; 4]>,
    /// Number of components as recorded in the link table.
    pub components: usize,
    /// Census name of the link exterior, when it is in the census.
    pub exterior: Option<String>,
}

impl LinkDiagram {
    pub fn crossing_number(&self) -> usize {
        self.pd.len()
    }

    /// How many times each arc label occurs in the code.
    pub fn label_usage(&self) -> BTreeMap<u32, usize> {
        let mut usage = BTreeMap::new();
        for crossing in &self.pd {
            for label in crossing {
                *usage.entry(*label).or_insert(0) += 1;
            }
        }
        usage
    }

    /// Count components by joining the arcs that meet at each crossing.
    pub fn count_components(&self) -> usize {
        let labels: Vec<u32> = self.label_usage().keys().copied().collect();
        let mut parent: Vec<usize> = (0..labels.len()).collect();
        let index = |label: u32| labels.binary_search(&label).unwrap_or(0);

        fn find(parent: &mut [usize], mut i: usize) -> usize {
            while parent[i] != i {
                parent[i] = parent[parent[i]];
                i = parent[i];
            }
            i
        }

        for &[a, b, c, d] in &self.pd {
            for (x, y) in [(a, c), (b, d)] {
                let rx = find(&mut parent, index(x));
                let ry = find(&mut parent, index(y));
                if rx != ry {
                    parent[rx] = ry;
                }
            }
        }

        (0..labels.len())
            .filter(|&i| find(&mut parent, i) == i)
            .count()
    }

    /// Structural problems with the diagram; empty when it is consistent.
    pub fn structural_problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.pd.is_empty() {
            problems.push(format!("{}: empty PD code", self.name));
            return problems;
        }
        for (label, count) in self.label_usage() {
            if count != 2 {
                problems.push(format!(
                    "{}: arc {} used {} times (expected 2)",
                    self.name, label, count
                ));
            }
        }
        let found = self.count_components();
        if found != self.components {
            problems.push(format!(
                "{}: {} components traced, {} recorded",
                self.name, found, self.components
            ));
        }
        problems
    }
}
