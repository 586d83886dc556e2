// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Fragment merging: words and pieces of the same line become one box.

use penline_core::{BoundingBox, MergeStrategy};
use tracing::{info, instrument};

/// Group line fragments into finished lines, in emission order.
///
/// Two boxes belong to the same line when their vertical centers differ by
/// strictly less than `tolerance`. How that rule is applied depends on
/// `strategy`; see [`merge_greedy`] and [`merge_clustered`].
#[instrument(skip(fragments), fields(count = fragments.len()))]
pub fn merge_fragments(
    fragments: &[BoundingBox],
    tolerance: f64,
    strategy: MergeStrategy,
) -> Vec<BoundingBox> {
    let lines = match strategy {
        MergeStrategy::Greedy => merge_greedy(fragments, tolerance),
        MergeStrategy::GlobalClustering => merge_clustered(fragments, tolerance),
    };
    info!(lines = lines.len(), "Fragments merged into lines");
    lines
}

/// Single pass over the fragments sorted by top edge (stable), keeping one
/// running accumulator.
///
/// Each fragment is compared only against the accumulator, whose center moves
/// as it absorbs fragments, so two fragments that match pairwise can still
/// land in different lines.
pub fn merge_greedy(fragments: &[BoundingBox], tolerance: f64) -> Vec<BoundingBox> {
    let sorted = sorted_by_top(fragments);
    let Some((&first, rest)) = sorted.split_first() else {
        return Vec::new();
    };

    let mut lines = Vec::new();
    let mut current = first;
    for next in rest {
        if (current.center_y() - next.center_y()).abs() < tolerance {
            current = current.union(next);
        } else {
            lines.push(current);
            current = *next;
        }
    }
    lines.push(current);
    lines
}

/// Transitive clustering: any chain of fragment pairs within `tolerance`
/// forms one line. Lines are ordered by top edge, then by the detection order
/// of their first fragment.
pub fn merge_clustered(fragments: &[BoundingBox], tolerance: f64) -> Vec<BoundingBox> {
    let sorted = sorted_by_top(fragments);
    let mut sets = DisjointSet::new(sorted.len());
    for i in 0..sorted.len() {
        for j in (i + 1)..sorted.len() {
            if (sorted[i].center_y() - sorted[j].center_y()).abs() < tolerance {
                sets.join(i, j);
            }
        }
    }

    // (first member index, union box) per root, in order of first member.
    let mut clusters: Vec<(usize, BoundingBox)> = Vec::new();
    let mut slot_of_root = vec![usize::MAX; sorted.len()];
    for (i, fragment) in sorted.iter().enumerate() {
        let root = sets.find(i);
        match slot_of_root[root] {
            usize::MAX => {
                slot_of_root[root] = clusters.len();
                clusters.push((i, *fragment));
            }
            slot => clusters[slot].1 = clusters[slot].1.union(fragment),
        }
    }

    clusters.sort_by_key(|&(first, bounds)| (bounds.y, first));
    clusters.into_iter().map(|(_, bounds)| bounds).collect()
}

fn sorted_by_top(fragments: &[BoundingBox]) -> Vec<BoundingBox> {
    let mut sorted = fragments.to_vec();
    sorted.sort_by_key(|b| b.y);
    sorted
}

/// Union-find with path halving.
struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
        }
    }

    fn find(&mut self, mut i: usize) -> usize {
        while self.parent[i] != i {
            self.parent[i] = self.parent[self.parent[i]];
            i = self.parent[i];
        }
        i
    }

    fn join(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            // Keep the lower index as root.
            let (low, high) = if ra < rb { (ra, rb) } else { (rb, ra) };
            self.parent[high] = low;
        }
    }
}
