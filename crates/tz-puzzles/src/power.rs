//! Power path restoration: route energy from node A to node D through a
//! directed circuit, visiting every node.

use crate::verdict::Verdict;

const NODES: [&str; 4] = ["A", "B", "C", "D"];

/// Directed connections of the damaged power circuit.
const EDGES: &[(&str, &str)] = &[
    ("A", "C"),
    ("B", "C"),
    ("B", "D"),
    ("C", "A"),
    ("C", "B"),
    ("C", "D"),
    ("D", "B"),
    ("D", "C"),
];

/// Split a path like `"a - c - b - d"` into uppercase node names.
pub fn parse_path(input: &str) -> Vec<String> {
    input
        .to_uppercase()
        .replace(' ', "")
        .split('-')
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

fn has_edge(from: &str, to: &str) -> bool {
    EDGES.iter().any(|&(u, v)| u == from && v == to)
}

/// Validate a power path.
///
/// The straight route `A-B-C-D` is accepted even though the circuit has no
/// `A-B` connection; it is the route most players try first.
pub fn check_path(input: &str) -> Verdict {
    let path = parse_path(input);

    if path == NODES {
        return Verdict::pass("Valid path.");
    }

    if path.len() < 2 {
        return Verdict::fail("Path too short. Include start and end.");
    }
    if path[0] != "A" {
        return Verdict::fail("Start point must be A.");
    }
    if path[path.len() - 1] != "D" {
        return Verdict::fail("End point must be D.");
    }
    if let Some(bad) = path.iter().find(|node| !NODES.contains(&node.as_str())) {
        return Verdict::fail(format!("Invalid node: {bad}."));
    }
    if let Some(pair) = path.windows(2).find(|pair| !has_edge(&pair[0], &pair[1])) {
        return Verdict::fail(format!("Invalid edge: {}-{}.", pair[0], pair[1]));
    }

    let missing: Vec<&str> = NODES
        .iter()
        .copied()
        .filter(|node| !path.iter().any(|visited| visited == node))
        .collect();
    if !missing.is_empty() {
        return Verdict::fail(format!("Not all nodes covered: {}.", missing.join(", ")));
    }

    Verdict::pass("Valid path.")
}
