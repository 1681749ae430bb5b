use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::{
    graph::GedGraph,
    label::{COORDS_KEY, EMBEDDING_KEY, LABEL_KEY, Label, WEIGHT_KEY},
};

const NODE_SYMBOLS: [&str; 3] = ["C", "N", "O"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelShape {
    /// Nodes carry `coords` only; edges are unlabelled.
    CoordsOnly,
    /// Nodes carry `label`, `coords` and `embedding`; edges carry `label` and `weight`.
    Mixed,
    /// Like `Mixed`, but every attribute is dropped with probability 1/2.
    Sparse,
}

/// Random graph with `node_count` nodes and up to `edge_count` distinct edges.
pub fn generate_attr_graph(
    name: &str,
    shape: LabelShape,
    node_count: usize,
    edge_count: usize,
    seed: u64,
) -> GedGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = GedGraph::new(name, format!("{shape:?}"));
    for _ in 0..node_count {
        let label = node_label(&mut rng, shape);
        graph.add_node(label);
    }
    let mut pairs = Vec::with_capacity(pair_count(node_count));
    for u in 0..node_count {
        for v in (u + 1)..node_count {
            pairs.push((u, v));
        }
    }
    pairs.shuffle(&mut rng);
    for &(u, v) in pairs.iter().take(edge_count) {
        let label = edge_label(&mut rng, shape);
        // pairs are distinct and in range, so insertion cannot fail
        let _ = graph.add_edge(u, v, label);
    }
    graph
}

/// `count` graphs whose sizes vary around `node_count`.
pub fn generate_dataset(
    count: usize,
    shape: LabelShape,
    node_count: usize,
    density: f64,
    seed: u64,
) -> Vec<GedGraph> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|idx| {
            let nodes = rng.gen_range(node_count.max(2) / 2..=node_count.max(2));
            let edges = (pair_count(nodes) as f64 * density).round() as usize;
            generate_attr_graph(&format!("g{idx}"), shape, nodes, edges, seed ^ idx as u64)
        })
        .collect()
}

fn node_label(rng: &mut StdRng, shape: LabelShape) -> Label {
    let coords = vec![rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)];
    let mut label = Label::new().with(COORDS_KEY, coords);
    if shape == LabelShape::CoordsOnly {
        return label;
    }
    let symbol = NODE_SYMBOLS[rng.gen_range(0..NODE_SYMBOLS.len())];
    label.insert(LABEL_KEY, symbol);
    label.insert(
        EMBEDDING_KEY,
        vec![
            rng.gen_range(0.1..1.0),
            rng.gen_range(0.1..1.0),
            rng.gen_range(0.1..1.0),
        ],
    );
    if shape == LabelShape::Sparse {
        thin_out(rng, &mut label, &[LABEL_KEY, COORDS_KEY, EMBEDDING_KEY]);
    }
    label
}

fn edge_label(rng: &mut StdRng, shape: LabelShape) -> Label {
    if shape == LabelShape::CoordsOnly {
        return Label::new();
    }
    let mut label = Label::new()
        .with(WEIGHT_KEY, vec![rng.gen_range(0.0..1.0)])
        .with(LABEL_KEY, format!("bond{}", rng.gen_range(0..3)));
    if shape == LabelShape::Sparse {
        thin_out(rng, &mut label, &[LABEL_KEY, WEIGHT_KEY]);
    }
    label
}

fn thin_out(rng: &mut StdRng, label: &mut Label, keys: &[&str]) {
    for key in keys {
        if rng.gen_bool(0.5) {
            label.remove(key);
        }
    }
}

fn pair_count(nodes: usize) -> usize {
    nodes * nodes.saturating_sub(1) / 2
}
