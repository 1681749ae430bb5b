use std::str::FromStr;

use gedcore::{
    ChemCosts, ConfigMap, ConstantCosts, EditCosts, EditCostsKind, GedError, GrecCosts, Label,
    LetterCosts, NonSymbolicCosts, build_edit_costs, config::config_map,
};
use serde_json::json;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

fn letter_node(x: &str, y: &str) -> Label {
    Label::new().with("x", x).with("y", y)
}

fn grec_node(x: f64, y: f64, kind: &str) -> Label {
    Label::new()
        .with("x", x.to_string())
        .with("y", y.to_string())
        .with("type", kind)
}

fn frequency(value: f64) -> Label {
    Label::new().with("frequency", vec![value])
}

/// Node label carrying every attribute any built-in model reads.
fn rich_node() -> Label {
    Label::new()
        .with("label", "C")
        .with("coords", vec![0.4, 1.2])
        .with("embedding", vec![0.3, 0.1, 0.7])
        .with("x", "0.4")
        .with("y", "1.2")
        .with("type", "corner")
        .with("chem", "C")
}

fn rich_edge() -> Label {
    Label::new()
        .with("label", "single")
        .with("weight", vec![0.8])
        .with("embedding", vec![0.5, 0.5])
        .with("frequency", vec![2.0])
        .with("valence", "1")
}

#[test]
fn constant_costs_charge_only_for_differences() {
    let costs = ConstantCosts::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
    let c = Label::new().with("label", "C");
    let n = Label::new().with("label", "N");
    assert_eq!(costs.node_ins_cost(&c).unwrap(), 1.0);
    assert_eq!(costs.node_del_cost(&c).unwrap(), 2.0);
    assert_eq!(costs.node_rel_cost(&c, &c).unwrap(), 0.0);
    assert_eq!(costs.node_rel_cost(&c, &n).unwrap(), 3.0);
    assert_eq!(costs.edge_ins_cost(&c).unwrap(), 4.0);
    assert_eq!(costs.edge_del_cost(&c).unwrap(), 5.0);
    assert_eq!(costs.edge_rel_cost(&c, &n).unwrap(), 6.0);
}

#[test]
fn letter_costs_weigh_nodes_by_alpha() {
    let costs = LetterCosts::default();
    let origin = letter_node("0", "0");
    let far = letter_node("3", "4");
    assert_close(costs.node_rel_cost(&origin, &far).unwrap(), 3.75);
    assert_close(costs.node_ins_cost(&origin).unwrap(), 0.675);
    assert_close(costs.edge_del_cost(&Label::new()).unwrap(), 0.425);
    assert_eq!(costs.edge_rel_cost(&Label::new(), &Label::new()).unwrap(), 0.0);
}

#[test]
fn letter_costs_require_coordinates() {
    let costs = LetterCosts::default();
    let err = costs
        .node_rel_cost(&Label::new().with("x", "1"), &letter_node("0", "0"))
        .unwrap_err();
    assert_eq!(err, GedError::MissingAttribute("y".into()));

    let err = costs
        .node_rel_cost(&letter_node("a", "0"), &letter_node("0", "0"))
        .unwrap_err();
    assert!(matches!(err, GedError::TypeMismatch { expected: "number", .. }));
}

#[test]
fn grec_costs_add_type_penalty() {
    let costs = GrecCosts::default();
    let a = grec_node(0.0, 0.0, "corner");
    let b = grec_node(3.0, 4.0, "corner");
    let c = grec_node(3.0, 4.0, "circle");
    assert_close(costs.node_rel_cost(&a, &b).unwrap(), 2.5);
    assert_close(costs.node_rel_cost(&a, &c).unwrap(), 92.5);
    assert_close(costs.node_del_cost(&a).unwrap(), 45.0);
}

#[test]
fn grec_edges_scale_with_frequency() {
    let costs = GrecCosts::default();
    assert_close(costs.edge_ins_cost(&frequency(2.0)).unwrap(), 15.0);
    assert_close(costs.edge_rel_cost(&frequency(1.0), &frequency(3.0)).unwrap(), 15.0);
    assert_eq!(
        costs.edge_del_cost(&Label::new()).unwrap_err(),
        GedError::MissingAttribute("frequency".into())
    );
}

#[test]
fn chem_costs_compare_symbols() {
    let costs = ChemCosts::default();
    let carbon = Label::new().with("chem", "C");
    let oxygen = Label::new().with("chem", "O");
    assert_eq!(costs.node_rel_cost(&carbon, &carbon).unwrap(), 0.0);
    assert_close(costs.node_rel_cost(&carbon, &oxygen).unwrap(), 1.0);
    assert_close(costs.node_ins_cost(&carbon).unwrap(), 2.0);

    let single = Label::new().with("valence", "1");
    let double = Label::new().with("valence", "2");
    assert_close(costs.edge_rel_cost(&single, &double).unwrap(), 0.5);
    assert!(matches!(
        costs.node_rel_cost(&carbon, &Label::new()),
        Err(GedError::MissingAttribute(_))
    ));
}

#[test]
fn non_symbolic_costs_measure_shared_numeric_attributes() {
    let costs = NonSymbolicCosts::new(1.0, 1.0, 2.0, 1.0, 1.0, 1.0);
    let first = letter_node("0", "0")
        .with("label", "C")
        .with("embedding", vec![0.4, 0.4]);
    let second = letter_node("3", "4").with("label", "N");
    // label is not numeric, embedding is one-sided
    assert_close(costs.node_rel_cost(&first, &second).unwrap(), 10.0);
    assert_eq!(costs.node_rel_cost(&first, &first).unwrap(), 0.0);
    assert_eq!(costs.node_ins_cost(&first).unwrap(), 1.0);

    let light = Label::new().with("weight", vec![0.2]);
    let heavy = Label::new().with("weight", vec![0.5]);
    assert_close(costs.edge_rel_cost(&light, &heavy).unwrap(), 0.3);
    assert_eq!(costs.edge_rel_cost(&light, &Label::new()).unwrap(), 0.0);
}

#[test]
fn non_symbolic_costs_reject_unequal_vectors() {
    let costs = NonSymbolicCosts::default();
    let first = Label::new().with("coords", vec![1.0, 2.0]);
    let second = Label::new().with("coords", vec![1.0]);
    assert_eq!(
        costs.node_rel_cost(&first, &second).unwrap_err(),
        GedError::DimensionMismatch { left: 2, right: 1 }
    );
}

#[test]
fn non_symbolic_costs_take_six_constants() {
    let constants = [1.0, 1.0, 1.0, 1.0, 1.0, 1.0];
    let costs = build_edit_costs(EditCostsKind::NonSymbolic, &constants, &ConfigMap::new())
        .expect("six constants");
    assert_eq!(costs.kind(), EditCostsKind::NonSymbolic);
    let err = build_edit_costs(EditCostsKind::NonSymbolic, &constants[..5], &ConfigMap::new())
        .unwrap_err();
    assert!(err.to_string().contains("NON_SYMBOLIC"));
}

#[test]
fn relabelling_a_label_onto_itself_is_free() {
    let nodes = [rich_node(), rich_node().with("embedding", vec![0.0, 0.0, 0.0])];
    let edges = [rich_edge(), rich_edge().with("embedding", vec![0.0, 0.0])];
    for kind in EditCostsKind::ALL {
        let costs = build_edit_costs(kind, &[], &ConfigMap::new()).expect("build");
        for node in &nodes {
            assert_eq!(costs.node_rel_cost(node, node).unwrap(), 0.0, "{kind} node");
        }
        for edge in &edges {
            assert_eq!(costs.edge_rel_cost(edge, edge).unwrap(), 0.0, "{kind} edge");
        }
    }
}

#[test]
fn factory_checks_constant_arity() {
    let grec_constants = [1.0, 1.0, 2.0, 2.0, 10.0];
    let costs = build_edit_costs(EditCostsKind::Grec, &grec_constants, &ConfigMap::new())
        .expect("five constants");
    assert_eq!(costs.kind(), EditCostsKind::Grec);
    assert_close(costs.node_ins_cost(&Label::new()).unwrap(), 0.5);

    let costs = build_edit_costs(
        EditCostsKind::Chem,
        &[1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.25],
        &ConfigMap::new(),
    )
    .expect("seven constants");
    assert_close(costs.edge_ins_cost(&Label::new()).unwrap(), 0.75);

    let err = build_edit_costs(EditCostsKind::Letter, &[1.0, 2.0, 3.0], &ConfigMap::new())
        .unwrap_err();
    assert!(err.is_configuration_error());
    assert!(err.to_string().contains("LETTER"));

    assert!(build_edit_costs(EditCostsKind::Constant, &[1.0], &ConfigMap::new()).is_err());
}

#[test]
fn factory_applies_configuration() {
    let config = config_map(json!({
        "node_coord_metric": "cosine_distance",
        "normalize_cosine": true,
    }))
    .unwrap();
    let costs = build_edit_costs(EditCostsKind::Geometric, &[], &config).expect("build");
    let a = Label::new().with("coords", vec![1.0, 0.0]);
    let b = Label::new().with("coords", vec![0.0, 1.0]);
    assert_close(costs.node_rel_cost(&a, &b).unwrap(), 0.5);

    let bad = config_map(json!({ "node_coord_metric": "nope" })).unwrap();
    assert!(matches!(
        build_edit_costs(EditCostsKind::Geometric, &[], &bad),
        Err(GedError::InvalidMetricName { .. })
    ));

    // models without options accept and ignore a config
    assert!(build_edit_costs(EditCostsKind::Constant, &[], &bad).is_ok());
}

#[test]
fn kind_parses_case_insensitively() {
    assert_eq!(EditCostsKind::from_str("geometric").unwrap(), EditCostsKind::Geometric);
    assert_eq!(" CHEM ".parse::<EditCostsKind>().unwrap(), EditCostsKind::Chem);
    assert_eq!(
        "non-symbolic".parse::<EditCostsKind>().unwrap(),
        EditCostsKind::NonSymbolic
    );
    assert_eq!(EditCostsKind::Letter.to_string(), "LETTER");
    assert!(matches!(
        EditCostsKind::from_str("nope"),
        Err(GedError::Configuration(_))
    ));
    for kind in EditCostsKind::ALL {
        assert_eq!(kind.as_str().parse::<EditCostsKind>().unwrap(), kind);
    }
}

#[test]
fn config_map_requires_an_object() {
    assert!(matches!(
        config_map(json!(["node_coord_metric"])),
        Err(GedError::TypeMismatch { expected: "object", .. })
    ));
}
