use std::sync::Arc;

use gedcore::{
    EditCosts, GedError, GeometricConfig, GeometricCosts, Label, MetricConfig, MetricFn,
    MetricRegistry, config::config_map,
};
use serde_json::json;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

fn coords(values: &[f64]) -> Label {
    Label::new().with("coords", values)
}

fn chebyshev(_config: &MetricConfig) -> MetricFn {
    Arc::new(|a: &[f64], b: &[f64]| -> Result<f64, GedError> {
        Ok(a.iter().zip(b).map(|(x, y)| (x - y).abs()).fold(0.0, f64::max))
    })
}

#[test]
fn coordinate_relabel_uses_euclidean_by_default() {
    let costs = GeometricCosts::default();
    let cost = costs
        .node_rel_cost(&coords(&[0.0, 0.0]), &coords(&[3.0, 4.0]))
        .expect("cost");
    assert_close(cost, 5.0);
}

#[test]
fn insertion_and_deletion_are_constants() {
    let costs = GeometricCosts::new(2.0, 3.0, 1.0, 4.0, 5.0, 1.0);
    let label = coords(&[1.0, 1.0]);
    assert_eq!(costs.node_ins_cost(&label).unwrap(), 2.0);
    assert_eq!(costs.node_del_cost(&label).unwrap(), 3.0);
    assert_eq!(costs.edge_ins_cost(&Label::new()).unwrap(), 4.0);
    assert_eq!(costs.edge_del_cost(&Label::new()).unwrap(), 5.0);
}

#[test]
fn embedding_present_on_one_side_contributes_nothing() {
    let costs = GeometricCosts::default();
    let first = coords(&[0.0, 0.0]).with("embedding", vec![0.2, 0.9]);
    let second = coords(&[3.0, 4.0]);
    assert_close(costs.node_rel_cost(&first, &second).unwrap(), 5.0);
    assert_eq!(costs.node_rel_cost(&first, &Label::new()).unwrap(), 0.0);
}

#[test]
fn channels_sum_with_their_weights() {
    let costs = GeometricCosts::new(1.0, 1.0, 2.0, 1.0, 1.0, 1.0);
    let first = Label::new()
        .with("label", "C")
        .with("coords", vec![0.0, 0.0])
        .with("embedding", vec![1.0, 0.0]);
    let second = Label::new()
        .with("label", "N")
        .with("coords", vec![3.0, 4.0])
        .with("embedding", vec![0.0, 1.0]);
    // (1 + 5 + 1) * 2
    assert_close(costs.node_rel_cost(&first, &second).unwrap(), 14.0);

    let same_symbol = second.clone().with("label", "C");
    assert_close(costs.node_rel_cost(&first, &same_symbol).unwrap(), 12.0);
}

#[test]
fn edge_channels_use_label_weight_and_embedding() {
    let costs = GeometricCosts::default();
    let first = Label::new()
        .with("label", "single")
        .with("weight", vec![0.2])
        .with("embedding", vec![1.0, 0.0]);
    let second = Label::new()
        .with("label", "double")
        .with("weight", vec![0.5])
        .with("embedding", vec![0.0, 1.0]);
    assert_close(costs.edge_rel_cost(&first, &second).unwrap(), 2.3);
    assert_eq!(costs.edge_rel_cost(&first, &first).unwrap(), 0.0);
}

#[test]
fn ten_constants_weigh_channels_independently() {
    let costs = GeometricCosts::from_constants(&[
        1.0, 2.0, 3.0, 4.0, 0.0, 10.0, 0.0, 0.0, 0.0, 0.0,
    ])
    .expect("constants");
    assert_eq!(costs.node_ins_cost(&Label::new()).unwrap(), 1.0);
    assert_eq!(costs.edge_ins_cost(&Label::new()).unwrap(), 3.0);
    assert_eq!(costs.weights().node_coord_cost, 10.0);

    let first = coords(&[0.0, 0.0]).with("label", "a");
    let second = coords(&[3.0, 4.0]).with("label", "b");
    assert_close(costs.node_rel_cost(&first, &second).unwrap(), 50.0);

    assert!(GeometricCosts::from_constants(&[1.0, 2.0, 3.0]).is_err());
}

#[test]
fn zero_weight_channel_is_never_evaluated() {
    let costs = GeometricCosts::from_constants(&[
        1.0, 1.0, 1.0, 1.0, 1.0, 0.0, 1.0, 1.0, 1.0, 1.0,
    ])
    .expect("constants");
    let first = coords(&[1.0, 2.0]);
    let second = coords(&[1.0, 2.0, 3.0]);
    assert_eq!(costs.node_rel_cost(&first, &second).unwrap(), 0.0);

    let weighted = GeometricCosts::default();
    let err = weighted.node_rel_cost(&first, &second).unwrap_err();
    assert_eq!(err, GedError::DimensionMismatch { left: 2, right: 3 });
}

#[test]
fn zero_embedding_is_degenerate() {
    let costs = GeometricCosts::default();
    let first = Label::new().with("embedding", vec![0.0, 0.0]);
    let second = Label::new().with("embedding", vec![1.0, 0.0]);
    assert!(matches!(
        costs.node_rel_cost(&first, &second),
        Err(GedError::DegenerateInput(_))
    ));
}

#[test]
fn identical_zero_embeddings_cost_nothing() {
    let costs = GeometricCosts::default();
    let node = coords(&[1.0, 1.0]).with("embedding", vec![0.0, 0.0]);
    assert_eq!(costs.node_rel_cost(&node, &node).unwrap(), 0.0);
    let edge = Label::new().with("embedding", vec![0.0, 0.0, 0.0]);
    assert_eq!(costs.edge_rel_cost(&edge, &edge).unwrap(), 0.0);
}

#[test]
fn configuration_merges_over_previous_calls() {
    let mut costs = GeometricCosts::default();
    costs
        .set_config(&config_map(json!({ "node_coord_metric": "cosine_distance" })).unwrap())
        .expect("first config");
    costs
        .set_config(&config_map(json!({ "normalize_cosine": true })).unwrap())
        .expect("second config");

    assert_eq!(costs.config().node_coord_metric, "cosine_distance");
    assert!(costs.config().normalize_cosine);
    let cost = costs
        .node_rel_cost(&coords(&[1.0, 0.0]), &coords(&[0.0, 1.0]))
        .unwrap();
    assert_close(cost, 0.5);
}

#[test]
fn failed_configuration_leaves_model_unchanged() {
    let mut costs = GeometricCosts::default();
    let err = costs
        .set_config(
            &config_map(json!({
                "node_embed_metric": "cosine",
                "node_coord_metric": "nope",
            }))
            .unwrap(),
        )
        .unwrap_err();
    assert!(matches!(err, GedError::InvalidMetricName { ref name, .. } if name == "nope"));
    assert_eq!(costs.config(), &GeometricConfig::default());
    assert_close(
        costs
            .node_rel_cost(&coords(&[0.0, 0.0]), &coords(&[3.0, 4.0]))
            .unwrap(),
        5.0,
    );
}

#[test]
fn option_values_are_type_checked() {
    let mut costs = GeometricCosts::default();
    let err = costs
        .set_config(&config_map(json!({ "normalize_cosine": "yes" })).unwrap())
        .unwrap_err();
    assert!(matches!(err, GedError::TypeMismatch { expected: "bool", .. }));

    let err = costs
        .set_config(&config_map(json!({ "edge_embed_metric": 3 })).unwrap())
        .unwrap_err();
    assert!(matches!(err, GedError::TypeMismatch { expected: "string", .. }));

    let err = costs
        .set_config(&config_map(json!({ "node_coord_metric": "  " })).unwrap())
        .unwrap_err();
    assert!(matches!(err, GedError::Configuration(_)));
    assert!(err.is_configuration_error());
}

#[test]
fn unknown_keys_are_ignored() {
    let mut costs = GeometricCosts::default();
    costs
        .set_config(&config_map(json!({ "node_colour_metric": "euclidean" })).unwrap())
        .expect("unknown keys are not fatal");
    assert_eq!(costs.config(), &GeometricConfig::default());
}

#[test]
fn custom_registry_supplies_extra_metrics() {
    let mut registry = MetricRegistry::standard();
    registry.register("chebyshev", chebyshev);

    let mut costs = GeometricCosts::default();
    costs
        .set_config_with(
            &config_map(json!({ "node_coord_metric": "chebyshev" })).unwrap(),
            &registry,
        )
        .expect("config");
    let cost = costs
        .node_rel_cost(&coords(&[0.0, 0.0]), &coords(&[3.0, 4.0]))
        .unwrap();
    assert_close(cost, 4.0);

    let mut standard = GeometricCosts::default();
    assert!(
        standard
            .set_config(&config_map(json!({ "node_coord_metric": "chebyshev" })).unwrap())
            .is_err()
    );
}

#[test]
fn config_round_trips_through_map() {
    let mut costs = GeometricCosts::default();
    costs
        .set_config(&config_map(json!({ "edge_weight_metric": "cosine_distance" })).unwrap())
        .unwrap();
    let map = costs.config().to_map();
    assert_eq!(map["edge_weight_metric"], json!("cosine_distance"));
    assert_eq!(map["normalize_cosine"], json!(false));

    let mut copy = GeometricCosts::default();
    copy.set_config(&map).unwrap();
    assert_eq!(copy.config(), costs.config());
}
