use std::collections::HashSet;

use indirect::{
    edge::Edge,
    graph::{Graph, Network},
    Params, Scorer, Transform,
};
use proptest::prelude::*;

/// Simple graphs on up to 8 vertices with at least one positively weighted edge.
fn arb_graph() -> impl Strategy<Value = Graph<u8>> {
    (2u8..8, any::<bool>()).prop_flat_map(|(n, directed)| {
        let edge = (0..n, 0..n, 0.1f64..2.0);

        (
            Just(n),
            Just(directed),
            edge.clone(),
            prop::collection::vec(edge, 0..20),
        )
            .prop_map(|(n, directed, first, rest)| {
                let mut graph = if directed {
                    Graph::directed()
                } else {
                    Graph::undirected()
                };

                for vertex in 0..n {
                    graph.add_vertex(vertex);
                }

                for (source, target, weight) in std::iter::once(first).chain(rest) {
                    graph.insert_weighted(Edge::new(source, target), weight);
                }

                graph
            })
    })
}

fn arb_transform() -> impl Strategy<Value = Transform> {
    prop_oneof![Just(Transform::HeatKernel), Just(Transform::Pwp)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn scores_are_distributions(
        graph in arb_graph(),
        transform in arb_transform(),
        k in 0.1f64..3.0,
    ) {
        let scores = Scorer::new().score(&graph, &Params { k, transform }).unwrap();
        let vertices: HashSet<u8> = graph.vertices().into_iter().collect();

        for mapping in [&scores.influences, &scores.dependences] {
            let keys: HashSet<u8> = mapping.keys().copied().collect();
            prop_assert_eq!(&keys, &vertices);

            prop_assert!(mapping.values().all(|score| *score >= 0.0));

            let total: f64 = mapping.values().sum();
            prop_assert!((total - 1.0).abs() < 1e-9, "total = {}", total);
        }
    }

    #[test]
    fn scores_are_deterministic(
        graph in arb_graph(),
        transform in arb_transform(),
        k in 0.1f64..3.0,
    ) {
        let scorer = Scorer::new();
        let params = Params { k, transform };

        prop_assert_eq!(
            scorer.score(&graph, &params).unwrap(),
            scorer.score(&graph, &params).unwrap()
        );
    }

    #[test]
    fn vertex_order_is_irrelevant(graph in arb_graph(), k in 0.1f64..3.0) {
        // Relabelling the vertices in reverse reverses the index order but not the scores.
        let mut relabelled = if graph.is_directed() {
            Graph::directed()
        } else {
            Graph::undirected()
        };

        for vertex in graph.vertices() {
            relabelled.add_vertex(u8::MAX - vertex);
        }

        for (source, target, weight) in graph.weighted_edges() {
            relabelled.insert_weighted(Edge::new(u8::MAX - source, u8::MAX - target), weight);
        }

        let scores = indirect::heat_kernel(&graph, k).unwrap();
        let relabelled = indirect::heat_kernel(&relabelled, k).unwrap();

        for (vertex, score) in &scores.influences {
            prop_assert!((relabelled.influences[&(u8::MAX - vertex)] - score).abs() < 1e-9);
        }

        for (vertex, score) in &scores.dependences {
            prop_assert!((relabelled.dependences[&(u8::MAX - vertex)] - score).abs() < 1e-9);
        }
    }
}
