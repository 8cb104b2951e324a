//! Unit tests for tp-route.

#[cfg(test)]
mod helpers {
    use tp_core::Point;
    use tp_network::{AdjacencyIndex, CostModel, EdgeAttrs, RoadGraph, RoadGraphBuilder};

    pub fn attrs(length: f64, efficiency: f64, traffic_weight: f64) -> EdgeAttrs {
        EdgeAttrs::new(length, efficiency, 1.0, traffic_weight)
    }

    /// ```text
    /// A ──(50, eff 20)── B ──(150, eff 10, traffic 1.5)── C
    /// ```
    ///
    /// A→C costs 2.5 + (15 + 180) = 197.5.
    pub fn three_towns() -> (RoadGraph, AdjacencyIndex) {
        let mut b = RoadGraphBuilder::new();
        for key in ["A", "B", "C"] {
            b.add_node(key, Point::new(0.0, 0.0));
        }
        b.add_road("A", "B", attrs(50.0, 20.0, 1.0));
        b.add_road("B", "C", attrs(150.0, 10.0, 1.5));
        let g = b.build().unwrap();
        let idx = AdjacencyIndex::build(&g, CostModel::default()).unwrap();
        (g, idx)
    }

    /// Toll road vs. back roads:
    ///
    /// ```text
    ///        ┌──────── (120, eff 20) ────────┐        toll 120, fuel 6 → 126
    ///  S ────┤                               ├──── T
    ///        └─ (60, eff 10) ─ M ─ (60, eff 10) ┘     fuel 6 + 6 → 12
    /// ```
    ///
    /// The direct road is shorter in fuel per unit length but tolled; the
    /// two untolled halves through M are cheaper.
    pub fn toll_or_detour(fuel_price: f64) -> (RoadGraph, AdjacencyIndex) {
        let mut b = RoadGraphBuilder::new();
        for key in ["S", "M", "T"] {
            b.add_node(key, Point::default());
        }
        b.add_road("S", "T", attrs(120.0, 20.0, 1.0));
        b.add_road("S", "M", attrs(60.0, 10.0, 1.0));
        b.add_road("M", "T", attrs(60.0, 10.0, 1.0));
        let g = b.build().unwrap();
        let idx = AdjacencyIndex::build(&g, CostModel::with_fuel_price(fuel_price).unwrap()).unwrap();
        (g, idx)
    }

    /// Two components: {P, Q} and {X, Y}.
    pub fn two_islands() -> (RoadGraph, AdjacencyIndex) {
        let mut b = RoadGraphBuilder::new();
        for key in ["P", "Q", "X", "Y"] {
            b.add_node(key, Point::default());
        }
        b.add_road("P", "Q", attrs(10.0, 10.0, 1.0));
        b.add_road("X", "Y", attrs(10.0, 10.0, 1.0));
        let g = b.build().unwrap();
        let idx = AdjacencyIndex::build(&g, CostModel::default()).unwrap();
        (g, idx)
    }
}

// ── MinHeap ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod heap {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use crate::MinHeap;

    #[test]
    fn empty_heap() {
        let mut h: MinHeap<u32> = MinHeap::new();
        assert!(h.is_empty());
        assert_eq!(h.len(), 0);
        assert_eq!(h.peek_key(), None);
        assert_eq!(h.extract_min(), None);
    }

    #[test]
    fn extracts_in_key_order() {
        let mut h = MinHeap::default();
        h.insert("ten", 10.0);
        h.insert("three", 3.0);
        h.insert("seven", 7.0);
        h.insert("zero", 0.0);
        assert_eq!(h.len(), 4);
        assert_eq!(h.peek_key(), Some(0.0));

        assert_eq!(h.extract_min(), Some(("zero", 0.0)));
        assert_eq!(h.extract_min(), Some(("three", 3.0)));
        assert_eq!(h.extract_min(), Some(("seven", 7.0)));
        assert_eq!(h.extract_min(), Some(("ten", 10.0)));
        assert!(h.is_empty());
    }

    #[test]
    fn duplicate_items_allowed() {
        let mut h = MinHeap::new();
        h.insert(1u32, 9.0);
        h.insert(1u32, 4.0);
        h.insert(2u32, 6.0);
        assert_eq!(h.extract_min(), Some((1, 4.0)));
        assert_eq!(h.extract_min(), Some((2, 6.0)));
        assert_eq!(h.extract_min(), Some((1, 9.0)));
    }

    #[test]
    fn random_keys_come_out_sorted() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut h = MinHeap::with_capacity(500);
        let mut keys: Vec<f64> = (0..500).map(|_| rng.gen_range(0.0..1_000.0)).collect();
        for (i, &k) in keys.iter().enumerate() {
            h.insert(i, k);
        }
        keys.sort_by(f64::total_cmp);

        let mut out = Vec::new();
        while let Some((_, k)) = h.extract_min() {
            out.push(k);
        }
        assert_eq!(out, keys);
    }

    #[test]
    fn interleaved_insert_and_extract() {
        let mut h = MinHeap::new();
        h.insert('a', 5.0);
        h.insert('b', 2.0);
        assert_eq!(h.extract_min(), Some(('b', 2.0)));
        h.insert('c', 1.0);
        h.insert('d', 8.0);
        assert_eq!(h.extract_min(), Some(('c', 1.0)));
        assert_eq!(h.extract_min(), Some(('a', 5.0)));
        assert_eq!(h.extract_min(), Some(('d', 8.0)));
    }
}

// ── Dijkstra routing ──────────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use approx::assert_relative_eq;

    use tp_core::{EdgeId, NodeId, Point};
    use tp_network::{AdjacencyIndex, CostModel, RoadGraph, RoadGraphBuilder};

    use crate::{DijkstraRouter, RouteError, Router};

    use super::helpers::{attrs, three_towns, toll_or_detour, two_islands};

    fn keys(g: &RoadGraph, nodes: &[NodeId]) -> Vec<String> {
        nodes.iter().map(|&n| g.node_key(n).unwrap().to_owned()).collect()
    }

    #[test]
    fn three_towns_route_and_cost() {
        let (g, idx) = three_towns();
        let r = DijkstraRouter.route_by_key(&g, &idx, "A", "C").unwrap().unwrap();

        assert_eq!(keys(&g, &r.nodes), ["A", "B", "C"]);
        assert_eq!(r.edges, vec![EdgeId(0), EdgeId(1)]);
        assert_eq!(r.hops(), 2);
        assert_relative_eq!(r.total_cost, 197.5, max_relative = 1e-12);
        assert_relative_eq!(r.fuel_used, 17.5, max_relative = 1e-12);
        assert_relative_eq!(r.fuel_cost, 17.5, max_relative = 1e-12);
        assert_relative_eq!(r.toll_cost, 180.0, max_relative = 1e-12);
    }

    #[test]
    fn edges_are_undirected() {
        let (g, idx) = three_towns();
        let r = DijkstraRouter.route_by_key(&g, &idx, "C", "A").unwrap().unwrap();
        assert_eq!(keys(&g, &r.nodes), ["C", "B", "A"]);
        assert_relative_eq!(r.total_cost, 197.5, max_relative = 1e-12);
    }

    #[test]
    fn same_node_is_trivial() {
        let (g, idx) = three_towns();
        let b = g.node_id("B").unwrap();
        let r = DijkstraRouter.route(&g, &idx, b, b).unwrap().unwrap();
        assert!(r.is_trivial());
        assert_eq!(r.nodes, vec![b]);
        assert_eq!((r.start(), r.end()), (b, b));
        assert_eq!(r.total_cost, 0.0);
    }

    #[test]
    fn unknown_key_is_invalid_query() {
        let (g, idx) = three_towns();
        let err = DijkstraRouter.route_by_key(&g, &idx, "Nowhere", "C").unwrap_err();
        assert_eq!(err, RouteError::InvalidQuery { key: "Nowhere".into() });

        let err = DijkstraRouter.route_by_key(&g, &idx, "A", "Nowhere").unwrap_err();
        assert!(matches!(err, RouteError::InvalidQuery { .. }));
    }

    #[test]
    fn keys_are_not_trimmed() {
        let (g, idx) = three_towns();
        assert!(DijkstraRouter.route_by_key(&g, &idx, " A", "C").is_err());
    }

    #[test]
    fn out_of_range_id_is_invalid_query() {
        let (g, idx) = three_towns();
        let err = DijkstraRouter.route(&g, &idx, NodeId(0), NodeId(42)).unwrap_err();
        assert_eq!(err, RouteError::UnknownNode(NodeId(42)));
    }

    #[test]
    fn mismatched_index_rejected() {
        let (g, _) = three_towns();
        let (_, other_idx) = two_islands();
        let err = DijkstraRouter.route(&g, &other_idx, NodeId(0), NodeId(1)).unwrap_err();
        assert!(matches!(err, RouteError::IndexMismatch { graph_nodes: 3, index_nodes: 4, .. }));
    }

    #[test]
    fn same_shape_index_from_other_roads_rejected() {
        let build = |roads: [(&str, &str); 2]| {
            let mut b = RoadGraphBuilder::new();
            for key in ["A", "B", "C"] {
                b.add_node(key, Point::default());
            }
            for (from, to) in roads {
                b.add_road(from, to, attrs(10.0, 10.0, 1.0));
            }
            b.build().unwrap()
        };
        let g = build([("A", "B"), ("B", "C")]);
        let other = build([("A", "C"), ("A", "B")]);
        let other_idx = AdjacencyIndex::build(&other, CostModel::default()).unwrap();

        let err = DijkstraRouter.route_by_key(&g, &other_idx, "A", "C").unwrap_err();
        assert!(matches!(err, RouteError::IndexMismatch { graph_nodes: 3, index_edges: 2, .. }));
    }

    #[test]
    fn disconnected_is_none() {
        let (g, idx) = two_islands();
        assert_eq!(DijkstraRouter.route_by_key(&g, &idx, "P", "Y").unwrap(), None);
        assert_eq!(DijkstraRouter.route_by_key(&g, &idx, "Y", "Q").unwrap(), None);
        // Within a component a route still exists.
        assert!(DijkstraRouter.route_by_key(&g, &idx, "X", "Y").unwrap().is_some());
    }

    #[test]
    fn isolated_start_is_none() {
        let mut b = RoadGraphBuilder::new();
        b.add_node("A", Point::default());
        b.add_node("B", Point::default());
        let g = b.build().unwrap();
        let idx = AdjacencyIndex::build(&g, CostModel::default()).unwrap();
        assert_eq!(DijkstraRouter.route(&g, &idx, NodeId(0), NodeId(1)).unwrap(), None);
    }

    #[test]
    fn detour_avoids_toll() {
        let (g, idx) = toll_or_detour(1.0);
        let r = DijkstraRouter.route_by_key(&g, &idx, "S", "T").unwrap().unwrap();
        assert_eq!(keys(&g, &r.nodes), ["S", "M", "T"]);
        assert_relative_eq!(r.total_cost, 12.0, max_relative = 1e-12);
        assert_eq!(r.toll_cost, 0.0);
    }

    #[test]
    fn high_fuel_price_makes_toll_road_worth_it() {
        // Direct: 6 fuel * 30 + 120 toll = 300.  Detour: 12 fuel * 30 = 360.
        let (g, idx) = toll_or_detour(30.0);
        let r = DijkstraRouter.route_by_key(&g, &idx, "S", "T").unwrap().unwrap();
        assert_eq!(keys(&g, &r.nodes), ["S", "T"]);
        assert_relative_eq!(r.total_cost, 300.0, max_relative = 1e-12);
        assert_relative_eq!(r.fuel_cost, 180.0, max_relative = 1e-12);
        assert_relative_eq!(r.toll_cost, 120.0, max_relative = 1e-12);
    }

    #[test]
    fn improved_distance_supersedes_stale_entry() {
        // S reaches T directly at cost 100 first; the cheaper path through
        // A and B is found later and must win.
        let mut b = RoadGraphBuilder::new();
        for key in ["S", "T", "A", "B"] {
            b.add_node(key, Point::default());
        }
        b.add_road("S", "T", attrs(100.0, 1.0, 1.0)); // 100 fuel, toll-free
        b.add_road("S", "A", attrs(10.0, 1.0, 1.0));  // 10
        b.add_road("A", "B", attrs(10.0, 1.0, 1.0));  // 10
        b.add_road("B", "T", attrs(10.0, 1.0, 1.0));  // 10
        let g = b.build().unwrap();
        let idx = AdjacencyIndex::build(&g, CostModel::default()).unwrap();

        let r = DijkstraRouter.route_by_key(&g, &idx, "S", "T").unwrap().unwrap();
        assert_eq!(keys(&g, &r.nodes), ["S", "A", "B", "T"]);
        assert_relative_eq!(r.total_cost, 30.0, max_relative = 1e-12);
    }

    #[test]
    fn parallel_edges_pick_cheaper() {
        let mut b = RoadGraphBuilder::new();
        b.add_node("A", Point::default());
        b.add_node("B", Point::default());
        b.add_road("A", "B", attrs(50.0, 5.0, 1.0)); // 10
        b.add_road("B", "A", attrs(50.0, 25.0, 1.0)); // 2
        let g = b.build().unwrap();
        let idx = AdjacencyIndex::build(&g, CostModel::default()).unwrap();

        let r = DijkstraRouter.route_by_key(&g, &idx, "A", "B").unwrap().unwrap();
        assert_eq!(r.edges, vec![EdgeId(1)]);
        assert_relative_eq!(r.total_cost, 2.0, max_relative = 1e-12);
    }

    #[test]
    fn route_edges_connect_route_nodes() {
        let (g, idx) = toll_or_detour(1.0);
        let r = DijkstraRouter.route_by_key(&g, &idx, "T", "S").unwrap().unwrap();
        assert_eq!(r.nodes.len(), r.edges.len() + 1);
        for (i, &e) in r.edges.iter().enumerate() {
            let edge = g.edge(e).unwrap();
            assert_eq!(edge.other(r.nodes[i]), Some(r.nodes[i + 1]));
        }
    }

    #[test]
    fn repeated_queries_are_identical() {
        let (g, idx) = toll_or_detour(1.0);
        let first = DijkstraRouter.route_by_key(&g, &idx, "S", "T").unwrap();
        for _ in 0..10 {
            assert_eq!(DijkstraRouter.route_by_key(&g, &idx, "S", "T").unwrap(), first);
        }
    }
}

// ── Optimality against brute force ────────────────────────────────────────────

#[cfg(test)]
mod optimality {
    use approx::assert_relative_eq;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use tp_core::{NodeId, Point};
    use tp_network::{AdjacencyIndex, CostModel, EdgeAttrs, RoadGraph, RoadGraphBuilder};

    use crate::{DijkstraRouter, Router};

    fn random_graph(rng: &mut SmallRng, nodes: usize, edges: usize) -> RoadGraph {
        let mut b = RoadGraphBuilder::new();
        for i in 0..nodes {
            b.add_node(format!("n{i}"), Point::default());
        }
        for _ in 0..edges {
            let from = rng.gen_range(0..nodes);
            let to   = rng.gen_range(0..nodes);
            let attrs = EdgeAttrs::new(
                rng.gen_range(10.0..300.0),
                rng.gen_range(5.0..25.0),
                rng.gen_range(0.5..2.0),
                rng.gen_range(0.5..2.0),
            );
            b.add_road(format!("n{from}"), format!("n{to}"), attrs);
        }
        b.build().unwrap()
    }

    /// Cheapest simple path cost by exhaustive DFS.
    fn brute_force(g: &RoadGraph, model: &CostModel, from: NodeId, to: NodeId) -> Option<f64> {
        fn dfs(
            g: &RoadGraph,
            model: &CostModel,
            at: NodeId,
            to: NodeId,
            cost: f64,
            on_path: &mut Vec<bool>,
            best: &mut Option<f64>,
        ) {
            if at == to {
                if best.is_none_or(|b| cost < b) {
                    *best = Some(cost);
                }
                return;
            }
            for e in g.edges() {
                let Some(next) = e.other(at) else { continue };
                if on_path[next.index()] {
                    continue;
                }
                let hop = model.edge_cost(&e.attrs).unwrap().total;
                on_path[next.index()] = true;
                dfs(g, model, next, to, cost + hop, on_path, best);
                on_path[next.index()] = false;
            }
        }

        let mut on_path = vec![false; g.node_count()];
        on_path[from.index()] = true;
        let mut best = None;
        dfs(g, model, from, to, 0.0, &mut on_path, &mut best);
        best
    }

    #[test]
    fn no_simple_path_is_cheaper() {
        let mut rng = SmallRng::seed_from_u64(2024);
        for round in 0..25 {
            let nodes = rng.gen_range(3..8);
            let edges = rng.gen_range(0..12);
            let g = random_graph(&mut rng, nodes, edges);
            let model = CostModel::with_fuel_price(rng.gen_range(0.5..3.0)).unwrap();
            let idx = AdjacencyIndex::build(&g, model).unwrap();

            for from in g.node_ids() {
                for to in g.node_ids() {
                    let found = DijkstraRouter.route(&g, &idx, from, to).unwrap();
                    let expected = brute_force(&g, &model, from, to);
                    match (found, expected) {
                        (None, None) => {}
                        (Some(r), Some(best)) => {
                            assert_relative_eq!(r.total_cost, best, epsilon = 1e-9, max_relative = 1e-9);
                            assert_eq!((r.start(), r.end()), (from, to));
                            assert!(r.total_cost >= 0.0);
                        }
                        (found, expected) => panic!(
                            "round {round}: {from}→{to} found {found:?}, brute force {expected:?}"
                        ),
                    }
                }
            }
        }
    }

    #[test]
    fn prefix_costs_never_decrease() {
        let mut rng = SmallRng::seed_from_u64(99);
        let g = random_graph(&mut rng, 10, 25);
        let idx = AdjacencyIndex::build(&g, CostModel::default()).unwrap();
        let first = NodeId(0);
        for to in g.node_ids() {
            let Some(r) = DijkstraRouter.route(&g, &idx, first, to).unwrap() else { continue };
            let mut running = 0.0;
            for &e in &r.edges {
                let next = running + idx.edge_cost(e).unwrap().total;
                assert!(next >= running);
                running = next;
            }
            assert_relative_eq!(running, r.total_cost, epsilon = 1e-9, max_relative = 1e-9);
        }
    }
}

// ── Report ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod report {
    use tp_core::{NodeId, Point};
    use tp_network::RoadGraphBuilder;

    use crate::{DijkstraRouter, RouteError, RouteReport, Router};

    use super::helpers::{attrs, three_towns};

    #[test]
    fn report_uses_keys() {
        let (g, idx) = three_towns();
        let r = DijkstraRouter.route_by_key(&g, &idx, "A", "C").unwrap().unwrap();
        let report = RouteReport::new(&g, &r).unwrap();
        assert_eq!(report.path, ["A", "B", "C"]);
        assert_eq!(
            report.to_string(),
            "Best Route: A → B → C | Fuel Cost: 17.50 | Toll Cost: 180.00 | Total Cost: 197.50"
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn report_serializes_camel_case() {
        let (g, idx) = three_towns();
        let r = DijkstraRouter.route_by_key(&g, &idx, "A", "C").unwrap().unwrap();
        let json = serde_json::to_value(RouteReport::new(&g, &r).unwrap()).unwrap();
        assert_eq!(json["path"], serde_json::json!(["A", "B", "C"]));
        assert!((json["totalCost"].as_f64().unwrap() - 197.5).abs() < 1e-9);
        assert!(json.get("tollCost").is_some());
    }

    #[test]
    fn report_against_smaller_graph_fails() {
        let (g, idx) = three_towns();
        let r = DijkstraRouter.route_by_key(&g, &idx, "A", "C").unwrap().unwrap();

        let mut b = RoadGraphBuilder::new();
        b.add_node("A", Point::default());
        b.add_node("B", Point::default());
        b.add_road("A", "B", attrs(50.0, 20.0, 1.0));
        let smaller = b.build().unwrap();

        let err = RouteReport::new(&smaller, &r).unwrap_err();
        assert_eq!(err, RouteError::UnknownNode(NodeId(2)));
    }
}

// ── Batch queries ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod batch {
    use tp_core::NodeId;

    use crate::{route_many, DijkstraRouter, RouteError, Router};

    use super::helpers::two_islands;

    #[test]
    fn results_in_query_order() {
        let (g, idx) = two_islands();
        let queries = [
            (NodeId(0), NodeId(1)),
            (NodeId(0), NodeId(3)),
            (NodeId(2), NodeId(3)),
            (NodeId(9), NodeId(0)),
        ];
        let results = route_many(&DijkstraRouter, &g, &idx, &queries);
        assert_eq!(results.len(), 4);
        assert!(results[0].as_ref().unwrap().is_some());
        assert_eq!(results[1], Ok(None));
        assert_eq!(results[2], DijkstraRouter.route(&g, &idx, NodeId(2), NodeId(3)));
        assert_eq!(results[3], Err(RouteError::UnknownNode(NodeId(9))));
    }

    #[test]
    fn empty_batch() {
        let (g, idx) = two_islands();
        assert!(route_many(&DijkstraRouter, &g, &idx, &[]).is_empty());
    }
}
