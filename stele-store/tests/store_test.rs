use stele_core::{IndexOrder, Node, NodeSpec};
use stele_store::{Store, StoreError, StoreFlags};

fn uri(store: &Store, text: &str) -> Node {
    store.nodes().intern(NodeSpec::uri(text))
}

fn quad(store: &Store, s: u32, p: u32, o: u32, g: Option<u32>) -> (Node, Node, Node, Option<Node>) {
    (
        uri(store, &format!("http://example.org/s{}", s)),
        uri(store, &format!("http://example.org/p{}", p)),
        uri(store, &format!("http://example.org/o{}", o)),
        g.map(|g| uri(store, &format!("http://example.org/g{}", g))),
    )
}

#[test]
fn round_trip() {
    let mut store = Store::new(IndexOrder::Spo, StoreFlags::new().with_graphs());

    let (s, p, o, g) = quad(&store, 1, 1, 1, Some(1));
    store
        .insert(s.clone(), p.clone(), o.clone(), g.clone(), None)
        .unwrap();

    assert!(store.ask(Some(&s), Some(&p), Some(&o), g.as_ref()));
    assert_eq!(store.count(Some(&s), Some(&p), Some(&o), g.as_ref()), 1);
}

#[test]
fn duplicate_insert_fails_without_graph_indexing() {
    let mut store = Store::new(IndexOrder::Spo, StoreFlags::new());

    let (s, p, o, g1) = quad(&store, 1, 1, 1, Some(1));
    let g2 = uri(&store, "http://example.org/g2");

    store
        .insert(s.clone(), p.clone(), o.clone(), g1, None)
        .unwrap();

    // Different graph, same triple: the graph was dropped on insert, so
    // this is a duplicate and the size is unchanged.
    assert_eq!(
        store
            .insert(s.clone(), p.clone(), o.clone(), Some(g2), None)
            .unwrap_err(),
        StoreError::Duplicate
    );
    assert_eq!(store.size(), 1);
}

#[test]
fn duplicate_insert_coexists_with_graph_indexing() {
    let mut store = Store::new(IndexOrder::Spo, StoreFlags::new().with_graphs());

    let (s, p, o, g1) = quad(&store, 1, 1, 1, Some(1));
    let g2 = uri(&store, "http://example.org/g2");

    store
        .insert(s.clone(), p.clone(), o.clone(), g1.clone(), None)
        .unwrap();
    store
        .insert(s.clone(), p.clone(), o.clone(), Some(g2.clone()), None)
        .unwrap();

    assert_eq!(store.size(), 2);

    // The exact same quad is still a duplicate
    assert_eq!(
        store.insert(s, p, o, Some(g2), None).unwrap_err(),
        StoreError::Duplicate
    );
    assert_eq!(store.size(), 2);
}

#[test]
fn erase_consistency_across_indices() {
    let mut store = Store::new(IndexOrder::Spo, StoreFlags::new());
    store.add_index(IndexOrder::Pos).unwrap();
    store.add_index(IndexOrder::Osp).unwrap();

    for i in 0..10 {
        let (s, p, o, _) = quad(&store, i, i % 3, i % 2, None);
        store.insert(s, p, o, None, None).unwrap();
    }

    let target_s = uri(&store, "http://example.org/s4");
    let target_p = uri(&store, "http://example.org/p1");
    let target_o = uri(&store, "http://example.org/o0");

    let mut cursor = store.find(Some(&target_s), None, None, None);
    assert!(cursor.get(&store).is_some());
    store.erase(&mut cursor).unwrap();

    assert_eq!(store.size(), 9);
    assert!(!store.ask(Some(&target_s), Some(&target_p), Some(&target_o), None));

    // The record is gone from every index, not just the default one
    for order in [IndexOrder::Spo, IndexOrder::Pos, IndexOrder::Osp] {
        let mut c = store.begin_ordered(order).unwrap();
        let mut seen = 0;
        while let Some(st) = c.get(&store) {
            assert!(!st.subject().same(&target_s) || !st.predicate().same(&target_p)
                || !st.object().same(&target_o));
            seen += 1;
            if c.advance(&store).is_err() {
                break;
            }
        }
        assert_eq!(seen, 9);
    }
}

#[test]
fn insert_invalidates_live_cursors() {
    let mut store = Store::new(IndexOrder::Spo, StoreFlags::new());
    let (s, p, o, _) = quad(&store, 1, 1, 1, None);
    store
        .insert(s.clone(), p.clone(), o.clone(), None, None)
        .unwrap();

    let mut cursor = store.begin();
    assert!(cursor.get(&store).is_some());

    let (s2, p2, o2, _) = quad(&store, 2, 2, 2, None);
    store.insert(s2, p2, o2, None, None).unwrap();

    assert!(cursor.get(&store).is_none());
    assert!(matches!(
        cursor.advance(&store).unwrap_err(),
        StoreError::StaleCursor { .. }
    ));
}

#[test]
fn node_references_balance_out() {
    let mut store = Store::new(IndexOrder::Spo, StoreFlags::new());

    let shared_s = uri(&store, "http://example.org/shared");
    let p1 = uri(&store, "http://example.org/p1");
    let p2 = uri(&store, "http://example.org/p2");
    let o = uri(&store, "http://example.org/o");

    store
        .insert(shared_s.clone(), p1.clone(), o.clone(), None, None)
        .unwrap();
    store
        .insert(shared_s.clone(), p2.clone(), o.clone(), None, None)
        .unwrap();

    // One external handle plus one per statement
    assert_eq!(store.nodes().refs(&shared_s), 3);

    let mut cursor = store.find(Some(&shared_s), Some(&p1), None, None);
    store.erase(&mut cursor).unwrap();
    assert_eq!(store.nodes().refs(&shared_s), 2);

    store.clear();
    assert_eq!(store.nodes().refs(&shared_s), 1);
    assert_eq!(store.nodes().refs(&p1), 1);
}

#[test]
fn erase_through_each_strategy_repositions() {
    let mut store = Store::new(IndexOrder::Spo, StoreFlags::new());

    let shared = uri(&store, "http://example.org/shared");
    for i in 0..5 {
        let p = uri(&store, &format!("http://example.org/p{}", i));
        let o = uri(&store, &format!("http://example.org/o{}", i));
        store.insert(shared.clone(), p, o, None, None).unwrap();
    }

    // Drain everything matching the subject through one cursor
    let mut cursor = store.find(Some(&shared), None, None, None);
    let mut erased = 0;
    while !cursor.is_end() {
        store.erase(&mut cursor).unwrap();
        erased += 1;
    }

    assert_eq!(erased, 5);
    assert!(store.is_empty());
}

#[test]
fn version_counts_every_mutation() {
    let mut store = Store::new(IndexOrder::Spo, StoreFlags::new());
    assert_eq!(store.version(), 0);

    let (s, p, o, _) = quad(&store, 1, 1, 1, None);
    store.insert(s, p, o, None, None).unwrap();
    assert_eq!(store.version(), 1);

    let (s, p, o, _) = quad(&store, 2, 2, 2, None);
    store.insert(s, p, o, None, None).unwrap();
    assert_eq!(store.version(), 2);

    let mut cursor = store.begin();
    store.erase(&mut cursor).unwrap();
    assert_eq!(store.version(), 3);

    store.clear();
    assert_eq!(store.version(), 4);

    // Failed operations leave the version alone
    let (s, p, o, _) = quad(&store, 3, 3, 3, None);
    store.insert(s.clone(), p.clone(), o.clone(), None, None).unwrap();
    assert_eq!(store.insert(s, p, o, None, None).unwrap_err(), StoreError::Duplicate);
    assert_eq!(store.version(), 5);
}
