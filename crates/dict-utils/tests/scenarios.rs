use dict_utils::{
    collect_by_key, compact, delete, depth, diff, get, get_or, has, map_to_record, merge,
    record_to_map, set, set_many, Node, NodeMap,
};
use serde_json::json;

fn n(value: serde_json::Value) -> Node {
    Node::from(value)
}

fn m(value: serde_json::Value) -> NodeMap {
    match Node::from(value) {
        Node::Map(map) => map,
        other => panic!("expected map, got {other:?}"),
    }
}

#[test]
fn set_builds_shared_prefix() {
    let mut doc = n(json!({}));
    set_many(&mut doc, [("a.b.c", n(json!(1))), ("a.b.d", n(json!(2)))]).expect("set ok");
    assert_eq!(doc, n(json!({"a": {"b": {"c": 1, "d": 2}}})));
}

#[test]
fn delete_leaves_empty_parent() {
    let mut doc = n(json!({"a": {"b": {"c": 1}}}));
    delete(&mut doc, "a.b.c");
    assert_eq!(doc, n(json!({"a": {"b": {}}})));
}

#[test]
fn diff_reports_added_removed_changed() {
    let d = diff(&m(json!({"a": 1})), &m(json!({"a": 2, "b": 3})));
    assert_eq!(d.added, m(json!({"b": 3})));
    assert!(d.removed.is_empty());
    assert_eq!(d.changed.len(), 1);
    assert_eq!(d.changed.get("a"), Some(&(n(json!(1)), n(json!(2)))));
}

#[test]
fn depth_counts_map_levels() {
    assert_eq!(depth(&n(json!({"a": {"b": {"c": 1}}}))), 3);
    assert_eq!(depth(&n(json!({}))), 0);
}

#[test]
fn set_grows_sequence_root() {
    let mut doc = Node::seq();
    set(&mut doc, "0.b", n(json!(5))).expect("set ok");
    assert_eq!(doc.as_seq().map(Vec::len), Some(1));
    assert_eq!(doc, n(json!([{"b": 5}])));
}

#[test]
fn collect_by_key_finds_all_levels() {
    let doc = n(json!({"a": 1, "b": {"a": 2}, "c": [{"a": 3}, {"a": 4}]}));
    let found: Vec<Node> = collect_by_key(&doc, "a").into_iter().cloned().collect();
    assert_eq!(found, vec![n(json!(1)), n(json!(2)), n(json!(3)), n(json!(4))]);
}

#[test]
fn get_table() {
    let cases = [
        (json!({"a": {"b": {"c": 1}}}), "a.b.c", json!(1)),
        (json!({"a": [{"b": 5}]}), "a.0.b", json!(5)),
        (json!({}), "x.y", json!(null)),
    ];
    let null = Node::Null;
    for (data, path, expected) in cases {
        let doc = n(data);
        assert_eq!(get_or(&doc, path, &null), &n(expected), "path {path}");
    }
}

#[test]
fn get_reads_record_fields() {
    let mut root = NodeMap::new();
    root.insert("a".to_string(), Node::Object(map_to_record(&m(json!({"b": 10})))));
    let doc = Node::Map(root);
    assert_eq!(get(&doc, "a.b"), Some(&n(json!(10))));
    assert!(has(&doc, "a.b"));
    assert!(!has(&doc, "a.c"));
}

#[test]
fn record_conversion_roundtrip() {
    let original = m(json!({"a": {"b": 1}, "c": [1, {"d": 2}]}));
    assert_eq!(record_to_map(&map_to_record(&original)), original);
}

#[test]
fn compact_example() {
    assert_eq!(
        compact(&n(json!({"a": null, "b": 1, "c": {}, "d": ""}))),
        n(json!({"b": 1}))
    );
}

#[test]
fn merge_then_read_by_path() {
    let base = m(json!({"server": {"host": "localhost", "port": 80}}));
    let overlay = m(json!({"server": {"port": 8080}, "debug": true}));
    let merged = Node::Map(merge(&base, &overlay));
    assert_eq!(get(&merged, "server.host"), Some(&n(json!("localhost"))));
    assert_eq!(get(&merged, "server.port"), Some(&n(json!(8080))));
    assert_eq!(get(&merged, "debug"), Some(&n(json!(true))));
}
