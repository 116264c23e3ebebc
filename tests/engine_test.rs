//! End-to-end tests for template loading, ordering and generation

use serde_json::{json, Value};
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use synthgen::{load_templates, Engine, GenerationContext, MemorySink, TemplateSource};
use tempfile::TempDir;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

fn source(name: &str, document: Value) -> TemplateSource {
    TemplateSource::new(name, None, document)
}

fn run(templates: &[(&str, u64, Value)], seed: u64) -> MemorySink {
    let mut engine = Engine::new(GenerationContext::new(seed));
    for (name, iterations, document) in templates {
        engine
            .add_template(&source(name, document.clone()), *iterations)
            .unwrap();
    }
    let mut sink = MemorySink::new();
    engine.run(&mut sink).unwrap();
    sink
}

/// Counts WARN events
struct WarningCounter(Arc<AtomicUsize>);

impl<S: tracing::Subscriber> Layer<S> for WarningCounter {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == tracing::Level::WARN {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[test]
fn test_producers_run_before_consumers() {
    let sink = run(
        &[
            (
                "c",
                2,
                json!({"b": {"generator": "ref", "other": "b", "property": "id"}}),
            ),
            (
                "b",
                2,
                json!({"id": {"generator": "id"}, "a": {"generator": "ref", "other": "a", "property": "id"}}),
            ),
            ("a", 2, json!({"id": {"generator": "id"}})),
        ],
        42,
    );

    assert_eq!(sink.templates(), vec!["a", "b", "c"]);

    let a_ids: Vec<&Value> = sink.records("a").iter().map(|r| &r["id"]).collect();
    for record in sink.records("b") {
        assert!(a_ids.contains(&&record["a"]));
    }
    let b_ids: Vec<&Value> = sink.records("b").iter().map(|r| &r["id"]).collect();
    for record in sink.records("c") {
        assert!(b_ids.contains(&&record["b"]));
    }
}

#[test]
fn test_reference_samples_only_produced_values() {
    let sink = run(
        &[
            (
                "consumer",
                500,
                json!({"x": {"generator": "reference", "other": "producer", "property": "x"}}),
            ),
            (
                "producer",
                30,
                json!({"x": {"generator": "enum", "options": [1, 2, 3]}}),
            ),
        ],
        7,
    );

    let allowed = [json!(1), json!(2), json!(3)];
    assert_eq!(sink.records("consumer").len(), 500);
    for record in sink.records("consumer") {
        assert!(allowed.contains(&record["x"]), "unexpected {}", record["x"]);
    }
}

#[test]
fn test_nested_reference_reads_nested_producer_path() {
    let sink = run(
        &[
            (
                "orders",
                20,
                json!({"customer": {"tier": {"generator": "ref", "other": "users", "property": "profile.tier"}}}),
            ),
            (
                "users",
                5,
                json!({"profile": {"tier": {"generator": "enum", "options": ["gold"]}}}),
            ),
        ],
        1,
    );

    for record in sink.records("orders") {
        assert_eq!(record["customer"]["tier"], json!("gold"));
    }
}

#[test]
fn test_unresolved_reference_yields_null_with_one_warning() {
    let warnings = Arc::new(AtomicUsize::new(0));
    let subscriber = tracing_subscriber::registry().with(WarningCounter(warnings.clone()));

    let sink = tracing::subscriber::with_default(subscriber, || {
        run(
            &[
                (
                    "orphans",
                    25,
                    json!({
                        "parent": {"generator": "ref", "other": "ghost", "property": "id"},
                        "label": "orphan"
                    }),
                ),
                ("standalone", 3, json!({"n": {"generator": "int"}})),
            ],
            3,
        )
    });

    assert_eq!(sink.templates(), vec!["standalone", "orphans"]);
    assert_eq!(sink.records("orphans").len(), 25);
    for record in sink.records("orphans") {
        assert!(record["parent"].is_null());
        assert_eq!(record["label"], json!("orphan"));
    }
    assert_eq!(warnings.load(Ordering::SeqCst), 1);
}

#[test]
fn test_inspecting_plan_before_run_warns_once() {
    let warnings = Arc::new(AtomicUsize::new(0));
    let subscriber = tracing_subscriber::registry().with(WarningCounter(warnings.clone()));

    tracing::subscriber::with_default(subscriber, || {
        let mut engine = Engine::new(GenerationContext::new(3));
        engine
            .add_template(
                &source(
                    "orphans",
                    json!({"parent": {"generator": "ref", "other": "ghost", "property": "id"}}),
                ),
                2,
            )
            .unwrap();

        let plan = engine.plan();
        assert_eq!(plan.unresolved.len(), 1);
        assert_eq!(engine.plan(), plan);

        let stats = engine.run(&mut MemorySink::new()).unwrap();
        assert_eq!(stats.unresolved, plan.unresolved);
    });

    assert_eq!(warnings.load(Ordering::SeqCst), 1);
}

#[test]
fn test_unresolved_cycle_still_runs_everything() {
    let sink = run(
        &[
            (
                "left",
                4,
                json!({"id": {"generator": "id"}, "right": {"generator": "ref", "other": "right", "property": "id"}}),
            ),
            (
                "right",
                4,
                json!({"id": {"generator": "id"}, "left": {"generator": "ref", "other": "left", "property": "id"}}),
            ),
        ],
        9,
    );

    assert_eq!(sink.templates(), vec!["left", "right"]);
    // left ran first with nothing to reference, right saw every left id
    assert!(sink.records("left").iter().all(|r| r["right"].is_null()));
    assert!(sink.records("right").iter().all(|r| r["left"].is_string()));
}

#[test]
fn test_self_reference_reads_own_earlier_records() {
    let sink = run(
        &[(
            "nodes",
            10,
            json!({
                "id": {"generator": "id"},
                "parent": {"generator": "ref", "other": "nodes", "property": "id"}
            }),
        )],
        11,
    );

    let records = sink.records("nodes");
    // the id leaf is tracked before the parent leaf runs
    assert_eq!(records[0]["parent"], records[0]["id"]);
    for (i, record) in records.iter().enumerate() {
        let earlier: Vec<&Value> = records[..=i].iter().map(|r| &r["id"]).collect();
        assert!(earlier.contains(&&record["parent"]));
    }
}

#[test]
fn test_unique_file_generator_exhausts_once() {
    let dir = TempDir::new().unwrap();
    for (name, content) in [("a.txt", "alpha"), ("b.txt", "beta"), ("c.txt", "gamma")] {
        fs::write(dir.path().join(name), content).unwrap();
    }

    let sink = run(
        &[(
            "docs",
            6,
            json!({"body": {"generator": "file", "directory": dir.path(), "unique": true}}),
        )],
        5,
    );

    let bodies: Vec<&str> = sink
        .records("docs")
        .iter()
        .map(|r| r["body"].as_str().unwrap())
        .collect();

    let mut first: Vec<&str> = bodies[..3].to_vec();
    first.sort();
    assert_eq!(first, vec!["alpha", "beta", "gamma"]);
    assert!(bodies[3..].iter().all(|b| b.is_empty()));
}

#[test]
fn test_missing_file_directory_fails_construction() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");

    let mut engine = Engine::new(GenerationContext::new(1));
    let err = engine
        .add_template(
            &source("docs", json!({"body": {"generator": "file", "directory": missing}})),
            1,
        )
        .unwrap_err();
    assert!(err.to_string().contains("docs"));
    assert!(err.to_string().contains("body"));
}

#[test]
fn test_join_pair_for_any_seed() {
    for seed in 0..20 {
        let sink = run(
            &[(
                "pairs",
                5,
                json!({"pair": {
                    "generator": "join",
                    "element": {"generator": "enum", "options": ["x", "y"]},
                    "count": {"min": 2, "max": 2},
                    "separator": ","
                }}),
            )],
            seed,
        );
        for record in sink.records("pairs") {
            let pair = record["pair"].as_str().unwrap();
            assert_eq!(pair.matches(',').count(), 1, "{}", pair);
            assert!(pair.split(',').all(|p| p == "x" || p == "y"));
        }
    }
}

#[test]
fn test_copy_matches_sibling() {
    let sink = run(
        &[(
            "people",
            20,
            json!({
                "name": {"generator": "name"},
                "display": {"generator": "copy", "from": "name"}
            }),
        )],
        8,
    );

    for record in sink.records("people") {
        assert_eq!(record["display"], record["name"]);
    }
}

#[test]
fn test_unknown_kinds_and_literals_pass_through() {
    let sink = run(
        &[(
            "misc",
            2,
            json!({
                "tags": ["a", "b"],
                "empty": {},
                "weird": {"generator": "no-such-kind", "x": 1},
                "count": 3
            }),
        )],
        4,
    );

    for record in sink.records("misc") {
        assert_eq!(record["tags"], json!(["a", "b"]));
        assert_eq!(record["empty"], json!({}));
        assert_eq!(record["weird"], json!({"generator": "no-such-kind", "x": 1}));
        assert_eq!(record["count"], json!(3));
    }
}

#[test]
fn test_same_seed_same_output() {
    let templates = [
        (
            "rows",
            15,
            json!({
                "name": {"generator": "name"},
                "level": {"generator": "int", "min": 1, "max": 10},
                "kind": {"generator": "enum", "options": ["a", "b", "c"]},
                "csv": {"generator": "csv"}
            }),
        ),
        (
            "refs",
            15,
            json!({"level": {"generator": "ref", "other": "rows", "property": "level"}}),
        ),
    ];

    let first = run(&templates, 1234);
    let second = run(&templates, 1234);
    assert_eq!(first.records("rows"), second.records("rows"));
    assert_eq!(first.records("refs"), second.records("refs"));
}

#[test]
fn test_load_and_run_from_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("users.4.json"),
        r#"{"id": {"generator": "id"}, "name": {"generator": "name"}}"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("posts.json"),
        r#"{"author": {"generator": "ref", "other": "users", "property": "id"}}"#,
    )
    .unwrap();

    let sources = load_templates(dir.path()).unwrap();
    let mut engine = Engine::new(GenerationContext::new(2));
    for source in &sources {
        engine
            .add_template(source, source.iterations.unwrap_or(3))
            .unwrap();
    }

    let mut sink = MemorySink::new();
    let stats = engine.run(&mut sink).unwrap();

    assert_eq!(stats.execution_order(), vec!["users", "posts"]);
    assert_eq!(sink.records("users").len(), 4);
    assert_eq!(sink.records("posts").len(), 3);
    assert!(stats.unresolved.is_empty());
}
