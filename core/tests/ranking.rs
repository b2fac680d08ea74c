mod common;

use common::{engine_from, two_doc_catalog, two_doc_title_index};
use docrank_core::persist::write_results;
use docrank_core::{Field, MatchPolicy};
use serde_json::json;
use std::collections::HashSet;
use std::fs;
use tempfile::tempdir;

#[test]
fn single_token_and_query_returns_matching_title() {
    let dir = tempdir().unwrap();
    let engine = engine_from(dir.path(), &two_doc_catalog(), &two_doc_title_index(), None);

    let results = engine.search("alpha", MatchPolicy::And);
    let out = dir.path().join("results.json");
    write_results(&out, &results).unwrap();
    assert_eq!(fs::read_to_string(&out).unwrap(), r#"{"Alpha Report":"u1"}"#);
}

#[test]
fn unmatched_query_writes_empty_mapping() {
    let dir = tempdir().unwrap();
    let engine = engine_from(dir.path(), &two_doc_catalog(), &two_doc_title_index(), None);

    let results = engine.search("gamma", MatchPolicy::And);
    assert!(results.is_empty());
    let out = dir.path().join("results.json");
    write_results(&out, &results).unwrap();
    assert_eq!(fs::read_to_string(&out).unwrap(), "{}");
}

#[test]
fn query_is_case_insensitive() {
    let dir = tempdir().unwrap();
    let engine = engine_from(dir.path(), &two_doc_catalog(), &two_doc_title_index(), None);
    assert_eq!(engine.search("ALPHA", MatchPolicy::And).titles(), vec!["Alpha Report"]);
}

#[test]
fn or_policy_unions_and_policy_intersects() {
    let dir = tempdir().unwrap();
    let engine = engine_from(dir.path(), &two_doc_catalog(), &two_doc_title_index(), None);

    assert!(engine.search("alpha beta", MatchPolicy::And).is_empty());
    let or = engine.search("alpha beta", MatchPolicy::Or);
    let titles: HashSet<&str> = or.titles().into_iter().collect();
    assert_eq!(titles, HashSet::from(["Alpha Report", "Beta Notes"]));
}

#[test]
fn candidates_equal_posting_keys_after_load() {
    let dir = tempdir().unwrap();
    let title = json!({
        "rust": {"1": {"count": 2, "positions": [0, 5]}, "3": {"count": 1, "positions": [2]}},
        "go": {"2": {"count": 1, "positions": [0]}}
    });
    let catalog = json!([
        {"id": 1, "title": "One", "url": "u1"},
        {"id": 2, "title": "Two", "url": "u2"},
        {"id": 3, "title": "Three", "url": "u3"}
    ]);
    let engine = engine_from(dir.path(), &catalog, &title, None);

    let keys: HashSet<String> = engine.snapshot().postings("rust", Field::Title).unwrap().keys().cloned().collect();
    let candidates = engine.candidates(&["rust"], MatchPolicy::And);
    assert_eq!(candidates.title, keys);
    assert_eq!(keys, HashSet::from(["1".to_string(), "3".to_string()]));
}

#[test]
fn order_score_drives_title_score() {
    let dir = tempdir().unwrap();
    let catalog = json!([
        {"id": "1", "title": "In order", "url": "u1"},
        {"id": "2", "title": "Reversed", "url": "u2"}
    ]);
    let title = json!({
        "rapport": {"1": {"count": 1, "positions": [0]}, "2": {"count": 1, "positions": [5]}},
        "annuel": {"1": {"count": 1, "positions": [3]}, "2": {"count": 1, "positions": [2]}}
    });
    let engine = engine_from(dir.path(), &catalog, &title, None);
    let ranked = engine.rank("rapport annuel", MatchPolicy::And);
    assert_eq!(ranked.len(), 2);

    let score = |id: &str| ranked.iter().find(|r| r.doc_id == id).unwrap().title_score;
    // 0.3 * (4 * 2) / 2 with order 1, plus 0.7 for the reversed pair
    assert!((score("1") - 1.2).abs() < 1e-12);
    assert!((score("2") - 1.9).abs() < 1e-12);
    // the blend rewards an order mismatch, so the reversed document ranks first
    assert_eq!(ranked[0].doc_id, "2");
}

#[test]
fn higher_term_frequency_ranks_first() {
    let dir = tempdir().unwrap();
    let catalog = json!([
        {"id": "1", "title": "Rust once", "url": "u1"},
        {"id": "2", "title": "Rust rust rust", "url": "u2"},
        {"id": "3", "title": "Other", "url": "u3"}
    ]);
    let title = json!({
        "rust": {"1": {"count": 1, "positions": [0]}, "2": {"count": 3, "positions": [0, 1, 2]}},
        "other": {"3": {"count": 1, "positions": [0]}}
    });
    let engine = engine_from(dir.path(), &catalog, &title, None);
    assert_eq!(engine.search("rust", MatchPolicy::And).titles(), vec!["Rust rust rust", "Rust once"]);
}

#[test]
fn content_matches_are_ranked_when_content_is_loaded() {
    let dir = tempdir().unwrap();
    let content = json!({
        "gamma": {"2": {"count": 2, "positions": [3, 8]}}
    });
    let engine = engine_from(dir.path(), &two_doc_catalog(), &two_doc_title_index(), Some(&content));

    let ranked = engine.rank("gamma", MatchPolicy::And);
    assert_eq!(ranked.len(), 1);
    let rec = &ranked[0];
    assert_eq!(rec.doc_id, "2");
    assert_eq!(rec.title_score, 0.0);
    assert_eq!(rec.bm25_title, 0.0);
    assert!(rec.content_score > 0.0);
    assert!(rec.bm25_content > 0.0);
    assert_eq!(engine.search("gamma", MatchPolicy::And).titles(), vec!["Beta Notes"]);
}

#[test]
fn title_and_content_scores_add_up() {
    let dir = tempdir().unwrap();
    let content = json!({
        "alpha": {"1": {"count": 1, "positions": [10]}, "2": {"count": 1, "positions": [4]}}
    });
    let engine = engine_from(dir.path(), &two_doc_catalog(), &two_doc_title_index(), Some(&content));

    let ranked = engine.rank("alpha", MatchPolicy::Or);
    assert_eq!(ranked.iter().map(|r| r.doc_id.as_str()).collect::<Vec<_>>(), vec!["1", "2"]);
    let both = &ranked[0];
    assert!(both.title_score > 0.0 && both.content_score > 0.0);
    let want = 10.0 * (0.7 * both.title_score + 0.2 * both.content_score) + 0.7 * both.bm25_title + 0.3 * both.bm25_content;
    assert!((both.final_score - want).abs() < 1e-9);
}

#[test]
fn missing_content_index_degrades_to_title_only() {
    let dir = tempdir().unwrap();
    let engine = engine_from(dir.path(), &two_doc_catalog(), &two_doc_title_index(), None);
    let ranked = engine.rank("alpha", MatchPolicy::And);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].content_score, 0.0);
    assert_eq!(ranked[0].bm25_content, 0.0);
}

#[test]
fn ranking_is_deterministic_across_engines() {
    let title = json!({
        "a": {"1": {"count": 1, "positions": [0]}, "2": {"count": 1, "positions": [0]},
              "3": {"count": 1, "positions": [0]}, "4": {"count": 1, "positions": [0]}},
        "b": {"3": {"count": 1, "positions": [1]}}
    });
    let catalog = json!([
        {"id": "4", "title": "D", "url": "u4"},
        {"id": "3", "title": "C", "url": "u3"},
        {"id": "2", "title": "B", "url": "u2"},
        {"id": "1", "title": "A", "url": "u1"}
    ]);
    let first = {
        let dir = tempdir().unwrap();
        engine_from(dir.path(), &catalog, &title, None).search("a b", MatchPolicy::Or)
    };
    for _ in 0..5 {
        let dir = tempdir().unwrap();
        let again = engine_from(dir.path(), &catalog, &title, None).search("a b", MatchPolicy::Or);
        assert_eq!(again, first);
    }
    // "c" scores highest; the tied rest keep catalog order
    assert_eq!(first.titles(), vec!["C", "D", "B", "A"]);
}
