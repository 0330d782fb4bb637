use super::*;

use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone)]
enum Op {
    Insert(String, i32),
    Remove(String),
}

fn word() -> impl Strategy<Value = String> {
    // Small alphabet so paths collide and pruning gets exercised.
    "[abc]{0,6}"
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (word(), -5i32..5).prop_map(|(w, s)| Op::Insert(w, s)),
        word().prop_map(Op::Remove),
    ]
}

/// Node count implied by a set of words: root plus every distinct non-empty prefix.
fn expected_nodes<'a>(words: impl Iterator<Item = &'a String>) -> usize {
    let mut prefixes = BTreeSet::new();
    for w in words {
        let mut p = String::new();
        for ch in w.chars() {
            p.push(ch);
            prefixes.insert(p.clone());
        }
    }
    prefixes.len() + 1
}

fn expected_height<'a>(words: impl Iterator<Item = &'a String>) -> usize {
    words.map(|w| w.chars().count()).max().unwrap_or(0)
}

fn score() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0), Just(-0.0), -5.0f64..5.0, (-3i32..3).prop_map(f64::from)]
}

/// Reference ranking by a full sort. Scores compare numerically so -0.0
/// ties with 0.0.
fn ranked(model: &BTreeMap<String, f64>, prefix: &str, k: usize) -> Vec<String> {
    let mut all: Vec<(&String, f64)> = model
        .iter()
        .filter(|(w, _)| w.starts_with(prefix))
        .map(|(w, s)| (w, *s))
        .collect();
    all.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });
    all.into_iter().take(k).map(|(w, _)| w.clone()).collect()
}

proptest! {
    #[test]
    fn matches_btreemap_model(ops in prop::collection::vec(op(), 0..80)) {
        let mut t = Trie::new();
        let mut model: BTreeMap<String, f64> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(w, s) => {
                    t.insert(&w, s as f64);
                    model.insert(w, s as f64);
                }
                Op::Remove(w) => {
                    let before = t.stats();
                    let removed = t.remove(&w);
                    prop_assert_eq!(removed, model.remove(&w).is_some());
                    if !removed {
                        prop_assert_eq!(t.stats(), before);
                    }
                }
            }

            let stats = t.stats();
            prop_assert_eq!(stats.words, model.len());
            prop_assert_eq!(stats.nodes, expected_nodes(model.keys()));
            prop_assert_eq!(stats.height, expected_height(model.keys()));
        }

        let items: Vec<(String, f64)> = model.iter().map(|(w, s)| (w.clone(), *s)).collect();
        prop_assert_eq!(t.items(), items);
    }

    #[test]
    fn complete_matches_full_sort(
        entries in prop::collection::vec((word(), score()), 0..60),
        prefix in "[abc]{0,2}",
        k in 0usize..12,
    ) {
        let mut t = Trie::new();
        let mut model = BTreeMap::new();
        for (w, s) in entries {
            t.insert(&w, s);
            model.insert(w, s);
        }

        let got = t.complete(&prefix, k);
        prop_assert!(got.len() <= k);
        prop_assert_eq!(got, ranked(&model, &prefix, k));
    }

    #[test]
    fn removing_all_restores_empty(words in prop::collection::btree_set("[a-e]{1,8}", 0..40)) {
        let mut t: Trie = words.iter().map(|w| (w.as_str(), 1.0)).collect();
        for w in &words {
            prop_assert!(t.contains(w));
        }
        for w in &words {
            prop_assert!(t.remove(w));
        }
        prop_assert_eq!(t.stats(), Stats { words: 0, height: 0, nodes: 1 });
    }
}
