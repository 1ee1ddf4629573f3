use std::collections::BTreeMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use treelog::{Node, NodeKind, generate_tree, matches_query};

const WORDS: &[&str] = &["Alpha", "beta", "GAMMA", "delta", "Épée", "Zeta", "omega"];

// Random tree with labels and prefixes drawn from WORDS.
fn random_tree(rng: &mut impl Rng, budget: usize) -> Node {
    let label = WORDS[rng.random_range(0..WORDS.len())];
    if budget == 0 || rng.random_bool(0.3) {
        return Node::new(label, NodeKind::Simple, None);
    }

    let children = (0..rng.random_range(1..4))
        .map(|i| {
            let child = random_tree(&mut *rng, budget - 1);
            if rng.random_bool(0.5) {
                child.with_prefix(format!("{}{i}", WORDS[rng.random_range(0..WORDS.len())]))
            } else {
                child
            }
        })
        .collect();
    Node::new(label, NodeKind::Object, None).with_children(children)
}

fn labels_and_prefixes(node: &Node, out: &mut Vec<String>) {
    out.push(node.label().to_string());
    if let Some(prefix) = node.prefix() {
        out.push(prefix.to_string());
    }
    for child in node.children() {
        labels_and_prefixes(child, out);
    }
}

#[test]
fn matches_labels_case_insensitively() {
    let node = generate_tree(&vec!["Hello World"]);
    assert!(matches_query(&node, "hello"));
    assert!(matches_query(&node, "WORLD"));
    assert!(matches_query(&node, "vec"));
    assert!(!matches_query(&node, "goodbye"));
}

#[test]
fn matches_prefixes() {
    let node = generate_tree(&BTreeMap::from([("Temperature", 21)]));
    assert!(node.matches_query("temp"));
    assert!(node.matches_query("21"));
    assert!(!node.matches_query("pressure"));
}

#[test]
fn empty_query_matches_everything() {
    assert!(generate_tree(&0).matches_query(""));
    assert!(generate_tree(&None::<u8>).matches_query(""));
}

#[test]
fn unicode_folding() {
    let node = generate_tree(&"ÉPÉE");
    assert!(node.matches_query("épée"));
}

#[test]
fn every_substring_of_a_label_matches() {
    let mut rng = ChaCha20Rng::seed_from_u64(0x7ee);
    for _ in 0..64 {
        let tree = random_tree(&mut rng, 4);
        let mut texts = Vec::new();
        labels_and_prefixes(&tree, &mut texts);

        for text in texts {
            let chars: Vec<char> = text.chars().collect();
            let start = rng.random_range(0..chars.len());
            let end = rng.random_range(start..=chars.len());
            let query: String = chars[start..end].iter().collect();
            assert!(tree.matches_query(&query.to_uppercase()), "{query:?} in {tree}");
        }
    }
}

#[test]
fn matching_child_implies_matching_parent() {
    let mut rng = ChaCha20Rng::seed_from_u64(42);
    for _ in 0..64 {
        let tree = random_tree(&mut rng, 5);
        for query in WORDS.iter().chain(&["zzz", "ph", "ta"]) {
            if tree.children().iter().any(|c| c.matches_query(query)) {
                assert!(tree.matches_query(query));
            }
        }
    }
}
