#[cfg(test)]
mod proptests;

use std::{
    cmp::Ordering,
    collections::{btree_map, BTreeMap, BinaryHeap},
    fmt,
};

/// One position in the character-path tree.
#[derive(Debug, Default)]
struct Node {
    children: BTreeMap<char, Node>,
    terminal: bool,

    // Only meaningful when `terminal` is set.
    score: f64,
}

impl Drop for Node {
    // Tear the subtree down with a heap stack instead of recursive drops.
    fn drop(&mut self) {
        let mut stack: Vec<Node> = std::mem::take(&mut self.children).into_values().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(std::mem::take(&mut node.children).into_values());
        }
    }
}

/// Counters returned by `Trie::stats()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub words: usize,
    pub height: usize,
    pub nodes: usize,
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "words={} height={} nodes={}",
            self.words, self.height, self.nodes
        )
    }
}

/// Prefix tree mapping words to relevance scores.
///
/// Words are stored char-for-char as given. Case folding is the caller's job.
#[derive(Debug)]
pub struct Trie {
    root: Node,
    word_count: usize,

    // Includes the root.
    node_count: usize,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    pub fn new() -> Self {
        Self {
            root: Node::default(),
            word_count: 0,
            node_count: 1,
        }
    }

    /// Number of stored words.
    pub fn len(&self) -> usize {
        self.word_count
    }

    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    /// Insert a word, or overwrite the score of an existing one.
    pub fn insert(&mut self, word: &str, score: f64) {
        let mut node = &mut self.root;
        for ch in word.chars() {
            node = match node.children.entry(ch) {
                btree_map::Entry::Occupied(e) => e.into_mut(),
                btree_map::Entry::Vacant(e) => {
                    self.node_count += 1;
                    e.insert(Node::default())
                }
            };
        }

        if !node.terminal {
            self.word_count += 1;
        }
        node.terminal = true;
        // -0.0 and 0.0 must tie in ranking, and total_cmp tells them apart.
        node.score = if score == 0.0 { 0.0 } else { score };
    }

    /// Remove a word and prune the branch that only it was using.
    /// Returns false (and changes nothing) if the word isn't stored.
    pub fn remove(&mut self, word: &str) -> bool {
        let path: Vec<char> = word.chars().collect();

        // Find the deepest node on the path that outlives the removal: the root,
        // another word's end, or a fork. Everything below it on the path goes.
        let mut keep = 0;
        let mut node = &self.root;
        for (depth, ch) in path.iter().enumerate() {
            if node.terminal || node.children.len() > 1 {
                keep = depth;
            }
            node = match node.children.get(ch) {
                Some(n) => n,
                None => return false,
            };
        }
        if !node.terminal {
            return false;
        }

        self.word_count -= 1;

        // The word's own node still leads to longer words. Just unmark it.
        if path.is_empty() || !node.children.is_empty() {
            if let Some(n) = self.node_mut(&path) {
                n.terminal = false;
                n.score = 0.0;
            }
            return true;
        }

        if let Some(parent) = self.node_mut(&path[..keep]) {
            parent.children.remove(&path[keep]);
            self.node_count -= path.len() - keep;
        }

        true
    }

    /// Exact word lookup.
    pub fn contains(&self, word: &str) -> bool {
        self.trace(word).is_some_and(|n| n.terminal)
    }

    /// Score of a stored word.
    pub fn score(&self, word: &str) -> Option<f64> {
        self.trace(word).filter(|n| n.terminal).map(|n| n.score)
    }

    /// Return up to `k` words starting with `prefix`, best score first.
    /// Equal scores are ordered alphabetically.
    pub fn complete(&self, prefix: &str, k: usize) -> Vec<String> {
        if k == 0 {
            return Vec::new();
        }
        let start = match self.trace(prefix) {
            Some(n) => n,
            None => return Vec::new(),
        };

        // Max-heap on "worseness": the top is the weakest retained candidate.
        let mut best: BinaryHeap<Candidate> = BinaryHeap::with_capacity(k.min(self.word_count));
        walk(start, prefix, |_, word, node| {
            if !node.terminal {
                return;
            }

            if best.len() < k {
                best.push(Candidate {
                    score: node.score,
                    word: word.to_string(),
                });
            } else if let Some(mut worst) = best.peek_mut() {
                // Ties never evict. The walk is alphabetical so the earlier word stays.
                if node.score.total_cmp(&worst.score).is_gt() {
                    *worst = Candidate {
                        score: node.score,
                        word: word.to_string(),
                    };
                }
            }
        });

        best.into_sorted_vec().into_iter().map(|c| c.word).collect()
    }

    /// Word count, height and node count. Height is a full traversal.
    pub fn stats(&self) -> Stats {
        let mut height = 0;
        walk(&self.root, "", |depth, _, _| height = height.max(depth));

        Stats {
            words: self.word_count,
            height,
            nodes: self.node_count,
        }
    }

    /// All stored (word, score) pairs in lexicographic order.
    pub fn items(&self) -> Vec<(String, f64)> {
        let mut out = Vec::with_capacity(self.word_count);
        walk(&self.root, "", |_, word, node| {
            if node.terminal {
                out.push((word.to_string(), node.score));
            }
        });
        out
    }

    fn trace(&self, text: &str) -> Option<&Node> {
        let mut node = &self.root;
        for ch in text.chars() {
            node = node.children.get(&ch)?;
        }
        Some(node)
    }

    fn node_mut(&mut self, path: &[char]) -> Option<&mut Node> {
        let mut node = &mut self.root;
        for ch in path {
            node = node.children.get_mut(ch)?;
        }
        Some(node)
    }
}

impl<S: AsRef<str>> Extend<(S, f64)> for Trie {
    fn extend<I: IntoIterator<Item = (S, f64)>>(&mut self, iter: I) {
        for (word, score) in iter {
            self.insert(word.as_ref(), score);
        }
    }
}

impl<S: AsRef<str>> FromIterator<(S, f64)> for Trie {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut trie = Trie::new();
        trie.extend(iter);
        trie
    }
}

/// Depth-first pre-order walk of the subtree under `start`, children in
/// ascending char order. `visit` gets the depth below `start`, the full word
/// spelled so far (starting with `prefix`) and the node.
fn walk<'a>(start: &'a Node, prefix: &str, mut visit: impl FnMut(usize, &str, &'a Node)) {
    let mut word = prefix.to_string();
    let mut stack = vec![start.children.iter()];
    visit(0, &word, start);

    while let Some(iter) = stack.last_mut() {
        match iter.next() {
            Some((&ch, child)) => {
                word.push(ch);
                visit(stack.len(), &word, child);
                stack.push(child.children.iter());
            }
            None => {
                stack.pop();
                // The start node's iterator has no edge char of its own.
                if !stack.is_empty() {
                    word.pop();
                }
            }
        }
    }
}

/// Completion candidate. Orders "better first": higher score, then smaller word.
#[derive(Debug)]
struct Candidate {
    score: f64,
    word: String,
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| self.word.cmp(&other.word))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}
