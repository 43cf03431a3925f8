//! Term Tree - the ordered storage engine for facts.

use std::cmp::Ordering;

use super::matching::{contains_ignore_case, eq_ignore_case, is_partial_match};
use super::Fact;

/// A node owns one fact and its two subtrees.
#[derive(Debug)]
struct TreeNode {
    fact: Fact,
    left: Option<Box<TreeNode>>,
    right: Option<Box<TreeNode>>,
}

impl TreeNode {
    fn new(fact: Fact) -> Self {
        Self {
            fact,
            left: None,
            right: None,
        }
    }
}

/// What a [`TermTree::insert_or_update`] call did to the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// A new node was created for the term.
    Inserted,
    /// An existing node was merged; `score_raised` tells whether the incoming
    /// score replaced the stored one.
    Merged { score_raised: bool },
}

/// Unbalanced binary search tree of facts keyed by term.
///
/// Placement compares terms case-sensitively, while lookups treat terms as
/// equal ignoring case. See [`super::matching`] for why this matters.
#[derive(Debug, Default)]
pub struct TermTree {
    root: Option<Box<TreeNode>>,
    len: usize,
}

impl TermTree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new fact, or merge into the node holding exactly this term.
    ///
    /// Only a case-sensitive match merges. On merge the sentence is replaced
    /// and the score is kept at the maximum (see [`Fact::merge`]).
    ///
    /// `confidence_score` must be finite. A stored NaN compares false against
    /// everything, so the score of that term could never be raised again.
    pub fn insert_or_update(
        &mut self,
        term: impl Into<String>,
        sentence: impl Into<String>,
        confidence_score: f64,
    ) -> InsertOutcome {
        debug_assert!(
            confidence_score.is_finite(),
            "confidence score must be finite, got {confidence_score}"
        );
        let term = term.into();
        let sentence = sentence.into();

        let mut slot = &mut self.root;
        while let Some(node) = slot {
            match term.as_str().cmp(node.fact.term.as_str()) {
                Ordering::Less => slot = &mut node.left,
                Ordering::Greater => slot = &mut node.right,
                Ordering::Equal => {
                    let score_raised = node.fact.merge(sentence, confidence_score);
                    return InsertOutcome::Merged { score_raised };
                }
            }
        }

        *slot = Some(Box::new(TreeNode::new(Fact::new(
            term,
            sentence,
            confidence_score,
        ))));
        self.len += 1;
        InsertOutcome::Inserted
    }

    /// Insert or merge an owned fact.
    pub fn insert_fact(&mut self, fact: Fact) -> InsertOutcome {
        self.insert_or_update(fact.term, fact.sentence, fact.confidence_score)
    }

    /// Look up a term, ignoring case.
    ///
    /// Descent still follows case-sensitive order, so a stored term that only
    /// differs by case is found only if it lies on the search path.
    pub fn find(&self, term: &str) -> Option<&Fact> {
        let mut cursor = self.root.as_deref();
        while let Some(node) = cursor {
            if eq_ignore_case(&node.fact.term, term) {
                return Some(&node.fact);
            }
            cursor = match term.cmp(node.fact.term.as_str()) {
                Ordering::Less => node.left.as_deref(),
                _ => node.right.as_deref(),
            };
        }
        None
    }

    /// Look up the node placed under exactly this term (case-sensitive).
    pub fn get(&self, term: &str) -> Option<&Fact> {
        let mut cursor = self.root.as_deref();
        while let Some(node) = cursor {
            cursor = match term.cmp(node.fact.term.as_str()) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(&node.fact),
            };
        }
        None
    }

    /// Facts whose term contains `term` as a whitespace-delimited token.
    ///
    /// Scans the whole tree. Exact (case-insensitive) matches are excluded.
    /// Results come in pre-order: a node, then its left subtree, then its
    /// right subtree.
    pub fn find_similar(&self, term: &str) -> Vec<&Fact> {
        let mut results = Vec::new();
        let mut stack: Vec<&TreeNode> = self.root.as_deref().into_iter().collect();

        while let Some(node) = stack.pop() {
            if is_partial_match(&node.fact.term, term) {
                results.push(&node.fact);
            }
            if let Some(right) = node.right.as_deref() {
                stack.push(right);
            }
            if let Some(left) = node.left.as_deref() {
                stack.push(left);
            }
        }

        results
    }

    /// Look up a term and check that its sentence mentions `sentence`.
    ///
    /// The sentence check is a case-insensitive substring test, so callers can
    /// supply part of a statement.
    pub fn find_statement(&self, term: &str, sentence: &str) -> Option<&Fact> {
        self.find(term)
            .filter(|fact| contains_ignore_case(&fact.sentence, sentence))
    }

    /// Number of nodes (distinct placed terms).
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree has no facts.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of nodes on the longest root-to-leaf path. Zero when empty.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(&TreeNode, usize)> =
            self.root.as_deref().map(|root| (root, 1)).into_iter().collect();

        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            for child in [node.left.as_deref(), node.right.as_deref()].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }

        height
    }

    /// Iterate over all facts in ascending (case-sensitive) term order.
    pub fn iter(&self) -> Iter<'_> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left_spine(self.root.as_deref());
        iter
    }
}

impl Drop for TermTree {
    // Degenerate trees are as deep as they are long; unlink iteratively so the
    // default recursive drop cannot overflow the stack.
    fn drop(&mut self) {
        let mut pending: Vec<Box<TreeNode>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

impl Extend<Fact> for TermTree {
    fn extend<I: IntoIterator<Item = Fact>>(&mut self, iter: I) {
        for fact in iter {
            self.insert_fact(fact);
        }
    }
}

impl FromIterator<Fact> for TermTree {
    fn from_iter<I: IntoIterator<Item = Fact>>(iter: I) -> Self {
        let mut tree = TermTree::new();
        tree.extend(iter);
        tree
    }
}

impl<'a> IntoIterator for &'a TermTree {
    type Item = &'a Fact;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over a [`TermTree`].
pub struct Iter<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> Iter<'a> {
    fn push_left_spine(&mut self, mut node: Option<&'a TreeNode>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left.as_deref();
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Fact;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(&node.fact)
    }
}
