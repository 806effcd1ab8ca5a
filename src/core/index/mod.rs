//! Ordered course index: an unbalanced binary search tree keyed by course number.
//!
//! Every node exclusively owns its two subtrees. The left subtree holds keys that
//! compare strictly less than the node's key; the right subtree holds keys that
//! compare greater than *or equal to* it. Both [`CourseIndex::insert`] and
//! [`CourseIndex::search`] branch left on `<` and right otherwise, so inserting a
//! course number twice places the second record below the first on the right,
//! and lookups keep returning the first one.
//!
//! The tree is never rebalanced. Its shape depends only on insertion order, and
//! sorted input produces a list-shaped tree of height `len()`. None of the
//! operations recurse, so a degenerate tree cannot overflow the stack.

mod iter;

pub use iter::Iter;

use super::models::Course;
use std::fmt;

type Link = Option<Box<Node>>;

struct Node {
    course: Course,
    left: Link,
    right: Link,
}

impl Node {
    const fn new(course: Course) -> Self {
        Self {
            course,
            left: None,
            right: None,
        }
    }
}

/// Binary search tree mapping course number to [`Course`]
#[derive(Default)]
pub struct CourseIndex {
    root: Link,
    len: usize,
}

impl CourseIndex {
    /// Create an empty index
    #[must_use]
    pub const fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Number of records stored, duplicates included
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the index has no root yet
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Insert a course unconditionally
    ///
    /// No uniqueness check is made. A record whose number is already present is
    /// placed in the right subtree of the existing one and is shadowed by it for
    /// lookups.
    pub fn insert(&mut self, course: Course) {
        let mut link = &mut self.root;
        while let Some(node) = link {
            link = if course.number < node.course.number {
                &mut node.left
            } else {
                &mut node.right
            };
        }
        *link = Some(Box::new(Node::new(course)));
        self.len += 1;
    }

    /// Look up a course by exact, case-sensitive course number
    ///
    /// # Returns
    /// The first record with a matching number on the path from the root, or
    /// `None` if no record matches
    #[must_use]
    pub fn search(&self, number: &str) -> Option<&Course> {
        let mut link = self.root.as_deref();
        while let Some(node) = link {
            let key = node.course.number.as_str();
            if number == key {
                return Some(&node.course);
            }
            link = if number < key {
                node.left.as_deref()
            } else {
                node.right.as_deref()
            };
        }
        None
    }

    /// Look up a course, returning an owned copy or the empty record on a miss
    ///
    /// Callers check [`Course::is_empty`] to detect a miss.
    #[must_use]
    pub fn search_or_empty(&self, number: &str) -> Course {
        self.search(number).cloned().unwrap_or_default()
    }

    /// Whether a course with this number is present
    #[must_use]
    pub fn contains(&self, number: &str) -> bool {
        self.search(number).is_some()
    }

    /// Iterate over all records in ascending course-number order
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self.root.as_deref(), self.len)
    }

    /// Number of nodes on the longest root-to-leaf path (0 when empty)
    #[must_use]
    pub fn height(&self) -> usize {
        let mut deepest = 0;
        let mut pending: Vec<(&Node, usize)> =
            self.root.as_deref().map(|n| (n, 1)).into_iter().collect();
        while let Some((node, depth)) = pending.pop() {
            deepest = deepest.max(depth);
            pending.extend(node.left.as_deref().map(|n| (n, depth + 1)));
            pending.extend(node.right.as_deref().map(|n| (n, depth + 1)));
        }
        deepest
    }

    /// Records in pre-order. Re-inserting them in this order rebuilds the same shape.
    fn preorder(&self) -> Vec<&Course> {
        let mut out = Vec::with_capacity(self.len);
        let mut pending: Vec<&Node> = self.root.as_deref().into_iter().collect();
        while let Some(node) = pending.pop() {
            out.push(&node.course);
            pending.extend(node.right.as_deref());
            pending.extend(node.left.as_deref());
        }
        out
    }
}

impl Clone for CourseIndex {
    fn clone(&self) -> Self {
        self.preorder().into_iter().cloned().collect()
    }
}

impl Drop for CourseIndex {
    /// Release nodes children-first without recursing.
    fn drop(&mut self) {
        let mut pending: Vec<Box<Node>> = self.root.take().into_iter().collect();
        let mut detached = Vec::with_capacity(self.len);
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
            detached.push(node);
        }
        // detached is in root-right-left order, so popping yields post-order
        while let Some(node) = detached.pop() {
            drop(node);
        }
        self.len = 0;
    }
}

impl fmt::Debug for CourseIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CourseIndex")
            .field("len", &self.len)
            .field("courses", &self.iter().map(|c| &c.number).collect::<Vec<_>>())
            .finish()
    }
}

impl<'a> IntoIterator for &'a CourseIndex {
    type Item = &'a Course;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Extend<Course> for CourseIndex {
    fn extend<T: IntoIterator<Item = Course>>(&mut self, iter: T) {
        for course in iter {
            self.insert(course);
        }
    }
}

impl FromIterator<Course> for CourseIndex {
    fn from_iter<T: IntoIterator<Item = Course>>(iter: T) -> Self {
        let mut index = Self::new();
        index.extend(iter);
        index
    }
}
