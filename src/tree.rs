//! Category Tree
//!
//! Arena over the flat category list: children by parent, memoised
//! descendant sets, expansion state and cycle-safe parent candidates.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use crate::models::Category;

/// Categories indexed by id, children grouped by parent
#[derive(Debug, Default)]
pub struct CategoryTree {
    nodes: Vec<Category>,
    index: HashMap<String, usize>,
    /// parent id (None = root) -> child node indexes, in name order
    children: HashMap<Option<String>, Vec<usize>>,
    descendants: RefCell<HashMap<String, HashSet<String>>>,
}

/// One rendered row
#[derive(Debug, Clone, PartialEq)]
pub struct TreeRow {
    pub category: Category,
    pub depth: usize,
    pub has_children: bool,
}

impl CategoryTree {
    pub fn new(categories: Vec<Category>) -> Self {
        let index: HashMap<String, usize> = categories
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id.clone(), i))
            .collect();

        let mut children: HashMap<Option<String>, Vec<usize>> = HashMap::new();
        for (i, category) in categories.iter().enumerate() {
            // Unknown or self parents are treated as roots so nothing is lost
            let parent = category
                .parent_id
                .clone()
                .filter(|p| index.contains_key(p) && *p != category.id);
            children.entry(parent).or_default().push(i);
        }
        for list in children.values_mut() {
            list.sort_by(|a, b| categories[*a].name.to_lowercase().cmp(&categories[*b].name.to_lowercase()));
        }

        Self {
            nodes: categories,
            index,
            children,
            descendants: RefCell::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Category> {
        self.index.get(id).map(|i| &self.nodes[*i])
    }

    pub fn all(&self) -> &[Category] {
        &self.nodes
    }

    pub fn roots(&self) -> Vec<&Category> {
        self.children_of(None)
    }

    pub fn children_of(&self, parent: Option<&str>) -> Vec<&Category> {
        self.children
            .get(&parent.map(str::to_string))
            .map(|list| list.iter().map(|i| &self.nodes[*i]).collect())
            .unwrap_or_default()
    }

    pub fn has_children(&self, id: &str) -> bool {
        self.children
            .get(&Some(id.to_string()))
            .map_or(false, |list| !list.is_empty())
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|c| c.id.as_str())
    }

    /// Every transitive descendant of `id` (not including `id`)
    pub fn descendants_of(&self, id: &str) -> HashSet<String> {
        if let Some(cached) = self.descendants.borrow().get(id) {
            return cached.clone();
        }

        let mut found = HashSet::new();
        let mut stack = vec![id.to_string()];
        while let Some(current) = stack.pop() {
            for child in self.children_of(Some(&current)) {
                // `insert` is false on malformed cyclic data; stop there
                if child.id != id && found.insert(child.id.clone()) {
                    stack.push(child.id.clone());
                }
            }
        }

        self.descendants.borrow_mut().insert(id.to_string(), found.clone());
        found
    }

    /// Valid parents for the node being edited: everything except the node
    /// itself and its descendants. `None` (adding) allows every node.
    pub fn parent_candidates(&self, editing: Option<&str>) -> Vec<&Category> {
        let excluded = match editing {
            Some(id) => {
                let mut set = self.descendants_of(id);
                set.insert(id.to_string());
                set
            }
            None => HashSet::new(),
        };
        self.visible_rows(&ExpandedSet::all(self))
            .into_iter()
            .filter(|row| !excluded.contains(&row.category.id))
            .filter_map(|row| self.get(&row.category.id))
            .collect()
    }

    /// Depth-first rows, descending only into expanded nodes
    pub fn visible_rows(&self, expanded: &ExpandedSet) -> Vec<TreeRow> {
        let mut rows = Vec::new();
        let mut visited = HashSet::new();
        self.collect(None, 0, expanded, &mut visited, &mut rows);
        rows
    }

    fn collect(
        &self,
        parent: Option<&str>,
        depth: usize,
        expanded: &ExpandedSet,
        visited: &mut HashSet<String>,
        rows: &mut Vec<TreeRow>,
    ) {
        for category in self.children_of(parent) {
            if !visited.insert(category.id.clone()) {
                continue;
            }
            let has_children = self.has_children(&category.id);
            rows.push(TreeRow { category: category.clone(), depth, has_children });
            if has_children && expanded.contains(&category.id) {
                self.collect(Some(&category.id), depth + 1, expanded, visited, rows);
            }
        }
    }

    /// Label with ancestors for parent `<select>` options: "Electronics / Phones"
    pub fn path_label(&self, id: &str) -> String {
        let mut parts = Vec::new();
        let mut seen = HashSet::new();
        let mut current = self.get(id);
        while let Some(category) = current {
            if !seen.insert(category.id.as_str()) {
                break;
            }
            parts.push(category.name.as_str());
            current = category.parent_id.as_deref().and_then(|p| self.get(p));
        }
        parts.reverse();
        parts.join(" / ")
    }
}

/// Ids of expanded nodes, toggled independently
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandedSet(HashSet<String>);

impl ExpandedSet {
    pub fn all(tree: &CategoryTree) -> Self {
        let mut set = Self::default();
        set.expand_all(tree);
        set
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    /// Returns the new state
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.0.remove(id) {
            false
        } else {
            self.0.insert(id.to_string());
            true
        }
    }

    pub fn expand_all(&mut self, tree: &CategoryTree) {
        self.0.extend(tree.ids().map(str::to_string));
    }

    pub fn collapse_all(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(id: &str, parent: Option<&str>) -> Category {
        Category {
            id: id.to_string(),
            name: format!("Cat {}", id),
            parent_id: parent.map(str::to_string),
            is_active: true,
            ..Default::default()
        }
    }

    fn sample() -> CategoryTree {
        CategoryTree::new(vec![
            cat("1", None),    // Root 1
            cat("2", None),    // Root 2
            cat("3", Some("1")),
            cat("4", Some("1")),
            cat("5", Some("3")), // grandchild of 1
        ])
    }

    fn ids(rows: &[TreeRow]) -> Vec<(&str, usize)> {
        rows.iter().map(|r| (r.category.id.as_str(), r.depth)).collect()
    }

    #[test]
    fn test_visible_rows_fully_expanded() {
        let tree = sample();
        let rows = tree.visible_rows(&ExpandedSet::all(&tree));
        assert_eq!(ids(&rows), vec![("1", 0), ("3", 1), ("5", 2), ("4", 1), ("2", 0)]);
        assert!(rows[0].has_children);
        assert!(!rows[4].has_children);
    }

    #[test]
    fn test_expand_collapse() {
        let tree = sample();
        let mut expanded = ExpandedSet::default();
        assert_eq!(ids(&tree.visible_rows(&expanded)), vec![("1", 0), ("2", 0)]);

        assert!(expanded.toggle("1"));
        assert_eq!(ids(&tree.visible_rows(&expanded)), vec![("1", 0), ("3", 1), ("4", 1), ("2", 0)]);

        expanded.expand_all(&tree);
        assert_eq!(expanded.len(), 5);
        assert!(!expanded.toggle("1"));
        assert_eq!(tree.visible_rows(&expanded).len(), 2);

        expanded.collapse_all();
        assert!(expanded.is_empty());
    }

    #[test]
    fn test_descendants() {
        let tree = sample();
        let d = tree.descendants_of("1");
        assert_eq!(d, ["3", "4", "5"].iter().map(|s| s.to_string()).collect());
        assert!(tree.descendants_of("5").is_empty());
        // memoised copy
        assert_eq!(tree.descendants_of("1"), d);
    }

    #[test]
    fn test_parent_candidates_exclude_self_and_descendants() {
        let tree = sample();
        let names: Vec<&str> = tree.parent_candidates(Some("1")).iter().map(|c| c.id.as_str()).collect();
        assert_eq!(names, vec!["2"]);

        let names: Vec<&str> = tree.parent_candidates(Some("3")).iter().map(|c| c.id.as_str()).collect();
        assert_eq!(names, vec!["1", "4", "2"]);

        assert_eq!(tree.parent_candidates(None).len(), 5);
    }

    #[test]
    fn test_cycle_prevention_on_deep_chain() {
        // 0 <- 1 <- 2 <- ... <- 199, plus a side branch under every 10th node
        let mut cats = vec![cat("n0", None)];
        for i in 1..200 {
            cats.push(cat(&format!("n{}", i), Some(&format!("n{}", i - 1))));
            if i % 10 == 0 {
                cats.push(cat(&format!("s{}", i), Some(&format!("n{}", i))));
            }
        }
        let tree = CategoryTree::new(cats);

        for editing in ["n0", "n50", "n150", "n199"] {
            let descendants = tree.descendants_of(editing);
            for candidate in tree.parent_candidates(Some(editing)) {
                assert_ne!(candidate.id, editing);
                assert!(!descendants.contains(&candidate.id), "{} offered for {}", candidate.id, editing);
            }
        }
        assert_eq!(tree.descendants_of("n0").len(), tree.len() - 1);
        assert!(tree.parent_candidates(Some("n0")).is_empty());
    }

    #[test]
    fn test_malformed_cycle_terminates() {
        // a -> b -> a: neither is a root, both are unreachable from the top
        let tree = CategoryTree::new(vec![cat("a", Some("b")), cat("b", Some("a")), cat("r", None)]);
        assert_eq!(tree.descendants_of("a"), ["b".to_string()].into_iter().collect());
        assert_eq!(ids(&tree.visible_rows(&ExpandedSet::all(&tree))), vec![("r", 0)]);
        assert_eq!(tree.path_label("a"), "Cat b / Cat a");
    }

    #[test]
    fn test_orphans_become_roots() {
        let tree = CategoryTree::new(vec![cat("x", Some("deleted")), cat("y", Some("y"))]);
        assert_eq!(tree.roots().len(), 2);
    }

    #[test]
    fn test_path_label() {
        let tree = sample();
        assert_eq!(tree.path_label("5"), "Cat 1 / Cat 3 / Cat 5");
        assert_eq!(tree.path_label("missing"), "");
    }
}
