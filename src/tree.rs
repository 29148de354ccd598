//! Client-side model of the lazily expanded category/product table.
//!
//! Rows are fetched one level at a time. Expansion state lives in a single map
//! owned by [`HierarchyTree`], keyed by [`NodeKey`], and fetched children stay
//! cached across collapse/expand cycles.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::Serialize;

use crate::domain::category::CategoryNode;
use crate::domain::product::ProductNode;
use crate::domain::translation::{Language, Translation, resolve_text};
use crate::repository::CategoryReader;
use crate::services::ServiceError;
use crate::services::categories as category_service;

/// Identity of a tree row. Category and product ids live in separate spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKey {
    Category(i32),
    Product(i32),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RowState {
    Collapsed,
    Loading,
    Expanded,
    /// Last fetch failed; expanding again retries.
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    Category(CategoryNode),
    Product(ProductNode),
}

impl TreeNode {
    pub fn key(&self) -> NodeKey {
        match self {
            TreeNode::Category(node) => NodeKey::Category(node.id),
            TreeNode::Product(node) => NodeKey::Product(node.id),
        }
    }

    fn level(&self) -> i32 {
        match self {
            TreeNode::Category(node) => node.level,
            TreeNode::Product(node) => node.level,
        }
    }

    fn translations(&self) -> &[Translation] {
        match self {
            TreeNode::Category(node) => &node.translations,
            TreeNode::Product(node) => &node.translations,
        }
    }
}

/// What the caller must do after [`HierarchyTree::expand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandAction {
    /// Load subcategories and products of `category_id`, then call `complete`
    /// with the same `ticket`.
    Fetch {
        category_id: i32,
        level: i32,
        ticket: u64,
    },
    /// Children were already loaded; the row is now expanded.
    Cached,
    /// A fetch for this row is already in flight.
    Pending,
    /// Products, empty categories and unknown rows have nothing to show.
    NotExpandable,
}

/// Loaded children of one category: subcategories first, then products.
pub type Children = (Vec<CategoryNode>, Vec<ProductNode>);

/// One rendered row of the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisibleRow {
    pub key: NodeKey,
    pub depth: i32,
    pub label: String,
    pub description: Option<String>,
    pub brand_name: Option<String>,
    pub state: RowState,
    pub expandable: bool,
    pub deletable: bool,
    pub can_add_subcategory: bool,
    pub can_add_product: bool,
}

#[derive(Debug, Default)]
pub struct HierarchyTree {
    roots: Vec<CategoryNode>,
    categories: HashMap<i32, CategoryNode>,
    children: HashMap<i32, Vec<TreeNode>>,
    states: HashMap<NodeKey, RowState>,
    /// Ticket of the fetch each category is waiting on.
    in_flight: HashMap<i32, u64>,
    /// Invalidated categories whose cached counts may be out of date.
    stale: HashSet<i32>,
    next_ticket: u64,
}

impl HierarchyTree {
    pub fn new(roots: Vec<CategoryNode>) -> Self {
        let mut tree = Self::default();
        tree.replace_roots(roots);
        tree
    }

    /// Load the root level from `source`.
    pub fn load<S>(source: &S) -> Result<Self, S::Error>
    where
        S: HierarchySource + ?Sized,
    {
        Ok(Self::new(source.roots()?))
    }

    /// Swap in a fresh root level, dropping every cached subtree.
    pub fn replace_roots(&mut self, roots: Vec<CategoryNode>) {
        self.categories.clear();
        self.children.clear();
        self.states.clear();
        self.in_flight.clear();
        self.stale.clear();
        for root in &roots {
            self.categories.insert(root.id, root.clone());
        }
        self.roots = roots;
    }

    pub fn state(&self, key: NodeKey) -> RowState {
        self.states
            .get(&key)
            .cloned()
            .unwrap_or(RowState::Collapsed)
    }

    /// Cached children of a category, if they were ever loaded.
    pub fn children(&self, category_id: i32) -> Option<&[TreeNode]> {
        self.children.get(&category_id).map(Vec::as_slice)
    }

    pub fn expand(&mut self, key: NodeKey) -> ExpandAction {
        let NodeKey::Category(category_id) = key else {
            return ExpandAction::NotExpandable;
        };
        let Some(node) = self.categories.get(&category_id) else {
            return ExpandAction::NotExpandable;
        };
        if !has_children(node) && !self.stale.contains(&category_id) {
            return ExpandAction::NotExpandable;
        }
        let level = node.level;

        match self.state(key) {
            RowState::Loading => ExpandAction::Pending,
            RowState::Expanded => ExpandAction::Cached,
            RowState::Collapsed if self.children.contains_key(&category_id) => {
                self.states.insert(key, RowState::Expanded);
                ExpandAction::Cached
            }
            RowState::Collapsed | RowState::Error(_)
                if self.in_flight.contains_key(&category_id) =>
            {
                self.states.insert(key, RowState::Loading);
                ExpandAction::Pending
            }
            RowState::Collapsed | RowState::Error(_) => {
                self.next_ticket += 1;
                let ticket = self.next_ticket;
                self.in_flight.insert(category_id, ticket);
                self.states.insert(key, RowState::Loading);
                ExpandAction::Fetch {
                    category_id,
                    level,
                    ticket,
                }
            }
        }
    }

    /// Install the outcome of a fetch started by [`expand`](Self::expand).
    ///
    /// Returns `false` when the result is dropped: the ticket was superseded by
    /// an invalidation, or the row is no longer loading.
    pub fn complete(
        &mut self,
        key: NodeKey,
        ticket: u64,
        result: Result<Children, String>,
    ) -> bool {
        let NodeKey::Category(category_id) = key else {
            return false;
        };
        if self.in_flight.get(&category_id) != Some(&ticket) {
            log::debug!("Discarding stale fetch {ticket} for category {category_id}");
            return false;
        }
        self.in_flight.remove(&category_id);
        if self.state(key) != RowState::Loading {
            log::debug!("Discarding late children for category {category_id}");
            return false;
        }

        match result {
            Ok((subcategories, products)) => {
                self.stale.remove(&category_id);
                self.refresh_counts(category_id, subcategories.len(), products.len());
                let mut rows = Vec::with_capacity(subcategories.len() + products.len());
                for node in subcategories {
                    self.categories.insert(node.id, node.clone());
                    rows.push(TreeNode::Category(node));
                }
                rows.extend(products.into_iter().map(TreeNode::Product));
                self.children.insert(category_id, rows);
                self.states.insert(key, RowState::Expanded);
            }
            Err(message) => {
                self.states.insert(key, RowState::Error(message));
            }
        }
        true
    }

    /// Hide a row's children. The cache is kept; an in-flight fetch is abandoned.
    pub fn collapse(&mut self, key: NodeKey) {
        if self.states.contains_key(&key) {
            self.states.insert(key, RowState::Collapsed);
        }
    }

    /// Forget the cached children of a category after a write under it.
    ///
    /// The next expand refetches even if the category looked empty, and any
    /// fetch still in flight for it is ignored when it lands.
    pub fn invalidate(&mut self, category_id: i32) {
        self.children.remove(&category_id);
        self.states.remove(&NodeKey::Category(category_id));
        self.in_flight.remove(&category_id);
        if self.categories.contains_key(&category_id) {
            self.stale.insert(category_id);
        }
    }

    /// Store freshly fetched counts on every copy of a category node.
    fn refresh_counts(&mut self, category_id: i32, child_count: usize, product_count: usize) {
        let apply = |node: &mut CategoryNode| {
            node.child_count = child_count as i64;
            node.product_count = product_count as i64;
            node.is_end_category = child_count == 0;
        };

        let Some(node) = self.categories.get_mut(&category_id) else {
            return;
        };
        apply(node);
        let parent_id = node.parent_id;

        match parent_id {
            None => {
                if let Some(root) = self.roots.iter_mut().find(|root| root.id == category_id) {
                    apply(root);
                }
            }
            Some(parent_id) => {
                let siblings = self.children.get_mut(&parent_id).into_iter().flatten();
                for sibling in siblings {
                    match sibling {
                        TreeNode::Category(node) if node.id == category_id => apply(node),
                        _ => {}
                    }
                }
            }
        }
    }

    /// Run a full expand cycle against `source`, returning the resulting row state.
    pub fn expand_with<S>(&mut self, source: &S, key: NodeKey) -> RowState
    where
        S: HierarchySource + ?Sized,
    {
        if let ExpandAction::Fetch {
            category_id,
            level,
            ticket,
        } = self.expand(key)
        {
            let result = source
                .subcategories(category_id, level)
                .and_then(|subcategories| {
                    source
                        .leaf_products(category_id, level)
                        .map(|products| (subcategories, products))
                })
                .map_err(|err| err.to_string());
            self.complete(key, ticket, result);
        }
        self.state(key)
    }

    /// Depth-first list of rows currently on screen.
    ///
    /// `search` filters the root level only; loaded descendants of a matching
    /// root are shown as they are.
    pub fn visible_rows(&self, lang: Language, search: &str) -> Vec<VisibleRow> {
        let needle = search.trim().to_lowercase();
        let mut rows = Vec::new();

        for root in &self.roots {
            let row = self.category_row(root, lang);
            if !needle.is_empty() && !matches_search(&row, &needle) {
                continue;
            }
            let expanded = row.state == RowState::Expanded;
            rows.push(row);
            if expanded {
                self.push_children(root.id, lang, &mut rows);
            }
        }

        rows
    }

    fn push_children(&self, category_id: i32, lang: Language, rows: &mut Vec<VisibleRow>) {
        let Some(children) = self.children.get(&category_id) else {
            return;
        };
        for child in children {
            match child {
                TreeNode::Category(node) => {
                    let row = self.category_row(node, lang);
                    let expanded = row.state == RowState::Expanded;
                    rows.push(row);
                    if expanded {
                        self.push_children(node.id, lang, rows);
                    }
                }
                TreeNode::Product(_) => rows.push(product_row(child, lang)),
            }
        }
    }

    fn category_row(&self, node: &CategoryNode, lang: Language) -> VisibleRow {
        let key = NodeKey::Category(node.id);
        let text = resolve_text(&node.translations, lang);
        VisibleRow {
            key,
            depth: node.level,
            label: text.name.to_string(),
            description: text.description.map(str::to_string),
            brand_name: (!node.brand_name.is_empty()).then(|| node.brand_name.clone()),
            state: self.state(key),
            expandable: has_children(node) || self.stale.contains(&node.id),
            deletable: node.is_deletable(),
            can_add_subcategory: node.product_count == 0,
            can_add_product: node.is_end_category,
        }
    }
}

fn has_children(node: &CategoryNode) -> bool {
    node.child_count > 0 || node.product_count > 0
}

fn product_row(node: &TreeNode, lang: Language) -> VisibleRow {
    let text = resolve_text(node.translations(), lang);
    VisibleRow {
        key: node.key(),
        depth: node.level(),
        label: text.name.to_string(),
        description: text.description.map(str::to_string),
        brand_name: None,
        state: RowState::Collapsed,
        expandable: false,
        deletable: true,
        can_add_subcategory: false,
        can_add_product: false,
    }
}

fn matches_search(row: &VisibleRow, needle: &str) -> bool {
    let contains = |text: &str| text.to_lowercase().contains(needle);
    contains(row.label.as_str())
        || row.description.as_deref().is_some_and(contains)
        || row.brand_name.as_deref().is_some_and(contains)
}

/// Where the tree gets its rows from.
pub trait HierarchySource {
    type Error: fmt::Display;

    fn roots(&self) -> Result<Vec<CategoryNode>, Self::Error>;
    /// Subcategories of `parent_id`; `level` is the parent's level.
    fn subcategories(&self, parent_id: i32, level: i32) -> Result<Vec<CategoryNode>, Self::Error>;
    fn leaf_products(&self, category_id: i32, level: i32) -> Result<Vec<ProductNode>, Self::Error>;
}

/// Feeds the tree straight from the category service layer.
pub struct ServiceSource<'a, R: ?Sized> {
    repo: &'a R,
}

impl<'a, R: ?Sized> ServiceSource<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }
}

impl<R> HierarchySource for ServiceSource<'_, R>
where
    R: CategoryReader + ?Sized,
{
    type Error = ServiceError;

    fn roots(&self) -> Result<Vec<CategoryNode>, ServiceError> {
        category_service::get_root_categories(self.repo)
    }

    fn subcategories(&self, parent_id: i32, level: i32) -> Result<Vec<CategoryNode>, ServiceError> {
        category_service::get_subcategories(self.repo, parent_id, level)
    }

    fn leaf_products(&self, category_id: i32, level: i32) -> Result<Vec<ProductNode>, ServiceError> {
        category_service::get_products_by_category_id(self.repo, category_id, level)
    }
}
