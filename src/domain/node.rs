//! Localization tree: strings, categories and arrays
//!
//! Every tree operation lives here: path resolution, typed lookups, additions,
//! in-place updates, structural merging and shape equivalence.

use std::collections::BTreeMap;
use std::fmt;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::path::LocalizationPath;

/// Variant tag of a [`LocalizationNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    String,
    Category,
    Array,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::String => "string",
            NodeKind::Category => "category",
            NodeKind::Array => "array",
        };
        f.write_str(name)
    }
}

/// Result of adding a string or category under a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new child was inserted.
    Added,
    /// The target name was already taken; the tree is unchanged.
    AlreadyExisted,
    /// The parent path resolved to something that is not a category.
    InvalidTarget,
}

impl AddOutcome {
    pub fn is_added(self) -> bool {
        self == AddOutcome::Added
    }

    /// Added or already there: the name is usable afterwards.
    pub fn is_satisfied(self) -> bool {
        matches!(self, AddOutcome::Added | AddOutcome::AlreadyExisted)
    }
}

/// A node of a localization tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalizationNode {
    String(String),
    Category(BTreeMap<String, LocalizationNode>),
    Array(Vec<String>),
}

impl Default for LocalizationNode {
    fn default() -> Self {
        Self::empty_category()
    }
}

impl LocalizationNode {
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    pub fn empty_category() -> Self {
        Self::Category(BTreeMap::new())
    }

    pub fn category<I, K>(children: I) -> Self
    where
        I: IntoIterator<Item = (K, LocalizationNode)>,
        K: Into<String>,
    {
        Self::Category(
            children
                .into_iter()
                .map(|(name, child)| (name.into(), child))
                .collect(),
        )
    }

    pub fn array<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Array(items.into_iter().map(Into::into).collect())
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Self::String(_) => NodeKind::String,
            Self::Category(_) => NodeKind::Category,
            Self::Array(_) => NodeKind::Array,
        }
    }

    fn mismatch(&self, expected: NodeKind) -> DomainError {
        DomainError::TypeMismatch {
            expected,
            actual: self.kind(),
        }
    }

    pub fn as_str(&self) -> DomainResult<&str> {
        match self {
            Self::String(value) => Ok(value),
            other => Err(other.mismatch(NodeKind::String)),
        }
    }

    pub fn as_array(&self) -> DomainResult<&[String]> {
        match self {
            Self::Array(items) => Ok(items),
            other => Err(other.mismatch(NodeKind::Array)),
        }
    }

    pub fn as_category(&self) -> DomainResult<&BTreeMap<String, LocalizationNode>> {
        match self {
            Self::Category(children) => Ok(children),
            other => Err(other.mismatch(NodeKind::Category)),
        }
    }

    pub fn as_category_mut(&mut self) -> DomainResult<&mut BTreeMap<String, LocalizationNode>> {
        match self {
            Self::Category(children) => Ok(children),
            other => Err(other.mismatch(NodeKind::Category)),
        }
    }

    // ---------------------------------------------------------------
    // Traversal
    // ---------------------------------------------------------------

    fn walk(&self, segments: &[String]) -> Option<&Self> {
        let mut node = self;
        for segment in segments {
            node = match node {
                Self::Category(children) => children.get(segment)?,
                _ => return None,
            };
        }
        Some(node)
    }

    fn walk_mut(&mut self, segments: &[String]) -> Option<&mut Self> {
        let mut node = self;
        for segment in segments {
            node = match node {
                Self::Category(children) => children.get_mut(segment)?,
                _ => return None,
            };
        }
        Some(node)
    }

    /// Classify why `path` does not resolve.
    fn missing(&self, path: &LocalizationPath) -> DomainError {
        let mut node = self;
        for segment in path.segments() {
            match node {
                Self::Category(children) => match children.get(segment) {
                    Some(child) => node = child,
                    None => break,
                },
                other => return other.mismatch(NodeKind::Category),
            }
        }
        DomainError::PathNotFound(path.to_string())
    }

    /// Whether `path` addresses an existing node. The empty path always does.
    pub fn exists(&self, path: &LocalizationPath) -> bool {
        self.walk(path.segments()).is_some()
    }

    /// Node addressed by `path`.
    ///
    /// Existence is decided once up front; a missing key yields `PathNotFound`
    /// and descending through a non-category yields `TypeMismatch`.
    pub fn resolve(&self, path: &LocalizationPath) -> DomainResult<&Self> {
        if !self.exists(path) {
            return Err(self.missing(path));
        }
        self.walk(path.segments())
            .ok_or_else(|| DomainError::PathNotFound(path.to_string()))
    }

    pub fn resolve_mut(&mut self, path: &LocalizationPath) -> DomainResult<&mut Self> {
        if !self.exists(path) {
            return Err(self.missing(path));
        }
        self.walk_mut(path.segments())
            .ok_or_else(|| DomainError::PathNotFound(path.to_string()))
    }

    pub fn get_string(&self, path: &LocalizationPath) -> DomainResult<&str> {
        self.resolve(path)?.as_str()
    }

    pub fn get_array(&self, path: &LocalizationPath) -> DomainResult<&[String]> {
        self.resolve(path)?.as_array()
    }

    pub fn get_array_element(&self, path: &LocalizationPath, index: usize) -> DomainResult<&str> {
        let items = self.get_array(path)?;
        items
            .get(index)
            .map(String::as_str)
            .ok_or(DomainError::IndexOutOfRange {
                index,
                len: items.len(),
            })
    }

    // ---------------------------------------------------------------
    // Mutation
    // ---------------------------------------------------------------

    fn add_child(
        &mut self,
        category_path: &LocalizationPath,
        name: &str,
        child: LocalizationNode,
    ) -> DomainResult<AddOutcome> {
        let target = category_path.join(name)?;
        if self.exists(&target) {
            return Ok(AddOutcome::AlreadyExisted);
        }

        let Self::Category(children) = self.resolve_mut(category_path)? else {
            return Ok(AddOutcome::InvalidTarget);
        };
        if children.contains_key(name) {
            return Ok(AddOutcome::AlreadyExisted);
        }
        children.insert(name.to_string(), child);
        Ok(AddOutcome::Added)
    }

    /// Add a string `name` under the category at `category_path`.
    pub fn add_string(
        &mut self,
        category_path: &LocalizationPath,
        name: &str,
        value: impl Into<String>,
    ) -> DomainResult<AddOutcome> {
        self.add_child(category_path, name, Self::string(value))
    }

    /// Add an empty category `name` under the category at `category_path`.
    pub fn add_category(
        &mut self,
        category_path: &LocalizationPath,
        name: &str,
    ) -> DomainResult<AddOutcome> {
        self.add_child(category_path, name, Self::empty_category())
    }

    /// Replace the value of an existing string.
    pub fn set_string(&mut self, path: &LocalizationPath, value: impl Into<String>) -> DomainResult<()> {
        let (name, parent) = path.clone().split_last()?;
        if !self.exists(path) {
            return Err(self.missing(path));
        }

        let children = self.resolve_mut(&parent)?.as_category_mut()?;
        match children.get_mut(&name) {
            Some(Self::String(current)) => {
                *current = value.into();
                Ok(())
            }
            Some(other) => Err(other.mismatch(NodeKind::String)),
            None => Err(DomainError::PathNotFound(path.to_string())),
        }
    }

    /// Get the string at `path`, adding it with `init_value` first if absent.
    ///
    /// Only the last segment is created; the parent category must already
    /// exist. Returns the value and whether a new entry was created.
    pub fn get_string_init(
        &mut self,
        path: &LocalizationPath,
        init_value: &str,
    ) -> DomainResult<(String, bool)> {
        let mut created = false;
        if !self.exists(path) {
            let (name, parent) = path.clone().split_last()?;
            created = self.add_string(&parent, &name, init_value)?.is_added();
        }
        let value = self.get_string(path)?.to_string();
        Ok((value, created))
    }

    // ---------------------------------------------------------------
    // Merging and equivalence
    // ---------------------------------------------------------------

    /// Fresh node shaped like `self`, carrying either its values or
    /// `default_value`. Categories come out empty.
    fn seeded(&self, use_source_values: bool, default_value: &str) -> Self {
        match self {
            Self::Category(_) => Self::empty_category(),
            Self::String(value) if use_source_values => Self::String(value.clone()),
            Self::String(_) => Self::string(default_value),
            Self::Array(items) if use_source_values => Self::Array(items.clone()),
            Self::Array(items) => Self::Array(vec![default_value.to_string(); items.len()]),
        }
    }

    /// Add every child of `source` that `self` lacks, recursively.
    ///
    /// Both nodes must be categories. Existing children keep their values;
    /// a child whose variant differs between the two trees is left alone.
    pub fn add_missing_nodes(
        &mut self,
        source: &Self,
        use_source_values: bool,
        default_value: &str,
    ) -> DomainResult<()> {
        let children = self.as_category_mut()?;
        let source_children = source.as_category()?;

        for (name, source_child) in source_children {
            let child = children
                .entry(name.clone())
                .or_insert_with(|| source_child.seeded(use_source_values, default_value));

            if matches!((&*child, source_child), (Self::Category(_), Self::Category(_))) {
                child.add_missing_nodes(source_child, use_source_values, default_value)?;
            }
        }
        Ok(())
    }

    /// Make `self` and `other` structural supersets of each other.
    pub fn merge_nodes(
        &mut self,
        other: &mut Self,
        use_source_values: bool,
        default_value: &str,
    ) -> DomainResult<()> {
        self.add_missing_nodes(other, use_source_values, default_value)?;
        other.add_missing_nodes(self, use_source_values, default_value)
    }

    /// Same keys at every level with the same variants; leaf values ignored.
    pub fn is_equivalent_to(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Category(left), Self::Category(right)) => {
                left.len() == right.len()
                    && left.iter().all(|(name, child)| {
                        right
                            .get(name)
                            .is_some_and(|counterpart| child.is_equivalent_to(counterpart))
                    })
            }
            (left, right) => left.kind() == right.kind(),
        }
    }
}
