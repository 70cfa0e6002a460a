//! Localizator service
//!
//! Maps `(logical path, localization id)` onto loaded localization trees:
//! applies the path prefix and single-file addressing, loads and caches trees
//! through the configured reader, and writes changed trees back through the
//! configured writer.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::application::codec;
use crate::application::settings::LocalizatorSettings;
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{AddOutcome, DomainResult, LocalizationNode, LocalizationPath};
use crate::infrastructure::traits::{LocalizationReader, LocalizationWriter};

/// Localization used until [`Localizator::set_localization`] is called.
pub const DEFAULT_LOCALIZATION: &str = "default";

/// Name/value pair for [`Localizator::add_strings`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringEntry {
    pub name: String,
    pub value: String,
}

impl StringEntry {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Cache key: the physical resource a tree was loaded from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum ResourceKey {
    /// The one resource holding every localization (single-file mode).
    Shared,
    Localization(String),
}

/// Path-addressed access to localization trees.
pub struct Localizator {
    settings: LocalizatorSettings,
    current_localization: String,
    cache: HashMap<ResourceKey, LocalizationNode>,
}

impl Localizator {
    pub fn new(settings: LocalizatorSettings) -> Self {
        debug!("new: {:?}", settings);
        Self {
            settings,
            current_localization: DEFAULT_LOCALIZATION.to_string(),
            cache: HashMap::new(),
        }
    }

    /// Read-only localizator.
    pub fn with_reader(reader: impl LocalizationReader + 'static) -> Self {
        Self::new(LocalizatorSettings::new().with_reader(reader))
    }

    /// Write-only localizator.
    pub fn with_writer(writer: impl LocalizationWriter + 'static) -> Self {
        Self::new(LocalizatorSettings::new().with_writer(writer))
    }

    pub fn settings(&self) -> &LocalizatorSettings {
        &self.settings
    }

    pub fn current_localization(&self) -> &str {
        &self.current_localization
    }

    pub fn set_localization(&mut self, localization: impl Into<String>) -> &mut Self {
        self.current_localization = localization.into();
        self
    }

    // ---------------------------------------------------------------
    // Addressing
    // ---------------------------------------------------------------

    /// Path of the localization's own sub-root inside its loaded tree.
    fn localization_root(&self, localization: &str) -> DomainResult<LocalizationPath> {
        if self.settings.use_single_file {
            LocalizationPath::empty().join(localization)
        } else {
            Ok(LocalizationPath::empty())
        }
    }

    /// Apply the path prefix and, in single-file mode, the localization segment.
    pub fn resolve_physical_path(
        &self,
        logical_path: &str,
        localization: &str,
    ) -> DomainResult<LocalizationPath> {
        let mut path = LocalizationPath::new(logical_path)?;
        if !self.settings.path_prefix.is_empty() {
            path = LocalizationPath::combine([self.settings.path_prefix.as_str(), logical_path])?;
        }
        Ok(self.localization_root(localization)?.concat(&path))
    }

    fn resource_key(&self, localization: &str) -> ResourceKey {
        if self.settings.use_single_file {
            ResourceKey::Shared
        } else {
            ResourceKey::Localization(localization.to_string())
        }
    }

    // ---------------------------------------------------------------
    // Loading and persisting
    // ---------------------------------------------------------------

    fn check_readable(&self, localization: &str) -> ApplicationResult<()> {
        let reader = self
            .settings
            .reader
            .as_ref()
            .ok_or(ApplicationError::CannotRead)?;
        if !reader.can_read(localization) {
            return Err(ApplicationError::CannotReadLocalization(
                localization.to_string(),
            ));
        }
        Ok(())
    }

    /// Read and decode without consulting the cache.
    fn read_tree(&self, localization: &str) -> ApplicationResult<LocalizationNode> {
        let reader = self
            .settings
            .reader
            .as_ref()
            .ok_or(ApplicationError::CannotRead)?;
        let text = reader
            .read(localization)
            .with_localization_context("read", localization)?;
        let tree = codec::decode(&text)?;
        tree.as_category()?;
        debug!("read_tree: loaded localization {}", localization);
        Ok(tree)
    }

    /// Move the tree out of the cache (or load it). Pair with `restore_tree`.
    fn take_tree(&mut self, localization: &str) -> ApplicationResult<LocalizationNode> {
        self.check_readable(localization)?;
        if self.settings.enable_caching {
            let key = self.resource_key(localization);
            if let Some(tree) = self.cache.remove(&key) {
                return Ok(tree);
            }
        }
        self.read_tree(localization)
    }

    fn restore_tree(&mut self, localization: &str, tree: LocalizationNode) {
        if self.settings.enable_caching {
            let key = self.resource_key(localization);
            self.cache.insert(key, tree);
        }
    }

    fn with_tree<R>(
        &mut self,
        localization: &str,
        op: impl FnOnce(&mut LocalizationNode) -> ApplicationResult<R>,
    ) -> ApplicationResult<R> {
        let mut tree = self.take_tree(localization)?;
        let result = op(&mut tree);
        self.restore_tree(localization, tree);
        result
    }

    /// Run a mutation; the returned flag says whether the tree changed and
    /// must be written back.
    fn mutate_tree<R>(
        &mut self,
        localization: &str,
        op: impl FnOnce(&mut LocalizationNode) -> ApplicationResult<(R, bool)>,
    ) -> ApplicationResult<R> {
        let mut tree = self.take_tree(localization)?;
        let result = match op(&mut tree) {
            Ok((value, true)) => self.persist(localization, &tree).map(|()| value),
            Ok((value, false)) => Ok(value),
            Err(e) => Err(e),
        };
        self.restore_tree(localization, tree);
        result
    }

    fn persist(&self, localization: &str, tree: &LocalizationNode) -> ApplicationResult<()> {
        match self.settings.writer.as_deref() {
            Some(writer) => Self::write_tree(writer, localization, tree),
            None => {
                debug!("persist: no writer configured, {} stays in memory", localization);
                Ok(())
            }
        }
    }

    fn write_tree(
        writer: &dyn LocalizationWriter,
        localization: &str,
        tree: &LocalizationNode,
    ) -> ApplicationResult<()> {
        if !writer.can_write(localization) {
            return Err(ApplicationError::CannotWriteLocalization(
                localization.to_string(),
            ));
        }
        let text = codec::encode(tree)?;
        writer
            .write(localization, &text)
            .with_localization_context("write", localization)?;
        debug!("write_tree: persisted localization {}", localization);
        Ok(())
    }

    /// Drop the cached tree for `localization` and read it again.
    ///
    /// In single-file mode every localization shares one cached tree, so this
    /// refreshes all of them.
    pub fn reload(&mut self, localization: &str) -> ApplicationResult<()> {
        self.check_readable(localization)?;
        let tree = self.read_tree(localization)?;
        if self.settings.enable_caching {
            let key = self.resource_key(localization);
            self.cache.insert(key, tree);
        }
        info!("reload: {}", localization);
        Ok(())
    }

    /// Whether a tree for `localization` is currently cached.
    pub fn is_cached(&self, localization: &str) -> bool {
        self.cache.contains_key(&self.resource_key(localization))
    }

    /// Copy of the localization's sub-root.
    pub fn tree_for(&mut self, localization: &str) -> ApplicationResult<LocalizationNode> {
        let root = self.localization_root(localization)?;
        self.with_tree(localization, |tree| Ok(tree.resolve(&root)?.clone()))
    }

    // ---------------------------------------------------------------
    // Reads
    // ---------------------------------------------------------------

    pub fn contains(&mut self, path: &str) -> ApplicationResult<bool> {
        let localization = self.current_localization.clone();
        self.contains_for(&localization, path)
    }

    /// Whether `path` exists. Syntactically invalid paths do not.
    pub fn contains_for(&mut self, localization: &str, path: &str) -> ApplicationResult<bool> {
        let Ok(physical) = self.resolve_physical_path(path, localization) else {
            return Ok(false);
        };
        self.with_tree(localization, |tree| Ok(tree.exists(&physical)))
    }

    pub fn get_string(&mut self, path: &str) -> ApplicationResult<String> {
        let localization = self.current_localization.clone();
        self.get_string_for(&localization, path)
    }

    pub fn get_string_for(&mut self, localization: &str, path: &str) -> ApplicationResult<String> {
        let physical = self.resolve_physical_path(path, localization)?;
        self.with_tree(localization, |tree| {
            Ok(tree.get_string(&physical)?.to_string())
        })
    }

    pub fn get_string_or(&mut self, path: &str, fallback: &str) -> String {
        let localization = self.current_localization.clone();
        self.get_string_or_for(&localization, path, fallback)
    }

    /// Like [`get_string_for`](Self::get_string_for), but any failure yields `fallback`.
    pub fn get_string_or_for(&mut self, localization: &str, path: &str, fallback: &str) -> String {
        match self.get_string_for(localization, path) {
            Ok(value) => value,
            Err(e) => {
                warn!("get_string_or: {} in {}: {}", path, localization, e);
                fallback.to_string()
            }
        }
    }

    pub fn get_formatted(&mut self, path: &str, args: &[(&str, &str)]) -> ApplicationResult<String> {
        let localization = self.current_localization.clone();
        self.get_formatted_for(&localization, path, args)
    }

    /// Look up a string and replace `{name}` placeholders from `args`.
    ///
    /// Unknown placeholders and unclosed braces are kept verbatim.
    pub fn get_formatted_for(
        &mut self,
        localization: &str,
        path: &str,
        args: &[(&str, &str)],
    ) -> ApplicationResult<String> {
        let template = self.get_string_for(localization, path)?;
        Ok(interpolate(&template, args))
    }

    pub fn get_array(&mut self, path: &str) -> ApplicationResult<Vec<String>> {
        let localization = self.current_localization.clone();
        self.get_array_for(&localization, path)
    }

    pub fn get_array_for(&mut self, localization: &str, path: &str) -> ApplicationResult<Vec<String>> {
        let physical = self.resolve_physical_path(path, localization)?;
        self.with_tree(localization, |tree| Ok(tree.get_array(&physical)?.to_vec()))
    }

    pub fn get_array_element(&mut self, path: &str, index: usize) -> ApplicationResult<String> {
        let localization = self.current_localization.clone();
        self.get_array_element_for(&localization, path, index)
    }

    pub fn get_array_element_for(
        &mut self,
        localization: &str,
        path: &str,
        index: usize,
    ) -> ApplicationResult<String> {
        let physical = self.resolve_physical_path(path, localization)?;
        self.with_tree(localization, |tree| {
            Ok(tree.get_array_element(&physical, index)?.to_string())
        })
    }

    // ---------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------

    pub fn get_string_init(&mut self, path: &str, init_value: &str) -> ApplicationResult<String> {
        let localization = self.current_localization.clone();
        self.get_string_init_for(&localization, path, init_value)
    }

    /// Get the string at `path`, creating it with `init_value` if it is missing.
    pub fn get_string_init_for(
        &mut self,
        localization: &str,
        path: &str,
        init_value: &str,
    ) -> ApplicationResult<String> {
        let physical = self.resolve_physical_path(path, localization)?;
        self.mutate_tree(localization, |tree| {
            let (value, created) = tree.get_string_init(&physical, init_value)?;
            if created {
                debug!("get_string_init: created {} in {}", physical, localization);
            }
            Ok((value, created))
        })
    }

    pub fn set_string(&mut self, path: &str, value: &str) -> ApplicationResult<()> {
        let localization = self.current_localization.clone();
        self.set_string_for(&localization, path, value)
    }

    /// Replace the value of an existing string.
    pub fn set_string_for(&mut self, localization: &str, path: &str, value: &str) -> ApplicationResult<()> {
        let physical = self.resolve_physical_path(path, localization)?;
        self.mutate_tree(localization, |tree| {
            tree.set_string(&physical, value)?;
            Ok(((), true))
        })
    }

    pub fn add_string(&mut self, category_path: &str, name: &str, value: &str) -> ApplicationResult<AddOutcome> {
        let localization = self.current_localization.clone();
        self.add_string_for(&localization, category_path, name, value)
    }

    pub fn add_string_for(
        &mut self,
        localization: &str,
        category_path: &str,
        name: &str,
        value: &str,
    ) -> ApplicationResult<AddOutcome> {
        let physical = self.resolve_physical_path(category_path, localization)?;
        self.mutate_tree(localization, |tree| {
            let outcome = tree.add_string(&physical, name, value)?;
            Ok((outcome, outcome.is_added()))
        })
    }

    pub fn add_category(&mut self, category_path: &str, name: &str) -> ApplicationResult<AddOutcome> {
        let localization = self.current_localization.clone();
        self.add_category_for(&localization, category_path, name)
    }

    pub fn add_category_for(
        &mut self,
        localization: &str,
        category_path: &str,
        name: &str,
    ) -> ApplicationResult<AddOutcome> {
        let physical = self.resolve_physical_path(category_path, localization)?;
        self.mutate_tree(localization, |tree| {
            let outcome = tree.add_category(&physical, name)?;
            Ok((outcome, outcome.is_added()))
        })
    }

    pub fn add_strings(&mut self, category_path: &str, entries: &[StringEntry]) -> ApplicationResult<bool> {
        let localization = self.current_localization.clone();
        self.add_strings_for(&localization, category_path, entries)
    }

    /// Add several strings under one category, persisting once.
    ///
    /// Returns `true` when every entry was added or already existed.
    pub fn add_strings_for(
        &mut self,
        localization: &str,
        category_path: &str,
        entries: &[StringEntry],
    ) -> ApplicationResult<bool> {
        let physical = self.resolve_physical_path(category_path, localization)?;
        self.mutate_tree(localization, |tree| {
            let mut satisfied = true;
            let mut created = false;
            for entry in entries {
                let outcome = tree.add_string(&physical, &entry.name, entry.value.as_str())?;
                created |= outcome.is_added();
                satisfied &= outcome.is_satisfied();
            }
            Ok((satisfied, created))
        })
    }

    pub fn add_categories<S: AsRef<str>>(&mut self, category_path: &str, names: &[S]) -> ApplicationResult<bool> {
        let localization = self.current_localization.clone();
        self.add_categories_for(&localization, category_path, names)
    }

    /// Add several empty categories under one category, persisting once.
    pub fn add_categories_for<S: AsRef<str>>(
        &mut self,
        localization: &str,
        category_path: &str,
        names: &[S],
    ) -> ApplicationResult<bool> {
        let physical = self.resolve_physical_path(category_path, localization)?;
        self.mutate_tree(localization, |tree| {
            let mut satisfied = true;
            let mut created = false;
            for name in names {
                let outcome = tree.add_category(&physical, name.as_ref())?;
                created |= outcome.is_added();
                satisfied &= outcome.is_satisfied();
            }
            Ok((satisfied, created))
        })
    }

    // ---------------------------------------------------------------
    // Cross-localization operations
    // ---------------------------------------------------------------

    /// Make two localizations structural supersets of each other and persist both.
    pub fn merge_localizations(
        &mut self,
        first: &str,
        second: &str,
        use_source_values: bool,
        default_value: &str,
    ) -> ApplicationResult<()> {
        let writer = self
            .settings
            .writer
            .clone()
            .ok_or(ApplicationError::CannotWrite)?;
        let first_root = self.localization_root(first)?;
        let second_root = self.localization_root(second)?;
        info!("merge_localizations: {} <-> {}", first, second);

        if self.settings.use_single_file {
            self.check_readable(second)?;
            let mut tree = self.take_tree(first)?;
            let result = merge_within(
                &mut tree,
                &first_root,
                &second_root,
                use_source_values,
                default_value,
            )
            .and_then(|()| {
                Self::write_tree(&*writer, first, &tree)?;
                Self::write_tree(&*writer, second, &tree)
            });
            self.restore_tree(first, tree);
            return result;
        }

        let mut first_tree = self.take_tree(first)?;
        let mut second_tree = match self.take_tree(second) {
            Ok(tree) => tree,
            Err(e) => {
                self.restore_tree(first, first_tree);
                return Err(e);
            }
        };
        let result = first_tree
            .merge_nodes(&mut second_tree, use_source_values, default_value)
            .map_err(ApplicationError::from)
            .and_then(|()| {
                Self::write_tree(&*writer, first, &first_tree)?;
                Self::write_tree(&*writer, second, &second_tree)
            });
        self.restore_tree(first, first_tree);
        self.restore_tree(second, second_tree);
        result
    }

    /// Whether two localizations have the same shape (values ignored).
    pub fn are_localizations_equivalent(&mut self, first: &str, second: &str) -> ApplicationResult<bool> {
        let first_tree = self.tree_for(first)?;
        let second_tree = self.tree_for(second)?;
        let equivalent = first_tree.is_equivalent_to(&second_tree);
        debug!(
            "are_localizations_equivalent: {} vs {} -> {}",
            first, second, equivalent
        );
        Ok(equivalent)
    }
}

/// Merge two sub-roots of the same tree.
fn merge_within(
    tree: &mut LocalizationNode,
    first_root: &LocalizationPath,
    second_root: &LocalizationPath,
    use_source_values: bool,
    default_value: &str,
) -> ApplicationResult<()> {
    let mut second = tree.resolve(second_root)?.clone();
    tree.resolve_mut(first_root)?
        .merge_nodes(&mut second, use_source_values, default_value)?;
    *tree.resolve_mut(second_root)? = second;
    Ok(())
}

/// Single-pass `{name}` substitution.
fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut chars = template.chars();

    while let Some(ch) = chars.next() {
        if ch != '{' {
            result.push(ch);
            continue;
        }

        let mut token = String::new();
        let mut closed = false;
        for c in chars.by_ref() {
            if c == '}' {
                closed = true;
                break;
            }
            token.push(c);
        }

        match args.iter().find(|(name, _)| *name == token) {
            Some((_, value)) if closed => result.push_str(value),
            _ => {
                result.push('{');
                result.push_str(&token);
                if closed {
                    result.push('}');
                }
            }
        }
    }
    result
}
