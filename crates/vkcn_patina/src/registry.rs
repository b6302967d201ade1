//! Declared class names.

use crate::selector::ResolvedSelector;
use vkcn_carton::{CompactString, FxHashMap};

/// Class names declared by the style blocks of one component.
///
/// Elements are the first class of each resolved path; every later class of
/// the same path is one of its modifiers. All maps keep declaration order.
#[derive(Debug, Clone, Default)]
pub struct ClassRegistry {
    elements: Vec<(CompactString, Vec<CompactString>)>,
    index: FxHashMap<CompactString, usize>,
    classes: Vec<CompactString>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from resolved selectors of every style block.
    pub fn from_selectors<'a>(selectors: impl IntoIterator<Item = &'a ResolvedSelector>) -> Self {
        let mut registry = Self::new();
        for selector in selectors {
            registry.add(selector);
        }
        tracing::debug!(
            elements = registry.elements.len(),
            classes = registry.classes.len(),
            "built class registry"
        );
        registry
    }

    /// Record the classes of one resolved path.
    pub fn add(&mut self, selector: &ResolvedSelector) {
        let mut classes = selector.classes();
        let Some(element) = classes.next() else {
            return;
        };
        self.push_class(element);

        let slot = match self.index.get(element) {
            Some(&slot) => slot,
            None => {
                let slot = self.elements.len();
                self.elements.push((CompactString::new(element), Vec::new()));
                self.index.insert(CompactString::new(element), slot);
                slot
            }
        };

        for modifier in classes {
            self.push_class(modifier);
            let modifiers = &mut self.elements[slot].1;
            if !modifiers.iter().any(|m| m == modifier) {
                modifiers.push(CompactString::new(modifier));
            }
        }
    }

    fn push_class(&mut self, class: &str) {
        if !self.classes.iter().any(|c| c == class) {
            self.classes.push(CompactString::new(class));
        }
    }

    #[inline]
    pub fn has_element(&self, element: &str) -> bool {
        self.index.contains_key(element)
    }

    /// Modifiers declared under an element.
    pub fn modifiers(&self, element: &str) -> Option<&[CompactString]> {
        self.index
            .get(element)
            .map(|&slot| self.elements[slot].1.as_slice())
    }

    pub fn has_modifier(&self, element: &str, modifier: &str) -> bool {
        self.modifiers(element)
            .is_some_and(|modifiers| modifiers.iter().any(|m| m == modifier))
    }

    /// Element names in declaration order.
    pub fn elements(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().map(|(name, _)| name.as_str())
    }

    /// Every declared class in declaration order.
    #[inline]
    pub fn classes(&self) -> &[CompactString] {
        &self.classes
    }

    pub fn contains(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
