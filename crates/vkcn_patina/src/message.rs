//! Message ids and their texts.

use serde::Serialize;
use vkcn_carton::{CompactString, SmallVec};

/// Every message a rule can produce, reports and suggestions alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MessageId {
    // Convention
    #[serde(rename = "class-top-naming")]
    ClassTopNaming,
    #[serde(rename = "class-top-naming-suggestion")]
    ClassTopNamingSuggestion,
    #[serde(rename = "class-nested-naming")]
    ClassNestedNaming,
    #[serde(rename = "class-nested-previous-non-class")]
    ClassNestedPreviousNonClass,
    #[serde(rename = "class-nested-modifiers")]
    ClassNestedModifiers,
    #[serde(rename = "combinator-type-allowed")]
    CombinatorTypeAllowed,
    #[serde(rename = "combinator-child-allowed")]
    CombinatorChildAllowed,
    #[serde(rename = "combinator-only-allowed")]
    CombinatorOnlyAllowed,
    #[serde(rename = "type-only-inside")]
    TypeOnlyInside,
    #[serde(rename = "type-nested")]
    TypeNested,
    #[serde(rename = "universal-invalid-parent")]
    UniversalInvalidParent,
    #[serde(rename = "pseudo-child")]
    PseudoChild,
    #[serde(rename = "no-violation")]
    NoViolation,

    // Dynamic usage
    #[serde(rename = "dynamic")]
    Dynamic,

    // Undefined usage
    #[serde(rename = "undefined-element")]
    UndefinedElement,
    #[serde(rename = "excess-element")]
    ExcessElement,
    #[serde(rename = "undefined-modifier")]
    UndefinedModifier,
    #[serde(rename = "undefined")]
    Undefined,
    #[serde(rename = "useDefined")]
    UseDefined,
    #[serde(rename = "removeUndefined")]
    RemoveUndefined,
}

impl MessageId {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ClassTopNaming => "class-top-naming",
            Self::ClassTopNamingSuggestion => "class-top-naming-suggestion",
            Self::ClassNestedNaming => "class-nested-naming",
            Self::ClassNestedPreviousNonClass => "class-nested-previous-non-class",
            Self::ClassNestedModifiers => "class-nested-modifiers",
            Self::CombinatorTypeAllowed => "combinator-type-allowed",
            Self::CombinatorChildAllowed => "combinator-child-allowed",
            Self::CombinatorOnlyAllowed => "combinator-only-allowed",
            Self::TypeOnlyInside => "type-only-inside",
            Self::TypeNested => "type-nested",
            Self::UniversalInvalidParent => "universal-invalid-parent",
            Self::PseudoChild => "pseudo-child",
            Self::NoViolation => "no-violation",
            Self::Dynamic => "dynamic",
            Self::UndefinedElement => "undefined-element",
            Self::ExcessElement => "excess-element",
            Self::UndefinedModifier => "undefined-modifier",
            Self::Undefined => "undefined",
            Self::UseDefined => "useDefined",
            Self::RemoveUndefined => "removeUndefined",
        }
    }

    /// Message template; `{{name}}` placeholders are filled from message data.
    pub const fn template(self) -> &'static str {
        match self {
            Self::ClassTopNaming => "Element class name should follow pattern `<prefix>--<element>`, where `prefix` and `element` should be named in kebab case.",
            Self::ClassTopNamingSuggestion => "Use '{{selector}}' class name.",
            Self::ClassNestedNaming => "Modifier class name should be named in kebab case.",
            Self::ClassNestedPreviousNonClass => "Modifier can be applied only to element.",
            Self::ClassNestedModifiers => "Modifiers can not be nested.",
            Self::CombinatorTypeAllowed => "Only `>` combinator allowed.",
            Self::CombinatorChildAllowed => "Only type selector is allowed.",
            Self::CombinatorOnlyAllowed => "Only 1 combinator selector is allowed.",
            Self::TypeOnlyInside => "Type selectors usage is allowed only inside element selector.",
            Self::TypeNested => "Type selectors nesting is allowed only inside element selector.",
            Self::UniversalInvalidParent => "Universal selector can be used only with combinator '>'.",
            Self::PseudoChild => "No selectors are allowed after pseudo.",
            Self::NoViolation => "This selector violate convention.",
            Self::Dynamic => "No dynamic class.",
            Self::UndefinedElement => "The element class name is undefined.",
            Self::ExcessElement => "The element class name can not be defined twice or more.",
            Self::UndefinedModifier => "The modifier class name `{{className}}` is undefined.",
            Self::Undefined => "The class name `{{className}}` is undefined.",
            Self::UseDefined => "Use '{{className}}' instead.",
            Self::RemoveUndefined => "Remove class name '{{className}}' from template.",
        }
    }

    /// Render the message with its data.
    pub fn render(self, data: &MessageData) -> CompactString {
        let template = self.template();
        if data.is_empty() {
            return CompactString::new(template);
        }
        let mut out = String::with_capacity(template.len() + 16);
        let mut rest = template;
        while let Some(open) = rest.find("{{") {
            out.push_str(&rest[..open]);
            let after = &rest[open + 2..];
            match after.find("}}") {
                Some(close) => {
                    let key = after[..close].trim();
                    match data.get(key) {
                        Some(value) => out.push_str(value),
                        None => out.push_str(&rest[open..open + 2 + close + 2]),
                    }
                    rest = &after[close + 2..];
                }
                None => {
                    out.push_str(&rest[open..]);
                    rest = "";
                }
            }
        }
        out.push_str(rest);
        CompactString::from(out)
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Placeholder values of a message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageData(SmallVec<[(&'static str, CompactString); 1]>);

impl MessageData {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &'static str, value: impl Into<CompactString>) -> Self {
        self.0.push((key, value.into()));
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

impl Serialize for MessageData {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value.as_str())?;
        }
        map.end()
    }
}
