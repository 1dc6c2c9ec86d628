use dicol_types::keys;
use dicol_types::{DEFINITION_NOT_FOUND, Example};
use serde_json::Value;

use crate::presence::field;

/// Layout of a sense's `definicion` field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefinitionShape<'a> {
    /// `"text"`
    PlainText(&'a str),
    /// `{ "texto": "text" }`
    WithTextField(&'a str),
    /// `{ "definicion": "text" }` or `{ "definicion": { "definicion": "text" } }`
    NestedDefinition(&'a str),
    /// `[{ "texto": "text" }, ...]`, first element only
    SequenceOfTexts(&'a str),
    Unrecognized,
}

impl<'a> DefinitionShape<'a> {
    /// Classify the definition of a sense.
    ///
    /// Branches are picked by which field is present; a picked branch that
    /// holds a non-string where text is expected is `Unrecognized`.
    pub fn classify(sense: &'a Value) -> Self {
        let Some(definition) = field(sense, keys::DEFINITION) else {
            return Self::Unrecognized;
        };

        if let Value::String(text) = definition {
            return Self::PlainText(text);
        }

        if let Some(text) = field(definition, keys::TEXT) {
            return text.as_str().map_or(Self::Unrecognized, Self::WithTextField);
        }

        if let Some(nested) = field(definition, keys::DEFINITION) {
            if let Value::String(text) = nested {
                return Self::NestedDefinition(text);
            }
            // Two levels at most
            return field(nested, keys::DEFINITION)
                .and_then(Value::as_str)
                .map_or(Self::Unrecognized, Self::NestedDefinition);
        }

        if let Some(text) = definition
            .as_array()
            .and_then(|items| items.first())
            .and_then(|first| field(first, keys::TEXT))
        {
            return text.as_str().map_or(Self::Unrecognized, Self::SequenceOfTexts);
        }

        Self::Unrecognized
    }

    pub fn resolve(self) -> &'a str {
        match self {
            Self::PlainText(text)
            | Self::WithTextField(text)
            | Self::NestedDefinition(text)
            | Self::SequenceOfTexts(text) => text,
            Self::Unrecognized => DEFINITION_NOT_FOUND,
        }
    }
}

/// Layout of a sense's `ejemplo` field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExampleShape<'a> {
    /// `"text"`
    PlainText(&'a str),
    /// `{ "ejemplo": "text" }`
    WithExampleField(&'a str),
    /// `{ "ejemplo": [x, ...] }`; `x` is taken as-is, whatever its type
    NestedSequence(&'a Value),
    /// `["text", ...]`
    SequenceOfTexts(&'a str),
    /// `[{ "ejemplo": x }, ...]`; `x` is taken as-is
    SequenceOfObjects(&'a Value),
    Unrecognized,
}

impl<'a> ExampleShape<'a> {
    pub fn classify(sense: &'a Value) -> Self {
        let Some(example) = field(sense, keys::EXAMPLE) else {
            return Self::Unrecognized;
        };

        if let Value::String(text) = example {
            return Self::PlainText(text);
        }

        if let Some(inner) = field(example, keys::EXAMPLE) {
            return match inner {
                Value::String(text) => Self::WithExampleField(text),
                Value::Array(items) => items
                    .first()
                    .map_or(Self::Unrecognized, Self::NestedSequence),
                _ => Self::Unrecognized,
            };
        }

        if let Some(first) = example.as_array().and_then(|items| items.first()) {
            if let Value::String(text) = first {
                return Self::SequenceOfTexts(text);
            }
            if let Some(inner) = field(first, keys::EXAMPLE) {
                return Self::SequenceOfObjects(inner);
            }
        }

        Self::Unrecognized
    }

    pub fn resolve(self) -> Example {
        match self {
            Self::PlainText(text) | Self::WithExampleField(text) | Self::SequenceOfTexts(text) => {
                Example::from(text)
            }
            Self::NestedSequence(value) | Self::SequenceOfObjects(value) => match value {
                Value::String(text) => Example::Text(text.clone()),
                other => Example::Raw(other.clone()),
            },
            Self::Unrecognized => Example::not_found(),
        }
    }
}

/// Meaning and example of one sense, untrimmed
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSense {
    pub meaning: String,
    pub example: Example,
}

/// Resolve a sense into its meaning and example. Never fails: anything that
/// cannot be resolved becomes the "not found" text.
pub fn resolve(sense: Option<&Value>) -> ResolvedSense {
    let Some(sense) = sense else {
        return ResolvedSense {
            meaning: DEFINITION_NOT_FOUND.to_string(),
            example: Example::not_found(),
        };
    };

    ResolvedSense {
        meaning: DefinitionShape::classify(sense).resolve().to_string(),
        example: ExampleShape::classify(sense).resolve(),
    }
}
