//! Object descriptor parser.
//!
//! Object replies look like:
//! ```text
//! [Object 52571545, class='flash.events::MouseEvent']
//! [Object 52571545, class='Main$/staticFunction']
//! [Object 62823129, class='XML@3be9ad9 element <abc/>']
//! ```

use strum_macros::EnumDiscriminants;

pub const OBJECT_MARKER: &str = "Object ";
pub const CLASS_MARKER: &str = ", class='";
pub const TEXT_MARKER: &str = " text ";
pub const ELEMENT_MARKER: &str = " element ";

pub const ARRAY_TYPE: &str = "Array";
pub const MARKUP_DOCUMENT_TYPE: &str = "XML";
pub const MARKUP_LIST_TYPE: &str = "XMLList";

/// Type and additional info extracted from a single reply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Descriptor {
    pub type_name: Option<String>,
    /// Payload after the instance tag, including leading space (` text ...`, ` element <...>`).
    pub additional_info: Option<String>,
}

impl Descriptor {
    pub fn parse(raw: &str) -> Self {
        // scalars and strings have no type, even if the text looks like a descriptor
        if !raw.contains(OBJECT_MARKER) {
            return Self::default();
        }
        let Some(class_idx) = raw.find(CLASS_MARKER) else {
            return Self::default();
        };
        let type_start = class_idx + CLASS_MARKER.len();
        let Some(last_quote_idx) = raw.rfind('\'').filter(|&idx| idx >= type_start) else {
            return Self::default();
        };

        let in_quotes = &raw[type_start..last_quote_idx];
        let (type_name, additional_info) = match in_quotes.find('@') {
            Some(at_idx) if at_idx > 0 => {
                let additional_info = in_quotes[at_idx..]
                    .find(' ')
                    .map(|space_idx| in_quotes[at_idx + space_idx..].to_string());
                (&in_quotes[..at_idx], additional_info)
            }
            _ => (in_quotes, None),
        };

        let type_name = if type_name == "[]" {
            ARRAY_TYPE
        } else {
            type_name
        };

        Self {
            type_name: Some(type_name.to_string()),
            additional_info,
        }
    }

    pub fn is_markup(&self) -> bool {
        matches!(
            self.type_name.as_deref(),
            Some(MARKUP_DOCUMENT_TYPE | MARKUP_LIST_TYPE)
        )
    }

    /// True if the descriptor belongs to a static function scope (`Main$/staticFunction`).
    pub fn is_scope_chain_frame(&self) -> bool {
        self.type_name.as_deref().is_some_and(|t| t.contains('/'))
    }
}

/// Raw object id from reply (text between object marker and the first comma).
pub fn object_id(raw: &str) -> Option<&str> {
    let marker_idx = raw.find(OBJECT_MARKER)?;
    let id_start = marker_idx + OBJECT_MARKER.len();
    let comma_idx = raw[id_start..].find(',')?;
    Some(&raw[id_start..id_start + comma_idx])
}

/// Shape of a value, resolved once from its reply.
#[derive(Debug, Clone, PartialEq, EnumDiscriminants)]
#[strum_discriminants(name(ValueShapeKind))]
pub enum ValueShape {
    /// Non-object value (number, string, boolean, undefined...).
    Scalar,
    /// Object with a children list.
    ObjectRef { id: String },
    /// Markup text node (` text <content>`).
    MarkupText { text: String },
    /// Markup element (` element <tag ...>`), `empty` for self-closed elements.
    MarkupElement { start_tag: String, empty: bool },
    /// Markup list, contains no preview.
    MarkupList,
    /// Markup value with unrecognized or missing payload.
    MarkupOther { info: Option<String> },
}

impl ValueShape {
    pub fn resolve(raw: &str, descriptor: &Descriptor) -> Self {
        if !raw.contains(OBJECT_MARKER) {
            return ValueShape::Scalar;
        }

        if descriptor.type_name.as_deref() == Some(MARKUP_LIST_TYPE) {
            return ValueShape::MarkupList;
        }

        if descriptor.is_markup() {
            let Some(info) = descriptor.additional_info.as_deref() else {
                return ValueShape::MarkupOther { info: None };
            };

            /*
               additional info may look like following:
               " text element content"
               " element <root attr=\"attrValue\">"
               " element <child/>"
            */
            let element_prefix = format!("{ELEMENT_MARKER}<");
            if info.starts_with(&element_prefix) && info.ends_with('>') {
                return ValueShape::MarkupElement {
                    start_tag: info[ELEMENT_MARKER.len()..].to_string(),
                    empty: info.ends_with("/>"),
                };
            }
            if let Some(text) = info.strip_prefix(TEXT_MARKER) {
                return ValueShape::MarkupText {
                    text: text.to_string(),
                };
            }
            return ValueShape::MarkupOther {
                info: Some(info.to_string()),
            };
        }

        ValueShape::ObjectRef {
            id: object_id(raw).unwrap_or_default().to_string(),
        }
    }

    pub fn is_object(&self) -> bool {
        !matches!(self, ValueShape::Scalar)
    }
}
