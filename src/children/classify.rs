use crate::symbols::{ClassMetadata, MemberBucket};
use crate::value::presentation::Presentation;
use crate::value::ValueNode;
use indexmap::IndexMap;
use itertools::Itertools;
use std::cmp::Ordering;
use strum::IntoEnumIterator;

pub const INHERITED_MEMBERS_LABEL: &str = "Inherited members";

/// Synthetic node that holds members declared by supertypes.
#[derive(Debug, Clone, Default)]
pub struct InheritedMembers {
    pub static_fields: Vec<ValueNode>,
    pub static_properties: Vec<ValueNode>,
    pub fields: Vec<ValueNode>,
    pub properties: Vec<ValueNode>,
}

impl InheritedMembers {
    pub fn is_empty(&self) -> bool {
        self.static_fields.is_empty()
            && self.static_properties.is_empty()
            && self.fields.is_empty()
            && self.properties.is_empty()
    }

    pub fn presentation(&self) -> Presentation {
        Presentation {
            category: None,
            type_name: None,
            value: INHERITED_MEMBERS_LABEL.to_string(),
            has_children: true,
            full_value: None,
        }
    }

    /// Children in order: static fields, static properties, fields, properties.
    pub fn children(&self) -> impl Iterator<Item = &ValueNode> {
        self.static_fields
            .iter()
            .chain(self.static_properties.iter())
            .chain(self.fields.iter())
            .chain(self.properties.iter())
    }
}

/// Single item of a tree level.
#[derive(Debug, Clone)]
pub enum ChildNode {
    Value(ValueNode),
    Inherited(InheritedMembers),
}

impl ChildNode {
    pub fn name(&self) -> &str {
        match self {
            ChildNode::Value(value) => value.name(),
            ChildNode::Inherited(_) => "",
        }
    }

    pub fn as_value(&self) -> Option<&ValueNode> {
        match self {
            ChildNode::Value(value) => Some(value),
            ChildNode::Inherited(_) => None,
        }
    }
}

/// Children of a value split into presentation groups.
#[derive(Debug, Default)]
pub struct GroupedChildren {
    pub inherited: InheritedMembers,
    pub own_static_fields: Vec<ValueNode>,
    pub own_static_properties: Vec<ValueNode>,
    pub own_fields: Vec<ValueNode>,
    pub own_properties: Vec<ValueNode>,
    /// Collection elements (children with integer names), sorted.
    pub elements: Vec<ValueNode>,
}

impl GroupedChildren {
    pub fn bucket(&self, bucket: MemberBucket) -> &[ValueNode] {
        match bucket {
            MemberBucket::OwnStaticField => &self.own_static_fields,
            MemberBucket::OwnStaticProperty => &self.own_static_properties,
            MemberBucket::OwnField => &self.own_fields,
            MemberBucket::OwnProperty => &self.own_properties,
            MemberBucket::InheritedStaticField => &self.inherited.static_fields,
            MemberBucket::InheritedStaticProperty => &self.inherited.static_properties,
            MemberBucket::InheritedField => &self.inherited.fields,
            MemberBucket::InheritedProperty => &self.inherited.properties,
        }
    }

    fn bucket_mut(&mut self, bucket: MemberBucket) -> &mut Vec<ValueNode> {
        match bucket {
            MemberBucket::OwnStaticField => &mut self.own_static_fields,
            MemberBucket::OwnStaticProperty => &mut self.own_static_properties,
            MemberBucket::OwnField => &mut self.own_fields,
            MemberBucket::OwnProperty => &mut self.own_properties,
            MemberBucket::InheritedStaticField => &mut self.inherited.static_fields,
            MemberBucket::InheritedStaticProperty => &mut self.inherited.static_properties,
            MemberBucket::InheritedField => &mut self.inherited.fields,
            MemberBucket::InheritedProperty => &mut self.inherited.properties,
        }
    }

    /// Tree level in presentation order: inherited members node (if any), own static fields,
    /// own static properties, own fields, own properties, collection elements.
    pub fn into_list(self) -> Vec<ChildNode> {
        let inherited = (!self.inherited.is_empty()).then_some(ChildNode::Inherited(self.inherited));

        inherited
            .into_iter()
            .chain(
                self.own_static_fields
                    .into_iter()
                    .chain(self.own_static_properties)
                    .chain(self.own_fields)
                    .chain(self.own_properties)
                    .chain(self.elements)
                    .map(ChildNode::Value),
            )
            .collect()
    }
}

/// Integer check with the backend rules: optional sign, 32-bit range.
fn is_integer(name: &str) -> bool {
    name.parse::<i32>().is_ok()
}

/// Order of collection elements: numeric if both names are numbers, otherwise
/// case-insensitive lexical, a missing name goes first.
pub fn compare_element_names(name1: Option<&str>, name2: Option<&str>) -> Ordering {
    if let (Some(n1), Some(n2)) = (name1, name2) {
        let starts_with_digit = |n: &str| n.chars().next().is_some_and(|c| c.is_ascii_digit());
        if starts_with_digit(n1) && starts_with_digit(n2) {
            if let (Ok(i1), Ok(i2)) = (n1.parse::<i64>(), n2.parse::<i64>()) {
                return i1.cmp(&i2);
            }
        }
    }

    match (name1, name2) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(n1), Some(n2)) => n1
            .chars()
            .flat_map(char::to_lowercase)
            .cmp(n2.chars().flat_map(char::to_lowercase)),
    }
}

/// Split children into presentation groups.
///
/// Without class metadata all named children are own fields. With metadata a child goes into
/// the first bucket (in [`MemberBucket`] priority order) that contains its name and gets
/// the bucket display category. Unknown names are own fields of a dynamic class and
/// inherited fields otherwise.
pub fn group(
    children: IndexMap<String, ValueNode>,
    metadata: Option<&ClassMetadata>,
) -> GroupedChildren {
    let mut grouped = GroupedChildren::default();

    for (name, mut value) in children {
        if is_integer(&name) {
            grouped.elements.push(value);
            continue;
        }

        let Some(metadata) = metadata else {
            grouped.own_fields.push(value);
            continue;
        };

        let bucket = match metadata.classify(&name) {
            Some((bucket, category)) => {
                value.set_preferred_category(category);
                bucket
            }
            None if metadata.is_dynamic() => MemberBucket::OwnField,
            None => MemberBucket::InheritedField,
        };
        grouped.bucket_mut(bucket).push(value);
    }

    grouped
        .elements
        .sort_by(|v1, v2| compare_element_names(Some(v1.name()), Some(v2.name())));

    grouped
}

/// Number of children in each non-empty group, for logs.
pub(crate) fn group_sizes(grouped: &GroupedChildren) -> String {
    MemberBucket::iter()
        .map(|bucket| (bucket.to_string(), grouped.bucket(bucket).len()))
        .chain([("elements".to_string(), grouped.elements.len())])
        .filter(|(_, size)| *size > 0)
        .map(|(group, size)| format!("{group}: {size}"))
        .join(", ")
}
