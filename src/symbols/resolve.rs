//! Source position of an inspected value.

use crate::symbols::{ClassDecl, ClassMetadata, SourcePosition, SymbolIndex};
use crate::value::descriptor::Descriptor;
use crate::value::{ValueNode, ValueRole};
use std::collections::HashSet;

const VECTOR_PREFIX: &str = "__AS3__.vec::";

/// Qualified class names that may correspond to a backend type name, in lookup order.
///
/// Backend reports `pkg::Name`, vectors as `__AS3__.vec::Vector.<T>` and adds `$`
/// to a class name in a static context. Scope chain types (`Main$/fn`) are not classes.
pub fn qualified_names(type_name: &str) -> Vec<String> {
    if type_name.contains('/') {
        return vec![];
    }

    let type_name = type_name.strip_prefix(VECTOR_PREFIX).unwrap_or(type_name);
    let type_name = match type_name.find(".<") {
        Some(idx) if idx > 0 => &type_name[..idx],
        _ => type_name,
    };
    let fqn = type_name.replace("::", ".");

    match fqn.strip_suffix('$') {
        Some(without_static_mark) => {
            let without_static_mark = without_static_mark.to_string();
            vec![fqn, without_static_mark]
        }
        None => vec![fqn],
    }
}

/// Find declaration of a class by a backend type name.
pub fn find_class(
    index: &dyn SymbolIndex,
    type_name: &str,
    at: Option<&SourcePosition>,
) -> Option<ClassDecl> {
    qualified_names(type_name)
        .iter()
        .find_map(|fqn| index.find_class(fqn, at))
}

/// Member metadata of a class by a backend type name.
pub fn class_metadata(
    index: &dyn SymbolIndex,
    type_name: &str,
    at: Option<&SourcePosition>,
) -> Option<ClassMetadata> {
    let class = find_class(index, type_name, at)?;
    Some(ClassMetadata::collect(&class, index, at))
}

/// Find declaration of a field (or a getter) `name` in a class or its supertypes.
pub fn find_field_or_getter(
    index: &dyn SymbolIndex,
    class: &ClassDecl,
    name: &str,
    at: Option<&SourcePosition>,
) -> Option<SourcePosition> {
    let mut visited = HashSet::new();
    find_member_in_hierarchy(index, class, name, at, &mut visited)
}

fn find_member_in_hierarchy(
    index: &dyn SymbolIndex,
    class: &ClassDecl,
    name: &str,
    at: Option<&SourcePosition>,
    visited: &mut HashSet<String>,
) -> Option<SourcePosition> {
    if !visited.insert(class.qualified_name.clone()) {
        return None;
    }

    if let Some(member) = class.member(name) {
        return member.position.clone();
    }

    class.supers.iter().find_map(|super_name| {
        let super_class = index.find_class(super_name, at)?;
        find_member_in_hierarchy(index, &super_class, name, at, visited)
    })
}

impl ValueNode {
    /// Declaration place of this value, `None` if unknown.
    pub fn compute_source_position(&self) -> Option<SourcePosition> {
        let ctx = self.context();
        let at = ctx.position()?;
        let index = ctx.symbols()?;

        match self.role() {
            ValueRole::Variable => index.local_variable(self.name(), at),
            ValueRole::Parameter => index.parameter(self.name(), at),
            ValueRole::Field => {
                let parent_type = Descriptor::parse(self.parent_raw_result()?).type_name?;
                let class = find_class(index.as_ref(), &parent_type, Some(at))?;
                find_field_or_getter(index.as_ref(), &class, self.name(), Some(at))
            }
            ValueRole::This | ValueRole::ScopeChainEntry | ValueRole::Other => None,
        }
    }
}
