//! Lazy expansion of object values.
//!
//! Children of an object are requested by object id (`#<id>.`), the reply is:
//! ```text
//! $6 = [Object 30860193, class='pkg::Foo']
//! name = 'foo'
//! _count = 2
//! count = 2
//! setter = [Setter 62, name='Foo@3d613bb::setter']
//! ```
//! The first line echoes the parent and is ignored.

use crate::backend::{BackendCommand, Request, StaleToken};
use crate::context::InspectContext;
use crate::error::Error;
use crate::symbols::resolve::class_metadata;
use crate::value::descriptor::{object_id, Descriptor};
use crate::value::{ValueNode, ValueRole};
use crate::{fv_debug, fv_info, weak_error};
use indexmap::IndexMap;
use std::sync::Arc;

pub mod classify;
pub mod dedup;

pub use classify::{ChildNode, GroupedChildren, InheritedMembers};

pub const FIELD_DELIMITER: &str = " = ";
const SETTER_MARKER: &str = "[Setter ";

/// Receiver of a children list (external collaborator).
pub trait ChildrenSink: Send {
    fn add_children(&mut self, children: Vec<ChildNode>);

    /// Children can't be computed, `message` must be shown instead.
    fn set_error_message(&mut self, message: String);
}

/// Split a children line into field name and raw value.
fn split_line(line: &str) -> Result<(&str, &str), Error> {
    line.split_once(FIELD_DELIMITER)
        .ok_or_else(|| Error::MalformedLine(line.to_string()))
}

/// Expression of a child: `parent.name` or `parent["0"]` for names starting with a digit.
pub fn child_expression(parent_expression: &str, name: &str) -> String {
    if name.starts_with(char::is_numeric) {
        format!("{parent_expression}[\"{name}\"]")
    } else {
        format!("{parent_expression}.{name}")
    }
}

/// Parse a children reply into name -> value map, accessor duplicates are coalesced.
pub fn parse_children(
    parent: &ValueNode,
    parent_descriptor: &Descriptor,
    reply: &str,
) -> IndexMap<String, ValueNode> {
    let ctx = parent.context();
    // parameters of a static function from a scope chain, fields otherwise
    let role = if parent_descriptor.is_scope_chain_frame() {
        ValueRole::Parameter
    } else {
        ValueRole::Field
    };

    let mut children = IndexMap::new();
    let lines = reply
        .split(['\r', '\n'])
        .filter(|line| !line.is_empty())
        .skip(1);

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some((name, raw_result)) = weak_error!(split_line(line)) else {
            continue;
        };
        if raw_result.starts_with(SETTER_MARKER) {
            continue;
        }

        let value = ValueNode::new(
            Arc::clone(ctx),
            name,
            child_expression(parent.expression(), name),
            raw_result,
            Some(parent.raw_result().to_string()),
            role,
        );
        dedup::insert_checking_duplicates(&mut children, value, ctx.accessor_convention());
    }

    children
}

/// Build a tree level from a children reply.
fn build_children(ctx: &InspectContext, parent: &ValueNode, reply: &str) -> Vec<ChildNode> {
    let descriptor = parent.descriptor();
    let children = parse_children(parent, &descriptor, reply);

    let metadata = match (ctx.symbols(), ctx.position(), descriptor.type_name.as_deref()) {
        (Some(index), Some(at), Some(type_name)) => {
            class_metadata(index.as_ref(), type_name, Some(at))
        }
        _ => None,
    };

    let grouped = classify::group(children, metadata.as_ref());
    fv_debug!(
        "children of `{}`: {}",
        parent.expression(),
        classify::group_sizes(&grouped)
    );
    grouped.into_list()
}

impl ValueNode {
    /// Request children of this value from the backend and pass them into `sink`
    /// when reply arrives. Nothing is passed if `token` is stale at that moment.
    /// Non object values have no children, `sink` gets an empty list immediately.
    pub fn compute_children(&self, mut sink: Box<dyn ChildrenSink>, token: &StaleToken) {
        let Some(raw_id) = object_id(self.raw_result()) else {
            sink.add_children(vec![]);
            return;
        };

        // expression may have a syntax unknown to the backend (like `x.dict1.-1`),
        // object id is more reliable
        let command = BackendCommand::dereference(&self.context().format_id(raw_id));
        fv_info!("expand `{}` with `{command}`", self.expression());

        let parent = self.clone();
        let request = Request::new(command, token.clone(), move |reply| match reply {
            Ok(reply) => {
                let ctx = Arc::clone(parent.context());
                sink.add_children(build_children(&ctx, &parent, &reply));
            }
            Err(e) => sink.set_error_message(e.to_string()),
        });

        self.context().transport().submit(request);
    }
}
