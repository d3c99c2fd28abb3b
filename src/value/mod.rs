use crate::backend::{BackendCommand, Reply, Request, StaleToken};
use crate::context::InspectContext;
use crate::fv_debug;
use crate::value::descriptor::{Descriptor, OBJECT_MARKER};
use crate::value::escape::decode_escape_spans;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use strum_macros::Display;

pub mod descriptor;
pub mod escape;
pub mod markup;
pub mod presentation;
pub mod truncate;

/// Role of a value in the debuggee, fixed at value creation.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Display)]
pub enum ValueRole {
    This,
    Parameter,
    Variable,
    Field,
    ScopeChainEntry,
    Other,
}

impl ValueRole {
    /// Default display category for values of this role.
    pub fn category(self) -> Option<DisplayCategory> {
        match self {
            ValueRole::This => Some(DisplayCategory::Class),
            ValueRole::Parameter => Some(DisplayCategory::Parameter),
            ValueRole::Variable => Some(DisplayCategory::Variable),
            ValueRole::Field => Some(DisplayCategory::Field),
            ValueRole::ScopeChainEntry => Some(DisplayCategory::ClassInitializer),
            ValueRole::Other => None,
        }
    }
}

/// Display category hint (an icon in graphical frontends).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display)]
#[strum(serialize_all = "snake_case")]
pub enum DisplayCategory {
    Class,
    ClassInitializer,
    Parameter,
    Variable,
    Field,
    StaticField,
    Property,
    StaticProperty,
}

/// One inspected value.
#[derive(Clone)]
pub struct ValueNode {
    name: String,
    expression: String,
    raw_result: String,
    parent_raw_result: Option<String>,
    role: ValueRole,
    preferred_category: Option<DisplayCategory>,
    ctx: Arc<InspectContext>,
}

impl Debug for ValueNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueNode")
            .field("name", &self.name)
            .field("expression", &self.expression)
            .field("raw_result", &self.raw_result)
            .field("role", &self.role)
            .field("preferred_category", &self.preferred_category)
            .finish()
    }
}

impl ValueNode {
    /// Create a value from a backend reply, escape spans of `raw_result` are decoded here.
    pub fn new(
        ctx: Arc<InspectContext>,
        name: impl Into<String>,
        expression: impl Into<String>,
        raw_result: &str,
        parent_raw_result: Option<String>,
        role: ValueRole,
    ) -> Self {
        Self {
            name: name.into(),
            expression: expression.into(),
            raw_result: decode_escape_spans(raw_result),
            parent_raw_result,
            role,
            preferred_category: None,
            ctx,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Expression that re-evaluates this value.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn raw_result(&self) -> &str {
        &self.raw_result
    }

    pub fn parent_raw_result(&self) -> Option<&str> {
        self.parent_raw_result.as_deref()
    }

    pub fn role(&self) -> ValueRole {
        self.role
    }

    pub fn preferred_category(&self) -> Option<DisplayCategory> {
        self.preferred_category
    }

    pub fn set_preferred_category(&mut self, category: DisplayCategory) {
        self.preferred_category = Some(category);
    }

    pub fn is_object(&self) -> bool {
        self.raw_result.contains(OBJECT_MARKER)
    }

    pub fn descriptor(&self) -> Descriptor {
        Descriptor::parse(&self.raw_result)
    }

    pub fn type_name(&self) -> Option<String> {
        self.descriptor().type_name
    }

    pub(crate) fn context(&self) -> &Arc<InspectContext> {
        &self.ctx
    }

    /// Assign a new value: evaluates `<expression>=<new_value>`.
    /// The backend reply (or error) is passed into `on_modified` unless `token` is stale at that moment.
    pub fn set_value(
        &self,
        new_value: &str,
        token: &StaleToken,
        on_modified: impl FnOnce(Reply) + Send + 'static,
    ) {
        let command = BackendCommand::assign(&self.expression, new_value);
        fv_debug!("modify `{}`: {command}", self.expression);
        self.ctx
            .transport()
            .submit(Request::new(command, token.clone(), on_modified));
    }
}
