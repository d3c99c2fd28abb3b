//! Value presentation.
//!
//! A value shape is resolved once from the reply, then a presentation strategy is
//! picked from [`strategy`] table by shape kind and backend flavor.

use crate::backend::StaleToken;
use crate::config::BackendFlavor;
use crate::value::descriptor::{Descriptor, ValueShape, ValueShapeKind};
use crate::value::markup;
use crate::value::truncate::truncate;
use crate::value::{DisplayCategory, ValueNode};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// How the full value text should be shown.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ContentHint {
    #[default]
    Plain,
    Monospaced,
}

/// Full (not truncated) value text.
#[derive(Clone, PartialEq, Debug)]
pub struct FullValue {
    pub text: String,
    pub hint: ContentHint,
}

pub type FullValueCallback = Box<dyn FnOnce(Result<FullValue, String>) + Send>;

/// Fetches a whole markup tree of a value (external collaborator).
pub trait MarkupEvaluator: Send + Sync {
    /// Evaluate markup value and pass its text into `callback`.
    ///
    /// # Arguments
    ///
    /// * `expression`: expression of a markup value
    /// * `raw_result`: backend description of a markup value
    /// * `callback`: receiver of a full text or an error message
    fn evaluate(&self, expression: &str, raw_result: &str, callback: FullValueCallback);
}

/// Lazy provider of a full value, runs only if user asks for it.
#[derive(Clone)]
pub enum FullValueEvaluator {
    /// Full text is already known.
    Text { text: String, hint: ContentHint },
    /// Full text of markup value must be fetched from the backend.
    Markup {
        expression: String,
        raw_result: String,
        evaluator: Arc<dyn MarkupEvaluator>,
    },
}

impl Debug for FullValueEvaluator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FullValueEvaluator::Text { text, hint } => f
                .debug_struct("Text")
                .field("text", text)
                .field("hint", hint)
                .finish(),
            FullValueEvaluator::Markup {
                expression,
                raw_result,
                ..
            } => f
                .debug_struct("Markup")
                .field("expression", expression)
                .field("raw_result", raw_result)
                .finish(),
        }
    }
}

impl PartialEq for FullValueEvaluator {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                FullValueEvaluator::Text { text, hint },
                FullValueEvaluator::Text {
                    text: text2,
                    hint: hint2,
                },
            ) => text == text2 && hint == hint2,
            (
                FullValueEvaluator::Markup {
                    expression,
                    raw_result,
                    ..
                },
                FullValueEvaluator::Markup {
                    expression: expression2,
                    raw_result: raw_result2,
                    ..
                },
            ) => expression == expression2 && raw_result == raw_result2,
            _ => false,
        }
    }
}

impl FullValueEvaluator {
    pub fn start_evaluation(&self, callback: FullValueCallback) {
        match self {
            FullValueEvaluator::Text { text, hint } => callback(Ok(FullValue {
                text: text.clone(),
                hint: *hint,
            })),
            FullValueEvaluator::Markup {
                expression,
                raw_result,
                evaluator,
            } => evaluator.evaluate(expression, raw_result, callback),
        }
    }
}

/// Finished description of a value.
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    pub category: Option<DisplayCategory>,
    pub type_name: Option<String>,
    pub value: String,
    pub has_children: bool,
    pub full_value: Option<FullValueEvaluator>,
}

/// Receiver of a value presentation (external collaborator).
pub trait ValueSink: Send {
    fn set_presentation(&mut self, presentation: Presentation);
}

/// Everything a presentation strategy needs to know about a value.
pub(crate) struct PresentationInput<'a> {
    pub node: &'a ValueNode,
    pub descriptor: Descriptor,
    pub shape: ValueShape,
}

pub(crate) type Strategy = fn(PresentationInput, Box<dyn ValueSink>, &StaleToken);

/// Presentation strategy table.
pub(crate) fn strategy(kind: ValueShapeKind, backend: BackendFlavor, assignment: bool) -> Strategy {
    use ValueShapeKind::*;

    if assignment {
        return present_plain;
    }

    match (kind, backend) {
        (Scalar | ObjectRef, _) => present_plain,
        (MarkupText | MarkupElement | MarkupList | MarkupOther, BackendFlavor::Stringify) => {
            markup::present_stringified
        }
        (MarkupList, BackendFlavor::Legacy) => markup::present_list,
        (MarkupText, BackendFlavor::Legacy) => markup::present_text,
        (MarkupElement, BackendFlavor::Legacy) => markup::present_element,
        (MarkupOther, BackendFlavor::Legacy) => markup::present_other,
    }
}

/// Short value representation: objects with known type are shown by its id.
pub(crate) fn short_value(input: &PresentationInput) -> String {
    let raw = input.node.raw_result();
    if !input.shape.is_object() || input.descriptor.type_name.is_none() {
        return raw.to_string();
    }

    match crate::value::descriptor::object_id(raw) {
        Some(id) => format!("[{}]", input.node.context().format_id(id)),
        None => raw.to_string(),
    }
}

pub(crate) fn present_plain(input: PresentationInput, mut sink: Box<dyn ValueSink>, _: &StaleToken) {
    let node = input.node;
    let value = short_value(&input);
    let truncated = truncate(
        &value,
        node.context().config().max_value_length,
        ContentHint::Plain,
    );

    sink.set_presentation(Presentation {
        category: node.preferred_category().or(node.role().category()),
        type_name: input.descriptor.type_name,
        value: truncated.display,
        has_children: input.shape.is_object(),
        full_value: truncated.full_value,
    });
}

impl ValueNode {
    /// Compute value presentation and pass it into `sink`.
    ///
    /// Presentation of markup values may require a backend request, in that case the sink
    /// is filled when the reply arrives and only if `token` is not stale.
    pub fn compute_presentation(&self, sink: Box<dyn ValueSink>, token: &StaleToken) {
        let descriptor = self.descriptor();
        let shape = ValueShape::resolve(self.raw_result(), &descriptor);
        let assignment = self.expression().contains('=');

        let present = strategy(
            ValueShapeKind::from(&shape),
            self.context().config().backend,
            assignment,
        );

        present(
            PresentationInput {
                node: self,
                descriptor,
                shape,
            },
            sink,
            token,
        );
    }
}
