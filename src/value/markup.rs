//! Presentation of markup (`XML`, `XMLList`) values.

use crate::backend::{BackendCommand, Request, StaleToken};
use crate::fv_debug;
use crate::value::descriptor::ValueShape;
use crate::value::escape::decode_escape_spans;
use crate::value::presentation::{
    present_plain, short_value, ContentHint, FullValueEvaluator, Presentation, PresentationInput,
    ValueSink,
};
use crate::value::truncate::{cap, truncate};
use crate::value::ValueNode;

/// Separator between a value and a full value link.
const LINK_SEPARATOR: &str = " ";

fn markup_full_value(node: &ValueNode) -> FullValueEvaluator {
    FullValueEvaluator::Markup {
        expression: node.expression().to_string(),
        raw_result: node.raw_result().to_string(),
        evaluator: node.context().markup_evaluator(),
    }
}

fn send(
    input: PresentationInput,
    mut sink: Box<dyn ValueSink>,
    value: String,
    full_value: Option<FullValueEvaluator>,
) {
    sink.set_presentation(Presentation {
        category: input.node.role().category(),
        type_name: input.descriptor.type_name,
        value,
        has_children: input.shape.is_object(),
        full_value,
    });
}

fn send_truncated(input: PresentationInput, sink: Box<dyn ValueSink>, text: &str) {
    let max_len = input.node.context().config().max_value_length;
    let truncated = truncate(text, max_len, ContentHint::Monospaced);
    send(input, sink, truncated.display, truncated.full_value);
}

/// Ask the backend for a string form of the value, present a reply (or an error text)
/// when it arrives.
pub(crate) fn present_stringified(
    input: PresentationInput,
    sink: Box<dyn ValueSink>,
    token: &StaleToken,
) {
    let node = input.node;
    let command = BackendCommand::stringify(node.expression());
    let category = node.role().category();
    let type_name = input.descriptor.type_name.clone();
    let has_children = input.shape.is_object();
    let max_len = node.context().config().max_value_length;
    let expression = node.expression().to_string();
    let mut sink = sink;

    let request = Request::new(command, token.clone(), move |reply| {
        let text = match reply {
            Ok(text) => decode_escape_spans(&text),
            Err(e) => e.to_string(),
        };
        fv_debug!("markup value `{expression}` stringified");

        let truncated = truncate(&text, max_len, ContentHint::Monospaced);
        sink.set_presentation(Presentation {
            category,
            type_name,
            value: truncated.display,
            has_children,
            full_value: truncated.full_value,
        });
    });

    node.context().transport().submit(request);
}

/// Markup list has no preview, the whole content is available through the full value link.
pub(crate) fn present_list(input: PresentationInput, sink: Box<dyn ValueSink>, _: &StaleToken) {
    let value = short_value(&input) + LINK_SEPARATOR;
    let full_value = markup_full_value(input.node);
    send(input, sink, value, Some(full_value));
}

pub(crate) fn present_text(input: PresentationInput, sink: Box<dyn ValueSink>, token: &StaleToken) {
    let ValueShape::MarkupText { text } = &input.shape else {
        return present_plain(input, sink, token);
    };
    let text = text.clone();
    send_truncated(input, sink, &text);
}

/// Self-closed elements are shown as is, other ones as `<tag ...>...</tag>`
/// with full value link.
pub(crate) fn present_element(
    input: PresentationInput,
    sink: Box<dyn ValueSink>,
    token: &StaleToken,
) {
    let ValueShape::MarkupElement { start_tag, empty } = &input.shape else {
        return present_plain(input, sink, token);
    };
    let start_tag = start_tag.clone();

    if *empty {
        send_truncated(input, sink, &start_tag);
        return;
    }

    let tag_name = element_name(&start_tag);
    let preview = format!("{start_tag}...</{tag_name}> ");
    let value = cap(&preview, input.node.context().config().max_value_length);
    let full_value = markup_full_value(input.node);
    send(input, sink, value, Some(full_value));
}

pub(crate) fn present_other(input: PresentationInput, sink: Box<dyn ValueSink>, token: &StaleToken) {
    match &input.shape {
        ValueShape::MarkupOther { info: Some(info) } => {
            let info = info.clone();
            send_truncated(input, sink, &info)
        }
        _ => present_plain(input, sink, token),
    }
}

/// Tag name of an element start tag: `<root attr="v">` -> `root`.
fn element_name(start_tag: &str) -> &str {
    let inner = start_tag.strip_prefix('<').unwrap_or(start_tag);
    match inner.find(' ') {
        Some(space_idx) => &inner[..space_idx],
        None => inner.strip_suffix('>').unwrap_or(inner),
    }
}
