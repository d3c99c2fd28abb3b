use crate::common::{
    config, context, init_logger, presentation_sink, FixedMarkup, ManualTransport, WAIT,
};
use fdbview::backend::{ObjectIdFormatter, StaleToken};
use fdbview::config::{BackendFlavor, InspectorConfig};
use fdbview::value::presentation::{ContentHint, FullValue, FullValueEvaluator, Presentation};
use fdbview::value::{DisplayCategory, ValueNode, ValueRole};
use fdbview::{Error, InspectContext};
use std::sync::mpsc;
use std::sync::Arc;

const ELEMENT: &str = "[Object 62823129, class='XML@3be9ad9 element <root attr=\"v\">']";
const EMPTY_ELEMENT: &str = "[Object 62823130, class='XML@3be9ada element <child/>']";
const TEXT_NODE: &str = "[Object 62823131, class='XML@3be9adb text hello world']";
const LIST: &str = "[Object 62823132, class='XMLList@3be9adc']";

fn present(value: &ValueNode) -> Presentation {
    let (sink, rx) = presentation_sink();
    value.compute_presentation(sink, &StaleToken::new());
    rx.recv_timeout(WAIT).unwrap()
}

fn evaluate_full(evaluator: &FullValueEvaluator) -> Result<FullValue, String> {
    let (tx, rx) = mpsc::channel();
    evaluator.start_evaluation(Box::new(move |r| tx.send(r).unwrap()));
    rx.recv_timeout(WAIT).unwrap()
}

#[test]
fn test_scalar_presentation() {
    let ctx = context(Arc::new(ManualTransport::default()), BackendFlavor::Stringify);

    struct TestCase {
        raw: &'static str,
        role: ValueRole,
        expected: Presentation,
    }

    let cases = [
        TestCase {
            raw: "'hello'",
            role: ValueRole::Variable,
            expected: Presentation {
                category: Some(DisplayCategory::Variable),
                type_name: None,
                value: "'hello'".to_string(),
                has_children: false,
                full_value: None,
            },
        },
        TestCase {
            raw: "42 (0x2a)",
            role: ValueRole::Parameter,
            expected: Presentation {
                category: Some(DisplayCategory::Parameter),
                type_name: None,
                value: "42 (0x2a)".to_string(),
                has_children: false,
                full_value: None,
            },
        },
        TestCase {
            raw: "'hi, class='there'",
            role: ValueRole::Variable,
            expected: Presentation {
                category: Some(DisplayCategory::Variable),
                type_name: None,
                value: "'hi, class='there'".to_string(),
                has_children: false,
                full_value: None,
            },
        },
        TestCase {
            raw: "undefined",
            role: ValueRole::Other,
            expected: Presentation {
                category: None,
                type_name: None,
                value: "undefined".to_string(),
                has_children: false,
                full_value: None,
            },
        },
    ];

    for tc in cases {
        let value = ctx.root_value("v", tc.raw, tc.role);
        assert_eq!(present(&value), tc.expected, "raw: {}", tc.raw);
    }
}

#[test]
fn test_object_presentation() {
    let ctx = context(Arc::new(ManualTransport::default()), BackendFlavor::Stringify);

    let this = ctx.root_value(
        "this",
        "[Object 30860193, class='pkg.sub::Foo']",
        ValueRole::This,
    );
    assert_eq!(
        present(&this),
        Presentation {
            category: Some(DisplayCategory::Class),
            type_name: Some("pkg.sub::Foo".to_string()),
            value: "[30860193]".to_string(),
            has_children: true,
            full_value: None,
        }
    );

    let array = ctx.root_value("arr", "[Object 1, class='[]@ab']", ValueRole::Variable);
    let presentation = present(&array);
    assert_eq!(presentation.type_name.as_deref(), Some("Array"));
    assert_eq!(presentation.value, "[1]");
    assert!(presentation.has_children);
}

#[test]
fn test_formatted_object_id() {
    struct HexId;

    impl ObjectIdFormatter for HexId {
        fn format(&self, raw_id: &str) -> String {
            match raw_id.trim().parse::<u64>() {
                Ok(id) => format!("{id:#x}"),
                Err(_) => raw_id.to_string(),
            }
        }
    }

    init_logger();
    let ctx = InspectContext::builder(Arc::new(ManualTransport::default()))
        .with_id_formatter(Arc::new(HexId))
        .build();
    let value = ctx.root_value("obj", "[Object 255, class='Foo']", ValueRole::Variable);

    assert_eq!(present(&value).value, "[0xff]");
}

#[test]
fn test_truncated_presentation() {
    init_logger();
    let ctx = InspectContext::builder(Arc::new(ManualTransport::default()))
        .with_config(InspectorConfig {
            max_value_length: 5,
            ..config(BackendFlavor::Stringify)
        })
        .build();

    let long = ctx.root_value("s", "'abcdefgh'", ValueRole::Variable);
    let presentation = present(&long);
    assert_eq!(presentation.value, "'abcd...' ");
    assert_eq!(
        evaluate_full(presentation.full_value.as_ref().unwrap()),
        Ok(FullValue {
            text: "abcdefgh".to_string(),
            hint: ContentHint::Plain,
        })
    );

    let multiline = ctx.root_value("s", "'a\nb'", ValueRole::Variable);
    let presentation = present(&multiline);
    assert_eq!(presentation.value, "'a\nb' ");
    assert_eq!(
        presentation.full_value,
        Some(FullValueEvaluator::Text {
            text: "a\nb".to_string(),
            hint: ContentHint::Plain,
        })
    );

    let short = ctx.root_value("s", "'abc'", ValueRole::Variable);
    let presentation = present(&short);
    assert_eq!(presentation.value, "'abc'");
    assert_eq!(presentation.full_value, None);
}

#[test]
fn test_escape_spans_decoded() {
    let ctx = context(Arc::new(ManualTransport::default()), BackendFlavor::Stringify);
    let value = ctx.root_value(
        "s",
        "'a IDEA-ESCAPE-START\\tIDEA-ESCAPE-END b'",
        ValueRole::Variable,
    );

    assert_eq!(value.raw_result(), "'a \t b'");
    assert_eq!(present(&value).value, "'a \t b'");
}

#[test]
fn test_legacy_markup_element() {
    init_logger();
    let markup = Arc::new(FixedMarkup::default());
    let ctx = InspectContext::builder(Arc::new(ManualTransport::default()))
        .with_config(config(BackendFlavor::Legacy))
        .with_markup_evaluator(markup.clone())
        .build();

    let doc = ctx.root_value("doc", ELEMENT, ValueRole::Variable);
    let presentation = present(&doc);
    assert_eq!(presentation.type_name.as_deref(), Some("XML"));
    assert_eq!(presentation.value, "<root attr=\"v\">...</root> ");
    assert!(presentation.has_children);

    let full_value = presentation.full_value.unwrap();
    assert_eq!(
        full_value,
        FullValueEvaluator::Markup {
            expression: "doc".to_string(),
            raw_result: ELEMENT.to_string(),
            evaluator: markup.clone(),
        }
    );
    assert_eq!(
        evaluate_full(&full_value),
        Ok(FullValue {
            text: "<full expr=\"doc\"/>".to_string(),
            hint: ContentHint::Monospaced,
        })
    );
    assert_eq!(*markup.calls.lock().unwrap(), vec!["doc".to_string()]);

    let child = ctx.root_value("child", EMPTY_ELEMENT, ValueRole::Variable);
    let presentation = present(&child);
    assert_eq!(presentation.value, "<child/>");
    assert_eq!(presentation.full_value, None);
}

#[test]
fn test_legacy_markup_text_and_list() {
    let ctx = context(Arc::new(ManualTransport::default()), BackendFlavor::Legacy);

    let text = ctx.root_value("t", TEXT_NODE, ValueRole::Field);
    let presentation = present(&text);
    assert_eq!(presentation.value, "hello world");
    assert_eq!(presentation.category, Some(DisplayCategory::Field));

    let list = ctx.root_value("l", LIST, ValueRole::Variable);
    let presentation = present(&list);
    assert_eq!(presentation.type_name.as_deref(), Some("XMLList"));
    assert_eq!(presentation.value, "[62823132] ");

    // no markup evaluator configured
    let full_value = presentation.full_value.unwrap();
    assert!(evaluate_full(&full_value).is_err());
}

#[test]
fn test_legacy_markup_long_element_preview() {
    init_logger();
    let ctx = InspectContext::builder(Arc::new(ManualTransport::default()))
        .with_config(InspectorConfig {
            max_value_length: 10,
            ..config(BackendFlavor::Legacy)
        })
        .build();

    let doc = ctx.root_value("doc", ELEMENT, ValueRole::Variable);
    let presentation = present(&doc);
    assert_eq!(presentation.value, "<root attr... ");
    assert_eq!(
        presentation.full_value,
        Some(FullValueEvaluator::Markup {
            expression: "doc".to_string(),
            raw_result: ELEMENT.to_string(),
            evaluator: ctx.markup_evaluator(),
        })
    );
}

#[test]
fn test_legacy_markup_other_payload() {
    let ctx = context(Arc::new(ManualTransport::default()), BackendFlavor::Legacy);

    let comment = ctx.root_value(
        "c",
        "[Object 62823133, class='XML@3be9add comment x']",
        ValueRole::Variable,
    );
    let presentation = present(&comment);
    assert_eq!(presentation.type_name.as_deref(), Some("XML"));
    assert_eq!(presentation.value, " comment x");
    assert_eq!(presentation.full_value, None);
    assert!(presentation.has_children);

    // no payload at all, shown as a plain object
    let bare = ctx.root_value("b", "[Object 62823134, class='XML@3be9ade']", ValueRole::Variable);
    let presentation = present(&bare);
    assert_eq!(presentation.value, "[62823134]");
    assert_eq!(presentation.full_value, None);
}

#[test]
fn test_stringified_markup() {
    let transport = Arc::new(ManualTransport::default());
    let ctx = context(transport.clone(), BackendFlavor::Stringify);
    let doc = ctx.root_value("doc", ELEMENT, ValueRole::Variable);

    let (sink, rx) = presentation_sink();
    doc.compute_presentation(sink, &StaleToken::new());
    assert!(rx.try_recv().is_err());

    let mut requests = transport.take();
    assert_eq!(requests.len(), 1);
    let request = requests.remove(0);
    assert_eq!(request.command().as_str(), "doc.toXMLString()");

    request.deliver(Ok(
        "<root attr=\"v\">IDEA-ESCAPE-START\\nIDEA-ESCAPE-END  <b/>IDEA-ESCAPE-START\\nIDEA-ESCAPE-END</root>"
            .to_string(),
    ));

    let expected = "<root attr=\"v\">\n  <b/>\n</root>";
    let presentation = rx.recv_timeout(WAIT).unwrap();
    assert_eq!(presentation.value, format!("{expected} "));
    assert_eq!(presentation.type_name.as_deref(), Some("XML"));
    assert_eq!(
        presentation.full_value,
        Some(FullValueEvaluator::Text {
            text: expected.to_string(),
            hint: ContentHint::Monospaced,
        })
    );
}

#[test]
fn test_stringified_markup_error() {
    let transport = Arc::new(ManualTransport::default());
    let ctx = context(transport.clone(), BackendFlavor::Stringify);
    let doc = ctx.root_value("doc", LIST, ValueRole::Variable);

    let (sink, rx) = presentation_sink();
    doc.compute_presentation(sink, &StaleToken::new());
    for request in transport.take() {
        request.deliver(Err(Error::Evaluation("Variable doc unknown".to_string())));
    }

    let presentation = rx.recv_timeout(WAIT).unwrap();
    assert_eq!(presentation.value, "Variable doc unknown");
    assert_eq!(presentation.full_value, None);
}

#[test]
fn test_stale_stringified_markup() {
    let transport = Arc::new(ManualTransport::default());
    let ctx = context(transport.clone(), BackendFlavor::Stringify);
    let doc = ctx.root_value("doc", ELEMENT, ValueRole::Variable);

    let token = StaleToken::new();
    let (sink, rx) = presentation_sink();
    doc.compute_presentation(sink, &token);

    token.mark_stale();
    for request in transport.take() {
        assert!(request.is_stale());
        request.deliver(Ok("<root/>".to_string()));
    }

    assert!(rx.try_recv().is_err());
}

#[test]
fn test_assignment_expression_is_presented_plain() {
    let transport = Arc::new(ManualTransport::default());
    let ctx = context(transport.clone(), BackendFlavor::Stringify);
    let value = ctx.root_value("doc=other", ELEMENT, ValueRole::Other);

    let presentation = present(&value);
    assert_eq!(presentation.value, "[62823129]");
    assert!(transport.take().is_empty());
}
