use crate::common::{frame_position, init_logger, ManualTransport, TestIndex};
use fdbview::symbols::{ClassDecl, MemberKind, SourcePosition};
use fdbview::value::{ValueNode, ValueRole};
use fdbview::InspectContext;
use std::sync::Arc;

fn index() -> TestIndex {
    let mut index = TestIndex::default()
        .with_class(
            ClassDecl::new("pkg.Base")
                .with_member(
                    "baseField",
                    MemberKind::Field,
                    false,
                    Some(SourcePosition::new("src/pkg/Base.as", 40)),
                )
                .with_member(
                    "label",
                    MemberKind::Getter,
                    false,
                    Some(SourcePosition::new("src/pkg/Base.as", 95)),
                ),
        )
        .with_class(
            ClassDecl::new("pkg.Foo")
                .with_member(
                    "ownField",
                    MemberKind::Field,
                    false,
                    Some(SourcePosition::new("src/pkg/Foo.as", 12)),
                )
                .with_super("pkg.Base"),
        )
        .with_class(ClassDecl::new("pkg.Loop1").with_super("pkg.Loop2"))
        .with_class(ClassDecl::new("pkg.Loop2").with_super("pkg.Loop1"));

    index
        .variables
        .insert("local".to_string(), SourcePosition::new("src/Main.as", 101));
    index
        .parameters
        .insert("arg".to_string(), SourcePosition::new("src/Main.as", 88));
    index
}

fn field(ctx: &Arc<InspectContext>, name: &str, parent_raw: &str) -> ValueNode {
    ValueNode::new(
        Arc::clone(ctx),
        name,
        format!("this.{name}"),
        "1",
        Some(parent_raw.to_string()),
        ValueRole::Field,
    )
}

#[test]
fn test_source_position() {
    init_logger();
    let ctx = InspectContext::builder(Arc::new(ManualTransport::default()))
        .with_symbols(Arc::new(index()))
        .with_position(frame_position())
        .build();

    struct TestCase {
        value: ValueNode,
        expected: Option<SourcePosition>,
    }

    let foo = "[Object 1, class='pkg::Foo']";
    let cases = [
        TestCase {
            value: ctx.root_value("local", "1", ValueRole::Variable),
            expected: Some(SourcePosition::new("src/Main.as", 101)),
        },
        TestCase {
            value: ctx.root_value("arg", "1", ValueRole::Parameter),
            expected: Some(SourcePosition::new("src/Main.as", 88)),
        },
        TestCase {
            value: ctx.root_value("unknown", "1", ValueRole::Variable),
            expected: None,
        },
        TestCase {
            value: ctx.root_value("this", foo, ValueRole::This),
            expected: None,
        },
        TestCase {
            value: field(&ctx, "ownField", foo),
            expected: Some(SourcePosition::new("src/pkg/Foo.as", 12)),
        },
        TestCase {
            value: field(&ctx, "baseField", foo),
            expected: Some(SourcePosition::new("src/pkg/Base.as", 40)),
        },
        TestCase {
            value: field(&ctx, "label", foo),
            expected: Some(SourcePosition::new("src/pkg/Base.as", 95)),
        },
        TestCase {
            // static context type name
            value: field(&ctx, "ownField", "[Object 2, class='pkg::Foo$']"),
            expected: Some(SourcePosition::new("src/pkg/Foo.as", 12)),
        },
        TestCase {
            value: field(&ctx, "missing", "[Object 3, class='pkg::Loop1']"),
            expected: None,
        },
        TestCase {
            value: field(&ctx, "a", "[Object 4, class='Main$/staticFunction']"),
            expected: None,
        },
    ];

    for tc in cases {
        assert_eq!(
            tc.value.compute_source_position(),
            tc.expected,
            "value: {:?}",
            tc.value
        );
    }
}

#[test]
fn test_source_position_requires_frame_position() {
    init_logger();
    let ctx = InspectContext::builder(Arc::new(ManualTransport::default()))
        .with_symbols(Arc::new(index()))
        .build();

    let local = ctx.root_value("local", "1", ValueRole::Variable);
    assert_eq!(local.compute_source_position(), None);
}
