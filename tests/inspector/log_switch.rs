use crate::common::{children_sink, context, names, ScriptedBackend, WAIT};
use fdbview::backend::StaleToken;
use fdbview::config::BackendFlavor;
use fdbview::value::ValueRole;
use serial_test::serial;

#[test]
#[serial]
fn test_expansion_with_disabled_logs() {
    let backend = ScriptedBackend::spawn(&[(
        "#9.",
        Ok("$1 = [Object 9, class='Foo']\nbroken line\na = 1"),
    )]);
    let ctx = context(backend.transport.clone(), BackendFlavor::Stringify);
    let foo = ctx.root_value("foo", "[Object 9, class='Foo']", ValueRole::Variable);

    fdbview::log::disable();
    assert!(!fdbview::log::is_enabled());

    let (sink, rx) = children_sink();
    foo.compute_children(sink, &StaleToken::new());
    let children = rx.recv_timeout(WAIT).unwrap();

    fdbview::log::enable();
    assert!(fdbview::log::is_enabled());
    assert_eq!(names(&children.unwrap()), vec!["a"]);
}
