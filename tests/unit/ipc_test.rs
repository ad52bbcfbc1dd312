use rstest::rstest;

use simzilla::ipc::{parse_message, render_script, ChromeCommand};
use simzilla::managers::shortcut_manager::KeyChord;
use simzilla::managers::tab_manager::{TabManager, TabManagerTrait};
use simzilla::services::address::AddressResolver;
use simzilla::surface::headless::HeadlessWorld;
use simzilla::types::errors::IpcError;

#[rstest]
#[case(r#"{"cmd":"ready"}"#, ChromeCommand::Ready)]
#[case(r#"{"cmd":"back"}"#, ChromeCommand::Back)]
#[case(r#"{"cmd":"forward"}"#, ChromeCommand::Forward)]
#[case(r#"{"cmd":"reload"}"#, ChromeCommand::Reload)]
#[case(r#"{"cmd":"new_tab"}"#, ChromeCommand::NewTab)]
#[case(r#"{"cmd":"navigate","input":"rust lang"}"#, ChromeCommand::Navigate { input: "rust lang".to_string() })]
#[case(r#"{"cmd":"close_tab","id":"t1"}"#, ChromeCommand::CloseTab { id: Some("t1".to_string()) })]
#[case(r#"{"cmd":"close_tab"}"#, ChromeCommand::CloseTab { id: None })]
#[case(r#"{"cmd":"activate_tab","id":"t2"}"#, ChromeCommand::ActivateTab { id: "t2".to_string() })]
#[case(r##"{"cmd":"location","url":"https://a.test/#top"}"##, ChromeCommand::Location { url: "https://a.test/#top".to_string() })]
fn test_parse_message(#[case] body: &str, #[case] expected: ChromeCommand) {
    assert_eq!(parse_message(body).unwrap(), expected);
}

#[test]
fn test_parse_key_message() {
    let command = parse_message(r#"{"cmd":"key","key":"t","ctrl":true}"#).unwrap();
    assert_eq!(
        command,
        ChromeCommand::Key(KeyChord {
            key: "t".to_string(),
            ctrl: true,
            ..KeyChord::default()
        })
    );
}

#[rstest]
#[case("")]
#[case("not json")]
#[case(r#"{"cmd":"self_destruct"}"#)]
#[case(r#"{"cmd":"navigate"}"#)]
#[case(r#"{"input":"x"}"#)]
fn test_parse_malformed(#[case] body: &str) {
    assert!(matches!(parse_message(body), Err(IpcError::Malformed(_))));
}

#[test]
fn test_render_script_carries_tabs_and_controls() {
    let world = HeadlessWorld::new();
    let mut mgr = TabManager::new(world.factory(), AddressResolver::default());
    let a = mgr.create_tab("a.test").unwrap();
    let b = mgr.create_tab("b.test").unwrap();
    world.deliver(&mut mgr);
    mgr.activate_tab(&a);

    let script = render_script(&mgr);

    let prefix = "window.__simzilla && window.__simzilla.render(";
    assert!(script.starts_with(prefix));
    assert!(script.ends_with(')'));
    let payload = &script[prefix.len()..script.len() - 1];
    let state: serde_json::Value = serde_json::from_str(payload).unwrap();

    assert_eq!(state["activeId"], a.as_str());
    let tabs = state["tabs"].as_array().unwrap();
    assert_eq!(tabs.len(), 2);
    assert_eq!(tabs[0]["id"], a.as_str());
    assert_eq!(tabs[1]["id"], b.as_str());
    assert_eq!(tabs[1]["title"], "b.test");
    assert_eq!(
        tabs[1]["favicon"],
        "https://www.google.com/s2/favicons?domain=b.test&sz=32"
    );
    assert_eq!(state["controls"]["address"], "https://a.test");
    assert_eq!(state["controls"]["canGoBack"], false);
    assert_eq!(state["controls"]["canGoForward"], false);
}

#[test]
fn test_render_script_without_tabs() {
    let world = HeadlessWorld::new();
    let mgr = TabManager::new(world.factory(), AddressResolver::default());
    let script = render_script(&mgr);
    assert!(script.contains(r#""activeId":null"#));
    assert!(script.contains(r#""tabs":[]"#));
}
