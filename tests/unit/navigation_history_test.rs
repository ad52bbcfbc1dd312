use simzilla::surface::history::NavigationHistory;

fn history_of(urls: &[&str]) -> NavigationHistory {
    let mut history = NavigationHistory::new();
    for url in urls {
        history.commit(url);
    }
    history
}

#[test]
fn test_new_history_is_empty() {
    let history = NavigationHistory::new();
    assert!(history.is_empty());
    assert_eq!(history.current(), None);
    assert!(!history.can_go_back());
    assert!(!history.can_go_forward());
}

#[test]
fn test_commit_appends_entries() {
    let history = history_of(&["https://a.test/", "https://b.test/"]);
    assert_eq!(history.len(), 2);
    assert_eq!(history.current(), Some("https://b.test/"));
    assert!(history.can_go_back());
    assert!(!history.can_go_forward());
}

#[test]
fn test_commit_ignores_empty_and_repeated_urls() {
    let mut history = history_of(&["https://a.test/"]);
    history.commit("");
    history.commit("https://a.test/");
    assert_eq!(history.len(), 1);
}

#[test]
fn test_back_then_commit_moves_cursor() {
    let mut history = history_of(&["https://a.test/", "https://b.test/"]);

    assert_eq!(history.begin_back(), Some("https://a.test/"));
    // Nothing moves until the surface confirms the traversal.
    assert_eq!(history.current(), Some("https://b.test/"));

    history.commit("https://a.test/");
    assert_eq!(history.current(), Some("https://a.test/"));
    assert!(history.can_go_forward());
    assert_eq!(history.len(), 2);
}

#[test]
fn test_forward_after_back() {
    let mut history = history_of(&["https://a.test/", "https://b.test/"]);
    history.begin_back();
    history.commit("https://a.test/");

    assert_eq!(history.begin_forward(), Some("https://b.test/"));
    history.commit("https://b.test/");
    assert_eq!(history.current(), Some("https://b.test/"));
    assert!(!history.can_go_forward());
}

#[test]
fn test_new_navigation_discards_forward_entries() {
    let mut history = history_of(&["https://a.test/", "https://b.test/", "https://c.test/"]);
    history.begin_back();
    history.commit("https://b.test/");

    history.commit("https://d.test/");
    assert_eq!(
        history.entries(),
        &["https://a.test/", "https://b.test/", "https://d.test/"]
    );
    assert!(!history.can_go_forward());
}

#[test]
fn test_traversal_landing_elsewhere_replaces_entry() {
    let mut history = history_of(&["http://a.test/", "https://b.test/"]);
    history.begin_back();
    history.commit("https://a.test/");
    assert_eq!(history.entries(), &["https://a.test/", "https://b.test/"]);
    assert_eq!(history.current(), Some("https://a.test/"));
}

#[test]
fn test_begin_back_at_start_is_none() {
    let mut history = history_of(&["https://a.test/"]);
    assert_eq!(history.begin_back(), None);
    assert_eq!(history.begin_forward(), None);
    // No traversal pending, so a new address is a new entry.
    history.commit("https://b.test/");
    assert_eq!(history.len(), 2);
}

#[test]
fn test_new_load_after_cancelled_traversal_drops_forward_entries() {
    let mut history = history_of(&["https://a.test/", "https://b.test/", "https://c.test/"]);
    history.begin_back();
    assert!(history.has_pending());

    // A typed address replaces the back navigation before it lands.
    history.cancel_pending();
    history.commit("https://d.test/");

    assert!(!history.has_pending());
    assert_eq!(
        history.entries(),
        &["https://a.test/", "https://b.test/", "https://c.test/", "https://d.test/"]
    );
    assert_eq!(history.current(), Some("https://d.test/"));
    assert!(!history.can_go_forward());
}

#[test]
fn test_rejected_traversal_leaves_history_intact() {
    let mut history = history_of(&["https://a.test/", "https://b.test/"]);
    history.begin_forward();
    history.begin_back();
    history.cancel_pending();

    // The next report is an ordinary navigation, not a traversal.
    history.commit("https://b.test/");
    assert_eq!(history.entries(), &["https://a.test/", "https://b.test/"]);
    assert_eq!(history.current(), Some("https://b.test/"));
    assert!(history.can_go_back());
    assert!(!history.can_go_forward());
}
