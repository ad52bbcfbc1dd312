//! Property-based tests for address-bar input interpretation.

use proptest::prelude::*;
use simzilla::services::address::AddressResolver;

const HOMEPAGE: &str = "https://www.google.com";
const SEARCH: &str = "https://www.google.com/search?q=";

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // Free text without dots always becomes a search for exactly that text.
    #[test]
    fn dot_free_text_becomes_search(input in "[a-zA-Z0-9 _!?&=#%/-]{1,40}") {
        prop_assume!(!input.trim().is_empty());
        prop_assume!(!input.trim().starts_with("http://") && !input.trim().starts_with("https://"));

        let resolver = AddressResolver::default();
        let url = resolver.to_url(&input);

        prop_assert!(url.starts_with(SEARCH));
        let query = &url[SEARCH.len()..];
        let decoded = urlencoding::decode(query).unwrap();
        prop_assert_eq!(decoded.as_ref(), input.trim());
        prop_assert!(!query.contains(' '));
        prop_assert!(!query.contains('&'));
    }

    // Addresses that already carry a scheme are left alone.
    #[test]
    fn http_addresses_pass_through(
        scheme in prop_oneof![Just("http://"), Just("https://")],
        rest in "[a-z0-9./?=&#-]{0,40}",
    ) {
        let input = format!("{}{}", scheme, rest);
        let resolver = AddressResolver::default();
        prop_assert_eq!(resolver.to_url(&input), input);
    }

    // Dotted input without spaces is treated as a host.
    #[test]
    fn dotted_hosts_get_https(host in "[a-z0-9-]{1,20}\\.[a-z]{2,6}(/[a-z0-9]{0,10})?") {
        let resolver = AddressResolver::default();
        prop_assert_eq!(resolver.to_url(&host), format!("https://{}", host));
    }

    // Blank input of any length opens the homepage.
    #[test]
    fn blank_input_is_homepage(input in "[ \t]{0,10}") {
        let resolver = AddressResolver::default();
        prop_assert_eq!(resolver.to_url(&input), HOMEPAGE);
    }

    // Normalizing twice changes nothing.
    #[test]
    fn to_url_is_idempotent(input in "[a-zA-Z0-9 .:/?=&-]{0,40}") {
        let resolver = AddressResolver::default();
        let once = resolver.to_url(&input);
        prop_assert_eq!(resolver.to_url(&once), once);
    }

    // Any address with a host has a favicon; the icon is keyed by that host.
    #[test]
    fn favicon_is_keyed_by_host(host in "[a-z]{1,12}\\.[a-z]{2,4}", path in "(/[a-z0-9]{0,8}){0,3}") {
        let resolver = AddressResolver::default();
        let favicon = resolver.favicon_for(&format!("https://{}{}", host, path));
        prop_assert_eq!(
            favicon,
            Some(format!("https://www.google.com/s2/favicons?domain={}&sz=32", host))
        );
    }
}
