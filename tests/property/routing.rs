// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Routing Type Parsing

use messaging_harness::broker::RoutingType;
use proptest::prelude::*;

fn single_token() -> impl Strategy<Value = (String, RoutingType)> {
    prop_oneof![
        Just(("anycast", RoutingType::Anycast)),
        Just(("multicast", RoutingType::Multicast)),
    ]
    .prop_flat_map(|(word, routing)| {
        proptest::collection::vec(any::<bool>(), word.len()).prop_map(move |upper| {
            let token: String = word
                .chars()
                .zip(upper)
                .map(|(c, up)| if up { c.to_ascii_uppercase() } else { c })
                .collect();
            (token, routing)
        })
    })
}

proptest! {
    /// The first advertised token decides, whatever the decoration
    #[test]
    fn prop_advertised_first_token_wins(
        tokens in proptest::collection::vec(single_token(), 1..4),
        bracketed in any::<bool>(),
        separator in prop_oneof![Just(","), Just(", "), Just(" ")],
    ) {
        let joined = tokens.iter().map(|(t, _)| t.as_str()).collect::<Vec<_>>().join(separator);
        let advertised = if bracketed { format!("[{}]", joined) } else { joined };

        let parsed = RoutingType::from_advertised(&advertised).unwrap();

        prop_assert_eq!(parsed, tokens[0].1);
        prop_assert!(parsed.is_queue_type());
    }

    /// Strings without a routing keyword never parse
    #[test]
    fn prop_unrecognized_values_are_malformed(value in "[^aAmM]*") {
        prop_assert!(RoutingType::from_advertised(&value).is_err());
    }
}
