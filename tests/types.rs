// ABOUTME: Integration tests for validated domain types.
// ABOUTME: Tests container name validation and MAC address normalisation.

use corral::types::*;
use proptest::prelude::*;

mod container_name_tests {
    use super::*;

    #[test]
    fn accepts_typical_names() {
        for name in ["web1", "db-primary", "build_agent.2", "A"] {
            assert_eq!(ContainerName::new(name).unwrap().as_str(), name);
        }
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(ContainerName::new(""), Err(ContainerNameError::Empty));
    }

    #[test]
    fn rejects_too_long() {
        let name = "a".repeat(65);
        assert_eq!(ContainerName::new(&name), Err(ContainerNameError::TooLong));
        assert!(ContainerName::new(&"a".repeat(64)).is_ok());
    }

    #[test]
    fn rejects_option_like_and_hidden_names() {
        assert_eq!(ContainerName::new("-P"), Err(ContainerNameError::BadStart('-')));
        assert_eq!(ContainerName::new(".."), Err(ContainerNameError::BadStart('.')));
    }

    #[test]
    fn rejects_path_separators_and_spaces() {
        assert_eq!(
            ContainerName::new("web/../etc"),
            Err(ContainerNameError::InvalidChar('/'))
        );
        assert_eq!(
            ContainerName::new("web 1"),
            Err(ContainerNameError::InvalidChar(' '))
        );
    }

    #[test]
    fn parses_from_str() {
        let name: ContainerName = "web1".parse().unwrap();
        assert_eq!(name.to_string(), "web1");
    }

    proptest! {
        #[test]
        fn valid_names_round_trip(name in "[A-Za-z0-9_][A-Za-z0-9_.-]{0,63}") {
            let parsed = ContainerName::new(&name).unwrap();
            prop_assert_eq!(parsed.as_str(), name.as_str());
        }

        #[test]
        fn names_with_a_slash_are_rejected(prefix in "[a-z]{1,10}", suffix in "[a-z]{0,10}") {
            let name = format!("{prefix}/{suffix}");
            prop_assert!(ContainerName::new(&name).is_err());
        }
    }
}

mod mac_address_tests {
    use super::*;

    #[test]
    fn normalises_case_and_separator() {
        let mac = MacAddress::parse("00-16-3E-5A-12-34").unwrap();
        assert_eq!(mac.to_string(), "00:16:3e:5a:12:34");
        assert_eq!(mac.octets(), [0x00, 0x16, 0x3e, 0x5a, 0x12, 0x34]);
    }

    #[test]
    fn zero_address_is_detected() {
        assert!(MacAddress::parse("00:00:00:00:00:00").unwrap().is_zero());
        assert!(!MacAddress::parse("00:16:3e:00:00:01").unwrap().is_zero());
    }

    #[test]
    fn rejects_wrong_length() {
        assert_eq!(
            MacAddress::parse("00:16:3e:5a:12"),
            Err(MacAddressError::WrongLength(5))
        );
    }

    #[test]
    fn rejects_bad_octets() {
        assert_eq!(
            MacAddress::parse("00:16:3e:5a:12:zz"),
            Err(MacAddressError::InvalidOctet("zz".to_string()))
        );
        assert!(MacAddress::parse("0:16:3e:5a:12:34").is_err());
    }

    proptest! {
        #[test]
        fn display_parses_back(octets in any::<[u8; 6]>()) {
            let text = format!(
                "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
                octets[0], octets[1], octets[2], octets[3], octets[4], octets[5]
            );
            let mac = MacAddress::parse(&text).unwrap();
            prop_assert_eq!(mac.octets(), octets);
            prop_assert_eq!(MacAddress::parse(&mac.to_string()).unwrap(), mac);
        }
    }
}
