use crate::{ChatRef, FetchError};

#[test]
fn test_parse_username() {
    assert_eq!(
        ChatRef::parse("@rustlang").unwrap(),
        ChatRef::Username("rustlang".to_string())
    );
    assert_eq!(
        ChatRef::parse("rust_lang").unwrap(),
        ChatRef::Username("rust_lang".to_string())
    );
    assert_eq!(
        ChatRef::parse(" https://t.me/rustlang/ ").unwrap(),
        ChatRef::Username("rustlang".to_string())
    );
}

#[test]
fn test_parse_channel_id() {
    assert_eq!(
        ChatRef::parse("-1001234567890").unwrap(),
        ChatRef::Channel(1234567890)
    );
}

#[test]
fn test_parse_group_id() {
    assert_eq!(ChatRef::parse("-4567").unwrap(), ChatRef::Group(4567));
    assert_eq!(ChatRef::parse("-100").unwrap(), ChatRef::Group(100));
}

#[test]
fn test_parse_user_id() {
    assert_eq!(ChatRef::parse("777000").unwrap(), ChatRef::User(777000));
}

#[test]
fn test_parse_invalid() {
    for input in ["", "   ", "0", "@", "has space", "name!", "-1000"] {
        assert!(
            matches!(ChatRef::parse(input), Err(FetchError::InvalidChat(_))),
            "{input:?} should be rejected"
        );
    }
}

#[test]
fn test_display_round_trips_numeric_ids() {
    for input in ["-1001234567890", "-4567", "777000"] {
        let chat = ChatRef::parse(input).unwrap();
        assert_eq!(chat.to_string(), input);
    }
    assert_eq!(ChatRef::parse("rustlang").unwrap().to_string(), "@rustlang");
}

#[test]
fn test_parse_rejects_unnegatable_group_id() {
    assert!(matches!(
        ChatRef::parse("-9223372036854775808"),
        Err(FetchError::InvalidChat(_))
    ));
    assert_eq!(
        ChatRef::parse("-9223372036854775807").unwrap(),
        ChatRef::Group(i64::MAX)
    );
}
