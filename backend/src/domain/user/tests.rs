//! Tests for the domain user model.

use super::*;
use rstest::rstest;
use serde_json::json;

const VALID_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[rstest]
#[case("")]
#[case("not-a-uuid")]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6")]
fn user_id_rejects_invalid_values(#[case] raw: &str) {
    assert_eq!(UserId::new(raw), Err(UserValidationError::InvalidId));
}

#[rstest]
fn user_id_round_trips_through_string() {
    let id = UserId::new(VALID_ID).expect("valid uuid");
    assert_eq!(id.to_string(), VALID_ID);
    assert_eq!(String::from(id.clone()), VALID_ID);
    assert_eq!(UserId::from_uuid(*id.as_uuid()), id);
}

#[rstest]
#[case("ada@example.com")]
#[case("  ada.lovelace+calc@mail.example.org  ")]
#[case("a@b.c")]
fn email_accepts_valid_addresses(#[case] raw: &str) {
    let email = EmailAddress::new(raw).expect("valid email");
    assert_eq!(email.as_ref(), raw.trim());
}

#[rstest]
#[case("ab", UserValidationError::EmailLength { min: EMAIL_MIN, max: EMAIL_MAX })]
#[case("no-at-sign.example.com", UserValidationError::InvalidEmail)]
#[case("two@@example.com", UserValidationError::InvalidEmail)]
#[case("ada@localhost", UserValidationError::InvalidEmail)]
#[case("ada@.example", UserValidationError::InvalidEmail)]
#[case("ada@example.", UserValidationError::InvalidEmail)]
#[case("ada lovelace@example.com", UserValidationError::InvalidEmail)]
#[case("@example.com", UserValidationError::InvalidEmail)]
fn email_rejects_invalid_addresses(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(EmailAddress::new(raw), Err(expected));
}

#[rstest]
fn email_rejects_overlong_addresses() {
    let raw = format!("{}@example.com", "a".repeat(EMAIL_MAX));
    assert_eq!(
        EmailAddress::new(raw),
        Err(UserValidationError::EmailLength {
            min: EMAIL_MIN,
            max: EMAIL_MAX
        })
    );
}

#[rstest]
#[case("ada")]
#[case("ada_lovelace-1815.x")]
#[case("  Ada  ")]
fn username_accepts_valid_values(#[case] raw: &str) {
    let username = Username::new(raw).expect("valid username");
    assert_eq!(username.as_ref(), raw.trim());
}

#[rstest]
#[case("ab", UserValidationError::UsernameLength { min: USERNAME_MIN, max: USERNAME_MAX })]
#[case("ada lovelace", UserValidationError::UsernameInvalidCharacters)]
#[case("ada$", UserValidationError::UsernameInvalidCharacters)]
#[case("ädä", UserValidationError::UsernameInvalidCharacters)]
fn username_rejects_invalid_values(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(Username::new(raw), Err(expected));
}

#[rstest]
fn username_rejects_overlong_values() {
    let raw = "a".repeat(USERNAME_MAX + 1);
    assert!(matches!(
        Username::new(raw),
        Err(UserValidationError::UsernameLength { .. })
    ));
}

#[rstest]
fn usernames_are_case_sensitive() {
    let lower = Username::new("ada").expect("valid");
    let upper = Username::new("Ada").expect("valid");
    assert_ne!(lower, upper);
}

#[rstest]
fn user_serialises_public_fields_only() {
    let user = User::new(
        UserId::new(VALID_ID).expect("valid id"),
        EmailAddress::new("ada@example.com").expect("valid email"),
        Username::new("ada").expect("valid username"),
        true,
        DateTime::<Utc>::UNIX_EPOCH,
    );

    let value = serde_json::to_value(&user).expect("user serialises");

    assert_eq!(
        value,
        json!({
            "id": VALID_ID,
            "email": "ada@example.com",
            "username": "ada",
            "isActive": true,
            "createdAt": "1970-01-01T00:00:00Z",
        })
    );
}

#[rstest]
fn validation_errors_name_their_field() {
    assert_eq!(UserValidationError::InvalidEmail.field(), "email");
    assert_eq!(
        UserValidationError::UsernameInvalidCharacters.field(),
        "username"
    );
}
