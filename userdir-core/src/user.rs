//! The user record and the request body it is built from.

use std::fmt;

use serde::{
    de::{IgnoredAny, MapAccess, Visitor},
    Deserialize, Deserializer, Serialize,
};

use crate::{error::CoreError, id::UserId};

/// A user record held by the [`UserStore`](crate::UserStore).
///
/// The password is write-only: it is kept in memory but never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[non_exhaustive]
pub struct User {
    /// Store-assigned identifier.
    pub id: UserId,
    #[cfg_attr(feature = "openapi", schema(example = "John Doe"))]
    pub name: String,
    #[cfg_attr(feature = "openapi", schema(example = "john.doe@example.com"))]
    pub email: String,
    #[serde(skip)]
    pub password: String,
}

impl User {
    /// Creates a user without a password.
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            password: String::new(),
        }
    }

    /// Sets the password, consuming and returning `self`.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }
}

/// Request body accepted by create and replace.
///
/// Decoding is forgiving:
/// - absent fields stay empty and unknown fields are skipped;
/// - keys match field names ignoring ASCII case;
/// - `null` leaves a field untouched;
/// - a repeated key overwrites the earlier value.
///
/// A client-supplied `id` must still be an integer, but the store never
/// honors it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[non_exhaustive]
pub struct UserDraft {
    /// Ignored; ids are assigned by the store or taken from the path.
    pub id: Option<UserId>,
    #[cfg_attr(feature = "openapi", schema(example = "John Doe", required = false))]
    pub name: String,
    #[cfg_attr(
        feature = "openapi",
        schema(example = "john.doe@example.com", required = false)
    )]
    pub email: String,
    #[cfg_attr(feature = "openapi", schema(required = false))]
    pub password: String,
}

#[derive(Clone, Copy)]
enum DraftField {
    Id,
    Name,
    Email,
    Password,
}

impl DraftField {
    fn resolve(key: &str) -> Option<Self> {
        [
            ("id", Self::Id),
            ("name", Self::Name),
            ("email", Self::Email),
            ("password", Self::Password),
        ]
        .into_iter()
        .find(|(name, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, field)| field)
    }
}

struct DraftVisitor;

impl<'de> Visitor<'de> for DraftVisitor {
    type Value = UserDraft;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a user object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<UserDraft, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut draft = UserDraft::default();
        while let Some(key) = map.next_key::<String>()? {
            match DraftField::resolve(&key) {
                Some(DraftField::Id) => {
                    if let Some(id) = map.next_value::<Option<UserId>>()? {
                        draft.id = Some(id);
                    }
                }
                Some(field @ (DraftField::Name | DraftField::Email | DraftField::Password)) => {
                    let Some(value) = map.next_value::<Option<String>>()? else {
                        continue;
                    };
                    match field {
                        DraftField::Name => draft.name = value,
                        DraftField::Email => draft.email = value,
                        _ => draft.password = value,
                    }
                }
                None => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(draft)
    }
}

impl<'de> Deserialize<'de> for UserDraft {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(DraftVisitor)
    }
}

impl UserDraft {
    /// Creates a draft with the given name and email and no password.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            password: String::new(),
        }
    }

    /// Decodes the first JSON value of a request body.
    ///
    /// Anything after that value is ignored, and a bare `null` yields an
    /// empty draft.
    ///
    /// # Errors
    /// Returns [`CoreError::Decode`] carrying the parser message when the
    /// body holds no value, or when its first value is not an object whose
    /// known fields have the right types.
    pub fn from_json(bytes: &[u8]) -> Result<Self, CoreError> {
        let mut values = serde_json::Deserializer::from_slice(bytes).into_iter::<Option<Self>>();
        match values.next() {
            Some(Ok(draft)) => Ok(draft.unwrap_or_default()),
            Some(Err(e)) => Err(CoreError::Decode(e.to_string())),
            None => Err(CoreError::Decode("EOF".to_owned())),
        }
    }

    /// Builds the stored record, discarding any client-supplied id.
    #[must_use]
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            password: self.password,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_serialization_omits_password() {
        let user = User::new(UserId(1), "John Doe", "john.doe@example.com").with_password("hunter2");
        let json = match serde_json::to_string(&user) {
            Ok(s) => s,
            Err(e) => panic!("serialization failed: {e}"),
        };
        assert_eq!(json, r#"{"id":1,"name":"John Doe","email":"john.doe@example.com"}"#);
        assert!(!json.contains("hunter2"), "password must never be serialized");
    }

    #[test]
    fn draft_missing_fields_default_to_empty() {
        let draft = match UserDraft::from_json(b"{}") {
            Ok(d) => d,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(draft, UserDraft::default());
    }

    #[test]
    fn draft_ignores_unknown_fields() {
        let draft = match UserDraft::from_json(br#"{"name":"X","email":"x@x","role":"admin"}"#) {
            Ok(d) => d,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(draft.name, "X");
        assert_eq!(draft.email, "x@x");
    }

    #[test]
    fn draft_decodes_password() {
        let draft = match UserDraft::from_json(br#"{"name":"X","password":"s3cret"}"#) {
            Ok(d) => d,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(draft.password, "s3cret");
    }

    #[test]
    fn draft_type_mismatch_is_decode_error() {
        let err = UserDraft::from_json(br#"{"name":42}"#);
        assert!(matches!(err, Err(CoreError::Decode(_))), "got {err:?}");

        let err = UserDraft::from_json(br#"{"id":"seven"}"#);
        assert!(matches!(err, Err(CoreError::Decode(_))), "string id must be rejected");
    }

    #[test]
    fn draft_malformed_json_carries_parser_message() {
        match UserDraft::from_json(b"{\"name\":") {
            Err(CoreError::Decode(reason)) => {
                assert!(reason.contains("EOF"), "reason should come from the parser: {reason}");
            }
            other => panic!("expected Decode, got {other:?}"),
        }
        assert!(UserDraft::from_json(b"").is_err(), "empty body must not decode");
    }

    fn decode(body: &[u8]) -> UserDraft {
        match UserDraft::from_json(body) {
            Ok(d) => d,
            Err(e) => panic!("unexpected error for {:?}: {e}", String::from_utf8_lossy(body)),
        }
    }

    #[test]
    fn draft_null_field_leaves_value_untouched() {
        let draft = decode(br#"{"name":null,"email":"x@x"}"#);
        assert_eq!(draft.name, "");
        assert_eq!(draft.email, "x@x");

        let draft = decode(br#"{"name":"a","name":null,"id":null}"#);
        assert_eq!(draft.name, "a", "null must not clear an earlier value");
        assert_eq!(draft.id, None);
    }

    #[test]
    fn draft_bare_null_body_is_empty_draft() {
        assert_eq!(decode(b"null"), UserDraft::default());
        assert_eq!(decode(b"  null\n"), UserDraft::default());
    }

    #[test]
    fn draft_ignores_data_after_first_value() {
        let draft = decode(br#"{"name":"X"} {}"#);
        assert_eq!(draft.name, "X");

        let draft = decode(br#"{"name":"X"}garbage"#);
        assert_eq!(draft.name, "X");
    }

    #[test]
    fn draft_repeated_key_keeps_last_value() {
        let draft = decode(br#"{"name":"a","name":"b"}"#);
        assert_eq!(draft.name, "b");
    }

    #[test]
    fn draft_keys_match_ignoring_case() {
        let draft = decode(br#"{"Name":"a","EMAIL":"a@a","PassWord":"pw","ID":4}"#);
        assert_eq!(draft.name, "a");
        assert_eq!(draft.email, "a@a");
        assert_eq!(draft.password, "pw");
        assert_eq!(draft.id, Some(UserId(4)));

        let draft = decode(br#"{"name":"a","Name":"b"}"#);
        assert_eq!(draft.name, "b", "later key wins whatever its case");
    }

    #[test]
    fn draft_rejects_non_object_and_empty_bodies() {
        for body in [&b"[1]"[..], b"5", b"\"name\"", b"   "] {
            let err = UserDraft::from_json(body);
            assert!(
                matches!(err, Err(CoreError::Decode(_))),
                "{:?} must be rejected, got {err:?}",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn into_user_discards_client_id() {
        let draft = match UserDraft::from_json(br#"{"id":99,"name":"X","email":"x@x"}"#) {
            Ok(d) => d,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(draft.id, Some(UserId(99)));
        let user = draft.into_user(UserId(3));
        assert_eq!(user.id, UserId(3));
        assert_eq!(user.name, "X");
    }
}
