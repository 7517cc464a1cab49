//! Result values returned across the store boundary.
//!
//! Two absence conventions coexist and are kept distinct:
//!
//! - [`Lookup::Absent`] is the normal "no such entity" answer of a lookup and
//!   serializes as an empty object `{}`.
//! - [`Outcome::Rejected`] carries a [`Rejection`] (incomplete candidate,
//!   unknown question) and serializes as `{"error": "<message>"}`.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Result of looking an entity up by id.
#[derive(Clone, Debug, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    Absent,
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn found(&self) -> Option<&T> {
        match self {
            Self::Found(value) => Some(value),
            Self::Absent => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::Absent => None,
        }
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Found(value),
            None => Self::Absent,
        }
    }
}

impl<T: Serialize> Serialize for Lookup<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Found(value) => value.serialize(serializer),
            Self::Absent => serializer.serialize_map(Some(0))?.end(),
        }
    }
}

/// Why a store operation declined to produce its value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum Rejection {
    /// The candidate lacks an `author` or a `summary` field.
    #[error("Provided no author or no summary")]
    Incomplete,

    /// The referenced question id matches no stored question.
    #[error("Question doesn't exist")]
    QuestionNotFound,
}

impl Serialize for Rejection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("error", &self.to_string())?;
        map.end()
    }
}

/// Result of an operation that may be rejected without a storage fault.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome<T> {
    Done(T),
    Rejected(Rejection),
}

impl<T> Outcome<T> {
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Self::Done(_) => None,
            Self::Rejected(rejection) => Some(*rejection),
        }
    }

    pub fn into_result(self) -> Result<T, Rejection> {
        match self {
            Self::Done(value) => Ok(value),
            Self::Rejected(rejection) => Err(rejection),
        }
    }
}

impl<T> From<Result<T, Rejection>> for Outcome<T> {
    fn from(result: Result<T, Rejection>) -> Self {
        match result {
            Ok(value) => Self::Done(value),
            Err(rejection) => Self::Rejected(rejection),
        }
    }
}

impl<T: Serialize> Serialize for Outcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Done(value) => value.serialize(serializer),
            Self::Rejected(rejection) => rejection.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_serializes_as_empty_object() {
        let absent: Lookup<u32> = Lookup::Absent;
        assert_eq!(serde_json::to_value(&absent).unwrap(), json!({}));
    }

    #[test]
    fn found_serializes_transparently() {
        let found = Lookup::Found(json!({ "id": "a1" }));
        assert_eq!(serde_json::to_value(&found).unwrap(), json!({ "id": "a1" }));
    }

    #[test]
    fn rejection_messages() {
        assert_eq!(
            serde_json::to_value(Rejection::Incomplete).unwrap(),
            json!({ "error": "Provided no author or no summary" })
        );
        assert_eq!(
            serde_json::to_value(Rejection::QuestionNotFound).unwrap(),
            json!({ "error": "Question doesn't exist" })
        );
    }

    #[test]
    fn nested_absent_inside_done() {
        let outcome: Outcome<Lookup<String>> = Outcome::Done(Lookup::Absent);
        assert_eq!(serde_json::to_value(&outcome).unwrap(), json!({}));
        assert!(outcome.is_done());
        assert_eq!(outcome.rejection(), None);
    }

    #[test]
    fn outcome_conversions() {
        let rejected: Outcome<()> = Err(Rejection::QuestionNotFound).into();
        assert!(rejected.is_rejected());
        assert_eq!(rejected.clone().into_result(), Err(Rejection::QuestionNotFound));

        let lookup: Lookup<i32> = Some(7).into();
        assert_eq!(lookup.found(), Some(&7));
        assert_eq!(Lookup::<i32>::from(None).into_option(), None);
    }
}
