//! # Constraint Kinds
//!
//! The fixed catalog of comparison operators and the field kinds each one
//! applies to.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::FieldKind;

/// Comparison operators, spelled in camelCase in query text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConstraintKind {
    /// Field is present
    Exists,
    /// Field is absent
    DoesNotExist,
    /// Equals
    EqualTo,
    /// Not equals
    NotEqualTo,
    /// Less than
    LessThan,
    /// Less than or equal
    LessThanOrEqualTo,
    /// Greater than
    GreaterThan,
    /// Greater than or equal
    GreaterThanOrEqualTo,
    /// String prefix
    StartsWith,
    /// String suffix
    EndsWith,
    /// Substring or array membership
    Contains,
    /// Negated array membership
    DoesNotContain,
    /// Array contains every given value
    ContainsAll,
    /// Value in list
    ContainedIn,
    /// Value not in list
    NotContainedIn,
    /// Date strictly before
    Before,
    /// Date strictly after
    After,
    /// Geo proximity
    Near,
    /// Member of a relation
    RelatedTo,
}

use ConstraintKind::*;

const STRING_CONSTRAINTS: &[ConstraintKind] = &[
    Exists,
    DoesNotExist,
    EqualTo,
    NotEqualTo,
    StartsWith,
    EndsWith,
    Contains,
    ContainedIn,
    NotContainedIn,
];

const NUMBER_CONSTRAINTS: &[ConstraintKind] = &[
    Exists,
    DoesNotExist,
    EqualTo,
    NotEqualTo,
    LessThan,
    LessThanOrEqualTo,
    GreaterThan,
    GreaterThanOrEqualTo,
    ContainedIn,
    NotContainedIn,
];

const BOOLEAN_CONSTRAINTS: &[ConstraintKind] = &[Exists, DoesNotExist, EqualTo];

const DATE_CONSTRAINTS: &[ConstraintKind] = &[Exists, DoesNotExist, Before, After];

const POINTER_CONSTRAINTS: &[ConstraintKind] = &[Exists, DoesNotExist, EqualTo, NotEqualTo];

const RELATION_CONSTRAINTS: &[ConstraintKind] = &[RelatedTo];

const ARRAY_CONSTRAINTS: &[ConstraintKind] =
    &[Exists, DoesNotExist, Contains, DoesNotContain, ContainsAll];

const PRESENCE_CONSTRAINTS: &[ConstraintKind] = &[Exists, DoesNotExist];

const GEOPOINT_CONSTRAINTS: &[ConstraintKind] = &[Exists, DoesNotExist, Near];

impl ConstraintKind {
    /// Every constraint kind, in declaration order
    pub const ALL: [ConstraintKind; 19] = [
        Exists,
        DoesNotExist,
        EqualTo,
        NotEqualTo,
        LessThan,
        LessThanOrEqualTo,
        GreaterThan,
        GreaterThanOrEqualTo,
        StartsWith,
        EndsWith,
        Contains,
        DoesNotContain,
        ContainsAll,
        ContainedIn,
        NotContainedIn,
        Before,
        After,
        Near,
        RelatedTo,
    ];

    /// Get the spelling used in query text
    pub fn as_str(&self) -> &'static str {
        match self {
            Exists => "exists",
            DoesNotExist => "doesNotExist",
            EqualTo => "equalTo",
            NotEqualTo => "notEqualTo",
            LessThan => "lessThan",
            LessThanOrEqualTo => "lessThanOrEqualTo",
            GreaterThan => "greaterThan",
            GreaterThanOrEqualTo => "greaterThanOrEqualTo",
            StartsWith => "startsWith",
            EndsWith => "endsWith",
            Contains => "contains",
            DoesNotContain => "doesNotContain",
            ContainsAll => "containsAll",
            ContainedIn => "containedIn",
            NotContainedIn => "notContainedIn",
            Before => "before",
            After => "after",
            Near => "near",
            RelatedTo => "relatedTo",
        }
    }

    /// Constraints compatible with a field kind, in priority order
    pub fn for_kind(kind: FieldKind) -> &'static [ConstraintKind] {
        match kind {
            FieldKind::String => STRING_CONSTRAINTS,
            FieldKind::Number => NUMBER_CONSTRAINTS,
            FieldKind::Boolean => BOOLEAN_CONSTRAINTS,
            FieldKind::Date => DATE_CONSTRAINTS,
            FieldKind::Pointer => POINTER_CONSTRAINTS,
            FieldKind::Relation => RELATION_CONSTRAINTS,
            FieldKind::Array => ARRAY_CONSTRAINTS,
            FieldKind::Object | FieldKind::File => PRESENCE_CONSTRAINTS,
            FieldKind::GeoPoint => GEOPOINT_CONSTRAINTS,
        }
    }

    /// Check if this constraint applies to a field kind
    pub fn is_compatible_with(&self, kind: FieldKind) -> bool {
        Self::for_kind(kind).contains(self)
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A constraint spelling that names no known operator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown constraint: {0}")]
pub struct UnknownConstraint(pub String);

impl FromStr for ConstraintKind {
    type Err = UnknownConstraint;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownConstraint(s.to_string()))
    }
}

/// Constraint kinds disallowed regardless of field type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blacklist {
    kinds: BTreeSet<ConstraintKind>,
}

impl Blacklist {
    /// Kinds the backend never supports from the query language
    pub const BUILTIN: [ConstraintKind; 1] = [ContainsAll];

    /// A blacklist that allows everything
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in blacklist
    pub fn builtin() -> Self {
        Self {
            kinds: Self::BUILTIN.into_iter().collect(),
        }
    }

    /// Add a kind to the blacklist
    pub fn with(mut self, kind: ConstraintKind) -> Self {
        self.kinds.insert(kind);
        self
    }

    /// Check if a kind is disallowed
    pub fn contains(&self, kind: ConstraintKind) -> bool {
        self.kinds.contains(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl Extend<ConstraintKind> for Blacklist {
    fn extend<I: IntoIterator<Item = ConstraintKind>>(&mut self, iter: I) {
        self.kinds.extend(iter);
    }
}
