//! Validation of the type and package names used in dependency rules.
//!
//! A name is a dot-separated sequence of Java identifiers, e.g.
//! `com.foo.Bar` or `sun.misc`. The single token [`ALL_TYPES_WILDCARD`]
//! stands for every type and skips validation.

use miette::Diagnostic;
use std::fmt;
use unicode_general_category::{get_general_category, GeneralCategory};

/// Wildcard matching all types and packages.
pub const ALL_TYPES_WILDCARD: &str = "*";

/// Separator between the parts of a qualified name.
pub const SEPARATOR: char = '.';

/// Which side of a rule a name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// The type or package that depends on an internal API.
    Dependent,
    /// The internal API that is depended upon.
    Dependency,
}

impl Role {
    /// Returns the lower-case field name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dependent => "dependent",
            Self::Dependency => "dependency",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A name in a rule is not a valid qualified Java name.
///
/// Every message embeds the rule's canonical form so the misconfigured
/// rule can be found.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Diagnostic)]
pub enum IdentifierError {
    /// The name is missing or empty.
    #[error("The rule {rule} defines no {role}.")]
    #[diagnostic(code(jdeps_guard::identifier::undefined))]
    Undefined {
        /// Canonical form of the offending rule.
        rule: String,
        /// Which name is missing.
        role: Role,
    },

    /// The name has an empty part (leading, trailing or doubled dot).
    #[error("In the rule {rule} the name '{name}' contains one empty part.")]
    #[diagnostic(
        code(jdeps_guard::identifier::empty_part),
        help("remove the leading, trailing or doubled '.'")
    )]
    EmptyPart {
        /// Canonical form of the offending rule.
        rule: String,
        /// Which name is invalid.
        role: Role,
        /// The invalid name.
        name: String,
    },

    /// A part of the name starts with a character that cannot start an identifier.
    #[error(
        "In the rule {rule} a part of the name '{name}' starts with the invalid character '{character}'."
    )]
    #[diagnostic(code(jdeps_guard::identifier::invalid_start))]
    InvalidStart {
        /// Canonical form of the offending rule.
        rule: String,
        /// Which name is invalid.
        role: Role,
        /// The invalid name.
        name: String,
        /// The first character of the offending part.
        character: char,
    },

    /// The name contains a character that cannot appear in an identifier.
    #[error("In the rule {rule} the name '{name}' contains the invalid character '{character}'.")]
    #[diagnostic(code(jdeps_guard::identifier::invalid_part))]
    InvalidPart {
        /// Canonical form of the offending rule.
        rule: String,
        /// Which name is invalid.
        role: Role,
        /// The invalid name.
        name: String,
        /// The offending character.
        character: char,
    },
}

impl IdentifierError {
    /// Returns which side of the rule is invalid.
    #[must_use]
    pub fn role(&self) -> Role {
        match self {
            Self::Undefined { role, .. }
            | Self::EmptyPart { role, .. }
            | Self::InvalidStart { role, .. }
            | Self::InvalidPart { role, .. } => *role,
        }
    }
}

/// Checks that `name` is the wildcard or a valid qualified name.
///
/// `rule` is the canonical form of the rule the name belongs to and only
/// appears in error messages, as does `role`.
///
/// # Errors
///
/// Returns an [`IdentifierError`] describing the first defect found.
pub fn check_name(name: Option<&str>, rule: &str, role: Role) -> Result<(), IdentifierError> {
    let name = match name {
        Some(name) if !name.is_empty() => name,
        _ => {
            return Err(IdentifierError::Undefined {
                rule: rule.to_string(),
                role,
            })
        }
    };
    if name == ALL_TYPES_WILDCARD {
        return Ok(());
    }

    for part in name.split(SEPARATOR) {
        let mut chars = part.chars();
        let Some(first) = chars.next() else {
            return Err(IdentifierError::EmptyPart {
                rule: rule.to_string(),
                role,
                name: name.to_string(),
            });
        };
        if !is_identifier_start(first) {
            return Err(IdentifierError::InvalidStart {
                rule: rule.to_string(),
                role,
                name: name.to_string(),
                character: first,
            });
        }
        if let Some(invalid) = chars.find(|c| !is_identifier_part(*c)) {
            return Err(IdentifierError::InvalidPart {
                rule: rule.to_string(),
                role,
                name: name.to_string(),
                character: invalid,
            });
        }
    }

    Ok(())
}

/// Returns true if `name` is the wildcard.
#[must_use]
pub fn is_wildcard(name: &str) -> bool {
    name == ALL_TYPES_WILDCARD
}

/// Splits a qualified name into its parts.
pub fn parts(name: &str) -> impl Iterator<Item = &str> {
    name.split(SEPARATOR)
}

/// Characters that may start a Java identifier: letters, letter numbers,
/// currency symbols and connector punctuation such as `_`.
fn is_identifier_start(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
            | GeneralCategory::LetterNumber
            | GeneralCategory::CurrencySymbol
            | GeneralCategory::ConnectorPunctuation
    )
}

/// Characters that may continue a Java identifier: start characters,
/// decimal digits, combining marks and ignorable characters.
fn is_identifier_part(c: char) -> bool {
    is_identifier_start(c)
        || matches!(
            get_general_category(c),
            GeneralCategory::DecimalNumber
                | GeneralCategory::NonspacingMark
                | GeneralCategory::SpacingMark
                | GeneralCategory::Format
        )
        || is_ignorable_control(c)
}

/// Control characters Java ignores inside identifiers.
fn is_ignorable_control(c: char) -> bool {
    matches!(c, '\u{0}'..='\u{8}' | '\u{e}'..='\u{1b}' | '\u{7f}'..='\u{9f}')
}
