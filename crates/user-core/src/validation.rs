//! Validation groups
//!
//! A group names an operation (edit, login, password change, ...) and selects
//! which field constraints must hold for it. Constraints live on small
//! `Validate` structs, one per field set; a group is the union of its sets.
//!
//! | field          | Edit            | Login / Restore | Login, ChangePassword, CreatePassword |
//! |----------------|-----------------|-----------------|---------------------------------------|
//! | username       | not blank, email| not blank, email| -                                     |
//! | name           | not blank, 2-140| -               | -                                     |
//! | phone          | required, valid | -               | -                                     |
//! | plain_password | -               | -               | not blank, 2-64                       |
//!
//! `Default` carries no field constraints: its only rule, username
//! uniqueness, is enforced by the store.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::entities::UserRecord;

/// Message for a missing or blank value
pub const NOT_BLANK: &str = "notBlank";
/// Message for a value outside its length bounds
pub const INVALID_LENGTH: &str = "invalidLength";
/// Message for a malformed email address
pub const INVALID_EMAIL: &str = "invalidEmail";
/// Message for an invalid phone number
pub const INVALID_PHONE: &str = "invalidPhone";
/// Message for a username already held by another user
pub const USERNAME_TAKEN: &str = "usernameTaken";

/// Named validation scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationGroup {
    Default,
    Edit,
    Login,
    Restore,
    ChangePassword,
    CreatePassword,
}

impl ValidationGroup {
    /// Group name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Edit => "Edit",
            Self::Login => "Login",
            Self::Restore => "Restore",
            Self::ChangePassword => "ChangePassword",
            Self::CreatePassword => "CreatePassword",
        }
    }

    const fn field_sets(self) -> &'static [FieldSet] {
        match self {
            Self::Default => &[],
            Self::Edit => &[FieldSet::Username, FieldSet::Profile],
            Self::Login => &[FieldSet::Username, FieldSet::PlainPassword],
            Self::Restore => &[FieldSet::Username],
            Self::ChangePassword | Self::CreatePassword => &[FieldSet::PlainPassword],
        }
    }
}

impl fmt::Display for ValidationGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Disjoint sets of fields that share group membership
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum FieldSet {
    Username,
    Profile,
    PlainPassword,
}

#[derive(Debug, Validate)]
struct UsernameConstraints {
    #[validate(
        length(min = 1, message = "notBlank"),
        email(message = "invalidEmail")
    )]
    username: String,
}

#[derive(Debug, Validate)]
struct ProfileConstraints {
    #[validate(
        required(message = "notBlank"),
        length(min = 2, max = 140, message = "invalidLength")
    )]
    name: Option<String>,
}

#[derive(Debug, Validate)]
struct PlainPasswordConstraints {
    #[validate(
        required(message = "notBlank"),
        length(min = 2, max = 64, message = "invalidLength")
    )]
    plain_password: Option<String>,
}

/// Build a constraint violation with a code and message
pub fn violation(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Validate a user against the union of the given groups
///
/// An empty slice is the unscoped context and always passes.
pub fn validate(user: &UserRecord, groups: &[ValidationGroup]) -> Result<(), ValidationErrors> {
    let mut sets: Vec<FieldSet> = groups
        .iter()
        .flat_map(|group| group.field_sets().iter().copied())
        .collect();
    sets.sort_unstable();
    sets.dedup();

    let mut errors = ValidationErrors::new();
    for set in sets {
        let result = match set {
            FieldSet::Username => UsernameConstraints {
                username: user.username().to_owned(),
            }
            .validate(),
            FieldSet::Profile => validate_profile(user),
            FieldSet::PlainPassword => validate_plain_password(user),
        };

        // field sets are disjoint, so entries never collide
        if let Err(set_errors) = result {
            for (field, kind) in set_errors.into_errors() {
                errors.errors_mut().insert(field, kind);
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_profile(user: &UserRecord) -> Result<(), ValidationErrors> {
    let mut errors = match (ProfileConstraints {
        name: user.name().map(str::to_owned),
    })
    .validate()
    {
        Ok(()) => ValidationErrors::new(),
        Err(errors) => errors,
    };
    flag_blank(&mut errors, "name", user.name());

    match user.phone() {
        None => errors.add("phone", violation("required", NOT_BLANK)),
        Some(phone) if !phone.is_valid() => {
            errors.add("phone", violation("phone_number", INVALID_PHONE));
        }
        Some(_) => {}
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_plain_password(user: &UserRecord) -> Result<(), ValidationErrors> {
    let mut errors = match (PlainPasswordConstraints {
        plain_password: user.plain_password().map(str::to_owned),
    })
    .validate()
    {
        Ok(()) => ValidationErrors::new(),
        Err(errors) => errors,
    };
    flag_blank(&mut errors, "plain_password", user.plain_password());

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// A present but blank value reports only `not_blank`, not its length.
fn flag_blank(errors: &mut ValidationErrors, field: &'static str, value: Option<&str>) {
    if value.is_some_and(|v| v.trim().is_empty()) {
        errors.errors_mut().remove(field);
        errors.add(field, violation("not_blank", NOT_BLANK));
    }
}

/// Field-level error for a username held by another user
pub fn username_taken() -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add("username", violation("unique", USERNAME_TAKEN));
    errors
}
