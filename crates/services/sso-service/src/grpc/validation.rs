//! Request shape validation.
//!
//! Each request type declares a table of field → rules. The table is
//! checked once, before the auth service is called; the domain types know
//! nothing about it.

use tonic::Status;
use validator::ValidateEmail;

use proto::sso::{IsAdminRequest, LoginRequest, RegisterRequest};

/// A single check applied to a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Non-empty string or non-zero number
    Required,
    /// Syntactically valid email address
    Email,
}

impl Rule {
    fn check(self, value: FieldValue<'_>) -> bool {
        match (self, value) {
            (Rule::Required, FieldValue::Str(s)) => !s.is_empty(),
            (Rule::Required, FieldValue::Int(n)) => n != 0,
            (Rule::Email, FieldValue::Str(s)) => s.validate_email(),
            (Rule::Email, FieldValue::Int(_)) => false,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Rule::Required => "is required",
            Rule::Email => "must be a valid email address",
        }
    }
}

/// Borrowed view of a request field.
#[derive(Debug, Clone, Copy)]
pub enum FieldValue<'a> {
    Str(&'a str),
    Int(i64),
}

/// Rules attached to one named field.
#[derive(Debug)]
pub struct FieldRules {
    pub field: &'static str,
    pub rules: &'static [Rule],
}

/// Requests that carry a validation table.
pub trait Validated {
    const RULES: &'static [FieldRules];

    /// Value of the named field, if the request has it
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

/// Run the request's table; the first failing rule becomes `InvalidArgument`.
pub fn validate<T: Validated>(request: &T) -> Result<(), Status> {
    for entry in T::RULES {
        let value = request.field(entry.field).ok_or_else(|| {
            Status::internal(format!("no validator for field {}", entry.field))
        })?;

        if let Some(rule) = entry.rules.iter().find(|rule| !rule.check(value)) {
            return Err(Status::invalid_argument(format!(
                "{} {}",
                entry.field,
                rule.describe()
            )));
        }
    }
    Ok(())
}

impl Validated for RegisterRequest {
    const RULES: &'static [FieldRules] = &[
        FieldRules {
            field: "email",
            rules: &[Rule::Required, Rule::Email],
        },
        FieldRules {
            field: "password",
            rules: &[Rule::Required],
        },
    ];

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "email" => Some(FieldValue::Str(&self.email)),
            "password" => Some(FieldValue::Str(&self.password)),
            _ => None,
        }
    }
}

impl Validated for LoginRequest {
    const RULES: &'static [FieldRules] = &[
        FieldRules {
            field: "email",
            rules: &[Rule::Required, Rule::Email],
        },
        FieldRules {
            field: "password",
            rules: &[Rule::Required],
        },
        FieldRules {
            field: "app_id",
            rules: &[Rule::Required],
        },
    ];

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "email" => Some(FieldValue::Str(&self.email)),
            "password" => Some(FieldValue::Str(&self.password)),
            "app_id" => Some(FieldValue::Int(i64::from(self.app_id))),
            _ => None,
        }
    }
}

impl Validated for IsAdminRequest {
    const RULES: &'static [FieldRules] = &[FieldRules {
        field: "user_id",
        rules: &[Rule::Required],
    }];

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "user_id" => Some(FieldValue::Int(self.user_id)),
            _ => None,
        }
    }
}
