//! Form binding for the create/edit surface.
//!
//! `UserForm` is an explicit map from field to the text currently typed in
//! it. The surface resets it whenever its target record changes and turns it
//! into a [`UserInput`] on submit.

use crate::error::{AdminError, Result};
use crate::types::{Status, User, UserInput};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A bindable form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormField {
    FirstName,
    LastName,
    Username,
    Status,
    Age,
    Address,
    Password,
}

impl FormField {
    /// All fields, in display order
    pub const ALL: [FormField; 7] = [
        FormField::FirstName,
        FormField::LastName,
        FormField::Username,
        FormField::Status,
        FormField::Age,
        FormField::Address,
        FormField::Password,
    ];

    /// Name used by the presentation layer and on the wire
    pub fn name(self) -> &'static str {
        match self {
            FormField::FirstName => "firstName",
            FormField::LastName => "lastName",
            FormField::Username => "username",
            FormField::Status => "status",
            FormField::Age => "age",
            FormField::Address => "address",
            FormField::Password => "password",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FormField {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self> {
        FormField::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| AdminError::UnknownField(s.to_string()))
    }
}

/// Whether a submit creates a new user or updates an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Update,
}

/// Current values of the user form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserForm {
    values: BTreeMap<FormField, String>,
}

impl UserForm {
    /// Empty template for create mode.
    ///
    /// Every field is blank except status, which starts on the first option
    /// the status picker offers.
    pub fn blank() -> Self {
        let mut values: BTreeMap<FormField, String> = FormField::ALL
            .into_iter()
            .map(|field| (field, String::new()))
            .collect();
        values.insert(FormField::Status, Status::ALL[0].as_str().to_string());

        Self { values }
    }

    /// Form loaded with an existing user's values for edit mode.
    ///
    /// The password field starts blank; the stored password is never known
    /// to the client.
    pub fn from_user(user: &User) -> Self {
        let mut form = Self::blank();
        form.set(FormField::FirstName, user.first_name.as_str());
        form.set(FormField::LastName, user.last_name.as_str());
        form.set(
            FormField::Username,
            user.username.clone().unwrap_or_default(),
        );
        form.set(FormField::Status, user.status.as_str());
        form.set(FormField::Age, user.age.to_string());
        form.set(FormField::Address, user.address.as_str());
        form
    }

    /// Discard every in-progress value and load `target` (or the blank template)
    pub fn reset(&mut self, target: Option<&User>) {
        *self = match target {
            Some(user) => Self::from_user(user),
            None => Self::blank(),
        };
    }

    /// Current value of a field
    pub fn get(&self, field: FormField) -> &str {
        self.values.get(&field).map_or("", String::as_str)
    }

    /// Overwrite a field's value
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// Overwrite a field addressed by its wire name
    pub fn set_by_name(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        let field = name.parse::<FormField>()?;
        self.set(field, value);
        Ok(())
    }

    /// Iterate over `(field, value)` pairs in display order
    pub fn values(&self) -> impl Iterator<Item = (FormField, &str)> + '_ {
        self.values
            .iter()
            .map(|(field, value)| (*field, value.as_str()))
    }

    /// Assemble the input to send.
    ///
    /// First name, last name, age and address are required. The password is
    /// required on create; on update a blank password is left out entirely so
    /// the server keeps the stored one. Age stays a string here and is
    /// coerced right before transport.
    pub fn to_input(&self, mode: FormMode) -> Result<UserInput> {
        let first_name = self.required(FormField::FirstName)?;
        let last_name = self.required(FormField::LastName)?;
        let age = self.required(FormField::Age)?;
        let address = self.required(FormField::Address)?;
        let status = self.get(FormField::Status).parse::<Status>()?;

        let password = match (mode, self.optional(FormField::Password)) {
            (FormMode::Create, None) => {
                return Err(AdminError::MissingField(FormField::Password));
            }
            (_, password) => password,
        };

        Ok(UserInput {
            first_name,
            last_name,
            username: self.optional(FormField::Username),
            status,
            age,
            address,
            password,
        })
    }

    fn required(&self, field: FormField) -> Result<String> {
        self.optional(field).ok_or(AdminError::MissingField(field))
    }

    fn optional(&self, field: FormField) -> Option<String> {
        let value = self.get(field);
        if value.trim().is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }
}

impl Default for UserForm {
    fn default() -> Self {
        Self::blank()
    }
}
