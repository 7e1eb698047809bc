use std::fmt;

use crate::domain::entities::record::{Record, SortColumn, SortKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserRole {
    Ceo,
    Admin,
    Volunteer,
    Donor,
    Unknown,
}

impl UserRole {
    pub fn name(self) -> &'static str {
        match self {
            UserRole::Ceo => "CEO",
            UserRole::Admin => "ADMIN",
            UserRole::Volunteer => "VOLUNTEER",
            UserRole::Donor => "DONOR",
            UserRole::Unknown => "UNKNOWN",
        }
    }

    /// Lenient: `" it admin "` and `"Volunteer"` both resolve, anything
    /// unrecognized becomes `Unknown`.
    pub fn parse(text: &str) -> Self {
        let normalized = text.trim().to_uppercase().replace(' ', "_");
        match normalized.as_str() {
            "CEO" => UserRole::Ceo,
            "ADMIN" | "IT_ADMIN" => UserRole::Admin,
            "VOLUNTEER" => UserRole::Volunteer,
            "DONOR" => UserRole::Donor,
            _ => UserRole::Unknown,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserEntry {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub enabled: bool,
}

impl UserEntry {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: UserRole,
        enabled: bool,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role,
            enabled,
        }
    }

    pub fn status_text(&self) -> &'static str {
        if self.enabled {
            "active"
        } else {
            "disabled"
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserColumn {
    Name,
    Email,
    Role,
    Status,
}

impl SortColumn for UserColumn {
    const ALL: &'static [Self] = &[
        UserColumn::Name,
        UserColumn::Email,
        UserColumn::Role,
        UserColumn::Status,
    ];

    fn name(self) -> &'static str {
        match self {
            UserColumn::Name => "name",
            UserColumn::Email => "email",
            UserColumn::Role => "role",
            UserColumn::Status => "status",
        }
    }
}

impl Record for UserEntry {
    type Column = UserColumn;
    type Category = UserRole;

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.email.as_str(),
            self.role.name(),
            self.status_text(),
        ]
    }

    fn category(&self) -> UserRole {
        self.role
    }

    fn sort_key(&self, column: UserColumn) -> SortKey {
        match column {
            UserColumn::Name => SortKey::folded(&self.name),
            UserColumn::Email => SortKey::folded(&self.email),
            UserColumn::Role => SortKey::Text(self.role.name().to_string()),
            // active rows first
            UserColumn::Status => SortKey::Number(if self.enabled { 0 } else { 1 }),
        }
    }
}
