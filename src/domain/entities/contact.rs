use crate::domain::entities::record::{Record, SortColumn, SortKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactKind {
    Partner,
    Donor,
}

impl ContactKind {
    pub fn name(self) -> &'static str {
        match self {
            ContactKind::Partner => "Partner",
            ContactKind::Donor => "Donor",
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_lowercase().as_str() {
            "partner" | "partners" => Some(ContactKind::Partner),
            "donor" | "donors" => Some(ContactKind::Donor),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactStatus {
    Active,
    Pending,
}

impl ContactStatus {
    pub fn name(self) -> &'static str {
        match self {
            ContactStatus::Active => "Active",
            ContactStatus::Pending => "Pending",
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_lowercase().as_str() {
            "active" => Some(ContactStatus::Active),
            "pending" => Some(ContactStatus::Pending),
            _ => None,
        }
    }

    fn rank(self) -> i64 {
        match self {
            ContactStatus::Active => 0,
            ContactStatus::Pending => 1,
        }
    }
}

/// Partner organisation or donor tracked on the CEO screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub kind: ContactKind,
    pub status: ContactStatus,
    /// Pledged amount for donors, agreement state for partners.
    pub note: String,
    pub last_contact: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactColumn {
    Name,
    Kind,
    Status,
}

impl SortColumn for ContactColumn {
    const ALL: &'static [Self] = &[ContactColumn::Name, ContactColumn::Kind, ContactColumn::Status];

    fn name(self) -> &'static str {
        match self {
            ContactColumn::Name => "name",
            ContactColumn::Kind => "kind",
            ContactColumn::Status => "status",
        }
    }
}

impl Record for Contact {
    type Column = ContactColumn;
    type Category = ContactKind;

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }

    fn category(&self) -> ContactKind {
        self.kind
    }

    fn sort_key(&self, column: ContactColumn) -> SortKey {
        match column {
            ContactColumn::Name => SortKey::folded(&self.name),
            ContactColumn::Kind => SortKey::Text(self.kind.name().to_string()),
            ContactColumn::Status => SortKey::Number(self.status.rank()),
        }
    }
}
