use crate::domain::entities::record::{Record, SortColumn, SortKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    Assigned,
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn name(self) -> &'static str {
        match self {
            TaskStatus::Assigned => "Assigned",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Done => "Done",
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_uppercase().replace(' ', "_").as_str() {
            "ASSIGNED" => Some(TaskStatus::Assigned),
            "IN_PROGRESS" => Some(TaskStatus::InProgress),
            "DONE" => Some(TaskStatus::Done),
            _ => None,
        }
    }

    fn rank(self) -> i64 {
        match self {
            TaskStatus::Assigned => 0,
            TaskStatus::InProgress => 1,
            TaskStatus::Done => 2,
        }
    }
}

/// Field task handed to a volunteer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolunteerTask {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub due_date: String,
    pub location: String,
    pub last_update: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskColumn {
    Title,
    Status,
    Location,
    Due,
}

impl SortColumn for TaskColumn {
    const ALL: &'static [Self] = &[
        TaskColumn::Title,
        TaskColumn::Status,
        TaskColumn::Location,
        TaskColumn::Due,
    ];

    fn name(self) -> &'static str {
        match self {
            TaskColumn::Title => "title",
            TaskColumn::Status => "status",
            TaskColumn::Location => "location",
            TaskColumn::Due => "due",
        }
    }
}

impl Record for VolunteerTask {
    type Column = TaskColumn;
    type Category = TaskStatus;

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.location.as_str()]
    }

    fn category(&self) -> TaskStatus {
        self.status
    }

    fn sort_key(&self, column: TaskColumn) -> SortKey {
        match column {
            TaskColumn::Title => SortKey::folded(&self.title),
            // workflow order, not alphabetical
            TaskColumn::Status => SortKey::Number(self.status.rank()),
            TaskColumn::Location => SortKey::folded(&self.location),
            TaskColumn::Due => SortKey::folded(&self.due_date),
        }
    }
}
