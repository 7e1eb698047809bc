use crate::domain::entities::record::{Record, SortColumn, SortKey};

/// Health shown on the projects screen, derived from progress, spending
/// and how recently the project was updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectHealth {
    Ongoing,
    Completed,
    AtRisk,
}

impl ProjectHealth {
    pub fn name(self) -> &'static str {
        match self {
            ProjectHealth::Ongoing => "Ongoing",
            ProjectHealth::Completed => "Completed",
            ProjectHealth::AtRisk => "At Risk",
        }
    }

    fn rank(self) -> i64 {
        match self {
            ProjectHealth::AtRisk => 0,
            ProjectHealth::Ongoing => 1,
            ProjectHealth::Completed => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub budget: i64,
    pub spent: i64,
    /// Completion in `[0, 1]`.
    pub progress: f64,
    pub last_updated: String,
}

impl Project {
    /// Whole percent, truncated.
    pub fn progress_percent(&self) -> i64 {
        (self.progress * 100.0) as i64
    }

    /// Share of the budget spent, clamped to `[0, 1]`. Zero without a budget.
    pub fn spent_ratio(&self) -> f64 {
        if self.budget <= 0 {
            return 0.0;
        }
        (self.spent as f64 / self.budget as f64).clamp(0.0, 1.0)
    }

    pub fn health(&self) -> ProjectHealth {
        if self.progress_percent() >= 100 {
            return ProjectHealth::Completed;
        }

        let updated = self.last_updated.trim();
        if updated.eq_ignore_ascii_case("today") || contains_folded(updated, "just now") {
            return ProjectHealth::Ongoing;
        }

        let overspending = self.spent_ratio() > self.progress + 0.25;
        let behind_schedule = self.progress < 0.5;
        let stale = contains_folded(updated, "week");
        if overspending || behind_schedule || stale {
            ProjectHealth::AtRisk
        } else {
            ProjectHealth::Ongoing
        }
    }
}

fn contains_folded(text: &str, needle: &str) -> bool {
    text.to_lowercase().contains(needle)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectColumn {
    Name,
    Health,
    Progress,
    Budget,
}

impl SortColumn for ProjectColumn {
    const ALL: &'static [Self] = &[
        ProjectColumn::Name,
        ProjectColumn::Health,
        ProjectColumn::Progress,
        ProjectColumn::Budget,
    ];

    fn name(self) -> &'static str {
        match self {
            ProjectColumn::Name => "name",
            ProjectColumn::Health => "status",
            ProjectColumn::Progress => "progress",
            ProjectColumn::Budget => "budget",
        }
    }
}

impl Record for Project {
    type Column = ProjectColumn;
    type Category = ProjectHealth;

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }

    fn category(&self) -> ProjectHealth {
        self.health()
    }

    fn sort_key(&self, column: ProjectColumn) -> SortKey {
        match column {
            ProjectColumn::Name => SortKey::folded(&self.name),
            ProjectColumn::Health => SortKey::Number(self.health().rank()),
            ProjectColumn::Progress => SortKey::Number(self.progress_percent()),
            ProjectColumn::Budget => SortKey::Number(self.budget),
        }
    }
}
