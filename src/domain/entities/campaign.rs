use crate::domain::entities::record::{Record, SortColumn, SortKey};

/// Fundraising campaign listed to donors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Campaign {
    pub id: String,
    pub title: String,
    pub category: String,
    pub location: String,
    pub goal_amount: i64,
    pub raised_amount: i64,
    pub last_update: String,
}

impl Campaign {
    /// Raised share of the goal in `[0, 1]`; zero when there is no goal.
    pub fn progress(&self) -> f64 {
        if self.goal_amount <= 0 {
            return 0.0;
        }
        (self.raised_amount as f64 / self.goal_amount as f64).clamp(0.0, 1.0)
    }

    pub fn progress_percent(&self) -> i64 {
        (self.progress() * 100.0).round() as i64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CampaignColumn {
    Title,
    Category,
    Location,
    Progress,
}

impl SortColumn for CampaignColumn {
    const ALL: &'static [Self] = &[
        CampaignColumn::Title,
        CampaignColumn::Category,
        CampaignColumn::Location,
        CampaignColumn::Progress,
    ];

    fn name(self) -> &'static str {
        match self {
            CampaignColumn::Title => "title",
            CampaignColumn::Category => "category",
            CampaignColumn::Location => "location",
            CampaignColumn::Progress => "progress",
        }
    }
}

impl Record for Campaign {
    type Column = CampaignColumn;
    // no categorical filter on this screen; the free-text search covers category
    type Category = ();

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.category.as_str(),
            self.location.as_str(),
        ]
    }

    fn category(&self) {}

    fn sort_key(&self, column: CampaignColumn) -> SortKey {
        match column {
            CampaignColumn::Title => SortKey::folded(&self.title),
            CampaignColumn::Category => SortKey::folded(&self.category),
            CampaignColumn::Location => SortKey::folded(&self.location),
            CampaignColumn::Progress => SortKey::Number(self.progress_percent()),
        }
    }
}
