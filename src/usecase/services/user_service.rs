use std::sync::Arc;

use log::info;
use uuid::Uuid;

use crate::domain::entities::user::UserEntry;
use crate::usecase::ports::source::{RecordSource, SourceError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UserStats {
    pub total: usize,
    pub active: usize,
    pub disabled: usize,
}

/// Write path of the user directory.
pub struct UserService {
    source: Arc<dyn RecordSource<UserEntry>>,
}

impl UserService {
    pub fn new(source: Arc<dyn RecordSource<UserEntry>>) -> Self {
        Self { source }
    }

    /// Adds a user, assigning a fresh id when the draft has none.
    pub fn add_user(&self, draft: UserEntry) -> Result<UserEntry, SourceError> {
        let mut user = normalize(draft)?;
        if user.id.is_empty() {
            user.id = Uuid::new_v4().to_string();
        }
        self.source.add(user.clone())?;
        info!("added user {} ({})", user.email, user.role);
        Ok(user)
    }

    pub fn update_user(&self, user: UserEntry) -> Result<(), SourceError> {
        let user = normalize(user)?;
        if user.id.is_empty() {
            return Err(SourceError::Invalid("user id is required".to_string()));
        }
        self.source.update(user)
    }

    pub fn toggle_enabled(&self, id: &str) -> Result<UserEntry, SourceError> {
        let mut user = self
            .find(id)?
            .ok_or_else(|| SourceError::NotFound(id.to_string()))?;
        user.enabled = !user.enabled;
        self.source.update(user.clone())?;
        info!("user {} is now {}", user.email, user.status_text());
        Ok(user)
    }

    pub fn find(&self, id: &str) -> Result<Option<UserEntry>, SourceError> {
        Ok(self.source.list()?.find(id).cloned())
    }

    pub fn stats(&self) -> Result<UserStats, SourceError> {
        let snapshot = self.source.list()?;
        let active = snapshot.records.iter().filter(|user| user.enabled).count();
        Ok(UserStats {
            total: snapshot.len(),
            active,
            disabled: snapshot.len() - active,
        })
    }
}

fn normalize(mut user: UserEntry) -> Result<UserEntry, SourceError> {
    user.id = user.id.trim().to_string();
    user.name = user.name.trim().to_string();
    user.email = user.email.trim().to_string();

    if user.name.is_empty() {
        return Err(SourceError::Invalid("name is required".to_string()));
    }
    if !user.email.contains('@') {
        return Err(SourceError::Invalid(format!(
            "`{}` is not an email address",
            user.email
        )));
    }
    Ok(user)
}
