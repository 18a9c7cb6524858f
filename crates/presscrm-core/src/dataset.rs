use crate::error::{CrmError, Result};
use crate::lead::Lead;
use crate::paths;
use crate::user::User;
use crate::visibility;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The user directory and lead collection, passed explicitly to anything
/// that needs them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub leads: Vec<Lead>,
}

fn default_version() -> u32 {
    1
}

impl Dataset {
    pub fn new(users: Vec<User>, leads: Vec<Lead>) -> Self {
        Self {
            version: 1,
            users,
            leads,
        }
    }

    // ---------------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------------

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::data_path(root);
        if !path.exists() {
            return Err(CrmError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let dataset: Dataset = serde_yaml::from_str(&data)?;
        tracing::debug!(
            users = dataset.users.len(),
            leads = dataset.leads.len(),
            "loaded dataset"
        );
        Ok(dataset)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::data_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())?;
        tracing::debug!(path = %path.display(), "saved dataset");
        Ok(())
    }

    // ---------------------------------------------------------------------------
    // Lookups
    // ---------------------------------------------------------------------------

    pub fn user(&self, id: &str) -> Result<&User> {
        self.users
            .iter()
            .find(|u| u.id == id)
            .ok_or_else(|| CrmError::UserNotFound(id.to_string()))
    }

    pub fn lead(&self, id: &str) -> Result<&Lead> {
        self.leads
            .iter()
            .find(|l| l.id == id)
            .ok_or_else(|| CrmError::LeadNotFound(id.to_string()))
    }

    pub fn lead_mut(&mut self, id: &str) -> Result<&mut Lead> {
        self.leads
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| CrmError::LeadNotFound(id.to_string()))
    }

    /// Name of the user with `id`, or the id itself when unknown.
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.user(id).map(|u| u.name.as_str()).unwrap_or(id)
    }

    pub fn visible_to(&self, actor: &User) -> Vec<&Lead> {
        visibility::visible_leads(&self.leads, actor)
    }

    /// Look up a lead, failing with `NotVisible` when `actor` may not see it.
    pub fn lead_for(&self, actor: &User, id: &str) -> Result<&Lead> {
        let lead = self.lead(id)?;
        if !visibility::can_view(lead, actor) {
            return Err(CrmError::NotVisible {
                lead: id.to_string(),
                user: actor.id.clone(),
            });
        }
        Ok(lead)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn dataset() -> Dataset {
        sample::dataset(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap())
    }

    #[test]
    fn load_without_file_is_not_initialized() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Dataset::load(dir.path()),
            Err(CrmError::NotInitialized)
        ));
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let data = dataset();
        data.save(dir.path()).unwrap();
        let loaded = Dataset::load(dir.path()).unwrap();
        assert_eq!(loaded.users, data.users);
        assert_eq!(loaded.leads, data.leads);
    }

    #[test]
    fn unknown_status_in_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let data = dataset();
        let yaml = serde_yaml::to_string(&data)
            .unwrap()
            .replace("status: Confirmed", "status: Shipped");
        crate::io::atomic_write(&paths::data_path(dir.path()), yaml.as_bytes()).unwrap();
        assert!(matches!(Dataset::load(dir.path()), Err(CrmError::Yaml(_))));
    }

    #[test]
    fn lookups() {
        let data = dataset();
        assert_eq!(data.user("u2").unwrap().name, "Sarah Sales");
        assert!(matches!(data.user("u99"), Err(CrmError::UserNotFound(_))));
        assert!(matches!(data.lead("nope"), Err(CrmError::LeadNotFound(_))));
        assert_eq!(data.display_name("u3"), "Mike Quote");
        assert_eq!(data.display_name("ghost"), "ghost");
    }

    #[test]
    fn lead_for_respects_visibility() {
        let data = dataset();
        let design = data.user("u4").unwrap();
        assert!(data.lead_for(design, "lead3").is_ok());
        assert!(matches!(
            data.lead_for(design, "lead1"),
            Err(CrmError::NotVisible { .. })
        ));
    }
}
