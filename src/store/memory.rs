use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{
    ActivityEntry, Endorsement, Invite, Membership, Profile, Project, ProjectId, RecordStore,
    SkillVerification, StoreError, UserId,
};

/// In-memory record store, usable as a reference implementation and as a
/// fixture for exercising the services without a database.
#[derive(Default)]
pub struct MemoryRecordStore {
    inner: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    profiles: HashMap<UserId, Profile>,
    projects: HashMap<ProjectId, Project>,
    memberships: Vec<Membership>,
    endorsements: Vec<Endorsement>,
    invites: Vec<Invite>,
    verifications: Vec<SkillVerification>,
    activity: HashMap<UserId, Vec<ActivityEntry>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_profile(&self, profile: Profile) {
        let mut tables = self.lock();
        tables.profiles.insert(profile.id.clone(), profile);
    }

    pub fn insert_project(&self, project: Project) {
        let mut tables = self.lock();
        tables.projects.insert(project.id.clone(), project);
    }

    pub fn insert_membership(&self, membership: Membership) {
        self.lock().memberships.push(membership);
    }

    pub fn insert_endorsement(&self, endorsement: Endorsement) {
        self.lock().endorsements.push(endorsement);
    }

    pub fn insert_invite(&self, invite: Invite) {
        self.lock().invites.push(invite);
    }

    pub fn insert_verification(&self, verification: SkillVerification) {
        self.lock().verifications.push(verification);
    }

    pub fn record_activity(&self, user: UserId, entry: ActivityEntry) {
        self.lock().activity.entry(user).or_default().push(entry);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.inner.lock().expect("record store mutex poisoned")
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn fetch_profile(&self, id: &UserId) -> Result<Option<Profile>, StoreError> {
        Ok(self.lock().profiles.get(id).cloned())
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, StoreError> {
        let tables = self.lock();
        let mut profiles: Vec<Profile> = tables.profiles.values().cloned().collect();
        profiles.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(profiles)
    }

    async fn fetch_project(&self, id: &ProjectId) -> Result<Option<Project>, StoreError> {
        Ok(self.lock().projects.get(id).cloned())
    }

    async fn projects_owned_by(&self, owner: &UserId) -> Result<Vec<Project>, StoreError> {
        let tables = self.lock();
        let mut projects: Vec<Project> = tables
            .projects
            .values()
            .filter(|project| &project.owner_id == owner)
            .cloned()
            .collect();
        projects.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(projects)
    }

    async fn projects_by_ids(&self, ids: &[ProjectId]) -> Result<Vec<Project>, StoreError> {
        let tables = self.lock();
        Ok(ids
            .iter()
            .filter_map(|id| tables.projects.get(id).cloned())
            .collect())
    }

    async fn memberships_for_user(&self, user: &UserId) -> Result<Vec<Membership>, StoreError> {
        Ok(self
            .lock()
            .memberships
            .iter()
            .filter(|membership| &membership.user_id == user)
            .cloned()
            .collect())
    }

    async fn members_of_project(&self, project: &ProjectId) -> Result<Vec<Membership>, StoreError> {
        Ok(self
            .lock()
            .memberships
            .iter()
            .filter(|membership| &membership.project_id == project)
            .cloned()
            .collect())
    }

    async fn members_of_projects(
        &self,
        projects: &[ProjectId],
    ) -> Result<Vec<Membership>, StoreError> {
        Ok(self
            .lock()
            .memberships
            .iter()
            .filter(|membership| projects.contains(&membership.project_id))
            .cloned()
            .collect())
    }

    async fn endorsements_for(&self, user: &UserId) -> Result<Vec<Endorsement>, StoreError> {
        Ok(self
            .lock()
            .endorsements
            .iter()
            .filter(|endorsement| &endorsement.endorsed_id == user)
            .cloned()
            .collect())
    }

    async fn invites_received(&self, user: &UserId) -> Result<Vec<Invite>, StoreError> {
        Ok(self
            .lock()
            .invites
            .iter()
            .filter(|invite| &invite.receiver_id == user)
            .cloned()
            .collect())
    }

    async fn invites_for_project(&self, project: &ProjectId) -> Result<Vec<Invite>, StoreError> {
        Ok(self
            .lock()
            .invites
            .iter()
            .filter(|invite| &invite.project_id == project)
            .cloned()
            .collect())
    }

    async fn skill_verifications(
        &self,
        user: &UserId,
    ) -> Result<Vec<SkillVerification>, StoreError> {
        Ok(self
            .lock()
            .verifications
            .iter()
            .filter(|verification| &verification.user_id == user)
            .cloned()
            .collect())
    }

    async fn activity_log(&self, user: &UserId) -> Result<Vec<ActivityEntry>, StoreError> {
        let tables = self.lock();
        let mut entries = tables.activity.get(user).cloned().unwrap_or_default();
        entries.sort_by_key(|entry| entry.at);
        Ok(entries)
    }
}
