//! Read-only snapshot of the member, branch and room directories

use gymtrack_api::{Branch, Member, Room};
use gymtrack_store::{AuditEvent, AuditEventType, Repositories, StoreResult};
use gymtrack_util::{BranchId, MemberId, RoomId};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Members, branches and rooms as last saved by the directory owner
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directory {
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub branches: Vec<Branch>,
    #[serde(default)]
    pub rooms: Vec<Room>,
}

impl Directory {
    /// Load a fresh snapshot from the repositories
    pub fn load(repos: &Repositories) -> StoreResult<Self> {
        Ok(Self {
            members: repos.members.load()?,
            branches: repos.branches.load()?,
            rooms: repos.rooms.load()?,
        })
    }

    /// Find a member by phone, then by id. Input is trimmed; blank never matches.
    pub fn find_member(&self, lookup: &str) -> Option<&Member> {
        let key = lookup.trim();
        if key.is_empty() {
            return None;
        }

        self.members
            .iter()
            .find(|m| m.phone.trim() == key)
            .or_else(|| self.members.iter().find(|m| m.matches_lookup(key)))
    }

    pub fn member(&self, id: &MemberId) -> Option<&Member> {
        self.members.iter().find(|m| &m.id == id)
    }

    pub fn branch(&self, id: &BranchId) -> Option<&Branch> {
        self.branches.iter().find(|b| &b.id == id)
    }

    pub fn room(&self, id: &RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| &r.id == id)
    }

    /// Display name of a member, `None` when unknown
    pub fn member_name(&self, id: &MemberId) -> Option<&str> {
        self.member(id).map(|m| m.full_name.as_str())
    }

    pub fn branch_name(&self, id: &BranchId) -> Option<&str> {
        self.branch(id).map(|b| b.name.as_str())
    }

    pub fn room_name(&self, id: &RoomId) -> Option<&str> {
        self.room(id).map(|r| r.name.as_str())
    }

    /// Replace every directory collection and record the import.
    ///
    /// The three collections are separate writes. If one fails, the
    /// collections already written are put back to the previous directory
    /// before the error is returned.
    pub fn import(&self, repos: &Repositories) -> StoreResult<()> {
        let dangling = self
            .members
            .iter()
            .filter(|m| self.room(&m.room_id).is_none())
            .count();
        if dangling > 0 {
            warn!(count = dangling, "Imported members reference unknown rooms");
        }

        let previous = Directory::load(repos)?;
        if let Err(e) = self.save_all(repos) {
            warn!(error = %e, "Directory import failed, restoring previous directory");
            if let Err(restore) = previous.save_all(repos) {
                warn!(error = %restore, "Previous directory not fully restored");
            }
            return Err(e);
        }

        if let Err(e) = repos
            .audit
            .append_audit(AuditEvent::new(AuditEventType::DirectoryImported {
                members: self.members.len(),
                branches: self.branches.len(),
                rooms: self.rooms.len(),
            }))
        {
            warn!(error = %e, "Failed to record directory import");
        }

        info!(
            members = self.members.len(),
            branches = self.branches.len(),
            rooms = self.rooms.len(),
            "Directory imported"
        );
        Ok(())
    }

    fn save_all(&self, repos: &Repositories) -> StoreResult<()> {
        repos.branches.save(&self.branches)?;
        repos.rooms.save(&self.rooms)?;
        repos.members.save(&self.members)
    }
}
