//! In-memory host directory

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::HostDirectory;
use crate::error::RelationResult;
use crate::types::{HostAddress, HostKind, InstanceId};
use crate::utils::read_jsonl;

/// One host instance and the parent it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostRecord {
    #[serde(flatten)]
    pub address: HostAddress,
    #[serde(rename = "parentid")]
    pub parent_id: InstanceId,
}

/// Parent → children index per host kind
#[derive(Default)]
pub struct InMemoryHostDirectory {
    children: RwLock<HashMap<(HostKind, InstanceId), BTreeSet<InstanceId>>>,
}

impl InMemoryHostDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load host records from a JSONL file (missing file = empty)
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> RelationResult<Self> {
        let path = path.as_ref();
        let records: Vec<HostRecord> = read_jsonl(path)?;
        info!(path = %path.display(), hosts = records.len(), "Loaded host directory");

        let directory = Self::new();
        for record in records {
            directory.register(&record.address, record.parent_id);
        }
        Ok(directory)
    }

    /// Record that `address` belongs to `parent_id`
    pub fn register(&self, address: &HostAddress, parent_id: InstanceId) {
        self.children
            .write()
            .entry((address.kind(), parent_id))
            .or_default()
            .insert(address.instance_id);
    }

    /// Forget a host instance, e.g. after its option date was removed
    pub fn unregister(&self, address: &HostAddress, parent_id: InstanceId) {
        let mut children = self.children.write();
        let key = (address.kind(), parent_id);
        if let Some(set) = children.get_mut(&key) {
            set.remove(&address.instance_id);
            if set.is_empty() {
                children.remove(&key);
            }
        }
    }
}

impl HostDirectory for InMemoryHostDirectory {
    fn instances_of(&self, kind: &HostKind, parent_id: InstanceId) -> RelationResult<Vec<InstanceId>> {
        Ok(self
            .children
            .read()
            .get(&(kind.clone(), parent_id))
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_register_and_lookup() {
        let directory = InMemoryHostDirectory::new();
        let option = HostKind::new("mod_booking", "option");
        for id in [12, 10, 11] {
            directory.register(&option.address(id), 1);
        }
        directory.register(&option.address(20), 2);

        assert_eq!(directory.instances_of(&option, 1).unwrap(), vec![10, 11, 12]);
        assert_eq!(directory.instances_of(&option, 3).unwrap(), Vec::<InstanceId>::new());

        let dates = option.with_area("optiondate");
        assert!(directory.instances_of(&dates, 1).unwrap().is_empty());
    }

    #[test]
    fn test_unregister() {
        let directory = InMemoryHostDirectory::new();
        let option = HostKind::new("mod_booking", "option");
        directory.register(&option.address(10), 1);
        directory.unregister(&option.address(10), 1);
        assert!(directory.instances_of(&option, 1).unwrap().is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hosts.jsonl");
        fs::write(
            &path,
            "{\"component\":\"mod_booking\",\"area\":\"optiondate\",\"instanceid\":100,\"parentid\":10}\n\
             {\"component\":\"mod_booking\",\"area\":\"optiondate\",\"instanceid\":101,\"parentid\":10}\n",
        )
        .unwrap();

        let directory = InMemoryHostDirectory::load_from_file(&path).unwrap();
        let dates = HostKind::new("mod_booking", "optiondate");
        assert_eq!(directory.instances_of(&dates, 10).unwrap(), vec![100, 101]);
    }
}
