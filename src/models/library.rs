//! Library model
//!
//! The library is a singleton record of preset values offered when recording
//! a deployment: developers, build servers, deploy servers and environments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of the one and only library record
pub const LIBRARY_ID: u32 = 1;

/// Preset value lists for deployment records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Library {
    /// Record identifier, always [`LIBRARY_ID`] once stored
    #[serde(default)]
    pub id: u32,

    /// Developer names
    #[serde(default)]
    pub developers: Vec<String>,

    /// Build server hosts
    #[serde(default)]
    pub build_servers: Vec<String>,

    /// Deploy server hosts
    #[serde(default)]
    pub deploy_servers: Vec<String>,

    /// Environment names (QA, UAT, ...)
    #[serde(default)]
    pub environments: Vec<String>,

    /// When the record was created
    #[serde(default)]
    pub created_at: DateTime<Utc>,

    /// When the record was last modified
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

impl Library {
    /// Create an empty library record
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: LIBRARY_ID,
            developers: Vec::new(),
            build_servers: Vec::new(),
            deploy_servers: Vec::new(),
            environments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// The record seeded on first run
    pub fn with_defaults() -> Self {
        Self {
            developers: vec!["Kannan".to_string()],
            build_servers: vec!["192.168.1.149".to_string()],
            deploy_servers: Vec::new(),
            environments: vec!["QA".to_string(), "UAT".to_string(), "Production".to_string()],
            ..Self::new()
        }
    }

    /// Borrow one of the preset lists
    pub fn list(&self, list: LibraryList) -> &[String] {
        match list {
            LibraryList::Developers => &self.developers,
            LibraryList::BuildServers => &self.build_servers,
            LibraryList::DeployServers => &self.deploy_servers,
            LibraryList::Environments => &self.environments,
        }
    }

    /// Mutably borrow one of the preset lists
    pub fn list_mut(&mut self, list: LibraryList) -> &mut Vec<String> {
        match list {
            LibraryList::Developers => &mut self.developers,
            LibraryList::BuildServers => &mut self.build_servers,
            LibraryList::DeployServers => &mut self.deploy_servers,
            LibraryList::Environments => &mut self.environments,
        }
    }

    /// Mark the record as modified now
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for Library {
    fn default() -> Self {
        Self::new()
    }
}

/// Selects one of the library's preset lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LibraryList {
    Developers,
    BuildServers,
    DeployServers,
    Environments,
}

impl LibraryList {
    /// All lists, in display order
    pub fn all() -> [LibraryList; 4] {
        [
            Self::Developers,
            Self::BuildServers,
            Self::DeployServers,
            Self::Environments,
        ]
    }

    /// Singular label used in messages ("Developer already exists: ...")
    pub fn entity_label(&self) -> &'static str {
        match self {
            Self::Developers => "Developer",
            Self::BuildServers => "Build server",
            Self::DeployServers => "Deploy server",
            Self::Environments => "Environment",
        }
    }
}

impl fmt::Display for LibraryList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Developers => write!(f, "developers"),
            Self::BuildServers => write!(f, "build-servers"),
            Self::DeployServers => write!(f, "deploy-servers"),
            Self::Environments => write!(f, "environments"),
        }
    }
}

impl FromStr for LibraryList {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "developers" | "developer" => Ok(Self::Developers),
            "build-servers" | "build-server" => Ok(Self::BuildServers),
            "deploy-servers" | "deploy-server" => Ok(Self::DeployServers),
            "environments" | "environment" => Ok(Self::Environments),
            _ => Err(format!(
                "Unknown library list '{}' (expected developers, build-servers, deploy-servers or environments)",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let library = Library::with_defaults();
        assert_eq!(library.id, LIBRARY_ID);
        assert_eq!(library.developers, vec!["Kannan"]);
        assert_eq!(library.build_servers, vec!["192.168.1.149"]);
        assert!(library.deploy_servers.is_empty());
        assert_eq!(library.environments, vec!["QA", "UAT", "Production"]);
    }

    #[test]
    fn test_missing_lists_deserialize_empty() {
        let library: Library = serde_json::from_str(r#"{"id": 7, "developers": ["a"]}"#).unwrap();
        assert_eq!(library.id, 7);
        assert_eq!(library.developers, vec!["a"]);
        assert!(library.build_servers.is_empty());
        assert!(library.environments.is_empty());
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_value(Library::with_defaults()).unwrap();
        for key in [
            "id",
            "developers",
            "build_servers",
            "deploy_servers",
            "environments",
            "created_at",
            "updated_at",
        ] {
            assert!(json.get(key).is_some(), "missing key {}", key);
        }
    }

    #[test]
    fn test_list_parsing() {
        assert_eq!("developers".parse::<LibraryList>().unwrap(), LibraryList::Developers);
        assert_eq!("build_servers".parse::<LibraryList>().unwrap(), LibraryList::BuildServers);
        assert_eq!("Deploy-Servers".parse::<LibraryList>().unwrap(), LibraryList::DeployServers);
        assert_eq!("environment".parse::<LibraryList>().unwrap(), LibraryList::Environments);
        assert!("servers".parse::<LibraryList>().is_err());
    }

    #[test]
    fn test_list_mut() {
        let mut library = Library::new();
        library.list_mut(LibraryList::DeployServers).push("10.0.0.5".into());
        assert_eq!(library.list(LibraryList::DeployServers), ["10.0.0.5".to_string()]);
        assert_eq!(LibraryList::DeployServers.to_string(), "deploy-servers");
    }
}
