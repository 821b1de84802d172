//! Persistence for trained agents.
//!
//! Snapshots are MessagePack-encoded and written atomically: the encoder
//! targets a temporary file in the destination directory, which is then
//! persisted over the final path so a crash mid-write never leaves a
//! truncated snapshot behind.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::q_learning::agent::{AgentState, QLearningAgent};

/// Provenance recorded alongside a saved agent
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingMetadata {
    /// Number of training episodes the agent has seen
    pub episodes_trained: Option<usize>,
    /// Description of the training opponent
    pub opponent: Option<String>,
    /// Seed the training run was started with
    pub seed: Option<u64>,
}

/// On-disk agent snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedAgent {
    pub version: u32,
    state: AgentState,
    pub metadata: TrainingMetadata,
}

impl SavedAgent {
    pub const VERSION: u32 = 1;

    pub fn from_agent(agent: &QLearningAgent, metadata: TrainingMetadata) -> Self {
        Self {
            version: Self::VERSION,
            state: agent.export_state(),
            metadata,
        }
    }

    /// Reconstruct the agent from the snapshot.
    ///
    /// The restored agent reproduces identical greedy action choices for
    /// every stored state: the Q-table, hyperparameters, and current ε all
    /// round-trip exactly.
    pub fn to_agent(&self) -> Result<QLearningAgent> {
        if self.version != Self::VERSION {
            return Err(crate::Error::UnsupportedSnapshotVersion {
                found: self.version,
                expected: Self::VERSION,
            }
            .into());
        }

        Ok(QLearningAgent::from_state(self.state.clone()))
    }

    /// Write the snapshot atomically to `path`.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let dir = path.parent().filter(|p| !p.as_os_str().is_empty());

        let mut tmp = match dir {
            Some(dir) => NamedTempFile::new_in(dir),
            None => NamedTempFile::new_in("."),
        }
        .with_context(|| format!("Failed to create temporary file near {}", path.display()))?;

        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            rmp_serde::encode::write(&mut writer, self).context("Failed to serialize agent")?;
            writer.flush().context("Failed to flush agent snapshot")?;
        }

        tmp.persist(path)
            .with_context(|| format!("Failed to persist snapshot to {}", path.display()))?;
        Ok(())
    }

    /// Load a snapshot from `path`.
    ///
    /// A missing file is reported as [`crate::Error::MissingSavedAgent`] so
    /// the interactive layer can surface it without crashing.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::Error::from(crate::Error::MissingSavedAgent {
                    path: path.to_path_buf(),
                })
            } else {
                anyhow::Error::from(e).context(format!("Failed to open {}", path.display()))
            }
        })?;
        let reader = BufReader::new(file);

        rmp_serde::decode::from_read(reader).context("Failed to deserialize agent")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        game::BoardKey,
        q_learning::agent::Hyperparameters,
    };

    fn trained_agent() -> QLearningAgent {
        let mut agent = QLearningAgent::new(Hyperparameters::default())
            .unwrap()
            .with_seed(7);
        let a = BoardKey::empty();
        let b = BoardKey::parse("X...O....").unwrap();
        let c = BoardKey::parse("XX..O.O..").unwrap();
        agent.learn(a, 0, 0.0, &b, false);
        agent.learn(b, 1, 0.0, &c, false);
        agent.learn(c, 2, 1.0, &c, true);
        agent
    }

    #[test]
    fn test_roundtrip_preserves_action_values() {
        let agent = trained_agent();
        assert!(agent.q_table_size() > 0);

        let saved = SavedAgent::from_agent(&agent, TrainingMetadata::default());
        let bytes = rmp_serde::to_vec(&saved).unwrap();
        let loaded: SavedAgent = rmp_serde::from_slice(&bytes).unwrap();
        let restored = loaded.to_agent().unwrap();

        assert_eq!(restored.q_table_size(), agent.q_table_size());
        assert_eq!(restored.epsilon(), agent.epsilon());
        for state in agent.q_table().states() {
            assert_eq!(
                restored.q_table().action_values(state),
                agent.q_table().action_values(state)
            );
        }
    }

    #[test]
    fn test_version_mismatch_rejected() {
        let agent = trained_agent();
        let mut saved = SavedAgent::from_agent(&agent, TrainingMetadata::default());
        saved.version = 99;

        let err = saved.to_agent().unwrap_err();
        assert!(err.to_string().contains("version 99"));
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agent.oxo");

        let agent = trained_agent();
        let saved = SavedAgent::from_agent(
            &agent,
            TrainingMetadata {
                episodes_trained: Some(3),
                opponent: Some("random".to_string()),
                seed: Some(7),
            },
        );
        saved.save_to_file(&path).unwrap();

        let loaded = SavedAgent::load_from_file(&path).unwrap();
        assert_eq!(loaded.metadata.episodes_trained, Some(3));
        let restored = loaded.to_agent().unwrap();
        assert_eq!(restored.q_table_size(), agent.q_table_size());
    }

    #[test]
    fn test_missing_file_reports_missing_agent() {
        let dir = tempfile::tempdir().unwrap();
        let err = SavedAgent::load_from_file(dir.path().join("absent.oxo")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<crate::Error>(),
            Some(crate::Error::MissingSavedAgent { .. })
        ));
    }
}
