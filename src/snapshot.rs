use std::fs;
use std::io;
use std::path::PathBuf;

use crate::state::SessionSnapshot;

const DEFAULT_SNAPSHOT_NAME: &str = "session.json";

// One serialized session record per install; a restart resumes from it and
// logout removes it.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn resolve() -> Self {
        if let Ok(path) = std::env::var("LETSLEARN_SESSION") {
            return Self::new(path);
        }

        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("letslearn");

        fs::create_dir_all(&config_dir).ok();
        Self::new(config_dir.join(DEFAULT_SNAPSHOT_NAME))
    }

    // A missing or unreadable snapshot is just a fresh start, never an error.
    pub fn load(&self) -> Option<SessionSnapshot> {
        let text = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&text).ok()
    }

    pub fn save(&self, snapshot: &SessionSnapshot) -> io::Result<()> {
        let text = serde_json::to_string(snapshot)?;
        fs::write(&self.path, text)
    }

    pub fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}
