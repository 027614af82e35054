use std::path::{Path, PathBuf};

pub const TOKEN_DIR: &str = ".agentforce_chat";

/// Fixed key the last obtained access token is stored under.
pub const TOKEN_KEY: &str = "sf_access_token";

#[must_use]
pub fn token_root(home: &Path) -> PathBuf {
    home.join(TOKEN_DIR)
}

#[must_use]
pub fn token_file_path(root: &Path) -> PathBuf {
    root.join(format!("{TOKEN_KEY}.json"))
}
