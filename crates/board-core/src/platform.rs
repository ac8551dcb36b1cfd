use std::path::PathBuf;

pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bboard")
}

pub fn data_dir() -> PathBuf {
    // XDG-style ~/.local/share/bboard on unix for consistency across
    // macOS/Linux; platform data dir elsewhere.
    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join(".local")
            .join("share")
            .join("bboard")
    }
    #[cfg(not(unix))]
    {
        dirs::data_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("bboard")
    }
}
