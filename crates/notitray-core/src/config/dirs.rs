use directories::ProjectDirs;
use std::path::PathBuf;

/// Application directories following the XDG base directory layout
#[derive(Debug, Clone)]
pub struct Directories {
    /// Config directory (~/.config/notitray)
    pub config: PathBuf,

    /// Cache directory (~/.cache/notitray), holds log files
    pub cache: PathBuf,

    /// Config file path
    pub config_file: PathBuf,
}

impl Directories {
    /// Standard XDG paths, or `None` when no home directory can be determined
    #[must_use]
    pub fn new() -> Option<Self> {
        let project = ProjectDirs::from("", "", "notitray")?;
        let config = project.config_dir().to_path_buf();

        Some(Self {
            config_file: config.join("config.json"),
            config,
            cache: project.cache_dir().to_path_buf(),
        })
    }

    #[must_use]
    pub fn with_base(base: PathBuf) -> Self {
        Self {
            config_file: base.join("config.json"),
            config: base.clone(),
            cache: base,
        }
    }

    /// Standard paths, falling back to the system temp directory
    #[must_use]
    pub fn new_or_temp() -> Self {
        Self::new().unwrap_or_else(|| Self::with_base(std::env::temp_dir().join("notitray")))
    }
}
