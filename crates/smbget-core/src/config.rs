use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// External client invocation (`[client]` section).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Share-browsing client program, looked up on `PATH` by the shell.
    pub program: String,
    /// Shell that interprets the client command line.
    pub shell: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            program: "smbclient".to_string(),
            shell: "bash".to_string(),
        }
    }
}

/// Local mount lookup (`[mount]` section).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MountConfig {
    /// Try the local mount before the client.
    pub enabled: bool,
    /// Directory under which shares appear as `<root>/<host>/<share>/...`.
    pub root: PathBuf,
    /// Chunk size in bytes for copies out of the mount (None = 64 KiB).
    pub copy_buffer_bytes: Option<usize>,
}

impl Default for MountConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            root: PathBuf::from("/"),
            copy_buffer_bytes: None,
        }
    }
}

/// Global configuration loaded from `~/.config/smbget/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmbgetConfig {
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub mount: MountConfig,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("smbget")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SmbgetConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = SmbgetConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: SmbgetConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = SmbgetConfig::default();
        assert_eq!(cfg.client.program, "smbclient");
        assert_eq!(cfg.client.shell, "bash");
        assert!(cfg.mount.enabled);
        assert_eq!(cfg.mount.root, PathBuf::from("/"));
        assert!(cfg.mount.copy_buffer_bytes.is_none());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = SmbgetConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: SmbgetConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_toml_empty_uses_defaults() {
        let cfg: SmbgetConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, SmbgetConfig::default());
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            [client]
            program = "/usr/local/bin/smbclient"
            shell = "sh"

            [mount]
            enabled = false
            root = "/mnt/smb"
            copy_buffer_bytes = 131072
        "#;
        let cfg: SmbgetConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.client.program, "/usr/local/bin/smbclient");
        assert_eq!(cfg.client.shell, "sh");
        assert!(!cfg.mount.enabled);
        assert_eq!(cfg.mount.root, PathBuf::from("/mnt/smb"));
        assert_eq!(cfg.mount.copy_buffer_bytes, Some(131072));
    }

    #[test]
    fn config_toml_partial_sections() {
        let toml = r#"
            [client]
            shell = "sh"

            [mount]
            root = "/mnt/smb"
        "#;
        let cfg: SmbgetConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.client.program, "smbclient");
        assert_eq!(cfg.client.shell, "sh");
        assert!(cfg.mount.enabled);
        assert_eq!(cfg.mount.root, PathBuf::from("/mnt/smb"));
        assert!(cfg.mount.copy_buffer_bytes.is_none());
    }
}
