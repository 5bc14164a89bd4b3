//! The config table: which files are synced and where they live.
pub mod toml_loader;

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use crate::error::ConfigError;
use crate::paths::{expand_tilde, select_installed_path};
use crate::platform::Platform;

use toml_loader::EntrySpec;

/// Name of the optional table override at the repository root.
pub const CONFIG_FILE: &str = "dotsync.toml";

/// A managed configuration: one tool's file or directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    /// Logical name (`alacritty`, `nvim`, ...).
    pub name: String,
    /// Whether the entry is a directory (mirrors contents) or a single file.
    pub is_directory: bool,
    /// Absolute installed paths ordered by [`Platform::index`], or one shared path.
    pub installed_paths: Vec<PathBuf>,
    /// Absolute path inside the dotfiles repository.
    pub repository_path: PathBuf,
    /// Cache directory removed after a downstream sync.
    pub cache_dir: Option<PathBuf>,
}

impl ConfigEntry {
    /// Installed path for `platform`.
    #[must_use]
    pub fn installed_path(&self, platform: Platform) -> &Path {
        // Non-empty by construction: `Manifest::from_specs` rejects empty lists.
        select_installed_path(&self.installed_paths, platform).unwrap_or_else(|| Path::new(""))
    }
}

/// Immutable set of entries, built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    root: PathBuf,
    entries: Vec<ConfigEntry>,
}

impl Manifest {
    /// Load `<root>/dotsync.toml`, or the built-in table when it is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is unreadable, malformed, or an entry
    /// violates the table invariants.
    pub fn load(root: &Path, home: &Path) -> Result<Self, ConfigError> {
        match toml_loader::load_config(&root.join(CONFIG_FILE))? {
            Some(file) => Self::from_specs(root, home, file.entries),
            None => Self::builtin(root, home),
        }
    }

    /// The built-in table of managed tools.
    ///
    /// # Errors
    ///
    /// Only fails if the built-in table itself is inconsistent.
    pub fn builtin(root: &Path, home: &Path) -> Result<Self, ConfigError> {
        Self::from_specs(root, home, builtin_specs())
    }

    /// Resolve raw specs against `root` and `home` and validate them.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEntry`] for an empty or duplicate name,
    /// an entry without installed paths, or a repository path that is
    /// absolute or leaves the repository root.
    pub fn from_specs(
        root: &Path,
        home: &Path,
        specs: Vec<EntrySpec>,
    ) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(specs.len());
        for spec in specs {
            let invalid = |reason: &str| ConfigError::InvalidEntry {
                name: spec.name.clone(),
                reason: reason.to_string(),
            };
            if spec.name.trim().is_empty() {
                return Err(invalid("name is empty"));
            }
            if !seen.insert(spec.name.clone()) {
                return Err(invalid("duplicate name"));
            }
            if spec.installed.is_empty() {
                return Err(invalid("no installed paths"));
            }
            if !stays_inside(&spec.repository) {
                return Err(invalid("repository path must be relative to the repository root"));
            }
            entries.push(ConfigEntry {
                installed_paths: spec
                    .installed
                    .iter()
                    .map(|p| PathBuf::from(expand_tilde(p, home)))
                    .collect(),
                repository_path: root.join(&spec.repository),
                cache_dir: spec.cache.as_deref().map(|p| PathBuf::from(expand_tilde(p, home))),
                is_directory: spec.directory,
                name: spec.name,
            });
        }
        Ok(Self {
            root: root.to_path_buf(),
            entries,
        })
    }

    /// Root of the dotfiles repository.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Entries in processing order.
    #[must_use]
    pub fn entries(&self) -> &[ConfigEntry] {
        &self.entries
    }

    /// Look up an entry by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ConfigEntry> {
        self.entries.iter().find(|e| e.name == name)
    }
}

/// `true` when joining `path` onto a root cannot escape that root.
fn stays_inside(path: &Path) -> bool {
    path.components().next().is_some()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

fn spec(name: &str, directory: bool, installed: &[&str], repository: &str) -> EntrySpec {
    EntrySpec {
        name: name.to_string(),
        directory,
        installed: installed.iter().map(ToString::to_string).collect(),
        repository: PathBuf::from(repository),
        cache: None,
    }
}

fn builtin_specs() -> Vec<EntrySpec> {
    vec![
        spec("alacritty", true, &["~/.config/alacritty"], "alacritty"),
        spec(
            "ghostty",
            true,
            &[
                "~/Library/Application Support/com.mitchellh.ghostty",
                "~/.config/ghostty",
            ],
            "ghostty",
        ),
        EntrySpec {
            cache: Some("~/.cache/nvim".to_string()),
            ..spec("nvim", true, &["~/.config/nvim"], "nvim")
        },
        spec("vim", false, &["~/.vimrc"], "vim/.vimrc"),
        spec("zellij", true, &["~/.config/zellij"], "zellij"),
    ]
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn builtin() -> Manifest {
        Manifest::builtin(Path::new("/home/me/dev/configs"), Path::new("/home/me")).unwrap()
    }

    #[test]
    fn builtin_names_in_order() {
        let m = builtin();
        let names: Vec<&str> = m.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["alacritty", "ghostty", "nvim", "vim", "zellij"]);
    }

    #[test]
    fn builtin_paths_are_absolute_and_inside_root() {
        let m = builtin();
        for e in m.entries() {
            assert!(e.repository_path.starts_with(m.root()), "{e:?}");
            for p in &e.installed_paths {
                assert!(p.is_absolute(), "{p:?}");
            }
        }
    }

    #[test]
    fn vim_is_a_single_file() {
        let m = builtin();
        let vim = m.get("vim").unwrap();
        assert!(!vim.is_directory);
        assert_eq!(vim.repository_path, PathBuf::from("/home/me/dev/configs/vim/.vimrc"));
        assert_eq!(vim.installed_path(Platform::Linux), Path::new("/home/me/.vimrc"));
    }

    #[test]
    fn ghostty_differs_per_platform() {
        let m = builtin();
        let ghostty = m.get("ghostty").unwrap();
        assert_eq!(
            ghostty.installed_path(Platform::MacOs),
            Path::new("/home/me/Library/Application Support/com.mitchellh.ghostty")
        );
        assert_eq!(
            ghostty.installed_path(Platform::Linux),
            Path::new("/home/me/.config/ghostty")
        );
        assert_eq!(
            ghostty.installed_path(Platform::Other),
            Path::new("/home/me/.config/ghostty")
        );
    }

    #[test]
    fn only_nvim_has_a_cache() {
        let m = builtin();
        let with_cache: Vec<&str> = m
            .entries()
            .iter()
            .filter(|e| e.cache_dir.is_some())
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(with_cache, ["nvim"]);
        assert_eq!(
            m.get("nvim").unwrap().cache_dir.as_deref(),
            Some(Path::new("/home/me/.cache/nvim"))
        );
    }

    #[test]
    fn rejects_escaping_repository_path() {
        for bad in ["../outside", "/etc/passwd", "", "nvim/../../x"] {
            let err = Manifest::from_specs(
                Path::new("/r"),
                Path::new("/h"),
                vec![spec("x", false, &["~/x"], bad)],
            )
            .unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidEntry { .. }),
                "{bad}: {err}"
            );
        }
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = Manifest::from_specs(
            Path::new("/r"),
            Path::new("/h"),
            vec![spec("a", false, &["~/a"], "a"), spec("a", false, &["~/b"], "b")],
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate"), "{err}");
    }

    #[test]
    fn rejects_missing_installed_paths() {
        let specs = vec![spec("a", false, &[], "a")];
        let err = Manifest::from_specs(Path::new("/r"), Path::new("/h"), specs).unwrap_err();
        assert!(err.to_string().contains("no installed paths"), "{err}");
    }

    #[test]
    fn load_prefers_config_file() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(
            root.path().join(CONFIG_FILE),
            "[[entry]]\nname = \"tmux\"\ninstalled = [\"~/.tmux.conf\"]\nrepository = \"tmux/.tmux.conf\"\n",
        )
        .unwrap();
        let m = Manifest::load(root.path(), Path::new("/h")).unwrap();
        assert_eq!(m.entries().len(), 1);
        assert_eq!(m.entries()[0].installed_paths, [PathBuf::from("/h/.tmux.conf")]);
    }

    #[test]
    fn load_without_file_uses_builtin() {
        let root = tempfile::tempdir().unwrap();
        let m = Manifest::load(root.path(), Path::new("/h")).unwrap();
        assert_eq!(m.entries().len(), 5);
    }
}
