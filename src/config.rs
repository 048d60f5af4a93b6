//! Provisioning manifest.
//!
//! The manifest is the single shared, read-only configuration object handed
//! to every task at construction time. It is loaded once, before the pipeline
//! runs, and never mutated afterwards. A missing key is a fatal load error,
//! not a silent default.
//!
//! Source-compiled dependencies are described by an explicit
//! [`CompiledDep`] descriptor keyed by name, and tasks resolve their
//! descriptor at construction via [`Config::compiled`], so a missing entry
//! fails before any task runs.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{OutfitterError, Result};

/// Descriptor for one dependency built from source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompiledDep {
    /// Tarball download URL.
    pub url: String,

    /// Path of a file that exists only after a successful `make install`,
    /// relative to the install prefix.
    pub marker: String,

    /// Directory name the tarball unpacks into.
    pub unpack_dir: String,

    /// Extra arguments appended to `./configure --prefix=<prefix>`.
    #[serde(default)]
    pub configure_args: Vec<String>,
}

impl CompiledDep {
    /// Absolute path of the completion marker under `prefix`.
    pub fn marker_path(&self, prefix: &Path) -> PathBuf {
        prefix.join(&self.marker)
    }

    /// File name of the downloaded archive (last URL segment).
    pub fn archive_name(&self) -> &str {
        self.url.rsplit('/').next().unwrap_or(&self.url)
    }
}

/// The provisioning manifest.
///
/// Every field except `remote_user` is required; parsing fails loudly when a
/// key is absent. Path values may start with `~`, expanded against the home
/// directory at load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Install location for the language runtime (conda distribution).
    pub runtime_dir: PathBuf,

    /// Download URL for the runtime installer.
    pub runtime_url: String,

    /// Conda packages to install into the runtime.
    pub conda_packages: Vec<String>,

    /// Pip packages to install into the runtime.
    pub pip_packages: Vec<String>,

    /// Install prefix for source-compiled libraries.
    pub prefix: PathBuf,

    /// Source-compiled dependencies, keyed by name.
    pub compiled: BTreeMap<String, CompiledDep>,

    /// Git URL of the auxiliary toolset repository.
    pub toolset_url: String,

    /// Clone destination for the toolset.
    pub toolset_dir: PathBuf,

    /// Directory the data fixtures unpack into.
    pub data_dir: PathBuf,

    /// Locally cached data archive, used instead of the remote when present.
    pub data_archive: PathBuf,

    /// Host serving the data archive.
    pub data_remote_host: String,

    /// Path of the data archive on the remote host.
    pub data_remote_path: String,

    /// Username on the remote host. Prompted for at run time when absent;
    /// the answer is held by the fetching task only, never written back here.
    #[serde(default)]
    pub remote_user: Option<String>,
}

impl Config {
    /// Load a manifest from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|_| OutfitterError::ConfigNotFound {
            path: path.to_path_buf(),
        })?;

        let config: Config =
            serde_json::from_str(&text).map_err(|e| OutfitterError::ConfigParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Ok(config.normalized())
    }

    /// Look up a compiled-dependency descriptor by name.
    pub fn compiled(&self, name: &str) -> Result<&CompiledDep> {
        self.compiled
            .get(name)
            .ok_or_else(|| OutfitterError::MissingDependency {
                name: name.to_string(),
            })
    }

    /// Expand `~` in all path-valued fields.
    fn normalized(mut self) -> Self {
        self.runtime_dir = expand_home(&self.runtime_dir);
        self.prefix = expand_home(&self.prefix);
        self.toolset_dir = expand_home(&self.toolset_dir);
        self.data_dir = expand_home(&self.data_dir);
        self.data_archive = expand_home(&self.data_archive);
        self
    }
}

impl Default for Config {
    /// The built-in manifest: the standard scientific stack provisioned when
    /// no `--config` file is given.
    fn default() -> Self {
        let mut compiled = BTreeMap::new();
        compiled.insert(
            "cfitsio".to_string(),
            CompiledDep {
                url: "https://heasarc.gsfc.nasa.gov/FTP/software/fitsio/c/cfitsio-4.4.0.tar.gz"
                    .to_string(),
                marker: "lib/libcfitsio.a".to_string(),
                unpack_dir: "cfitsio-4.4.0".to_string(),
                configure_args: vec![],
            },
        );
        compiled.insert(
            "wcslib".to_string(),
            CompiledDep {
                url: "ftp://ftp.atnf.csiro.au/pub/software/wcslib/wcslib-8.2.2.tar.bz2"
                    .to_string(),
                marker: "lib/libwcs.a".to_string(),
                unpack_dir: "wcslib-8.2.2".to_string(),
                configure_args: vec!["--without-pgplot".to_string()],
            },
        );

        Config {
            runtime_dir: expand_home(Path::new("~/miniconda3")),
            runtime_url:
                "https://repo.anaconda.com/miniconda/Miniconda3-latest-Linux-x86_64.sh"
                    .to_string(),
            conda_packages: vec![
                "numpy".to_string(),
                "scipy".to_string(),
                "matplotlib".to_string(),
                "astropy".to_string(),
                "ipython".to_string(),
            ],
            pip_packages: vec!["emcee".to_string(), "corner".to_string()],
            prefix: expand_home(Path::new("~/local")),
            compiled,
            toolset_url: "https://github.com/outfitter-dev/pipeline-tools.git".to_string(),
            toolset_dir: expand_home(Path::new("~/pipeline-tools")),
            data_dir: expand_home(Path::new("~/pipeline-data")),
            data_archive: expand_home(Path::new("~/pipeline-data.tar.gz")),
            data_remote_host: "data.example.edu".to_string(),
            data_remote_path: "/srv/pipeline/pipeline-data.tar.gz".to_string(),
            remote_user: None,
        }
    }
}

/// Expand a leading `~` against the home directory.
///
/// Paths without a leading `~` are returned unchanged, as is everything when
/// no home directory can be determined.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_manifest(dir: &TempDir, json: &str) -> PathBuf {
        let path = dir.path().join("manifest.json");
        fs::write(&path, json).unwrap();
        path
    }

    fn minimal_manifest_json() -> String {
        serde_json::to_string(&Config::default()).unwrap()
    }

    #[test]
    fn default_manifest_round_trips() {
        let temp = TempDir::new().unwrap();
        let path = write_manifest(&temp, &minimal_manifest_json());

        let config = Config::load(&path).unwrap();

        assert!(config.conda_packages.contains(&"numpy".to_string()));
        assert_eq!(config.compiled.len(), 2);
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let err = Config::load(Path::new("/nonexistent/manifest.json")).unwrap_err();
        assert!(matches!(err, OutfitterError::ConfigNotFound { .. }));
    }

    #[test]
    fn load_rejects_missing_key() {
        let temp = TempDir::new().unwrap();
        let mut value: serde_json::Value =
            serde_json::from_str(&minimal_manifest_json()).unwrap();
        value.as_object_mut().unwrap().remove("prefix");
        let path = write_manifest(&temp, &value.to_string());

        let err = Config::load(&path).unwrap_err();

        match err {
            OutfitterError::ConfigParse { message, .. } => assert!(message.contains("prefix")),
            other => panic!("expected ConfigParse, got {other}"),
        }
    }

    #[test]
    fn load_rejects_unknown_key() {
        let temp = TempDir::new().unwrap();
        let mut value: serde_json::Value =
            serde_json::from_str(&minimal_manifest_json()).unwrap();
        value
            .as_object_mut()
            .unwrap()
            .insert("typo_key".to_string(), serde_json::Value::Null);
        let path = write_manifest(&temp, &value.to_string());

        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn remote_user_defaults_to_none() {
        let config = Config::default();
        assert!(config.remote_user.is_none());
    }

    #[test]
    fn compiled_lookup_finds_descriptor() {
        let config = Config::default();
        let dep = config.compiled("cfitsio").unwrap();
        assert_eq!(dep.unpack_dir, "cfitsio-4.4.0");
    }

    #[test]
    fn compiled_lookup_fails_for_unknown_name() {
        let config = Config::default();
        let err = config.compiled("libpng").unwrap_err();
        assert!(matches!(
            err,
            OutfitterError::MissingDependency { name } if name == "libpng"
        ));
    }

    #[test]
    fn marker_path_joins_prefix() {
        let dep = CompiledDep {
            url: "https://example.com/pkg-1.0.tar.gz".to_string(),
            marker: "lib/libpkg.a".to_string(),
            unpack_dir: "pkg-1.0".to_string(),
            configure_args: vec![],
        };
        assert_eq!(
            dep.marker_path(Path::new("/opt/local")),
            PathBuf::from("/opt/local/lib/libpkg.a")
        );
    }

    #[test]
    fn archive_name_is_last_url_segment() {
        let dep = CompiledDep {
            url: "https://example.com/downloads/pkg-1.0.tar.gz".to_string(),
            marker: "lib/libpkg.a".to_string(),
            unpack_dir: "pkg-1.0".to_string(),
            configure_args: vec![],
        };
        assert_eq!(dep.archive_name(), "pkg-1.0.tar.gz");
    }

    #[test]
    fn expand_home_leaves_absolute_paths_alone() {
        assert_eq!(
            expand_home(Path::new("/usr/local")),
            PathBuf::from("/usr/local")
        );
    }

    #[test]
    fn expand_home_resolves_tilde() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home(Path::new("~/local")), home.join("local"));
        }
    }
}
