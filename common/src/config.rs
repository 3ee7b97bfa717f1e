//! This is the `ConfigFile` struct.
//!
//! This is for finding the right default locations for the configuration file of `filmap`.
//! This is a configuration file/struct neutral loading engine, storing only the base directory
//! and with `load()` read the proper file, the default one or fall back on `T::default()`.
//!
//! This encapsulates the configuration file, available with `.inner()` or `.inner_mut()`.
//!

use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use eyre::{Result, WrapErr};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, trace};

use crate::makepath;

/// Main name for the directory base
const TAG: &str = "filmap";

/// Anything with a file format version number.
///
pub trait Versioned {
    fn version(&self) -> usize;
}

/// A struct that can be read from a configuration file.
///
pub trait IntoConfig: Debug + Default + DeserializeOwned + Versioned {
    /// Version we know how to read
    const VERSION: usize;
    /// Basename of the file in the configuration directory
    const FILENAME: &'static str;
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration file {0:?}")]
    MissingConfig(PathBuf),
    #[error("Bad file version {found} in {path:?}, expected {expected}")]
    BadFileVersion {
        path: PathBuf,
        found: usize,
        expected: usize,
    },
}

/// Configuration file holder.
///
#[derive(Debug)]
pub struct ConfigFile<T: IntoConfig> {
    /// This is the base directory for all files.
    basedir: PathBuf,
    /// File we actually read, if any
    source: Option<PathBuf>,
    inner: T,
}

impl<T> ConfigFile<T>
where
    T: IntoConfig,
{
    #[tracing::instrument]
    fn new(tag: &str) -> Self {
        let basedir: PathBuf = match BaseDirs::new() {
            Some(base) => {
                #[cfg(unix)]
                let base: PathBuf = makepath!(base.home_dir(), ".config", tag);

                #[cfg(windows)]
                let base: PathBuf = makepath!(base.data_local_dir(), tag);

                base
            }
            // No home directory, use the current one.
            None => PathBuf::from(".").join(tag),
        };
        debug!("base = {basedir:?}");
        ConfigFile {
            basedir,
            source: None,
            inner: T::default(),
        }
    }

    /// Returns the path of the default config directory
    ///
    pub fn config_path(&self) -> PathBuf {
        self.basedir.clone()
    }

    /// Returns the path of the default config file
    ///
    pub fn default_file(&self) -> PathBuf {
        self.config_path().join(T::FILENAME)
    }

    /// Load the file and return a struct T in the right format.
    ///
    /// Use the following search path:
    /// - file specified on CLI, which must exist
    /// - default file in basedir (based on $HOME or $LOCALAPPDATA)
    /// - `T::default()` if there is no default file
    ///
    #[tracing::instrument]
    pub fn load(fname: Option<&Path>) -> Result<ConfigFile<T>> {
        let mut cfg = ConfigFile::<T>::new(TAG);

        let fname = match fname {
            Some(fname) => {
                if !fname.exists() {
                    return Err(ConfigError::MissingConfig(fname.to_path_buf()).into());
                }
                fname.to_path_buf()
            }
            None => {
                let def = cfg.default_file();
                if !def.exists() {
                    debug!("No default file {def:?}, using defaults");
                    return Ok(cfg);
                }
                def
            }
        };

        trace!("Loading config file {fname:?}");
        let data = fs::read_to_string(&fname)
            .wrap_err_with(|| format!("Can not read {fname:?}"))?;

        let data: T =
            hcl::from_str(&data).wrap_err_with(|| format!("Can not parse {fname:?}"))?;
        debug!("struct data = {data:?}");

        if data.version() != T::VERSION {
            return Err(ConfigError::BadFileVersion {
                path: fname,
                found: data.version(),
                expected: T::VERSION,
            }
            .into());
        }

        cfg.inner = data;
        cfg.source = Some(fname);
        Ok(cfg)
    }

    /// File the configuration comes from, `None` means built-in defaults
    ///
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Return the inner configuration
    ///
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Return the inner configuration as putable
    ///
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the holder
    ///
    pub fn into_inner(self) -> T {
        self.inner
    }
}
