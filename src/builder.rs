use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::ToygenError;
use crate::file;
use crate::generate::{self, Artifacts};
use crate::ops::Outcome;
use crate::resolve::{self, SettingsInput};
use crate::settings::{self, Settings};
use crate::types::Action;

/// Entry point for running the generator.
pub struct Toygen {
    settings: Settings,
}

impl Toygen {
    pub fn builder() -> ToygenBuilder {
        ToygenBuilder::new()
    }

    /// Run with already-resolved settings.
    pub fn with_settings(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Read the input file and generate every artifact in memory.
    pub fn generate(&self) -> Result<Artifacts, ToygenError> {
        let content = file::read_text(&self.settings.input)?;
        debug!(input = %self.settings.input.display(), bytes = content.len(), "read config");
        generate::generate(&content)
    }

    /// Handle an [`Action`] (generate / show / template).
    pub fn handle(&self, action: &Action) -> Result<Outcome, ToygenError> {
        match action {
            Action::Generate => {
                let artifacts = self.generate()?;
                let files = generate::write_artifacts(&artifacts, &self.settings)?;
                info!(count = files.len(), "generation complete");
                Ok(Outcome::Generated { files })
            }
            Action::Show { artifact } => {
                let artifacts = self.generate()?;
                Ok(Outcome::Artifact(artifacts.get(*artifact).to_string()))
            }
            Action::Template { output } => {
                let template = settings::template();
                match output {
                    Some(path) => {
                        std::fs::write(path, &template).map_err(|source| ToygenError::Write {
                            path: path.clone(),
                            source,
                        })?;
                        Ok(Outcome::TemplateWritten { path: path.clone() })
                    }
                    None => Ok(Outcome::Template(template)),
                }
            }
        }
    }

    /// Handle an [`Action`] and print the outcome to stdout.
    pub fn handle_and_print(&self, action: &Action) -> Result<(), ToygenError> {
        let outcome = self.handle(action)?;
        print!("{outcome}");
        Ok(())
    }
}

/// Collects the settings layers before resolving them.
pub struct ToygenBuilder {
    settings_file: Option<PathBuf>,
    search_dir: Option<PathBuf>,
    env_enabled: bool,
    strict: bool,
    overrides: Vec<(String, toml::Value)>,
}

impl ToygenBuilder {
    fn new() -> Self {
        Self {
            settings_file: None,
            search_dir: None,
            env_enabled: true,
            strict: true,
            overrides: Vec::new(),
        }
    }

    /// Use this settings file instead of looking for `toygen.toml`. It must exist.
    pub fn settings_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_file = Some(path.into());
        self
    }

    /// Directory searched for `toygen.toml` (default: the working directory).
    pub fn search_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_dir = Some(dir.into());
        self
    }

    /// Ignore `TOYGEN__*` environment variables.
    pub fn no_env(mut self) -> Self {
        self.env_enabled = false;
        self
    }

    /// Enable or disable strict mode (default: `true`).
    /// In strict mode, unknown keys in the settings file produce errors.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Add a settings override. `None` values are ignored (useful for optional clap args).
    pub fn set<V: Into<toml::Value>>(mut self, key: &str, value: Option<V>) -> Self {
        if let Some(v) = value {
            self.overrides.push((key.to_string(), v.into()));
        }
        self
    }

    /// Add a path-valued override. `None` values are ignored.
    pub fn set_path<P: AsRef<Path>>(self, key: &str, value: Option<P>) -> Self {
        let value = value.map(|p| p.as_ref().to_string_lossy().into_owned());
        self.set(key, value)
    }

    /// Resolve settings through all layers.
    pub fn load(self) -> Result<Toygen, ToygenError> {
        let search_dir = match &self.search_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().map_err(|source| ToygenError::Read {
                path: PathBuf::from("."),
                source,
            })?,
        };
        let file = file::load_settings_file(self.settings_file.as_deref(), &search_dir)?;

        let input = SettingsInput {
            file,
            env_vars: if self.env_enabled {
                std::env::vars().collect()
            } else {
                Vec::new()
            },
            env_prefix: self
                .env_enabled
                .then(|| settings::ENV_PREFIX.to_string()),
            overrides: self.overrides,
            strict: self.strict,
        };

        let settings = resolve::resolve_settings(input)?;
        debug!(?settings, "resolved settings");
        Ok(Toygen { settings })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ArtifactKind;
    use std::fs;
    use tempfile::TempDir;

    /// A project directory with a `.config` and settings pointing into it.
    fn project(config: &str) -> (TempDir, Toygen) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".config"), config).unwrap();
        let toygen = Toygen::builder()
            .search_dir(dir.path())
            .no_env()
            .set_path("input", Some(dir.path().join(".config")))
            .set_path("output_dir", Some(dir.path().join("generated")))
            .load()
            .unwrap();
        (dir, toygen)
    }

    #[test]
    fn defaults_without_settings_file() {
        let dir = TempDir::new().unwrap();
        let toygen = Toygen::builder()
            .search_dir(dir.path())
            .no_env()
            .load()
            .unwrap();
        assert_eq!(toygen.settings(), &Settings::defaults().unwrap());
    }

    #[test]
    fn settings_file_in_search_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("toygen.toml"), "output_dir = \"out\"\n").unwrap();
        let toygen = Toygen::builder()
            .search_dir(dir.path())
            .no_env()
            .load()
            .unwrap();
        assert_eq!(toygen.settings().output_dir, PathBuf::from("out"));
    }

    #[test]
    fn override_beats_settings_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("toygen.toml"), "output_dir = \"out\"\n").unwrap();
        let toygen = Toygen::builder()
            .search_dir(dir.path())
            .no_env()
            .set("output_dir", Some("cli-out"))
            .load()
            .unwrap();
        assert_eq!(toygen.settings().output_dir, PathBuf::from("cli-out"));
    }

    #[test]
    fn none_override_skipped() {
        let builder = Toygen::builder().set::<String>("input", None);
        assert!(builder.overrides.is_empty());
    }

    #[test]
    fn strict_settings_file_rejects_typo() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("toygen.toml"), "outptu_dir = \"out\"\n").unwrap();
        let result = Toygen::builder().search_dir(dir.path()).no_env().load();
        assert!(matches!(result, Err(ToygenError::UnknownSettings(_))));
    }

    #[test]
    fn generate_action_writes_headers() {
        let (dir, toygen) = project("CONFIG_TOYBOX=y\nCONFIG_CAT=y\n");
        let outcome = toygen.handle(&Action::Generate).unwrap();

        let Outcome::Generated { files } = outcome else {
            panic!("Expected Generated");
        };
        assert_eq!(files.len(), 4);
        let flags = fs::read_to_string(dir.path().join("generated/flags.h")).unwrap();
        assert!(flags.contains("#define FLAG_v (1ULL<<4)"));
    }

    #[test]
    fn show_action_writes_nothing() {
        let (dir, toygen) = project("CONFIG_CAT=y\n");
        let outcome = toygen
            .handle(&Action::Show {
                artifact: ArtifactKind::Newtoys,
            })
            .unwrap();
        assert_eq!(
            outcome,
            Outcome::Artifact("USE_CAT(NEWTOY(cat, \"uvte\", TOYFLAG_BIN))\n".into())
        );
        assert!(!dir.path().join("generated").exists());
    }

    #[test]
    fn missing_input_is_read_error() {
        let dir = TempDir::new().unwrap();
        let toygen = Toygen::builder()
            .search_dir(dir.path())
            .no_env()
            .set_path("input", Some(dir.path().join("missing.config")))
            .load()
            .unwrap();
        let err = toygen.handle(&Action::Generate).unwrap_err();
        assert!(matches!(err, ToygenError::Read { .. }));
    }

    #[test]
    fn template_action_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("toygen.toml");
        let toygen = Toygen::with_settings(Settings::defaults().unwrap());
        let outcome = toygen
            .handle(&Action::Template {
                output: Some(path.clone()),
            })
            .unwrap();
        assert_eq!(outcome, Outcome::TemplateWritten { path: path.clone() });
        assert!(fs::read_to_string(path).unwrap().contains("output_dir"));
    }
}
