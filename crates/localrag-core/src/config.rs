//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge built-in defaults + `config.toml` + `config.<env>.toml`
//! + `APP_*` env vars (nested keys separated by `__`, e.g.
//! `APP_CHUNKING__MAX_CHARS=400`). Provides a helper to expand `~` and `${VAR}`.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use crate::chunker::{Chunker, DEFAULT_MAX_CHARS, DEFAULT_OVERLAP};
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub data: DataSettings,
    pub chunking: ChunkingSettings,
    pub retrieval: RetrievalSettings,
    pub index: IndexSettings,
    pub answer: AnswerSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSettings {
    pub file: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChunkingSettings {
    pub max_chars: usize,
    pub overlap: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetrievalSettings {
    pub top_k: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexSettings {
    pub sublinear_tf: bool,
    pub smooth_idf: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerSettings {
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data: DataSettings { file: "raw_data/ARC_Intelligence_Profile.txt".to_string() },
            chunking: ChunkingSettings { max_chars: DEFAULT_MAX_CHARS, overlap: DEFAULT_OVERLAP },
            retrieval: RetrievalSettings { top_k: 3 },
            index: IndexSettings { sublinear_tf: false, smooth_idf: true },
            answer: AnswerSettings {
                model: "gpt-4o-mini".to_string(),
                base_url: "https://api.openai.com/v1".to_string(),
                temperature: 0.1,
            },
        }
    }
}

impl ChunkingSettings {
    pub fn chunker(&self) -> Result<Chunker> {
        Chunker::new(self.max_chars, self.overlap)
    }
}

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::from_figment(Self::figment_for_env(&env_name))
    }

    /// The provider stack for a given environment name, before extraction.
    pub fn figment_for_env(env_name: &str) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Settings::default())).merge(Toml::file("config.toml"));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment.merge(Env::prefixed("APP_").split("__"))
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config = Self { figment };
        config.settings()?.validate()?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| Error::InvalidConfig(format!("Failed to get '{}': {}", key, e)))
    }

    pub fn settings(&self) -> Result<Settings> {
        self.figment.extract().map_err(|e| Error::InvalidConfig(e.to_string()))
    }
}

impl Settings {
    /// Rejects values that would make retrieval silently useless. Callers that
    /// override settings after loading should validate again.
    pub fn validate(&self) -> Result<()> {
        if self.chunking.max_chars == 0 {
            return Err(Error::InvalidConfig("chunking.max_chars must be positive".to_string()));
        }
        if self.retrieval.top_k == 0 {
            return Err(Error::InvalidConfig("retrieval.top_k must be positive".to_string()));
        }
        Ok(())
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_apply_without_files() {
        Jail::expect_with(|_jail| {
            let config = Config::from_figment(Config::figment_for_env("test")).map_err(|e| e.to_string())?;
            let settings = config.settings().map_err(|e| e.to_string())?;
            assert_eq!(settings, Settings::default());
            Ok(())
        });
    }

    #[test]
    fn env_file_and_vars_override_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[chunking]\nmax_chars = 400\noverlap = 50\n")?;
            jail.create_file("config.test.toml", "[retrieval]\ntop_k = 5\n")?;
            jail.set_env("APP_ANSWER__MODEL", "local-model");
            let config = Config::from_figment(Config::figment_for_env("test")).map_err(|e| e.to_string())?;
            let settings = config.settings().map_err(|e| e.to_string())?;
            assert_eq!(settings.chunking, ChunkingSettings { max_chars: 400, overlap: 50 });
            assert_eq!(settings.retrieval.top_k, 5);
            assert_eq!(settings.answer.model, "local-model");
            let k: usize = config.get("retrieval.top_k").map_err(|e| e.to_string())?;
            assert_eq!(k, 5);
            Ok(())
        });
    }

    #[test]
    fn zero_max_chars_is_a_config_error() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[chunking]\nmax_chars = 0\n")?;
            let result = Config::from_figment(Config::figment_for_env("test"));
            assert!(matches!(result, Err(Error::InvalidConfig(_))));
            Ok(())
        });
    }

    #[test]
    fn negative_overlap_is_a_config_error() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[chunking]\noverlap = -5\n")?;
            let result = Config::from_figment(Config::figment_for_env("test"));
            assert!(matches!(result, Err(Error::InvalidConfig(_))));
            Ok(())
        });
    }

    #[test]
    fn overridden_settings_are_revalidated() {
        let mut settings = Settings::default();
        assert!(settings.validate().is_ok());
        settings.retrieval.top_k = 0;
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("retrieval.top_k must be positive"));
    }
}
