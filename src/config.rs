use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::achievements::DEFAULT_THRESHOLD;
use crate::store::validate_key;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub env: String,
    pub app: App,
    pub storage: Storage,
    pub achievements: Achievements,
    pub discord: Discord,
    pub logging: Logging,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct App {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Storage {
    pub data_dir: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Achievements {
    pub threshold: u64,
    pub season: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Discord {
    pub token: String,
    pub report_channel_id: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Logging {
    pub json: Option<bool>,
    pub level: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            env: "development".into(),
            app: App {
                name: "ALLIANCE Tracker".into(),
            },
            storage: Storage {
                data_dir: "data".into(),
            },
            achievements: Achievements {
                threshold: DEFAULT_THRESHOLD,
                season: "current".into(),
            },
            discord: Discord {
                token: "".into(),
                report_channel_id: None,
            },
            logging: Logging {
                json: Some(false),
                level: Some("info".into()),
            },
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        // Które środowisko?
        let env = std::env::var("ALLIANCE_ENV").unwrap_or_else(|_| "development".to_string());

        // Załaduj .env.<env> i .env (jeśli są)
        let _ = dotenvy::from_filename(format!(".env.{}", env));
        let _ = dotenvy::dotenv();

        let defaults = Settings {
            env: env.clone(),
            ..Settings::default()
        };

        // Warstwy: domyślne -> plik TOML -> zmienne środowiskowe ALLIANCE_*
        let figment = Self::figment(defaults, &env)
            // ALLIANCE_STORAGE__DATA_DIR => storage.data_dir itd.
            .merge(Env::prefixed("ALLIANCE_").split("__"));

        let mut s: Settings = figment.extract()?;
        s.env = env;
        s.validate()?;
        Ok(s)
    }

    /// Domyślne + `config/<env>.toml`, bez zmiennych środowiskowych.
    pub fn figment(defaults: Settings, env: &str) -> Figment {
        Figment::from(Serialized::defaults(defaults)).merge(Toml::file(format!("config/{}.toml", env)))
    }

    pub fn validate(&self) -> Result<()> {
        if self.achievements.threshold == 0 {
            bail!("achievements.threshold must be greater than 0");
        }
        if self.storage.data_dir.trim().is_empty() {
            bail!("storage.data_dir must not be empty");
        }
        if validate_key(&self.achievements.season).is_err() || self.achievements.season.contains('/') {
            bail!(
                "achievements.season `{}` may only contain letters, digits, `_` and `-`",
                self.achievements.season
            );
        }
        Ok(())
    }
}
