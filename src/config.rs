//! Configuration de l’application (variables d’environnement, .env optionnel).
//!
//! Variables lues :
//! - CALCULATRICE_HISTORIQUE_MAX : capacité de l’historique (défaut 10, plafond 100)
//! - CALCULATRICE_THEME          : macos | dark | blue (défaut macos)
//! - CALCULATRICE_LOG            : niveau de journalisation (défaut info)
//! - CALCULATRICE_LOG_FORMAT     : pretty | json (défaut pretty)
//!
//! En wasm32 il n’y a pas d’environnement : `Config::default()`.

use std::str::FromStr;

use strum::{Display, EnumIter, EnumString};
use thiserror::Error;

use crate::noyau::historique::{HISTORIQUE_MAX, HISTORIQUE_PLAFOND};

pub const VAR_HISTORIQUE_MAX: &str = "CALCULATRICE_HISTORIQUE_MAX";
pub const VAR_THEME: &str = "CALCULATRICE_THEME";
pub const VAR_LOG: &str = "CALCULATRICE_LOG";
pub const VAR_LOG_FORMAT: &str = "CALCULATRICE_LOG_FORMAT";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErreurConfig {
    #[error("{variable} : entier attendu, reçu « {valeur} »")]
    EntierInvalide { variable: &'static str, valeur: String },

    #[error("{variable} : valeur inconnue « {valeur} »")]
    ValeurInconnue { variable: &'static str, valeur: String },
}

/// Thèmes disponibles (liste blanche : tout autre nom est refusé).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Theme {
    #[default]
    Macos,
    Dark,
    Blue,
}

impl Theme {
    /// Nom affiché dans le sélecteur.
    pub fn libelle(self) -> &'static str {
        match self {
            Theme::Macos => "macOS",
            Theme::Dark => "Dark Pro",
            Theme::Blue => "Modern Blue",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Déjà bornée à [1, HISTORIQUE_PLAFOND].
    pub historique_max: usize,
    pub theme: Theme,
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            historique_max: HISTORIQUE_MAX,
            theme: Theme::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Charge `.env` s’il existe, puis lit l’environnement du processus.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Result<Self, ErreurConfig> {
        // .env absent : pas une erreur
        let _ = dotenvy::dotenv();
        Self::depuis(|cle| std::env::var(cle).ok())
    }

    /// Construction à partir d’une source clé -> valeur quelconque.
    pub fn depuis<F>(lire: F) -> Result<Self, ErreurConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaut = Config::default();

        let historique_max = match lire(VAR_HISTORIQUE_MAX) {
            Some(v) => v
                .trim()
                .parse::<usize>()
                .map_err(|_| ErreurConfig::EntierInvalide {
                    variable: VAR_HISTORIQUE_MAX,
                    valeur: v.clone(),
                })?
                .clamp(1, HISTORIQUE_PLAFOND),
            None => defaut.historique_max,
        };

        let theme = match lire(VAR_THEME) {
            Some(v) => enumere(VAR_THEME, &v)?,
            None => defaut.theme,
        };

        let logging = LoggingConfig {
            level: lire(VAR_LOG).unwrap_or(defaut.logging.level),
            format: match lire(VAR_LOG_FORMAT) {
                Some(v) => enumere(VAR_LOG_FORMAT, &v)?,
                None => defaut.logging.format,
            },
        };

        Ok(Config {
            historique_max,
            theme,
            logging,
        })
    }
}

fn enumere<T: FromStr>(variable: &'static str, valeur: &str) -> Result<T, ErreurConfig> {
    valeur
        .trim()
        .parse()
        .map_err(|_| ErreurConfig::ValeurInconnue {
            variable,
            valeur: valeur.to_string(),
        })
}
