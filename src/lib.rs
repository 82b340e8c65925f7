//! Calculatrice Web : noyau de calcul sûr + configuration.
//!
//! - `noyau`  : évaluateur restreint, fonctions scientifiques, historique, frontière requête
//! - `config` : configuration par environnement (natif) ou par défaut (wasm32)
//!
//! L’interface egui (natif + web) vit dans le binaire et n’appelle que cette API.

pub mod config;
pub mod noyau;
