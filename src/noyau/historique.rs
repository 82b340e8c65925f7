//! Historique des calculs (anneau borné, par session).
//!
//! Contrats :
//! - Ordre d’insertion, lecture du plus ancien au plus récent.
//! - Capacité configurée, bornée par un plafond dur (HISTORIQUE_PLAFOND) quoi qu’il arrive.
//! - Éviction FIFO : on ajoute à la fin puis on tronque par le début.
//! - Une entrée n’est jamais modifiée après insertion.
//! - Aucun état global : l’historique appartient à sa session (valeur explicite).

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::erreur::{ErreurCalc, ResultatCalc};

/// Capacité par défaut.
pub const HISTORIQUE_MAX: usize = 10;

/// Garde-fou : plafond dur, indépendant de la configuration.
pub const HISTORIQUE_PLAFOND: usize = 100;

/// Longueur maximale (en caractères) d’une expression stockée.
pub const EXPRESSION_STOCKEE_MAX: usize = 100;

/// Une ligne d’historique. Forme JSON : {"expression": "...", "result": 8.0}
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Calcul {
    pub expression: String,
    #[serde(rename = "result")]
    pub resultat: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Historique {
    entrees: VecDeque<Calcul>,
    capacite: usize,
}

impl Default for Historique {
    fn default() -> Self {
        Self::new(HISTORIQUE_MAX)
    }
}

impl Historique {
    /// Capacité bornée à [1, HISTORIQUE_PLAFOND].
    pub fn new(capacite: usize) -> Self {
        let capacite = capacite.clamp(1, HISTORIQUE_PLAFOND);
        Self {
            entrees: VecDeque::with_capacity(capacite + 1),
            capacite,
        }
    }

    pub fn capacite(&self) -> usize {
        self.capacite
    }

    pub fn len(&self) -> usize {
        self.entrees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entrees.is_empty()
    }

    /// Ajoute (expression tronquée à EXPRESSION_STOCKEE_MAX caractères, résultat fini),
    /// puis retire les plus anciennes entrées au-delà de la capacité.
    pub fn append(&mut self, expression: &str, resultat: f64) -> ResultatCalc<()> {
        if !resultat.is_finite() {
            return Err(ErreurCalc::ResultatInvalide);
        }

        let expression: String = expression.chars().take(EXPRESSION_STOCKEE_MAX).collect();
        self.entrees.push_back(Calcul {
            expression,
            resultat,
        });

        while self.entrees.len() > self.capacite {
            self.entrees.pop_front();
        }
        Ok(())
    }

    /// Vide l’historique (idempotent).
    pub fn clear(&mut self) {
        if !self.entrees.is_empty() {
            info!(entrees = self.entrees.len(), "historique effacé");
        }
        self.entrees.clear();
    }

    /// Entrées du plus ancien au plus récent.
    pub fn list(&self) -> impl DoubleEndedIterator<Item = &Calcul> + ExactSizeIterator + '_ {
        self.entrees.iter()
    }

    /// Copie ordonnée (forme JSON de la réponse).
    pub fn to_vec(&self) -> Vec<Calcul> {
        self.entrees.iter().cloned().collect()
    }
}
