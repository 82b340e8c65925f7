//! Frontière “requête” : ce que fait la couche d’accueil avant/après le noyau.
//!
//! - Longueur bornée + filtre de caractères (première ligne de défense seulement :
//!   le validateur reste l’autorité, il ne dépend pas de ce filtre).
//! - Formes JSON des requêtes (champs identiques à l’API HTTP d’origine).
//! - Orchestration : filtre -> évaluation -> historique (inchangé en cas d’échec).

use serde::Deserialize;
use tracing::warn;

use super::erreur::{ErreurCalc, ResultatCalc};
use super::eval::{eval_expression_detaillee, DemarcheNoyau};
use super::historique::{Calcul, Historique};
use super::scientifique::{dispatch, Argument};

/// Longueur maximale (en caractères) d’une expression reçue.
pub const EXPRESSION_MAX: usize = 200;

/// Caractères admis par le pré-filtre.
pub const CARACTERES_PERMIS: &str = "0123456789+-*/(). ";

/// Corps de requête /calculate : {"expression": "5+3"}
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RequeteCalcul {
    pub expression: String,
}

/// Corps de requête /scientific : {"function": "sin", "value": 0.5}
/// ou {"function": "power", "value": {"base": 2, "exponent": 3}}
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RequeteScientifique {
    pub function: String,
    pub value: Argument,
}

/// Pré-filtre : longueur puis liste blanche de caractères.
pub fn verifier_expression(expression: &str) -> ResultatCalc<&str> {
    let longueur = expression.chars().count();
    if longueur > EXPRESSION_MAX {
        warn!(longueur, max = EXPRESSION_MAX, "expression trop longue refusée");
        return Err(ErreurCalc::ExpressionTropLongue { max: EXPRESSION_MAX });
    }
    if !expression.chars().all(|c| CARACTERES_PERMIS.contains(c)) {
        warn!(longueur, "caractères hors liste blanche refusés");
        return Err(ErreurCalc::CaracteresInvalides);
    }
    Ok(expression)
}

/// Calcul complet d’une session : filtre, évaluation, ajout à l’historique.
pub fn calculer(expression: &str, historique: &mut Historique) -> ResultatCalc<Calcul> {
    calculer_detaille(expression, historique).map(|(c, _)| c)
}

/// Comme calculer, avec la démarche (affichée par l’interface).
pub fn calculer_detaille(
    expression: &str,
    historique: &mut Historique,
) -> ResultatCalc<(Calcul, DemarcheNoyau)> {
    let expression = verifier_expression(expression)?;
    let (resultat, demarche) = eval_expression_detaillee(expression)?;
    historique.append(expression, resultat)?;

    // l’entrée stockée (expression éventuellement tronquée)
    let calcul = historique
        .list()
        .last()
        .cloned()
        .ok_or(ErreurCalc::ResultatInvalide)?;
    Ok((calcul, demarche))
}

impl RequeteCalcul {
    pub fn executer(&self, historique: &mut Historique) -> ResultatCalc<Calcul> {
        calculer(&self.expression, historique)
    }
}

impl RequeteScientifique {
    pub fn executer(&self) -> ResultatCalc<f64> {
        dispatch(&self.function, self.value)
    }
}
