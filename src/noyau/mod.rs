//! Noyau de la calculatrice (sans UI)
//!
//! Organisation interne :
//! - erreur.rs       : taxonomie d’erreurs (thiserror)
//! - jetons.rs       : tokenisation (large, volontairement)
//! - rpn.rs          : shunting-yard + construction de l’arbre générique
//! - syntaxe.rs      : arbre générique (formes permises ET interdites)
//! - validation.rs   : liste blanche, Noeud -> Expr
//! - expr.rs         : arbre restreint (Nombre / Binaire / Unaire)
//! - eval.rs         : pipeline complet + évaluation
//! - format.rs       : affichage des nombres et de l’arbre
//! - scientifique.rs : répartiteur des fonctions scientifiques
//! - historique.rs   : anneau borné par session
//! - requete.rs      : pré-filtre + formes JSON + orchestration

pub mod erreur;
pub mod eval;
pub mod expr;
pub mod format;
pub mod historique;
pub mod jetons;
pub mod requete;
pub mod rpn;
pub mod scientifique;
pub mod syntaxe;
pub mod validation;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::{ErreurCalc, ResultatCalc};
pub use eval::{eval_expression, eval_expression_detaillee, DemarcheNoyau};
pub use historique::{Calcul, Historique};
pub use requete::{
    calculer, calculer_detaille, verifier_expression, RequeteCalcul, RequeteScientifique,
};
pub use scientifique::{dispatch, Argument, Fonction, ModeAngle};
