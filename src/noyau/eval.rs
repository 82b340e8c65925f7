//! Noyau : évaluation (pipeline réel)
//!
//! tokenize -> RPN -> Noeud (générique) -> valider -> Expr (restreint) -> évaluer
//!
//! Deux passes strictes : la validation porte sur l’arbre complet, l’évaluation
//! ne voit que le type restreint. Il n’existe aucun chemin du texte d’entrée
//! vers une opération hors liste blanche.

use tracing::debug;

use super::erreur::{ErreurCalc, ResultatCalc};
use super::expr::{Expr, OpArith, Signe};
use super::format::format_expr;
use super::jetons::{format_tokens, tokenize};
use super::rpn::{format_rpn, from_rpn, to_rpn};
use super::validation::valider;

#[derive(Default, Clone, Debug, PartialEq)]
pub struct DemarcheNoyau {
    pub jetons: String,
    pub rpn: String,
    pub arbre: String,
}

/// API publique : évalue une expression arithmétique restreinte.
pub fn eval_expression(expr_str: &str) -> ResultatCalc<f64> {
    eval_expression_detaillee(expr_str).map(|(v, _)| v)
}

/// Comme eval_expression, avec la démarche (jetons, RPN, arbre validé).
pub fn eval_expression_detaillee(expr_str: &str) -> ResultatCalc<(f64, DemarcheNoyau)> {
    let s = expr_str.trim();
    if s.is_empty() {
        return Err(ErreurCalc::invalide("entrée vide"));
    }

    // 1) Jetons
    let jetons = tokenize(s)?;

    // 2) RPN
    let rpn = to_rpn(&jetons)?;

    // 3) Arbre générique
    let noeud = from_rpn(&rpn)?;

    // 4) Validation complète (avant toute évaluation)
    let expr = valider(&noeud)?;

    // 5) Évaluation
    let v = evaluer(&expr)?;

    // 6) Résultat fini (débordement possible : 1e200*1e200)
    if !v.is_finite() {
        return Err(ErreurCalc::ResultatInvalide);
    }

    debug!(
        longueur = s.chars().count(),
        noeuds = expr.taille(),
        "expression évaluée"
    );

    let d = DemarcheNoyau {
        jetons: format_tokens(&jetons),
        rpn: format_rpn(&rpn),
        arbre: format_expr(&expr),
    };

    Ok((v, d))
}

/// Évaluation récursive de l’arbre restreint.
pub fn evaluer(expr: &Expr) -> ResultatCalc<f64> {
    match expr {
        Expr::Nombre(v) => Ok(*v),

        Expr::Unaire(Signe::Neg, x) => Ok(-evaluer(x)?),
        Expr::Unaire(Signe::Pos, x) => evaluer(x),

        Expr::Binaire(op, a, b) => {
            let a = evaluer(a)?;
            let b = evaluer(b)?;
            match op {
                OpArith::Add => Ok(a + b),
                OpArith::Sub => Ok(a - b),
                OpArith::Mul => Ok(a * b),
                OpArith::Div => {
                    // -0.0 == 0.0 : les deux zéros sont refusés
                    if b == 0.0 {
                        return Err(ErreurCalc::DivisionParZero);
                    }
                    Ok(a / b)
                }
            }
        }
    }
}
