// src/noyau/validation.rs
//
// Validateur : Noeud (générique) -> Expr (restreint).
//
// Contrat :
// - L’arbre ENTIER est validé avant toute évaluation : la sortie est un Expr
//   complet ou une erreur, jamais un mélange.
// - Liste blanche : Nombre, Binaire{+,-,*,/}, Unaire{-,+}. Tout le reste
//   (noms, appels, attributs, indexation, collections, chaînes, affectation,
//   comparaisons, opérateurs logiques/binaires, **, //, %) est refusé.

use super::erreur::{ErreurCalc, ResultatCalc};
use super::expr::{Expr, OpArith, Signe};
use super::syntaxe::{Noeud, OpBinaire, OpUnaire};

pub fn valider(noeud: &Noeud) -> ResultatCalc<Expr> {
    match noeud {
        Noeud::Nombre(v) => {
            if !v.is_finite() {
                return Err(ErreurCalc::invalide("nombre non fini"));
            }
            Ok(Expr::Nombre(*v))
        }

        Noeud::Binaire(op, a, b) => {
            let op = match op {
                OpBinaire::Add => OpArith::Add,
                OpBinaire::Sub => OpArith::Sub,
                OpBinaire::Mul => OpArith::Mul,
                OpBinaire::Div => OpArith::Div,
                OpBinaire::Pow
                | OpBinaire::DivEnt
                | OpBinaire::Modulo
                | OpBinaire::Affecte
                | OpBinaire::Egal
                | OpBinaire::Different
                | OpBinaire::Inf
                | OpBinaire::InfEgal
                | OpBinaire::Sup
                | OpBinaire::SupEgal
                | OpBinaire::EtBits
                | OpBinaire::OuBits
                | OpBinaire::XorBits
                | OpBinaire::EtLogique
                | OpBinaire::OuLogique => {
                    return Err(ErreurCalc::invalide(format!(
                        "opération interdite: {}",
                        op.symbole()
                    )))
                }
            };
            let a = valider(a)?;
            let b = valider(b)?;
            Ok(Expr::Binaire(op, Box::new(a), Box::new(b)))
        }

        Noeud::Unaire(op, x) => {
            let signe = match op {
                OpUnaire::Neg => Signe::Neg,
                OpUnaire::Pos => Signe::Pos,
                OpUnaire::Inversion | OpUnaire::NonLogique => {
                    return Err(ErreurCalc::invalide(format!(
                        "opération interdite: {}",
                        op.symbole()
                    )))
                }
            };
            Ok(Expr::Unaire(signe, Box::new(valider(x)?)))
        }

        Noeud::Nom(_)
        | Noeud::Texte(_)
        | Noeud::Appel(..)
        | Noeud::Attribut(..)
        | Noeud::Indice(..)
        | Noeud::Collection(..) => Err(ErreurCalc::invalide(format!(
            "noeud interdit: {}",
            noeud.genre()
        ))),
    }
}
