// src/noyau/expr.rs
//
// Arbre RESTREINT (sortie du validateur, seule entrée de l’évaluateur).
// - Nombre  : littéral flottant
// - Binaire : + - * / uniquement
// - Unaire  : moins / plus unaires uniquement
//
// IMPORTANT (SAFE):
// - Aucune autre variante n’existe : un nom, un appel, une puissance…
//   ne sont tout simplement pas représentables ici.
// - Ajouter une variante casse la compilation de validation.rs et eval.rs
//   (match exhaustifs) : impossible de contourner la liste blanche en silence.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpArith {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signe {
    Neg,
    Pos,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Nombre(f64),
    Binaire(OpArith, Box<Expr>, Box<Expr>),
    Unaire(Signe, Box<Expr>),
}

impl Expr {
    /// Nombre de noeuds (démarche / journalisation).
    pub fn taille(&self) -> usize {
        match self {
            Expr::Nombre(_) => 1,
            Expr::Unaire(_, x) => 1 + x.taille(),
            Expr::Binaire(_, a, b) => 1 + a.taille() + b.taille(),
        }
    }
}
