// src/noyau/format.rs
//
// Affichage des nombres (f64 partout).
//
// Règle unique, quel que soit le chemin de calcul :
// - valeur entière finie avec |x| < 1e15 => sans partie décimale ("8", pas "8.0")
// - sinon => représentation f64 la plus courte qui relit la même valeur
// - -0 s’affiche "0"

use super::expr::{Expr, OpArith, Signe};

/// Au-delà, un f64 entier n’a plus de chiffres “fiables” à l’unité près.
const ENTIER_AFFICHABLE_MAX: f64 = 1e15;

pub fn format_nombre(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    if v.is_finite() && v.fract() == 0.0 && v.abs() < ENTIER_AFFICHABLE_MAX {
        return format!("{}", v as i64);
    }
    format!("{v}")
}

/// Arbre restreint en notation infixe parenthésée (démarche).
pub fn format_expr(e: &Expr) -> String {
    match e {
        Expr::Nombre(v) => format_nombre(*v),
        Expr::Unaire(Signe::Neg, x) => format!("-{}", format_operande(x)),
        Expr::Unaire(Signe::Pos, x) => format!("+{}", format_operande(x)),
        Expr::Binaire(op, a, b) => {
            let s = match op {
                OpArith::Add => "+",
                OpArith::Sub => "-",
                OpArith::Mul => "*",
                OpArith::Div => "/",
            };
            format!("({}{s}{})", format_expr(a), format_expr(b))
        }
    }
}

fn format_operande(e: &Expr) -> String {
    match e {
        // un nombre négatif sous un signe : parenthèses pour rester lisible
        Expr::Nombre(v) if *v < 0.0 => format!("({})", format_nombre(*v)),
        _ => format_expr(e),
    }
}
