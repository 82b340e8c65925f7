//! Tests scientifiques (campagne) : propriétés “pour tout” via proptest.
//!
//! - Arithmétique : accord avec une évaluation de référence (précédence usuelle)
//! - Filtre : tout caractère hors liste blanche est refusé, partout
//! - Fonctions : allers-retours ln/exp et sqrt/square
//! - Historique : capacité, ordre, effacement

use proptest::prelude::*;

use super::erreur::ErreurCalc;
use super::historique::{Historique, HISTORIQUE_PLAFOND};
use super::requete::{calculer, verifier_expression};
use super::scientifique::{dispatch, Argument};
use super::eval_expression;

/* ------------------------ Référence (précédence à deux niveaux) ------------------------ */

#[derive(Clone, Copy, Debug)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    fn symbole(self) -> char {
        match self {
            Op::Add => '+',
            Op::Sub => '-',
            Op::Mul => '*',
            Op::Div => '/',
        }
    }
}

/// Opérande : entier positif, avec un moins unaire éventuel.
fn operande() -> impl Strategy<Value = (u32, bool)> {
    (0u32..1000, any::<bool>())
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![Just(Op::Add), Just(Op::Sub), Just(Op::Mul), Just(Op::Div)]
}

fn texte_plat(premier: (u32, bool), suite: &[(Op, (u32, bool))]) -> String {
    let rendu = |(n, neg): (u32, bool)| if neg { format!("-{n}") } else { format!("{n}") };
    let mut s = rendu(premier);
    for (o, x) in suite {
        s.push(' ');
        s.push(o.symbole());
        s.push(' ');
        s.push_str(&rendu(*x));
    }
    s
}

/// * et / d’abord (gauche à droite), puis + et - (gauche à droite).
/// None si une division par zéro survient.
fn reference(premier: (u32, bool), suite: &[(Op, (u32, bool))]) -> Option<f64> {
    let val = |(n, neg): (u32, bool)| if neg { -(n as f64) } else { n as f64 };

    let mut termes: Vec<(Op, f64)> = vec![(Op::Add, val(premier))];
    for (o, x) in suite {
        let x = val(*x);
        match o {
            Op::Mul | Op::Div => {
                let (_, dernier) = termes.last_mut()?;
                if matches!(o, Op::Div) {
                    if x == 0.0 {
                        return None;
                    }
                    *dernier /= x;
                } else {
                    *dernier *= x;
                }
            }
            Op::Add | Op::Sub => termes.push((*o, x)),
        }
    }

    let mut it = termes.into_iter();
    let (_, mut acc) = it.next()?;
    for (o, t) in it {
        match o {
            Op::Sub => acc -= t,
            _ => acc += t,
        }
    }
    Some(acc)
}

/* ------------------------ Propriétés ------------------------ */

proptest! {
    #[test]
    fn precedence_conforme_a_la_reference(
        premier in operande(),
        suite in prop::collection::vec((op(), operande()), 0..12),
    ) {
        let s = texte_plat(premier, &suite);
        match reference(premier, &suite) {
            Some(attendu) => prop_assert_eq!(eval_expression(&s), Ok(attendu), "expr={}", s),
            None => prop_assert_eq!(eval_expression(&s), Err(ErreurCalc::DivisionParZero)),
        }
    }

    #[test]
    fn parentheses_redondantes_sans_effet(
        premier in operande(),
        suite in prop::collection::vec((op(), operande()), 0..6),
    ) {
        let s = texte_plat(premier, &suite);
        prop_assert_eq!(eval_expression(&format!("(({s}))")), eval_expression(&s));
    }

    #[test]
    fn tout_caractere_hors_liste_est_refuse(
        prefixe in "[0-9+*/() .-]{0,10}",
        intrus in any::<char>().prop_filter("hors liste blanche", |c| !"0123456789+-*/(). ".contains(*c)),
        suffixe in "[0-9+*/() .-]{0,10}",
    ) {
        let s = format!("{prefixe}{intrus}{suffixe}");
        prop_assert_eq!(verifier_expression(&s), Err(ErreurCalc::CaracteresInvalides));
    }

    #[test]
    fn lettres_refusees_par_l_evaluateur_seul(nom in "[a-zA-Z_][a-zA-Z0-9_]{0,8}", n in 0u32..100) {
        // sans le pré-filtre, le validateur refuse toujours
        for s in [nom.clone(), format!("{nom}({n})"), format!("{n}+{nom}"), format!("{nom}={n}")] {
            prop_assert!(
                matches!(eval_expression(&s), Err(ErreurCalc::ExpressionInvalide(_))),
                "accepté: {}", s
            );
        }
    }

    #[test]
    fn exp_de_ln(x in 1e-6f64..1e6) {
        let ln = dispatch("ln", Argument::Valeur(x)).unwrap();
        let retour = dispatch("exp", Argument::Valeur(ln)).unwrap();
        prop_assert!(((retour - x) / x).abs() < 1e-12, "x={} retour={}", x, retour);
    }

    #[test]
    fn sqrt_de_square(x in -1e6f64..1e6) {
        let carre = dispatch("square", Argument::Valeur(x)).unwrap();
        let retour = dispatch("sqrt", Argument::Valeur(carre)).unwrap();
        prop_assert!((retour - x.abs()).abs() <= 1e-9 * x.abs().max(1.0));
    }

    #[test]
    fn historique_borne_et_ordonne(capacite in 1usize..20, n in 0usize..60) {
        let mut h = Historique::new(capacite);
        for i in 0..n {
            h.append(&format!("{i}+0"), i as f64).unwrap();
        }
        prop_assert_eq!(h.len(), n.min(capacite));
        let resultats: Vec<f64> = h.list().map(|c| c.resultat).collect();
        let attendus: Vec<f64> = (n.saturating_sub(capacite)..n).map(|i| i as f64).collect();
        prop_assert_eq!(resultats, attendus);
    }

    #[test]
    fn capacite_jamais_au_dela_du_plafond(capacite in 0usize..100_000) {
        let h = Historique::new(capacite);
        prop_assert!(h.capacite() >= 1 && h.capacite() <= HISTORIQUE_PLAFOND);
    }
}

/* ------------------------ Cas nommés ------------------------ */

#[test]
fn sci_exemples_de_reference() {
    assert_eq!(eval_expression("10/0"), Err(ErreurCalc::DivisionParZero));
    assert_eq!(eval_expression("10/2"), Ok(5.0));
    assert_eq!(eval_expression("2+3*4"), Ok(14.0));
    assert_eq!(eval_expression("(2+3)*4"), Ok(20.0));
    assert_eq!(eval_expression("-5+10"), Ok(5.0));
}

#[test]
fn sci_dispatch_de_reference() {
    let v = |nom: &str, x: f64| dispatch(nom, Argument::Valeur(x));
    let p = |base: f64, exponent: f64| dispatch("power", Argument::Puissance { base, exponent });

    assert!(matches!(v("asin", 1.5), Err(ErreurCalc::ErreurDomaine(_))));
    assert!(matches!(v("sqrt", -4.0), Err(ErreurCalc::ErreurDomaine(_))));
    assert_eq!(v("reciprocal", 0.0), Err(ErreurCalc::DivisionParZero));
    assert!(matches!(p(0.0, 0.0), Err(ErreurCalc::Indefini(_))));
    assert!(matches!(p(-4.0, 0.5), Err(ErreurCalc::ErreurDomaine(_))));
    assert_eq!(p(-2.0, 3.0), Ok(-8.0));
}

#[test]
fn sci_calculs_enchaines_session() {
    let mut h = Historique::default();
    calculer("5+5", &mut h).unwrap();
    let s = dispatch("sqrt", Argument::Valeur(16.0)).unwrap();
    assert_eq!(s, 4.0);
    calculer("10*2", &mut h).unwrap();

    // le répartiteur ne touche pas l’historique
    let exprs: Vec<&str> = h.list().map(|c| c.expression.as_str()).collect();
    assert_eq!(exprs, ["5+5", "10*2"]);

    h.clear();
    h.clear();
    assert_eq!(h.list().count(), 0);
}

#[test]
fn sci_filtre_puis_validateur() {
    // le filtre laisse passer "**", le validateur tranche
    assert!(verifier_expression("3**2").is_ok());
    assert!(matches!(
        eval_expression("3**2"),
        Err(ErreurCalc::ExpressionInvalide(_))
    ));
}
