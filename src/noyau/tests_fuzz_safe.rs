//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariant clé : aucune entrée hors arithmétique pure n’atteint l’évaluation

use std::time::{Duration, Instant};

use super::erreur::ErreurCalc;
use super::eval_expression;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

/// Valeur attendue d’une sous-expression : Some(v), ou None si une division
/// par zéro a lieu quelque part dedans.
type Attendu = Option<f64>;

fn gen_nombre(rng: &mut Rng) -> (String, Attendu) {
    // entiers et décimaux simples, incluant 0 (utile pour tester les zéros)
    match rng.pick(4) {
        0 => ("0".to_string(), Some(0.0)),
        1 => {
            let n = rng.pick(50);
            (format!("{n}"), Some(n as f64))
        }
        2 => {
            let n = rng.pick(20);
            (format!("{n}.5"), Some(n as f64 + 0.5))
        }
        _ => {
            let n = rng.pick(9) + 1;
            (format!(".{n}"), Some(n as f64 / 10.0))
        }
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> (String, Attendu) {
    if depth == 0 {
        return gen_nombre(rng);
    }

    let binaire = |rng: &mut Rng, op: char| {
        let (sa, va) = gen_expr(rng, depth - 1);
        let (sb, vb) = gen_expr(rng, depth - 1);
        let v = match (va, vb) {
            (Some(a), Some(b)) => match op {
                '+' => Some(a + b),
                '-' => Some(a - b),
                '*' => Some(a * b),
                _ => {
                    if b == 0.0 {
                        None
                    } else {
                        Some(a / b)
                    }
                }
            },
            _ => None,
        };
        (format!("({sa}{op}{sb})"), v)
    };

    match rng.pick(7) {
        0 => gen_nombre(rng),
        1 => binaire(rng, '+'),
        2 => binaire(rng, '-'),
        3 => binaire(rng, '*'),
        4 => binaire(rng, '/'),
        5 => {
            let (s, v) = gen_expr(rng, depth - 1);
            (format!("-{s}"), v.map(|x| -x))
        }
        _ => {
            let (s, v) = gen_expr(rng, depth - 1);
            (format!(" + {s} "), v)
        }
    }
}

/// Alphabet “hostile” : arithmétique + lettres + ponctuation + non-ASCII.
const ALPHABET: &[char] = &[
    '0', '1', '2', '9', '.', '+', '-', '*', '/', '(', ')', ' ', 'a', 'x', '_', 'e', '=', '<',
    '!', '[', ']', '{', '}', ',', ':', '"', '\'', '%', '&', '|', '^', '~', ';', '$', '#', 'é',
    'π',
];

fn est_arithmetique(c: char) -> bool {
    c.is_ascii_digit() || "+-*/(). ".contains(c)
}

fn gen_hostile(rng: &mut Rng, longueur: usize) -> String {
    (0..longueur)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_arithmetique_conforme() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..300 {
        budget(t0, max);

        let (expr, attendu) = gen_expr(&mut rng, 5);

        match (eval_expression(&expr), attendu) {
            (Ok(v), Some(a)) => {
                assert_eq!(v.to_bits(), a.to_bits(), "expr={expr:?} v={v} attendu={a}");
                seen_ok += 1;
            }
            (Err(ErreurCalc::DivisionParZero), None) => seen_err += 1,
            (obtenu, attendu) => {
                panic!("expr={expr:?} obtenu={obtenu:?} attendu={attendu:?}")
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 50, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune division par zéro vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_entrees_hostiles() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..2000 {
        budget(t0, max);

        let longueur = 1 + rng.pick(30) as usize;
        let s = gen_hostile(&mut rng, longueur);

        let r = eval_expression(&s);
        if !s.chars().all(est_arithmetique) {
            // au moins un caractère hors arithmétique : refus, jamais de valeur
            assert!(
                matches!(r, Err(ErreurCalc::ExpressionInvalide(_))),
                "entrée hostile acceptée: {s:?} -> {r:?}"
            );
        } else if let Err(e) = r {
            assert!(
                matches!(
                    e,
                    ErreurCalc::ExpressionInvalide(_)
                        | ErreurCalc::DivisionParZero
                        | ErreurCalc::ResultatInvalide
                ),
                "erreur non attendue: {s:?} -> {e}"
            );
        }
    }
}

#[test]
fn fuzz_safe_double_etoile_toujours_refusee() {
    let mut rng = Rng::new(0x5EED_u64);
    for _ in 0..100 {
        let (a, _) = gen_expr(&mut rng, 2);
        let (b, _) = gen_expr(&mut rng, 2);
        let s = if rng.coin() {
            format!("{a}**{b}")
        } else {
            format!("({a})**({b})+1")
        };
        assert!(
            matches!(eval_expression(&s), Err(ErreurCalc::ExpressionInvalide(_))),
            "** accepté: {s:?}"
        );
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let expr = somme_balancee("1/2", 800);
    budget(t0, max);

    let v = eval_expression(&expr).unwrap_or_else(|e| panic!("err: {e}"));

    // 800*(1/2) = 400
    assert_eq!(v, 400.0);
}

#[test]
fn fuzz_safe_imbrication_profonde() {
    // parenthèses de groupement : n’ajoutent pas de profondeur à l’arbre
    let parens = format!("{}7{}", "(".repeat(5000), ")".repeat(5000));
    assert_eq!(eval_expression(&parens), Ok(7.0));

    // chaîne d’unaires : bornée par le garde-fou, pas de débordement de pile
    let unaires = format!("{}7", "-".repeat(5000));
    assert!(matches!(
        eval_expression(&unaires),
        Err(ErreurCalc::ExpressionInvalide(_))
    ));
}
