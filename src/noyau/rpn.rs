// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> arbre générique (Noeud)
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis reconstruire l’arbre générique
//
// Règles:
// - Opérateur unaire : un + - ~ not qui arrive quand on ATTEND une valeur.
//   (pas d’injection de 0 : on garde un vrai noeud Unaire, le validateur en a besoin)
// - '(' après une valeur => appel ; '[' après une valeur => indexation.
// - '.' après une valeur => accès d’attribut (postfixe, lie le plus fort).
// - ** est associatif à droite et lie plus fort que le moins unaire à sa gauche
//   (-2**2 = -(2**2)), comme en arithmétique usuelle.
//
// NOTE:
// - Le parseur accepte volontairement des formes interdites : il ne décide pas
//   de ce qui est permis. Seules les erreurs de SYNTAXE sont rejetées ici.

use super::erreur::{ErreurCalc, ResultatCalc};
use super::jetons::{format_tok, Tok};
use super::syntaxe::{GenreCollection, Noeud, OpBinaire, OpUnaire};

/// Garde-fou : profondeur maximale de l’arbre (récursion bornée en aval).
pub const PROFONDEUR_MAX: usize = 256;

/// Élément de sortie RPN.
#[derive(Clone, Debug, PartialEq)]
pub enum Rpn {
    Nombre(f64),
    Nom(String),
    Texte(String),
    Binaire(OpBinaire),
    Unaire(OpUnaire),
    Appel(usize), // nombre d’arguments
    Attribut(String),
    Indice,
    Collection(GenreCollection, usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Groupe {
    Paren,
    Appel,
    Liste,
    Indice,
    Accolades,
}

#[derive(Clone, Copy, Debug)]
enum Pile {
    Bin(OpBinaire),
    Un(OpUnaire),
    Groupe { genre: Groupe, virgules: usize },
}

fn precedence_binaire(op: OpBinaire) -> i32 {
    use OpBinaire::*;
    match op {
        Affecte => 1,
        OuLogique => 2,
        EtLogique => 3,
        Egal | Different | Inf | InfEgal | Sup | SupEgal => 5,
        OuBits => 6,
        XorBits => 7,
        EtBits => 8,
        Add | Sub => 9,
        Mul | Div | DivEnt | Modulo => 10,
        Pow => 12,
    }
}

fn precedence_unaire(op: OpUnaire) -> i32 {
    match op {
        OpUnaire::NonLogique => 4,
        OpUnaire::Neg | OpUnaire::Pos | OpUnaire::Inversion => 11,
    }
}

fn is_right_associative(op: OpBinaire) -> bool {
    matches!(op, OpBinaire::Pow | OpBinaire::Affecte)
}

fn op_binaire(t: &Tok) -> Option<OpBinaire> {
    Some(match t {
        Tok::Plus => OpBinaire::Add,
        Tok::Minus => OpBinaire::Sub,
        Tok::Star => OpBinaire::Mul,
        Tok::Slash => OpBinaire::Div,
        Tok::DoubleStar => OpBinaire::Pow,
        Tok::DoubleSlash => OpBinaire::DivEnt,
        Tok::Percent => OpBinaire::Modulo,
        Tok::Egal => OpBinaire::Affecte,
        Tok::EgalEgal => OpBinaire::Egal,
        Tok::Different => OpBinaire::Different,
        Tok::Inf => OpBinaire::Inf,
        Tok::InfEgal => OpBinaire::InfEgal,
        Tok::Sup => OpBinaire::Sup,
        Tok::SupEgal => OpBinaire::SupEgal,
        Tok::Amp => OpBinaire::EtBits,
        Tok::Pipe => OpBinaire::OuBits,
        Tok::Caret => OpBinaire::XorBits,
        Tok::And => OpBinaire::EtLogique,
        Tok::Or => OpBinaire::OuLogique,
        _ => return None,
    })
}

fn op_unaire(t: &Tok) -> Option<OpUnaire> {
    Some(match t {
        Tok::Plus => OpUnaire::Pos,
        Tok::Minus => OpUnaire::Neg,
        Tok::Tilde => OpUnaire::Inversion,
        Tok::Not => OpUnaire::NonLogique,
        _ => return None,
    })
}

/// Dépile les opérateurs jusqu’au prochain groupe ouvert (exclu).
fn vider_operateurs(ops: &mut Vec<Pile>, out: &mut Vec<Rpn>) {
    while let Some(top) = ops.pop() {
        match top {
            Pile::Bin(op) => out.push(Rpn::Binaire(op)),
            Pile::Un(op) => out.push(Rpn::Unaire(op)),
            groupe @ Pile::Groupe { .. } => {
                ops.push(groupe);
                break;
            }
        }
    }
}

fn ouvrant_accepte(fermant: &Tok, genre: Groupe) -> bool {
    match fermant {
        Tok::RPar => matches!(genre, Groupe::Paren | Groupe::Appel),
        Tok::RCro => matches!(genre, Groupe::Liste | Groupe::Indice),
        Tok::RAcc => matches!(genre, Groupe::Accolades),
        _ => false,
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Num(2), Plus, Num(3), Star, Num(4)]
///   rpn:    [2, 3, 4, *, +]
pub fn to_rpn(tokens: &[Tok]) -> ResultatCalc<Vec<Rpn>> {
    let mut out: Vec<Rpn> = Vec::new();
    let mut ops: Vec<Pile> = Vec::new();

    // Sert à distinguer unaire / binaire, groupe / appel, et à repérer
    // les opérandes manquants.
    let mut attend_valeur = true;
    // Vrai juste après un ouvrant : autorise les groupes vides "()" "[]".
    let mut vient_d_ouvrir = false;

    let mut k = 0;
    while k < tokens.len() {
        let tok = &tokens[k];
        k += 1;

        let ouvrant = matches!(tok, Tok::LPar | Tok::LCro | Tok::LAcc);

        match tok {
            Tok::Num(_) | Tok::Ident(_) | Tok::Texte(_) => {
                if !attend_valeur {
                    return Err(ErreurCalc::invalide(format!(
                        "opérateur manquant avant '{}'",
                        format_tok(tok)
                    )));
                }
                out.push(match tok {
                    Tok::Num(v) => Rpn::Nombre(*v),
                    Tok::Ident(n) => Rpn::Nom(n.clone()),
                    Tok::Texte(s) => Rpn::Texte(s.clone()),
                    _ => unreachable!(),
                });
                attend_valeur = false;
            }

            Tok::Point => {
                if attend_valeur {
                    return Err(ErreurCalc::invalide("'.' inattendu"));
                }
                match tokens.get(k) {
                    Some(Tok::Ident(nom)) => {
                        out.push(Rpn::Attribut(nom.clone()));
                        k += 1;
                    }
                    _ => return Err(ErreurCalc::invalide("nom attendu après '.'")),
                }
            }

            Tok::LPar => {
                let genre = if attend_valeur {
                    Groupe::Paren
                } else {
                    Groupe::Appel
                };
                ops.push(Pile::Groupe { genre, virgules: 0 });
                attend_valeur = true;
            }

            Tok::LCro => {
                let genre = if attend_valeur {
                    Groupe::Liste
                } else {
                    Groupe::Indice
                };
                ops.push(Pile::Groupe { genre, virgules: 0 });
                attend_valeur = true;
            }

            Tok::LAcc => {
                if !attend_valeur {
                    return Err(ErreurCalc::invalide("'{' inattendu"));
                }
                ops.push(Pile::Groupe {
                    genre: Groupe::Accolades,
                    virgules: 0,
                });
                attend_valeur = true;
            }

            Tok::Virgule | Tok::DeuxPoints => {
                if attend_valeur {
                    return Err(ErreurCalc::invalide(format!(
                        "'{}' inattendu",
                        format_tok(tok)
                    )));
                }
                vider_operateurs(&mut ops, &mut out);
                match ops.last_mut() {
                    Some(Pile::Groupe { genre, virgules }) => {
                        if matches!(tok, Tok::DeuxPoints) && *genre != Groupe::Accolades {
                            return Err(ErreurCalc::invalide("':' inattendu"));
                        }
                        *virgules += 1;
                    }
                    _ => {
                        return Err(ErreurCalc::invalide(format!(
                            "'{}' hors d’un groupe",
                            format_tok(tok)
                        )))
                    }
                }
                attend_valeur = true;
            }

            Tok::RPar | Tok::RCro | Tok::RAcc => {
                if attend_valeur && !vient_d_ouvrir {
                    return Err(ErreurCalc::invalide("opérande manquant avant la fermeture"));
                }
                vider_operateurs(&mut ops, &mut out);

                let (genre, virgules) = match ops.pop() {
                    Some(Pile::Groupe { genre, virgules }) if ouvrant_accepte(tok, genre) => {
                        (genre, virgules)
                    }
                    _ => return Err(ErreurCalc::invalide("parenthèses non équilibrées")),
                };

                let n = if vient_d_ouvrir { 0 } else { virgules + 1 };

                match genre {
                    Groupe::Paren => {
                        // groupement simple : rien à émettre
                        if n != 1 || virgules > 0 {
                            out.push(Rpn::Collection(GenreCollection::Tuple, n));
                        }
                    }
                    Groupe::Appel => out.push(Rpn::Appel(n)),
                    Groupe::Liste => out.push(Rpn::Collection(GenreCollection::Liste, n)),
                    Groupe::Indice => {
                        if n != 1 {
                            return Err(ErreurCalc::invalide("indexation invalide"));
                        }
                        out.push(Rpn::Indice);
                    }
                    Groupe::Accolades => {
                        out.push(Rpn::Collection(GenreCollection::Accolades, n))
                    }
                }

                attend_valeur = false;
            }

            _ => {
                if attend_valeur {
                    // position préfixe : seulement les unaires
                    let op = op_unaire(tok).ok_or_else(|| {
                        ErreurCalc::invalide(format!("opérateur inattendu: '{}'", format_tok(tok)))
                    })?;
                    ops.push(Pile::Un(op));
                } else {
                    let op = op_binaire(tok).ok_or_else(|| {
                        ErreurCalc::invalide(format!("opérateur inattendu: '{}'", format_tok(tok)))
                    })?;

                    // dépile tant que:
                    // - on n'est pas bloqué par un groupe
                    // - et la précédence/associativité exige de sortir l'opérateur du haut
                    let p_tok = precedence_binaire(op);
                    while let Some(top) = ops.last().copied() {
                        let p_top = match top {
                            Pile::Bin(t) => precedence_binaire(t),
                            Pile::Un(u) => precedence_unaire(u),
                            Pile::Groupe { .. } => break,
                        };

                        let doit_pop = if is_right_associative(op) {
                            p_top > p_tok
                        } else {
                            p_top >= p_tok
                        };
                        if !doit_pop {
                            break;
                        }

                        ops.pop();
                        out.push(match top {
                            Pile::Bin(t) => Rpn::Binaire(t),
                            Pile::Un(u) => Rpn::Unaire(u),
                            Pile::Groupe { .. } => unreachable!(),
                        });
                    }

                    ops.push(Pile::Bin(op));
                    attend_valeur = true;
                }
            }
        }

        vient_d_ouvrir = ouvrant;
    }

    if attend_valeur {
        return Err(if tokens.is_empty() {
            ErreurCalc::invalide("entrée vide")
        } else {
            ErreurCalc::invalide("expression incomplète")
        });
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        match op {
            Pile::Bin(t) => out.push(Rpn::Binaire(t)),
            Pile::Un(u) => out.push(Rpn::Unaire(u)),
            Pile::Groupe { .. } => return Err(ErreurCalc::invalide("parenthèses non fermées")),
        }
    }

    Ok(out)
}

/// Construit l’arbre générique à partir d’une RPN.
///
/// Chaque élément de pile garde sa profondeur : au-delà de PROFONDEUR_MAX,
/// on refuse (la validation et l’évaluation sont récursives).
pub fn from_rpn(rpn: &[Rpn]) -> ResultatCalc<Noeud> {
    let mut st: Vec<(Noeud, usize)> = Vec::new();

    fn depiler(st: &mut Vec<(Noeud, usize)>) -> ResultatCalc<(Noeud, usize)> {
        st.pop().ok_or_else(|| ErreurCalc::invalide("expression invalide"))
    }

    fn depiler_n(st: &mut Vec<(Noeud, usize)>, n: usize) -> ResultatCalc<(Vec<Noeud>, usize)> {
        if st.len() < n {
            return Err(ErreurCalc::invalide("expression invalide"));
        }
        let items = st.split_off(st.len() - n);
        let prof = items.iter().map(|(_, p)| *p).max().unwrap_or(0);
        Ok((items.into_iter().map(|(e, _)| e).collect(), prof))
    }

    for item in rpn {
        let (noeud, prof) = match item {
            Rpn::Nombre(v) => (Noeud::Nombre(*v), 1),
            Rpn::Nom(n) => (Noeud::Nom(n.clone()), 1),
            Rpn::Texte(s) => (Noeud::Texte(s.clone()), 1),

            Rpn::Binaire(op) => {
                let (b, pb) = depiler(&mut st)?;
                let (a, pa) = depiler(&mut st)?;
                (
                    Noeud::Binaire(*op, Box::new(a), Box::new(b)),
                    pa.max(pb) + 1,
                )
            }

            Rpn::Unaire(op) => {
                let (x, p) = depiler(&mut st)?;
                (Noeud::Unaire(*op, Box::new(x)), p + 1)
            }

            Rpn::Appel(n) => {
                let (args, pargs) = depiler_n(&mut st, *n)?;
                let (f, pf) = depiler(&mut st)?;
                (Noeud::Appel(Box::new(f), args), pf.max(pargs) + 1)
            }

            Rpn::Attribut(nom) => {
                let (x, p) = depiler(&mut st)?;
                (Noeud::Attribut(Box::new(x), nom.clone()), p + 1)
            }

            Rpn::Indice => {
                let (i, pi) = depiler(&mut st)?;
                let (x, px) = depiler(&mut st)?;
                (Noeud::Indice(Box::new(x), Box::new(i)), px.max(pi) + 1)
            }

            Rpn::Collection(genre, n) => {
                let (items, p) = depiler_n(&mut st, *n)?;
                (Noeud::Collection(*genre, items), p + 1)
            }
        };

        if prof > PROFONDEUR_MAX {
            return Err(ErreurCalc::invalide("expression trop imbriquée"));
        }
        st.push((noeud, prof));
    }

    if st.len() != 1 {
        return Err(ErreurCalc::invalide("expression invalide"));
    }
    depiler(&mut st).map(|(e, _)| e)
}

/// Raccourci : jetons -> RPN -> arbre générique.
pub fn parse(tokens: &[Tok]) -> ResultatCalc<Noeud> {
    from_rpn(&to_rpn(tokens)?)
}

/// Format utilitaire (démarche) : RPN en texte.
pub fn format_rpn(rpn: &[Rpn]) -> String {
    rpn.iter()
        .map(|r| match r {
            Rpn::Nombre(v) => super::format::format_nombre(*v),
            Rpn::Nom(n) => n.clone(),
            Rpn::Texte(s) => format!("{s:?}"),
            Rpn::Binaire(op) => op.symbole().to_string(),
            Rpn::Unaire(op) => op.symbole().to_string(),
            Rpn::Appel(n) => format!("call/{n}"),
            Rpn::Attribut(n) => format!(".{n}"),
            Rpn::Indice => "[]".to_string(),
            Rpn::Collection(g, n) => format!("{g:?}/{n}").to_lowercase(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
