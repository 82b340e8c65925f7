// src/noyau/jetons.rs
//
// Tokenisation LARGE : on reconnaît plus de formes que la liste blanche
// (noms, chaînes, **, comparaisons, crochets…). C’est voulu : la décision
// “permis / interdit” appartient au validateur, pas au lexer.

use super::erreur::{ErreurCalc, ResultatCalc};

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),
    Ident(String),
    Texte(String),

    Plus,
    Minus,
    Star,
    Slash,
    DoubleStar,  // **
    DoubleSlash, // //
    Percent,

    Egal,      // =
    EgalEgal,  // ==
    Different, // !=
    Inf,
    InfEgal,
    Sup,
    SupEgal,

    Amp,   // &
    Pipe,  // |
    Caret, // ^
    Tilde, // ~

    // mots-clés logiques
    And,
    Or,
    Not,

    Point,
    Virgule,
    DeuxPoints,

    LPar,
    RPar,
    LCro,
    RCro,
    LAcc,
    RAcc,
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux (12, 1.5, .5, 5.)
/// - opérateurs + - * / ** // % et comparaisons
/// - opérateurs binaires & | ^ ~ et mots-clés and/or/not
/// - parenthèses, crochets, accolades, virgule, deux-points, point
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]*
/// - chaînes '...' ou "..." (sans échappement)
pub fn tokenize(s: &str) -> ResultatCalc<Vec<Tok>> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    // caractère suivant (lookahead d’un cran)
    let suivant = |i: usize| chars.get(i + 1).copied();

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Nombre : chiffre, ou '.' suivi d’un chiffre
        if c.is_ascii_digit() || (c == '.' && suivant(i).is_some_and(|d| d.is_ascii_digit())) {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            if i < chars.len() && chars[i] == '.' {
                i += 1;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
            }
            let txt: String = chars[start..i].iter().collect();
            let v: f64 = txt
                .parse()
                .map_err(|_| ErreurCalc::invalide(format!("nombre invalide: {txt}")))?;
            out.push(Tok::Num(v));
            continue;
        }

        // Identifiants ASCII (+ mots-clés logiques)
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            out.push(match word.as_str() {
                "and" => Tok::And,
                "or" => Tok::Or,
                "not" => Tok::Not,
                _ => Tok::Ident(word),
            });
            continue;
        }

        // Chaînes
        if c == '"' || c == '\'' {
            let start = i + 1;
            let mut j = start;
            while j < chars.len() && chars[j] != c {
                j += 1;
            }
            if j >= chars.len() {
                return Err(ErreurCalc::invalide("chaîne non terminée"));
            }
            out.push(Tok::Texte(chars[start..j].iter().collect()));
            i = j + 1;
            continue;
        }

        // Opérateurs à deux caractères d’abord
        let double = match (c, suivant(i)) {
            ('*', Some('*')) => Some(Tok::DoubleStar),
            ('/', Some('/')) => Some(Tok::DoubleSlash),
            ('=', Some('=')) => Some(Tok::EgalEgal),
            ('!', Some('=')) => Some(Tok::Different),
            ('<', Some('=')) => Some(Tok::InfEgal),
            ('>', Some('=')) => Some(Tok::SupEgal),
            _ => None,
        };
        if let Some(t) = double {
            out.push(t);
            i += 2;
            continue;
        }

        let simple = match c {
            '+' => Tok::Plus,
            '-' => Tok::Minus,
            '*' => Tok::Star,
            '/' => Tok::Slash,
            '%' => Tok::Percent,
            '=' => Tok::Egal,
            '<' => Tok::Inf,
            '>' => Tok::Sup,
            '&' => Tok::Amp,
            '|' => Tok::Pipe,
            '^' => Tok::Caret,
            '~' => Tok::Tilde,
            '.' => Tok::Point,
            ',' => Tok::Virgule,
            ':' => Tok::DeuxPoints,
            '(' => Tok::LPar,
            ')' => Tok::RPar,
            '[' => Tok::LCro,
            ']' => Tok::RCro,
            '{' => Tok::LAcc,
            '}' => Tok::RAcc,
            _ => return Err(ErreurCalc::invalide(format!("caractère inattendu: '{c}'"))),
        };
        out.push(simple);
        i += 1;
    }

    Ok(out)
}

/// Texte d’un jeton (démarche / messages).
pub fn format_tok(t: &Tok) -> String {
    match t {
        Tok::Num(v) => super::format::format_nombre(*v),
        Tok::Ident(name) => name.clone(),
        Tok::Texte(s) => format!("{s:?}"),

        Tok::Plus => "+".into(),
        Tok::Minus => "-".into(),
        Tok::Star => "*".into(),
        Tok::Slash => "/".into(),
        Tok::DoubleStar => "**".into(),
        Tok::DoubleSlash => "//".into(),
        Tok::Percent => "%".into(),

        Tok::Egal => "=".into(),
        Tok::EgalEgal => "==".into(),
        Tok::Different => "!=".into(),
        Tok::Inf => "<".into(),
        Tok::InfEgal => "<=".into(),
        Tok::Sup => ">".into(),
        Tok::SupEgal => ">=".into(),

        Tok::Amp => "&".into(),
        Tok::Pipe => "|".into(),
        Tok::Caret => "^".into(),
        Tok::Tilde => "~".into(),

        Tok::And => "and".into(),
        Tok::Or => "or".into(),
        Tok::Not => "not".into(),

        Tok::Point => ".".into(),
        Tok::Virgule => ",".into(),
        Tok::DeuxPoints => ":".into(),

        Tok::LPar => "(".into(),
        Tok::RPar => ")".into(),
        Tok::LCro => "[".into(),
        Tok::RCro => "]".into(),
        Tok::LAcc => "{".into(),
        Tok::RAcc => "}".into(),
    }
}

/// Format utilitaire (debug/“démarche”) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    tokens.iter().map(format_tok).collect::<Vec<_>>().join(" ")
}
