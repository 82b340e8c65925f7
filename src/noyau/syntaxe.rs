// src/noyau/syntaxe.rs
//
// Arbre syntaxique GÉNÉRIQUE (sortie du parseur, avant validation).
//
// Il peut contenir des formes interdites (noms, appels, **, comparaisons…) :
// le parseur les construit, le validateur (validation.rs) les refuse.
// Aucun code n’évalue un Noeud directement.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpBinaire {
    Add,
    Sub,
    Mul,
    Div,
    Pow,      // **
    DivEnt,   // //
    Modulo,   // %
    Affecte,  // =
    Egal,     // ==
    Different,
    Inf,
    InfEgal,
    Sup,
    SupEgal,
    EtBits,   // &
    OuBits,   // |
    XorBits,  // ^
    EtLogique,
    OuLogique,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpUnaire {
    Neg,
    Pos,
    Inversion, // ~
    NonLogique,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenreCollection {
    Tuple,
    Liste,
    Accolades, // dict / set
}

#[derive(Clone, Debug, PartialEq)]
pub enum Noeud {
    Nombre(f64),
    Nom(String),
    Texte(String),

    Binaire(OpBinaire, Box<Noeud>, Box<Noeud>),
    Unaire(OpUnaire, Box<Noeud>),

    Appel(Box<Noeud>, Vec<Noeud>),
    Attribut(Box<Noeud>, String),
    Indice(Box<Noeud>, Box<Noeud>),
    Collection(GenreCollection, Vec<Noeud>),
}

impl OpBinaire {
    pub fn symbole(self) -> &'static str {
        match self {
            OpBinaire::Add => "+",
            OpBinaire::Sub => "-",
            OpBinaire::Mul => "*",
            OpBinaire::Div => "/",
            OpBinaire::Pow => "**",
            OpBinaire::DivEnt => "//",
            OpBinaire::Modulo => "%",
            OpBinaire::Affecte => "=",
            OpBinaire::Egal => "==",
            OpBinaire::Different => "!=",
            OpBinaire::Inf => "<",
            OpBinaire::InfEgal => "<=",
            OpBinaire::Sup => ">",
            OpBinaire::SupEgal => ">=",
            OpBinaire::EtBits => "&",
            OpBinaire::OuBits => "|",
            OpBinaire::XorBits => "^",
            OpBinaire::EtLogique => "and",
            OpBinaire::OuLogique => "or",
        }
    }
}

impl OpUnaire {
    pub fn symbole(self) -> &'static str {
        match self {
            OpUnaire::Neg => "neg",
            OpUnaire::Pos => "pos",
            OpUnaire::Inversion => "~",
            OpUnaire::NonLogique => "not",
        }
    }
}

impl Noeud {
    /// Nom du genre de noeud (messages de refus du validateur).
    pub fn genre(&self) -> &'static str {
        match self {
            Noeud::Nombre(_) => "nombre",
            Noeud::Nom(_) => "nom",
            Noeud::Texte(_) => "chaîne",
            Noeud::Binaire(..) => "opération binaire",
            Noeud::Unaire(..) => "opération unaire",
            Noeud::Appel(..) => "appel de fonction",
            Noeud::Attribut(..) => "accès d’attribut",
            Noeud::Indice(..) => "indexation",
            Noeud::Collection(GenreCollection::Tuple, _) => "tuple",
            Noeud::Collection(GenreCollection::Liste, _) => "liste",
            Noeud::Collection(GenreCollection::Accolades, _) => "dictionnaire/ensemble",
        }
    }
}
