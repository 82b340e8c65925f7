//! Erreurs du noyau.
//!
//! Toutes les erreurs sont des erreurs de validation “montrables” :
//! le message est court, destiné à l’utilisateur, sans détail interne.
//! Elles sont déterministes (fonction de l’entrée) : on ne réessaie jamais.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErreurCalc {
    /// Syntaxe invalide ou construction hors liste blanche.
    #[error("Expression invalide : {0}")]
    ExpressionInvalide(String),

    #[error("Division par zéro")]
    DivisionParZero,

    #[error("Fonction inconnue : {nom}")]
    FonctionInconnue { nom: String },

    /// Entrée non finie (NaN, ±∞) ou de forme inattendue.
    #[error("Valeur invalide : {0}")]
    ValeurInvalide(String),

    #[error("Valeur hors limites")]
    HorsLimites,

    #[error("Erreur de domaine : {0}")]
    ErreurDomaine(String),

    /// Mathématiquement indéfini (ex: 0^0).
    #[error("Indéfini : {0}")]
    Indefini(String),

    /// Le calcul a produit une valeur non finie.
    #[error("Résultat invalide (non fini)")]
    ResultatInvalide,

    #[error("Expression trop longue (max {max} caractères)")]
    ExpressionTropLongue { max: usize },

    #[error("Caractères invalides dans l’expression")]
    CaracteresInvalides,
}

impl ErreurCalc {
    pub(crate) fn invalide(raison: impl Into<String>) -> Self {
        ErreurCalc::ExpressionInvalide(raison.into())
    }

    /// Nom court et stable du type d’erreur (journalisation structurée).
    pub fn genre(&self) -> &'static str {
        match self {
            ErreurCalc::ExpressionInvalide(_) => "expression_invalide",
            ErreurCalc::DivisionParZero => "division_par_zero",
            ErreurCalc::FonctionInconnue { .. } => "fonction_inconnue",
            ErreurCalc::ValeurInvalide(_) => "valeur_invalide",
            ErreurCalc::HorsLimites => "hors_limites",
            ErreurCalc::ErreurDomaine(_) => "erreur_domaine",
            ErreurCalc::Indefini(_) => "indefini",
            ErreurCalc::ResultatInvalide => "resultat_invalide",
            ErreurCalc::ExpressionTropLongue { .. } => "expression_trop_longue",
            ErreurCalc::CaracteresInvalides => "caracteres_invalides",
        }
    }
}

pub type ResultatCalc<T> = Result<T, ErreurCalc>;
