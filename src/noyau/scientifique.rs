// src/noyau/scientifique.rs
//
// Répartiteur scientifique : liste blanche PLATE nom -> opération.
// -------------------------------------------------------------
// - Un nom hors liste => FonctionInconnue (aucune résolution dynamique)
// - Entrées : finies (sinon ValeurInvalide), |x| <= 1e100 (sinon HorsLimites)
// - Domaine vérifié AVANT le calcul, finitude vérifiée APRÈS
// - Angles en radians ; la conversion degrés est faite par l’appelant (ModeAngle)

use std::str::FromStr;

use serde::Deserialize;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use tracing::debug;

use super::erreur::{ErreurCalc, ResultatCalc};

/// Garde-fou : magnitude maximale d’une entrée.
pub const VALEUR_MAX: f64 = 1e100;

/// Garde-fou : magnitude maximale d’un exposant (power).
pub const EXPOSANT_MAX: f64 = 1000.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Log,
    Ln,
    Exp,
    Sqrt,
    Square,
    Reciprocal,
    Power,
}

impl Fonction {
    /// power est la seule fonction à deux arguments.
    pub fn est_binaire(self) -> bool {
        matches!(self, Fonction::Power)
    }

    /// Fonctions trigonométriques directes (entrée = angle).
    pub fn prend_un_angle(self) -> bool {
        matches!(self, Fonction::Sin | Fonction::Cos | Fonction::Tan)
    }

    /// Fonctions trigonométriques inverses (sortie = angle).
    pub fn rend_un_angle(self) -> bool {
        matches!(self, Fonction::Asin | Fonction::Acos | Fonction::Atan)
    }
}

/// Argument d’un appel : valeur simple, ou {base, exponent} pour power.
/// (forme JSON : `5` ou `{"base": 2, "exponent": 3}`)
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Argument {
    Valeur(f64),
    Puissance { base: f64, exponent: f64 },
}

/// Mode d’angle de l’interface (DEG/RAD).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModeAngle {
    Degres,
    #[default]
    Radians,
}

impl ModeAngle {
    pub fn vers_radians(self, x: f64) -> f64 {
        match self {
            ModeAngle::Degres => x.to_radians(),
            ModeAngle::Radians => x,
        }
    }

    pub fn depuis_radians(self, x: f64) -> f64 {
        match self {
            ModeAngle::Degres => x.to_degrees(),
            ModeAngle::Radians => x,
        }
    }

    pub fn bascule(self) -> ModeAngle {
        match self {
            ModeAngle::Degres => ModeAngle::Radians,
            ModeAngle::Radians => ModeAngle::Degres,
        }
    }

    pub fn libelle(self) -> &'static str {
        match self {
            ModeAngle::Degres => "DEG",
            ModeAngle::Radians => "RAD",
        }
    }
}

fn verifier_entree(x: f64) -> ResultatCalc<f64> {
    if !x.is_finite() {
        return Err(ErreurCalc::ValeurInvalide("entrée non finie".into()));
    }
    if x.abs() > VALEUR_MAX {
        return Err(ErreurCalc::HorsLimites);
    }
    Ok(x)
}

fn domaine(msg: &str) -> ErreurCalc {
    ErreurCalc::ErreurDomaine(msg.into())
}

/// API publique : applique la fonction `nom` à `arg`.
pub fn dispatch(nom: &str, arg: Argument) -> ResultatCalc<f64> {
    let f = Fonction::from_str(nom).map_err(|_| ErreurCalc::FonctionInconnue {
        nom: nom.to_string(),
    })?;
    appliquer(f, arg)
}

/// Comme dispatch, avec une fonction déjà résolue.
pub fn appliquer(f: Fonction, arg: Argument) -> ResultatCalc<f64> {
    let r = match (f, arg) {
        (Fonction::Power, Argument::Puissance { base, exponent }) => puissance(base, exponent)?,
        (Fonction::Power, Argument::Valeur(_)) => {
            return Err(ErreurCalc::ValeurInvalide(
                "power attend {base, exponent}".into(),
            ))
        }
        (_, Argument::Puissance { .. }) => {
            return Err(ErreurCalc::ValeurInvalide(format!("{f} attend une valeur")))
        }
        (_, Argument::Valeur(x)) => unaire(f, verifier_entree(x)?)?,
    };

    // Re-vérification : un résultat non fini n’est jamais rendu.
    if !r.is_finite() {
        debug!(fonction = %f, "résultat non fini refusé");
        return Err(ErreurCalc::ResultatInvalide);
    }
    Ok(r)
}

fn unaire(f: Fonction, x: f64) -> ResultatCalc<f64> {
    Ok(match f {
        Fonction::Sin => x.sin(),
        Fonction::Cos => x.cos(),
        Fonction::Tan => x.tan(),

        Fonction::Asin | Fonction::Acos => {
            if !(-1.0..=1.0).contains(&x) {
                return Err(domaine("l’entrée doit être dans [-1, 1]"));
            }
            if f == Fonction::Asin {
                x.asin()
            } else {
                x.acos()
            }
        }
        Fonction::Atan => x.atan(),

        Fonction::Log | Fonction::Ln => {
            if x <= 0.0 {
                return Err(domaine("le logarithme exige une entrée > 0"));
            }
            if f == Fonction::Log {
                x.log10()
            } else {
                x.ln()
            }
        }
        Fonction::Exp => x.exp(),

        Fonction::Sqrt => {
            if x < 0.0 {
                return Err(domaine("racine carrée d’un nombre négatif"));
            }
            x.sqrt()
        }
        Fonction::Square => x * x,
        Fonction::Reciprocal => {
            if x == 0.0 {
                return Err(ErreurCalc::DivisionParZero);
            }
            1.0 / x
        }

        // géré par appliquer()
        Fonction::Power => {
            return Err(ErreurCalc::ValeurInvalide(
                "power attend {base, exponent}".into(),
            ))
        }
    })
}

fn puissance(base: f64, exposant: f64) -> ResultatCalc<f64> {
    let base = verifier_entree(base)?;
    let exposant = verifier_entree(exposant)?;

    if exposant.abs() > EXPOSANT_MAX {
        return Err(ErreurCalc::HorsLimites);
    }
    if base == 0.0 && exposant == 0.0 {
        return Err(ErreurCalc::Indefini("0^0".into()));
    }
    if base == 0.0 && exposant < 0.0 {
        return Err(ErreurCalc::DivisionParZero);
    }
    if base < 0.0 && exposant.fract() != 0.0 {
        return Err(domaine(
            "base négative avec exposant fractionnaire (résultat complexe)",
        ));
    }

    Ok(base.powf(exposant))
}
