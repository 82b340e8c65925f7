//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, affichage, erreur, mémoire,
//! historique de la session, thème, démarche) et les actions des touches.
//!
//! Contrats :
//! - Toute évaluation passe par le noyau (frontière requête ou répartiteur).
//! - Un échec laisse l’historique intact et conserve le dernier affichage.
//! - L’historique appartient à la session (une fenêtre / un chargement de page).

use tracing::{debug, info};

use calculatrice_web::config::{Config, Theme};
use calculatrice_web::noyau::format::format_nombre;
use calculatrice_web::noyau::requete::EXPRESSION_MAX;
use calculatrice_web::noyau::scientifique::appliquer;
use calculatrice_web::noyau::{
    calculer_detaille, eval_expression, verifier_expression, Argument, DemarcheNoyau, ErreurCalc,
    Fonction, Historique, ModeAngle, ResultatCalc,
};

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub affichage: String, // dernier résultat formaté
    /// Valeur du dernier résultat (reprise quand l’entrée est vide).
    pub dernier: f64,
    pub erreur: String,

    // --- démarche (panneau d’explication) ---
    pub demarche: DemarcheNoyau,

    // --- session ---
    pub historique: Historique,
    pub memoire: f64,
    /// Base en attente après xʸ (l’exposant est l’entrée suivante).
    pub base_puissance: Option<f64>,

    // --- paramètres ---
    pub theme: Theme,
    pub mode_scientifique: bool,
    pub mode_angle: ModeAngle,

    // --- UX ---
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl AppCalc {
    pub fn new(config: &Config) -> Self {
        Self {
            entree: String::new(),
            affichage: "0".to_string(),
            dernier: 0.0,
            erreur: String::new(),
            demarche: DemarcheNoyau::default(),
            historique: Historique::new(config.historique_max),
            memoire: 0.0,
            base_puissance: None,
            theme: config.theme,
            mode_scientifique: false,
            mode_angle: ModeAngle::default(),
            focus_entree: true,
        }
    }

    /* ------------------------ Effacements ------------------------ */

    /// C : effacer seulement l’entrée.
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.erreur.clear();
        self.focus_entree = true;
    }

    /// AC : tout remettre à zéro sauf l’historique, la mémoire et les réglages.
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.affichage = "0".to_string();
        self.dernier = 0.0;
        self.erreur.clear();
        self.demarche = DemarcheNoyau::default();
        self.base_puissance = None;
        self.focus_entree = true;
    }

    /// DEL : retire le dernier caractère (et les espaces qui le précèdent).
    pub fn backspace_entree(&mut self) {
        self.entree.pop();
        while self.entree.ends_with(' ') {
            self.entree.pop();
        }
        self.focus_entree = true;
    }

    pub fn inserer(&mut self, texte: &str) {
        self.erreur.clear();
        self.entree.push_str(texte);
        self.focus_entree = true;
    }

    pub fn effacer_historique(&mut self) {
        self.historique.clear();
    }

    fn set_erreur(&mut self, e: &ErreurCalc) {
        debug!(genre = e.genre(), "calcul refusé");
        self.erreur = e.to_string();
        self.focus_entree = true;
    }

    /// Dépose un résultat : affiché, et repris comme entrée pour enchaîner
    /// s’il tient dans la longueur admise par “=”.
    fn set_resultat(&mut self, v: f64) {
        self.dernier = v;
        self.affichage = format_nombre(v);
        if self.affichage.chars().count() <= EXPRESSION_MAX {
            self.entree = self.affichage.clone();
        } else {
            self.entree.clear();
        }
        self.erreur.clear();
        self.focus_entree = true;
    }

    /* ------------------------ Calculs ------------------------ */

    /// = : calcule l’entrée (ou termine un xʸ en attente).
    pub fn evaluer(&mut self) {
        if let Some(base) = self.base_puissance {
            return self.terminer_puissance(base);
        }

        match calculer_detaille(&self.entree, &mut self.historique) {
            Ok((calcul, demarche)) => {
                self.demarche = demarche;
                self.set_resultat(calcul.resultat);
            }
            Err(e) => {
                self.demarche = DemarcheNoyau::default();
                self.set_erreur(&e);
            }
        }
    }

    /// Valeur de l’entrée courante (même filtre que “=”), sinon dernier résultat.
    /// Pendant un xʸ, une entrée vide est refusée : l’exposant manque.
    fn valeur_courante(&self) -> ResultatCalc<f64> {
        if self.entree.trim().is_empty() {
            if self.base_puissance.is_some() {
                return Err(ErreurCalc::ValeurInvalide("exposant attendu".into()));
            }
            return Ok(self.dernier);
        }
        eval_expression(verifier_expression(&self.entree)?)
    }

    /// Touche de fonction scientifique (hors xʸ), avec conversion DEG/RAD.
    pub fn scientifique(&mut self, f: Fonction) {
        if f.est_binaire() {
            return self.commencer_puissance();
        }

        let resultat = self.valeur_courante().and_then(|x| {
            let x = if f.prend_un_angle() {
                self.mode_angle.vers_radians(x)
            } else {
                x
            };
            let r = appliquer(f, Argument::Valeur(x))?;
            Ok(if f.rend_un_angle() {
                self.mode_angle.depuis_radians(r)
            } else {
                r
            })
        });

        match resultat {
            Ok(v) => {
                debug!(fonction = %f, angle = self.mode_angle.libelle(), "fonction appliquée");
                self.set_resultat(v);
            }
            Err(e) => self.set_erreur(&e),
        }
    }

    /// xʸ : la valeur courante devient la base, l’entrée attend l’exposant.
    fn commencer_puissance(&mut self) {
        match self.valeur_courante() {
            Ok(base) => {
                self.base_puissance = Some(base);
                self.affichage = format!("{}^", format_nombre(base));
                self.entree.clear();
                self.erreur.clear();
                self.focus_entree = true;
            }
            Err(e) => self.set_erreur(&e),
        }
    }

    fn terminer_puissance(&mut self, base: f64) {
        // exposant manquant : la base reste en attente
        if self.entree.trim().is_empty() {
            return self.set_erreur(&ErreurCalc::ValeurInvalide("exposant attendu".into()));
        }
        let resultat = self.valeur_courante().and_then(|exponent| {
            appliquer(Fonction::Power, Argument::Puissance { base, exponent })
        });
        self.base_puissance = None;
        match resultat {
            Ok(v) => self.set_resultat(v),
            Err(e) => self.set_erreur(&e),
        }
    }

    /* ------------------------ Constantes + mémoire ------------------------ */

    pub fn inserer_constante(&mut self, v: f64) {
        let texte = format_nombre(v);
        self.inserer(&texte);
    }

    /// MC
    pub fn memoire_effacer(&mut self) {
        self.memoire = 0.0;
    }

    /// MR
    pub fn memoire_rappel(&mut self) {
        let texte = format_nombre(self.memoire);
        self.inserer(&texte);
    }

    /// M+ (signe = 1.0) ou M− (signe = -1.0)
    pub fn memoire_ajouter(&mut self, signe: f64) {
        match self.valeur_courante() {
            Ok(v) if (self.memoire + signe * v).is_finite() => self.memoire += signe * v,
            Ok(_) => self.set_erreur(&ErreurCalc::ResultatInvalide),
            Err(e) => self.set_erreur(&e),
        }
    }

    /* ------------------------ Réglages ------------------------ */

    pub fn basculer_angle(&mut self) {
        self.mode_angle = self.mode_angle.bascule();
    }

    pub fn basculer_scientifique(&mut self) {
        self.mode_scientifique = !self.mode_scientifique;
    }

    pub fn choisir_theme(&mut self, theme: Theme) {
        if theme != self.theme {
            info!(theme = %theme, "thème changé");
            self.theme = theme;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn app_avec(entree: &str) -> AppCalc {
        let mut app = AppCalc::default();
        app.inserer(entree);
        app
    }

    #[test]
    fn egal_calcule_et_enchaine() {
        let mut app = app_avec("5+3");
        app.evaluer();
        assert_eq!(app.affichage, "8");
        assert_eq!(app.entree, "8");
        assert!(app.erreur.is_empty());
        assert_eq!(app.demarche.rpn, "5 3 +");

        app.inserer("*2");
        app.evaluer();
        assert_eq!(app.affichage, "16");

        let exprs: Vec<&str> = app.historique.list().map(|c| c.expression.as_str()).collect();
        assert_eq!(exprs, ["5+3", "8*2"]);
    }

    #[test]
    fn erreur_conserve_affichage_et_historique() {
        let mut app = app_avec("2+2");
        app.evaluer();
        app.clear_entree();
        app.inserer("10/0");
        app.evaluer();
        assert_eq!(app.erreur, "Division par zéro");
        assert_eq!(app.affichage, "4");
        assert_eq!(app.historique.len(), 1);

        app.clear_entree();
        app.inserer("import os");
        app.evaluer();
        assert_eq!(app.erreur, ErreurCalc::CaracteresInvalides.to_string());
        assert_eq!(app.historique.len(), 1);
    }

    #[test]
    fn effacements() {
        let mut app = app_avec("12+3");
        app.backspace_entree();
        assert_eq!(app.entree, "12+");
        app.clear_entree();
        assert!(app.entree.is_empty());

        app.inserer("7*6");
        app.evaluer();
        app.reset_total();
        assert_eq!(app.affichage, "0");
        assert!(app.entree.is_empty());
        // AC ne touche pas l’historique
        assert_eq!(app.historique.len(), 1);
        app.effacer_historique();
        assert!(app.historique.is_empty());
    }

    #[test]
    fn fonctions_et_mode_angle() {
        let mut app = app_avec("16");
        app.scientifique(Fonction::Sqrt);
        assert_eq!(app.affichage, "4");

        let mut app = app_avec("90");
        app.basculer_angle();
        assert_eq!(app.mode_angle, ModeAngle::Degres);
        app.scientifique(Fonction::Sin);
        assert_eq!(app.affichage, "1");

        let mut app = app_avec("1");
        app.basculer_angle();
        app.scientifique(Fonction::Asin);
        assert_eq!(app.affichage, "90");

        let mut app = app_avec("-4");
        app.scientifique(Fonction::Sqrt);
        assert!(app.erreur.starts_with("Erreur de domaine"));
    }

    #[test]
    fn fonctions_hors_historique() {
        let mut app = app_avec("9");
        app.scientifique(Fonction::Square);
        assert_eq!(app.affichage, "81");
        assert!(app.historique.is_empty());
    }

    #[test]
    fn puissance_en_deux_temps() {
        let mut app = app_avec("-2");
        app.scientifique(Fonction::Power);
        assert_eq!(app.base_puissance, Some(-2.0));
        assert_eq!(app.affichage, "-2^");
        app.inserer("3");
        app.evaluer();
        assert_eq!(app.affichage, "-8");
        assert_eq!(app.base_puissance, None);

        let mut app = app_avec("0");
        app.scientifique(Fonction::Power);
        app.inserer("0");
        app.evaluer();
        assert!(app.erreur.starts_with("Indéfini"));
    }

    #[test]
    fn puissance_sans_exposant_garde_la_base() {
        let mut app = app_avec("2");
        app.scientifique(Fonction::Power);

        app.evaluer();
        assert_eq!(app.erreur, "Valeur invalide : exposant attendu");
        assert_eq!(app.base_puissance, Some(2.0));
        assert_eq!(app.affichage, "2^");

        app.scientifique(Fonction::Sqrt);
        assert_eq!(app.erreur, "Valeur invalide : exposant attendu");
        app.memoire_ajouter(1.0);
        assert_eq!(app.memoire, 0.0);
        assert_eq!(app.base_puissance, Some(2.0));

        // l’exposant arrive : le calcul se termine normalement
        app.inserer("10");
        app.evaluer();
        assert_eq!(app.affichage, "1024");
        assert_eq!(app.base_puissance, None);
    }

    #[test]
    fn resultat_trop_long_pour_l_entree() {
        let mut app = app_avec("2");
        app.scientifique(Fonction::Power);
        app.inserer("1000");
        app.evaluer();
        assert!(app.affichage.chars().count() > EXPRESSION_MAX);
        assert!(app.entree.is_empty());
        assert_eq!(app.dernier, 2f64.powi(1000));

        // les touches de fonction reprennent la valeur, pas le texte affiché
        app.scientifique(Fonction::Sqrt);
        assert!(app.erreur.is_empty(), "{}", app.erreur);
        assert_eq!(app.dernier, 2f64.powi(500));
        assert_eq!(app.entree, app.affichage);
    }

    #[test]
    fn memoire() {
        let mut app = app_avec("5");
        app.memoire_ajouter(1.0);
        app.memoire_ajouter(1.0);
        app.clear_entree();
        app.inserer("3");
        app.memoire_ajouter(-1.0);
        assert_eq!(app.memoire, 7.0);

        app.clear_entree();
        app.memoire_rappel();
        assert_eq!(app.entree, "7");
        app.memoire_effacer();
        assert_eq!(app.memoire, 0.0);
    }

    #[test]
    fn constantes() {
        let mut app = AppCalc::default();
        app.inserer_constante(std::f64::consts::PI);
        app.inserer("*2");
        app.evaluer();
        assert_eq!(app.affichage, format_nombre(std::f64::consts::TAU));
    }

    #[test]
    fn configuration_appliquee() {
        let config = Config {
            historique_max: 2,
            theme: Theme::Blue,
            ..Config::default()
        };
        let mut app = AppCalc::new(&config);
        assert_eq!(app.theme, Theme::Blue);
        for s in ["1+1", "2+2", "3+3"] {
            app.clear_entree();
            app.inserer(s);
            app.evaluer();
        }
        assert_eq!(app.historique.len(), 2);

        app.choisir_theme(Theme::Dark);
        assert_eq!(app.theme, Theme::Dark);
    }
}
