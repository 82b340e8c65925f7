// src/app/vue.rs
//
// Vue (UI egui) : natif + web
// ---------------------------
// - Même AppCalc (etat.rs) pour natif + wasm
// - Clavier : Enter évalue (quand le champ a le focus)
// - Tactile : gros boutons, focus redonné après clic (focus_entree)
// - Panneau scientifique repliable, historique de session, démarche
//
// Note : PAS de Key::NumEnter (n’existe pas dans egui 0.33.x)

use eframe::egui::{self, Color32, RichText};
use strum::IntoEnumIterator;

use calculatrice_web::config::Theme;
use calculatrice_web::noyau::format::format_nombre;
use calculatrice_web::noyau::Fonction;

use super::etat::AppCalc;
use super::theme::{palette, Palette};

const TOUCHE: [f32; 2] = [64.0, 44.0];
const TOUCHE_SCI: [f32; 2] = [64.0, 32.0];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        let p = palette(self.theme);
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                self.ui_entete(ui);
                ui.add_space(6.0);

                self.ui_ecran(ui, &p);
                ui.add_space(8.0);

                if self.mode_scientifique {
                    self.ui_scientifique(ui, &p);
                    ui.add_space(6.0);
                }

                self.ui_pave(ui, &p);

                ui.add_space(8.0);
                ui.separator();
                self.ui_historique(ui);

                ui.separator();
                self.ui_demarche(ui);
            });
    }

    fn ui_entete(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Calculatrice");
            ui.add_space(12.0);

            let mut choix = self.theme;
            egui::ComboBox::from_id_salt("choix_theme")
                .selected_text(choix.libelle())
                .show_ui(ui, |ui| {
                    for t in Theme::iter() {
                        ui.selectable_value(&mut choix, t, t.libelle());
                    }
                });
            self.choisir_theme(choix);

            let libelle = if self.mode_scientifique {
                "Mode standard"
            } else {
                "Mode scientifique"
            };
            if ui.button(libelle).clicked() {
                self.basculer_scientifique();
            }
        });
    }

    fn ui_ecran(&mut self, ui: &mut egui::Ui, p: &Palette) {
        egui::Frame::group(ui.style()).fill(p.ecran).show(ui, |ui| {
            ui.set_min_width(ui.available_width());

            ui.horizontal(|ui| {
                if self.mode_scientifique {
                    ui.small(self.mode_angle.libelle());
                }
                if self.memoire != 0.0 {
                    ui.small("M");
                }
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                ui.label(RichText::new(&self.affichage).size(32.0).monospace());
            });

            let resp = ui.add(
                egui::TextEdit::singleline(&mut self.entree)
                    .desired_width(ui.available_width())
                    .hint_text("Ex: (2+3)*4")
                    .id_salt("entree_edit")
                    .code_editor(),
            );

            if self.focus_entree {
                resp.request_focus();
                self.focus_entree = false;
            }

            let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
            if resp.has_focus() && enter {
                self.evaluer();
            }
        });

        if !self.erreur.is_empty() {
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui, p: &Palette) {
        egui::Grid::new("pave_numerique")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                if touche(ui, "AC", p.touche_fonction, p) {
                    self.reset_total();
                }
                if touche(ui, "C", p.touche_fonction, p) {
                    self.clear_entree();
                }
                if touche(ui, "DEL", p.touche_fonction, p) {
                    self.backspace_entree();
                }
                self.touche_insert(ui, "÷", "/", p.touche_operateur, p);
                ui.end_row();

                for rangee in [["7", "8", "9"], ["4", "5", "6"], ["1", "2", "3"]] {
                    for c in rangee {
                        self.touche_insert(ui, c, c, p.touche_nombre, p);
                    }
                    let (label, op) = match rangee[0] {
                        "7" => ("×", "*"),
                        "4" => ("−", "-"),
                        _ => ("+", "+"),
                    };
                    self.touche_insert(ui, label, op, p.touche_operateur, p);
                    ui.end_row();
                }

                self.touche_insert(ui, "(", "(", p.touche_fonction, p);
                self.touche_insert(ui, "0", "0", p.touche_nombre, p);
                self.touche_insert(ui, ".", ".", p.touche_nombre, p);
                self.touche_insert(ui, ")", ")", p.touche_fonction, p);
                ui.end_row();
            });

        ui.add_space(6.0);
        let largeur = 4.0 * TOUCHE[0] + 3.0 * 6.0;
        let egal = ui.add_sized(
            [largeur, TOUCHE[1]],
            egui::Button::new(RichText::new("=").size(22.0).color(p.texte_touche))
                .fill(p.touche_operateur),
        );
        if egal.clicked() {
            self.evaluer();
        }
    }

    fn ui_scientifique(&mut self, ui: &mut egui::Ui, p: &Palette) {
        egui::Grid::new("pave_scientifique")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                let mut n = 0;
                for f in Fonction::iter() {
                    if touche_sci(ui, libelle_fonction(f), p) {
                        self.scientifique(f);
                    }
                    n += 1;
                    if n % 4 == 0 {
                        ui.end_row();
                    }
                }

                if touche_sci(ui, "π", p) {
                    self.inserer_constante(std::f64::consts::PI);
                }
                if touche_sci(ui, "e", p) {
                    self.inserer_constante(std::f64::consts::E);
                }
                if touche_sci(ui, self.mode_angle.libelle(), p) {
                    self.basculer_angle();
                }
                ui.end_row();

                if touche_sci(ui, "MC", p) {
                    self.memoire_effacer();
                }
                if touche_sci(ui, "MR", p) {
                    self.memoire_rappel();
                }
                if touche_sci(ui, "M+", p) {
                    self.memoire_ajouter(1.0);
                }
                if touche_sci(ui, "M−", p) {
                    self.memoire_ajouter(-1.0);
                }
                ui.end_row();
            });
    }

    fn ui_historique(&mut self, ui: &mut egui::Ui) {
        let mut effacer = false;

        egui::CollapsingHeader::new(format!("Historique ({})", self.historique.len()))
            .default_open(true)
            .show(ui, |ui| {
                if self.historique.is_empty() {
                    ui.weak("Aucun calcul");
                }
                for c in self.historique.list() {
                    ui.monospace(format!("{} = {}", c.expression, format_nombre(c.resultat)));
                }
                if ui.button("Effacer l’historique").clicked() {
                    effacer = true;
                }
            });

        if effacer {
            self.effacer_historique();
        }
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(false)
            .show(ui, |ui| {
                champ_demarche(ui, "Jetons", "demarche_jetons", &self.demarche.jetons);
                champ_demarche(ui, "RPN", "demarche_rpn", &self.demarche.rpn);
                champ_demarche(ui, "Arbre validé", "demarche_arbre", &self.demarche.arbre);
            });
    }

    fn touche_insert(
        &mut self,
        ui: &mut egui::Ui,
        label: &str,
        a_inserer: &str,
        fond: Color32,
        p: &Palette,
    ) {
        if touche(ui, label, fond, p) {
            self.inserer(a_inserer);
        }
    }
}

fn touche(ui: &mut egui::Ui, label: &str, fond: Color32, p: &Palette) -> bool {
    ui.add_sized(
        TOUCHE,
        egui::Button::new(RichText::new(label).size(20.0).color(p.texte_touche)).fill(fond),
    )
    .clicked()
}

fn touche_sci(ui: &mut egui::Ui, label: &str, p: &Palette) -> bool {
    ui.add_sized(
        TOUCHE_SCI,
        egui::Button::new(RichText::new(label).color(p.texte_touche)).fill(p.touche_fonction),
    )
    .clicked()
}

fn libelle_fonction(f: Fonction) -> &'static str {
    match f {
        Fonction::Sqrt => "√",
        Fonction::Square => "x²",
        Fonction::Reciprocal => "1/x",
        Fonction::Power => "xʸ",
        autre => autre.into(),
    }
}

fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
    ui.add_space(4.0);
    ui.label(format!("{titre} :"));
    egui::Frame::group(ui.style())
        .fill(ui.visuals().extreme_bg_color)
        .show(ui, |ui| {
            ui.push_id(id, |ui| {
                ui.set_min_width(ui.available_width());
                ui.monospace(contenu);
            });
        });
}
