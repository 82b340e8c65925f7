//! Thèmes : palette par thème + visuels egui.

use eframe::egui::{self, Color32};

use calculatrice_web::config::Theme;

/// Couleurs des touches et du fond.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub fond: Color32,
    pub ecran: Color32,
    pub texte: Color32,
    pub touche_nombre: Color32,
    pub touche_operateur: Color32,
    pub touche_fonction: Color32,
    pub texte_touche: Color32,
    pub sombre: bool,
}

pub fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Macos => Palette {
            fond: Color32::from_rgb(0x1c, 0x1c, 0x1e),
            ecran: Color32::from_rgb(0x1c, 0x1c, 0x1e),
            texte: Color32::WHITE,
            touche_nombre: Color32::from_rgb(0x50, 0x50, 0x50),
            touche_operateur: Color32::from_rgb(0xff, 0x95, 0x00),
            touche_fonction: Color32::from_rgb(0xa5, 0xa5, 0xa5),
            texte_touche: Color32::WHITE,
            sombre: true,
        },
        Theme::Dark => Palette {
            fond: Color32::from_rgb(0x1e, 0x1e, 0x1e),
            ecran: Color32::from_rgb(0x2d, 0x2d, 0x2d),
            texte: Color32::WHITE,
            touche_nombre: Color32::from_rgb(0x3d, 0x3d, 0x3d),
            touche_operateur: Color32::from_rgb(0xff, 0x95, 0x00),
            touche_fonction: Color32::from_rgb(0x5a, 0x5a, 0x5a),
            texte_touche: Color32::WHITE,
            sombre: true,
        },
        Theme::Blue => Palette {
            fond: Color32::from_rgb(0xf0, 0xf4, 0xf8),
            ecran: Color32::WHITE,
            texte: Color32::from_rgb(0x1a, 0x20, 0x2c),
            touche_nombre: Color32::from_rgb(0x42, 0x99, 0xe1),
            touche_operateur: Color32::from_rgb(0x31, 0x82, 0xce),
            touche_fonction: Color32::from_rgb(0x90, 0xcd, 0xf4),
            texte_touche: Color32::WHITE,
            sombre: false,
        },
    }
}

/// Visuels egui dérivés de la palette.
pub fn visuels(theme: Theme) -> egui::Visuals {
    let p = palette(theme);
    let mut v = if p.sombre {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    };
    v.panel_fill = p.fond;
    v.window_fill = p.fond;
    v.extreme_bg_color = p.ecran;
    v.override_text_color = Some(p.texte);
    v
}
