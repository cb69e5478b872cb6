//! src/app/etat.rs
//!
//! État de l’ardoise (sans rendu).
//!
//! Rôle : contenir la ligne en cours, l’affichage du dernier “=”, le dernier
//! résultat (ANS) et la configuration d’affichage.
//!
//! - Aucune évaluation ici : touches.rs appelle le noyau.
//! - La ligne garde les espaces entre lexèmes (le tokeniseur en a besoin) ;
//!   `ligne_affichee` les retire pour l’écran.

use crate::noyau::{ConfigAffichage, Decimal};

#[derive(Clone, Debug, Default)]
pub struct Ardoise {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub affichage: String, // résultat formaté ou "Syntax ERROR" / "Math ERROR"

    // --- cache ANS ---
    pub dernier: Option<Decimal>,

    // --- paramètres ---
    pub config: ConfigAffichage,
}

impl Ardoise {
    pub fn new(config: ConfigAffichage) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Ligne telle qu’à l’écran : sans espaces.
    pub fn ligne_affichee(&self) -> String {
        self.entree.chars().filter(|c| !c.is_whitespace()).collect()
    }

    /// AC : efface la ligne et l’affichage (ANS conservé).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.affichage.clear();
    }

    /// Dépose un résultat : mémorisé pour ANS et affiché selon la config.
    pub fn set_resultat(&mut self, v: Decimal) {
        self.affichage = self.config.format(&v);
        self.dernier = Some(v);
    }

    /// Erreur : seule l’étiquette s’affiche, ANS garde la valeur précédente.
    pub fn set_erreur(&mut self, etiquette: &str) {
        self.affichage = etiquette.to_string();
    }
}
