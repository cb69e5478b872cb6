// src/app/touches.rs
//
// Boutons de l’ardoise
// --------------------
// Un libellé de bouton -> une Touche -> une modification de la ligne.
//
// La ligne doit rester tokenisable : chaque lexème est séparé par des espaces
// (opérateurs, parenthèses, fonctions), les chiffres d’un même nombre restent collés.

use tracing::{debug, warn};

use super::etat::Ardoise;
use crate::noyau::evaluate;

/// Règle d’insertion (espaces autour ou non).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Insertion {
    Chiffre,   // collé au nombre en cours
    Mot,       // π, e, ANS : lexème autonome
    Fonction,  // "sin (" , "√" : préfixe suivi d’un espace
    Operateur, // + - × ÷ ^ ( ) ! : entouré d’espaces
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Touche {
    Inserer(&'static str, Insertion),
    Del,
    Ac,
    Ans,
    Egal,
}

const CHIFFRES: [&str; 11] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9", "."];

/// Motifs retirés d’un bloc par DEL (le reste part caractère par caractère).
const MOTIFS_DEL: [&str; 4] = ["sin (", "cos (", "tan (", "ln ("];

impl Touche {
    /// Libellé de bouton -> touche. `None` si le libellé est inconnu.
    pub fn depuis_libelle(libelle: &str) -> Option<Touche> {
        use Insertion::*;

        if let Some(c) = CHIFFRES.iter().find(|c| **c == libelle) {
            return Some(Touche::Inserer(*c, Chiffre));
        }

        let t = match libelle {
            "+" => Touche::Inserer("+", Operateur),
            "-" => Touche::Inserer("-", Operateur),
            "×" => Touche::Inserer("×", Operateur),
            "÷" => Touche::Inserer("÷", Operateur),
            "^" => Touche::Inserer("^", Operateur),
            "(" => Touche::Inserer("(", Operateur),
            ")" => Touche::Inserer(")", Operateur),
            "x!" => Touche::Inserer("!", Operateur),

            "sin" => Touche::Inserer("sin (", Fonction),
            "cos" => Touche::Inserer("cos (", Fonction),
            "tan" => Touche::Inserer("tan (", Fonction),
            "ln" => Touche::Inserer("ln (", Fonction),
            "√x" => Touche::Inserer("√", Fonction),

            "π" => Touche::Inserer("π", Mot),
            "e" => Touche::Inserer("e", Mot),

            "DEL" => Touche::Del,
            "AC" => Touche::Ac,
            "ANS" => Touche::Ans,
            "=" => Touche::Egal,
            _ => return None,
        };
        Some(t)
    }
}

impl Ardoise {
    /// Appui sur un bouton par son libellé. Renvoie false si le libellé est inconnu.
    pub fn appuyer(&mut self, libelle: &str) -> bool {
        match Touche::depuis_libelle(libelle) {
            Some(t) => {
                self.appliquer(t);
                true
            }
            None => {
                debug!(libelle, "unknown button");
                false
            }
        }
    }

    pub fn appliquer(&mut self, touche: Touche) {
        match touche {
            Touche::Inserer(texte, regle) => self.inserer(texte, regle),
            Touche::Del => self.backspace_entree(),
            Touche::Ac => self.reset_total(),
            Touche::Ans => {
                // rien à insérer avant le premier résultat
                if let Some(texte) = self.dernier.as_ref().map(|v| v.to_string()) {
                    self.inserer(&texte, Insertion::Mot);
                }
            }
            Touche::Egal => self.evaluer_entree(),
        }
    }

    fn inserer(&mut self, texte: &str, regle: Insertion) {
        match regle {
            Insertion::Chiffre => {
                // nouveau nombre après un lexème non numérique
                let colle = self
                    .entree
                    .chars()
                    .last()
                    .map_or(true, |c| c.is_whitespace() || c.is_ascii_digit() || c == '.');
                if !colle {
                    self.entree.push(' ');
                }
                self.entree.push_str(texte);
            }
            Insertion::Mot | Insertion::Fonction => {
                if !self.entree.is_empty() && !self.entree.ends_with(char::is_whitespace) {
                    self.entree.push(' ');
                }
                self.entree.push_str(texte);
                if regle == Insertion::Fonction {
                    self.entree.push(' ');
                }
            }
            Insertion::Operateur => {
                while self.entree.ends_with(' ') {
                    self.entree.pop();
                }
                if !self.entree.is_empty() {
                    self.entree.push(' ');
                }
                self.entree.push_str(texte);
                self.entree.push(' ');
            }
        }
    }

    /// DEL : retire la dernière unité saisie ("sin (" d’un coup, sinon un caractère).
    fn backspace_entree(&mut self) {
        while self.entree.ends_with(' ') {
            self.entree.pop();
        }

        let n = MOTIFS_DEL
            .iter()
            .find(|m| self.entree.ends_with(*m))
            .map_or(1, |m| m.chars().count());

        for _ in 0..n {
            self.entree.pop();
        }
        while self.entree.ends_with(' ') {
            self.entree.pop();
        }
    }

    /// "=" : évalue la ligne, dépose le résultat formaté ou l’étiquette d’erreur.
    fn evaluer_entree(&mut self) {
        match evaluate(self.entree.trim()) {
            Ok(v) => self.set_resultat(v),
            Err(e) => {
                warn!(ligne = %self.ligne_affichee(), raison = e.raison(), "{}", e.etiquette());
                self.set_erreur(e.etiquette());
            }
        }
    }
}
