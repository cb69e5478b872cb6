// src/noyau/format.rs
//
// Affichage d’un décimal sous deux limites configurables :
// - echelle_max  : chiffres après la virgule conservés quand on tronque
// - longueur_max : longueur maximale du texte affiché
//
// La configuration est une valeur explicite (pas d’état global) :
// l’hôte la construit au démarrage et la passe par référence.

use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use serde::{Deserialize, Serialize};

use super::decimal::{pow10, Decimal};
use super::erreur::{Erreur, Result};

pub const ECHELLE_MAX_DEFAUT: usize = 12;
pub const LONGUEUR_MAX_DEFAUT: usize = 13;

/// Chiffres après la virgule de la mantisse scientifique (ex: 1.2345679e14).
const CHIFFRES_MANTISSE: u32 = 7;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigAffichage {
    pub echelle_max: usize,
    pub longueur_max: usize,
}

impl Default for ConfigAffichage {
    fn default() -> Self {
        Self {
            echelle_max: ECHELLE_MAX_DEFAUT,
            longueur_max: LONGUEUR_MAX_DEFAUT,
        }
    }
}

impl ConfigAffichage {
    pub fn new(echelle_max: usize, longueur_max: usize) -> Self {
        Self {
            echelle_max,
            longueur_max,
        }
    }

    pub fn set_max_scale(&mut self, n: usize) {
        self.echelle_max = n;
    }

    pub fn set_max_length(&mut self, n: usize) {
        self.longueur_max = n;
    }

    fn tient(&self, s: &str) -> bool {
        s.chars().count() <= self.longueur_max
    }

    /// Texte d’affichage.
    ///
    /// 1. rendu positionnel s’il tient dans longueur_max
    /// 2. sinon, si l’échelle atteint echelle_max : arrondi half-up à echelle_max
    ///    (zéros finaux retirés seulement si le texte tient alors)
    /// 3. sinon : notation scientifique (mantisse à 7 décimales max)
    pub fn format(&self, v: &Decimal) -> String {
        let brut = v.to_string();
        if self.tient(&brut) {
            return brut;
        }

        // >= et non > : un affichage déjà arrondi à echelle_max repasse par
        // cette branche et se reformate à l’identique (ex: 12 décimales exactes
        // restent en positionnel au lieu de passer en scientifique)
        if v.echelle() as usize >= self.echelle_max {
            // echelle_max ≤ echelle (u32) ici
            let arrondi = v.arrondir(self.echelle_max as u32);
            let court = arrondi.normaliser().to_string();
            if self.tient(&court) {
                return court;
            }
            return arrondi.to_string();
        }

        notation_scientifique(v)
    }
}

/// Notation scientifique normalisée : un chiffre entier, au plus 7 décimales
/// (zéros finaux retirés), arrondi half-even, exposant “e”.
pub fn notation_scientifique(v: &Decimal) -> String {
    if v.is_zero() {
        return "0".to_string();
    }

    let chiffres = v.mantisse().magnitude().to_string();
    let garde = (CHIFFRES_MANTISSE + 1) as usize;
    let mut exposant = v.ordre();

    let tete = if chiffres.len() <= garde {
        BigInt::parse_bytes(chiffres.as_bytes(), 10).unwrap_or_default()
    } else {
        let retire = (chiffres.len() - garde) as u32;
        let diviseur = pow10(retire);
        let m = v.mantisse().abs();
        let mut q = &m / &diviseur;
        let r = &m % &diviseur;

        // half-even
        let double = r * 2u32;
        if double > diviseur || (double == diviseur && !(&q % 2u32).is_zero()) {
            q += 1u32;
        }
        // 99999999.5 -> 100000000 : on retombe sur 8 chiffres
        if q == pow10(CHIFFRES_MANTISSE + 1) {
            q = pow10(CHIFFRES_MANTISSE);
            exposant += 1;
        }
        q
    };

    let texte = tete.to_string();
    let (ent, frac) = texte.split_at(1);
    let frac = frac.trim_end_matches('0');
    let signe = if v.is_negative() { "-" } else { "" };

    if frac.is_empty() {
        format!("{signe}{ent}e{exposant}")
    } else {
        format!("{signe}{ent}.{frac}e{exposant}")
    }
}

/// Relit un texte d’affichage (positionnel ou scientifique) en décimal.
pub fn parse_decimal(texte: &str) -> Result<Decimal> {
    let t = texte.trim();
    t.parse::<Decimal>()
        .map_err(|_| Erreur::syntaxe(format!("unrecognised token: '{t}'")))
}
