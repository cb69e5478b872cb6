//! Erreurs du noyau : deux familles seulement.
//!
//! - Syntaxe : entrée mal formée (jeton inconnu, parenthèses, opérandes manquants…)
//! - Math    : entrée bien formée mais calcul indéfini ou hors limites

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Erreur {
    #[error("Syntax ERROR: {0}")]
    Syntaxe(String),

    #[error("Math ERROR: {0}")]
    Math(String),
}

impl Erreur {
    pub fn syntaxe(msg: impl Into<String>) -> Self {
        Self::Syntaxe(msg.into())
    }

    pub fn math(msg: impl Into<String>) -> Self {
        Self::Math(msg.into())
    }

    /// Raison lisible (sans l’étiquette).
    pub fn raison(&self) -> &str {
        match self {
            Self::Syntaxe(r) | Self::Math(r) => r,
        }
    }

    /// Étiquette d’affichage côté écran.
    pub fn etiquette(&self) -> &'static str {
        match self {
            Self::Syntaxe(_) => "Syntax ERROR",
            Self::Math(_) => "Math ERROR",
        }
    }

    pub fn est_syntaxe(&self) -> bool {
        matches!(self, Self::Syntaxe(_))
    }

    pub fn est_math(&self) -> bool {
        matches!(self, Self::Math(_))
    }
}

pub type Result<T> = std::result::Result<T, Erreur>;
