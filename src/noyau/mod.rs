//! Noyau décimal
//!
//! Organisation interne :
//! - erreur.rs         : Syntax ERROR / Math ERROR
//! - decimal.rs        : décimal à précision arbitraire (BigInt + échelle)
//! - transcendantes.rs : séries à virgule fixe (π, e, ln, exp, sin, cos) + cache π
//! - jetons.rs         : tokenisation
//! - rpn.rs            : shunting-yard
//! - eval.rs           : exécution RPN + pipeline complet
//! - format.rs         : affichage borné (échelle / longueur)

pub mod decimal;
pub mod erreur;
pub mod eval;
pub mod format;
pub mod jetons;
pub mod rpn;
pub mod transcendantes;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use decimal::Decimal;
pub use erreur::{Erreur, Result};
pub use eval::{evaluate, tracer, Demarche};
pub use format::{parse_decimal, ConfigAffichage};
