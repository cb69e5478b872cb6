//! Calculatrice scientifique décimale.
//!
//! - `noyau` : tokenisation, shunting-yard, évaluation RPN en décimal
//!   à précision arbitraire, affichage borné
//! - `app`   : ardoise à boutons (ligne courante + dernier résultat), sans rendu
//!
//! La bibliothèque émet des événements `tracing` ; l’hôte installe le subscriber.

pub mod app;
pub mod noyau;

pub use app::{Ardoise, Touche};
pub use noyau::{evaluate, parse_decimal, tracer, ConfigAffichage, Decimal, Demarche, Erreur, Result};
