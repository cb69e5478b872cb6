// src/app.rs
//
// Ardoise : module App (racine)
// -----------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + touches.rs)
// - Ré-exporter Ardoise et Touche
//
// Aucun rendu ici : l’hôte (fenêtre, terminal, web…) lit `ligne_affichee()`
// et `affichage` après chaque `appuyer`.

pub mod etat;
pub mod touches;

pub use etat::Ardoise;
pub use touches::{Insertion, Touche};
