//! Noyau : évaluation (pipeline réel)
//!
//! tokenize -> RPN (shunting-yard) -> pile de valeurs décimales -> résultat normalisé
//!
//! Chaque appel alloue ses propres jetons / piles : aucun état partagé entre appels
//! (hors cache de π, qui ne contient que des constantes).

use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};
use tracing::{debug, trace};

use super::decimal::Decimal;
use super::erreur::{Erreur, Result};
use super::jetons::{format_tokens, tokenize, Fonction, Op, Tok, Unaire, ECHELLE_CONSTANTES};
use super::rpn::to_rpn;
use super::transcendantes::{
    constante_e, cosinus_degres, logarithme, puissance_reelle, racine, sinus_degres,
    tangente_degres,
};

/// Division : 30 chiffres après la virgule, half-up.
pub const ECHELLE_DIVISION: u32 = 30;

/// sin, cos, tan, ln : 30 chiffres après la virgule, half-up.
pub const ECHELLE_FONCTIONS: u32 = 30;

/// √ et puissances non exactes : 30 chiffres significatifs, half-up.
pub const PRECISION: u32 = 30;

/// Plafond de l’exposant (au-delà : Math ERROR, quelle que soit la base).
pub const PLAFOND_EXPOSANT: i64 = 2_147_483_637;

/// Garde-fou factorielle (10000! a déjà 35 660 chiffres).
pub const MAX_FACTORIELLE: u32 = 10_000;

/// Garde-fou : |résultat| de ^ borné à 10^±MAX_ORDRE_PUISSANCE.
pub const MAX_ORDRE_PUISSANCE: f64 = 10_000.0;

/// Au-delà de ce nombre de chiffres, une puissance entière passe par exp/ln.
const MAX_CHIFFRES_EXACTS: u64 = 20_000;

#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct Demarche {
    pub jetons: String,
    pub rpn: String,
}

/// API publique : évalue une expression infixe déjà espacée.
///
/// Le résultat est rendu sans zéros fractionnaires finaux.
/// Une expression sans aucune valeur (ex: "" ou "( )") donne Syntax ERROR “empty expression”.
pub fn evaluate(expression: &str) -> Result<Decimal> {
    debug!(expression, "evaluating");

    let res = evaluer(expression);
    match &res {
        Ok(v) => debug!(result = %v, "evaluation done"),
        Err(e) => debug!(error = %e, "evaluation failed"),
    }
    res
}

fn evaluer(expression: &str) -> Result<Decimal> {
    let jetons = tokenize(expression)?;
    trace!(jetons = %format_tokens(&jetons), "tokens");

    let rpn = to_rpn(&jetons)?;
    trace!(rpn = %format_tokens(&rpn), "postfix");

    let valeur = eval_rpn(&rpn)?.ok_or_else(|| Erreur::syntaxe("empty expression"))?;
    Ok(valeur.normaliser())
}

/// Démarche : jetons et RPN en texte (aucune évaluation).
pub fn tracer(expression: &str) -> Result<Demarche> {
    let jetons = tokenize(expression)?;
    let rpn = to_rpn(&jetons)?;

    Ok(Demarche {
        jetons: format_tokens(&jetons),
        rpn: format_tokens(&rpn),
    })
}

/// Exécute une RPN sur une pile de décimaux.
/// Ok(None) si la RPN ne laisse aucune valeur.
pub fn eval_rpn(rpn: &[Tok]) -> Result<Option<Decimal>> {
    let mut pile: Vec<Decimal> = Vec::new();

    for tok in rpn {
        match tok {
            Tok::Num(v) => pile.push(v.clone()),

            // une "(" n’arrive ici que si elle n’a jamais été fermée
            Tok::Op(Op::LPar) => return Err(Erreur::syntaxe("unclosed parenthesis")),

            Tok::Op(op) => {
                let (gauche, droite) = match (pile.pop(), pile.pop()) {
                    (Some(d), Some(g)) => (g, d),
                    _ => {
                        return Err(Erreur::syntaxe(format!(
                            "bad operand type for operator: '{}'",
                            op.symbole()
                        )))
                    }
                };
                pile.push(binaire(*op, &gauche, &droite)?);
            }

            Tok::Unaire(u) => {
                let v = pile.pop().ok_or_else(|| {
                    Erreur::syntaxe(format!(
                        "no operand found for unary operator: '{}'",
                        u.symbole()
                    ))
                })?;
                pile.push(unaire(*u, &v)?);
            }

            Tok::Fonction(f) => {
                let v = pile.pop().ok_or_else(|| {
                    Erreur::syntaxe(format!("bad operand type for function: '{}'", f.nom()))
                })?;
                pile.push(fonction(*f, &v)?);
            }
        }
    }

    match pile.len() {
        0 | 1 => Ok(pile.pop()),
        _ => Err(Erreur::syntaxe("missing operator")),
    }
}

/* ------------------------ Opérateurs binaires ------------------------ */

fn binaire(op: Op, gauche: &Decimal, droite: &Decimal) -> Result<Decimal> {
    match op {
        Op::Plus => Ok(gauche + droite),
        Op::Minus => Ok(gauche - droite),
        Op::Fois => Ok(gauche * droite),
        Op::Divise => gauche
            .diviser(droite, ECHELLE_DIVISION)
            .ok_or_else(|| Erreur::math("division by zero")),
        Op::Caret => puissance(gauche, droite),
        Op::LPar => Err(Erreur::syntaxe("unclosed parenthesis")),
        Op::RPar => Err(Erreur::syntaxe("unopened parenthesis")),
    }
}

/// base ^ exposant.
///
/// - base 1 -> 1, base 0 -> 0 (avant toute autre vérification)
/// - exposant > PLAFOND_EXPOSANT -> Math ERROR
/// - exposant entier : exact tant que le résultat reste raisonnable,
///   exposant négatif -> 1 / base^n à PRECISION chiffres significatifs
/// - sinon : exp(exposant · ln|base|) à PRECISION chiffres significatifs
pub fn puissance(base: &Decimal, exposant: &Decimal) -> Result<Decimal> {
    if base.is_one() {
        return Ok(Decimal::un());
    }
    if base.is_zero() {
        return Ok(Decimal::zero());
    }
    if *exposant > Decimal::from(PLAFOND_EXPOSANT) {
        return Err(Erreur::math("exceeded maximum exponent size"));
    }

    let entier = exposant.est_entier();
    if base.is_negative() && !entier {
        return Err(Erreur::math("non-real result"));
    }
    if exposant.is_zero() {
        return Ok(Decimal::un());
    }

    let n = exposant.tronquer();
    let impair = !(&n % 2u32).is_zero();
    let signe = |v: Decimal| if base.is_negative() && impair { -v } else { v };

    // |base| == 1 : seule la parité compte
    if base.abs().is_one() {
        return Ok(signe(Decimal::un()));
    }

    // ordre de grandeur du résultat (base ≠ 0, ±1 ici)
    // NaN (0 × ∞, base ≈ 1) : aucune borne ici, exp_fixe borne lui-même
    let ordre = exposant_approche(exposant) * base.log10_abs();
    if ordre > MAX_ORDRE_PUISSANCE {
        return Err(Erreur::math("result out of range"));
    }
    if ordre < -MAX_ORDRE_PUISSANCE {
        return Ok(Decimal::zero());
    }

    if entier {
        if let Some(k) = n.abs().to_u32() {
            let cout = u64::from(base.nb_chiffres()) * u64::from(k);
            if cout <= MAX_CHIFFRES_EXACTS {
                let p = base.puissance_entiere(k);
                if !n.is_negative() {
                    return Ok(p);
                }
                return Decimal::un()
                    .diviser_significatif(&p, PRECISION)
                    .ok_or_else(|| Erreur::math("division by zero"));
            }
        }
    }

    puissance_reelle(base, exposant, PRECISION)
        .map(signe)
        .ok_or_else(|| Erreur::math("result out of range"))
}

/// Valeur flottante approchée (peut valoir ±inf pour les très grands exposants).
fn exposant_approche(x: &Decimal) -> f64 {
    if x.is_zero() {
        return 0.0;
    }
    let v = 10f64.powf(x.log10_abs());
    if x.is_negative() {
        -v
    } else {
        v
    }
}

/* ------------------------ Opérateurs unaires ------------------------ */

fn unaire(u: Unaire, v: &Decimal) -> Result<Decimal> {
    match u {
        Unaire::Moins => Ok(-v),
        Unaire::Factorielle => factorielle(v),
        Unaire::Racine => racine_carree(v),
    }
}

/// n! pour n entier, 0 ≤ n ≤ MAX_FACTORIELLE.
pub fn factorielle(v: &Decimal) -> Result<Decimal> {
    if v.is_negative() {
        return Err(Erreur::math("factorial of a negative number"));
    }
    if !v.est_entier() {
        return Err(Erreur::math("factorial of a non-integer"));
    }

    let n = v
        .tronquer()
        .to_u32()
        .filter(|n| *n <= MAX_FACTORIELLE)
        .ok_or_else(|| Erreur::math("exceeded maximum factorial size"))?;

    let mut acc = BigInt::one();
    for i in 2..=n {
        acc *= i;
    }
    Ok(Decimal::from(acc))
}

fn racine_carree(v: &Decimal) -> Result<Decimal> {
    if v.is_negative() {
        return Err(Erreur::math("square root of a negative number"));
    }
    Ok(racine(v, PRECISION))
}

/* ------------------------ Fonctions ------------------------ */

/// Les fonctions trigonométriques lisent leur argument en DEGRÉS.
fn fonction(f: Fonction, v: &Decimal) -> Result<Decimal> {
    match f {
        Fonction::Sin => Ok(sinus_degres(v, ECHELLE_FONCTIONS)),
        Fonction::Cos => Ok(cosinus_degres(v, ECHELLE_FONCTIONS)),
        Fonction::Tan => tangente_degres(v, ECHELLE_FONCTIONS)
            .ok_or_else(|| Erreur::syntaxe("division by zero")),
        Fonction::Ln => logarithme_naturel(v),
        Fonction::Sqrt => racine_carree(v),
    }
}

fn logarithme_naturel(v: &Decimal) -> Result<Decimal> {
    if v.is_negative() {
        return Err(Erreur::math("logarithm of a negative number"));
    }
    if v.is_zero() {
        return Err(Erreur::math("logarithm of zero"));
    }
    if v.is_one() {
        return Ok(Decimal::zero());
    }
    if *v == constante_e(ECHELLE_CONSTANTES) {
        return Ok(Decimal::un());
    }
    Ok(logarithme(v, ECHELLE_FONCTIONS))
}
