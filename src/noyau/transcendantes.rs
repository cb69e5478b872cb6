// src/noyau/transcendantes.rs
//
// Fonctions transcendantes en virgule fixe (BigInt “scalé” ×10^p)
// ----------------------------------------------------------------
// - π (Machin) + cache, e, ln 2, ln 10
// - ln (réduction décimale + binaire, puis série atanh)
// - exp (réduction par ln 2, puis Taylor)
// - sin / cos en degrés (réduction exacte modulo 360, puis Taylor)
// - √ (racine entière num-bigint sur une mantisse décalée)
//
// Toutes les séries tournent avec GARDE chiffres en plus, puis le résultat
// est arrondi half-up à l’échelle (ou la précision) demandée.

use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};

use super::decimal::{pow10, Decimal};

/// Chiffres de garde des séries.
pub const GARDE: u32 = 10;

/// 2^34000 > 10^10000 : au-delà, exp est hors plage (ou nul vers -∞).
const MAX_PUISSANCE_DE_DEUX: i64 = 34_000;

/* ------------------------ π (Machin) + cache ------------------------ */

/// arctan(1/q) scalé (troncature) : z - z^3/3 + z^5/5 - ...
fn arctan_inv_q_fixe(q: i64, scale: &BigInt) -> BigInt {
    let q = BigInt::from(q);
    let q2 = &q * &q;

    let mut q_pow = q;
    let mut sum = BigInt::zero();
    let mut k: u32 = 0;

    loop {
        let term = scale / (&q_pow * (2 * k + 1));
        if term.is_zero() {
            break;
        }
        if k % 2 == 0 {
            sum += &term;
        } else {
            sum -= &term;
        }
        q_pow *= &q2;
        k += 1;
    }

    sum
}

fn pi_fixe_calcul(p: u32) -> BigInt {
    let scale = pow10(p + GARDE);

    // Machin : π = 16*atan(1/5) - 4*atan(1/239)
    let a = arctan_inv_q_fixe(5, &scale);
    let b = arctan_inv_q_fixe(239, &scale);

    (BigInt::from(16) * a - BigInt::from(4) * b) / pow10(GARDE)
}

static PI_CACHE: OnceLock<Mutex<HashMap<u32, BigInt>>> = OnceLock::new();

/// π scalé à p chiffres (mis en cache par p).
pub fn pi_fixe(p: u32) -> BigInt {
    let m = PI_CACHE.get_or_init(|| Mutex::new(HashMap::new()));
    // un verrou empoisonné ne corrompt pas une table de constantes
    let mut guard = match m.lock() {
        Ok(g) => g,
        Err(poison) => poison.into_inner(),
    };

    guard.entry(p).or_insert_with(|| pi_fixe_calcul(p)).clone()
}

/* ------------------------ e, ln 2, ln 10 ------------------------ */

/// e = Σ 1/k!
pub fn e_fixe(p: u32) -> BigInt {
    let scale = pow10(p + GARDE);
    let mut terme = scale.clone();
    let mut somme = scale;
    let mut k: u32 = 1;

    loop {
        terme /= k;
        if terme.is_zero() {
            break;
        }
        somme += &terme;
        k += 1;
    }

    somme / pow10(GARDE)
}

/// atanh(1/q) scalé : Σ 1/((2k+1) q^(2k+1))
fn atanh_inv_q_fixe(q: i64, scale: &BigInt) -> BigInt {
    let q = BigInt::from(q);
    let q2 = &q * &q;

    let mut q_pow = q;
    let mut sum = BigInt::zero();
    let mut k: u32 = 0;

    loop {
        let term = scale / (&q_pow * (2 * k + 1));
        if term.is_zero() {
            break;
        }
        sum += term;
        q_pow *= &q2;
        k += 1;
    }

    sum
}

/// ln 2 = 2 atanh(1/3)
pub fn ln2_fixe(p: u32) -> BigInt {
    let scale = pow10(p + GARDE);
    atanh_inv_q_fixe(3, &scale) * 2u32 / pow10(GARDE)
}

/// ln 10 = 3 ln 2 + ln(5/4) = 3 ln 2 + 2 atanh(1/9)
pub fn ln10_fixe(p: u32) -> BigInt {
    let scale = pow10(p + GARDE);
    let ln2 = atanh_inv_q_fixe(3, &scale) * 2u32;
    let ln_5_4 = atanh_inv_q_fixe(9, &scale) * 2u32;
    (ln2 * 3u32 + ln_5_4) / pow10(GARDE)
}

/* ------------------------ ln ------------------------ */

/// atanh(z) pour z scalé (|z| < 1) : z + z^3/3 + z^5/5 + ...
fn atanh_fixe(z: &BigInt, un: &BigInt) -> BigInt {
    let z2 = z * z / un;
    let mut z_pow = z.clone();
    let mut sum = BigInt::zero();
    let mut k: u32 = 0;

    loop {
        let term = &z_pow / (2 * k + 1);
        if term.is_zero() {
            break;
        }
        sum += term;
        z_pow = z_pow * &z2 / un;
        k += 1;
    }

    sum
}

/// ln(x) scalé à p chiffres. Précondition : x > 0.
///
/// x = m·10^k avec m ∈ [1, 10), puis m = m'·2^j avec m' ∈ [0.75, 1.5),
/// ln x = 2 atanh((m'-1)/(m'+1)) + j ln 2 + k ln 10.
pub fn ln_fixe(x: &Decimal, p: u32) -> BigInt {
    let w = p + GARDE;
    let un = pow10(w);
    let k = x.ordre();

    let decal = i64::from(w) - i64::from(x.echelle()) - k;
    let mut m = if decal >= 0 {
        x.mantisse() * pow10(decal as u32)
    } else {
        x.mantisse() / pow10((-decal) as u32)
    };

    let mut j: u32 = 0;
    while &m * 2u32 >= &un * 3u32 {
        m /= 2u32;
        j += 1;
    }

    let z = (&m - &un) * &un / (&m + &un);
    let total = atanh_fixe(&z, &un) * 2u32 + ln2_fixe(w) * j + ln10_fixe(w) * BigInt::from(k);

    total / pow10(GARDE)
}

/* ------------------------ exp ------------------------ */

/// exp(y) pour y scalé à p chiffres, arrondi à `chiffres` chiffres significatifs.
/// y = n·ln 2 + r avec r ∈ [0, ln 2) ; exp(y) = 2^n · exp(r).
/// None si n ne tient pas dans un i64 (l’appelant borne la magnitude avant).
pub fn exp_fixe(y: &BigInt, p: u32, chiffres: u32) -> Option<Decimal> {
    let un = pow10(p);
    let ln2 = ln2_fixe(p);

    let mut n = y / &ln2;
    let mut r = y - &n * &ln2;
    if r.is_negative() {
        n -= 1u32;
        r += &ln2;
    }

    if n > BigInt::from(MAX_PUISSANCE_DE_DEUX) {
        return None;
    }
    if n < BigInt::from(-MAX_PUISSANCE_DE_DEUX) {
        return Some(Decimal::zero());
    }

    let mut terme = un.clone();
    let mut somme = un.clone();
    let mut k: u32 = 1;
    loop {
        terme = &terme * &r / (&un * k);
        if terme.is_zero() {
            break;
        }
        somme += &terme;
        k += 1;
    }

    let n = n.to_i64()?;
    let valeur = if n >= 0 {
        Decimal::new(somme << n.to_usize()?, p)
    } else {
        // 2^-n = 5^n / 10^n
        let n = u32::try_from(-n).ok()?;
        Decimal::new(somme * BigInt::from(5).pow(n), p + n)
    };

    Some(valeur.arrondir_significatif(chiffres))
}

/// |base|^exposant = exp(exposant · ln|base|), `chiffres` significatifs.
/// Précondition : base ≠ 0 ; magnitude du résultat déjà bornée par l’appelant.
pub fn puissance_reelle(base: &Decimal, exposant: &Decimal, chiffres: u32) -> Option<Decimal> {
    let p = chiffres + GARDE + 6 + exposant.ordre().max(0) as u32;
    let l = ln_fixe(&base.abs(), p);
    let y = exposant.mantisse() * l / pow10(exposant.echelle());
    exp_fixe(&y, p, chiffres)
}

/* ------------------------ sin / cos (degrés) ------------------------ */

/// Degrés -> radians scalés, angle réduit exactement dans [0, 360).
fn radians_fixe(degres: &Decimal, p: u32) -> BigInt {
    let reduit = degres.reste_positif(&BigInt::from(360));
    let d = reduit.vers_fixe(p);
    d * pi_fixe(p) / (pow10(p) * 180u32)
}

/// (sin x, cos x) scalés, |x| ≤ 2π.
fn sin_cos_fixe(x: &BigInt, p: u32) -> (BigInt, BigInt) {
    let un = pow10(p);
    let x2 = x * x / &un;

    let mut terme = x.clone();
    let mut s = x.clone();
    let mut k: u32 = 1;
    loop {
        terme = -(&terme * &x2) / (&un * (2 * k * (2 * k + 1)));
        if terme.is_zero() {
            break;
        }
        s += &terme;
        k += 1;
    }

    let mut terme = un.clone();
    let mut c = un.clone();
    let mut k: u32 = 1;
    loop {
        terme = -(&terme * &x2) / (&un * ((2 * k - 1) * (2 * k)));
        if terme.is_zero() {
            break;
        }
        c += &terme;
        k += 1;
    }

    (s, c)
}

pub fn sinus_degres(degres: &Decimal, echelle: u32) -> Decimal {
    let w = echelle + GARDE;
    let (s, _) = sin_cos_fixe(&radians_fixe(degres, w), w);
    Decimal::new(s, w).arrondir(echelle)
}

pub fn cosinus_degres(degres: &Decimal, echelle: u32) -> Decimal {
    let w = echelle + GARDE;
    let (_, c) = sin_cos_fixe(&radians_fixe(degres, w), w);
    Decimal::new(c, w).arrondir(echelle)
}

/// tan en degrés. None si le cosinus arrondi à `echelle` est exactement nul.
pub fn tangente_degres(degres: &Decimal, echelle: u32) -> Option<Decimal> {
    let w = echelle + GARDE;
    let (s, c) = sin_cos_fixe(&radians_fixe(degres, w), w);
    let c = Decimal::new(c, w);
    if c.arrondir(echelle).is_zero() {
        return None;
    }
    Decimal::new(s, w).diviser(&c, echelle)
}

/* ------------------------ ln / √ / constantes ------------------------ */

/// ln(x) arrondi à `echelle`. Précondition : x > 0.
pub fn logarithme(x: &Decimal, echelle: u32) -> Decimal {
    let w = echelle + GARDE;
    Decimal::new(ln_fixe(x, w), w).arrondir(echelle)
}

/// √x à `chiffres` chiffres significatifs. Précondition : x ≥ 0.
pub fn racine(x: &Decimal, chiffres: u32) -> Decimal {
    if x.is_zero() {
        return Decimal::zero();
    }

    let s = x.echelle();
    let q = (i64::from(chiffres) + 2 - x.ordre().div_euclid(2))
        .max(i64::from(s.div_ceil(2)))
        .max(0) as u32;

    let r = (x.mantisse() * pow10(2 * q - s)).sqrt();
    Decimal::new(r, q).arrondir_significatif(chiffres)
}

pub fn constante_pi(echelle: u32) -> Decimal {
    let w = echelle + GARDE;
    Decimal::new(pi_fixe(w), w).arrondir(echelle)
}

pub fn constante_e(echelle: u32) -> Decimal {
    let w = echelle + GARDE;
    Decimal::new(e_fixe(w), w).arrondir(echelle)
}
