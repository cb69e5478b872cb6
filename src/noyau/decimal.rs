// src/noyau/decimal.rs
//
// Décimal à précision arbitraire : valeur = mantisse / 10^echelle
// ---------------------------------------------------------------
// - mantisse : BigInt signé
// - echelle  : nombre de chiffres après la virgule (jamais négatif)
//
// Addition / soustraction / multiplication : exactes.
// Division / racine / arrondis : échelle ou précision explicite, arrondi “half-up”
// (0.5 s’éloigne de zéro).

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use thiserror::Error;

/// Garde-fou : exposant maximal accepté dans un littéral (ex: 1e10000).
pub const MAX_EXPOSANT_LITTERAL: i64 = 10_000;

pub(crate) fn pow10(n: u32) -> BigInt {
    BigInt::from(10).pow(n)
}

/// n / d arrondi half-up. Précondition : d > 0.
pub(crate) fn div_arrondi(n: &BigInt, d: &BigInt) -> BigInt {
    let q = n / d;
    let r = n % d;
    if r.abs() * 2u32 >= *d {
        if n.is_negative() {
            q - 1u32
        } else {
            q + 1u32
        }
    } else {
        q
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid decimal literal: '{0}'")]
pub struct LitteralInvalide(pub String);

#[derive(Clone, Debug)]
pub struct Decimal {
    mantisse: BigInt,
    echelle: u32,
}

impl Decimal {
    pub fn new(mantisse: BigInt, echelle: u32) -> Self {
        Self { mantisse, echelle }
    }

    pub fn zero() -> Self {
        Self::new(BigInt::zero(), 0)
    }

    pub fn un() -> Self {
        Self::new(BigInt::one(), 0)
    }

    pub fn mantisse(&self) -> &BigInt {
        &self.mantisse
    }

    pub fn echelle(&self) -> u32 {
        self.echelle
    }

    pub fn is_zero(&self) -> bool {
        self.mantisse.is_zero()
    }

    pub fn is_one(&self) -> bool {
        *self == Self::un()
    }

    pub fn is_negative(&self) -> bool {
        self.mantisse.is_negative()
    }

    pub fn abs(&self) -> Self {
        Self::new(self.mantisse.abs(), self.echelle)
    }

    /// Vrai si aucune partie fractionnaire non nulle.
    pub fn est_entier(&self) -> bool {
        self.echelle == 0 || (&self.mantisse % pow10(self.echelle)).is_zero()
    }

    /// Troncature vers zéro.
    pub fn tronquer(&self) -> BigInt {
        &self.mantisse / pow10(self.echelle)
    }

    /// Nombre de chiffres de la mantisse (1 pour zéro).
    pub fn nb_chiffres(&self) -> u32 {
        self.mantisse.magnitude().to_string().len() as u32
    }

    /// floor(log10 |x|) pour x ≠ 0.
    pub fn ordre(&self) -> i64 {
        i64::from(self.nb_chiffres()) - 1 - i64::from(self.echelle)
    }

    /// log10 |x| approché (flottant), pour estimer des ordres de grandeur.
    /// x doit être non nul.
    pub fn log10_abs(&self) -> f64 {
        let chiffres = self.mantisse.magnitude().to_string();
        let tete = &chiffres[..chiffres.len().min(17)];
        let lead: f64 = tete.parse::<f64>().unwrap_or(1.0) / 10f64.powi(tete.len() as i32 - 1);
        lead.log10() + self.ordre() as f64
    }

    /// Retire les zéros fractionnaires finaux (valeur inchangée).
    pub fn normaliser(&self) -> Self {
        if self.mantisse.is_zero() {
            return Self::zero();
        }
        let dix = BigInt::from(10);
        let mut m = self.mantisse.clone();
        let mut e = self.echelle;
        while e > 0 && (&m % &dix).is_zero() {
            m /= &dix;
            e -= 1;
        }
        Self::new(m, e)
    }

    /// Fixe l’échelle (half-up si on retire des chiffres, zéros sinon).
    pub fn arrondir(&self, echelle: u32) -> Self {
        match echelle.cmp(&self.echelle) {
            Ordering::Equal => self.clone(),
            Ordering::Greater => {
                Self::new(&self.mantisse * pow10(echelle - self.echelle), echelle)
            }
            Ordering::Less => Self::new(
                div_arrondi(&self.mantisse, &pow10(self.echelle - echelle)),
                echelle,
            ),
        }
    }

    /// Arrondit à `chiffres` chiffres significatifs (half-up).
    pub fn arrondir_significatif(&self, chiffres: u32) -> Self {
        let n = self.nb_chiffres();
        if self.is_zero() || n <= chiffres {
            return self.clone();
        }
        let retire = n - chiffres;
        let m = div_arrondi(&self.mantisse, &pow10(retire));
        if retire <= self.echelle {
            Self::new(m, self.echelle - retire)
        } else {
            Self::new(m * pow10(retire - self.echelle), 0)
        }
    }

    pub fn vers_rationnel(&self) -> BigRational {
        BigRational::new(self.mantisse.clone(), pow10(self.echelle))
    }

    /// r arrondi half-up à `echelle` chiffres après la virgule.
    pub fn depuis_rationnel(r: &BigRational, echelle: u32) -> Self {
        let n = r.numer() * pow10(echelle);
        Self::new(div_arrondi(&n, r.denom()), echelle)
    }

    /// self / autre à échelle fixe. None si autre == 0.
    pub fn diviser(&self, autre: &Self, echelle: u32) -> Option<Self> {
        if autre.is_zero() {
            return None;
        }
        let q = self.vers_rationnel() / autre.vers_rationnel();
        Some(Self::depuis_rationnel(&q, echelle))
    }

    /// self / autre à `chiffres` chiffres significatifs. None si autre == 0.
    pub fn diviser_significatif(&self, autre: &Self, chiffres: u32) -> Option<Self> {
        if autre.is_zero() {
            return None;
        }
        if self.is_zero() {
            return Some(Self::zero());
        }
        let ordre = self.ordre() - autre.ordre();
        let echelle = (i64::from(chiffres) + 2 - ordre).max(0) as u32;
        self.diviser(autre, echelle)
            .map(|q| q.arrondir_significatif(chiffres))
    }

    /// Puissance entière exacte (échelle multipliée par n).
    pub fn puissance_entiere(&self, n: u32) -> Self {
        Self::new(self.mantisse.pow(n), self.echelle * n)
    }

    /// Reste positif modulo un entier m > 0 (exact) : résultat dans [0, m).
    pub fn reste_positif(&self, m: &BigInt) -> Self {
        let module = m * pow10(self.echelle);
        let mut r = &self.mantisse % &module;
        if r.is_negative() {
            r += &module;
        }
        Self::new(r, self.echelle)
    }

    /// Valeur en virgule fixe : floor-vers-zéro(x * 10^p).
    pub fn vers_fixe(&self, p: u32) -> BigInt {
        if p >= self.echelle {
            &self.mantisse * pow10(p - self.echelle)
        } else {
            &self.mantisse / pow10(self.echelle - p)
        }
    }

    fn aligner(&self, autre: &Self) -> (BigInt, BigInt, u32) {
        let e = self.echelle.max(autre.echelle);
        (
            &self.mantisse * pow10(e - self.echelle),
            &autre.mantisse * pow10(e - autre.echelle),
            e,
        )
    }
}

impl From<BigInt> for Decimal {
    fn from(n: BigInt) -> Self {
        Self::new(n, 0)
    }
}

impl From<i64> for Decimal {
    fn from(n: i64) -> Self {
        Self::new(BigInt::from(n), 0)
    }
}

/* ------------------------ Comparaisons (par valeur) ------------------------ */

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b, _) = self.aligner(other);
        a.cmp(&b)
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

/* ------------------------ Arithmétique exacte ------------------------ */

impl Add for &Decimal {
    type Output = Decimal;

    fn add(self, rhs: &Decimal) -> Decimal {
        let (a, b, e) = self.aligner(rhs);
        Decimal::new(a + b, e)
    }
}

impl Sub for &Decimal {
    type Output = Decimal;

    fn sub(self, rhs: &Decimal) -> Decimal {
        let (a, b, e) = self.aligner(rhs);
        Decimal::new(a - b, e)
    }
}

impl Mul for &Decimal {
    type Output = Decimal;

    fn mul(self, rhs: &Decimal) -> Decimal {
        Decimal::new(&self.mantisse * &rhs.mantisse, self.echelle + rhs.echelle)
    }
}

impl Add for Decimal {
    type Output = Decimal;

    fn add(self, rhs: Decimal) -> Decimal {
        &self + &rhs
    }
}

impl Sub for Decimal {
    type Output = Decimal;

    fn sub(self, rhs: Decimal) -> Decimal {
        &self - &rhs
    }
}

impl Mul for Decimal {
    type Output = Decimal;

    fn mul(self, rhs: Decimal) -> Decimal {
        &self * &rhs
    }
}

impl Neg for Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        Decimal::new(-self.mantisse, self.echelle)
    }
}

impl Neg for &Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        Decimal::new(-&self.mantisse, self.echelle)
    }
}

/* ------------------------ Texte ------------------------ */

/// Rendu positionnel complet (jamais d’exposant), ex: "-0.0012", "1000".
impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let signe = if self.mantisse.is_negative() { "-" } else { "" };
        let mut chiffres = self.mantisse.magnitude().to_string();

        if self.echelle == 0 {
            return write!(f, "{signe}{chiffres}");
        }

        let e = self.echelle as usize;
        while chiffres.len() < e + 1 {
            chiffres.insert(0, '0');
        }
        let (ent, frac) = chiffres.split_at(chiffres.len() - e);
        write!(f, "{signe}{ent}.{frac}")
    }
}

/// Littéral décimal : [+-]chiffres[.chiffres][(e|E)[+-]chiffres]
/// (".5" et "1." acceptés ; "inf", "nan", "e" refusés).
impl FromStr for Decimal {
    type Err = LitteralInvalide;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalide = || LitteralInvalide(s.to_string());

        let (neg, reste) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };

        let (corps, exposant) = match reste.find(|c| c == 'e' || c == 'E') {
            Some(i) => (&reste[..i], Some(&reste[i + 1..])),
            None => (reste, None),
        };

        let (ent, frac) = corps.split_once('.').unwrap_or((corps, ""));
        if ent.is_empty() && frac.is_empty() {
            return Err(invalide());
        }
        let que_chiffres = |t: &str| t.bytes().all(|c| c.is_ascii_digit());
        if !que_chiffres(ent) || !que_chiffres(frac) {
            return Err(invalide());
        }

        let exp: i64 = match exposant {
            Some(t) => t.parse().map_err(|_| invalide())?,
            None => 0,
        };
        if exp.unsigned_abs() > MAX_EXPOSANT_LITTERAL.unsigned_abs() {
            return Err(invalide());
        }

        let chiffres = format!("{ent}{frac}");
        let mut m = BigInt::parse_bytes(chiffres.as_bytes(), 10).ok_or_else(invalide)?;
        if neg {
            m = -m;
        }

        let echelle = frac.len() as i64 - exp;
        if echelle >= 0 {
            Ok(Self::new(m, echelle as u32))
        } else {
            Ok(Self::new(m * pow10((-echelle) as u32), 0))
        }
    }
}
