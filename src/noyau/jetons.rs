// src/noyau/jetons.rs
//
// Modèle de jetons + tokenisation
// -------------------------------
// L’entrée est déjà découpée par l’appelant : un lexème par mot séparé d’espaces
// (ex: "( 2 + 3 ) × sin ( 30 )"). Aucun re-découpage des espacements fautifs.
//
// Moins unaire : décidé localement, d’après le lexème BRUT précédent seulement.

use std::fmt;

use super::decimal::Decimal;
use super::erreur::{Erreur, Result};
use super::transcendantes::{constante_e, constante_pi};

/// Chiffres après la virgule portés par les constantes π et e.
pub const ECHELLE_CONSTANTES: u32 = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Assoc {
    Gauche,
    Droite,
}

/// Opérateurs binaires + parenthèses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Plus,
    Minus,
    Fois,
    Divise,
    Caret, // ^
    LPar,
    RPar,
}

/// Opérateurs unaires (toujours associatifs à droite).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unaire {
    Moins,       // moins préfixe (“minus”)
    Factorielle, // ! (postfixe)
    Racine,      // √
}

/// Fonctions à un argument (préfixes, collées à leur argument).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Ln,
    Sqrt,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(Decimal),
    Op(Op),
    Unaire(Unaire),
    Fonction(Fonction),
}

impl Op {
    /// Opérateurs binaires seulement (pas les parenthèses).
    fn binaire(s: &str) -> Option<Op> {
        match s {
            "+" => Some(Op::Plus),
            "-" => Some(Op::Minus),
            "×" => Some(Op::Fois),
            "÷" => Some(Op::Divise),
            "^" => Some(Op::Caret),
            _ => None,
        }
    }

    pub fn symbole(self) -> &'static str {
        match self {
            Op::Plus => "+",
            Op::Minus => "-",
            Op::Fois => "×",
            Op::Divise => "÷",
            Op::Caret => "^",
            Op::LPar => "(",
            Op::RPar => ")",
        }
    }
}

impl Unaire {
    pub fn symbole(self) -> &'static str {
        match self {
            Unaire::Moins => "minus",
            Unaire::Factorielle => "!",
            Unaire::Racine => "√",
        }
    }
}

impl Fonction {
    pub fn depuis_nom(s: &str) -> Option<Fonction> {
        match s {
            "sin" => Some(Fonction::Sin),
            "cos" => Some(Fonction::Cos),
            "tan" => Some(Fonction::Tan),
            "ln" => Some(Fonction::Ln),
            "√" => Some(Fonction::Sqrt),
            _ => None,
        }
    }

    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Sin => "sin",
            Fonction::Cos => "cos",
            Fonction::Tan => "tan",
            Fonction::Ln => "ln",
            Fonction::Sqrt => "√",
        }
    }
}

impl Tok {
    /// Rang de précédence (seul l’ordre relatif compte) :
    /// + - < × ÷ < moins unaire < ^ < fonctions, !, √
    pub fn precedence(&self) -> u8 {
        match self {
            Tok::Num(_) | Tok::Op(Op::LPar | Op::RPar) => 0,
            Tok::Op(Op::Plus | Op::Minus) => 1,
            Tok::Op(Op::Fois | Op::Divise) => 2,
            Tok::Unaire(Unaire::Moins) => 3,
            Tok::Op(Op::Caret) => 4,
            Tok::Unaire(Unaire::Factorielle | Unaire::Racine) | Tok::Fonction(_) => 5,
        }
    }

    pub fn assoc(&self) -> Assoc {
        match self {
            Tok::Op(Op::Caret) | Tok::Unaire(_) | Tok::Fonction(_) => Assoc::Droite,
            Tok::Num(_) | Tok::Op(_) => Assoc::Gauche,
        }
    }
}

impl fmt::Display for Tok {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tok::Num(v) => write!(f, "{}", v.normaliser()),
            Tok::Op(op) => f.write_str(op.symbole()),
            Tok::Unaire(u) => f.write_str(u.symbole()),
            Tok::Fonction(func) => f.write_str(func.nom()),
        }
    }
}

/// Tokenize une expression déjà espacée.
///
/// Pour chaque lexème, dans l’ordre :
/// 1. littéral décimal -> Num
/// 2. `e`, `π` -> Num (constantes)
/// 3. opérateur / parenthèse / `!` -> unaire ou binaire selon le lexème précédent
/// 4. nom de fonction -> Fonction
/// 5. sinon : Syntax ERROR (“unrecognised token”)
pub fn tokenize(s: &str) -> Result<Vec<Tok>> {
    let lexemes: Vec<&str> = s.split_whitespace().collect();
    let mut out = Vec::with_capacity(lexemes.len());

    for (i, x) in lexemes.iter().enumerate() {
        let precedent = i.checked_sub(1).map(|j| lexemes[j]);
        out.push(lire_lexeme(x, precedent)?);
    }

    Ok(out)
}

fn lire_lexeme(x: &str, precedent: Option<&str>) -> Result<Tok> {
    if let Ok(v) = x.parse::<Decimal>() {
        return Ok(Tok::Num(v));
    }

    match x {
        "e" => return Ok(Tok::Num(constante_e(ECHELLE_CONSTANTES))),
        "π" => return Ok(Tok::Num(constante_pi(ECHELLE_CONSTANTES))),
        "(" => return Ok(Tok::Op(Op::LPar)),
        ")" => return Ok(Tok::Op(Op::RPar)),
        "!" => return Ok(Tok::Unaire(Unaire::Factorielle)),
        "minus" => return Ok(Tok::Unaire(Unaire::Moins)),
        _ => {}
    }

    if let Some(op) = Op::binaire(x) {
        // unaire : premier lexème, après "(" ou après un autre opérateur
        let unaire = match precedent {
            None => true,
            Some(p) => p == "(" || Op::binaire(p).is_some(),
        };
        return match (unaire, op) {
            (false, _) => Ok(Tok::Op(op)),
            (true, Op::Minus) => Ok(Tok::Unaire(Unaire::Moins)),
            (true, _) => Err(Erreur::syntaxe(format!("misplaced operator: '{x}'"))),
        };
    }

    if let Some(f) = Fonction::depuis_nom(x) {
        return Ok(Tok::Fonction(f));
    }

    Err(Erreur::syntaxe(format!("unrecognised token: '{x}'")))
}

/// Format utilitaire (démarche) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    tokens
        .iter()
        .map(Tok::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
