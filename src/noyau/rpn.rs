// src/noyau/rpn.rs
//
// Shunting-yard -> RPN
// Objectif:
// - Convertir une suite de Tok (infixe) en RPN (postfix) avec une pile d’opérateurs
//
// Règles:
// - Num          => sortie directe
// - Fonction, (  => empilés sans condition
// - )            => dépile jusqu’à "(" (jetée) ; pile vide avant => “unopened parenthesis”
// - moins/√ préfixes => empilés sans dépiler (aucun opérande gauche à fermer)
// - autres opérateurs => dépile tant que le sommet n’est pas "(" et que
//   prec(sommet) > prec(jeton), ou prec égale et jeton associatif à gauche
//
// NOTE:
// - Une "(" restée dans la pile à la fin est recopiée telle quelle :
//   l’évaluateur la signale (“unclosed parenthesis”).

use super::erreur::{Erreur, Result};
use super::jetons::{Assoc, Op, Tok, Unaire};

/// Le sommet doit-il sortir avant d’empiler `entrant` ?
fn doit_depiler(sommet: &Tok, entrant: &Tok) -> bool {
    if matches!(sommet, Tok::Op(Op::LPar)) {
        return false;
    }
    let p_sommet = sommet.precedence();
    let p_entrant = entrant.precedence();

    p_sommet > p_entrant || (p_sommet == p_entrant && entrant.assoc() == Assoc::Gauche)
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Fonction(Sin), LPar, Num(30), RPar, Plus, Num(1)]
///   rpn:    [Num(30), Fonction(Sin), Num(1), Plus]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>> {
    let mut out: Vec<Tok> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Tok> = Vec::new();

    for tok in tokens.iter().cloned() {
        match tok {
            Tok::Num(_) => out.push(tok),

            Tok::Fonction(_) | Tok::Op(Op::LPar) | Tok::Unaire(Unaire::Moins | Unaire::Racine) => {
                ops.push(tok)
            }

            Tok::Op(Op::RPar) => loop {
                match ops.pop() {
                    None => return Err(Erreur::syntaxe("unopened parenthesis")),
                    Some(Tok::Op(Op::LPar)) => break,
                    Some(t) => out.push(t),
                }
            },

            Tok::Op(_) | Tok::Unaire(Unaire::Factorielle) => {
                while ops.last().is_some_and(|sommet| doit_depiler(sommet, &tok)) {
                    if let Some(t) = ops.pop() {
                        out.push(t);
                    }
                }
                ops.push(tok);
            }
        }
    }

    // vide la pile ops (ordre de dépilement)
    while let Some(op) = ops.pop() {
        out.push(op);
    }

    Ok(out)
}
