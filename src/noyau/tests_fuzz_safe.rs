//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - proptest (cas bornés, profondeur bornée)
//! - balayage exhaustif des courtes suites de lexèmes, sous budget temps
//! - invariant clé : jamais de panique, toute erreur est Syntax ou Math
//!   avec une raison non vide

use std::time::{Duration, Instant};

use proptest::prelude::*;

use super::decimal::Decimal;
use super::format::{parse_decimal, ConfigAffichage};
use super::evaluate;

/// Alphabet complet des lexèmes reconnus (+ quelques intrus).
const LEXEMES: [&str; 22] = [
    "0", "1", "2", "0.5", "-3", "π", "e", "+", "-", "×", "÷", "^", "(", ")", "!", "√", "sin",
    "cos", "tan", "ln", "minus", "x",
];

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/// Évalue et vérifie la forme de l’erreur éventuelle.
fn check(expr: &str) {
    if let Err(e) = evaluate(expr) {
        assert!(e.est_syntaxe() || e.est_math(), "expr={expr:?}");
        assert!(!e.raison().is_empty(), "raison vide pour expr={expr:?}");
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn atome() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..20).prop_map(|n| n.to_string()),
        (0u32..1000, 1u32..4).prop_map(|(n, s)| format!("{}.{:0w$}", n / 10, n % 10, w = s as usize)),
        Just("π".to_string()),
        Just("e".to_string()),
    ]
}

/// Expressions bien formées (sans tan : ses pôles sont des Syntax ERROR).
fn expression() -> impl Strategy<Value = String> {
    atome().prop_recursive(3, 24, 2, |inner| {
        prop_oneof![
            (inner.clone(), prop::sample::select(vec!["+", "-", "×", "÷", "^"]), inner.clone())
                .prop_map(|(a, op, b)| format!("( {a} {op} {b} )")),
            (prop::sample::select(vec!["sin", "cos", "ln", "√"]), inner.clone())
                .prop_map(|(f, a)| format!("{f} ( {a} )")),
            inner.clone().prop_map(|a| format!("( {a} ) !")),
            inner.prop_map(|a| format!("- {a}")),
        ]
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn fuzz_texte_arbitraire_sans_panique(s in "\\PC{0,40}") {
        check(&s);
    }

    #[test]
    fn fuzz_suites_de_lexemes(v in prop::collection::vec(prop::sample::select(LEXEMES.to_vec()), 0..12)) {
        check(&v.join(" "));
    }

    #[test]
    fn fuzz_bien_forme_jamais_syntaxe(expr in expression()) {
        if let Err(e) = evaluate(&expr) {
            prop_assert!(e.est_math(), "expr={} err={}", expr, e);
        }
    }

    #[test]
    fn fuzz_deterministe(expr in expression()) {
        prop_assert_eq!(evaluate(&expr), evaluate(&expr));
    }

    #[test]
    fn entiers_comme_i128(a in -1_000_000i64..1_000_000, b in -1_000_000i64..1_000_000) {
        let somme = evaluate(&format!("{a} + {b}")).map(|v| v.to_string());
        prop_assert_eq!(somme, Ok((i128::from(a) + i128::from(b)).to_string()));

        let produit = evaluate(&format!("{a} × {b}")).map(|v| v.to_string());
        prop_assert_eq!(produit, Ok((i128::from(a) * i128::from(b)).to_string()));
    }

    /* ------------------------ Formatage ------------------------ */

    #[test]
    fn format_court_inchange(m in -999_999_999i64..999_999_999, s in 0u32..4) {
        let v = Decimal::new(m.into(), s);
        prop_assert_eq!(ConfigAffichage::default().format(&v), v.to_string());
    }

    #[test]
    fn format_idempotent_troncature(m: i64, s in 12u32..24) {
        let c = ConfigAffichage::default();
        let a = c.format(&Decimal::new(m.into(), s));
        let b = c.format(&parse_decimal(&a).map_err(|e| TestCaseError::fail(e.to_string()))?);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn format_idempotent_scientifique(m in 1i64..i64::MAX, zeros in 0u32..30, neg: bool) {
        // entiers ≥ 10^13 : toujours trop longs pour 13 caractères
        let mut v = Decimal::from(m) * Decimal::new(super::decimal::pow10(zeros + 13), 0);
        if neg {
            v = -v;
        }
        let c = ConfigAffichage::default();
        let a = c.format(&v);
        prop_assert!(a.contains('e'), "a={}", a);
        let b = c.format(&parse_decimal(&a).map_err(|e| TestCaseError::fail(e.to_string()))?);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn format_respecte_la_longueur_en_scientifique(m in 1i64..i64::MAX, zeros in 0u32..400) {
        let v = Decimal::from(m) * Decimal::new(super::decimal::pow10(zeros + 13), 0);
        let a = ConfigAffichage::default().format(&v);
        // "d.ddddddde" + exposant ≤ 3 chiffres
        prop_assert!(a.chars().count() <= 14, "a={}", a);
    }
}

/* ------------------------ Balayage exhaustif (court) ------------------------ */

#[test]
fn fuzz_balayage_paires_et_triplets() {
    let t0 = Instant::now();
    let max = Duration::from_secs(10);

    for a in LEXEMES {
        for b in LEXEMES {
            check(&format!("{a} {b}"));
            for c in ["1", ")", "!", "^", "ln"] {
                check(&format!("{a} {b} {c}"));
            }
        }
        budget(t0, max);
    }
}
