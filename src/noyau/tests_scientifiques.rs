//! Tests scientifiques (campagne) : invariants + robustesse + limites contrôlées.
//!
//! But : trouver les limites sans faire chauffer la machine.
//! - budget temps global
//! - tailles bornées (profondeur, longueur)
//!
//! Notes :
//! - Les fonctions sont arrondies à 30 décimales : les identités (sin² + cos² = 1,
//!   ln(e^x) = x…) sont vérifiées à une tolérance près, pas à l’égalité.
//! - Les angles remarquables (30°, 90°, 180°…) tombent juste après réduction modulo 360.

use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;

use super::decimal::Decimal;
use super::erreur::Erreur;
use super::evaluate;

fn eval_ok(expr: &str) -> Decimal {
    evaluate(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn eval_err(expr: &str) -> Erreur {
    match evaluate(expr) {
        Ok(v) => panic!("expr={expr:?} devait échouer, a donné {v}"),
        Err(e) => e,
    }
}

fn assert_exact_eq(expr: &str, attendu: &str) {
    assert_eq!(eval_ok(expr).to_string(), attendu, "expr={expr:?}");
}

/// |expr - attendu| < 10^-28
fn assert_proche(expr: &str, attendu: &str) {
    let v = eval_ok(expr);
    let a: Decimal = attendu.parse().unwrap_or_else(|e| panic!("{e}"));
    let tolerance: Decimal = "1e-28".parse().unwrap_or_else(|e| panic!("{e}"));
    assert!((&v - &a).abs() < tolerance, "expr={expr:?} v={v} attendu={attendu}");
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Arithmétique décimale exacte ------------------------ */

#[test]
fn sci_decimal_sans_erreur_binaire() {
    assert_exact_eq("0.1 + 0.2", "0.3");
    assert_exact_eq("1.1 × 1.1", "1.21");
    assert_exact_eq("0.3 - 0.1 - 0.2", "0");
    assert_exact_eq("1 ÷ 4", "0.25");
}

#[test]
fn sci_division_bornee_a_30_decimales() {
    assert_exact_eq("1 ÷ 3 × 3", &format!("0.{}", "9".repeat(30)));
    assert_exact_eq("1 ÷ 7", "0.142857142857142857142857142857");
}

#[test]
fn sci_commutativite_associativite() {
    for (a, b) in [("2.5 + 7.25", "7.25 + 2.5"), ("3 × 0.7", "0.7 × 3")] {
        assert_eq!(eval_ok(a), eval_ok(b), "{a} / {b}");
    }
    assert_eq!(eval_ok("( 1.5 + 2.5 ) + 3"), eval_ok("1.5 + ( 2.5 + 3 )"));
    assert_eq!(eval_ok("( 2 × 3 ) × 4.5"), eval_ok("2 × ( 3 × 4.5 )"));
}

/* ------------------------ Trigonométrie (degrés) ------------------------ */

#[test]
fn sci_identites_symetrie() {
    // sin(-x) = -sin(x)
    assert_exact_eq("sin ( - 30 )", "-0.5");
    assert_eq!(eval_ok("sin ( - 37 )"), -eval_ok("sin ( 37 )"));

    // cos(-x) = cos(x)
    assert_exact_eq("cos ( - 60 )", "0.5");
    assert_eq!(eval_ok("cos ( - 37 )"), eval_ok("cos ( 37 )"));
}

#[test]
fn sci_periodicite_angles() {
    assert_exact_eq("sin ( 390 )", "0.5");
    assert_exact_eq("cos ( 420 )", "0.5");
    assert_eq!(eval_ok("sin ( 37 + 720 )"), eval_ok("sin ( 37 )"));
    assert_exact_eq("tan ( 225 )", "1");
}

#[test]
fn sci_angles_exacts() {
    assert_exact_eq("sin ( 180 )", "0");
    assert_exact_eq("cos ( 90 )", "0");
    assert_exact_eq("cos ( 0 )", "1");
    assert_exact_eq("sin ( 270 )", "-1");
}

#[test]
fn sci_poles_tangente() {
    for a in ["90", "270", "- 90", "450"] {
        let e = eval_err(&format!("tan ( {a} )"));
        assert_eq!(e, Erreur::syntaxe("division by zero"), "tan({a})");
    }
}

#[test]
fn sci_pythagore() {
    assert_proche("sin ( 37 ) ^ 2 + cos ( 37 ) ^ 2", "1");
    assert_proche("sin ( 123.456 ) ^ 2 + cos ( 123.456 ) ^ 2", "1");
}

/* ------------------------ ln / puissances ------------------------ */

#[test]
fn sci_ln_exp() {
    assert_exact_eq("ln ( e )", "1");
    assert_exact_eq("ln ( 1 )", "0");
    assert_proche("ln ( e ^ 2 )", "2");
    assert_proche("ln ( 2 ) + ln ( 5 ) - ln ( 10 )", "0");
}

#[test]
fn sci_puissances_reelles() {
    assert_proche("2 ^ 0.5 × 2 ^ 0.5", "2");
    assert_proche("√ 2 ^ 2", "2");
    assert_proche("8 ^ ( 1 ÷ 3 )", "2");
}

#[test]
fn sci_puissances_entieres_exactes() {
    assert_eq!(eval_ok("2 ^ 1000").to_string().len(), 302);
    assert_exact_eq("0.5 ^ 10", "0.0009765625");
    assert_exact_eq("( - 2 ) ^ 11", "-2048");
}

#[test]
fn sci_factorielles() {
    assert_exact_eq("0 !", "1");
    assert_exact_eq("20 !", "2432902008176640000");
    assert_exact_eq("3 ! !", "720");
}

/* ------------------------ Erreurs : catégorie ------------------------ */

#[test]
fn sci_campagne_erreurs() {
    let syntaxe = [
        "",
        "( )",
        "2 3",
        "2 +",
        "× 2",
        "( 2 + 3",
        "2 + 3 )",
        "sin",
        "!",
        "2 ** 3",
        "tan ( 90 )",
    ];
    for s in syntaxe {
        assert!(eval_err(s).est_syntaxe(), "expr={s:?} devait être Syntax ERROR");
    }

    let math = [
        "1 ÷ 0",
        "1 ÷ ( 2 - 2 )",
        "ln ( 0 )",
        "ln ( - 1 )",
        "√ ( - 4 )",
        "( - 3 ) !",
        "2.5 !",
        "10001 !",
        "( - 8 ) ^ 0.5",
        "10 ^ 20000",
        "2 ^ 2147483638",
    ];
    for s in math {
        assert!(eval_err(s).est_math(), "expr={s:?} devait être Math ERROR");
    }
}

#[test]
fn sci_sous_depassement_vers_zero() {
    assert_exact_eq("10 ^ - 20000", "0");
    assert_exact_eq("0.1 ^ 20000", "0");
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_taille_somme_safe() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let expr = vec!["0.5"; 2000].join(" + ");
    budget(t0, max);

    assert_exact_eq(&expr, "1000");
    budget(t0, max);
}

#[test]
fn sci_stress_profondeur_parentheses() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    // pile explicite : pas de récursion, profondeur sans risque
    let n = 500;
    let expr = format!("{} 1 {}", "( ".repeat(n), " )".repeat(n));
    assert_exact_eq(&expr, "1");

    let moins = format!("{}7", "- ".repeat(301));
    assert_exact_eq(&moins, "-7");
    budget(t0, max);
}

#[test]
fn sci_stress_bigint_safe() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let big = "9".repeat(100);
    let v = eval_ok(&format!("{big} + 1"));
    assert_eq!(v.to_string(), format!("1{}", "0".repeat(100)));

    let _ = eval_ok("1000 !");
    let _ = eval_ok("3 ^ 12345");
    budget(t0, max);
}

#[test]
fn sci_determinisme() {
    let expr = "sin ( 12.5 ) × ln ( 7 ) ÷ 3 + 2 ^ 0.3";
    let a = eval_ok(expr);
    for _ in 0..5 {
        assert_eq!(eval_ok(expr), a);
    }
}
