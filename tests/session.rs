//! Workbench session behaviour driven through submitted lines

use std::fs;

use bigdecimal::BigDecimal;
use dicelisp::lisp::{Interpreter, Value};
use dicelisp::session::{Session, ROOT_CONTEXT};
use tempfile::TempDir;

fn session_in(dir: &TempDir) -> Session {
    Session::new(Interpreter::new(dir.path()))
}

#[test]
fn test_import_module_into_context() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("combat.lisp"),
        "(module combat (attack))
         (def attack (lambda (bonus) (list/first (roll (text/concat '+ 1d20 ' (number/text bonus))))))",
    )
    .unwrap();

    let mut session = session_in(&dir);
    session.submit("(swap 'fight')");
    assert_eq!(session.submit("(import 'combat.lisp')"), Some(Value::text("loaded")));

    let Some(Value::Number(n)) = session.submit("(combat/attack 5)") else {
        panic!("attack should roll a number");
    };
    assert!(n >= BigDecimal::from(6) && n <= BigDecimal::from(25));

    session.submit(&format!("(swap '{}')", ROOT_CONTEXT));
    assert_eq!(session.submit("combat/attack"), Some(Value::atom("combat/attack")));
}

#[test]
fn test_import_alias() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("util.lisp"),
        "(module util (double)) (def double (lambda (x) (number/mul x 2)))",
    )
    .unwrap();

    let mut session = session_in(&dir);
    session.submit("(import 'util.lisp' u)");
    assert_eq!(session.submit("(u/double 21)"), Some(Value::int(42)));
}

#[test]
fn test_output_keeps_errors_visible() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir);
    session.submit("(number/div 1 0)");
    session.submit("(import 'missing.lisp')");
    assert_eq!(session.output()[0], "(error 'division by zero')");
    assert!(session.output()[1].starts_with("(error 'import failed:"));
}

#[test]
fn test_scripted_workflow() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("setup.lisp");
    fs::write(
        &script,
        "(swap 'party')\n(def hp 12)\n(log (text/concat 'hp=' (number/text hp)))\n",
    )
    .unwrap();

    let mut session = session_in(&dir);
    let results = session.run_file(&script).unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(session.active_context(), "party");
    assert_eq!(session.console(), ["hp=12"]);
    assert_eq!(session.submit("hp"), Some(Value::int(12)));
}

#[test]
fn test_quit_ends_session() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir);
    session.submit("(number/add 1 2) (quit)");
    assert!(!session.is_running());
    assert!(session.output().is_empty());
}
