use super::*;

#[test]
fn write_int() {
    expect_output(vec![inst!(1, WRITE, Int "42")], "42");
}

#[test]
fn write_bools() {
    expect_output(
        vec![inst!(1, WRITE, Bool "true"), inst!(2, WRITE, Bool "false")],
        "truefalse",
    );
}

#[test]
fn write_nil_is_empty() {
    expect_output(vec![inst!(1, WRITE, Nil "nil")], "");
}

#[test]
fn read_int() {
    let (result, output, _) = run_program(
        vec![
            inst!(1, DEFVAR, Var "GF@x"),
            inst!(2, READ, Var "GF@x", Type "int"),
            inst!(3, WRITE, Var "GF@x"),
        ],
        "42\n",
    );
    assert_eq!(result, Ok(0));
    assert_eq!(output, "42");
}

#[test]
fn read_int_parse_failure_yields_nil() {
    let (result, output, _) = run_program(
        vec![
            inst!(1, DEFVAR, Var "GF@x"),
            inst!(2, READ, Var "GF@x", Type "int"),
            inst!(3, DEFVAR, Var "GF@t"),
            inst!(4, TYPE, Var "GF@t", Var "GF@x"),
            inst!(5, WRITE, Var "GF@t"),
        ],
        "not a number\n",
    );
    assert_eq!(result, Ok(0));
    assert_eq!(output, "nil");
}

#[test]
fn read_bool_is_case_insensitive() {
    let (result, output, _) = run_program(
        vec![
            inst!(1, DEFVAR, Var "GF@x"),
            inst!(2, READ, Var "GF@x", Type "bool"),
            inst!(3, WRITE, Var "GF@x"),
        ],
        "TRUE\n",
    );
    assert_eq!(result, Ok(0));
    assert_eq!(output, "true");
}

#[test]
fn read_bool_anything_else_is_false() {
    let (result, output, _) = run_program(
        vec![
            inst!(1, DEFVAR, Var "GF@x"),
            inst!(2, READ, Var "GF@x", Type "bool"),
            inst!(3, WRITE, Var "GF@x"),
        ],
        "yes\n",
    );
    assert_eq!(result, Ok(0));
    assert_eq!(output, "false");
}

#[test]
fn read_string_strips_the_newline() {
    let (result, output, _) = run_program(
        vec![
            inst!(1, DEFVAR, Var "GF@x"),
            inst!(2, READ, Var "GF@x", Type "string"),
            inst!(3, WRITE, Var "GF@x"),
        ],
        "hello world\n",
    );
    assert_eq!(result, Ok(0));
    assert_eq!(output, "hello world");
}

#[test]
fn read_at_end_of_stream_yields_nil() {
    let (result, output, _) = run_program(
        vec![
            inst!(1, DEFVAR, Var "GF@x"),
            inst!(2, READ, Var "GF@x", Type "int"),
            inst!(3, DEFVAR, Var "GF@t"),
            inst!(4, TYPE, Var "GF@t", Var "GF@x"),
            inst!(5, WRITE, Var "GF@t"),
        ],
        "",
    );
    assert_eq!(result, Ok(0));
    assert_eq!(output, "nil");
}

#[test]
fn reads_consume_consecutive_lines() {
    let (result, output, _) = run_program(
        vec![
            inst!(1, DEFVAR, Var "GF@x"),
            inst!(2, READ, Var "GF@x", Type "int"),
            inst!(3, WRITE, Var "GF@x"),
            inst!(4, READ, Var "GF@x", Type "int"),
            inst!(5, WRITE, Var "GF@x"),
        ],
        "1\n2\n",
    );
    assert_eq!(result, Ok(0));
    assert_eq!(output, "12");
}

#[test]
fn read_with_unknown_type_text() {
    let (result, _, _) = run_program(
        vec![
            inst!(1, DEFVAR, Var "GF@x"),
            inst!(2, READ, Var "GF@x", Type "float"),
        ],
        "1.5\n",
    );
    assert_eq!(result, Err(Fault::BadStructure));
}

#[test]
fn dprint_goes_to_the_error_stream() {
    let (result, output, error) = run_program(vec![inst!(1, DPRINT, Int "5")], "");
    assert_eq!(result, Ok(0));
    assert_eq!(output, "");
    assert_eq!(error, "5");
}

#[test]
fn break_reports_state_on_the_error_stream() {
    let (result, output, error) = run_program(
        vec![inst!(1, PUSHS, Int "1"), inst!(2, BREAK)],
        "",
    );
    assert_eq!(result, Ok(0));
    assert_eq!(output, "");
    assert!(error.contains("data-stack=1"));
}

#[test]
fn type_of_literals() {
    expect_output(
        vec![
            inst!(1, DEFVAR, Var "GF@t"),
            inst!(2, TYPE, Var "GF@t", String "abc"),
            inst!(3, WRITE, Var "GF@t"),
            inst!(4, TYPE, Var "GF@t", Nil "nil"),
            inst!(5, WRITE, Var "GF@t"),
        ],
        "stringnil",
    );
}

#[test]
fn type_of_unassigned_variable_is_empty() {
    expect_output(
        vec![
            inst!(1, DEFVAR, Var "GF@x"),
            inst!(2, DEFVAR, Var "GF@t"),
            inst!(3, TYPE, Var "GF@t", Var "GF@x"),
            inst!(4, WRITE, Var "GF@t"),
        ],
        "",
    );
}

#[test]
fn type_of_undeclared_variable_still_faults() {
    expect_fault(
        vec![
            inst!(1, DEFVAR, Var "GF@t"),
            inst!(2, TYPE, Var "GF@t", Var "GF@missing"),
        ],
        Fault::NoVariable,
    );
}
