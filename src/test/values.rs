use super::*;
use crate::value::decode_escapes;

#[test]
fn parse_int_with_sign() {
    assert_eq!(Value::parse(ArgType::Int, "-3"), Ok(Value::Int(-3)));
    assert_eq!(Value::parse(ArgType::Int, "+5"), Ok(Value::Int(5)));
}

#[test]
fn parse_int_rejects_garbage() {
    assert_eq!(Value::parse(ArgType::Int, "12a"), Err(Fault::BadStructure));
    assert_eq!(Value::parse(ArgType::Int, ""), Err(Fault::BadStructure));
}

#[test]
fn parse_bool_is_case_insensitive() {
    assert_eq!(Value::parse(ArgType::Bool, "TRUE"), Ok(Value::Bool(true)));
    assert_eq!(Value::parse(ArgType::Bool, "false"), Ok(Value::Bool(false)));
    // Anything other than `true` is false rather than a fault.
    assert_eq!(Value::parse(ArgType::Bool, "1"), Ok(Value::Bool(false)));
}

#[test]
fn parse_nil_is_strict() {
    assert_eq!(Value::parse(ArgType::Nil, "nil"), Ok(Value::Nil));
    assert_eq!(Value::parse(ArgType::Nil, "NIL"), Err(Fault::BadStructure));
}

#[test]
fn escapes_decode_to_code_points() {
    assert_eq!(decode_escapes("a\\010b"), "a\nb");
    assert_eq!(decode_escapes("\\092"), "\\");
    assert_eq!(decode_escapes("\\065\\066"), "AB");
}

#[test]
fn escapes_shorter_than_three_digits_pass_through() {
    assert_eq!(decode_escapes("a\\12"), "a\\12");
    assert_eq!(decode_escapes("\\"), "\\");
}

#[test]
fn escape_consumes_exactly_three_digits() {
    assert_eq!(decode_escapes("\\0651"), "A1");
}

#[test]
fn display_of_uninitialised_value() {
    assert_eq!(Value::Uninit.display(), Err(Fault::NoValue));
}

#[test]
fn type_names() {
    assert_eq!(Value::Int(1).type_name(), "int");
    assert_eq!(Value::Nil.type_name(), "nil");
    assert_eq!(Value::Uninit.type_name(), "");
}

#[test]
fn equality_rules() {
    assert_eq!(Value::Nil.equals(&Value::Nil), Ok(true));
    assert_eq!(Value::Nil.equals(&Value::Int(1)), Ok(false));
    assert_eq!(Value::Int(1).equals(&Value::Nil), Ok(false));
    assert_eq!(
        Value::Int(1).equals(&Value::Bool(true)),
        Err(Fault::BadType)
    );
    assert_eq!(
        Value::Uninit.equals(&Value::Nil),
        Err(Fault::NoValue)
    );
}

#[test]
fn ordering_rules() {
    assert_eq!(Value::Int(1).less(&Value::Int(2)), Ok(true));
    assert_eq!(
        Value::String("b".to_string()).greater(&Value::String("a".to_string())),
        Ok(true)
    );
    assert_eq!(Value::Nil.less(&Value::Nil), Err(Fault::BadType));
    assert_eq!(
        Value::Int(1).less(&Value::String("2".to_string())),
        Err(Fault::BadType)
    );
}
