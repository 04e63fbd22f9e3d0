use std::fs;

use engscript::{
    Session,
    config::Config,
    error::{Error, RuntimeError, SyntaxError},
    get_result,
    interpreter::value::core::Value,
    run,
};
use walkdir::WalkDir;

#[test]
fn example_scripts_produce_expected_output() {
    let mut count = 0;

    let scripts = WalkDir::new("tests/scripts").sort_by_file_name()
                                               .into_iter()
                                               .filter_map(Result::ok)
                                               .filter(|e| e.path().extension().is_some_and(|ext| ext == "eng"));

    for entry in scripts {
        let path = entry.path();
        let script =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected_path = path.with_extension("out");
        let expected = fs::read_to_string(&expected_path)
            .unwrap_or_else(|e| panic!("Failed to read {expected_path:?}: {e}"));

        count += 1;
        let config = Config::default().with_source_name(path.display().to_string());
        let mut session = Session::new(config);
        let mut printed: Vec<Value> = Vec::new();
        let result = session.execute(&script, &mut printed);

        let mut actual: String = printed.iter().map(|value| format!("{value}\n")).collect();
        if let Err(error) = result {
            actual.push_str(&error.render(&session.config().source_name, None));
            actual.push('\n');
        }
        assert_eq!(actual, expected, "script {path:?} printed unexpected output");
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}

fn assert_output(src: &str, expected: &[&str]) {
    match get_result(&Config::default(), src) {
        Ok(lines) => assert_eq!(lines, expected, "for script:\n{src}"),
        Err(e) => panic!("Script failed: {e}"),
    }
}

fn failure(src: &str) -> Error {
    match run(src) {
        Ok(printed) => panic!("Script succeeded but was expected to fail, printed {printed:?}"),
        Err(e) => e,
    }
}

#[test]
fn integer_arithmetic() {
    assert_output("OUTPUT[ 7 ADD 5 ]", &["12"]);
    assert_output("OUTPUT[ 7 MINUS 5 ]", &["2"]);
    assert_output("OUTPUT[ 7 MULTIPLY 5 ]", &["35"]);
    assert_output("OUTPUT[ 10 DIVIDE 4 ]", &["2.5"]);
    assert_output("OUTPUT[ 10 DIVIDE 5 ]", &["2"]);
    assert_output("OUTPUT[ 1.5 ADD 1.5 ]", &["3"]);
}

#[test]
fn precedence_and_parentheses() {
    assert_output("OUTPUT[ 5 MULTIPLY (5 DIVIDE 2) ]", &["12.5"]);
    assert_output("OUTPUT[ 2 ADD 3 MULTIPLY 4 ]", &["14"]);
    assert_output("OUTPUT[ (2 ADD 3) MULTIPLY 4 ]", &["20"]);
    assert_output("OUTPUT[ 10 MINUS 4 MINUS 3 ]", &["3"]);
}

#[test]
fn unary_operators() {
    assert_output("OUTPUT[ -3 ADD 1 ]", &["-2"]);
    assert_output("OUTPUT[ MINUS MINUS 4 ]", &["4"]);
    assert_output("OUTPUT[ ADD 4 ]", &["4"]);
    assert_output("x EQUALS 2\nOUTPUT[ 1 - x ]", &["-1"]);
}

#[test]
fn division_by_zero_points_at_the_divisor() {
    let err = failure("OUTPUT[ 1 DIVIDE 0 ]");
    assert!(matches!(err, Error::Runtime(RuntimeError::DivisionByZero { .. })));
    assert_eq!(err.span().start.column, 17);
    assert_eq!(err.render("<shell>", Some(0)),
               "                 ^\nRuntime error: Division by zero\nFile <shell>, line 1");

    let err = failure("OUTPUT[ 4 DIVIDE (2 MINUS 2) ]");
    assert_eq!(err.span().start.column, 17);
    assert_eq!(err.span().columns(), 11);
}

#[test]
fn variables_are_overwritten_not_shadowed() {
    assert_output("x EQUALS 9\nOUTPUT[ x ]", &["9"]);
    assert_output("x EQUALS 9\nx EQUALS x ADD 1\nOUTPUT[ x ]", &["10"]);
    assert_output("x EQUALS 1\nIF 1 SAMEAS 1 [ x EQUALS 2 ]\nOUTPUT[ x ]", &["2"]);
}

#[test]
fn undefined_variables_are_errors() {
    let err = failure("OUTPUT[ y ADD 1 ]");
    assert_eq!(err.render("prog", None),
               "Runtime error: No variable with name y defined\nFile prog, line 1");
}

#[test]
fn string_operations() {
    assert_output("OUTPUT[ LENGTH \"hello\" ]", &["5"]);
    assert_output("OUTPUT[ \"a\" JOIN \"b\" ]", &["ab"]);
    assert_output("OUTPUT[ \"ab\" MULTIPLY 3 ]", &["ababab"]);
    assert_output("OUTPUT[ 3 MULTIPLY \"ab\" ]", &["ababab"]);
    assert_output("s EQUALS \"ab\"\nOUTPUT[ s MULTIPLY 2 ]", &["abab"]);
    assert_output("s EQUALS \"ab\"\nOUTPUT[ 2 MULTIPLY s ]", &["abab"]);
    assert_output("OUTPUT[ LENGTH \"ab\" JOIN \"cd\" ]", &["4"]);
    assert_output("OUTPUT[ \"tab\\there\" ]", &["tab\there"]);
    assert_output("OUTPUT[ \"ab\" MULTIPLY -1 ]", &[""]);
}

#[test]
fn string_errors() {
    let err = failure("OUTPUT[ \"a\" JOIN 1 ]");
    assert_eq!(err.to_string(), "You can only join strings together");

    let err = failure("s EQUALS \"a\"\nOUTPUT[ s ADD 1 ]");
    assert!(matches!(err, Error::Runtime(RuntimeError::StringArithmetic { .. })));

    let err = failure("OUTPUT[ \"a\" MULTIPLY 1.5 ]");
    assert_eq!(err.to_string(), "Cannot repeat a string 1.5 times");

    let err = failure("OUTPUT[ LENGTH 5 ]");
    assert!(matches!(err, Error::Runtime(RuntimeError::LengthOfNonString { .. })));
}

#[test]
fn string_comparisons_use_length_for_ordering() {
    assert_output("OUTPUT[ \"ab\" LESSTHAN \"abc\" ]", &["true"]);
    assert_output("OUTPUT[ \"zz\" MORETHAN \"aaa\" ]", &["false"]);
    assert_output("OUTPUT[ \"ab\" SAMEAS \"ab\" ]", &["true"]);
    assert_output("OUTPUT[ \"ab\" SAMEAS \"ba\" ]", &["false"]);
    assert_output("OUTPUT[ \"ab\" NOTSAMEAS \"ba\" ]", &["true"]);
}

#[test]
fn numeric_comparisons() {
    assert_output("OUTPUT[ 1 LESSTHAN 2 ]", &["true"]);
    assert_output("OUTPUT[ 2 LESSEQUALS 2 ]", &["true"]);
    assert_output("OUTPUT[ 2 MOREEQUALS 3 ]", &["false"]);
    assert_output("OUTPUT[ 1 ADD 1 SAMEAS 2 ]", &["true"]);
    assert_output("OUTPUT[ 1 LESSTHAN 2 SAMEAS (3 LESSTHAN 4) ]", &["true"]);
}

#[test]
fn comparing_different_types_fails() {
    let err = failure("OUTPUT[ 1 SAMEAS \"1\" ]");
    assert_eq!(err.to_string(), "Cannot compare Number and String");
}

#[test]
fn booleans_reject_arithmetic() {
    let err = failure("OUTPUT[ (1 SAMEAS 1) ADD 1 ]");
    assert!(matches!(err, Error::Runtime(RuntimeError::BooleanArithmetic { .. })));

    let err = failure("b EQUALS 1 LESSTHAN 2\nOUTPUT[ -b ]");
    assert!(matches!(err, Error::Runtime(RuntimeError::BooleanArithmetic { .. })));
}

#[test]
fn conditionals_run_exactly_one_branch() {
    assert_output("IF 1 LESSTHAN 2 [ OUTPUT[ \"yes\" ] ] ELSE [ OUTPUT[ \"no\" ] ]", &["yes"]);
    assert_output("IF 2 LESSTHAN 1 [ OUTPUT[ \"yes\" ] ] ELSE [ OUTPUT[ \"no\" ] ]", &["no"]);
    assert_output("x EQUALS 5\nIF x LESSTHAN 3 [ OUTPUT[ 1 ] ] ELSEIF x LESSTHAN 6 [ OUTPUT[ 2 ] ] \
                   ELSEIF x LESSTHAN 9 [ OUTPUT[ 3 ] ] ELSE [ OUTPUT[ 4 ] ]",
                  &["2"]);
    assert_output("IF 2 LESSTHAN 1 [ OUTPUT[ 1 ] ]\nOUTPUT[ 0 ]", &["0"]);
}

#[test]
fn conditions_must_be_booleans() {
    let err = failure("IF 1 [ OUTPUT[ 1 ] ]");
    assert_eq!(err.to_string(), "Condition must be a Boolean, found Number");
}

#[test]
fn for_loops_exclude_the_upper_bound() {
    assert_output("FOR i FROM 0 TO 3 [ OUTPUT[ i ] ]", &["0", "1", "2"]);
    assert_output("FOR i FROM 5 TO 5 [ OUTPUT[ i ] ]\nOUTPUT[ \"done\" ]", &["done"]);
    assert_output("FOR i FROM 5 TO 2 [ OUTPUT[ i ] ]\nOUTPUT[ i ]", &["5"]);
    assert_output("FOR i FROM 0.5 TO 2 [ OUTPUT[ i ] ]", &["0.5", "1.5"]);
}

#[test]
fn loop_variable_persists_and_is_shared() {
    assert_output("FOR i FROM 0 TO 3 [ x EQUALS i ]\nOUTPUT[ i ]\nOUTPUT[ x ]", &["3", "2"]);
    assert_output("FOR i FROM 0 TO 10 [\n  OUTPUT[ i ]\n  i EQUALS i ADD 4\n]", &["0", "5"]);
}

#[test]
fn loop_counter_that_cannot_grow_is_an_error() {
    let err = failure("FOR i FROM 9007199254740991 ADD 1 TO 9007199254740991 MULTIPLY 2 [ ]");
    assert_eq!(err.to_string(), "Loop variable i cannot count past 9007199254740992");

    let err = failure("FOR i FROM 0 TO 1 [ i EQUALS 0 MINUS 9007199254740991 MULTIPLY 4 ]");
    assert!(matches!(err, Error::Runtime(RuntimeError::LoopCounterStuck { .. })));

    assert_output("FOR i FROM 9007199254740989 TO 9007199254740991 [ OUTPUT[ i ] ]",
                  &["9007199254740989", "9007199254740990"]);
}

#[test]
fn nested_loops() {
    let src = "FOR i FROM 0 TO 2 [\n  FOR j FROM 0 TO 2 [\n    OUTPUT[ i MULTIPLY 10 ADD j ]\n  ]\n]";
    assert_output(src, &["0", "1", "10", "11"]);
}

#[test]
fn break_stops_the_loop_immediately() {
    assert_output("FOR i FROM 0 TO 10 [\n  IF i SAMEAS 2 [ BREAK ]\n  OUTPUT[ i ]\n]", &["0", "1"]);
    assert_output("FOR i FROM 0 TO 10 [\n  OUTPUT[ i ]\n  BREAK\n  OUTPUT[ \"never\" ]\n]\nOUTPUT[ i ]",
                  &["0", "0"]);
}

#[test]
fn break_only_leaves_the_innermost_loop() {
    let src = "FOR i FROM 0 TO 2 [\n  FOR j FROM 0 TO 5 [\n    IF j SAMEAS 1 [ BREAK ]\n    OUTPUT[ i ADD j ]\n  ]\n]";
    assert_output(src, &["0", "1"]);
}

#[test]
fn break_outside_a_loop_is_an_error() {
    let err = failure("BREAK");
    assert_eq!(err.to_string(), "BREAK outside of a FOR loop");

    let err = failure("IF 1 LESSTHAN 2 [ BREAK ]");
    assert!(matches!(err, Error::Runtime(RuntimeError::BreakOutsideLoop { .. })));
}

#[test]
fn first_error_stops_the_program() {
    let config = Config::default();
    let mut session = Session::new(config);
    let mut printed: Vec<Value> = Vec::new();

    let result = session.execute("OUTPUT[ 1 ]\nOUTPUT[ 1 DIVIDE 0 ]\nOUTPUT[ 2 ]", &mut printed);
    assert!(result.is_err());
    assert_eq!(printed, vec![Value::Number(1.0)]);

    let result = session.execute("x EQUALS 1\nOUTPUT[ 1 ADD ]\nx EQUALS 2", &mut printed);
    assert!(matches!(result, Err(Error::Syntax(SyntaxError::UnexpectedEndOfLine { .. }))));
    assert_eq!(session.environment().get("x"), Some(&Value::Number(1.0)));
}

#[test]
fn session_keeps_variables_between_runs() {
    let mut session = Session::new(Config::default());
    let mut printed: Vec<Value> = Vec::new();

    session.execute("total EQUALS 0", &mut printed).unwrap();
    for _ in 0..3 {
        session.execute("total EQUALS total ADD 2", &mut printed).unwrap();
    }
    session.execute("OUTPUT[ total ]", &mut printed).unwrap();

    assert_eq!(printed, vec![Value::Number(6.0)]);
    assert_eq!(session.environment().len(), 1);
}

#[test]
fn debug_mode_prints_every_simple_statement() {
    let config = Config::default().with_debug(true);
    let output = get_result(&config, "x EQUALS 3\nx ADD 1\nIF x SAMEAS 3 [ 7 ]\nOUTPUT[ x ]");
    assert_eq!(output, Ok(vec!["3".to_string(), "4".to_string(), "7".to_string(), "3".to_string()]));
}

#[test]
fn bare_expressions_are_silent() {
    assert_output("1 ADD 1\nx EQUALS 2\nOUTPUT[ x ]", &["2"]);
}

#[test]
fn empty_programs_are_rejected() {
    let err = failure("   \n\n\t");
    assert_eq!(err.render("<program>", None), "Runtime error: No text found\nFile <program>, line 3");

    assert_output("IF 1 LESSTHAN 2 [ ]\nOUTPUT[ 1 ]", &["1"]);
}

#[test]
fn lexical_errors_point_at_the_character() {
    let err = failure("x EQUALS 1\ny EQUALS 2 @ 3");
    assert_eq!(err.render("prog", Some(0)),
               "           ^\nIllegal character: '@'\nFile prog, line 2");
}

#[test]
fn unterminated_strings_are_syntax_errors() {
    let err = failure("OUTPUT[ \"abc ]");
    assert!(matches!(err, Error::Syntax(SyntaxError::UnterminatedString { .. })));
    assert_eq!(err.render("prog", Some(0)),
               "        ^^^^^^\nSyntax error: Expected \"\nFile prog, line 1");

    let err = failure("x EQUALS \"abc");
    assert_eq!(err.render("prog", None), "Syntax error: Expected \"\nFile prog, line 1");
}

#[test]
fn syntax_errors_have_distinct_messages() {
    let cases = [("x 5", "Expected EQUALS"),
                 ("OUTPUT[ (1 ADD 2 ]", "Expected ')'"),
                 ("IF 1 LESSTHAN 2 [ OUTPUT[ 1 ]", "Expected ']'"),
                 ("IF 1 LESSTHAN 2 OUTPUT[ 1 ]", "Expected '['"),
                 ("ELSE [ OUTPUT[ 1 ] ]", "ELSE without a preceding IF"),
                 ("ELSEIF 1 LESSTHAN 2 [ ]", "ELSEIF without a preceding IF"),
                 ("OUTPUT[ x EQUALS 1 ]", "Cannot output an assignment"),
                 ("x EQUALS y EQUALS 1", "Cannot assign inside an expression"),
                 ("x EQUALS \"a\" JOIN \"b\" ADD 1", "Cannot mix string and arithmetic operators"),
                 ("BREAK 1", "BREAK must stand alone"),
                 ("OUTPUT[ 1 ] 2", "Invalid syntax"),
                 ("FOR 1 FROM 0 TO 1 [ ]", "Expected identifier after FOR")];

    for (src, message) in cases {
        let err = failure(src);
        assert_eq!(err.kind(), "Syntax error", "for {src:?}");
        assert_eq!(err.to_string(), message, "for {src:?}");
    }
}

#[test]
fn else_on_its_own_line_is_dangling() {
    let err = failure("IF 1 LESSTHAN 2 [ OUTPUT[ 1 ] ]\nELSE [ OUTPUT[ 2 ] ]");
    assert!(matches!(err, Error::Syntax(SyntaxError::DanglingBranch { keyword: "ELSE", .. })));
}

#[test]
fn nesting_limit_is_configurable() {
    let config = Config::default().with_max_nesting(2);
    let deep = "IF 1 LESSTHAN 2 [ IF 1 LESSTHAN 2 [ IF 1 LESSTHAN 2 [ OUTPUT[ 1 ] ] ] ]";
    let err = get_result(&config, deep).unwrap_err();
    assert!(err.starts_with("Syntax error: Nesting is too deep"));

    let config = Config::default().with_max_nesting(4);
    assert_eq!(get_result(&config, deep), Ok(vec!["1".to_string()]));
}

#[test]
fn deeply_nested_parentheses_fail_safely() {
    let src = format!("OUTPUT[ {}1{} ]", "(".repeat(500), ")".repeat(500));
    let err = failure(&src);
    assert!(matches!(err, Error::Syntax(SyntaxError::NestingTooDeep { .. })));

    let src = format!("OUTPUT[ {}1{} ]", "(".repeat(60), ")".repeat(60));
    assert_output(&src, &["1"]);
}

#[test]
fn crlf_line_endings_are_accepted() {
    assert_output("x EQUALS 2\r\nOUTPUT[ x ]\r\n", &["2"]);
}

#[test]
fn long_operator_chains_evaluate() {
    assert_output(&format!("OUTPUT[ 0{} ]", " ADD 1".repeat(100_000)), &["100000"]);
    assert_output(&format!("OUTPUT[ {}2 ]", "- ".repeat(100_000)), &["2"]);
    assert_output(&format!("OUTPUT[ 1{} ]", " MULTIPLY 1 MINUS 1 ADD 1".repeat(50_000)), &["1"]);
    assert_output(&format!("OUTPUT[ LENGTH \"\"{} ]", " JOIN \"a\"".repeat(10_000)), &["10000"]);
}

#[test]
fn deeply_nested_length_fails_safely() {
    let err = failure(&format!("OUTPUT[ {}\"a\" ]", "LENGTH ".repeat(100_000)));
    assert!(matches!(err, Error::Syntax(SyntaxError::NestingTooDeep { limit: 64, .. })));

    let err = failure(&format!("x EQUALS LENGTH \"a\"{}", " MULTIPLY LENGTH \"a\"".repeat(100)));
    assert!(matches!(err, Error::Syntax(SyntaxError::NestingTooDeep { .. })));

    assert_output("OUTPUT[ LENGTH \"ab\" MULTIPLY LENGTH \"ccc\" ]", &["6"]);
}
