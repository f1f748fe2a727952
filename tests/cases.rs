//! Canned input/output cases driven through the public API only:
//! each case pairs an input with the exact printed form (or error text)
//! the tools produce for it.

use consish::reader::{self, Source, TokenKind};

fn printed(input: &str) -> Result<String, String> {
    let source = Source::new("case", input);
    reader::parse_file(source.cursor())
        .map(|file| format!("{}", file))
        .map_err(|err| format!("{}", err))
}

fn token_lines(input: &str) -> Vec<String> {
    let source = Source::new("case", input);
    reader::tokens(source.cursor())
        .take_while(|(kind, _)| !kind.is_terminal())
        .map(|(kind, lexeme)| format!("{}:{}", kind, lexeme))
        .collect()
}

#[test]
fn parse_cases() {
    let cases: &[(&str, &str, &str)] = &[
        ("empty", "", "File()"),
        ("ident", "foo", "File(V(A(Ident(foo))))"),
        ("two-atoms", "a b", "File(V(A(Ident(a)))V(A(Ident(b))))"),
        ("bool", "true", "File(V(A(Bool(true))))"),
        ("char", "'c'", "File(V(A(Char(c))))"),
        ("char-escape", r"'\x41'", "File(V(A(Char(A))))"),
        ("symbol", "'foo", "File(V(A(Symbol('foo))))"),
        ("binary", "0b101", "File(V(A(Integer(5))))"),
        ("octal", "-0o17", "File(V(A(Integer(-15))))"),
        ("hex", "0x1A", "File(V(A(Integer(26))))"),
        ("decimal", "12345", "File(V(A(Integer(12345))))"),
        ("float", "3.14", "File(V(A(Float(3.14))))"),
        ("rational", "1/2", "File(V(A(Rational(1/2))))"),
        ("string", r#""hi""#, "File(V(A(String(hi))))"),
        ("string-escape", r#""a\"b""#, "File(V(A(String(a\"b))))"),
        ("empty-list", "()", "File(V(L( )))"),
        (
            "nested-list",
            "(a b (c))",
            "File(V(L( V(A(Ident(a))) V(A(Ident(b))) V(L( V(A(Ident(c))) )) )))",
        ),
        ("cons-list", "'(a)", "File(V(L'( V(A(Ident(a))) )))"),
        (
            "mixed",
            "(add 1 2.5)",
            "File(V(L( V(A(Ident(add))) V(A(Integer(1))) V(A(Float(2.5))) )))",
        ),
        (
            "multi-line",
            "(a\n b)",
            "File(V(L( V(A(Ident(a))) V(A(Ident(b))) )))",
        ),
    ];
    for (name, input, want) in cases {
        match printed(input) {
            Ok(got) => assert_eq!(&got, want, "case {}", name),
            Err(err) => panic!("case {}: unexpected error: {}", name, err),
        }
    }
}

#[test]
fn error_cases() {
    // The printed error names the failure and its 1-based location.
    let cases: &[(&str, &str, &str)] = &[
        ("unterminated", "(a", "Expected closing ')' at case:1:3"),
        ("stray-close", ")", "Expected list or atom at case:1:1 char ')'"),
        (
            "overflow",
            "99999999999999999999",
            "Integer literal too large at case:1:1 char '9'",
        ),
        (
            "located",
            "a b\nc d\n    ,",
            "Expected list or atom at case:3:5 char ','",
        ),
    ];
    for (name, input, want) in cases {
        match printed(input) {
            Ok(got) => panic!("case {}: expected error, got {}", name, got),
            Err(got) => assert_eq!(&got, want, "case {}", name),
        }
    }
}

#[test]
fn tokenize_cases() {
    let cases: &[(&str, &str, &[&str])] = &[
        (
            "list",
            "(a 1)",
            &["LIST_START:(", "IDENT:a", "DEC:1", "LIST_END:)"],
        ),
        (
            "numbers",
            "0b1 0o7 0x1f 9 1.0 1/2",
            &[
                "BIN:0b1",
                "OCT:0o7",
                "HEX:0x1f",
                "DEC:9",
                "FLT:1.0",
                "RATIONAL:1/2",
            ],
        ),
        (
            "quotes",
            "'( 'a' 'sym",
            &["CONS_START:'(", "CHAR:'a'", "SYMBOL:'sym"],
        ),
        ("bools", "true false", &["BOOL:true", "BOOL:false"]),
        ("empty", "", &[]),
        ("unknown-stops", "a , b", &["IDENT:a"]),
    ];
    for (name, input, want) in cases {
        let got = token_lines(input);
        assert_eq!(got.len(), want.len(), "case {}: {:?}", name, got);
        for ((i, got), want) in got.iter().enumerate().zip(want.iter()) {
            assert_eq!(got, want, "case {} token {}", name, i);
        }
    }
}

#[test]
fn terminal_token_is_yielded_once() {
    let source = Source::new("case", "a ,");
    let kinds: Vec<TokenKind> = reader::tokens(source.cursor())
        .map(|(kind, _)| kind)
        .collect();
    assert_eq!(kinds, vec![TokenKind::Ident, TokenKind::Unknown]);
}
