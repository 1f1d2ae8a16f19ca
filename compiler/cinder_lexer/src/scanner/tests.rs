#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use super::*;

/// Helper: scan a source string and collect all tokens (excluding Eof).
fn scan_all(source: &str) -> (Vec<Token>, String) {
    let mut scanner = Scanner::from_source(source, "test.cn");
    let mut tokens = Vec::new();
    loop {
        let tok = scanner.scan();
        if tok.tag == Tag::Eof {
            break;
        }
        tokens.push(tok);
    }
    (tokens, scanner.source().to_string())
}

/// Helper: scan and return tags only.
fn tags(source: &str) -> Vec<Tag> {
    scan_all(source).0.iter().map(|t| t.tag).collect()
}

/// Helper: scan and return `(tag, lexeme)` pairs.
fn lexemes(source: &str) -> Vec<(Tag, String)> {
    let (tokens, buf) = scan_all(source);
    tokens
        .iter()
        .map(|t| (t.tag, t.lexeme(&buf).to_string()))
        .collect()
}

// === End of input ===

#[test]
fn empty_input_is_eof() {
    let mut scanner = Scanner::from_source("", "");
    let tok = scanner.scan();
    assert_eq!(tok.tag, Tag::Eof);
    assert!(tok.loc.is_empty());
}

#[test]
fn eof_is_repeatable_and_position_stops() {
    let mut scanner = Scanner::from_source("a  \n", "");
    assert_eq!(scanner.scan().tag, Tag::Ident);
    let first = scanner.scan();
    assert_eq!(first.tag, Tag::Eof);
    let pos = scanner.position().clone();
    for _ in 0..5 {
        let again = scanner.scan();
        assert_eq!(again.tag, Tag::Eof);
        assert_eq!(again.loc, first.loc);
        assert_eq!(scanner.position(), &pos);
    }
}

#[test]
fn whitespace_only_is_eof() {
    assert_eq!(tags(" \t\r\n  \n"), Vec::<Tag>::new());
}

// === Identifiers and keywords ===

#[test]
fn keyword_versus_identifier() {
    assert_eq!(tags("for"), vec![Tag::For]);
    assert_eq!(tags("forward"), vec![Tag::Ident]);
}

#[test]
fn all_keywords() {
    assert_eq!(
        tags("nil break const continue else for while func if return class var"),
        vec![
            Tag::Nil,
            Tag::Break,
            Tag::Const,
            Tag::Continue,
            Tag::Else,
            Tag::For,
            Tag::While,
            Tag::Func,
            Tag::If,
            Tag::Return,
            Tag::Class,
            Tag::Var,
        ]
    );
}

#[test]
fn boolean_literals() {
    assert_eq!(tags("true false True"), vec![Tag::True, Tag::False, Tag::Ident]);
}

#[test]
fn identifiers_with_underscores_and_digits() {
    assert_eq!(
        lexemes("_tmp x1 snake_case2 ünïcode"),
        vec![
            (Tag::Ident, "_tmp".to_string()),
            (Tag::Ident, "x1".to_string()),
            (Tag::Ident, "snake_case2".to_string()),
            (Tag::Ident, "ünïcode".to_string()),
        ]
    );
}

// === Numbers ===

#[test]
fn integer() {
    let (tokens, buf) = scan_all("123");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].tag, Tag::Int);
    assert_eq!(tokens[0].loc, Loc::new(0, 3));
    assert_eq!(tokens[0].lexeme(&buf), "123");
}

#[test]
fn float() {
    let (tokens, buf) = scan_all("123.45");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].tag, Tag::Float);
    assert_eq!(tokens[0].loc.len(), 6);
    assert_eq!(tokens[0].lexeme(&buf), "123.45");
}

#[test]
fn trailing_period_is_not_part_of_number() {
    assert_eq!(
        lexemes("123."),
        vec![(Tag::Int, "123".to_string()), (Tag::Period, ".".to_string())]
    );
}

#[test]
fn member_access_after_number() {
    assert_eq!(
        lexemes("1.x"),
        vec![
            (Tag::Int, "1".to_string()),
            (Tag::Period, ".".to_string()),
            (Tag::Ident, "x".to_string()),
        ]
    );
}

#[test]
fn second_fraction_is_separate() {
    assert_eq!(tags("1.5.3"), vec![Tag::Float, Tag::Period, Tag::Int]);
}

#[test]
fn number_followed_by_identifier() {
    assert_eq!(tags("12ab"), vec![Tag::Int, Tag::Ident]);
}

// === Strings ===

#[test]
fn string_covers_contents() {
    let (tokens, buf) = scan_all(r#""hello" x"#);
    assert_eq!(tokens[0].tag, Tag::String);
    assert_eq!(tokens[0].lexeme(&buf), "hello");
    assert_eq!(tokens[0].loc, Loc::new(1, 6));
    assert_eq!(tokens[1].tag, Tag::Ident);
}

#[test]
fn empty_string() {
    assert_eq!(lexemes(r#""""#), vec![(Tag::String, String::new())]);
}

#[test]
fn newline_escape_is_rewritten_in_buffer() {
    let (tokens, buf) = scan_all(r#""\n""#);
    assert_eq!(tokens.len(), 1);
    // The escape letter became a real newline; offsets are unchanged.
    assert_eq!(buf, "\"\\\n\"");
    assert_eq!(tokens[0].lexeme(&buf), "\\\n");
    assert_eq!(tokens[0].value(), Some("\n"));
}

#[test]
fn tab_and_quote_escapes() {
    let (tokens, buf) = scan_all(r#""a\tb\"c" 1"#);
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].value(), Some("a\tb\"c"));
    assert_eq!(tokens[1].lexeme(&buf), "1");
}

#[test]
fn escaped_backslash_does_not_escape_quote() {
    let (tokens, _buf) = scan_all(r#""a\\" b"#);
    assert_eq!(tokens[0].tag, Tag::String);
    assert_eq!(tokens[0].value(), Some("a\\"));
    assert_eq!(tokens[1].tag, Tag::Ident);
}

#[test]
fn unknown_escape_kept_verbatim() {
    let (tokens, buf) = scan_all(r#""\q""#);
    assert_eq!(tokens[0].lexeme(&buf), "\\q");
    assert_eq!(tokens[0].value(), Some("\\q"));
}

#[test]
fn backslash_before_real_newline_is_kept() {
    // Same buffer bytes as an escaped `\n`, different value.
    let (tokens, buf) = scan_all("\"a\\\nb\"");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].lexeme(&buf), "a\\\nb");
    assert_eq!(tokens[0].value(), Some("a\\\nb"));

    let (tokens, _) = scan_all(r#""a\nb""#);
    assert_eq!(tokens[0].value(), Some("a\nb"));
}

#[test]
fn backslash_before_real_tab_is_kept() {
    let (tokens, _) = scan_all("\"\\\t\"");
    assert_eq!(tokens[0].value(), Some("\\\t"));
}

#[test]
fn trailing_backslash_in_unterminated_string() {
    let (tokens, _) = scan_all("\"ab\\");
    assert_eq!(tokens[0].value(), Some("ab\\"));
}

#[test]
fn unterminated_string_runs_to_end() {
    let (tokens, buf) = scan_all("\"abc def");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].tag, Tag::String);
    assert_eq!(tokens[0].lexeme(&buf), "abc def");
}

#[test]
fn raw_string_is_verbatim() {
    let (tokens, buf) = scan_all("`a\\nb\nc` 7");
    assert_eq!(tokens[0].tag, Tag::String);
    assert_eq!(tokens[0].lexeme(&buf), "a\\nb\nc");
    assert_eq!(tokens[0].value(), Some("a\\nb\nc"));
    assert_eq!(tokens[1].tag, Tag::Int);
}

#[test]
fn unterminated_raw_string_runs_to_end() {
    assert_eq!(lexemes("`open"), vec![(Tag::String, "open".to_string())]);
}

// === Operators ===

#[test]
fn add_assign_is_one_token() {
    assert_eq!(tags("+="), vec![Tag::AddAssign]);
    assert_eq!(tags("+ ="), vec![Tag::Add, Tag::Assign]);
}

#[test]
fn single_character_operators() {
    assert_eq!(
        tags("+ - * / % & | ^ < > = ! :"),
        vec![
            Tag::Add,
            Tag::Sub,
            Tag::Mul,
            Tag::Quo,
            Tag::Rem,
            Tag::And,
            Tag::Or,
            Tag::Xor,
            Tag::Lss,
            Tag::Gtr,
            Tag::Assign,
            Tag::Not,
            Tag::Colon,
        ]
    );
}

#[test]
fn two_character_operators() {
    assert_eq!(
        tags("++ -- += -= *= /= %= ^= |= &= || && == != <= >= << >> <- :="),
        vec![
            Tag::Inc,
            Tag::Dec,
            Tag::AddAssign,
            Tag::SubAssign,
            Tag::MulAssign,
            Tag::QuoAssign,
            Tag::RemAssign,
            Tag::XorAssign,
            Tag::OrAssign,
            Tag::AndAssign,
            Tag::Lor,
            Tag::Land,
            Tag::Eql,
            Tag::Neq,
            Tag::Leq,
            Tag::Geq,
            Tag::Shl,
            Tag::Shr,
            Tag::Arrow,
            Tag::Define,
        ]
    );
}

#[test]
fn three_character_operators() {
    assert_eq!(tags("<<= >>= ..."), vec![Tag::ShlAssign, Tag::ShrAssign, Tag::Ellipsis]);
}

#[test]
fn two_periods_are_two_tokens() {
    assert_eq!(tags(".."), vec![Tag::Period, Tag::Period]);
    assert_eq!(tags("...."), vec![Tag::Ellipsis, Tag::Period]);
}

#[test]
fn adjacent_operators_take_longest_first() {
    assert_eq!(tags("a+++b"), vec![Tag::Ident, Tag::Inc, Tag::Add, Tag::Ident]);
    assert_eq!(tags("x--=1"), vec![Tag::Ident, Tag::Dec, Tag::Assign, Tag::Int]);
    assert_eq!(tags("a<<=b"), vec![Tag::Ident, Tag::ShlAssign, Tag::Ident]);
}

#[test]
fn delimiters() {
    assert_eq!(
        tags("( ) { } [ ] , ; ."),
        vec![
            Tag::Lparen,
            Tag::Rparen,
            Tag::Lbrace,
            Tag::Rbrace,
            Tag::Lbrack,
            Tag::Rbrack,
            Tag::Comma,
            Tag::Semicolon,
            Tag::Period,
        ]
    );
}

// === Comments ===

#[test]
fn comment_is_skipped() {
    assert_eq!(
        lexemes("1 // comment\n2"),
        vec![(Tag::Int, "1".to_string()), (Tag::Int, "2".to_string())]
    );
}

#[test]
fn comment_at_end_of_input() {
    assert_eq!(tags("x // trailing"), vec![Tag::Ident]);
}

#[test]
fn consecutive_comment_lines() {
    let source = "// a\n// b\n\n   // c\nvalue";
    assert_eq!(tags(source), vec![Tag::Ident]);
}

#[test]
fn many_comment_lines_do_not_recurse() {
    let mut source = "// filler\n".repeat(50_000);
    source.push_str("last");
    assert_eq!(tags(&source), vec![Tag::Ident]);
}

#[test]
fn slash_is_still_division() {
    assert_eq!(tags("a / b /= c"), vec![Tag::Ident, Tag::Quo, Tag::Ident, Tag::QuoAssign, Tag::Ident]);
}

// === Illegal input ===

#[test]
fn unknown_character_is_illegal() {
    let (tokens, buf) = scan_all("a # b");
    assert_eq!(tokens[1].tag, Tag::Illegal);
    assert_eq!(tokens[1].lexeme(&buf), "#");
    assert_eq!(tokens[2].tag, Tag::Ident);
}

#[test]
fn illegal_spans_one_multibyte_code_point() {
    let (tokens, buf) = scan_all("€1");
    assert_eq!(tokens[0].tag, Tag::Illegal);
    assert_eq!(tokens[0].loc.len(), '€'.len_utf8());
    assert_eq!(tokens[0].lexeme(&buf), "€");
    assert_eq!(tokens[1].tag, Tag::Int);
}

#[test]
fn invalid_utf8_is_illegal() {
    let bytes = [b'1', b' ', 0xFF, b' ', b'2'];
    let mut scanner = Scanner::new(&bytes[..], "bin.cn", bytes.len());
    assert_eq!(scanner.scan().tag, Tag::Int);
    assert_eq!(scanner.scan().tag, Tag::Illegal);
    assert_eq!(scanner.scan().tag, Tag::Int);
    assert_eq!(scanner.scan().tag, Tag::Eof);
}

// === Positions ===

#[test]
fn token_position_is_lexeme_start() {
    let (tokens, _) = scan_all("ab\n  cd");
    assert_eq!(tokens[0].pos.line, 1);
    assert_eq!(tokens[0].pos.column, 0);
    assert_eq!(tokens[0].pos.offset, 0);
    assert_eq!(tokens[1].pos.line, 2);
    assert_eq!(tokens[1].pos.column, 2);
    assert_eq!(tokens[1].pos.offset, 5);
    assert_eq!(&*tokens[1].pos.filename, "test.cn");
}

#[test]
fn columns_count_bytes() {
    let (tokens, _) = scan_all("é x");
    assert_eq!(tokens[1].pos.column, 3);
    assert_eq!(tokens[1].pos.offset, 3);
}

#[test]
fn cursor_after_comment_counts_lines() {
    let (tokens, _) = scan_all("// one\n// two\nz");
    assert_eq!(tokens[0].pos.line, 3);
    assert_eq!(tokens[0].pos.column, 0);
}

#[test]
fn pushback_restores_position_exactly() {
    let mut scanner = Scanner::from_source("a\nb", "");
    assert_eq!(scanner.advance(), Some('a'));
    assert_eq!(scanner.advance(), Some('\n'));
    let after = scanner.position().clone();
    assert_eq!(after.line, 2);

    scanner.unread();
    assert_eq!(scanner.position().line, 1);
    assert_eq!(scanner.position().column, 1);
    assert_eq!(scanner.position().offset, 1);
    assert_eq!(scanner.source(), "a");

    assert_eq!(scanner.advance(), Some('\n'));
    assert_eq!(scanner.position(), &after);
    assert_eq!(scanner.source(), "a\n");
}

#[test]
fn second_pushback_is_ignored() {
    let mut scanner = Scanner::from_source("xy", "");
    scanner.advance();
    scanner.advance();
    scanner.unread();
    scanner.unread();
    assert_eq!(scanner.source(), "x");
    assert_eq!(scanner.position().offset, 1);
}

// === Source buffer ===

#[test]
fn source_accumulates_everything_consumed() {
    let mut scanner = Scanner::from_source("a = 1 // c\n", "");
    while scanner.scan().tag != Tag::Eof {}
    assert_eq!(scanner.source(), "a = 1 // c\n");
}

#[test]
fn reads_from_any_reader() {
    let reader = std::io::Cursor::new(b"x*2".to_vec());
    let mut scanner = Scanner::with_filename(reader, "cursor.cn");
    assert_eq!(scanner.filename(), "cursor.cn");
    let found: Vec<Tag> = scanner.tokens().map(|t| t.tag).collect();
    assert_eq!(found, vec![Tag::Ident, Tag::Mul, Tag::Int, Tag::Eof]);
    assert_eq!(scanner.scan().tag, Tag::Eof);
    assert!(scanner.take_io_error().is_none());
}

// ─── Property Tests ────────────────────────────────────────────

mod proptest_scanner {
    use super::*;
    use proptest::prelude::*;

    /// Lexemes that scan back to themselves when separated by a space.
    fn lexeme() -> impl Strategy<Value = String> {
        prop_oneof![
            "[a-z_][a-z0-9_]{0,6}",
            "[0-9]{1,5}",
            "[0-9]{1,3}\\.[0-9]{1,3}",
            Just("+=".to_string()),
            Just("<<=".to_string()),
            Just("&&".to_string()),
            Just("==".to_string()),
            Just("(".to_string()),
            Just(")".to_string()),
            Just("...".to_string()),
            Just("-".to_string()),
        ]
    }

    proptest! {
        #[test]
        fn lexemes_round_trip(words in proptest::collection::vec(lexeme(), 0..16)) {
            let line = words.join(" ");
            let (tokens, buf) = scan_all(&line);
            let got: Vec<String> = tokens.iter().map(|t| t.lexeme(&buf).to_string()).collect();
            prop_assert_eq!(got, words);
        }

        #[test]
        fn eof_forever(input in "\\PC{0,40}") {
            let mut scanner = Scanner::from_source(&input, "");
            let mut guard = 0;
            while scanner.scan().tag != Tag::Eof {
                guard += 1;
                prop_assert!(guard <= input.len() + 1, "scanner did not terminate");
            }
            let offset = scanner.position().offset;
            for _ in 0..3 {
                prop_assert_eq!(scanner.scan().tag, Tag::Eof);
                prop_assert_eq!(scanner.position().offset, offset);
            }
            prop_assert!(offset <= scanner.source().len());
        }

        #[test]
        fn locs_stay_in_buffer(input in "\\PC{0,40}") {
            let mut scanner = Scanner::from_source(&input, "");
            loop {
                let tok = scanner.scan();
                prop_assert!(tok.loc.start <= tok.loc.end);
                prop_assert!(tok.loc.end <= scanner.source().len());
                prop_assert!(tok.loc.slice(scanner.source()).is_some());
                if tok.tag == Tag::Eof {
                    break;
                }
            }
        }
    }
}
