use crate::{Item, Lexer, StateFn, StateLexer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Kind {
    #[default]
    Eof,
    Word,
    Number,
}

fn lex_any(l: &mut StateLexer<'_, Kind, char>) -> Option<StateFn<Kind, char>> {
    l.accept_run(|c| c.is_whitespace());
    l.ignore();

    if l.accept_run(char::is_ascii_digit) > 0 {
        l.emit(Kind::Number);
    } else if l.accept_run(|c| c.is_alphabetic()) > 0 {
        l.emit(Kind::Word);
    } else if l.next().is_some() {
        l.ignore();
    }

    if l.is_eof() { None } else { Some(StateFn::new(lex_any)) }
}

fn collect(text: &str) -> Vec<Item<Kind, char>> {
    let input = text.chars().collect::<Vec<_>>();
    let mut lexer = StateLexer::new(StateFn::new(lex_any), &input);
    let mut items = Vec::new();

    loop {
        let item = lexer.next_item();
        let done = item.kind == Kind::Eof;
        items.push(item);
        if done {
            break;
        }
    }

    items
}

#[test]
fn emits_items_with_positions() {
    let items = collect("ab 12 c");
    assert_eq!(
        items,
        vec![
            Item::new(0, Kind::Word, ['a', 'b']),
            Item::new(3, Kind::Number, ['1', '2']),
            Item::new(6, Kind::Word, ['c']),
            Item::new(7, Kind::Eof, []),
        ]
    );
}

#[test]
fn keeps_returning_end_after_exhaustion() {
    let input = ['x'];
    let mut lexer = StateLexer::new(StateFn::new(lex_any), &input);

    assert_eq!(lexer.next_item().kind, Kind::Word);
    for _ in 0..3 {
        assert_eq!(lexer.next_item(), Item::new(1, Kind::Eof, []));
    }
}

#[test]
fn empty_input_is_end() {
    assert_eq!(collect(""), vec![Item::new(0, Kind::Eof, [])]);
}

#[test]
fn backup_stays_within_pending_lexeme() {
    let input = ['a', 'b', 'c'];
    let mut lexer = StateLexer::<Kind, char>::new(StateFn::new(lex_any), &input);

    assert_eq!(lexer.next(), Some(&'a'));
    lexer.ignore();
    assert_eq!(lexer.next(), Some(&'b'));
    assert_eq!(lexer.width(), 1);

    lexer.backup();
    lexer.backup();
    assert_eq!(lexer.pos(), 1);
    assert_eq!(lexer.extract(), &[] as &[char]);
    assert!(lexer.check(|&c| c == 'b'));
    assert!(!lexer.accept(|&c| c == 'c'));
}

#[test]
fn closures_are_lexers() {
    let mut n = 0;
    let mut lexer = || {
        n += 1;
        Item::<Kind, char>::new(n, Kind::Number, [])
    };

    assert_eq!(Lexer::<Kind, char>::next_item(&mut lexer).pos, 1);
    assert_eq!(Lexer::<Kind, char>::next_item(&mut lexer).pos, 2);
}
