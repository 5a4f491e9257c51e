use weft_lex::{StateFn, StateLexer};

use crate::TextToken::{self, *};

pub(crate) const OPEN: char = '{';
pub(crate) const CLOSE: char = '}';

fn is_text(c: &char) -> bool {
    !matches!(*c, OPEN | CLOSE)
}

pub(crate) fn text(l: &mut StateLexer<'_, TextToken, char>) -> Option<StateFn<TextToken, char>> {
    match l.next()? {
        &OPEN => l.emit(TemplateOpen),
        &CLOSE => l.emit(TemplateClose),
        _ => {
            l.accept_run(is_text);
            l.emit(Ident);
        }
    }

    Some(StateFn::new(text))
}
