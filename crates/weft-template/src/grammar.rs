use weft_lex::Item;
use weft_tree::{ParseFn, Tree};

use crate::TextToken::{self, *};

type TextTree<'a> = Tree<'a, TextToken, char>;
type Next = Option<ParseFn<TextToken, char>>;

/// Dispatches on the next item without consuming it.
pub(crate) fn start(t: &mut TextTree<'_>) -> Next {
    let routine: fn(&mut TextTree<'_>) -> Next = match t.peek().kind {
        Eof => return None,
        Ident | Error => text,
        TemplateOpen => open,
        TemplateClose => close,
    };

    Some(ParseFn::new(routine))
}

fn text(t: &mut TextTree<'_>) -> Next {
    let item = t.next();
    t.node(item);
    t.up();

    Some(ParseFn::new(start))
}

/// Opens a template; everything up to the matching close nests under it.
fn open(t: &mut TextTree<'_>) -> Next {
    let item = t.next();
    t.node(item);

    Some(ParseFn::new(start))
}

fn close(t: &mut TextTree<'_>) -> Next {
    let item = t.next();

    if t[t.cur()].kind() == &TemplateOpen {
        t.node(item);
        t.up();
        t.up();
    } else {
        t.node(Item::new(item.pos, Error, item.value));
        t.up();
    }

    Some(ParseFn::new(start))
}
