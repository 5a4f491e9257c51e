use std::fs;
use std::path::{Path, PathBuf};

use expect_test::expect_file;

use crate::{PROCESS, PROCESS_NODE, TemplateError, TextToken, process, render, tree};

#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct TestCase {
    input: PathBuf,
    expected: PathBuf,
    text: String,
}

impl TestCase {
    fn list() -> Vec<Self> {
        let test_data_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("test_data");

        let mut cases = fs::read_dir(&test_data_dir)
            .unwrap_or_else(|err| {
                panic!("Cannot read directory {}: {err}", test_data_dir.display())
            })
            .filter_map(|entry| {
                let path = entry.ok()?.path();
                if path.extension()? == "tmpl" {
                    let expected = path.with_extension("out");
                    let text = fs::read_to_string(&path).ok()?;
                    Some(Self { input: path, expected, text })
                } else {
                    None
                }
            })
            .collect::<Vec<_>>();

        cases.sort();
        cases
    }
}

#[test]
fn templates() {
    let cases = TestCase::list();
    assert!(!cases.is_empty());

    for case in cases {
        let input = case.text.chars().collect::<Vec<_>>();
        let mut tree = tree(&input);
        tree.parse();

        let result = match process(&tree) {
            Ok(text) => format!("Ok: {text:?}"),
            Err(err) => format!("Err: {err}"),
        };

        let actual = format!("{}---\n{result}\n", tree.debug_dump());
        expect_file![&case.expected].assert_eq(&actual);
    }
}

#[test]
fn renders_simple_template() {
    assert_eq!(render("with {tmpl}."), Ok("with >>tmpl<<.".to_string()));
}

#[test]
fn renders_nested_templates() {
    let text =
        "string with {template} in it even { in {twice} out } in a row, or {even} { more {examples} if necessary}.";
    let expected = "string with >>template<< in it even >> in >>twice<< out << in a row, or >>even<< >> more >>examples<< if necessary<<.";

    assert_eq!(render(text).as_deref(), Ok(expected));
}

#[test]
fn unmatched_open_is_an_error() {
    assert_eq!(render("with {tmpl."), Err(TemplateError::Unterminated { pos: 5 }));
    assert_eq!(render("{{}"), Err(TemplateError::Unterminated { pos: 0 }));
}

#[test]
fn unmatched_close_is_an_error() {
    assert_eq!(render("a } b"), Err(TemplateError::UnexpectedClose { pos: 2 }));
    assert_eq!(render("{}}"), Err(TemplateError::UnexpectedClose { pos: 2 }));
}

#[test]
fn empty_input_renders_empty() {
    assert_eq!(render(""), Ok(String::new()));
    assert_eq!(render("{}"), Ok(">><<".to_string()));
}

#[test]
fn tree_ends_at_root() {
    let input = "a {b {c}} d".chars().collect::<Vec<_>>();
    let mut tree = tree(&input);
    tree.parse();

    assert_eq!(tree.cur(), tree.root());
    assert_eq!(tree.end_kind(), &TextToken::Eof);
    let kinds = tree.list().iter().map(|&id| *tree[id].kind()).collect::<Vec<_>>();
    assert_eq!(kinds, vec![TextToken::Ident, TextToken::TemplateOpen, TextToken::Ident]);
}

#[test]
fn diagnostic_points_at_the_brace() {
    let text = "héllo {wörld";
    let err = render(text).unwrap_err();
    let diagnostic = err.diagnostic(text);

    assert_eq!(err.pos(), 6);
    assert_eq!(&text[diagnostic.range()], "{");
    assert_eq!(diagnostic.message(), "unterminated template starting at position 6");
    assert_eq!(diagnostic.label(), "opened here");
    assert_eq!(diagnostic.help(), ["close the template with `}`".to_string()]);

    let stray = TemplateError::UnexpectedClose { pos: 2 }.diagnostic("a } b");
    assert_eq!(&"a } b"[stray.range()], "}");
    assert_eq!(stray.label(), "no template to close");
}

#[test]
fn hooks_render_whole_trees_and_single_nodes() {
    let input = "a {b {c}} d".chars().collect::<Vec<_>>();
    let mut tree = tree(&input);
    tree.parse();

    assert_eq!(PROCESS(&tree).as_deref(), Ok("a >>b >>c<<<< d"));

    let parts = tree.root_ref().children().map(PROCESS_NODE).collect::<Result<Vec<_>, _>>();
    assert_eq!(parts, Ok(vec!["a ".to_string(), ">>b >>c<<<<".to_string(), " d".to_string()]));

    let unterminated = "x {y".chars().collect::<Vec<_>>();
    let mut tree = super::tree(&unterminated);
    tree.parse();
    let template = tree.root_ref().last_child().map(PROCESS_NODE);
    assert_eq!(template, Some(Err(TemplateError::Unterminated { pos: 2 })));
}
