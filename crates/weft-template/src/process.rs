use weft_tree::{NodeFn, NodeRef, ProcessFn, Tree, WalkEvent};

use crate::TemplateError;
use crate::TextToken::{self, *};

pub(crate) const START_MARK: &str = ">>";
pub(crate) const END_MARK: &str = "<<";

/// [`process`] as a whole-tree hook for [`weft_tree::run`].
pub const PROCESS: ProcessFn<TextToken, char, String, TemplateError> = process;
/// [`process_node`] as a per-node hook.
pub const PROCESS_NODE: NodeFn<TextToken, char, String, TemplateError> = process_node;

/// Renders every top-level node, see [`process_node`].
pub fn process(t: &Tree<'_, TextToken, char>) -> Result<String, TemplateError> {
    let mut out = String::new();
    for node in t.root_ref().children() {
        out.push_str(&PROCESS_NODE(node)?);
    }
    Ok(out)
}

/// Renders one node: text as is, templates wrapped in `>>` and `<<`.
///
/// A template without its closing brace, or a closing brace without a template, is an
/// error rather than partial output.
pub fn process_node(n: NodeRef<'_, TextToken, char>) -> Result<String, TemplateError> {
    let mut out = String::new();

    for event in n.preorder() {
        let WalkEvent::Enter(node) = event else {
            continue;
        };

        match node.kind() {
            Eof => {}
            Ident => out.extend(node.value()),
            TemplateOpen => {
                if node.last_child().map(NodeRef::kind) != Some(&TemplateClose) {
                    return Err(TemplateError::Unterminated { pos: node.pos() });
                }
                out.push_str(START_MARK);
            }
            TemplateClose => out.push_str(END_MARK),
            Error => return Err(TemplateError::UnexpectedClose { pos: node.pos() }),
        }
    }

    Ok(out)
}
