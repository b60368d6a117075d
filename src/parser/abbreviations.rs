use std::cell::RefCell;
use std::mem;

use rustc_hash::FxHashMap;
use unicode_categories::UnicodeCategories;

use crate::arena_tree::Node;
use crate::nodes::{Ast, AstNode, NodeAbbreviation, NodeValue, Sourcepos};
use crate::Arena;

/// Consolidates adjacent text nodes, then wraps every whole-word occurrence
/// of a defined abbreviation.  Runs after inline resolution over the whole
/// tree.
pub(crate) fn process<'a>(
    arena: &'a Arena<AstNode<'a>>,
    root: &'a AstNode<'a>,
    abbreviations: &FxHashMap<String, String>,
) {
    let texts = consolidate_text_nodes(root);
    if abbreviations.is_empty() {
        return;
    }

    // Longest key first, so overlapping definitions prefer the longer
    // match.
    let mut keys: Vec<&String> = abbreviations.keys().filter(|k| !k.is_empty()).collect();
    keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    for node in texts {
        substitute(arena, node, &keys, abbreviations);
    }
}

/// Merges runs of adjacent `Text` siblings, which the inline pass leaves
/// behind around escapes and unmatched markers.  Returns the surviving text
/// nodes.
fn consolidate_text_nodes<'a>(root: &'a AstNode<'a>) -> Vec<&'a AstNode<'a>> {
    let mut texts = Vec::new();
    let mut stack = vec![root];

    while let Some(parent) = stack.pop() {
        let mut child_opt = parent.first_child();
        while let Some(child) = child_opt {
            if matches!(child.data.borrow().value, NodeValue::Text(..)) {
                while let Some(next) = child.next_sibling() {
                    let tail = match take_text(next) {
                        Some(tail) => tail,
                        None => break,
                    };
                    if let NodeValue::Text(text) = &mut child.data.borrow_mut().value {
                        text.push_str(&tail);
                    }
                    next.detach();
                }
                texts.push(child);
            } else {
                stack.push(child);
            }
            child_opt = child.next_sibling();
        }
    }

    texts
}

fn substitute<'a>(
    arena: &'a Arena<AstNode<'a>>,
    node: &'a AstNode<'a>,
    keys: &[&String],
    abbreviations: &FxHashMap<String, String>,
) {
    let content = match take_text(node) {
        Some(content) => content,
        None => return,
    };
    let sourcepos = node.data.borrow().sourcepos;

    let mut replacement: Vec<&'a AstNode<'a>> = Vec::new();
    let mut last = 0;
    let mut i = 0;

    'scan: while i < content.len() {
        if boundary_before(&content, i) {
            for key in keys {
                if !content[i..].starts_with(key.as_str()) {
                    continue;
                }
                let end = i + key.len();
                if !boundary_after(&content, end) {
                    continue;
                }

                if last < i {
                    replacement.push(make_inline(
                        arena,
                        NodeValue::Text(content[last..i].to_string()),
                        sourcepos,
                    ));
                }
                let title = abbreviations.get(*key).cloned().unwrap_or_default();
                replacement.push(make_inline(
                    arena,
                    NodeValue::Abbreviation(NodeAbbreviation {
                        abbr: (*key).clone(),
                        title,
                    }),
                    sourcepos,
                ));

                last = end;
                i = end;
                continue 'scan;
            }
        }
        i += content[i..].chars().next().map_or(1, char::len_utf8);
    }

    if replacement.is_empty() {
        // No occurrence; put the text back.
        if let NodeValue::Text(text) = &mut node.data.borrow_mut().value {
            *text = content;
        }
        return;
    }

    if last < content.len() {
        replacement.push(make_inline(
            arena,
            NodeValue::Text(content[last..].to_string()),
            sourcepos,
        ));
    }

    for new in replacement {
        node.insert_before(new);
    }
    node.detach();
}

fn take_text<'a>(node: &'a AstNode<'a>) -> Option<String> {
    match &mut node.data.borrow_mut().value {
        NodeValue::Text(text) => Some(mem::take(text)),
        _ => None,
    }
}

fn make_inline<'a>(
    arena: &'a Arena<AstNode<'a>>,
    value: NodeValue,
    sourcepos: Sourcepos,
) -> &'a AstNode<'a> {
    arena.alloc(Node::new(RefCell::new(Ast {
        value,
        sourcepos,
        content: String::new(),
    })))
}

// Word characters never abut an occurrence.
fn boundary_before(content: &str, i: usize) -> bool {
    match content[..i].chars().next_back() {
        Some(c) => !word_character(c),
        None => true,
    }
}

fn boundary_after(content: &str, end: usize) -> bool {
    match content[end..].chars().next() {
        Some(c) => !word_character(c),
        None => true,
    }
}

fn word_character(c: char) -> bool {
    c.is_letter() || c.is_number() || c == '_'
}
